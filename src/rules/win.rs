//! Win condition, checked after every elimination.

use crate::core::participant::Allegiance;
use crate::core::state::{Outcome, RoundState};

/// Decide the outcome from living faction sizes.
///
/// - no Impostors left: Humans win
/// - Humans no longer outnumber Impostors: Impostors win
#[must_use]
pub fn evaluate_counts(humans: usize, impostors: usize) -> Outcome {
    if impostors == 0 {
        Outcome::HumansWin
    } else if humans <= impostors {
        Outcome::ImpostorsWin
    } else {
        Outcome::Undetermined
    }
}

/// Decide the outcome for a round's current roster.
#[must_use]
pub fn evaluate_outcome(state: &RoundState) -> Outcome {
    evaluate_counts(
        state.living_with(Allegiance::Human).count(),
        state.living_with(Allegiance::Impostor).count(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_impostors_gone() {
        assert_eq!(evaluate_counts(3, 0), Outcome::HumansWin);
        assert_eq!(evaluate_counts(0, 0), Outcome::HumansWin);
    }

    #[test]
    fn test_parity() {
        assert_eq!(evaluate_counts(1, 1), Outcome::ImpostorsWin);
        assert_eq!(evaluate_counts(2, 2), Outcome::ImpostorsWin);
        assert_eq!(evaluate_counts(1, 2), Outcome::ImpostorsWin);
    }

    #[test]
    fn test_undetermined() {
        assert_eq!(evaluate_counts(2, 1), Outcome::Undetermined);
        assert_eq!(evaluate_counts(5, 2), Outcome::Undetermined);
    }
}
