//! Error types for round operations.

use thiserror::Error;

use super::participant::ParticipantId;
use super::state::Phase;

/// Errors returned by round operations.
///
/// Every operation checks its preconditions before touching the state, so
/// an `Err` always leaves the `RoundState` exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoundError {
    /// Invalid round setup.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Operation invoked outside its phase.
    #[error("Phase mismatch: expected {expected:?}, round is in {actual:?}")]
    PhaseMismatch { expected: Phase, actual: Phase },

    /// Target is unknown, dead, or not allowed for this operation.
    #[error("Invalid target {target}: {reason}")]
    InvalidTarget {
        target: ParticipantId,
        reason: &'static str,
    },

    /// Weighted selection over zero candidates. Indicates a sequencing bug
    /// in the caller.
    #[error("Weighted selection attempted with no candidates")]
    EmptyCandidateSet,

    /// The player has been eliminated and can no longer act.
    #[error("The player has been eliminated")]
    PlayerEliminated,

    /// The player must choose the night target.
    #[error("A night target must be chosen by the player")]
    TargetRequired,
}

/// Result alias for round operations.
pub type Result<T> = std::result::Result<T, RoundError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = RoundError::PhaseMismatch {
            expected: Phase::Vote,
            actual: Phase::Discussion,
        };
        assert_eq!(err.to_string(), "Phase mismatch: expected Vote, round is in Discussion");

        let err = RoundError::InvalidTarget {
            target: ParticipantId::new(3),
            reason: "not alive",
        };
        assert_eq!(err.to_string(), "Invalid target Participant 3: not alive");
    }
}
