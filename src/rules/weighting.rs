//! Affinity-to-weight conversion and weighted selection.
//!
//! One pure function turns an affinity score into a selection weight for
//! each decision mode. Statements, votes and night removals all draw
//! through `choose_weighted`, so the same affinity always means the same
//! pull regardless of which phase reads it.

use crate::core::error::{Result, RoundError};
use crate::core::event::Stance;
use crate::core::participant::ParticipantId;
use crate::core::rng::GameRng;

/// Floor for every weight; no living candidate is ever impossible.
pub const MIN_WEIGHT: f32 = 0.1;

/// Weight change per affinity point.
pub const AFFINITY_SLOPE: f32 = 0.3;

/// Extra vote weight automated voters put on the human player.
pub const PLAYER_VOTE_BIAS: f32 = 0.3;

/// What a weighted choice is for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WeightMode {
    /// Disliked candidates are likelier.
    Suspect,
    /// Liked candidates are likelier.
    Defend,
    /// Like `Suspect`, plus a bonus on the biased target.
    VoteAgainst,
}

impl From<Stance> for WeightMode {
    fn from(stance: Stance) -> Self {
        match stance {
            Stance::Suspect => WeightMode::Suspect,
            Stance::Defend => WeightMode::Defend,
        }
    }
}

/// Selection weight for a candidate the chooser scores at `score`.
#[must_use]
pub fn weight(score: i32, mode: WeightMode, is_biased_target: bool) -> f32 {
    let score = score as f32;
    let raw = match mode {
        WeightMode::Suspect => 1.0 + AFFINITY_SLOPE * -score,
        WeightMode::Defend => 1.0 + AFFINITY_SLOPE * score,
        WeightMode::VoteAgainst => {
            let bias = if is_biased_target { PLAYER_VOTE_BIAS } else { 0.0 };
            1.0 + AFFINITY_SLOPE * -score + bias
        }
    };
    raw.max(MIN_WEIGHT)
}

/// Draw one candidate with probability proportional to its weight.
///
/// `candidates` and `weights` are parallel. If every weight is zero the
/// draw falls back to uniform.
pub fn choose_weighted(rng: &mut GameRng, candidates: &[ParticipantId], weights: &[f32]) -> Result<ParticipantId> {
    debug_assert_eq!(candidates.len(), weights.len());

    if candidates.is_empty() {
        return Err(RoundError::EmptyCandidateSet);
    }

    match rng.choose_weighted(weights) {
        Some(i) => Ok(candidates[i]),
        None => rng.choose(candidates).copied().ok_or(RoundError::EmptyCandidateSet),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_neutral_weights() {
        assert!(close(weight(0, WeightMode::Suspect, false), 1.0));
        assert!(close(weight(0, WeightMode::Defend, false), 1.0));
        assert!(close(weight(0, WeightMode::VoteAgainst, false), 1.0));
        assert!(close(weight(0, WeightMode::VoteAgainst, true), 1.3));
    }

    #[test]
    fn test_suspect_prefers_disliked() {
        assert!(close(weight(-2, WeightMode::Suspect, false), 1.6));
        assert!(close(weight(2, WeightMode::Suspect, false), 0.4));
        assert!(close(weight(10, WeightMode::Suspect, false), MIN_WEIGHT));
    }

    #[test]
    fn test_defend_prefers_liked() {
        assert!(close(weight(3, WeightMode::Defend, false), 1.9));
        assert!(close(weight(-3, WeightMode::Defend, false), MIN_WEIGHT));
    }

    #[test]
    fn test_bias_only_applies_to_votes() {
        assert!(close(weight(1, WeightMode::Suspect, true), weight(1, WeightMode::Suspect, false)));
        assert!(close(weight(1, WeightMode::Defend, true), weight(1, WeightMode::Defend, false)));
        assert!(close(weight(1, WeightMode::VoteAgainst, true), 1.0));
    }

    #[test]
    fn test_choose_weighted_empty() {
        let mut rng = GameRng::new(42);
        assert_eq!(choose_weighted(&mut rng, &[], &[]), Err(RoundError::EmptyCandidateSet));
    }

    #[test]
    fn test_choose_weighted_zero_falls_back_to_uniform() {
        let mut rng = GameRng::new(42);
        let candidates = [ParticipantId::new(1), ParticipantId::new(2)];

        let mut hits = [0usize; 3];
        for _ in 0..1000 {
            let chosen = choose_weighted(&mut rng, &candidates, &[0.0, 0.0]).unwrap();
            hits[chosen.index()] += 1;
        }

        assert!(hits[1] > 400 && hits[2] > 400, "{hits:?}");
    }

    #[test]
    fn test_choose_weighted_follows_weights() {
        let mut rng = GameRng::new(7);
        let candidates = [ParticipantId::new(1), ParticipantId::new(2)];

        let heavy = (0..1000)
            .filter(|_| choose_weighted(&mut rng, &candidates, &[3.0, 1.0]).unwrap() == candidates[0])
            .count();

        assert!((680..820).contains(&heavy), "{heavy}");
    }

    proptest! {
        #[test]
        fn prop_weight_never_below_floor(score in -1000i32..1000, biased in any::<bool>()) {
            for mode in [WeightMode::Suspect, WeightMode::Defend, WeightMode::VoteAgainst] {
                prop_assert!(weight(score, mode, biased) >= MIN_WEIGHT);
            }
        }

        #[test]
        fn prop_suspect_is_monotone(a in -50i32..50, b in -50i32..50) {
            if a <= b {
                prop_assert!(weight(a, WeightMode::Suspect, false) >= weight(b, WeightMode::Suspect, false));
                prop_assert!(weight(a, WeightMode::Defend, false) <= weight(b, WeightMode::Defend, false));
            }
        }
    }
}
