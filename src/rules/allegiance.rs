//! One-time allegiance distribution at round start.

use crate::core::error::{Result, RoundError};
use crate::core::participant::Allegiance;
use crate::core::rng::GameRng;

/// Pick `impostor_count` distinct roster slots uniformly without
/// replacement and mark them `Impostor`; everyone else is `Human`.
///
/// The player is slot 0 and is drawn from like any other slot.
pub fn assign_allegiances(rng: &mut GameRng, participant_count: usize, impostor_count: usize) -> Result<Vec<Allegiance>> {
    if participant_count == 0 {
        return Err(RoundError::Configuration("empty participant list".into()));
    }
    if impostor_count >= participant_count {
        return Err(RoundError::Configuration(format!(
            "{impostor_count} impostors among {participant_count} participants"
        )));
    }

    let mut allegiances = vec![Allegiance::Human; participant_count];
    for slot in rng.sample_indices(participant_count, impostor_count) {
        allegiances[slot] = Allegiance::Impostor;
    }
    Ok(allegiances)
}
