//! Round state machine: setup and the transitions shared by every phase.
//!
//! ```text
//! Discussion --(turn cap)--> Vote --(undecided, night on)--> Night --+
//!     ^                        |                                     |
//!     +----(undecided, next day)+-------------(undecided)------------+
//!                              |                                     |
//!                              +------(decided)--> Result <----------+
//! ```

use im::Vector;
use tracing::{debug, info};

use crate::core::config::RoundConfig;
use crate::core::error::Result;
use crate::core::event::RoundEvent;
use crate::core::participant::{Allegiance, Participant, ParticipantId};
use crate::core::rng::GameRng;
use crate::core::state::{Phase, RoundState};
use crate::rules::allegiance::assign_allegiances;
use crate::rules::win::evaluate_outcome;

/// Start a new round: validate the configuration, draw the impostor count
/// and distribute allegiances.
pub fn initialize_round(config: RoundConfig) -> Result<RoundState> {
    config.validate()?;

    let mut rng = match config.seed {
        Some(seed) => GameRng::new(seed),
        None => GameRng::from_entropy(),
    };

    let impostor_count = config.impostor_count.draw(&mut rng);
    let allegiances = assign_allegiances(&mut rng, config.participant_count(), impostor_count)?;

    let participants: Vector<Participant> = config
        .roster()
        .zip(allegiances)
        .enumerate()
        .map(|(i, (name, allegiance))| Participant::new(ParticipantId::new(i as u8), name, allegiance))
        .collect();

    info!(
        seed = rng.seed(),
        participants = participants.len(),
        impostors = impostor_count,
        night = config.night_phase_enabled,
        "round initialized"
    );

    Ok(RoundState::from_parts(config, participants, rng))
}

impl RoundState {
    /// Same as [`initialize_round`].
    pub fn new(config: RoundConfig) -> Result<Self> {
        initialize_round(config)
    }

    /// Flip a participant's alive flag and reveal their allegiance.
    pub(crate) fn eliminate(&mut self, id: ParticipantId) -> Allegiance {
        let participant = &mut self.participants[id.index()];
        let was_alive = participant.eliminate();
        debug_assert!(was_alive, "{id} eliminated twice");
        participant.allegiance()
    }

    /// Evaluate the win condition. Returns `true` if the round ended.
    fn conclude_if_decided(&mut self, events: &mut Vec<RoundEvent>) -> bool {
        if self.outcome.is_decided() {
            return true;
        }

        let outcome = evaluate_outcome(self);
        if !outcome.is_decided() {
            return false;
        }

        self.outcome = outcome;
        self.phase = Phase::Result;
        info!(day = self.day, ?outcome, player_won = ?self.player_won(), "round decided");
        events.push(RoundEvent::RoundDecided { outcome });
        true
    }

    fn begin_next_day(&mut self, events: &mut Vec<RoundEvent>) {
        self.day += 1;
        self.discussion_turn = 0;
        self.phase = Phase::Discussion;
        debug!(day = self.day, "day started");
        events.push(RoundEvent::DayStarted { day: self.day });
    }

    pub(crate) fn settle_after_vote(&mut self, events: &mut Vec<RoundEvent>) {
        if self.conclude_if_decided(events) {
            return;
        }

        if self.config.night_phase_enabled {
            self.phase = Phase::Night;
            debug!(day = self.day, "night fell");
            events.push(RoundEvent::NightFell { day: self.day });
        } else {
            self.begin_next_day(events);
        }
    }

    pub(crate) fn settle_after_night(&mut self, events: &mut Vec<RoundEvent>) {
        if !self.conclude_if_decided(events) {
            self.begin_next_day(events);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ImpostorCount;
    use crate::core::error::RoundError;
    use crate::core::state::Outcome;

    fn four_player(seed: u64) -> RoundState {
        initialize_round(RoundConfig::default().with_npcs(["A", "B", "C"]).with_seed(seed)).unwrap()
    }

    #[test]
    fn test_initialize_round() {
        let state = four_player(42);

        assert_eq!(state.participant_count(), 4);
        assert_eq!(state.name(ParticipantId::PLAYER), Some("You"));
        assert_eq!(state.living_with(Allegiance::Impostor).count(), 1);
        assert_eq!(state.day(), 1);
        assert_eq!(state.phase(), Phase::Discussion);
        assert_eq!(state.outcome(), Outcome::Undetermined);
    }

    #[test]
    fn test_same_seed_same_round() {
        let a = four_player(7);
        let b = four_player(7);

        let roles = |s: &RoundState| s.participants().map(Participant::allegiance).collect::<Vec<_>>();
        assert_eq!(roles(&a), roles(&b));
    }

    #[test]
    fn test_impostor_range() {
        let config = RoundConfig::night().with_impostors(ImpostorCount::Range { min: 1, max: 2 });

        let mut seen = [false; 3];
        for seed in 0..100 {
            let state = initialize_round(config.clone().with_seed(seed)).unwrap();
            seen[state.living_with(Allegiance::Impostor).count()] = true;
        }
        assert!(!seen[0] && seen[1] && seen[2]);
    }

    #[test]
    fn test_rejects_bad_config() {
        let config = RoundConfig::default().with_npcs(["A"]).with_impostors(ImpostorCount::Fixed(2));
        assert!(matches!(initialize_round(config), Err(RoundError::Configuration(_))));
    }

    /// Build a state whose only impostor is known.
    fn with_impostor_at(seed: u64) -> (RoundState, ParticipantId) {
        let state = four_player(seed);
        let impostor = state.living_with(Allegiance::Impostor).next().unwrap();
        (state, impostor)
    }

    #[test]
    fn test_impostor_elimination_humans_win() {
        let (mut state, impostor) = with_impostor_at(42);
        state.phase = Phase::Vote;

        let mut events = Vec::new();
        assert_eq!(state.eliminate(impostor), Allegiance::Impostor);
        state.settle_after_vote(&mut events);

        assert_eq!(state.outcome(), Outcome::HumansWin);
        assert_eq!(state.phase(), Phase::Result);
        assert_eq!(events, vec![RoundEvent::RoundDecided { outcome: Outcome::HumansWin }]);
    }

    #[test]
    fn test_two_humans_out_impostors_win() {
        let (mut state, impostor) = with_impostor_at(42);
        let humans: Vec<_> = state.living_with(Allegiance::Human).collect();
        state.phase = Phase::Vote;

        let mut events = Vec::new();
        state.eliminate(humans[0]);
        state.settle_after_vote(&mut events);
        assert_eq!(state.outcome(), Outcome::Undetermined);
        assert_eq!(state.phase(), Phase::Discussion);
        assert_eq!(state.day(), 2);

        state.phase = Phase::Vote;
        state.eliminate(humans[1]);
        state.settle_after_vote(&mut events);
        assert_eq!(state.outcome(), Outcome::ImpostorsWin);
        assert_eq!(state.phase(), Phase::Result);
        assert!(state.is_alive(impostor));
    }

    #[test]
    fn test_vote_goes_to_night_when_enabled() {
        let mut state =
            initialize_round(RoundConfig::default().with_npcs(["A", "B", "C", "D"]).with_night_phase(true).with_seed(1))
                .unwrap();
        let human = state.living_with(Allegiance::Human).last().unwrap();
        state.phase = Phase::Vote;

        let mut events = Vec::new();
        state.eliminate(human);
        state.settle_after_vote(&mut events);

        assert_eq!(state.phase(), Phase::Night);
        assert_eq!(state.day(), 1);
        assert_eq!(events, vec![RoundEvent::NightFell { day: 1 }]);
    }

    #[test]
    fn test_outcome_is_final() {
        let (mut state, impostor) = with_impostor_at(42);
        let mut events = Vec::new();
        state.eliminate(impostor);
        assert!(state.conclude_if_decided(&mut events));

        assert!(state.conclude_if_decided(&mut events));
        assert_eq!(events.len(), 1);
        assert_eq!(state.outcome(), Outcome::HumansWin);
    }
}
