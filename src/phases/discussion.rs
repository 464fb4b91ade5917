//! Discussion: automated statements and the player's stance.

use smallvec::SmallVec;
use tracing::debug;

use crate::core::error::Result;
use crate::core::event::{RoundEvent, Stance};
use crate::core::participant::ParticipantId;
use crate::core::state::{Phase, RoundState};
use crate::rules::weighting::{choose_weighted, weight, WeightMode};

/// Below this many living participants, automated speakers stay silent.
pub const MIN_SPEAKING_PARTICIPANTS: usize = 3;

impl RoundState {
    /// Run one discussion turn.
    ///
    /// Every living automated participant, in roster order, picks a stance
    /// (biased by allegiance), picks a target weighted by its affinity,
    /// and the target's view of the speaker shifts by one.
    ///
    /// The turn counter always advances. Reaching the cap closes the
    /// discussion and opens the vote.
    pub fn run_discussion_turn(&mut self) -> Result<Vec<RoundEvent>> {
        self.ensure_phase(Phase::Discussion)?;

        let mut events = Vec::new();

        if self.living().count() >= MIN_SPEAKING_PARTICIPANTS {
            let speakers: SmallVec<[ParticipantId; 8]> = self.living_npcs().collect();
            for speaker in speakers {
                let (stance, target) = self.pick_statement(speaker)?;
                self.affinity.record_statement(speaker, target, stance)?;
                debug!(day = self.day, %speaker, ?stance, %target, "automated statement");
                events.push(RoundEvent::Statement { speaker, stance, target });
            }
        }

        self.discussion_turn += 1;
        if self.discussion_turn >= self.config.max_discussion_turns {
            self.open_vote(&mut events);
        }

        Ok(events)
    }

    /// Record the player's stance toward a living automated participant.
    ///
    /// Does not consume a discussion turn.
    pub fn submit_player_statement(&mut self, target: ParticipantId, stance: Stance) -> Result<Vec<RoundEvent>> {
        self.ensure_phase(Phase::Discussion)?;
        self.ensure_player_alive()?;
        self.ensure_living_npc(target)?;

        let speaker = ParticipantId::PLAYER;
        self.affinity.record_statement(speaker, target, stance)?;
        debug!(day = self.day, %target, ?stance, "player statement");

        Ok(vec![RoundEvent::Statement { speaker, stance, target }])
    }

    fn pick_statement(&mut self, speaker: ParticipantId) -> Result<(Stance, ParticipantId)> {
        let allegiance = self.participants[speaker.index()].allegiance();
        let stance = if self.rng.gen_bool(allegiance.suspect_bias()) {
            Stance::Suspect
        } else {
            Stance::Defend
        };

        let candidates: SmallVec<[ParticipantId; 8]> = self.living_except(speaker).collect();
        let mode = WeightMode::from(stance);
        let weights: SmallVec<[f32; 8]> = candidates
            .iter()
            .map(|&c| weight(self.affinity.score(speaker, c), mode, false))
            .collect();

        let target = choose_weighted(&mut self.rng, &candidates, &weights)?;
        Ok((stance, target))
    }

    pub(crate) fn open_vote(&mut self, events: &mut Vec<RoundEvent>) {
        self.phase = Phase::Vote;
        self.last_tally = None;
        self.player_ballot = None;
        debug!(day = self.day, turns = self.discussion_turn, "discussion closed");
        events.push(RoundEvent::DiscussionClosed { day: self.day });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::RoundConfig;
    use crate::core::error::RoundError;
    use crate::core::rng::GameRng;
    use crate::engine::initialize_round;

    fn round(seed: u64) -> RoundState {
        initialize_round(RoundConfig::default().with_npcs(["A", "B", "C"]).with_seed(seed)).unwrap()
    }

    #[test]
    fn test_turn_emits_one_statement_per_npc() {
        let mut state = round(42);
        let events = state.run_discussion_turn().unwrap();

        let speakers: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                RoundEvent::Statement { speaker, target, .. } => {
                    assert_ne!(speaker, target);
                    Some(*speaker)
                }
                _ => None,
            })
            .collect();

        assert_eq!(speakers, vec![ParticipantId::new(1), ParticipantId::new(2), ParticipantId::new(3)]);
        assert_eq!(state.discussion_turn(), 1);
    }

    #[test]
    fn test_statements_move_affinity() {
        let mut state = round(42);
        let events = state.run_discussion_turn().unwrap();

        let total: i32 = ParticipantId::all(4)
            .flat_map(|a| ParticipantId::all(4).map(move |b| (a, b)))
            .map(|(a, b)| state.affinity().score(a, b).abs())
            .sum();
        assert!(total > 0);
        assert!(total as usize <= events.len());
    }

    #[test]
    fn test_forced_vote_at_cap() {
        let mut state = round(42);

        for turn in 1..5 {
            let events = state.run_discussion_turn().unwrap();
            assert_eq!(state.discussion_turn(), turn);
            assert_eq!(state.phase(), Phase::Discussion);
            assert!(!events.contains(&RoundEvent::DiscussionClosed { day: 1 }));
        }

        let events = state.run_discussion_turn().unwrap();
        assert_eq!(state.discussion_turn(), 5);
        assert_eq!(state.phase(), Phase::Vote);
        assert_eq!(events.last(), Some(&RoundEvent::DiscussionClosed { day: 1 }));

        assert!(matches!(
            state.run_discussion_turn(),
            Err(RoundError::PhaseMismatch { expected: Phase::Discussion, actual: Phase::Vote })
        ));
    }

    #[test]
    fn test_player_statement_updates_target_view() {
        let mut state = round(42);
        let target = ParticipantId::new(2);

        let events = state.submit_player_statement(target, Stance::Suspect).unwrap();
        assert_eq!(events, vec![RoundEvent::Statement { speaker: ParticipantId::PLAYER, stance: Stance::Suspect, target }]);
        assert_eq!(state.affinity().score(target, ParticipantId::PLAYER), -1);
        assert_eq!(state.affinity().score(ParticipantId::PLAYER, target), 0);

        state.submit_player_statement(target, Stance::Defend).unwrap();
        state.submit_player_statement(target, Stance::Defend).unwrap();
        assert_eq!(state.affinity().score(target, ParticipantId::PLAYER), 1);
        assert_eq!(state.discussion_turn(), 0);
    }

    #[test]
    fn test_player_statement_rejections_leave_state_untouched() {
        let mut state = round(42);
        let before = state.affinity().clone();

        assert!(matches!(
            state.submit_player_statement(ParticipantId::PLAYER, Stance::Suspect),
            Err(RoundError::InvalidTarget { .. })
        ));
        assert!(matches!(
            state.submit_player_statement(ParticipantId::new(17), Stance::Defend),
            Err(RoundError::InvalidTarget { .. })
        ));
        assert_eq!(state.affinity(), &before);

        state.phase = Phase::Vote;
        assert!(matches!(
            state.submit_player_statement(ParticipantId::new(1), Stance::Suspect),
            Err(RoundError::PhaseMismatch { .. })
        ));
        assert_eq!(state.affinity(), &before);
    }

    /// Speaker 1 dislikes 3 and likes 4; nobody holds a view of speaker 1.
    fn opinionated_round() -> RoundState {
        let mut state =
            initialize_round(RoundConfig::default().with_npcs(["A", "B", "C", "D", "E"]).with_seed(42)).unwrap();
        state.affinity.shift(ParticipantId::new(1), ParticipantId::new(3), -5).unwrap();
        state.affinity.shift(ParticipantId::new(1), ParticipantId::new(4), 5).unwrap();
        assert_eq!(state.affinity().score(ParticipantId::new(3), ParticipantId::new(1)), 0);
        state
    }

    #[test]
    fn test_statement_target_follows_speaker_affinity_and_stance() {
        let base = opinionated_round();
        let (disliked, liked) = (ParticipantId::new(3), ParticipantId::new(4));

        // [suspect, defend] picks of each target
        let mut picks = [[0usize; 6]; 2];
        for seed in 0..4000 {
            let mut state = base.clone();
            state.rng = GameRng::new(seed);
            let (stance, target) = state.pick_statement(ParticipantId::new(1)).unwrap();
            let row = match stance {
                Stance::Suspect => 0,
                Stance::Defend => 1,
            };
            picks[row][target.index()] += 1;
        }

        let rate = |row: usize, target: ParticipantId| {
            picks[row][target.index()] as f64 / picks[row].iter().sum::<usize>() as f64
        };

        // Weights 2.5 / 0.1 / 1.0 x3 out of 5.6; uniform would be 0.2.
        assert!(rate(0, disliked) > 0.35, "{picks:?}");
        assert!(rate(0, liked) < 0.08, "{picks:?}");
        assert!(rate(1, liked) > 0.35, "{picks:?}");
        assert!(rate(1, disliked) < 0.08, "{picks:?}");
        assert_eq!(picks[0][1] + picks[1][1], 0);
    }

    #[test]
    fn test_degenerate_turn_is_silent_but_counts() {
        let mut state = round(42);
        state.participants[2].eliminate();
        state.participants[3].eliminate();

        let events = state.run_discussion_turn().unwrap();
        assert!(events.is_empty());
        assert_eq!(state.discussion_turn(), 1);
    }
}
