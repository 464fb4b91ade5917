//! Headless driver for whole rounds.
//!
//! A `PlayerPolicy` stands in for the host's input widgets. `play_round`
//! loops the state machine until the round is decided, which makes it
//! handy for simulations and end-to-end tests.

use smallvec::SmallVec;
use tracing::debug;

use crate::core::error::Result;
use crate::core::event::{RoundEvent, Stance};
use crate::core::participant::{Allegiance, ParticipantId};
use crate::core::rng::GameRng;
use crate::core::state::{Phase, RoundState};

/// Source of the player's choices.
pub trait PlayerPolicy {
    /// Optional statement before each discussion turn.
    fn statement(&mut self, state: &RoundState, rng: &mut GameRng) -> Option<(ParticipantId, Stance)>;

    /// Ballot for the vote. `None` abstains.
    fn vote(&mut self, state: &RoundState, rng: &mut GameRng) -> Option<ParticipantId>;

    /// Night target. Only asked when the player is a living Impostor and a
    /// Human is still alive. `None` declines, which the night rejects.
    fn night_target(&mut self, state: &RoundState, rng: &mut GameRng) -> Option<ParticipantId>;
}

/// Never speaks, always abstains, removes the first living Human at night.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassivePlayer;

impl PlayerPolicy for PassivePlayer {
    fn statement(&mut self, _state: &RoundState, _rng: &mut GameRng) -> Option<(ParticipantId, Stance)> {
        None
    }

    fn vote(&mut self, _state: &RoundState, _rng: &mut GameRng) -> Option<ParticipantId> {
        None
    }

    fn night_target(&mut self, state: &RoundState, _rng: &mut GameRng) -> Option<ParticipantId> {
        state.living_with(Allegiance::Human).next()
    }
}

/// Uniformly random statements, ballots and night targets.
#[derive(Clone, Copy, Debug)]
pub struct RandomPlayer {
    /// Chance of making a statement each turn.
    pub talk_probability: f64,
}

impl Default for RandomPlayer {
    fn default() -> Self {
        Self { talk_probability: 0.5 }
    }
}

impl PlayerPolicy for RandomPlayer {
    fn statement(&mut self, state: &RoundState, rng: &mut GameRng) -> Option<(ParticipantId, Stance)> {
        if !rng.gen_bool(self.talk_probability) {
            return None;
        }
        let targets: SmallVec<[ParticipantId; 8]> = state.living_npcs().collect();
        let target = *rng.choose(&targets)?;
        let stance = if rng.gen_bool(0.5) { Stance::Suspect } else { Stance::Defend };
        Some((target, stance))
    }

    fn vote(&mut self, state: &RoundState, rng: &mut GameRng) -> Option<ParticipantId> {
        let targets: SmallVec<[ParticipantId; 8]> = state.living_npcs().collect();
        rng.choose(&targets).copied()
    }

    fn night_target(&mut self, state: &RoundState, rng: &mut GameRng) -> Option<ParticipantId> {
        let humans: SmallVec<[ParticipantId; 8]> = state.living_with(Allegiance::Human).collect();
        rng.choose(&humans).copied()
    }
}

/// Drive `state` until the round is decided or `max_days` have passed.
///
/// The policy draws from a fork of the round's RNG so its choices do not
/// shift the engine's own sequence. Returns every event in order.
pub fn play_round<P: PlayerPolicy>(state: &mut RoundState, policy: &mut P, max_days: u32) -> Result<Vec<RoundEvent>> {
    let mut policy_rng = state.rng_mut().fork();
    let mut log = Vec::new();

    while state.phase() != Phase::Result && state.day() <= max_days {
        match state.phase() {
            Phase::Discussion => {
                if state.is_alive(ParticipantId::PLAYER) {
                    if let Some((target, stance)) = policy.statement(state, &mut policy_rng) {
                        log.extend(state.submit_player_statement(target, stance)?);
                    }
                }
                log.extend(state.run_discussion_turn()?);
            }
            Phase::Vote => {
                let ballot = if state.is_alive(ParticipantId::PLAYER) {
                    policy.vote(state, &mut policy_rng)
                } else {
                    None
                };
                log.extend(state.submit_player_vote(ballot)?);
            }
            Phase::Night => {
                let target = if state.player_chooses_night_target() {
                    policy.night_target(state, &mut policy_rng)
                } else {
                    None
                };
                log.extend(state.resolve_night_kill(target)?);
            }
            Phase::Result => unreachable!("loop exits on Result"),
        }
    }

    debug!(day = state.day(), outcome = ?state.outcome(), events = log.len(), "autoplay finished");
    Ok(log)
}
