//! Round state: the single value every operation reads and updates.
//!
//! ## RoundState
//!
//! Complete round data including hidden information:
//! - Day, phase, discussion turn, outcome
//! - Roster with allegiances and alive flags
//! - Affinity matrix
//! - The round's RNG
//!
//! Hosts own exactly one `RoundState` and replace it wholesale for a new
//! round. Operations live in `phases` and `engine` as `impl RoundState`
//! blocks.
//!
//! ## RoundSnapshot
//!
//! Read-only projection safe to show the player: it never carries the
//! allegiance of anyone but the player.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::config::RoundConfig;
use super::error::{Result, RoundError};
use super::participant::{Allegiance, Participant, ParticipantId};
use super::rng::GameRng;
use crate::affinity::AffinityMatrix;
use crate::phases::voting::VoteTally;

/// Round phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Discussion,
    Vote,
    Night,
    Result,
}

/// Round outcome. Final once determined.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    #[default]
    Undetermined,
    HumansWin,
    ImpostorsWin,
}

impl Outcome {
    /// The winning side, if decided.
    #[must_use]
    pub fn winner(self) -> Option<Allegiance> {
        match self {
            Outcome::Undetermined => None,
            Outcome::HumansWin => Some(Allegiance::Human),
            Outcome::ImpostorsWin => Some(Allegiance::Impostor),
        }
    }

    #[must_use]
    pub fn is_decided(self) -> bool {
        self != Outcome::Undetermined
    }
}

/// Full round state including hidden information.
#[derive(Clone, Debug)]
pub struct RoundState {
    pub(crate) config: RoundConfig,
    pub(crate) participants: Vector<Participant>,
    pub(crate) affinity: AffinityMatrix,
    pub(crate) rng: GameRng,

    pub(crate) day: u32,
    pub(crate) phase: Phase,
    pub(crate) discussion_turn: u32,
    pub(crate) outcome: Outcome,

    /// Most recent resolved vote. Cleared when a vote phase opens.
    pub(crate) last_tally: Option<VoteTally>,

    /// Player's ballot for the open vote phase.
    pub(crate) player_ballot: Option<ParticipantId>,
}

impl RoundState {
    /// Assemble a fresh day-1 state. Allegiances are already decided.
    pub(crate) fn from_parts(config: RoundConfig, participants: Vector<Participant>, rng: GameRng) -> Self {
        let affinity = AffinityMatrix::new(participants.len());
        Self {
            config,
            participants,
            affinity,
            rng,
            day: 1,
            phase: Phase::Discussion,
            discussion_turn: 0,
            outcome: Outcome::Undetermined,
            last_tally: None,
            player_ballot: None,
        }
    }

    // === Progression ===

    #[must_use]
    pub fn day(&self) -> u32 {
        self.day
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn discussion_turn(&self) -> u32 {
        self.discussion_turn
    }

    #[must_use]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    #[must_use]
    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    #[must_use]
    pub fn affinity(&self) -> &AffinityMatrix {
        &self.affinity
    }

    /// The last resolved vote, if one happened since the vote phase opened.
    #[must_use]
    pub fn last_tally(&self) -> Option<&VoteTally> {
        self.last_tally.as_ref()
    }

    /// The player's pending ballot in the open vote phase.
    #[must_use]
    pub fn player_ballot(&self) -> Option<ParticipantId> {
        self.player_ballot
    }

    /// Mutable access to the round's RNG (for callers that want to drive
    /// `collect_automated_votes` from the round's own stream).
    pub fn rng_mut(&mut self) -> &mut GameRng {
        &mut self.rng
    }

    pub(crate) fn ensure_phase(&self, expected: Phase) -> Result<()> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(RoundError::PhaseMismatch {
                expected,
                actual: self.phase,
            })
        }
    }

    // === Roster ===

    /// All participants in roster order.
    pub fn participants(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter()
    }

    #[must_use]
    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    #[must_use]
    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.get(id.index())
    }

    /// Display name for an ID.
    #[must_use]
    pub fn name(&self, id: ParticipantId) -> Option<&str> {
        self.participant(id).map(|p| p.name.as_str())
    }

    /// Look up a participant by display name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<ParticipantId> {
        self.participants.iter().find(|p| p.name == name).map(|p| p.id)
    }

    #[must_use]
    pub fn is_alive(&self, id: ParticipantId) -> bool {
        self.participant(id).is_some_and(Participant::is_alive)
    }

    /// The player's own allegiance.
    #[must_use]
    pub fn player_allegiance(&self) -> Allegiance {
        self.participants[ParticipantId::PLAYER.index()].allegiance()
    }

    /// Living participants in roster order.
    pub fn living(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter().filter(|p| p.is_alive())
    }

    /// Living participant IDs in roster order.
    pub fn living_ids(&self) -> impl Iterator<Item = ParticipantId> + '_ {
        self.living().map(|p| p.id)
    }

    /// Living participants other than `id`.
    pub fn living_except(&self, id: ParticipantId) -> impl Iterator<Item = ParticipantId> + '_ {
        self.living_ids().filter(move |&other| other != id)
    }

    /// Living automated participants in roster order.
    pub fn living_npcs(&self) -> impl Iterator<Item = ParticipantId> + '_ {
        self.living_except(ParticipantId::PLAYER)
    }

    /// Living participants of one allegiance.
    pub fn living_with(&self, allegiance: Allegiance) -> impl Iterator<Item = ParticipantId> + '_ {
        self.living().filter(move |p| p.allegiance() == allegiance).map(|p| p.id)
    }

    pub(crate) fn ensure_player_alive(&self) -> Result<()> {
        if self.is_alive(ParticipantId::PLAYER) {
            Ok(())
        } else {
            Err(RoundError::PlayerEliminated)
        }
    }

    /// Check `target` is a living participant other than the player.
    pub(crate) fn ensure_living_npc(&self, target: ParticipantId) -> Result<()> {
        if self.participant(target).is_none() {
            return Err(RoundError::InvalidTarget {
                target,
                reason: "unknown participant",
            });
        }
        if target.is_player() {
            return Err(RoundError::InvalidTarget {
                target,
                reason: "the player cannot target themselves",
            });
        }
        if !self.is_alive(target) {
            return Err(RoundError::InvalidTarget {
                target,
                reason: "participant is no longer alive",
            });
        }
        Ok(())
    }

    // === Projections ===

    /// Read-only view for the host.
    #[must_use]
    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            day: self.day,
            phase: self.phase,
            discussion_turn: self.discussion_turn,
            max_discussion_turns: self.config.max_discussion_turns,
            alive: self
                .living()
                .map(|p| SnapshotEntry {
                    id: p.id,
                    name: p.name.clone(),
                    allegiance: p.id.is_player().then(|| p.allegiance()),
                })
                .collect(),
            outcome: self.outcome,
            player_allegiance: self.player_allegiance(),
        }
    }

    /// Every participant with allegiance revealed. Only after the round ends.
    pub fn final_roster(&self) -> Result<Vec<RosterEntry>> {
        self.ensure_phase(Phase::Result)?;
        Ok(self
            .participants
            .iter()
            .map(|p| RosterEntry {
                id: p.id,
                name: p.name.clone(),
                allegiance: p.allegiance(),
                alive: p.is_alive(),
            })
            .collect())
    }

    /// Whether the player's side won. `None` while undecided.
    #[must_use]
    pub fn player_won(&self) -> Option<bool> {
        self.outcome.winner().map(|side| side == self.player_allegiance())
    }
}

/// A living participant as the player sees them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub id: ParticipantId,
    pub name: String,
    /// Only populated for the player.
    pub allegiance: Option<Allegiance>,
}

/// Host-facing projection of a round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub day: u32,
    pub phase: Phase,
    pub discussion_turn: u32,
    pub max_discussion_turns: u32,
    pub alive: Vec<SnapshotEntry>,
    pub outcome: Outcome,
    pub player_allegiance: Allegiance,
}

/// End-of-round reveal entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub id: ParticipantId,
    pub name: String,
    pub allegiance: Allegiance,
    pub alive: bool,
}
