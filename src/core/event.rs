//! Round events.
//!
//! Every operation returns the ordered events it produced. Events are
//! structured records; hosts turn them into log lines. Allegiance only
//! appears in events that publicly reveal it (eliminations).

use serde::{Deserialize, Serialize};

use super::participant::{Allegiance, ParticipantId};
use super::state::Outcome;

/// What a statement says about its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stance {
    /// "X seems suspicious."
    Suspect,
    /// "X can be trusted."
    Defend,
}

impl Stance {
    /// Affinity delta applied to the target's view of the speaker.
    #[must_use]
    pub const fn affinity_delta(self) -> i32 {
        match self {
            Stance::Suspect => -1,
            Stance::Defend => 1,
        }
    }
}

/// A single thing that happened in a round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum RoundEvent {
    /// A participant suspected or defended another.
    Statement {
        speaker: ParticipantId,
        stance: Stance,
        target: ParticipantId,
    },

    /// Discussion hit the turn cap; voting begins.
    DiscussionClosed { day: u32 },

    /// One ballot of a resolved vote.
    BallotCast {
        voter: ParticipantId,
        target: ParticipantId,
    },

    /// Voted out.
    Eliminated {
        participant: ParticipantId,
        allegiance: Allegiance,
    },

    /// Night begins.
    NightFell { day: u32 },

    /// Removed by the Impostors during the night.
    RemovedInNight {
        participant: ParticipantId,
        allegiance: Allegiance,
    },

    /// Night passed without a removal.
    QuietNight { day: u32 },

    /// A new discussion day.
    DayStarted { day: u32 },

    /// The round is over.
    RoundDecided { outcome: Outcome },
}

impl RoundEvent {
    /// The participant removed by this event, if any.
    #[must_use]
    pub fn removed(&self) -> Option<ParticipantId> {
        match self {
            RoundEvent::Eliminated { participant, .. } | RoundEvent::RemovedInNight { participant, .. } => {
                Some(*participant)
            }
            _ => None,
        }
    }
}
