//! Participant identification and hidden allegiance.
//!
//! ## ParticipantId
//!
//! Type-safe roster index supporting up to 255 participants. The human
//! player is always `ParticipantId::PLAYER` (index 0); automated
//! participants follow in configuration order.
//!
//! ## Participant
//!
//! A roster entry: display name, allegiance (fixed at round start) and the
//! alive flag (flips to `false` at most once).

use serde::{Deserialize, Serialize};

/// Participant identifier, stable for the whole round.
///
/// Ordering follows roster order, which is also the enumeration order of
/// every automated decision loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ParticipantId(pub u8);

impl ParticipantId {
    /// The human player.
    pub const PLAYER: ParticipantId = ParticipantId(0);

    /// Create a new participant ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw roster index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Is this the human player?
    #[must_use]
    pub const fn is_player(self) -> bool {
        self.0 == Self::PLAYER.0
    }

    /// Iterate over all participant IDs for a roster of `count` entries.
    ///
    /// ```
    /// use rust_deduction::core::ParticipantId;
    ///
    /// let ids: Vec<_> = ParticipantId::all(4).collect();
    /// assert_eq!(ids.len(), 4);
    /// assert_eq!(ids[0], ParticipantId::PLAYER);
    /// assert_eq!(ids[3], ParticipantId::new(3));
    /// ```
    pub fn all(count: usize) -> impl Iterator<Item = ParticipantId> {
        (0..count as u8).map(ParticipantId)
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Participant {}", self.0)
    }
}

/// Hidden faction of a participant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Allegiance {
    Human,
    Impostor,
}

impl Allegiance {
    /// Probability that an automated speaker of this allegiance suspects
    /// rather than defends.
    #[must_use]
    pub const fn suspect_bias(self) -> f64 {
        match self {
            Allegiance::Impostor => 0.7,
            Allegiance::Human => 0.6,
        }
    }
}

impl std::fmt::Display for Allegiance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Allegiance::Human => write!(f, "Human"),
            Allegiance::Impostor => write!(f, "Impostor"),
        }
    }
}

/// A roster entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Roster index.
    pub id: ParticipantId,

    /// Display name supplied by the host.
    pub name: String,

    allegiance: Allegiance,
    alive: bool,
}

impl Participant {
    /// Create a living participant.
    pub fn new(id: ParticipantId, name: impl Into<String>, allegiance: Allegiance) -> Self {
        Self {
            id,
            name: name.into(),
            allegiance,
            alive: true,
        }
    }

    #[must_use]
    pub fn allegiance(&self) -> Allegiance {
        self.allegiance
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    #[must_use]
    pub fn is_impostor(&self) -> bool {
        self.allegiance == Allegiance::Impostor
    }

    /// Mark the participant eliminated.
    ///
    /// Returns `false` if they were already dead; the flag never reverts.
    pub(crate) fn eliminate(&mut self) -> bool {
        std::mem::replace(&mut self.alive, false)
    }
}
