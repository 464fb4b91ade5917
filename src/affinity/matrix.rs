//! Dense affinity matrix.
//!
//! Stores one `i32` score per ordered pair `(observer, subject)` with
//! `observer != subject`. Backed by an `im::Vector` so cloning a round
//! state stays O(1).

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::error::{Result, RoundError};
use crate::core::event::Stance;
use crate::core::participant::ParticipantId;

/// How each participant regards every other participant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffinityMatrix {
    size: usize,
    scores: Vector<i32>,
}

impl AffinityMatrix {
    /// All pairs start at zero.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            size,
            scores: std::iter::repeat(0).take(size * size).collect(),
        }
    }

    /// Number of participants covered.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    fn slot(&self, observer: ParticipantId, subject: ParticipantId) -> Option<usize> {
        let (o, s) = (observer.index(), subject.index());
        (o != s && o < self.size && s < self.size).then_some(o * self.size + s)
    }

    /// Observer's score toward subject.
    ///
    /// `None` for self-pairs and unknown IDs.
    #[must_use]
    pub fn get(&self, observer: ParticipantId, subject: ParticipantId) -> Option<i32> {
        self.slot(observer, subject).map(|i| self.scores[i])
    }

    /// Observer's score toward subject, treating missing pairs as neutral.
    #[must_use]
    pub fn score(&self, observer: ParticipantId, subject: ParticipantId) -> i32 {
        self.get(observer, subject).unwrap_or(0)
    }

    /// Shift one ordered pair by `delta`.
    pub fn shift(&mut self, observer: ParticipantId, subject: ParticipantId, delta: i32) -> Result<()> {
        let slot = self.slot(observer, subject).ok_or(RoundError::InvalidTarget {
            target: subject,
            reason: "no affinity pair for this participant",
        })?;
        self.scores[slot] += delta;
        Ok(())
    }

    /// Apply a statement: the target's view of the speaker moves by one.
    pub fn record_statement(&mut self, speaker: ParticipantId, target: ParticipantId, stance: Stance) -> Result<()> {
        self.shift(target, speaker, stance.affinity_delta())
    }
}
