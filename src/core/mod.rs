//! Core round types: participants, RNG, configuration, events, errors, state.
//!
//! This module holds the data every component shares. Decisions live in
//! `rules` and `phases`; orchestration lives in `engine`.

pub mod participant;
pub mod rng;
pub mod config;
pub mod error;
pub mod event;
pub mod state;

pub use participant::{Allegiance, Participant, ParticipantId};
pub use rng::GameRng;
pub use config::{ImpostorCount, RoundConfig, DEFAULT_MAX_DISCUSSION_TURNS};
pub use error::{Result, RoundError};
pub use event::{RoundEvent, Stance};
pub use state::{Outcome, Phase, RosterEntry, RoundSnapshot, RoundState, SnapshotEntry};
