//! # rust-deduction
//!
//! A single-player social-deduction round engine: one human player and a
//! roster of automated participants, each secretly `Human` or `Impostor`,
//! cycling through discussion, voting and an optional night until one side
//! wins.
//!
//! ## Design Principles
//!
//! 1. **Explicit State**: A round is one `RoundState` value. Hosts own it,
//!    call operations on it, and replace it wholesale for a new round.
//!
//! 2. **All-or-Nothing Operations**: Every operation validates before it
//!    mutates. An `Err` leaves the state untouched.
//!
//! 3. **Deterministic Randomness**: All randomness comes from the round's
//!    seeded `GameRng`, so a seed replays a round exactly.
//!
//! 4. **Structured Output**: Operations return `RoundEvent`s; the engine
//!    never formats display text.
//!
//! ## Modules
//!
//! - `core`: Participants, RNG, configuration, events, errors, state
//! - `affinity`: Directional affinity matrix
//! - `rules`: Allegiance assignment, decision weighting, win condition
//! - `phases`: Discussion, voting and night engines
//! - `engine`: Round setup, phase transitions, autoplay
//!
//! ## Example
//!
//! ```
//! use rust_deduction::{initialize_round, Phase, RoundConfig};
//!
//! let mut round = initialize_round(RoundConfig::classic().with_seed(7)).unwrap();
//! while round.phase() == Phase::Discussion {
//!     round.run_discussion_turn().unwrap();
//! }
//! assert_eq!(round.phase(), Phase::Vote);
//!
//! round.submit_player_vote(None).unwrap();
//! assert!(round.phase() == Phase::Discussion || round.phase() == Phase::Result);
//! ```

pub mod core;
pub mod affinity;
pub mod rules;
pub mod phases;
pub mod engine;

// Re-export commonly used types
pub use crate::core::{
    Allegiance, Participant, ParticipantId,
    GameRng,
    ImpostorCount, RoundConfig,
    Result, RoundError,
    RoundEvent, Stance,
    Outcome, Phase, RosterEntry, RoundSnapshot, RoundState, SnapshotEntry,
};

pub use crate::affinity::AffinityMatrix;

pub use crate::rules::{assign_allegiances, choose_weighted, evaluate_outcome, weight, WeightMode};

pub use crate::phases::{VoteTally, Votes};

pub use crate::engine::{initialize_round, play_round, PassivePlayer, PlayerPolicy, RandomPlayer};
