//! Phase engines: discussion, voting, night.
//!
//! Each engine is an `impl RoundState` block. They validate first and
//! mutate second, so a rejected call never leaves a half-applied change.
//! Eliminations hand off to `engine` for the win check and the next
//! transition.

pub mod discussion;
pub mod voting;
pub mod night;

pub use voting::{VoteTally, Votes};
