//! Directional affinity between participants.
//!
//! Affinity is the only memory automated participants have. Every weighted
//! decision (statements, votes, night removals) reads it, and only
//! statements write it.

pub mod matrix;

pub use matrix::AffinityMatrix;
