//! Round rules: allegiance assignment, decision weighting, win condition.
//!
//! These are pure functions over the RNG and the roster. The phase
//! engines call into them but never reimplement them.

pub mod allegiance;
pub mod weighting;
pub mod win;

pub use allegiance::assign_allegiances;
pub use weighting::{choose_weighted, weight, WeightMode, AFFINITY_SLOPE, MIN_WEIGHT, PLAYER_VOTE_BIAS};
pub use win::{evaluate_counts, evaluate_outcome};
