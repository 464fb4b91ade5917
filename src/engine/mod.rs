//! Round orchestration.
//!
//! - `round`: setup and the elimination / win check / next-day transitions
//! - `autoplay`: drive a whole round from a `PlayerPolicy`

pub mod round;
pub mod autoplay;

pub use round::initialize_round;
pub use autoplay::{play_round, PassivePlayer, PlayerPolicy, RandomPlayer};
