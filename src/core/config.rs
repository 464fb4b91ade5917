//! Round configuration.
//!
//! Hosts configure a round at startup by providing a `RoundConfig`:
//! - Roster: the player's name plus the automated participants' names
//! - `ImpostorCount`: fixed, or drawn uniformly from a range
//! - Discussion length and whether the night phase runs
//!
//! The engine never hardcodes these; the presets mirror the common setups.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::error::{Result, RoundError};
use super::rng::GameRng;

/// Default number of discussion turns per day.
pub const DEFAULT_MAX_DISCUSSION_TURNS: u32 = 5;

/// How many Impostors a round starts with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImpostorCount {
    /// Exactly this many.
    Fixed(u8),
    /// Uniformly drawn from `min..=max` at round start.
    Range { min: u8, max: u8 },
}

impl ImpostorCount {
    /// Largest count this setting can produce.
    #[must_use]
    pub fn max(self) -> u8 {
        match self {
            ImpostorCount::Fixed(n) => n,
            ImpostorCount::Range { max, .. } => max,
        }
    }

    /// Smallest count this setting can produce.
    #[must_use]
    pub fn min(self) -> u8 {
        match self {
            ImpostorCount::Fixed(n) => n,
            ImpostorCount::Range { min, .. } => min,
        }
    }

    /// Resolve to a concrete count.
    pub fn draw(self, rng: &mut GameRng) -> usize {
        match self {
            ImpostorCount::Fixed(n) => n as usize,
            ImpostorCount::Range { min, max } => rng.gen_range_usize(min as usize..max as usize + 1),
        }
    }
}

/// Complete round configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundConfig {
    /// Display name of the human player (roster index 0).
    pub player_name: String,

    /// Display names of the automated participants, in enumeration order.
    pub npc_names: Vec<String>,

    /// Impostor count policy.
    pub impostor_count: ImpostorCount,

    /// Discussion turns per day before the forced move to voting.
    pub max_discussion_turns: u32,

    /// Run a night elimination after each undecided vote.
    pub night_phase_enabled: bool,

    /// RNG seed. `None` draws one from OS entropy.
    pub seed: Option<u64>,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            player_name: "You".to_string(),
            npc_names: ["Setsu", "Raqio", "SQ", "Jina", "Stella", "Shigemichi"]
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            impostor_count: ImpostorCount::Fixed(1),
            max_discussion_turns: DEFAULT_MAX_DISCUSSION_TURNS,
            night_phase_enabled: false,
            seed: None,
        }
    }
}

impl RoundConfig {
    /// One Impostor, no night phase.
    #[must_use]
    pub fn classic() -> Self {
        Self::default()
    }

    /// One or two Impostors and a night elimination every day.
    #[must_use]
    pub fn night() -> Self {
        Self {
            impostor_count: ImpostorCount::Range { min: 1, max: 2 },
            night_phase_enabled: true,
            ..Self::default()
        }
    }

    /// Set the player's display name.
    #[must_use]
    pub fn with_player_name(mut self, name: impl Into<String>) -> Self {
        self.player_name = name.into();
        self
    }

    /// Replace the automated roster.
    #[must_use]
    pub fn with_npcs<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.npc_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set the impostor count policy.
    #[must_use]
    pub fn with_impostors(mut self, count: ImpostorCount) -> Self {
        self.impostor_count = count;
        self
    }

    /// Set the discussion turn cap.
    #[must_use]
    pub fn with_max_discussion_turns(mut self, turns: u32) -> Self {
        self.max_discussion_turns = turns;
        self
    }

    /// Enable or disable the night phase.
    #[must_use]
    pub fn with_night_phase(mut self, enabled: bool) -> Self {
        self.night_phase_enabled = enabled;
        self
    }

    /// Fix the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Total participants including the player.
    #[must_use]
    pub fn participant_count(&self) -> usize {
        self.npc_names.len() + 1
    }

    /// Roster names in index order, player first.
    pub fn roster(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.player_name.as_str()).chain(self.npc_names.iter().map(String::as_str))
    }

    /// Check the configuration describes a playable round.
    pub fn validate(&self) -> Result<()> {
        let total = self.participant_count();

        if self.npc_names.is_empty() {
            return Err(RoundError::Configuration("no automated participants".into()));
        }
        if total > u8::MAX as usize {
            return Err(RoundError::Configuration(format!(
                "{total} participants exceeds the limit of {}",
                u8::MAX
            )));
        }

        let mut seen = FxHashSet::default();
        for name in self.roster() {
            if name.trim().is_empty() {
                return Err(RoundError::Configuration("participant names must not be empty".into()));
            }
            if !seen.insert(name) {
                return Err(RoundError::Configuration(format!("duplicate participant name '{name}'")));
            }
        }

        let (min, max) = (self.impostor_count.min(), self.impostor_count.max());
        if min == 0 {
            return Err(RoundError::Configuration("at least one impostor is required".into()));
        }
        if min > max {
            return Err(RoundError::Configuration(format!(
                "impostor range {min}..={max} is empty"
            )));
        }
        if max as usize >= total {
            return Err(RoundError::Configuration(format!(
                "{max} impostors requires more than {total} participants"
            )));
        }

        if self.max_discussion_turns == 0 {
            return Err(RoundError::Configuration("max_discussion_turns must be at least 1".into()));
        }

        Ok(())
    }
}
