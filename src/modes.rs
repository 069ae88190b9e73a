//! Difficulty modes and round tuning
//!
//! A round's tuning is fixed at the Idle -> Running transition and never
//! changes mid-round; switching modes means restarting. Values here are
//! design parameters, not hard constants: mode defaults can be layered with
//! [`TuningOverrides`] before a round starts.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Named difficulty modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GameMode {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Easy => "easy",
            GameMode::Medium => "medium",
            GameMode::Hard => "hard",
        }
    }

    /// Parse a mode name. Unknown input falls back to Easy rather than
    /// rejecting the start command.
    pub fn from_str_lossy(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "medium" | "med" => GameMode::Medium,
            "hard" => GameMode::Hard,
            _ => GameMode::Easy,
        }
    }
}

/// What pollution contact does to the round.
///
/// The two variants reflect a genuine behavioral fork in the game's history;
/// the policy is explicit configuration rather than an inferred default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PollutionPolicy {
    /// Deduct the penalty and keep driving. `shrink_tail` controls whether
    /// the trail still pops its tail on the hit (no net growth) or keeps it
    /// (net growth of 1, like a water pickup).
    Penalize { shrink_tail: bool },
    /// Contact ends the round immediately
    EndRound,
}

impl Default for PollutionPolicy {
    fn default() -> Self {
        PollutionPolicy::Penalize { shrink_tail: true }
    }
}

/// Tuning bundle for one round, immutable for the round's duration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    pub mode: GameMode,
    pub tick_interval_ms: u64,
    pub pollution_penalty: u32,
    /// Bernoulli threshold in [0, 1]; a hazard spawns when a uniform draw
    /// exceeds it, so lower bias means more pollution
    pub pollution_bias: f64,
    /// Independent hazard trials per item regeneration
    pub hazard_attempts: u32,
    pub pollution_policy: PollutionPolicy,
}

impl DifficultyProfile {
    pub fn for_mode(mode: GameMode) -> Self {
        match mode {
            GameMode::Easy => Self {
                mode,
                tick_interval_ms: BASE_TICK_INTERVAL_MS,
                pollution_penalty: 5,
                pollution_bias: 0.70,
                hazard_attempts: 1,
                pollution_policy: PollutionPolicy::default(),
            },
            GameMode::Medium => Self {
                mode,
                tick_interval_ms: BASE_TICK_INTERVAL_MS,
                pollution_penalty: 12,
                pollution_bias: 0.50,
                hazard_attempts: 2,
                pollution_policy: PollutionPolicy::default(),
            },
            GameMode::Hard => Self {
                mode,
                tick_interval_ms: (BASE_TICK_INTERVAL_MS / 2).max(MIN_TICK_INTERVAL_MS),
                pollution_penalty: 12,
                pollution_bias: 0.45,
                hazard_attempts: 2,
                pollution_policy: PollutionPolicy::default(),
            },
        }
    }

    /// Manual adjustments layered on top of the mode defaults
    pub fn with_overrides(mut self, overrides: &TuningOverrides) -> Self {
        if let Some(penalty) = overrides.pollution_penalty {
            self.pollution_penalty = penalty;
        }
        if let Some(bias) = overrides.pollution_bias {
            self.pollution_bias = bias.clamp(0.0, 1.0);
        }
        if let Some(policy) = overrides.pollution_policy {
            self.pollution_policy = policy;
        }
        self
    }

    /// How fast the host should drive ticks
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

/// Pre-round tuning adjustments (the penalty and spawn-bias sliders).
/// `None` keeps the mode default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TuningOverrides {
    pub pollution_penalty: Option<u32>,
    pub pollution_bias: Option<f64>,
    pub pollution_policy: Option<PollutionPolicy>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_defaults() {
        let easy = DifficultyProfile::for_mode(GameMode::Easy);
        assert_eq!(easy.tick_interval_ms, 150);
        assert_eq!(easy.pollution_penalty, 5);
        assert_eq!(easy.pollution_bias, 0.70);
        assert_eq!(easy.hazard_attempts, 1);

        let medium = DifficultyProfile::for_mode(GameMode::Medium);
        assert_eq!(medium.tick_interval_ms, 150);
        assert_eq!(medium.pollution_penalty, 12);
        assert_eq!(medium.pollution_bias, 0.50);
        assert_eq!(medium.hazard_attempts, 2);

        let hard = DifficultyProfile::for_mode(GameMode::Hard);
        assert_eq!(hard.tick_interval_ms, 75);
        assert_eq!(hard.pollution_penalty, 12);
        assert_eq!(hard.pollution_bias, 0.45);
        assert_eq!(hard.hazard_attempts, 2);
    }

    #[test]
    fn test_hard_interval_has_floor() {
        // Hard halves the base interval but never drops below the floor
        let hard = DifficultyProfile::for_mode(GameMode::Hard);
        assert!(hard.tick_interval_ms >= MIN_TICK_INTERVAL_MS);
        assert_eq!(
            hard.tick_interval_ms,
            (BASE_TICK_INTERVAL_MS / 2).max(MIN_TICK_INTERVAL_MS)
        );
    }

    #[test]
    fn test_lossy_mode_parse() {
        assert_eq!(GameMode::from_str_lossy("hard"), GameMode::Hard);
        assert_eq!(GameMode::from_str_lossy("MEDIUM"), GameMode::Medium);
        assert_eq!(GameMode::from_str_lossy("easy"), GameMode::Easy);
        assert_eq!(GameMode::from_str_lossy("nightmare"), GameMode::Easy);
        assert_eq!(GameMode::from_str_lossy(""), GameMode::Easy);
    }

    #[test]
    fn test_overrides_layer_over_defaults() {
        let overrides = TuningOverrides {
            pollution_penalty: Some(20),
            pollution_bias: Some(1.5), // clamped
            pollution_policy: Some(PollutionPolicy::EndRound),
        };
        let profile = DifficultyProfile::for_mode(GameMode::Easy).with_overrides(&overrides);
        assert_eq!(profile.pollution_penalty, 20);
        assert_eq!(profile.pollution_bias, 1.0);
        assert_eq!(profile.pollution_policy, PollutionPolicy::EndRound);
        // Untouched fields keep mode defaults
        assert_eq!(profile.hazard_attempts, 1);
        assert_eq!(profile.tick_interval_ms, 150);
    }
}
