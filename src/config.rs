// src/config.rs
// Per-deck scheduling parameters.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lowest ease factor a card may reach, in permille.
pub const MINIMUM_EASE: u32 = 1_300;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} steps must not be empty")]
    EmptySteps(&'static str),
    #[error("{0} steps must be at least one minute")]
    ZeroStep(&'static str),
    #[error("initial ease {0} is below the minimum of 1300")]
    EaseBelowFloor(u32),
    #[error("{name} multiplier {value} is out of range")]
    InvalidMultiplier { name: &'static str, value: f64 },
    #[error("{0} must be at least one day")]
    ZeroInterval(&'static str),
    #[error("failed to read deck config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse deck config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tuning for one deck. Supplied by the caller and never changed by the
/// scheduler. Step delays are in minutes, intervals in days and the ease
/// values in permille (2500 = 250%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeckConfig {
    pub learn_steps: Vec<u32>,
    pub relearn_steps: Vec<u32>,
    pub new_per_day: u32,
    pub reviews_per_day: u32,
    pub initial_ease: u32,
    pub hard_multiplier: f64,
    /// Extra growth on Easy, in permille.
    pub easy_multiplier: u32,
    /// Share of the old interval kept after a lapse.
    pub lapse_multiplier: f64,
    pub interval_multiplier: f64,
    pub maximum_review_interval: u32,
    pub graduating_interval_good: u32,
    pub graduating_interval_easy: u32,
    /// Lapse count at which a card would be a leech. Carried for storage
    /// compatibility; nothing in the scheduler reads it.
    pub leech_threshold: u32,
}

impl DeckConfig {
    pub fn new() -> Self {
        Self {
            learn_steps: vec![1, 10],
            relearn_steps: vec![10],
            new_per_day: 20,
            reviews_per_day: 200,
            initial_ease: 2_500,
            hard_multiplier: 1.2,
            easy_multiplier: 1_300,
            lapse_multiplier: 0.0,
            interval_multiplier: 1.0,
            maximum_review_interval: 36_500,
            graduating_interval_good: 1,
            graduating_interval_easy: 4,
            leech_threshold: 8,
        }
    }

    /// Parses a JSON document. Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: DeckConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config = Self::from_json(&contents)?;
        log::info!("Loaded deck config from {:?}", path);
        Ok(config)
    }

    /// Checks the values the scheduler relies on: non-empty step lists of
    /// at least one minute, an ease at or above the floor, sane multipliers
    /// and intervals of at least one day.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_steps("learn", &self.learn_steps)?;
        check_steps("relearn", &self.relearn_steps)?;

        if self.initial_ease < MINIMUM_EASE {
            return Err(ConfigError::EaseBelowFloor(self.initial_ease));
        }

        check_multiplier("hard", self.hard_multiplier, false)?;
        check_multiplier("interval", self.interval_multiplier, false)?;
        check_multiplier("lapse", self.lapse_multiplier, true)?;

        if self.maximum_review_interval == 0 {
            return Err(ConfigError::ZeroInterval("maximum review interval"));
        }
        if self.graduating_interval_good == 0 {
            return Err(ConfigError::ZeroInterval("graduating interval"));
        }
        if self.graduating_interval_easy == 0 {
            return Err(ConfigError::ZeroInterval("easy interval"));
        }
        Ok(())
    }
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn check_steps(name: &'static str, steps: &[u32]) -> Result<(), ConfigError> {
    if steps.is_empty() {
        return Err(ConfigError::EmptySteps(name));
    }
    if steps.contains(&0) {
        return Err(ConfigError::ZeroStep(name));
    }
    Ok(())
}

fn check_multiplier(name: &'static str, value: f64, allow_zero: bool) -> Result<(), ConfigError> {
    let in_range = value.is_finite() && (value > 0.0 || (allow_zero && value == 0.0));
    if in_range {
        Ok(())
    } else {
        Err(ConfigError::InvalidMultiplier { name, value })
    }
}
