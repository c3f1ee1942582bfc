//! Tunable constants of the model, gathered in one place.

use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::file::ReadJsonFile;

pub const DEFAULT_HOME_ADVANTAGE: f64 = 1.15;
pub const DEFAULT_TRUNCATION_BOUND: u8 = 9;
pub const DEFAULT_VALUE_MARGIN: f64 = 0.03;
pub const DEFAULT_TRAP_MARGIN: f64 = -0.05;
pub const DEFAULT_FORM_STEP: f64 = 0.05;
pub const DEFAULT_FORM_WINDOW: usize = 5;
pub const DEFAULT_MIN_EXPECTED_GOALS: f64 = 0.05;
pub const DEFAULT_ATTACK: f64 = 1.0;
pub const DEFAULT_DEFENSE: f64 = 1.0;

/// Permissible truncation bounds. Grid construction is quadratic in the bound.
pub const VALID_TRUNCATION_BOUNDS: RangeInclusive<u8> = 1..=15;

#[derive(Debug, Error, PartialEq)]
pub enum InvalidConfig {
    #[error("home advantage must be finite and positive, got {0}")]
    HomeAdvantage(f64),

    #[error("truncation bound must be between 1 and 15, got {0}")]
    TruncationBound(u8),

    #[error("margins must be finite with trap margin {trap} not exceeding value margin {value}")]
    Margins { value: f64, trap: f64 },

    #[error("form step must be finite and non-negative, got {0}")]
    FormStep(f64),

    #[error("form window must be at least 1")]
    FormWindow,

    #[error("minimum expected goals must be finite and positive, got {0}")]
    MinExpectedGoals(f64),

    #[error("default {field} rate must be finite and positive, got {value}")]
    DefaultRate { field: &'static str, value: f64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Multiplier applied to the home side's expected goals.
    pub home_advantage: f64,
    /// Largest goal count per side represented in the scoreline grid.
    pub truncation_bound: u8,
    /// Expected value above which a wager is classed as value.
    pub value_margin: f64,
    /// Expected value below which a wager is classed as a trap.
    pub trap_margin: f64,
    pub form_step: f64,
    pub form_window: usize,
    pub min_expected_goals: f64,
    pub default_attack: f64,
    pub default_defense: f64,
    /// Rescale the scoreline grid to unit mass before pricing markets.
    pub renormalise: bool,
}
impl Config {
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        if !is_positive(self.home_advantage) {
            return Err(InvalidConfig::HomeAdvantage(self.home_advantage));
        }
        if !VALID_TRUNCATION_BOUNDS.contains(&self.truncation_bound) {
            return Err(InvalidConfig::TruncationBound(self.truncation_bound));
        }
        if !self.value_margin.is_finite()
            || !self.trap_margin.is_finite()
            || self.trap_margin > self.value_margin
        {
            return Err(InvalidConfig::Margins {
                value: self.value_margin,
                trap: self.trap_margin,
            });
        }
        if !self.form_step.is_finite() || self.form_step < 0.0 {
            return Err(InvalidConfig::FormStep(self.form_step));
        }
        if self.form_window == 0 {
            return Err(InvalidConfig::FormWindow);
        }
        if !is_positive(self.min_expected_goals) {
            return Err(InvalidConfig::MinExpectedGoals(self.min_expected_goals));
        }
        for (field, value) in [("attack", self.default_attack), ("defense", self.default_defense)] {
            if !is_positive(value) {
                return Err(InvalidConfig::DefaultRate { field, value });
            }
        }
        Ok(())
    }

    /// Loads a config from a JSON file; absent keys take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, anyhow::Error> {
        let config: Config = Self::read_json_file(path)?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            home_advantage: DEFAULT_HOME_ADVANTAGE,
            truncation_bound: DEFAULT_TRUNCATION_BOUND,
            value_margin: DEFAULT_VALUE_MARGIN,
            trap_margin: DEFAULT_TRAP_MARGIN,
            form_step: DEFAULT_FORM_STEP,
            form_window: DEFAULT_FORM_WINDOW,
            min_expected_goals: DEFAULT_MIN_EXPECTED_GOALS,
            default_attack: DEFAULT_ATTACK,
            default_defense: DEFAULT_DEFENSE,
            renormalise: false,
        }
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
