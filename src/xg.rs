//! Expected goals for each side of a fixture.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;
use crate::strength::StrengthProfile;

#[derive(Debug, Error, PartialEq)]
#[error("modifier must be finite and positive, got {0}")]
pub struct InvalidModifier(pub f64);

/// An opaque, dimensionless scaling of a team's expected goals supplied by the caller, such as
/// a judgement of motivation or squad availability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Modifier(f64);
impl Modifier {
    pub fn neutral() -> Self {
        Self(1.0)
    }

    pub fn new(value: f64) -> Result<Self, InvalidModifier> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(InvalidModifier(value))
        }
    }

    /// Shifts the modifier additively, e.g. `-0.06` to mark down a fatigued side.
    pub fn adjust(self, delta: f64) -> Result<Self, InvalidModifier> {
        Self::new(self.0 + delta)
    }

    /// Combines two modifiers multiplicatively.
    pub fn compose(self, other: Modifier) -> Self {
        Self(self.0 * other.0)
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for Modifier {
    fn default() -> Self {
        Self::neutral()
    }
}

impl TryFrom<f64> for Modifier {
    type Error = InvalidModifier;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Modifier> for f64 {
    fn from(modifier: Modifier) -> Self {
        modifier.0
    }
}

/// Poisson means of the home and away goal counts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpectedGoals {
    pub home: f64,
    pub away: f64,
}
impl ExpectedGoals {
    pub fn total(&self) -> f64 {
        self.home + self.away
    }
}

/// Per-side modifiers for one fixture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Modifiers {
    #[serde(default)]
    pub home: Modifier,
    #[serde(default)]
    pub away: Modifier,
}

/// Combines the two profiles into expected goals. The home side's attack meets the away side's
/// defence, scaled by the home advantage; both values are floored at
/// [`Config::min_expected_goals`].
pub fn expected_goals(
    home: &StrengthProfile,
    away: &StrengthProfile,
    modifiers: &Modifiers,
    config: &Config,
) -> ExpectedGoals {
    let home_xg = home.attack_rate
        * away.defense_rate
        * config.home_advantage
        * home.form_multiplier
        * modifiers.home.value();
    let away_xg =
        away.attack_rate * home.defense_rate * away.form_multiplier * modifiers.away.value();
    ExpectedGoals {
        home: floor(home_xg, config.min_expected_goals),
        away: floor(away_xg, config.min_expected_goals),
    }
}

#[inline]
fn floor(xg: f64, min: f64) -> f64 {
    // also catches NaN from pathological inputs
    if xg >= min {
        xg
    } else {
        min
    }
}
