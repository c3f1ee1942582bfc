//! Plain data consumed by the model: team season aggregates, recent form and scorelines.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{de, Deserialize, Deserializer, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Display, EnumIter)]
pub enum Side {
    Home,
    Away,
}

#[derive(Clone, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Score {
    pub home: u8,
    pub away: u8,
}
impl Score {
    pub fn new(home: u8, away: u8) -> Self {
        Self { home, away }
    }

    pub fn nil_all() -> Self {
        Self { home: 0, away: 0 }
    }

    pub fn total(&self) -> u16 {
        self.home as u16 + self.away as u16
    }

    pub fn goals(&self, side: Side) -> u8 {
        match side {
            Side::Home => self.home,
            Side::Away => self.away,
        }
    }
}

impl Display for Score {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.home, self.away)
    }
}

/// Outcome of a past fixture from one team's point of view.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter)]
pub enum FormResult {
    #[serde(rename = "W")]
    #[strum(serialize = "W")]
    Win,

    #[serde(rename = "D")]
    #[strum(serialize = "D")]
    Draw,

    #[serde(rename = "L")]
    #[strum(serialize = "L")]
    Loss,
}
impl FormResult {
    /// League points awarded for the result.
    pub fn points(&self) -> u8 {
        match self {
            FormResult::Win => 3,
            FormResult::Draw => 1,
            FormResult::Loss => 0,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unrecognised form symbol '{symbol}' in '{form}'")]
pub struct InvalidForm {
    pub symbol: String,
    pub form: String,
}

/// Recent results, oldest first. Deserializes from either a list of symbols or the
/// comma-separated form string.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RecentForm(pub Vec<FormResult>);
impl RecentForm {
    /// The most recent `window` results.
    pub fn latest(&self, window: usize) -> &[FormResult] {
        let start = self.0.len().saturating_sub(window);
        &self.0[start..]
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for RecentForm {
    type Err = InvalidForm;

    /// Parses a comma-separated string such as `W,D,L,W,W`, most recent last.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        trimmed
            .split(',')
            .map(|symbol| {
                FormResult::from_str(symbol.trim()).map_err(|_| InvalidForm {
                    symbol: symbol.trim().to_string(),
                    form: s.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(RecentForm)
    }
}

impl<'de> Deserialize<'de> for RecentForm {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Symbols(String),
            Results(Vec<FormResult>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Symbols(form) => RecentForm::from_str(&form).map_err(de::Error::custom),
            Repr::Results(results) => Ok(Self(results)),
        }
    }
}

impl From<Vec<FormResult>> for RecentForm {
    fn from(results: Vec<FormResult>) -> Self {
        Self(results)
    }
}

/// Season aggregates for one team in one competition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamSeasonStats {
    pub games_played: u16,
    pub goals_for: u16,
    pub goals_against: u16,
    #[serde(default)]
    pub recent_form: RecentForm,
}

/// What the data-acquisition layer knows about a team: either its season stats, or nothing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TeamRecord {
    Known(TeamSeasonStats),
    Unknown,
}

impl Default for TeamRecord {
    fn default() -> Self {
        TeamRecord::Unknown
    }
}

impl From<Option<TeamSeasonStats>> for TeamRecord {
    fn from(stats: Option<TeamSeasonStats>) -> Self {
        match stats {
            None => TeamRecord::Unknown,
            Some(stats) => TeamRecord::Known(stats),
        }
    }
}
