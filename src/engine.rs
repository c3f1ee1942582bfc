//! The end-to-end pipeline: team records in, market probabilities and value assessments out.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::config::{Config, InvalidConfig};
use crate::domain::TeamRecord;
use crate::market::{Catalogue, MarketDefinition, MarketTable, UnknownMarket};
use crate::scoregrid::{InvalidScoreGrid, ScoreGrid};
use crate::strength::{self, StrengthProfile};
use crate::value::{self, InvalidWager, Margins, ValueAssessment};
use crate::xg::{self, ExpectedGoals, Modifiers};

#[derive(Debug, Error, PartialEq)]
pub enum AnalysisError {
    #[error("invalid config: {0}")]
    InvalidConfig(#[from] InvalidConfig),

    #[error("invalid scoregrid: {0}")]
    InvalidScoreGrid(#[from] InvalidScoreGrid),

    #[error("{0}")]
    UnknownMarket(#[from] UnknownMarket),

    #[error("invalid wager: {0}")]
    InvalidWager(#[from] InvalidWager),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamInput {
    pub name: String,
    #[serde(default)]
    pub record: TeamRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub home: TeamInput,
    pub away: TeamInput,
    #[serde(default)]
    pub modifiers: Modifiers,
}

/// Everything derived for a single fixture.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub home_profile: StrengthProfile,
    pub away_profile: StrengthProfile,
    pub expected_goals: ExpectedGoals,
    /// The grid the markets were priced on; normalised if the config asks for it.
    pub scoregrid: ScoreGrid,
    pub markets: MarketTable,
}

#[derive(Debug, Clone)]
pub struct Engine {
    config: Config,
    catalogue: Catalogue,
}
impl Engine {
    pub fn new(config: Config, catalogue: Catalogue) -> Result<Self, InvalidConfig> {
        config.validate()?;
        Ok(Self { config, catalogue })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    pub fn margins(&self) -> Margins {
        Margins::from(&self.config)
    }

    pub fn analyse(&self, fixture: &Fixture) -> Result<Analysis, AnalysisError> {
        let home_profile = strength::estimate(&fixture.home.record, &self.config);
        let away_profile = strength::estimate(&fixture.away.record, &self.config);
        debug!("{}: {home_profile:?}", fixture.home.name);
        debug!("{}: {away_profile:?}", fixture.away.name);

        let expected_goals =
            xg::expected_goals(&home_profile, &away_profile, &fixture.modifiers, &self.config);
        debug!(
            "{} v {}: λ_home={:.4}, λ_away={:.4}",
            fixture.home.name, fixture.away.name, expected_goals.home, expected_goals.away
        );

        let mut scoregrid =
            ScoreGrid::from_univariate_poisson(&expected_goals, self.config.truncation_bound)?;
        debug!(
            "retained mass: {:.8}, truncation residual: {:.3e}",
            scoregrid.retained_mass(),
            scoregrid.residual()
        );
        if self.config.renormalise {
            scoregrid = scoregrid.normalised();
        }

        let markets = self.catalogue.evaluate(&scoregrid);
        Ok(Analysis {
            home_profile,
            away_profile,
            expected_goals,
            scoregrid,
            markets,
        })
    }

    /// Analyses fixtures in parallel. Results are in input order.
    pub fn analyse_all(&self, fixtures: &[Fixture]) -> Vec<Result<Analysis, AnalysisError>> {
        fixtures
            .par_iter()
            .map(|fixture| self.analyse(fixture))
            .collect()
    }

    /// Assesses a wager on a catalogued market at the offered decimal odds.
    pub fn assess(
        &self,
        analysis: &Analysis,
        market: &str,
        offered_odds: f64,
    ) -> Result<ValueAssessment, AnalysisError> {
        let probability = analysis.markets.get(market)?;
        Ok(value::evaluate(probability, offered_odds, &self.margins())?)
    }

    /// Assesses a wager on a market outside the catalogue.
    pub fn assess_definition(
        &self,
        analysis: &Analysis,
        definition: &MarketDefinition,
        offered_odds: f64,
    ) -> Result<ValueAssessment, AnalysisError> {
        let probability = definition.probability(&analysis.scoregrid);
        Ok(value::evaluate(probability, offered_odds, &self.margins())?)
    }
}

impl TryFrom<Config> for Engine {
    type Error = InvalidConfig;

    fn try_from(config: Config) -> Result<Self, Self::Error> {
        Self::new(config, Catalogue::standard())
    }
}
