//! Per-team attack and defence rates, and the form multiplier derived from recent results.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::domain::{FormResult, RecentForm, TeamRecord, TeamSeasonStats};

/// Form score reported when there is no form to go by.
pub const NEUTRAL_FORM_SCORE: f64 = 50.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrengthProfile {
    /// Goals scored per game.
    pub attack_rate: f64,
    /// Goals conceded per game.
    pub defense_rate: f64,
    pub form_multiplier: f64,
    /// Share of available points taken over the form window, on a 0–100 scale. Informational
    /// only; it does not feed into the expected goals.
    pub form_score: f64,
    /// Whether the profile fell back to league-average defaults.
    pub defaulted: bool,
}

/// Rates for a team the data layer knows nothing about.
pub fn default_profile(config: &Config) -> StrengthProfile {
    StrengthProfile {
        attack_rate: config.default_attack,
        defense_rate: config.default_defense,
        form_multiplier: 1.0,
        form_score: NEUTRAL_FORM_SCORE,
        defaulted: true,
    }
}

pub fn estimate(record: &TeamRecord, config: &Config) -> StrengthProfile {
    match record {
        TeamRecord::Known(stats) => from_stats(stats, config),
        TeamRecord::Unknown => default_profile(config),
    }
}

fn from_stats(stats: &TeamSeasonStats, config: &Config) -> StrengthProfile {
    let games_played = u16::max(stats.games_played, 1) as f64;
    StrengthProfile {
        attack_rate: stats.goals_for as f64 / games_played,
        defense_rate: stats.goals_against as f64 / games_played,
        form_multiplier: form_multiplier(&stats.recent_form, config.form_window, config.form_step),
        form_score: form_score(&stats.recent_form, config.form_window),
        defaulted: false,
    }
}

/// Starts at 1 and moves by `step` for every win (up) and loss (down) among the latest `window`
/// results. Uncapped.
pub fn form_multiplier(form: &RecentForm, window: usize, step: f64) -> f64 {
    form.latest(window)
        .iter()
        .fold(1.0, |multiplier, result| match result {
            FormResult::Win => multiplier + step,
            FormResult::Draw => multiplier,
            FormResult::Loss => multiplier - step,
        })
}

/// Points taken as a percentage of points available over the latest `window` results.
pub fn form_score(form: &RecentForm, window: usize) -> f64 {
    let latest = form.latest(window);
    if latest.is_empty() {
        return NEUTRAL_FORM_SCORE;
    }
    let points: u16 = latest.iter().map(|result| result.points() as u16).sum();
    let max_points = latest.len() as f64 * FormResult::Win.points() as f64;
    points as f64 / max_points * 100.0
}
