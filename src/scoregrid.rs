//! The truncated joint distribution over final scorelines.
//!
//! Cell `(h, a)` holds the probability that the home side finishes with `h` goals and the away
//! side with `a`, for `0 ≤ h, a ≤ K`. Home and away goal counts are modelled as independent
//! Poisson variables. Scores beyond `K` in either dimension are not represented, so the cells sum
//! to slightly less than 1; that shortfall is the truncation [residual](ScoreGrid::residual) and
//! it shrinks as `K` grows. The grid is not renormalised unless asked for.

use thiserror::Error;

use crate::config::{InvalidConfig, VALID_TRUNCATION_BOUNDS};
use crate::domain::{Score, Side};
use crate::factorial::Lookup;
use crate::linear::Matrix;
use crate::poisson;
use crate::probs::SliceExt;
use crate::xg::ExpectedGoals;

#[derive(Debug, Error, PartialEq)]
pub enum InvalidScoreGrid {
    #[error("{0}")]
    Bound(#[from] InvalidConfig),

    #[error("{side} expected goals must be finite and non-negative, got {value}")]
    ExpectedGoals { side: Side, value: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreGrid {
    cells: Matrix,
    home_marginal: Vec<f64>,
    away_marginal: Vec<f64>,
    expected_goals: ExpectedGoals,
    normalised: bool,
}
impl ScoreGrid {
    pub fn from_univariate_poisson(
        expected_goals: &ExpectedGoals,
        bound: u8,
    ) -> Result<Self, InvalidScoreGrid> {
        if !VALID_TRUNCATION_BOUNDS.contains(&bound) {
            return Err(InvalidConfig::TruncationBound(bound).into());
        }
        for (side, value) in [(Side::Home, expected_goals.home), (Side::Away, expected_goals.away)] {
            if !value.is_finite() || value < 0.0 {
                return Err(InvalidScoreGrid::ExpectedGoals { side, value });
            }
        }
        let factorial = Lookup::default();
        let home_marginal = poisson::marginal(bound, expected_goals.home, &factorial);
        let away_marginal = poisson::marginal(bound, expected_goals.away, &factorial);
        let cells = Matrix::outer(&home_marginal, &away_marginal);
        Ok(Self {
            cells,
            home_marginal,
            away_marginal,
            expected_goals: *expected_goals,
            normalised: false,
        })
    }

    /// The truncation bound `K`.
    pub fn bound(&self) -> u8 {
        (self.cells.rows() - 1) as u8
    }

    pub fn cells(&self) -> &Matrix {
        &self.cells
    }

    /// The Poisson means the grid was built from.
    pub fn expected_goals(&self) -> &ExpectedGoals {
        &self.expected_goals
    }

    pub fn is_normalised(&self) -> bool {
        self.normalised
    }

    /// Probability of an exact final score; zero if the score lies beyond the bound.
    pub fn prob(&self, score: &Score) -> f64 {
        let (home, away) = (score.home as usize, score.away as usize);
        if home < self.cells.rows() && away < self.cells.cols() {
            self.cells[(home, away)]
        } else {
            0.0
        }
    }

    pub fn marginal(&self, side: Side) -> &[f64] {
        match side {
            Side::Home => &self.home_marginal,
            Side::Away => &self.away_marginal,
        }
    }

    /// Total probability held in the grid.
    pub fn retained_mass(&self) -> f64 {
        self.cells.flatten().sum()
    }

    /// Probability of a score exceeding the bound in either dimension.
    pub fn residual(&self) -> f64 {
        f64::max(0.0, 1.0 - self.retained_mass())
    }

    /// A copy rescaled so that the cells sum to 1, trading the truncation error for a bias
    /// towards low-scoring outcomes.
    pub fn normalised(&self) -> Self {
        let mut normalised = self.clone();
        normalised.cells.flatten_mut().normalise(1.0);
        normalised.home_marginal = normalised.cells.row_sums();
        normalised.away_marginal = normalised.cells.col_sums();
        normalised.normalised = true;
        normalised
    }

    /// Every cell paired with its score, home goals varying slowest.
    pub fn iter(&self) -> impl Iterator<Item = (Score, f64)> + '_ {
        let cols = self.cells.cols();
        self.cells
            .flatten()
            .iter()
            .enumerate()
            .map(move |(index, &prob)| (Score::new((index / cols) as u8, (index % cols) as u8), prob))
    }

    /// Mean goals per side as recovered from the (truncated) grid.
    pub fn expectations(&self) -> (f64, f64) {
        let (mut home_expectation, mut away_expectation) = (0.0, 0.0);
        for (score, prob) in self.iter() {
            home_expectation += score.home as f64 * prob;
            away_expectation += score.away as f64 * prob;
        }
        (home_expectation, away_expectation)
    }

    /// The `n` most probable scores in descending order of probability.
    pub fn most_likely(&self, n: usize) -> Vec<(Score, f64)> {
        let mut scores: Vec<_> = self.iter().collect();
        scores.sort_by(|(a_score, a_prob), (b_score, b_prob)| {
            b_prob.total_cmp(a_prob).then_with(|| a_score.cmp(b_score))
        });
        scores.truncate(n);
        scores
    }
}

#[cfg(test)]
mod tests;
