//! Comparison of model probabilities with bookmaker prices.
//!
//! All prices are decimal: a unit stake returns the price in total if the wager wins. A wager's
//! expected value per unit stake is `p * price - 1`; it is _value_ above the configured value
//! margin, a _trap_ below the trap margin, and _fair_ in between.

use serde::{Deserialize, Serialize};
use strum_macros::Display;
use thiserror::Error;

use crate::config::Config;
use crate::probs::SliceExt;

/// Fair price reported for an outcome the model deems impossible.
pub const UNCAPPED_FAIR_PRICE: f64 = 10001.0;

#[derive(Debug, Error, PartialEq)]
pub enum InvalidWager {
    #[error("offered odds must be finite and greater than 1, got {0}")]
    Odds(f64),

    #[error("model probability must lie in [0, 1], got {0}")]
    Probability(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Classification {
    Value,
    Fair,
    Trap,
}

/// Expected value bands, taken from [Config].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margins {
    pub value: f64,
    pub trap: f64,
}
impl Margins {
    pub fn classify(&self, expected_value: f64) -> Classification {
        if expected_value > self.value {
            Classification::Value
        } else if expected_value < self.trap {
            Classification::Trap
        } else {
            Classification::Fair
        }
    }
}

impl From<&Config> for Margins {
    fn from(config: &Config) -> Self {
        Self {
            value: config.value_margin,
            trap: config.trap_margin,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueAssessment {
    pub model_probability: f64,
    pub fair_odds: f64,
    pub offered_odds: f64,
    pub expected_value: f64,
    /// Model probability less the probability implied by the offered odds.
    pub edge: f64,
    pub classification: Classification,
}

/// The price at which a wager on an outcome of the given probability breaks even.
pub fn fair_price(probability: f64) -> f64 {
    if probability > 0.0 {
        1.0 / probability
    } else {
        UNCAPPED_FAIR_PRICE
    }
}

pub fn evaluate(
    model_probability: f64,
    offered_odds: f64,
    margins: &Margins,
) -> Result<ValueAssessment, InvalidWager> {
    if !(0.0..=1.0).contains(&model_probability) {
        return Err(InvalidWager::Probability(model_probability));
    }
    if !offered_odds.is_finite() || offered_odds <= 1.0 {
        return Err(InvalidWager::Odds(offered_odds));
    }
    let expected_value = model_probability * offered_odds - 1.0;
    Ok(ValueAssessment {
        model_probability,
        fair_odds: fair_price(model_probability),
        offered_odds,
        expected_value,
        edge: model_probability - 1.0 / offered_odds,
        classification: margins.classify(expected_value),
    })
}

/// The booksum of a complete book: the sum of implied probabilities. Exceeds 1 by the
/// bookmaker's margin.
pub fn overround(prices: &[f64]) -> f64 {
    prices.invert().sum()
}

/// Fair probabilities of a complete book, removing the margin multiplicatively.
pub fn devig(prices: &[f64]) -> Vec<f64> {
    let mut probs = prices.invert();
    probs.normalise(1.0);
    probs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::assert_slice_f64_relative;
    use assert_float_eq::*;

    fn margins() -> Margins {
        Margins::from(&Config::default())
    }

    #[test]
    fn value_wager() {
        let assessment = evaluate(0.55, 2.0, &margins()).unwrap();
        assert_float_absolute_eq!(0.1, assessment.expected_value, 1e-12);
        assert_eq!(Classification::Value, assessment.classification);
        assert_float_absolute_eq!(1.818, assessment.fair_odds, 0.001);
        assert_float_absolute_eq!(0.05, assessment.edge, 1e-12);
        assert_eq!(2.0, assessment.offered_odds);
    }

    #[test]
    fn trap_wager() {
        let assessment = evaluate(0.4, 1.5, &margins()).unwrap();
        assert_float_absolute_eq!(-0.4, assessment.expected_value, 1e-12);
        assert_eq!(Classification::Trap, assessment.classification);
        assert!(assessment.edge < 0.0);
    }

    #[test]
    fn fair_at_fair_price() {
        for probability in [0.05, 0.25, 0.5, 0.9] {
            let assessment = evaluate(probability, fair_price(probability), &margins()).unwrap();
            assert_float_absolute_eq!(0.0, assessment.expected_value, 1e-12);
            assert_float_absolute_eq!(0.0, assessment.edge, 1e-12);
            assert_eq!(Classification::Fair, assessment.classification);
        }
    }

    #[test]
    fn classification_boundaries() {
        let margins = margins();
        assert_eq!(Classification::Fair, margins.classify(0.03));
        assert_eq!(Classification::Value, margins.classify(0.0301));
        assert_eq!(Classification::Fair, margins.classify(-0.05));
        assert_eq!(Classification::Trap, margins.classify(-0.0501));
        assert_eq!("Trap", Classification::Trap.to_string());
    }

    #[test]
    fn custom_margins() {
        let config = Config {
            value_margin: 0.15,
            ..Config::default()
        };
        let assessment = evaluate(0.55, 2.0, &Margins::from(&config)).unwrap();
        assert_eq!(Classification::Fair, assessment.classification);
    }

    #[test]
    fn impossible_outcome() {
        assert_eq!(UNCAPPED_FAIR_PRICE, fair_price(0.0));
        let assessment = evaluate(0.0, 3.0, &margins()).unwrap();
        assert_eq!(UNCAPPED_FAIR_PRICE, assessment.fair_odds);
        assert_eq!(-1.0, assessment.expected_value);
        assert_eq!(Classification::Trap, assessment.classification);
    }

    #[test]
    fn invalid_wagers() {
        for odds in [1.0, 0.5, -2.0, f64::INFINITY] {
            assert_eq!(Err(InvalidWager::Odds(odds)), evaluate(0.5, odds, &margins()));
        }
        assert!(matches!(evaluate(0.5, f64::NAN, &margins()), Err(InvalidWager::Odds(_))));
        for probability in [-0.01, 1.01] {
            assert_eq!(
                Err(InvalidWager::Probability(probability)),
                evaluate(probability, 2.0, &margins())
            );
        }
        assert!(matches!(evaluate(f64::NAN, 2.0, &margins()), Err(InvalidWager::Probability(_))));
    }

    #[test]
    fn overround_and_devig() {
        let prices = [2.0, 3.4, 4.2];
        let booksum = 1.0 / 2.0 + 1.0 / 3.4 + 1.0 / 4.2;
        assert_float_relative_eq!(booksum, overround(&prices), 1e-12);
        assert!(overround(&prices) > 1.0);

        let fair = devig(&prices);
        assert_float_absolute_eq!(1.0, fair.sum(), 1e-12);
        assert_slice_f64_relative(
            &[0.5 / booksum, 1.0 / 3.4 / booksum, 1.0 / 4.2 / booksum],
            &fair,
            1e-12,
        );
    }
}
