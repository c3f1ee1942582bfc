//! Independent-Poisson scoreline model for head-to-head football fixtures. Turns season goal
//! aggregates and recent form into expected goals, expected goals into a truncated grid of
//! correct-score probabilities, and the grid into probabilities for results, goal lines,
//! both-teams-to-score, multigoal and combo markets. Offered prices are then assessed against
//! the model for value.

pub mod config;
pub mod domain;
pub mod engine;
pub mod factorial;
pub mod file;
pub mod linear;
pub mod market;
pub mod poisson;
pub mod print;
pub mod probs;
pub mod scoregrid;
pub mod strength;
pub mod value;
pub mod xg;

#[cfg(test)]
pub(crate) mod testing;

#[doc = include_str!("../README.md")]
#[cfg(doc)]
fn readme() {}
