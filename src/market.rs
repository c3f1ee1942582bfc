//! Markets as predicates over final scorelines.
//!
//! A market's probability is the sum of the [ScoreGrid] cells whose score satisfies its
//! [Predicate]. Atomic predicates cover the match result, double chance, goal lines, both teams
//! to score and goal ranges; a combo is the conjunction of two atomic predicates.

use std::fmt::{Debug, Display, Formatter};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};
use thiserror::Error;

use crate::domain::{Score, Side};
use crate::scoregrid::ScoreGrid;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown market '{name}'")]
pub struct UnknownMarket {
    pub name: String,
}

#[derive(Debug, Error, PartialEq)]
pub enum InvalidMarket {
    #[error("goal line must be a non-negative half-integer, got {0}")]
    Line(f64),

    #[error("goal range {lo}-{hi} is inverted")]
    Range { lo: u16, hi: u16 },

    #[error("double chance must cover two distinct results, got {0:?} twice")]
    DoubleChance(Outcome),

    #[error("combo operands must be single markets, got {0}")]
    NestedCombo(String),

    #[error("duplicate market '{0}'")]
    Duplicate(String),
}

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Display, EnumIter)]
pub enum Category {
    Result,
    DoubleChance,
    GoalLine,
    BothTeamsScore,
    TeamMultigoal,
    MatchMultigoal,
    Combo,
}

/// One of the three full-time results.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, EnumIter)]
pub enum Outcome {
    Home,
    Draw,
    Away,
}
impl Outcome {
    pub fn symbol(&self) -> &'static str {
        match self {
            Outcome::Home => "1",
            Outcome::Draw => "X",
            Outcome::Away => "2",
        }
    }

    #[inline]
    pub fn matches(&self, score: &Score) -> bool {
        match self {
            Outcome::Home => score.home > score.away,
            Outcome::Draw => score.home == score.away,
            Outcome::Away => score.away > score.home,
        }
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A half-integer goal line, held as its whole part: `Line(2)` is the 2.5 line.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Line(pub u8);
impl Line {
    pub fn value(&self) -> f64 {
        self.0 as f64 + 0.5
    }
}

impl TryFrom<f64> for Line {
    type Error = InvalidMarket;

    fn try_from(line: f64) -> Result<Self, Self::Error> {
        let whole = line - 0.5;
        if whole >= 0.0 && whole <= u8::MAX as f64 && whole.fract() == 0.0 {
            Ok(Self(whole as u8))
        } else {
            Err(InvalidMarket::Line(line))
        }
    }
}

impl Display for Line {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.5", self.0)
    }
}

/// An inclusive goal range, optionally open-ended above.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct GoalRange {
    pub lo: u16,
    pub hi: Option<u16>,
}
impl GoalRange {
    pub fn bounded(lo: u16, hi: u16) -> Result<Self, InvalidMarket> {
        if lo > hi {
            Err(InvalidMarket::Range { lo, hi })
        } else {
            Ok(Self { lo, hi: Some(hi) })
        }
    }

    pub fn at_least(lo: u16) -> Self {
        Self { lo, hi: None }
    }

    #[inline]
    pub fn contains(&self, goals: u16) -> bool {
        goals >= self.lo && self.hi.map_or(true, |hi| goals <= hi)
    }
}

impl Display for GoalRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.hi {
            None => write!(f, "{}+", self.lo),
            Some(hi) => write!(f, "{}-{hi}", self.lo),
        }
    }
}

/// A caller-supplied test over the final score.
#[derive(Clone, Copy)]
pub struct ScoreTest(pub fn(&Score) -> bool);

impl Debug for ScoreTest {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "ScoreTest")
    }
}

#[derive(Clone, Debug)]
pub enum Predicate {
    Result(Outcome),
    DoubleChance(Outcome, Outcome),
    Over(Line),
    Under(Line),
    BothScore,
    NotBothScore,
    MatchMultigoal(GoalRange),
    TeamMultigoal(Side, GoalRange),
    /// Any other test over the final score, named and classified by the caller.
    Custom(String, Category, ScoreTest),
    And(Box<Predicate>, Box<Predicate>),
}
impl Predicate {
    pub fn double_chance(first: Outcome, second: Outcome) -> Result<Self, InvalidMarket> {
        if first == second {
            Err(InvalidMarket::DoubleChance(first))
        } else if first < second {
            Ok(Predicate::DoubleChance(first, second))
        } else {
            Ok(Predicate::DoubleChance(second, first))
        }
    }

    pub fn over(line: f64) -> Result<Self, InvalidMarket> {
        Ok(Predicate::Over(Line::try_from(line)?))
    }

    pub fn under(line: f64) -> Result<Self, InvalidMarket> {
        Ok(Predicate::Under(Line::try_from(line)?))
    }

    /// Conjunction of two atomic predicates.
    pub fn and(first: Predicate, second: Predicate) -> Result<Self, InvalidMarket> {
        for operand in [&first, &second] {
            if let Predicate::And(_, _) = operand {
                return Err(InvalidMarket::NestedCombo(operand.to_string()));
            }
        }
        Ok(Predicate::And(Box::new(first), Box::new(second)))
    }

    #[inline]
    pub fn matches(&self, score: &Score) -> bool {
        match self {
            Predicate::Result(outcome) => outcome.matches(score),
            Predicate::DoubleChance(first, second) => first.matches(score) || second.matches(score),
            Predicate::Over(line) => score.total() > line.0 as u16,
            Predicate::Under(line) => score.total() <= line.0 as u16,
            Predicate::BothScore => score.home > 0 && score.away > 0,
            Predicate::NotBothScore => score.home == 0 || score.away == 0,
            Predicate::MatchMultigoal(range) => range.contains(score.total()),
            Predicate::TeamMultigoal(side, range) => range.contains(score.goals(*side) as u16),
            Predicate::Custom(_, _, ScoreTest(test)) => test(score),
            Predicate::And(first, second) => first.matches(score) && second.matches(score),
        }
    }

    /// The category implied by the predicate's shape, or the one a custom predicate was given.
    pub fn category(&self) -> Category {
        match self {
            Predicate::Result(_) => Category::Result,
            Predicate::DoubleChance(_, _) => Category::DoubleChance,
            Predicate::Over(_) | Predicate::Under(_) => Category::GoalLine,
            Predicate::BothScore | Predicate::NotBothScore => Category::BothTeamsScore,
            Predicate::MatchMultigoal(_) => Category::MatchMultigoal,
            Predicate::TeamMultigoal(_, _) => Category::TeamMultigoal,
            Predicate::Custom(_, category, _) => *category,
            Predicate::And(_, _) => Category::Combo,
        }
    }
}

impl Display for Predicate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Predicate::Result(outcome) => write!(f, "{outcome}"),
            Predicate::DoubleChance(first, second) => write!(f, "{first}{second}"),
            Predicate::Over(line) => write!(f, "Over {line}"),
            Predicate::Under(line) => write!(f, "Under {line}"),
            Predicate::BothScore => write!(f, "Goal"),
            Predicate::NotBothScore => write!(f, "NoGoal"),
            Predicate::MatchMultigoal(range) => write!(f, "Multigoal {range}"),
            Predicate::TeamMultigoal(side, range) => write!(f, "{side} Multigoal {range}"),
            Predicate::Custom(name, _, _) => write!(f, "{name}"),
            Predicate::And(first, second) => write!(f, "{first} + {second}"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct MarketDefinition {
    pub name: String,
    pub predicate: Predicate,
    pub category: Category,
}
impl MarketDefinition {
    /// A market named and classified after its predicate.
    pub fn new(predicate: Predicate) -> Self {
        Self {
            name: predicate.to_string(),
            category: predicate.category(),
            predicate,
        }
    }

    pub fn custom(name: impl Into<String>, category: Category, test: fn(&Score) -> bool) -> Self {
        let name = name.into();
        Self {
            predicate: Predicate::Custom(name.clone(), category, ScoreTest(test)),
            name,
            category,
        }
    }

    pub fn probability(&self, scoregrid: &ScoreGrid) -> f64 {
        gather(scoregrid, |score| self.predicate.matches(score))
    }
}

/// Sums the probabilities of all cells whose score satisfies `predicate`, capped at 1 to absorb
/// rounding on a normalised grid.
pub fn gather(scoregrid: &ScoreGrid, predicate: impl Fn(&Score) -> bool) -> f64 {
    let prob: f64 = scoregrid
        .iter()
        .filter(|(score, _)| predicate(score))
        .map(|(_, prob)| prob)
        .sum();
    f64::min(1.0, prob)
}

/// An ordered, name-indexed set of market definitions.
#[derive(Clone, Debug, Default)]
pub struct Catalogue {
    definitions: Vec<MarketDefinition>,
    index: FxHashMap<String, usize>,
}
impl Catalogue {
    /// The standard set of result, double chance, goal line, both-teams-to-score, multigoal and
    /// combo markets.
    pub fn standard() -> Self {
        let mut definitions = vec![];
        for outcome in [Outcome::Home, Outcome::Draw, Outcome::Away] {
            definitions.push(Predicate::Result(outcome));
        }
        definitions.push(Predicate::DoubleChance(Outcome::Home, Outcome::Draw));
        definitions.push(Predicate::DoubleChance(Outcome::Draw, Outcome::Away));
        definitions.push(Predicate::DoubleChance(Outcome::Home, Outcome::Away));
        for line in 0..=4 {
            definitions.push(Predicate::Over(Line(line)));
            definitions.push(Predicate::Under(Line(line)));
        }
        definitions.push(Predicate::BothScore);
        definitions.push(Predicate::NotBothScore);
        for (lo, hi) in [(1, 2), (1, 3), (2, 3), (2, 4), (3, 5), (4, 6)] {
            definitions.push(Predicate::MatchMultigoal(GoalRange { lo, hi: Some(hi) }));
        }
        for side in [Side::Home, Side::Away] {
            for range in [
                GoalRange { lo: 1, hi: Some(2) },
                GoalRange { lo: 1, hi: Some(3) },
                GoalRange::at_least(2),
            ] {
                definitions.push(Predicate::TeamMultigoal(side, range));
            }
        }
        let combos = [
            (Predicate::Result(Outcome::Home), Predicate::Over(Line(1))),
            (Predicate::Result(Outcome::Away), Predicate::Over(Line(1))),
            (Predicate::DoubleChance(Outcome::Home, Outcome::Draw), Predicate::Under(Line(3))),
            (Predicate::DoubleChance(Outcome::Draw, Outcome::Away), Predicate::Under(Line(3))),
            (Predicate::Result(Outcome::Home), Predicate::BothScore),
            (Predicate::Result(Outcome::Away), Predicate::BothScore),
            (Predicate::BothScore, Predicate::Over(Line(2))),
        ];
        for (first, second) in combos {
            definitions.push(Predicate::And(Box::new(first), Box::new(second)));
        }

        Self::from_unique(definitions.into_iter().map(MarketDefinition::new).collect())
    }

    fn from_unique(definitions: Vec<MarketDefinition>) -> Self {
        let index = definitions
            .iter()
            .enumerate()
            .map(|(position, definition)| (definition.name.clone(), position))
            .collect::<FxHashMap<_, _>>();
        debug_assert_eq!(definitions.len(), index.len(), "duplicate market names");
        Self { definitions, index }
    }

    pub fn push(&mut self, definition: MarketDefinition) -> Result<(), InvalidMarket> {
        if self.index.contains_key(&definition.name) {
            return Err(InvalidMarket::Duplicate(definition.name));
        }
        self.index.insert(definition.name.clone(), self.definitions.len());
        self.definitions.push(definition);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<&MarketDefinition, UnknownMarket> {
        self.index
            .get(name)
            .map(|&index| &self.definitions[index])
            .ok_or_else(|| UnknownMarket {
                name: name.to_string(),
            })
    }

    pub fn definitions(&self) -> &[MarketDefinition] {
        &self.definitions
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Prices every market in the catalogue against the given grid.
    pub fn evaluate(&self, scoregrid: &ScoreGrid) -> MarketTable {
        let entries = self
            .definitions
            .iter()
            .map(|definition| MarketProbability {
                name: definition.name.clone(),
                category: definition.category,
                probability: definition.probability(scoregrid),
            })
            .collect();
        MarketTable {
            entries,
            index: self.index.clone(),
        }
    }
}

impl TryFrom<Vec<MarketDefinition>> for Catalogue {
    type Error = InvalidMarket;

    fn try_from(definitions: Vec<MarketDefinition>) -> Result<Self, Self::Error> {
        let mut catalogue = Self::default();
        for definition in definitions {
            catalogue.push(definition)?;
        }
        Ok(catalogue)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarketProbability {
    pub name: String,
    pub category: Category,
    pub probability: f64,
}
impl MarketProbability {
    pub fn fair_price(&self) -> f64 {
        crate::value::fair_price(self.probability)
    }
}

/// Market probabilities for one fixture, in catalogue order and indexed by name.
#[derive(Clone, Debug, Default)]
pub struct MarketTable {
    entries: Vec<MarketProbability>,
    index: FxHashMap<String, usize>,
}
impl MarketTable {
    pub fn get(&self, name: &str) -> Result<f64, UnknownMarket> {
        self.entry(name).map(|entry| entry.probability)
    }

    pub fn entry(&self, name: &str) -> Result<&MarketProbability, UnknownMarket> {
        self.index
            .get(name)
            .map(|&index| &self.entries[index])
            .ok_or_else(|| UnknownMarket {
                name: name.to_string(),
            })
    }

    pub fn entries(&self) -> &[MarketProbability] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries from most to least probable; ties keep catalogue order.
    pub fn sorted(&self) -> Vec<&MarketProbability> {
        let mut sorted: Vec<_> = self.entries.iter().collect();
        sorted.sort_by(|a, b| b.probability.total_cmp(&a.probability));
        sorted
    }

    /// The `n` most probable entries.
    pub fn top(&self, n: usize) -> Vec<&MarketProbability> {
        let mut sorted = self.sorted();
        sorted.truncate(n);
        sorted
    }

    /// Entries at or above `min_prob`, most probable first.
    pub fn above(&self, min_prob: f64) -> Vec<&MarketProbability> {
        self.sorted()
            .into_iter()
            .filter(|entry| entry.probability >= min_prob)
            .collect()
    }

    pub fn in_category(&self, category: Category) -> impl Iterator<Item = &MarketProbability> {
        self.entries
            .iter()
            .filter(move |entry| entry.category == category)
    }
}

impl TryFrom<Vec<MarketProbability>> for MarketTable {
    type Error = InvalidMarket;

    fn try_from(entries: Vec<MarketProbability>) -> Result<Self, Self::Error> {
        let mut index = FxHashMap::with_capacity_and_hasher(entries.len(), Default::default());
        for (position, entry) in entries.iter().enumerate() {
            if index.insert(entry.name.clone(), position).is_some() {
                return Err(InvalidMarket::Duplicate(entry.name.clone()));
            }
        }
        Ok(Self { entries, index })
    }
}
