//! Console tables for the pipeline's outputs.

use stanza::style::HAlign::Left;
use stanza::style::{HAlign, Header, MinWidth, Separator, Styles};
use stanza::table::{Col, Row, Table};

use crate::domain::Score;
use crate::market::MarketProbability;
use crate::strength::StrengthProfile;
use crate::value::ValueAssessment;
use crate::xg::ExpectedGoals;

fn label_col() -> Col {
    Col::new(Styles::default().with(MinWidth(12)).with(Left))
}

fn number_col() -> Col {
    Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right))
}

fn header(cells: &[&str]) -> Row {
    Row::new(
        Styles::default().with(Header(true)).with(Separator(true)),
        cells.iter().map(|&cell| cell.into()).collect(),
    )
}

pub fn tabulate_profiles(
    teams: [(&str, &StrengthProfile); 2],
    expected_goals: &ExpectedGoals,
) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            label_col(),
            number_col(),
            number_col(),
            number_col(),
            number_col(),
            number_col(),
        ])
        .with_row(header(&["Team", "Attack", "Defence", "Form mult", "Form score", "xG"]));
    for ((name, profile), xg) in teams.into_iter().zip([expected_goals.home, expected_goals.away]) {
        let name = if profile.defaulted {
            format!("{name} (default)")
        } else {
            name.to_string()
        };
        table.push_row(Row::new(
            Styles::default(),
            vec![
                name.into(),
                format!("{:.3}", profile.attack_rate).into(),
                format!("{:.3}", profile.defense_rate).into(),
                format!("{:.3}", profile.form_multiplier).into(),
                format!("{:.1}", profile.form_score).into(),
                format!("{xg:.3}").into(),
            ],
        ));
    }
    table
}

pub fn tabulate_scores(scores: &[(Score, f64)]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Centred)),
            number_col(),
            number_col(),
        ])
        .with_row(header(&["Score", "Probability", "Fair price"]));
    for (score, prob) in scores {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                score.to_string().into(),
                format!("{prob:.4}").into(),
                format!("{:.2}", crate::value::fair_price(*prob)).into(),
            ],
        ));
    }
    table
}

pub fn tabulate_markets(entries: &[&MarketProbability]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(20)).with(Left)),
            label_col(),
            number_col(),
            number_col(),
        ])
        .with_row(header(&["Market", "Category", "Probability", "Fair price"]));
    for entry in entries {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                entry.name.clone().into(),
                entry.category.to_string().into(),
                format!("{:.4}", entry.probability).into(),
                format!("{:.2}", entry.fair_price()).into(),
            ],
        ));
    }
    table
}

pub fn tabulate_assessments(assessments: &[(String, ValueAssessment)]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(20)).with(Left)),
            number_col(),
            number_col(),
            number_col(),
            number_col(),
            number_col(),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Centred)),
        ])
        .with_row(header(&[
            "Market",
            "Probability",
            "Fair price",
            "Offered",
            "EV",
            "Edge",
            "Verdict",
        ]));
    for (market, assessment) in assessments {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                market.clone().into(),
                format!("{:.4}", assessment.model_probability).into(),
                format!("{:.2}", assessment.fair_odds).into(),
                format!("{:.2}", assessment.offered_odds).into(),
                format!("{:+.3}", assessment.expected_value).into(),
                format!("{:+.3}", assessment.edge).into(),
                assessment.classification.to_string().into(),
            ],
        ));
    }
    table
}

/// A complete book alongside its margin-free probabilities and the model's.
pub fn tabulate_book(names: &[&str], prices: &[f64], fair_probs: &[f64], model_probs: &[f64]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![label_col(), number_col(), number_col(), number_col()])
        .with_row(header(&["Outcome", "Price", "Devigged", "Model"]));
    for (index, name) in names.iter().enumerate() {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                name.to_string().into(),
                format!("{:.2}", prices[index]).into(),
                format!("{:.4}", fair_probs[index]).into(),
                format!("{:.4}", model_probs[index]).into(),
            ],
        ));
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::Category;
    use crate::value::Classification;
    use stanza::renderer::console::Console;
    use stanza::renderer::Renderer;

    fn render(table: &Table) -> String {
        Console::default().render(table).to_string()
    }

    #[test]
    fn markets() {
        let entries = [
            MarketProbability {
                name: "Over 2.5".into(),
                category: Category::GoalLine,
                probability: 0.5,
            },
            MarketProbability {
                name: "1 + Goal".into(),
                category: Category::Combo,
                probability: 0.25,
            },
        ];
        let rendered = render(&tabulate_markets(&entries.iter().collect::<Vec<_>>()));
        assert!(rendered.contains("Over 2.5"), "{rendered}");
        assert!(rendered.contains("GoalLine"), "{rendered}");
        assert!(rendered.contains("4.00"), "{rendered}");
    }

    #[test]
    fn assessments() {
        let assessment = ValueAssessment {
            model_probability: 0.55,
            fair_odds: 1.0 / 0.55,
            offered_odds: 2.0,
            expected_value: 0.1,
            edge: 0.05,
            classification: Classification::Value,
        };
        let rendered = render(&tabulate_assessments(&[("1".into(), assessment)]));
        assert!(rendered.contains("1.82"), "{rendered}");
        assert!(rendered.contains("+0.100"), "{rendered}");
        assert!(rendered.contains("Value"), "{rendered}");
    }

    #[test]
    fn scores() {
        let rendered = render(&tabulate_scores(&[(Score::new(2, 1), 0.125)]));
        assert!(rendered.contains("2-1"), "{rendered}");
        assert!(rendered.contains("8.00"), "{rendered}");
    }
}
