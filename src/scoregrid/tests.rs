use super::*;
use assert_float_eq::*;

fn grid(home: f64, away: f64, bound: u8) -> ScoreGrid {
    ScoreGrid::from_univariate_poisson(&ExpectedGoals { home, away }, bound).unwrap()
}

#[test]
pub fn dimensions() {
    let scoregrid = grid(1.5, 0.9, 9);
    assert_eq!(9, scoregrid.bound());
    assert_eq!(10, scoregrid.cells().rows());
    assert_eq!(10, scoregrid.cells().cols());
    assert_eq!(10, scoregrid.marginal(Side::Home).len());
    assert_eq!(10, scoregrid.marginal(Side::Away).len());
    assert_eq!(100, scoregrid.iter().count());
}

#[test]
pub fn cells_are_products_of_marginals() {
    let scoregrid = grid(1.5, 0.9, 6);
    for (score, prob) in scoregrid.iter() {
        let expected = scoregrid.marginal(Side::Home)[score.home as usize]
            * scoregrid.marginal(Side::Away)[score.away as usize];
        assert_eq!(expected, prob);
        assert!((0.0..=1.0).contains(&prob));
    }
    assert_float_relative_eq!(
        f64::exp(-2.4),
        scoregrid.prob(&Score::nil_all()),
        1e-12
    );
}

#[test]
pub fn beyond_bound_is_zero() {
    let scoregrid = grid(1.5, 0.9, 4);
    assert_eq!(0.0, scoregrid.prob(&Score::new(5, 0)));
    assert_eq!(0.0, scoregrid.prob(&Score::new(0, 5)));
    assert!(scoregrid.prob(&Score::new(4, 4)) > 0.0);
}

#[test]
pub fn residual_shrinks_with_bound() {
    let mut last_mass = 0.0;
    for bound in [2, 4, 6, 9, 12, 15] {
        let scoregrid = grid(1.5, 0.9, bound);
        let mass = scoregrid.retained_mass();
        assert!(mass > last_mass, "mass {mass} at bound {bound} did not exceed {last_mass}");
        assert!(mass <= 1.0);
        assert_float_absolute_eq!(1.0 - mass, scoregrid.residual(), 1e-15);
        last_mass = mass;
    }
    assert!(grid(1.5, 0.9, 9).residual() < 1e-5);
    assert!(grid(1.5, 0.9, 15).residual() < 1e-10);
}

#[test]
pub fn normalised_has_unit_mass() {
    let scoregrid = grid(2.1, 1.4, 4);
    assert!(scoregrid.residual() > 0.01);
    assert!(!scoregrid.is_normalised());

    let normalised = scoregrid.normalised();
    assert!(normalised.is_normalised());
    assert_float_absolute_eq!(1.0, normalised.retained_mass(), 1e-12);
    assert_float_absolute_eq!(0.0, normalised.residual(), 1e-12);
    assert_float_absolute_eq!(1.0, normalised.marginal(Side::Home).sum(), 1e-12);
    let ratio = normalised.prob(&Score::new(1, 1)) / scoregrid.prob(&Score::new(1, 1));
    assert_float_relative_eq!(1.0 / scoregrid.retained_mass(), ratio, 1e-9);

    // the original is untouched
    assert!(scoregrid.residual() > 0.01);
}

#[test]
pub fn expectations_approach_lambdas() {
    let scoregrid = grid(1.5, 0.9, 15);
    let (home, away) = scoregrid.expectations();
    assert_float_absolute_eq!(1.5, home, 1e-6);
    assert_float_absolute_eq!(0.9, away, 1e-6);
    assert_eq!(1.5, scoregrid.expected_goals().home);
}

#[test]
pub fn most_likely_scores() {
    let scoregrid = grid(1.5, 0.9, 9);
    let top = scoregrid.most_likely(3);
    assert_eq!(3, top.len());
    assert_eq!(Score::new(1, 0), top[0].0);
    assert_eq!(Score::new(1, 1), top[1].0);
    assert!(top[0].1 >= top[1].1);
    assert!(top[1].1 >= top[2].1);
    assert_eq!(100, scoregrid.most_likely(usize::MAX).len());
}

#[test]
pub fn zero_lambda_is_spike() {
    let scoregrid = grid(0.0, 0.0, 5);
    assert_eq!(1.0, scoregrid.prob(&Score::nil_all()));
    assert_eq!(1.0, scoregrid.retained_mass());
    assert_eq!(0.0, scoregrid.residual());
}

#[test]
pub fn invalid_bound() {
    let xg = ExpectedGoals { home: 1.0, away: 1.0 };
    assert_eq!(
        Err(InvalidScoreGrid::Bound(InvalidConfig::TruncationBound(0))),
        ScoreGrid::from_univariate_poisson(&xg, 0)
    );
    assert_eq!(
        Err(InvalidScoreGrid::Bound(InvalidConfig::TruncationBound(16))),
        ScoreGrid::from_univariate_poisson(&xg, 16)
    );
}

#[test]
pub fn invalid_expected_goals() {
    assert_eq!(
        Err(InvalidScoreGrid::ExpectedGoals {
            side: Side::Home,
            value: -0.5
        }),
        ScoreGrid::from_univariate_poisson(&ExpectedGoals { home: -0.5, away: 1.0 }, 9)
    );
    assert_eq!(
        Err(InvalidScoreGrid::ExpectedGoals {
            side: Side::Away,
            value: f64::INFINITY
        }),
        ScoreGrid::from_univariate_poisson(&ExpectedGoals { home: 1.0, away: f64::INFINITY }, 9)
    );
    match ScoreGrid::from_univariate_poisson(&ExpectedGoals { home: f64::NAN, away: 1.0 }, 9) {
        Err(InvalidScoreGrid::ExpectedGoals { side, value }) => {
            assert_eq!(Side::Home, side);
            assert!(value.is_nan());
        }
        other => panic!("unexpected {other:?}"),
    }
    assert!(ScoreGrid::from_univariate_poisson(&ExpectedGoals { home: 0.0, away: 0.0 }, 9).is_ok());
}
