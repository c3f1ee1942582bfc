use criterion::{black_box, criterion_group, criterion_main, Criterion};

use scorecast::config::Config;
use scorecast::engine::{Engine, Fixture, TeamInput};
use scorecast::market::Catalogue;
use scorecast::scoregrid::ScoreGrid;
use scorecast::xg::{ExpectedGoals, Modifiers};

fn criterion_benchmark(c: &mut Criterion) {
    let xg = ExpectedGoals {
        home: 1.5,
        away: 0.9,
    };
    for bound in [6, 9, 15] {
        c.bench_function(&format!("cri_scoregrid_poisson_{bound}"), |b| {
            b.iter(|| ScoreGrid::from_univariate_poisson(black_box(&xg), bound));
        });
    }
    {
        let scoregrid = ScoreGrid::from_univariate_poisson(&xg, 9).unwrap();
        let catalogue = Catalogue::standard();
        c.bench_function("cri_scoregrid_catalogue_9", |b| {
            b.iter(|| catalogue.evaluate(black_box(&scoregrid)));
        });
    }
    {
        let engine = Engine::try_from(Config::default()).unwrap();
        let fixture = Fixture {
            home: TeamInput {
                name: "Home".into(),
                record: Default::default(),
            },
            away: TeamInput {
                name: "Away".into(),
                record: Default::default(),
            },
            modifiers: Modifiers::default(),
        };
        c.bench_function("cri_scoregrid_analyse", |b| {
            b.iter(|| engine.analyse(black_box(&fixture)));
        });
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
