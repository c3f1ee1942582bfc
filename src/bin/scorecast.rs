use std::env;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{anyhow, bail};
use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use tracing::{debug, info, warn};

use scorecast::config::Config;
use scorecast::engine::{Analysis, Engine, Fixture};
use scorecast::file::ReadJsonFile;
use scorecast::print;
use scorecast::value;

const BOOK: [&str; 3] = ["1", "X", "2"];

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// JSON file holding an array of fixtures
    #[clap(short = 'f', long)]
    file: Option<PathBuf>,

    /// JSON config file; absent keys take their defaults
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// number of markets to show, most probable first
    #[clap(short = 't', long, default_value = "15")]
    top: usize,

    /// only show markets at or above this probability
    #[clap(short = 'm', long)]
    min_prob: Option<f64>,

    /// number of most likely correct scores to show
    #[clap(short = 's', long, default_value = "5")]
    scores: usize,

    /// offered decimal odds for a market, e.g. "Over 2.5=1.85"; may be repeated
    #[clap(short = 'o', long = "odds", value_parser = parse_odds)]
    odds: Vec<(String, f64)>,
}
impl Args {
    fn validate(&self) -> anyhow::Result<()> {
        self.file
            .as_ref()
            .ok_or(anyhow!("fixtures file must be specified"))?;
        if self.top == 0 {
            bail!("at least one market must be shown");
        }
        if let Some(min_prob) = self.min_prob {
            if !(0.0..=1.0).contains(&min_prob) {
                bail!("minimum probability must lie in [0, 1], got {min_prob}");
            }
        }
        Ok(())
    }
}

fn parse_odds(s: &str) -> anyhow::Result<(String, f64)> {
    let (market, price) = s
        .rsplit_once('=')
        .ok_or(anyhow!("odds must be given as NAME=PRICE, got '{s}'"))?;
    let price = price
        .trim()
        .parse::<f64>()
        .map_err(|err| anyhow!("invalid price in '{s}': {err}"))?;
    Ok((market.trim().to_string(), price))
}

fn main() -> anyhow::Result<()> {
    if env::var("RUST_BACKTRACE").is_err() {
        env::set_var("RUST_BACKTRACE", "full")
    }
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info")
    }
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    args.validate()?;
    debug!("args: {args:?}");

    let config = match &args.config {
        Some(path) => {
            debug!("loading config from {}", path.display());
            Config::load(path)?
        }
        None => Config::default(),
    };
    debug!("config: {config:?}");
    let engine = Engine::try_from(config)?;

    let file = args.file.as_ref().ok_or(anyhow!("fixtures file must be specified"))?;
    let fixtures = Vec::<Fixture>::read_json_file(file)?;

    let start_time = Instant::now();
    let analyses = engine.analyse_all(&fixtures);
    let elapsed = start_time.elapsed();
    info!(
        "analysed {} fixtures in {:.3}s",
        fixtures.len(),
        elapsed.as_micros() as f64 / 1_000_000.
    );

    for (fixture, analysis) in fixtures.iter().zip(analyses) {
        let analysis = analysis?;
        report(&engine, &args, fixture, &analysis)?;
    }
    Ok(())
}

fn report(engine: &Engine, args: &Args, fixture: &Fixture, analysis: &Analysis) -> anyhow::Result<()> {
    info!("{} v {}", fixture.home.name, fixture.away.name);
    let profiles_table = print::tabulate_profiles(
        [
            (fixture.home.name.as_str(), &analysis.home_profile),
            (fixture.away.name.as_str(), &analysis.away_profile),
        ],
        &analysis.expected_goals,
    );
    info!("strength:\n{}", Console::default().render(&profiles_table));
    info!(
        "truncation bound: {}, retained mass: {:.6}, residual: {:.2e}",
        analysis.scoregrid.bound(),
        analysis.scoregrid.retained_mass(),
        analysis.scoregrid.residual()
    );

    let scores_table = print::tabulate_scores(&analysis.scoregrid.most_likely(args.scores));
    info!("most likely scores:\n{}", Console::default().render(&scores_table));

    let mut entries = match args.min_prob {
        Some(min_prob) => analysis.markets.above(min_prob),
        None => analysis.markets.sorted(),
    };
    entries.truncate(args.top);
    let markets_table = print::tabulate_markets(&entries);
    info!("markets:\n{}", Console::default().render(&markets_table));

    if args.odds.is_empty() {
        return Ok(());
    }
    let mut assessments = Vec::with_capacity(args.odds.len());
    for (market, price) in &args.odds {
        let assessment = engine.assess(analysis, market, *price)?;
        assessments.push((market.clone(), assessment));
    }
    let assessments_table = print::tabulate_assessments(&assessments);
    info!("value:\n{}", Console::default().render(&assessments_table));

    let book: Option<Vec<f64>> = BOOK
        .iter()
        .map(|&name| {
            args.odds
                .iter()
                .find(|(market, _)| market == name)
                .map(|(_, price)| *price)
        })
        .collect();
    match book {
        Some(prices) => {
            let model_probs = BOOK
                .iter()
                .map(|&name| analysis.markets.get(name))
                .collect::<Result<Vec<_>, _>>()?;
            let book_table =
                print::tabulate_book(&BOOK, &prices, &value::devig(&prices), &model_probs);
            info!(
                "1X2 book, overround: {:.3}\n{}",
                value::overround(&prices),
                Console::default().render(&book_table)
            );
        }
        None => {
            if args.odds.iter().any(|(market, _)| BOOK.contains(&market.as_str())) {
                warn!("incomplete 1X2 book; overround not computed");
            }
        }
    }
    Ok(())
}
