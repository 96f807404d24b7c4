//! evosim demo - evolve a population of creatures and report on it.

mod report;

use evosim::{
    run_evolution, run_evolution_seeded, EvolutionConfig, EvolutionError, EvolutionReport,
    RngSource,
};

use clap::{Parser, ValueEnum};
use log::debug;
use rayon::prelude::*;
use thiserror::Error;

use std::fs;
use std::io::{self, Write};
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// Evolve creatures through truncation selection and print the results.
#[derive(Parser, Debug)]
#[command(name = "evosim-demo")]
struct Cli {
    /// RON file holding an evolution configuration.
    /// Flags given on the command line take precedence.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of creatures per generation.
    #[arg(long)]
    population: Option<NonZeroUsize>,

    /// Number of generations bred after the initial one.
    #[arg(long)]
    generations: Option<usize>,

    /// Fraction of each generation allowed to breed, in (0, 1].
    #[arg(long)]
    survival_rate: Option<f64>,

    /// Seed for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Run this many independent simulations and aggregate them.
    #[arg(long)]
    runs: Option<NonZeroUsize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Ron,
    Json,
}

/// Machine-readable output formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Encoding {
    Ron,
    Json,
}

impl Format {
    fn encoding(self) -> Option<Encoding> {
        match self {
            Format::Text => None,
            Format::Ron => Some(Encoding::Ron),
            Format::Json => Some(Encoding::Json),
        }
    }
}

#[derive(Debug, Error)]
enum DemoError {
    #[error("could not read config file {}: {source}", .path.display())]
    ReadConfig { path: PathBuf, source: io::Error },
    #[error("could not parse config file: {0}")]
    ParseConfig(#[from] ron::error::SpannedError),
    #[error("could not serialize report as RON: {0}")]
    Ron(#[from] ron::Error),
    #[error("could not serialize report as JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("could not write report: {0}")]
    Output(#[from] io::Error),
    #[error(transparent)]
    Evolution(#[from] EvolutionError),
}

fn main() {
    env_logger::init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), DemoError> {
    let config = load_config(&cli)?;
    debug!("using {:?}", config);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Some(runs) = cli.runs {
        let reports = run_batch(&config, runs)?;
        return match cli.format.encoding() {
            None => Ok(report::write_batch(&mut out, &reports)?),
            Some(encoding) => emit(&mut out, &reports, encoding),
        };
    }

    let encoding = cli.format.encoding();
    if encoding.is_none() {
        report::write_banner(&mut out, &config)?;
    }
    let report = run_evolution_seeded(config)?.report();
    match encoding {
        None => Ok(report::write_text(&mut out, &report)?),
        Some(encoding) => emit(&mut out, &report, encoding),
    }
}

/// Defaults, then the config file, then command-line flags.
fn load_config(cli: &Cli) -> Result<EvolutionConfig, DemoError> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path).map_err(|source| DemoError::ReadConfig {
                path: path.clone(),
                source,
            })?;
            ron::from_str(&text)?
        }
        None => EvolutionConfig::default(),
    };

    if let Some(population) = cli.population {
        config.population_count = population;
    }
    if let Some(generations) = cli.generations {
        config.generation_goal = generations;
    }
    if let Some(survival_rate) = cli.survival_rate {
        config.survival_rate = survival_rate;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    Ok(config)
}

/// Runs independent simulations in parallel. With a seed,
/// run `i` is seeded with `seed + i`.
fn run_batch(
    config: &EvolutionConfig,
    runs: NonZeroUsize,
) -> Result<Vec<EvolutionReport>, EvolutionError> {
    (0..runs.get())
        .into_par_iter()
        .map(|run| {
            let mut rng = match config.seed {
                Some(seed) => RngSource::seeded(seed.wrapping_add(run as u64)),
                None => RngSource::from_entropy(),
            };
            run_evolution(config.clone(), &mut rng).map(|population| population.report())
        })
        .collect()
}

fn emit<T: serde::Serialize>(
    out: &mut impl Write,
    value: &T,
    encoding: Encoding,
) -> Result<(), DemoError> {
    let text = match encoding {
        Encoding::Ron => ron::ser::to_string_pretty(value, ron::ser::PrettyConfig::default())?,
        Encoding::Json => serde_json::to_string_pretty(value)?,
    };
    writeln!(out, "{}", text)?;
    Ok(())
}
