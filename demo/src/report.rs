use evosim::logging::Stats;
use evosim::{EvolutionConfig, EvolutionReport};

use std::io::{self, Write};

const RULE: &str = "============================================================";

pub fn write_banner(out: &mut impl Write, config: &EvolutionConfig) -> io::Result<()> {
    writeln!(out, "{}", RULE)?;
    writeln!(out, "{:^60}", "evosim - Genetic Algorithm Demo")?;
    writeln!(out, "{}", RULE)?;
    writeln!(
        out,
        "Starting evolution simulation with {} creatures for {} generations",
        config.population_count, config.generation_goal
    )?;
    writeln!(
        out,
        "Survival rate: {}% per generation\n",
        config.survival_rate * 100.0
    )
}

/// Per-generation fitness lines, then the final results.
pub fn write_text(out: &mut impl Write, report: &EvolutionReport) -> io::Result<()> {
    for generation in &report.generations {
        writeln!(out, "{}", generation)?;
    }
    writeln!(
        out,
        "\nPeak average fitness reached in generation {}",
        report.best_generation
    )?;

    let summary = &report.summary;
    writeln!(out, "\n{}", RULE)?;
    writeln!(out, "{:^60}", "FINAL RESULTS")?;
    writeln!(out, "{}", RULE)?;
    writeln!(
        out,
        "Initial Generation Avg Fitness: {:.2}",
        summary.initial_mean_fitness
    )?;
    writeln!(
        out,
        "Final Generation Avg Fitness: {:.2}",
        summary.final_mean_fitness
    )?;
    writeln!(out, "\nBest creature in final generation:\n  {}", summary.best)?;
    writeln!(out, "\nWorst creature in final generation:\n  {}", summary.worst)?;
    writeln!(
        out,
        "\nOverall fitness improvement: {:+.2}",
        summary.fitness_improvement
    )
}

/// Aggregates over independent runs.
pub fn write_batch(out: &mut impl Write, reports: &[EvolutionReport]) -> io::Result<()> {
    let final_fitness = Stats::of(reports.iter().map(|r| r.summary.final_mean_fitness));
    let improvement = Stats::of(reports.iter().map(|r| r.summary.fitness_improvement));
    let best_generation = Stats::of(reports.iter().map(|r| r.best_generation as f64));
    match (final_fitness, improvement, best_generation) {
        (Some(final_fitness), Some(improvement), Some(best_generation)) => {
            writeln!(out, "Runs: {}", reports.len())?;
            writeln!(out, "Final generation avg fitness: {:?}", final_fitness)?;
            writeln!(out, "Fitness improvement: {:?}", improvement)?;
            writeln!(out, "Peak generation: {:?}", best_generation)
        }
        _ => writeln!(out, "Runs: 0"),
    }
}
