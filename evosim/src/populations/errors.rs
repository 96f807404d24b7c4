use thiserror::Error;

/// A rejected [`EvolutionConfig`](super::EvolutionConfig).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("survival rate must lie in (0, 1], got {0}")]
    SurvivalRateOutOfRange(f64),
}

/// Errors raised while setting up or evolving a population.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvolutionError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
    #[error(
        "survival rate {survival_rate} leaves no survivors out of {population_count} creatures"
    )]
    ExhaustedSurvivorPool {
        population_count: usize,
        survival_rate: f64,
    },
    #[error("generation goal {0} already reached")]
    GoalReached(usize),
}

/// Parent selection was attempted on an empty survivor pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("cannot select parents from an empty survivor pool")]
pub struct EmptySurvivorPool;
