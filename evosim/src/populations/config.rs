use super::errors::ConfigError;

use serde::{Deserialize, Serialize};

use std::num::NonZeroUsize;

const DEFAULT_POPULATION_COUNT: NonZeroUsize = match NonZeroUsize::new(100) {
    Some(count) => count,
    None => panic!("default population count must be nonzero"),
};

/// Configuration data for population generation
/// and evolution.
///
/// Missing fields take their [default](EvolutionConfig::default)
/// values when deserialized.
///
/// # Examples
/// ```
/// use evosim::EvolutionConfig;
///
/// let config = EvolutionConfig {
///     generation_goal: 25,
///     ..EvolutionConfig::default()
/// };
/// assert_eq!(config.population_count.get(), 100);
/// assert_eq!(config.survivors_count(), 20);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    /// Number of creatures in every generation.
    pub population_count: NonZeroUsize,
    /// Number of generations bred after the initial, random one.
    pub generation_goal: usize,
    /// Top fraction of each generation allowed to breed.
    /// Must lie in `(0.0, 1.0]`.
    pub survival_rate: f64,
    /// Seed for the random source built by
    /// [`run_evolution_seeded`](crate::run_evolution_seeded).
    /// `None` seeds from entropy. Functions given an explicit
    /// [`Randomness`](crate::Randomness) ignore it.
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    /// 100 creatures, 10 generations, top 20% survive, unseeded.
    fn default() -> EvolutionConfig {
        EvolutionConfig {
            population_count: DEFAULT_POPULATION_COUNT,
            generation_goal: 10,
            survival_rate: 0.2,
            seed: None,
        }
    }
}

impl EvolutionConfig {
    /// Checks that the survival rate lies in `(0.0, 1.0]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.survival_rate > 0.0 && self.survival_rate <= 1.0 {
            Ok(())
        } else {
            Err(ConfigError::SurvivalRateOutOfRange(self.survival_rate))
        }
    }

    /// Returns how many of the fittest creatures of a
    /// generation breed the next one:
    /// `floor(population_count * survival_rate)`.
    pub fn survivors_count(&self) -> usize {
        (self.population_count.get() as f64 * self.survival_rate).floor() as usize
    }
}
