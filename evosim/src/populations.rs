//! A Population is a history of generations of creatures.
//! Each generation is bred from the fittest creatures of
//! the one before it.
mod config;
mod errors;
pub mod logging;
mod offspring_factory;

pub use config::EvolutionConfig;
pub use errors::{ConfigError, EmptySurvivorPool, EvolutionError};
pub use logging::EvolutionReport;
use logging::GenerationStats;
pub use offspring_factory::OffspringFactory;

use crate::{Creature, Randomness, RngSource};

use log::{debug, info};

/// One population snapshot, sorted by decreasing fitness.
pub type Generation = Vec<Creature>;

/// An evolving population and every generation it has gone through.
#[derive(Clone, Debug)]
pub struct Population {
    generations: Vec<Generation>,
    config: EvolutionConfig,
}

impl Population {
    /// Creates a population whose first generation has
    /// `population_count` random creatures.
    ///
    /// # Errors
    /// Returns [`EvolutionError::InvalidConfiguration`] if the
    /// configuration doesn't [validate](EvolutionConfig::validate),
    /// and [`EvolutionError::ExhaustedSurvivorPool`] if generations
    /// are to be bred but the survival rate keeps no creature.
    /// Nothing is drawn from `rng` on error.
    ///
    /// # Examples
    /// ```
    /// use evosim::{EvolutionConfig, Population, RngSource};
    ///
    /// let population = Population::new(EvolutionConfig::default(), &mut RngSource::seeded(0)).unwrap();
    /// assert_eq!(population.generation_number(), 0);
    /// assert_eq!(population.latest().len(), 100);
    /// ```
    pub fn new<R: Randomness + ?Sized>(
        config: EvolutionConfig,
        rng: &mut R,
    ) -> Result<Population, EvolutionError> {
        config.validate()?;
        if config.generation_goal > 0 && config.survivors_count() == 0 {
            return Err(exhausted(&config));
        }

        let mut initial: Generation = (0..config.population_count.get())
            .map(|_| Creature::random(rng))
            .collect();
        sort_by_decreasing_fitness(&mut initial);

        Ok(Population {
            generations: vec![initial],
            config,
        })
    }

    /// Breeds the next generation from the survivors of the
    /// latest one, and appends it to the history.
    ///
    /// # Errors
    /// Returns [`EvolutionError::GoalReached`] if the
    /// generation goal has already been reached, and
    /// [`EvolutionError::ExhaustedSurvivorPool`] if there
    /// are no survivors to breed from.
    ///
    /// # Examples
    /// ```
    /// use evosim::{EvolutionConfig, EvolutionError, Population, RngSource};
    ///
    /// let config = EvolutionConfig {
    ///     generation_goal: 1,
    ///     ..EvolutionConfig::default()
    /// };
    /// let mut rng = RngSource::seeded(1);
    /// let mut population = Population::new(config, &mut rng).unwrap();
    ///
    /// population.evolve(&mut rng).unwrap();
    /// assert_eq!(population.generation_number(), 1);
    /// assert_eq!(population.evolve(&mut rng), Err(EvolutionError::GoalReached(1)));
    /// ```
    pub fn evolve<R: Randomness + ?Sized>(&mut self, rng: &mut R) -> Result<(), EvolutionError> {
        if self.is_complete() {
            return Err(EvolutionError::GoalReached(self.config.generation_goal));
        }

        let survivors = &self.latest()[..self.config.survivors_count()];
        // `new` already rejects an empty pool whenever breeding is due.
        debug_assert!(!survivors.is_empty());
        let mut next_generation = OffspringFactory::new(survivors)
            .generate_offspring(self.config.population_count.get(), rng)
            .map_err(|_| exhausted(&self.config))?;
        sort_by_decreasing_fitness(&mut next_generation);

        if let Some(stats) = GenerationStats::of(self.generations.len(), &next_generation) {
            debug!("{}", stats);
        }
        self.generations.push(next_generation);
        Ok(())
    }

    /// Evolves the population until the generation goal is reached.
    /// Does nothing if it already has been.
    pub fn run<R: Randomness + ?Sized>(&mut self, rng: &mut R) -> Result<(), EvolutionError> {
        while !self.is_complete() {
            self.evolve(rng)?;
        }
        Ok(())
    }

    /// Returns whether the generation goal has been reached.
    pub fn is_complete(&self) -> bool {
        self.generation_number() >= self.config.generation_goal
    }

    /// Returns the current generation number.
    /// The initial, random generation is number 0.
    pub fn generation_number(&self) -> usize {
        self.generations.len() - 1
    }

    /// Returns every generation so far, oldest first.
    pub fn generations(&self) -> &[Generation] {
        &self.generations
    }

    /// Returns the generation with the given number, if it exists.
    pub fn generation(&self, number: usize) -> Option<&[Creature]> {
        self.generations.get(number).map(Vec::as_slice)
    }

    /// Returns the most recent generation.
    pub fn latest(&self) -> &[Creature] {
        self.generations
            .last()
            .expect("population always holds its initial generation")
    }

    /// Returns the fittest creature of the latest generation.
    pub fn champion(&self) -> &Creature {
        self.latest()
            .first()
            .expect("generations are never empty")
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// Computes statistics over every generation so far.
    pub fn report(&self) -> EvolutionReport {
        EvolutionReport::from_generations(&self.generations)
            .expect("generations are never empty")
    }
}

/// Creates a population and evolves it until its generation goal.
///
/// # Examples
/// ```
/// use evosim::{run_evolution, EvolutionConfig, RngSource};
///
/// let config = EvolutionConfig {
///     population_count: std::num::NonZeroUsize::new(30).unwrap(),
///     generation_goal: 5,
///     survival_rate: 0.5,
///     seed: None,
/// };
/// let population = run_evolution(config, &mut RngSource::seeded(3)).unwrap();
/// assert_eq!(population.generations().len(), 6);
/// ```
pub fn run_evolution<R: Randomness + ?Sized>(
    config: EvolutionConfig,
    rng: &mut R,
) -> Result<Population, EvolutionError> {
    info!(
        "evolving {} creatures for {} generations, top {}% survive",
        config.population_count,
        config.generation_goal,
        config.survival_rate * 100.0
    );
    let mut population = Population::new(config, rng)?;
    population.run(rng)?;
    info!(
        "reached generation {}, champion {}",
        population.generation_number(),
        population.champion()
    );
    Ok(population)
}

/// Like [`run_evolution`], drawing from a random source
/// built from the configuration's [`seed`](EvolutionConfig::seed).
///
/// # Examples
/// ```
/// use evosim::{run_evolution_seeded, EvolutionConfig};
///
/// let config = EvolutionConfig {
///     generation_goal: 3,
///     seed: Some(11),
///     ..EvolutionConfig::default()
/// };
/// let a = run_evolution_seeded(config.clone()).unwrap();
/// let b = run_evolution_seeded(config).unwrap();
/// assert_eq!(a.generations(), b.generations());
/// ```
pub fn run_evolution_seeded(config: EvolutionConfig) -> Result<Population, EvolutionError> {
    let mut rng = RngSource::from_seed_option(config.seed);
    run_evolution(config, &mut rng)
}

/// Stable: creatures of equal fitness keep their order.
fn sort_by_decreasing_fitness(generation: &mut [Creature]) {
    generation.sort_by(|c1, c2| c2.fitness().total_cmp(&c1.fitness()));
}

fn exhausted(config: &EvolutionConfig) -> EvolutionError {
    EvolutionError::ExhaustedSurvivorPool {
        population_count: config.population_count.get(),
        survival_rate: config.survival_rate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creature::{TRAIT_MAX, TRAIT_MIN};
    use crate::rng::scripted::Scripted;

    use std::num::NonZeroUsize;

    fn config(population_count: usize, generation_goal: usize, survival_rate: f64) -> EvolutionConfig {
        EvolutionConfig {
            population_count: NonZeroUsize::new(population_count).unwrap(),
            generation_goal,
            survival_rate,
            seed: None,
        }
    }

    fn traits_of(generations: &[Generation]) -> Vec<Vec<[i32; 4]>> {
        generations
            .iter()
            .map(|g| g.iter().map(Creature::traits).collect())
            .collect()
    }

    #[test]
    fn single_creature_without_breeding() {
        let population = run_evolution(config(1, 0, 1.0), &mut RngSource::seeded(0)).unwrap();
        assert_eq!(population.generations().len(), 1);
        assert_eq!(population.latest().len(), 1);
        assert!(population.is_complete());
    }

    #[test]
    fn history_shape() {
        let population = run_evolution(config(50, 12, 0.2), &mut RngSource::seeded(17)).unwrap();
        assert_eq!(population.generations().len(), 13);
        assert_eq!(population.generation_number(), 12);
        for generation in population.generations() {
            assert_eq!(generation.len(), 50);
            assert!(generation
                .windows(2)
                .all(|pair| pair[0].fitness() >= pair[1].fitness()));
            for creature in generation {
                for t in creature.traits() {
                    assert!((TRAIT_MIN..=TRAIT_MAX).contains(&t));
                }
            }
        }
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let a = run_evolution(config(40, 8, 0.25), &mut RngSource::seeded(99)).unwrap();
        let b = run_evolution(config(40, 8, 0.25), &mut RngSource::seeded(99)).unwrap();
        assert_eq!(a.generations(), b.generations());

        let c = run_evolution(config(40, 8, 0.25), &mut RngSource::seeded(100)).unwrap();
        assert_ne!(traits_of(a.generations()), traits_of(c.generations()));
    }

    #[test]
    fn config_seed_fixes_the_run() {
        let seeded = EvolutionConfig {
            seed: Some(5),
            ..config(30, 4, 0.3)
        };
        let a = run_evolution_seeded(seeded.clone()).unwrap();
        let b = run_evolution_seeded(seeded).unwrap();
        assert_eq!(a.generations(), b.generations());

        let injected = run_evolution(config(30, 4, 0.3), &mut RngSource::seeded(5)).unwrap();
        assert_eq!(a.generations(), injected.generations());

        let other = run_evolution_seeded(EvolutionConfig {
            seed: Some(6),
            ..config(30, 4, 0.3)
        })
        .unwrap();
        assert_ne!(traits_of(a.generations()), traits_of(other.generations()));
    }

    #[test]
    fn zero_survivors_are_rejected() {
        let mut rng = Scripted::new();
        assert_eq!(
            Population::new(config(10, 3, 0.05), &mut rng).unwrap_err(),
            EvolutionError::ExhaustedSurvivorPool {
                population_count: 10,
                survival_rate: 0.05,
            }
        );
        assert_eq!(
            run_evolution(config(4, 1, 0.2), &mut rng).unwrap_err(),
            EvolutionError::ExhaustedSurvivorPool {
                population_count: 4,
                survival_rate: 0.2,
            }
        );
    }

    #[test]
    fn zero_survivors_allowed_without_breeding() {
        let population = run_evolution(config(4, 0, 0.2), &mut RngSource::seeded(2)).unwrap();
        assert_eq!(population.generations().len(), 1);
    }

    #[test]
    fn invalid_survival_rate_is_rejected() {
        for rate in [0.0, 1.5, -1.0, f64::NAN] {
            assert!(matches!(
                Population::new(config(10, 1, rate), &mut Scripted::new()),
                Err(EvolutionError::InvalidConfiguration(
                    ConfigError::SurvivalRateOutOfRange(_)
                ))
            ));
        }
    }

    #[test]
    fn initial_generation_is_sorted() {
        let mut rng = Scripted::new().ints(&[1, 1, 1, 1, 90, 90, 90, 90, 50, 50, 50, 50]);
        let population = Population::new(config(3, 0, 1.0), &mut rng).unwrap();
        assert_eq!(
            traits_of(population.generations()),
            vec![vec![[90; 4], [50; 4], [1; 4]]]
        );
        assert_eq!(population.champion().traits(), [90; 4]);
    }

    #[test]
    fn only_survivors_breed() {
        // Two survivors out of four: parents must be [90; 4] or [50; 4].
        let mut rng = Scripted::new()
            .ints(&[1, 1, 1, 1, 90, 90, 90, 90, 50, 50, 50, 50, 10, 10, 10, 10])
            .indices(&[0, 1, 1, 1, 0, 0, 1, 0])
            .bools(&[false; 4]);
        let mut population = Population::new(config(4, 1, 0.5), &mut rng).unwrap();
        population.evolve(&mut rng).unwrap();
        assert_eq!(
            traits_of(&population.generations()[1..]),
            vec![vec![[90; 4], [70; 4], [70; 4], [50; 4]]]
        );
        assert!(rng.is_exhausted());
    }

    #[test]
    fn equal_fitness_keeps_breeding_order() {
        let mut rng = Scripted::new()
            .ints(&[60, 40, 50, 50, 40, 60, 50, 50])
            .indices(&[0, 0, 1, 1])
            .bools(&[false, false]);
        let mut population = Population::new(config(2, 1, 1.0), &mut rng).unwrap();
        assert_eq!(
            traits_of(population.generations()),
            vec![vec![[60, 40, 50, 50], [40, 60, 50, 50]]]
        );
        population.evolve(&mut rng).unwrap();
        assert_eq!(
            traits_of(&population.generations()[1..]),
            vec![vec![[60, 40, 50, 50], [40, 60, 50, 50]]]
        );
    }

    #[test]
    fn run_is_a_no_op_once_complete() {
        let mut rng = RngSource::seeded(5);
        let mut population = run_evolution(config(10, 2, 0.3), &mut rng).unwrap();
        let before = population.generations().to_vec();
        population.run(&mut rng).unwrap();
        assert_eq!(population.generations(), before.as_slice());
        assert_eq!(population.evolve(&mut rng), Err(EvolutionError::GoalReached(2)));
    }

    #[test]
    fn report_covers_history() {
        let population = run_evolution(config(20, 4, 0.5), &mut RngSource::seeded(8)).unwrap();
        let report = population.report();
        assert_eq!(report.generations.len(), 5);
        assert_eq!(&report.summary.best, population.champion());
        // Ties at the bottom make the first of them the worst.
        assert_eq!(
            report.summary.worst.fitness(),
            population.latest().last().unwrap().fitness()
        );
        assert_eq!(report, population.report());
        assert!(population.generation(4).is_some());
        assert!(population.generation(5).is_none());
    }
}
