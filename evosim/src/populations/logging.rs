//! Statistics over generations of creatures.
//!
//! Everything here is a pure function of the generations it is
//! given, so reports can be recomputed at will and always agree.

use crate::Creature;

use serde::Serialize;

use std::fmt;

/// Number of bins in each trait histogram of a [`TraitDistribution`].
pub const DISTRIBUTION_BINS: usize = 15;

/// A struct for reporting basic statistical data.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Stats {
    pub maximum: f64,
    pub minimum: f64,
    pub mean: f64,
    pub median: f64,
}

impl Stats {
    /// Returns statistics about numbers in a sequence,
    /// or `None` if the sequence is empty.
    ///
    /// # Examples
    /// ```
    /// use evosim::logging::Stats;
    ///
    /// let stats = Stats::of([-2.0, -1.0, 0.5, 1.0, 1.5]).unwrap();
    /// assert_eq!(stats.maximum, 1.5);
    /// assert_eq!(stats.minimum, -2.0);
    /// assert_eq!(stats.mean, 0.0);
    /// assert_eq!(stats.median, 0.5);
    /// ```
    pub fn of(data: impl IntoIterator<Item = f64>) -> Option<Stats> {
        let mut data: Vec<f64> = data.into_iter().collect();
        if data.is_empty() {
            return None;
        }
        let (mut max, mut min, mut sum) = (f64::MIN, f64::MAX, 0.0);
        for d in &data {
            max = d.max(max);
            min = d.min(min);
            sum += d;
        }
        let mean = sum / data.len() as f64;
        data.sort_by(f64::total_cmp);
        let mid = data.len() / 2;
        let median = if data.len() % 2 == 0 {
            (data[mid - 1] + data[mid]) / 2.0
        } else {
            data[mid]
        };
        Some(Stats {
            maximum: max,
            minimum: min,
            mean,
            median,
        })
    }
}

/// Mean value of each trait across a generation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TraitMeans {
    pub speed: f64,
    pub strength: f64,
    pub vision: f64,
    pub stamina: f64,
}

impl TraitMeans {
    /// Returns `None` for an empty generation.
    pub fn of(creatures: &[Creature]) -> Option<TraitMeans> {
        if creatures.is_empty() {
            return None;
        }
        let mut sums = [0.0; 4];
        for creature in creatures {
            for (sum, t) in sums.iter_mut().zip(creature.traits()) {
                *sum += t as f64;
            }
        }
        let [speed, strength, vision, stamina] = sums.map(|s| s / creatures.len() as f64);
        Some(TraitMeans {
            speed,
            strength,
            vision,
            stamina,
        })
    }

    /// Returns the means ordered as [`TRAIT_NAMES`](crate::creature::TRAIT_NAMES).
    pub fn as_array(&self) -> [f64; 4] {
        [self.speed, self.strength, self.vision, self.stamina]
    }
}

/// A snapshot of one generation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GenerationStats {
    pub generation_number: usize,
    pub fitness: Stats,
    pub trait_means: TraitMeans,
}

impl GenerationStats {
    /// Returns `None` for an empty generation.
    pub fn of(generation_number: usize, creatures: &[Creature]) -> Option<GenerationStats> {
        Some(GenerationStats {
            generation_number,
            fitness: Stats::of(creatures.iter().map(Creature::fitness))?,
            trait_means: TraitMeans::of(creatures)?,
        })
    }
}

impl fmt::Display for GenerationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Generation {}: Avg Fitness={:.2}, Max Fitness={:.2}, Min Fitness={:.2}",
            self.generation_number, self.fitness.mean, self.fitness.maximum, self.fitness.minimum
        )
    }
}

/// Counts of values falling in equal-width bins.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Histogram {
    /// Lower edge of the first bin.
    pub lower: f64,
    /// Upper edge of the last bin, which is closed.
    pub upper: f64,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bins `values` into `bins` equal-width bins spanning their range.
    ///
    /// When all values are equal the range is widened to
    /// half a unit on either side. Returns `None` if there
    /// are no values or no bins.
    ///
    /// # Examples
    /// ```
    /// use evosim::logging::Histogram;
    ///
    /// let histogram = Histogram::of(&[1.0, 2.0, 2.0, 5.0], 4).unwrap();
    /// assert_eq!(histogram.counts, vec![1, 2, 0, 1]);
    /// ```
    pub fn of(values: &[f64], bins: usize) -> Option<Histogram> {
        if values.is_empty() || bins == 0 {
            return None;
        }
        let (mut lower, mut upper) = (f64::MAX, f64::MIN);
        for v in values {
            lower = v.min(lower);
            upper = v.max(upper);
        }
        if lower == upper {
            lower -= 0.5;
            upper += 0.5;
        }
        let width = (upper - lower) / bins as f64;
        let mut counts = vec![0; bins];
        for v in values {
            let bin = ((v - lower) / width) as usize;
            counts[bin.min(bins - 1)] += 1;
        }
        Some(Histogram {
            lower,
            upper,
            counts,
        })
    }

    /// Returns the edges of every bin, `counts.len() + 1` in total.
    pub fn edges(&self) -> Vec<f64> {
        let width = (self.upper - self.lower) / self.counts.len() as f64;
        (0..=self.counts.len())
            .map(|i| self.lower + width * i as f64)
            .collect()
    }
}

/// The distribution of each trait across a generation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TraitDistribution {
    pub speed: Histogram,
    pub strength: Histogram,
    pub vision: Histogram,
    pub stamina: Histogram,
}

impl TraitDistribution {
    /// Returns `None` for an empty generation.
    pub fn of(creatures: &[Creature], bins: usize) -> Option<TraitDistribution> {
        let histogram = |get: fn(&Creature) -> i32| {
            let values: Vec<f64> = creatures.iter().map(|c| get(c) as f64).collect();
            Histogram::of(&values, bins)
        };
        Some(TraitDistribution {
            speed: histogram(Creature::speed)?,
            strength: histogram(Creature::strength)?,
            vision: histogram(Creature::vision)?,
            stamina: histogram(Creature::stamina)?,
        })
    }
}

/// How the final generation compares to the initial one.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Summary {
    pub initial_mean_fitness: f64,
    pub final_mean_fitness: f64,
    /// `final_mean_fitness - initial_mean_fitness`.
    pub fitness_improvement: f64,
    /// Fittest creature of the final generation.
    pub best: Creature,
    /// Least fit creature of the final generation.
    pub worst: Creature,
}

/// Statistics over a whole generation history: the series
/// a chart of the evolution is drawn from, plus a summary.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EvolutionReport {
    pub generations: Vec<GenerationStats>,
    /// Index of the generation with the highest mean fitness.
    /// The earliest one wins ties.
    pub best_generation: usize,
    pub summary: Summary,
    /// Trait distribution of the final generation.
    pub distribution: TraitDistribution,
}

impl EvolutionReport {
    /// Computes the report of a generation history.
    ///
    /// Returns `None` if there are no generations
    /// or any generation is empty.
    ///
    /// # Examples
    /// ```
    /// use evosim::{Creature, EvolutionReport};
    ///
    /// let history = vec![
    ///     vec![Creature::new(20, 20, 20, 20), Creature::new(10, 10, 10, 10)],
    ///     vec![Creature::new(30, 30, 30, 30), Creature::new(20, 20, 20, 20)],
    /// ];
    /// let report = EvolutionReport::from_generations(&history).unwrap();
    /// assert_eq!(report.best_generation, 1);
    /// assert!((report.summary.fitness_improvement - 10.0).abs() < 1e-9);
    /// ```
    pub fn from_generations(generations: &[Vec<Creature>]) -> Option<EvolutionReport> {
        let stats = generations
            .iter()
            .enumerate()
            .map(|(i, g)| GenerationStats::of(i, g))
            .collect::<Option<Vec<_>>>()?;

        let mut best_generation = 0;
        for (i, s) in stats.iter().enumerate() {
            if s.fitness.mean > stats[best_generation].fitness.mean {
                best_generation = i;
            }
        }

        let final_generation = generations.last()?;
        let initial_mean_fitness = stats.first()?.fitness.mean;
        let final_mean_fitness = stats.last()?.fitness.mean;
        let summary = Summary {
            initial_mean_fitness,
            final_mean_fitness,
            fitness_improvement: final_mean_fitness - initial_mean_fitness,
            best: first_by(final_generation, |a, b| a > b)?.clone(),
            worst: first_by(final_generation, |a, b| a < b)?.clone(),
        };

        Some(EvolutionReport {
            distribution: TraitDistribution::of(final_generation, DISTRIBUTION_BINS)?,
            generations: stats,
            best_generation,
            summary,
        })
    }

    /// Mean fitness of each generation.
    pub fn mean_fitness(&self) -> Vec<f64> {
        self.generations.iter().map(|s| s.fitness.mean).collect()
    }

    /// Maximum fitness of each generation.
    pub fn max_fitness(&self) -> Vec<f64> {
        self.generations.iter().map(|s| s.fitness.maximum).collect()
    }

    /// Minimum fitness of each generation.
    pub fn min_fitness(&self) -> Vec<f64> {
        self.generations.iter().map(|s| s.fitness.minimum).collect()
    }

    /// Trait means of each generation.
    pub fn trait_means(&self) -> Vec<[f64; 4]> {
        self.generations
            .iter()
            .map(|s| s.trait_means.as_array())
            .collect()
    }
}

/// The first creature whose fitness beats all others under `beats`.
fn first_by(creatures: &[Creature], beats: impl Fn(f64, f64) -> bool) -> Option<&Creature> {
    let mut chosen = creatures.first()?;
    for creature in creatures {
        if beats(creature.fitness(), chosen.fitness()) {
            chosen = creature;
        }
    }
    Some(chosen)
}
