use super::errors::EmptySurvivorPool;
use crate::{reproduce, Creature, Randomness};

/// Auxiliary type for offspring generation.
/// Breeds a whole generation out of a pool of survivors.
pub struct OffspringFactory<'a> {
    survivors: &'a [Creature],
}

impl<'a> OffspringFactory<'a> {
    pub fn new(survivors: &'a [Creature]) -> OffspringFactory<'a> {
        OffspringFactory { survivors }
    }

    /// Generates `count` offspring, each from two parents
    /// chosen uniformly and with replacement from the survivors.
    /// A creature may be chosen as both parents.
    ///
    /// Offspring are returned in the order they were bred.
    ///
    /// # Errors
    /// Returns [`EmptySurvivorPool`] if there are no survivors,
    /// before drawing anything from `rng`.
    ///
    /// # Examples
    /// ```
    /// use evosim::{Creature, OffspringFactory, RngSource};
    ///
    /// let survivors = [Creature::new(90, 80, 70, 60), Creature::new(50, 50, 50, 50)];
    /// let offspring = OffspringFactory::new(&survivors)
    ///     .generate_offspring(10, &mut RngSource::seeded(5))
    ///     .unwrap();
    /// assert_eq!(offspring.len(), 10);
    /// ```
    pub fn generate_offspring<R: Randomness + ?Sized>(
        &self,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<Creature>, EmptySurvivorPool> {
        if self.survivors.is_empty() {
            return Err(EmptySurvivorPool);
        }

        let mut offspring = Vec::with_capacity(count);
        for _ in 0..count {
            let (parent1, parent2) = self.choose_parents(rng);
            offspring.push(reproduce(parent1, parent2, rng));
        }
        Ok(offspring)
    }

    fn choose_parents<R: Randomness + ?Sized>(&self, rng: &mut R) -> (&'a Creature, &'a Creature) {
        let survivors = self.survivors;
        let parent1 = &survivors[rng.gen_index(survivors.len())];
        let parent2 = &survivors[rng.gen_index(survivors.len())];
        (parent1, parent2)
    }
}
