//! Randomness used by the evolutionary loop.
//!
//! Every random decision (initial traits, parent choice, mutation)
//! goes through the [`Randomness`] trait, so a run can be driven
//! by a seeded generator or by a fixed script of draws.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A source of the random draws made during evolution.
pub trait Randomness {
    /// Returns `true` with probability `chance`.
    fn gen_bool(&mut self, chance: f64) -> bool;

    /// Returns an integer drawn uniformly from `low..=high`.
    fn gen_range_inclusive(&mut self, low: i32, high: i32) -> i32;

    /// Returns an index drawn uniformly from `0..len`.
    ///
    /// `len` must be nonzero.
    fn gen_index(&mut self, len: usize) -> usize;
}

impl<T: Randomness + ?Sized> Randomness for &mut T {
    fn gen_bool(&mut self, chance: f64) -> bool {
        (**self).gen_bool(chance)
    }

    fn gen_range_inclusive(&mut self, low: i32, high: i32) -> i32 {
        (**self).gen_range_inclusive(low, high)
    }

    fn gen_index(&mut self, len: usize) -> usize {
        (**self).gen_index(len)
    }
}

/// Simple wrapper for a `T: Rng`, needed so the
/// evolutionary loop can depend on [`Randomness`]
/// instead of on a concrete generator.
///
/// # Examples
/// ```
/// use evosim::{Randomness, RngSource};
///
/// let mut a = RngSource::seeded(7);
/// let mut b = RngSource::seeded(7);
/// assert_eq!(a.gen_range_inclusive(1, 100), b.gen_range_inclusive(1, 100));
/// ```
#[derive(Clone, Debug)]
pub struct RngSource<T: Rng>(T);

impl<T: Rng> RngSource<T> {
    pub fn new(rng: T) -> RngSource<T> {
        RngSource(rng)
    }
}

impl RngSource<StdRng> {
    /// A deterministic source: equal seeds give equal draws.
    pub fn seeded(seed: u64) -> RngSource<StdRng> {
        RngSource(StdRng::seed_from_u64(seed))
    }

    /// A source seeded from operating system entropy.
    pub fn from_entropy() -> RngSource<StdRng> {
        RngSource(StdRng::from_entropy())
    }

    /// Seeded if `seed` is given, from entropy otherwise.
    pub fn from_seed_option(seed: Option<u64>) -> RngSource<StdRng> {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl<T: Rng> Randomness for RngSource<T> {
    fn gen_bool(&mut self, chance: f64) -> bool {
        self.0.gen::<f64>() < chance
    }

    fn gen_range_inclusive(&mut self, low: i32, high: i32) -> i32 {
        self.0.gen_range(low..=high)
    }

    fn gen_index(&mut self, len: usize) -> usize {
        self.0.gen_range(0..len)
    }
}

/// A [`Randomness`] that replays fixed draws, for tests.
#[cfg(test)]
pub(crate) mod scripted {
    use super::Randomness;
    use std::collections::VecDeque;

    #[derive(Debug, Default)]
    pub(crate) struct Scripted {
        bools: VecDeque<bool>,
        ints: VecDeque<i32>,
        indices: VecDeque<usize>,
    }

    impl Scripted {
        pub(crate) fn new() -> Scripted {
            Scripted::default()
        }

        pub(crate) fn bools(mut self, bools: &[bool]) -> Scripted {
            self.bools.extend(bools);
            self
        }

        pub(crate) fn ints(mut self, ints: &[i32]) -> Scripted {
            self.ints.extend(ints);
            self
        }

        pub(crate) fn indices(mut self, indices: &[usize]) -> Scripted {
            self.indices.extend(indices);
            self
        }

        pub(crate) fn is_exhausted(&self) -> bool {
            self.bools.is_empty() && self.ints.is_empty() && self.indices.is_empty()
        }
    }

    impl Randomness for Scripted {
        fn gen_bool(&mut self, _chance: f64) -> bool {
            self.bools.pop_front().expect("script ran out of bools")
        }

        fn gen_range_inclusive(&mut self, low: i32, high: i32) -> i32 {
            let value = self.ints.pop_front().expect("script ran out of ints");
            assert!(
                (low..=high).contains(&value),
                "scripted {} outside {}..={}",
                value,
                low,
                high
            );
            value
        }

        fn gen_index(&mut self, len: usize) -> usize {
            let index = self.indices.pop_front().expect("script ran out of indices");
            assert!(index < len, "scripted index {} outside 0..{}", index, len);
            index
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_sources_agree() {
        let mut a = RngSource::seeded(42);
        let mut b = RngSource::seeded(42);
        for _ in 0..100 {
            assert_eq!(a.gen_range_inclusive(-5, 5), b.gen_range_inclusive(-5, 5));
            assert_eq!(a.gen_index(17), b.gen_index(17));
            assert_eq!(a.gen_bool(0.1), b.gen_bool(0.1));
        }
    }

    #[test]
    fn draws_stay_in_range() {
        let mut rng = RngSource::seeded(3);
        for _ in 0..1000 {
            assert!((1..=100).contains(&rng.gen_range_inclusive(1, 100)));
            assert!(rng.gen_index(3) < 3);
        }
    }

    #[test]
    fn certain_and_impossible_chances() {
        let mut rng = RngSource::seeded(0);
        for _ in 0..100 {
            assert!(rng.gen_bool(1.0));
            assert!(!rng.gen_bool(0.0));
        }
    }

    #[test]
    fn forwards_through_mutable_reference() {
        fn draw<R: Randomness>(mut rng: R) -> (i32, usize) {
            (rng.gen_range_inclusive(0, 10), rng.gen_index(2))
        }

        let mut rng = scripted::Scripted::new().ints(&[4]).indices(&[1]);
        assert_eq!(draw(&mut rng), (4, 1));
        assert!(rng.is_exhausted());
    }
}
