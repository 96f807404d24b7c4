//! Sexual reproduction of creatures: trait averaging,
//! occasional mutation, then truncation and clamping.

use crate::creature::{TRAIT_MAX, TRAIT_MIN};
use crate::{Creature, Randomness};

use log::trace;

/// Chance that an offspring is mutated.
pub const MUTATION_CHANCE: f64 = 0.1;
/// Mutation offsets are drawn from `-MUTATION_BOUND..=MUTATION_BOUND`.
pub const MUTATION_BOUND: i32 = 5;

/// Mates two creatures and returns their offspring.
///
/// Each trait of the child is the mean of its parents' traits.
/// With a [`MUTATION_CHANCE`] chance, drawn once per child, every
/// mean is then shifted by its own offset in
/// `-MUTATION_BOUND..=MUTATION_BOUND`. The results are brought back
/// to whole traits by [`clamp_trait`].
///
/// # Examples
/// ```
/// use evosim::{reproduce, Creature, RngSource};
///
/// let mut rng = RngSource::seeded(0);
/// let child = reproduce(&Creature::new(1, 1, 1, 1), &Creature::new(100, 100, 100, 100), &mut rng);
/// assert!(child.traits().iter().all(|t| (1..=100).contains(t)));
/// ```
pub fn reproduce<R: Randomness + ?Sized>(
    parent1: &Creature,
    parent2: &Creature,
    rng: &mut R,
) -> Creature {
    let mut means = average_traits(parent1, parent2);

    if rng.gen_bool(MUTATION_CHANCE) {
        for mean in &mut means {
            *mean += rng.gen_range_inclusive(-MUTATION_BOUND, MUTATION_BOUND) as f64;
        }
        trace!("mutated offspring trait means to {:?}", means);
    }

    let [speed, strength, vision, stamina] = means.map(clamp_trait);
    Creature::new(speed, strength, vision, stamina)
}

/// Truncates `value` toward zero, then clamps it to
/// `TRAIT_MIN..=TRAIT_MAX`.
///
/// Truncation comes first, so `-2.5` becomes `-2` and then `1`,
/// and `100.9` becomes `100`.
///
/// # Examples
/// ```
/// use evosim::reproduction::clamp_trait;
///
/// assert_eq!(clamp_trait(0.5), 1);
/// assert_eq!(clamp_trait(57.5), 57);
/// assert_eq!(clamp_trait(104.0), 100);
/// ```
pub fn clamp_trait(value: f64) -> i32 {
    (value.trunc() as i32).clamp(TRAIT_MIN, TRAIT_MAX)
}

fn average_traits(parent1: &Creature, parent2: &Creature) -> [f64; 4] {
    let (a, b) = (parent1.traits(), parent2.traits());
    [
        (a[0] as f64 + b[0] as f64) / 2.0,
        (a[1] as f64 + b[1] as f64) / 2.0,
        (a[2] as f64 + b[2] as f64) / 2.0,
        (a[3] as f64 + b[3] as f64) / 2.0,
    ]
}
