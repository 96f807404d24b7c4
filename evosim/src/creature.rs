use crate::Randomness;

use serde::Serialize;

use std::fmt;

/// Lowest value a trait may take.
pub const TRAIT_MIN: i32 = 1;
/// Highest value a trait may take.
pub const TRAIT_MAX: i32 = 100;
/// Fitness weights of speed, strength, vision and stamina.
pub const FITNESS_WEIGHTS: [f64; 4] = [0.3, 0.3, 0.2, 0.2];
/// Trait names, in the order used by [`Creature::traits`].
pub const TRAIT_NAMES: [&str; 4] = ["speed", "strength", "vision", "stamina"];

/// A creature with four traits and the fitness derived from them.
///
/// Creatures are immutable: the fitness is computed once,
/// at construction, from the traits it was given.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct Creature {
    speed: i32,
    strength: i32,
    vision: i32,
    stamina: i32,
    fitness: f64,
}

impl Creature {
    /// Creates a creature and scores it.
    ///
    /// Traits are expected in `TRAIT_MIN..=TRAIT_MAX` but
    /// are not checked; out-of-range values are scored as-is.
    ///
    /// # Examples
    /// ```
    /// use evosim::Creature;
    ///
    /// let creature = Creature::new(10, 20, 30, 40);
    /// assert!((creature.fitness() - 23.0).abs() < 1e-9);
    /// ```
    pub fn new(speed: i32, strength: i32, vision: i32, stamina: i32) -> Creature {
        Creature {
            speed,
            strength,
            vision,
            stamina,
            fitness: fitness_of(speed, strength, vision, stamina),
        }
    }

    /// Creates a creature with every trait drawn uniformly
    /// from `TRAIT_MIN..=TRAIT_MAX`, speed first and stamina last.
    pub fn random<R: Randomness + ?Sized>(rng: &mut R) -> Creature {
        let speed = rng.gen_range_inclusive(TRAIT_MIN, TRAIT_MAX);
        let strength = rng.gen_range_inclusive(TRAIT_MIN, TRAIT_MAX);
        let vision = rng.gen_range_inclusive(TRAIT_MIN, TRAIT_MAX);
        let stamina = rng.gen_range_inclusive(TRAIT_MIN, TRAIT_MAX);
        Creature::new(speed, strength, vision, stamina)
    }

    pub fn speed(&self) -> i32 {
        self.speed
    }

    pub fn strength(&self) -> i32 {
        self.strength
    }

    pub fn vision(&self) -> i32 {
        self.vision
    }

    pub fn stamina(&self) -> i32 {
        self.stamina
    }

    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    /// Returns the traits ordered as in [`TRAIT_NAMES`].
    ///
    /// # Examples
    /// ```
    /// use evosim::Creature;
    ///
    /// assert_eq!(Creature::new(1, 2, 3, 4).traits(), [1, 2, 3, 4]);
    /// ```
    pub fn traits(&self) -> [i32; 4] {
        [self.speed, self.strength, self.vision, self.stamina]
    }
}

fn fitness_of(speed: i32, strength: i32, vision: i32, stamina: i32) -> f64 {
    let [w_speed, w_strength, w_vision, w_stamina] = FITNESS_WEIGHTS;
    w_speed * speed as f64
        + w_strength * strength as f64
        + w_vision * vision as f64
        + w_stamina * stamina as f64
}

impl fmt::Display for Creature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Creature(speed={}, strength={}, vision={}, stamina={}, fitness={:.2})",
            self.speed, self.strength, self.vision, self.stamina, self.fitness
        )
    }
}
