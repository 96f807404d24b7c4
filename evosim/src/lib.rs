//! A toy genetic algorithm: creatures with four traits
//! (speed, strength, vision and stamina) are evolved over
//! a fixed number of generations.
//!
//! Each generation after the first is bred from the top
//! [`survival_rate`] fraction of the one before it, by
//! averaging the traits of two randomly chosen survivors
//! and occasionally mutating the result. Statistics over
//! the whole history are available through [`logging`].
//!
//! All randomness is drawn from a [`Randomness`] passed in
//! by the caller, so runs can be made reproducible by seeding it.
//!
//! [`survival_rate`]: EvolutionConfig::survival_rate
//!
//! # Example usage
//! ```
//! use evosim::{run_evolution, EvolutionConfig, RngSource};
//!
//! let config = EvolutionConfig {
//!     generation_goal: 20,
//!     ..EvolutionConfig::default()
//! };
//! let mut rng = RngSource::seeded(42);
//! let population = run_evolution(config, &mut rng).unwrap();
//!
//! let report = population.report();
//! for generation in &report.generations {
//!     println!("{}", generation);
//! }
//! println!("Best creature: {}", report.summary.best);
//! assert_eq!(report.generations.len(), 21);
//! ```

pub mod creature;
pub mod populations;
pub mod reproduction;
mod rng;

pub use creature::Creature;
pub use populations::*;
pub use reproduction::reproduce;
pub use rng::{Randomness, RngSource};
