//! Generic evolutionary optimization engine.
//!
//! Evolves a population of candidate solutions ("genomes") by repeatedly
//! crossing every pair of specimens, periodically re-scoring and culling
//! the population, until a generation budget or a goal predicate stops it.
//!
//! - **Evolution Engine**: the crossover / fitness / selection loop, with
//!   pluggable strategies (see [`evolution`]).
//! - **Permutation Utilities**: rank permutations and in-place reordering
//!   used for culling (see [`permutation`]).
//! - **Random Service**: the randomness capability handed to strategies
//!   (see [`random`]).
//!
//! # Architecture
//!
//! The crate contains no problem-specific concepts. Genome and cost types
//! are supplied by the caller, along with the fitness, crossover, and
//! selection strategies.
//!
//! # Features
//!
//! - `parallel`: score specimens on the rayon thread pool in
//!   [`PerGenomeFitness`](evolution::PerGenomeFitness)
//! - `serde`: derive `Serialize`/`Deserialize` for
//!   [`Generation`](evolution::Generation) and
//!   [`EngineConfig`](evolution::EngineConfig)

mod error;
pub mod evolution;
pub mod permutation;
pub mod random;

pub use error::{Error, Result};
