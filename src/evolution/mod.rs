//! Evolution engine.
//!
//! A generic, domain-agnostic evolutionary loop built on trait-based
//! strategies. Users describe their problem by implementing three
//! capabilities; the engine handles pairing, population growth, ranking,
//! and culling.
//!
//! # Core Traits
//!
//! - [`FitnessEvaluator`]: scores a whole generation at once
//! - [`CrossoverOperator`]: produces offspring from pairs of specimens
//! - [`SelectionPolicy`]: survivors, culling cadence, budget, and goal
//!
//! # Key Types
//!
//! - [`Generation`]: specimens, generation counter, and optional ages
//! - [`Engine`]: executes the evolutionary loop
//! - [`EngineConfig`]: engine-level parameters (seed, population ceiling)
//!
//! # Loop Shape
//!
//! Every crossover round pairs all specimens present at the start of the
//! round, so the population grows roughly quadratically until the next
//! culling round. Every `generations_till_elimination` rounds the whole
//! population is re-scored, ranked by ascending cost, and truncated to
//! `survivors`. Parents are never removed by crossover, so the best cost
//! seen at culling never gets worse (for a deterministic evaluator).
//!
//! # Submodules
//!
//! - [`adapters`]: closure-based strategies for problems that score
//!   specimens independently

pub mod adapters;
mod capacity;
mod config;
mod engine;
mod generation;
mod ranking;
mod types;

pub use adapters::{FixedSelection, PairwiseCrossover, PerGenomeFitness};
pub use capacity::estimate_capacity;
pub use config::EngineConfig;
pub use engine::{Engine, Evolution};
pub use generation::Generation;
pub use types::{Cost, CrossoverOperator, FitnessEvaluator, SelectionPolicy};
