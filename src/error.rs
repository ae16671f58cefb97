//! Error types for the evolution engine.
//!
//! Every failure surfaced by this crate is a caller contract violation:
//! a strategy returned malformed data, or the engine was asked to work on
//! a degenerate population. Growth beyond the capacity estimate is *not*
//! an error and never appears here.

/// Errors that can occur while building or evolving a generation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The fitness evaluator returned a cost sequence whose length differs
    /// from the number of specimens it was given.
    #[error("FitnessLengthMismatch: expected {expected} costs, got {actual}")]
    FitnessLengthMismatch { expected: usize, actual: usize },

    /// `evolve` was invoked on a generation without specimens.
    #[error("EmptyPopulation: cannot evolve a generation with no specimens")]
    EmptyPopulation,

    /// The selection policy asked for zero survivors.
    #[error("NoSurvivors: selection policy must keep at least one survivor")]
    NoSurvivors,

    /// The selection policy asked for a culling cadence of zero rounds.
    #[error("ZeroEliminationCadence: generations_till_elimination must be at least 1")]
    ZeroEliminationCadence,

    /// A generation was built with an age sequence that does not match its specimens.
    #[error("AgesLengthMismatch: {specimens} specimens, {ages} ages")]
    AgesLengthMismatch { specimens: usize, ages: usize },

    /// A permutation was not a valid rearrangement of the target sequence.
    #[error("InvalidPermutation: {0}")]
    InvalidPermutation(String),

    /// A crossover round tried to grow the population past the configured ceiling.
    #[error("PopulationCeilingExceeded: ceiling={ceiling}, attempted={attempted}")]
    PopulationCeilingExceeded { ceiling: usize, attempted: usize },

    /// Engine configuration failed validation.
    #[error("InvalidConfig: {0}")]
    InvalidConfig(String),
}

/// A type alias for results produced by this crate.
pub type Result<T> = std::result::Result<T, Error>;
