//! Strategy capabilities consumed by the engine.
//!
//! The engine owns no problem knowledge. Users plug their problem in by
//! implementing three traits:
//!
//! - [`FitnessEvaluator`]: scores a whole generation at once
//! - [`CrossoverOperator`]: produces offspring from pairs of specimens
//! - [`SelectionPolicy`]: decides population size, culling cadence, and
//!   when to stop
//!
//! All three are generic over the genome type `G` and the cost type `C`,
//! and are object safe so the engine can hold them as `Arc<dyn _>`.

use super::generation::Generation;
use crate::random::Random;
use std::fmt::Debug;

/// Marker trait for cost values.
///
/// Lower cost is better (minimization). Costs only need a partial order:
/// culling ranks a cost before every cost it strictly beats, and leaves
/// incomparable pairs (for example two Pareto-optimal objective vectors)
/// in no particular order. Values not comparable with themselves (such as
/// `NaN`) rank after every other value.
///
/// Totally ordered costs are ranked in O(n log n). Costs with incomparable
/// pairs fall back to front-by-front ranking in O(n²).
///
/// Blanket-implemented for every `PartialOrd + Clone + Debug` type.
pub trait Cost: PartialOrd + Clone + Debug {}

impl<T: PartialOrd + Clone + Debug> Cost for T {}

/// Scores a generation.
///
/// Costs are computed for the entire generation in one call, because a
/// specimen's cost may depend on the rest of the population (for example
/// diversity-aware scoring), and because batching lets the evaluator
/// parallelize per-specimen work internally.
///
/// # Contract
///
/// `costs` arrives empty, with capacity reserved. Push exactly one cost per
/// specimen, in specimen order. The engine checks the length and fails with
/// [`Error::FitnessLengthMismatch`](crate::Error::FitnessLengthMismatch)
/// otherwise.
///
/// # Implementing
///
/// ```
/// use u_genetics::evolution::{FitnessEvaluator, Generation};
///
/// struct DistanceTo(i64);
///
/// impl FitnessEvaluator<i64, u64> for DistanceTo {
///     fn cost(&self, generation: &Generation<i64>, costs: &mut Vec<u64>) {
///         costs.extend(generation.specimens().iter().map(|g| g.abs_diff(self.0)));
///     }
/// }
/// ```
pub trait FitnessEvaluator<G, C> {
    /// Appends one cost per specimen of `generation` to `costs`.
    fn cost(&self, generation: &Generation<G>, costs: &mut Vec<C>);
}

/// Produces offspring from pairs of specimens.
///
/// `costs` passed to the pairing methods are the ones computed at the last
/// culling round (or at the start of `evolve`). Costs are not recomputed
/// after crossover, so when culling happens less often than every round,
/// `costs` is shorter than the population: indices at or past
/// `costs.len()` belong to specimens born since the last evaluation.
///
/// Indices `i` and `j` always refer to specimens that existed when the
/// current round started; offspring never pair in the round they are born.
pub trait CrossoverOperator<G, C> {
    /// Whether crossing `(a, b)` is equivalent to crossing `(b, a)`.
    ///
    /// If `true`, the engine only crosses pairs with `i < j`; otherwise
    /// both orderings of every distinct pair.
    fn commutes(&self) -> bool;

    /// Baseline number of offspring per crossing pair.
    fn default_offspring_amount(&self) -> usize {
        1
    }

    /// Multiplier on [`default_offspring_amount`](Self::default_offspring_amount)
    /// for the pair `(i, j)`.
    ///
    /// Override to let fitter pairs reproduce more. There is no upper bound;
    /// see [`EngineConfig::population_ceiling`](super::EngineConfig::population_ceiling)
    /// for an optional hard limit.
    fn offspring_amount(&self, _generation: &Generation<G>, _costs: &[C], _i: usize, _j: usize) -> usize {
        1
    }

    /// Produces one offspring from the specimens at `i` and `j`.
    ///
    /// Mutation, if any, should draw from `random`.
    fn cross(&self, generation: &Generation<G>, costs: &[C], i: usize, j: usize, random: &dyn Random) -> G;
}

/// Decides population size, culling cadence, and termination.
pub trait SelectionPolicy<G, C> {
    /// Population size kept after each culling round.
    fn survivors(&self) -> usize;

    /// Crossover-round budget for one `evolve` call. `None` is unbounded.
    ///
    /// The budget is checked after each round, so `Some(0)` still runs one
    /// round.
    fn max_generations(&self) -> Option<usize> {
        None
    }

    /// Number of crossover rounds between culling rounds (1 culls every round).
    fn generations_till_elimination(&self) -> usize {
        1
    }

    /// Whether the best specimen is good enough to stop.
    ///
    /// Only evaluated right after a culling round, on the rank-0 survivor.
    fn is_good_enough(&self, _best: &G, _cost: &C) -> bool {
        false
    }
}
