//! Closure-based strategy adapters.
//!
//! Most problems do not need population-aware scoring or fitness-weighted
//! reproduction. These adapters build the three strategies from plain
//! functions:
//!
//! - [`PerGenomeFitness`]: scores each specimen on its own
//! - [`PairwiseCrossover`]: crosses two parents, then mutates the child
//!   with a fixed probability
//! - [`FixedSelection`]: fixed survivors, budget, cadence, and cost target,
//!   adjustable between `evolve` calls

use super::generation::Generation;
use super::types::{CrossoverOperator, FitnessEvaluator, SelectionPolicy};
use crate::random::Random;
use std::cell::{Cell, RefCell};
use std::marker::PhantomData;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Default probability of mutating an offspring.
pub const DEFAULT_MUTATION_PROBABILITY: f64 = 0.05;

// ============================================================================
// Fitness
// ============================================================================

/// A [`FitnessEvaluator`] that scores every specimen independently.
///
/// With the `parallel` feature, specimens are scored on the rayon thread
/// pool. Costs are still returned in specimen order.
///
/// ```
/// use u_genetics::evolution::{FitnessEvaluator, Generation, PerGenomeFitness};
///
/// let fitness = PerGenomeFitness::new(|g: &i64| g.abs_diff(100));
/// let mut costs = Vec::new();
/// fitness.cost(&Generation::new(vec![90, 100, 130]), &mut costs);
/// assert_eq!(costs, vec![10, 0, 30]);
/// ```
pub struct PerGenomeFitness<G, C, F> {
    score: F,
    _marker: PhantomData<fn(&G) -> C>,
}

impl<G, C, F> PerGenomeFitness<G, C, F>
where
    F: Fn(&G) -> C,
{
    /// Creates an evaluator from a per-genome scoring function.
    pub fn new(score: F) -> Self {
        Self {
            score,
            _marker: PhantomData,
        }
    }
}

#[cfg(not(feature = "parallel"))]
impl<G, C, F> FitnessEvaluator<G, C> for PerGenomeFitness<G, C, F>
where
    F: Fn(&G) -> C,
{
    fn cost(&self, generation: &Generation<G>, costs: &mut Vec<C>) {
        costs.extend(generation.specimens().iter().map(&self.score));
    }
}

#[cfg(feature = "parallel")]
impl<G, C, F> FitnessEvaluator<G, C> for PerGenomeFitness<G, C, F>
where
    F: Fn(&G) -> C + Sync,
    G: Sync,
    C: Send,
{
    fn cost(&self, generation: &Generation<G>, costs: &mut Vec<C>) {
        costs.par_extend(generation.specimens().par_iter().map(&self.score));
    }
}

// ============================================================================
// Crossover
// ============================================================================

/// Mutation function type used when no mutation is configured.
pub type NoMutation<G> = fn(&mut G, &dyn Random);

/// A [`CrossoverOperator`] built from a two-parent crossover function.
///
/// Each offspring is mutated with probability `mutation_probability` if a
/// mutation function is configured. Offspring amounts are the defaults
/// (one per pair).
///
/// ```
/// use u_genetics::evolution::{CrossoverOperator, Generation, PairwiseCrossover};
/// use u_genetics::random::{Random, SeededRandom};
///
/// let crossover = PairwiseCrossover::new(true, |a: &i64, b: &i64, _: &dyn Random| (a + b) / 2)
///     .with_mutation(1.0, |g: &mut i64, _: &dyn Random| *g += 1);
///
/// let generation = Generation::new(vec![10, 20]);
/// let costs: &[u64] = &[0, 0];
/// let child = crossover.cross(&generation, costs, 0, 1, &SeededRandom::new(1));
/// assert_eq!(child, 16);
/// ```
pub struct PairwiseCrossover<G, F, M = NoMutation<G>> {
    cross: F,
    mutate: Option<M>,
    commutes: bool,
    mutation_probability: f64,
    _marker: PhantomData<fn(&G) -> G>,
}

impl<G, F> PairwiseCrossover<G, F>
where
    F: Fn(&G, &G, &dyn Random) -> G,
{
    /// Creates a crossover without mutation.
    ///
    /// `commutes` declares whether `cross(a, b)` is equivalent to `cross(b, a)`.
    pub fn new(commutes: bool, cross: F) -> Self {
        Self {
            cross,
            mutate: None,
            commutes,
            mutation_probability: DEFAULT_MUTATION_PROBABILITY,
            _marker: PhantomData,
        }
    }
}

impl<G, F, M> PairwiseCrossover<G, F, M> {
    /// Sets a mutation function applied to offspring with the given probability.
    ///
    /// The probability is clamped to `[0, 1]`.
    pub fn with_mutation<M2>(self, probability: f64, mutate: M2) -> PairwiseCrossover<G, F, M2>
    where
        M2: Fn(&mut G, &dyn Random),
    {
        PairwiseCrossover {
            cross: self.cross,
            mutate: Some(mutate),
            commutes: self.commutes,
            mutation_probability: clamp_probability(probability),
            _marker: PhantomData,
        }
    }

    /// Probability of mutating each offspring, in `[0, 1]`.
    pub fn mutation_probability(&self) -> f64 {
        self.mutation_probability
    }
}

impl<G, C, F, M> CrossoverOperator<G, C> for PairwiseCrossover<G, F, M>
where
    F: Fn(&G, &G, &dyn Random) -> G,
    M: Fn(&mut G, &dyn Random),
{
    fn commutes(&self) -> bool {
        self.commutes
    }

    fn cross(&self, generation: &Generation<G>, _costs: &[C], i: usize, j: usize, random: &dyn Random) -> G {
        let specimens = generation.specimens();
        let mut child = (self.cross)(&specimens[i], &specimens[j], random);

        if let Some(mutate) = &self.mutate {
            if random.is_hit(self.mutation_probability) {
                mutate(&mut child, random);
            }
        }

        child
    }
}

fn clamp_probability(probability: f64) -> f64 {
    if probability.is_nan() {
        0.0
    } else {
        probability.clamp(0.0, 1.0)
    }
}

// ============================================================================
// Selection
// ============================================================================

/// A [`SelectionPolicy`] with plain values.
///
/// The values sit behind cells, so a caller that keeps an `Arc` to the
/// policy can retune it between `evolve` calls while the engine holds
/// another handle.
///
/// With a target, [`is_good_enough`](SelectionPolicy::is_good_enough) holds
/// once the best cost is not greater than the target.
///
/// ```
/// use u_genetics::evolution::{FixedSelection, SelectionPolicy};
///
/// let selection = FixedSelection::<i64, f64>::new(10).with_target(0.5);
/// assert!(selection.is_good_enough(&0, &0.5));
/// assert!(!selection.is_good_enough(&0, &0.6));
///
/// selection.set_survivors(20);
/// assert_eq!(selection.survivors(), 20);
/// ```
#[derive(Debug)]
pub struct FixedSelection<G, C> {
    survivors: Cell<usize>,
    max_generations: Cell<Option<usize>>,
    generations_till_elimination: Cell<usize>,
    target: RefCell<Option<C>>,
    _marker: PhantomData<fn(&G)>,
}

impl<G, C> FixedSelection<G, C> {
    /// Creates a policy keeping `survivors` specimens, culling every round,
    /// without a budget or target.
    pub fn new(survivors: usize) -> Self {
        Self {
            survivors: Cell::new(survivors),
            max_generations: Cell::new(None),
            generations_till_elimination: Cell::new(1),
            target: RefCell::new(None),
            _marker: PhantomData,
        }
    }

    /// Sets the crossover-round budget per `evolve` call.
    pub fn with_max_generations(self, max_generations: usize) -> Self {
        self.max_generations.set(Some(max_generations));
        self
    }

    /// Sets the number of crossover rounds between culling rounds.
    pub fn with_generations_till_elimination(self, rounds: usize) -> Self {
        self.generations_till_elimination.set(rounds);
        self
    }

    /// Sets the cost at or below which evolution stops.
    pub fn with_target(self, target: C) -> Self {
        *self.target.borrow_mut() = Some(target);
        self
    }

    /// Changes the survivor count for later `evolve` calls.
    pub fn set_survivors(&self, survivors: usize) {
        self.survivors.set(survivors);
    }

    /// Changes the crossover-round budget. `None` removes it.
    pub fn set_max_generations(&self, max_generations: Option<usize>) {
        self.max_generations.set(max_generations);
    }

    /// Changes the number of crossover rounds between culling rounds.
    pub fn set_generations_till_elimination(&self, rounds: usize) {
        self.generations_till_elimination.set(rounds);
    }

    /// Changes the cost target. `None` disables the early stop.
    pub fn set_target(&self, target: Option<C>) {
        *self.target.borrow_mut() = target;
    }
}

impl<G, C: PartialOrd> SelectionPolicy<G, C> for FixedSelection<G, C> {
    fn survivors(&self) -> usize {
        self.survivors.get()
    }

    fn max_generations(&self) -> Option<usize> {
        self.max_generations.get()
    }

    fn generations_till_elimination(&self) -> usize {
        self.generations_till_elimination.get()
    }

    fn is_good_enough(&self, _best: &G, cost: &C) -> bool {
        self.target
            .borrow()
            .as_ref()
            .is_some_and(|target| !(target < cost))
    }
}
