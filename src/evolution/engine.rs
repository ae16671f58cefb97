//! Evolution loop execution.
//!
//! [`Engine`] orchestrates the evolutionary process:
//! evaluation → crossover → (every few rounds) evaluation → culling → repeat.

use super::capacity::estimate_capacity;
use super::config::EngineConfig;
use super::generation::Generation;
use super::types::{Cost, CrossoverOperator, FitnessEvaluator, SelectionPolicy};
use crate::error::{Error, Result};
use super::ranking::rank_costs;
use crate::permutation::apply_permutation_in_place;
use crate::random::{DefaultRandom, Random, SeededRandom};
use std::sync::Arc;
use tracing::instrument;

/// Result of an [`Engine::evolve_with_costs`] call.
#[derive(Debug, Clone)]
pub struct Evolution<G, C> {
    /// The generation as left by the loop.
    pub generation: Generation<G>,

    /// Costs as left by the loop.
    ///
    /// Aligned with `generation` only if `costs_current` is `true`.
    pub costs: Vec<C>,

    /// Whether `costs` was computed for the returned specimens.
    ///
    /// `false` when the loop stopped on its generation budget in a round
    /// without culling.
    pub costs_current: bool,

    /// Crossover rounds executed during this call.
    pub rounds: usize,

    /// Whether the loop stopped because the selection policy was satisfied.
    pub reached_goal: bool,
}

/// Evolves generations with pluggable strategies.
///
/// The engine holds shared handles to a [`FitnessEvaluator`], a
/// [`CrossoverOperator`] and a [`SelectionPolicy`]. It never mutates them,
/// and it never keeps a generation between [`evolve`](Self::evolve) calls.
///
/// # Usage
///
/// ```
/// use std::sync::Arc;
/// use u_genetics::evolution::{
///     Engine, EngineConfig, FixedSelection, Generation, PairwiseCrossover, PerGenomeFitness,
/// };
/// use u_genetics::random::Random;
///
/// let fitness = PerGenomeFitness::new(|g: &i64| g.abs_diff(100));
/// let crossover = PairwiseCrossover::new(true, |a: &i64, b: &i64, _: &dyn Random| (a + b) / 2);
/// let selection = FixedSelection::<i64, u64>::new(4).with_max_generations(10).with_target(0);
///
/// let engine = Engine::<i64, u64>::with_config(
///     Arc::new(fitness),
///     Arc::new(crossover),
///     Arc::new(selection),
///     EngineConfig::default().with_seed(42),
/// )
/// .unwrap();
///
/// let evolved = engine.evolve(Generation::new(vec![0, 50, 150, 200])).unwrap();
/// assert_eq!(evolved.best(), Some(&100));
/// ```
pub struct Engine<G, C> {
    fitness: Arc<dyn FitnessEvaluator<G, C>>,
    crossover: Arc<dyn CrossoverOperator<G, C>>,
    selection: Arc<dyn SelectionPolicy<G, C>>,
    random: Arc<dyn Random>,
    config: EngineConfig,
}

impl<G, C: Cost> Engine<G, C> {
    /// Creates an engine with the default configuration.
    pub fn new(
        fitness: Arc<dyn FitnessEvaluator<G, C>>,
        crossover: Arc<dyn CrossoverOperator<G, C>>,
        selection: Arc<dyn SelectionPolicy<G, C>>,
    ) -> Self {
        Self {
            fitness,
            crossover,
            selection,
            random: Arc::new(DefaultRandom),
            config: EngineConfig::default(),
        }
    }

    /// Creates an engine with the given configuration.
    ///
    /// A configured seed gives the engine its own [`SeededRandom`].
    pub fn with_config(
        fitness: Arc<dyn FitnessEvaluator<G, C>>,
        crossover: Arc<dyn CrossoverOperator<G, C>>,
        selection: Arc<dyn SelectionPolicy<G, C>>,
        config: EngineConfig,
    ) -> Result<Self> {
        config.validate()?;

        let random: Arc<dyn Random> = match config.seed {
            Some(seed) => Arc::new(SeededRandom::new(seed)),
            None => Arc::new(DefaultRandom),
        };

        Ok(Self {
            fitness,
            crossover,
            selection,
            random,
            config,
        })
    }

    /// Replaces the random source handed to the crossover operator.
    pub fn with_random(mut self, random: Arc<dyn Random>) -> Self {
        self.random = random;
        self
    }

    /// Returns the configuration the engine was built with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evolves `generation` until the selection policy stops it.
    ///
    /// The loop stops right after a culling round whose best survivor
    /// satisfies [`SelectionPolicy::is_good_enough`], or once
    /// [`SelectionPolicy::max_generations`] crossover rounds have run in
    /// this call, whichever comes first.
    ///
    /// # Chaining calls
    ///
    /// If the budget runs out in a round without culling, the returned
    /// generation is expanded and not eliminated: it holds more than
    /// `survivors()` specimens, in no particular order. Feeding it to the
    /// next call is fine; the first culling round of that call ranks it.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyPopulation`] if `generation` has no specimens
    /// - [`Error::NoSurvivors`] if the policy keeps zero survivors
    /// - [`Error::ZeroEliminationCadence`] if the policy never culls
    /// - [`Error::FitnessLengthMismatch`] if the evaluator breaks its contract
    /// - [`Error::PopulationCeilingExceeded`] if a configured ceiling is hit
    pub fn evolve(&self, generation: Generation<G>) -> Result<Generation<G>> {
        self.evolve_with_costs(generation).map(|evolution| evolution.generation)
    }

    /// Like [`evolve`](Self::evolve), but also returns the costs and stop reason.
    #[instrument(
        level = "debug",
        skip_all,
        fields(population = generation.len(), survivors = self.selection.survivors())
    )]
    pub fn evolve_with_costs(&self, mut generation: Generation<G>) -> Result<Evolution<G, C>> {
        let survivors = self.selection.survivors();
        let cadence = self.selection.generations_till_elimination();
        let max_generations = self.selection.max_generations();

        if generation.is_empty() {
            return Err(Error::EmptyPopulation);
        }
        if survivors == 0 {
            return Err(Error::NoSurvivors);
        }
        if cadence == 0 {
            return Err(Error::ZeroEliminationCadence);
        }

        // 1. Reserve storage
        let capacity = estimate_capacity(
            survivors,
            cadence,
            self.crossover.commutes(),
            self.crossover.default_offspring_amount(),
        );
        let mut costs: Vec<C> = Vec::new();
        let reserved = generation
            .reserve(capacity.saturating_sub(generation.len()))
            .and_then(|_| costs.try_reserve(capacity));
        if let Err(err) = reserved {
            tracing::warn!(capacity, %err, "Could not reserve population storage, growing on demand");
        }

        // 2. Evaluate incoming generation
        self.evaluate(&generation, &mut costs)?;

        // 3. Evolutionary loop
        let mut rounds = 0usize;
        loop {
            self.crossover_round(&mut generation, &costs)?;
            generation.advance();
            rounds += 1;

            let mut costs_current = false;
            if generation.generation() % cadence == 0 {
                self.evaluate(&generation, &mut costs)?;
                self.cull(&mut generation, &mut costs, survivors)?;
                costs_current = true;

                if let (Some(best), Some(cost)) = (generation.best(), costs.first()) {
                    if self.selection.is_good_enough(best, cost) {
                        tracing::info!(
                            generation = generation.generation(),
                            rounds,
                            best_cost = ?cost,
                            "Selection policy satisfied"
                        );
                        return Ok(Evolution {
                            generation,
                            costs,
                            costs_current,
                            rounds,
                            reached_goal: true,
                        });
                    }
                }
            }

            if max_generations.is_some_and(|limit| rounds >= limit) {
                tracing::info!(
                    generation = generation.generation(),
                    rounds,
                    population = generation.len(),
                    "Generation budget exhausted"
                );
                return Ok(Evolution {
                    generation,
                    costs,
                    costs_current,
                    rounds,
                    reached_goal: false,
                });
            }
        }
    }

    /// Recomputes `costs` for the whole generation and checks the contract.
    fn evaluate(&self, generation: &Generation<G>, costs: &mut Vec<C>) -> Result<()> {
        costs.clear();
        costs.reserve(generation.len());
        self.fitness.cost(generation, costs);

        if costs.len() != generation.len() {
            return Err(Error::FitnessLengthMismatch {
                expected: generation.len(),
                actual: costs.len(),
            });
        }
        Ok(())
    }

    /// Crosses every distinct pair of the specimens present when the round starts.
    fn crossover_round(&self, generation: &mut Generation<G>, costs: &[C]) -> Result<()> {
        let parents = generation.len();
        let commutes = self.crossover.commutes();
        let default_offspring = self.crossover.default_offspring_amount();

        // parents age when they reproduce
        generation.age_parents();

        for i in 0..parents {
            let first = if commutes { i + 1 } else { 0 };
            for j in (first..parents).filter(|&j| j != i) {
                let amount = self
                    .crossover
                    .offspring_amount(generation, costs, i, j)
                    .saturating_mul(default_offspring);
                if amount == 0 {
                    continue;
                }

                if let Some(ceiling) = self.config.population_ceiling {
                    let attempted = generation.len().saturating_add(amount);
                    if attempted > ceiling {
                        return Err(Error::PopulationCeilingExceeded { ceiling, attempted });
                    }
                }

                for _ in 0..amount {
                    let child = self.crossover.cross(generation, costs, i, j, self.random.as_ref());
                    generation.push_offspring(child);
                }
            }
        }

        tracing::trace!(
            generation = generation.generation() + 1,
            parents,
            offspring = generation.len() - parents,
            "Crossover round finished"
        );
        Ok(())
    }

    /// Ranks specimens by ascending cost and keeps the first `survivors`.
    fn cull(&self, generation: &mut Generation<G>, costs: &mut Vec<C>, survivors: usize) -> Result<()> {
        let before = generation.len();

        let ranks = rank_costs(costs);
        generation.rearrange(&ranks, survivors)?;

        let mut scratch = ranks;
        apply_permutation_in_place(costs, &mut scratch)?;
        costs.truncate(survivors);

        tracing::debug!(
            generation = generation.generation(),
            before,
            after = generation.len(),
            best_cost = ?costs.first(),
            "Culled generation"
        );
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
