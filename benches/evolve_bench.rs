//! Criterion benchmarks for u-genetics.
//!
//! Uses synthetic problems (integer target, sphere function) to measure
//! pure engine overhead independent of any domain.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;
use u_genetics::evolution::{
    CrossoverOperator, Engine, EngineConfig, FixedSelection, Generation, PairwiseCrossover,
    PerGenomeFitness,
};
use u_genetics::permutation::{apply_permutation_in_place, sort_to_permutation};
use u_genetics::random::{Random, SeededRandom};

// ===========================================================================
// Integer target: minimize |g - 100|
// ===========================================================================

fn integer_engine(survivors: usize, cadence: usize) -> Engine<i64, u64> {
    let fitness = PerGenomeFitness::new(|g: &i64| g.abs_diff(100));
    let crossover = PairwiseCrossover::new(true, |a: &i64, b: &i64, _: &dyn Random| (a + b) / 2)
        .with_mutation(0.3, |g: &mut i64, random: &dyn Random| {
            *g += if random.uniform_int(0, 1) == 0 { -1 } else { 1 }
        });
    let selection = FixedSelection::<i64, u64>::new(survivors)
        .with_max_generations(10)
        .with_generations_till_elimination(cadence);

    Engine::<i64, u64>::with_config(
        Arc::new(fitness),
        Arc::new(crossover),
        Arc::new(selection),
        EngineConfig::default().with_seed(42),
    )
    .expect("valid config")
}

fn bench_integer_target(c: &mut Criterion) {
    let mut group = c.benchmark_group("evolve_integer_target");

    for survivors in [4, 16, 64] {
        group.bench_with_input(BenchmarkId::new("survivors", survivors), &survivors, |b, &n| {
            let engine = integer_engine(n, 1);
            let random = SeededRandom::new(7);
            b.iter(|| {
                let start: Vec<i64> = (0..n).map(|_| random.uniform_int(-1000, 1000)).collect();
                black_box(engine.evolve(Generation::new(start)).expect("evolve"))
            });
        });
    }

    group.finish();
}

// ===========================================================================
// Sphere: minimize sum(x_i^2)
// ===========================================================================

/// Blend crossover over real vectors, non-commuting.
struct BlendCrossover;

impl CrossoverOperator<Vec<f64>, f64> for BlendCrossover {
    fn commutes(&self) -> bool {
        false
    }

    fn cross(&self, generation: &Generation<Vec<f64>>, _costs: &[f64], i: usize, j: usize, random: &dyn Random) -> Vec<f64> {
        let specimens = generation.specimens();
        specimens[i]
            .iter()
            .zip(&specimens[j])
            .map(|(&a, &b)| {
                let w = random.uniform_float(0.0, 1.0);
                a * w + b * (1.0 - w) + random.uniform_float(-0.05, 0.05)
            })
            .collect()
    }
}

fn bench_sphere(c: &mut Criterion) {
    let mut group = c.benchmark_group("evolve_sphere");

    for dim in [5, 20] {
        group.bench_with_input(BenchmarkId::new("dim", dim), &dim, |b, &d| {
            let fitness = PerGenomeFitness::new(|g: &Vec<f64>| g.iter().map(|x| x * x).sum::<f64>());
            let selection = FixedSelection::<Vec<f64>, f64>::new(12).with_max_generations(20);
            let engine = Engine::<Vec<f64>, f64>::with_config(
                Arc::new(fitness),
                Arc::new(BlendCrossover),
                Arc::new(selection),
                EngineConfig::default().with_seed(42),
            )
            .expect("valid config");
            let random = SeededRandom::new(3);

            b.iter(|| {
                let start: Vec<Vec<f64>> = (0..12)
                    .map(|_| (0..d).map(|_| random.uniform_float(-5.0, 5.0)).collect())
                    .collect();
                black_box(engine.evolve(Generation::new(start)).expect("evolve"))
            });
        });
    }

    group.finish();
}

// ===========================================================================
// Permutation utilities
// ===========================================================================

fn bench_permutation(c: &mut Criterion) {
    let mut group = c.benchmark_group("permutation");
    let random = SeededRandom::new(11);

    for n in [1_000, 100_000] {
        let costs: Vec<f64> = (0..n).map(|_| random.uniform_float(0.0, 1.0)).collect();

        group.bench_with_input(BenchmarkId::new("rank_and_apply", n), &costs, |b, costs| {
            b.iter(|| {
                let mut ranks = sort_to_permutation(costs, |a, b| a.total_cmp(b));
                let mut sequence = costs.clone();
                apply_permutation_in_place(&mut sequence, &mut ranks).expect("valid permutation");
                black_box(sequence)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_integer_target, bench_sphere, bench_permutation);
criterion_main!(benches);
