//! Random Service.
//!
//! Strategies draw randomness through the [`Random`] capability rather than
//! reaching for a global generator, so an engine can be given a seeded
//! source for reproducible runs.
//!
//! - [`DefaultRandom`]: thread-local [`StdRng`], lazily seeded from OS
//!   entropy on first use in each thread. No reseeding contract.
//! - [`SeededRandom`]: a deterministic source owned by one engine.
//!
//! Neither implementation is meant to be shared across threads: the default
//! keeps one generator per thread, and the seeded variant is `!Sync`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cell::RefCell;

/// Provides uniformly distributed values to strategies.
pub trait Random {
    /// Returns a value uniformly distributed on `[low, high)`.
    ///
    /// Returns `low` when the interval is empty.
    fn uniform_float(&self, low: f64, high: f64) -> f64;

    /// Returns a value uniformly distributed on the closed interval `[low, high]`.
    fn uniform_int(&self, low: i64, high: i64) -> i64;

    /// Returns `true` with the given probability, clamped to `[0, 1]`.
    fn is_hit(&self, probability: f64) -> bool;
}

thread_local! {
    static DEFAULT_RNG: RefCell<StdRng> = RefCell::new(StdRng::from_os_rng());
}

/// The process-wide random source, one generator per thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultRandom;

impl DefaultRandom {
    fn with_rng<T>(f: impl FnOnce(&mut StdRng) -> T) -> T {
        DEFAULT_RNG.with(|rng| f(&mut rng.borrow_mut()))
    }
}

impl Random for DefaultRandom {
    fn uniform_float(&self, low: f64, high: f64) -> f64 {
        Self::with_rng(|rng| draw_float(rng, low, high))
    }

    fn uniform_int(&self, low: i64, high: i64) -> i64 {
        Self::with_rng(|rng| draw_int(rng, low, high))
    }

    fn is_hit(&self, probability: f64) -> bool {
        Self::with_rng(|rng| draw_hit(rng, probability))
    }
}

/// A deterministic random source for reproducible runs.
///
/// ```
/// use u_genetics::random::{Random, SeededRandom};
///
/// let a = SeededRandom::new(7);
/// let b = SeededRandom::new(7);
/// assert_eq!(a.uniform_int(0, 1000), b.uniform_int(0, 1000));
/// ```
#[derive(Debug)]
pub struct SeededRandom {
    rng: RefCell<StdRng>,
}

impl SeededRandom {
    /// Creates a new source from the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: RefCell::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Random for SeededRandom {
    fn uniform_float(&self, low: f64, high: f64) -> f64 {
        draw_float(&mut *self.rng.borrow_mut(), low, high)
    }

    fn uniform_int(&self, low: i64, high: i64) -> i64 {
        draw_int(&mut *self.rng.borrow_mut(), low, high)
    }

    fn is_hit(&self, probability: f64) -> bool {
        draw_hit(&mut *self.rng.borrow_mut(), probability)
    }
}

fn draw_float<R: Rng>(rng: &mut R, low: f64, high: f64) -> f64 {
    let (low, high) = if low <= high { (low, high) } else { (high, low) };
    // also catches NaN and infinite bounds
    if low >= high || !(high - low).is_finite() {
        return low;
    }
    rng.random_range(low..high)
}

fn draw_int<R: Rng>(rng: &mut R, low: i64, high: i64) -> i64 {
    let (low, high) = if low <= high { (low, high) } else { (high, low) };
    if low == high {
        return low;
    }
    rng.random_range(low..=high)
}

fn draw_hit<R: Rng>(rng: &mut R, probability: f64) -> bool {
    if probability.is_nan() {
        return false;
    }
    rng.random_bool(probability.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_int_inclusive_bounds() {
        let random = SeededRandom::new(42);
        let mut seen_low = false;
        let mut seen_high = false;
        for _ in 0..1000 {
            let v = random.uniform_int(0, 1);
            assert!((0..=1).contains(&v));
            seen_low |= v == 0;
            seen_high |= v == 1;
        }
        assert!(seen_low && seen_high, "both bounds should be reachable");
    }

    #[test]
    fn test_uniform_float_half_open() {
        let random = SeededRandom::new(42);
        for _ in 0..1000 {
            let v = random.uniform_float(-3.0, 3.0);
            assert!((-3.0..3.0).contains(&v));
        }
    }

    #[test]
    fn test_degenerate_intervals() {
        let random = SeededRandom::new(1);
        assert_eq!(random.uniform_int(5, 5), 5);
        assert_eq!(random.uniform_float(2.5, 2.5), 2.5);
    }

    #[test]
    fn test_reversed_bounds_are_swapped() {
        let random = SeededRandom::new(3);
        for _ in 0..100 {
            let v = random.uniform_int(10, -10);
            assert!((-10..=10).contains(&v));
            let f = random.uniform_float(1.0, 0.0);
            assert!((0.0..1.0).contains(&f));
        }
    }

    #[test]
    fn test_is_hit_extremes() {
        let random = SeededRandom::new(5);
        for _ in 0..100 {
            assert!(random.is_hit(1.0));
            assert!(random.is_hit(7.0));
            assert!(!random.is_hit(0.0));
            assert!(!random.is_hit(-1.0));
            assert!(!random.is_hit(f64::NAN));
        }
    }

    #[test]
    fn test_seeded_is_deterministic() {
        let a = SeededRandom::new(99);
        let b = SeededRandom::new(99);
        let xs: Vec<i64> = (0..20).map(|_| a.uniform_int(0, 1_000_000)).collect();
        let ys: Vec<i64> = (0..20).map(|_| b.uniform_int(0, 1_000_000)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_default_random_in_range() {
        let random = DefaultRandom;
        for _ in 0..100 {
            let v = random.uniform_int(-2, 2);
            assert!((-2..=2).contains(&v));
        }
    }
}
