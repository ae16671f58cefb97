//! Population growth estimation.
//!
//! Between two culling rounds every crossover round pairs all specimens,
//! so the population grows roughly quadratically per round. The estimate
//! is used to reserve storage up front.
//!
//! The estimate is a heuristic, not a bound: a crossover operator that
//! overrides `offspring_amount` can make real growth exceed it, in which
//! case the vectors simply reallocate.

/// Estimates the population size reached right before the next culling round.
///
/// Starting from `S = survivors`, each of the `generations_till_elimination`
/// rounds adds `S * S - S` pairings (halved if the crossover commutes),
/// each producing `default_offspring_amount` offspring.
///
/// Saturates at `usize::MAX` instead of overflowing.
///
/// ```
/// use u_genetics::evolution::estimate_capacity;
///
/// // 3 survivors, cull every round, commuting, 1 offspring per pair:
/// // 3 * 3 - 3 = 6 ordered pairs, 3 unordered, 3 + 3 = 6.
/// assert_eq!(estimate_capacity(3, 1, true, 1), 6);
/// ```
pub fn estimate_capacity(
    survivors: usize,
    generations_till_elimination: usize,
    commutes: bool,
    default_offspring_amount: usize,
) -> usize {
    let mut size = survivors;
    for _ in 0..generations_till_elimination {
        // size * size >= size for every size, saturated or not
        let mut growth = size.saturating_mul(size) - size;
        if commutes {
            growth /= 2;
        }
        growth = growth.saturating_mul(default_offspring_amount);
        size = size.saturating_add(growth);

        if size == usize::MAX {
            break;
        }
    }
    size
}
