//! Cost ranking for culling.
//!
//! Costs only need a partial order, so ranking cannot hand `partial_cmp`
//! straight to the standard sort. Instead:
//!
//! 1. Merge-sort indices by cost. The merge never trusts the comparator to
//!    be total, so it cannot panic.
//! 2. If every adjacent pair of the result is ordered, the costs form a
//!    chain and the sorted order is the ranking.
//! 3. Otherwise, rank by fronts: front 0 holds the costs nothing beats,
//!    front 1 the costs beaten only by front 0, and so on
//!    (Deb et al., 2002).
//!
//! In both cases a cost that strictly beats another ranks before it.
//! Values not comparable with themselves (such as `NaN`) rank after every
//! other value.
//!
//! # Complexity
//!
//! O(n log n) comparisons for totally ordered costs, O(n²) when the
//! fallback runs.

use crate::permutation::sort_to_permutation;
use std::cmp::Ordering;

/// Returns the rank of each cost, best first.
///
/// The result is a permutation of `0..costs.len()` in the convention of
/// [`apply_permutation_in_place`](crate::permutation::apply_permutation_in_place).
pub(crate) fn rank_costs<C: PartialOrd>(costs: &[C]) -> Vec<usize> {
    let order = merge_sort(costs);

    let chained = order
        .windows(2)
        .all(|pair| matches!(compare(&costs[pair[0]], &costs[pair[1]]), Some(Ordering::Less | Ordering::Equal)));
    if chained {
        let mut ranks = vec![0; costs.len()];
        for (rank, index) in order.into_iter().enumerate() {
            ranks[index] = rank;
        }
        return ranks;
    }

    tracing::debug!(costs = costs.len(), "Costs are partially ordered, ranking by fronts");
    let fronts = front_of_each(costs);
    sort_to_permutation(&fronts, |a, b| a.cmp(b))
}

/// Compares two costs, placing values not comparable with themselves last.
fn compare<C: PartialOrd>(a: &C, b: &C) -> Option<Ordering> {
    match (is_ordered(a), is_ordered(b)) {
        (true, true) => a.partial_cmp(b),
        (true, false) => Some(Ordering::Less),
        (false, true) => Some(Ordering::Greater),
        (false, false) => Some(Ordering::Equal),
    }
}

fn is_ordered<C: PartialOrd>(cost: &C) -> bool {
    cost.partial_cmp(cost).is_some()
}

/// Whether `a` is strictly better than `b`.
fn beats<C: PartialOrd>(a: &C, b: &C) -> bool {
    compare(a, b) == Some(Ordering::Less)
}

/// Stable bottom-up merge sort of indices by cost.
///
/// Takes from the right run only when its head strictly beats the left
/// head, so incomparable pairs keep their input order.
fn merge_sort<C: PartialOrd>(costs: &[C]) -> Vec<usize> {
    let n = costs.len();
    let mut order: Vec<usize> = (0..n).collect();
    let mut merged = order.clone();

    let mut width = 1;
    while width < n {
        for start in (0..n).step_by(2 * width) {
            let mid = (start + width).min(n);
            let end = (start + 2 * width).min(n);
            let (mut left, mut right) = (start, mid);

            for slot in &mut merged[start..end] {
                let take_right = right < end && (left >= mid || beats(&costs[order[right]], &costs[order[left]]));
                if take_right {
                    *slot = order[right];
                    right += 1;
                } else {
                    *slot = order[left];
                    left += 1;
                }
            }
        }
        std::mem::swap(&mut order, &mut merged);
        width *= 2;
    }

    order
}

/// Front index of every cost under the strict "beats" relation.
fn front_of_each<C: PartialOrd>(costs: &[C]) -> Vec<usize> {
    let n = costs.len();
    let mut beaten_count = vec![0usize; n];
    let mut beaten: Vec<Vec<usize>> = vec![Vec::new(); n];

    for i in 0..n {
        for j in (i + 1)..n {
            match compare(&costs[i], &costs[j]) {
                Some(Ordering::Less) => {
                    beaten[i].push(j);
                    beaten_count[j] += 1;
                }
                Some(Ordering::Greater) => {
                    beaten[j].push(i);
                    beaten_count[i] += 1;
                }
                Some(Ordering::Equal) | None => {}
            }
        }
    }

    let mut fronts = vec![0usize; n];
    let mut current: Vec<usize> = (0..n).filter(|&i| beaten_count[i] == 0).collect();
    let mut front = 0;
    while !current.is_empty() {
        let mut next = Vec::new();
        for &i in &current {
            fronts[i] = front;
            for &j in &beaten[i] {
                beaten_count[j] -= 1;
                if beaten_count[j] == 0 {
                    next.push(j);
                }
            }
        }
        current = next;
        front += 1;
    }

    fronts
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Two minimized objectives; one beats another only by dominating it.
    #[derive(Debug, Clone, PartialEq)]
    struct Pareto(i64, i64);

    impl PartialOrd for Pareto {
        fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
            match (self.0.cmp(&other.0), self.1.cmp(&other.1)) {
                (a, b) if a == b => Some(a),
                (Ordering::Equal, b) => Some(b),
                (a, Ordering::Equal) => Some(a),
                _ => None,
            }
        }
    }

    fn assert_respects_order<C: PartialOrd + std::fmt::Debug>(costs: &[C], ranks: &[usize]) {
        let mut sorted = ranks.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..costs.len()).collect::<Vec<_>>(), "ranks must be a permutation");

        for i in 0..costs.len() {
            for j in 0..costs.len() {
                if beats(&costs[i], &costs[j]) {
                    assert!(
                        ranks[i] < ranks[j],
                        "{:?} beats {:?} but ranks {} >= {}",
                        costs[i],
                        costs[j],
                        ranks[i],
                        ranks[j]
                    );
                }
            }
        }
    }

    #[test]
    fn test_total_order_sorts_ascending() {
        let costs = [30, 10, 20, 10];
        let ranks = rank_costs(&costs);
        assert_eq!(ranks[2], 2);
        assert_eq!(ranks[0], 3);
        assert!(ranks[1] < 2 && ranks[3] < 2);
    }

    #[test]
    fn test_nan_ranks_last() {
        let costs = [f64::NAN, 2.0, 1.0, f64::NAN];
        let ranks = rank_costs(&costs);
        assert_eq!(ranks[2], 0);
        assert_eq!(ranks[1], 1);
        assert!(ranks[0] >= 2 && ranks[3] >= 2);
    }

    #[test]
    fn test_empty_and_single() {
        assert!(rank_costs::<u32>(&[]).is_empty());
        assert_eq!(rank_costs(&[7]), vec![0]);
    }

    #[test]
    fn test_pareto_costs_rank_by_front() {
        let costs = [
            Pareto(4, 4), // beaten by (3, 3)
            Pareto(1, 5),
            Pareto(3, 3),
            Pareto(5, 1),
        ];
        let ranks = rank_costs(&costs);
        assert_eq!(ranks[0], 3);
        assert_respects_order(&costs, &ranks);
    }

    #[test]
    fn test_pareto_with_nan_like_values() {
        #[derive(Debug, Clone, PartialEq)]
        struct Objectives(f64, f64);

        impl PartialOrd for Objectives {
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                match (self.0.partial_cmp(&other.0)?, self.1.partial_cmp(&other.1)?) {
                    (a, b) if a == b => Some(a),
                    (Ordering::Equal, b) => Some(b),
                    (a, Ordering::Equal) => Some(a),
                    _ => None,
                }
            }
        }

        let costs = [
            Objectives(f64::NAN, 0.0),
            Objectives(2.0, 1.0),
            Objectives(1.0, 2.0),
            Objectives(3.0, 3.0),
        ];
        let ranks = rank_costs(&costs);
        assert_eq!(ranks[0], 3);
        assert_eq!(ranks[3], 2);
        assert_respects_order(&costs, &ranks);
    }

    proptest! {
        #[test]
        fn prop_total_order_matches_sort(values in proptest::collection::vec(-50i32..50, 0..64)) {
            let ranks = rank_costs(&values);
            let mut placed = vec![0; values.len()];
            for (i, &rank) in ranks.iter().enumerate() {
                placed[rank] = values[i];
            }
            let mut expected = values.clone();
            expected.sort();
            prop_assert_eq!(placed, expected);
        }

        #[test]
        fn prop_pareto_ranks_respect_dominance(
            points in proptest::collection::vec((0i64..10, 0i64..10), 0..48)
        ) {
            let costs: Vec<Pareto> = points.into_iter().map(|(a, b)| Pareto(a, b)).collect();
            let ranks = rank_costs(&costs);
            assert_respects_order(&costs, &ranks);
        }
    }
}
