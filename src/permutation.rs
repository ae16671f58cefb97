//! Permutation utilities used for culling.
//!
//! Culling ranks a population by cost and reorders the specimens (and
//! their ages) to match. Instead of sorting each parallel sequence
//! separately, the rank of every index is computed once and then applied
//! in place to each sequence.
//!
//! # Rank convention
//!
//! A permutation `p` maps an original index to its destination:
//! after [`apply_permutation_in_place`], the element that was at `i` is at
//! `p[i]`.
//!
//! ```
//! use u_genetics::permutation::apply_permutation_in_place;
//!
//! let mut seq = vec!['a', 'b', 'c'];
//! let mut perm = vec![2, 0, 1];
//! apply_permutation_in_place(&mut seq, &mut perm).unwrap();
//! assert_eq!(seq, vec!['b', 'c', 'a']);
//! ```

use crate::error::{Error, Result};
use std::cmp::Ordering;

/// Returns, for each index of `values`, its rank under `compare`.
///
/// The result is a permutation of `0..values.len()`. Ties are broken by an
/// unstable sort, so equal values may end up in any relative order.
///
/// # Complexity
/// O(n log n) time, O(n) space
pub fn sort_to_permutation<T, F>(values: &[T], mut compare: F) -> Vec<usize>
where
    F: FnMut(&T, &T) -> Ordering,
{
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_unstable_by(|&a, &b| compare(&values[a], &values[b]));

    let mut ranks = vec![0; values.len()];
    for (rank, index) in order.into_iter().enumerate() {
        ranks[index] = rank;
    }
    ranks
}

/// Moves every element of `sequence` from index `i` to `permutation[i]`.
///
/// Follows permutation cycles with pairwise swaps. The permutation is used
/// as scratch space and is left as the identity on success, so pass a copy
/// if it is needed afterwards.
///
/// # Errors
/// Returns [`Error::InvalidPermutation`] if the lengths differ, an index is
/// out of range, or an index repeats. The contents of `sequence` are
/// unspecified after an error.
///
/// # Complexity
/// O(n) swaps, O(1) extra space
pub fn apply_permutation_in_place<T>(sequence: &mut [T], permutation: &mut [usize]) -> Result<()> {
    let n = sequence.len();
    if permutation.len() != n {
        return Err(Error::InvalidPermutation(format!(
            "permutation has {} entries for a sequence of {}",
            permutation.len(),
            n
        )));
    }

    // a valid permutation of n elements settles in at most n - 1 swaps
    let mut budget = n.saturating_sub(1);
    for i in 0..n {
        while permutation[i] != i {
            let target = permutation[i];
            if target >= n {
                return Err(Error::InvalidPermutation(format!(
                    "index {target} out of range for length {n}"
                )));
            }
            if budget == 0 {
                return Err(Error::InvalidPermutation(
                    "permutation contains repeated indices".into(),
                ));
            }
            budget -= 1;

            sequence.swap(i, target);
            permutation.swap(i, target);
        }
    }

    Ok(())
}
