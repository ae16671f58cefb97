//! The evolving population snapshot.

use crate::error::{Error, Result};

/// A population of specimens at some point of an evolution.
///
/// Holds the specimens, a generation counter, and optionally the age of
/// every specimen (the number of crossover rounds it has survived as a
/// parent).
///
/// If ages are tracked, there is exactly one age per specimen. The
/// constructors enforce this and the engine maintains it.
///
/// Specimen order carries meaning only after a culling round, where index
/// 0 is the lowest-cost survivor.
///
/// # Examples
///
/// ```
/// use u_genetics::evolution::Generation;
///
/// let generation = Generation::new(vec![0, 50, 150, 200]);
/// assert_eq!(generation.generation(), 0);
/// assert_eq!(generation.ages(), Some(&[0, 0, 0, 0][..]));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Generation<G> {
    specimens: Vec<G>,
    generation: usize,
    ages: Option<Vec<usize>>,
}

impl<G> Generation<G> {
    /// Wraps an initial specimen list, tracking ages (all zero) from counter 0.
    pub fn new(specimens: Vec<G>) -> Self {
        let ages = vec![0; specimens.len()];
        Self {
            specimens,
            generation: 0,
            ages: Some(ages),
        }
    }

    /// Wraps an initial specimen list without age tracking.
    pub fn without_ages(specimens: Vec<G>) -> Self {
        Self {
            specimens,
            generation: 0,
            ages: None,
        }
    }

    /// Restores a generation from its parts.
    ///
    /// # Errors
    /// Returns [`Error::AgesLengthMismatch`] if `ages` is present and its
    /// length differs from the number of specimens.
    pub fn with_ages(specimens: Vec<G>, ages: Option<Vec<usize>>, generation: usize) -> Result<Self> {
        if let Some(ages) = &ages {
            if ages.len() != specimens.len() {
                return Err(Error::AgesLengthMismatch {
                    specimens: specimens.len(),
                    ages: ages.len(),
                });
            }
        }

        Ok(Self {
            specimens,
            generation,
            ages,
        })
    }

    /// The specimens, ranked by cost after the last culling round.
    pub fn specimens(&self) -> &[G] {
        &self.specimens
    }

    /// The number of crossover rounds this population has gone through.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Per-specimen ages, if tracked.
    pub fn ages(&self) -> Option<&[usize]> {
        self.ages.as_deref()
    }

    /// Whether ages are tracked.
    pub fn tracks_ages(&self) -> bool {
        self.ages.is_some()
    }

    /// Number of specimens.
    pub fn len(&self) -> usize {
        self.specimens.len()
    }

    /// Whether the generation holds no specimens.
    pub fn is_empty(&self) -> bool {
        self.specimens.is_empty()
    }

    /// The rank-0 specimen. Only meaningful right after a culling round.
    pub fn best(&self) -> Option<&G> {
        self.specimens.first()
    }

    /// Splits the generation into `(specimens, ages, generation)`.
    pub fn into_parts(self) -> (Vec<G>, Option<Vec<usize>>, usize) {
        (self.specimens, self.ages, self.generation)
    }

    // ---- engine internals ----
    //
    // These keep the ages in step with the specimens; nothing outside the
    // engine gets mutable access to either sequence.

    pub(crate) fn reserve(&mut self, additional: usize) -> std::result::Result<(), std::collections::TryReserveError> {
        self.specimens.try_reserve(additional)?;
        if let Some(ages) = &mut self.ages {
            ages.try_reserve(additional)?;
        }
        Ok(())
    }

    pub(crate) fn age_parents(&mut self) {
        if let Some(ages) = &mut self.ages {
            ages.iter_mut().for_each(|age| *age += 1);
        }
    }

    pub(crate) fn push_offspring(&mut self, specimen: G) {
        self.specimens.push(specimen);
        if let Some(ages) = &mut self.ages {
            ages.push(0);
        }
    }

    pub(crate) fn advance(&mut self) {
        self.generation += 1;
    }

    /// Moves every specimen (and age) at `i` to `ranks[i]`, then keeps the first `survivors`.
    pub(crate) fn rearrange(&mut self, ranks: &[usize], survivors: usize) -> Result<()> {
        let mut scratch = ranks.to_vec();
        crate::permutation::apply_permutation_in_place(&mut self.specimens, &mut scratch)?;
        if let Some(ages) = &mut self.ages {
            scratch.copy_from_slice(ranks);
            crate::permutation::apply_permutation_in_place(ages, &mut scratch)?;
            ages.truncate(survivors);
        }
        self.specimens.truncate(survivors);
        Ok(())
    }
}
