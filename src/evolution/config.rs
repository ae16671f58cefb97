//! Engine configuration.
//!
//! [`EngineConfig`] holds the knobs that belong to the engine itself rather
//! than to a strategy. Population size, cadence, and budgets live on the
//! [`SelectionPolicy`](super::SelectionPolicy).

use crate::error::{Error, Result};

/// Configuration for the evolution engine.
///
/// # Defaults
///
/// ```
/// use u_genetics::evolution::EngineConfig;
///
/// let config = EngineConfig::default();
/// assert_eq!(config.lanes, 1);
/// assert!(config.seed.is_none());
/// assert!(config.population_ceiling.is_none());
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_genetics::evolution::EngineConfig;
///
/// let config = EngineConfig::default()
///     .with_seed(42)
///     .with_population_ceiling(100_000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Number of lanes reserved for crossover.
    ///
    /// Crossover and culling always run sequentially; this value is
    /// validated but otherwise unused.
    pub lanes: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` draws from the thread-local [`DefaultRandom`](crate::random::DefaultRandom).
    pub seed: Option<u64>,

    /// Hard limit on the population size reached during a crossover round.
    ///
    /// `None` (the default) lets the population grow without bound between
    /// culling rounds. When set, a round that would exceed the limit fails
    /// with [`Error::PopulationCeilingExceeded`].
    pub population_ceiling: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            lanes: 1,
            seed: None,
            population_ceiling: None,
        }
    }
}

impl EngineConfig {
    /// Sets the number of lanes.
    pub fn with_lanes(mut self, lanes: usize) -> Self {
        self.lanes = lanes;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the hard population ceiling.
    pub fn with_population_ceiling(mut self, ceiling: usize) -> Self {
        self.population_ceiling = Some(ceiling);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.lanes == 0 {
            return Err(Error::InvalidConfig("lanes must be at least 1".into()));
        }
        if self.population_ceiling == Some(0) {
            return Err(Error::InvalidConfig(
                "population_ceiling must be positive or None".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.lanes, 1);
        assert!(config.seed.is_none());
        assert!(config.population_ceiling.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = EngineConfig::default()
            .with_lanes(4)
            .with_seed(7)
            .with_population_ceiling(500);

        assert_eq!(config.lanes, 4);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.population_ceiling, Some(500));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_lanes() {
        let config = EngineConfig::default().with_lanes(0);
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_zero_ceiling() {
        let config = EngineConfig::default().with_population_ceiling(0);
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }
}
