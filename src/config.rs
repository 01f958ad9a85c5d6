//! Construction-time configuration shared by both index variants.

use crate::error::ConfigError;

/// Default upper bound on index height.
pub const DEFAULT_MAX_LEVEL: usize = 18;

/// Default geometric parameter for initial level draws (`1/e`).
pub const DEFAULT_PROBABILITY: f64 = 1.0 / std::f64::consts::E;

/// Largest `max_level` an index accepts.
pub const MAX_LEVEL_LIMIT: usize = 64;

/// Configuration for [`SkipList`](crate::SkipList) and
/// [`StashList`](crate::StashList).
///
/// `max_level` should be around `ln(N)` for the default probability, where
/// `N` is an upper bound on the number of elements.
///
/// ```
/// use stashlist::IndexConfig;
///
/// let config = IndexConfig::default().with_max_level(4).with_seed(7);
/// assert!(config.validate().is_ok());
/// assert!(IndexConfig::default().with_probability(0.0).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexConfig {
    pub max_level: usize,
    pub probability: f64,
    /// Seed for the level generator. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            max_level: DEFAULT_MAX_LEVEL,
            probability: DEFAULT_PROBABILITY,
            seed: None,
        }
    }
}

impl IndexConfig {
    pub fn with_max_level(mut self, max_level: usize) -> Self {
        self.max_level = max_level;
        self
    }

    pub fn with_probability(mut self, probability: f64) -> Self {
        self.probability = probability;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_max_level(self.max_level)?;
        validate_probability(self.probability)
    }
}

pub(crate) fn validate_max_level(max_level: usize) -> Result<(), ConfigError> {
    if (1..=MAX_LEVEL_LIMIT).contains(&max_level) {
        Ok(())
    } else {
        Err(ConfigError::new(format!(
            "max_level must be in [1, {}], got {}",
            MAX_LEVEL_LIMIT, max_level
        )))
    }
}

pub(crate) fn validate_probability(probability: f64) -> Result<(), ConfigError> {
    // NaN fails both comparisons.
    if probability > 0.0 && probability <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::new(format!(
            "probability must be in (0, 1], got {}",
            probability
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = IndexConfig::default();
        assert_eq!(config.max_level, 18);
        assert!((config.probability - 0.36787944117144233).abs() < 1e-12);
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn max_level_bounds() {
        assert!(validate_max_level(1).is_ok());
        assert!(validate_max_level(64).is_ok());
        assert!(validate_max_level(0).is_err());
        assert!(validate_max_level(65).is_err());
    }

    #[test]
    fn probability_bounds() {
        assert!(validate_probability(1.0).is_ok());
        assert!(validate_probability(0.5).is_ok());
        assert!(validate_probability(0.0).is_err());
        assert!(validate_probability(-0.1).is_err());
        assert!(validate_probability(1.5).is_err());
        assert!(validate_probability(f64::NAN).is_err());
    }

    #[test]
    fn error_names_the_parameter() {
        let err = IndexConfig::default()
            .with_max_level(100)
            .validate()
            .unwrap_err();
        assert!(err.message().contains("max_level"));
        assert!(err.message().contains("100"));
    }
}
