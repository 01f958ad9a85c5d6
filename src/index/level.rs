//! Geometric level model shared by both list variants.
//!
//! Level 1 is always taken; each further level `k + 1` is taken with
//! probability `p^k` overall, capped at `max_level`. With `p = 1/e` this
//! gives an expected `O(log n)` height and search cost.

use crate::config::{validate_max_level, validate_probability};
use crate::error::ConfigError;

/// Precomputes `table[k] = p^k` for `k in 0..max_level`.
pub fn probability_table(probability: f64, max_level: usize) -> Vec<f64> {
    (0..max_level)
        .map(|k| probability.powi(k as i32))
        .collect()
}

/// Draws initial levels for new nodes from a per-instance random source.
#[derive(Debug, Clone)]
pub struct LevelGenerator {
    max_level: usize,
    probability: f64,
    table: Vec<f64>,
    rng: fastrand::Rng,
}

impl LevelGenerator {
    /// Creates a generator. `seed = None` seeds from entropy.
    pub fn new(max_level: usize, probability: f64, seed: Option<u64>) -> Result<Self, ConfigError> {
        validate_max_level(max_level)?;
        validate_probability(probability)?;
        let rng = match seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        Ok(Self {
            max_level,
            probability,
            table: probability_table(probability, max_level),
            rng,
        })
    }

    #[inline]
    pub fn random_level(&mut self) -> usize {
        let r = self.rng.f64();
        let mut level = 1;
        while level < self.max_level && r < self.table[level] {
            level += 1;
        }
        level
    }

    /// Changes `p` for future draws only.
    pub fn set_probability(&mut self, probability: f64) -> Result<(), ConfigError> {
        validate_probability(probability)?;
        self.probability = probability;
        self.table = probability_table(probability, self.max_level);
        Ok(())
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn max_level(&self) -> usize {
        self.max_level
    }

    pub fn table(&self) -> &[f64] {
        &self.table
    }
}
