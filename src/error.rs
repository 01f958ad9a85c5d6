//! Error types for the index crate.
//!
//! - [`ConfigError`]: an index was configured with an out-of-range
//!   `max_level` or promotion probability.
//! - [`InvariantError`]: a structural check (`check_invariants`) found a
//!   broken ordering, subsequence, or count invariant.
//!
//! Lookups of absent keys are not errors; they return `None`.
//!
//! ```
//! use stashlist::{IndexConfig, SkipList};
//!
//! let bad = SkipList::<u32, u32>::try_with_config(IndexConfig::default().with_max_level(0));
//! assert!(bad.unwrap_err().to_string().contains("max_level"));
//! ```

use std::fmt;

/// Error returned when index configuration parameters are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

/// Error returned when a structural invariant of an index does not hold.
///
/// Carries a description of the first violation found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}
