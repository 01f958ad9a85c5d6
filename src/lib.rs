//! In-memory ordered indices built on skip lists.
//!
//! - [`SkipList`]: the classic probabilistic skip list. Element heights are
//!   drawn once from a geometric distribution.
//! - [`StashList`]: a self-organizing variant. Elements that keep getting
//!   hit climb to higher levels; elements that searches keep passing
//!   without a hit are demoted, so the list drifts towards the current
//!   access distribution.
//!
//! Neither index synchronizes internally. Mutation takes `&mut self` (for
//! the stash list that includes `get`), and [`sync`] wraps both behind
//! locks for shared use.
//!
//! ```
//! use stashlist::{IndexConfig, StashList};
//!
//! let mut list = StashList::with_config(IndexConfig::default().with_max_level(8));
//! for n in 0..100u32 {
//!     list.add(n, n * 2);
//! }
//! assert_eq!(list.get(&21), Some(&42));
//! assert_eq!(list.remove(&21), Some((21, 42)));
//! assert!(list.check_invariants().is_ok());
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod index;
pub mod stats;
pub mod sync;

pub use cache::Cache;
pub use config::{IndexConfig, DEFAULT_MAX_LEVEL, DEFAULT_PROBABILITY, MAX_LEVEL_LIMIT};
pub use error::{ConfigError, InvariantError};
pub use index::{SkipList, StashList};
pub use stats::IndexStats;
pub use sync::{SharedSkipList, SharedStashList};
