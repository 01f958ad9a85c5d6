//! Self-organizing skip list.
//!
//! A [`StashList`] has the same layout as a [`SkipList`](super::SkipList), but
//! an element's height is not fixed. Each element carries a `visited` flag:
//!
//! - A hit through `add` or `get` sets the flag.
//! - A second `add` hit on a visited element promotes it one level, linking
//!   it in after the descent's predecessor at that level. That predecessor
//!   loses its flag and has to requalify.
//! - While descending at a level above 0, a search that steps onto an
//!   unvisited element whose successor at that level is the searched key
//!   drops the element from that level.
//!
//! Hot keys gain height and shorten their own search paths, and keys that
//! searches keep passing without confirming lose it again. Because lookups
//! restructure the list, `get` takes `&mut self`; [`StashList::peek`] is the
//! read-only lookup.

use std::fmt;

use crate::config::IndexConfig;
use crate::error::{ConfigError, InvariantError};
use crate::index::arena::NodeId;
use crate::index::raw::{self, Pred, RawList};
use crate::stats::IndexStats;

/// Adaptive ordered index. Node metadata is the `visited` flag.
///
/// ```
/// use stashlist::{IndexConfig, StashList};
///
/// let mut list = StashList::with_config(IndexConfig::default().with_seed(1));
/// list.add("k".to_string(), b"v1".to_vec());
/// list.add("k".to_string(), b"v2".to_vec());
/// assert_eq!(list.get(&"k".to_string()), Some(&b"v2".to_vec()));
/// assert_eq!(list.len(), 1);
/// ```
pub struct StashList<K, V> {
    raw: RawList<K, V, bool>,
}

impl<K: Ord, V> StashList<K, V> {
    pub fn new() -> Self {
        Self::with_config(IndexConfig::default())
    }

    /// # Panics
    /// If `max_level` is outside `[1, 64]`.
    pub fn with_max_level(max_level: usize) -> Self {
        Self::with_config(IndexConfig::default().with_max_level(max_level))
    }

    /// # Panics
    /// If `config` does not validate.
    pub fn with_config(config: IndexConfig) -> Self {
        match Self::try_with_config(config) {
            Ok(list) => list,
            Err(err) => panic!("invalid StashList configuration: {}", err),
        }
    }

    pub fn try_with_config(config: IndexConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            raw: RawList::with_config(config)?,
        })
    }

    /// Inserts or updates `key`, returning the replaced value.
    ///
    /// A hit on an unvisited element only marks it visited; a hit on a
    /// visited element also promotes it. New elements start at a random
    /// height and count as visited only when that height is 1.
    pub fn add(&mut self, key: K, value: V) -> Option<V> {
        let (previous, found) = self.descend(&key);
        self.raw.stats.record_add(found.is_some());
        if let Some(id) = found {
            if self.raw.node(id).meta {
                self.promote(&previous, id);
            } else {
                self.raw.node_mut(id).meta = true;
            }
            return Some(std::mem::replace(&mut self.raw.node_mut(id).value, value));
        }

        let height = self.raw.levels_mut().random_level();
        self.raw.insert(&previous, key, value, height, height == 1);
        None
    }

    /// Looks up `key`, marking a hit as visited. The descent may demote
    /// elements it passes.
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let (_, found) = self.descend(key);
        self.raw.stats.record_get(found.is_some());
        let id = found?;
        let node = self.raw.node_mut(id);
        node.meta = true;
        Some(&node.value)
    }

    /// Looks up `key` without touching flags or structure.
    pub fn peek(&self, key: &K) -> Option<&V> {
        self.raw.find(key).map(|id| &self.raw.node(id).value)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.raw.find(key).is_some()
    }

    pub fn remove(&mut self, key: &K) -> Option<(K, V)> {
        let (previous, found) = self.descend(key);
        self.raw.stats.record_remove(found.is_some());
        let node = self.raw.unlink(&previous, found?);
        Some((node.key, node.value))
    }

    /// Current number of levels `key` is linked into.
    pub fn level_of(&self, key: &K) -> Option<usize> {
        self.raw.find(key).map(|id| self.raw.node(id).level())
    }

    /// Whether `key` has been hit since it last lost its flag.
    pub fn is_visited(&self, key: &K) -> Option<bool> {
        self.raw.find(key).map(|id| self.raw.node(id).meta)
    }

    /// Changes the promotion probability used for future insertions.
    pub fn set_probability(&mut self, probability: f64) -> Result<(), ConfigError> {
        self.raw.levels_mut().set_probability(probability)
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.raw.check_invariants()
    }

    /// Top-down search that records the predecessor at every level and
    /// demotes unvisited elements sitting directly in front of `key`.
    fn descend(&mut self, key: &K) -> (Vec<Pred>, Option<NodeId>) {
        let mut previous: Vec<Pred> = vec![None; self.raw.max_level()];
        let mut current: Pred = None;

        for level in (0..self.raw.max_level()).rev() {
            let mut before: Pred = current;
            let mut demoted = false;
            while let Some(next) = self.raw.before_key(self.raw.next(current, level), key) {
                before = current;
                current = Some(next);
                if level > 0
                    && !self.raw.node(next).meta
                    && self
                        .raw
                        .matching(self.raw.next(current, level), key)
                        .is_some()
                {
                    // `next` was not reached at level + 1, so `level` is its top.
                    self.raw.lower(before, next, level);
                    self.raw.stats.demotions.incr();
                    demoted = true;
                    break;
                }
            }
            previous[level] = if demoted { before } else { current };
        }

        let found = self.raw.matching(self.raw.next(current, 0), key);
        (previous, found)
    }

    fn promote(&mut self, previous: &[Pred], id: NodeId) {
        let level = self.raw.node(id).level();
        if level >= self.raw.max_level() {
            return;
        }
        // The head is never a splice point for promotion.
        let Some(pred) = previous[level] else {
            return;
        };
        self.raw.raise(Some(pred), id);
        self.raw.node_mut(pred).meta = false;
        self.raw.stats.promotions.incr();
    }
}

impl<K, V> StashList<K, V> {
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.len() == 0
    }

    pub fn max_level(&self) -> usize {
        self.raw.max_level()
    }

    pub fn probability(&self) -> f64 {
        self.raw.levels().probability()
    }

    pub fn front(&self) -> Option<(&K, &V)> {
        self.raw.front()
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter(self.raw.iter())
    }

    pub fn clear(&mut self) {
        self.raw.clear();
    }

    pub fn stats(&self) -> IndexStats {
        self.raw.stats.snapshot()
    }

    pub fn reset_stats(&self) {
        self.raw.stats.reset();
    }
}

impl<K: Ord, V> Default for StashList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> Extend<(K, V)> for StashList<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.add(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for StashList<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for StashList<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Ord + fmt::Display, V> fmt::Display for StashList<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.raw.fmt_levels(f)
    }
}

/// Iterator over a [`StashList`] in key order. Iteration never restructures.
pub struct Iter<'a, K, V>(raw::Iter<'a, K, V, bool>);

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<'a, K, V> IntoIterator for &'a StashList<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
