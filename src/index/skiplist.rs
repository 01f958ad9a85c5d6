use std::fmt;

use crate::config::IndexConfig;
use crate::error::{ConfigError, InvariantError};
use crate::index::raw::{self, RawList};
use crate::stats::IndexStats;

/// Probabilistic ordered index.
///
/// Each element's height is drawn once, at insertion, from the geometric
/// level model and never changes afterwards. Lookups do not mutate the
/// structure, so `get` takes `&self`; writers need exclusive access.
///
/// ```
/// use stashlist::SkipList;
///
/// let mut list = SkipList::new();
/// list.add("b", 2);
/// list.add("a", 1);
/// assert_eq!(list.get(&"a"), Some(&1));
/// assert_eq!(list.iter().map(|(k, _)| *k).collect::<Vec<_>>(), ["a", "b"]);
/// ```
pub struct SkipList<K, V> {
    raw: RawList<K, V, ()>,
}

impl<K: Ord, V> SkipList<K, V> {
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
            Err(err) => panic!("invalid SkipList configuration: {}", err),
        }
    }

    pub fn try_with_config(config: IndexConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            raw: RawList::with_config(config)?,
        })
    }

    /// Inserts `value` under `key`, or replaces the value of an existing
    /// key in place. Returns the replaced value.
    pub fn add(&mut self, key: K, value: V) -> Option<V> {
        let (previous, found) = self.raw.find_predecessors(&key);
        self.raw.stats.record_add(found.is_some());
        if let Some(id) = found {
            return Some(std::mem::replace(&mut self.raw.node_mut(id).value, value));
        }
        let height = self.raw.levels_mut().random_level();
        self.raw.insert(&previous, key, value, height, ());
        None
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        let found = self.raw.find(key);
        self.raw.stats.record_get(found.is_some());
        found.map(|id| &self.raw.node(id).value)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let found = self.raw.find(key);
        self.raw.stats.record_get(found.is_some());
        match found {
            Some(id) => Some(&mut self.raw.node_mut(id).value),
            None => None,
        }
    }

    pub fn contains(&self, key: &K) -> bool {
        self.raw.find(key).is_some()
    }

    /// Unlinks `key` from every level and returns its entry.
    pub fn remove(&mut self, key: &K) -> Option<(K, V)> {
        let (previous, found) = self.raw.find_predecessors(key);
        self.raw.stats.record_remove(found.is_some());
        let node = self.raw.unlink(&previous, found?);
        Some((node.key, node.value))
    }

    /// Number of levels `key` is linked into.
    pub fn level_of(&self, key: &K) -> Option<usize> {
        self.raw.find(key).map(|id| self.raw.node(id).level())
    }

    /// Changes the promotion probability used for future insertions.
    pub fn set_probability(&mut self, probability: f64) -> Result<(), ConfigError> {
        self.raw.levels_mut().set_probability(probability)
    }

    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.raw.check_invariants()
    }
}

impl<K, V> SkipList<K, V> {
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

impl<K: Ord, V> Default for SkipList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> Extend<(K, V)> for SkipList<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.add(key, value);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for SkipList<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for SkipList<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Dumps every non-empty level, top level first.
impl<K: Ord + fmt::Display, V> fmt::Display for SkipList<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.raw.fmt_levels(f)
    }
}

/// Iterator over a [`SkipList`] in key order.
pub struct Iter<'a, K, V>(raw::Iter<'a, K, V, ()>);

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

impl<'a, K, V> IntoIterator for &'a SkipList<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn seeded(max_level: usize) -> SkipList<String, Vec<u8>> {
        SkipList::with_config(IndexConfig::default().with_max_level(max_level).with_seed(11))
    }

    #[test]
    fn test_seq_insert() {
        let mut list: SkipList<i32, ()> = SkipList::with_max_level(6);
        for i in 0..1000 {
            list.add(i, ());
            assert!(list.contains(&i));
        }
        assert_eq!(list.len(), 1000);
        assert!(list.check_invariants().is_ok());
    }

    #[test]
    fn test_insert_random_insert() {
        let mut list: SkipList<i32, i32> = SkipList::with_max_level(6);
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..1000 {
            let val = rng.i32(0..1000);
            list.add(val, val);
            assert_eq!(list.get(&val), Some(&val));
        }
        assert!(list.check_invariants().is_ok());
    }

    #[test]
    fn basic_crud() {
        let mut list = seeded(18);
        for (key, value) in [("10", "1"), ("60", "2"), ("30", "3"), ("20", "4"), ("90", "5")] {
            list.add(key.to_string(), value.as_bytes().to_vec());
        }
        assert!(list.check_invariants().is_ok());

        assert_eq!(list.remove(&"0".to_string()), None);
        assert_eq!(list.len(), 5);
        let removed = list.remove(&"20".to_string()).unwrap();
        assert_eq!(removed, ("20".to_string(), b"4".to_vec()));
        assert_eq!(list.len(), 4);
        assert!(list.check_invariants().is_ok());

        assert_eq!(list.get(&"10".to_string()), Some(&b"1".to_vec()));
        assert_eq!(list.get(&"30".to_string()), Some(&b"3".to_vec()));
        assert_eq!(list.get(&"20".to_string()), None);
        assert_eq!(list.get(&"90".to_string()), Some(&b"5".to_vec()));
    }

    #[test]
    fn add_existing_key_updates_in_place() {
        let mut list = seeded(18);
        assert_eq!(list.add("30".to_string(), b"3".to_vec()), None);
        let level = list.level_of(&"30".to_string());
        assert_eq!(list.add("30".to_string(), b"9".to_vec()), Some(b"3".to_vec()));
        assert_eq!(list.len(), 1);
        assert_eq!(list.level_of(&"30".to_string()), level);
        assert_eq!(list.get(&"30".to_string()), Some(&b"9".to_vec()));
    }

    #[test]
    fn height_bound_holds() {
        let mut list: SkipList<u32, u32> =
            SkipList::with_config(IndexConfig::default().with_max_level(4).with_probability(0.9));
        for key in 0..=200 {
            list.add(key, key);
        }
        assert_eq!(list.len(), 201);
        for key in 0..=200 {
            assert!(list.level_of(&key).unwrap() <= 4);
        }
        let keys: Vec<u32> = list.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, (0..=200).collect::<Vec<_>>());
        assert!(list.check_invariants().is_ok());
    }

    #[test]
    fn front_and_iteration_follow_key_order() {
        let mut list: SkipList<i32, char> = SkipList::new();
        assert_eq!(list.front(), None);
        list.extend([(3, 'c'), (1, 'a'), (2, 'b')]);
        assert_eq!(list.front(), Some((&1, &'a')));
        assert_eq!(list.iter().len(), 3);
        let values: String = list.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, "abc");
        assert_eq!(format!("{:?}", list), "{1: 'a', 2: 'b', 3: 'c'}");
    }

    #[test]
    fn get_mut_and_clear() {
        let mut list: SkipList<u8, u32> = (0..10).map(|k| (k, 0)).collect();
        *list.get_mut(&4).unwrap() += 7;
        assert_eq!(list.get(&4), Some(&7));
        assert_eq!(list.get_mut(&40), None);
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.front(), None);
        list.add(1, 1);
        assert_eq!(list.len(), 1);
        assert!(list.check_invariants().is_ok());
    }

    #[test]
    fn set_probability_only_affects_future_inserts() {
        let mut list: SkipList<u32, ()> =
            SkipList::with_config(IndexConfig::default().with_max_level(8).with_seed(3));
        for key in 0..100 {
            list.add(key, ());
        }
        let before: Vec<usize> = (0..100).map(|k| list.level_of(&k).unwrap()).collect();

        list.set_probability(1.0).unwrap();
        assert_eq!(list.probability(), 1.0);
        list.add(1000, ());
        assert_eq!(list.level_of(&1000), Some(8));

        let after: Vec<usize> = (0..100).map(|k| list.level_of(&k).unwrap()).collect();
        assert_eq!(before, after);
        assert!(list.set_probability(2.0).is_err());
    }

    #[test]
    fn stats_track_operations() {
        let mut list: SkipList<u32, u32> = SkipList::new();
        list.add(1, 1);
        list.add(1, 2);
        list.get(&1);
        list.get(&2);
        list.remove(&3);
        let stats = list.stats();
        assert_eq!(stats.add_new, 1);
        assert_eq!(stats.add_updates, 1);
        assert_eq!(stats.get_hits, 1);
        assert_eq!(stats.get_misses(), 1);
        assert_eq!(stats.remove_calls, 1);
        assert_eq!(stats.promotions, 0);
        list.reset_stats();
        assert_eq!(list.stats(), IndexStats::default());
    }

    #[test]
    fn display_dumps_levels() {
        let mut list: SkipList<u32, ()> =
            SkipList::with_config(IndexConfig::default().with_max_level(2).with_probability(1.0));
        list.add(2, ());
        list.add(1, ());
        assert_eq!(list.to_string(), "-> [ 1 ]-> [ 2 ]-> None\n-> [ 1 ]-> [ 2 ]-> None\n");
    }

    #[test]
    #[should_panic(expected = "max_level")]
    fn zero_max_level_panics() {
        let _ = SkipList::<u32, u32>::with_max_level(0);
    }
}
