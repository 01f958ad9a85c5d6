//! Two-operation contract shared with comparison caches.
//!
//! Anything that can stand in for a cache in a throughput comparison (an
//! LRU, a SIEVE cache, or either index here) implements [`Cache`]. `get`
//! takes `&mut self` because most caches record recency on reads.
//!
//! ```
//! use stashlist::{Cache, SkipList, StashList};
//!
//! fn warm<C: Cache<String, Vec<u8>>>(cache: &mut C) -> usize {
//!     for n in 0..10 {
//!         cache.add(format!("key_{:07}", n), vec![n as u8]);
//!     }
//!     (0..20).filter(|n| cache.get(&format!("key_{:07}", n)).is_some()).count()
//! }
//!
//! assert_eq!(warm(&mut SkipList::new()), 10);
//! assert_eq!(warm(&mut StashList::new()), 10);
//! ```

use crate::index::{SkipList, StashList};

pub trait Cache<K, V> {
    /// Inserts `value` under `key`, replacing any existing value.
    fn add(&mut self, key: K, value: V);

    /// Returns the value stored under `key`, if any.
    fn get(&mut self, key: &K) -> Option<&V>;
}

impl<K: Ord, V> Cache<K, V> for SkipList<K, V> {
    fn add(&mut self, key: K, value: V) {
        SkipList::add(self, key, value);
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        SkipList::get(self, key)
    }
}

impl<K: Ord, V> Cache<K, V> for StashList<K, V> {
    fn add(&mut self, key: K, value: V) {
        StashList::add(self, key, value);
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        StashList::get(self, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise<C: Cache<u32, u32>>(mut cache: C) {
        cache.add(1, 10);
        cache.add(2, 20);
        cache.add(1, 11);
        assert_eq!(cache.get(&1), Some(&11));
        assert_eq!(cache.get(&2), Some(&20));
        assert_eq!(cache.get(&3), None);
    }

    #[test]
    fn both_indices_honor_the_contract() {
        exercise(SkipList::new());
        exercise(StashList::new());
    }

    #[test]
    fn usable_as_trait_object() {
        let mut caches: Vec<Box<dyn Cache<u32, u32>>> =
            vec![Box::new(SkipList::new()), Box::new(StashList::new())];
        for cache in caches.iter_mut() {
            cache.add(7, 70);
            assert_eq!(cache.get(&7), Some(&70));
        }
    }
}
