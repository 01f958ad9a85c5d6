//! Lock-guarded wrappers for sharing an index between threads.
//!
//! Every operation holds the lock for the whole search-and-mutate sequence.
//! [`SharedSkipList`] uses a `RwLock` because its lookups are read-only;
//! [`SharedStashList`] uses a `Mutex` because its `get` flips flags and can
//! demote nodes. Values leave the lock by clone.

use parking_lot::{Mutex, RwLock};

use crate::config::IndexConfig;
use crate::error::ConfigError;
use crate::index::{SkipList, StashList};
use crate::stats::IndexStats;

#[derive(Debug)]
pub struct SharedSkipList<K, V> {
    inner: RwLock<SkipList<K, V>>,
}

impl<K: Ord, V> SharedSkipList<K, V> {
    pub fn new() -> Self {
        Self::from(SkipList::new())
    }

    pub fn try_with_config(config: IndexConfig) -> Result<Self, ConfigError> {
        SkipList::try_with_config(config).map(Self::from)
    }

    pub fn add(&self, key: K, value: V) -> Option<V> {
        self.inner.write().add(key, value)
    }

    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.inner.read().get(key).cloned()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.inner.read().contains(key)
    }

    pub fn remove(&self, key: &K) -> Option<(K, V)> {
        self.inner.write().remove(key)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn stats(&self) -> IndexStats {
        self.inner.read().stats()
    }

    /// Runs `f` with exclusive access, for multi-step updates.
    pub fn with_list<R>(&self, f: impl FnOnce(&mut SkipList<K, V>) -> R) -> R {
        f(&mut self.inner.write())
    }

    pub fn into_inner(self) -> SkipList<K, V> {
        self.inner.into_inner()
    }
}

impl<K, V> From<SkipList<K, V>> for SharedSkipList<K, V> {
    fn from(list: SkipList<K, V>) -> Self {
        Self {
            inner: RwLock::new(list),
        }
    }
}

impl<K: Ord, V> Default for SharedSkipList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct SharedStashList<K, V> {
    inner: Mutex<StashList<K, V>>,
}

impl<K: Ord, V> SharedStashList<K, V> {
    pub fn new() -> Self {
        Self::from(StashList::new())
    }

    pub fn try_with_config(config: IndexConfig) -> Result<Self, ConfigError> {
        StashList::try_with_config(config).map(Self::from)
    }

    pub fn add(&self, key: K, value: V) -> Option<V> {
        self.inner.lock().add(key, value)
    }

    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    pub fn peek(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.inner.lock().peek(key).cloned()
    }

    pub fn remove(&self, key: &K) -> Option<(K, V)> {
        self.inner.lock().remove(key)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn stats(&self) -> IndexStats {
        self.inner.lock().stats()
    }

    /// Runs `f` with exclusive access, for multi-step updates.
    pub fn with_list<R>(&self, f: impl FnOnce(&mut StashList<K, V>) -> R) -> R {
        f(&mut self.inner.lock())
    }

    pub fn into_inner(self) -> StashList<K, V> {
        self.inner.into_inner()
    }
}

impl<K, V> From<StashList<K, V>> for SharedStashList<K, V> {
    fn from(list: StashList<K, V>) -> Self {
        Self {
            inner: Mutex::new(list),
        }
    }
}

impl<K: Ord, V> Default for SharedStashList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
