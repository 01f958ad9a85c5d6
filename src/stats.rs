//! Operation counters for both index variants.
//!
//! Counters are atomics so read-only lookups (`&self`) can record
//! them without making the index `!Sync`. They are observational and never
//! affect structure.

use std::sync::atomic::{AtomicU64, Ordering};

/// Point-in-time copy of an index's counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IndexStats {
    pub get_calls: u64,
    pub get_hits: u64,

    pub add_calls: u64,
    pub add_updates: u64,
    pub add_new: u64,

    pub remove_calls: u64,
    pub remove_hits: u64,

    // structural self-tuning, stash list only
    pub promotions: u64,
    pub demotions: u64,
}

impl IndexStats {
    pub fn get_misses(&self) -> u64 {
        self.get_calls.saturating_sub(self.get_hits)
    }
}

#[derive(Debug, Default)]
pub(crate) struct Counter(AtomicU64);

impl Counter {
    #[inline]
    pub(crate) fn get(&self) -> u64 {
        self.0.load(Ordering::Acquire)
    }

    #[inline]
    pub(crate) fn incr(&self) {
        self.0.fetch_add(1, Ordering::AcqRel);
    }

    #[inline]
    fn reset(&self) {
        self.0.store(0, Ordering::Relaxed);
    }
}

#[derive(Debug, Default)]
pub(crate) struct StatsRecorder {
    pub(crate) get_calls: Counter,
    pub(crate) get_hits: Counter,
    pub(crate) add_calls: Counter,
    pub(crate) add_updates: Counter,
    pub(crate) add_new: Counter,
    pub(crate) remove_calls: Counter,
    pub(crate) remove_hits: Counter,
    pub(crate) promotions: Counter,
    pub(crate) demotions: Counter,
}

impl StatsRecorder {
    #[inline]
    pub(crate) fn record_get(&self, hit: bool) {
        self.get_calls.incr();
        if hit {
            self.get_hits.incr();
        }
    }

    #[inline]
    pub(crate) fn record_add(&self, updated: bool) {
        self.add_calls.incr();
        if updated {
            self.add_updates.incr();
        } else {
            self.add_new.incr();
        }
    }

    #[inline]
    pub(crate) fn record_remove(&self, hit: bool) {
        self.remove_calls.incr();
        if hit {
            self.remove_hits.incr();
        }
    }

    pub(crate) fn snapshot(&self) -> IndexStats {
        // Outcome counters are bumped after their call counter, so read
        // them first to keep `hits <= calls` under concurrent readers.
        let get_hits = self.get_hits.get();
        let add_updates = self.add_updates.get();
        let add_new = self.add_new.get();
        let remove_hits = self.remove_hits.get();
        IndexStats {
            get_calls: self.get_calls.get(),
            get_hits,
            add_calls: self.add_calls.get(),
            add_updates,
            add_new,
            remove_calls: self.remove_calls.get(),
            remove_hits,
            promotions: self.promotions.get(),
            demotions: self.demotions.get(),
        }
    }

    pub(crate) fn reset(&self) {
        for counter in [
            &self.get_calls,
            &self.get_hits,
            &self.add_calls,
            &self.add_updates,
            &self.add_new,
            &self.remove_calls,
            &self.remove_hits,
            &self.promotions,
            &self.demotions,
        ] {
            counter.reset();
        }
    }
}
