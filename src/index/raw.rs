//! Node layout and link plumbing shared by [`SkipList`](super::SkipList) and
//! [`StashList`](super::StashList).
//!
//! Nodes live in an [`Arena`] and point at each other through `NodeId`s.
//! The head sentinel is not a node: it is a plain array of `max_level`
//! links, and a predecessor of `None` means "the head".

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

use crate::config::IndexConfig;
use crate::error::{ConfigError, InvariantError};
use crate::index::arena::{Arena, NodeId};
use crate::index::level::LevelGenerator;
use crate::stats::StatsRecorder;

pub(crate) type Link = Option<NodeId>;

/// Predecessor at some level; `None` is the head sentinel.
pub(crate) type Pred = Option<NodeId>;

pub(crate) struct Node<K, V, M> {
    pub(crate) key: K,
    pub(crate) value: V,
    /// One forward link per level the node takes part in.
    pub(crate) links: Vec<Link>,
    pub(crate) meta: M,
}

impl<K, V, M> Node<K, V, M> {
    fn new(key: K, value: V, height: usize, meta: M) -> Self {
        Self {
            key,
            value,
            links: vec![None; height],
            meta,
        }
    }

    #[inline(always)]
    pub(crate) fn level(&self) -> usize {
        self.links.len()
    }

    #[inline(always)]
    fn next(&self, n: usize) -> Link {
        debug_assert!(n < self.links.len());
        self.links[n]
    }

    #[inline(always)]
    fn set_next(&mut self, n: usize, x: Link) {
        self.links[n] = x;
    }
}

pub(crate) struct RawList<K, V, M> {
    nodes: Arena<Node<K, V, M>>,
    head: Vec<Link>,
    len: usize,
    levels: LevelGenerator,
    pub(crate) stats: StatsRecorder,
}

impl<K, V, M> RawList<K, V, M> {
    pub(crate) fn with_config(config: IndexConfig) -> Result<Self, ConfigError> {
        let levels = LevelGenerator::new(config.max_level, config.probability, config.seed)?;
        Ok(Self {
            nodes: Arena::new(),
            head: vec![None; config.max_level],
            len: 0,
            levels,
            stats: StatsRecorder::default(),
        })
    }

    #[inline(always)]
    pub(crate) fn max_level(&self) -> usize {
        self.head.len()
    }

    #[inline(always)]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn levels(&self) -> &LevelGenerator {
        &self.levels
    }

    pub(crate) fn levels_mut(&mut self) -> &mut LevelGenerator {
        &mut self.levels
    }

    #[inline(always)]
    pub(crate) fn node(&self, id: NodeId) -> &Node<K, V, M> {
        self.nodes.get(id)
    }

    #[inline(always)]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<K, V, M> {
        self.nodes.get_mut(id)
    }

    #[inline(always)]
    pub(crate) fn next(&self, pred: Pred, level: usize) -> Link {
        match pred {
            None => self.head[level],
            Some(id) => self.nodes.get(id).next(level),
        }
    }

    #[inline(always)]
    pub(crate) fn set_next(&mut self, pred: Pred, level: usize, link: Link) {
        match pred {
            None => self.head[level] = link,
            Some(id) => self.nodes.get_mut(id).set_next(level, link),
        }
    }

    pub(crate) fn front(&self) -> Option<(&K, &V)> {
        self.head[0].map(|id| {
            let node = self.nodes.get(id);
            (&node.key, &node.value)
        })
    }

    pub(crate) fn iter(&self) -> Iter<'_, K, V, M> {
        Iter {
            list: self,
            next: self.head[0],
            remaining: self.len,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.head.iter_mut().for_each(|link| *link = None);
        self.len = 0;
    }
}

impl<K: Ord, V, M> RawList<K, V, M> {
    /// Returns `next` if its key is strictly less than `key`.
    #[inline(always)]
    pub(crate) fn before_key(&self, next: Link, key: &K) -> Option<NodeId> {
        next.filter(|&id| self.nodes.get(id).key < *key)
    }

    /// Returns `candidate` if its key equals `key`.
    #[inline(always)]
    pub(crate) fn matching(&self, candidate: Link, key: &K) -> Option<NodeId> {
        candidate.filter(|&id| self.nodes.get(id).key.cmp(key) == Ordering::Equal)
    }

    /// Top-down descent recording the last node before `key` at every level.
    ///
    /// Returns the predecessors and the level-0 successor if it matches.
    pub(crate) fn find_predecessors(&self, key: &K) -> (Vec<Pred>, Option<NodeId>) {
        let mut previous: Vec<Pred> = vec![None; self.max_level()];
        let mut current: Pred = None;
        for level in (0..self.max_level()).rev() {
            while let Some(next) = self.before_key(self.next(current, level), key) {
                current = Some(next);
            }
            previous[level] = current;
        }
        let found = self.matching(self.next(current, 0), key);
        (previous, found)
    }

    /// Descent without recording predecessors.
    pub(crate) fn find(&self, key: &K) -> Option<NodeId> {
        let mut current: Pred = None;
        for level in (0..self.max_level()).rev() {
            while let Some(next) = self.before_key(self.next(current, level), key) {
                current = Some(next);
            }
        }
        self.matching(self.next(current, 0), key)
    }

    /// Allocates a node of `height` levels and splices it after `previous`.
    pub(crate) fn insert(
        &mut self,
        previous: &[Pred],
        key: K,
        value: V,
        height: usize,
        meta: M,
    ) -> NodeId {
        debug_assert!((1..=self.max_level()).contains(&height));
        let id = self.nodes.alloc(Node::new(key, value, height, meta));
        for (level, &pred) in previous.iter().enumerate().take(height) {
            let next = self.next(pred, level);
            self.nodes.get_mut(id).set_next(level, next);
            self.set_next(pred, level, Some(id));
        }
        self.len += 1;
        id
    }

    /// Unlinks `id` from every level it occupies and releases it.
    pub(crate) fn unlink(&mut self, previous: &[Pred], id: NodeId) -> Node<K, V, M> {
        let height = self.nodes.get(id).level();
        for (level, &pred) in previous.iter().enumerate().take(height) {
            debug_assert_eq!(self.next(pred, level), Some(id));
            let next = self.nodes.get(id).next(level);
            self.set_next(pred, level, next);
        }
        self.len -= 1;
        self.nodes.take(id)
    }

    /// Extends `id` by one level, linking it in after `pred` at that level.
    pub(crate) fn raise(&mut self, pred: Pred, id: NodeId) {
        let level = self.nodes.get(id).level();
        debug_assert!(level < self.max_level());
        let next = self.next(pred, level);
        self.nodes.get_mut(id).links.push(next);
        self.set_next(pred, level, Some(id));
    }

    /// Drops `id` from `level`, which must be its top level, splicing
    /// `before` past it.
    pub(crate) fn lower(&mut self, before: Pred, id: NodeId, level: usize) {
        debug_assert_eq!(self.next(before, level), Some(id));
        debug_assert_eq!(self.nodes.get(id).level(), level + 1);
        let node = self.nodes.get_mut(id);
        let next = node.next(level);
        node.links.truncate(level);
        self.set_next(before, level, next);
    }

    /// Verifies ordering, subsequence, height and count invariants.
    pub(crate) fn check_invariants(&self) -> Result<(), InvariantError> {
        let max_level = self.max_level();
        let mut below: HashSet<NodeId> = HashSet::with_capacity(self.len);
        let mut tall = vec![0usize; max_level];

        let mut count = 0usize;
        let mut previous: Option<&K> = None;
        let mut link = self.head[0];
        while let Some(id) = link {
            let node = self.nodes.get(id);
            if node.level() == 0 || node.level() > max_level {
                return Err(InvariantError::new(format!(
                    "node {} has level {} outside [1, {}]",
                    count,
                    node.level(),
                    max_level
                )));
            }
            if previous.is_some_and(|prev| *prev >= node.key) {
                return Err(InvariantError::new(format!(
                    "level 0 out of order at position {}",
                    count
                )));
            }
            for slot in tall.iter_mut().take(node.level()) {
                *slot += 1;
            }
            below.insert(id);
            previous = Some(&node.key);
            count += 1;
            if count > self.len {
                break;
            }
            link = node.next(0);
        }
        if count != self.len {
            return Err(InvariantError::new(format!(
                "level 0 holds {} nodes but len is {}",
                count, self.len
            )));
        }
        if self.nodes.len() != self.len {
            return Err(InvariantError::new(format!(
                "arena holds {} live nodes but len is {}",
                self.nodes.len(),
                self.len
            )));
        }

        for level in 1..max_level {
            let mut current: HashSet<NodeId> = HashSet::new();
            let mut previous: Option<&K> = None;
            let mut link = self.head[level];
            while let Some(id) = link {
                if !below.contains(&id) {
                    return Err(InvariantError::new(format!(
                        "level {} links a node missing from level {}",
                        level,
                        level - 1
                    )));
                }
                let node = self.nodes.get(id);
                if node.level() <= level {
                    return Err(InvariantError::new(format!(
                        "level {} links a node of level {}",
                        level,
                        node.level()
                    )));
                }
                if previous.is_some_and(|prev| *prev >= node.key) {
                    return Err(InvariantError::new(format!(
                        "level {} out of order",
                        level
                    )));
                }
                if !current.insert(id) {
                    return Err(InvariantError::new(format!("level {} has a cycle", level)));
                }
                previous = Some(&node.key);
                link = node.next(level);
            }
            if current.len() != tall[level] {
                return Err(InvariantError::new(format!(
                    "level {} links {} nodes but {} nodes claim it",
                    level,
                    current.len(),
                    tall[level]
                )));
            }
            below = current;
        }
        Ok(())
    }

    /// Writes one line per non-empty level, top level first.
    pub(crate) fn fmt_levels(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    where
        K: fmt::Display,
    {
        for level in (0..self.max_level()).rev() {
            if self.head[level].is_none() && level > 0 {
                continue;
            }
            let mut next = self.head[level];
            while let Some(id) = next {
                let node = self.nodes.get(id);
                write!(f, "-> [ {} ]", node.key)?;
                next = node.next(level);
            }
            writeln!(f, "-> None")?;
        }
        Ok(())
    }
}

/// Forward iterator along level 0.
pub(crate) struct Iter<'a, K, V, M> {
    list: &'a RawList<K, V, M>,
    next: Link,
    remaining: usize,
}

impl<'a, K, V, M> Iterator for Iter<'a, K, V, M> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let node = self.list.nodes.get(id);
        self.next = node.next(0);
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, M> ExactSizeIterator for Iter<'_, K, V, M> {}
