//! Addressable min-priority queue with lazy deletion.
//!
//! Greedy passes re-prioritize pending items as their constraints change.
//! Instead of searching the heap for the old entry, each key keeps a live
//! generation; a re-push bumps it and older heap entries are skipped when
//! popped.
//!
//! # Complexity
//! `push`/`pop` are O(log n) amortized; `remove` is O(log k) on the key map.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 6.5 (Priority Queues)

use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Entry<K, P> {
    priority: P,
    key: K,
    generation: u64,
}

/// Min-priority queue keyed by `K`. Lower `P` pops first; ties pop by key.
#[derive(Debug, Clone)]
pub struct LazyQueue<K, P> {
    heap: BinaryHeap<Reverse<Entry<K, P>>>,
    live: BTreeMap<K, u64>,
    next_generation: u64,
}

impl<K: Ord + Clone, P: Ord> LazyQueue<K, P> {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            live: BTreeMap::new(),
            next_generation: 0,
        }
    }

    /// Inserts `key`, replacing any pending entry for it.
    pub fn push(&mut self, key: K, priority: P) {
        let generation = self.next_generation;
        self.next_generation += 1;
        self.live.insert(key.clone(), generation);
        self.heap.push(Reverse(Entry {
            priority,
            key,
            generation,
        }));
    }

    /// Drops the pending entry for `key`. Returns whether one existed.
    pub fn remove(&mut self, key: &K) -> bool {
        self.live.remove(key).is_some()
    }

    /// Pops the live entry with the lowest priority.
    pub fn pop(&mut self) -> Option<(K, P)> {
        while let Some(Reverse(entry)) = self.heap.pop() {
            if self.live.get(&entry.key) == Some(&entry.generation) {
                self.live.remove(&entry.key);
                return Some((entry.key, entry.priority));
            }
        }
        None
    }

    /// Whether `key` has a pending entry.
    pub fn contains(&self, key: &K) -> bool {
        self.live.contains_key(key)
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.live.len()
    }

    /// Whether no live entry remains.
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }
}

impl<K: Ord + Clone, P: Ord> Default for LazyQueue<K, P> {
    fn default() -> Self {
        Self::new()
    }
}
