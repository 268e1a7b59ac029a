//! Virtual-time min-heap of pending events.
//!
//! Each key has at most one live event. Rescheduling or cancelling a key
//! does not search the heap: the old entry stays behind with a stale stamp
//! and is discarded when it reaches the top. Stale entries that never reach
//! the top (far-future clocks) are swept out once they outnumber the live
//! ones.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;

use indexmap::IndexMap;

/// Stale entries tolerated on top of twice the live count before a sweep.
const COMPACT_SLACK: usize = 64;

#[derive(Clone, Debug)]
struct Entry<K> {
    time: f64,
    seq: u64,
    key: K,
}

impl<K> PartialEq for Entry<K> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<K> Eq for Entry<K> {}

impl<K> PartialOrd for Entry<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K> Ord for Entry<K> {
    // Reversed so the max-heap pops the earliest time; ties go to the
    // entry scheduled first.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .time
            .total_cmp(&self.time)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Pending events keyed by `K`, popped in nondecreasing time order.
#[derive(Clone, Debug)]
pub(crate) struct EventQueue<K> {
    heap: BinaryHeap<Entry<K>>,
    live: IndexMap<K, u64>,
    next_seq: u64,
}

impl<K: Copy + Eq + Hash> EventQueue<K> {
    pub(crate) fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            live: IndexMap::new(),
            next_seq: 0,
        }
    }

    /// Schedule `key` at `time`, replacing any pending event for it.
    pub(crate) fn schedule(&mut self, key: K, time: f64) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.live.insert(key, seq);
        self.heap.push(Entry { time, seq, key });
        self.compact_if_bloated();
    }

    /// Drop the pending event for `key`, if any.
    pub(crate) fn cancel(&mut self, key: K) {
        if self.live.swap_remove(&key).is_some() {
            self.compact_if_bloated();
        }
    }

    fn compact_if_bloated(&mut self) {
        if self.heap.len() <= 2 * self.live.len() + COMPACT_SLACK {
            return;
        }
        let live = &self.live;
        self.heap.retain(|e| live.get(&e.key) == Some(&e.seq));
    }

    /// Entries physically held, stale ones included.
    #[cfg(test)]
    pub(crate) fn heap_len(&self) -> usize {
        self.heap.len()
    }

    #[cfg(test)]
    pub(crate) fn is_scheduled(&self, key: K) -> bool {
        self.live.contains_key(&key)
    }

    /// Pop the earliest live event with `time <= until`.
    pub(crate) fn pop_due(&mut self, until: f64) -> Option<(f64, K)> {
        loop {
            let top = self.heap.peek()?;
            if self.live.get(&top.key) != Some(&top.seq) {
                self.heap.pop();
                continue;
            }
            if top.time > until {
                return None;
            }
            let entry = self.heap.pop()?;
            self.live.swap_remove(&entry.key);
            return Some((entry.time, entry.key));
        }
    }

    /// Time of the earliest live event.
    #[cfg(test)]
    pub(crate) fn next_time(&mut self) -> Option<f64> {
        while let Some(top) = self.heap.peek() {
            if self.live.get(&top.key) == Some(&top.seq) {
                return Some(top.time);
            }
            self.heap.pop();
        }
        None
    }

    /// Number of live events.
    pub(crate) fn len(&self) -> usize {
        self.live.len()
    }

    pub(crate) fn clear(&mut self) {
        self.heap.clear();
        self.live.clear();
    }
}
