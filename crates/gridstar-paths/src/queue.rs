//! Min-priority queue with membership lookup and in-place priority updates.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::hash::Hash;

/// Heap entry, ordered so that `BinaryHeap` (a max-heap) pops the smallest
/// priority first, and among equal priorities the earliest insertion.
struct Entry<T> {
    priority: f64,
    seq: u64,
    item: T,
}

impl<T> Ord for Entry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<T> Eq for Entry<T> {}

/// An ordered set of elements keyed by a numeric priority.
///
/// Each element is present at most once. Inserting an element that is
/// already queued replaces its priority; the superseded heap entry is left
/// in place and skipped when it surfaces. Equal priorities pop in insertion
/// order, where an update counts as a fresh insertion.
pub struct PriorityQueue<T> {
    heap: BinaryHeap<Entry<T>>,
    // element -> (sequence number of its live entry, priority)
    live: HashMap<T, (u64, f64)>,
    next_seq: u64,
}

impl<T: Eq + Hash + Clone> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Eq + Hash + Clone> PriorityQueue<T> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            live: HashMap::new(),
            next_seq: 0,
        }
    }

    /// Insert `item` with `priority`, or move it to `priority` if it is
    /// already queued.
    pub fn insert(&mut self, item: T, priority: f64) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.live.insert(item.clone(), (seq, priority));
        self.heap.push(Entry {
            priority,
            seq,
            item,
        });
    }

    /// Remove and return the element with the smallest priority.
    pub fn pop_min(&mut self) -> Option<T> {
        self.pop_min_with_priority().map(|(item, _)| item)
    }

    /// Like [`pop_min`](Self::pop_min), also returning the priority.
    pub fn pop_min_with_priority(&mut self) -> Option<(T, f64)> {
        while let Some(entry) = self.heap.pop() {
            if self.is_live(&entry) {
                self.live.remove(&entry.item);
                return Some((entry.item, entry.priority));
            }
        }
        None
    }

    /// The element that [`pop_min`](Self::pop_min) would return, with its
    /// priority.
    pub fn peek_min(&mut self) -> Option<(&T, f64)> {
        self.discard_stale();
        self.heap.peek().map(|e| (&e.item, e.priority))
    }

    /// Whether `item` is queued, whatever its priority.
    #[inline]
    pub fn contains(&self, item: &T) -> bool {
        self.live.contains_key(item)
    }

    /// Current priority of `item`, if queued.
    #[inline]
    pub fn priority_of(&self, item: &T) -> Option<f64> {
        self.live.get(item).map(|&(_, p)| p)
    }

    /// Number of queued elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
        self.live.clear();
    }

    #[inline]
    fn is_live(&self, entry: &Entry<T>) -> bool {
        self.live
            .get(&entry.item)
            .is_some_and(|&(seq, _)| seq == entry.seq)
    }

    fn discard_stale(&mut self) {
        while let Some(top) = self.heap.peek() {
            if self.is_live(top) {
                break;
            }
            self.heap.pop();
        }
    }
}
