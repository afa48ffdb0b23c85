//! Binary-heap priority queues keyed by `f32` priority.
//!
//! [`Heap`] is a single implementation parameterised by a [`HeapOrder`]
//! marker: [`MinFirst`] (pathfinding over accumulated cost) and
//! [`MaxFirst`] (agent neighbour selection over a steepness score).
//!
//! Sift-up and sift-down compare with a strict `<` / `>`, so an element
//! never moves past an equal-priority one. Ties keep their insertion
//! order where the heap shape allows, which makes traversal order
//! reproducible for a given sequence of operations.

use std::fmt;
use std::marker::PhantomData;
use std::ops::Index;

/// Ordering policy for a [`Heap`].
pub trait HeapOrder {
    /// Whether priority `a` must sit above priority `b`. Strict.
    fn precedes(a: f32, b: f32) -> bool;
}

/// Lowest priority is extracted first.
#[derive(Clone, Copy, Debug, Default)]
pub struct MinFirst;

impl HeapOrder for MinFirst {
    fn precedes(a: f32, b: f32) -> bool {
        a < b
    }
}

/// Highest priority is extracted first.
#[derive(Clone, Copy, Debug, Default)]
pub struct MaxFirst;

impl HeapOrder for MaxFirst {
    fn precedes(a: f32, b: f32) -> bool {
        a > b
    }
}

/// An ordered multiset of `(item, priority)` pairs.
///
/// # Indexed access
///
/// [`get`](Self::get) and [`priority_at`](Self::priority_at) expose the
/// *internal array order*. Only index 0 is guaranteed to be the extreme
/// element; the remaining indices are in heap order, not sorted order.
pub trait PriorityQueue<T> {
    /// Insert `item` with `priority`. O(log n).
    fn enqueue(&mut self, item: T, priority: f32);

    /// Remove and return the extreme item, or `None` when empty. O(log n).
    fn dequeue(&mut self) -> Option<T>;

    /// The extreme item without removing it.
    fn peek(&self) -> Option<&T>;

    /// Linear membership scan by equality. O(n).
    fn contains(&self, item: &T) -> bool
    where
        T: PartialEq;

    /// Number of queued items.
    fn len(&self) -> usize;

    /// Whether the queue is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Item at internal array position `i`.
    fn get(&self, i: usize) -> Option<&T>;

    /// Priority at internal array position `i`.
    fn priority_at(&self, i: usize) -> Option<f32>;

    /// Remove every item.
    fn clear(&mut self);
}

#[derive(Clone, Debug)]
struct Entry<T> {
    item: T,
    priority: f32,
}

/// Array-backed binary heap.
pub struct Heap<T, O> {
    entries: Vec<Entry<T>>,
    _order: PhantomData<O>,
}

/// Extracts the lowest priority first.
pub type MinHeap<T> = Heap<T, MinFirst>;

/// Extracts the highest priority first.
pub type MaxHeap<T> = Heap<T, MaxFirst>;

impl<T, O: HeapOrder> Heap<T, O> {
    /// Create an empty heap.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            _order: PhantomData,
        }
    }

    /// Create an empty heap with room for `capacity` items.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            _order: PhantomData,
        }
    }

    /// `(item, priority)` pairs in internal array order.
    pub fn iter(&self) -> impl Iterator<Item = (&T, f32)> {
        self.entries.iter().map(|e| (&e.item, e.priority))
    }

    fn parent(pos: usize) -> usize {
        (pos - 1) / 2
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = Self::parent(pos);
            if O::precedes(self.entries[pos].priority, self.entries[parent].priority) {
                self.entries.swap(pos, parent);
                pos = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut pos: usize) {
        let len = self.entries.len();
        loop {
            let left = 2 * pos + 1;
            let right = 2 * pos + 2;
            let mut best = pos;
            if left < len && O::precedes(self.entries[left].priority, self.entries[best].priority)
            {
                best = left;
            }
            if right < len && O::precedes(self.entries[right].priority, self.entries[best].priority)
            {
                best = right;
            }
            if best == pos {
                break;
            }
            self.entries.swap(pos, best);
            pos = best;
        }
    }
}

impl<T, O: HeapOrder> PriorityQueue<T> for Heap<T, O> {
    fn enqueue(&mut self, item: T, priority: f32) {
        self.entries.push(Entry { item, priority });
        let last = self.entries.len() - 1;
        self.sift_up(last);
    }

    fn dequeue(&mut self) -> Option<T> {
        if self.entries.is_empty() {
            return None;
        }
        let root = self.entries.swap_remove(0);
        if !self.entries.is_empty() {
            self.sift_down(0);
        }
        Some(root.item)
    }

    fn peek(&self) -> Option<&T> {
        self.entries.first().map(|e| &e.item)
    }

    fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.entries.iter().any(|e| &e.item == item)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn get(&self, i: usize) -> Option<&T> {
        self.entries.get(i).map(|e| &e.item)
    }

    fn priority_at(&self, i: usize) -> Option<f32> {
        self.entries.get(i).map(|e| e.priority)
    }

    fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<T, O: HeapOrder> Default for Heap<T, O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, O: HeapOrder> Index<usize> for Heap<T, O> {
    type Output = T;

    fn index(&self, i: usize) -> &T {
        &self.entries[i].item
    }
}

impl<T: Clone, O> Clone for Heap<T, O> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            _order: PhantomData,
        }
    }
}

impl<T: fmt::Debug, O> fmt::Debug for Heap<T, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|e| (&e.item, e.priority)))
            .finish()
    }
}
