//! Ring Buffer Implementation

use serde::{Serialize, Serializer};
use std::iter::Chain;
use std::slice;

/// Default buffer capacity (history window of the dashboard pipeline)
pub const DEFAULT_CAPACITY: usize = 5;

/// Iterator over buffered elements, oldest first
pub type Iter<'a, T> = Chain<slice::Iter<'a, T>, slice::Iter<'a, T>>;

/// Fixed-capacity FIFO ring buffer
///
/// Storage grows up to `capacity` and is then reused in place: `head` marks
/// the slot of the oldest element, which is the next one to be overwritten.
#[derive(Debug, Clone)]
pub struct RingBuffer<T> {
    /// Element storage, never longer than `capacity`
    storage: Vec<T>,
    /// Maximum number of elements held
    capacity: usize,
    /// Index of the oldest element once the buffer is full
    head: usize,
    /// Total elements pushed (for statistics)
    total_written: usize,
}

impl<T> RingBuffer<T> {
    /// Create a new ring buffer with given capacity
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Ring buffer capacity must be > 0");
        Self {
            storage: Vec::with_capacity(capacity),
            capacity,
            head: 0,
            total_written: 0,
        }
    }

    /// Create a buffer with default capacity (5 elements)
    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }

    /// Push an element, returning the evicted oldest element if the buffer was full
    pub fn push(&mut self, item: T) -> Option<T> {
        self.total_written += 1;

        if self.storage.len() < self.capacity {
            self.storage.push(item);
            return None;
        }

        let evicted = std::mem::replace(&mut self.storage[self.head], item);
        self.head = (self.head + 1) % self.capacity;
        Some(evicted)
    }

    /// Get the number of elements currently in the buffer
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Check if buffer is full
    pub fn is_full(&self) -> bool {
        self.storage.len() == self.capacity
    }

    /// Get the buffer capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recently pushed element
    pub fn latest(&self) -> Option<&T> {
        if self.storage.is_empty() {
            return None;
        }
        let idx = (self.head + self.storage.len() - 1) % self.storage.len();
        self.storage.get(idx)
    }

    /// Oldest element still held
    pub fn oldest(&self) -> Option<&T> {
        self.storage.get(self.head)
    }

    /// Iterate in insertion order, oldest first
    pub fn iter(&self) -> Iter<'_, T> {
        let (newer, older) = self.storage.split_at(self.head);
        older.iter().chain(newer.iter())
    }

    /// Read the last N elements (most recent first)
    pub fn read_last(&self, count: usize) -> Vec<&T> {
        let skip = self.len().saturating_sub(count);
        let mut items: Vec<&T> = self.iter().skip(skip).collect();
        items.reverse();
        items
    }

    /// Get total elements pushed (for statistics)
    pub fn total_written(&self) -> usize {
        self.total_written
    }

    /// Clear the buffer
    pub fn clear(&mut self) {
        self.storage.clear();
        self.head = 0;
    }
}

impl<T: Clone> RingBuffer<T> {
    /// Copy the contents out, oldest first
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

impl<T> Default for RingBuffer<T> {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

impl<'a, T> IntoIterator for &'a RingBuffer<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Serialized as a plain sequence, oldest first
impl<T: Serialize> Serialize for RingBuffer<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}
