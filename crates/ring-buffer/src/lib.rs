//! Fixed-Capacity Ring Buffer
//!
//! Insertion-ordered FIFO storage used as the recent-history window of the
//! validation pipeline. Once full, every push evicts the oldest element.

mod buffer;

pub use buffer::{Iter, RingBuffer, DEFAULT_CAPACITY};
