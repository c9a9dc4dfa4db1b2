//! Bounded Ring
//!
//! Fixed-capacity FIFO over an unbounded backing list. When full, `offer`
//! evicts the single oldest element before admitting the new one.

use super::BoundedQueue;
use crate::error::CollectionError;
use std::collections::VecDeque;

/// Fixed-capacity FIFO with oldest-first eviction.
#[derive(Debug, Clone)]
pub struct BoundedRing<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> BoundedRing<T> {
    /// Create an empty ring. The backing list grows lazily up to `capacity`.
    pub fn new(capacity: usize) -> Result<Self, CollectionError> {
        if capacity == 0 {
            return Err(CollectionError::ZeroCapacity);
        }
        Ok(Self {
            items: VecDeque::new(),
            capacity,
        })
    }

    /// Iterate oldest-first without consuming.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// Remove every element oldest-first.
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.items.drain(..)
    }
}

impl<T> BoundedQueue<T> for BoundedRing<T> {
    fn offer(&mut self, value: T) -> Option<T> {
        // At most one eviction: len never exceeds capacity.
        let evicted = if self.is_full() {
            self.items.pop_front()
        } else {
            None
        };
        self.items.push_back(value);
        evicted
    }

    fn poll(&mut self) -> Result<T, CollectionError> {
        self.items
            .pop_front()
            .ok_or_else(|| CollectionError::empty("poll"))
    }

    fn peek(&self) -> Result<&T, CollectionError> {
        self.items
            .front()
            .ok_or_else(|| CollectionError::empty("peek"))
    }

    fn flush(&mut self) {
        self.items.clear();
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}
