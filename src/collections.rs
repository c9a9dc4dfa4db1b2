//! Bounded Containers
//!
//! One capability trait per abstraction (FIFO, LIFO, set), each with a single
//! concrete implementation:
//!
//! - [`BoundedRing`]: fixed-capacity FIFO that evicts its oldest element on overflow
//! - [`DoubleHashSet`]: fixed-capacity open-addressing set with double hashing and tombstones
//! - [`BoundedHistoryStack`]: fixed-capacity LIFO realized purely with two rings

pub mod double_hash;
pub mod ring;
pub mod stack;

pub use double_hash::DoubleHashSet;
pub use ring::BoundedRing;
pub use stack::BoundedHistoryStack;

use crate::error::CollectionError;

/// FIFO with a capacity bound. `offer` never fails: on overflow the oldest element is evicted.
pub trait BoundedQueue<T> {
    /// Insert at the back, returning the evicted element if the queue was full.
    fn offer(&mut self, value: T) -> Option<T>;
    fn poll(&mut self) -> Result<T, CollectionError>;
    fn peek(&self) -> Result<&T, CollectionError>;
    fn flush(&mut self);
    fn len(&self) -> usize;
    fn capacity(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_full(&self) -> bool {
        self.len() >= self.capacity()
    }
}

/// LIFO with a capacity bound. Pushing onto a full stack discards the bottom element.
pub trait BoundedStack<T> {
    /// Push a new top, returning the evicted bottom element if the stack was full.
    fn push(&mut self, value: T) -> Option<T>;
    fn pop(&mut self) -> Result<T, CollectionError>;
    fn top(&self) -> Result<&T, CollectionError>;
    fn flush(&mut self);
    fn len(&self) -> usize;
    fn capacity(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn is_full(&self) -> bool {
        self.len() >= self.capacity()
    }
}

/// Membership set.
pub trait Set<T: ?Sized> {
    /// Insert `item`; returns `false` if it was already present.
    fn add(&mut self, item: &T) -> Result<bool, CollectionError>;
    /// Remove `item` if present. Fails only when the set is empty.
    fn remove(&mut self, item: &T) -> Result<bool, CollectionError>;
    fn contains(&self, item: &T) -> bool;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
