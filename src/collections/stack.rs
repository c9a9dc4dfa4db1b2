//! Bounded History Stack
//!
//! A LIFO built from two [`BoundedRing`]s and nothing else. The front of
//! `primary` is the top of the stack; `scratch` only holds elements while a
//! push rotates them behind the new top.

use super::{BoundedQueue, BoundedRing, BoundedStack};
use crate::error::CollectionError;

/// Fixed-capacity stack over two rings. Push is O(size), pop and top are O(1).
#[derive(Debug, Clone)]
pub struct BoundedHistoryStack<T> {
    primary: BoundedRing<T>,
    scratch: BoundedRing<T>,
}

impl<T> BoundedHistoryStack<T> {
    pub fn new(capacity: usize) -> Result<Self, CollectionError> {
        Ok(Self {
            primary: BoundedRing::new(capacity)?,
            scratch: BoundedRing::new(capacity)?,
        })
    }

    /// Iterate top-first without consuming.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.primary.iter()
    }
}

/// Move up to `count` elements from the front of `from` to the back of `to`.
fn transfer<T>(from: &mut BoundedRing<T>, to: &mut BoundedRing<T>, count: usize) {
    for _ in 0..count {
        match from.poll() {
            Ok(item) => {
                to.offer(item);
            }
            Err(_) => break,
        }
    }
}

impl<T> BoundedStack<T> for BoundedHistoryStack<T> {
    fn push(&mut self, value: T) -> Option<T> {
        if self.primary.is_empty() {
            self.primary.offer(value);
            return None;
        }

        // When full, the bottom element is left behind in `primary` and dropped,
        // so the new value always survives as the top.
        let full = self.primary.is_full();
        let carried = if full {
            self.primary.len() - 1
        } else {
            self.primary.len()
        };

        transfer(&mut self.primary, &mut self.scratch, carried);
        let evicted = if full { self.primary.poll().ok() } else { None };
        self.primary.offer(value);
        transfer(&mut self.scratch, &mut self.primary, carried);

        evicted
    }

    fn pop(&mut self) -> Result<T, CollectionError> {
        self.primary
            .poll()
            .map_err(|_| CollectionError::empty("pop"))
    }

    fn top(&self) -> Result<&T, CollectionError> {
        self.primary
            .peek()
            .map_err(|_| CollectionError::empty("top"))
    }

    fn flush(&mut self) {
        self.primary.flush();
    }

    fn len(&self) -> usize {
        self.primary.len()
    }

    fn capacity(&self) -> usize {
        self.primary.capacity()
    }
}
