//! Double-Hash Set
//!
//! Fixed-capacity open-addressing set of string entries. Two hash functions
//! derive the base slot and the probe step; deleted slots become tombstones so
//! probe chains running through them stay traversable.
//!
//! The table never rehashes. Lookups stay correct only while the load factor is
//! well below one, and the step is not guaranteed coprime with the capacity, so
//! a probe sequence may cycle before visiting every slot. Probing is bounded at
//! `capacity` steps: a lookup that exhausts its budget reports not-found and an
//! insert reports [`CollectionError::Full`].

use super::Set;
use crate::error::CollectionError;
use crate::types::{Entry, SlotIndex, DEFAULT_TABLE_CAPACITY, STEP_PRIME};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Slot {
    Empty,
    Occupied(Entry),
    Tombstone,
}

/// Open-addressing string set with double hashing and tombstone deletion.
///
/// `Clone` is a deep copy: the clone owns an independently allocated slot table.
#[derive(Debug, Clone)]
pub struct DoubleHashSet {
    slots: Vec<Slot>,
    len: usize,
}

impl Default for DoubleHashSet {
    fn default() -> Self {
        Self::new()
    }
}

impl DoubleHashSet {
    /// Create an empty set with [`DEFAULT_TABLE_CAPACITY`] slots.
    pub fn new() -> Self {
        Self {
            slots: vec![Slot::Empty; DEFAULT_TABLE_CAPACITY],
            len: 0,
        }
    }

    /// Create an empty set with a fixed number of slots.
    pub fn with_capacity(capacity: usize) -> Result<Self, CollectionError> {
        if capacity == 0 {
            return Err(CollectionError::ZeroCapacity);
        }
        Ok(Self {
            slots: vec![Slot::Empty; capacity],
            len: 0,
        })
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Primary probe index: `h mod capacity`.
    pub fn hash1(&self, item: &str) -> SlotIndex {
        (entry_hash(item) % self.capacity() as u64) as SlotIndex
    }

    /// Probe step: `12289 - (h mod 12289)`, always in `1..=12289`.
    pub fn hash2(&self, item: &str) -> u64 {
        STEP_PRIME - (entry_hash(item) % STEP_PRIME)
    }

    /// Slot indices visited for `item`, at most `capacity` of them.
    fn probe(&self, item: &str) -> impl Iterator<Item = SlotIndex> {
        let capacity = self.capacity();
        let base = self.hash1(item);
        let step = (self.hash2(item) % capacity as u64) as SlotIndex;
        (0..capacity).scan(base, move |index, i| {
            if i > 0 {
                *index = (*index + step) % capacity;
            }
            Some(*index)
        })
    }

    /// Slot holding `item`, or `None` once an EMPTY slot is reached.
    ///
    /// Tombstones never match and never stop the scan.
    pub fn search(&self, item: &str) -> Option<SlotIndex> {
        for index in self.probe(item) {
            match &self.slots[index] {
                Slot::Empty => return None,
                Slot::Occupied(stored) if stored == item => return Some(index),
                Slot::Occupied(_) | Slot::Tombstone => {}
            }
        }
        None
    }

    /// Live entries in physical slot order. Empty strings are skipped.
    ///
    /// The order carries no meaning beyond being stable for a given table.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().filter_map(|slot| match slot {
            Slot::Occupied(entry) if !entry.is_empty() => Some(entry.as_str()),
            _ => None,
        })
    }

    /// Number of tombstoned slots. Tombstones are only reclaimed by later inserts.
    #[cfg(test)]
    fn tombstones(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| matches!(slot, Slot::Tombstone))
            .count()
    }
}

impl Set<str> for DoubleHashSet {
    fn add(&mut self, item: &str) -> Result<bool, CollectionError> {
        if self.contains(item) {
            return Ok(false);
        }
        // First EMPTY or TOMBSTONE on the probe path takes the entry.
        let free = self
            .probe(item)
            .find(|&index| !matches!(self.slots[index], Slot::Occupied(_)));
        match free {
            Some(index) => {
                self.slots[index] = Slot::Occupied(item.to_string());
                self.len += 1;
                Ok(true)
            }
            None => Err(CollectionError::Full {
                capacity: self.capacity(),
            }),
        }
    }

    fn remove(&mut self, item: &str) -> Result<bool, CollectionError> {
        if self.is_empty() {
            return Err(CollectionError::empty("remove"));
        }
        match self.search(item) {
            Some(index) => {
                self.slots[index] = Slot::Tombstone;
                self.len -= 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn contains(&self, item: &str) -> bool {
        self.search(item).is_some()
    }

    fn len(&self) -> usize {
        self.len
    }
}

/// Stable 64-bit entry hash: the first eight bytes of the BLAKE3 digest.
fn entry_hash(item: &str) -> u64 {
    let digest = blake3::hash(item.as_bytes());
    let mut word = [0u8; 8];
    word.copy_from_slice(&digest.as_bytes()[..8]);
    u64::from_le_bytes(word)
}
