//! Namespace Engine
//!
//! Applies commands to a bounded history of namespace snapshots. Every
//! accepted NEW/REMOVE deep-copies the current top snapshot, mutates the copy
//! and pushes it; UNDO pops snapshots; LIST reads the top without touching
//! history.

pub mod command;
pub mod flat;

pub use command::Command;
pub use flat::FlatNamespace;

use crate::collections::{BoundedHistoryStack, BoundedStack, DoubleHashSet, Set};
use crate::error::{CollectionError, CommandError};
use crate::types::{DEFAULT_TABLE_CAPACITY, DIRECTORY_MARKER};
use tracing::{debug, error, info, warn};

/// Snapshot: the complete namespace at one point in history.
pub type Snapshot = DoubleHashSet;

/// True if `name` or its file/directory alias is already present.
///
/// `X` and `X/` never coexist in a snapshot.
pub(crate) fn alias_conflict(snapshot: &Snapshot, name: &str) -> bool {
    let alias = match name.strip_suffix(DIRECTORY_MARKER) {
        Some(stem) => stem.to_string(),
        None => format!("{}{}", name, DIRECTORY_MARKER),
    };
    snapshot.contains(name) || snapshot.contains(&alias)
}

/// Namespace with bounded undo history.
pub struct NamespaceEngine {
    history: BoundedHistoryStack<Snapshot>,
    /// Empty namespace; cloned whenever history needs seeding.
    seed: Snapshot,
    evictions: u64,
}

impl NamespaceEngine {
    /// Create an engine holding at most `history_capacity` snapshots.
    pub fn new(history_capacity: usize) -> Result<Self, CollectionError> {
        Self::with_table_capacity(history_capacity, DEFAULT_TABLE_CAPACITY)
    }

    /// Create an engine whose snapshots use `table_capacity` slots.
    pub fn with_table_capacity(
        history_capacity: usize,
        table_capacity: usize,
    ) -> Result<Self, CollectionError> {
        let seed = DoubleHashSet::with_capacity(table_capacity)?;
        let mut history = BoundedHistoryStack::new(history_capacity)?;
        history.push(seed.clone());
        Ok(Self {
            history,
            seed,
            evictions: 0,
        })
    }

    /// Current namespace (top of history).
    pub fn current(&self) -> Result<&Snapshot, CollectionError> {
        self.history.top()
    }

    /// Entries of the current namespace, in physical slot order.
    pub fn list(&self) -> Vec<String> {
        match self.current() {
            Ok(snapshot) => snapshot.entries().map(str::to_string).collect(),
            Err(e) => {
                error!(error = %e, "History unexpectedly empty on LIST");
                Vec::new()
            }
        }
    }

    /// Number of live snapshots.
    pub fn history_depth(&self) -> usize {
        self.history.len()
    }

    pub fn history_capacity(&self) -> usize {
        self.history.capacity()
    }

    /// Snapshots discarded because history was at capacity.
    pub fn evictions(&self) -> u64 {
        self.evictions
    }

    /// Create `name` unless it or its alias exists. Returns whether it was accepted.
    pub fn create(&mut self, name: &str) -> bool {
        let current = match self.current() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                error!(error = %e, name, "History unexpectedly empty on NEW");
                return false;
            }
        };
        if alias_conflict(current, name) {
            return false;
        }

        let mut next = current.clone();
        match next.add(name) {
            Ok(_) => {
                self.commit(next);
                true
            }
            Err(e) => {
                error!(error = %e, name, "Snapshot table rejected insert");
                false
            }
        }
    }

    /// Delete `name` if present. Returns whether it was accepted.
    pub fn delete(&mut self, name: &str) -> bool {
        let current = match self.current() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                error!(error = %e, name, "History unexpectedly empty on REMOVE");
                return false;
            }
        };
        if !current.contains(name) {
            return false;
        }

        let mut next = current.clone();
        match next.remove(name) {
            Ok(_) => {
                self.commit(next);
                true
            }
            Err(e) => {
                error!(error = %e, name, "Snapshot table rejected remove");
                false
            }
        }
    }

    /// Roll back `steps` snapshots. Rejected if fewer than `steps` are live.
    ///
    /// Draining history completely returns the namespace to empty.
    pub fn undo(&mut self, steps: usize) -> bool {
        if steps > self.history.len() {
            return false;
        }
        for _ in 0..steps {
            if let Err(e) = self.history.pop() {
                error!(error = %e, steps, "History drained mid-undo");
                break;
            }
        }
        if self.history.is_empty() {
            debug!("History drained, reseeding empty namespace");
            self.history.push(self.seed.clone());
        }
        true
    }

    /// Apply one command. Rejections leave namespace and history untouched.
    pub fn apply(&mut self, command: &Command) -> Result<(), CommandError> {
        let accepted = match command {
            Command::New(name) => self.create(name),
            Command::Remove(name) => self.delete(name),
            Command::Undo(_) => self.undo(command.undo_steps().unwrap_or(1)),
            Command::List => true,
        };

        if accepted {
            debug!(
                command = %command,
                depth = self.history.len(),
                "Applied command"
            );
            Ok(())
        } else {
            warn!(command = %command, depth = self.history.len(), "Rejected command");
            Err(command.conflict())
        }
    }

    fn commit(&mut self, next: Snapshot) {
        if self.history.push(next).is_some() {
            self.evictions += 1;
            info!(
                capacity = self.history.capacity(),
                evictions = self.evictions,
                "Evicted oldest snapshot from history"
            );
        }
    }
}
