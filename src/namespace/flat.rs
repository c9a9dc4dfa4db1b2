//! Single namespace without history.

use super::{alias_conflict, Command, Snapshot};
use crate::collections::{DoubleHashSet, Set};
use crate::error::{CollectionError, CommandError};
use tracing::{debug, error, warn};

/// One mutable namespace with the same conflict rules as the engine but no UNDO.
#[derive(Debug, Clone)]
pub struct FlatNamespace {
    entries: Snapshot,
}

impl FlatNamespace {
    pub fn new(table_capacity: usize) -> Result<Self, CollectionError> {
        Ok(Self {
            entries: DoubleHashSet::with_capacity(table_capacity)?,
        })
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.entries
    }

    pub fn list(&self) -> Vec<String> {
        self.entries.entries().map(str::to_string).collect()
    }

    pub fn create(&mut self, name: &str) -> bool {
        if alias_conflict(&self.entries, name) {
            return false;
        }
        match self.entries.add(name) {
            Ok(_) => true,
            Err(e) => {
                error!(error = %e, name, "Namespace table rejected insert");
                false
            }
        }
    }

    pub fn delete(&mut self, name: &str) -> bool {
        if !self.entries.contains(name) {
            return false;
        }
        match self.entries.remove(name) {
            Ok(_) => true,
            Err(e) => {
                error!(error = %e, name, "Namespace table rejected remove");
                false
            }
        }
    }

    /// Apply one command. UNDO has no meaning here and is reported malformed.
    pub fn apply(&mut self, command: &Command) -> Result<(), CommandError> {
        let accepted = match command {
            Command::New(name) => self.create(name),
            Command::Remove(name) => self.delete(name),
            Command::List => true,
            Command::Undo(_) => return Err(CommandError::malformed(command.to_string())),
        };
        if accepted {
            debug!(command = %command, size = self.entries.len(), "Applied command");
            Ok(())
        } else {
            warn!(command = %command, "Rejected command");
            Err(command.conflict())
        }
    }
}
