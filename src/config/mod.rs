//! Configuration
//!
//! Layered configuration: serde defaults, then an optional file, then
//! `UNDOFS__*` environment variables (highest precedence).

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::types::{DEFAULT_TABLE_CAPACITY, STEP_PRIME};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UndoConfig {
    #[serde(default)]
    pub engine: EngineConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Namespace engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Slots per snapshot table; fixed for the lifetime of the process
    #[serde(default = "default_table_capacity")]
    pub table_capacity: usize,

    /// Overrides the history depth announced by the script header (history mode only)
    #[serde(default)]
    pub history_capacity: Option<usize>,

    /// Print the resulting listing after an accepted NEW/REMOVE in history mode
    #[serde(default = "default_true")]
    pub echo_listing: bool,
}

fn default_table_capacity() -> usize {
    DEFAULT_TABLE_CAPACITY
}

fn default_true() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            table_capacity: default_table_capacity(),
            history_capacity: None,
            echo_listing: default_true(),
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.table_capacity == 0 {
            return Err(ApiError::ConfigError(
                "engine.table_capacity must be greater than zero".to_string(),
            ));
        }
        if self.history_capacity == Some(0) {
            return Err(ApiError::ConfigError(
                "engine.history_capacity must be greater than zero".to_string(),
            ));
        }
        if self.table_below_step_prime() {
            warn!(
                table_capacity = self.table_capacity,
                step_prime = STEP_PRIME,
                "engine.table_capacity should be a prime above the probe step prime; \
                 some entries may probe a single slot and be rejected"
            );
        }
        Ok(())
    }

    /// True when a probe step can be a multiple of the table size, which
    /// leaves some entries a single reachable slot.
    pub fn table_below_step_prime(&self) -> bool {
        self.table_capacity as u64 <= STEP_PRIME
    }
}
