//! ConfigLoader facade delegating to the merge service.

use super::merge::MergeService;
use super::UndoConfig;
use crate::error::ApiError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from an optional file plus environment, then validate it.
    pub fn load(path: Option<&Path>) -> Result<UndoConfig, ApiError> {
        let config = MergeService::load(path)?;
        config.engine.validate()?;
        Ok(config)
    }
}
