//! MergeService: orchestrates sources and deserializes to UndoConfig.

use super::sources::{environment, file};
use super::UndoConfig;
use config::{Config, ConfigError};
use std::path::Path;

/// Merge service for config composition.
pub struct MergeService;

impl MergeService {
    /// Precedence: serde defaults (lowest) -> file -> environment (highest).
    pub fn load(path: Option<&Path>) -> Result<UndoConfig, ConfigError> {
        let builder = Config::builder();
        let builder = match path {
            Some(path) => file::add_to_builder(builder, path)?,
            None => builder,
        };
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        config.try_deserialize()
    }
}
