//! Configuration sources.

pub mod environment {
    //! Environment variable source: UNDOFS prefix with __ separator

    use config::builder::DefaultState;
    use config::{ConfigBuilder, ConfigError, Environment};

    /// Add environment variable overlay to builder.
    /// `UNDOFS__ENGINE__TABLE_CAPACITY=12301` sets `engine.table_capacity`.
    pub fn add_to_builder(
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let builder = builder.add_source(
            Environment::with_prefix("UNDOFS")
                .separator("__")
                .try_parsing(true),
        );
        Ok(builder)
    }
}

pub mod file {
    //! Explicit configuration file; format inferred from the extension.

    use config::builder::DefaultState;
    use config::{ConfigBuilder, ConfigError, File};
    use std::path::Path;

    pub fn add_to_builder(
        builder: ConfigBuilder<DefaultState>,
        path: &Path,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        Ok(builder.add_source(File::from(path).required(true)))
    }
}
