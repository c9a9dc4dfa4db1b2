//! Error types
//!
//! Container-level failures (`CollectionError`) are contract violations that the
//! namespace engine guards against. Command-level failures (`CommandError`) are
//! expected and reported back to the caller without touching state.

use thiserror::Error;

/// Failures raised by the bounded containers and the open-addressing set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollectionError {
    #[error("cannot {operation} on an empty collection")]
    Empty { operation: &'static str },

    #[error("no free slot reachable on the probe path (capacity {capacity})")]
    Full { capacity: usize },

    #[error("collection capacity must be greater than zero")]
    ZeroCapacity,
}

impl CollectionError {
    pub(crate) fn empty(operation: &'static str) -> Self {
        CollectionError::Empty { operation }
    }
}

/// A rejected command. Rendered in the diagnostic shape written to the output stream.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("ERROR: cannot execute {}", render_invocation(.verb, .argument))]
    Conflict { verb: String, argument: String },

    #[error("ERROR: cannot execute {line}")]
    Malformed { line: String },
}

impl CommandError {
    pub fn conflict(verb: impl Into<String>, argument: impl Into<String>) -> Self {
        CommandError::Conflict {
            verb: verb.into(),
            argument: argument.into(),
        }
    }

    pub fn malformed(line: impl Into<String>) -> Self {
        CommandError::Malformed { line: line.into() }
    }
}

fn render_invocation(verb: &str, argument: &str) -> String {
    if argument.is_empty() {
        verb.to_string()
    } else {
        format!("{} {}", verb, argument)
    }
}

/// Errors surfaced by configuration, input handling and the CLI layer.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Configuration source error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid script: {0}")]
    Script(String),

    #[error("Collection error: {0}")]
    Collection(#[from] CollectionError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
