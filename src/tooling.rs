//! Tooling & Integration Layer
//!
//! CLI parsing and the session runner that connects scripts to the
//! namespace engine.

pub mod cli;
pub mod session;

pub use cli::{Cli, CliContext, Commands, Execution};
pub use session::{OutputFormat, OutputLine, Session, SessionReport, SessionSummary};
