//! CLI Tooling
//!
//! Command-line interface: pick a session mode, feed it a script from a file
//! or stdin, and render the outcomes.

use crate::config::{ConfigLoader, UndoConfig};
use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::script::{Mode, Script};
use crate::tooling::session::{OutputFormat, Session};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::debug;

/// undofs - path namespace with bounded undo history
#[derive(Parser)]
#[command(name = "undofs")]
#[command(about = "In-memory path namespace with bounded snapshot undo history")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (TOML, YAML or JSON)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text")]
    pub format: String,

    /// Print a session summary to stderr
    #[arg(long, global = true)]
    pub summary: bool,

    /// Enable verbose logging (debug level unless --log-level is given)
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stderr, file, file+stderr)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Fold logging flags over the configured logging section.
    pub fn logging_config(&self, base: &LoggingConfig) -> LoggingConfig {
        let mut config = base.clone();
        if self.verbose {
            config.level = "debug".to_string();
        }
        if let Some(level) = &self.log_level {
            config.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            config.output = output.clone();
        }
        if let Some(file) = &self.log_file {
            config.file = Some(file.clone());
        }
        config
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run NEW/REMOVE/UNDO/LIST against a namespace with bounded undo history
    History {
        /// Script file (defaults to stdin)
        #[arg(long)]
        input: Option<PathBuf>,
        /// History capacity, overriding the script header and configuration
        #[arg(long)]
        capacity: Option<usize>,
    },
    /// Run NEW/REMOVE/LIST against a single namespace without history
    Flat {
        /// Script file (defaults to stdin)
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Print the most recent command lines that fit the header capacity
    Tail {
        /// Script file (defaults to stdin)
        #[arg(long)]
        input: Option<PathBuf>,
    },
}

impl Commands {
    pub fn mode(&self) -> Mode {
        match self {
            Commands::History { .. } => Mode::History,
            Commands::Flat { .. } => Mode::Flat,
            Commands::Tail { .. } => Mode::Tail,
        }
    }

    pub fn input(&self) -> Option<&Path> {
        match self {
            Commands::History { input, .. }
            | Commands::Flat { input }
            | Commands::Tail { input } => input.as_deref(),
        }
    }
}

/// Rendered result of one CLI invocation.
#[derive(Debug, Clone)]
pub struct Execution {
    /// Session output for stdout
    pub output: String,
    /// Rendered summary for stderr, when requested
    pub summary: Option<String>,
}

/// CLI context holding resolved configuration
pub struct CliContext {
    config: UndoConfig,
    format: OutputFormat,
    summary: bool,
}

impl CliContext {
    /// Create a new CLI context from an optional configuration file
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = ConfigLoader::load(config_path.as_deref())?;
        Ok(Self::from_config(config))
    }

    pub fn from_config(config: UndoConfig) -> Self {
        Self {
            config,
            format: OutputFormat::default(),
            summary: false,
        }
    }

    pub fn with_format(mut self, format: &str) -> Result<Self, ApiError> {
        self.format = format.parse()?;
        Ok(self)
    }

    pub fn with_summary(mut self, summary: bool) -> Self {
        self.summary = summary;
        self
    }

    pub fn config(&self) -> &UndoConfig {
        &self.config
    }

    /// Execute a command against the script read from `input`.
    pub fn execute<R: BufRead>(&self, command: &Commands, input: R) -> Result<Execution, ApiError> {
        let mode = command.mode();
        let script = Script::read(input, mode)?;

        let mut engine_config = self.config.engine.clone();
        if let Commands::History {
            capacity: Some(capacity),
            ..
        } = command
        {
            engine_config.history_capacity = Some(*capacity);
        }
        engine_config.validate()?;

        debug!(
            mode = %mode,
            commands = script.lines.len(),
            table_capacity = engine_config.table_capacity,
            "Running session"
        );
        let report = Session::new(engine_config).run(mode, &script)?;

        let summary = if self.summary {
            Some(report.summary.render(self.format)?)
        } else {
            None
        };
        Ok(Execution {
            output: report.render(self.format)?,
            summary,
        })
    }

    /// Execute reading the script from `--input` or stdin.
    pub fn execute_from_source(&self, command: &Commands) -> Result<Execution, ApiError> {
        match command.input() {
            Some(path) => {
                let file = File::open(path).map_err(|e| {
                    ApiError::Script(format!("cannot open input {}: {}", path.display(), e))
                })?;
                self.execute(command, BufReader::new(file))
            }
            None => self.execute(command, std::io::stdin().lock()),
        }
    }
}
