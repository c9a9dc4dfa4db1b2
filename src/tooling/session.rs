//! Session runner
//!
//! Drives a parsed [`Script`] through the engine selected by its [`Mode`] and
//! collects one output line per reportable outcome plus a [`SessionSummary`].

use crate::collections::{BoundedQueue, BoundedRing, Set};
use crate::config::EngineConfig;
use crate::error::ApiError;
use crate::namespace::{Command, FlatNamespace, NamespaceEngine};
use crate::script::{Mode, Script};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use serde::Serialize;
use std::str::FromStr;
use tracing::info;

/// Rendering for session output and summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(ApiError::ConfigError(format!(
                "Invalid output format: {} (must be 'text' or 'json')",
                other
            ))),
        }
    }
}

/// One line of session output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum OutputLine {
    /// Entries of the current namespace after `command`
    Listing { command: String, entries: Vec<String> },
    /// Rejected or malformed command
    Error { command: String, message: String },
    /// Raw command line retained by a tail session
    Echo { line: String },
}

impl OutputLine {
    pub fn to_text(&self) -> String {
        match self {
            OutputLine::Listing { entries, .. } => entries.join(" "),
            OutputLine::Error { message, .. } => message.clone(),
            OutputLine::Echo { line } => line.clone(),
        }
    }
}

/// Counters for one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub mode: Mode,
    pub commands: usize,
    pub applied: usize,
    pub rejected: usize,
    pub evictions: u64,
    /// Live snapshots at the end (history mode only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_depth: Option<usize>,
    /// Entries in the final namespace, or lines retained by a tail session
    pub entries: usize,
}

impl SessionSummary {
    fn new(mode: Mode) -> Self {
        Self {
            mode,
            commands: 0,
            applied: 0,
            rejected: 0,
            evictions: 0,
            history_depth: None,
            entries: 0,
        }
    }

    pub fn render(&self, format: OutputFormat) -> Result<String, ApiError> {
        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            OutputFormat::Text => {
                let mut table = Table::new();
                table.load_preset(UTF8_BORDERS_ONLY);
                table.set_header(vec!["Metric", "Value"]);
                table.add_row(vec!["Mode".to_string(), self.mode.to_string()]);
                table.add_row(vec!["Commands".to_string(), self.commands.to_string()]);
                table.add_row(vec!["Applied".to_string(), self.applied.to_string()]);
                table.add_row(vec!["Rejected".to_string(), self.rejected.to_string()]);
                table.add_row(vec!["Evictions".to_string(), self.evictions.to_string()]);
                if let Some(depth) = self.history_depth {
                    table.add_row(vec!["History depth".to_string(), depth.to_string()]);
                }
                table.add_row(vec!["Entries".to_string(), self.entries.to_string()]);
                Ok(table.to_string())
            }
        }
    }
}

/// Output lines and summary of a finished session.
#[derive(Debug, Clone)]
pub struct SessionReport {
    pub lines: Vec<OutputLine>,
    pub summary: SessionSummary,
}

impl SessionReport {
    /// Render every output line, each terminated by a newline.
    pub fn render(&self, format: OutputFormat) -> Result<String, ApiError> {
        let mut out = String::new();
        for line in &self.lines {
            match format {
                OutputFormat::Text => out.push_str(&line.to_text()),
                OutputFormat::Json => out.push_str(&serde_json::to_string(line)?),
            }
            out.push('\n');
        }
        Ok(out)
    }
}

/// Runs scripts with a fixed engine configuration.
pub struct Session {
    config: EngineConfig,
}

impl Session {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn run(&self, mode: Mode, script: &Script) -> Result<SessionReport, ApiError> {
        let report = match mode {
            Mode::History => self.run_history(script)?,
            Mode::Flat => self.run_flat(script)?,
            Mode::Tail => self.run_tail(script)?,
        };
        let summary = &report.summary;
        info!(
            mode = %summary.mode,
            commands = summary.commands,
            applied = summary.applied,
            rejected = summary.rejected,
            evictions = summary.evictions,
            "Session finished"
        );
        Ok(report)
    }

    /// History depth comes from configuration first, then the header. Tail ring
    /// size always comes from the header.
    fn capacity(&self, mode: Mode, script: &Script) -> Result<usize, ApiError> {
        let configured = match mode {
            Mode::History => self.config.history_capacity,
            Mode::Flat | Mode::Tail => None,
        };
        let capacity = configured
            .or(script.header.capacity)
            .ok_or_else(|| ApiError::Script("no capacity in header or configuration".to_string()))?;
        if capacity == 0 {
            return Err(ApiError::Script("capacity must be greater than zero".to_string()));
        }
        Ok(capacity)
    }

    fn run_history(&self, script: &Script) -> Result<SessionReport, ApiError> {
        let mut engine =
            NamespaceEngine::with_table_capacity(
            self.capacity(Mode::History, script)?,
            self.config.table_capacity,
        )?;
        let mut summary = SessionSummary::new(Mode::History);
        let mut lines = Vec::new();

        for line in &script.lines {
            summary.commands += 1;
            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(e) => {
                    summary.rejected += 1;
                    lines.push(error_line(line, e.to_string()));
                    continue;
                }
            };
            match engine.apply(&command) {
                Ok(()) => {
                    summary.applied += 1;
                    let echo = match command {
                        Command::List => true,
                        Command::New(_) | Command::Remove(_) => self.config.echo_listing,
                        Command::Undo(_) => false,
                    };
                    if echo {
                        lines.push(OutputLine::Listing {
                            command: line.clone(),
                            entries: engine.list(),
                        });
                    }
                }
                Err(e) => {
                    summary.rejected += 1;
                    lines.push(error_line(line, e.to_string()));
                }
            }
        }

        summary.evictions = engine.evictions();
        summary.history_depth = Some(engine.history_depth());
        summary.entries = engine.current().map(|snapshot| snapshot.len()).unwrap_or(0);
        Ok(SessionReport { lines, summary })
    }

    fn run_flat(&self, script: &Script) -> Result<SessionReport, ApiError> {
        let mut namespace = FlatNamespace::new(self.config.table_capacity)?;
        let mut summary = SessionSummary::new(Mode::Flat);
        let mut lines = Vec::new();

        for line in &script.lines {
            summary.commands += 1;
            let outcome = line
                .parse::<Command>()
                .and_then(|command| namespace.apply(&command).map(|()| command));
            match outcome {
                Ok(command) => {
                    summary.applied += 1;
                    if command == Command::List {
                        lines.push(OutputLine::Listing {
                            command: line.clone(),
                            entries: namespace.list(),
                        });
                    }
                }
                Err(e) => {
                    summary.rejected += 1;
                    lines.push(error_line(line, e.to_string()));
                }
            }
        }

        summary.entries = namespace.snapshot().len();
        Ok(SessionReport { lines, summary })
    }

    fn run_tail(&self, script: &Script) -> Result<SessionReport, ApiError> {
        let mut ring = BoundedRing::new(self.capacity(Mode::Tail, script)?)?;
        let mut summary = SessionSummary::new(Mode::Tail);

        for line in &script.lines {
            summary.commands += 1;
            summary.applied += 1;
            if ring.offer(line.clone()).is_some() {
                summary.evictions += 1;
            }
        }

        summary.entries = ring.len();
        let lines = ring.drain().map(|line| OutputLine::Echo { line }).collect();
        Ok(SessionReport { lines, summary })
    }
}

fn error_line(line: &str, message: String) -> OutputLine {
    OutputLine::Error {
        command: line.to_string(),
        message,
    }
}
