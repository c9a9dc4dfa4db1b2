//! Command scripts
//!
//! A script is a header line followed by one command per line. The header
//! shape depends on the session mode:
//!
//! - `history`: `<command_count> <history_capacity>`
//! - `flat`: `<command_count>`
//! - `tail`: `<command_count> <capacity>`

use crate::error::ApiError;
use serde::Serialize;
use std::fmt;
use std::io::BufRead;
use tracing::warn;

/// Session mode selecting the header shape and the engine that runs the script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Namespace with bounded undo history
    History,
    /// Single namespace, no undo
    Flat,
    /// Keep only the most recent raw command lines
    Tail,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::History => "history",
            Mode::Flat => "flat",
            Mode::Tail => "tail",
        };
        f.write_str(name)
    }
}

/// Parsed header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub command_count: usize,
    /// History depth (`history`) or ring size (`tail`); absent in `flat`.
    pub capacity: Option<usize>,
}

impl Header {
    pub fn parse(line: &str, mode: Mode) -> Result<Self, ApiError> {
        let mut fields = line.split_whitespace();
        let command_count = parse_field(fields.next(), "command count", line)?;
        let capacity = match mode {
            Mode::Flat => None,
            Mode::History | Mode::Tail => Some(parse_field(fields.next(), "capacity", line)?),
        };
        if fields.next().is_some() {
            warn!(header = line, mode = %mode, "Ignoring trailing header fields");
        }
        Ok(Header {
            command_count,
            capacity,
        })
    }
}

fn parse_field(field: Option<&str>, name: &str, line: &str) -> Result<usize, ApiError> {
    let field =
        field.ok_or_else(|| ApiError::Script(format!("header {:?} is missing the {}", line, name)))?;
    field.parse::<usize>().map_err(|e| {
        ApiError::Script(format!("header {} {:?} is not a count: {}", name, field, e))
    })
}

/// Header plus the command lines it announces.
#[derive(Debug, Clone)]
pub struct Script {
    pub header: Header,
    pub lines: Vec<String>,
}

impl Script {
    /// Read a header and up to `command_count` lines. A short input ends the script early.
    pub fn read<R: BufRead>(reader: R, mode: Mode) -> Result<Self, ApiError> {
        let mut lines = reader.lines();
        let header_line = lines
            .next()
            .ok_or_else(|| ApiError::Script("input is empty, expected a header line".to_string()))??;
        let header = Header::parse(&header_line, mode)?;

        let mut commands = Vec::with_capacity(header.command_count.min(4096));
        for line in lines.take(header.command_count) {
            let line = line?;
            commands.push(line.trim_end_matches('\r').to_string());
        }
        if commands.len() < header.command_count {
            warn!(
                expected = header.command_count,
                read = commands.len(),
                "Input ended before the announced command count"
            );
        }

        Ok(Script {
            header,
            lines: commands,
        })
    }
}
