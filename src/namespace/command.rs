//! Command tokenizer
//!
//! A line splits at its first space into a case-sensitive verb and an argument
//! string. The argument may itself contain spaces.

use crate::error::CommandError;
use crate::types::Entry;
use std::fmt;
use std::str::FromStr;

/// One namespace command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `NEW <name>`
    New(Entry),
    /// `REMOVE <name>`
    Remove(Entry),
    /// `UNDO` or `UNDO <k>`; `None` means the bare form.
    Undo(Option<usize>),
    /// `LIST`
    List,
}

impl Command {
    pub fn verb(&self) -> &'static str {
        match self {
            Command::New(_) => "NEW",
            Command::Remove(_) => "REMOVE",
            Command::Undo(_) => "UNDO",
            Command::List => "LIST",
        }
    }

    /// Argument as it is echoed in diagnostics.
    pub fn argument(&self) -> String {
        match self {
            Command::New(name) | Command::Remove(name) => name.clone(),
            Command::Undo(Some(steps)) => steps.to_string(),
            Command::Undo(None) | Command::List => String::new(),
        }
    }

    /// Rollback depth requested by an UNDO; bare `UNDO` means one step.
    pub fn undo_steps(&self) -> Option<usize> {
        match self {
            Command::Undo(steps) => Some(steps.unwrap_or(1)),
            _ => None,
        }
    }

    /// Conflict diagnostic for this command.
    pub fn conflict(&self) -> CommandError {
        CommandError::conflict(self.verb(), self.argument())
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let argument = self.argument();
        if argument.is_empty() {
            write!(f, "{}", self.verb())
        } else {
            write!(f, "{} {}", self.verb(), argument)
        }
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (verb, argument) = match line.split_once(' ') {
            Some((verb, argument)) => (verb, Some(argument)),
            None => (line, None),
        };

        match (verb, argument) {
            ("LIST", None) => Ok(Command::List),
            ("UNDO", None) => Ok(Command::Undo(None)),
            ("UNDO", Some(steps)) => steps
                .trim()
                .parse::<usize>()
                .map(|steps| Command::Undo(Some(steps)))
                .map_err(|_| CommandError::malformed(line)),
            ("NEW", Some(name)) if !name.is_empty() => Ok(Command::New(name.to_string())),
            ("REMOVE", Some(name)) if !name.is_empty() => Ok(Command::Remove(name.to_string())),
            _ => Err(CommandError::malformed(line)),
        }
    }
}
