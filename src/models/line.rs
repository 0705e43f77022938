//! Scrollback Line Model
//!
//! Represents a single entry in the terminal session's scrollback log.
//! Lines are tagged as echoed input, scripted output, or error text, and
//! carry a monotonically increasing id so the log's emission order is
//! recoverable even after snapshots are taken.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of a scrollback line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineKind {
    /// Echo of a submitted command (prompt-prefixed)
    Input,
    /// Scripted command response or run-feed output
    Output,
    /// Unrecognized command or subcommand
    Error,
}

/// Represents a single line in the session scrollback log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Line {
    /// Monotonically increasing id, strictly ordered by emission
    pub id: u64,

    /// Input, output, or error
    pub kind: LineKind,

    /// The text content (may span multiple display lines)
    pub text: String,

    /// When this line was appended
    pub created_at: DateTime<Utc>,
}

impl Line {
    /// Create a new line
    pub fn new(id: u64, kind: LineKind, text: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            text: text.into(),
            created_at: Utc::now(),
        }
    }

    /// Create an input echo line
    pub fn input(id: u64, text: impl Into<String>) -> Self {
        Self::new(id, LineKind::Input, text)
    }

    /// Create an output line
    pub fn output(id: u64, text: impl Into<String>) -> Self {
        Self::new(id, LineKind::Output, text)
    }

    /// Create an error line
    pub fn error(id: u64, text: impl Into<String>) -> Self {
        Self::new(id, LineKind::Error, text)
    }

    /// Check if this line is an input echo
    pub fn is_input(&self) -> bool {
        matches!(self.kind, LineKind::Input)
    }

    /// Check if this line is scripted output
    pub fn is_output(&self) -> bool {
        matches!(self.kind, LineKind::Output)
    }

    /// Check if this line is an error
    pub fn is_error(&self) -> bool {
        matches!(self.kind, LineKind::Error)
    }
}
