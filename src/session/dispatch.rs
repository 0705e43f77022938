//! Command Dispatch
//!
//! Maps submitted command strings to their scripted outcomes. Matching is
//! exact on the trimmed, lower-cased input, with one prefix family for git
//! subcommands. Unrecognized input is data (an error-kind reply), never a
//! fault: an interactive session must stay usable after any input.

use crate::config::SessionConfig;
use crate::models::LineKind;

/// Resolved outcome of a submitted command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// A scripted reply line, appended after the reply delay
    Reply {
        /// Output for recognized commands, Error for unrecognized ones
        kind: LineKind,
        /// Reply text, possibly multi-line
        text: String,
    },
    /// `clear`: synchronously empty the log, no reply line
    ClearLog,
}

impl CommandOutcome {
    fn output(text: impl Into<String>) -> Self {
        CommandOutcome::Reply {
            kind: LineKind::Output,
            text: text.into(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        CommandOutcome::Reply {
            kind: LineKind::Error,
            text: text.into(),
        }
    }
}

/// Resolve a raw submission against the command table.
///
/// The raw text is trimmed and lower-cased for matching only; text echoed
/// into reply messages keeps the submitted casing.
pub fn dispatch(raw: &str, fixtures: &SessionConfig) -> CommandOutcome {
    let trimmed = raw.trim();
    let normalized = trimmed.to_lowercase();

    match normalized.as_str() {
        "help" => CommandOutcome::output(fixtures.help_text.as_str()),
        "clear" => CommandOutcome::ClearLog,
        "ls" => CommandOutcome::output(fixtures.listing.as_str()),
        "pwd" => CommandOutcome::output(fixtures.working_dir.as_str()),
        "python" => CommandOutcome::output(fixtures.python_banner.as_str()),
        "node" => CommandOutcome::output(fixtures.node_banner.as_str()),
        "git status" => CommandOutcome::output(fixtures.git_status.as_str()),
        _ => {
            if normalized.starts_with("git ") {
                let rest = &trimmed[4..];
                CommandOutcome::error(format!("git: '{}' is not a git command.", rest))
            } else {
                CommandOutcome::error(format!("command not found: {}", trimmed))
            }
        }
    }
}
