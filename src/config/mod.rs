//! Configuration for codedeck
//!
//! All fixture content (the scripted command replies, the run-feed script,
//! the welcome banner, the seed forest, and the timing constants) lives
//! here as configuration with compiled-in defaults. An embedding application
//! can override any of it, either in code or from a TOML/JSON file via
//! [`loader::ConfigLoader`].

pub mod loader;

pub use loader::ConfigLoader;

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::models::node::validate_name;
use crate::models::NodeKind;

/// Main configuration structure for codedeck
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Terminal session configuration and fixtures
    pub session: SessionConfig,

    /// Workspace tree configuration
    pub workspace: WorkspaceConfig,
}

/// Terminal session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Prompt marker prefixed to echoed input lines
    pub prompt_marker: String,

    /// Delay between a command's echo and its scripted reply, in milliseconds
    pub reply_delay_ms: u64,

    /// Cadence of the run feed, in milliseconds per line
    pub run_feed_interval_ms: u64,

    /// Output lines seeded into a fresh session log
    pub banner: Vec<String>,

    /// Reply to `help`
    pub help_text: String,

    /// Reply to `ls`
    pub listing: String,

    /// Reply to `pwd`
    pub working_dir: String,

    /// Reply to `python`
    pub python_banner: String,

    /// Reply to `node`
    pub node_banner: String,

    /// Reply to `git status`
    pub git_status: String,

    /// The scripted run feed, one line per tick
    pub run_feed: Vec<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            prompt_marker: "$".to_string(),
            reply_delay_ms: 200,
            run_feed_interval_ms: 800,
            banner: vec![
                "Welcome to the codedeck terminal".to_string(),
                "Type \"help\" for available commands".to_string(),
            ],
            help_text: "Available commands:\n  help     - Show this help message\n  clear    - Clear terminal\n  ls       - List files\n  pwd      - Show current directory\n  python   - Run Python interpreter\n  node     - Run Node.js\n  git      - Git commands".to_string(),
            listing: "main.py  utils.py  config.json  README.md  requirements.txt  tests/"
                .to_string(),
            working_dir: "/home/runner/my-repl".to_string(),
            python_banner: "Python 3.11.0 (main, Oct 24 2022, 18:26:48) [MSC v.1933 64 bit (AMD64)] on win32\nType \"help\", \"copyright\", \"credits\" or \"license\" for more information.\n>>>".to_string(),
            node_banner: "Welcome to Node.js v18.12.1.\nType \".help\" for more information.\n>"
                .to_string(),
            git_status: "On branch main\nYour branch is up to date with 'origin/main'.\n\nnothing to commit, working tree clean".to_string(),
            run_feed: vec![
                "Running main.py...".to_string(),
                "Hello, World!".to_string(),
                "What's your name? ".to_string(),
                "Hello, User!".to_string(),
                "Process finished with exit code 0".to_string(),
            ],
        }
    }
}

impl SessionConfig {
    /// Reply delay as a [`Duration`]
    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }

    /// Run feed cadence as a [`Duration`]
    pub fn run_feed_interval(&self) -> Duration {
        Duration::from_millis(self.run_feed_interval_ms)
    }
}

/// Workspace tree configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// Initial forest the tree is seeded with
    pub seed: Vec<SeedNode>,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            seed: vec![
                SeedNode::directory("src", true)
                    .with_children(vec![
                        SeedNode::file("main.py"),
                        SeedNode::file("utils.py"),
                        SeedNode::file("config.json"),
                    ]),
                SeedNode::directory("tests", false)
                    .with_children(vec![SeedNode::file("test_main.py")]),
                SeedNode::file("README.md"),
                SeedNode::file("requirements.txt"),
            ],
        }
    }
}

/// One entry of the configured seed forest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedNode {
    /// Node name, unique among siblings
    pub name: String,

    /// File or directory
    pub kind: NodeKind,

    /// Initial expanded state (directories only)
    #[serde(default)]
    pub open: bool,

    /// Child entries (directories only)
    #[serde(default)]
    pub children: Vec<SeedNode>,
}

impl SeedNode {
    /// Seed entry for a file
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::File,
            open: false,
            children: Vec::new(),
        }
    }

    /// Seed entry for a directory
    pub fn directory(name: impl Into<String>, open: bool) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Directory,
            open,
            children: Vec::new(),
        }
    }

    /// Attach children to a directory seed entry
    pub fn with_children(mut self, children: Vec<SeedNode>) -> Self {
        self.children = children;
        self
    }
}

impl Config {
    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.session.prompt_marker.trim().is_empty() {
            return Err(Error::ConfigValidationFailed {
                field: "session.prompt_marker".to_string(),
                reason: "Prompt marker cannot be empty".to_string(),
            });
        }

        if self.session.run_feed_interval_ms == 0 {
            return Err(Error::ConfigValidationFailed {
                field: "session.run_feed_interval_ms".to_string(),
                reason: "Run feed cadence must be greater than 0".to_string(),
            });
        }

        validate_seed_level(&self.workspace.seed, "workspace.seed")?;

        Ok(())
    }
}

/// Validate one sibling group of the seed forest, recursing into directories
fn validate_seed_level(level: &[SeedNode], field: &str) -> Result<()> {
    for (i, entry) in level.iter().enumerate() {
        validate_name(&entry.name).map_err(|e| Error::ConfigValidationFailed {
            field: field.to_string(),
            reason: e.to_string(),
        })?;

        if level[..i].iter().any(|prior| prior.name == entry.name) {
            return Err(Error::ConfigValidationFailed {
                field: field.to_string(),
                reason: format!("duplicate sibling name '{}'", entry.name),
            });
        }

        if entry.kind == NodeKind::File && !entry.children.is_empty() {
            return Err(Error::ConfigValidationFailed {
                field: field.to_string(),
                reason: format!("file '{}' cannot have children", entry.name),
            });
        }

        if !entry.children.is_empty() {
            validate_seed_level(&entry.children, field)?;
        }
    }

    Ok(())
}
