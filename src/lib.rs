//! codedeck - an embeddable coding-workspace core
//!
//! This library provides the state and behavior behind a simulated
//! browser-style coding environment: a workspace file tree and a terminal
//! session engine with scripted command replies.
//!
//! ## Features
//!
//! - **Workspace tree:** Path-addressed file/directory namespace with
//!   expand/collapse and create/delete mutations over an id-indexed arena
//! - **Session engine:** Append-only scrollback log, fixed command table,
//!   delayed scripted replies, and a timed five-line run feed
//! - **Fixtures as configuration:** Every scripted string, the seed
//!   forest, and all timing constants can be overridden via TOML/JSON
//! - **Deterministic timing:** All deferred output runs on tokio timers,
//!   so embedders can test with a paused clock instead of wall-clock waits
//!
//! ## Module Organization
//!
//! - [`workspace`] - The workspace tree and its mutations
//! - [`session`] - The terminal session engine and command dispatch
//! - [`models`] - Data structures (Node, Line)
//! - [`config`] - Configuration loading, fixtures, seed forest
//! - [`mod@error`] - Error types and Result aliases
//!
//! ## Quick Start
//!
//! ```no_run
//! use codedeck::init;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut workspace = init()?;
//!
//! workspace.tree.toggle(&["src"]);
//! workspace.session.submit("help").await;
//! # Ok(())
//! # }
//! ```
//!
//! ## Boundaries
//!
//! The crate is presentation-free: rendering, styling, selection and focus
//! state, and collaboration UI belong to the embedding application, which
//! reads snapshots (node rows, log lines, run state) and drives the
//! operation set. No command is ever really executed; the session only
//! simulates command effects against its fixture table.

#![allow(unexpected_cfgs)]

#[macro_use]
extern crate tracing;

pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod workspace;

// Re-exports for core functionality
pub use config::{Config, ConfigLoader, SessionConfig, WorkspaceConfig};
pub use error::{Error, Result};
pub use models::{Line, LineKind, Node, NodeId, NodeKind};
pub use session::{CommandOutcome, SessionEngine};
pub use workspace::{VisibleRow, WorkspaceTree};

// Version information
/// The current version of codedeck from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The crate name from Cargo.toml
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// A ready-to-drive workspace: the tree and the session engine
pub struct Workspace {
    /// The workspace file tree
    pub tree: WorkspaceTree,
    /// The terminal session engine
    pub session: SessionEngine,
}

impl Workspace {
    /// Build a workspace from explicit configuration
    pub fn from_config(config: Config) -> Self {
        Self {
            tree: WorkspaceTree::from_config(&config.workspace),
            session: SessionEngine::new(config.session),
        }
    }
}

/// Initialize codedeck with configuration from the default locations.
///
/// Falls back to the compiled-in defaults when no configuration file is
/// found or the found one fails to load.
pub fn init() -> Result<Workspace> {
    info!("Initializing {} v{}", NAME, VERSION);

    let config = match ConfigLoader::load() {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load configuration: {}. Using defaults", e);
            Config::default()
        }
    };

    Ok(Workspace::from_config(config))
}

/// Initialize codedeck from a specific configuration file.
///
/// Unlike [`init`], a missing or invalid file is an error here: the caller
/// asked for that file specifically.
pub fn init_with_config(config_path: &std::path::Path) -> Result<Workspace> {
    info!(
        "Initializing {} v{} with config: {}",
        NAME,
        VERSION,
        config_path.display()
    );

    if !config_path.exists() {
        return Err(Error::ConfigLoadFailed {
            path: config_path.to_path_buf(),
            reason: "Configuration file does not exist".to_string(),
        });
    }

    let config = ConfigLoader::load_from_file(config_path)?;
    Ok(Workspace::from_config(config))
}

/// Get default configuration
///
/// Returns a `Config` instance with all default values. This is useful for
/// testing or when you want to inspect the compiled-in fixture content.
///
/// # Examples
///
/// ```
/// use codedeck::default_config;
///
/// let config = default_config();
/// assert_eq!(config.session.reply_delay_ms, 200);
/// ```
pub fn default_config() -> Config {
    Config::default()
}
