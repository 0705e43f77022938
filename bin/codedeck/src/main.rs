//! codedeck demo shell
//!
//! A minimal stdin-driven presentation layer over the codedeck core. It
//! stands in for the real view layer: it renders tree and log snapshots
//! and forwards user intents (toggle, create, delete, run/stop, command
//! submissions) into the two core components.
//!
//! Terminal input is forwarded verbatim to the session engine; lines
//! starting with `:` are workspace and runner intents:
//!
//! ```text
//! :tree               render the workspace tree
//! :toggle PATH        expand/collapse a directory (slash-separated path)
//! :touch PATH         create a file
//! :mkdir PATH         create a directory
//! :rm PATH            delete a node and its subtree
//! :run  /  :stop      start or cancel the run feed
//! :quit               exit
//! ```

use std::env;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use codedeck::{init, init_with_config, LineKind, NodeKind, Workspace};

/// Application configuration
#[derive(Debug, Default)]
struct AppArgs {
    /// Configuration file path
    config_path: Option<PathBuf>,
    /// Enable debug logging
    debug: bool,
}

impl AppArgs {
    /// Parse command line arguments
    fn parse() -> Result<Self> {
        let args: Vec<String> = env::args().collect();
        let mut app_args = AppArgs::default();

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--config" | "-c" => {
                    i += 1;
                    let path = args.get(i).context("Missing config file path")?;
                    app_args.config_path = Some(PathBuf::from(path));
                }
                "--debug" | "-d" => {
                    app_args.debug = true;
                }
                "--help" | "-h" => {
                    print_help();
                    process::exit(0);
                }
                other => {
                    anyhow::bail!("Unknown argument: {}", other);
                }
            }
            i += 1;
        }

        Ok(app_args)
    }
}

fn print_help() {
    println!("codedeck demo shell");
    println!();
    println!("USAGE:");
    println!("    codedeck [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -c, --config <PATH>    Load configuration from PATH");
    println!("    -d, --debug            Enable debug logging");
    println!("    -h, --help             Show this help");
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = AppArgs::parse()?;

    let filter = if args.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(io::stderr)
        .init();

    let workspace = match &args.config_path {
        Some(path) => init_with_config(path)?,
        None => init()?,
    };
    info!("workspace ready, session {}", workspace.session.id());

    run_repl(workspace).await
}

/// Read-render loop: one intent per stdin line
async fn run_repl(mut workspace: Workspace) -> Result<()> {
    let mut last_seen = print_new_lines(&workspace, 0).await;
    let stdin = io::stdin();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break; // EOF
        }
        let input = input.trim_end_matches(['\r', '\n']);

        if let Some(intent) = input.strip_prefix(':') {
            if !handle_intent(&mut workspace, intent).await? {
                break;
            }
        } else {
            workspace.session.submit(input).await;
            // Give the scripted reply time to land before rendering
            tokio::time::sleep(workspace.session.config().reply_delay() + Duration::from_millis(50))
                .await;
        }

        last_seen = print_new_lines(&workspace, last_seen).await;
    }

    Ok(())
}

/// Apply a `:`-prefixed workspace or runner intent. Returns false on quit.
async fn handle_intent(workspace: &mut Workspace, intent: &str) -> Result<bool> {
    let (verb, rest) = match intent.split_once(' ') {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (intent, ""),
    };
    debug!(verb, rest, "workspace intent");

    match verb {
        "quit" | "q" => return Ok(false),
        "tree" => print_tree(&workspace.tree),
        "toggle" => {
            if !workspace.tree.toggle(&segments(rest)) {
                println!("(no directory at '{}')", rest);
            }
        }
        "touch" | "mkdir" => {
            let kind = if verb == "mkdir" {
                NodeKind::Directory
            } else {
                NodeKind::File
            };
            let path = segments(rest);
            let Some((name, parent)) = path.split_last() else {
                println!("usage: :{} PATH", verb);
                return Ok(true);
            };
            match workspace.tree.create(parent, *name, kind) {
                Ok(_) => print_tree(&workspace.tree),
                Err(e) => println!("error: {}", e),
            }
        }
        "rm" => match workspace.tree.remove(&segments(rest)) {
            Ok(()) => print_tree(&workspace.tree),
            Err(e) => println!("error: {}", e),
        },
        "run" => {
            workspace.session.set_running(true).await;
            // Let the whole feed play out for the demo
            let feed_len = workspace.session.config().run_feed.len() as u32;
            let interval = workspace.session.config().run_feed_interval();
            tokio::time::sleep(interval * feed_len + Duration::from_millis(50)).await;
        }
        "stop" => workspace.session.set_running(false).await,
        other => println!("unknown intent ':{}'", other),
    }

    Ok(true)
}

/// Split a slash-separated path into segments
fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Render the tree as indented rows, marking open/closed directories
fn print_tree(tree: &codedeck::WorkspaceTree) {
    for row in tree.visible_rows() {
        let Some(node) = tree.node(row.id) else { continue };
        let marker = match (node.is_directory(), node.is_open) {
            (true, true) => "v ",
            (true, false) => "> ",
            (false, _) => "  ",
        };
        println!("{}{}{}", "  ".repeat(row.depth), marker, node.name);
    }
}

/// Print log lines newer than `seen`, returning the new high-water mark
async fn print_new_lines(workspace: &Workspace, seen: u64) -> u64 {
    let mut high = seen;
    for line in workspace.session.lines().await {
        if line.id >= seen {
            let prefix = match line.kind {
                LineKind::Input => "",
                LineKind::Output => "",
                LineKind::Error => "! ",
            };
            println!("{}{}", prefix, line.text);
            high = line.id + 1;
        }
    }
    high
}
