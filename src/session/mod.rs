//! Terminal Session Engine
//!
//! Stateful simulated terminal session: owns the append-only scrollback
//! log, interprets submitted commands against the dispatch table, and runs
//! one independent timed output stream (the run feed) gated by a
//! start/stop signal.
//!
//! All state lives behind one async mutex, so every mutation (echo,
//! scripted reply, feed tick, clear) is atomic and no caller ever
//! observes a half-applied step. Deferred work (reply timers,
//! feed ticks) re-validates its epoch or generation under that same lock
//! before appending, which makes cancellation race-free: once a stop or a
//! clear has been applied, a stale timer can never land a line.

pub mod dispatch;

pub use dispatch::{dispatch, CommandOutcome};

use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::config::SessionConfig;
use crate::models::{Line, LineKind};

/// Mutable session state guarded by the engine's mutex
#[derive(Debug, Default)]
struct SessionInner {
    /// Append-only scrollback log
    log: Vec<Line>,
    /// Next line id; never reset, so ids stay strictly increasing
    next_line_id: u64,
    /// Partially typed, not yet submitted input
    pending_input: String,
    /// Whether a run feed is currently active
    running: bool,
    /// Bumped on every feed start/stop; stale feed tasks see a mismatch
    run_generation: u64,
    /// Bumped on every clear; stale reply timers see a mismatch
    reply_epoch: u64,
}

impl SessionInner {
    /// Append a line and return its id
    fn append(&mut self, kind: LineKind, text: impl Into<String>) -> u64 {
        let id = self.next_line_id;
        self.next_line_id += 1;
        self.log.push(Line::new(id, kind, text));
        id
    }
}

/// Stateful terminal session with scripted command replies and a run feed
pub struct SessionEngine {
    /// Session identifier
    id: String,
    /// Fixture content and timing
    config: SessionConfig,
    /// Shared mutable state
    inner: Arc<Mutex<SessionInner>>,
}

impl SessionEngine {
    /// Create a new session, seeding the log with the configured banner
    pub fn new(config: SessionConfig) -> Self {
        let mut inner = SessionInner::default();
        for line in &config.banner {
            inner.append(LineKind::Output, line.clone());
        }

        let id = Uuid::new_v4().to_string();
        info!(session = %id, "terminal session created");

        Self {
            id,
            config,
            inner: Arc::new(Mutex::new(inner)),
        }
    }

    /// Session identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Session configuration
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Submit a command line.
    ///
    /// The input echo (`<marker> <raw>`, raw text verbatim) is appended
    /// before this call returns and the pending-input buffer is cleared.
    /// The resolved reply is appended by an independent one-shot timer
    /// after the configured reply delay; replies from concurrent
    /// submissions are deliberately not serialized against each other,
    /// so two echoes may precede both replies.
    pub async fn submit(&self, raw: &str) {
        let outcome = dispatch(raw, &self.config);
        debug!(session = %self.id, input = raw, ?outcome, "command submitted");

        let mut inner = self.inner.lock().await;
        inner.pending_input.clear();
        inner.append(
            LineKind::Input,
            format!("{} {}", self.config.prompt_marker, raw),
        );

        match outcome {
            CommandOutcome::ClearLog => {
                // Immediate reset: the echo above goes with everything else,
                // and replies already in flight are dropped with it.
                inner.log.clear();
                inner.reply_epoch += 1;
            }
            CommandOutcome::Reply { kind, text } => {
                let epoch = inner.reply_epoch;
                drop(inner);

                let delay = self.config.reply_delay();
                let shared = Arc::clone(&self.inner);
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let mut inner = shared.lock().await;
                    // A clear since scheduling drops this reply
                    if inner.reply_epoch == epoch {
                        inner.append(kind, text);
                    }
                });
            }
        }
    }

    /// Start or stop the run feed.
    ///
    /// Starting while idle spawns a feed that appends the configured lines
    /// one per tick and then returns the session to idle by itself; the
    /// caller does not need to hold the flag. Starting while running is a
    /// no-op. Stopping cancels every remaining tick; lines already
    /// appended remain.
    pub async fn set_running(&self, running: bool) {
        let mut inner = self.inner.lock().await;

        if !running {
            if inner.running {
                inner.running = false;
                inner.run_generation += 1;
                debug!(session = %self.id, "run feed cancelled");
            }
            return;
        }

        if inner.running {
            debug!(session = %self.id, "run feed already active, ignoring start");
            return;
        }

        inner.running = true;
        inner.run_generation += 1;
        let generation = inner.run_generation;
        drop(inner);

        debug!(session = %self.id, generation, "run feed started");
        let interval = self.config.run_feed_interval();
        let feed = self.config.run_feed.clone();
        let shared = Arc::clone(&self.inner);
        tokio::spawn(async move {
            for text in feed {
                tokio::time::sleep(interval).await;
                let mut inner = shared.lock().await;
                if !inner.running || inner.run_generation != generation {
                    return;
                }
                inner.append(LineKind::Output, text);
            }

            // Feed exhausted: back to idle, unless a newer feed took over
            let mut inner = shared.lock().await;
            if inner.run_generation == generation {
                inner.running = false;
            }
        });
    }

    /// Empty the log and the pending-input buffer immediately.
    ///
    /// Pending reply timers are dropped with the log; an in-progress run
    /// feed keeps its schedule and keeps appending.
    pub async fn clear(&self) {
        let mut inner = self.inner.lock().await;
        inner.log.clear();
        inner.pending_input.clear();
        inner.reply_epoch += 1;
        debug!(session = %self.id, "log cleared");
    }

    /// Snapshot of the current log in emission order
    pub async fn lines(&self) -> Vec<Line> {
        self.inner.lock().await.log.clone()
    }

    /// Number of lines currently in the log
    pub async fn line_count(&self) -> usize {
        self.inner.lock().await.log.len()
    }

    /// Whether a run feed is currently active
    pub async fn is_running(&self) -> bool {
        self.inner.lock().await.running
    }

    /// The partially typed, not yet submitted input
    pub async fn pending_input(&self) -> String {
        self.inner.lock().await.pending_input.clone()
    }

    /// Replace the pending-input buffer (the caller's input box state)
    pub async fn set_pending_input(&self, text: impl Into<String>) {
        self.inner.lock().await.pending_input = text.into();
    }
}

impl Default for SessionEngine {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
