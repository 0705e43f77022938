//! Integration tests for terminal session flows
//!
//! End-to-end flows through the session engine under a paused tokio
//! clock: echo/reply ordering across concurrent submissions, the run
//! feed lifecycle, cancellation, and clear semantics. Time is advanced
//! deterministically; no test waits on the wall clock.

use std::time::Duration;

use codedeck::{LineKind, SessionConfig, SessionEngine};

fn quiet_engine() -> SessionEngine {
    SessionEngine::new(SessionConfig {
        banner: Vec::new(),
        ..SessionConfig::default()
    })
}

async fn texts(engine: &SessionEngine) -> Vec<String> {
    engine.lines().await.into_iter().map(|l| l.text).collect()
}

#[tokio::test(start_paused = true)]
async fn test_help_flow_matches_fixture() {
    let engine = quiet_engine();

    engine.submit("help").await;
    tokio::time::sleep(Duration::from_millis(250)).await;

    let lines = engine.lines().await;
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].kind, LineKind::Input);
    assert_eq!(lines[0].text, "$ help");
    assert_eq!(lines[1].kind, LineKind::Output);
    assert_eq!(lines[1].text, engine.config().help_text);
}

#[tokio::test(start_paused = true)]
async fn test_git_flows() {
    let engine = quiet_engine();

    engine.submit("git status").await;
    tokio::time::sleep(Duration::from_millis(250)).await;
    engine.submit("git foo").await;
    tokio::time::sleep(Duration::from_millis(250)).await;

    let lines = engine.lines().await;
    assert_eq!(lines[1].kind, LineKind::Output);
    assert_eq!(lines[1].text, engine.config().git_status);
    assert_eq!(lines[3].kind, LineKind::Error);
    assert_eq!(lines[3].text, "git: 'foo' is not a git command.");
}

#[tokio::test(start_paused = true)]
async fn test_echo_preserves_submitted_text_verbatim() {
    let engine = quiet_engine();

    engine.submit("  PWD  ").await;
    tokio::time::sleep(Duration::from_millis(250)).await;

    let lines = engine.lines().await;
    // Echo keeps the raw text; dispatch matched the trimmed lowercase form
    assert_eq!(lines[0].text, "$   PWD  ");
    assert_eq!(lines[1].text, engine.config().working_dir);
}

#[tokio::test(start_paused = true)]
async fn test_rapid_submissions_interleave_echoes_before_replies() {
    let engine = quiet_engine();

    engine.submit("ls").await;
    tokio::time::sleep(Duration::from_millis(100)).await;
    engine.submit("pwd").await;

    // Both echoes are in the log before either reply has landed
    let lines = texts(&engine).await;
    assert_eq!(lines, vec!["$ ls", "$ pwd"]);

    tokio::time::sleep(Duration::from_millis(300)).await;
    let lines = texts(&engine).await;
    assert_eq!(
        lines,
        vec![
            "$ ls".to_string(),
            "$ pwd".to_string(),
            engine.config().listing.clone(),
            engine.config().working_dir.clone(),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_clear_empties_log_regardless_of_prior_content() {
    let engine = quiet_engine();

    engine.submit("ls").await;
    engine.submit("git foo").await;
    tokio::time::sleep(Duration::from_millis(250)).await;
    assert!(engine.line_count().await > 0);

    engine.clear().await;
    assert_eq!(engine.line_count().await, 0);
}

#[tokio::test(start_paused = true)]
async fn test_reply_scheduled_before_clear_never_lands_after_it() {
    let engine = quiet_engine();

    engine.submit("ls").await;
    // Clear while the reply timer is still pending
    tokio::time::sleep(Duration::from_millis(100)).await;
    engine.clear().await;

    tokio::time::sleep(Duration::from_millis(1000)).await;
    assert_eq!(engine.line_count().await, 0);
}

#[tokio::test(start_paused = true)]
async fn test_run_feed_emits_five_lines_in_order_then_idles() {
    let engine = quiet_engine();

    engine.set_running(true).await;
    tokio::time::sleep(Duration::from_millis(5000)).await;

    let lines = engine.lines().await;
    assert_eq!(
        lines.iter().map(|l| l.text.as_str()).collect::<Vec<_>>(),
        vec![
            "Running main.py...",
            "Hello, World!",
            "What's your name? ",
            "Hello, User!",
            "Process finished with exit code 0",
        ]
    );
    assert!(lines.iter().all(|l| l.kind == LineKind::Output));
    assert!(!engine.is_running().await);

    // No sixth line appears later
    tokio::time::sleep(Duration::from_millis(5000)).await;
    assert_eq!(engine.line_count().await, 5);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_between_ticks_emits_exactly_one_line() {
    let engine = quiet_engine();

    engine.set_running(true).await;
    tokio::time::sleep(Duration::from_millis(1200)).await;
    engine.set_running(false).await;

    tokio::time::sleep(Duration::from_millis(10_000)).await;
    assert_eq!(texts(&engine).await, vec!["Running main.py..."]);
}

#[tokio::test(start_paused = true)]
async fn test_stop_then_restart_runs_a_fresh_feed() {
    let engine = quiet_engine();

    engine.set_running(true).await;
    tokio::time::sleep(Duration::from_millis(1000)).await;
    engine.set_running(false).await;

    engine.set_running(true).await;
    tokio::time::sleep(Duration::from_millis(5000)).await;

    // One line from the cancelled feed, five from the fresh one
    let lines = texts(&engine).await;
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], "Running main.py...");
    assert_eq!(lines[1], "Running main.py...");
    assert_eq!(lines[5], "Process finished with exit code 0");
}

#[tokio::test(start_paused = true)]
async fn test_submissions_interleave_with_running_feed() {
    let engine = quiet_engine();

    engine.set_running(true).await;
    engine.submit("pwd").await;
    tokio::time::sleep(Duration::from_millis(1000)).await;

    // Reply (t=200) lands before the first feed tick (t=800)
    let lines = texts(&engine).await;
    assert_eq!(
        lines,
        vec![
            "$ pwd".to_string(),
            engine.config().working_dir.clone(),
            "Running main.py...".to_string(),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_custom_timing_configuration() {
    let engine = SessionEngine::new(SessionConfig {
        banner: Vec::new(),
        reply_delay_ms: 50,
        run_feed_interval_ms: 100,
        ..SessionConfig::default()
    });

    engine.submit("ls").await;
    engine.set_running(true).await;
    tokio::time::sleep(Duration::from_millis(600)).await;

    // Reply at 50ms, feed lines at 100..500ms
    assert_eq!(engine.line_count().await, 7);
    assert!(!engine.is_running().await);
}
