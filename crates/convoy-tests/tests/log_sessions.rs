//! Log session lifecycle: attachment, ordering, teardown, and late
//! event filtering.
//!
//! Sessions spawn `echo` in place of a container runtime: the follower
//! prints its arguments as one line and exits 0, which is enough to
//! observe line and exit events without a docker daemon.

mod common;

use std::time::Duration;

use common::{TEST_PROJECT, key, test_app};
use convoy_core::{Container, LogColor};
use convoy_runtime::{LogEvent, LogEventKind, LogStreamManager};
use convoy_tui::Event;
use crossterm::event::KeyCode;
use tokio::sync::mpsc;
use tokio::time::timeout;

fn container(name: &str, index: usize) -> Container {
    Container {
        name: name.to_string(),
        index,
        color: LogColor::for_index(index),
    }
}

fn manager() -> (LogStreamManager, mpsc::UnboundedReceiver<LogEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (
        LogStreamManager::new("echo".to_string(), TEST_PROJECT.to_string(), tx),
        rx,
    )
}

async fn next_event(rx: &mut mpsc::UnboundedReceiver<LogEvent>) -> LogEvent {
    timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for log event")
        .expect("log channel closed")
}

/// Attaching over a live session leaves exactly one session, with a
/// fresh id.
#[tokio::test]
async fn attach_replaces_existing_session() {
    let (mut manager, _rx) = manager();
    let web = container("web", 0);

    let first = manager.attach(&web).unwrap();
    let second = manager.attach(&web).unwrap();

    assert_eq!(manager.session_count(), 1);
    assert_ne!(first, second);
    assert_eq!(manager.session_id("web"), Some(second));
    assert!(!manager.is_current("web", first));
    assert!(manager.is_current("web", second));
}

/// A session's exit notification arrives after all of its output lines.
#[tokio::test]
async fn exit_event_follows_output_lines() {
    let (mut manager, mut rx) = manager();
    let web = container("web", 0);
    let id = manager.attach(&web).unwrap();

    let mut saw_line = false;
    loop {
        let event = next_event(&mut rx).await;
        assert_eq!(event.container, "web");
        assert_eq!(event.session, id);
        match event.kind {
            LogEventKind::Line(line) => {
                // echo prints the follower's argv.
                assert!(line.contains("testproj_web_1"), "got {line:?}");
                saw_line = true;
            }
            LogEventKind::Exited(code) => {
                assert_eq!(code, Some(0));
                break;
            }
        }
    }
    assert!(saw_line, "no output line arrived before the exit event");
}

#[tokio::test]
async fn detach_invalidates_the_session() {
    let (mut manager, _rx) = manager();
    let web = container("web", 0);
    let id = manager.attach(&web).unwrap();

    manager.detach("web");

    assert!(!manager.is_attached("web"));
    assert!(!manager.is_current("web", id));
    // Detaching again is a no-op.
    manager.detach("web");
}

/// Events already queued when a session is torn down never reach the
/// console.
#[tokio::test]
async fn late_events_after_detach_are_dropped() {
    let (mut app, _runtime, _log_rx) = test_app(&["web"]);
    let web = app.registry.get(0).unwrap().clone();
    let id = app.logs.attach(&web).unwrap();

    app.logs.detach("web");
    let lines_before = app.console.lines().len();

    let stale = LogEvent {
        container: "web".to_string(),
        session: id,
        kind: LogEventKind::Line("should never appear".to_string()),
    };
    app.on_event(Event::Log(stale)).await.unwrap();

    assert_eq!(app.console.lines().len(), lines_before);
}

/// An exited session is marked inactive but stays tracked until it is
/// detached or re-attached.
#[tokio::test]
async fn exited_session_stays_tracked_as_inactive() {
    let (mut app, _runtime, mut log_rx) = test_app(&["web"]);
    app.handle_key(key(KeyCode::Enter)).await.unwrap();
    assert!(app.logs.is_active("web"));

    loop {
        let event = next_event(&mut log_rx).await;
        let exited = matches!(event.kind, LogEventKind::Exited(_));
        app.on_event(Event::Log(event)).await.unwrap();
        if exited {
            break;
        }
    }

    assert!(app.logs.is_attached("web"));
    assert!(!app.logs.is_active("web"));
    let text: String = app
        .console
        .lines()
        .iter()
        .map(|l| l.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    assert!(text.contains("exited with code 0"), "got {text:?}");
}

#[tokio::test]
async fn shutdown_clears_every_session() {
    let (mut manager, _rx) = manager();
    manager.attach(&container("web", 0)).unwrap();
    manager.attach(&container("db", 1)).unwrap();
    assert_eq!(manager.session_count(), 2);

    manager.shutdown();

    assert_eq!(manager.session_count(), 0);
}
