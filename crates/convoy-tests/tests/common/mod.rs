//! Shared fixtures: a recording mock runtime and app construction.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use convoy_core::{ContainerRegistry, Result};
use convoy_runtime::{CommandOutcome, ComposeRuntime, LogEvent, LogStreamManager, Verb};
use convoy_tui::{App, Console};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc;

/// Project prefix used by every test app.
pub const TEST_PROJECT: &str = "testproj";

/// Recording stand-in for the compose CLI. Every lifecycle call is
/// logged; exit codes default to 0 and can be overridden per container.
#[derive(Default)]
pub struct MockRuntime {
    calls: Mutex<Vec<(String, Verb)>>,
    exit_codes: Mutex<HashMap<String, i32>>,
    pub ps_output: Mutex<String>,
}

impl MockRuntime {
    /// Make lifecycle commands against `container` exit with `code`.
    pub fn set_exit_code(&self, container: &str, code: i32) {
        self.exit_codes
            .lock()
            .unwrap()
            .insert(container.to_string(), code);
    }

    /// Every lifecycle call so far, in order.
    pub fn calls(&self) -> Vec<(String, Verb)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ComposeRuntime for MockRuntime {
    async fn run(&self, container: &str, verb: Verb) -> Result<CommandOutcome> {
        self.calls
            .lock()
            .unwrap()
            .push((container.to_string(), verb));
        let exit_code = self
            .exit_codes
            .lock()
            .unwrap()
            .get(container)
            .copied()
            .unwrap_or(0);
        Ok(CommandOutcome {
            exit_code,
            output: format!("{verb} {container}\n"),
        })
    }

    async fn ps(&self) -> Result<String> {
        Ok(self.ps_output.lock().unwrap().clone())
    }
}

/// Build an app over the given container names, backed by the mock
/// runtime. Log sessions spawn `echo` instead of a container runtime, so
/// they exit immediately with one output line and code 0.
pub fn test_app(
    names: &[&str],
) -> (App, Arc<MockRuntime>, mpsc::UnboundedReceiver<LogEvent>) {
    let registry =
        ContainerRegistry::from_names(names.iter().map(ToString::to_string).collect());
    let (log_tx, log_rx) = mpsc::unbounded_channel();
    let logs = LogStreamManager::new("echo".to_string(), TEST_PROJECT.to_string(), log_tx);
    let runtime = Arc::new(MockRuntime::default());

    let app = App::new(
        registry,
        runtime.clone(),
        logs,
        Console::new(80),
        "docker-compose".to_string(),
    );
    (app, runtime, log_rx)
}

/// A plain key press.
pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

/// The interrupt chord.
pub fn ctrl_c() -> KeyEvent {
    KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
}

/// Move the app from the startup screen into the main menu without
/// starting anything.
pub async fn enter_main(app: &mut App) {
    for flag in &mut app.startup_selected {
        *flag = false;
    }
    app.handle_key(key(KeyCode::Enter)).await.unwrap();
    assert_eq!(app.mode, convoy_tui::Mode::Main);
}
