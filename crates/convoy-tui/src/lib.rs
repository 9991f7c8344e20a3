//! Terminal user interface for convoy.
//!
//! Owns the terminal for the life of the dashboard: raw mode and the
//! alternate screen are entered on launch and restored on the way out,
//! including the error path.

pub mod app;
pub mod console;
pub mod event;
pub mod ui;

pub use app::{App, Mode};
pub use console::{Console, ConsoleLine};
pub use event::{Event, EventHandler};

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use convoy_core::{ContainerRegistry, Settings};
use convoy_runtime::{CliRuntime, LogStreamManager};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;

/// Tick rate for periodic redraws.
const TICK_RATE: Duration = Duration::from_millis(100);

/// Launch the dashboard and block until the operator quits.
///
/// # Errors
///
/// Returns an error when the terminal cannot be configured or the event
/// loop fails.
pub async fn run(settings: &Settings, registry: ContainerRegistry) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (log_tx, log_rx) = mpsc::unbounded_channel();
    let logs = LogStreamManager::new(
        settings.runtime_bin.clone(),
        settings.project_prefix(),
        log_tx,
    );
    let runtime = Arc::new(CliRuntime::new(
        settings.compose_bin.clone(),
        settings.runtime_bin.clone(),
    ));

    let width = terminal.size()?.width;
    let mut app = App::new(
        registry,
        runtime,
        logs,
        Console::new(width),
        settings.compose_bin.clone(),
    );
    let mut events = EventHandler::new(TICK_RATE, log_rx);

    let result = app.run(&mut terminal, &mut events).await;

    // Restore the terminal even when the loop failed.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}
