//! Application state and keyboard routing.

use std::sync::Arc;

use anyhow::Result;
use convoy_core::{Container, ContainerRegistry};
use convoy_runtime::{
    CommandOutcome, ComposeRuntime, LogEvent, LogEventKind, LogStreamManager, Verb, condense_ps,
};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;

use crate::console::Console;
use crate::event::{Event, EventHandler};
use crate::ui;

/// Which screen owns the keyboard.
///
/// Exactly one mode is active at a time; key dispatch is a single match
/// on this value, so a key can never be interpreted by two modes at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Pick which containers to start before entering the dashboard.
    Startup,
    /// Main command menu.
    Main,
    /// Condensed process listing; only `b` is live.
    ProcessList,
    /// Waiting for a numeric container selection for the given verb.
    Select(Verb),
}

/// Application state.
pub struct App {
    /// Is the application running
    pub running: bool,
    /// Current input mode
    pub mode: Mode,
    /// Ordered containers under management
    pub registry: ContainerRegistry,
    /// Lifecycle command executor
    runtime: Arc<dyn ComposeRuntime>,
    /// Live log sessions
    pub logs: LogStreamManager,
    /// The shared output surface
    pub console: Console,
    /// Lifecycle binary name, echoed in attempt messages
    compose_bin: String,
    /// Condensed `ps` output captured on entering the process list
    pub ps_snapshot: String,
    /// Cursor position on the startup screen
    pub startup_cursor: usize,
    /// Startup checkbox per container, all pre-selected
    pub startup_selected: Vec<bool>,
}

impl App {
    #[must_use]
    pub fn new(
        registry: ContainerRegistry,
        runtime: Arc<dyn ComposeRuntime>,
        logs: LogStreamManager,
        console: Console,
        compose_bin: String,
    ) -> Self {
        let selected = vec![true; registry.len()];
        Self {
            running: true,
            mode: Mode::Startup,
            registry,
            runtime,
            logs,
            console,
            compose_bin,
            ps_snapshot: String::new(),
            startup_cursor: 0,
            startup_selected: selected,
        }
    }

    /// Run the main application loop.
    ///
    /// Events are processed strictly one at a time; every handler runs to
    /// completion before the next event is looked at.
    ///
    /// # Errors
    ///
    /// Returns an error if drawing or event delivery fails.
    pub async fn run<B: Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
        events: &mut EventHandler,
    ) -> Result<()> {
        self.refresh_status();
        while self.running {
            terminal.draw(|frame| ui::render(frame, self))?;
            let event = events.next().await?;
            self.on_event(event).await?;
        }
        Ok(())
    }

    /// Apply a single event to the application state.
    ///
    /// # Errors
    ///
    /// Propagates key-handler failures.
    pub async fn on_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Tick => {}
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key).await?,
            Event::Key(_) => {}
            Event::Resize(width, _) => self.console.resize(width),
            Event::Log(event) => self.handle_log(event),
        }
        Ok(())
    }

    /// Route one key press according to the current mode.
    ///
    /// # Errors
    ///
    /// Returns an error only on internal channel failures; lifecycle
    /// command failures are logged, never propagated.
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // The interrupt chord quits from any mode.
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit();
            return Ok(());
        }

        match self.mode {
            Mode::Startup => self.handle_startup_key(key.code).await,
            Mode::Main => self.handle_main_key(key.code).await,
            Mode::ProcessList => {
                self.handle_process_list_key(key.code);
                Ok(())
            }
            Mode::Select(verb) => self.handle_select_key(verb, key.code).await,
        }
    }

    /// Surface a log-session event, unless its session has been torn
    /// down in the meantime.
    fn handle_log(&mut self, event: LogEvent) {
        if !self.logs.is_current(&event.container, event.session) {
            // Late arrival from a detached session: dropped, not logged.
            return;
        }
        let Some(container) = self.registry.by_name(&event.container) else {
            return;
        };
        let (name, color) = (container.name.clone(), container.color);

        match event.kind {
            LogEventKind::Line(text) => self.console.log_for(&name, color, text),
            LogEventKind::Exited(code) => {
                let code = code.map_or_else(|| "unknown".to_string(), |c| c.to_string());
                self.console
                    .log_for(&name, color, format!("exited with code {code}"));
                self.logs.mark_exited(&event.container, event.session);
            }
        }
    }

    async fn handle_startup_key(&mut self, code: KeyCode) -> Result<()> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit(),
            KeyCode::Up | KeyCode::Char('k') => {
                self.startup_cursor = self.startup_cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let max = self.registry.len().saturating_sub(1);
                self.startup_cursor = (self.startup_cursor + 1).min(max);
            }
            KeyCode::Char(' ') => {
                if let Some(flag) = self.startup_selected.get_mut(self.startup_cursor) {
                    *flag = !*flag;
                }
            }
            KeyCode::Char('a') => self.startup_selected.fill(true),
            KeyCode::Enter => self.launch_selected().await?,
            _ => {}
        }
        Ok(())
    }

    /// Start every checked container in registry order and open its log
    /// session, then drop into the main menu.
    async fn launch_selected(&mut self) -> Result<()> {
        let chosen: Vec<Container> = self
            .registry
            .iter()
            .zip(self.startup_selected.iter())
            .filter(|(_, selected)| **selected)
            .map(|(container, _)| container.clone())
            .collect();

        for container in chosen {
            self.console
                .log_for(&container.name, container.color, "Spinning up...");
            match self.runtime.run(&container.name, Verb::Start).await {
                Ok(outcome) if !outcome.success() => {
                    self.log_outcome(&container, Verb::Start, &outcome);
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(container = %container.name, "start failed: {e}");
                    self.console.log(e.to_string());
                }
            }
            if let Err(e) = self.logs.attach(&container) {
                self.console.log(e.to_string());
            }
        }

        self.set_mode(Mode::Main);
        Ok(())
    }

    async fn handle_main_key(&mut self, code: KeyCode) -> Result<()> {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit(),
            KeyCode::Char('p') => {
                self.ps_snapshot = match self.runtime.ps().await {
                    Ok(raw) => condense_ps(&raw),
                    Err(e) => format!("process list unavailable: {e}"),
                };
                self.set_mode(Mode::ProcessList);
            }
            KeyCode::Char('r') => self.set_mode(Mode::Select(Verb::Restart)),
            KeyCode::Char('s') => self.set_mode(Mode::Select(Verb::Stop)),
            KeyCode::Char('t') => self.set_mode(Mode::Select(Verb::Start)),
            KeyCode::Char('l') => self.set_mode(Mode::Select(Verb::Build)),
            KeyCode::Char('m') => self.set_mode(Mode::Select(Verb::Remove)),
            KeyCode::Char('k') => self.set_mode(Mode::Select(Verb::Kill)),
            _ => {}
        }
        Ok(())
    }

    fn handle_process_list_key(&mut self, code: KeyCode) {
        // Digits and menu keys have no effect here.
        if code == KeyCode::Char('b') {
            self.set_mode(Mode::Main);
        }
    }

    async fn handle_select_key(&mut self, verb: Verb, code: KeyCode) -> Result<()> {
        match code {
            KeyCode::Char('b') => self.set_mode(Mode::Main),
            KeyCode::Char(c) if c.is_ascii_digit() => {
                let index = usize::from(c as u8 - b'0');
                self.run_on_selection(verb, index).await?;
            }
            _ => {}
        }
        Ok(())
    }

    /// Apply a lifecycle verb to the container at the selected index.
    ///
    /// The command is awaited inline: input routing blocks until it
    /// returns, which is acceptable because lifecycle commands complete
    /// quickly.
    async fn run_on_selection(&mut self, verb: Verb, index: usize) -> Result<()> {
        // Out-of-range digits are consumed but select nothing.
        let Some(container) = self.registry.get(index).cloned() else {
            return Ok(());
        };

        self.logs.detach(&container.name);
        self.console.log(format!(
            "Attempting to execute {} {} {}",
            self.compose_bin,
            verb.as_args().join(" "),
            container.name
        ));

        match self.runtime.run(&container.name, verb).await {
            Ok(outcome) => {
                self.log_outcome(&container, verb, &outcome);
                if matches!(verb, Verb::Start | Verb::Restart) && outcome.success() {
                    if let Err(e) = self.logs.attach(&container) {
                        self.console
                            .log_for(&container.name, container.color, e.to_string());
                    }
                }
            }
            Err(e) => {
                tracing::warn!(container = %container.name, %verb, "command failed: {e}");
                self.console.log(e.to_string());
            }
        }
        Ok(())
    }

    fn log_outcome(&mut self, container: &Container, verb: Verb, outcome: &CommandOutcome) {
        for line in outcome.output.lines().filter(|l| !l.trim().is_empty()) {
            self.console.log_for(&container.name, container.color, line);
        }
        self.console.log_for(
            &container.name,
            container.color,
            format!("{verb} exited with code {}", outcome.exit_code),
        );
    }

    /// Switch modes; the status bar always changes with the handler set.
    fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.refresh_status();
    }

    fn refresh_status(&mut self) {
        let status = match self.mode {
            // The startup screen renders its own layout.
            Mode::Startup => Vec::new(),
            Mode::Main => ui::menus::main_menu(),
            Mode::ProcessList => ui::menus::process_list(&self.ps_snapshot),
            Mode::Select(verb) => ui::menus::selection_menu(&self.registry, verb),
        };
        self.console.set_status(status);
    }

    /// Tear down every log session and leave the event loop.
    fn quit(&mut self) {
        self.logs.shutdown();
        self.running = false;
    }
}
