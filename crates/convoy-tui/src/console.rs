//! The shared output surface: a scrolling log region plus a pinned
//! status bar.
//!
//! Every user-visible line goes through here; no other component writes
//! terminal output. Rendering only reads this state.

use std::collections::VecDeque;

use convoy_core::LogColor;
use ratatui::text::Line;

/// Scrollback cap; oldest lines are evicted past this.
const MAX_SCROLLBACK: usize = 2000;

/// One line in the scrolling region, optionally attributed to a
/// container with its display color.
#[derive(Debug, Clone)]
pub struct ConsoleLine {
    pub prefix: Option<(String, LogColor)>,
    pub text: String,
}

/// Append-only scrolling log plus the pinned bottom bar.
pub struct Console {
    lines: VecDeque<ConsoleLine>,
    status: Vec<Line<'static>>,
    border: String,
    width: u16,
}

impl Console {
    #[must_use]
    pub fn new(width: u16) -> Self {
        Self {
            lines: VecDeque::new(),
            status: Vec::new(),
            border: "=".repeat(width as usize),
            width,
        }
    }

    /// Append an unattributed line to the scrolling region.
    pub fn log(&mut self, text: impl Into<String>) {
        self.push(ConsoleLine {
            prefix: None,
            text: text.into(),
        });
    }

    /// Append a line attributed to a container, prefixed with its name in
    /// the container's color.
    pub fn log_for(&mut self, container: &str, color: LogColor, text: impl Into<String>) {
        self.push(ConsoleLine {
            prefix: Some((container.to_string(), color)),
            text: text.into(),
        });
    }

    /// Replace the pinned status bar's contents.
    pub fn set_status(&mut self, status: Vec<Line<'static>>) {
        self.status = status;
    }

    /// Recompute the horizontal border for a new terminal width. The
    /// scrolling region is left untouched; previously logged lines are
    /// not reflowed.
    pub fn resize(&mut self, width: u16) {
        self.width = width;
        self.border = "=".repeat(width as usize);
    }

    #[must_use]
    pub fn lines(&self) -> &VecDeque<ConsoleLine> {
        &self.lines
    }

    #[must_use]
    pub fn status(&self) -> &[Line<'static>] {
        &self.status
    }

    #[must_use]
    pub fn border(&self) -> &str {
        &self.border
    }

    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    fn push(&mut self, line: ConsoleLine) {
        if self.lines.len() == MAX_SCROLLBACK {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }
}
