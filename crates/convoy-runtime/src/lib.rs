//! Container runtime integration for convoy.
//!
//! This crate drives the runtime's command-line interface: one-shot
//! lifecycle commands, follow-mode log streaming, and process listing.
//! Nothing here touches the terminal; results flow back as values and
//! events.

mod logs;
mod ps;
mod runner;

pub use logs::{LogEvent, LogEventKind, LogStreamManager};
pub use ps::condense_ps;
pub use runner::{CliRuntime, CommandOutcome, ComposeRuntime, Verb};
