//! One-shot lifecycle commands against the compose CLI.

use std::fmt;
use std::process::Stdio;

use async_trait::async_trait;
use convoy_core::{Error, Result};
use tokio::process::Command;

/// Lifecycle commands that can be applied to a single container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Start,
    Stop,
    Restart,
    Build,
    Remove,
    Kill,
}

impl Verb {
    /// CLI arguments for this verb, passed before the container name.
    #[must_use]
    pub const fn as_args(self) -> &'static [&'static str] {
        match self {
            Verb::Start => &["start"],
            Verb::Stop => &["stop"],
            Verb::Restart => &["restart"],
            Verb::Build => &["build"],
            Verb::Remove => &["rm", "-f"],
            Verb::Kill => &["kill"],
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Verb::Start => "start",
            Verb::Stop => "stop",
            Verb::Restart => "restart",
            Verb::Build => "build",
            Verb::Remove => "remove",
            Verb::Kill => "kill",
        };
        write!(f, "{name}")
    }
}

/// Result of a completed lifecycle command.
///
/// A nonzero exit code is not an error at this layer; it is surfaced to
/// the operator and the command is not retried.
#[derive(Debug, Clone)]
pub struct CommandOutcome {
    /// Process exit code, -1 when terminated by signal.
    pub exit_code: i32,
    /// Combined stdout and stderr.
    pub output: String,
}

impl CommandOutcome {
    #[must_use]
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Interface to the compose-style container runtime.
///
/// The dashboard only ever needs these two entry points; keeping them
/// behind a trait lets tests substitute a recording fake.
#[async_trait]
pub trait ComposeRuntime: Send + Sync {
    /// Run a lifecycle command against a named container and wait for it.
    ///
    /// # Errors
    ///
    /// Returns an error only when the command cannot be spawned. A
    /// command that runs and exits nonzero is a normal [`CommandOutcome`].
    async fn run(&self, container: &str, verb: Verb) -> Result<CommandOutcome>;

    /// Capture the runtime's raw process listing.
    ///
    /// # Errors
    ///
    /// Returns an error when the listing command cannot be spawned.
    async fn ps(&self) -> Result<String>;
}

/// [`ComposeRuntime`] implementation that shells out to the CLI binaries.
#[derive(Debug, Clone)]
pub struct CliRuntime {
    compose_bin: String,
    runtime_bin: String,
}

impl CliRuntime {
    #[must_use]
    pub const fn new(compose_bin: String, runtime_bin: String) -> Self {
        Self {
            compose_bin,
            runtime_bin,
        }
    }
}

#[async_trait]
impl ComposeRuntime for CliRuntime {
    async fn run(&self, container: &str, verb: Verb) -> Result<CommandOutcome> {
        let mut cmd = Command::new(&self.compose_bin);
        cmd.args(verb.as_args())
            .arg(container)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        tracing::debug!(%verb, container, "running lifecycle command");

        let output = cmd
            .output()
            .await
            .map_err(|e| Error::Runtime(format!("failed to spawn {}: {e}", self.compose_bin)))?;

        Ok(CommandOutcome {
            exit_code: output.status.code().unwrap_or(-1),
            output: format!(
                "{}{}",
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            ),
        })
    }

    async fn ps(&self) -> Result<String> {
        let output = Command::new(&self.runtime_bin)
            .arg("ps")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| Error::Runtime(format!("failed to spawn {}: {e}", self.runtime_bin)))?;

        if !output.status.success() {
            return Err(Error::Runtime(
                String::from_utf8_lossy(&output.stderr).to_string(),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}
