//! Follow-mode log streaming, one session per running container.

use std::collections::HashMap;
use std::process::Stdio;

use convoy_core::{Container, Error, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// One event from a log-follow subprocess.
#[derive(Debug, Clone)]
pub struct LogEvent {
    /// Container the event belongs to.
    pub container: String,
    /// Session that produced it; consumers drop events whose session is
    /// no longer current.
    pub session: Uuid,
    pub kind: LogEventKind,
}

/// What a log session produced.
#[derive(Debug, Clone)]
pub enum LogEventKind {
    /// One line of container output (stdout or stderr).
    Line(String),
    /// The follow subprocess exited. Always delivered after every line
    /// the session produced.
    Exited(Option<i32>),
}

/// A live log-follow subprocess for one container.
struct LogSession {
    id: Uuid,
    reader: JoinHandle<()>,
    active: bool,
}

/// Owns every log-follow subprocess and forwards their output as
/// [`LogEvent`]s over a single channel.
///
/// At most one session exists per container; attaching over a live
/// session tears the old one down first.
pub struct LogStreamManager {
    runtime_bin: String,
    project: String,
    tx: mpsc::UnboundedSender<LogEvent>,
    sessions: HashMap<String, LogSession>,
}

impl LogStreamManager {
    #[must_use]
    pub fn new(runtime_bin: String, project: String, tx: mpsc::UnboundedSender<LogEvent>) -> Self {
        Self {
            runtime_bin,
            project,
            tx,
            sessions: HashMap::new(),
        }
    }

    /// Start following a container's logs, replacing any existing session.
    ///
    /// # Errors
    ///
    /// Returns an error when the follow subprocess cannot be spawned; no
    /// session is registered in that case.
    pub fn attach(&mut self, container: &Container) -> Result<Uuid> {
        self.detach(&container.name);

        let qualified = container.qualified_name(&self.project);
        let mut child = Command::new(&self.runtime_bin)
            .args(["logs", "-f", &qualified])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| Error::Runtime(format!("failed to follow logs for {qualified}: {e}")))?;

        let id = Uuid::new_v4();
        let name = container.name.clone();
        let tx = self.tx.clone();

        let stdout = child.stdout.take().expect("stdout is piped");
        let stderr = child.stderr.take().expect("stderr is piped");

        // The reader task owns the child; aborting it drops (and thereby
        // kills) the subprocess without waiting on it.
        let reader = tokio::spawn(async move {
            let mut out_lines = BufReader::new(stdout).lines();
            let mut err_lines = BufReader::new(stderr).lines();
            let mut out_open = true;
            let mut err_open = true;

            while out_open || err_open {
                tokio::select! {
                    line = out_lines.next_line(), if out_open => match line {
                        Ok(Some(line)) => {
                            let _ = tx.send(LogEvent {
                                container: name.clone(),
                                session: id,
                                kind: LogEventKind::Line(line),
                            });
                        }
                        Ok(None) => out_open = false,
                        Err(e) => {
                            tracing::error!(container = %name, "log stream error: {e}");
                            out_open = false;
                        }
                    },
                    line = err_lines.next_line(), if err_open => match line {
                        Ok(Some(line)) => {
                            let _ = tx.send(LogEvent {
                                container: name.clone(),
                                session: id,
                                kind: LogEventKind::Line(line),
                            });
                        }
                        Ok(None) => err_open = false,
                        Err(e) => {
                            tracing::error!(container = %name, "log stream error: {e}");
                            err_open = false;
                        }
                    },
                }
            }

            let code = match child.wait().await {
                Ok(status) => status.code(),
                Err(e) => {
                    tracing::error!(container = %name, "failed to reap log follower: {e}");
                    None
                }
            };
            let _ = tx.send(LogEvent {
                container: name,
                session: id,
                kind: LogEventKind::Exited(code),
            });
        });

        self.sessions.insert(
            container.name.clone(),
            LogSession {
                id,
                reader,
                active: true,
            },
        );

        Ok(id)
    }

    /// Stop following a container's logs. No-op when no session exists.
    ///
    /// Termination of the underlying subprocess is requested but not
    /// awaited.
    pub fn detach(&mut self, container: &str) {
        if let Some(session) = self.sessions.remove(container) {
            session.reader.abort();
        }
    }

    /// Whether an event from the given session should still be surfaced.
    ///
    /// False once the session has been detached or replaced, so queued
    /// events from a torn-down follower are dropped rather than logged.
    #[must_use]
    pub fn is_current(&self, container: &str, session: Uuid) -> bool {
        self.sessions
            .get(container)
            .is_some_and(|s| s.id == session)
    }

    /// Record that a session's subprocess exited. The session stays
    /// tracked until detached or re-attached.
    pub fn mark_exited(&mut self, container: &str, session: Uuid) {
        if let Some(s) = self.sessions.get_mut(container) {
            if s.id == session {
                s.active = false;
            }
        }
    }

    /// Whether a session (live or exited) is tracked for this container.
    #[must_use]
    pub fn is_attached(&self, container: &str) -> bool {
        self.sessions.contains_key(container)
    }

    /// Whether a tracked session is still live (its subprocess has not
    /// reported exit).
    #[must_use]
    pub fn is_active(&self, container: &str) -> bool {
        self.sessions.get(container).is_some_and(|s| s.active)
    }

    /// Current session id for a container, if one is tracked.
    #[must_use]
    pub fn session_id(&self, container: &str) -> Option<Uuid> {
        self.sessions.get(container).map(|s| s.id)
    }

    /// Number of tracked sessions.
    #[must_use]
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Tear down every session. Called on quit so no follower outlives
    /// the dashboard.
    pub fn shutdown(&mut self) {
        for (_, session) in self.sessions.drain() {
            session.reader.abort();
        }
    }
}

impl Drop for LogStreamManager {
    fn drop(&mut self) {
        self.shutdown();
    }
}
