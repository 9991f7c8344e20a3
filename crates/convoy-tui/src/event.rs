use anyhow::Result;
use convoy_runtime::LogEvent;
use crossterm::event::{Event as CrosstermEvent, KeyEvent};
use futures::StreamExt;
use std::time::Duration;
use tokio::sync::mpsc;

/// Terminal and subprocess events, funneled into one queue.
#[derive(Debug, Clone)]
pub enum Event {
    /// Terminal tick (for periodic redraws)
    Tick,
    /// Key press event
    Key(KeyEvent),
    /// Terminal resize
    Resize(u16, u16),
    /// Output or exit notification from a log session
    Log(LogEvent),
}

/// Event handler for async event processing.
///
/// One spawned task merges keyboard/resize events, the tick interval,
/// and log-session events into a single channel, so the consumer sees a
/// strictly serialized stream and handlers never run concurrently.
#[derive(Debug)]
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    _tx: mpsc::UnboundedSender<Event>,
}

impl EventHandler {
    /// Create a new event handler with the specified tick rate, draining
    /// log events from the given channel.
    #[must_use]
    pub fn new(tick_rate: Duration, mut log_rx: mpsc::UnboundedReceiver<LogEvent>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let _tx = tx.clone();

        tokio::spawn(async move {
            let mut reader = crossterm::event::EventStream::new();
            let mut tick = tokio::time::interval(tick_rate);
            let mut logs_open = true;

            loop {
                let tick_delay = tick.tick();
                let crossterm_event = reader.next();

                tokio::select! {
                    _ = tick_delay => {
                        if tx.send(Event::Tick).is_err() {
                            break;
                        }
                    }
                    Some(Ok(evt)) = crossterm_event => {
                        let event = match evt {
                            CrosstermEvent::Key(key) => Event::Key(key),
                            CrosstermEvent::Resize(w, h) => Event::Resize(w, h),
                            _ => continue,
                        };
                        if tx.send(event).is_err() {
                            break;
                        }
                    }
                    log = log_rx.recv(), if logs_open => match log {
                        Some(event) => {
                            if tx.send(Event::Log(event)).is_err() {
                                break;
                            }
                        }
                        None => logs_open = false,
                    },
                }
            }
        });

        Self { rx, _tx }
    }

    /// Receive the next event
    ///
    /// # Errors
    ///
    /// Returns an error if the channel is closed
    pub async fn next(&mut self) -> Result<Event> {
        self.rx
            .recv()
            .await
            .ok_or_else(|| anyhow::anyhow!("Event channel closed"))
    }
}
