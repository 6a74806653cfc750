//! Event bus for testgen.
//!
//! All user input, timer ticks, API completions, and history-store
//! confirmations are normalised into a single `AppEvent` enum and sent over
//! a tokio unbounded MPSC channel. The main loop receives from this channel
//! and dispatches accordingly.
//!
//! Two independent intervals drive the render and logic cycles:
//! - **Render interval** (33 ms ≈ 30 FPS) — triggers a `terminal.draw()` call.
//! - **Tick interval** (250 ms = 4 Hz) — drives notice expiry and the
//!   analytics auto-refresh countdown.
//!
//! Keeping them independent allows tuning render frequency without touching
//! logic frequency, and vice-versa.

use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind, MouseEvent};
use futures::{FutureExt, StreamExt};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

use crate::api::types::ApiResult;

/// All events the application can receive from any source.
///
/// Marked `#[non_exhaustive]` so new sources (e.g. a config-file watcher)
/// can add variants without breaking exhaustive matches in handlers.
#[derive(Debug)]
#[non_exhaustive]
pub enum AppEvent {
    /// A key press from the terminal (`KeyEventKind::Press` only).
    ///
    /// Release and repeat events are filtered in [`spawn_event_task`] to
    /// avoid double-firing on Windows, which synthesises both press and
    /// release for every keystroke.
    Key(KeyEvent),
    /// A mouse event from the terminal (click, scroll, move).
    Mouse(MouseEvent),
    /// Terminal was resized to (columns, rows).
    Resize(u16, u16),
    /// Logic tick for state updates (4 Hz / 250 ms).
    Tick,
    /// Render tick — triggers a `terminal.draw()` call (≈30 FPS / 33 ms).
    Render,
    /// A backend call finished; boxed because generation payloads are large.
    Api(Box<ApiResult>),
    /// A generated suite landed in the local history store. Carries the row
    /// id the commit path needs for `mark_committed`.
    HistoryRecorded { id: String },
    /// Quit signal (from the quit keys or SIGTERM).
    Quit,
}

/// Holds the sender and receiver ends of the unified event channel.
///
/// The sender (`tx`) is cloned and distributed to background tasks;
/// the receiver (`rx`) is owned by the main event loop.
pub struct EventHandler {
    /// Send half — clone this for each background task that produces events.
    pub tx: mpsc::UnboundedSender<AppEvent>,
    /// Receive half — owned by the main loop.
    pub rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventHandler {
    /// Creates a new `EventHandler` with a fresh unbounded channel.
    ///
    /// Unbounded is appropriate: terminal events and timers arrive at a
    /// bounded hardware rate, API completions at network rate, and the main
    /// loop always keeps up. Swap to a bounded channel only if backpressure
    /// ever becomes a measurable problem.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawns the background tokio task that drives the unified event channel.
///
/// The task runs until the receiver is dropped. Two fully independent
/// `tokio::time::interval` timers drive the render and logic cycles;
/// crossterm input is polled via `EventStream`.
///
/// # Key implementation choices
///
/// - `reader.next().fuse()` — if the crossterm stream terminates
///   unexpectedly, `tokio::select!` must not keep polling a completed
///   future (which would panic).
/// - `KeyEventKind::Press` filter — Windows fires both `Press` and
///   `Release` for every keystroke; without the filter every key appears
///   twice.
/// - Send errors are silently ignored (`let _ = tx.send(…)`) — a dropped
///   receiver means shutdown, and the task exits on the next iteration.
pub fn spawn_event_task(tx: mpsc::UnboundedSender<AppEvent>) {
    tokio::spawn(async move {
        let mut tick_interval = interval(Duration::from_millis(250));
        let mut render_interval = interval(Duration::from_millis(33));
        let mut reader = EventStream::new();

        loop {
            let tick_tick = tick_interval.tick();
            let render_tick = render_interval.tick();
            let crossterm_event = reader.next().fuse();

            tokio::select! {
                _ = tick_tick => {
                    let _ = tx.send(AppEvent::Tick);
                }
                _ = render_tick => {
                    let _ = tx.send(AppEvent::Render);
                }
                maybe_event = crossterm_event => {
                    match maybe_event {
                        Some(Ok(Event::Key(key))) => {
                            if key.kind == KeyEventKind::Press {
                                let _ = tx.send(AppEvent::Key(key));
                            }
                        }
                        Some(Ok(Event::Resize(w, h))) => {
                            let _ = tx.send(AppEvent::Resize(w, h));
                        }
                        Some(Ok(Event::Mouse(mouse))) => {
                            let _ = tx.send(AppEvent::Mouse(mouse));
                        }
                        _ => {}
                    }
                }
            }
        }
    });
}
