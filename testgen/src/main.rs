//! testgen — AI test-generation dashboard for the terminal.
//!
//! Entry point for the `testgen` binary. Wires together the terminal
//! lifecycle (`tui`), unified event bus (`event`), tab renderers (`ui`),
//! theme system (`theme`), the API worker (`api`), and the optional local
//! history store (`testgen-core`).
//!
//! # Startup sequence (order matters)
//!
//! 1. `env_logger::init()` — before anything can warn. Logs go to stderr;
//!    the TUI renders on stdout, so the two never interleave.
//! 2. Load config from XDG config — read-only, safe before terminal init.
//! 3. `install_panic_hook()` — installed before terminal init so the
//!    innermost hook restores the terminal before the panic message prints.
//! 4. `register_sigterm()` — returns `Arc<AtomicBool>` polled in the loop.
//! 5. Build the `ApiClient` — a TLS-stack failure should abort while
//!    stderr is still a normal terminal.
//! 6. `init_tui()` — enters alternate screen and enables raw mode.
//! 7. Event channel, API worker, soft-fail history-store open, initial
//!    repository/analytics fetches.
//!
//! # Safety
//!
//! `restore_tui()` is called after the event loop exits (normal quit,
//! SIGTERM, or channel close). The loop itself exits only via `break`,
//! never via `?`, so the restore is always reached; the panic hook covers
//! the panic path.

mod api;
mod app;
mod event;
mod highlight;
mod theme;
mod tui;
mod ui;

use std::sync::atomic::Ordering;
use std::time::Duration;

use serde::Deserialize;
use tokio::sync::mpsc::UnboundedSender;

use testgen_core::api::ApiClient;
use testgen_core::db;

use crate::api::types::ApiRequest;
use crate::app::HistoryAction;
use crate::event::AppEvent;
use crate::ui::keybindings::{self, KeyAction};

/// Configuration loaded from `config.toml`. Every field has a default so a
/// missing or partial file still starts the app.
#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    theme: String,
    api: ApiConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct ApiConfig {
    base_url: String,
    timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self { theme: "catppuccin-mocha".to_owned(), api: ApiConfig::default() }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: "http://localhost:5000".to_owned(), timeout_secs: 30 }
    }
}

/// Returns the path to the testgen config file.
///
/// Prefers `$XDG_CONFIG_HOME/testgen/config.toml`; falls back to
/// `~/.config/testgen/config.toml` when the env var is absent.
fn config_path() -> std::path::PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(std::path::PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|h| std::path::PathBuf::from(h).join(".config"))
        })
        .unwrap_or_else(|| std::path::PathBuf::from(".config"));
    base.join("testgen").join("config.toml")
}

/// Loads the config, treating every failure as soft.
///
/// A missing file yields defaults silently; a parse error is logged and
/// also yields defaults. Config problems must never prevent startup.
fn load_config() -> Config {
    let path = config_path();
    let raw = match std::fs::read_to_string(&path) {
        Ok(s) => s,
        Err(_) => return Config::default(),
    };
    match toml::from_str(&raw) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("config parse error in {:?}: {}", path, err);
            Config::default()
        }
    }
}

/// Runs a history-store follow-up on its own task.
///
/// Storage failures are logged and swallowed — the store is a convenience,
/// and the session continues on in-memory state alone. A successful record
/// reports its row id back through the event channel so the commit path can
/// update it later.
fn run_history_action(
    conn: Option<&tokio_rusqlite::Connection>,
    action: HistoryAction,
    tx: UnboundedSender<AppEvent>,
) {
    let Some(conn) = conn.cloned() else { return };
    tokio::spawn(async move {
        match action {
            HistoryAction::Record { repo, file_path, technology, edge_cases, content } => {
                match db::record_test_case(
                    &conn, &repo, &file_path, &technology, &edge_cases, &content,
                )
                .await
                {
                    Ok(row) => {
                        let _ = tx.send(AppEvent::HistoryRecorded { id: row.id });
                    }
                    Err(err) => log::warn!("failed to record generated suite: {err}"),
                }
            }
            HistoryAction::MarkCommitted { id } => {
                if let Err(err) = db::mark_committed(&conn, &id).await {
                    log::warn!("failed to mark suite committed: {err}");
                }
            }
        }
    });
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Step 1: logging first — config loading below may already warn.
    env_logger::init();

    // Step 2: config and theme — read-only, safe before terminal init.
    let config = load_config();
    let theme = theme::Theme::from_name(&config.theme);
    let mut state = app::AppState::default();

    // Step 3: panic hook installed first — innermost hook restores terminal.
    tui::install_panic_hook();

    // Step 4: SIGTERM flag — polled in the 50ms heartbeat arm below.
    let term_flag = tui::register_sigterm();

    // Step 5: API client before terminal init so a TLS-stack failure prints
    // to a normal terminal instead of an alternate screen.
    let client = ApiClient::new(&config.api.base_url, Duration::from_secs(config.api.timeout_secs))
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    // Step 6: enter alternate screen and raw mode.
    let mut terminal = tui::init_tui()?;

    // Step 7: event channel and input/timer pump.
    let handler = event::EventHandler::new();
    event::spawn_event_task(handler.tx.clone());
    let event_tx = handler.tx.clone();
    let mut rx = handler.rx;

    // History store is optional: open soft, warn, continue without it.
    let history = match std::fs::create_dir_all(".testgen") {
        Ok(()) => match db::open_db(".testgen/history.db").await {
            Ok(conn) => Some(conn),
            Err(err) => {
                log::warn!("history store unavailable, continuing without it: {err}");
                None
            }
        },
        Err(err) => {
            log::warn!("cannot create .testgen directory, continuing without history: {err}");
            None
        }
    };

    // API worker: requests out, completions back as AppEvent::Api.
    let (api_tx, api_rx) = tokio::sync::mpsc::unbounded_channel();
    api::worker::spawn_api_worker(client, api_rx, handler.tx.clone());
    state.api_tx = Some(api_tx);

    // Initial loads, matching the dashboard's init: repositories for the
    // first tab, analytics so the tab has data the moment it is opened.
    state.load_repositories();
    state.send(ApiRequest::Analytics);

    // Event loop — exits only via `break`, never via `?`, which guarantees
    // `restore_tui()` is always reached after the loop.
    'event_loop: loop {
        tokio::select! {
            // Heartbeat: guarantees SIGTERM is checked at least every 50ms,
            // even when no crossterm/tick/render events arrive. Without this
            // arm a quiescent terminal blocks forever in rx.recv() and the
            // flag is never polled.
            _ = tokio::time::sleep(Duration::from_millis(50)) => {
                if term_flag.load(Ordering::Relaxed) {
                    break 'event_loop;
                }
            }
            maybe_event = rx.recv() => {
                match maybe_event {
                    Some(AppEvent::Render) => {
                        // Exactly one draw() call per Render event — never elsewhere.
                        terminal.draw(|frame| ui::render(frame, &mut state, &theme))?;
                    }
                    Some(AppEvent::Key(key)) => {
                        if keybindings::handle_key(key, &mut state) == KeyAction::Quit {
                            break 'event_loop;
                        }
                    }
                    Some(AppEvent::Mouse(mouse)) => {
                        if keybindings::handle_mouse(mouse, &mut state) == KeyAction::Quit {
                            break 'event_loop;
                        }
                    }
                    Some(AppEvent::Tick) => {
                        state.on_tick();
                    }
                    Some(AppEvent::Api(result)) => {
                        if let Some(action) = state.apply_api_result(*result) {
                            run_history_action(history.as_ref(), action, event_tx.clone());
                        }
                    }
                    Some(AppEvent::HistoryRecorded { id }) => {
                        state.generated_record_id = Some(id);
                    }
                    Some(AppEvent::Resize(_, _)) => {
                        // Handled automatically by ratatui on the next Render:
                        // frame.area() returns the new terminal size.
                    }
                    Some(AppEvent::Quit) | None => break 'event_loop,
                }
                // Check SIGTERM after every event too, not just on the
                // heartbeat, so quit latency is at most one event cycle.
                if term_flag.load(Ordering::Relaxed) {
                    break 'event_loop;
                }
            }
        }
    }

    // Restore the terminal at the single exit point of the loop. Covers
    // normal quit, SIGTERM, and channel close; the panic hook covers panics.
    tui::restore_tui()?;
    Ok(())
}
