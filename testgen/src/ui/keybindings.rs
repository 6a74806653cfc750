//! Keybinding dispatcher for testgen.
//!
//! Translates raw crossterm `KeyEvent`s into `AppState` mutations and
//! returns a `KeyAction` telling the event loop whether to continue or
//! quit. The dispatcher branches first on `state.mode` so HelpOverlay,
//! ConfirmQuit, CommitForm, and Normal each have isolated handlers; Normal
//! then branches on the active tab.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

use testgen_core::types::AnalysisKind;

use crate::api::types::ApiRequest;
use crate::app::{AppState, BrowserFocus, CommitField, Mode, Tab};

/// Control-flow signal returned from the key dispatcher.
///
/// The event loop checks this after every keypress: `Quit` tears down the
/// terminal and exits; `Continue` lets the next render pick up the change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Continue the event loop normally.
    Continue,
    /// Exit cleanly.
    Quit,
}

/// Dispatches a key event to the handler matching the current mode.
///
/// Mutates `state` in place; the event loop redraws on the next render tick
/// regardless of the return value (except on `Quit`).
pub fn handle_key(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match state.mode {
        Mode::HelpOverlay => handle_help(key, state),
        Mode::ConfirmQuit => handle_confirm_quit(key, state),
        Mode::CommitForm => handle_commit_form(key, state),
        Mode::Normal => handle_normal(key, state),
    }
}

// ---------------------------------------------------------------------------
// Normal mode
// ---------------------------------------------------------------------------

/// Handles a key event while in Normal mode.
///
/// Global keys (tab cycling, help, quit) run first; then the active tab's
/// handler gets the key; whatever is left falls through to the generic
/// scroll keys.
fn handle_normal(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Tab => {
            state.switch_tab(state.tab.next());
            return KeyAction::Continue;
        }
        KeyCode::BackTab => {
            state.switch_tab(state.tab.prev());
            return KeyAction::Continue;
        }
        KeyCode::Char('?') => {
            state.help_scroll = 0;
            state.mode = Mode::HelpOverlay;
            return KeyAction::Continue;
        }
        KeyCode::Char('q') | KeyCode::Esc => {
            // Quitting with a live selection or an uncommitted generated
            // suite goes through the confirmation dialog first.
            if state.has_unsaved_work() {
                state.mode = Mode::ConfirmQuit;
                return KeyAction::Continue;
            }
            return KeyAction::Quit;
        }
        _ => {}
    }

    let consumed = match state.tab {
        Tab::Repositories => handle_repositories_key(key, state),
        Tab::Generator => handle_generator_key(key, state),
        Tab::Analytics => handle_analytics_key(key, state),
        Tab::PullRequests => handle_pull_requests_key(key, state),
    };
    if consumed {
        return KeyAction::Continue;
    }

    handle_scroll_key(key, state);
    KeyAction::Continue
}

/// Repositories-tab keys: panel focus, browsing, selection, analyses.
/// Returns `true` when the key was consumed.
fn handle_repositories_key(key: KeyEvent, state: &mut AppState) -> bool {
    match key.code {
        KeyCode::Char('H') => {
            state.browser_focus = state.browser_focus.prev();
            true
        }
        KeyCode::Char('L') => {
            state.browser_focus = state.browser_focus.next();
            true
        }
        KeyCode::Enter => {
            match state.browser_focus {
                BrowserFocus::RepoList => state.open_selected_repo(),
                BrowserFocus::FileTree => enter_tree_row(state),
                BrowserFocus::Preview => {}
            }
            true
        }
        KeyCode::Char(' ') if state.browser_focus == BrowserFocus::FileTree => {
            state.activate_tree_cursor();
            true
        }
        KeyCode::Char('h') if state.browser_focus == BrowserFocus::FileTree => {
            state.collapse_tree_cursor();
            true
        }
        KeyCode::Char('l') if state.browser_focus == BrowserFocus::FileTree => {
            state.expand_tree_cursor();
            true
        }
        KeyCode::Char('p') => {
            state.preview_tree_cursor();
            true
        }
        KeyCode::Char('r') => {
            state.analyze_tree_cursor(AnalysisKind::Refactor);
            true
        }
        KeyCode::Char('v') => {
            state.analyze_tree_cursor(AnalysisKind::Vulnerability);
            true
        }
        KeyCode::Char('a') => {
            state.select_all_visible();
            true
        }
        KeyCode::Char('x') => {
            state.clear_selection();
            true
        }
        KeyCode::Char('R') => {
            if state.browser_focus == BrowserFocus::RepoList {
                state.load_repositories();
            } else {
                state.reload_tree();
            }
            true
        }
        _ => false,
    }
}

/// Enter on a tree row: directories toggle their fold, files open a preview.
fn enter_tree_row(state: &mut AppState) {
    let Some(path) = state.tree_cursor_path() else { return };
    let Some(node) = state.tree.node(&path) else { return };
    match node.kind {
        testgen_core::types::EntryKind::Dir => state.activate_tree_cursor(),
        testgen_core::types::EntryKind::File => state.preview_tree_cursor(),
    }
}

/// Generator-tab keys: batch editing, options, generate, commit.
/// Returns `true` when the key was consumed.
fn handle_generator_key(key: KeyEvent, state: &mut AppState) -> bool {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            state.move_generator_cursor(true);
            true
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.move_generator_cursor(false);
            true
        }
        KeyCode::Char('d') if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            state.remove_generator_cursor();
            true
        }
        KeyCode::Left => {
            state.cycle_technology(false);
            true
        }
        KeyCode::Right => {
            state.cycle_technology(true);
            true
        }
        KeyCode::Char(c @ '1'..='5') => {
            state.toggle_edge_case(c as usize - '1' as usize);
            true
        }
        KeyCode::Char('g') => {
            state.generate();
            true
        }
        KeyCode::Char('c') => {
            state.open_commit_form();
            true
        }
        _ => false,
    }
}

/// Analytics-tab keys. Returns `true` when the key was consumed.
fn handle_analytics_key(key: KeyEvent, state: &mut AppState) -> bool {
    match key.code {
        KeyCode::Char('r') => {
            state.send(ApiRequest::Analytics);
            true
        }
        _ => false,
    }
}

/// Pull-request-tab keys. Returns `true` when the key was consumed.
fn handle_pull_requests_key(key: KeyEvent, state: &mut AppState) -> bool {
    match key.code {
        KeyCode::Char('r') => {
            state.pr_loading = true;
            state.send(ApiRequest::PullRequests);
            true
        }
        _ => false,
    }
}

/// Generic scroll keys shared by every tab: j / k / g / G and Ctrl combos.
fn handle_scroll_key(key: KeyEvent, state: &mut AppState) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => state.scroll_down(1),
        KeyCode::Char('k') | KeyCode::Up => state.scroll_up(1),
        KeyCode::Char('g') => state.scroll_top(),
        KeyCode::Char('G') => state.scroll_bottom(),
        KeyCode::Char('d') if ctrl => state.half_page_down(),
        KeyCode::Char('u') if ctrl => state.half_page_up(),
        KeyCode::Char('f') if ctrl => state.full_page_down(),
        KeyCode::Char('b') if ctrl => state.full_page_up(),
        _ => {}
    }
}

// ---------------------------------------------------------------------------
// CommitForm mode
// ---------------------------------------------------------------------------

/// Handles text entry in the commit form.
///
/// Tab switches between the two fields, Enter submits (validation keeps the
/// form open on empty fields), Esc cancels without touching the values —
/// reopening the form resumes the previous draft.
fn handle_commit_form(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Esc => {
            state.mode = Mode::Normal;
        }
        KeyCode::Tab | KeyCode::BackTab => {
            state.commit_form.field = match state.commit_form.field {
                CommitField::FilePath => CommitField::Message,
                CommitField::Message => CommitField::FilePath,
            };
        }
        KeyCode::Enter => {
            state.submit_commit_form();
        }
        KeyCode::Backspace => {
            active_field(state).pop();
        }
        KeyCode::Char(c) => {
            active_field(state).push(c);
        }
        _ => {}
    }
    KeyAction::Continue
}

fn active_field(state: &mut AppState) -> &mut String {
    match state.commit_form.field {
        CommitField::FilePath => &mut state.commit_form.file_path,
        CommitField::Message => &mut state.commit_form.message,
    }
}

// ---------------------------------------------------------------------------
// HelpOverlay mode
// ---------------------------------------------------------------------------

/// Handles a key event while the help overlay is visible.
///
/// `?`, `Esc`, or `q` dismisses the overlay; j/k/g/G scroll it. Everything
/// else is silently ignored.
fn handle_help(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            state.help_scroll = state.help_scroll.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.help_scroll = state.help_scroll.saturating_sub(1);
        }
        KeyCode::Char('g') => state.help_scroll = 0,
        KeyCode::Char('G') => state.help_scroll = u16::MAX,
        KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => {
            state.mode = Mode::Normal;
        }
        _ => {}
    }
    KeyAction::Continue
}

// ---------------------------------------------------------------------------
// ConfirmQuit mode
// ---------------------------------------------------------------------------

/// Handles a key event while the quit-confirmation dialog is active.
///
/// `y` / `Y` confirms the quit. `n` / `N` / `Esc` cancels and returns to
/// Normal mode. All other keys are ignored.
fn handle_confirm_quit(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => KeyAction::Quit,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            state.mode = Mode::Normal;
            KeyAction::Continue
        }
        _ => KeyAction::Continue,
    }
}

// ---------------------------------------------------------------------------
// Mouse events
// ---------------------------------------------------------------------------

/// Handles a mouse event: click-to-focus on the browser panels and
/// scroll-wheel on the focused panel (3 lines, matching typical terminal
/// scroll speed). In HelpOverlay mode the wheel scrolls the overlay.
pub fn handle_mouse(mouse: MouseEvent, state: &mut AppState) -> KeyAction {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            handle_mouse_click(mouse.column, mouse.row, state)
        }
        MouseEventKind::ScrollUp => {
            if state.mode == Mode::HelpOverlay {
                state.help_scroll = state.help_scroll.saturating_sub(3);
            } else {
                state.scroll_up(3);
            }
            KeyAction::Continue
        }
        MouseEventKind::ScrollDown => {
            if state.mode == Mode::HelpOverlay {
                state.help_scroll = state.help_scroll.saturating_add(3);
            } else {
                state.scroll_down(3);
            }
            KeyAction::Continue
        }
        _ => KeyAction::Continue,
    }
}

/// Sets browser panel focus from a click position.
///
/// Checks each cached panel rect in `state.panel_rects`; zero-width
/// (collapsed) panels are skipped so they cannot take focus. Rects are only
/// cached while the Repositories tab renders, so clicks elsewhere no-op.
fn handle_mouse_click(col: u16, row: u16, state: &mut AppState) -> KeyAction {
    if state.tab != Tab::Repositories || state.mode != Mode::Normal {
        return KeyAction::Continue;
    }
    let pos = Position { x: col, y: row };
    let [repo_list, file_tree, preview] = state.panel_rects;

    if repo_list.width > 0 && repo_list.contains(pos) {
        state.browser_focus = BrowserFocus::RepoList;
    } else if file_tree.width > 0 && file_tree.contains(pos) {
        state.browser_focus = BrowserFocus::FileTree;
    } else if preview.width > 0 && preview.contains(pos) {
        state.browser_focus = BrowserFocus::Preview;
    }

    KeyAction::Continue
}
