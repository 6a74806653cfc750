//! UI rendering module for testgen.
//!
//! This is the module root for `ui/`. It re-exports `render()` as the
//! single entry point called by the event loop's `terminal.draw()` closure.
//!
//! Layout arithmetic lives in `layout.rs`; each tab has its own renderer
//! module. Overlays (help, commit form, quit confirmation) render last so
//! they sit above the panels.

pub mod analytics;
pub mod file_tree;
pub mod generator;
pub mod help;
pub mod keybindings;
mod layout;
pub mod preview;
pub mod pull_requests;
pub mod repo_list;

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Clear, Paragraph},
};

use crate::app::{AppState, Mode, Tab};
use crate::theme::Theme;
use layout::{centered_rect, inner_rect, panel_block};

/// Renders one complete frame: the active tab's panels, the status bar, and
/// any overlay.
///
/// Called exactly once per `AppEvent::Render` inside `terminal.draw()` —
/// the only location in the application where `terminal.draw()` is called.
///
/// Viewport heights and browser panel rects are written back into `state`
/// so the *next* keypress can compute page-scroll distances and mouse
/// focus correctly. The one-frame lag is imperceptible in practice.
pub fn render(frame: &mut Frame, state: &mut AppState, theme: &Theme) {
    match state.tab {
        Tab::Repositories => {
            let [left, center, right, status_bar] = layout::compute_browser_layout(frame);
            state.repo_viewport_height = inner_rect(left).height;
            state.tree_viewport_height = inner_rect(center).height;
            state.preview_viewport_height = inner_rect(right).height;
            state.panel_rects = [left, center, right];

            let focus = state.browser_focus;
            if left.width > 0 {
                repo_list::render_repo_list(frame, left, focus, state, theme);
            }
            file_tree::render_file_tree(frame, center, focus, state, theme);
            if right.width > 0 {
                preview::render_preview(frame, right, focus, state, theme);
            }
            layout::render_status_bar(frame, status_bar, state, theme);
        }
        Tab::Generator => {
            let [left, right, status_bar] = layout::compute_split_layout(frame);
            state.content_viewport_height = inner_rect(right).height;
            state.panel_rects = [Rect::default(); 3];

            if left.width > 0 {
                generator::render_selection_list(frame, left, state, theme);
            }
            generator::render_output(frame, right, state, theme);
            layout::render_status_bar(frame, status_bar, state, theme);
        }
        Tab::Analytics => {
            let [content, status_bar] = layout::compute_single_layout(frame);
            state.content_viewport_height = inner_rect(content).height;
            state.panel_rects = [Rect::default(); 3];

            analytics::render_analytics(frame, content, state, theme);
            layout::render_status_bar(frame, status_bar, state, theme);
        }
        Tab::PullRequests => {
            let [content, status_bar] = layout::compute_single_layout(frame);
            state.content_viewport_height = inner_rect(content).height;
            state.panel_rects = [Rect::default(); 3];

            pull_requests::render_pull_requests(frame, content, state, theme);
            layout::render_status_bar(frame, status_bar, state, theme);
        }
    }

    // Overlays render after the panels so they sit on top.
    match state.mode {
        Mode::CommitForm => generator::render_commit_form(frame, state, theme),
        Mode::HelpOverlay => help::render_help_overlay(frame, state.help_scroll, theme),
        Mode::ConfirmQuit => render_confirm_quit(frame, theme),
        Mode::Normal => {}
    }
}

/// Renders the quit-confirmation dialog.
///
/// Shown when quitting would drop a live selection or an uncommitted
/// generated suite.
fn render_confirm_quit(frame: &mut Frame, theme: &Theme) {
    let area = centered_rect(frame.area(), 52, 5);
    frame.render_widget(Clear, area);
    let block = panel_block("Quit?", true, theme);
    let inner = inner_rect(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::raw("Selection or generated tests would be lost."),
        Line::styled(
            "y quit · n stay",
            Style::default().fg(theme.stat_label).add_modifier(Modifier::BOLD),
        ),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}
