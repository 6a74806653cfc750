//! Responsive layout engine for testgen.
//!
//! Pure layout arithmetic — no mutable application state lives here. Called
//! inside `terminal.draw()` on every render so every frame reflects the
//! current terminal size.
//!
//! # Panel geometry
//!
//! The Repositories tab is a 3-panel browser (repo list | file tree |
//! preview) at 25 / 40 / 35. Below 110 columns the preview collapses; below
//! 80 the repo list collapses too and the tree fills the width. The
//! Generator tab is a 35 / 65 split; Analytics and Pull Requests are single
//! panels. Every tab keeps a 1-row status bar at the bottom.
//!
//! `Spacing::Overlap(1)` combined with `Block::merge_borders` makes adjacent
//! panel borders share a single column and merge their junction characters.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Margin, Rect, Spacing},
    style::{Modifier, Style},
    symbols::merge::MergeStrategy,
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
};

use crate::app::{AppState, Mode, NoticeLevel, Tab};
use crate::theme::Theme;

/// Returns `[repo_list, file_tree, preview, status_bar]` rects for the
/// Repositories tab. Collapsed panels come back zero-width; renderers skip
/// them and mouse focus ignores them.
pub fn compute_browser_layout(frame: &Frame) -> [Rect; 4] {
    let term_width = frame.area().width;
    let [main_area, status_bar] = split_status(frame);

    let horizontal = if term_width >= 110 {
        Layout::horizontal([
            Constraint::Percentage(25),
            Constraint::Percentage(40),
            Constraint::Percentage(35),
        ])
        .spacing(Spacing::Overlap(1))
    } else if term_width >= 80 {
        Layout::horizontal([
            Constraint::Percentage(35),
            Constraint::Fill(1),
            Constraint::Length(0),
        ])
        .spacing(Spacing::Overlap(1))
    } else {
        Layout::horizontal([
            Constraint::Length(0),
            Constraint::Fill(1),
            Constraint::Length(0),
        ])
        .spacing(Spacing::Overlap(1))
    };

    let [left, center, right] = main_area.layout(&horizontal);
    [left, center, right, status_bar]
}

/// Returns `[selection_list, output, status_bar]` for the Generator tab.
/// Below 90 columns the selection list collapses and the output panel takes
/// the full width.
pub fn compute_split_layout(frame: &Frame) -> [Rect; 3] {
    let term_width = frame.area().width;
    let [main_area, status_bar] = split_status(frame);

    let horizontal = if term_width >= 90 {
        Layout::horizontal([Constraint::Percentage(35), Constraint::Percentage(65)])
            .spacing(Spacing::Overlap(1))
    } else {
        Layout::horizontal([Constraint::Length(0), Constraint::Fill(1)])
            .spacing(Spacing::Overlap(1))
    };

    let [left, right] = main_area.layout(&horizontal);
    [left, right, status_bar]
}

/// Returns `[content, status_bar]` for the single-panel tabs.
pub fn compute_single_layout(frame: &Frame) -> [Rect; 2] {
    split_status(frame)
}

/// Vertical split: main area (fills remaining height) + 1-row status bar.
fn split_status(frame: &Frame) -> [Rect; 2] {
    frame
        .area()
        .layout(&Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]))
}

/// Returns the inner `Rect` of a panel after removing the 1-cell border on
/// each side. Used to cache viewport heights before panels render, so page
/// scroll distances are available at keypress time.
pub fn inner_rect(area: Rect) -> Rect {
    area.inner(Margin { vertical: 1, horizontal: 1 })
}

/// A centered overlay rect of at most `width` × `height`, clamped to `area`.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect { x, y, width, height }
}

/// Builds a bordered `Block` for a panel.
///
/// `BorderType::Thick` when focused, `Plain` otherwise. `MergeStrategy::Fuzzy`
/// because `Exact` produces incorrect junctions when mixing thick and plain
/// borders.
pub fn panel_block<'a>(title: &'a str, is_focused: bool, theme: &'a Theme) -> Block<'a> {
    let border_style = if is_focused {
        Style::default().fg(theme.border_active)
    } else {
        Style::default().fg(theme.border_inactive)
    };
    let border_type = if is_focused { BorderType::Thick } else { BorderType::Plain };

    Block::bordered()
        .title(title)
        .border_type(border_type)
        .border_style(border_style)
        .merge_borders(MergeStrategy::Fuzzy)
}

/// Renders the 1-row status bar: the tab strip, busy indicators, the
/// selection count, and the transient notice (rightmost, colored by level).
pub fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let mut spans: Vec<Span> = Vec::new();

    for tab in Tab::ALL {
        let style = if tab == state.tab {
            Style::default().fg(theme.tab_active).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.tab_inactive)
        };
        spans.push(Span::styled(format!(" {} ", tab.title()), style));
        spans.push(Span::raw("│"));
    }

    let count = state.selection.count();
    if count > 0 {
        spans.push(Span::styled(
            format!(" {count} file{} selected ", if count == 1 { "" } else { "s" }),
            Style::default().fg(theme.selected_mark),
        ));
    }
    if state.generating {
        spans.push(Span::styled(" generating… ", Style::default().fg(theme.tree_loading)));
    }
    if state.committing {
        spans.push(Span::styled(" committing… ", Style::default().fg(theme.tree_loading)));
    }
    if state.mode == Mode::CommitForm {
        spans.push(Span::styled(
            " COMMIT ",
            Style::default().fg(theme.tab_active).add_modifier(Modifier::BOLD),
        ));
    }

    if let Some(notice) = &state.notice {
        let color = match notice.level {
            NoticeLevel::Info => theme.notice_info,
            NoticeLevel::Success => theme.notice_success,
            NoticeLevel::Error => theme.notice_error,
        };
        spans.push(Span::styled(format!("  {}", notice.text), Style::default().fg(color)));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(theme.status_bar_bg).fg(theme.status_bar_fg)),
        area,
    );
}
