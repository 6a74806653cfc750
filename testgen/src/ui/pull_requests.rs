//! Pull-request tab renderer.
//!
//! A grouped read-only listing: one header per repository, one row per pull
//! request with its number, title, and state badge.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::AppState;
use crate::theme::Theme;
use crate::ui::layout::{inner_rect, panel_block};

/// Renders the pull-request panel into `area`.
pub fn render_pull_requests(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let block = panel_block("Pull Requests", true, theme);
    let inner = inner_rect(area);
    frame.render_widget(block, area);

    if state.pull_requests.is_empty() {
        let msg = if state.pr_loading { "Loading…" } else { "No open pull requests found" };
        frame.render_widget(
            Paragraph::new(Line::styled(msg, Style::default().fg(theme.stat_label))),
            inner,
        );
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    for group in &state.pull_requests {
        lines.push(Line::styled(
            group.repo_name.clone(),
            Style::default().fg(theme.repo_language).add_modifier(Modifier::BOLD),
        ));
        if group.pull_requests.is_empty() {
            lines.push(Line::styled("  (none)", Style::default().fg(theme.stat_label)));
        }
        for pr in &group.pull_requests {
            let state_color = if pr.state == "open" { theme.pr_open } else { theme.pr_closed };
            lines.push(Line::from(vec![
                Span::styled(format!("  #{:<5}", pr.number), Style::default().fg(theme.stat_value)),
                Span::raw(pr.title.clone()),
                Span::styled(format!("  [{}]", pr.state), Style::default().fg(state_color)),
            ]));
        }
        lines.push(Line::raw(""));
    }

    let paragraph = Paragraph::new(lines).scroll((state.pr_scroll, 0));
    frame.render_widget(paragraph, inner);
}
