//! Help overlay renderer.
//!
//! A full-screen key reference rendered above all panels, scrollable with
//! j/k. `Clear` erases the underlying panels first so the overlay is
//! readable on any background.

use ratatui::{
    Frame,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
};

use crate::theme::Theme;
use crate::ui::layout::{centered_rect, inner_rect, panel_block};

/// One keybinding row: key column + description.
fn binding(key: &str, desc: &str, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("  {key:<12}"),
            Style::default().fg(theme.stat_value).add_modifier(Modifier::BOLD),
        ),
        Span::styled(desc.to_owned(), Style::default().fg(theme.status_bar_fg)),
    ])
}

fn heading(text: &str, theme: &Theme) -> Line<'static> {
    Line::styled(
        text.to_owned(),
        Style::default().fg(theme.tab_active).add_modifier(Modifier::BOLD),
    )
}

/// Renders the help overlay, scrolled by `scroll` rows.
pub fn render_help_overlay(frame: &mut Frame, scroll: u16, theme: &Theme) {
    let area = centered_rect(frame.area(), 72, 28);
    frame.render_widget(Clear, area);
    let block = panel_block("Help", true, theme);
    let inner = inner_rect(area);
    frame.render_widget(block, area);

    let lines = vec![
        heading("Global", theme),
        binding("Tab / S-Tab", "next / previous tab", theme),
        binding("j / k", "move / scroll down / up", theme),
        binding("Ctrl-d / u", "half page down / up", theme),
        binding("Ctrl-f / b", "full page down / up", theme),
        binding("?", "toggle this help", theme),
        binding("q / Esc", "quit (confirms if work would be lost)", theme),
        Line::raw(""),
        heading("Repositories", theme),
        binding("H / L", "cycle panel focus", theme),
        binding("Enter", "open repository / expand dir / preview file", theme),
        binding("Space", "toggle checkbox (file) or fold (dir)", theme),
        binding("h / l", "collapse / expand directory", theme),
        binding("p", "preview file under cursor", theme),
        binding("r / v", "refactor / vulnerability analysis", theme),
        binding("a / x", "select all visible files / clear selection", theme),
        binding("R", "reload listing", theme),
        Line::raw(""),
        heading("Generator", theme),
        binding("j / k", "move removal cursor", theme),
        binding("d", "remove file from batch", theme),
        binding("← / →", "cycle technology", theme),
        binding("1-5", "toggle edge-case categories", theme),
        binding("g", "generate tests", theme),
        binding("c", "open commit form", theme),
        Line::raw(""),
        heading("Analytics / Pull Requests", theme),
        binding("r", "refresh now", theme),
    ];

    let paragraph = Paragraph::new(lines).scroll((scroll, 0));
    frame.render_widget(paragraph, inner);
}
