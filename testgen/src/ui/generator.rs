//! Generator tab renderers: the selected-file list, the options/output
//! panel, and the commit form overlay.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
};

use crate::app::{AppState, CommitField, EDGE_CASE_CATEGORIES};
use crate::theme::Theme;
use crate::ui::layout::{centered_rect, inner_rect, panel_block};

/// Renders the left panel: selected files grouped by repository, with the
/// removal cursor highlighted.
///
/// Repository headers are decoration, not rows — the cursor only lands on
/// files, matching `AppState::generator_pairs` indexing.
pub fn render_selection_list(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let count = state.selection.count();
    let title = if count > 0 {
        format!("Selected files ({count})")
    } else {
        "Selected files".to_owned()
    };
    let block = panel_block(&title, false, theme);
    let inner = inner_rect(area);
    frame.render_widget(block, area);

    if count == 0 {
        let placeholder = Paragraph::new(vec![
            Line::raw("No files selected"),
            Line::styled(
                "Select files in the Repositories tab",
                Style::default().fg(theme.stat_label),
            ),
        ]);
        frame.render_widget(placeholder, inner);
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    let mut pair_index = 0usize;
    for (repo, paths) in state.selection.entries() {
        lines.push(Line::styled(
            repo.to_owned(),
            Style::default().fg(theme.repo_language).add_modifier(Modifier::BOLD),
        ));
        for path in paths {
            let style = if pair_index == state.gen_list_index {
                Style::default().fg(theme.border_active).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme.tree_file)
            };
            lines.push(Line::styled(format!("  {path}"), style));
            pair_index += 1;
        }
    }
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        "d removes the file under the cursor",
        Style::default().fg(theme.stat_label),
    ));

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Renders the right panel: the options header and the generated output.
pub fn render_output(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let title = if state.generating {
        "Generated tests (generating…)".to_owned()
    } else if state.output_committed {
        "Generated tests (committed)".to_owned()
    } else {
        "Generated tests".to_owned()
    };
    let block = panel_block(&title, false, theme);
    let inner = inner_rect(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();

    // Options header: technology plus the numbered edge-case toggles.
    let mut option_spans = vec![
        Span::styled("technology ", Style::default().fg(theme.stat_label)),
        Span::styled(
            format!("‹ {} ›", state.options.technology),
            Style::default().fg(theme.stat_value).add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
    ];
    for (i, category) in EDGE_CASE_CATEGORIES.iter().enumerate() {
        let enabled = state.options.edge_cases.iter().any(|c| c == category);
        let style = if enabled {
            Style::default().fg(theme.selected_mark)
        } else {
            Style::default().fg(theme.stat_label)
        };
        option_spans.push(Span::styled(format!("[{}] {category}  ", i + 1), style));
    }
    lines.push(Line::from(option_spans));
    lines.push(Line::styled(
        "g generate · c commit · ←/→ technology · 1-5 edge cases",
        Style::default().fg(theme.stat_label),
    ));
    lines.push(Line::raw(""));

    match &state.output {
        Some(output) => {
            for line in output.lines() {
                lines.push(Line::raw(line.to_owned()));
            }
        }
        None => {
            lines.push(Line::styled(
                "Generated test cases will appear here…",
                Style::default().fg(theme.stat_label),
            ));
        }
    }

    let paragraph = Paragraph::new(lines).scroll((state.output_scroll, 0));
    frame.render_widget(paragraph, inner);
}

/// Renders the commit form as a centered overlay above the Generator tab.
///
/// Two editable fields (file path, commit message); the active one shows a
/// block cursor. `Clear` erases the panels underneath first.
pub fn render_commit_form(frame: &mut Frame, state: &AppState, theme: &Theme) {
    let area = centered_rect(frame.area(), 64, 12);
    frame.render_widget(Clear, area);
    let block = panel_block("Commit & Push", true, theme);
    let inner = inner_rect(area);
    frame.render_widget(block, area);

    let field_line = |label: &str, value: &str, active: bool| -> Vec<Line<'static>> {
        let label_style = if active {
            Style::default().fg(theme.tab_active).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.stat_label)
        };
        let mut value_spans = vec![Span::raw(format!("  {value}"))];
        if active {
            value_spans.push(Span::styled("▌", Style::default().fg(theme.tab_active)));
        }
        vec![Line::styled(label.to_owned(), label_style), Line::from(value_spans)]
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Repository: ", Style::default().fg(theme.stat_label)),
            Span::styled(
                state.commit_repo.clone().unwrap_or_default(),
                Style::default().fg(theme.stat_value),
            ),
        ]),
        Line::raw(""),
    ];
    lines.extend(field_line(
        "File path",
        &state.commit_form.file_path,
        state.commit_form.field == CommitField::FilePath,
    ));
    lines.push(Line::raw(""));
    lines.extend(field_line(
        "Commit message",
        &state.commit_form.message,
        state.commit_form.field == CommitField::Message,
    ));
    lines.push(Line::raw(""));
    lines.push(Line::styled(
        "Enter commit · Tab switch field · Esc cancel",
        Style::default().fg(theme.stat_label),
    ));

    frame.render_widget(Paragraph::new(lines), inner);
}
