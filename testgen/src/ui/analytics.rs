//! Analytics tab renderer.
//!
//! A counter panel, not a chart: stat rows, the technology breakdown, the
//! vulnerability severity counts, and a textual strip of the most recent
//! daily activity. Data refreshes every 30 s while this tab is active (see
//! `AppState::on_tick`).

use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use testgen_core::types::AnalyticsSnapshot;

use crate::app::AppState;
use crate::theme::Theme;
use crate::ui::layout::{inner_rect, panel_block};

/// Renders the analytics panel into `area`.
pub fn render_analytics(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let block = panel_block("Analytics", true, theme);
    let inner = inner_rect(area);
    frame.render_widget(block, area);

    let Some(analytics) = &state.analytics else {
        frame.render_widget(
            Paragraph::new(Line::styled("Loading…", Style::default().fg(theme.stat_label))),
            inner,
        );
        return;
    };

    let lines = build_lines(analytics, theme);
    let paragraph = Paragraph::new(lines).scroll((state.analytics_scroll, 0));
    frame.render_widget(paragraph, inner);
}

fn stat_row(value: String, label: &str, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{value:>8}  "),
            Style::default().fg(theme.stat_value).add_modifier(Modifier::BOLD),
        ),
        Span::styled(label.to_owned(), Style::default().fg(theme.stat_label)),
    ])
}

fn section(title: &str, theme: &Theme) -> Line<'static> {
    Line::styled(
        title.to_owned(),
        Style::default().fg(theme.tab_active).add_modifier(Modifier::BOLD),
    )
}

fn build_lines(analytics: &AnalyticsSnapshot, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = vec![
        section("Usage", theme),
        stat_row(analytics.total_files_generated.to_string(), "test files generated", theme),
        stat_row(analytics.total_test_cases.to_string(), "test cases", theme),
        stat_row(analytics.total_repos.to_string(), "repositories", theme),
        stat_row(analytics.total_analyses.to_string(), "code analyses", theme),
        Line::raw(""),
        section("Quality", theme),
        stat_row(format!("{:.1}", analytics.average_quality_score), "average quality score", theme),
        stat_row(format!("{:.1}", analytics.productivity_score), "productivity score", theme),
    ];
    if !analytics.quality_trend.is_empty() {
        lines.push(stat_row(analytics.quality_trend.clone(), "quality trend", theme));
    }

    lines.push(Line::raw(""));
    lines.push(section("Security findings", theme));
    lines.push(stat_row(
        analytics.critical_vulnerabilities_found.to_string(),
        "critical",
        theme,
    ));
    lines.push(stat_row(analytics.high_vulnerabilities_found.to_string(), "high", theme));
    lines.push(stat_row(analytics.medium_vulnerabilities_found.to_string(), "medium", theme));
    lines.push(stat_row(analytics.low_vulnerabilities_found.to_string(), "low", theme));

    if !analytics.technology_breakdown.is_empty() {
        lines.push(Line::raw(""));
        lines.push(section("Technology breakdown", theme));
        let mut spans: Vec<Span> = Vec::new();
        for (tech, count) in &analytics.technology_breakdown {
            spans.push(Span::styled(
                format!("  {tech} "),
                Style::default().fg(theme.repo_language),
            ));
            spans.push(Span::styled(
                format!("×{count}"),
                Style::default().fg(theme.stat_value),
            ));
        }
        lines.push(Line::from(spans));
    }

    if !analytics.daily_activity.is_empty() {
        lines.push(Line::raw(""));
        lines.push(section("Recent activity", theme));
        // BTreeMap keys are ISO dates, so the last entries are the newest.
        for (date, day) in analytics.daily_activity.iter().rev().take(7) {
            lines.push(Line::from(vec![
                Span::styled(format!("  {date}  "), Style::default().fg(theme.stat_label)),
                Span::styled(
                    format!("{} tests", day.test_cases),
                    Style::default().fg(theme.stat_value),
                ),
                Span::styled(" · ", Style::default().fg(theme.stat_label)),
                Span::styled(
                    format!("{} analyses", day.analyses),
                    Style::default().fg(theme.stat_value),
                ),
            ]));
        }
    }

    lines.push(Line::raw(""));
    lines.push(Line::styled(
        "r refreshes now · auto-refresh every 30 s while this tab is open",
        Style::default().fg(theme.stat_label),
    ));
    lines
}
