//! Repository list panel renderer.
//!
//! Renders the left panel of the Repositories tab from `AppState.repos`.
//! Each entry shows the short name, a Private/Public badge, the primary
//! language, and the full `owner/name` beneath. Loading and empty states
//! get placeholders so the panel never renders blank.

use ratatui::{
    Frame,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
};

use testgen_core::types::RepoSummary;

use crate::app::{AppState, BrowserFocus};
use crate::theme::Theme;
use crate::ui::layout::panel_block;

/// Renders the repository list into `area`.
///
/// Uses `render_stateful_widget` so the ListState selection highlight is
/// applied. The repository count is shown in the panel title.
pub fn render_repo_list(
    frame: &mut Frame,
    area: ratatui::layout::Rect,
    focus: BrowserFocus,
    state: &mut AppState,
    theme: &Theme,
) {
    let is_focused = focus == BrowserFocus::RepoList;
    let title = if state.repos.is_empty() {
        "Repositories".to_owned()
    } else {
        format!("Repositories ({})", state.repos.len())
    };
    let block = panel_block(&title, is_focused, theme);

    let items: Vec<ListItem> = if state.repos.is_empty() {
        let msg = if state.repos_loading { "Loading…" } else { "No repositories found" };
        vec![ListItem::new(Line::raw(msg))]
    } else {
        state.repos.iter().map(|repo| repo_item(repo, theme)).collect()
    };

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().fg(theme.border_active).add_modifier(Modifier::BOLD));

    frame.render_stateful_widget(list, area, &mut state.repo_list_state);
}

/// Converts one repository summary into a two-line ListItem.
///
/// Format: `demo  [Private]  Python` over a dimmed `owner/demo` line.
fn repo_item(repo: &RepoSummary, theme: &Theme) -> ListItem<'static> {
    let badge = if repo.private {
        Span::styled("[Private]", Style::default().fg(theme.repo_private))
    } else {
        Span::styled("[Public]", Style::default().fg(theme.repo_public))
    };
    let mut head = vec![Span::raw(repo.name.clone()), Span::raw("  "), badge];
    if let Some(language) = &repo.language {
        head.push(Span::raw("  "));
        head.push(Span::styled(language.clone(), Style::default().fg(theme.repo_language)));
    }

    let detail = repo
        .description
        .clone()
        .unwrap_or_else(|| repo.full_name.clone());
    let detail_line = Line::from(Span::styled(
        format!("  {detail}"),
        Style::default().fg(theme.stat_label),
    ));

    ListItem::new(vec![Line::from(head), detail_line])
}
