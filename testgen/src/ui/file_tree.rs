//! File tree panel renderer.
//!
//! Renders the centre panel of the Repositories tab from the tree
//! controller's visible rows. Directory rows carry an expand marker
//! (`▸` collapsed, `▾` expanded, `…` while the listing is in flight); file
//! rows carry their selection checkbox. The checkbox state is looked up in
//! the SelectionStore by path on every frame — there is no per-widget
//! state to fall out of sync when rows are discarded and re-materialized.

use ratatui::{
    Frame,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
};

use testgen_core::selection::SelectionStore;
use testgen_core::tree::{DirState, TreeNode};
use testgen_core::types::EntryKind;

use crate::app::{AppState, BrowserFocus};
use crate::theme::Theme;
use crate::ui::layout::panel_block;

/// Renders the file tree into `area`.
///
/// The title shows the open repository and the live selection count. When
/// no repository is open (or the first root listing is still loading) a
/// placeholder row keeps the panel from rendering blank.
pub fn render_file_tree(
    frame: &mut Frame,
    area: ratatui::layout::Rect,
    focus: BrowserFocus,
    state: &mut AppState,
    theme: &Theme,
) {
    let is_focused = focus == BrowserFocus::FileTree;
    let title = match state.tree.repo() {
        Some(repo) => {
            let count = state.selection.count();
            if count > 0 {
                format!("Files — {repo} ({count} selected)")
            } else {
                format!("Files — {repo}")
            }
        }
        None => "Files".to_owned(),
    };
    let block = panel_block(&title, is_focused, theme);

    let rows = state.tree.visible_rows();
    let items: Vec<ListItem> = if rows.is_empty() {
        let msg = if state.tree.is_root_loading() {
            "Loading…"
        } else if state.tree.repo().is_some() {
            "Empty repository"
        } else {
            "Open a repository (Enter on the list)"
        };
        vec![ListItem::new(Line::raw(msg))]
    } else {
        let repo = state.tree.repo().unwrap_or_default();
        rows.iter().map(|node| tree_item(node, repo, &state.selection, theme)).collect()
    };

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().fg(theme.border_active).add_modifier(Modifier::BOLD));

    frame.render_stateful_widget(list, area, &mut state.tree_state);
}

/// Converts a tree node into a styled ListItem.
///
/// Format: `  ▾ src` for directories, `  [x] main.rs` for files, indented
/// two cells per depth level.
fn tree_item(
    node: &TreeNode,
    repo: &str,
    selection: &SelectionStore,
    theme: &Theme,
) -> ListItem<'static> {
    let indent = Span::raw("  ".repeat(node.depth));
    let mut spans = vec![indent];

    match node.kind {
        EntryKind::Dir => {
            let (marker, color) = match node.state {
                DirState::Collapsed => ("▸ ", theme.tree_dir),
                DirState::Expanded => ("▾ ", theme.tree_dir),
                DirState::Loading => ("… ", theme.tree_loading),
            };
            spans.push(Span::styled(marker, Style::default().fg(color)));
            spans.push(Span::styled(
                format!("{}/", node.name),
                Style::default().fg(theme.tree_dir),
            ));
        }
        EntryKind::File => {
            let selected = selection.is_selected(repo, &node.path);
            let mark = if selected {
                Span::styled("[x] ", Style::default().fg(theme.selected_mark))
            } else {
                Span::styled("[ ] ", Style::default().fg(theme.border_inactive))
            };
            spans.push(mark);
            spans.push(Span::styled(node.name.clone(), Style::default().fg(theme.tree_file)));
        }
    }

    ListItem::new(Line::from(spans))
}
