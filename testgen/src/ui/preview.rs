//! Preview panel renderer.
//!
//! The right panel of the Repositories tab shows either a syntax-highlighted
//! file or the text of an AI analysis — whichever was requested last. Lines
//! are pre-built at fetch time (see `highlight.rs`); this renderer only
//! clips and scrolls them.

use ratatui::{Frame, text::Line, widgets::Paragraph};

use crate::app::{AppState, BrowserFocus};
use crate::theme::Theme;
use crate::ui::layout::{inner_rect, panel_block};

/// Renders the preview panel into `area`.
///
/// The scroll offset is clamped so the last line can always reach the top
/// of the viewport but never scroll past it.
pub fn render_preview(
    frame: &mut Frame,
    area: ratatui::layout::Rect,
    focus: BrowserFocus,
    state: &AppState,
    theme: &Theme,
) {
    let is_focused = focus == BrowserFocus::Preview;
    let title = match &state.preview {
        Some(preview) => format!("Preview — {}", preview.title),
        None => "Preview".to_owned(),
    };
    let block = panel_block(&title, is_focused, theme);
    let inner = inner_rect(area);
    frame.render_widget(block, area);

    match &state.preview {
        Some(preview) => {
            let max_scroll = preview.lines.len().saturating_sub(1);
            let scroll = state.preview_scroll.min(max_scroll) as u16;
            let paragraph = Paragraph::new(preview.lines.clone()).scroll((scroll, 0));
            frame.render_widget(paragraph, inner);
        }
        None => {
            let msg = if state.preview_loading {
                "Loading…"
            } else {
                "p previews the file under the cursor; r / v run analyses"
            };
            let placeholder =
                Paragraph::new(Line::styled(msg, ratatui::style::Style::default().fg(theme.stat_label)));
            frame.render_widget(placeholder, inner);
        }
    }
}
