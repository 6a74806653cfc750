//! Syntax highlighting for the file preview panel.
//!
//! Converts file content into pre-built `ratatui::text::Line` values once,
//! at fetch time, so the render path never touches syntect. SyntaxSet and
//! ThemeSet loading is expensive — both live in `LazyLock` statics shared
//! by every preview.

use std::sync::LazyLock;

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;

static PS: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static TS: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

/// Highlights a whole file into owned lines for the preview panel.
///
/// The syntax is picked from the path's extension; unknown extensions fall
/// back to plain text. When the theme set is empty (unusual but possible),
/// falls back to unstyled lines rather than failing the preview.
pub fn highlight_file(path: &str, content: &str) -> Vec<Line<'static>> {
    let syntax = PS
        .find_syntax_by_extension(file_ext(path))
        .unwrap_or_else(|| PS.find_syntax_plain_text());
    let theme = TS.themes.get("base16-ocean.dark").or_else(|| TS.themes.values().next());
    let Some(theme) = theme else {
        return plain_lines(content);
    };

    let mut highlighter = HighlightLines::new(syntax, theme);
    content
        .lines()
        .map(|line| {
            let ranges = highlighter.highlight_line(line, &PS).unwrap_or_default();
            let spans: Vec<Span<'static>> = ranges
                .into_iter()
                .map(|(style, text)| syntect_to_span(style, text))
                .collect();
            if spans.is_empty() {
                Line::raw(line.to_owned())
            } else {
                Line::from(spans)
            }
        })
        .collect()
}

/// Unstyled owned lines, used for analysis results and highlight fallback.
pub fn plain_lines(content: &str) -> Vec<Line<'static>> {
    content.lines().map(|line| Line::raw(line.to_owned())).collect()
}

/// Converts a syntect (Style, &str) pair to an owned ratatui Span.
///
/// Rebuilds color and modifier fields by hand — syntect's style types and
/// ratatui's do not share a conversion, and the alpha channel doubles as
/// "no color set" in syntect's defaults.
fn syntect_to_span(style: syntect::highlighting::Style, content: &str) -> Span<'static> {
    use syntect::highlighting::Color as SC;
    let to_color = |c: SC| -> Option<Color> {
        if c.a > 0 { Some(Color::Rgb(c.r, c.g, c.b)) } else { None }
    };
    let mut ratatui_style = Style::default();
    if let Some(fg) = to_color(style.foreground) {
        ratatui_style = ratatui_style.fg(fg);
    }
    if style.font_style.contains(syntect::highlighting::FontStyle::BOLD) {
        ratatui_style = ratatui_style.add_modifier(Modifier::BOLD);
    }
    if style.font_style.contains(syntect::highlighting::FontStyle::ITALIC) {
        ratatui_style = ratatui_style.add_modifier(Modifier::ITALIC);
    }
    if style.font_style.contains(syntect::highlighting::FontStyle::UNDERLINE) {
        ratatui_style = ratatui_style.add_modifier(Modifier::UNDERLINED);
    }
    Span::styled(content.to_owned(), ratatui_style)
}

/// Extracts the file extension from a repository-relative path.
///
/// Returns "txt" if the path has no extension.
fn file_ext(path: &str) -> &str {
    path.rsplit('.').next().unwrap_or("txt")
}
