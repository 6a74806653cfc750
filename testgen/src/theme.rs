//! Color theme system for testgen.
//!
//! A `Theme` holds named `ratatui::style::Color` fields covering every UI
//! surface testgen renders. Two built-in themes are provided:
//!
//! - `dark` — ANSI 16 colors (`Color::Reset`, `Color::DarkGray`, etc.) so
//!   it works on any terminal, including 256-color SSH sessions with no
//!   truecolor support.
//! - `catppuccin_mocha` — Catppuccin Mocha palette in RGB; needs truecolor.

use ratatui::style::Color;

/// All color values used across testgen's UI surfaces.
///
/// Every field is a `ratatui::style::Color`. Callers use `theme.field`
/// directly inside `Style::default().fg(theme.border_active)`.
#[derive(Debug, Clone)]
pub struct Theme {
    // Panel borders
    /// Border color for the currently focused panel.
    pub border_active: Color,
    /// Border color for unfocused panels.
    pub border_inactive: Color,

    // File tree
    /// Directory rows and expand markers.
    pub tree_dir: Color,
    /// File rows.
    pub tree_file: Color,
    /// The in-flight marker while a directory listing loads.
    pub tree_loading: Color,
    /// The `[x]` mark on selected files.
    pub selected_mark: Color,

    // Repository cards
    /// Badge for private repositories.
    pub repo_private: Color,
    /// Badge for public repositories.
    pub repo_public: Color,
    /// Language tag on repository cards.
    pub repo_language: Color,

    // Generator / analytics
    /// Big numeric values on stat rows.
    pub stat_value: Color,
    /// Labels next to stat values.
    pub stat_label: Color,
    /// Open pull requests.
    pub pr_open: Color,
    /// Closed/merged pull requests.
    pub pr_closed: Color,

    // Status bar and notices
    /// Status bar background.
    pub status_bar_bg: Color,
    /// Status bar foreground (general text).
    pub status_bar_fg: Color,
    /// The active tab in the tab strip.
    pub tab_active: Color,
    /// Inactive tabs in the tab strip.
    pub tab_inactive: Color,
    /// Transient informational notices.
    pub notice_info: Color,
    /// Transient success notices.
    pub notice_success: Color,
    /// Transient error notices (fetch failures etc.).
    pub notice_error: Color,

    // General
    /// Application background (used for clearing overlay areas).
    pub background: Color,
}

impl Theme {
    /// Returns the built-in dark theme using ANSI 16 colors.
    ///
    /// Works on all terminals: 16-color, 256-color, and truecolor. Suitable
    /// as the default when no config is present or color capability is
    /// unknown.
    pub fn dark() -> Self {
        Self {
            border_active: Color::Cyan,
            border_inactive: Color::DarkGray,

            tree_dir: Color::Blue,
            tree_file: Color::Reset,
            tree_loading: Color::Yellow,
            selected_mark: Color::Green,

            repo_private: Color::Yellow,
            repo_public: Color::Green,
            repo_language: Color::Magenta,

            stat_value: Color::Cyan,
            stat_label: Color::DarkGray,
            pr_open: Color::Green,
            pr_closed: Color::Red,

            status_bar_bg: Color::DarkGray,
            status_bar_fg: Color::White,
            tab_active: Color::Cyan,
            tab_inactive: Color::Gray,
            notice_info: Color::Cyan,
            notice_success: Color::Green,
            notice_error: Color::Red,

            background: Color::Reset,
        }
    }

    /// Returns the Catppuccin Mocha theme using RGB truecolor values.
    ///
    /// Requires a truecolor terminal — colors degrade to the nearest ANSI
    /// 256-color approximation elsewhere, with reduced fidelity. Use
    /// `dark()` on SSH or 256-color terminals.
    ///
    /// Palette source: <https://github.com/catppuccin/catppuccin> Mocha variant.
    pub fn catppuccin_mocha() -> Self {
        // Catppuccin Mocha palette (selected subset)
        let green = Color::Rgb(166, 227, 161);    // #a6e3a1
        let red = Color::Rgb(243, 139, 168);      // #f38ba8
        let yellow = Color::Rgb(249, 226, 175);   // #f9e2af
        let blue = Color::Rgb(137, 180, 250);     // #89b4fa
        let teal = Color::Rgb(148, 226, 213);     // #94e2d5
        let mauve = Color::Rgb(203, 166, 247);    // #cba6f7
        let lavender = Color::Rgb(180, 190, 254); // #b4befe
        let overlay1 = Color::Rgb(127, 132, 156); // #7f849c
        let surface1 = Color::Rgb(69, 71, 90);    // #45475a
        let base = Color::Rgb(30, 30, 46);        // #1e1e2e
        let text = Color::Rgb(205, 214, 244);     // #cdd6f4

        Self {
            border_active: lavender,
            border_inactive: overlay1,

            tree_dir: blue,
            tree_file: text,
            tree_loading: yellow,
            selected_mark: green,

            repo_private: yellow,
            repo_public: green,
            repo_language: mauve,

            stat_value: teal,
            stat_label: overlay1,
            pr_open: green,
            pr_closed: red,

            status_bar_bg: surface1,
            status_bar_fg: text,
            tab_active: lavender,
            tab_inactive: overlay1,
            notice_info: teal,
            notice_success: green,
            notice_error: red,

            background: base,
        }
    }

    /// Resolves a theme name string to the corresponding built-in theme.
    ///
    /// Unknown names fall back to `dark()` so a typo in config never
    /// prevents startup.
    ///
    /// # Arguments
    ///
    /// * `name` — theme name from config, e.g. `"dark"` or `"catppuccin-mocha"`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "catppuccin-mocha" | "catppuccin_mocha" => Self::catppuccin_mocha(),
            "dark" => Self::dark(),
            other => {
                log::warn!("unknown theme '{}', falling back to 'dark'", other);
                Self::dark()
            }
        }
    }
}
