//! Central application state for testgen.
//!
//! This module owns all mutable UI state: the current mode and tab, panel
//! focus, per-panel scroll offsets and viewport heights, the selection
//! store, the file-tree controller, fetched backend data, and the transient
//! status notice. No ratatui rendering logic lives here — `app.rs` is pure
//! state that is read by the render module and mutated by the keybinding
//! dispatcher and by API completions.

use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::ListState;
use tokio::sync::mpsc::UnboundedSender;

use testgen_core::selection::SelectionStore;
use testgen_core::tree::{DirState, FileTreeController};
use testgen_core::types::{
    AnalysisKind, AnalysisRequest, AnalyticsSnapshot, CommitRequest, EntryKind, GenerateRequest,
    GenerationOptions, PullRequestGroup, RepoSummary,
};

use crate::api::types::{ApiRequest, ApiResult};
use crate::highlight;

/// Technologies offered by the generator options line.
pub const TECHNOLOGIES: &[&str] = &["python", "javascript", "typescript", "java", "go", "rust"];

/// Edge-case categories togglable in the generator (keys 1–5).
pub const EDGE_CASE_CATEGORIES: &[&str] =
    &["null-input", "boundary-values", "exceptions", "empty-collections", "large-input"];

/// Analytics auto-refresh period while the Analytics tab is active, counted
/// in 250 ms ticks. 120 ticks = 30 s, matching the original dashboard. The
/// counter lives and dies with tab focus — there is no free-running timer.
const ANALYTICS_REFRESH_TICKS: u16 = 120;

/// How long a notice stays in the status bar, in 250 ms ticks (4 s).
const NOTICE_TICKS: u8 = 16;

/// Editor mode controlling which keybinding set is active.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Normal navigation mode (default).
    #[default]
    Normal,
    /// Text-entry mode for the commit form (file path + message).
    CommitForm,
    /// Full-screen help overlay is shown above all panels.
    HelpOverlay,
    /// Quit-confirmation dialog shown when a selection or an uncommitted
    /// generated suite would be lost.
    ConfirmQuit,
}

/// The four dashboard tabs.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Repositories,
    Generator,
    Analytics,
    PullRequests,
}

impl Tab {
    /// All tabs in strip order.
    pub const ALL: [Tab; 4] = [Tab::Repositories, Tab::Generator, Tab::Analytics, Tab::PullRequests];

    /// Returns the tab after `self` in the strip (wraps around).
    pub fn next(self) -> Self {
        match self {
            Tab::Repositories => Tab::Generator,
            Tab::Generator => Tab::Analytics,
            Tab::Analytics => Tab::PullRequests,
            Tab::PullRequests => Tab::Repositories,
        }
    }

    /// Returns the tab before `self` in the strip (wraps around).
    pub fn prev(self) -> Self {
        match self {
            Tab::Repositories => Tab::PullRequests,
            Tab::Generator => Tab::Repositories,
            Tab::Analytics => Tab::Generator,
            Tab::PullRequests => Tab::Analytics,
        }
    }

    /// Label shown in the status-bar tab strip.
    pub fn title(self) -> &'static str {
        match self {
            Tab::Repositories => "Repositories",
            Tab::Generator => "Generator",
            Tab::Analytics => "Analytics",
            Tab::PullRequests => "Pull Requests",
        }
    }
}

/// Which panel of the Repositories tab has keyboard focus.
///
/// Navigation cycles RepoList → FileTree → Preview via `next()` and in
/// reverse via `prev()`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum BrowserFocus {
    /// Left panel: repository cards.
    #[default]
    RepoList,
    /// Centre panel: the lazily materialized file tree with checkboxes.
    FileTree,
    /// Right panel: file preview / analysis result.
    Preview,
}

impl BrowserFocus {
    /// Returns the panel that precedes `self` in the cycle (wraps around).
    pub fn prev(self) -> Self {
        match self {
            BrowserFocus::RepoList => BrowserFocus::Preview,
            BrowserFocus::FileTree => BrowserFocus::RepoList,
            BrowserFocus::Preview => BrowserFocus::FileTree,
        }
    }

    /// Returns the panel that follows `self` in the cycle (wraps around).
    pub fn next(self) -> Self {
        match self {
            BrowserFocus::RepoList => BrowserFocus::FileTree,
            BrowserFocus::FileTree => BrowserFocus::Preview,
            BrowserFocus::Preview => BrowserFocus::RepoList,
        }
    }
}

/// Severity of a transient status-bar notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// A transient status-bar message (the toast of the terminal world).
#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    pub level: NoticeLevel,
    ticks_left: u8,
}

/// Pre-rendered content for the preview panel: either a highlighted file or
/// an analysis result.
#[derive(Debug)]
pub struct Preview {
    pub title: String,
    pub lines: Vec<Line<'static>>,
}

/// Which commit-form field is receiving keystrokes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CommitField {
    #[default]
    FilePath,
    Message,
}

/// The commit form shown in `Mode::CommitForm`.
#[derive(Debug, Clone)]
pub struct CommitForm {
    pub file_path: String,
    pub message: String,
    pub field: CommitField,
}

impl Default for CommitForm {
    /// Defaults match what the generation workflow produces unprompted.
    fn default() -> Self {
        Self {
            file_path: "tests/generated_tests.py".to_owned(),
            message: "Add AI-generated test cases".to_owned(),
            field: CommitField::FilePath,
        }
    }
}

/// Follow-up work for the local history store, returned by
/// [`AppState::apply_api_result`] so the main loop can spawn the database
/// task — app state never performs I/O itself.
#[derive(Debug)]
pub enum HistoryAction {
    /// A generation succeeded; persist it with status `generated`.
    Record {
        repo: String,
        file_path: String,
        technology: String,
        edge_cases: Vec<String>,
        content: String,
    },
    /// A commit succeeded; flip the recorded row to `committed`.
    MarkCommitted { id: String },
}

/// All mutable UI state passed through every render cycle.
///
/// Bundled so the render function receives a single mutable reference and
/// the keybinding dispatcher another. The API sender lives here too —
/// following the rule that every user action flows through state methods,
/// never through ad-hoc channel plumbing in the dispatcher.
pub struct AppState {
    pub mode: Mode,
    pub tab: Tab,
    pub browser_focus: BrowserFocus,

    // Repositories tab
    pub repos: Vec<RepoSummary>,
    pub repos_loading: bool,
    pub repo_list_state: ListState,
    pub tree: FileTreeController,
    pub tree_state: ListState,
    pub selection: SelectionStore,
    pub preview: Option<Preview>,
    pub preview_scroll: usize,
    pub preview_loading: bool,

    // Generator tab
    pub options: GenerationOptions,
    tech_index: usize,
    pub gen_list_index: usize,
    pub output: Option<String>,
    pub output_scroll: u16,
    pub generating: bool,
    pub committing: bool,
    pub output_committed: bool,
    pub commit_form: CommitForm,
    /// Repository the next commit targets: the first repository of the last
    /// generation batch.
    pub commit_repo: Option<String>,
    /// History-store row id of the last generation, once recorded. Needed to
    /// flip the row to `committed` after a successful commit.
    pub generated_record_id: Option<String>,

    // Analytics tab
    pub analytics: Option<AnalyticsSnapshot>,
    pub analytics_scroll: u16,
    analytics_ticks: u16,

    // Pull-requests tab
    pub pull_requests: Vec<PullRequestGroup>,
    pub pr_loading: bool,
    pub pr_scroll: u16,

    // Status bar / overlays
    pub notice: Option<Notice>,
    pub help_scroll: u16,

    // Viewport heights cached after each render, for page-scroll distances.
    pub repo_viewport_height: u16,
    pub tree_viewport_height: u16,
    pub preview_viewport_height: u16,
    pub content_viewport_height: u16,

    /// Browser panel rects cached for mouse click-to-focus. Zero-width when
    /// a panel is collapsed or another tab is active.
    pub panel_rects: [Rect; 3],

    /// Send half of the API worker channel. `None` only in tests.
    pub api_tx: Option<UnboundedSender<ApiRequest>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            tab: Tab::default(),
            browser_focus: BrowserFocus::default(),
            repos: Vec::new(),
            repos_loading: false,
            repo_list_state: ListState::default(),
            tree: FileTreeController::new(),
            tree_state: ListState::default(),
            selection: SelectionStore::new(),
            preview: None,
            preview_scroll: 0,
            preview_loading: false,
            options: GenerationOptions::default(),
            tech_index: 0,
            gen_list_index: 0,
            output: None,
            output_scroll: 0,
            generating: false,
            committing: false,
            output_committed: false,
            commit_form: CommitForm::default(),
            commit_repo: None,
            generated_record_id: None,
            analytics: None,
            analytics_scroll: 0,
            analytics_ticks: 0,
            pull_requests: Vec::new(),
            pr_loading: false,
            pr_scroll: 0,
            notice: None,
            help_scroll: 0,
            repo_viewport_height: 0,
            tree_viewport_height: 0,
            preview_viewport_height: 0,
            content_viewport_height: 0,
            panel_rects: [Rect::default(); 3],
            api_tx: None,
        }
    }
}

impl AppState {
    /// Sends a request to the API worker. Silently dropped when no worker is
    /// attached (tests) or the worker is gone (shutdown).
    pub fn send(&self, request: ApiRequest) {
        if let Some(tx) = &self.api_tx {
            let _ = tx.send(request);
        }
    }

    /// Replaces the current notice. `Error` notices come from fetch
    /// failures and are transient — the failure already rolled back
    /// whatever state it touched.
    pub fn notify(&mut self, level: NoticeLevel, text: impl Into<String>) {
        self.notice = Some(Notice { text: text.into(), level, ticks_left: NOTICE_TICKS });
    }

    /// Logic tick (4 Hz): expires the notice and drives the analytics
    /// auto-refresh countdown. The countdown only advances while the
    /// Analytics tab is active, so leaving the tab cancels the periodic
    /// refresh rather than letting it run free.
    pub fn on_tick(&mut self) {
        if let Some(notice) = &mut self.notice {
            notice.ticks_left = notice.ticks_left.saturating_sub(1);
            if notice.ticks_left == 0 {
                self.notice = None;
            }
        }

        if self.tab == Tab::Analytics {
            self.analytics_ticks += 1;
            if self.analytics_ticks >= ANALYTICS_REFRESH_TICKS {
                self.analytics_ticks = 0;
                self.send(ApiRequest::Analytics);
            }
        } else {
            self.analytics_ticks = 0;
        }
    }

    /// Switches tabs and triggers the entering tab's data load, mirroring
    /// the original dashboard's load-on-switch behavior.
    pub fn switch_tab(&mut self, tab: Tab) {
        if self.tab == tab {
            return;
        }
        self.tab = tab;
        match tab {
            Tab::Repositories => {
                if self.repos.is_empty() && !self.repos_loading {
                    self.load_repositories();
                }
            }
            Tab::Generator => {
                self.gen_list_index = 0;
            }
            Tab::Analytics => {
                self.analytics_ticks = 0;
                self.send(ApiRequest::Analytics);
            }
            Tab::PullRequests => {
                if !self.pr_loading {
                    self.pr_loading = true;
                    self.send(ApiRequest::PullRequests);
                }
            }
        }
    }

    /// Fetches the repository list for the Repositories tab.
    pub fn load_repositories(&mut self) {
        self.repos_loading = true;
        self.send(ApiRequest::Repositories);
    }

    /// The repository card under the cursor, if any.
    pub fn selected_repo(&self) -> Option<&RepoSummary> {
        self.repos.get(self.repo_list_state.selected()?)
    }

    /// Opens the file browser for the repository under the cursor: starts a
    /// fresh root load (last-request-wins against any earlier one still in
    /// flight) and moves focus to the tree panel.
    pub fn open_selected_repo(&mut self) {
        let Some(repo) = self.selected_repo().map(|r| r.full_name.clone()) else {
            return;
        };
        let ticket = self.tree.begin_load_root(&repo);
        self.send(ApiRequest::RootContents(ticket));
        self.browser_focus = BrowserFocus::FileTree;
        self.tree_state.select(Some(0));
    }

    /// Reloads the root listing of the currently open repository.
    pub fn reload_tree(&mut self) {
        if let Some(repo) = self.tree.repo().map(str::to_owned) {
            let ticket = self.tree.begin_load_root(&repo);
            self.send(ApiRequest::RootContents(ticket));
        }
    }

    /// Path of the tree row under the cursor.
    pub fn tree_cursor_path(&self) -> Option<String> {
        let rows = self.tree.visible_rows();
        let index = self.tree_state.selected()?;
        rows.get(index).map(|node| node.path.clone())
    }

    /// Activates the tree row under the cursor: directories toggle
    /// expand/collapse (issuing at most one fetch), files toggle their
    /// selection checkbox.
    ///
    /// An `InvalidOperation` here means the row model and the tree disagree
    /// — a bug, logged loudly rather than surfaced as a user notice.
    pub fn activate_tree_cursor(&mut self) {
        let Some(path) = self.tree_cursor_path() else { return };
        let Some(node) = self.tree.node(&path) else { return };
        match node.kind {
            EntryKind::Dir => match self.tree.toggle_dir(&path) {
                Ok(Some(ticket)) => self.send(ApiRequest::DirContents(ticket)),
                Ok(None) => {}
                Err(err) => log::error!("tree toggle rejected: {err}"),
            },
            EntryKind::File => {
                let selected = self
                    .tree
                    .repo()
                    .is_some_and(|repo| self.selection.is_selected(repo, &path));
                if let Err(err) = self.tree.toggle_file(&mut self.selection, &path, !selected) {
                    log::error!("selection toggle rejected: {err}");
                }
            }
        }
    }

    /// Collapses the directory under the cursor (or its parent row no-op).
    pub fn collapse_tree_cursor(&mut self) {
        let Some(path) = self.tree_cursor_path() else { return };
        if self.tree.node(&path).is_some_and(|n| n.kind == EntryKind::Dir) {
            if let Err(err) = self.tree.collapse(&path) {
                log::error!("collapse rejected: {err}");
            }
        }
    }

    /// Expands the directory under the cursor if it is collapsed.
    pub fn expand_tree_cursor(&mut self) {
        let Some(path) = self.tree_cursor_path() else { return };
        let Some(node) = self.tree.node(&path) else { return };
        if node.kind == EntryKind::Dir && node.state == DirState::Collapsed {
            match self.tree.begin_expand(&path) {
                Ok(Some(ticket)) => self.send(ApiRequest::DirContents(ticket)),
                Ok(None) => {}
                Err(err) => log::error!("expand rejected: {err}"),
            }
        }
    }

    /// Requests a preview of the file under the cursor.
    pub fn preview_tree_cursor(&mut self) {
        let Some(path) = self.tree_cursor_path() else { return };
        let Some(repo) = self.tree.repo().map(str::to_owned) else { return };
        if self.tree.node(&path).is_some_and(|n| n.kind == EntryKind::File) {
            self.preview_loading = true;
            self.send(ApiRequest::FileBody { repo, path });
        }
    }

    /// Requests an AI analysis of the file under the cursor; the result
    /// lands in the preview panel.
    pub fn analyze_tree_cursor(&mut self, kind: AnalysisKind) {
        let Some(path) = self.tree_cursor_path() else { return };
        let Some(repo) = self.tree.repo().map(str::to_owned) else { return };
        if self.tree.node(&path).is_some_and(|n| n.kind == EntryKind::File) {
            self.preview_loading = true;
            self.notify(NoticeLevel::Info, format!("Analyzing {path}…"));
            self.send(ApiRequest::AnalyzeFile(AnalysisRequest {
                repo_name: repo,
                file_path: path,
                analysis_type: kind,
            }));
        }
    }

    /// Selects every materialized file of the open tree.
    pub fn select_all_visible(&mut self) {
        self.tree.toggle_all_files(&mut self.selection, true);
    }

    /// Clears the entire selection (all repositories).
    pub fn clear_selection(&mut self) {
        self.selection.deselect_all();
    }

    // ------------------------------------------------------------------
    // Generator tab
    // ------------------------------------------------------------------

    /// The flattened `(repo, path)` pairs shown in the generator list, in
    /// store order. Rebuilt per call — the list is small and the cursor
    /// index stays meaningful across removals.
    pub fn generator_pairs(&self) -> Vec<(String, String)> {
        self.selection
            .entries()
            .flat_map(|(repo, paths)| {
                paths.iter().map(move |p| (repo.to_owned(), p.clone()))
            })
            .collect()
    }

    /// Removes the generator-list entry under the cursor from the selection.
    pub fn remove_generator_cursor(&mut self) {
        let pairs = self.generator_pairs();
        if let Some((repo, path)) = pairs.get(self.gen_list_index) {
            self.selection.remove(repo, path);
            let remaining = pairs.len().saturating_sub(1);
            if remaining > 0 && self.gen_list_index >= remaining {
                self.gen_list_index = remaining - 1;
            }
        }
    }

    /// Moves the generator-list cursor down/up, clamped to the list.
    pub fn move_generator_cursor(&mut self, down: bool) {
        let len = self.generator_pairs().len();
        if len == 0 {
            self.gen_list_index = 0;
        } else if down {
            self.gen_list_index = (self.gen_list_index + 1).min(len - 1);
        } else {
            self.gen_list_index = self.gen_list_index.saturating_sub(1);
        }
    }

    /// Cycles the target technology forward or backward.
    pub fn cycle_technology(&mut self, forward: bool) {
        let len = TECHNOLOGIES.len();
        self.tech_index = if forward {
            (self.tech_index + 1) % len
        } else {
            (self.tech_index + len - 1) % len
        };
        self.options.technology = TECHNOLOGIES[self.tech_index].to_owned();
    }

    /// Toggles one of the numbered edge-case categories.
    pub fn toggle_edge_case(&mut self, index: usize) {
        let Some(category) = EDGE_CASE_CATEGORIES.get(index) else { return };
        let category = (*category).to_owned();
        if let Some(pos) = self.options.edge_cases.iter().position(|c| *c == category) {
            self.options.edge_cases.remove(pos);
        } else {
            self.options.edge_cases.push(category);
        }
    }

    /// Submits the current selection for generation.
    ///
    /// Disabled (a no-op with a notice) when nothing is selected — the same
    /// gate the original put on its generate button — or while an earlier
    /// generation is still running.
    pub fn generate(&mut self) {
        if self.generating {
            return;
        }
        if self.selection.count() == 0 {
            self.notify(NoticeLevel::Info, "Select files in the Repositories tab first");
            return;
        }
        let request = GenerateRequest::from_selection(&self.selection, &self.options);
        self.commit_repo = request.files.first().map(|f| f.repo.clone());
        self.generating = true;
        self.generated_record_id = None;
        self.send(ApiRequest::GenerateTests(request));
    }

    /// Opens the commit form for the generated output, if there is any.
    pub fn open_commit_form(&mut self) {
        if self.output.is_none() {
            self.notify(NoticeLevel::Info, "Nothing generated yet");
            return;
        }
        if self.commit_repo.is_none() {
            self.notify(NoticeLevel::Info, "No repository to commit to");
            return;
        }
        self.commit_form.field = CommitField::FilePath;
        self.mode = Mode::CommitForm;
    }

    /// Submits the commit form. Empty fields keep the form open — the same
    /// validation the original dialog performed.
    pub fn submit_commit_form(&mut self) {
        let file_path = self.commit_form.file_path.trim().to_owned();
        let message = self.commit_form.message.trim().to_owned();
        if file_path.is_empty() || message.is_empty() {
            self.notify(NoticeLevel::Info, "File path and commit message are required");
            return;
        }
        let (Some(repo), Some(content)) = (self.commit_repo.clone(), self.output.clone()) else {
            self.mode = Mode::Normal;
            return;
        };
        self.committing = true;
        self.mode = Mode::Normal;
        self.send(ApiRequest::CommitTests(CommitRequest {
            repo_name: repo,
            test_content: content,
            file_path,
            message,
        }));
    }

    /// Whether quitting would lose work: a live selection or a generated
    /// suite that was never committed.
    pub fn has_unsaved_work(&self) -> bool {
        !self.selection.is_empty() || (self.output.is_some() && !self.output_committed)
    }

    // ------------------------------------------------------------------
    // Scrolling
    // ------------------------------------------------------------------

    /// Scrolls the focused panel down by `lines` rows.
    pub fn scroll_down(&mut self, lines: u16) {
        match self.tab {
            Tab::Repositories => match self.browser_focus {
                BrowserFocus::RepoList => self.repo_list_state.scroll_down_by(lines),
                BrowserFocus::FileTree => self.tree_state.scroll_down_by(lines),
                BrowserFocus::Preview => {
                    self.preview_scroll = self.preview_scroll.saturating_add(lines as usize);
                }
            },
            Tab::Generator => self.output_scroll = self.output_scroll.saturating_add(lines),
            Tab::Analytics => self.analytics_scroll = self.analytics_scroll.saturating_add(lines),
            Tab::PullRequests => self.pr_scroll = self.pr_scroll.saturating_add(lines),
        }
    }

    /// Scrolls the focused panel up by `lines` rows.
    pub fn scroll_up(&mut self, lines: u16) {
        match self.tab {
            Tab::Repositories => match self.browser_focus {
                BrowserFocus::RepoList => self.repo_list_state.scroll_up_by(lines),
                BrowserFocus::FileTree => self.tree_state.scroll_up_by(lines),
                BrowserFocus::Preview => {
                    self.preview_scroll = self.preview_scroll.saturating_sub(lines as usize);
                }
            },
            Tab::Generator => self.output_scroll = self.output_scroll.saturating_sub(lines),
            Tab::Analytics => self.analytics_scroll = self.analytics_scroll.saturating_sub(lines),
            Tab::PullRequests => self.pr_scroll = self.pr_scroll.saturating_sub(lines),
        }
    }

    /// Scrolls the focused panel to the very top.
    pub fn scroll_top(&mut self) {
        match self.tab {
            Tab::Repositories => match self.browser_focus {
                BrowserFocus::RepoList => self.repo_list_state.select_first(),
                BrowserFocus::FileTree => self.tree_state.select_first(),
                BrowserFocus::Preview => self.preview_scroll = 0,
            },
            Tab::Generator => self.output_scroll = 0,
            Tab::Analytics => self.analytics_scroll = 0,
            Tab::PullRequests => self.pr_scroll = 0,
        }
    }

    /// Scrolls the focused panel to the very bottom (ratatui clamps the
    /// offset-based panels on the next draw).
    pub fn scroll_bottom(&mut self) {
        match self.tab {
            Tab::Repositories => match self.browser_focus {
                BrowserFocus::RepoList => self.repo_list_state.select_last(),
                BrowserFocus::FileTree => self.tree_state.select_last(),
                BrowserFocus::Preview => {
                    self.preview_scroll =
                        self.preview.as_ref().map_or(0, |p| p.lines.len().saturating_sub(1));
                }
            },
            Tab::Generator => self.output_scroll = u16::MAX,
            Tab::Analytics => self.analytics_scroll = u16::MAX,
            Tab::PullRequests => self.pr_scroll = u16::MAX,
        }
    }

    /// Half-page scroll distance for the focused panel, from the viewport
    /// height cached at the previous render. Minimum 1 so the first frame
    /// is never a no-op.
    fn focused_viewport(&self) -> u16 {
        match self.tab {
            Tab::Repositories => match self.browser_focus {
                BrowserFocus::RepoList => self.repo_viewport_height,
                BrowserFocus::FileTree => self.tree_viewport_height,
                BrowserFocus::Preview => self.preview_viewport_height,
            },
            Tab::Generator | Tab::Analytics | Tab::PullRequests => self.content_viewport_height,
        }
    }

    /// Scrolls down by half the focused panel's visible height.
    pub fn half_page_down(&mut self) {
        self.scroll_down((self.focused_viewport() / 2).max(1));
    }

    /// Scrolls up by half the focused panel's visible height.
    pub fn half_page_up(&mut self) {
        self.scroll_up((self.focused_viewport() / 2).max(1));
    }

    /// Scrolls down by the focused panel's full visible height.
    pub fn full_page_down(&mut self) {
        self.scroll_down(self.focused_viewport().max(1));
    }

    /// Scrolls up by the focused panel's full visible height.
    pub fn full_page_up(&mut self) {
        self.scroll_up(self.focused_viewport().max(1));
    }

    // ------------------------------------------------------------------
    // API completions
    // ------------------------------------------------------------------

    /// Applies a completed backend call to app state.
    ///
    /// Called from the `AppEvent::Api` arm in main.rs. Tree completions are
    /// routed through the controller, whose tickets silently discard
    /// anything that was superseded — only completions that still apply can
    /// mutate state or raise a notice. Returns the history-store follow-up,
    /// if any, for the main loop to execute.
    pub fn apply_api_result(&mut self, result: ApiResult) -> Option<HistoryAction> {
        match result {
            ApiResult::Repositories(Ok(repos)) => {
                self.repos_loading = false;
                self.repos = repos;
                if self.repo_list_state.selected().is_none() && !self.repos.is_empty() {
                    self.repo_list_state.select(Some(0));
                }
            }
            ApiResult::Repositories(Err(err)) => {
                self.repos_loading = false;
                self.notify(NoticeLevel::Error, format!("Failed to load repositories: {err}"));
            }

            ApiResult::RootContents(ticket, Ok(entries)) => {
                if self.tree.apply_root(&ticket, entries) {
                    let rows = self.tree.visible_rows().len();
                    self.tree_state.select(if rows > 0 { Some(0) } else { None });
                }
            }
            ApiResult::RootContents(ticket, Err(err)) => {
                if self.tree.fail_root(&ticket) {
                    self.notify(
                        NoticeLevel::Error,
                        format!("Failed to load repository contents: {err}"),
                    );
                }
            }

            ApiResult::DirContents(ticket, Ok(entries)) => {
                self.tree.apply_children(&ticket, entries);
            }
            ApiResult::DirContents(ticket, Err(err)) => {
                if self.tree.fail_expand(&ticket) {
                    self.notify(
                        NoticeLevel::Error,
                        format!("Failed to load folder contents: {err}"),
                    );
                }
            }

            ApiResult::FileBody { path, result, .. } => {
                self.preview_loading = false;
                match result {
                    Ok(body) => {
                        self.preview = Some(Preview {
                            lines: highlight::highlight_file(&path, &body.content),
                            title: path,
                        });
                        self.preview_scroll = 0;
                        self.browser_focus = BrowserFocus::Preview;
                    }
                    Err(err) => {
                        self.notify(NoticeLevel::Error, format!("Failed to load file: {err}"));
                    }
                }
            }

            ApiResult::GenerateTests(Ok(response)) => {
                self.generating = false;
                let content = response.combined_content();
                let suites = response.results.len();
                self.output = Some(content.clone());
                self.output_scroll = 0;
                self.output_committed = false;
                self.notify(
                    NoticeLevel::Success,
                    format!("Generated {suites} test suite{}", if suites == 1 { "" } else { "s" }),
                );
                self.tab = Tab::Generator;
                return Some(HistoryAction::Record {
                    repo: self.commit_repo.clone().unwrap_or_default(),
                    file_path: self.commit_form.file_path.clone(),
                    technology: self.options.technology.clone(),
                    edge_cases: self.options.edge_cases.clone(),
                    content,
                });
            }
            ApiResult::GenerateTests(Err(err)) => {
                self.generating = false;
                self.notify(NoticeLevel::Error, format!("Failed to generate tests: {err}"));
            }

            ApiResult::CommitTests(Ok(response)) => {
                self.committing = false;
                if response.success {
                    self.output_committed = true;
                    let message = response
                        .message
                        .unwrap_or_else(|| "Tests committed successfully".to_owned());
                    self.notify(NoticeLevel::Success, message);
                    if let Some(id) = self.generated_record_id.clone() {
                        return Some(HistoryAction::MarkCommitted { id });
                    }
                } else {
                    let message =
                        response.message.unwrap_or_else(|| "Failed to commit tests".to_owned());
                    self.notify(NoticeLevel::Error, message);
                }
            }
            ApiResult::CommitTests(Err(err)) => {
                self.committing = false;
                self.notify(NoticeLevel::Error, format!("Failed to commit tests: {err}"));
            }

            ApiResult::AnalyzeFile { path, kind, result } => {
                self.preview_loading = false;
                match result {
                    Ok(analysis) => {
                        self.preview = Some(Preview {
                            title: format!("{} — {}", kind.title(), path),
                            lines: highlight::plain_lines(&analysis.result),
                        });
                        self.preview_scroll = 0;
                        self.browser_focus = BrowserFocus::Preview;
                    }
                    Err(err) => {
                        self.notify(NoticeLevel::Error, format!("AI analysis failed: {err}"));
                    }
                }
            }

            ApiResult::Analytics(Ok(snapshot)) => {
                self.analytics = Some(snapshot);
            }
            ApiResult::Analytics(Err(err)) => {
                // The background refresh failing should not nag the user on
                // other tabs; the dashboard only logged this too.
                if self.tab == Tab::Analytics {
                    self.notify(NoticeLevel::Error, format!("Failed to load analytics: {err}"));
                } else {
                    log::warn!("analytics refresh failed: {err}");
                }
            }

            ApiResult::PullRequests(Ok(groups)) => {
                self.pr_loading = false;
                self.pull_requests = groups;
            }
            ApiResult::PullRequests(Err(err)) => {
                self.pr_loading = false;
                if self.tab == Tab::PullRequests {
                    self.notify(
                        NoticeLevel::Error,
                        format!("Failed to load pull requests: {err}"),
                    );
                } else {
                    log::warn!("pull-request refresh failed: {err}");
                }
            }
        }
        None
    }
}
