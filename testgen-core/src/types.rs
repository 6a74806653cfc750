//! Wire and domain types shared between the core, the API worker, and the UI.
//!
//! Everything here is fully owned (no borrowed lifetimes) so values can be
//! carried across task boundaries inside events and stored in app state
//! without arena allocation. Response types lean on `#[serde(default)]`
//! because the backend omits fields freely — a sparse payload must still
//! decode, with zeroes/empties standing in for absent counters.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::selection::SelectionStore;

/// One repository as listed by `GET /api/repositories`.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoSummary {
    /// Unique `owner/name` identifier. This is the key used everywhere else
    /// (selection, tree, generation requests); equality is exact string match.
    pub full_name: String,
    /// Short display name (the part after the slash).
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub language: Option<String>,
}

/// Whether a listing entry is a file or a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Dir,
}

/// One immediate child from `GET /api/repository/{repo}/contents?path=`.
///
/// `path` is repository-relative and forward-slash separated; `name` is the
/// last segment. The backend makes no ordering promise — the tree sorts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntrySummary {
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

/// Body of `GET /api/repository/{repo}/file?path=`.
#[derive(Debug, Clone, Deserialize)]
pub struct FileContent {
    #[serde(default)]
    pub content: String,
}

/// User-chosen generation options: target technology plus the edge-case
/// categories the generated tests should cover.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOptions {
    pub technology: String,
    pub edge_cases: Vec<String>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self { technology: "python".to_owned(), edge_cases: Vec::new() }
    }
}

/// One `(repository, file)` pair inside a generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedFile {
    pub repo: String,
    pub path: String,
}

/// Request body for `POST /api/generate-tests`.
///
/// Derived, never stored: built by flattening the selection at the moment
/// the user triggers generation, so later selection edits cannot mutate an
/// in-flight request.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    pub files: Vec<SelectedFile>,
    pub technology: String,
    pub edge_cases: Vec<String>,
}

impl GenerateRequest {
    /// Flattens the current selection into an ordered request batch.
    ///
    /// Files appear grouped by repository in the store's iteration order,
    /// paths ordered within each repository. An empty selection yields an
    /// empty `files` list — callers gate on `SelectionStore::count()` before
    /// submitting.
    pub fn from_selection(selection: &SelectionStore, options: &GenerationOptions) -> Self {
        let files = selection
            .entries()
            .flat_map(|(repo, paths)| {
                paths.iter().map(move |path| SelectedFile {
                    repo: repo.to_owned(),
                    path: path.clone(),
                })
            })
            .collect();
        Self {
            files,
            technology: options.technology.clone(),
            edge_cases: options.edge_cases.clone(),
        }
    }
}

/// One generated test suite from the generation endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedTest {
    #[serde(default)]
    pub file_path: String,
    pub test_content: String,
    #[serde(default)]
    pub quality_score: f64,
}

/// Body of `POST /api/generate-tests` responses.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    pub results: Vec<GeneratedTest>,
}

impl GenerateResponse {
    /// Joins all per-file suites into the single buffer shown in the output
    /// panel and committed as one file.
    pub fn combined_content(&self) -> String {
        self.results
            .iter()
            .map(|r| r.test_content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Request body for `POST /api/commit-tests`.
#[derive(Debug, Clone, Serialize)]
pub struct CommitRequest {
    pub repo_name: String,
    pub test_content: String,
    pub file_path: String,
    pub message: String,
}

/// Response body for `POST /api/commit-tests` — success/failure only.
#[derive(Debug, Clone, Deserialize)]
pub struct CommitResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// The two analysis flavors offered per file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisKind {
    Refactor,
    Vulnerability,
}

impl AnalysisKind {
    /// Panel title for the analysis result view.
    pub fn title(self) -> &'static str {
        match self {
            AnalysisKind::Refactor => "Refactoring suggestions",
            AnalysisKind::Vulnerability => "Security assessment",
        }
    }
}

/// Request body for `POST /api/code-analysis`.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisRequest {
    pub repo_name: String,
    pub file_path: String,
    pub analysis_type: AnalysisKind,
}

/// Response body for `POST /api/code-analysis`.
///
/// Free-form text plus whatever metadata the model added; the core does not
/// interpret it beyond displaying it.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisResponse {
    #[serde(default)]
    pub result: String,
}

/// Per-day activity counters inside [`AnalyticsSnapshot::daily_activity`].
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct DailyActivity {
    #[serde(default)]
    pub test_cases: u64,
    #[serde(default)]
    pub analyses: u64,
}

/// Aggregate usage counters from `GET /api/analytics`.
///
/// Every field is defaulted: the backend recomputes this lazily and older
/// deployments omit whole sections. `BTreeMap` keeps breakdown rows in a
/// stable display order across refreshes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyticsSnapshot {
    #[serde(default)]
    pub total_files_generated: u64,
    #[serde(default)]
    pub total_repos: u64,
    #[serde(default)]
    pub total_analyses: u64,
    #[serde(default)]
    pub total_test_cases: u64,
    #[serde(default)]
    pub average_quality_score: f64,
    #[serde(default)]
    pub productivity_score: f64,
    #[serde(default)]
    pub quality_trend: String,
    #[serde(default)]
    pub technology_breakdown: BTreeMap<String, u64>,
    #[serde(default)]
    pub daily_activity: BTreeMap<String, DailyActivity>,
    #[serde(default)]
    pub critical_vulnerabilities_found: u64,
    #[serde(default)]
    pub high_vulnerabilities_found: u64,
    #[serde(default)]
    pub medium_vulnerabilities_found: u64,
    #[serde(default)]
    pub low_vulnerabilities_found: u64,
}

/// One pull request within a [`PullRequestGroup`].
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    #[serde(default)]
    pub title: String,
    /// `open` / `closed` per the upstream API.
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub html_url: Option<String>,
}

/// Pull requests for one repository, as returned by `GET /api/pull-requests`.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestGroup {
    pub repo_name: String,
    #[serde(default)]
    pub pull_requests: Vec<PullRequest>,
}

/// A generated test suite persisted in the local history store.
///
/// `status` is one of: `generated`, `committed`. `created_at` is a Unix
/// timestamp in seconds.
#[derive(Debug, Clone)]
pub struct StoredTestCase {
    pub id: String, // UUID v4 text
    pub repo: String,
    pub file_path: String,
    pub technology: String,
    pub edge_cases: Vec<String>,
    pub test_content: String,
    pub status: String,
    pub created_at: i64,
}
