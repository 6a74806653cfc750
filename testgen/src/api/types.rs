//! Owned message types for the API worker channel.
//!
//! Requests flow main loop → worker; results flow back as
//! `AppEvent::Api(Box<ApiResult>)`. Every payload is fully owned so values
//! cross task boundaries freely. Tree-listing messages carry the controller
//! ticket out and back — the ticket, not arrival order, decides whether a
//! completion still applies.

use testgen_core::error::FetchError;
use testgen_core::tree::{ExpandTicket, RootTicket};
use testgen_core::types::{
    AnalysisKind, AnalysisRequest, AnalysisResponse, AnalyticsSnapshot, CommitRequest,
    CommitResponse, EntrySummary, FileContent, GenerateRequest, GenerateResponse,
    PullRequestGroup, RepoSummary,
};

/// Commands sent from the main loop to the API worker.
#[derive(Debug)]
pub enum ApiRequest {
    /// Fetch the repository list for the Repositories tab.
    Repositories,
    /// Fetch a repository's top-level listing. The ticket came from
    /// `FileTreeController::begin_load_root`.
    RootContents(RootTicket),
    /// Fetch the immediate children of one directory. The ticket came from
    /// `FileTreeController::begin_expand`.
    DirContents(ExpandTicket),
    /// Fetch one file's content for the preview panel.
    FileBody { repo: String, path: String },
    /// Submit the flattened selection for test generation.
    GenerateTests(GenerateRequest),
    /// Commit a generated suite back to its repository.
    CommitTests(CommitRequest),
    /// Run a refactor/vulnerability analysis for one file.
    AnalyzeFile(AnalysisRequest),
    /// Refresh the analytics counters.
    Analytics,
    /// Refresh the pull-request listing.
    PullRequests,
}

/// Completions sent from the API worker back to the main loop.
///
/// Carried inside `AppEvent::Api(Box<ApiResult>)`; boxed to keep the event
/// enum small on the channel, since generation responses can be large.
#[derive(Debug)]
pub enum ApiResult {
    Repositories(Result<Vec<RepoSummary>, FetchError>),
    RootContents(RootTicket, Result<Vec<EntrySummary>, FetchError>),
    DirContents(ExpandTicket, Result<Vec<EntrySummary>, FetchError>),
    FileBody {
        repo: String,
        path: String,
        result: Result<FileContent, FetchError>,
    },
    GenerateTests(Result<GenerateResponse, FetchError>),
    CommitTests(Result<CommitResponse, FetchError>),
    AnalyzeFile {
        path: String,
        kind: AnalysisKind,
        result: Result<AnalysisResponse, FetchError>,
    },
    Analytics(Result<AnalyticsSnapshot, FetchError>),
    PullRequests(Result<Vec<PullRequestGroup>, FetchError>),
}
