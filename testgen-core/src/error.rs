//! Error taxonomy for testgen.
//!
//! Three families, matching how failures are handled rather than where they
//! occur:
//!
//! - [`FetchError`] — any backend call that did not produce a well-formed
//!   2xx JSON response. Recoverable: the UI shows a transient notice and the
//!   affected tree node reverts to its pre-request state.
//! - [`InvalidOperation`] — caller misuse of the core API (e.g. toggling
//!   selection on a directory). A programming error, asserted in tests.
//! - [`StorageError`] — local history database failure. Non-fatal
//!   everywhere: call sites log a warning and continue with in-memory state.

use thiserror::Error;

/// A backend call failed: transport error, non-2xx status, or a body that
/// could not be decoded as the expected JSON shape.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a usable response (connect/timeout/TLS).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status. `message` is the backend's
    /// `{"error": ...}` payload when one was present, otherwise the HTTP
    /// reason phrase.
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The server answered 2xx but the body was not the expected JSON.
    #[error("server returned an unexpected response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Caller misuse of the selection/tree API.
///
/// These indicate a bug in the calling layer, not a runtime condition to
/// recover from — the keybinding dispatcher only routes file actions to file
/// rows, so hitting one of these in production means the row model and the
/// tree disagree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidOperation {
    /// A selection toggle or preview was requested for a directory node.
    #[error("not a file: {path}")]
    NotAFile { path: String },

    /// An expand/collapse was requested for a file node.
    #[error("not a directory: {path}")]
    NotADirectory { path: String },

    /// The path names no node in the materialized tree.
    #[error("no such node: {path}")]
    UnknownPath { path: String },
}

impl InvalidOperation {
    /// The offending path, for log context.
    pub fn path(&self) -> &str {
        match self {
            InvalidOperation::NotAFile { path }
            | InvalidOperation::NotADirectory { path }
            | InvalidOperation::UnknownPath { path } => path,
        }
    }
}

/// Local history store failure.
///
/// Always treated as soft: the application runs fully without the database,
/// so callers log and move on rather than propagating this upward.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("history database failure: {0}")]
    Db(#[from] tokio_rusqlite::Error),

    /// Encoding a record field (e.g. the edge-case list) for storage failed.
    #[error("history encoding failure: {0}")]
    Encode(#[from] serde_json::Error),
}
