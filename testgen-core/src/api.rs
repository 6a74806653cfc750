//! Async client for the testgen backend HTTP API.
//!
//! The backend is opaque: this module owns the request/response contract
//! (paths, query encoding, JSON shapes) and nothing else. Every non-2xx or
//! non-JSON response becomes a [`FetchError`] at this boundary — callers
//! never see raw HTTP. The client is cheap to clone (the underlying
//! connection pool is shared), which is how the API worker fans requests
//! out onto independent tasks.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::FetchError;
use crate::types::{
    AnalysisRequest, AnalysisResponse, AnalyticsSnapshot, CommitRequest, CommitResponse,
    EntrySummary, FileContent, GenerateRequest, GenerateResponse, PullRequestGroup, RepoSummary,
};

/// HTTP client bound to one backend base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Builds a client for `base_url` (trailing slash tolerated) with a
    /// per-request timeout. Timeouts surface through the normal
    /// [`FetchError::Transport`] path — they are not modeled separately.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Transport` if the underlying client cannot be
    /// constructed (TLS backend initialization, essentially).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_owned() })
    }

    /// `GET /api/repositories`
    pub async fn repositories(&self) -> Result<Vec<RepoSummary>, FetchError> {
        self.get_json("/api/repositories", &[]).await
    }

    /// `GET /api/repository/{repo}/contents?path=`
    ///
    /// `repo` is an `owner/name` pair and travels in the URL path verbatim
    /// (the backend routes it as a path wildcard); `path` goes through query
    /// encoding. An empty `path` lists the repository root. Idempotent:
    /// the same arguments return the same listing regardless of call order.
    pub async fn contents(&self, repo: &str, path: &str) -> Result<Vec<EntrySummary>, FetchError> {
        self.get_json(&format!("/api/repository/{repo}/contents"), &[("path", path)])
            .await
    }

    /// `GET /api/repository/{repo}/file?path=`
    pub async fn file_content(&self, repo: &str, path: &str) -> Result<FileContent, FetchError> {
        self.get_json(&format!("/api/repository/{repo}/file"), &[("path", path)])
            .await
    }

    /// `POST /api/generate-tests`
    pub async fn generate_tests(
        &self,
        request: &GenerateRequest,
    ) -> Result<GenerateResponse, FetchError> {
        self.post_json("/api/generate-tests", request).await
    }

    /// `POST /api/commit-tests`
    pub async fn commit_tests(&self, request: &CommitRequest) -> Result<CommitResponse, FetchError> {
        self.post_json("/api/commit-tests", request).await
    }

    /// `POST /api/code-analysis`
    pub async fn code_analysis(
        &self,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResponse, FetchError> {
        self.post_json("/api/code-analysis", request).await
    }

    /// `GET /api/analytics`
    pub async fn analytics(&self) -> Result<AnalyticsSnapshot, FetchError> {
        self.get_json("/api/analytics", &[]).await
    }

    /// `GET /api/pull-requests`
    pub async fn pull_requests(&self) -> Result<Vec<PullRequestGroup>, FetchError> {
        self.get_json("/api/pull-requests", &[]).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, FetchError> {
        let response = self.http.get(self.url(path)).query(query).send().await?;
        decode(response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, FetchError> {
        let response = self.http.post(self.url(path)).json(body).send().await?;
        decode(response).await
    }
}

/// Turns a raw response into the expected type or a `FetchError`.
///
/// The body is read as text first so that non-2xx responses can have their
/// backend error message extracted, and so a 2xx body that is not JSON maps
/// to `Decode` rather than a transport error.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, FetchError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(FetchError::Status {
            status: status.as_u16(),
            message: error_message(&body, status),
        });
    }
    Ok(serde_json::from_str(&body)?)
}

/// Best-effort extraction of a human-readable message from an error body.
///
/// The backend answers failures with `{"error": msg}` (occasionally
/// `{"message": msg}`); proxies in front of it answer with HTML. Tries the
/// JSON shapes first, then falls back to the HTTP reason phrase — never the
/// raw body, which may be a full HTML page.
fn error_message(body: &str, status: reqwest::StatusCode) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        #[serde(default)]
        error: Option<String>,
        #[serde(default)]
        message: Option<String>,
    }

    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(message) = parsed.error.or(parsed.message) {
            return message;
        }
    }
    status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_backend_error_field() {
        let body = r#"{"error": "Failed to fetch contents"}"#;
        let msg = error_message(body, reqwest::StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(msg, "Failed to fetch contents");
    }

    #[test]
    fn error_message_accepts_message_field() {
        let body = r#"{"message": "rate limited"}"#;
        let msg = error_message(body, reqwest::StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(msg, "rate limited");
    }

    #[test]
    fn error_message_falls_back_on_html_bodies() {
        let body = "<!DOCTYPE html><html><body>gateway exploded</body></html>";
        let msg = error_message(body, reqwest::StatusCode::BAD_GATEWAY);
        assert_eq!(msg, "Bad Gateway");
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = ApiClient::new("http://localhost:5000/", Duration::from_secs(5)).unwrap();
        assert_eq!(client.url("/api/analytics"), "http://localhost:5000/api/analytics");
    }
}
