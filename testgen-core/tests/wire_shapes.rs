//! Decode/encode tests for the backend wire contract.
//!
//! The backend is out of scope, so these fixtures are the contract: listing
//! entries with extra fields, sparse analytics payloads, and the request
//! bodies the generation workflow submits.

use testgen_core::selection::SelectionStore;
use testgen_core::types::{
    AnalyticsSnapshot, CommitResponse, EntryKind, EntrySummary, GenerateRequest, GenerateResponse,
    GenerationOptions, PullRequestGroup, RepoSummary,
};

#[test]
fn contents_listing_decodes_with_extra_fields() {
    // The upstream listing carries size/sha/url fields we never use.
    let raw = r#"[
        {"name": "src", "path": "src", "type": "dir", "size": 0, "sha": "abc"},
        {"name": "main.py", "path": "main.py", "type": "file", "size": 1204}
    ]"#;
    let entries: Vec<EntrySummary> = serde_json::from_str(raw).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].kind, EntryKind::Dir);
    assert_eq!(entries[1].kind, EntryKind::File);
    assert_eq!(entries[1].path, "main.py");
}

#[test]
fn repo_summary_tolerates_missing_optionals() {
    let raw = r#"[{"full_name": "octo/demo", "name": "demo", "private": true}]"#;
    let repos: Vec<RepoSummary> = serde_json::from_str(raw).unwrap();
    assert_eq!(repos[0].full_name, "octo/demo");
    assert!(repos[0].private);
    assert!(repos[0].description.is_none());
    assert!(repos[0].language.is_none());
}

#[test]
fn sparse_analytics_payload_decodes_to_defaults() {
    let raw = r#"{"total_files_generated": 7, "technology_breakdown": {"python": 5}}"#;
    let analytics: AnalyticsSnapshot = serde_json::from_str(raw).unwrap();
    assert_eq!(analytics.total_files_generated, 7);
    assert_eq!(analytics.technology_breakdown.get("python"), Some(&5));
    assert_eq!(analytics.total_repos, 0);
    assert_eq!(analytics.average_quality_score, 0.0);
    assert!(analytics.daily_activity.is_empty());
    assert!(analytics.quality_trend.is_empty());
}

#[test]
fn generate_request_flattens_selection_in_store_order() {
    let mut selection = SelectionStore::new();
    selection.select_all([
        ("octo/two", "z.py"),
        ("octo/one", "b.py"),
        ("octo/one", "a.py"),
    ]);
    let options = GenerationOptions {
        technology: "pytest".to_owned(),
        edge_cases: vec!["null-input".to_owned()],
    };

    let request = GenerateRequest::from_selection(&selection, &options);
    let pairs: Vec<(&str, &str)> = request
        .files
        .iter()
        .map(|f| (f.repo.as_str(), f.path.as_str()))
        .collect();
    assert_eq!(
        pairs,
        [("octo/one", "a.py"), ("octo/one", "b.py"), ("octo/two", "z.py")],
        "grouped by repo, ordered within each repo"
    );

    // The serialized body matches what the endpoint expects.
    let body = serde_json::to_value(&request).unwrap();
    assert_eq!(body["technology"], "pytest");
    assert_eq!(body["edge_cases"][0], "null-input");
    assert_eq!(body["files"][0]["repo"], "octo/one");
    assert_eq!(body["files"][0]["path"], "a.py");
}

#[test]
fn generate_response_joins_suites_in_order() {
    let raw = r#"{"results": [
        {"file_path": "a.py", "test_content": "def test_a(): pass", "quality_score": 8.5},
        {"test_content": "def test_b(): pass"}
    ]}"#;
    let response: GenerateResponse = serde_json::from_str(raw).unwrap();
    assert_eq!(response.results.len(), 2);
    assert_eq!(response.results[0].quality_score, 8.5);
    assert_eq!(response.results[1].file_path, "", "missing file_path defaults");
    assert_eq!(
        response.combined_content(),
        "def test_a(): pass\n\ndef test_b(): pass"
    );
}

#[test]
fn commit_response_defaults_to_failure_shape() {
    let ok: CommitResponse =
        serde_json::from_str(r#"{"success": true, "message": "Tests committed successfully"}"#)
            .unwrap();
    assert!(ok.success);

    // A bare `{}` (or an error payload with unknown fields) reads as not-success.
    let empty: CommitResponse = serde_json::from_str("{}").unwrap();
    assert!(!empty.success);
    assert!(empty.message.is_none());
}

#[test]
fn pull_request_groups_decode_from_upstream_shape() {
    let raw = r#"[{
        "repo_name": "octo/demo",
        "pull_requests": [
            {"number": 12, "title": "Add CI", "state": "open",
             "html_url": "https://example.com/pr/12", "user": {"login": "octo"}}
        ]
    }]"#;
    let groups: Vec<PullRequestGroup> = serde_json::from_str(raw).unwrap();
    assert_eq!(groups[0].repo_name, "octo/demo");
    assert_eq!(groups[0].pull_requests[0].number, 12);
    assert_eq!(groups[0].pull_requests[0].state, "open");
}
