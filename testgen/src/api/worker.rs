//! Worker task that turns `ApiRequest`s into backend calls.
//!
//! The dispatcher task receives requests and spawns one tokio task per
//! request on a cloned `ApiClient` (the client shares its connection pool
//! across clones, so this is cheap). Requests therefore run concurrently
//! and completions arrive in arbitrary order — expands of unrelated
//! directories never wait on each other, and the controller's tickets sort
//! out anything that was superseded in the meantime.

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

use testgen_core::api::ApiClient;

use crate::api::types::{ApiRequest, ApiResult};
use crate::event::AppEvent;

/// Spawns the API dispatcher task.
///
/// Runs until the request sender is dropped. Send errors toward the event
/// channel are ignored — if the receiver is gone the application is
/// shutting down and the completion has nowhere useful to go.
pub fn spawn_api_worker(
    client: ApiClient,
    mut rx: UnboundedReceiver<ApiRequest>,
    event_tx: UnboundedSender<AppEvent>,
) {
    tokio::spawn(async move {
        while let Some(request) = rx.recv().await {
            let client = client.clone();
            let tx = event_tx.clone();
            tokio::spawn(async move {
                let result = handle_request(&client, request).await;
                let _ = tx.send(AppEvent::Api(Box::new(result)));
            });
        }
    });
}

/// Performs one backend call and wraps the outcome for the event channel.
///
/// Failures are data here, not control flow: every arm produces an
/// `ApiResult` carrying the `Result`, and the main loop decides what a
/// failure means for the state it owns.
async fn handle_request(client: &ApiClient, request: ApiRequest) -> ApiResult {
    match request {
        ApiRequest::Repositories => ApiResult::Repositories(client.repositories().await),
        ApiRequest::RootContents(ticket) => {
            let result = client.contents(&ticket.repo, "").await;
            ApiResult::RootContents(ticket, result)
        }
        ApiRequest::DirContents(ticket) => {
            let result = client.contents(&ticket.repo, &ticket.path).await;
            ApiResult::DirContents(ticket, result)
        }
        ApiRequest::FileBody { repo, path } => {
            let result = client.file_content(&repo, &path).await;
            ApiResult::FileBody { repo, path, result }
        }
        ApiRequest::GenerateTests(request) => {
            ApiResult::GenerateTests(client.generate_tests(&request).await)
        }
        ApiRequest::CommitTests(request) => {
            ApiResult::CommitTests(client.commit_tests(&request).await)
        }
        ApiRequest::AnalyzeFile(request) => {
            let path = request.file_path.clone();
            let kind = request.analysis_type;
            let result = client.code_analysis(&request).await;
            ApiResult::AnalyzeFile { path, kind, result }
        }
        ApiRequest::Analytics => ApiResult::Analytics(client.analytics().await),
        ApiRequest::PullRequests => ApiResult::PullRequests(client.pull_requests().await),
    }
}
