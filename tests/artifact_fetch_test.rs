//! Integration tests for artifact listing and concurrent report downloads.

use mockito::Server;
use wpt_progress::domain::models::{ArtifactPolicy, RetryConfig, TaskRef, TaskState};
use wpt_progress::infrastructure::taskcluster::QueueClient;
use wpt_progress::services::artifacts::{ArtifactError, ArtifactFetcher};

fn fast_retry() -> RetryConfig {
    RetryConfig {
        max_retries: 1,
        initial_backoff_ms: 1,
        max_backoff_ms: 5,
        timeout_secs: 5,
    }
}

fn task(id: &str) -> TaskRef {
    TaskRef {
        task_id: id.to_string(),
        name: format!("test-{id}"),
        state: TaskState::Completed,
    }
}

async fn mock_task_with_report(server: &mut mockito::ServerGuard, id: &str, body: &str) {
    server
        .mock("GET", format!("/api/queue/v1/task/{id}/artifacts").as_str())
        .with_status(200)
        .with_body(
            serde_json::json!({
                "artifacts": [
                    { "name": "public/test_info/wptreport.json" },
                    { "name": "public/logs/live_backing.log" }
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    server
        .mock(
            "GET",
            format!("/api/queue/v1/task/{id}/artifacts/public/test_info/wptreport.json").as_str(),
        )
        .with_status(200)
        .with_body(body.to_string())
        .create_async()
        .await;
}

#[tokio::test]
async fn downloads_only_report_artifacts() {
    let mut server = Server::new_async().await;
    mock_task_with_report(
        &mut server,
        "t1",
        r#"{"results": [{"test": "/a.html", "status": "PASS"}]}"#,
    )
    .await;

    let queue = QueueClient::new(&server.url(), &fast_retry()).unwrap();
    let fetcher = ArtifactFetcher::new(&queue, ArtifactPolicy::FailFast);

    let reports = fetcher.download_reports(&[task("t1")]).await.unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].results[0].test.as_deref(), Some("/a.html"));
}

#[tokio::test]
async fn task_without_report_artifact_contributes_nothing() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/queue/v1/task/t1/artifacts")
        .with_status(200)
        .with_body(
            serde_json::json!({
                "artifacts": [ { "name": "public/logs/live_backing.log" } ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let queue = QueueClient::new(&server.url(), &fast_retry()).unwrap();
    let fetcher = ArtifactFetcher::new(&queue, ArtifactPolicy::FailFast);

    let reports = fetcher.download_reports(&[task("t1")]).await.unwrap();
    assert!(reports.is_empty());
}

#[tokio::test]
async fn fail_fast_aborts_the_batch_on_one_failure() {
    let mut server = Server::new_async().await;
    mock_task_with_report(&mut server, "t1", r#"{"results": []}"#).await;

    // t2 lists a report but serving it fails
    server
        .mock("GET", "/api/queue/v1/task/t2/artifacts")
        .with_status(200)
        .with_body(
            serde_json::json!({
                "artifacts": [ { "name": "public/test_info/wptreport.json" } ]
            })
            .to_string(),
        )
        .create_async()
        .await;
    server
        .mock(
            "GET",
            "/api/queue/v1/task/t2/artifacts/public/test_info/wptreport.json",
        )
        .with_status(404)
        .with_body("{}")
        .create_async()
        .await;

    let queue = QueueClient::new(&server.url(), &fast_retry()).unwrap();
    let fetcher = ArtifactFetcher::new(&queue, ArtifactPolicy::FailFast);

    let err = fetcher
        .download_reports(&[task("t1"), task("t2")])
        .await
        .unwrap_err();
    assert!(matches!(err, ArtifactError::Fetch { task_id, .. } if task_id == "t2"));
}

#[tokio::test]
async fn skip_failed_keeps_the_surviving_reports() {
    let mut server = Server::new_async().await;
    mock_task_with_report(
        &mut server,
        "t1",
        r#"{"results": [{"test": "/a.html", "status": "PASS"}]}"#,
    )
    .await;

    server
        .mock("GET", "/api/queue/v1/task/t2/artifacts")
        .with_status(200)
        .with_body(
            serde_json::json!({
                "artifacts": [ { "name": "public/test_info/wptreport.json" } ]
            })
            .to_string(),
        )
        .create_async()
        .await;
    server
        .mock(
            "GET",
            "/api/queue/v1/task/t2/artifacts/public/test_info/wptreport.json",
        )
        .with_status(404)
        .with_body("{}")
        .create_async()
        .await;

    let queue = QueueClient::new(&server.url(), &fast_retry()).unwrap();
    let fetcher = ArtifactFetcher::new(&queue, ArtifactPolicy::SkipFailed);

    let reports = fetcher
        .download_reports(&[task("t1"), task("t2")])
        .await
        .unwrap();
    assert_eq!(reports.len(), 1);
}
