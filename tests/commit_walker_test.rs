//! Integration tests for the backward commit walk.

use std::time::Duration;

use mockito::Server;
use wpt_progress::infrastructure::hg::{HgClient, HgError};

fn client(server: &Server) -> HgClient {
    HgClient::new(server.url(), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn walk_yields_page_order_then_follows_the_parent() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/json-shortlog/tip")
        .with_status(200)
        .with_body(
            serde_json::json!({
                "changesets": [
                    { "node": "aaa", "parents": ["bbb"] },
                    { "node": "bbb", "parents": ["ccc"] }
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    server
        .mock("GET", "/json-shortlog/ccc")
        .with_status(200)
        .with_body(
            serde_json::json!({
                "changesets": [
                    { "node": "ccc", "parents": [] }
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let mut walker = client(&server).walk("tip");
    let mut commits = Vec::new();
    while let Some(commit) = walker.next().await.unwrap() {
        commits.push(commit);
    }

    assert_eq!(commits, vec!["aaa", "bbb", "ccc"]);
}

#[tokio::test]
async fn remote_error_is_fatal_not_exhaustion() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/json-shortlog/deadbeef")
        .with_status(200)
        .with_body(r#"{"error": "unknown revision 'deadbeef'"}"#)
        .create_async()
        .await;

    let mut walker = client(&server).walk("deadbeef");
    let err = walker.next().await.unwrap_err();
    assert!(matches!(err, HgError::Log(message) if message.contains("deadbeef")));
}

#[tokio::test]
async fn commit_description_degrades_to_not_found() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/json-changeset/abc1234567890")
        .with_status(404)
        .with_body("not json")
        .create_async()
        .await;

    let description = client(&server)
        .commit_description("abc1234567890")
        .await;
    assert_eq!(description.commit, "abc1234567");
    assert_eq!(description.description, "Not found");
    assert!(description.href.is_empty());
}

#[tokio::test]
async fn commit_description_reads_the_changeset() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/json-changeset/abc")
        .with_status(200)
        .with_body(r#"{"desc": "Bug 1 - fix everything"}"#)
        .create_async()
        .await;

    let description = client(&server).commit_description("abc").await;
    assert_eq!(description.commit, "abc");
    assert_eq!(description.description, "Bug 1 - fix everything");
    assert_eq!(
        description.href,
        format!("{}/changeset/abc", server.url())
    );
}
