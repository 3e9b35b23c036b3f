mod common;

use axum_test::TestServer;
use serde_json::{Value, json};

#[tokio::test]
async fn test_full_link_lifecycle() {
    let (state, _backends) = common::create_test_state();
    let server = TestServer::new(common::create_test_app(state)).unwrap();

    server
        .post("/links/shorten")
        .json(&json!({
            "orig_url": "https://example.com/page",
            "alias_url": "abc123"
        }))
        .await
        .assert_status_ok();

    // miss, then cache hit; both count
    for _ in 0..2 {
        let response = server.get("/links/abc123").await;
        assert_eq!(response.status_code(), 307);
        assert_eq!(response.header("location"), "https://example.com/page");
    }

    let stats: Value = server.get("/links/abc123/stats").await.json();
    assert_eq!(stats["get_num"], 2);
    assert!(stats["last_time"].is_string());

    server
        .put("/links/abc123")
        .json(&json!({ "orig_url": "https://example.org/new" }))
        .await
        .assert_status_ok();

    let response = server.get("/links/abc123").await;
    assert_eq!(response.header("location"), "https://example.org/new");

    let stats: Value = server.get("/links/abc123/stats").await.json();
    assert_eq!(stats["get_num"], 3);
    assert_eq!(stats["orig_url"], "https://example.org/new");

    server.delete("/links/abc123").await.assert_status_ok();

    server.get("/links/abc123").await.assert_status_not_found();
    server
        .get("/links/abc123/stats")
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_generated_code_lifecycle() {
    let (state, _backends) = common::create_test_state();
    let server = TestServer::new(common::create_test_app(state)).unwrap();

    let created: Value = server
        .post("/links/shorten")
        .json(&json!({ "orig_url": "https://example.com/page" }))
        .await
        .json();
    let code = created["short_url"].as_str().unwrap().to_string();
    let link = format!("/links/{code}");
    let stats_link = format!("/links/{code}/stats");

    for expected_visits in 1..=2 {
        let response = server.get(&link).await;
        assert_eq!(response.status_code(), 307);
        assert_eq!(response.header("location"), "https://example.com/page");

        let stats: Value = server.get(&stats_link).await.json();
        assert_eq!(stats["get_num"], expected_visits);
    }

    server
        .put(&link)
        .json(&json!({ "orig_url": "https://example.org/new" }))
        .await
        .assert_status_ok();

    let response = server.get(&link).await;
    assert_eq!(response.status_code(), 307);
    assert_eq!(response.header("location"), "https://example.org/new");

    let stats: Value = server.get(&stats_link).await.json();
    assert_eq!(stats["get_num"], 3);

    server.delete(&link).await.assert_status_ok();
    server.get(&link).await.assert_status_not_found();
}

#[tokio::test]
async fn test_alias_reusable_after_delete() {
    let (state, _backends) = common::create_test_state();
    let server = TestServer::new(common::create_test_app(state)).unwrap();

    server
        .post("/links/shorten")
        .json(&json!({ "orig_url": "https://first.com", "alias_url": "reuse" }))
        .await
        .assert_status_ok();
    server.get("/links/reuse").await;
    server.delete("/links/reuse").await.assert_status_ok();

    server
        .post("/links/shorten")
        .json(&json!({ "orig_url": "https://second.com", "alias_url": "reuse" }))
        .await
        .assert_status_ok();

    let response = server.get("/links/reuse").await;
    assert_eq!(response.header("location"), "https://second.com");

    let stats: Value = server.get("/links/reuse/stats").await.json();
    assert_eq!(stats["get_num"], 1);
}
