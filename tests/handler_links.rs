mod common;

use axum_test::TestServer;
use link_shortener::infrastructure::cache::CacheService;
use serde_json::{Value, json};

fn setup() -> (TestServer, common::TestBackends) {
    let (state, backends) = common::create_test_state();
    let server = TestServer::new(common::create_test_app(state)).unwrap();
    (server, backends)
}

#[tokio::test]
async fn test_update_link() {
    let (server, backends) = setup();
    common::create_test_link(&backends, "upd1", "https://old.com").await;

    let response = server
        .put("/links/upd1")
        .json(&json!({ "orig_url": "https://new.com" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["short_url"], "upd1");
    assert_eq!(body["orig_url"], "https://new.com");
}

#[tokio::test]
async fn test_update_invalidates_cached_target() {
    let (server, backends) = setup();
    common::create_test_link(&backends, "upd2", "https://old.com").await;

    server.get("/links/upd2").await;
    assert!(backends.cache.get_url("upd2").await.unwrap().is_some());

    server
        .put("/links/upd2")
        .json(&json!({ "orig_url": "https://new.com" }))
        .await
        .assert_status_ok();

    assert!(backends.cache.get_url("upd2").await.unwrap().is_none());
    let response = server.get("/links/upd2").await;
    assert_eq!(response.header("location"), "https://new.com");
}

#[tokio::test]
async fn test_update_keeps_visit_stats() {
    let (server, backends) = setup();
    common::create_test_link(&backends, "upd3", "https://old.com").await;

    server.get("/links/upd3").await;
    server
        .put("/links/upd3")
        .json(&json!({ "orig_url": "https://new.com" }))
        .await;

    let stats: Value = server.get("/links/upd3/stats").await.json();
    assert_eq!(stats["get_num"], 1);
}

#[tokio::test]
async fn test_update_not_found() {
    let (server, backends) = setup();

    let response = server
        .put("/links/missing")
        .json(&json!({ "orig_url": "https://new.com" }))
        .await;

    response.assert_status_not_found();
    assert!(backends.repository.is_empty());
}

#[tokio::test]
async fn test_update_invalid_url() {
    let (server, backends) = setup();
    common::create_test_link(&backends, "upd4", "https://old.com").await;

    let response = server
        .put("/links/upd4")
        .json(&json!({ "orig_url": "nope" }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_delete_link() {
    let (server, backends) = setup();
    common::create_test_link(&backends, "del1", "https://example.com").await;

    let response = server.delete("/links/del1").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "deleted");
    assert!(backends.repository.is_empty());
}

#[tokio::test]
async fn test_delete_invalidates_cache() {
    let (server, backends) = setup();
    common::create_test_link(&backends, "del2", "https://example.com").await;

    server.get("/links/del2").await;
    server.delete("/links/del2").await.assert_status_ok();

    assert!(backends.cache.get_url("del2").await.unwrap().is_none());
    server.get("/links/del2").await.assert_status_not_found();
}

#[tokio::test]
async fn test_delete_not_found() {
    let (server, _backends) = setup();

    let response = server.delete("/links/missing").await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_delete_twice() {
    let (server, backends) = setup();
    common::create_test_link(&backends, "del3", "https://example.com").await;

    server.delete("/links/del3").await.assert_status_ok();
    server.delete("/links/del3").await.assert_status_not_found();
}

#[tokio::test]
async fn test_update_rejects_url_unusable_as_redirect() {
    let (server, backends) = setup();
    common::create_test_link(&backends, "upd5", "https://old.com").await;

    let response = server
        .put("/links/upd5")
        .json(&json!({ "orig_url": "https://new.com/a\nb" }))
        .await;

    response.assert_status_bad_request();

    let redirect = server.get("/links/upd5").await;
    assert_eq!(redirect.status_code(), 307);
    assert_eq!(redirect.header("location"), "https://old.com");

    let stats: Value = server.get("/links/upd5/stats").await.json();
    assert_eq!(stats["get_num"], 1);
}
