mod common;

use axum_test::TestServer;
use link_shortener::domain::repositories::UrlRepository;
use link_shortener::infrastructure::cache::CacheService;
use serde_json::Value;

fn setup() -> (TestServer, common::TestBackends) {
    let (state, backends) = common::create_test_state();
    let server = TestServer::new(common::create_test_app(state)).unwrap();
    (server, backends)
}

#[tokio::test]
async fn test_redirect_success() {
    let (server, backends) = setup();
    common::create_test_link(&backends, "redirect1", "https://example.com/target").await;

    let response = server.get("/links/redirect1").await;

    assert_eq!(response.status_code(), 307);
    let location = response.header("location");
    assert_eq!(location, "https://example.com/target");
}

#[tokio::test]
async fn test_redirect_not_found() {
    let (server, backends) = setup();

    let response = server.get("/links/notfound").await;

    response.assert_status_not_found();
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "not_found");
    assert!(backends.cache.is_empty());
}

#[tokio::test]
async fn test_redirect_records_visit() {
    let (server, backends) = setup();
    common::create_test_link(&backends, "clickme", "https://example.com").await;

    server.get("/links/clickme").await;

    let record = backends
        .repository
        .find_by_code("clickme")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.visit_count, 1);
    assert!(record.last_visited_at.is_some());
}

#[tokio::test]
async fn test_redirect_populates_cache() {
    let (server, backends) = setup();
    common::create_test_link(&backends, "cached", "https://example.com").await;

    server.get("/links/cached").await;

    let cached = backends.cache.get_url("cached").await.unwrap();
    assert_eq!(cached.as_deref(), Some("https://example.com"));
}

#[tokio::test]
async fn test_cache_hit_still_counts_visit() {
    let (server, backends) = setup();
    common::create_test_link(&backends, "hot", "https://example.com").await;

    for _ in 0..3 {
        let response = server.get("/links/hot").await;
        assert_eq!(response.status_code(), 307);
    }

    let record = backends
        .repository
        .find_by_code("hot")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(record.visit_count, 3);
}

#[tokio::test]
async fn test_stale_cache_entry_for_deleted_code() {
    let (server, backends) = setup();
    common::create_test_link(&backends, "gone", "https://example.com").await;

    server.get("/links/gone").await;
    assert!(backends.cache.get_url("gone").await.unwrap().is_some());

    // removed behind the service's back, leaving the cache entry in place
    backends.repository.delete("gone").await.unwrap();

    let response = server.get("/links/gone").await;

    response.assert_status_not_found();
    assert!(backends.cache.get_url("gone").await.unwrap().is_none());
}
