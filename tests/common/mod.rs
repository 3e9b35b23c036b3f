#![allow(dead_code)]

use axum::{Router, routing::get};
use link_shortener::api::handlers::health_handler;
use link_shortener::api::routes::link_routes;
use link_shortener::application::services::LinkService;
use link_shortener::domain::entities::NewUrlRecord;
use link_shortener::domain::repositories::UrlRepository;
use link_shortener::infrastructure::cache::MemoryCache;
use link_shortener::infrastructure::persistence::InMemoryUrlRepository;
use link_shortener::state::AppState;
use std::sync::Arc;

pub const TEST_CACHE_TTL: u64 = 60;

/// Handles to the backends behind a test [`AppState`], for direct inspection.
pub struct TestBackends {
    pub repository: Arc<InMemoryUrlRepository>,
    pub cache: Arc<MemoryCache>,
}

pub fn create_test_state() -> (AppState, TestBackends) {
    let repository = Arc::new(InMemoryUrlRepository::new());
    let cache = Arc::new(MemoryCache::new(TEST_CACHE_TTL));

    let link_service = Arc::new(LinkService::new(
        repository.clone(),
        cache.clone(),
        TEST_CACHE_TTL,
    ));

    (
        AppState::new(link_service),
        TestBackends { repository, cache },
    )
}

pub fn create_test_app(state: AppState) -> Router {
    Router::new()
        .nest("/links", link_routes())
        .route("/health", get(health_handler))
        .with_state(state)
}

pub async fn create_test_link(backends: &TestBackends, code: &str, url: &str) {
    backends
        .repository
        .insert(NewUrlRecord {
            short_code: code.to_string(),
            original_url: url.to_string(),
        })
        .await
        .unwrap();
}
