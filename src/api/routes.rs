//! API route configuration.

use crate::api::handlers::{
    delete_link_handler, redirect_handler, search_handler, shorten_handler, stats_handler,
    update_link_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Routes for short link management, mounted under `/links`.
///
/// # Endpoints
///
/// - `GET    /search?original_url=`  - Short links for an exact original URL
/// - `POST   /shorten`               - Create a short link
/// - `GET    /{short_code}`          - Redirect to the original URL
/// - `PUT    /{short_code}`          - Change the original URL
/// - `DELETE /{short_code}`          - Delete a short link
/// - `GET    /{short_code}/stats`    - Visit statistics
pub fn link_routes() -> Router<AppState> {
    Router::new()
        .route("/search", get(search_handler))
        .route("/shorten", post(shorten_handler))
        .route(
            "/{short_code}",
            get(redirect_handler)
                .put(update_link_handler)
                .delete(delete_link_handler),
        )
        .route("/{short_code}/stats", get(stats_handler))
}
