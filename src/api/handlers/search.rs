//! Handler for lookup by original URL.

use axum::{
    Json,
    extract::{Query, State},
};
use validator::Validate;

use crate::api::dto::links::{SearchQuery, ShortUrlResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Lists every short link pointing at an original URL.
///
/// # Endpoint
///
/// `GET /links/search?original_url=https://example.com`
///
/// The match is exact; no URL normalization is applied.
///
/// # Errors
///
/// Returns 404 Not Found if no short link matches.
/// Returns 400 Bad Request if `original_url` is missing or empty.
pub async fn search_handler(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<ShortUrlResponse>>, AppError> {
    query.validate()?;

    let records = state
        .link_service
        .search_by_original_url(&query.original_url)
        .await?;

    Ok(Json(records.into_iter().map(Into::into).collect()))
}
