//! Handler for link statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::links::ShortUrlStatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns a short link with its visit count and last visit time.
///
/// # Endpoint
///
/// `GET /links/{short_code}/stats`
///
/// Reads straight from the database; resolving through the cache never
/// affects these numbers except through the recorded visits.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn stats_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ShortUrlStatsResponse>, AppError> {
    let record = state.link_service.get_stats(&short_code).await?;

    Ok(Json(record.into()))
}
