//! Handlers for link management endpoints (update, delete).

use axum::{
    Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::api::dto::links::{DeleteResponse, ShortUrlResponse, UrlUpdate};
use crate::error::AppError;
use crate::state::AppState;

/// Points a short link at a new URL.
///
/// # Endpoint
///
/// `PUT /links/{short_code}`
///
/// # Request Body
///
/// ```json
/// { "orig_url": "https://new-destination.com" }
/// ```
///
/// # Cache
///
/// The cache entry for this code is invalidated so the next redirect uses the
/// updated destination.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
/// Returns 400 Bad Request if validation fails.
pub async fn update_link_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<UrlUpdate>,
) -> Result<Json<ShortUrlResponse>, AppError> {
    payload.validate()?;

    let record = state
        .link_service
        .update_link(&short_code, &payload.orig_url)
        .await?;

    Ok(Json(record.into()))
}

/// Deletes a short link.
///
/// # Endpoint
///
/// `DELETE /links/{short_code}`
///
/// # Cache
///
/// The cache entry for this code is invalidated once the row is gone, so the
/// next redirect returns 404 without waiting for TTL expiry.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn delete_link_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<DeleteResponse>, AppError> {
    state.link_service.delete_link(&short_code).await?;

    Ok(Json(DeleteResponse::deleted()))
}
