//! Handler for link shortening endpoint.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::links::{ShortUrlCreate, ShortUrlResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /links/shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "orig_url": "https://example.com",
///   "alias_url": "my-link"   // optional
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "orig_url": "https://example.com",
///   "short_url": "my-link",
///   "registered_at": "2025-01-01T12:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if validation fails.
/// Returns 409 Conflict if the alias is already taken.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortUrlCreate>,
) -> Result<Json<ShortUrlResponse>, AppError> {
    payload.validate()?;

    let record = state
        .link_service
        .create_short_link(payload.orig_url, payload.alias_url)
        .await?;

    Ok(Json(record.into()))
}
