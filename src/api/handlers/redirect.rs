//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /links/{short_code}`
///
/// # Request Flow
///
/// 1. Check cache for the redirect target
/// 2. On cache miss, query the database and cache the result
/// 3. Record the visit in the database (cache hit or miss)
/// 4. Return 307 Temporary Redirect
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn redirect_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let original_url = state.link_service.resolve(&short_code).await?;

    Ok(Redirect::temporary(&original_url))
}
