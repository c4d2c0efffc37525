//! `POST /vote`

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::{ALLOW, COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use serde_json::json;

use super::{ApiError, AppState};
use crate::Error;
use crate::cooldown::marker_from_cookie_header;

/// Record a vote and refresh the caller's cooldown cookie
pub async fn submit(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let marker = headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(marker_from_cookie_header);

    let receipt = state.service.cast_vote(&body, marker, Utc::now()).await?;

    let cookie = state
        .service
        .cooldown()
        .cookie(receipt.marker, state.secure_cookies);
    let cookie = HeaderValue::from_str(&cookie)
        .map_err(|e| Error::internal(format!("failed to build cooldown cookie: {e}")))?;

    let mut response = (StatusCode::OK, Json(json!({ "ok": true }))).into_response();
    response.headers_mut().insert(SET_COOKIE, cookie);
    Ok(response)
}

/// Advertise the methods `/vote` answers
pub async fn options() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(ALLOW, "POST, OPTIONS")],
        Json(json!({})),
    )
}
