//! `GET /result`

use axum::Json;
use axum::extract::State;
use axum::http::header::{ALLOW, CACHE_CONTROL, EXPIRES, PRAGMA};
use axum::http::{HeaderName, StatusCode};
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use serde::Serialize;
use serde_json::json;

use super::AppState;
use crate::types::VoteResult;

/// Headers that keep every client and proxy from caching a snapshot
const NO_CACHE: [(HeaderName, &str); 3] = [
    (CACHE_CONTROL, "no-store, no-cache, must-revalidate"),
    (PRAGMA, "no-cache"),
    (EXPIRES, "0"),
];

/// Zeroed snapshot returned when the store cannot be read
#[derive(Debug, Serialize)]
struct FailedResult {
    #[serde(flatten)]
    result: VoteResult,
    error: &'static str,
}

/// Serve the current tallies
///
/// The body is always result-shaped: a read failure still answers with
/// zeroed counts plus an `error` field, under a 500.
pub async fn show(State(state): State<AppState>) -> Response {
    let now = Utc::now();

    match state.service.results(now).await {
        Ok(result) => (StatusCode::OK, NO_CACHE, Json(result)).into_response(),
        Err(_) => {
            let body = FailedResult {
                result: VoteResult::zeroed(now),
                error: "An error occurred while loading results.",
            };
            (StatusCode::INTERNAL_SERVER_ERROR, NO_CACHE, Json(body)).into_response()
        }
    }
}

/// Advertise the methods `/result` answers
pub async fn options() -> impl IntoResponse {
    (StatusCode::OK, [(ALLOW, "GET, OPTIONS")], Json(json!({})))
}
