//! JSON error responses for the vote API

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::json;
use tracing::error;

use crate::Error;

/// Error body shared by every failing `/vote` response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub ok: bool,
    pub message: String,
}

/// Wrapper turning a service [`Error`] into an HTTP response
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// Map to an HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match &self.0 {
            Error::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            Error::Validation { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match self.0 {
            Error::RateLimited {
                remaining_seconds,
                cooldown_ms,
            } => {
                let body = json!({
                    "ok": false,
                    "message": format!(
                        "Voting too often. Try again in {remaining_seconds} seconds."
                    ),
                    "remainingSeconds": remaining_seconds,
                    "cooldownMs": cooldown_ms,
                });
                (status, Json(body)).into_response()
            }
            Error::Validation { message } => {
                (status, Json(ErrorBody { ok: false, message })).into_response()
            }
            other => {
                // Details stay in the log; the client gets a generic message.
                error!(error = %other, "vote request failed");
                let body = ErrorBody {
                    ok: false,
                    message: "An error occurred while processing the vote.".to_string(),
                };
                (status, Json(body)).into_response()
            }
        }
    }
}
