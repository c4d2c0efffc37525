//! HTTP API for the voting service
//!
//! Routes, mounted both at the root and under `/api`:
//!
//! - `POST /vote`: record a vote (`{"choice": "jjajang" | "jjamppong"}`)
//! - `GET /result`: current tallies, never cached
//! - `OPTIONS /vote`, `OPTIONS /result`: advertise allowed methods
//! - `GET /health`: liveness check

mod error;
pub mod result;
pub mod vote;

use axum::Json;
use axum::Router;
use axum::extract::Request;
use axum::http::{HeaderValue, Method, header};
use axum::routing::{get, post};
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

pub use error::{ApiError, ErrorBody};

use crate::config::ServerConfig;
use crate::service::VoteService;
use crate::{Result, config_error};

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub service: VoteService,
    pub secure_cookies: bool,
}

impl AppState {
    pub fn new(service: VoteService, secure_cookies: bool) -> Self {
        Self {
            service,
            secure_cookies,
        }
    }
}

/// Build the axum [`Router`] for the vote API
pub fn router(state: AppState, server: &ServerConfig) -> Result<Router> {
    let routes = Router::new()
        .route("/vote", post(vote::submit).options(vote::options))
        .route("/result", get(result::show).options(result::options));

    let mut app = Router::new()
        .merge(routes.clone())
        .nest("/api", routes)
        .route("/health", get(health))
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
            tracing::info_span!(
                "http",
                method = %request.method(),
                uri = %request.uri(),
                request_id = %Uuid::new_v4(),
            )
        }));

    if let Some(origin) = &server.cors_origin {
        let origin = origin
            .parse::<HeaderValue>()
            .map_err(|_| config_error!("Invalid CORS_ORIGIN '{}'", origin))?;

        let cors = CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
            .allow_credentials(true);
        app = app.layer(cors);
    }

    Ok(app)
}

/// `GET /health`
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": crate::VERSION,
    }))
}
