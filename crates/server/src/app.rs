//! Application setup and server configuration.

use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    http::Method,
    response::{IntoResponse, Response},
    routing::{any, get},
};
use distill_core::{DistillError, Pipeline};
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::routes::{ApiResponse, extract_handler, health_handler, not_found};

/// Path of the extraction endpoint.
pub const EXTRACT_PATH: &str = "/api/readability";

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
    /// Lifetime of one extraction, from fetch to Markdown.
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(pipeline: Pipeline, config: &ServerConfig) -> Self {
        Self { pipeline: Arc::new(pipeline), request_timeout: config.request_timeout() }
    }
}

/// Turns a panic inside a handler into the 500 envelope.
fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown error".to_string()
    };

    tracing::error!(%message, "request handler panicked");
    ApiResponse::from(DistillError::Internal(message)).into_response()
}

/// Build the Axum application router
pub fn build_app(state: AppState) -> Router {
    let cors = CorsLayer::new().allow_origin(AnyOrigin).allow_methods([Method::GET]);

    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(CompressionLayer::new())
        .layer(cors);

    Router::new()
        .route(EXTRACT_PATH, any(extract_handler))
        .route("/health", get(health_handler))
        .fallback(not_found)
        .with_state(state)
        .layer(middleware)
}
