pub mod extract;
pub mod health;

pub use extract::{ApiResponse, extract_handler};
pub use health::health_handler;

use axum::http::StatusCode;
use distill_core::ExtractionResponse;

/// Fallback for unknown paths
pub async fn not_found() -> ApiResponse {
    ApiResponse { status: StatusCode::NOT_FOUND, body: ExtractionResponse::failure("Not found") }
}
