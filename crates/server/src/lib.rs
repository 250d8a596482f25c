//! HTTP surface for the extraction pipeline.
//!
//! One endpoint, [`app::EXTRACT_PATH`], takes a `url` query parameter and
//! answers with the page's readable content as Markdown inside a JSON
//! envelope. See [`distill_core`] for the pipeline itself.

pub mod app;
pub mod config;
pub mod routes;

pub use app::{AppState, EXTRACT_PATH, build_app};
pub use config::{DEFAULT_LOG_FILTER, ServerConfig};
