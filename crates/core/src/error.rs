//! Error types for the extraction pipeline.
//!
//! Every stage of the pipeline fails with a [`DistillError`]. The variant
//! decides the HTTP status reported to the caller, and its `Display` text is
//! the message placed in the failure envelope.
//!
//! # Example
//!
//! ```rust
//! use distill_core::DistillError;
//!
//! let err = DistillError::UpstreamStatus(404);
//! assert_eq!(err.status_code().as_u16(), 502);
//! assert_eq!(err.to_string(), "Failed to fetch URL: HTTP 404");
//! ```

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the extraction pipeline.
///
/// Variants are grouped by the stage that produces them: request validation,
/// upstream fetch, content extraction, Markdown conversion, and internal
/// failures that can surface anywhere.
#[derive(Error, Debug)]
pub enum DistillError {
    /// The inbound request used a method other than GET.
    #[error("Method not allowed. Use GET.")]
    MethodNotAllowed,

    /// The `url` query parameter is absent or empty.
    #[error("Missing required parameter: url")]
    MissingUrl,

    /// The `url` query parameter is not an absolute http/https URL.
    #[error("Invalid URL format. Must be a valid http/https URL.")]
    InvalidUrl,

    /// The target answered with a non-2xx status.
    #[error("Failed to fetch URL: HTTP {0}")]
    UpstreamStatus(u16),

    /// The target answered 2xx with an empty or whitespace-only body.
    #[error("Empty HTML response from target URL")]
    EmptyBody,

    /// Readability found no article content on the page.
    #[error("Could not extract article content from the page")]
    NoContent,

    /// Markdown conversion produced nothing.
    #[error("Failed to convert article to markdown")]
    EmptyMarkdown,

    /// Transport failure while talking to the target (DNS, TLS, reset, body read).
    #[error("Internal error: {0}")]
    Http(#[from] reqwest::Error),

    /// The whole request outlived the configured lifetime.
    #[error("Internal error: Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Any other unexpected failure, including document parse errors and converter errors.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DistillError {
    /// HTTP status reported for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            DistillError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            DistillError::MissingUrl | DistillError::InvalidUrl => StatusCode::BAD_REQUEST,
            DistillError::UpstreamStatus(_) | DistillError::EmptyBody => StatusCode::BAD_GATEWAY,
            DistillError::NoContent | DistillError::EmptyMarkdown => StatusCode::UNPROCESSABLE_ENTITY,
            DistillError::Http(_) | DistillError::Timeout { .. } | DistillError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Returns `true` for 4xx errors, which are logged at `warn` rather than `error`.
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

/// Result type alias for DistillError.
pub type Result<T> = std::result::Result<T, DistillError>;
