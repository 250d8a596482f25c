//! Inbound request validation.
//!
//! The validator is the first pipeline stage. It looks only at the HTTP
//! method and the decoded query parameters and either produces an
//! [`ExtractionRequest`] or fails with a 400/405 [`DistillError`].

use std::collections::HashMap;

use url::Url;

use crate::{DistillError, Result};

/// Name of the query parameter carrying the page to extract.
pub const URL_PARAM: &str = "url";

/// A validated extraction request.
///
/// The target is always an absolute URL with an `http` or `https` scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionRequest {
    pub target_url: Url,
}

impl ExtractionRequest {
    /// Parses the raw `url` parameter value.
    ///
    /// # Errors
    ///
    /// Returns [`DistillError::MissingUrl`] when the value is absent or empty,
    /// and [`DistillError::InvalidUrl`] when it is not an absolute http/https URL.
    pub fn from_param(raw: Option<&str>) -> Result<Self> {
        let raw = match raw {
            Some(value) if !value.is_empty() => value,
            _ => return Err(DistillError::MissingUrl),
        };

        let target_url = Url::parse(raw).map_err(|_| DistillError::InvalidUrl)?;
        match target_url.scheme() {
            "http" | "https" => Ok(Self { target_url }),
            _ => Err(DistillError::InvalidUrl),
        }
    }
}

/// Validates an inbound request.
///
/// `query` holds the decoded query parameters.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use distill_core::validate;
///
/// let mut query = HashMap::new();
/// query.insert("url".to_string(), "https://example.com/post".to_string());
///
/// let request = validate("GET", &query).unwrap();
/// assert_eq!(request.target_url.host_str(), Some("example.com"));
/// assert!(validate("POST", &query).is_err());
/// ```
pub fn validate(method: &str, query: &HashMap<String, String>) -> Result<ExtractionRequest> {
    if method != "GET" {
        return Err(DistillError::MethodNotAllowed);
    }

    ExtractionRequest::from_param(query.get(URL_PARAM).map(String::as_str))
}
