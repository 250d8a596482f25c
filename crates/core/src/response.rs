//! Response envelope returned to callers.

use reqwest::StatusCode;
use serde::Serialize;

use crate::extract::ExtractedArticle;
use crate::{DistillError, Result};

/// `Cache-Control` value attached to successful responses.
pub const CACHE_CONTROL: &str = "s-maxage=3600, stale-while-revalidate=86400";

/// Payload of a successful extraction.
///
/// Absent or blank metadata serializes as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleData {
    pub title: String,
    pub byline: Option<String>,
    pub excerpt: Option<String>,
    pub site_name: Option<String>,
    pub markdown: String,
    pub length: usize,
}

impl ArticleData {
    /// Combines the extractor's metadata with the serialized body.
    pub fn new(article: ExtractedArticle, markdown: String) -> Self {
        Self {
            title: article.title,
            byline: non_blank(article.byline),
            excerpt: non_blank(article.excerpt),
            site_name: non_blank(article.site_name),
            markdown,
            length: article.length,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// JSON envelope for every response.
///
/// A success never carries `error`; a failure never carries `data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ArticleData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExtractionResponse {
    pub fn success(data: ArticleData) -> Self {
        Self { success: true, data: Some(data), error: None }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self { success: false, data: None, error: Some(message.into()) }
    }

    /// Builds the status and envelope for a pipeline outcome.
    pub fn from_result(result: Result<ArticleData>) -> (StatusCode, Self) {
        match result {
            Ok(data) => (StatusCode::OK, Self::success(data)),
            Err(err) => (err.status_code(), Self::from(&err)),
        }
    }

    /// Returns the `Cache-Control` directive for this response, if any.
    pub fn cache_control(&self) -> Option<&'static str> {
        self.success.then_some(CACHE_CONTROL)
    }
}

impl From<&DistillError> for ExtractionResponse {
    fn from(err: &DistillError) -> Self {
        Self::failure(err.to_string())
    }
}
