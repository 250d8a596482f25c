//! Main-content extraction.
//!
//! Extraction happens in two steps behind the [`ContentExtractor`] trait:
//! building a document tree anchored to the page URL, then running a
//! readability pass over it to pick the article node and its metadata.
//!
//! [`ReadabilityExtractor`] is the default implementation. It delegates both
//! steps to `dom_smoothie`, a port of Mozilla's Readability, which scores
//! DOM subtrees by text density and tag semantics and strips navigation,
//! ads, scripts and styles from the winning candidate.
//!
//! # Example
//!
//! ```rust
//! use distill_core::{ContentExtractor, ReadabilityExtractor};
//! use url::Url;
//!
//! let html = r#"<html><head><title>Notes on Tides</title></head><body><article>
//!     <p>The tide rises and falls twice a day along most of the coast, pulled by the moon.</p>
//!     <p>Spring tides arrive when the sun and moon line up, and neap tides when they do not.</p>
//! </article></body></html>"#;
//!
//! let extractor = ReadabilityExtractor::default();
//! let base = Url::parse("https://example.com/tides").unwrap();
//! let tree = extractor.parse_document(html, &base).unwrap();
//! let article = extractor.extract_main_content(tree).unwrap().unwrap();
//! assert!(article.content_markup.contains("neap tides"));
//! ```

use dom_smoothie::{Article, Config, Readability};
use scraper::{Html, Selector};
use url::Url;

use crate::{DistillError, Result};

/// The article picked out of a page.
///
/// `content_markup` is an HTML fragment; it is never blank for an article
/// returned by a [`ContentExtractor`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedArticle {
    /// Best-guess article title, empty when none was found.
    pub title: String,
    /// Author line, if detectable.
    pub byline: Option<String>,
    /// Short description or first paragraph.
    pub excerpt: Option<String>,
    /// Publisher name, if present.
    pub site_name: Option<String>,
    /// Cleaned HTML of the main content node.
    pub content_markup: String,
    /// Character count of the article text.
    pub length: usize,
}

/// Capability interface for document parsing and readability extraction.
///
/// Implementations may hold non-`Send` document trees; the tree never leaves
/// the synchronous extraction step.
pub trait ContentExtractor: Send + Sync {
    /// Parsed, navigable document.
    type Tree;

    /// Builds a document tree from `html`, resolving relative references against `base_url`.
    ///
    /// # Errors
    ///
    /// Any failure here is unexpected and reported as [`DistillError::Internal`].
    fn parse_document(&self, html: &str, base_url: &Url) -> Result<Self::Tree>;

    /// Picks the main content of `tree`.
    ///
    /// Returns `Ok(None)` when the page has no extractable article.
    fn extract_main_content(&self, tree: Self::Tree) -> Result<Option<ExtractedArticle>>;

    /// Runs both steps and maps a missing article to [`DistillError::NoContent`].
    fn extract(&self, html: &str, base_url: &Url) -> Result<ExtractedArticle> {
        let tree = self.parse_document(html, base_url)?;
        self.extract_main_content(tree)?.ok_or(DistillError::NoContent)
    }
}

/// Readability settings.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Maximum number of elements to parse, 0 for no limit (default: 0).
    pub max_elements: usize,
    /// Minimum characters an article needs before fallbacks stop (default: 500).
    pub char_threshold: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self { max_elements: 0, char_threshold: 500 }
    }
}

/// A page parsed for readability extraction.
pub struct ReadabilityDocument {
    reader: Readability,
    /// Text of the page's only `<h1>`, if it has exactly one.
    sole_heading: Option<String>,
}

/// [`ContentExtractor`] backed by `dom_smoothie`.
#[derive(Debug, Clone, Default)]
pub struct ReadabilityExtractor {
    config: ExtractConfig,
}

impl ReadabilityExtractor {
    pub fn new(config: ExtractConfig) -> Self {
        Self { config }
    }

    fn readability_config(&self) -> Config {
        let max_elements_to_parse = if self.config.max_elements == 0 { usize::MAX } else { self.config.max_elements };

        Config { max_elements_to_parse, char_threshold: self.config.char_threshold, ..Default::default() }
    }
}

impl ContentExtractor for ReadabilityExtractor {
    type Tree = ReadabilityDocument;

    fn parse_document(&self, html: &str, base_url: &Url) -> Result<ReadabilityDocument> {
        let reader = Readability::new(html, Some(base_url.as_str()), Some(self.readability_config()))
            .map_err(|e| DistillError::Internal(e.to_string()))?;

        Ok(ReadabilityDocument { reader, sole_heading: sole_heading(html) })
    }

    fn extract_main_content(&self, mut tree: ReadabilityDocument) -> Result<Option<ExtractedArticle>> {
        let article = match tree.reader.parse() {
            Ok(article) => article,
            Err(err) => {
                tracing::debug!(error = ?err, "readability found no article");
                return Ok(None);
            }
        };

        if article.content.trim().is_empty() || article.text_content.trim().is_empty() {
            tracing::debug!("readability returned an empty article");
            return Ok(None);
        }

        let title = resolve_title(&article.title, tree.sole_heading.as_deref());
        Ok(Some(ExtractedArticle { title, ..ExtractedArticle::from(article) }))
    }
}

impl From<Article> for ExtractedArticle {
    fn from(article: Article) -> Self {
        Self {
            title: article.title,
            byline: article.byline,
            excerpt: article.excerpt,
            site_name: article.site_name,
            content_markup: article.content.to_string(),
            length: article.length,
        }
    }
}

/// Trimmed readability title, or the page's only `<h1>` when that title is blank.
fn resolve_title(title: &str, sole_heading: Option<&str>) -> String {
    match title.trim() {
        "" => sole_heading.unwrap_or_default().to_string(),
        title => title.to_string(),
    }
}

/// Whitespace-collapsed text of the single `<h1>` in `html`.
///
/// Pages with zero or several `<h1>` elements have no unambiguous heading.
fn sole_heading(html: &str) -> Option<String> {
    let selector = Selector::parse("h1").ok()?;
    let document = Html::parse_document(html);
    let mut headings = document.select(&selector);

    let heading = headings.next()?;
    if headings.next().is_some() {
        return None;
    }

    let text = heading.text().collect::<Vec<_>>().join(" ");
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    (!text.is_empty()).then_some(text)
}
