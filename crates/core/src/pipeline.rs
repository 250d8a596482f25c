//! The extraction pipeline.
//!
//! [`Pipeline`] runs the fetch, extract and serialize stages strictly in
//! order. Each stage fails fast; nothing is retried and no partial result is
//! returned.
//!
//! # Example
//!
//! ```rust,no_run
//! use distill_core::{ExtractionRequest, Pipeline};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pipeline = Pipeline::new()?;
//! let request = ExtractionRequest::from_param(Some("https://example.com/article"))?;
//! let data = pipeline.run(&request).await?;
//! println!("{}\n\n{}", data.title, data.markdown);
//! # Ok(())
//! # }
//! ```

use url::Url;

use crate::Result;
use crate::extract::{ContentExtractor, ReadabilityExtractor};
use crate::fetch::{FetchConfig, Fetcher};
use crate::request::ExtractionRequest;
use crate::response::ArticleData;
use crate::serialize::{MarkdownOptions, MarkdownSerializer, MarkupSerializer};

/// Fetch → extract → serialize, with pluggable extraction and serialization.
///
/// A pipeline holds no per-request state and can be shared across tasks.
#[derive(Debug, Clone)]
pub struct Pipeline<E = ReadabilityExtractor, S = MarkdownSerializer> {
    fetcher: Fetcher,
    extractor: E,
    serializer: S,
    options: MarkdownOptions,
}

impl Pipeline {
    /// Creates a pipeline with the default fetcher, Readability and htmd.
    pub fn new() -> Result<Self> {
        let fetcher = Fetcher::new(FetchConfig::default())?;
        Ok(Self::with_components(fetcher, ReadabilityExtractor::default(), MarkdownSerializer))
    }
}

impl<E, S> Pipeline<E, S>
where
    E: ContentExtractor,
    S: MarkupSerializer,
{
    /// Creates a pipeline from explicit components and default Markdown options.
    pub fn with_components(fetcher: Fetcher, extractor: E, serializer: S) -> Self {
        Self { fetcher, extractor, serializer, options: MarkdownOptions::default() }
    }

    /// Replaces the Markdown options.
    pub fn markdown_options(mut self, options: MarkdownOptions) -> Self {
        self.options = options;
        self
    }

    /// Runs every stage for a validated request.
    pub async fn run(&self, request: &ExtractionRequest) -> Result<ArticleData> {
        let url = &request.target_url;
        let html = self.fetcher.fetch_html(url).await?;
        self.process(&html, url)
    }

    /// Runs the extraction and serialization stages on already-fetched HTML.
    ///
    /// `url` is the page's address, used to resolve relative links.
    pub fn process(&self, html: &str, url: &Url) -> Result<ArticleData> {
        let article = self.extractor.extract(html, url)?;
        tracing::debug!(url = %url, title = %article.title, length = article.length, "extracted article");

        let markdown = self.serializer.serialize(&article.content_markup, &self.options)?;
        tracing::debug!(url = %url, chars = markdown.len(), "converted article to markdown");

        Ok(ArticleData::new(article, markdown))
    }
}
