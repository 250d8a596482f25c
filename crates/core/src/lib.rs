//! Readable-article extraction for a single web page.
//!
//! The crate is a four-stage pipeline: [`validate`] checks the inbound
//! request, [`Fetcher`] downloads the page, a [`ContentExtractor`] picks the
//! main article, and a [`MarkupSerializer`] renders it as Markdown.
//! [`Pipeline`] drives the last three stages and [`ExtractionResponse`] is
//! the JSON envelope handed back to callers.

pub mod error;
pub mod extract;
pub mod fetch;
pub mod pipeline;
pub mod request;
pub mod response;
pub mod serialize;

pub use error::{DistillError, Result};
pub use extract::{ContentExtractor, ExtractConfig, ExtractedArticle, ReadabilityDocument, ReadabilityExtractor};
pub use fetch::{ACCEPT_HTML, DEFAULT_USER_AGENT, FetchConfig, FetchResult, Fetcher};
pub use pipeline::Pipeline;
pub use request::{ExtractionRequest, URL_PARAM, validate};
pub use response::{ArticleData, CACHE_CONTROL, ExtractionResponse};
pub use serialize::{
    CodeBlockStyle, HeadingStyle, MarkdownOptions, MarkdownSerializer, MarkupSerializer, convert_to_markdown,
};
