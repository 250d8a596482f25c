//! HTML to Markdown conversion.
//!
//! The pipeline's last stage turns the extracted content fragment into
//! Markdown. Conversion sits behind [`MarkupSerializer`] and takes its
//! settings as an explicit [`MarkdownOptions`] record.

use htmd::HtmlToMarkdown;
use htmd::options::{CodeBlockStyle as HtmdCodeBlockStyle, HeadingStyle as HtmdHeadingStyle, Options};

use crate::{DistillError, Result};

/// How headings are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HeadingStyle {
    /// `# Heading`
    #[default]
    Atx,
    /// Underlined with `===` or `---`.
    Setext,
}

/// How preformatted code is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CodeBlockStyle {
    /// Triple-backtick fences.
    #[default]
    Fenced,
    /// Four-space indentation.
    Indented,
}

/// Configuration for Markdown conversion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkdownOptions {
    pub heading_style: HeadingStyle,
    pub code_block_style: CodeBlockStyle,
}

/// Capability interface for markup-to-text conversion.
pub trait MarkupSerializer: Send + Sync {
    /// Converts an HTML fragment.
    ///
    /// # Errors
    ///
    /// Returns [`DistillError::EmptyMarkdown`] when conversion fails or yields
    /// only whitespace.
    fn serialize(&self, markup: &str, options: &MarkdownOptions) -> Result<String>;
}

/// Elements dropped entirely during conversion.
const SKIPPED_TAGS: [&str; 4] = ["script", "style", "noscript", "iframe"];

/// [`MarkupSerializer`] backed by the `htmd` converter.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownSerializer;

impl MarkdownSerializer {
    fn converter(options: &MarkdownOptions) -> HtmlToMarkdown {
        let heading_style = match options.heading_style {
            HeadingStyle::Atx => HtmdHeadingStyle::Atx,
            HeadingStyle::Setext => HtmdHeadingStyle::Setex,
        };
        let code_block_style = match options.code_block_style {
            CodeBlockStyle::Fenced => HtmdCodeBlockStyle::Fenced,
            CodeBlockStyle::Indented => HtmdCodeBlockStyle::Indented,
        };

        HtmlToMarkdown::builder()
            .skip_tags(SKIPPED_TAGS.to_vec())
            .options(Options { heading_style, code_block_style, ..Default::default() })
            .build()
    }
}

impl MarkupSerializer for MarkdownSerializer {
    fn serialize(&self, markup: &str, options: &MarkdownOptions) -> Result<String> {
        finish(Self::converter(options).convert(markup))
    }
}

/// Trims converter output. A converter error is internal; only blank output is a serialization failure.
fn finish<E: std::fmt::Display>(converted: std::result::Result<String, E>) -> Result<String> {
    let markdown = converted.map_err(|err| {
        tracing::warn!(error = %err, "markdown conversion failed");
        DistillError::Internal(err.to_string())
    })?;

    let markdown = markdown.trim();
    if markdown.is_empty() {
        return Err(DistillError::EmptyMarkdown);
    }

    Ok(markdown.to_string())
}

/// Converts HTML to Markdown with the default serializer.
pub fn convert_to_markdown(html: &str, options: &MarkdownOptions) -> Result<String> {
    MarkdownSerializer.serialize(html, options)
}
