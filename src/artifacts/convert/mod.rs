//! HTML to Markdown conversion
//!
//! Pages are parsed with `scraper` (html5ever tree building and character references);
//! `wikipedia` walks that tree and renders the MediaWiki article body as Markdown.

pub mod wikipedia;

use crate::artifacts::snapshot::article_title::ArticleTitle;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    #[error("could not find main article content")]
    MissingContent,
}

/// Turns a fetched page into the Markdown body of a snapshot record.
pub trait PageConverter: Send + Sync {
    /// `title` is the title from the article list, used when the page has no heading.
    fn convert(&self, html: &str, title: &ArticleTitle) -> Result<String, ConvertError>;
}
