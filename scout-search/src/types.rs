//! Core types for search results, engine identification and fetched pages.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single search result returned from a web search engine.
///
/// Results keep the order the provider returned them in; position encodes
/// the provider's relevance ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// The title of the result page. May be empty.
    pub title: String,
    /// The URL of the result, unwrapped from any engine redirect.
    pub url: String,
    /// A text snippet summarising the page content.
    pub snippet: String,
    /// Which search engine returned this result.
    pub engine: SearchEngine,
}

/// Supported search engines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchEngine {
    /// DuckDuckGo HTML frontend, no JavaScript required.
    #[default]
    DuckDuckGo,
    /// Bing results page; tracker links are decoded.
    Bing,
}

impl SearchEngine {
    /// Returns the human-readable name of this engine.
    pub fn name(&self) -> &'static str {
        match self {
            Self::DuckDuckGo => "DuckDuckGo",
            Self::Bing => "Bing",
        }
    }
}

impl fmt::Display for SearchEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Readable content extracted from a fetched web page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageContent {
    /// The URL that was fetched.
    pub url: String,
    /// The page title, at most [`crate::content::MAX_TITLE_CHARS`] characters.
    pub title: String,
    /// Visible text with whitespace collapsed, bounded by the caller's limit.
    pub text: String,
}

impl PageContent {
    /// Number of characters (not bytes) in the extracted text.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}
