//! Search and fetch seams, with adapters over `scout-search`.

use async_trait::async_trait;
use scout_search::{PageContent, SearchConfig, SearchError, SearchResult};

/// A search hit before fetching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Result title; may be empty.
    pub title: String,
    /// Result URL, unvalidated.
    pub url: String,
}

impl Candidate {
    /// Create a candidate.
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
        }
    }
}

impl From<SearchResult> for Candidate {
    fn from(result: SearchResult) -> Self {
        Self {
            title: result.title,
            url: result.url,
        }
    }
}

/// Web search returning candidates in provider order.
#[async_trait]
pub trait WebSearch: Send + Sync {
    /// Return at most `max_results` candidates.
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<Candidate>, SearchError>;
}

/// Page download and text extraction.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` and return at most `max_chars` characters of text.
    async fn fetch(&self, url: &str, max_chars: usize) -> Result<PageContent, SearchError>;
}

/// [`WebSearch`] over the HTML scraping engines.
#[derive(Debug, Clone, Default)]
pub struct ScrapingSearch {
    config: SearchConfig,
}

impl ScrapingSearch {
    /// Use `config` for engine choice and timeouts.
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl WebSearch for ScrapingSearch {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<Candidate>, SearchError> {
        let results = scout_search::search(query, max_results, &self.config).await?;
        Ok(results.into_iter().map(Candidate::from).collect())
    }
}

/// [`PageFetcher`] over [`scout_search::fetch_page`].
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    config: SearchConfig,
}

impl HttpFetcher {
    /// Use `config` for the fetch timeout and User-Agent.
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str, max_chars: usize) -> Result<PageContent, SearchError> {
        scout_search::fetch_page(url, max_chars, &self.config).await
    }
}
