//! # scout-search
//!
//! Web search and page text extraction for the scout research agent.
//!
//! Scrapes public search engine HTML pages directly (no API keys) and
//! downloads result pages, reducing them to bounded plain text that can be
//! handed to a language model.
//!
//! ## Design
//!
//! - One engine per search, selected by [`SearchConfig::engine`]
//! - Results are returned in provider order with no deduplication
//! - User-Agent rotation for reliability
//! - Search queries are logged only at trace level

pub mod config;
pub mod content;
pub mod engine;
pub mod engines;
pub mod error;
pub mod fetch;
pub mod http;
pub mod types;

pub use config::SearchConfig;
pub use engine::SearchEngineTrait;
pub use error::{Result, SearchError};
pub use fetch::fetch_page;
pub use types::{PageContent, SearchEngine, SearchResult};

use engines::{BingEngine, DuckDuckGoEngine};

/// Search the web with the engine named in `config`.
///
/// Returns at most `max_results` results in the provider's ranking order.
/// A `max_results` of zero returns an empty list without any request.
///
/// # Errors
///
/// Returns [`SearchError::Config`] for an invalid configuration, otherwise
/// whatever the engine reports (transport, status or parse failures).
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> scout_search::Result<()> {
/// let config = scout_search::SearchConfig::default();
/// let results = scout_search::search("rust programming", 3, &config).await?;
/// for result in &results {
///     println!("{}: {}", result.title, result.url);
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search(
    query: &str,
    max_results: usize,
    config: &SearchConfig,
) -> Result<Vec<SearchResult>> {
    config.validate()?;
    if max_results == 0 {
        return Ok(Vec::new());
    }
    match config.engine {
        SearchEngine::DuckDuckGo => {
            DuckDuckGoEngine::default()
                .search(query, max_results, config)
                .await
        }
        SearchEngine::Bing => BingEngine::default().search(query, max_results, config).await,
    }
}
