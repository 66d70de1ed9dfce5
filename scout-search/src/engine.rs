//! The seam between [`crate::search`] and the per-provider scrapers.

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::types::{SearchEngine, SearchResult};

/// A search provider scraped over plain HTTP.
///
/// An implementation owns its endpoint, query parameters and selectors, and
/// yields results in the provider's ranking order, truncated to the
/// requested count.
pub trait SearchEngineTrait: Send + Sync {
    /// Query the provider for at most `max_results` hits.
    ///
    /// # Errors
    ///
    /// Transport failures, non-success statuses and unusable pages.
    fn search(
        &self,
        query: &str,
        max_results: usize,
        config: &SearchConfig,
    ) -> impl std::future::Future<Output = Result<Vec<SearchResult>, SearchError>> + Send;

    /// The provider this implementation scrapes.
    fn engine_type(&self) -> SearchEngine;
}
