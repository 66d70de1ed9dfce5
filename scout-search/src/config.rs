//! Search and fetch configuration with sensible defaults.
//!
//! [`SearchConfig`] controls which engine is queried, request timeouts and
//! the identifying User-Agent. The defaults favour the scraper-friendly
//! DuckDuckGo HTML endpoint.

use crate::error::SearchError;
use crate::types::SearchEngine;
use serde::{Deserialize, Serialize};

/// Configuration shared by search and page fetch requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Which search engine to scrape.
    pub engine: SearchEngine,
    /// Search request timeout in seconds.
    pub timeout_seconds: u64,
    /// Page fetch timeout in seconds.
    pub fetch_timeout_seconds: u64,
    /// Whether to request safe search filtering.
    pub safe_search: bool,
    /// Custom User-Agent string. If `None`, rotates through a built-in list
    /// of realistic browser User-Agents.
    pub user_agent: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            engine: SearchEngine::DuckDuckGo,
            timeout_seconds: 10,
            fetch_timeout_seconds: 20,
            safe_search: true,
            user_agent: None,
        }
    }
}

impl SearchConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Both timeouts must be greater than zero and a custom User-Agent, when
    /// set, must not be blank.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.fetch_timeout_seconds == 0 {
            return Err(SearchError::Config(
                "fetch_timeout_seconds must be greater than 0".into(),
            ));
        }
        if matches!(self.user_agent.as_deref(), Some(ua) if ua.trim().is_empty()) {
            return Err(SearchError::Config("user_agent must not be blank".into()));
        }
        Ok(())
    }
}
