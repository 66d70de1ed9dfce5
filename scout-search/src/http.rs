//! HTTP clients for search pages and result pages.
//!
//! Both kinds of client look like an ordinary desktop browser: a cookie
//! store, an HTML `Accept` header and a User-Agent drawn from a small pool
//! unless the configuration pins one.

use crate::config::SearchConfig;
use crate::error::SearchError;
use rand::seq::SliceRandom;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use std::time::Duration;

const BROWSER_USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/134.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_4) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64; rv:136.0) Gecko/20100101 Firefox/136.0",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/134.0.0.0 Safari/537.36 Edg/134.0.0.0",
];

const HTML_ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const LANGUAGE: &str = "en-US,en;q=0.9";

/// What a client is used for; decides its timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientPurpose {
    /// Search engine result pages (`timeout_seconds`).
    Search,
    /// Arbitrary result pages (`fetch_timeout_seconds`).
    PageFetch,
}

impl ClientPurpose {
    /// The per-request timeout for this purpose.
    pub fn timeout(self, config: &SearchConfig) -> Duration {
        let secs = match self {
            Self::Search => config.timeout_seconds,
            Self::PageFetch => config.fetch_timeout_seconds,
        };
        Duration::from_secs(secs)
    }
}

/// Build a browser-like client for `purpose`.
///
/// Redirects follow reqwest's default policy.
///
/// # Errors
///
/// Returns [`SearchError::Http`] if the client cannot be constructed.
pub fn build_client(
    config: &SearchConfig,
    purpose: ClientPurpose,
) -> Result<reqwest::Client, SearchError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(HTML_ACCEPT));
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(LANGUAGE));

    reqwest::Client::builder()
        .cookie_store(true)
        .default_headers(headers)
        .timeout(purpose.timeout(config))
        .user_agent(user_agent_for(config))
        .build()
        .map_err(|e| SearchError::Http(format!("cannot build HTTP client: {e}")))
}

/// The configured User-Agent, or a random browser one.
pub fn user_agent_for(config: &SearchConfig) -> String {
    match config.user_agent.as_deref().map(str::trim) {
        Some(pinned) if !pinned.is_empty() => pinned.to_owned(),
        _ => random_user_agent().to_owned(),
    }
}

/// Pick one User-Agent from the pool.
pub fn random_user_agent() -> &'static str {
    BROWSER_USER_AGENTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(BROWSER_USER_AGENTS[0])
}
