//! Error types for the scout-search crate.
//!
//! Messages are stable and safe to surface inside a research report:
//! they never contain request headers or credentials.

/// Errors that can occur while searching or fetching pages.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Transport-level failure: DNS, connect, TLS, timeout, body read.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The server answered with a non-success status code.
    #[error("HTTP status {status} for {url}")]
    Status {
        /// Numeric status code.
        status: u16,
        /// URL that produced the status.
        url: String,
    },

    /// Failed to parse a search engine response page.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid search or fetch configuration.
    #[error("config error: {0}")]
    Config(String),
}

impl SearchError {
    /// Map a `reqwest` error into the matching variant.
    ///
    /// Status errors (from `error_for_status`) keep their code; everything
    /// else is a transport failure prefixed with `context`.
    pub(crate) fn from_reqwest(context: &str, err: reqwest::Error) -> Self {
        match (err.status(), err.url()) {
            (Some(status), Some(url)) => Self::Status {
                status: status.as_u16(),
                url: url.to_string(),
            },
            _ if err.is_timeout() => Self::Http(format!("{context}: request timed out")),
            _ => Self::Http(format!("{context}: {err}")),
        }
    }
}

/// Convenience type alias for scout-search results.
pub type Result<T> = std::result::Result<T, SearchError>;
