//! Error types for the generative backend.
//!
//! Every variant carries a stable code that prefixes its Display output
//! (`[CODE] message`) and is available through [`LlmError::code()`].

/// Stable error codes for programmatic handling.
pub mod error_codes {
    /// Invalid client configuration or request parameters.
    pub const CONFIG_INVALID: &str = "CONFIG_INVALID";

    /// Transport-level failure (connection refused, reset, DNS).
    pub const REQUEST_FAILED: &str = "REQUEST_FAILED";

    /// The request exceeded its timeout.
    pub const TIMEOUT_ERROR: &str = "TIMEOUT_ERROR";

    /// The server answered with a non-success status.
    pub const HTTP_STATUS: &str = "HTTP_STATUS";

    /// The response body could not be decoded.
    pub const INVALID_RESPONSE: &str = "INVALID_RESPONSE";

    /// Both the requested model and the fallback model failed.
    pub const FALLBACK_FAILED: &str = "FALLBACK_FAILED";
}

/// Errors produced by [`crate::llm::TextGenerator`] implementations.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// Invalid client configuration or request parameters.
    #[error("[{}] {}", error_codes::CONFIG_INVALID, .0)]
    Config(String),

    /// Transport-level failure.
    #[error("[{}] {}", error_codes::REQUEST_FAILED, .0)]
    Request(String),

    /// The request exceeded its timeout.
    #[error("[{}] {}", error_codes::TIMEOUT_ERROR, .0)]
    Timeout(String),

    /// Non-success HTTP status.
    #[error("[{}] HTTP {status}: {message}", error_codes::HTTP_STATUS)]
    HttpStatus {
        /// Status code returned by the server.
        status: u16,
        /// Response body or a short description.
        message: String,
    },

    /// The response body was not the expected JSON.
    #[error("[{}] {}", error_codes::INVALID_RESPONSE, .0)]
    InvalidResponse(String),

    /// The fallback attempt failed too.
    #[error("[{}] primary: {primary}; fallback: {fallback}", error_codes::FALLBACK_FAILED)]
    FallbackFailed {
        /// Error from the originally requested model.
        primary: String,
        /// Error from the fallback model.
        fallback: String,
    },
}

impl LlmError {
    /// Returns the stable error code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => error_codes::CONFIG_INVALID,
            Self::Request(_) => error_codes::REQUEST_FAILED,
            Self::Timeout(_) => error_codes::TIMEOUT_ERROR,
            Self::HttpStatus { .. } => error_codes::HTTP_STATUS,
            Self::InvalidResponse(_) => error_codes::INVALID_RESPONSE,
            Self::FallbackFailed { .. } => error_codes::FALLBACK_FAILED,
        }
    }

    /// Returns true if the request may succeed against another model.
    ///
    /// Transport, timeout, status and decoding failures qualify.
    /// Configuration errors and an exhausted fallback do not.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Request(_)
            | Self::Timeout(_)
            | Self::HttpStatus { .. }
            | Self::InvalidResponse(_) => true,
            Self::Config(_) | Self::FallbackFailed { .. } => false,
        }
    }

    pub(crate) fn from_reqwest(context: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(format!("{context}: {err}"))
        } else if err.is_builder() {
            Self::Config(format!("{context}: {err}"))
        } else if err.is_decode() {
            Self::InvalidResponse(format!("{context}: {err}"))
        } else {
            Self::Request(format!("{context}: {err}"))
        }
    }
}

/// Convenience alias for generative backend results.
pub type Result<T> = std::result::Result<T, LlmError>;
