//! Error types for the research agent.

use crate::llm::LlmError;
use scout_search::SearchError;

/// Top-level error type for a research run.
///
/// Only [`ScoutError::EmptyQuery`] and [`ScoutError::Search`] ever abort a
/// run; the other variants are caught per candidate and rendered into the
/// report as placeholder sections.
#[derive(Debug, thiserror::Error)]
pub enum ScoutError {
    /// The query was empty after trimming.
    #[error("query must not be empty")]
    EmptyQuery,

    /// The search provider failed.
    #[error("search failed: {0}")]
    Search(#[source] SearchError),

    /// Fetching a result page failed.
    #[error("fetch failed: {0}")]
    Fetch(#[source] SearchError),

    /// The generative backend failed (after its fallback attempt).
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    /// The direct summarization backend failed.
    #[error("summarizer error: {0}")]
    Summarize(String),

    /// Reranking failed.
    #[error("rerank error: {0}")]
    Rerank(String),

    /// Model download or loading error.
    #[error("model error: {0}")]
    Model(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Evaluation harness input error.
    #[error("eval error: {0}")]
    Eval(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, ScoutError>;
