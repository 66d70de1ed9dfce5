//! Scout: a small web research agent.
//!
//! Given a question, scout searches the web, optionally reranks the hits by
//! embedding similarity, fetches each page and summarizes it with a
//! language model, then returns a numbered markdown report.
//!
//! # Architecture
//!
//! ```text
//! query → search → (rerank) → fetch → summarize → report
//! ```
//!
//! - **Search / fetch**: HTML scraping engines and page extraction in the
//!   `scout-search` crate
//! - **Rerank**: `all-MiniLM-L6-v2` sentence embeddings via ONNX Runtime
//! - **Summarize**: prompted bullets from an Ollama-compatible endpoint, or
//!   a hosted seq2seq summarization model (`hf:` selectors)
//! - **Research**: the orchestrator that isolates per-page failures

pub mod config;
pub mod error;
pub mod eval;
pub mod llm;
pub mod logging;
pub mod rerank;
pub mod research;
pub mod summarize;

pub use config::ScoutConfig;
pub use error::{Result, ScoutError};
pub use research::{Report, ResearchRequest, Researcher};
pub use summarize::SummarizerBackend;
