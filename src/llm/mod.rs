//! Generative language-model backend.
//!
//! [`TextGenerator`] is the seam the summarizer talks to; [`OllamaClient`]
//! implements it against an Ollama-compatible `/api/generate` endpoint with
//! a single fallback attempt on a larger model.

pub mod error;
pub mod ollama;

pub use error::{LlmError, Result};
pub use ollama::OllamaClient;

use crate::config::LlmConfig;
use async_trait::async_trait;

/// Per-call generation options.
///
/// Unset fields fall back to the client's configured defaults when the
/// request is built (see [`GenerateOptions::merged_over`]).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerateOptions {
    /// Sampling temperature.
    pub temperature: Option<f64>,
    /// Maximum tokens to generate.
    pub num_predict: Option<u32>,
    /// Context window in tokens.
    pub num_ctx: Option<u32>,
    /// How long the server keeps the model loaded, e.g. `"5m"`.
    pub keep_alive: Option<String>,
}

impl GenerateOptions {
    /// Create empty options (all defaults).
    pub fn new() -> Self {
        Self::default()
    }

    /// Fully populated options from configuration.
    pub fn from_config(config: &LlmConfig) -> Self {
        Self {
            temperature: Some(config.temperature),
            num_predict: Some(config.num_predict),
            num_ctx: Some(config.num_ctx),
            keep_alive: Some(config.keep_alive.clone()),
        }
    }

    /// Set the temperature.
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the maximum number of generated tokens.
    pub fn with_num_predict(mut self, num_predict: u32) -> Self {
        self.num_predict = Some(num_predict);
        self
    }

    /// Set the context window.
    pub fn with_num_ctx(mut self, num_ctx: u32) -> Self {
        self.num_ctx = Some(num_ctx);
        self
    }

    /// Set the keep-alive duration.
    pub fn with_keep_alive(mut self, keep_alive: impl Into<String>) -> Self {
        self.keep_alive = Some(keep_alive.into());
        self
    }

    /// Field-by-field merge: values set on `self` win over `defaults`.
    pub fn merged_over(&self, defaults: &GenerateOptions) -> GenerateOptions {
        GenerateOptions {
            temperature: self.temperature.or(defaults.temperature),
            num_predict: self.num_predict.or(defaults.num_predict),
            num_ctx: self.num_ctx.or(defaults.num_ctx),
            keep_alive: self
                .keep_alive
                .clone()
                .or_else(|| defaults.keep_alive.clone()),
        }
    }
}

/// A backend that turns a prompt into text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for `prompt` with `model`.
    ///
    /// Returns the trimmed response text; an absent response is the empty
    /// string, not an error.
    async fn generate(
        &self,
        prompt: &str,
        model: &str,
        options: &GenerateOptions,
    ) -> Result<String>;
}
