//! Ollama-compatible `/api/generate` client with one fallback attempt.

use super::error::{LlmError, Result};
use super::{GenerateOptions, TextGenerator};
use crate::config::LlmConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Non-streaming client for `POST {base}/api/generate`.
///
/// When a request fails with a retryable error it is repeated once against
/// the configured fallback model, unless the request already targeted it.
pub struct OllamaClient {
    client: reqwest::Client,
    generate_url: reqwest::Url,
    default_model: String,
    fallback_model: String,
    defaults: GenerateOptions,
}

impl std::fmt::Debug for OllamaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OllamaClient")
            .field("generate_url", &self.generate_url.as_str())
            .field("default_model", &self.default_model)
            .field("fallback_model", &self.fallback_model)
            .finish()
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    keep_alive: Option<&'a str>,
    options: ModelOptions,
}

#[derive(Serialize)]
struct ModelOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_ctx: Option<u32>,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: Option<String>,
}

impl OllamaClient {
    /// Build a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::Config`] if the URL does not parse, a model id is
    /// blank, or the HTTP client cannot be built.
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let generate_url = reqwest::Url::parse(&config.generate_url).map_err(|e| {
            LlmError::Config(format!("invalid generate URL {:?}: {e}", config.generate_url))
        })?;
        let default_model = config.default_model.trim();
        let fallback_model = config.fallback_model.trim();
        if default_model.is_empty() || fallback_model.is_empty() {
            return Err(LlmError::Config("model ids must not be empty".into()));
        }
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LlmError::Config(format!("cannot build HTTP client: {e}")))?;

        Ok(Self {
            client,
            generate_url,
            default_model: default_model.to_owned(),
            fallback_model: fallback_model.to_owned(),
            defaults: GenerateOptions::from_config(config),
        })
    }

    /// The model used when a caller does not name one.
    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    /// The model retried once after a failure.
    pub fn fallback_model(&self) -> &str {
        &self.fallback_model
    }

    /// Generate with the default (fast) model.
    pub async fn generate_fast(&self, prompt: &str, options: &GenerateOptions) -> Result<String> {
        self.generate(prompt, &self.default_model, options).await
    }

    /// Generate with the fallback (larger) model.
    pub async fn generate_quality(
        &self,
        prompt: &str,
        options: &GenerateOptions,
    ) -> Result<String> {
        self.generate(prompt, &self.fallback_model, options).await
    }

    async fn generate_once(
        &self,
        prompt: &str,
        model: &str,
        options: &GenerateOptions,
    ) -> Result<String> {
        let effective = options.merged_over(&self.defaults);
        let body = GenerateRequest {
            model,
            prompt,
            stream: false,
            keep_alive: effective.keep_alive.as_deref(),
            options: ModelOptions {
                temperature: effective.temperature,
                num_predict: effective.num_predict,
                num_ctx: effective.num_ctx,
            },
        };

        let response = self
            .client
            .post(self.generate_url.clone())
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::from_reqwest("generate request failed", e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| LlmError::from_reqwest("generate body read failed", e))?;
        if !status.is_success() {
            return Err(LlmError::HttpStatus {
                status: status.as_u16(),
                message: extract_error_message(&text),
            });
        }

        let parsed: GenerateResponse = serde_json::from_str(&text)
            .map_err(|e| LlmError::InvalidResponse(format!("generate response: {e}")))?;
        Ok(parsed.response.unwrap_or_default().trim().to_owned())
    }
}

#[async_trait]
impl TextGenerator for OllamaClient {
    async fn generate(
        &self,
        prompt: &str,
        model: &str,
        options: &GenerateOptions,
    ) -> Result<String> {
        let model = model.trim();
        if model.is_empty() {
            return Err(LlmError::Config("model must not be empty".into()));
        }

        match self.generate_once(prompt, model, options).await {
            Ok(text) => Ok(text),
            Err(primary) if primary.is_retryable() && model != self.fallback_model => {
                tracing::warn!(
                    model,
                    fallback = self.fallback_model.as_str(),
                    code = primary.code(),
                    "llm_fallback"
                );
                self.generate_once(prompt, &self.fallback_model, options)
                    .await
                    .map_err(|fallback| LlmError::FallbackFailed {
                        primary: primary.to_string(),
                        fallback: fallback.to_string(),
                    })
            }
            Err(e) => Err(e),
        }
    }
}

/// Pull `error` out of an Ollama error body, else return the body itself.
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
        .unwrap_or_else(|| body.trim().to_string())
}
