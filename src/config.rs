//! Configuration types for the research agent.
//!
//! Every field has a built-in default, so an empty (or missing) TOML file is
//! a valid configuration. Environment variables are applied on top of the
//! file by [`ScoutConfig::apply_env_overrides`].

use crate::error::{Result, ScoutError};
use scout_search::SearchConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default Ollama-compatible generate endpoint.
pub const DEFAULT_GENERATE_URL: &str = "http://localhost:11434/api/generate";
/// Fast default generative model.
pub const DEFAULT_MODEL: &str = "llama3.2:3b";
/// Larger model used for the single fallback attempt.
pub const DEFAULT_FALLBACK_MODEL: &str = "llama3.1:8b";
/// Default hosted summarization model.
pub const DEFAULT_SUMMARY_MODEL: &str = "sshleifer/distilbart-cnn-12-6";
/// Default base URL for hosted summarization models.
pub const DEFAULT_HF_API_URL: &str = "https://router.huggingface.co/hf-inference/models";

const DEFAULT_OLLAMA_HOST: &str = "localhost";
const DEFAULT_OLLAMA_PORT: u16 = 11434;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoutConfig {
    /// Generative backend (Ollama-compatible endpoint).
    pub llm: LlmConfig,
    /// Direct summarization backend.
    pub summarizer: SummarizerConfig,
    /// Embedding reranker.
    pub rerank: RerankConfig,
    /// Search provider and page fetch settings.
    pub search: SearchConfig,
    /// Default run parameters.
    pub research: ResearchDefaults,
    /// Log output.
    pub logging: LogConfig,
}

/// Generative backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Full URL of the `/api/generate` endpoint.
    pub generate_url: String,
    /// Model used when a run does not name one.
    pub default_model: String,
    /// Model retried once when a request to any other model fails.
    pub fallback_model: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Sampling temperature.
    pub temperature: f64,
    /// Maximum tokens to generate.
    pub num_predict: u32,
    /// Context window in tokens.
    pub num_ctx: u32,
    /// How long the server keeps the model loaded between calls.
    pub keep_alive: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            generate_url: DEFAULT_GENERATE_URL.to_owned(),
            default_model: DEFAULT_MODEL.to_owned(),
            fallback_model: DEFAULT_FALLBACK_MODEL.to_owned(),
            timeout_secs: 120,
            temperature: 0.2,
            num_predict: 160,
            num_ctx: 2048,
            keep_alive: "5m".to_owned(),
        }
    }
}

/// Direct (hosted) summarization configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    /// Base URL; the model id is appended as a path.
    pub api_url: String,
    /// Summarization model id.
    pub model_id: String,
    /// Bearer token. Read from `HF_TOKEN`, never written back to disk.
    #[serde(skip_serializing)]
    pub api_token: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Lower bound of the summary length band, in words.
    pub min_words: u32,
    /// Upper bound of the summary length band, in words.
    pub max_words: u32,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_HF_API_URL.to_owned(),
            model_id: DEFAULT_SUMMARY_MODEL.to_owned(),
            api_token: None,
            timeout_secs: 120,
            min_words: 50,
            max_words: 90,
        }
    }
}

/// Embedding reranker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RerankConfig {
    /// Whether runs rerank search results unless told otherwise.
    pub enabled: bool,
    /// HuggingFace repo holding the ONNX sentence-embedding model.
    pub model_repo: String,
    /// ONNX Runtime intra-op threads.
    pub intra_threads: usize,
}

impl Default for RerankConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            model_repo: "sentence-transformers/all-MiniLM-L6-v2".to_owned(),
            intra_threads: 2,
        }
    }
}

/// Defaults for a single research run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResearchDefaults {
    /// Number of search results to summarize.
    pub k: usize,
    /// Page text budget handed to the summarizer, in characters.
    pub max_chars: usize,
}

impl Default for ResearchDefaults {
    fn default() -> Self {
        Self {
            k: 3,
            max_chars: 1200,
        }
    }
}

/// Log output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Directory for the daily-rotated log file.
    pub dir: PathBuf,
    /// Log file name prefix; the date is appended by the appender.
    pub file_prefix: String,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("logs"),
            file_prefix: "run".to_owned(),
            filter: "scout=info,scout_search=info".to_owned(),
        }
    }
}

impl ScoutConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| ScoutError::Config(e.to_string()))
    }

    /// Resolve the effective configuration for a process.
    ///
    /// Reads `path` when given, else the default config file if it exists,
    /// else built-in defaults; then applies process environment overrides
    /// and validates.
    ///
    /// # Errors
    ///
    /// Returns an error for unreadable files, invalid TOML, malformed
    /// environment values or failed validation.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => {
                let default_path = Self::default_config_path();
                if default_path.is_file() {
                    Self::from_file(&default_path)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Returns the default config file path: `<config dir>/scout/config.toml`.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join("scout")
            .join("config.toml")
    }

    /// Apply environment overrides using `lookup` to read variables.
    ///
    /// Recognised variables: `OLLAMA_URL` (full generate URL, wins over
    /// host/port), `OLLAMA_HOST`, `OLLAMA_PORT`, `AGENT_MODEL`,
    /// `AGENT_FALLBACK_MODEL`, `HF_API_URL`, `HF_SUMMARY_MODEL`, `HF_TOKEN`
    /// and `SCOUT_LOG_DIR`. Empty values are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::Config`] if `OLLAMA_PORT` is not a valid port.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get("OLLAMA_URL") {
            self.llm.generate_url = url;
        } else {
            let host = get("OLLAMA_HOST");
            let port = get("OLLAMA_PORT");
            if host.is_some() || port.is_some() {
                self.llm.generate_url = compose_generate_url(host.as_deref(), port.as_deref())?;
            }
        }
        if let Some(model) = get("AGENT_MODEL") {
            self.llm.default_model = model;
        }
        if let Some(model) = get("AGENT_FALLBACK_MODEL") {
            self.llm.fallback_model = model;
        }
        if let Some(url) = get("HF_API_URL") {
            self.summarizer.api_url = url;
        }
        if let Some(model) = get("HF_SUMMARY_MODEL") {
            self.summarizer.model_id = model;
        }
        if let Some(token) = get("HF_TOKEN") {
            self.summarizer.api_token = Some(token);
        }
        if let Some(dir) = get("SCOUT_LOG_DIR") {
            self.logging.dir = PathBuf::from(dir);
        }
        Ok(())
    }

    /// Check cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::Config`] describing the first invalid field.
    pub fn validate(&self) -> Result<()> {
        if self.llm.generate_url.trim().is_empty() {
            return Err(ScoutError::Config("llm.generate_url must not be empty".into()));
        }
        if self.llm.default_model.trim().is_empty() || self.llm.fallback_model.trim().is_empty() {
            return Err(ScoutError::Config("llm model ids must not be empty".into()));
        }
        if self.llm.timeout_secs == 0 || self.summarizer.timeout_secs == 0 {
            return Err(ScoutError::Config("timeouts must be greater than 0".into()));
        }
        if self.summarizer.min_words > self.summarizer.max_words {
            return Err(ScoutError::Config(
                "summarizer.min_words must be <= max_words".into(),
            ));
        }
        self.search
            .validate()
            .map_err(|e| ScoutError::Config(e.to_string()))
    }
}

/// Build `http://{host}:{port}/api/generate` from optional parts.
///
/// A host that already carries a scheme keeps it; a host that already
/// carries a port keeps it unless `port` is given explicitly.
fn compose_generate_url(host: Option<&str>, port: Option<&str>) -> Result<String> {
    let port = port
        .map(|p| {
            p.trim()
                .parse::<u16>()
                .map_err(|_| ScoutError::Config(format!("OLLAMA_PORT is not a valid port: {p}")))
        })
        .transpose()?;

    let host = host.unwrap_or(DEFAULT_OLLAMA_HOST).trim().trim_end_matches('/');
    let (scheme, authority) = match host.split_once("://") {
        Some((scheme, rest)) => (scheme, rest),
        None => ("http", host),
    };
    let authority = match (authority.rsplit_once(':'), port) {
        (Some((bare, _)), Some(p)) => format!("{bare}:{p}"),
        (Some(_), None) => authority.to_owned(),
        (None, p) => format!("{authority}:{}", p.unwrap_or(DEFAULT_OLLAMA_PORT)),
    };
    Ok(format!("{scheme}://{authority}/api/generate"))
}
