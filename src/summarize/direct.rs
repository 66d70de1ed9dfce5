//! Direct (non-prompted) summarization through a hosted seq2seq model.

use crate::config::SummarizerConfig;
use crate::error::{Result, ScoutError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Imperatives that open an instruction sentence.
const INSTRUCTION_OPENERS: &[&str] = &["summarize", "summarise", "make a summary"];

/// Polite lead-ins stripped before looking for an opener.
const POLITE_LEADS: &[&str] = &["please ", "can you ", "could you ", "now "];

/// Trailing phrase of a formatting instruction ("write it in bullet points").
const BULLET_REQUEST: &str = "in bullet points";

/// Generation bounds for one direct summarization call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SummaryBounds {
    /// Minimum new tokens.
    pub min_new_tokens: u32,
    /// Maximum new tokens.
    pub max_new_tokens: u32,
}

impl SummaryBounds {
    /// Convert a word band into token bounds (about 1.3 to 1.6 tokens per word).
    pub fn from_words(min_words: u32, max_words: u32) -> Self {
        // ⌊w·1.6⌋ == w·16/10 in integer arithmetic.
        Self {
            min_new_tokens: (min_words * 13 / 10).max(8),
            max_new_tokens: (max_words * 16 / 10).max(32),
        }
    }
}

/// A summarizer that condenses text without a prompt.
#[async_trait]
pub trait DirectSummarizer: Send + Sync {
    /// Summarize `text` within `bounds`. Decoding is deterministic.
    async fn summarize(&self, text: &str, bounds: SummaryBounds) -> Result<String>;
}

/// Drop sentences that read like instructions to the model.
///
/// Page text arrives with whitespace collapsed, so filtering works per
/// sentence rather than per line. A sentence is dropped only when it opens
/// with a summarize imperative (optionally after "please", "can you" and
/// similar) or ends with a bullet-point request. Mentions elsewhere in a
/// sentence are content and stay. Matching is case-insensitive.
pub fn clean_leaked_instructions(text: &str) -> String {
    sentences(text)
        .filter(|sentence| !is_instruction(sentence))
        .collect::<String>()
        .trim()
        .to_owned()
}

fn is_instruction(sentence: &str) -> bool {
    let lower = sentence
        .trim()
        .trim_end_matches(['.', '!', '?', ':'])
        .to_lowercase();
    let body = POLITE_LEADS
        .iter()
        .find_map(|lead| lower.strip_prefix(lead))
        .unwrap_or(lower.as_str())
        .trim_start();
    INSTRUCTION_OPENERS.iter().any(|opener| body.starts_with(opener))
        || lower.ends_with(BULLET_REQUEST)
}

/// Split after `.`, `!` or `?` followed by whitespace (or the end), and
/// after every newline. Concatenating the pieces gives back `text`.
fn sentences(text: &str) -> impl Iterator<Item = &str> {
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    std::iter::from_fn(move || {
        while let Some((i, c)) = chars.next() {
            let ends_sentence = c == '\n'
                || (matches!(c, '.' | '!' | '?')
                    && chars.peek().is_none_or(|&(_, next)| next.is_whitespace()));
            if ends_sentence {
                let end = i + c.len_utf8();
                let piece = &text[start..end];
                start = end;
                return Some(piece);
            }
        }
        let rest = (start < text.len()).then(|| &text[start..]);
        start = text.len();
        rest
    })
}

/// Client for a hosted summarization model (Hugging Face inference API).
pub struct HfInferenceSummarizer {
    client: reqwest::Client,
    endpoint: String,
    api_token: Option<String>,
}

impl std::fmt::Debug for HfInferenceSummarizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HfInferenceSummarizer")
            .field("endpoint", &self.endpoint)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: InferenceParameters,
}

#[derive(Serialize)]
struct InferenceParameters {
    do_sample: bool,
    truncation: &'static str,
    min_new_tokens: u32,
    max_new_tokens: u32,
}

#[derive(Deserialize)]
struct SummaryItem {
    summary_text: String,
}

impl HfInferenceSummarizer {
    /// Build a client for `{api_url}/{model_id}`.
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::Config`] if the HTTP client cannot be built.
    pub fn new(config: &SummarizerConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ScoutError::Config(format!("cannot build HTTP client: {e}")))?;
        let endpoint = format!(
            "{}/{}",
            config.api_url.trim_end_matches('/'),
            config.model_id.trim_start_matches('/')
        );
        Ok(Self {
            client,
            endpoint,
            api_token: config.api_token.clone(),
        })
    }
}

#[async_trait]
impl DirectSummarizer for HfInferenceSummarizer {
    async fn summarize(&self, text: &str, bounds: SummaryBounds) -> Result<String> {
        let body = InferenceRequest {
            inputs: text,
            parameters: InferenceParameters {
                do_sample: false,
                truncation: "longest_first",
                min_new_tokens: bounds.min_new_tokens,
                max_new_tokens: bounds.max_new_tokens,
            },
        };

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ScoutError::Summarize(format!("summarization request failed: {e}")))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ScoutError::Summarize(format!("summarization body read failed: {e}")))?;
        if !status.is_success() {
            return Err(ScoutError::Summarize(format!(
                "summarization HTTP {}: {}",
                status.as_u16(),
                text.trim()
            )));
        }

        let items: Vec<SummaryItem> = serde_json::from_str(&text)
            .map_err(|e| ScoutError::Summarize(format!("unexpected summarization response: {e}")))?;
        items
            .into_iter()
            .next()
            .map(|item| item.summary_text.trim().to_owned())
            .ok_or_else(|| ScoutError::Summarize("summarization response was empty".into()))
    }
}
