//! Page summarization.
//!
//! The model selector string is decoded once into a [`SummarizerBackend`];
//! [`Summarizer`] then dispatches each page to the prompted (generative) or
//! direct strategy. Every summary it returns ends with a citation marker
//! for the page URL.

pub mod direct;
pub mod prompt;

pub use direct::{clean_leaked_instructions, DirectSummarizer, HfInferenceSummarizer, SummaryBounds};
pub use prompt::build_prompt;

use crate::error::Result;
use crate::llm::{GenerateOptions, TextGenerator};
use std::sync::Arc;

/// Selector prefix that routes to the direct backend.
pub const DIRECT_PREFIX: &str = "hf:";

/// Which strategy summarizes pages for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummarizerBackend {
    /// Prompted bullet summary from a generative model.
    Generative {
        /// Model id passed to the generate endpoint.
        model: String,
    },
    /// Hosted seq2seq summarization model.
    Direct {
        /// Alias after the `hf:` prefix; informational only.
        model: String,
    },
}

impl SummarizerBackend {
    /// Decode a model selector.
    ///
    /// `hf:<alias>` selects the direct backend; any other non-blank string
    /// is a generative model id; `None` or blank selects `default_model`.
    pub fn from_selector(selector: Option<&str>, default_model: &str) -> Self {
        match selector.map(str::trim).filter(|s| !s.is_empty()) {
            Some(s) => match s.strip_prefix(DIRECT_PREFIX) {
                Some(alias) => Self::Direct {
                    model: alias.to_owned(),
                },
                None => Self::Generative {
                    model: s.to_owned(),
                },
            },
            None => Self::Generative {
                model: default_model.to_owned(),
            },
        }
    }

    /// Selector string for logs.
    pub fn label(&self) -> String {
        match self {
            Self::Generative { model } => model.clone(),
            Self::Direct { model } => format!("{DIRECT_PREFIX}{model}"),
        }
    }
}

/// The citation marker for `url`.
pub fn citation(url: &str) -> String {
    format!("[Citation: {url}]")
}

/// Fixed body used when a backend returns nothing usable.
pub fn placeholder(url: &str) -> String {
    format!(
        "- (no usable content returned for this page)\n{}",
        citation(url)
    )
}

/// Append the citation marker unless `summary` already carries it.
pub fn ensure_citation(summary: &str, url: &str) -> String {
    let marker = citation(url);
    if summary.contains(&marker) {
        summary.to_owned()
    } else {
        format!("{summary}\n{marker}")
    }
}

/// One page handed to a summarizer.
#[derive(Debug, Clone, Copy)]
pub struct PageInput<'a> {
    /// The user's query.
    pub query: &'a str,
    /// Display title (page title, else search title, else URL).
    pub title: &'a str,
    /// Candidate URL; the citation always uses it.
    pub url: &'a str,
    /// Extracted, truncated page text.
    pub text: &'a str,
}

/// Dispatches pages to the configured backends.
pub struct Summarizer {
    generator: Arc<dyn TextGenerator>,
    direct: Arc<dyn DirectSummarizer>,
    bounds: SummaryBounds,
}

impl Summarizer {
    /// Create a summarizer over both backends with the given word band.
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        direct: Arc<dyn DirectSummarizer>,
        min_words: u32,
        max_words: u32,
    ) -> Self {
        Self {
            generator,
            direct,
            bounds: SummaryBounds::from_words(min_words, max_words),
        }
    }

    /// Summarize one page with `backend`.
    ///
    /// The result is never empty and always contains the citation for
    /// `page.url`.
    ///
    /// # Errors
    ///
    /// Propagates backend failures ([`crate::ScoutError::Llm`] or
    /// [`crate::ScoutError::Summarize`]).
    pub async fn summarize(&self, backend: &SummarizerBackend, page: PageInput<'_>) -> Result<String> {
        let raw = match backend {
            SummarizerBackend::Generative { model } => {
                let prompt = build_prompt(page.query, page.title, page.url, page.text);
                let options = GenerateOptions::new().with_temperature(0.2);
                self.generator.generate(&prompt, model, &options).await?
            }
            SummarizerBackend::Direct { .. } => {
                let text = clean_leaked_instructions(page.text);
                if text.is_empty() {
                    return Ok(placeholder(page.url));
                }
                let input = format!("{}\n{}\n\n{}", page.title, page.url, text);
                self.direct.summarize(&input, self.bounds).await?
            }
        };

        let raw = raw.trim();
        if raw.is_empty() {
            Ok(placeholder(page.url))
        } else {
            Ok(ensure_citation(raw, page.url))
        }
    }
}
