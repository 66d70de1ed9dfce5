//! Report model and markdown rendering.

use crate::summarize::citation;
use std::fmt;
use std::time::Duration;

/// Fixed notice rendered when search returned nothing.
pub const NO_RESULTS_NOTICE: &str = "(No results found.)";

/// Result of processing one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionOutcome {
    /// The page was fetched and summarized; the summary carries its citation.
    Summarized(String),
    /// Fetching or summarizing failed with this message.
    Failed(String),
}

/// One numbered section of the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSection {
    /// 1-based position in the final order.
    pub index: usize,
    /// Page title, else search title, else URL.
    pub title: String,
    /// The candidate's URL as returned by search.
    pub url: String,
    /// What happened for this candidate.
    pub outcome: SectionOutcome,
}

impl ReportSection {
    /// Rendered body text. Never empty; always cites `url`.
    pub fn body(&self) -> String {
        match &self.outcome {
            SectionOutcome::Summarized(summary) => summary.clone(),
            SectionOutcome::Failed(error) => {
                format!("(Skipped due to error: {error})\n{}", citation(&self.url))
            }
        }
    }

    /// Whether the candidate was summarized.
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, SectionOutcome::Summarized(_))
    }
}

/// Output of one research run.
#[derive(Debug, Clone)]
pub struct Report {
    /// The query as given.
    pub query: String,
    /// Sections in final order; empty when search found nothing.
    pub sections: Vec<ReportSection>,
    /// Wall time of the run. Not rendered.
    pub elapsed: Duration,
}

impl Report {
    /// Header line shared by every report.
    pub fn header(query: &str) -> String {
        format!("# Research results for: {query}")
    }

    /// Render as markdown.
    pub fn render(&self) -> String {
        let header = Self::header(&self.query);
        if self.sections.is_empty() {
            return format!("{header}\n\n{NO_RESULTS_NOTICE}");
        }
        let mut parts = Vec::with_capacity(self.sections.len() + 1);
        parts.push(format!("{header}\n"));
        for section in &self.sections {
            parts.push(format!(
                "## {}. {}\n{}\n",
                section.index,
                section.title,
                section.body()
            ));
        }
        parts.join("\n")
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
