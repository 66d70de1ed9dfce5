//! Offline evaluation harness.
//!
//! Runs each query of a JSONL test set through a [`Researcher`], counts how
//! many expected keywords appear in the report and prints per-query lines
//! plus an accuracy/latency summary.

use crate::error::{Result, ScoutError};
use crate::research::{ResearchRequest, Researcher};
use serde::Deserialize;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

/// One row of the test set.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EvalCase {
    /// Query passed to the researcher.
    pub query: String,
    /// Keywords expected somewhere in the report (case-insensitive).
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Outcome of one evaluated query.
#[derive(Debug, Clone, PartialEq)]
pub struct EvalRun {
    /// 1-based row number.
    pub index: usize,
    /// The query.
    pub query: String,
    /// Wall time in seconds, recorded even when the run failed.
    pub seconds: f64,
    /// Number of keywords found; zero for a failed run.
    pub hits: usize,
    /// Error text when the run itself failed.
    pub error: Option<String>,
}

/// Aggregate over all runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvalSummary {
    /// Fraction of runs with at least one keyword hit.
    pub accuracy: f64,
    /// Mean latency in seconds.
    pub avg: f64,
    /// Median latency in seconds.
    pub median: f64,
    /// 95th percentile latency in seconds.
    pub p95: f64,
}

/// Read test cases from a JSONL file, skipping blank lines.
///
/// `limit` caps the number of rows; zero means all.
///
/// # Errors
///
/// Returns [`ScoutError::Io`] if the file cannot be read and
/// [`ScoutError::Eval`] naming the line for malformed JSON.
pub fn load_cases(path: &Path, limit: usize) -> Result<Vec<EvalCase>> {
    let content = std::fs::read_to_string(path)?;
    parse_cases(&content, limit)
}

fn parse_cases(content: &str, limit: usize) -> Result<Vec<EvalCase>> {
    let mut cases = Vec::new();
    for (n, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let case: EvalCase = serde_json::from_str(line)
            .map_err(|e| ScoutError::Eval(format!("line {}: {e}", n + 1)))?;
        cases.push(case);
        if limit > 0 && cases.len() >= limit {
            break;
        }
    }
    Ok(cases)
}

/// Count keywords that occur in `text`, ignoring case.
pub fn keyword_hits(text: &str, keywords: &[String]) -> usize {
    let haystack = text.to_lowercase();
    keywords
        .iter()
        .filter(|k| haystack.contains(&k.to_lowercase()))
        .count()
}

/// Per-query output line: `NN | T.Ts | hits=H | query`.
pub fn format_run_line(run: &EvalRun) -> String {
    format!(
        "{:02} | {:5.1}s | hits={} | {}",
        run.index, run.seconds, run.hits, run.query
    )
}

impl EvalSummary {
    /// Aggregate `runs`; `None` when there are none.
    pub fn from_runs(runs: &[EvalRun]) -> Option<Self> {
        if runs.is_empty() {
            return None;
        }
        let mut times: Vec<f64> = runs.iter().map(|r| r.seconds).collect();
        times.sort_by(f64::total_cmp);

        let n = times.len();
        let avg = times.iter().sum::<f64>() / n as f64;
        let median = if n % 2 == 1 {
            times[n / 2]
        } else {
            (times[n / 2 - 1] + times[n / 2]) / 2.0
        };
        let p95 = if n >= 20 {
            exclusive_quantile(&times, 19, 20)
        } else {
            times[n - 1]
        };
        let with_hits = runs.iter().filter(|r| r.hits > 0).count();

        Some(Self {
            accuracy: with_hits as f64 / n as f64,
            avg,
            median,
            p95,
        })
    }
}

/// The `i`-th of `parts`-quantile cut points of sorted `data`, using the
/// exclusive method (positions over `len + 1`, linear interpolation).
fn exclusive_quantile(sorted: &[f64], i: usize, parts: usize) -> f64 {
    let len = sorted.len();
    if len < 2 {
        return sorted.first().copied().unwrap_or(0.0);
    }
    let m = len + 1;
    let j = (i * m / parts).clamp(1, len - 1);
    let delta = (i * m) as f64 - (j * parts) as f64;
    let parts = parts as f64;
    (sorted[j - 1] * (parts - delta) + sorted[j] * delta) / parts
}

/// Settings shared by every query of an evaluation.
#[derive(Debug, Clone)]
pub struct EvalSettings {
    /// Model selector.
    pub model: String,
    /// Results per query.
    pub k: usize,
    /// Page text budget.
    pub max_chars: usize,
    /// Whether to rerank.
    pub use_reranker: bool,
}

impl Default for EvalSettings {
    fn default() -> Self {
        Self {
            model: "hf:distilbart".into(),
            k: 2,
            max_chars: 900,
            use_reranker: true,
        }
    }
}

/// Run every case, printing progress and the summary to `out`.
///
/// # Errors
///
/// Returns [`ScoutError::Eval`] when `cases` is empty and
/// [`ScoutError::Io`] when writing to `out` fails. Failed research runs are
/// scored, not propagated.
pub async fn run_eval(
    researcher: &Researcher,
    cases: &[EvalCase],
    settings: &EvalSettings,
    out: &mut dyn Write,
) -> Result<EvalSummary> {
    if cases.is_empty() {
        return Err(ScoutError::Eval("no eval cases".into()));
    }
    writeln!(
        out,
        "# eval on {} queries | model={} k={} max_chars={}\n",
        cases.len(),
        settings.model,
        settings.k,
        settings.max_chars
    )?;

    let mut runs = Vec::with_capacity(cases.len());
    for (i, case) in cases.iter().enumerate() {
        let request = ResearchRequest::new(case.query.as_str())
            .with_k(settings.k)
            .with_model(settings.model.as_str())
            .with_max_chars(settings.max_chars)
            .with_reranker(settings.use_reranker);

        let started = Instant::now();
        let result = researcher.research(&request).await;
        let seconds = started.elapsed().as_secs_f64();

        let run = match result {
            Ok(report) => EvalRun {
                index: i + 1,
                query: case.query.clone(),
                seconds,
                hits: keyword_hits(&report.render(), &case.keywords),
                error: None,
            },
            Err(e) => {
                tracing::warn!(query = case.query.as_str(), error = %e, "eval_run_failed");
                EvalRun {
                    index: i + 1,
                    query: case.query.clone(),
                    seconds,
                    hits: 0,
                    error: Some(e.to_string()),
                }
            }
        };
        writeln!(out, "{}", format_run_line(&run))?;
        runs.push(run);
    }

    let summary = EvalSummary::from_runs(&runs)
        .ok_or_else(|| ScoutError::Eval("no eval runs recorded".into()))?;
    writeln!(out, "\n--- summary ---")?;
    writeln!(out, "accuracy(any keyword) : {:.2}", summary.accuracy)?;
    writeln!(
        out,
        "latency avg/median/p95: {:.1}s / {:.1}s / {:.1}s",
        summary.avg, summary.median, summary.p95
    )?;
    Ok(summary)
}
