//! Research orchestrator: search → rerank → fetch → summarize → report.
//!
//! A run fails only for an empty query or a search failure. Reranker
//! problems fall back to the search order, and a fetch or summarize failure
//! turns into a `Failed` section while the remaining candidates are still
//! processed. Candidates are handled one at a time in final order.

pub mod report;
pub mod sources;

pub use report::{Report, ReportSection, SectionOutcome, NO_RESULTS_NOTICE};
pub use sources::{Candidate, HttpFetcher, PageFetcher, ScrapingSearch, WebSearch};

use crate::config::ScoutConfig;
use crate::error::{Result, ScoutError};
use crate::llm::OllamaClient;
use crate::logging::{truncate_for_log, MAX_LOGGED_ERROR_CHARS, MAX_LOGGED_TITLE_CHARS};
use crate::rerank::Reranker;
use crate::summarize::{HfInferenceSummarizer, PageInput, Summarizer, SummarizerBackend};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// Parameters of one research run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResearchRequest {
    /// Natural-language query; must be non-empty after trimming.
    pub query: String,
    /// Number of search results to process.
    pub k: usize,
    /// Model selector (`hf:<alias>` or a generative model id).
    pub model: Option<String>,
    /// Page text budget in characters.
    pub max_chars: usize,
    /// Whether to rerank search results before fetching.
    pub use_reranker: bool,
}

impl ResearchRequest {
    /// A request with default parameters (k=3, 1200 chars, reranking on).
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            k: 3,
            model: None,
            max_chars: 1200,
            use_reranker: true,
        }
    }

    /// Set the number of results.
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Set the model selector.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the page text budget.
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    /// Enable or disable reranking.
    pub fn with_reranker(mut self, use_reranker: bool) -> Self {
        self.use_reranker = use_reranker;
        self
    }
}

/// Runs research requests against explicitly supplied backends.
pub struct Researcher {
    search: Arc<dyn WebSearch>,
    fetcher: Arc<dyn PageFetcher>,
    summarizer: Summarizer,
    reranker: Option<Arc<dyn Reranker>>,
    default_model: String,
}

impl std::fmt::Debug for Researcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Researcher")
            .field("default_model", &self.default_model)
            .field("has_reranker", &self.reranker.is_some())
            .finish_non_exhaustive()
    }
}

impl Researcher {
    /// Assemble a researcher without a reranker.
    pub fn new(
        search: Arc<dyn WebSearch>,
        fetcher: Arc<dyn PageFetcher>,
        summarizer: Summarizer,
        default_model: impl Into<String>,
    ) -> Self {
        Self {
            search,
            fetcher,
            summarizer,
            reranker: None,
            default_model: default_model.into(),
        }
    }

    /// Attach a reranker.
    pub fn with_reranker(mut self, reranker: Arc<dyn Reranker>) -> Self {
        self.reranker = Some(reranker);
        self
    }

    /// Build the network-backed researcher described by `config`.
    ///
    /// The reranker is not loaded here; attach one with
    /// [`with_reranker`](Self::with_reranker).
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client cannot be constructed.
    pub fn from_config(config: &ScoutConfig) -> Result<Self> {
        let generator = Arc::new(OllamaClient::new(&config.llm)?);
        let direct = Arc::new(HfInferenceSummarizer::new(&config.summarizer)?);
        let summarizer = Summarizer::new(
            generator,
            direct,
            config.summarizer.min_words,
            config.summarizer.max_words,
        );
        Ok(Self::new(
            Arc::new(ScrapingSearch::new(config.search.clone())),
            Arc::new(HttpFetcher::new(config.search.clone())),
            summarizer,
            config.llm.default_model.clone(),
        ))
    }

    /// Run one request and return the structured report.
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::EmptyQuery`] for a blank query and
    /// [`ScoutError::Search`] when the search provider fails. Everything
    /// else is recorded in the report.
    pub async fn research(&self, request: &ResearchRequest) -> Result<Report> {
        let started = Instant::now();
        let query = request.query.trim();
        if query.is_empty() {
            return Err(ScoutError::EmptyQuery);
        }
        let backend = SummarizerBackend::from_selector(request.model.as_deref(), &self.default_model);

        info!(
            query,
            k = request.k,
            model = backend.label().as_str(),
            max_chars = request.max_chars,
            rerank = request.use_reranker,
            "start"
        );

        let mut candidates = self
            .search
            .search(query, request.k)
            .await
            .map_err(ScoutError::Search)?;
        candidates.truncate(request.k);
        info!(n_results = candidates.len(), "search_ok");
        for (i, c) in candidates.iter().enumerate() {
            info!(
                idx = i + 1,
                title = truncate_for_log(&c.title, MAX_LOGGED_TITLE_CHARS),
                url = c.url.as_str(),
                "candidate"
            );
        }

        if candidates.is_empty() {
            info!(query, "no_results");
            return Ok(self.finish(query, Vec::new(), started));
        }

        if request.use_reranker {
            candidates = self.rerank(query, candidates, request.k);
        }

        let mut sections = Vec::with_capacity(candidates.len());
        for (i, candidate) in candidates.iter().enumerate() {
            sections.push(
                self.process(i + 1, query, candidate, &backend, request.max_chars)
                    .await,
            );
        }

        Ok(self.finish(query, sections, started))
    }

    fn finish(&self, query: &str, sections: Vec<ReportSection>, started: Instant) -> Report {
        let elapsed = started.elapsed();
        let seconds = (elapsed.as_secs_f64() * 100.0).round() / 100.0;
        info!(seconds, sections = sections.len(), "done");
        Report {
            query: query.to_owned(),
            sections,
            elapsed,
        }
    }

    /// Reorder by reranker scores; any problem keeps the search order.
    fn rerank(&self, query: &str, candidates: Vec<Candidate>, k: usize) -> Vec<Candidate> {
        let Some(reranker) = &self.reranker else {
            warn!(error = "reranker not loaded", "rerank_error");
            return candidates;
        };
        let titles: Vec<&str> = candidates.iter().map(|c| c.title.as_str()).collect();
        let outcome = reranker
            .rerank(query, &titles, Some(k))
            .and_then(|ranked| {
                let order: Vec<usize> = ranked.iter().map(|(i, _)| *i).collect();
                apply_order(&candidates, &order).map(|reordered| (order, reordered))
            });
        match outcome {
            Ok((order, reordered)) => {
                info!(order = ?order, "rerank_ok");
                reordered
            }
            Err(e) => {
                warn!(
                    error = truncate_for_log(&e.to_string(), MAX_LOGGED_ERROR_CHARS),
                    "rerank_error"
                );
                candidates
            }
        }
    }

    async fn process(
        &self,
        index: usize,
        query: &str,
        candidate: &Candidate,
        backend: &SummarizerBackend,
        max_chars: usize,
    ) -> ReportSection {
        let url = candidate.url.as_str();
        let fallback_title = non_empty(&candidate.title).unwrap_or(url);

        let page = match self.fetcher.fetch(url, max_chars).await {
            Ok(page) => page,
            Err(e) => {
                return self.failed(index, fallback_title, url, ScoutError::Fetch(e));
            }
        };
        let title = non_empty(&page.title).unwrap_or(fallback_title);
        info!(
            idx = index,
            url,
            title = truncate_for_log(title, MAX_LOGGED_TITLE_CHARS),
            chars = page.text.chars().count(),
            "fetched"
        );

        let input = PageInput {
            query,
            title,
            url,
            text: &page.text,
        };
        match self.summarizer.summarize(backend, input).await {
            Ok(summary) => {
                info!(idx = index, url, "summarized");
                ReportSection {
                    index,
                    title: title.to_owned(),
                    url: url.to_owned(),
                    outcome: SectionOutcome::Summarized(summary),
                }
            }
            Err(e) => self.failed(index, title, url, e),
        }
    }

    fn failed(&self, index: usize, title: &str, url: &str, error: ScoutError) -> ReportSection {
        let message = error.to_string();
        warn!(
            idx = index,
            url,
            error = truncate_for_log(&message, MAX_LOGGED_ERROR_CHARS),
            "error"
        );
        ReportSection {
            index,
            title: title.to_owned(),
            url: url.to_owned(),
            outcome: SectionOutcome::Failed(message),
        }
    }
}

fn non_empty(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Reorder `candidates` by `order`, appending any omitted candidates in
/// their original relative order. An empty `order` keeps the input order.
///
/// # Errors
///
/// Returns [`ScoutError::Rerank`] for an out-of-range or repeated index.
pub fn apply_order(candidates: &[Candidate], order: &[usize]) -> Result<Vec<Candidate>> {
    let mut seen = HashSet::with_capacity(order.len());
    for &i in order {
        if i >= candidates.len() {
            return Err(ScoutError::Rerank(format!(
                "index {i} out of range for {} candidates",
                candidates.len()
            )));
        }
        if !seen.insert(i) {
            return Err(ScoutError::Rerank(format!("index {i} returned twice")));
        }
    }
    let mut reordered: Vec<Candidate> = order.iter().map(|&i| candidates[i].clone()).collect();
    reordered.extend(
        candidates
            .iter()
            .enumerate()
            .filter(|(i, _)| !seen.contains(i))
            .map(|(_, c)| c.clone()),
    );
    Ok(reordered)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use crate::llm::{GenerateOptions, LlmError, TextGenerator};
    use crate::summarize::{DirectSummarizer, SummaryBounds};
    use async_trait::async_trait;
    use scout_search::{PageContent, SearchError};
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct FakeSearch {
        results: std::result::Result<Vec<Candidate>, String>,
        calls: Mutex<Vec<(String, usize)>>,
    }

    impl FakeSearch {
        fn returning(results: Vec<Candidate>) -> Self {
            Self {
                results: Ok(results),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                results: Err(message.into()),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl WebSearch for FakeSearch {
        async fn search(
            &self,
            query: &str,
            max_results: usize,
        ) -> std::result::Result<Vec<Candidate>, SearchError> {
            self.calls.lock().unwrap().push((query.into(), max_results));
            self.results.clone().map_err(SearchError::Http)
        }
    }

    /// Serves pages by URL; unknown URLs time out.
    #[derive(Default)]
    struct FakeFetcher {
        pages: HashMap<String, PageContent>,
        fetched: Mutex<Vec<String>>,
    }

    impl FakeFetcher {
        fn with_page(mut self, url: &str, title: &str, text: &str) -> Self {
            self.pages.insert(
                url.into(),
                PageContent {
                    url: url.into(),
                    title: title.into(),
                    text: text.into(),
                },
            );
            self
        }
    }

    #[async_trait]
    impl PageFetcher for FakeFetcher {
        async fn fetch(
            &self,
            url: &str,
            max_chars: usize,
        ) -> std::result::Result<PageContent, SearchError> {
            self.fetched.lock().unwrap().push(url.into());
            match self.pages.get(url) {
                Some(page) => {
                    let mut page = page.clone();
                    page.text = page.text.chars().take(max_chars).collect();
                    Ok(page)
                }
                None => Err(SearchError::Http(format!("{url}: request timed out"))),
            }
        }
    }

    /// Echoes the model name; fails for prompts mentioning "poison".
    #[derive(Default)]
    struct FakeGenerator {
        models: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl TextGenerator for FakeGenerator {
        async fn generate(
            &self,
            prompt: &str,
            model: &str,
            _options: &GenerateOptions,
        ) -> crate::llm::Result<String> {
            self.models.lock().unwrap().push(model.into());
            if prompt.contains("poison") {
                return Err(LlmError::FallbackFailed {
                    primary: "down".into(),
                    fallback: "down".into(),
                });
            }
            Ok(format!("- summary by {model}"))
        }
    }

    #[derive(Default)]
    struct FakeDirect {
        calls: Mutex<usize>,
    }

    #[async_trait]
    impl DirectSummarizer for FakeDirect {
        async fn summarize(&self, _text: &str, _bounds: SummaryBounds) -> Result<String> {
            *self.calls.lock().unwrap() += 1;
            Ok("Direct summary.".into())
        }
    }

    struct FixedReranker(std::result::Result<Vec<usize>, String>);

    impl Reranker for FixedReranker {
        fn rerank(
            &self,
            _query: &str,
            docs: &[&str],
            top_k: Option<usize>,
        ) -> Result<Vec<(usize, f32)>> {
            let order = self.0.clone().map_err(ScoutError::Rerank)?;
            let mut ranked: Vec<(usize, f32)> = order
                .into_iter()
                .enumerate()
                .map(|(pos, i)| (i, 1.0 - pos as f32 / (docs.len().max(1) as f32)))
                .collect();
            if let Some(k) = top_k {
                ranked.truncate(k);
            }
            Ok(ranked)
        }
    }

    struct Harness {
        search: Arc<FakeSearch>,
        fetcher: Arc<FakeFetcher>,
        generator: Arc<FakeGenerator>,
        direct: Arc<FakeDirect>,
    }

    impl Harness {
        fn new(search: FakeSearch, fetcher: FakeFetcher) -> Self {
            Self {
                search: Arc::new(search),
                fetcher: Arc::new(fetcher),
                generator: Arc::new(FakeGenerator::default()),
                direct: Arc::new(FakeDirect::default()),
            }
        }

        fn researcher(&self) -> Researcher {
            let summarizer = Summarizer::new(self.generator.clone(), self.direct.clone(), 50, 90);
            Researcher::new(
                self.search.clone(),
                self.fetcher.clone(),
                summarizer,
                "llama3.2:3b",
            )
        }
    }

    fn candidates(n: usize) -> Vec<Candidate> {
        (1..=n)
            .map(|i| Candidate::new(format!("Result {i}"), format!("https://example.com/{i}")))
            .collect()
    }

    fn fetcher_for(n: usize) -> FakeFetcher {
        (1..=n).fold(FakeFetcher::default(), |f, i| {
            f.with_page(
                &format!("https://example.com/{i}"),
                &format!("Page {i}"),
                "Plenty of readable text.",
            )
        })
    }

    fn urls(report: &Report) -> Vec<&str> {
        report.sections.iter().map(|s| s.url.as_str()).collect()
    }

    #[tokio::test]
    async fn empty_query_is_rejected_before_search() {
        let h = Harness::new(FakeSearch::returning(candidates(2)), fetcher_for(2));
        let err = h
            .researcher()
            .research(&ResearchRequest::new("   "))
            .await
            .unwrap_err();
        assert!(matches!(err, ScoutError::EmptyQuery));
        assert!(h.search.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn search_failure_is_fatal() {
        let h = Harness::new(FakeSearch::failing("dns failure"), FakeFetcher::default());
        let err = h
            .researcher()
            .research(&ResearchRequest::new("rust"))
            .await
            .unwrap_err();
        assert!(matches!(err, ScoutError::Search(_)));
    }

    #[tokio::test]
    async fn no_results_renders_fixed_notice() {
        let h = Harness::new(FakeSearch::returning(Vec::new()), FakeFetcher::default());
        let report = h
            .researcher()
            .research(&ResearchRequest::new("obscure query"))
            .await
            .unwrap();
        assert_eq!(
            report.render(),
            "# Research results for: obscure query\n\n(No results found.)"
        );
        assert!(h.fetcher.fetched.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn search_is_called_with_k_and_results_truncated() {
        let h = Harness::new(FakeSearch::returning(candidates(5)), fetcher_for(5));
        let request = ResearchRequest::new("rust").with_k(2).with_reranker(false);
        let report = h.researcher().research(&request).await.unwrap();
        assert_eq!(h.search.calls.lock().unwrap()[0], ("rust".to_owned(), 2));
        assert_eq!(report.sections.len(), 2);
    }

    #[tokio::test]
    async fn every_failure_still_yields_one_section_per_candidate() {
        let h = Harness::new(FakeSearch::returning(candidates(3)), FakeFetcher::default());
        let request = ResearchRequest::new("rust").with_reranker(false);
        let report = h.researcher().research(&request).await.unwrap();
        assert_eq!(report.sections.len(), 3);
        for s in &report.sections {
            assert!(!s.is_success());
            assert!(s.body().starts_with("(Skipped due to error: "));
            assert!(s.body().contains(&format!("[Citation: {}]", s.url)));
        }
    }

    #[tokio::test]
    async fn one_timeout_among_two_candidates() {
        let fetcher = FakeFetcher::default().with_page(
            "https://example.com/1",
            "Top languages",
            "Rust, Python and Go.",
        );
        let h = Harness::new(FakeSearch::returning(candidates(2)), fetcher);
        let request = ResearchRequest::new("best programming languages 2025")
            .with_k(2)
            .with_reranker(false);
        let report = h.researcher().research(&request).await.unwrap();
        let text = report.render();

        assert_eq!(report.sections.len(), 2);
        assert_eq!(text.matches("\n## ").count(), 2);
        assert!(report.sections[0].is_success());
        let second = report.sections[1].body();
        assert!(second.starts_with("(Skipped due to error: fetch failed:"));
        assert!(second.contains("timed out"));
        assert!(second.contains("[Citation: https://example.com/2]"));
    }

    #[tokio::test]
    async fn summaries_cite_their_urls() {
        let h = Harness::new(FakeSearch::returning(candidates(3)), fetcher_for(3));
        let report = h
            .researcher()
            .research(&ResearchRequest::new("rust").with_reranker(false))
            .await
            .unwrap();
        for s in &report.sections {
            assert!(s.is_success());
            assert!(s.body().contains(&format!("[Citation: {}]", s.url)));
        }
    }

    #[tokio::test]
    async fn summarize_failure_is_isolated() {
        let fetcher = fetcher_for(2).with_page("https://example.com/1", "Bad", "poison text");
        let h = Harness::new(FakeSearch::returning(candidates(2)), fetcher);
        let report = h
            .researcher()
            .research(&ResearchRequest::new("rust").with_reranker(false))
            .await
            .unwrap();
        assert!(!report.sections[0].is_success());
        assert!(report.sections[0].body().contains("FALLBACK_FAILED"));
        assert!(report.sections[1].is_success());
    }

    #[tokio::test]
    async fn section_title_prefers_page_then_search_then_url() {
        let search = FakeSearch::returning(vec![
            Candidate::new("Search title", "https://example.com/1"),
            Candidate::new("Search only", "https://example.com/2"),
            Candidate::new("", "https://example.com/3"),
        ]);
        let fetcher = FakeFetcher::default()
            .with_page("https://example.com/1", "Page title", "text")
            .with_page("https://example.com/2", "  ", "text");
        let h = Harness::new(search, fetcher);
        let report = h
            .researcher()
            .research(&ResearchRequest::new("rust").with_reranker(false))
            .await
            .unwrap();
        let titles: Vec<&str> = report.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Page title", "Search only", "https://example.com/3"]);
    }

    #[tokio::test]
    async fn valid_rerank_permutation_sets_order() {
        let h = Harness::new(FakeSearch::returning(candidates(3)), fetcher_for(3));
        let researcher = h
            .researcher()
            .with_reranker(Arc::new(FixedReranker(Ok(vec![2, 0, 1]))));
        let report = researcher.research(&ResearchRequest::new("rust")).await.unwrap();
        assert_eq!(
            urls(&report),
            vec![
                "https://example.com/3",
                "https://example.com/1",
                "https://example.com/2"
            ]
        );
        let indices: Vec<usize> = report.sections.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
        assert_eq!(
            *h.fetcher.fetched.lock().unwrap(),
            vec![
                "https://example.com/3".to_owned(),
                "https://example.com/1".to_owned(),
                "https://example.com/2".to_owned()
            ]
        );
    }

    #[tokio::test]
    async fn rerank_error_keeps_search_order() {
        let h = Harness::new(FakeSearch::returning(candidates(3)), fetcher_for(3));
        let researcher = h
            .researcher()
            .with_reranker(Arc::new(FixedReranker(Err("model missing".into()))));
        let report = researcher.research(&ResearchRequest::new("rust")).await.unwrap();
        assert_eq!(
            urls(&report),
            vec![
                "https://example.com/1",
                "https://example.com/2",
                "https://example.com/3"
            ]
        );
    }

    #[tokio::test]
    async fn out_of_range_rerank_index_keeps_search_order() {
        let h = Harness::new(FakeSearch::returning(candidates(2)), fetcher_for(2));
        let researcher = h
            .researcher()
            .with_reranker(Arc::new(FixedReranker(Ok(vec![1, 7]))));
        let report = researcher.research(&ResearchRequest::new("rust")).await.unwrap();
        assert_eq!(urls(&report), vec!["https://example.com/1", "https://example.com/2"]);
    }

    #[tokio::test]
    async fn partial_rerank_appends_missing_candidates() {
        let h = Harness::new(FakeSearch::returning(candidates(3)), fetcher_for(3));
        let researcher = h
            .researcher()
            .with_reranker(Arc::new(FixedReranker(Ok(vec![2]))));
        let report = researcher.research(&ResearchRequest::new("rust")).await.unwrap();
        assert_eq!(
            urls(&report),
            vec![
                "https://example.com/3",
                "https://example.com/1",
                "https://example.com/2"
            ]
        );
    }

    #[tokio::test]
    async fn missing_reranker_keeps_search_order() {
        let h = Harness::new(FakeSearch::returning(candidates(2)), fetcher_for(2));
        let report = h
            .researcher()
            .research(&ResearchRequest::new("rust"))
            .await
            .unwrap();
        assert_eq!(urls(&report), vec!["https://example.com/1", "https://example.com/2"]);
    }

    #[tokio::test]
    async fn disabled_reranker_is_not_consulted() {
        let h = Harness::new(FakeSearch::returning(candidates(2)), fetcher_for(2));
        let researcher = h
            .researcher()
            .with_reranker(Arc::new(FixedReranker(Ok(vec![1, 0]))));
        let report = researcher
            .research(&ResearchRequest::new("rust").with_reranker(false))
            .await
            .unwrap();
        assert_eq!(urls(&report), vec!["https://example.com/1", "https://example.com/2"]);
    }

    #[tokio::test]
    async fn model_selector_routes_backend() {
        let h = Harness::new(FakeSearch::returning(candidates(1)), fetcher_for(1));
        let researcher = h.researcher();

        researcher
            .research(&ResearchRequest::new("rust").with_reranker(false))
            .await
            .unwrap();
        assert_eq!(*h.generator.models.lock().unwrap(), vec!["llama3.2:3b".to_owned()]);

        let report = researcher
            .research(
                &ResearchRequest::new("rust")
                    .with_reranker(false)
                    .with_model("hf:distilbart"),
            )
            .await
            .unwrap();
        assert_eq!(*h.direct.calls.lock().unwrap(), 1);
        assert_eq!(h.generator.models.lock().unwrap().len(), 1);
        assert!(report.sections[0].body().starts_with("Direct summary."));
    }

    #[test]
    fn apply_order_validates_indices() {
        let c = candidates(3);
        assert!(apply_order(&c, &[0, 0]).is_err());
        assert!(apply_order(&c, &[3]).is_err());
        assert_eq!(apply_order(&c, &[]).unwrap(), c);
        let reordered = apply_order(&c, &[1]).unwrap();
        assert_eq!(reordered[0].url, "https://example.com/2");
        assert_eq!(reordered[1].url, "https://example.com/1");
        assert_eq!(reordered[2].url, "https://example.com/3");
    }
}
