//! DuckDuckGo through its JavaScript-free HTML frontend.
//!
//! The frontend takes a form POST and answers with plain HTML in which every
//! organic result link goes through a `/l/?uddg=<target>` redirect.

use crate::config::SearchConfig;
use crate::engine::SearchEngineTrait;
use crate::error::SearchError;
use crate::http::{self, ClientPurpose};
use crate::types::{SearchEngine, SearchResult};
use super::{element_text, selector};
use scraper::Html;
use url::Url;

/// Production endpoint of the HTML-only DuckDuckGo frontend.
pub const DEFAULT_ENDPOINT: &str = "https://html.duckduckgo.com/html/";

const LINK_BASE: &str = "https://duckduckgo.com/";

/// DuckDuckGo HTML scraper.
#[derive(Debug, Clone)]
pub struct DuckDuckGoEngine {
    endpoint: String,
}

impl Default for DuckDuckGoEngine {
    fn default() -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }
}

impl DuckDuckGoEngine {
    /// Use a different endpoint (mirrors, mock servers).
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

impl SearchEngineTrait for DuckDuckGoEngine {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
        config: &SearchConfig,
    ) -> Result<Vec<SearchResult>, SearchError> {
        tracing::trace!(query, "duckduckgo query");
        let client = http::build_client(config, ClientPurpose::Search)?;

        // kp=1 is strict, kp=-2 turns filtering off.
        let safety = if config.safe_search { "1" } else { "-2" };
        let html = client
            .post(&self.endpoint)
            .form(&[("q", query), ("kp", safety)])
            .send()
            .await
            .map_err(|e| SearchError::from_reqwest("duckduckgo request", e))?
            .error_for_status()
            .map_err(|e| SearchError::from_reqwest("duckduckgo status", e))?
            .text()
            .await
            .map_err(|e| SearchError::from_reqwest("duckduckgo body", e))?;

        parse_results_page(&html, max_results)
    }

    fn engine_type(&self) -> SearchEngine {
        SearchEngine::DuckDuckGo
    }
}

/// Resolve a result link to its destination.
///
/// Redirect links (absolute, protocol-relative or path-only) are unwrapped
/// through their `uddg` parameter; other absolute links pass through.
fn resolve_link(href: &str) -> Option<String> {
    let base = Url::parse(LINK_BASE).ok()?;
    let link = if href.starts_with("http://") || href.starts_with("https://") {
        Url::parse(href).ok()?
    } else if href.starts_with('/') {
        base.join(href).ok()?
    } else {
        return None;
    };

    let is_redirect = link
        .host_str()
        .is_some_and(|h| h == "duckduckgo.com" || h.ends_with(".duckduckgo.com"))
        && link.path().starts_with("/l/");
    if !is_redirect {
        return Some(link.into());
    }
    link.query_pairs()
        .find_map(|(k, v)| (k == "uddg").then(|| v.into_owned()))
        .filter(|target| !target.is_empty())
}

/// Parse a results page, keeping provider order.
///
/// Sponsored blocks are dropped. A result without a resolvable link is
/// skipped; an empty title is kept.
pub(crate) fn parse_results_page(
    html: &str,
    max_results: usize,
) -> Result<Vec<SearchResult>, SearchError> {
    let block = selector("div.result:not(.result--ad), div.web-result:not(.result--ad)")?;
    let anchor = selector("a.result__a")?;
    let blurb = selector(".result__snippet")?;

    let document = Html::parse_document(html);
    let results: Vec<SearchResult> = document
        .select(&block)
        .filter_map(|result| {
            let a = result.select(&anchor).next()?;
            let url = a.value().attr("href").and_then(resolve_link)?;
            Some(SearchResult {
                title: element_text(a),
                url,
                snippet: result.select(&blurb).next().map(element_text).unwrap_or_default(),
                engine: SearchEngine::DuckDuckGo,
            })
        })
        .take(max_results)
        .collect();

    tracing::debug!(count = results.len(), "duckduckgo results parsed");
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const RESULTS_PAGE: &str = r#"<!DOCTYPE html>
<html><body>
<div class="result results_links results_links_deep web-result result--ad">
  <a class="result__a" href="https://ads.example.com/buy">Buy Now (Ad)</a>
</div>
<div class="result results_links results_links_deep web-result">
  <h2><a class="result__a" href="//duckduckgo.com/l/?uddg=https%3A%2F%2Fwww.rust-lang.org%2F&amp;rut=abc123">
    Rust Programming
    Language
  </a></h2>
  <a class="result__snippet">A language empowering everyone to build reliable and efficient software.</a>
</div>
<div class="result results_links results_links_deep web-result">
  <a class="result__a" href="/l/?uddg=https%3A%2F%2Ftokio.rs%2F&amp;rut=x">Tokio</a>
</div>
<div class="result results_links results_links_deep web-result">
  <a class="result__a">No link here</a>
</div>
<div class="result results_links results_links_deep web-result">
  <a class="result__a" href="https://en.wikipedia.org/wiki/Rust_(programming_language)"></a>
</div>
</body></html>"#;

    #[test]
    fn resolve_unwraps_redirects_in_every_form() {
        let want = Some("https://example.com/page".to_owned());
        let encoded = "uddg=https%3A%2F%2Fexample.com%2Fpage&rut=abc";
        assert_eq!(resolve_link(&format!("//duckduckgo.com/l/?{encoded}")), want);
        assert_eq!(resolve_link(&format!("https://duckduckgo.com/l/?{encoded}")), want);
        assert_eq!(resolve_link(&format!("/l/?{encoded}")), want);
    }

    #[test]
    fn resolve_passes_direct_links_and_rejects_junk() {
        assert_eq!(
            resolve_link("https://example.com/direct"),
            Some("https://example.com/direct".to_owned())
        );
        assert_eq!(resolve_link("javascript:void(0)"), None);
        assert_eq!(resolve_link("//duckduckgo.com/l/?rut=only"), None);
    }

    #[test]
    fn parse_keeps_order_and_normalises_titles() {
        let results = parse_results_page(RESULTS_PAGE, 10).expect("parse");
        let urls: Vec<&str> = results.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://www.rust-lang.org/",
                "https://tokio.rs/",
                "https://en.wikipedia.org/wiki/Rust_(programming_language)",
            ]
        );
        assert_eq!(results[0].title, "Rust Programming Language");
        assert!(results[0].snippet.starts_with("A language empowering"));
        assert_eq!(results[1].snippet, "");
        assert!(results[2].title.is_empty());
        assert!(results.iter().all(|r| r.engine == SearchEngine::DuckDuckGo));
    }

    #[test]
    fn parse_drops_ads_and_linkless_results() {
        let results = parse_results_page(RESULTS_PAGE, 10).expect("parse");
        assert!(results.iter().all(|r| !r.url.contains("ads.example.com")));
        assert!(results.iter().all(|r| r.title != "No link here"));
    }

    #[test]
    fn parse_caps_result_count() {
        assert_eq!(parse_results_page(RESULTS_PAGE, 1).expect("parse").len(), 1);
        assert!(parse_results_page("<html></html>", 5).expect("parse").is_empty());
    }

    #[tokio::test]
    async fn search_posts_form_with_safe_search() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_string_contains("q=rust+agents"))
            .and(body_string_contains("kp=1"))
            .respond_with(ResponseTemplate::new(200).set_body_string(RESULTS_PAGE))
            .expect(1)
            .mount(&server)
            .await;

        let results = DuckDuckGoEngine::with_endpoint(server.uri())
            .search("rust agents", 2, &SearchConfig::default())
            .await
            .expect("mock search");
        assert_eq!(results.len(), 2);
    }

    #[tokio::test]
    async fn search_reports_status_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = DuckDuckGoEngine::with_endpoint(server.uri())
            .search("rust", 5, &SearchConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::Status { status: 503, .. }));
    }

    #[tokio::test]
    #[ignore] // Needs network
    async fn live_duckduckgo_search() {
        let results = DuckDuckGoEngine::default()
            .search("autonomous web agents", 3, &SearchConfig::default())
            .await
            .expect("live search");
        assert!(!results.is_empty() && results.len() <= 3);
    }
}
