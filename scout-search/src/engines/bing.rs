//! Bing results page scraper.
//!
//! Organic hits are `li.b_algo` blocks. Bing often routes the result link
//! through a click tracker, `bing.com/ck/a?...&u=a1<base64url(target)>`,
//! which is decoded back to the destination.

use super::{element_text, selector};
use crate::config::SearchConfig;
use crate::engine::SearchEngineTrait;
use crate::error::SearchError;
use crate::http::{self, ClientPurpose};
use crate::types::{SearchEngine, SearchResult};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use scraper::Html;
use url::Url;

/// Production Bing search endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://www.bing.com/search";

/// Bing HTML scraper.
#[derive(Debug, Clone)]
pub struct BingEngine {
    endpoint: String,
}

impl Default for BingEngine {
    fn default() -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }
}

impl BingEngine {
    /// Use a different endpoint (mock servers in tests).
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

impl SearchEngineTrait for BingEngine {
    async fn search(
        &self,
        query: &str,
        max_results: usize,
        config: &SearchConfig,
    ) -> Result<Vec<SearchResult>, SearchError> {
        tracing::trace!(query, "bing query");
        let client = http::build_client(config, ClientPurpose::Search)?;

        let count = max_results.to_string();
        let safety = if config.safe_search { "Strict" } else { "Off" };
        let html = client
            .get(&self.endpoint)
            .query(&[
                ("q", query),
                ("count", count.as_str()),
                ("safeSearch", safety),
                ("setlang", "en"),
            ])
            .send()
            .await
            .map_err(|e| SearchError::from_reqwest("bing request", e))?
            .error_for_status()
            .map_err(|e| SearchError::from_reqwest("bing status", e))?
            .text()
            .await
            .map_err(|e| SearchError::from_reqwest("bing body", e))?;

        parse_results_page(&html, max_results)
    }

    fn engine_type(&self) -> SearchEngine {
        SearchEngine::Bing
    }
}

/// Decode a click-tracker link; any other absolute URL passes through.
fn untrack(href: &str) -> Option<String> {
    let link = Url::parse(href).ok()?;
    let tracked = link.host_str().is_some_and(|h| h.ends_with("bing.com"))
        && link.path().starts_with("/ck/");
    if !tracked {
        return Some(link.into());
    }

    let encoded = link
        .query_pairs()
        .find_map(|(k, v)| (k == "u").then(|| v.into_owned()))?;
    // The "a1" prefix tags the payload encoding.
    let payload = encoded.strip_prefix("a1").unwrap_or(&encoded);
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    String::from_utf8(bytes).ok().filter(|target| Url::parse(target).is_ok())
}

fn parse_results_page(html: &str, max_results: usize) -> Result<Vec<SearchResult>, SearchError> {
    let block = selector("li.b_algo")?;
    let heading_link = selector("h2 a")?;
    let caption = selector(".b_caption p, .b_lineclamp2, .b_algoSlug")?;

    let document = Html::parse_document(html);
    let results: Vec<SearchResult> = document
        .select(&block)
        .filter_map(|result| {
            let a = result.select(&heading_link).next()?;
            let url = a.value().attr("href").and_then(untrack)?;
            Some(SearchResult {
                title: element_text(a),
                url,
                snippet: result.select(&caption).next().map(element_text).unwrap_or_default(),
                engine: SearchEngine::Bing,
            })
        })
        .take(max_results)
        .collect();

    tracing::debug!(count = results.len(), "bing results parsed");
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const RESULTS_PAGE: &str = r#"<!DOCTYPE html>
<html><body><ol id="b_results">
<li class="b_algo">
  <h2><a href="https://www.rust-lang.org/" h="ID=SERP">Rust Programming Language</a></h2>
  <div class="b_caption"><p>A language empowering everyone to build reliable and efficient software.</p></div>
</li>
<li class="b_ad"><h2><a href="https://ads.example.com/">Sponsored</a></h2></li>
<li class="b_algo">
  <h2><a href="https://www.bing.com/ck/a?!&amp;&amp;p=abc&amp;u=a1aHR0cHM6Ly9kb2MucnVzdC1sYW5nLm9yZy9ib29rLw&amp;ntb=1">The Rust Book</a></h2>
  <div class="b_caption"><p>An introductory book about Rust.</p></div>
</li>
<li class="b_algo"><h2>Heading without a link</h2></li>
<li class="b_algo">
  <h2><a href="https://en.wikipedia.org/wiki/Rust_(programming_language)">Rust (programming language) - Wikipedia</a></h2>
</li>
</ol></body></html>"#;

    #[test]
    fn tracker_links_are_decoded() {
        let href = "https://www.bing.com/ck/a?!&&p=abc&u=a1aHR0cHM6Ly9kb2MucnVzdC1sYW5nLm9yZy9ib29rLw&ntb=1";
        assert_eq!(untrack(href).as_deref(), Some("https://doc.rust-lang.org/book/"));
    }

    #[test]
    fn untrack_rejects_relative_and_garbage() {
        assert_eq!(untrack(""), None);
        assert_eq!(untrack("/search?q=x"), None);
        assert_eq!(untrack("https://www.bing.com/ck/a?u=a1%21%21%21"), None);
    }

    #[test]
    fn parse_extracts_organic_results_in_order() {
        let results = parse_results_page(RESULTS_PAGE, 10).expect("parse");
        let urls: Vec<&str> = results.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "https://www.rust-lang.org/",
                "https://doc.rust-lang.org/book/",
                "https://en.wikipedia.org/wiki/Rust_(programming_language)",
            ]
        );
        assert_eq!(results[0].title, "Rust Programming Language");
        assert!(results[0].snippet.contains("reliable and efficient"));
        assert_eq!(results[2].snippet, "");
        assert!(results.iter().all(|r| r.engine == SearchEngine::Bing));
    }

    #[test]
    fn parse_caps_result_count() {
        assert_eq!(parse_results_page(RESULTS_PAGE, 2).expect("parse").len(), 2);
        assert!(parse_results_page("<html></html>", 3).expect("parse").is_empty());
    }

    #[tokio::test]
    async fn search_sends_query_count_and_safety() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("q", "rust"))
            .and(query_param("count", "2"))
            .and(query_param("safeSearch", "Off"))
            .respond_with(ResponseTemplate::new(200).set_body_string(RESULTS_PAGE))
            .expect(1)
            .mount(&server)
            .await;

        let config = SearchConfig {
            safe_search: false,
            ..Default::default()
        };
        let results = BingEngine::with_endpoint(server.uri())
            .search("rust", 2, &config)
            .await
            .expect("mock search");
        assert_eq!(results.len(), 2);
    }

    #[tokio::test]
    #[ignore] // Needs network
    async fn live_bing_search() {
        let results = BingEngine::default()
            .search("rust programming", 3, &SearchConfig::default())
            .await
            .expect("live search");
        assert!(!results.is_empty());
    }
}
