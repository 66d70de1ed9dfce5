//! Page fetcher: timed GET with a browser-like User-Agent, then extraction.

use crate::config::SearchConfig;
use crate::content::extract_page;
use crate::error::{Result, SearchError};
use crate::http::{self, ClientPurpose};
use crate::types::PageContent;

/// Download `url` and return its title and visible text.
///
/// Uses `config.fetch_timeout_seconds` for the whole request. No JavaScript
/// is executed; redirects follow reqwest's default policy.
///
/// # Errors
///
/// Returns [`SearchError::Status`] on a non-success HTTP status and
/// [`SearchError::Http`] on transport failures or an unreadable body.
pub async fn fetch_page(url: &str, max_chars: usize, config: &SearchConfig) -> Result<PageContent> {
    config.validate()?;
    let client = http::build_client(config, ClientPurpose::PageFetch)?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| SearchError::from_reqwest("page request failed", e))?
        .error_for_status()
        .map_err(|e| SearchError::from_reqwest("page HTTP error", e))?;

    let html = response
        .text()
        .await
        .map_err(|e| SearchError::from_reqwest("page body read failed", e))?;

    tracing::trace!(url, bytes = html.len(), "page downloaded");
    Ok(extract_page(&html, url, max_chars))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PAGE: &str = r#"<html><head><title>Agents in Practice</title>
        <script>track()</script></head>
        <body><h1>Web agents</h1><p>They search, read and summarise.</p></body></html>"#;

    #[tokio::test]
    async fn fetch_returns_title_and_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/article"))
            .and(header_exists("user-agent"))
            .respond_with(ResponseTemplate::new(200).set_body_string(PAGE))
            .mount(&server)
            .await;

        let url = format!("{}/article", server.uri());
        let page = fetch_page(&url, 1000, &SearchConfig::default())
            .await
            .expect("fetch should succeed");
        assert_eq!(page.url, url);
        assert_eq!(page.title, "Agents in Practice");
        assert_eq!(page.text, "Web agents They search, read and summarise.");
    }

    #[tokio::test]
    async fn fetch_truncates_to_max_chars() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(PAGE))
            .mount(&server)
            .await;

        let page = fetch_page(&server.uri(), 10, &SearchConfig::default())
            .await
            .expect("fetch should succeed");
        assert_eq!(page.text, "Web agents");
    }

    #[tokio::test]
    async fn fetch_error_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = fetch_page(&server.uri(), 100, &SearchConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn fetch_timeout_is_http_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(PAGE)
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let config = SearchConfig {
            fetch_timeout_seconds: 1,
            ..Default::default()
        };
        let err = fetch_page(&server.uri(), 100, &config).await.unwrap_err();
        assert!(matches!(err, SearchError::Http(_)));
        assert!(err.to_string().contains("timed out"));
    }

    #[tokio::test]
    async fn fetch_unreachable_host_is_http_error() {
        let err = fetch_page("http://127.0.0.1:9/", 100, &SearchConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, SearchError::Http(_)));
    }
}
