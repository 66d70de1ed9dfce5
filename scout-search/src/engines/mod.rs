//! HTML scraping engines.
//!
//! One module per provider, each implementing
//! [`crate::engine::SearchEngineTrait`] against the provider's public
//! results page.

pub mod bing;
pub mod duckduckgo;

pub use bing::BingEngine;
pub use duckduckgo::DuckDuckGoEngine;

use crate::error::SearchError;
use scraper::{ElementRef, Selector};

pub(crate) fn selector(css: &str) -> Result<Selector, SearchError> {
    Selector::parse(css).map_err(|e| SearchError::Parse(format!("bad selector {css:?}: {e:?}")))
}

/// Visible text of an element with whitespace runs collapsed.
pub(crate) fn element_text(el: ElementRef<'_>) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}
