//! HTML content extraction: drops non-content markup and returns plain text.
//!
//! Parses raw HTML, skips `<script>`, `<style>`, `<noscript>` and
//! `<template>` subtrees, collapses whitespace runs to single spaces and
//! bounds the result to a character limit suitable for LLM prompts.

use crate::types::PageContent;
use scraper::{ElementRef, Html, Node, Selector};

/// Maximum characters kept from the page `<title>`.
pub const MAX_TITLE_CHARS: usize = 200;

/// Elements whose text never reaches the reader.
const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

/// Extract the title and visible text from raw HTML.
///
/// The title is trimmed and cut to [`MAX_TITLE_CHARS`] characters. The text
/// comes from `<body>` only, so the title is not repeated inside it, and is
/// cut to `max_chars` characters. A page without visible text yields an
/// empty `text`, which downstream summarizers treat as "no usable content".
pub fn extract_page(html: &str, url: &str, max_chars: usize) -> PageContent {
    let document = Html::parse_document(html);

    let title = truncate_chars(extract_title(&document).trim(), MAX_TITLE_CHARS);

    let mut raw = String::with_capacity(html.len() / 2);
    match body_element(&document) {
        Some(body) => collect_visible_text(body, &mut raw),
        None => collect_visible_text(document.root_element(), &mut raw),
    }
    let text = truncate_chars(&collapse_whitespace(&raw), max_chars);

    PageContent {
        url: url.to_owned(),
        title,
        text,
    }
}

/// Text of the first `<title>` element, or empty.
fn extract_title(document: &Html) -> String {
    let Ok(selector) = Selector::parse("title") else {
        return String::new();
    };
    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>())
        .unwrap_or_default()
}

fn body_element(document: &Html) -> Option<ElementRef<'_>> {
    let selector = Selector::parse("body").ok()?;
    document.select(&selector).next()
}

/// Append the text of `element` to `out`, skipping non-visible subtrees.
///
/// Text nodes are separated by a space so adjacent block elements do not
/// glue words together.
fn collect_visible_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                out.push_str(text);
                out.push(' ');
            }
            Node::Element(el) if SKIPPED_ELEMENTS.contains(&el.name()) => {}
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    collect_visible_text(child_el, out);
                }
            }
            _ => {}
        }
    }
}

/// Collapse every whitespace run (including newlines) to one space and trim.
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Keep at most `max_chars` characters, always on a char boundary.
pub(crate) fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_owned(),
        None => text.to_owned(),
    }
}
