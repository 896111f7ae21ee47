//! Readable-text extraction for secondary pages (policies, about, FAQ).
//!
//! Storefront chrome (announcement bars, cookie banners, popups, navigation)
//! is pruned first, then `readability` picks the main content node. When it
//! finds nothing usable the first non-empty main-content container is used.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Node};
use shopintel_core::CONTENT_MAX_CHARS_LIMIT;

use crate::client::StoreClient;
use crate::html::selector;

/// Default number of characters kept from a page. Also the upper bound.
pub const DEFAULT_MAX_CHARS: usize = CONTENT_MAX_CHARS_LIMIT;

/// Fallback containers for a page's primary content, most specific first.
const MAIN_CONTENT_SELECTORS: &[&str] = &[
    "main",
    "[role=main]",
    "article",
    "#MainContent",
    ".main-content",
    ".rte",
    "body",
];

/// Subtrees that never contribute readable content.
const BOILERPLATE_TAGS: &[&str] = &[
    "nav", "header", "footer", "aside", "form", "script", "style", "noscript", "iframe", "svg",
    "template", "button", "dialog", "head",
];

/// Elements rendered on their own line.
const BLOCK_TAGS: &[&str] = &[
    "p", "div", "section", "article", "main", "br", "li", "ul", "ol", "h1", "h2", "h3", "h4",
    "h5", "h6", "table", "tr", "blockquote", "dd", "dt", "details", "summary",
];

/// Never pruned, whatever their class says.
const STRUCTURAL_TAGS: &[&str] = &["html", "body", "main"];

/// Theme class/id markers for promotional and consent chrome.
static CHROME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)announcement|cookie|consent|newsletter|popup|modal|banner|promo|drawer|breadcrumb|skip-link|sponsor|advert|\bads?\b",
    )
    .expect("valid chrome regex")
});

const MAX_DEPTH: usize = 256;

/// Fetches `url` and reduces it to at most `max_chars` characters of text.
///
/// Returns `None` when the page cannot be fetched or holds no readable text.
pub async fn extract_text(client: &StoreClient, url: &str, max_chars: usize) -> Option<String> {
    let page = client.fetch(url).await?;
    let text = reduce_to_text(&page.body, &page.url, max_chars);
    if text.is_none() {
        tracing::debug!(url, "no readable content on page");
    }
    text
}

/// Reduces an HTML document to its main readable text.
///
/// Block elements become line breaks, whitespace is collapsed and the result
/// is cut to `max_chars` characters, never more than [`DEFAULT_MAX_CHARS`].
#[must_use]
pub fn reduce_to_text(html: &str, page_url: &str, max_chars: usize) -> Option<String> {
    let pruned = prune_chrome(html);
    let text = readable_text(&pruned, page_url).or_else(|| container_fallback(&pruned))?;

    let truncated = truncate_chars(&text, max_chars.min(DEFAULT_MAX_CHARS));
    (!truncated.is_empty()).then(|| truncated.to_string())
}

/// Removes boilerplate elements and class-marked chrome from the document.
fn prune_chrome(html: &str) -> String {
    let mut document = Html::parse_document(html);

    let doomed: Vec<_> = document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|el| is_chrome(*el))
        .map(|el| el.id())
        .collect();

    for id in doomed {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }
    document.html()
}

fn is_chrome(element: ElementRef<'_>) -> bool {
    let el = element.value();
    let name = el.name();
    if BOILERPLATE_TAGS.contains(&name) {
        return true;
    }
    if STRUCTURAL_TAGS.contains(&name) {
        return false;
    }
    [el.attr("class"), el.attr("id")]
        .into_iter()
        .flatten()
        .any(|marker| CHROME_RE.is_match(marker))
}

fn readable_text(html: &str, page_url: &str) -> Option<String> {
    let url = reqwest::Url::parse(page_url).ok()?;
    let extracted = match readability::extractor::extract(&mut html.as_bytes(), &url) {
        Ok(product) => product,
        Err(e) => {
            tracing::debug!(url = page_url, error = %e, "readability extraction failed");
            return None;
        }
    };

    let fragment = Html::parse_fragment(&extracted.content);
    let text = container_text(fragment.root_element());
    (!text.is_empty()).then_some(text)
}

fn container_fallback(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    MAIN_CONTENT_SELECTORS
        .iter()
        .copied()
        .filter_map(selector)
        .find_map(|sel| {
            let container = document.select(&sel).next()?;
            let text = container_text(container);
            (!text.is_empty()).then_some(text)
        })
}

fn container_text(container: ElementRef<'_>) -> String {
    let mut raw = String::new();
    collect_text(container, &mut raw, 0);

    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn collect_text(element: ElementRef<'_>, out: &mut String, depth: usize) {
    if depth > MAX_DEPTH {
        return;
    }
    for child in element.children() {
        match child.value() {
            Node::Text(text) => push_collapsed(out, text),
            Node::Element(el) => {
                let name = el.name();
                if BOILERPLATE_TAGS.contains(&name) || name == "title" {
                    continue;
                }
                let block = BLOCK_TAGS.contains(&name);
                if block {
                    out.push('\n');
                }
                if let Some(child_element) = ElementRef::wrap(child) {
                    collect_text(child_element, out, depth + 1);
                }
                if block {
                    out.push('\n');
                }
            }
            _ => {}
        }
    }
}

/// Appends `text` with each whitespace run reduced to one space.
fn push_collapsed(out: &mut String, text: &str) {
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !out.is_empty() && !out.ends_with(' ') && !out.ends_with('\n') {
                out.push(' ');
            }
        } else {
            out.push(ch);
        }
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => text[..index].trim_end(),
        None => text,
    }
}
