use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;
use shopintel_core::LinkCategory;

use crate::html::anchor_hrefs;
use crate::url::{is_page_href, resolve_url};

/// Keyword patterns matched against anchor hrefs, one per category.
const LINK_KEYWORDS: &[(LinkCategory, &str)] = &[
    (LinkCategory::Contact, "contact"),
    (LinkCategory::About, "about"),
    (LinkCategory::Shipping, "shipping"),
    (LinkCategory::Returns, "return|refund"),
    (LinkCategory::Privacy, "privacy"),
    (LinkCategory::Terms, "terms|conditions"),
    (LinkCategory::Faq, "faq|help"),
    (LinkCategory::Blog, "blog|news"),
    (LinkCategory::Track, "track|order"),
];

static LINK_PATTERNS: LazyLock<Vec<(LinkCategory, Regex)>> = LazyLock::new(|| {
    LINK_KEYWORDS
        .iter()
        .map(|(category, keywords)| {
            let re = Regex::new(&format!("(?i){keywords}")).expect("valid link regex");
            (*category, re)
        })
        .collect()
});

/// Maps each category to the first matching anchor in document order.
///
/// Categories without a match are absent from the result.
#[must_use]
pub fn extract_important_links(document: &Html, base_url: &str) -> BTreeMap<LinkCategory, String> {
    let hrefs: Vec<&str> = anchor_hrefs(document)
        .into_iter()
        .filter(|href| is_page_href(href))
        .collect();

    LINK_PATTERNS
        .iter()
        .filter_map(|(category, re)| {
            let url = hrefs
                .iter()
                .find(|href| re.is_match(href))
                .and_then(|href| resolve_url(base_url, href))?;
            Some((*category, url))
        })
        .collect()
}
