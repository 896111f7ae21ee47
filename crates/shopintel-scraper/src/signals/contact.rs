use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;
use shopintel_core::ContactDetails;

use crate::html::{anchor_hrefs, visible_text};
use crate::url::{is_page_href, resolve_url};

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}\b").expect("valid email regex")
});

/// North-American numbers: optional `+1`, area code with or without
/// parentheses, `-`, `.` or space separators.
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+?1[-.\s]?)?(?:\(\d{3}\)|\b\d{3})[-.\s]?\d{3}[-.\s]?\d{4}\b")
        .expect("valid phone regex")
});

/// Retina asset names like `logo@2x.png` look like email addresses.
const IMAGE_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg", ".gif", ".webp", ".svg"];

/// Scans the page text for emails and phone numbers and finds the first
/// contact-page link.
#[must_use]
pub fn extract_contact_details(document: &Html, base_url: &str) -> ContactDetails {
    let text = visible_text(document);

    let emails: BTreeSet<String> = EMAIL_RE
        .find_iter(&text)
        .filter(|m| {
            !ends_with_image_extension(m.as_str())
                && !ends_with_image_extension(enclosing_token(&text, m.start(), m.end()))
        })
        .map(|m| m.as_str().to_lowercase())
        .collect();

    let phones: BTreeSet<String> = PHONE_RE
        .find_iter(&text)
        .map(|m| m.as_str().trim().to_owned())
        .collect();

    let contact_page = anchor_hrefs(document)
        .into_iter()
        .filter(|href| is_page_href(href))
        .find(|href| href.to_ascii_lowercase().contains("contact"))
        .and_then(|href| resolve_url(base_url, href));

    ContactDetails {
        emails,
        phones,
        contact_page,
    }
}

fn ends_with_image_extension(candidate: &str) -> bool {
    let lower = candidate.to_ascii_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// The whitespace-delimited token containing `text[start..end]`, without
/// trailing punctuation.
fn enclosing_token(text: &str, start: usize, end: usize) -> &str {
    let token_start = text[..start]
        .char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map_or(0, |(i, c)| i + c.len_utf8());
    let token_end = text[end..]
        .find(char::is_whitespace)
        .map_or(text.len(), |i| end + i);
    text[token_start..token_end].trim_end_matches(|c: char| c.is_ascii_punctuation())
}
