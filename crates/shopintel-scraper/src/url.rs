//! Store URL normalization and href resolution.

/// Normalizes free-text store input into a base URL.
///
/// Prepends `https://` when the input has no `http`/`https` scheme and strips
/// trailing slashes. The result is stable under repeated application:
/// `normalize_store_url(&normalize_store_url(x)) == normalize_store_url(x)`.
///
/// Reachability is not checked here.
#[must_use]
pub fn normalize_store_url(input: &str) -> String {
    let trimmed = input.trim();
    let (scheme, rest) = split_scheme(trimmed).unwrap_or(("https", trimmed));
    format!("{scheme}://{}", rest.trim_end_matches('/'))
}

/// Splits a recognized scheme off the front of `s`, case-insensitively.
fn split_scheme(s: &str) -> Option<(&'static str, &str)> {
    ["https", "http"].into_iter().find_map(|scheme| {
        let prefix = s.as_bytes().get(..scheme.len() + 3)?;
        let (name, sep) = prefix.split_at(scheme.len());
        // A match means the prefix is pure ASCII, so slicing `s` after it is safe.
        (name.eq_ignore_ascii_case(scheme.as_bytes()) && sep == b"://")
            .then(|| (scheme, &s[prefix.len()..]))
    })
}

/// Resolves `href` against `base_url`, returning an absolute URL.
///
/// Protocol-relative hrefs (`//cdn.example.com/a.png`) inherit the base scheme.
#[must_use]
pub fn resolve_url(base_url: &str, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    let base = reqwest::Url::parse(base_url).ok()?;
    base.join(href).ok().map(|u| u.to_string())
}

/// Returns `false` for hrefs that never point at a page: fragments,
/// `javascript:`, `mailto:` and `tel:` links.
#[must_use]
pub fn is_page_href(href: &str) -> bool {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return false;
    }
    let lower = href.to_ascii_lowercase();
    !["javascript:", "mailto:", "tel:"]
        .iter()
        .any(|scheme| lower.starts_with(scheme))
}
