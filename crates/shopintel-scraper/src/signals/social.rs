use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use scraper::Html;
use shopintel_core::SocialPlatform;

use crate::html::anchor_hrefs;
use crate::url::resolve_url;

/// Host patterns per platform, checked in this order for every anchor.
const SOCIAL_DOMAINS: &[(SocialPlatform, &str)] = &[
    (SocialPlatform::Instagram, r"instagram\.com"),
    (SocialPlatform::Facebook, r"facebook\.com|fb\.com"),
    (SocialPlatform::Twitter, r"twitter\.com|x\.com"),
    (SocialPlatform::Tiktok, r"tiktok\.com"),
    (SocialPlatform::Youtube, r"youtube\.com|youtu\.be"),
    (SocialPlatform::Linkedin, r"linkedin\.com"),
    (SocialPlatform::Pinterest, r"pinterest\.com|pin\.it"),
];

static SOCIAL_PATTERNS: LazyLock<Vec<(SocialPlatform, Regex)>> = LazyLock::new(|| {
    SOCIAL_DOMAINS
        .iter()
        .map(|(platform, hosts)| {
            // Anchored on the host so `notinstagram.com` or a path mentioning
            // the domain does not count.
            let pattern =
                format!(r"(?i)^(?:https?:)?//(?:[a-z0-9-]+\.)*(?:{hosts})(?:[/?#:]|$)");
            (*platform, Regex::new(&pattern).expect("valid social regex"))
        })
        .collect()
});

/// Records the first profile URL found per social platform.
///
/// Later links to an already-recorded platform are ignored.
#[must_use]
pub fn extract_social_handles(document: &Html, base_url: &str) -> BTreeMap<SocialPlatform, String> {
    let mut handles = BTreeMap::new();

    for href in anchor_hrefs(document) {
        let Some(platform) = SOCIAL_PATTERNS
            .iter()
            .find(|(_, re)| re.is_match(href))
            .map(|(platform, _)| *platform)
        else {
            continue;
        };
        if handles.contains_key(&platform) {
            continue;
        }
        let url = resolve_url(base_url, href).unwrap_or_else(|| href.to_owned());
        handles.insert(platform, url);
    }

    handles
}
