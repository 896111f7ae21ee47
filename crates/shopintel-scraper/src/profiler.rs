//! Single-pass orchestration of a storefront profile.

use std::collections::BTreeMap;

use chrono::Utc;
use scraper::Html;
use shopintel_core::{
    AppConfig, ContactDetails, HeroProduct, LinkCategory, PolicyCategory, SocialPlatform,
    StoreProfile,
};

use crate::catalog::extract_catalog;
use crate::client::{FetchConfig, StoreClient};
use crate::content::{extract_text, DEFAULT_MAX_CHARS};
use crate::error::ScraperError;
use crate::hero::extract_hero_from_document;
use crate::html::{element_text, select_first};
use crate::signals::{extract_contact_details, extract_important_links, extract_social_handles};
use crate::url::normalize_store_url;

/// Builds [`StoreProfile`]s for storefront URLs.
///
/// Holds no per-run state, so one profiler may be used for any number of
/// sequential or concurrent runs. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct StoreProfiler {
    client: StoreClient,
    content_max_chars: usize,
}

/// Everything read from the homepage document. Owned so the parsed tree can
/// be dropped before the next fetch.
#[derive(Debug, Default)]
struct HomepageSignals {
    store_name: Option<String>,
    hero_products: Vec<HeroProduct>,
    social_handles: BTreeMap<SocialPlatform, String>,
    contact_details: ContactDetails,
    important_links: BTreeMap<LinkCategory, String>,
}

impl StoreProfiler {
    #[must_use]
    pub fn new(client: StoreClient) -> Self {
        Self {
            client,
            content_max_chars: DEFAULT_MAX_CHARS,
        }
    }

    /// Overrides the number of characters kept from each policy page,
    /// capped at [`DEFAULT_MAX_CHARS`].
    #[must_use]
    pub fn with_content_max_chars(mut self, max_chars: usize) -> Self {
        self.content_max_chars = max_chars.min(DEFAULT_MAX_CHARS);
        self
    }

    /// Builds a profiler with its own client from application config.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the HTTP client cannot be built.
    pub fn from_app_config(config: &AppConfig) -> Result<Self, ScraperError> {
        let client = StoreClient::new(&FetchConfig::from_app_config(config))?;
        Ok(Self::new(client).with_content_max_chars(config.content_max_chars))
    }

    /// Profiles the storefront behind `website_url`.
    ///
    /// Every extractor degrades to an empty or absent field on its own; the
    /// homepage is the only fetch whose failure aborts the run.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Unreachable`] when the homepage cannot be
    /// fetched. No further requests are made in that case.
    pub async fn profile(&self, website_url: &str) -> Result<StoreProfile, ScraperError> {
        let base_url = normalize_store_url(website_url);
        tracing::info!(input = website_url, base_url = %base_url, "profiling store");

        let Some(homepage) = self.client.fetch(&base_url).await else {
            tracing::warn!(base_url = %base_url, "store homepage unreachable");
            return Err(ScraperError::Unreachable { url: base_url });
        };

        let signals = read_homepage(&homepage.body, &base_url);
        let products = extract_catalog(&self.client, &base_url).await;

        let mut policy_texts = Vec::new();
        for category in PolicyCategory::ALL {
            let Some(url) = signals.important_links.get(&category.link_category()) else {
                continue;
            };
            if let Some(text) = extract_text(&self.client, url, self.content_max_chars).await {
                policy_texts.push((category, text));
            }
        }

        let mut profile = StoreProfile {
            store_name: signals.store_name,
            website_url: base_url,
            total_products: products.len(),
            products,
            hero_products: signals.hero_products,
            social_handles: signals.social_handles,
            contact_details: signals.contact_details,
            important_links: signals.important_links,
            privacy_policy: None,
            return_policy: None,
            brand_context: None,
            faqs: None,
            scraped_at: Utc::now(),
        };
        for (category, text) in policy_texts {
            *profile.policy_text_mut(category) = Some(text);
        }

        tracing::info!(
            base_url = %profile.website_url,
            products = profile.total_products,
            hero_products = profile.hero_products.len(),
            social = profile.social_handles.len(),
            links = profile.important_links.len(),
            "store profile assembled"
        );
        Ok(profile)
    }
}

/// Parses the homepage once and runs every document-level extractor on it.
fn read_homepage(body: &str, base_url: &str) -> HomepageSignals {
    let document = Html::parse_document(body);
    HomepageSignals {
        store_name: store_name(&document),
        hero_products: extract_hero_from_document(&document, base_url),
        social_handles: extract_social_handles(&document, base_url),
        contact_details: extract_contact_details(&document, base_url),
        important_links: extract_important_links(&document, base_url),
    }
}

/// `<title>` text, falling back to the `og:site_name` meta tag.
fn store_name(document: &Html) -> Option<String> {
    let root = document.root_element();
    select_first(root, "title")
        .map(element_text)
        .filter(|title| !title.is_empty())
        .or_else(|| {
            select_first(root, r#"meta[property="og:site_name"]"#)
                .and_then(|meta| meta.value().attr("content"))
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_owned)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://example.com";

    #[test]
    fn store_name_from_title() {
        let doc = Html::parse_document(
            "<html><head><title>  Cozy   Candle Co. </title></head><body></body></html>",
        );
        assert_eq!(store_name(&doc).as_deref(), Some("Cozy Candle Co."));
    }

    #[test]
    fn store_name_falls_back_to_og_site_name() {
        let doc = Html::parse_document(
            r#"<html><head><title></title><meta property="og:site_name" content="Cozy Candle"></head></html>"#,
        );
        assert_eq!(store_name(&doc).as_deref(), Some("Cozy Candle"));
    }

    #[test]
    fn store_name_absent_without_title_or_meta() {
        let doc = Html::parse_document("<html><body><p>hi</p></body></html>");
        assert_eq!(store_name(&doc), None);
    }

    #[test]
    fn from_app_config_applies_content_limit() {
        let config = AppConfig {
            env: shopintel_core::Environment::Test,
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            log_level: "info".to_string(),
            fetch_timeout_secs: 4,
            user_agent: "shopintel-test/0.1".to_string(),
            content_max_chars: 120,
        };
        let profiler = StoreProfiler::from_app_config(&config).unwrap();
        assert_eq!(profiler.content_max_chars, 120);
    }

    #[test]
    fn content_limit_is_capped() {
        let client = StoreClient::new(&FetchConfig::default()).unwrap();
        let profiler = StoreProfiler::new(client).with_content_max_chars(5000);
        assert_eq!(profiler.content_max_chars, DEFAULT_MAX_CHARS);
    }

    #[test]
    fn read_homepage_runs_every_extractor() {
        let signals = read_homepage(
            r#"<html><head><title>Shop</title></head><body>
                 <div data-product-id="1"><h3>Mug</h3></div>
                 <a href="https://instagram.com/shop">IG</a>
                 <a href="/pages/contact">Contact</a>
                 <p>hello@shop.com</p>
               </body></html>"#,
            BASE,
        );
        assert_eq!(signals.store_name.as_deref(), Some("Shop"));
        assert_eq!(signals.hero_products.len(), 1);
        assert!(signals.social_handles.contains_key(&SocialPlatform::Instagram));
        assert!(signals.contact_details.emails.contains("hello@shop.com"));
        assert_eq!(
            signals.important_links.get(&LinkCategory::Contact).map(String::as_str),
            Some("https://example.com/pages/contact")
        );
    }

    #[test]
    fn read_homepage_of_empty_page_yields_empty_signals() {
        let signals = read_homepage("", BASE);
        assert!(signals.store_name.is_none());
        assert!(signals.hero_products.is_empty());
        assert!(signals.social_handles.is_empty());
        assert!(signals.contact_details.is_empty());
        assert!(signals.important_links.is_empty());
    }
}
