//! Featured ("hero") product extraction from homepage markup.
//!
//! Themes mark up featured products in many different ways. Each
//! [`HeroStrategy`] pairs a container selector with the function that reads
//! a card out of it; strategies are tried in priority order and the first
//! one whose selector matches anything decides the result.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use shopintel_core::HeroProduct;

use crate::client::StoreClient;
use crate::html::{element_text, selector};
use crate::url::resolve_url;

/// Maximum number of featured products reported.
pub const HERO_LIMIT: usize = 6;

static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| card_selector(".product-title, .product-name, h3, h4"));
static PRICE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| card_selector(".price, .product-price"));
static IMAGE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| card_selector("img"));
static LINK_SELECTOR: LazyLock<Selector> = LazyLock::new(|| card_selector("a[href]"));

fn card_selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid hero card selector")
}

type CardExtractor = fn(ElementRef<'_>, &str) -> Option<HeroProduct>;

struct HeroStrategy {
    container: &'static str,
    extract: CardExtractor,
}

const HERO_STRATEGIES: &[HeroStrategy] = &[
    HeroStrategy {
        container: ".featured-products .product-item",
        extract: extract_card,
    },
    HeroStrategy {
        container: ".hero-products .product",
        extract: extract_card,
    },
    HeroStrategy {
        container: ".collection-grid .product-card",
        extract: extract_card,
    },
    HeroStrategy {
        container: "[data-product-id]",
        extract: extract_card,
    },
    HeroStrategy {
        container: ".product-recommendation",
        extract: extract_card,
    },
];

/// Fetches the homepage and extracts its featured products.
///
/// Returns an empty list when the page cannot be fetched.
pub async fn extract_hero(client: &StoreClient, base_url: &str) -> Vec<HeroProduct> {
    let Some(page) = client.fetch(base_url).await else {
        return Vec::new();
    };
    let document = Html::parse_document(&page.body);
    extract_hero_from_document(&document, base_url)
}

/// Extracts up to [`HERO_LIMIT`] featured products from a parsed homepage.
///
/// Only the first strategy with a non-empty match set is used; cards in it
/// without a title are dropped.
#[must_use]
pub fn extract_hero_from_document(document: &Html, base_url: &str) -> Vec<HeroProduct> {
    for strategy in HERO_STRATEGIES {
        let Some(sel) = selector(strategy.container) else {
            continue;
        };
        let containers: Vec<ElementRef<'_>> = document.select(&sel).take(HERO_LIMIT).collect();
        if containers.is_empty() {
            continue;
        }

        tracing::debug!(
            selector = strategy.container,
            matched = containers.len(),
            "hero selector matched"
        );
        return containers
            .into_iter()
            .filter_map(|card| (strategy.extract)(card, base_url))
            .collect();
    }

    tracing::debug!(base_url, "no hero product containers found");
    Vec::new()
}

/// Reads a product card. Title is required; price, image and link are
/// best-effort.
fn extract_card(card: ElementRef<'_>, base_url: &str) -> Option<HeroProduct> {
    let title = card
        .select(&TITLE_SELECTOR)
        .next()
        .map(element_text)
        .filter(|t| !t.is_empty())?;

    let price = card
        .select(&PRICE_SELECTOR)
        .next()
        .map(element_text)
        .filter(|p| !p.is_empty());

    let image = card.select(&IMAGE_SELECTOR).next().and_then(|img| {
        let el = img.value();
        el.attr("src")
            .or_else(|| el.attr("data-src"))
            .and_then(|src| resolve_url(base_url, src))
    });

    let link = card
        .select(&LINK_SELECTOR)
        .next()
        .and_then(|a| a.value().attr("href"))
        .and_then(|href| resolve_url(base_url, href));

    Some(HeroProduct {
        title,
        price,
        image,
        link,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://example.com";

    fn hero(html: &str) -> Vec<HeroProduct> {
        extract_hero_from_document(&Html::parse_document(html), BASE)
    }

    #[test]
    fn extracts_featured_product_cards() {
        let products = hero(
            r#"<div class="featured-products">
                 <div class="product-item">
                   <a href="/products/candle"><img src="//cdn.example.com/candle.jpg"></a>
                   <h3 class="product-title"> Soy Candle </h3>
                   <span class="price">$18.00</span>
                 </div>
               </div>"#,
        );
        assert_eq!(
            products,
            vec![HeroProduct {
                title: "Soy Candle".to_string(),
                price: Some("$18.00".to_string()),
                image: Some("https://cdn.example.com/candle.jpg".to_string()),
                link: Some("https://example.com/products/candle".to_string()),
            }]
        );
    }

    #[test]
    fn optional_fields_absent_when_missing() {
        let products = hero(r#"<div data-product-id="1"><h4>Mug</h4></div>"#);
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].title, "Mug");
        assert!(products[0].price.is_none());
        assert!(products[0].image.is_none());
        assert!(products[0].link.is_none());
    }

    #[test]
    fn cards_without_title_are_dropped() {
        let products = hero(
            r#"<div data-product-id="1"><span class="price">$5</span></div>
               <div data-product-id="2"><h3>Tote</h3></div>"#,
        );
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].title, "Tote");
    }

    #[test]
    fn first_matching_strategy_wins() {
        let products = hero(
            r#"<div class="hero-products"><div class="product"><h3>Hero Pick</h3></div></div>
               <div data-product-id="9"><h3>Grid Item</h3></div>"#,
        );
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].title, "Hero Pick");
    }

    #[test]
    fn matched_strategy_is_final_even_without_titles() {
        let products = hero(
            r#"<div class="collection-grid"><div class="product-card"><img src="/a.png"></div></div>
               <div class="product-recommendation"><h3>Later</h3></div>"#,
        );
        assert!(products.is_empty());
    }

    #[test]
    fn capped_at_six_entries() {
        let cards: String = (0..10)
            .map(|i| format!(r#"<div data-product-id="{i}"><h3>Item {i}</h3></div>"#))
            .collect();
        let products = hero(&cards);
        assert_eq!(products.len(), HERO_LIMIT);
        assert_eq!(products[5].title, "Item 5");
    }

    #[test]
    fn falls_back_to_data_src_for_lazy_images() {
        let products = hero(
            r#"<div data-product-id="1"><img data-src="/lazy.jpg"><h3>Lazy</h3></div>"#,
        );
        assert_eq!(
            products[0].image.as_deref(),
            Some("https://example.com/lazy.jpg")
        );
    }

    #[test]
    fn card_selectors_parse() {
        for sel in [&TITLE_SELECTOR, &PRICE_SELECTOR, &IMAGE_SELECTOR, &LINK_SELECTOR] {
            let _: &Selector = LazyLock::force(sel);
        }
    }

    #[test]
    fn no_containers_yields_empty_list() {
        assert!(hero("<html><body><p>Welcome</p></body></html>").is_empty());
    }
}
