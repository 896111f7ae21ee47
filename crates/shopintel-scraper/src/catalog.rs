//! Catalog extraction from the storefront's `products.json` feed.

use shopintel_core::Product;

use crate::client::{extract_store_origin, StoreClient};
use crate::error::ScraperError;
use crate::normalize::normalize_product;
use crate::types::{FeedProduct, FeedResponse};

/// Largest page size the feed endpoint honours.
const FEED_PAGE_LIMIT: u32 = 250;

/// Fetches and decodes the store's product feed.
///
/// Every failure (unreachable feed, non-2xx, malformed JSON, missing
/// `products` key) is logged and yields an empty list.
pub async fn extract_catalog(client: &StoreClient, base_url: &str) -> Vec<Product> {
    let origin = extract_store_origin(base_url);
    let feed_url = format!("{origin}/products.json?limit={FEED_PAGE_LIMIT}");

    let Some(page) = client.fetch(&feed_url).await else {
        return Vec::new();
    };

    match parse_catalog(&page.body, &origin) {
        Ok(products) => {
            tracing::debug!(url = %feed_url, count = products.len(), "decoded product feed");
            products
        }
        Err(e) => {
            tracing::warn!(url = %feed_url, error = %e, "product feed unusable");
            Vec::new()
        }
    }
}

/// Decodes a feed body into normalized products.
///
/// Individual entries that fail to decode are skipped.
///
/// # Errors
///
/// Returns [`ScraperError::Deserialize`] if the body is not JSON or lacks the
/// top-level `products` array.
pub fn parse_catalog(body: &str, store_origin: &str) -> Result<Vec<Product>, ScraperError> {
    let feed: FeedResponse =
        serde_json::from_str(body).map_err(|e| ScraperError::Deserialize {
            context: format!("product feed from {store_origin}"),
            source: e,
        })?;

    let products = feed
        .products
        .into_iter()
        .enumerate()
        .filter_map(
            |(index, raw)| match serde_json::from_value::<FeedProduct>(raw) {
                Ok(product) => Some(normalize_product(product, store_origin)),
                Err(e) => {
                    tracing::warn!(index, error = %e, "skipping malformed feed entry");
                    None
                }
            },
        )
        .collect();

    Ok(products)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopintel_core::PriceRange;

    #[test]
    fn parses_minimal_feed() {
        let body = r#"{"products": [{
            "id": 1,
            "title": "Candle",
            "handle": "candle",
            "tags": "home, scent",
            "variants": [{"price": "9.99", "available": true}],
            "images": [{"src": "https://cdn.example.com/candle.jpg"}]
        }]}"#;
        let products = parse_catalog(body, "https://example.com").unwrap();
        assert_eq!(products.len(), 1);
        let candle = &products[0];
        assert_eq!(candle.title, "Candle");
        assert_eq!(candle.tags, vec!["home", "scent"]);
        assert_eq!(candle.price_range, Some(PriceRange::Single { price: 9.99 }));
        assert!(candle.available);
        assert_eq!(candle.url, "https://example.com/products/candle");
    }

    #[test]
    fn non_json_body_is_an_error() {
        let err = parse_catalog("<html>Not here</html>", "https://example.com").unwrap_err();
        assert!(matches!(err, ScraperError::Deserialize { .. }), "got: {err:?}");
    }

    #[test]
    fn missing_products_key_is_an_error() {
        let err = parse_catalog(r#"{"items": []}"#, "https://example.com").unwrap_err();
        assert!(matches!(err, ScraperError::Deserialize { .. }), "got: {err:?}");
    }

    #[test]
    fn malformed_entries_are_skipped() {
        let body = r#"{"products": [
            {"title": "no id"},
            {"id": 2, "title": "Mug", "handle": "mug"},
            "garbage"
        ]}"#;
        let products = parse_catalog(body, "https://example.com").unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, 2);
    }

    #[test]
    fn empty_feed_yields_no_products() {
        let products = parse_catalog(r#"{"products": []}"#, "https://example.com").unwrap();
        assert!(products.is_empty());
    }
}
