//! Normalization from raw feed entries to [`shopintel_core::Product`].

use shopintel_core::{PriceRange, Product};

use crate::types::{FeedProduct, FeedVariant};

/// Normalizes a raw [`FeedProduct`] into a [`Product`].
///
/// `store_origin` is the scheme+host of the store, used to build the
/// absolute product page URL.
#[must_use]
pub fn normalize_product(product: FeedProduct, store_origin: &str) -> Product {
    let price_range = price_range(&product.variants);
    let available = is_available(&product.variants);

    let url = format!(
        "{}/products/{}",
        store_origin.trim_end_matches('/'),
        product.handle
    );

    let images = product
        .images
        .into_iter()
        .filter_map(|img| img.src)
        .filter(|src| !src.is_empty())
        .map(|src| absolutize_image(&src))
        .collect();

    Product {
        id: product.id,
        title: product.title,
        handle: product.handle,
        vendor: product.vendor.filter(|s| !s.is_empty()),
        product_type: product.product_type.filter(|s| !s.is_empty()),
        tags: product.tags.map(|t| t.into_vec()).unwrap_or_default(),
        price_range,
        images,
        description: product.body_html.unwrap_or_default(),
        available,
        url,
    }
}

/// Min/max over the variants that carry a parsable price.
fn price_range(variants: &[FeedVariant]) -> Option<PriceRange> {
    PriceRange::from_prices(
        variants
            .iter()
            .filter_map(|v| v.price.as_ref().and_then(|p| p.as_f64())),
    )
}

/// `true` when any variant is explicitly available; `false` with no variants.
fn is_available(variants: &[FeedVariant]) -> bool {
    variants.iter().any(|v| v.available == Some(true))
}

/// Feed image URLs are usually protocol-relative CDN paths.
fn absolutize_image(src: &str) -> String {
    if src.starts_with("//") {
        format!("https:{src}")
    } else {
        src.to_owned()
    }
}
