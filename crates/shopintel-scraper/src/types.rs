//! Response types for the public `products.json` feed.
//!
//! ## Observed shape
//!
//! ### Tags
//! Current storefronts return tags as a JSON array of strings; older themes
//! and proxies return a single comma-delimited string. Both are accepted.
//!
//! ### Prices
//! Variant prices are decimal strings (`"24.00"`), but some proxies emit
//! numbers. Unparsable or empty prices are treated as absent.
//!
//! ### `available`
//! Boolean per variant. Missing means unavailable.
//!
//! Entries are decoded one at a time from raw JSON values so that a single
//! malformed product does not discard the rest of the feed.

use serde::Deserialize;

/// Top-level response from `GET /products.json`.
#[derive(Debug, Deserialize)]
pub struct FeedResponse {
    pub products: Vec<serde_json::Value>,
}

/// A single product entry from the feed.
#[derive(Debug, Deserialize)]
pub struct FeedProduct {
    pub id: i64,

    pub title: String,

    #[serde(default)]
    pub handle: String,

    /// Raw HTML product description. May be `null` or absent.
    #[serde(default)]
    pub body_html: Option<String>,

    #[serde(default)]
    pub vendor: Option<String>,

    #[serde(default)]
    pub product_type: Option<String>,

    #[serde(default)]
    pub tags: Option<FeedTags>,

    #[serde(default)]
    pub images: Vec<FeedImage>,

    #[serde(default)]
    pub variants: Vec<FeedVariant>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum FeedTags {
    List(Vec<String>),
    Delimited(String),
}

impl FeedTags {
    /// Splits into individual tags, trimming whitespace and dropping empties.
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        let raw = match self {
            FeedTags::List(tags) => tags,
            FeedTags::Delimited(joined) => joined.split(',').map(str::to_owned).collect(),
        };
        raw.into_iter()
            .map(|t| t.trim().to_owned())
            .filter(|t| !t.is_empty())
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub struct FeedVariant {
    #[serde(default)]
    pub price: Option<FeedPrice>,

    #[serde(default)]
    pub available: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum FeedPrice {
    Number(f64),
    Text(String),
}

impl FeedPrice {
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FeedPrice::Number(n) => Some(*n),
            FeedPrice::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FeedImage {
    #[serde(default)]
    pub src: Option<String>,
}
