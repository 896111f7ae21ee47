//! Business-intelligence profile of a storefront, as assembled by the
//! scraper and handed to the hosting layer for serialization.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything learned about a storefront in one extraction pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreProfile {
    /// Homepage `<title>` text, or `og:site_name` when the title is empty.
    pub store_name: Option<String>,
    /// Normalized base URL the profile was built from.
    pub website_url: String,
    pub products: Vec<Product>,
    pub hero_products: Vec<HeroProduct>,
    pub social_handles: BTreeMap<SocialPlatform, String>,
    pub contact_details: ContactDetails,
    pub important_links: BTreeMap<LinkCategory, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub privacy_policy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_policy: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faqs: Option<String>,
    pub total_products: usize,
    pub scraped_at: DateTime<Utc>,
}

impl StoreProfile {
    /// Mutable slot receiving the extracted text for a policy category.
    pub fn policy_text_mut(&mut self, category: PolicyCategory) -> &mut Option<String> {
        match category {
            PolicyCategory::Privacy => &mut self.privacy_policy,
            PolicyCategory::Returns => &mut self.return_policy,
            PolicyCategory::About => &mut self.brand_context,
            PolicyCategory::Faq => &mut self.faqs,
        }
    }
}

/// A catalog entry decoded from the storefront's `products.json` feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub title: String,
    /// URL slug, e.g. `"classic-tee"`.
    pub handle: String,
    pub vendor: Option<String>,
    pub product_type: Option<String>,
    pub tags: Vec<String>,
    pub price_range: Option<PriceRange>,
    pub images: Vec<String>,
    /// Raw HTML from the feed's `body_html` field.
    pub description: String,
    /// `true` when at least one variant is available for purchase.
    pub available: bool,
    /// Absolute product page URL.
    pub url: String,
}

/// Price span across a product's priced variants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceRange {
    Single { price: f64 },
    Range { min_price: f64, max_price: f64 },
}

impl PriceRange {
    /// Builds a range from variant prices.
    ///
    /// Negative and non-finite values are ignored. Returns `None` when no
    /// usable price remains.
    #[must_use]
    #[allow(clippy::float_cmp)] // min and max are drawn from the same inputs
    pub fn from_prices<I>(prices: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let (min, max) = prices
            .into_iter()
            .filter(|p| p.is_finite() && *p >= 0.0)
            .fold(None, |acc: Option<(f64, f64)>, p| match acc {
                None => Some((p, p)),
                Some((lo, hi)) => Some((lo.min(p), hi.max(p))),
            })?;

        if min == max {
            Some(Self::Single { price: min })
        } else {
            Some(Self::Range {
                min_price: min,
                max_price: max,
            })
        }
    }
}

/// A product promoted on the homepage, recovered from HTML structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroProduct {
    pub title: String,
    /// Display text as rendered, e.g. `"$24.00"`. Not parsed.
    pub price: Option<String>,
    pub image: Option<String>,
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub emails: BTreeSet<String>,
    /// Phone numbers exactly as matched in the page text.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub phones: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_page: Option<String>,
}

impl ContactDetails {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.emails.is_empty() && self.phones.is_empty() && self.contact_page.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    Instagram,
    Facebook,
    Twitter,
    Tiktok,
    Youtube,
    Linkedin,
    Pinterest,
}

/// Navigation/footer link categories worth surfacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkCategory {
    Contact,
    About,
    Shipping,
    Returns,
    Privacy,
    Terms,
    Faq,
    Blog,
    Track,
}

impl LinkCategory {
    pub const ALL: [LinkCategory; 9] = [
        LinkCategory::Contact,
        LinkCategory::About,
        LinkCategory::Shipping,
        LinkCategory::Returns,
        LinkCategory::Privacy,
        LinkCategory::Terms,
        LinkCategory::Faq,
        LinkCategory::Blog,
        LinkCategory::Track,
    ];
}

/// Secondary pages whose readable text is captured in the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyCategory {
    Privacy,
    Returns,
    About,
    Faq,
}

impl PolicyCategory {
    pub const ALL: [PolicyCategory; 4] = [
        PolicyCategory::Privacy,
        PolicyCategory::Returns,
        PolicyCategory::About,
        PolicyCategory::Faq,
    ];

    /// The important-link category whose URL feeds this policy text.
    #[must_use]
    pub fn link_category(self) -> LinkCategory {
        match self {
            PolicyCategory::Privacy => LinkCategory::Privacy,
            PolicyCategory::Returns => LinkCategory::Returns,
            PolicyCategory::About => LinkCategory::About,
            PolicyCategory::Faq => LinkCategory::Faq,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_profile() -> StoreProfile {
        StoreProfile {
            store_name: None,
            website_url: "https://example.com".to_string(),
            products: Vec::new(),
            hero_products: Vec::new(),
            social_handles: BTreeMap::new(),
            contact_details: ContactDetails::default(),
            important_links: BTreeMap::new(),
            privacy_policy: None,
            return_policy: None,
            brand_context: None,
            faqs: None,
            total_products: 0,
            scraped_at: Utc::now(),
        }
    }

    #[test]
    fn price_range_equal_prices_collapse_to_single() {
        assert_eq!(
            PriceRange::from_prices([10.0, 10.0]),
            Some(PriceRange::Single { price: 10.0 })
        );
    }

    #[test]
    fn price_range_spans_min_and_max() {
        assert_eq!(
            PriceRange::from_prices([5.0, 20.0, 12.0]),
            Some(PriceRange::Range {
                min_price: 5.0,
                max_price: 20.0
            })
        );
    }

    #[test]
    fn price_range_absent_without_prices() {
        assert_eq!(PriceRange::from_prices(std::iter::empty()), None);
    }

    #[test]
    fn price_range_ignores_negative_and_nan() {
        assert_eq!(
            PriceRange::from_prices([-1.0, f64::NAN, 4.5]),
            Some(PriceRange::Single { price: 4.5 })
        );
        assert_eq!(PriceRange::from_prices([-3.0]), None);
    }

    #[test]
    fn price_range_min_never_exceeds_max() {
        let Some(PriceRange::Range {
            min_price,
            max_price,
        }) = PriceRange::from_prices([30.0, 2.5, 18.0])
        else {
            panic!("expected a price range");
        };
        assert!(min_price <= max_price);
        assert!((min_price - 2.5).abs() < f64::EPSILON);
        assert!((max_price - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn price_range_serializes_single_and_range_shapes() {
        let single = serde_json::to_value(PriceRange::Single { price: 9.99 }).unwrap();
        assert_eq!(single, serde_json::json!({"price": 9.99}));

        let range = serde_json::to_value(PriceRange::Range {
            min_price: 5.0,
            max_price: 20.0,
        })
        .unwrap();
        assert_eq!(range, serde_json::json!({"min_price": 5.0, "max_price": 20.0}));
    }

    #[test]
    fn empty_contact_details_serialize_as_empty_object() {
        let details = ContactDetails::default();
        assert!(details.is_empty());
        assert_eq!(serde_json::to_value(&details).unwrap(), serde_json::json!({}));
    }

    #[test]
    fn contact_details_with_page_is_not_empty() {
        let details = ContactDetails {
            contact_page: Some("https://example.com/pages/contact".to_string()),
            ..ContactDetails::default()
        };
        assert!(!details.is_empty());
    }

    #[test]
    fn profile_omits_absent_policy_text() {
        let mut profile = empty_profile();
        *profile.policy_text_mut(PolicyCategory::Returns) = Some("30 day returns".to_string());

        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["return_policy"], "30 day returns");
        assert!(json.get("privacy_policy").is_none());
        assert!(json.get("faqs").is_none());
        assert_eq!(profile.return_policy.as_deref(), Some("30 day returns"));
        assert_eq!(profile.brand_context, None);
    }

    #[test]
    fn policy_slots_match_their_category() {
        let mut profile = empty_profile();
        for (i, category) in PolicyCategory::ALL.into_iter().enumerate() {
            *profile.policy_text_mut(category) = Some(i.to_string());
        }
        assert_eq!(profile.privacy_policy.as_deref(), Some("0"));
        assert_eq!(profile.return_policy.as_deref(), Some("1"));
        assert_eq!(profile.brand_context.as_deref(), Some("2"));
        assert_eq!(profile.faqs.as_deref(), Some("3"));
    }

    #[test]
    fn link_category_keys_serialize_lowercase() {
        let mut profile = empty_profile();
        profile
            .important_links
            .insert(LinkCategory::Faq, "https://example.com/pages/faq".to_string());
        profile.social_handles.insert(
            SocialPlatform::Instagram,
            "https://instagram.com/example".to_string(),
        );

        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["important_links"]["faq"], "https://example.com/pages/faq");
        assert_eq!(
            json["social_handles"]["instagram"],
            "https://instagram.com/example"
        );
    }

    #[test]
    fn policy_categories_map_to_link_categories() {
        let links: Vec<_> = PolicyCategory::ALL
            .iter()
            .map(|c| c.link_category())
            .collect();
        assert_eq!(
            links,
            vec![
                LinkCategory::Privacy,
                LinkCategory::Returns,
                LinkCategory::About,
                LinkCategory::Faq
            ]
        );
    }
}
