//! HTTP fetcher for storefront pages and the `products.json` feed.

mod origin;

use std::time::Duration;

use reqwest::Client;
use shopintel_core::{AppConfig, DEFAULT_USER_AGENT};

use crate::error::ScraperError;

pub use origin::extract_store_origin;

/// Per-client fetch settings, fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl FetchConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            timeout_secs: config.fetch_timeout_secs,
            user_agent: config.user_agent.clone(),
        }
    }
}

/// A successfully fetched page.
#[derive(Debug, Clone)]
pub struct Page {
    /// Final URL after redirects.
    pub url: String,
    pub status: u16,
    pub body: String,
}

/// Single-attempt HTTP GET client for storefront pages.
///
/// Holds no per-call state: the underlying `reqwest::Client` is a shared
/// connection pool with no cookie store, so one instance may serve many
/// concurrent profile runs.
#[derive(Debug, Clone)]
pub struct StoreClient {
    client: Client,
}

impl StoreClient {
    /// Creates a `StoreClient` with the configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(config: &FetchConfig) -> Result<Self, ScraperError> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self { client })
    }

    /// Fetches `url`, returning `None` on any transport failure or non-2xx
    /// status. The cause is logged; nothing is retried.
    pub async fn fetch(&self, url: &str) -> Option<Page> {
        match self.try_fetch(url).await {
            Ok(page) => Some(page),
            Err(e) => {
                tracing::warn!(url, error = %e, "fetch failed");
                None
            }
        }
    }

    /// Fetches `url` once, surfacing the failure cause.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::Http`]: DNS, connection, TLS, timeout or body read failure.
    /// - [`ScraperError::UnexpectedStatus`]: any non-2xx status.
    pub async fn try_fetch(&self, url: &str) -> Result<Page, ScraperError> {
        let response = self
            .client
            .get(url)
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml,application/json;q=0.9,*/*;q=0.8",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let final_url = response.url().to_string();
        let body = response.text().await?;
        tracing::debug!(url, final_url = %final_url, bytes = body.len(), "fetched page");

        Ok(Page {
            url: final_url,
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
