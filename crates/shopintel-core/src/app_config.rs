use std::net::SocketAddr;

/// User-Agent sent to storefronts unless overridden. Many themes serve a
/// stripped page to obvious bots, so this mimics a desktop browser.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Upper bound on characters kept from each policy page.
pub const CONTENT_MAX_CHARS_LIMIT: usize = 2000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Timeout applied to every individual storefront fetch.
    pub fetch_timeout_secs: u64,
    pub user_agent: String,
    /// Characters kept from each policy page, at most
    /// [`CONTENT_MAX_CHARS_LIMIT`].
    pub content_max_chars: usize,
}
