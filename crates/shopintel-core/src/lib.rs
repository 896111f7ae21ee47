pub mod app_config;
pub mod config;
pub mod profile;

pub use app_config::{AppConfig, Environment, CONTENT_MAX_CHARS_LIMIT, DEFAULT_USER_AGENT};
pub use config::{load_app_config, load_app_config_from_env};
pub use profile::{
    ContactDetails, HeroProduct, LinkCategory, PolicyCategory, PriceRange, Product,
    SocialPlatform, StoreProfile,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
