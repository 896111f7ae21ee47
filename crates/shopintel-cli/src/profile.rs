//! `profile` subcommand: one orchestrator run rendered as JSON.

use shopintel_core::{AppConfig, StoreProfile};
use shopintel_scraper::{FetchConfig, StoreClient, StoreProfiler};

/// Profiles `website_url` and returns the rendered JSON document.
///
/// # Errors
///
/// Returns an error if the timeout override is zero, the HTTP client cannot
/// be built, or the store homepage is unreachable.
pub(crate) async fn run_profile(
    config: &AppConfig,
    website_url: &str,
    timeout_secs: Option<u64>,
    pretty: bool,
) -> anyhow::Result<String> {
    let mut fetch = FetchConfig::from_app_config(config);
    if let Some(secs) = timeout_secs {
        anyhow::ensure!(secs > 0, "--timeout-secs must be greater than zero");
        fetch.timeout_secs = secs;
    }

    let profiler = StoreProfiler::new(StoreClient::new(&fetch)?)
        .with_content_max_chars(config.content_max_chars);
    let profile = profiler.profile(website_url).await?;

    tracing::info!(
        store = profile.store_name.as_deref().unwrap_or("-"),
        products = profile.total_products,
        "profile complete"
    );
    Ok(render_profile(&profile, pretty)?)
}

pub(crate) fn render_profile(
    profile: &StoreProfile,
    pretty: bool,
) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(profile)
    } else {
        serde_json::to_string(profile)
    }
}
