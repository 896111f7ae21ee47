mod profile;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "shopintel-cli")]
#[command(about = "Storefront business-intelligence profiler")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Profile a storefront and print the result as JSON.
    Profile {
        /// Domain or full URL of the store, e.g. `example.com`.
        website_url: String,
        /// Pretty-print the JSON output.
        #[arg(long)]
        pretty: bool,
        /// Per-fetch timeout, overriding `SHOPINTEL_FETCH_TIMEOUT_SECS`.
        #[arg(long)]
        timeout_secs: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = shopintel_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    // stdout carries the JSON document only.
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Profile {
            website_url,
            pretty,
            timeout_secs,
        } => {
            let output = profile::run_profile(&config, &website_url, timeout_secs, pretty).await?;
            println!("{output}");
        }
    }

    Ok(())
}
