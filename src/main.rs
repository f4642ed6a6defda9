use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use xkcd_chat_bot::config::Config;
use xkcd_chat_bot::dispatcher::Dispatcher;
use xkcd_chat_bot::random::ThreadRandom;
use xkcd_chat_bot::server;
use xkcd_chat_bot::xkcd::ComicClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,xkcd_chat_bot=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("config.toml"));

    info!("Loading configuration from: {}", config_path.display());
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    info!("Configuration loaded successfully");
    info!("  Comic service: {}", config.xkcd.base_url);
    info!("  Upstream timeout: {}s", config.xkcd.timeout_secs);

    let comics = ComicClient::new(&config.xkcd)?;
    let dispatcher = Arc::new(Dispatcher::new(Box::new(comics), Box::new(ThreadRandom)));

    info!("Bot is starting...");
    server::run(dispatcher, &config.server).await?;

    Ok(())
}
