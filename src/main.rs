use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use imdb_suggest_bot::bot;
use imdb_suggest_bot::config::BotConfig;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = BotConfig::from_env().context("failed to load bot configuration")?;

    bot::run(config).await;
    Ok(())
}
