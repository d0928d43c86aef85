// Live probe: runs one suggestion against the real site and prints it as JSON.
// Usage: suggest [movie|series]

use std::env;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use imdb_suggest_bot::config::ScrapeConfigBuilder;
use imdb_suggest_bot::fetch::HttpFetcher;
use imdb_suggest_bot::{ContentKind, Suggester, ThreadRandom};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    let kind = match env::args().nth(1).as_deref() {
        None | Some("movie") => ContentKind::Movie,
        Some("series") => ContentKind::Series,
        Some(other) => anyhow::bail!("unknown kind '{}', expected movie or series", other),
    };

    let config = ScrapeConfigBuilder::new()
        .movies_url(env::var("IMDB_MOVIES_URL").ok())
        .series_url(env::var("IMDB_SERIES_URL").ok())
        .site_origin(env::var("IMDB_ORIGIN").ok())
        .user_agent(env::var("IMDB_USER_AGENT").ok())
        .build()?;

    let fetcher = HttpFetcher::new(&config)?;
    let suggestion = Suggester::new(fetcher, config)
        .suggest(kind, &mut ThreadRandom)
        .with_context(|| format!("could not suggest a {}", kind.label()))?;

    println!("{}", serde_json::to_string_pretty(&suggestion)?);
    Ok(())
}
