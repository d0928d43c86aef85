use anyhow::{Context, Result};
use url::Url;

pub const DEFAULT_MOVIES_URL: &str = "https://www.imdb.com/chart/top";
pub const DEFAULT_SERIES_URL: &str = "https://www.imdb.com/chart/toptv";
pub const DEFAULT_SITE_ORIGIN: &str = "https://www.imdb.com";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

#[derive(Debug, Clone, PartialEq)]
pub struct ScrapeConfig {
    pub movies_url: String,
    pub series_url: String,
    /// Prefixed to the relative detail links found on listing pages.
    pub site_origin: String,
    pub user_agent: String,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            movies_url: DEFAULT_MOVIES_URL.to_string(),
            series_url: DEFAULT_SERIES_URL.to_string(),
            site_origin: DEFAULT_SITE_ORIGIN.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub token: String,
    pub scrape: ScrapeConfig,
}

impl BotConfig {
    /// Reads the bot settings from the process environment (after `.env` has
    /// been loaded by the caller).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = ["TELOXIDE_TOKEN", "BOT_TOKEN"]
            .into_iter()
            .filter_map(|key| lookup(key))
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty())
            .ok_or_else(|| anyhow::anyhow!("TELOXIDE_TOKEN (or BOT_TOKEN) is not set"))?;

        let scrape = ScrapeConfigBuilder::new()
            .movies_url(lookup("IMDB_MOVIES_URL"))
            .series_url(lookup("IMDB_SERIES_URL"))
            .site_origin(lookup("IMDB_ORIGIN"))
            .user_agent(lookup("IMDB_USER_AGENT"))
            .build()
            .context("invalid scrape configuration")?;

        Ok(Self { token, scrape })
    }
}

// Unset values fall back to the defaults above
#[derive(Debug, Default)]
pub struct ScrapeConfigBuilder {
    movies_url: Option<String>,
    series_url: Option<String>,
    site_origin: Option<String>,
    user_agent: Option<String>,
}

impl ScrapeConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn movies_url(mut self, url: Option<String>) -> Self {
        self.movies_url = non_empty(url);
        self
    }

    pub fn series_url(mut self, url: Option<String>) -> Self {
        self.series_url = non_empty(url);
        self
    }

    pub fn site_origin(mut self, origin: Option<String>) -> Self {
        self.site_origin = non_empty(origin);
        self
    }

    pub fn user_agent(mut self, user_agent: Option<String>) -> Self {
        self.user_agent = non_empty(user_agent);
        self
    }

    pub fn build(self) -> Result<ScrapeConfig> {
        let defaults = ScrapeConfig::default();

        let movies_url = self.movies_url.unwrap_or(defaults.movies_url);
        let series_url = self.series_url.unwrap_or(defaults.series_url);
        let site_origin = self
            .site_origin
            .unwrap_or(defaults.site_origin)
            .trim_end_matches('/')
            .to_string();

        for (name, value) in [
            ("movies url", &movies_url),
            ("series url", &series_url),
            ("site origin", &site_origin),
        ] {
            check_http_url(value).with_context(|| format!("bad {}: {}", name, value))?;
        }

        Ok(ScrapeConfig {
            movies_url,
            series_url,
            site_origin,
            user_agent: self.user_agent.unwrap_or(defaults.user_agent),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn check_http_url(value: &str) -> Result<()> {
    let url = Url::parse(value)?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(anyhow::anyhow!("unsupported scheme '{}'", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_builder_defaults() {
        let config = ScrapeConfigBuilder::new().build().unwrap();
        assert_eq!(config, ScrapeConfig::default());
    }

    #[test]
    fn test_builder_trims_origin_slash() {
        let config = ScrapeConfigBuilder::new()
            .site_origin(Some("https://example.org/".to_string()))
            .build()
            .unwrap();
        assert_eq!(config.site_origin, "https://example.org");
    }

    #[test]
    fn test_builder_rejects_non_http_url() {
        let result = ScrapeConfigBuilder::new()
            .movies_url(Some("ftp://example.org/top".to_string()))
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_token_is_required() {
        assert!(BotConfig::from_lookup(lookup_from(&[])).is_err());
        assert!(BotConfig::from_lookup(lookup_from(&[("TELOXIDE_TOKEN", "  ")])).is_err());
    }

    #[test]
    fn test_token_falls_back_to_bot_token() {
        let config = BotConfig::from_lookup(lookup_from(&[("BOT_TOKEN", "123:abc")])).unwrap();
        assert_eq!(config.token, "123:abc");
        assert_eq!(config.scrape.movies_url, DEFAULT_MOVIES_URL);
    }

    #[test]
    fn test_env_overrides() {
        let config = BotConfig::from_lookup(lookup_from(&[
            ("TELOXIDE_TOKEN", "1:x"),
            ("IMDB_SERIES_URL", "http://localhost:8080/toptv"),
            ("IMDB_USER_AGENT", "suggest-bot/0.1"),
        ]))
        .unwrap();
        assert_eq!(config.scrape.series_url, "http://localhost:8080/toptv");
        assert_eq!(config.scrape.user_agent, "suggest-bot/0.1");
    }
}
