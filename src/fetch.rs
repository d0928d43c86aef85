use reqwest::blocking::Client;
use reqwest::header;
use tracing::debug;

use crate::config::ScrapeConfig;
use crate::error::{ScrapeError, ScrapeResult};

/// Source of raw HTML pages. The scrape core only talks to the network
/// through this trait.
pub trait PageFetcher {
    fn fetch(&self, url: &str) -> ScrapeResult<String>;
}

impl<T: PageFetcher + ?Sized> PageFetcher for &T {
    fn fetch(&self, url: &str) -> ScrapeResult<String> {
        (**self).fetch(url)
    }
}

/// Blocking HTTP fetcher. Must not be created or dropped on an async
/// executor thread.
pub struct HttpFetcher {
    client: Client,
    user_agent: String,
}

impl HttpFetcher {
    pub fn new(config: &ScrapeConfig) -> ScrapeResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| ScrapeError::internal(format!("http client setup: {}", e)))?;

        Ok(Self {
            client,
            user_agent: config.user_agent.clone(),
        })
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> ScrapeResult<String> {
        debug!(url, "fetching page");

        let response = self
            .client
            .get(url)
            .header(header::USER_AGENT, self.user_agent.as_str())
            .send()
            .map_err(|e| ScrapeError::fetch(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::fetch(url, format!("HTTP error: {}", status)));
        }

        response.text().map_err(|e| ScrapeError::fetch(url, e))
    }
}
