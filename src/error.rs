use thiserror::Error;

/// Failure of a single scrape request. Every kind ends the request; there is no
/// retry and no partial result.
#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("unexpected page structure: {0}")]
    Parse(String),

    /// The scrape never got to talk to the site: client setup failed or the
    /// worker running it died.
    #[error("scrape could not run: {0}")]
    Internal(String),
}

impl ScrapeError {
    pub fn fetch(url: &str, reason: impl ToString) -> Self {
        Self::Fetch {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch { .. })
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse(_))
    }
}

pub type ScrapeResult<T> = Result<T, ScrapeError>;
