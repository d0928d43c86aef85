use serde::Serialize;
use tracing::debug;

use crate::config::ScrapeConfig;
use crate::detail::{extract_detail, ContentKind};
use crate::error::ScrapeResult;
use crate::fetch::PageFetcher;
use crate::listing::{sample, IndexPicker};

/// What the user gets shown for one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    pub kind: ContentKind,
    pub title: String,
    pub year: String,
    pub poster_url: String,
    pub rating: String,
    pub description: String,
    pub genre: String,
    /// Empty for series.
    pub duration: String,
}

pub struct Suggester<F> {
    fetcher: F,
    config: ScrapeConfig,
}

impl<F: PageFetcher> Suggester<F> {
    pub fn new(fetcher: F, config: ScrapeConfig) -> Self {
        Self { fetcher, config }
    }

    pub fn listing_url(&self, kind: ContentKind) -> &str {
        match kind {
            ContentKind::Movie => &self.config.movies_url,
            ContentKind::Series => &self.config.series_url,
        }
    }

    /// Listing page, then the chosen entry's detail page. Either step failing
    /// fails the whole suggestion.
    pub fn suggest<P>(&self, kind: ContentKind, picker: &mut P) -> ScrapeResult<Suggestion>
    where
        P: IndexPicker + ?Sized,
    {
        let entry = sample(
            &self.fetcher,
            self.listing_url(kind),
            &self.config.site_origin,
            picker,
        )?;
        debug!(title = %entry.title, url = %entry.detail_url, "sampled {}", kind.label());

        let detail = extract_detail(&self.fetcher, &entry.detail_url, kind)?;
        let genre = detail.genre_line();

        Ok(Suggestion {
            kind,
            title: entry.title,
            year: entry.year,
            poster_url: entry.poster_url,
            rating: entry.rating,
            description: detail.description,
            genre,
            duration: detail.duration,
        })
    }
}
