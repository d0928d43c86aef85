use scraper::Html;
use serde::Serialize;

use crate::error::{ScrapeError, ScrapeResult};
use crate::fetch::PageFetcher;
use crate::markup::{
    first_match, first_with_class_prefix, next_siblings_named, text_of, with_class_prefix,
};

// Class name prefixes; the site appends a hash to each of them
pub const PLOT_PREFIX: &str = "GenresAndPlot__TextContainerBreakpointXL";
pub const GENRE_CHIP_PREFIX: &str = "GenresAndPlot__GenreChip";
pub const METADATA_PREFIX: &str = "TitleBlock__TitleMetaDataContainer";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Movie,
    Series,
}

impl ContentKind {
    pub fn label(self) -> &'static str {
        match self {
            ContentKind::Movie => "movie",
            ContentKind::Series => "series",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DetailInfo {
    pub description: String,
    /// In page order.
    pub genres: Vec<String>,
    /// Empty for series, and for movies whose metadata list is empty.
    pub duration: String,
}

impl DetailInfo {
    pub fn genre_line(&self) -> String {
        self.genres.join(", ")
    }
}

pub fn extract_detail<F>(
    fetcher: &F,
    detail_url: &str,
    kind: ContentKind,
) -> ScrapeResult<DetailInfo>
where
    F: PageFetcher + ?Sized,
{
    let html = fetcher.fetch(detail_url)?;
    parse_detail(&html, kind)
}

pub fn parse_detail(html: &str, kind: ContentKind) -> ScrapeResult<DetailInfo> {
    let document = Html::parse_document(html);

    let description = first_with_class_prefix(&document, PLOT_PREFIX)
        .map(text_of)
        .ok_or_else(|| ScrapeError::parse("detail page has no plot block"))?;

    let mut genres = Vec::new();
    for chip in with_class_prefix(document.root_element(), GENRE_CHIP_PREFIX) {
        let label = first_match(chip, "span")?
            .map(text_of)
            .ok_or_else(|| ScrapeError::parse("genre chip has no label"))?;
        genres.push(label);
    }
    if genres.is_empty() {
        return Err(ScrapeError::parse("detail page has no genre chips"));
    }

    let duration = match kind {
        ContentKind::Movie => movie_duration(&document)?,
        ContentKind::Series => String::new(),
    };

    Ok(DetailInfo {
        description,
        genres,
        duration,
    })
}

/// The metadata list reads certificate, runtime, release year, ... so the
/// runtime is the second `li` after the first one. Reordering on the site
/// yields the wrong item rather than an error.
fn movie_duration(document: &Html) -> ScrapeResult<String> {
    let container = first_with_class_prefix(document, METADATA_PREFIX)
        .ok_or_else(|| ScrapeError::parse("detail page has no title metadata"))?;

    let Some(first_item) = first_match(container, "li")? else {
        return Ok(String::new());
    };

    next_siblings_named(first_item, "li")
        .nth(1)
        .map(text_of)
        .ok_or_else(|| ScrapeError::parse("title metadata has no runtime item"))
}
