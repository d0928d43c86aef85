use std::sync::LazyLock;

use rand::Rng;
use regex::Regex;
use scraper::{ElementRef, Html};
use serde::Serialize;
use tracing::debug;

use crate::error::{ScrapeError, ScrapeResult};
use crate::fetch::PageFetcher;
use crate::markup::{first_match, selector, text_of};

/// Number of ranked rows on a Top-250 chart page.
pub const LISTING_SIZE: usize = 250;

const TITLE_COLUMN: &str = ".titleColumn";
const POSTER_IMAGE: &str = ".posterColumn a img";
const RATING: &str = ".imdbRating strong";

// Resize/quality segment such as "._V1_UY209_CR0,0,140,209_AL_" before ".jpg"
static POSTER_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\._.+(\.jpg)$").expect("poster suffix pattern is valid"));

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingEntry {
    pub title: String,
    pub year: String,
    pub poster_url: String,
    pub rating: String,
    pub detail_url: String,
}

/// Chooses which listing row to use.
pub trait IndexPicker {
    /// Returns an index in `0..upper`.
    fn pick(&mut self, upper: usize) -> usize;
}

/// Uniform choice from the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl IndexPicker for ThreadRandom {
    fn pick(&mut self, upper: usize) -> usize {
        rand::thread_rng().gen_range(0..upper)
    }
}

impl<F> IndexPicker for F
where
    F: FnMut(usize) -> usize,
{
    fn pick(&mut self, upper: usize) -> usize {
        self(upper)
    }
}

/// Fetches a chart page and returns one of its rows chosen by `picker`.
pub fn sample<F, P>(
    fetcher: &F,
    listing_url: &str,
    site_origin: &str,
    picker: &mut P,
) -> ScrapeResult<ListingEntry>
where
    F: PageFetcher + ?Sized,
    P: IndexPicker + ?Sized,
{
    let html = fetcher.fetch(listing_url)?;
    parse_listing(&html, site_origin, picker)
}

pub fn parse_listing<P>(
    html: &str,
    site_origin: &str,
    picker: &mut P,
) -> ScrapeResult<ListingEntry>
where
    P: IndexPicker + ?Sized,
{
    let document = Html::parse_document(html);
    let title_column = selector(TITLE_COLUMN)?;
    let rows: Vec<ElementRef> = document.select(&title_column).collect();

    if rows.len() < LISTING_SIZE {
        return Err(ScrapeError::parse(format!(
            "expected {} title rows, found {}",
            LISTING_SIZE,
            rows.len()
        )));
    }

    let index = picker.pick(LISTING_SIZE);
    debug!(index, rows = rows.len(), "picked listing row");

    let row = rows
        .get(index)
        .filter(|_| index < LISTING_SIZE)
        .copied()
        .ok_or_else(|| ScrapeError::parse(format!("picked row {} is out of range", index)))?;

    parse_row(row, site_origin)
}

fn parse_row(title_column: ElementRef<'_>, site_origin: &str) -> ScrapeResult<ListingEntry> {
    let link = first_match(title_column, "a")?
        .ok_or_else(|| ScrapeError::parse("title row has no link"))?;
    let href = link
        .value()
        .attr("href")
        .ok_or_else(|| ScrapeError::parse("title link has no href"))?;
    let title = text_of(link).trim().to_string();

    let year_annotation = first_match(title_column, "span")?
        .map(text_of)
        .ok_or_else(|| ScrapeError::parse("title row has no year annotation"))?;
    let year = year_from_annotation(&year_annotation)?;

    // Poster and rating live in sibling cells of the same table row
    let row = title_column
        .parent()
        .and_then(ElementRef::wrap)
        .ok_or_else(|| ScrapeError::parse("title column has no parent row"))?;

    let poster_src = first_match(row, POSTER_IMAGE)?
        .and_then(|img| img.value().attr("src"))
        .ok_or_else(|| ScrapeError::parse("row has no poster image"))?;

    let rating = first_match(row, RATING)?
        .map(text_of)
        .ok_or_else(|| ScrapeError::parse("row has no rating"))?;

    Ok(ListingEntry {
        title,
        year,
        poster_url: strip_poster_url(poster_src),
        rating: rating.trim().to_string(),
        detail_url: absolute_url(site_origin, href),
    })
}

// "(1994)" -> "1994"
fn year_from_annotation(annotation: &str) -> ScrapeResult<String> {
    let year: String = annotation
        .split_once('(')
        .map(|(_, rest)| rest.chars().take(4).collect())
        .unwrap_or_default();

    if year.chars().count() != 4 {
        return Err(ScrapeError::parse(format!(
            "cannot read year from '{}'",
            annotation.trim()
        )));
    }
    Ok(year)
}

fn absolute_url(site_origin: &str, href: &str) -> String {
    format!("{}{}", site_origin.trim_end_matches('/'), href)
}

/// Drops the inline resize/quality suffix so the full-size poster is used.
pub fn strip_poster_url(url: &str) -> String {
    POSTER_SUFFIX.replace(url, "$1").into_owned()
}
