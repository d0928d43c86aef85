use scraper::{ElementRef, Html, Selector};

use crate::error::{ScrapeError, ScrapeResult};

pub fn selector(css: &str) -> ScrapeResult<Selector> {
    Selector::parse(css).map_err(|e| ScrapeError::parse(format!("bad selector '{}': {}", css, e)))
}

/// All elements under `root` carrying a class that starts with `prefix`, in
/// document order. The site appends hash suffixes to its class names, so an
/// exact class match would never hit.
pub fn with_class_prefix<'a>(
    root: ElementRef<'a>,
    prefix: &'a str,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    root.descendants()
        .filter_map(ElementRef::wrap)
        .filter(move |el| el.value().classes().any(|class| class.starts_with(prefix)))
}

pub fn first_with_class_prefix<'a>(document: &'a Html, prefix: &'a str) -> Option<ElementRef<'a>> {
    with_class_prefix(document.root_element(), prefix).next()
}

pub fn first_match<'a>(root: ElementRef<'a>, css: &str) -> ScrapeResult<Option<ElementRef<'a>>> {
    let selector = selector(css)?;
    Ok(root.select(&selector).next())
}

pub fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect()
}

/// Next sibling elements named `tag`, skipping text nodes and other tags.
pub fn next_siblings_named<'a>(
    el: ElementRef<'a>,
    tag: &'a str,
) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    el.next_siblings()
        .filter_map(ElementRef::wrap)
        .filter(move |sibling| sibling.value().name() == tag)
}
