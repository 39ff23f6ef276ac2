//! Link and image extraction from fetched markup
//!
//! Given a page's URL and raw HTML, produces the page title, the canonical
//! link and image URL sets, and the page's visible text. The parser is fully
//! encapsulated here; the orchestrator only sees [`ExtractedPage`].
//!
//! Trap links are filtered out of the link set: `rel="nofollow"`, inline
//! styles hiding the element, and `aria-hidden="true"` all mark a hyperlink
//! as one the crawler should not follow. Images are collected
//! unconditionally; only links get trap filtering.

use crate::url::Canonicalizer;
use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeSet;
use url::Url;

/// Placeholder title for pages without a usable `<title>` element
pub const MISSING_TITLE: &str = "(no title)";

/// Everything the crawler needs from one parsed page
///
/// Link and image sets are keyed by canonical URL string; `BTreeSet` keeps
/// iteration lexicographic, which makes reporting and traversal order
/// deterministic.
#[derive(Debug, Clone)]
pub struct ExtractedPage {
    /// Trimmed text of the first `<title>` element, or [`MISSING_TITLE`]
    pub title: String,

    /// Canonical URLs of non-trap hyperlinks
    pub links: BTreeSet<String>,

    /// Canonical URLs of image sources
    pub images: BTreeSet<String>,

    /// Whitespace-normalized text content, used for duplicate detection
    pub visible_text: String,
}

/// Parses markup and extracts links, images, title, and visible text
///
/// Malformed markup never fails: the HTML parser recovers what it can and
/// anything unextractable simply contributes nothing. References that do not
/// resolve to a parsable URL are skipped.
///
/// # Arguments
///
/// * `canonicalizer` - Canonicalization rules for resolved references
/// * `page_url` - The URL the markup was fetched from (resolution base)
/// * `markup` - Raw HTML
pub fn extract_page(
    canonicalizer: &Canonicalizer,
    page_url: &Url,
    markup: &str,
) -> ExtractedPage {
    let document = Html::parse_document(markup);

    let title = extract_title(&document);
    let links = extract_links(&document, canonicalizer, page_url);
    let images = extract_images(&document, canonicalizer, page_url);
    let visible_text = visible_text(&document);

    ExtractedPage {
        title,
        links,
        images,
        visible_text,
    }
}

fn extract_title(document: &Html) -> String {
    let Ok(selector) = Selector::parse("title") else {
        return MISSING_TITLE.to_string();
    };

    document
        .select(&selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| MISSING_TITLE.to_string())
}

fn extract_links(
    document: &Html,
    canonicalizer: &Canonicalizer,
    page_url: &Url,
) -> BTreeSet<String> {
    let mut links = BTreeSet::new();

    if let Ok(selector) = Selector::parse("a[href]") {
        for element in document.select(&selector) {
            if is_trap_link(&element) {
                tracing::debug!(
                    href = element.value().attr("href").unwrap_or(""),
                    "skipping trap link"
                );
                continue;
            }

            if let Some(href) = element.value().attr("href") {
                if let Ok(resolved) = canonicalizer.resolve(page_url, href) {
                    links.insert(resolved.to_string());
                }
            }
        }
    }

    links
}

fn extract_images(
    document: &Html,
    canonicalizer: &Canonicalizer,
    page_url: &Url,
) -> BTreeSet<String> {
    let mut images = BTreeSet::new();

    if let Ok(selector) = Selector::parse("img[src]") {
        for element in document.select(&selector) {
            if let Some(src) = element.value().attr("src") {
                if let Ok(resolved) = canonicalizer.resolve(page_url, src) {
                    images.insert(resolved.to_string());
                }
            }
        }
    }

    images
}

/// Detects crawler-trap hyperlinks: nofollow relations, elements hidden via
/// inline style, and elements explicitly flagged as accessibility-hidden
fn is_trap_link(element: &ElementRef) -> bool {
    let value = element.value();

    if let Some(rel) = value.attr("rel") {
        if rel
            .split_whitespace()
            .any(|r| r.eq_ignore_ascii_case("nofollow"))
        {
            return true;
        }
    }

    if let Some(style) = value.attr("style") {
        let style = style.to_ascii_lowercase();
        if style.contains("display:none") || style.contains("visibility:hidden") {
            return true;
        }
    }

    matches!(value.attr("aria-hidden"), Some("true"))
}

/// Collects the document's text nodes, trimmed and joined by single spaces
fn visible_text(document: &Html) -> String {
    document
        .root_element()
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
