//! Crawler module for page fetching, extraction, and traversal
//!
//! This module contains the core crawling logic:
//! - HTTP fetching with a content-type guard
//! - Link/image extraction with trap filtering
//! - Same-host image downloads
//! - Visited/duplicate bookkeeping
//! - Politeness pacing
//! - Depth-first crawl orchestration

mod extractor;
mod fetcher;
mod images;
mod ledger;
mod orchestrator;
mod pacing;

pub use extractor::{extract_page, ExtractedPage, MISSING_TITLE};
pub use fetcher::{build_http_client, is_html_content_type, PageFetcher};
pub use images::{derive_filename, DownloadOutcome, ImageDownloader};
pub use ledger::{content_fingerprint, DedupLedger, FINGERPRINT_TEXT_LIMIT};
pub use orchestrator::{CrawlReport, Crawler};
pub use pacing::{JitteredPacer, NoDelay, Pacing};

use crate::config::CrawlConfig;
use crate::Result;
use std::path::PathBuf;
use url::Url;

/// Runs a complete crawl from a starting URL
///
/// Convenience wrapper: builds a [`Crawler`] for the start URL's host and
/// runs it to completion.
///
/// # Arguments
///
/// * `config` - Immutable crawl configuration
/// * `start` - Absolute http(s) starting URL
/// * `depth` - Traversal depth (0 fetches only the starting page)
/// * `out_dir` - Directory for downloaded images
///
/// # Returns
///
/// * `Ok(CrawlReport)` - Run counters; per-page failures are inside, not errors
/// * `Err(HostboundError)` - Setup failed before any crawling
pub async fn crawl(
    config: &CrawlConfig,
    start: &Url,
    depth: u32,
    out_dir: impl Into<PathBuf>,
) -> Result<CrawlReport> {
    let mut crawler = Crawler::new(config, start, out_dir)?;
    Ok(crawler.run(start, depth).await)
}
