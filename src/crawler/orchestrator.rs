//! Crawl orchestration
//!
//! Drives the depth-first traversal: scope enforcement, visited/duplicate
//! short-circuits, fetching, extraction, image downloads, and politeness
//! delays. Traversal uses an explicit work stack instead of recursion, so
//! large depth values cannot exhaust the call stack; children are pushed in
//! reverse lexicographic order, which makes the pop order identical to a
//! recursive sorted-link walk.
//!
//! Every per-page and per-image failure is converted into a reported outcome
//! here. Nothing below this module is allowed to end the run.

use crate::config::CrawlConfig;
use crate::crawler::extractor::{extract_page, ExtractedPage};
use crate::crawler::fetcher::{build_http_client, PageFetcher};
use crate::crawler::images::{DownloadOutcome, ImageDownloader};
use crate::crawler::ledger::{content_fingerprint, DedupLedger};
use crate::crawler::pacing::{JitteredPacer, Pacing};
use crate::url::{ApprovedHost, Canonicalizer};
use crate::Result;
use std::path::PathBuf;
use url::Url;

/// Counters accumulated over one crawl run
#[derive(Debug, Clone, Default)]
pub struct CrawlReport {
    /// Pages dispatched to the fetcher (successful or not)
    pub pages_visited: usize,
    /// Pages whose fetch failed (HTTP error, non-HTML, timeout, network)
    pub pages_failed: usize,
    /// Pages skipped because their content fingerprint was already seen
    pub duplicate_pages: usize,
    /// Images written to disk
    pub images_saved: usize,
    /// Images skipped (already on disk, off-host, or not an image)
    pub images_skipped: usize,
    /// Images whose download failed
    pub images_failed: usize,
    /// Links reported as out of scope and not followed, in reporting order
    pub skipped_links: Vec<String>,
}

/// One entry on the traversal stack: a URL and its remaining depth budget
#[derive(Debug)]
struct QueuedPage {
    url: Url,
    depth: u32,
}

/// The crawl driver
///
/// Owns all shared traversal state ([`DedupLedger`]) and the collaborating
/// components. A single logical thread of control: fetches, downloads, and
/// delays all block the crawl in turn, so the per-host request-rate ceiling
/// holds without locking.
pub struct Crawler {
    scope: ApprovedHost,
    canonicalizer: Canonicalizer,
    fetcher: PageFetcher,
    downloader: ImageDownloader,
    pacer: Box<dyn Pacing>,
    ledger: DedupLedger,
    report: CrawlReport,
}

impl Crawler {
    /// Creates a crawler for the host of the given starting URL
    ///
    /// # Arguments
    ///
    /// * `config` - Immutable crawl configuration
    /// * `start` - Starting URL; its host[:port] becomes the approved host
    /// * `out_dir` - Directory image downloads are written into
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Ready to run
    /// * `Err(HostboundError)` - Start URL unusable or HTTP client failed
    pub fn new(config: &CrawlConfig, start: &Url, out_dir: impl Into<PathBuf>) -> Result<Self> {
        let scope = ApprovedHost::from_url(start)?;
        let client = build_http_client(&config.fetch)?;

        Ok(Self {
            scope,
            canonicalizer: Canonicalizer::new(&config.canonical.tracking_prefixes),
            fetcher: PageFetcher::new(client.clone()),
            downloader: ImageDownloader::new(client, out_dir),
            pacer: Box::new(JitteredPacer::from_config(&config.pacing)),
            ledger: DedupLedger::new(),
            report: CrawlReport::default(),
        })
    }

    /// Replaces the delay provider (tests use a zero-delay pacer)
    pub fn with_pacer(mut self, pacer: Box<dyn Pacing>) -> Self {
        self.pacer = pacer;
        self
    }

    /// The host boundary this crawler enforces
    pub fn scope(&self) -> &ApprovedHost {
        &self.scope
    }

    /// Runs a depth-bounded crawl from the starting URL
    ///
    /// Terminates because depth strictly decreases along every edge and the
    /// visited set strictly grows: the number of fetches is bounded by the
    /// host's reachable page count.
    pub async fn run(&mut self, start: &Url, depth: u32) -> CrawlReport {
        let start = self.canonicalizer.canonicalize(start);
        let mut stack = vec![QueuedPage { url: start, depth }];
        let mut first_fetch = true;

        while let Some(page) = stack.pop() {
            // Primary cycle breaker: at most one fetch per canonical URL
            if !self.ledger.mark_visited(page.url.as_str()) {
                continue;
            }

            // Guards the entry point itself being off-host
            if !self.scope.permits(&page.url) {
                println!("[skip external page] {}", page.url);
                continue;
            }

            if !first_fetch {
                tokio::time::sleep(self.pacer.between_pages()).await;
            }
            first_fetch = false;

            self.report.pages_visited += 1;
            tracing::debug!(url = %page.url, depth = page.depth, "fetching page");

            let body = match self.fetcher.fetch(&page.url).await {
                Ok(body) => body,
                Err(e) => {
                    // Page-local failure: report, drop this branch, continue
                    println!("[error] {} -> {}", page.url, e);
                    tracing::warn!(url = %page.url, error = %e, "fetch failed");
                    self.report.pages_failed += 1;
                    continue;
                }
            };

            let extracted = extract_page(&self.canonicalizer, &page.url, &body);

            let fingerprint = content_fingerprint(&extracted.visible_text);
            if !self.ledger.mark_content_seen(&fingerprint) {
                println!("[dedup-alert] Skipping similar page");
                self.report.duplicate_pages += 1;
                continue;
            }

            report_page(&page.url, &extracted);

            for (index, image) in extracted.images.iter().enumerate() {
                // Throttle the approved host: pause between downloads, not
                // before the first
                if index > 0 {
                    tokio::time::sleep(self.pacer.between_downloads()).await;
                }
                self.download_image(image).await;
            }

            if page.depth > 0 {
                // Forward pass so out-of-scope links are reported in
                // lexicographic order
                let mut in_scope = Vec::new();
                for link in &extracted.links {
                    match Url::parse(link) {
                        Ok(url) if self.scope.permits(&url) => in_scope.push(url),
                        _ => {
                            println!("[skip external link] {link}");
                            self.report.skipped_links.push(link.clone());
                        }
                    }
                }

                // Reverse push keeps pops in lexicographic order
                for url in in_scope.into_iter().rev() {
                    stack.push(QueuedPage {
                        url,
                        depth: page.depth - 1,
                    });
                }
            }
        }

        self.report.clone()
    }

    async fn download_image(&mut self, image: &str) {
        let url = match Url::parse(image) {
            Ok(url) => url,
            Err(e) => {
                println!("  [image error] {image} -> {e}");
                self.report.images_failed += 1;
                return;
            }
        };

        match self.downloader.download(&url, &self.scope).await {
            DownloadOutcome::Saved(dest) => {
                println!("  [image saved] {}", dest.display());
                self.report.images_saved += 1;
            }
            DownloadOutcome::SkippedExists(dest) => {
                println!("  [image exists] {}", dest.display());
                self.report.images_skipped += 1;
            }
            DownloadOutcome::SkippedExternal => {
                println!("  [skip-img external] {url}");
                self.report.images_skipped += 1;
            }
            DownloadOutcome::SkippedNotImage(content_type) => {
                let shown = if content_type.is_empty() {
                    "unknown"
                } else {
                    content_type.as_str()
                };
                println!("  [skip-img not image/*] {url} (Content-Type: {shown})");
                self.report.images_skipped += 1;
            }
            DownloadOutcome::Failed(reason) => {
                println!("  [image error] {url} -> {reason}");
                tracing::warn!(url = %url, error = %reason, "image download failed");
                self.report.images_failed += 1;
            }
        }
    }
}

/// Prints the per-page progress block: title and the sorted link/image sets
fn report_page(url: &Url, page: &ExtractedPage) {
    println!();
    println!("=== PAGE: {url}");
    println!("TITLE: {}", page.title);

    if page.links.is_empty() {
        println!("URLS FOUND: 0");
    } else {
        println!("URLS FOUND:");
        for link in &page.links {
            println!(" {link}");
        }
    }

    if page.images.is_empty() {
        println!("IMAGES FOUND: 0");
    } else {
        println!("IMAGES FOUND:");
        for image in &page.images {
            println!(" {image}");
        }
    }
}
