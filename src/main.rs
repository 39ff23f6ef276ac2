//! Hostbound main entry point
//!
//! Command-line interface for the same-host crawler: validates the starting
//! URL, loads configuration, runs the crawl, and prints the final summary.

use anyhow::Context;
use clap::Parser;
use hostbound::config::{load_config, validate_config, CrawlConfig};
use hostbound::crawler::crawl;
use hostbound::url::ApprovedHost;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Hostbound: a same-host, depth-bounded web crawler
///
/// Crawls pages on the host of the starting URL, printing each page's title
/// and discovered link/image URLs, and downloading same-host images. Links
/// and images on other hosts are reported and skipped, never fetched.
#[derive(Parser, Debug)]
#[command(name = "hostbound")]
#[command(version)]
#[command(about = "Recursive page extractor (title, URLs, images) for an approved host")]
struct Cli {
    /// Starting URL on the approved host (http/https)
    #[arg(value_name = "START_URL")]
    start_url: String,

    /// Traversal depth (0 fetches only the starting page)
    #[arg(long, default_value_t = 1)]
    depth: u32,

    /// Directory for downloaded images
    #[arg(long, default_value = "IMAGES")]
    output: PathBuf,

    /// Optional TOML configuration file overriding pacing/fetch defaults
    #[arg(long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error log output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    // Invalid invocation parameters are the only fatal condition
    let start = match parse_start_url(&cli.start_url) {
        Ok(url) => url,
        Err(reason) => {
            eprintln!(
                "Error: start URL must be an absolute http(s) URL, \
                 e.g. https://approved-website.edu/ ({reason})"
            );
            std::process::exit(2);
        }
    };

    let config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => CrawlConfig::default(),
    };
    validate_config(&config)?;

    let approved = ApprovedHost::from_url(&start)?;
    println!(
        "[start] {} (approved host: {}, depth: {})",
        start,
        approved.authority(),
        cli.depth
    );

    let report = crawl(&config, &start, cli.depth, &cli.output).await?;

    // Resolve the output directory for the summary; it only exists on disk
    // if at least one image was saved
    let resolved = std::fs::canonicalize(&cli.output).unwrap_or_else(|_| cli.output.clone());
    println!(
        "[done] Visited {} page(s). Images saved under: {}",
        report.pages_visited,
        resolved.display()
    );

    tracing::info!(
        pages = report.pages_visited,
        failed = report.pages_failed,
        duplicates = report.duplicate_pages,
        images_saved = report.images_saved,
        images_skipped = report.images_skipped,
        images_failed = report.images_failed,
        "crawl complete"
    );

    Ok(())
}

/// Validates the user-supplied starting URL: absolute, http(s), with a host
fn parse_start_url(raw: &str) -> Result<Url, String> {
    let url = Url::parse(raw).map_err(|e| e.to_string())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme {:?}", url.scheme()));
    }
    if url.host_str().is_none() {
        return Err("missing host".to_string());
    }
    Ok(url)
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("hostbound=info,warn"),
            1 => EnvFilter::new("hostbound=debug,info"),
            2 => EnvFilter::new("hostbound=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_start_url() {
        assert!(parse_start_url("https://example.edu/").is_ok());
        assert!(parse_start_url("http://example.edu:8080/path").is_ok());
    }

    #[test]
    fn test_reject_relative_start_url() {
        assert!(parse_start_url("/just/a/path").is_err());
        assert!(parse_start_url("example.edu").is_err());
    }

    #[test]
    fn test_reject_non_web_scheme() {
        assert!(parse_start_url("ftp://example.edu/").is_err());
        assert!(parse_start_url("file:///etc/passwd").is_err());
    }
}
