//! Hostbound: a same-host, depth-bounded web crawler
//!
//! This crate crawls a single approved host: it fetches pages, extracts
//! hyperlinks and image references, downloads same-host images, and skips
//! duplicate or already-visited content. It never leaves the host derived
//! from the starting URL.

pub mod config;
pub mod crawler;
pub mod url;

use thiserror::Error;

/// Main error type for Hostbound operations
#[derive(Debug, Error)]
pub enum HostboundError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Errors produced by a single page fetch
///
/// Every variant is local to the page that triggered it; the orchestrator
/// reports it and moves on, never aborting the crawl.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Non-HTML content type {content_type:?} for {url}")]
    UnsupportedContent { url: String, content_type: String },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Network error for {url}: {source}")]
    Network { url: String, source: reqwest::Error },
}

/// Result type alias for Hostbound operations
pub type Result<T> = std::result::Result<T, HostboundError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::CrawlConfig;
pub use crawler::{CrawlReport, Crawler, DownloadOutcome};
pub use url::{ApprovedHost, Canonicalizer};
