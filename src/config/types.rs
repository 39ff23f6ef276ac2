use serde::Deserialize;

/// Query parameter key prefixes stripped during canonicalization
const DEFAULT_TRACKING_PREFIXES: &[&str] =
    &["utm_", "gclid", "fbclid", "sessionid", "jsessionid"];

/// A common browser user agent, sent with every request
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// Main configuration structure for a crawl run
///
/// Every component receives the slice of this value it needs at construction
/// time; nothing reads configuration from globals.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CrawlConfig {
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub pacing: PacingConfig,
    #[serde(default)]
    pub canonical: CanonicalConfig,
}

/// HTTP fetch behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FetchConfig {
    /// User agent string sent with every page and image request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds (applies to pages and images alike)
    #[serde(rename = "request-timeout-secs", default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

/// Politeness delays between outbound requests to the approved host
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PacingConfig {
    /// Lower bound of the jittered pause between image downloads (milliseconds)
    #[serde(rename = "sleep-min-ms", default = "default_sleep_min_ms")]
    pub sleep_min_ms: u64,

    /// Upper bound of the jittered pause between image downloads (milliseconds)
    #[serde(rename = "sleep-max-ms", default = "default_sleep_max_ms")]
    pub sleep_max_ms: u64,

    /// Fixed pause before each page fetch after the first (milliseconds)
    #[serde(rename = "page-delay-ms", default = "default_page_delay_ms")]
    pub page_delay_ms: u64,
}

/// URL canonicalization rules
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CanonicalConfig {
    /// Query parameter key prefixes to strip (compared case-insensitively)
    #[serde(rename = "tracking-prefixes", default = "default_tracking_prefixes")]
    pub tracking_prefixes: Vec<String>,
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_sleep_min_ms() -> u64 {
    500
}

fn default_sleep_max_ms() -> u64 {
    2000
}

fn default_page_delay_ms() -> u64 {
    1000
}

fn default_tracking_prefixes() -> Vec<String> {
    DEFAULT_TRACKING_PREFIXES
        .iter()
        .map(|p| p.to_string())
        .collect()
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            request_timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            sleep_min_ms: default_sleep_min_ms(),
            sleep_max_ms: default_sleep_max_ms(),
            page_delay_ms: default_page_delay_ms(),
        }
    }
}

impl Default for CanonicalConfig {
    fn default() -> Self {
        Self {
            tracking_prefixes: default_tracking_prefixes(),
        }
    }
}
