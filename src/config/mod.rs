//! Configuration for Hostbound
//!
//! Crawl behavior is described by an immutable [`CrawlConfig`] value that is
//! threaded into each component at construction. The defaults match the
//! built-in behavior; a TOML file (kebab-case keys) can override any subset
//! of fields.

mod types;

pub use types::{CanonicalConfig, CrawlConfig, FetchConfig, PacingConfig};

use crate::{ConfigError, ConfigResult};
use std::path::Path;

/// Loads and validates a configuration from a TOML file
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(CrawlConfig)` - Parsed and validated configuration
/// * `Err(ConfigError)` - File unreadable, malformed, or invalid
pub fn load_config(path: &Path) -> ConfigResult<CrawlConfig> {
    let raw = std::fs::read_to_string(path)?;
    let config: CrawlConfig = toml::from_str(&raw)?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates a configuration, whether loaded from file or built in code
pub fn validate_config(config: &CrawlConfig) -> ConfigResult<()> {
    if config.fetch.request_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "request-timeout-secs must be at least 1".to_string(),
        ));
    }

    if config.fetch.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent must not be empty".to_string(),
        ));
    }

    if config.pacing.sleep_min_ms > config.pacing.sleep_max_ms {
        return Err(ConfigError::Validation(format!(
            "sleep-min-ms ({}) must not exceed sleep-max-ms ({})",
            config.pacing.sleep_min_ms, config.pacing.sleep_max_ms
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = CrawlConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_default_values() {
        let config = CrawlConfig::default();
        assert_eq!(config.fetch.request_timeout_secs, 15);
        assert_eq!(config.pacing.sleep_min_ms, 500);
        assert_eq!(config.pacing.sleep_max_ms, 2000);
        assert_eq!(config.pacing.page_delay_ms, 1000);
        assert!(config.fetch.user_agent.contains("Mozilla/5.0"));
        assert!(config
            .canonical
            .tracking_prefixes
            .contains(&"utm_".to_string()));
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: CrawlConfig = toml::from_str(
            r#"
            [pacing]
            sleep-min-ms = 0
            sleep-max-ms = 0
            page-delay-ms = 0
            "#,
        )
        .unwrap();

        assert_eq!(config.pacing.sleep_max_ms, 0);
        // Untouched sections keep their defaults
        assert_eq!(config.fetch.request_timeout_secs, 15);
    }

    #[test]
    fn test_parse_empty_toml() {
        let config: CrawlConfig = toml::from_str("").unwrap();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_reject_zero_timeout() {
        let mut config = CrawlConfig::default();
        config.fetch.request_timeout_secs = 0;
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_reject_inverted_sleep_bounds() {
        let mut config = CrawlConfig::default();
        config.pacing.sleep_min_ms = 3000;
        config.pacing.sleep_max_ms = 1000;
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_reject_blank_user_agent() {
        let mut config = CrawlConfig::default();
        config.fetch.user_agent = "  ".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_reject_unknown_field() {
        let result: Result<CrawlConfig, _> = toml::from_str(
            r#"
            [fetch]
            user-agnet = "typo"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_custom_tracking_prefixes() {
        let config: CrawlConfig = toml::from_str(
            r#"
            [canonical]
            tracking-prefixes = ["utm_", "ref_"]
            "#,
        )
        .unwrap();
        assert_eq!(config.canonical.tracking_prefixes.len(), 2);
    }
}
