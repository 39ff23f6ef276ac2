//! Politeness delays between outbound requests
//!
//! The delay provider is a trait so tests can substitute a zero-delay
//! implementation and keep crawl runs deterministic and fast.

use crate::config::PacingConfig;
use rand::Rng;
use std::time::Duration;

/// Supplies the pauses the orchestrator takes between requests
pub trait Pacing {
    /// Pause between two consecutive image downloads on one page
    fn between_downloads(&self) -> Duration;

    /// Pause before fetching each page after the first
    fn between_pages(&self) -> Duration;
}

/// Production pacing: jittered download pauses, fixed inter-page delay
#[derive(Debug, Clone)]
pub struct JitteredPacer {
    sleep_min: Duration,
    sleep_max: Duration,
    page_delay: Duration,
}

impl JitteredPacer {
    pub fn from_config(config: &PacingConfig) -> Self {
        Self {
            sleep_min: Duration::from_millis(config.sleep_min_ms),
            sleep_max: Duration::from_millis(config.sleep_max_ms),
            page_delay: Duration::from_millis(config.page_delay_ms),
        }
    }
}

impl Pacing for JitteredPacer {
    fn between_downloads(&self) -> Duration {
        if self.sleep_min >= self.sleep_max {
            return self.sleep_min;
        }
        let min_ms = self.sleep_min.as_millis() as u64;
        let max_ms = self.sleep_max.as_millis() as u64;
        Duration::from_millis(rand::thread_rng().gen_range(min_ms..=max_ms))
    }

    fn between_pages(&self) -> Duration {
        self.page_delay
    }
}

/// Zero-delay pacing for tests
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl Pacing for NoDelay {
    fn between_downloads(&self) -> Duration {
        Duration::ZERO
    }

    fn between_pages(&self) -> Duration {
        Duration::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jitter_stays_within_bounds() {
        let pacer = JitteredPacer::from_config(&PacingConfig {
            sleep_min_ms: 100,
            sleep_max_ms: 300,
            page_delay_ms: 50,
        });
        for _ in 0..100 {
            let delay = pacer.between_downloads();
            assert!(delay >= Duration::from_millis(100));
            assert!(delay <= Duration::from_millis(300));
        }
    }

    #[test]
    fn test_degenerate_jitter_range() {
        let pacer = JitteredPacer::from_config(&PacingConfig {
            sleep_min_ms: 200,
            sleep_max_ms: 200,
            page_delay_ms: 0,
        });
        assert_eq!(pacer.between_downloads(), Duration::from_millis(200));
    }

    #[test]
    fn test_page_delay_is_fixed() {
        let pacer = JitteredPacer::from_config(&PacingConfig {
            sleep_min_ms: 0,
            sleep_max_ms: 0,
            page_delay_ms: 1000,
        });
        assert_eq!(pacer.between_pages(), Duration::from_secs(1));
    }

    #[test]
    fn test_no_delay_is_zero() {
        assert_eq!(NoDelay.between_downloads(), Duration::ZERO);
        assert_eq!(NoDelay.between_pages(), Duration::ZERO);
    }
}
