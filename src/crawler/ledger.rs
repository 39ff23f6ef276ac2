//! Visited-URL and content-fingerprint bookkeeping
//!
//! Both sets are append-only for the duration of a run and owned exclusively
//! by the orchestrator. The visited set is the primary cycle breaker; the
//! fingerprint set catches near-duplicate pages reachable under different
//! URLs (session-id variants and the like) that URL dedup cannot see.

use sha2::{Digest, Sha256};
use std::collections::HashSet;

/// Characters of visible text that contribute to a content fingerprint
///
/// Two pages whose visible text agrees up to this bound count as duplicates,
/// regardless of boilerplate beyond the cutoff.
pub const FINGERPRINT_TEXT_LIMIT: usize = 10_000;

/// Tracks which URLs were dispatched and which page contents were processed
#[derive(Debug, Default)]
pub struct DedupLedger {
    visited: HashSet<String>,
    fingerprints: HashSet<String>,
}

impl DedupLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a canonical URL as visited
    ///
    /// Returns true if the URL was newly added, false if already present.
    pub fn mark_visited(&mut self, canonical_url: &str) -> bool {
        self.visited.insert(canonical_url.to_string())
    }

    /// Records a content fingerprint as seen
    ///
    /// Returns true if the fingerprint was newly added, false if already
    /// present.
    pub fn mark_content_seen(&mut self, fingerprint: &str) -> bool {
        self.fingerprints.insert(fingerprint.to_string())
    }

    /// Number of URLs dispatched so far in this run
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}

/// Computes the duplicate-detection fingerprint for a page's visible text
///
/// SHA-256 over the first [`FINGERPRINT_TEXT_LIMIT`] characters, hex-encoded.
pub fn content_fingerprint(visible_text: &str) -> String {
    let bounded: String = visible_text.chars().take(FINGERPRINT_TEXT_LIMIT).collect();
    hex::encode(Sha256::digest(bounded.as_bytes()))
}
