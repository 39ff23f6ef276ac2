//! URL handling for Hostbound
//!
//! This module provides the two URL-level decisions the crawler rests on:
//! canonicalization (what counts as "the same page") and scope checking
//! (whether a URL stays on the approved host).

mod canonical;
mod scope;

pub use canonical::Canonicalizer;
pub use scope::ApprovedHost;
