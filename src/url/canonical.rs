use crate::{UrlError, UrlResult};
use url::{form_urlencoded, Url};

/// Canonicalizes URLs for deduplication and scope comparison
///
/// # Canonicalization Steps
///
/// 1. Resolve the reference against the base URL (absolute references pass
///    through unchanged; relative and protocol-relative references are joined)
/// 2. Remove the fragment (everything after `#`)
/// 3. Drop query parameters whose key starts with a tracking prefix
///    (compared case-insensitively) and parameters with a blank value
/// 4. Re-encode surviving query parameters in their original relative order
///
/// Path and query content are never lowercased; host casing is left to the
/// URL parser. Canonicalization is idempotent: running it over an
/// already-canonical URL yields the same value.
#[derive(Debug, Clone)]
pub struct Canonicalizer {
    tracking_prefixes: Vec<String>,
}

impl Canonicalizer {
    /// Creates a canonicalizer with the given tracking-parameter prefixes
    pub fn new(tracking_prefixes: &[String]) -> Self {
        Self {
            tracking_prefixes: tracking_prefixes
                .iter()
                .map(|p| p.to_lowercase())
                .collect(),
        }
    }

    /// Resolves a reference against a base URL and canonicalizes the result
    ///
    /// # Arguments
    ///
    /// * `base` - The URL of the page the reference was found on
    /// * `reference` - The raw href/src attribute value
    ///
    /// # Returns
    ///
    /// * `Ok(Url)` - The canonical absolute URL
    /// * `Err(UrlError)` - The reference could not be parsed; callers treat
    ///   this as "skip this link"
    pub fn resolve(&self, base: &Url, reference: &str) -> UrlResult<Url> {
        let joined = base
            .join(reference.trim())
            .map_err(|e| UrlError::Parse(format!("{reference:?}: {e}")))?;
        Ok(self.scrub(joined))
    }

    /// Canonicalizes an already-absolute URL
    pub fn canonicalize(&self, url: &Url) -> Url {
        self.scrub(url.clone())
    }

    fn scrub(&self, mut url: Url) -> Url {
        url.set_fragment(None);

        if url.query().is_some() {
            let kept: Vec<(String, String)> = url
                .query_pairs()
                .filter(|(key, value)| !value.is_empty() && !self.is_tracking_param(key))
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect();

            if kept.is_empty() {
                url.set_query(None);
            } else {
                let mut serializer = form_urlencoded::Serializer::new(String::new());
                for (key, value) in &kept {
                    serializer.append_pair(key, value);
                }
                url.set_query(Some(&serializer.finish()));
            }
        }

        url
    }

    fn is_tracking_param(&self, key: &str) -> bool {
        let key = key.to_lowercase();
        self.tracking_prefixes
            .iter()
            .any(|prefix| key.starts_with(prefix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canonicalizer() -> Canonicalizer {
        Canonicalizer::new(&[
            "utm_".to_string(),
            "gclid".to_string(),
            "fbclid".to_string(),
            "sessionid".to_string(),
            "jsessionid".to_string(),
        ])
    }

    fn base() -> Url {
        Url::parse("https://example.edu/docs/index.html").unwrap()
    }

    #[test]
    fn test_absolute_reference_passes_through() {
        let result = canonicalizer()
            .resolve(&base(), "https://example.edu/other")
            .unwrap();
        assert_eq!(result.as_str(), "https://example.edu/other");
    }

    #[test]
    fn test_relative_path_resolution() {
        let result = canonicalizer().resolve(&base(), "page2.html").unwrap();
        assert_eq!(result.as_str(), "https://example.edu/docs/page2.html");
    }

    #[test]
    fn test_root_relative_resolution() {
        let result = canonicalizer().resolve(&base(), "/about").unwrap();
        assert_eq!(result.as_str(), "https://example.edu/about");
    }

    #[test]
    fn test_protocol_relative_resolution() {
        let result = canonicalizer()
            .resolve(&base(), "//cdn.example.edu/a.png")
            .unwrap();
        assert_eq!(result.as_str(), "https://cdn.example.edu/a.png");
    }

    #[test]
    fn test_fragment_removed() {
        let result = canonicalizer()
            .resolve(&base(), "/page#section-3")
            .unwrap();
        assert_eq!(result.as_str(), "https://example.edu/page");
        assert!(result.fragment().is_none());
    }

    #[test]
    fn test_tracking_params_stripped() {
        let result = canonicalizer()
            .resolve(&base(), "/page?utm_source=mail&gclid=abc&q=rust")
            .unwrap();
        assert_eq!(result.as_str(), "https://example.edu/page?q=rust");
    }

    #[test]
    fn test_tracking_prefix_case_insensitive() {
        let result = canonicalizer()
            .resolve(&base(), "/page?UTM_Campaign=x&JSESSIONID=y")
            .unwrap();
        assert_eq!(result.as_str(), "https://example.edu/page");
    }

    #[test]
    fn test_query_order_preserved() {
        let result = canonicalizer()
            .resolve(&base(), "/page?z=1&utm_medium=email&a=2")
            .unwrap();
        assert_eq!(result.as_str(), "https://example.edu/page?z=1&a=2");
    }

    #[test]
    fn test_blank_values_dropped() {
        let result = canonicalizer().resolve(&base(), "/page?a=&b=1&c").unwrap();
        assert_eq!(result.as_str(), "https://example.edu/page?b=1");
    }

    #[test]
    fn test_empty_query_removed_entirely() {
        let result = canonicalizer()
            .resolve(&base(), "/page?utm_source=only")
            .unwrap();
        assert_eq!(result.as_str(), "https://example.edu/page");
        assert!(result.query().is_none());
    }

    #[test]
    fn test_idempotence() {
        let canon = canonicalizer();
        let inputs = [
            "/page?z=1&utm_source=x&a=two#frag",
            "/plain",
            "/q?key=a%20b&other=c",
            "https://example.edu/?sessionid=deadbeef&keep=1",
        ];
        for input in inputs {
            let once = canon.resolve(&base(), input).unwrap();
            let twice = canon.canonicalize(&once);
            assert_eq!(once, twice, "not idempotent for {input}");
        }
    }

    #[test]
    fn test_malformed_reference_is_error() {
        // A scheme-only reference cannot be joined into a valid URL
        let result = canonicalizer().resolve(&base(), "http://");
        assert!(result.is_err());
    }

    #[test]
    fn test_path_case_preserved() {
        let result = canonicalizer().resolve(&base(), "/Docs/Page").unwrap();
        assert_eq!(result.as_str(), "https://example.edu/Docs/Page");
    }
}
