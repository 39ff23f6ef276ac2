use crate::{UrlError, UrlResult};
use url::Url;

/// The host boundary of a crawl run
///
/// Holds the `host[:port]` authority taken from the starting URL. Immutable
/// for the lifetime of one run; every scope decision compares against it.
/// A leading `www.` is ignored on both sides of the comparison, so
/// `www.example.edu` and `example.edu` are equivalent. Explicit non-default
/// ports are not: `example.edu:8080` never matches `example.edu`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApprovedHost {
    authority: String,
}

impl ApprovedHost {
    /// Derives the approved host from the user-supplied starting URL
    ///
    /// # Returns
    ///
    /// * `Ok(ApprovedHost)` - The host[:port] authority, lowercased
    /// * `Err(UrlError)` - The URL is not http(s) or has no host
    pub fn from_url(url: &Url) -> UrlResult<Self> {
        if !is_web_scheme(url) {
            return Err(UrlError::InvalidScheme(url.scheme().to_string()));
        }
        let authority = authority_of(url).ok_or(UrlError::MissingHost)?;
        Ok(Self { authority })
    }

    /// The approved `host[:port]` string, lowercased
    pub fn authority(&self) -> &str {
        &self.authority
    }

    /// Returns true if the URL is in scope for this crawl
    ///
    /// Pure function: false for non-http(s) schemes, otherwise a
    /// case-insensitive authority comparison with `www.` stripped from
    /// both sides.
    pub fn permits(&self, url: &Url) -> bool {
        if !is_web_scheme(url) {
            return false;
        }
        match authority_of(url) {
            Some(candidate) => strip_www(&candidate) == strip_www(&self.authority),
            None => false,
        }
    }
}

fn is_web_scheme(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

/// Lowercased `host[:port]`; the port appears only when explicitly
/// non-default, matching how the `url` crate exposes it
fn authority_of(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    let authority = match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    };
    Some(authority.to_ascii_lowercase())
}

fn strip_www(authority: &str) -> &str {
    authority.strip_prefix("www.").unwrap_or(authority)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approved(start: &str) -> ApprovedHost {
        ApprovedHost::from_url(&Url::parse(start).unwrap()).unwrap()
    }

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_same_host_in_scope() {
        let host = approved("https://example.edu/start");
        assert!(host.permits(&url("https://example.edu/other/page")));
    }

    #[test]
    fn test_www_prefix_equivalent_both_ways() {
        let bare = approved("https://example.edu/");
        assert!(bare.permits(&url("https://www.example.edu/x")));

        let www = approved("https://www.example.edu/");
        assert!(www.permits(&url("https://example.edu/x")));
    }

    #[test]
    fn test_case_insensitive_host() {
        let host = approved("https://Example.EDU/");
        assert!(host.permits(&url("https://EXAMPLE.edu/page")));
    }

    #[test]
    fn test_different_host_out_of_scope() {
        let host = approved("https://example.edu/");
        assert!(!host.permits(&url("https://other.example.org/")));
    }

    #[test]
    fn test_subdomain_out_of_scope() {
        let host = approved("https://example.edu/");
        assert!(!host.permits(&url("https://blog.example.edu/")));
    }

    #[test]
    fn test_explicit_port_must_match() {
        let host = approved("https://example.edu/");
        assert!(!host.permits(&url("https://example.edu:8080/x")));

        let with_port = approved("http://example.edu:8080/");
        assert!(with_port.permits(&url("http://example.edu:8080/x")));
        assert!(!with_port.permits(&url("http://example.edu/x")));
    }

    #[test]
    fn test_default_port_equals_no_port() {
        // The url crate drops explicitly written default ports
        let host = approved("https://example.edu/");
        assert!(host.permits(&url("https://example.edu:443/x")));
    }

    #[test]
    fn test_non_web_schemes_rejected() {
        let host = approved("https://example.edu/");
        assert!(!host.permits(&url("mailto:staff@example.edu")));
        assert!(!host.permits(&url("ftp://example.edu/file")));
        assert!(!host.permits(&url("javascript:void(0)")));
    }

    #[test]
    fn test_http_and_https_both_in_scope() {
        let host = approved("https://example.edu/");
        assert!(host.permits(&url("http://example.edu/legacy")));
    }

    #[test]
    fn test_from_url_rejects_bad_scheme() {
        let result = ApprovedHost::from_url(&url("ftp://example.edu/"));
        assert!(matches!(result, Err(UrlError::InvalidScheme(_))));
    }

    #[test]
    fn test_authority_keeps_explicit_port() {
        let host = approved("http://127.0.0.1:4545/");
        assert_eq!(host.authority(), "127.0.0.1:4545");
    }
}
