//! URL Utility Functions
//!
//! Host extraction, href resolution and same-site comparison used by the
//! technical analyzer, the probe, and result assembly.

use url::Url;

/// Check if a string is a valid absolute http(s) URL.
///
/// # Returns
/// * `(is_absolute, parsed_url)` - Whether URL is absolute and the parsed URL if valid
#[must_use]
pub fn is_absolute_url(s: &str) -> (bool, Option<Url>) {
    let s = s.trim();

    if s.is_empty() {
        return (false, None);
    }

    // Must start with http:// or https://
    let lower = s.to_ascii_lowercase();
    if !lower.starts_with("http://") && !lower.starts_with("https://") {
        return (false, None);
    }

    match Url::parse(s) {
        Ok(url) => {
            // Verify it has a host
            if url.host().is_some() {
                (true, Some(url))
            } else {
                (false, None)
            }
        }
        Err(_) => (false, None),
    }
}

/// Parse a URL string into a Url object.
///
/// # Returns
/// * `Some(Url)` if valid absolute URL, `None` otherwise
#[must_use]
pub fn parse_url(url_str: &str) -> Option<Url> {
    let (is_abs, parsed) = is_absolute_url(url_str);
    if is_abs {
        parsed
    } else {
        None
    }
}

/// Extract the lowercase hostname from an absolute URL.
#[must_use]
pub fn extract_hostname(url_str: &str) -> Option<String> {
    parse_url(url_str)
        .and_then(|url| url.host_str().map(str::to_ascii_lowercase))
        .filter(|h| !h.is_empty())
}

/// Resolve an anchor `href` against the page URL.
///
/// Fragment-only and `javascript:` hrefs are not links and yield `None`, as do
/// hrefs that cannot be resolved.
#[must_use]
pub fn resolve_href(href: &str, base: Option<&Url>) -> Option<Url> {
    let href = href.trim();
    if !is_link_href(href) {
        return None;
    }

    match base {
        Some(base) => base.join(href).ok(),
        None => Url::parse(href).ok(),
    }
}

/// Whether an `href` points at another document.
///
/// Empty, fragment-only and `javascript:` hrefs do not.
#[must_use]
pub fn is_link_href(href: &str) -> bool {
    let href = href.trim();
    !(href.is_empty()
        || href.starts_with('#')
        || href.get(..11).is_some_and(|p| p.eq_ignore_ascii_case("javascript:")))
}

/// Compare two hosts, ignoring case and a leading `www.`.
#[must_use]
pub fn same_site(a: &str, b: &str) -> bool {
    fn strip(host: &str) -> String {
        let host = host.to_ascii_lowercase();
        match host.strip_prefix("www.") {
            Some(rest) => rest.to_string(),
            None => host,
        }
    }

    strip(a) == strip(b)
}

/// Site-root resource (e.g. `/robots.txt`) for the host of `page`.
#[must_use]
pub fn site_resource(page: &Url, path: &str) -> Option<Url> {
    page.host_str()?;
    page.join(path).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_absolute_url() {
        assert!(is_absolute_url("https://example.com/page").0);
        assert!(is_absolute_url("HTTP://EXAMPLE.COM").0);
        assert!(!is_absolute_url("/relative").0);
        assert!(!is_absolute_url("ftp://example.com").0);
        assert!(!is_absolute_url("").0);
    }

    #[test]
    fn test_extract_hostname() {
        assert_eq!(
            extract_hostname("https://Shop.Example.com/a?b=c"),
            Some("shop.example.com".to_string())
        );
        assert_eq!(extract_hostname("not a url"), None);
    }

    #[test]
    fn test_resolve_href_skips_fragments_and_javascript() {
        let base = Url::parse("https://example.com/docs/page").ok();
        assert!(resolve_href("#top", base.as_ref()).is_none());
        assert!(resolve_href("JavaScript:void(0)", base.as_ref()).is_none());
        assert_eq!(
            resolve_href("../about", base.as_ref()).map(|u| u.to_string()),
            Some("https://example.com/about".to_string())
        );
    }

    #[test]
    fn test_same_site_ignores_www() {
        assert!(same_site("www.example.com", "Example.com"));
        assert!(!same_site("blog.example.com", "example.com"));
    }

    #[test]
    fn test_site_resource_uses_root() {
        let page = Url::parse("https://example.com/a/b/c?x=1").ok();
        let robots = page.as_ref().and_then(|p| site_resource(p, "/robots.txt"));
        assert_eq!(robots.map(|u| u.to_string()), Some("https://example.com/robots.txt".to_string()));
    }
}
