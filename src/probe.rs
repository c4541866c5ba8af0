//! Site resource probing for `/sitemap.xml` and `/robots.txt`.
//!
//! The audit itself never touches the network. The technical analyzer asks a
//! [`SiteProbe`] whether a site-root resource exists; any error means "absent".
//! With the `http` feature, [`StaticProbe::prefetch`] performs the HEAD
//! requests up front so that the audit stays synchronous and deterministic.

use std::collections::BTreeSet;

use url::Url;

/// Site-root resources the technical analyzer looks for.
pub const SITE_RESOURCES: [&str; 2] = ["/sitemap.xml", "/robots.txt"];

/// Why a probed resource counts as absent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProbeError {
    /// No probe is configured.
    #[error("site probing is disabled")]
    Disabled,

    /// The server answered with a non-2xx status.
    #[error("probe answered with HTTP {0}")]
    Status(u16),

    /// The request failed or timed out.
    #[error("probe request failed: {0}")]
    Transport(String),
}

/// Answers whether a site resource exists.
pub trait SiteProbe {
    /// `Ok(())` when `url` exists, otherwise the reason it is treated as absent.
    ///
    /// # Errors
    ///
    /// Returns a [`ProbeError`] when the resource is missing or could not be
    /// checked.
    fn probe(&self, url: &Url) -> Result<(), ProbeError>;
}

/// Probe that reports every resource as absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoProbe;

impl SiteProbe for NoProbe {
    fn probe(&self, _url: &Url) -> Result<(), ProbeError> {
        Err(ProbeError::Disabled)
    }
}

/// Probe backed by a fixed set of URLs known to exist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticProbe {
    found: BTreeSet<String>,
}

impl StaticProbe {
    /// An empty probe: nothing exists.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a URL as existing.
    #[must_use]
    pub fn with_found(mut self, url: &Url) -> Self {
        self.found.insert(url.as_str().to_string());
        self
    }

    /// Mark site-root `path` (e.g. `/robots.txt`) of `final_url` as existing.
    ///
    /// Ignored when `final_url` is not an absolute http(s) URL.
    #[must_use]
    pub fn with_site_resource(self, final_url: &str, path: &str) -> Self {
        match crate::url_utils::parse_url(final_url).and_then(|page| crate::url_utils::site_resource(&page, path)) {
            Some(url) => self.with_found(&url),
            None => self,
        }
    }

    /// URLs known to exist.
    pub fn found(&self) -> impl Iterator<Item = &str> {
        self.found.iter().map(String::as_str)
    }
}

impl SiteProbe for StaticProbe {
    fn probe(&self, url: &Url) -> Result<(), ProbeError> {
        if self.found.contains(url.as_str()) {
            Ok(())
        } else {
            Err(ProbeError::Status(404))
        }
    }
}

#[cfg(feature = "http")]
mod http {
    use std::time::Duration;

    use tracing::debug;
    use url::Url;

    use super::{ProbeError, StaticProbe, SITE_RESOURCES};
    use crate::url_utils;

    impl StaticProbe {
        /// HEAD-probe the site resources of `final_url` concurrently.
        ///
        /// Each request is bounded by `timeout`. Failures are logged and the
        /// resource is left out; this never returns an error.
        pub async fn prefetch(client: &reqwest::Client, final_url: &str, timeout: Duration) -> Self {
            let Some(page) = url_utils::parse_url(final_url) else {
                debug!(final_url, "not an absolute URL; skipping site probes");
                return Self::default();
            };

            let [sitemap, robots] = SITE_RESOURCES.map(|path| url_utils::site_resource(&page, path));
            let (sitemap, robots) = tokio::join!(
                head_opt(client, sitemap, timeout),
                head_opt(client, robots, timeout)
            );

            [sitemap, robots]
                .into_iter()
                .flatten()
                .fold(Self::default(), |probe, url| probe.with_found(&url))
        }
    }

    async fn head_opt(client: &reqwest::Client, url: Option<Url>, timeout: Duration) -> Option<Url> {
        let url = url?;
        match head(client, &url, timeout).await {
            Ok(()) => Some(url),
            Err(err) => {
                debug!(url = %url, error = %err, "site resource treated as absent");
                None
            }
        }
    }

    async fn head(client: &reqwest::Client, url: &Url, timeout: Duration) -> Result<(), ProbeError> {
        match tokio::time::timeout(timeout, client.head(url.clone()).send()).await {
            Err(_) => Err(ProbeError::Transport(format!("timed out after {timeout:?}"))),
            Ok(Err(err)) => Err(ProbeError::Transport(err.to_string())),
            Ok(Ok(response)) if response.status().is_success() => Ok(()),
            Ok(Ok(response)) => Err(ProbeError::Status(response.status().as_u16())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_no_probe_is_disabled() {
        assert_eq!(NoProbe.probe(&url("https://example.com/robots.txt")), Err(ProbeError::Disabled));
    }

    #[test]
    fn test_static_probe() {
        let probe = StaticProbe::new().with_site_resource("https://example.com/blog/post", "/sitemap.xml");

        assert!(probe.probe(&url("https://example.com/sitemap.xml")).is_ok());
        assert_eq!(
            probe.probe(&url("https://example.com/robots.txt")),
            Err(ProbeError::Status(404))
        );
        assert_eq!(probe.found().collect::<Vec<_>>(), vec!["https://example.com/sitemap.xml"]);
    }

    #[test]
    fn test_site_resource_on_relative_url_ignored() {
        let probe = StaticProbe::new().with_site_resource("/relative", "/robots.txt");
        assert_eq!(probe.found().count(), 0);
    }
}
