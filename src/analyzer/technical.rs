//! Technical factor analysis: transport metadata, mobile readiness, site
//! resources and link topology.

use dom_query::Document;
use tracing::debug;
use url::Url;

use crate::document::AuditDocument;
use crate::dom;
use crate::patterns::RESPONSIVE_MEDIA_RULE;
use crate::probe::SiteProbe;
use crate::result::TechnicalFactorReport;
use crate::url_utils;

/// Stylesheet `media` values that indicate screen-targeted styling.
const RESPONSIVE_MEDIA_HINTS: [&str; 3] = ["screen", "max-width", "min-width"];

/// Examine transport metadata, the DOM and the site probe.
#[must_use]
pub fn analyze<P: SiteProbe + ?Sized>(doc: &Document, input: &AuditDocument, probe: &P) -> TechnicalFactorReport {
    let page = url_utils::parse_url(&input.final_url);
    let (internal_links, external_links) = count_links(doc, page.as_ref());

    let report = TechnicalFactorReport {
        ssl_enabled: page.as_ref().is_some_and(|u| u.scheme() == "https"),
        mobile_friendly: is_mobile_friendly(doc),
        page_size_kb: input.byte_size as f64 / 1024.0,
        load_time_ms: input.elapsed_ms,
        has_sitemap: resource_exists(page.as_ref(), "/sitemap.xml", probe),
        has_robots_txt: resource_exists(page.as_ref(), "/robots.txt", probe),
        internal_links,
        external_links,
        status_code: input.status_code,
    };

    debug!(
        ssl = report.ssl_enabled,
        mobile = report.mobile_friendly,
        size_kb = report.page_size_kb,
        sitemap = report.has_sitemap,
        robots = report.has_robots_txt,
        "technical factors analyzed"
    );

    report
}

/// Responsive viewport plus responsive styling.
#[must_use]
pub fn is_mobile_friendly(doc: &Document) -> bool {
    let device_width_viewport = dom::select_each(doc, "meta[name]")
        .iter()
        .filter(|m| dom::get_attribute(m, "name").is_some_and(|n| n.trim().eq_ignore_ascii_case("viewport")))
        .filter_map(|m| dom::get_attribute(m, "content"))
        .any(|content| {
            let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
            compact.to_ascii_lowercase().contains("width=device-width")
        });

    if !device_width_viewport {
        return false;
    }

    let media_rule = dom::select_each(doc, "style")
        .iter()
        .any(|style| RESPONSIVE_MEDIA_RULE.is_match(&dom::text_content(style)));

    let media_stylesheet = dom::select_each(doc, "link[rel][media]").iter().any(|link| {
        let is_stylesheet = dom::get_attribute(link, "rel")
            .is_some_and(|rel| rel.split_ascii_whitespace().any(|r| r.eq_ignore_ascii_case("stylesheet")));
        let media = dom::get_attribute(link, "media").unwrap_or_default().to_ascii_lowercase();
        is_stylesheet && RESPONSIVE_MEDIA_HINTS.iter().any(|hint| media.contains(hint))
    });

    media_rule || media_stylesheet
}

fn resource_exists<P: SiteProbe + ?Sized>(page: Option<&Url>, path: &str, probe: &P) -> bool {
    let Some(url) = page.and_then(|p| url_utils::site_resource(p, path)) else {
        return false;
    };

    match probe.probe(&url) {
        Ok(()) => true,
        Err(err) => {
            debug!(url = %url, error = %err, "site resource treated as absent");
            false
        }
    }
}

/// Count anchors pointing at the page's own site and elsewhere.
///
/// Without a base URL, relative hrefs count as internal.
fn count_links(doc: &Document, page: Option<&Url>) -> (usize, usize) {
    let base_host = page.and_then(Url::host_str);
    let mut internal = 0;
    let mut external = 0;

    for anchor in dom::select_each(doc, "a[href]") {
        let href = dom::get_attribute(&anchor, "href").unwrap_or_default();
        if !url_utils::is_link_href(&href) {
            continue;
        }

        match url_utils::resolve_href(&href, page) {
            Some(target) => {
                let Some(host) = target.host_str() else {
                    // mailto:, tel: and friends
                    continue;
                };
                if base_host.is_some_and(|base| url_utils::same_site(base, host)) {
                    internal += 1;
                } else {
                    external += 1;
                }
            }
            None if page.is_none() => internal += 1,
            None => {}
        }
    }

    (internal, external)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::{NoProbe, StaticProbe};

    fn run<P: SiteProbe>(html: &str, url: &str, probe: &P) -> TechnicalFactorReport {
        let input = AuditDocument::new(html, url);
        analyze(&Document::from(html), &input, probe)
    }

    #[test]
    fn test_ssl_from_scheme() {
        assert!(run("", "https://example.com/", &NoProbe).ssl_enabled);
        assert!(!run("", "http://example.com/", &NoProbe).ssl_enabled);
        assert!(!run("", "not a url", &NoProbe).ssl_enabled);
    }

    #[test]
    fn test_mobile_friendly_needs_viewport_and_media() {
        let viewport = r#"<meta name="viewport" content="width = device-width, initial-scale=1">"#;
        let media = "<style>@media (max-width: 600px) { nav { display: none } }</style>";
        let link = r#"<link rel="stylesheet" href="m.css" media="only screen and (max-width: 480px)">"#;

        assert!(is_mobile_friendly(&Document::from(format!("{viewport}{media}").as_str())));
        assert!(is_mobile_friendly(&Document::from(format!("{viewport}{link}").as_str())));
        assert!(!is_mobile_friendly(&Document::from(viewport)));
        assert!(!is_mobile_friendly(&Document::from(media)));
    }

    #[test]
    fn test_links_classified_by_host() {
        let html = r##"<body>
            <a href="/about">About</a>
            <a href="https://www.example.com/contact">Contact</a>
            <a href="https://other.test/">Other</a>
            <a href="#top">Top</a>
            <a href="javascript:void(0)">JS</a>
            <a href="mailto:hi@example.com">Mail</a>
        </body>"##;
        let report = run(html, "https://example.com/page", &NoProbe);

        assert_eq!(report.internal_links, 2);
        assert_eq!(report.external_links, 1);
    }

    #[test]
    fn test_relative_links_without_base_are_internal() {
        let report = run(r#"<a href="/a">a</a><a href="https://x.test">x</a>"#, "", &NoProbe);

        assert_eq!(report.internal_links, 1);
        assert_eq!(report.external_links, 1);
    }

    #[test]
    fn test_probe_results_and_failures() {
        let probe = StaticProbe::new().with_site_resource("https://example.com/", "/robots.txt");
        let report = run("", "https://example.com/deep/page", &probe);

        assert!(report.has_robots_txt);
        assert!(!report.has_sitemap);

        let report = run("", "https://example.com/", &NoProbe);
        assert!(!report.has_robots_txt);
    }

    #[test]
    fn test_transport_metadata() {
        let input = AuditDocument::new("<p>x</p>", "https://example.com/")
            .with_byte_size(2048)
            .with_elapsed_ms(750)
            .with_status(203);
        let report = analyze(&Document::from(input.html.as_str()), &input, &NoProbe);

        assert!((report.page_size_kb - 2.0).abs() < f64::EPSILON);
        assert_eq!(report.load_time_ms, 750);
        assert_eq!(report.status_code, 203);
    }
}
