//! Recommendation engine.
//!
//! A fixed table of rules is evaluated in order: schema, meta, content, then
//! technical. Each rule inspects the reports and may produce one finding. The
//! list is then stably sorted so that high priority comes first while rules of
//! equal priority keep their table order.

use tracing::debug;

use crate::analyzer::meta_tags::ESSENTIAL_OG_TAGS;
use crate::result::{
    Category, ContentStructureReport, MetaTagReport, Priority, Recommendation, StructuredDataReport,
    TechnicalFactorReport,
};
use crate::Options;

/// Ideal title length range used by the length rule.
const TITLE_RANGE: std::ops::RangeInclusive<usize> = 30..=70;

/// Ideal description length range used by the length rule.
const DESCRIPTION_RANGE: std::ops::RangeInclusive<usize> = 120..=170;

/// Everything the rules look at.
#[derive(Debug, Clone, Copy)]
pub struct AuditReports<'a> {
    /// Host of the audited page.
    pub domain: &'a str,
    /// Structured data findings.
    pub structured_data: &'a StructuredDataReport,
    /// Meta tag findings.
    pub meta_tags: &'a MetaTagReport,
    /// Content structure findings.
    pub content: &'a ContentStructureReport,
    /// Technical findings.
    pub technical: &'a TechnicalFactorReport,
}

struct Finding {
    issue: String,
    recommendation: String,
    implementation: String,
}

impl Finding {
    fn new(issue: impl Into<String>, recommendation: impl Into<String>, implementation: impl Into<String>) -> Self {
        Self {
            issue: issue.into(),
            recommendation: recommendation.into(),
            implementation: implementation.into(),
        }
    }
}

type Check = fn(&AuditReports<'_>, &Options) -> Option<Finding>;

struct Rule {
    category: Category,
    priority: Priority,
    check: Check,
}

const fn rule(category: Category, priority: Priority, check: Check) -> Rule {
    Rule {
        category,
        priority,
        check,
    }
}

static RULES: &[Rule] = &[
    // schema
    rule(Category::Schema, Priority::High, no_structured_data),
    rule(Category::Schema, Priority::High, malformed_json_ld),
    rule(Category::Schema, Priority::Medium, no_organization),
    rule(Category::Schema, Priority::Medium, no_faq_page),
    rule(Category::Schema, Priority::Medium, incomplete_types),
    rule(Category::Schema, Priority::Low, no_breadcrumbs),
    rule(Category::Schema, Priority::Low, unlinked_entities),
    // meta
    rule(Category::Meta, Priority::High, missing_title),
    rule(Category::Meta, Priority::Medium, title_length),
    rule(Category::Meta, Priority::High, missing_description),
    rule(Category::Meta, Priority::Medium, description_length),
    rule(Category::Meta, Priority::Medium, no_open_graph),
    rule(Category::Meta, Priority::Low, partial_open_graph),
    rule(Category::Meta, Priority::Low, no_twitter_card),
    rule(Category::Meta, Priority::Low, no_canonical),
    rule(Category::Meta, Priority::High, noindex),
    // content
    rule(Category::Content, Priority::High, missing_h1),
    rule(Category::Content, Priority::Medium, multiple_h1),
    rule(Category::Content, Priority::Medium, broken_hierarchy),
    rule(Category::Content, Priority::Medium, thin_content),
    rule(Category::Content, Priority::Low, no_lists),
    rule(Category::Content, Priority::Medium, no_faq_content),
    rule(Category::Content, Priority::Medium, missing_alt_text),
    rule(Category::Content, Priority::Low, hard_to_read),
    rule(Category::Content, Priority::Low, no_semantic_html),
    // technical
    rule(Category::Technical, Priority::High, no_ssl),
    rule(Category::Technical, Priority::High, not_mobile_friendly),
    rule(Category::Technical, Priority::Medium, page_too_large),
    rule(Category::Technical, Priority::Medium, slow_load),
    rule(Category::Technical, Priority::Low, no_sitemap),
    rule(Category::Technical, Priority::Low, no_robots_txt),
];

/// Evaluate every rule and return the findings, high priority first.
#[must_use]
pub fn generate(reports: &AuditReports<'_>, opts: &Options) -> Vec<Recommendation> {
    let mut recommendations: Vec<Recommendation> = RULES
        .iter()
        .filter_map(|rule| {
            (rule.check)(reports, opts).map(|finding| Recommendation {
                priority: rule.priority,
                category: rule.category,
                issue: finding.issue,
                recommendation: finding.recommendation,
                implementation: finding.implementation,
            })
        })
        .collect();

    recommendations.sort_by_key(|r| r.priority);

    debug!(count = recommendations.len(), "recommendations generated");
    recommendations
}

// === Schema rules ===

fn no_structured_data(r: &AuditReports<'_>, _: &Options) -> Option<Finding> {
    (!r.structured_data.found).then(|| {
        Finding::new(
            "No valid JSON-LD structured data found",
            "Add Schema.org JSON-LD so LLMs can identify what this page and organization are about",
            "Add a <script type=\"application/ld+json\"> block describing the Organization (name, url, logo, \
             description, sameAs) and the page's main entity",
        )
    })
}

fn malformed_json_ld(r: &AuditReports<'_>, _: &Options) -> Option<Finding> {
    let errors = &r.structured_data.parse_errors;
    (!errors.is_empty()).then(|| {
        Finding::new(
            format!("{} JSON-LD block(s) could not be parsed", errors.len()),
            "Fix malformed JSON-LD; crawlers and LLMs silently drop invalid blocks",
            format!("Validate the markup with a JSON linter or the Schema.org validator. First error: {}", errors[0]),
        )
    })
}

fn no_organization(r: &AuditReports<'_>, _: &Options) -> Option<Finding> {
    let sd = r.structured_data;
    (sd.found && !sd.has_any_type(&["Organization", "LocalBusiness"])).then(|| {
        Finding::new(
            "No Organization or LocalBusiness schema",
            "Declare who publishes this site so LLMs can attribute content to your brand",
            "Add an Organization JSON-LD entity with name, url, logo, description and sameAs links to official profiles",
        )
    })
}

fn brand_name<'a>(r: &AuditReports<'a>) -> &'a str {
    let meta: &'a MetaTagReport = r.meta_tags;
    meta.og_tags
        .get("og:site_name")
        .map(String::as_str)
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(r.domain)
}

fn no_faq_page(r: &AuditReports<'_>, opts: &Options) -> Option<Finding> {
    let sd = r.structured_data;
    if !sd.found || sd.has_any_type(&["FAQPage"]) {
        return None;
    }

    let brand = brand_name(r);
    let questions: Vec<String> = opts
        .faq_question_templates
        .iter()
        .map(|t| t.replace("{brand}", brand))
        .collect();

    let mut implementation =
        String::from("Add FAQPage JSON-LD with Question/acceptedAnswer pairs mirroring visible FAQ content");
    if !questions.is_empty() {
        implementation.push_str(". Suggested questions: ");
        implementation.push_str(&questions.join(" | "));
    }

    Some(Finding::new(
        "No FAQPage schema",
        "Add FAQ structured data; question-answer pairs are the format LLMs quote most readily",
        implementation,
    ))
}

fn incomplete_types(r: &AuditReports<'_>, _: &Options) -> Option<Finding> {
    let weak: Vec<&str> = r
        .structured_data
        .completeness
        .iter()
        .filter(|(_, ratio)| **ratio < 0.5)
        .map(|(ty, _)| ty.as_str())
        .collect();

    (!weak.is_empty()).then(|| {
        Finding::new(
            format!("Incomplete schema for: {}", weak.join(", ")),
            "Fill in the recommended properties of high-value types so LLMs get complete facts",
            "Add the missing recommended properties (e.g. description, image, sameAs) to each listed type",
        )
    })
}

fn no_breadcrumbs(r: &AuditReports<'_>, _: &Options) -> Option<Finding> {
    let sd = r.structured_data;
    (sd.found && !sd.has_any_type(&["BreadcrumbList"])).then(|| {
        Finding::new(
            "No BreadcrumbList schema",
            "Add breadcrumbs to expose the site hierarchy",
            "Add BreadcrumbList JSON-LD with an itemListElement entry per level (position, name, item)",
        )
    })
}

fn unlinked_entities(r: &AuditReports<'_>, _: &Options) -> Option<Finding> {
    let sd = r.structured_data;
    (sd.schema_count >= 2 && sd.relationships.is_empty()).then(|| {
        Finding::new(
            "Structured data entities are not linked",
            "Connect entities with @id references so LLMs see one coherent knowledge graph",
            "Give each entity an @id and reference it from related entities (e.g. \"publisher\": {\"@id\": \"#organization\"})",
        )
    })
}

// === Meta rules ===

fn missing_title(r: &AuditReports<'_>, _: &Options) -> Option<Finding> {
    r.meta_tags.title.is_none().then(|| {
        Finding::new(
            "Missing page title",
            "Add a descriptive title; it is the primary label LLMs and search engines use for the page",
            "Add <title>Primary topic - Brand</title> of 50-65 characters to <head>",
        )
    })
}

fn title_length(r: &AuditReports<'_>, _: &Options) -> Option<Finding> {
    let meta = r.meta_tags;
    (meta.title.is_some() && !TITLE_RANGE.contains(&meta.title_length)).then(|| {
        Finding::new(
            format!("Title length is {} characters", meta.title_length),
            "Keep the title between 30 and 70 characters so it is neither vague nor truncated",
            "Rewrite the title to lead with the main topic and end with the brand, aiming for 50-65 characters",
        )
    })
}

fn missing_description(r: &AuditReports<'_>, _: &Options) -> Option<Finding> {
    r.meta_tags.description.is_none().then(|| {
        Finding::new(
            "Missing meta description",
            "Add a meta description; LLMs use it as a ready-made page summary",
            "Add <meta name=\"description\" content=\"...\"> with a 140-170 character summary of the page",
        )
    })
}

fn description_length(r: &AuditReports<'_>, _: &Options) -> Option<Finding> {
    let meta = r.meta_tags;
    (meta.description.is_some() && !DESCRIPTION_RANGE.contains(&meta.description_length)).then(|| {
        Finding::new(
            format!("Meta description length is {} characters", meta.description_length),
            "Keep the description between 120 and 170 characters",
            "Summarize what the page offers and who it is for in one or two sentences",
        )
    })
}

fn og_present(meta: &MetaTagReport) -> usize {
    ESSENTIAL_OG_TAGS.iter().filter(|t| meta.og_tags.contains_key(**t)).count()
}

fn no_open_graph(r: &AuditReports<'_>, _: &Options) -> Option<Finding> {
    (og_present(r.meta_tags) == 0).then(|| {
        Finding::new(
            "No Open Graph tags",
            "Add Open Graph tags so shared links and AI previews show the right title, summary and image",
            "Add og:title, og:description, og:image, og:url and og:type meta properties",
        )
    })
}

fn partial_open_graph(r: &AuditReports<'_>, _: &Options) -> Option<Finding> {
    let present = og_present(r.meta_tags);
    let missing: Vec<&str> = ESSENTIAL_OG_TAGS
        .iter()
        .filter(|t| !r.meta_tags.og_tags.contains_key(**t))
        .copied()
        .collect();

    (present > 0 && !missing.is_empty()).then(|| {
        Finding::new(
            format!("Incomplete Open Graph tags: missing {}", missing.join(", ")),
            "Complete the essential Open Graph set",
            format!("Add {}", missing.join(", ")),
        )
    })
}

fn no_twitter_card(r: &AuditReports<'_>, _: &Options) -> Option<Finding> {
    r.meta_tags.twitter_tags.is_empty().then(|| {
        Finding::new(
            "No Twitter card tags",
            "Add Twitter card tags for rich link previews",
            "Add twitter:card, twitter:title, twitter:description and twitter:image meta tags",
        )
    })
}

fn no_canonical(r: &AuditReports<'_>, _: &Options) -> Option<Finding> {
    r.meta_tags.canonical.is_none().then(|| {
        Finding::new(
            "No canonical URL",
            "Declare a canonical URL so duplicate variants consolidate to one source",
            "Add <link rel=\"canonical\" href=\"https://...\"> pointing at the preferred URL",
        )
    })
}

fn noindex(r: &AuditReports<'_>, _: &Options) -> Option<Finding> {
    r.meta_tags.is_noindex().then(|| {
        Finding::new(
            "Page is marked noindex",
            "Remove noindex if this page should be discoverable by search engines and LLM crawlers",
            "Change the robots meta tag to \"index, follow\" or remove it",
        )
    })
}

// === Content rules ===

fn missing_h1(r: &AuditReports<'_>, _: &Options) -> Option<Finding> {
    (r.content.heading_count(1) == 0).then(|| {
        Finding::new(
            "Missing H1 heading",
            "Add a single H1 that states the page topic; LLMs use it to anchor the content",
            "Wrap the main page title in <h1>",
        )
    })
}

fn multiple_h1(r: &AuditReports<'_>, _: &Options) -> Option<Finding> {
    let count = r.content.heading_count(1);
    (count > 1).then(|| {
        Finding::new(
            format!("{count} H1 headings"),
            "Use exactly one H1 per page",
            "Keep the main title as H1 and demote the others to H2",
        )
    })
}

fn broken_hierarchy(r: &AuditReports<'_>, _: &Options) -> Option<Finding> {
    let c = r.content;
    (c.total_headings() > 0 && c.heading_hierarchy_score < 0.7).then(|| {
        Finding::new(
            "Heading hierarchy skips levels",
            "Use a logical H1 > H2 > H3 outline so LLMs can segment the content",
            "Start with H1 and never jump more than one level deeper (e.g. H2 directly to H4)",
        )
    })
}

fn thin_content(r: &AuditReports<'_>, _: &Options) -> Option<Finding> {
    let words = r.content.word_count;
    (words < 300).then(|| {
        Finding::new(
            format!("Thin content: {words} words"),
            "Expand the page to at least 300 words of substantive text for LLM understanding",
            "Add explanations, use cases, specifications or answers to common questions",
        )
    })
}

fn no_lists(r: &AuditReports<'_>, _: &Options) -> Option<Finding> {
    (r.content.lists == 0).then(|| {
        Finding::new(
            "No lists",
            "Use bulleted or numbered lists for features, steps and comparisons",
            "Convert enumerations in paragraphs into <ul> or <ol> lists",
        )
    })
}

fn no_faq_content(r: &AuditReports<'_>, _: &Options) -> Option<Finding> {
    r.content.faq_sections.is_empty().then(|| {
        Finding::new(
            "No FAQ content",
            "Add a visible FAQ section; direct question-answer pairs are easy for LLMs to cite",
            "Add headings such as \"Q: ...\" or \"FAQ\" (or a <dl>) each followed by a concise answer",
        )
    })
}

fn missing_alt_text(r: &AuditReports<'_>, _: &Options) -> Option<Finding> {
    let c = r.content;
    (c.images > 0 && c.image_alt_ratio < 0.8).then(|| {
        Finding::new(
            format!("{} of {} images lack alt text", c.images - c.images_with_alt, c.images),
            "Describe every meaningful image with alt text",
            "Add alt=\"...\" attributes describing the image content",
        )
    })
}

fn hard_to_read(r: &AuditReports<'_>, _: &Options) -> Option<Finding> {
    let grade = r.content.readability.flesch_kincaid_grade;
    (r.content.word_count > 0 && grade > 12.0).then(|| {
        Finding::new(
            format!("Reading grade level is {grade:.1}"),
            "Simplify the prose; shorter sentences are easier for readers and LLMs to summarize",
            "Split long sentences and prefer common words, targeting grade 8-10",
        )
    })
}

fn no_semantic_html(r: &AuditReports<'_>, _: &Options) -> Option<Finding> {
    r.content.semantic_elements.is_empty().then(|| {
        Finding::new(
            "No semantic HTML5 elements",
            "Use semantic elements so machines can tell navigation and boilerplate from content",
            "Wrap regions in <header>, <nav>, <main>, <article>, <section> and <footer>",
        )
    })
}

// === Technical rules ===

fn no_ssl(r: &AuditReports<'_>, _: &Options) -> Option<Finding> {
    (!r.technical.ssl_enabled).then(|| {
        Finding::new(
            "Page is not served over HTTPS",
            "Serve the site over HTTPS",
            "Install a TLS certificate and redirect all http:// requests to https://",
        )
    })
}

fn not_mobile_friendly(r: &AuditReports<'_>, _: &Options) -> Option<Finding> {
    (!r.technical.mobile_friendly).then(|| {
        Finding::new(
            "Page is not mobile-friendly",
            "Make the layout responsive",
            "Add <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\"> and width-based @media rules",
        )
    })
}

fn page_too_large(r: &AuditReports<'_>, _: &Options) -> Option<Finding> {
    let kb = r.technical.page_size_kb;
    (kb > 1024.0).then(|| {
        Finding::new(
            format!("Page size is {kb:.0} KB"),
            "Reduce the HTML payload below 1 MB",
            "Remove inline scripts and data blobs, and lazy-load secondary content",
        )
    })
}

fn slow_load(r: &AuditReports<'_>, _: &Options) -> Option<Finding> {
    let ms = r.technical.load_time_ms;
    (ms > 3000).then(|| {
        Finding::new(
            format!("Page took {ms} ms to load"),
            "Bring the response time under 3 seconds; crawlers may give up on slow pages",
            "Enable caching and compression and reduce server-side work",
        )
    })
}

fn no_sitemap(r: &AuditReports<'_>, _: &Options) -> Option<Finding> {
    (!r.technical.has_sitemap).then(|| {
        Finding::new(
            "No sitemap.xml found",
            "Publish a sitemap so crawlers discover every page",
            "Serve /sitemap.xml listing canonical URLs and reference it from robots.txt",
        )
    })
}

fn no_robots_txt(r: &AuditReports<'_>, _: &Options) -> Option<Finding> {
    (!r.technical.has_robots_txt).then(|| {
        Finding::new(
            "No robots.txt found",
            "Publish robots.txt to state crawl rules, including for AI crawlers",
            "Serve /robots.txt with User-agent rules and a Sitemap: line",
        )
    })
}
