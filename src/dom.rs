//! DOM Operations Adapter
//!
//! Thin helpers over the `dom_query` crate used by every analyzer, so that
//! attribute access, tag inspection and text gathering read the same way
//! across the codebase.

// Re-export core types for external use
pub use dom_query::{Document, Selection};

pub use tendril::StrTendril;

/// Elements whose text never reaches a reader.
const INVISIBLE_TAGS: &[&str] = &["script", "style", "noscript", "template"];

// === Attribute Operations ===

/// Get any attribute value
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Get a trimmed, non-empty attribute value
#[must_use]
pub fn non_empty_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

// === Tag/Node Information ===

/// Get tag name (lowercase)
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(dom_query::NodeRef::node_name)
        .map(|t| t.to_ascii_lowercase())
}

/// Heading level of an `h1`..`h6` element.
#[must_use]
pub fn heading_level(sel: &Selection) -> Option<u8> {
    let tag = tag_name(sel)?;
    let level = tag.strip_prefix('h')?.parse::<u8>().ok()?;
    (1..=6).contains(&level).then_some(level)
}

/// Whether any ancestor element has the given tag name.
#[must_use]
pub fn has_ancestor(sel: &Selection, tag: &str) -> bool {
    let mut current = sel.nodes().first().and_then(dom_query::NodeRef::parent);
    while let Some(node) = current {
        if node.node_name().is_some_and(|name| name.eq_ignore_ascii_case(tag)) {
            return true;
        }
        current = node.parent();
    }
    false
}

// === Text Content ===

/// Get all text content of node and descendants, including script bodies.
///
/// Returns `StrTendril` for zero-copy passing.
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

/// Whitespace-normalized text of a selection.
#[must_use]
pub fn normalized_text(sel: &Selection) -> String {
    text_content(sel).split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Text a reader would see: text nodes outside script, style, noscript and
/// template elements, joined by single spaces.
#[must_use]
pub fn visible_text(doc: &Document) -> String {
    let root = doc.select("body");
    let root = if root.exists() { root } else { doc.select("html") };

    let Some(root_node) = root.nodes().first() else {
        return String::new();
    };

    let mut out = String::new();
    for node in root_node.descendants() {
        if !node.is_text() {
            continue;
        }

        let hidden = node.parent().is_some_and(|parent| {
            parent.is_element()
                && parent.node_name().is_some_and(|tag| {
                    INVISIBLE_TAGS.iter().any(|t| tag.eq_ignore_ascii_case(t))
                })
        });
        if hidden {
            continue;
        }

        let text = node.text();
        let text = text.trim();
        if !text.is_empty() {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(text);
        }
    }

    out
}

// === Tree Navigation ===

/// Get next element sibling (skipping text nodes)
#[must_use]
pub fn next_element_sibling<'a>(sel: &Selection<'a>) -> Option<Selection<'a>> {
    sel.nodes().first().and_then(|node| {
        let mut sibling = node.next_sibling();
        while let Some(s) = sibling {
            if s.is_element() {
                return Some(Selection::from(s));
            }
            sibling = s.next_sibling();
        }
        None
    })
}

/// Direct element children in document order.
#[must_use]
pub fn element_children<'a>(sel: &Selection<'a>) -> Vec<Selection<'a>> {
    sel.nodes()
        .first()
        .map(|node| {
            node.children()
                .into_iter()
                .filter(dom_query::NodeRef::is_element)
                .map(Selection::from)
                .collect()
        })
        .unwrap_or_default()
}

// === Querying ===

/// Number of elements matching a CSS selector
#[inline]
#[must_use]
pub fn count(doc: &Document, selector: &str) -> usize {
    doc.select(selector).length()
}

/// Each element matching a CSS selector as its own selection
#[must_use]
pub fn select_each<'a>(doc: &'a Document, selector: &str) -> Vec<Selection<'a>> {
    doc.select(selector)
        .nodes()
        .iter()
        .map(|node| Selection::from(*node))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visible_text_skips_scripts_and_styles() {
        let doc = Document::from(
            "<html><head><style>p{}</style></head><body><p>Hello</p>\
             <script>var x = 1;</script><p>world</p></body></html>",
        );

        assert_eq!(visible_text(&doc), "Hello world");
    }

    #[test]
    fn test_heading_level() {
        let doc = Document::from("<h3>Title</h3><p>x</p>");
        assert_eq!(heading_level(&doc.select("h3")), Some(3));
        assert_eq!(heading_level(&doc.select("p")), None);
    }

    #[test]
    fn test_next_element_sibling_skips_text() {
        let doc = Document::from("<div><h2>Q</h2>  text  <p>A</p></div>");
        let next = next_element_sibling(&doc.select("h2")).map(|s| tag_name(&s));
        assert_eq!(next, Some(Some("p".to_string())));
    }

    #[test]
    fn test_non_empty_attribute() {
        let doc = Document::from(r#"<img alt="  "><img alt="cat">"#);
        let imgs = select_each(&doc, "img");
        assert_eq!(non_empty_attribute(&imgs[0], "alt"), None);
        assert_eq!(non_empty_attribute(&imgs[1], "alt"), Some("cat".to_string()));
    }
}
