//! JSON-LD (Schema.org) analysis.
//!
//! Every `<script type="application/ld+json">` block is parsed on its own; a
//! malformed block is recorded and skipped. Valid blocks are walked with an
//! explicit stack and a hard depth limit, so hostile or absurdly nested markup
//! cannot exhaust the call stack.

use std::collections::{BTreeMap, BTreeSet};

use dom_query::Document;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::dom;
use crate::result::{SchemaRelationship, StructuredDataReport};
use crate::Options;

/// Type name used for entities that carry an `@id` but no `@type`.
const UNTYPED: &str = "Thing";

/// Cap on the summed high-value type weights in the quality score.
const TYPE_POINTS_CAP: u32 = 40;

/// JSON-LD blocks of a document, parsed once and shared by the analyzers.
#[derive(Debug, Default)]
pub struct ParsedBlocks {
    /// Blocks that parsed, in document order.
    pub values: Vec<Value>,
    /// One message per block that did not parse.
    pub errors: Vec<String>,
}

impl ParsedBlocks {
    /// Whether any entity (an object with `@type` or `@id`) has a non-empty
    /// value under the key `name`.
    #[must_use]
    pub fn has_property(&self, name: &str, max_depth: usize) -> bool {
        walk(&self.values, max_depth)
            .entities
            .iter()
            .any(|entity| entity.map.get(name).is_some_and(is_present))
    }
}

/// An object met during the walk that has a `@type` or an `@id`.
#[derive(Debug)]
pub(crate) struct Entity<'a> {
    pub map: &'a Map<String, Value>,
    pub path: String,
    pub types: Vec<String>,
}

impl Entity<'_> {
    pub fn id(&self) -> Option<&str> {
        self.map.get("@id").and_then(Value::as_str)
    }

    pub fn primary_type(&self) -> &str {
        self.types.first().map_or(UNTYPED, String::as_str)
    }

    pub fn is_a(&self, ty: &str) -> bool {
        self.types.iter().any(|t| t == ty)
    }
}

/// Result of walking all parsed blocks.
#[derive(Debug, Default)]
pub(crate) struct Walk<'a> {
    pub entities: Vec<Entity<'a>>,
    pub properties: BTreeMap<String, usize>,
    pub depth_limited: bool,
}

struct Frame<'a> {
    value: &'a Value,
    path: String,
    depth: usize,
}

/// Analyze the document's JSON-LD markup.
///
/// `parsed` holds the document's blocks from [`parse_blocks`]; `doc` is still
/// needed for the microdata and RDFa counts.
#[must_use]
pub fn analyze(doc: &Document, parsed: &ParsedBlocks, opts: &Options) -> StructuredDataReport {
    let walk = walk(&parsed.values, opts.max_json_depth);

    if walk.depth_limited {
        warn!(max_depth = opts.max_json_depth, "JSON-LD nesting exceeded depth limit; deeper values ignored");
    }

    let types: BTreeSet<String> = walk
        .entities
        .iter()
        .flat_map(|e| e.types.iter().cloned())
        .collect();
    let completeness = completeness(&walk.entities, opts);
    let relationships = relationships(&walk.entities);

    // Blocks without a single typed entity are not Schema.org markup.
    let found = !types.is_empty();
    let quality_score = quality_score(&types, &walk.properties, &completeness, parsed.errors.len(), opts);

    debug!(
        blocks = parsed.values.len(),
        errors = parsed.errors.len(),
        types = types.len(),
        quality_score,
        "structured data analyzed"
    );

    StructuredDataReport {
        found,
        schema_count: parsed.values.len(),
        types,
        properties: walk.properties,
        parse_errors: parsed.errors.clone(),
        completeness,
        relationships,
        microdata_items: dom::count(doc, "[itemtype]"),
        rdfa_items: dom::count(doc, "[typeof]"),
        depth_limited: walk.depth_limited,
        quality_score,
    }
}

/// Raw text of every JSON-LD script, trimmed, empty ones dropped.
fn json_ld_sources(doc: &Document) -> Vec<String> {
    dom::select_each(doc, "script[type]")
        .iter()
        .filter(|script| {
            dom::get_attribute(script, "type")
                .is_some_and(|t| t.trim().to_ascii_lowercase().starts_with("application/ld+json"))
        })
        .map(|script| dom::text_content(script).trim().to_string())
        .filter(|text| !text.is_empty())
        .collect()
}

/// Parse every JSON-LD block independently.
#[must_use]
pub fn parse_blocks(doc: &Document) -> ParsedBlocks {
    let mut parsed = ParsedBlocks::default();

    for (index, source) in json_ld_sources(doc).iter().enumerate() {
        match serde_json::from_str::<Value>(source) {
            Ok(value) => parsed.values.push(value),
            Err(err) => {
                warn!(block = index + 1, error = %err, "skipping malformed JSON-LD block");
                parsed.errors.push(format!("JSON-LD block {}: {err}", index + 1));
            }
        }
    }

    parsed
}

/// Walk parsed blocks depth-first, in document order.
///
/// `@graph` members and array elements keep their parent's path; other
/// properties extend it with a dot. `@`-prefixed keys are not properties.
pub(crate) fn walk(values: &[Value], max_depth: usize) -> Walk<'_> {
    let mut walk = Walk::default();
    let mut stack: Vec<Frame<'_>> = values
        .iter()
        .rev()
        .map(|value| Frame {
            value,
            path: String::new(),
            depth: 0,
        })
        .collect();

    while let Some(frame) = stack.pop() {
        if frame.depth > max_depth {
            walk.depth_limited = true;
            continue;
        }

        match frame.value {
            Value::Array(items) => {
                stack.extend(items.iter().rev().map(|value| Frame {
                    value,
                    path: frame.path.clone(),
                    depth: frame.depth + 1,
                }));
            }
            Value::Object(map) => {
                let types = schema_types(map);
                if !types.is_empty() || map.contains_key("@id") {
                    walk.entities.push(Entity {
                        map,
                        path: frame.path.clone(),
                        types,
                    });
                }

                let mut children = Vec::new();
                for (key, value) in map {
                    if key == "@graph" {
                        children.push(Frame {
                            value,
                            path: frame.path.clone(),
                            depth: frame.depth + 1,
                        });
                        continue;
                    }
                    if key.starts_with('@') {
                        continue;
                    }

                    let path = if frame.path.is_empty() {
                        key.clone()
                    } else {
                        format!("{}.{key}", frame.path)
                    };
                    *walk.properties.entry(path.clone()).or_insert(0) += 1;

                    if value.is_object() || value.is_array() {
                        children.push(Frame {
                            value,
                            path,
                            depth: frame.depth + 1,
                        });
                    }
                }
                stack.extend(children.into_iter().rev());
            }
            _ => {}
        }
    }

    walk
}

/// `@type` values of an object (string or array of strings).
fn schema_types(map: &Map<String, Value>) -> Vec<String> {
    match map.get("@type") {
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s.trim().to_string()],
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

/// A property value that carries information.
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::Bool(_) | Value::Number(_) => true,
    }
}

/// Fraction of the type's required properties present in one object.
pub(crate) fn completeness_ratio(map: &Map<String, Value>, required: &[String]) -> f64 {
    if required.is_empty() {
        return 0.0;
    }

    let present = required
        .iter()
        .filter(|prop| map.get(prop.as_str()).is_some_and(is_present))
        .count();

    present as f64 / required.len() as f64
}

/// Best completeness per high-value type over all instances of that type.
fn completeness(entities: &[Entity<'_>], opts: &Options) -> BTreeMap<String, f64> {
    let mut best: BTreeMap<String, f64> = BTreeMap::new();

    for entity in entities {
        for ty in &entity.types {
            let Some(required) = opts.required_properties.get(ty) else {
                continue;
            };

            let ratio = completeness_ratio(entity.map, required);
            let slot = best.entry(ty.clone()).or_insert(0.0);
            if ratio > *slot {
                *slot = ratio;
            }
        }
    }

    best
}

/// `@id` values a property refers to: plain strings, `{"@id": ...}` objects,
/// or arrays of either.
fn referenced_ids(value: &Value) -> Vec<&str> {
    match value {
        Value::String(s) => vec![s.as_str()],
        Value::Object(map) => map.get("@id").and_then(Value::as_str).into_iter().collect(),
        Value::Array(items) => items.iter().flat_map(referenced_ids).collect(),
        _ => Vec::new(),
    }
}

/// Links between entities via exact `@id` matches.
fn relationships(entities: &[Entity<'_>]) -> Vec<SchemaRelationship> {
    let mut known: BTreeMap<&str, &str> = BTreeMap::new();
    for entity in entities {
        if let Some(id) = entity.id() {
            known.entry(id).or_insert_with(|| entity.primary_type());
        }
    }

    if known.is_empty() {
        return Vec::new();
    }

    let mut found = Vec::new();
    for entity in entities {
        let own_id = entity.id();
        for (key, value) in entity.map {
            if key.starts_with('@') {
                continue;
            }

            for target in referenced_ids(value) {
                if Some(target) == own_id {
                    continue;
                }
                if let Some(target_type) = known.get(target) {
                    found.push(SchemaRelationship {
                        source_type: entity.primary_type().to_string(),
                        source_path: entity.path.clone(),
                        relation: key.clone(),
                        target_type: (*target_type).to_string(),
                        target_id: target.to_string(),
                    });
                }
            }
        }
    }

    found
}

/// Points for the number of property occurrences.
#[must_use]
pub(crate) fn property_tier(occurrences: usize) -> u32 {
    match occurrences {
        25.. => 20,
        10..=24 => 15,
        5..=9 => 10,
        1..=4 => 5,
        0 => 0,
    }
}

/// Summed weights of the high-value types present, uncapped.
#[must_use]
pub(crate) fn type_points(types: &BTreeSet<String>, opts: &Options) -> u32 {
    types
        .iter()
        .filter_map(|ty| opts.type_weights.get(ty))
        .sum()
}

/// Structured data quality on a 0–100 scale.
///
/// `type weights (≤40) + property tier (≤20) + 30 × mean completeness
/// − min(2 × errors, 10)`, clamped.
#[must_use]
pub fn quality_score(
    types: &BTreeSet<String>,
    properties: &BTreeMap<String, usize>,
    completeness: &BTreeMap<String, f64>,
    error_count: usize,
    opts: &Options,
) -> u8 {
    let type_points = type_points(types, opts).min(TYPE_POINTS_CAP);
    let tier = property_tier(properties.values().sum());

    let mean_completeness = if completeness.is_empty() {
        0.0
    } else {
        completeness.values().sum::<f64>() / completeness.len() as f64
    };

    let penalty = (error_count.saturating_mul(2)).min(10) as f64;
    let raw = f64::from(type_points) + f64::from(tier) + 30.0 * mean_completeness - penalty;

    raw.clamp(0.0, 100.0).round() as u8
}
