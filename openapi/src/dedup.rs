#![deny(missing_docs)]

//! # Schema Deduplication
//!
//! Reduces a schema pool to the transitive closure of the schemas actually
//! referenced by a requested set, so unused definitions are not emitted.

use serde_json::{Map, Value as JsonValue};
use std::collections::HashSet;

/// Returns only the schemas reachable from `listed`, walking `$ref`,
/// `allOf`, `oneOf`, `anyOf`, `not`, `additionalProperties`,
/// `patternProperties`, `items` and `properties`.
///
/// Each name is marked visited before its own dependencies are scanned, so
/// mutually referencing schemas terminate. Definitions resolve from `pool`
/// first and fall back to `listed`.
pub fn optimize_schemas(
    listed: &Map<String, JsonValue>,
    pool: &Map<String, JsonValue>,
    ref_prefix: &str,
) -> Map<String, JsonValue> {
    let mut visited = Vec::new();
    let mut seen = HashSet::new();

    for name in listed.keys() {
        if seen.insert(name.clone()) {
            visited.push(name.clone());
        }
        let def = pool.get(name).or_else(|| listed.get(name));
        scan_dependencies(def, pool, ref_prefix, &mut seen, &mut visited);
    }

    let mut out = Map::new();
    for name in visited {
        if let Some(schema) = pool.get(&name).or_else(|| listed.get(&name)) {
            out.insert(name, schema.clone());
        }
    }
    out
}

fn scan_dependencies(
    input: Option<&JsonValue>,
    pool: &Map<String, JsonValue>,
    ref_prefix: &str,
    seen: &mut HashSet<String>,
    visited: &mut Vec<String>,
) {
    let Some(input) = input else {
        return;
    };

    if let Some(ref_str) = input.get("$ref").and_then(|r| r.as_str()) {
        let next = ref_str.strip_prefix(ref_prefix).unwrap_or(ref_str);
        // Mark before scanning so reference cycles terminate.
        if seen.insert(next.to_string()) {
            visited.push(next.to_string());
            scan_dependencies(pool.get(next), pool, ref_prefix, seen, visited);
        }
        return;
    }

    for keyword in ["allOf", "oneOf", "anyOf"] {
        if let Some(children) = input.get(keyword).and_then(|v| v.as_array()) {
            for child in children {
                scan_dependencies(Some(child), pool, ref_prefix, seen, visited);
            }
        }
    }
    if let Some(not) = input.get("not") {
        scan_dependencies(Some(not), pool, ref_prefix, seen, visited);
    }
    if let Some(additional) = input.get("additionalProperties") {
        scan_dependencies(Some(additional), pool, ref_prefix, seen, visited);
    }
    if let Some(pattern_properties) = input.get("patternProperties") {
        scan_dependencies(Some(pattern_properties), pool, ref_prefix, seen, visited);
    }
    if let Some(items) = input.get("items") {
        scan_dependencies(Some(items), pool, ref_prefix, seen, visited);
    }
    if let Some(properties) = input.get("properties").and_then(|p| p.as_object()) {
        for prop in properties.values() {
            scan_dependencies(Some(prop), pool, ref_prefix, seen, visited);
        }
    }
}
