#![deny(missing_docs)]

//! # Deep Merge
//!
//! Recursive structural merge used to fold override fragments and
//! supplemental document properties into assembled documents.
//!
//! Semantics: object keys merge recursively; arrays merge index-wise with
//! extra source elements appended; a null incoming value keeps an existing
//! target value; everything else overwrites. Values are acyclic by
//! construction, so the recursion terminates on any input.

use serde_json::Value as JsonValue;

/// Merges `source` into `target`, mutating `target`.
pub fn deep_merge(target: &mut JsonValue, source: &JsonValue) {
    match (target, source) {
        (JsonValue::Object(existing), JsonValue::Object(incoming)) => {
            for (key, value) in incoming {
                match existing.get_mut(key) {
                    Some(slot) => merge_slot(slot, value),
                    None => {
                        existing.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (JsonValue::Array(existing), JsonValue::Array(incoming)) => {
            for (idx, value) in incoming.iter().enumerate() {
                match existing.get_mut(idx) {
                    Some(slot) => merge_slot(slot, value),
                    None => existing.push(value.clone()),
                }
            }
        }
        (slot, value) => {
            if !value.is_null() {
                *slot = value.clone();
            }
        }
    }
}

/// Merges one or more sources into `target`, left to right.
pub fn deep_merge_all(target: &mut JsonValue, sources: &[&JsonValue]) {
    for source in sources {
        deep_merge(target, source);
    }
}

/// Returns a fresh value with `overlay` merged over `base`.
pub fn merged(base: &JsonValue, overlay: &JsonValue) -> JsonValue {
    let mut out = base.clone();
    deep_merge(&mut out, overlay);
    out
}

fn merge_slot(slot: &mut JsonValue, incoming: &JsonValue) {
    // A null incoming value keeps the existing one.
    if incoming.is_null() {
        return;
    }
    let composite_pair = matches!(
        (&*slot, incoming),
        (JsonValue::Object(_), JsonValue::Object(_)) | (JsonValue::Array(_), JsonValue::Array(_))
    );
    if composite_pair {
        deep_merge(slot, incoming);
    } else {
        *slot = incoming.clone();
    }
}
