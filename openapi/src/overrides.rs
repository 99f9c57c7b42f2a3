#![deny(missing_docs)]

//! # Operation Overrides
//!
//! Free-form operation fragments registered against a controller or one of
//! its actions. Fragments are either JSON documents merged over the
//! assembled operation or transform functions receiving the accumulated
//! operation and the route context.
//!
//! Class-wide fragments apply before method-wide ones; within each scope,
//! registration order is application order, so later merges win on
//! conflicting keys.

use crate::error::SpecResult;
use crate::merge::merged;
use crate::routes::{get_content_type, get_status_code, Route};
use serde_json::{json, Value as JsonValue};
use std::fmt;
use std::sync::Arc;

/// A transform receiving the accumulated operation and the route context,
/// returning a replacement operation.
pub type OperationTransform =
    Arc<dyn Fn(JsonValue, &Route) -> SpecResult<JsonValue> + Send + Sync>;

/// One registered operation fragment.
#[derive(Clone)]
pub enum OperationFragment {
    /// A document merged over the accumulated operation.
    Doc(JsonValue),
    /// A transform function replacing the accumulated operation.
    Transform(OperationTransform),
}

impl fmt::Debug for OperationFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationFragment::Doc(doc) => write!(f, "OperationFragment::Doc({:?})", doc),
            OperationFragment::Transform(_) => write!(f, "OperationFragment::Transform(..)"),
        }
    }
}

/// A fragment bound to a controller or one of its actions.
#[derive(Debug, Clone)]
pub struct OverrideFact {
    /// Name of the controller type.
    pub target: String,
    /// Action method name; `None` binds the fragment class-wide.
    pub method: Option<String>,
    /// The fragment itself.
    pub fragment: OperationFragment,
}

/// Options accepted by [`OverrideFact::response_schema`].
#[derive(Debug, Clone, Default)]
pub struct ResponseSchemaOptions {
    /// Content type; defaults to the route's content type.
    pub content_type: Option<String>,
    /// Response description; defaults to empty.
    pub description: Option<String>,
    /// Status code; defaults to the route's success status.
    pub status_code: Option<u16>,
    /// Wraps the schema reference in an array.
    pub is_array: bool,
}

impl OverrideFact {
    /// A document fragment.
    pub fn document(target: &str, method: Option<&str>, doc: JsonValue) -> Self {
        Self {
            target: target.to_string(),
            method: method.map(str::to_string),
            fragment: OperationFragment::Doc(doc),
        }
    }

    /// A transform fragment.
    pub fn transform(
        target: &str,
        method: Option<&str>,
        f: impl Fn(JsonValue, &Route) -> SpecResult<JsonValue> + Send + Sync + 'static,
    ) -> Self {
        Self {
            target: target.to_string(),
            method: method.map(str::to_string),
            fragment: OperationFragment::Transform(Arc::new(f)),
        }
    }

    /// A response-body schema annotation for an action.
    ///
    /// Attaches a schema reference under the resolved status code and content
    /// type. When a schema is already present there, the two fold into a
    /// `oneOf` composite instead of overwriting.
    pub fn response_schema(
        target: &str,
        method: &str,
        schema_name: &str,
        options: ResponseSchemaOptions,
    ) -> Self {
        let schema_name = schema_name.to_string();
        Self::transform(target, Some(method), move |source, route| {
            apply_response_schema(source, route, &schema_name, &options)
        })
    }
}

/// Storage for registered operation fragments.
#[derive(Debug, Default)]
pub struct OverrideStorage {
    /// Registered fragments, in registration order.
    pub overrides: Vec<OverrideFact>,
}

impl OverrideStorage {
    /// Creates an empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a fragment.
    pub fn add(&mut self, fact: OverrideFact) {
        self.overrides.push(fact);
    }

    /// Class-wide fragments for a target.
    pub fn for_target(&self, target: &str) -> Vec<&OverrideFact> {
        self.overrides
            .iter()
            .filter(|o| o.target == target && o.method.is_none())
            .collect()
    }

    /// Method-wide fragments for a target action.
    pub fn for_target_and_method(&self, target: &str, method: &str) -> Vec<&OverrideFact> {
        self.overrides
            .iter()
            .filter(|o| o.target == target && o.method.as_deref() == Some(method))
            .collect()
    }

    /// Removes all saved fragments.
    pub fn reset(&mut self) {
        self.overrides.clear();
    }
}

/// Applies the registered fragments of a route to its assembled operation.
pub fn apply_operation_overrides(
    operation: JsonValue,
    route: &Route,
    overrides: &OverrideStorage,
) -> SpecResult<JsonValue> {
    let class_wide = overrides.for_target(&route.action.target);
    let method_wide = overrides.for_target_and_method(&route.action.target, &route.action.method);

    let mut acc = operation;
    for fact in class_wide.into_iter().chain(method_wide) {
        acc = match &fact.fragment {
            OperationFragment::Doc(doc) => merged(&acc, doc),
            OperationFragment::Transform(f) => f(acc, route)?,
        };
    }
    Ok(acc)
}

fn apply_response_schema(
    source: JsonValue,
    route: &Route,
    schema_name: &str,
    options: &ResponseSchemaOptions,
) -> SpecResult<JsonValue> {
    if schema_name.is_empty() {
        return Ok(source);
    }

    let content_type = match &options.content_type {
        Some(ct) => ct.clone(),
        None => get_content_type(route)?,
    };
    let description = options.description.clone().unwrap_or_default();
    let status_code = match options.status_code {
        Some(code) => code.to_string(),
        None => get_status_code(route),
    };

    let reference = json!({ "$ref": format!("#/components/schemas/{}", schema_name) });
    let schema = if options.is_array {
        json!({ "items": reference, "type": "array" })
    } else {
        reference
    };

    let status_key = status_code.clone();
    let content_key = content_type.clone();
    let responses = json!({
        status_key: {
            "content": { content_key: { "schema": schema.clone() } },
            "description": description,
        }
    });

    let old_schema = source
        .get("responses")
        .and_then(|r| r.get(&status_code))
        .and_then(|s| s.get("content"))
        .and_then(|c| c.get(&content_type))
        .and_then(|m| m.get("schema"));

    if let Some(old) = old_schema {
        let has_schema =
            old.get("$ref").is_some() || old.get("items").is_some() || old.get("oneOf").is_some();
        if has_schema {
            // Multiple schemas under one status code and content type fold
            // into a oneOf composite.
            let new_schema = match old.get("oneOf").and_then(|v| v.as_array()) {
                Some(variants) => {
                    let mut variants = variants.clone();
                    variants.push(schema);
                    json!({ "oneOf": variants })
                }
                None => json!({ "oneOf": [old.clone(), schema] }),
            };

            let mut status_response = merged(
                &source["responses"][&status_code],
                &responses[&status_code],
            );
            status_response["content"][&content_type]["schema"] = new_schema;

            let mut out = source;
            out["responses"][&status_code] = status_response;
            return Ok(out);
        }
    }

    Ok(merged(&source, &json!({ "responses": responses })))
}
