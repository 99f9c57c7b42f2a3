#![deny(missing_docs)]

//! # Spec Generation
//!
//! Assembles registered route facts into an OpenAPI 3.0 document:
//! operations, parameters, request bodies, responses, paths and the final
//! document with supplemental properties deep-merged in.

use crate::error::{SpecError, SpecResult};
use crate::merge::deep_merge;
use crate::metadata::{DeclaredType, ParamFact, ParamKind};
use crate::options::SpecOptions;
use crate::overrides::{apply_operation_overrides, OverrideStorage};
use crate::paths::{express_to_openapi_path, parse_path_params};
use crate::routes::{get_responses, parse_routes, Route};
use crate::storage::MetadataStorage;
use heck::ToTitleCase;
use serde_json::{json, Map, Value as JsonValue};

/// Reference prefix of component schemas.
pub const REF_PREFIX: &str = "#/components/schemas/";

/// Returns the full colon-style path of a route.
pub fn get_full_express_path(route: &Route) -> SpecResult<String> {
    let prefix = route.options.route_prefix.as_deref().unwrap_or("");
    Ok(format!(
        "{}{}{}",
        prefix,
        route.controller()?.route,
        route.action.route
    ))
}

/// Returns the full OpenAPI-formatted path of a route.
pub fn get_full_path(route: &Route) -> SpecResult<String> {
    Ok(express_to_openapi_path(&get_full_express_path(route)?))
}

/// Returns the OpenAPI Operation object of a route.
pub fn get_operation(
    route: &Route,
    schemas: &Map<String, JsonValue>,
    overrides: &OverrideStorage,
) -> SpecResult<JsonValue> {
    let mut parameters = get_header_params(route);
    parameters.extend(get_path_params(route)?);
    parameters.extend(get_query_params(route, schemas)?);

    let summary = match route.options.defaults.summary.as_deref() {
        Some(default) if !default.is_empty() => default.to_string(),
        _ => get_summary(route),
    };

    let mut operation = Map::new();
    operation.insert("operationId".into(), json!(get_operation_id(route)));
    operation.insert("parameters".into(), json!(parameters));
    if let Some(request_body) = get_request_body(route) {
        operation.insert("requestBody".into(), request_body);
    }
    operation.insert("responses".into(), get_responses(route)?);
    operation.insert("summary".into(), json!(summary));
    operation.insert("tags".into(), json!(get_tags(route)?));

    let cleaned: Map<String, JsonValue> = operation
        .into_iter()
        .filter(|(_, value)| !is_empty_value(value))
        .collect();

    apply_operation_overrides(JsonValue::Object(cleaned), route, overrides)
}

/// Returns the operation id of a route.
pub fn get_operation_id(route: &Route) -> String {
    if !route.options.operation_id_with_controller {
        return route.action.method.clone();
    }
    format!("{}.{}", route.action.target, route.action.method)
}

/// Returns the OpenAPI Paths object of the given routes.
pub fn get_paths(
    routes: &[Route],
    schemas: &Map<String, JsonValue>,
    overrides: &OverrideStorage,
) -> SpecResult<JsonValue> {
    let mut paths = json!({});
    for route in routes {
        let full_path = get_full_path(route)?;
        let verb = route.action.verb.as_str();
        let operation = get_operation(route, schemas, overrides)?;
        // Two verbs on one path share the path item.
        deep_merge(&mut paths, &json!({ full_path: { verb: operation } }));
    }
    Ok(paths)
}

/// Returns the header parameters of a route.
pub fn get_header_params(route: &Route) -> Vec<JsonValue> {
    let mut headers: Vec<JsonValue> = route
        .params
        .iter()
        .filter(|p| p.kind == ParamKind::Header)
        .map(|meta| {
            json!({
                "in": "header",
                "name": meta.name.as_deref().unwrap_or(""),
                "required": is_required(meta, route),
                "schema": get_param_schema(meta),
            })
        })
        .collect();

    if let Some(meta) = route.params.iter().find(|p| p.kind == ParamKind::Headers) {
        let schema = get_param_schema(meta);
        let name = ref_tail(&schema).unwrap_or_default();
        headers.push(json!({
            "in": "header",
            "name": name,
            "required": is_required(meta, route),
            "schema": schema,
        }));
    }

    headers
}

/// Returns the path parameters of a route.
///
/// Path parameters are first parsed from the path template itself, and then
/// supplemented with registered `Param`-kind facts.
pub fn get_path_params(route: &Route) -> SpecResult<Vec<JsonValue>> {
    let path = get_full_express_path(route)?;

    let mut params = Vec::new();
    for token in parse_path_params(&path) {
        let mut schema = json!({ "type": "string" });
        if token.has_custom_pattern() {
            if let Some(pattern) = &token.pattern {
                schema = json!({ "pattern": pattern, "type": "string" });
            }
        }

        let meta = route
            .params
            .iter()
            .find(|p| p.kind == ParamKind::Param && p.name.as_deref() == Some(token.name.as_str()));
        if let Some(meta) = meta {
            let meta_schema = get_param_schema(meta);
            schema = if meta_schema.get("type").is_some() {
                assign(schema, &meta_schema)
            } else {
                meta_schema
            };
        }

        params.push(json!({
            "in": "path",
            "name": token.name,
            "required": true,
            "schema": schema,
        }));
    }

    Ok(params)
}

/// Returns the query parameters of a route.
///
/// A `Queries`-kind fact spreads the referenced named schema into one query
/// parameter per top-level field, inheriting that schema's required set.
pub fn get_query_params(
    route: &Route,
    schemas: &Map<String, JsonValue>,
) -> SpecResult<Vec<JsonValue>> {
    let mut queries: Vec<JsonValue> = route
        .params
        .iter()
        .filter(|p| p.kind == ParamKind::Query)
        .map(|meta| {
            json!({
                "in": "query",
                "name": meta.name.as_deref().unwrap_or(""),
                "required": is_required(meta, route),
                "schema": get_param_schema(meta),
            })
        })
        .collect();

    if let Some(meta) = route.params.iter().find(|p| p.kind == ParamKind::Queries) {
        let param_schema = get_param_schema(meta);
        let schema_name = ref_tail(&param_schema).ok_or_else(|| {
            SpecError::UnresolvedQueriesSchema(format!(
                "{}.{}",
                route.action.target, route.action.method
            ))
        })?;

        if let Some(current_schema) = schemas.get(&schema_name) {
            let required_list = current_schema.get("required").and_then(|r| r.as_array());
            let empty = Map::new();
            let properties = current_schema
                .get("properties")
                .and_then(|p| p.as_object())
                .unwrap_or(&empty);
            for (name, schema) in properties {
                let required = required_list
                    .map(|list| list.iter().any(|v| v.as_str() == Some(name)))
                    .unwrap_or(false);
                queries.push(json!({
                    "in": "query",
                    "name": name,
                    "required": required,
                    "schema": schema,
                }));
            }
        }
    }

    Ok(queries)
}

/// Returns the OpenAPI requestBody of a route, if it has one.
pub fn get_request_body(route: &Route) -> Option<JsonValue> {
    let body_param_metas: Vec<&&ParamFact> = route
        .params
        .iter()
        .filter(|d| d.kind == ParamKind::BodyParam)
        .collect();

    let body_params_schema = if body_param_metas.is_empty() {
        None
    } else {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for meta in &body_param_metas {
            let name = meta.name.clone().unwrap_or_default();
            properties.insert(name.clone(), get_param_schema(meta));
            if is_required(meta, route) {
                required.push(json!(name));
            }
        }
        Some(json!({
            "properties": properties,
            "required": required,
            "type": "object",
        }))
    };

    let body_meta = route.params.iter().find(|d| d.kind == ParamKind::Body);
    if let Some(body_meta) = body_meta {
        let body_schema = get_param_schema(body_meta);
        let ref_source = body_schema.get("items").unwrap_or(&body_schema);
        let description = ref_source
            .get("$ref")
            .and_then(|r| r.as_str())
            .and_then(|r| r.rsplit('/').next())
            .unwrap_or("")
            .to_string();
        let schema = match &body_params_schema {
            Some(params_schema) => json!({ "allOf": [body_schema, params_schema] }),
            None => body_schema,
        };
        return Some(json!({
            "content": { "application/json": { "schema": schema } },
            "description": description,
            "required": is_required(body_meta, route),
        }));
    }

    body_params_schema.map(|params_schema| {
        json!({ "content": { "application/json": { "schema": params_schema } } })
    })
}

/// Returns the OpenAPI document for the given routes.
pub fn get_spec(
    routes: &[Route],
    schemas: &Map<String, JsonValue>,
    overrides: &OverrideStorage,
) -> SpecResult<JsonValue> {
    Ok(json!({
        "components": { "schemas": {} },
        "info": { "title": "", "version": "1.0.0" },
        "openapi": "3.0.0",
        "paths": get_paths(routes, schemas, overrides)?,
    }))
}

/// Returns the operation summary of a route.
pub fn get_summary(route: &Route) -> String {
    route.action.method.to_title_case()
}

/// Returns the OpenAPI tags of a route.
pub fn get_tags(route: &Route) -> SpecResult<Vec<String>> {
    let target = &route.controller()?.target;
    let base = target.strip_suffix("Controller").unwrap_or(target);
    Ok(vec![base.to_title_case()])
}

/// Returns true when a parameter counts as required, consulting the global
/// default when the fact leaves the flag unspecified.
pub fn is_required(meta: &ParamFact, route: &Route) -> bool {
    if route.options.defaults.param_required == Some(true) {
        return meta.required != Some(false);
    }
    meta.required == Some(true)
}

/// Returns the OpenAPI schema of a parameter from its declared and explicit
/// types. Missing information degrades to an empty schema.
pub fn get_param_schema(param: &ParamFact) -> JsonValue {
    if param.declared_type == Some(DeclaredType::Array) {
        let items = match &param.explicit_type {
            Some(name) => json!({ "$ref": format!("{}{}", REF_PREFIX, name) }),
            None => json!({ "type": "object" }),
        };
        return json!({ "items": items, "type": "array" });
    }

    if let Some(name) = &param.explicit_type {
        return json!({ "$ref": format!("{}{}", REF_PREFIX, name) });
    }

    match &param.declared_type {
        Some(DeclaredType::Str) => json!({ "type": "string" }),
        Some(DeclaredType::Number) => json!({ "type": "number" }),
        Some(DeclaredType::Boolean) => json!({ "type": "boolean" }),
        Some(DeclaredType::Named(name)) => json!({ "$ref": format!("{}{}", REF_PREFIX, name) }),
        Some(DeclaredType::Object) | Some(DeclaredType::Array) | None => json!({}),
    }
}

/// Converts registered metadata into an OpenAPI document.
///
/// # Arguments
///
/// * `storage` - Registered route facts.
/// * `overrides` - Registered operation fragments.
/// * `options` - Generation options.
/// * `additional_properties` - Supplemental document properties; its
///   `components.schemas` doubles as the named-schema pool for parameter
///   spreading.
pub fn generate_spec(
    storage: &MetadataStorage,
    overrides: &OverrideStorage,
    options: &SpecOptions,
    additional_properties: &JsonValue,
) -> SpecResult<JsonValue> {
    let routes = parse_routes(storage, options);
    let empty = Map::new();
    let schemas = additional_properties
        .get("components")
        .and_then(|c| c.get("schemas"))
        .and_then(|s| s.as_object())
        .unwrap_or(&empty);

    let mut spec = get_spec(&routes, schemas, overrides)?;
    deep_merge(&mut spec, additional_properties);
    Ok(spec)
}

/// Renders a generated document as YAML.
pub fn spec_to_yaml(spec: &JsonValue) -> SpecResult<String> {
    serde_yaml::to_string(spec)
        .map_err(|e| SpecError::General(format!("Failed to render spec YAML: {}", e)))
}

// --- Helper Functions ---

/// The last segment of a schema reference, if the value carries one.
fn ref_tail(schema: &JsonValue) -> Option<String> {
    schema
        .get("$ref")
        .and_then(|r| r.as_str())
        .and_then(|r| r.rsplit('/').next())
        .map(str::to_string)
}

/// Shallow key assignment: overlay keys overwrite base keys.
fn assign(base: JsonValue, overlay: &JsonValue) -> JsonValue {
    match (base, overlay) {
        (JsonValue::Object(mut base), JsonValue::Object(overlay)) => {
            for (key, value) in overlay {
                base.insert(key.clone(), value.clone());
            }
            JsonValue::Object(base)
        }
        (_, overlay) => overlay.clone(),
    }
}

/// True for values the operation object drops: null, empty strings, empty
/// composites, and scalars without a length.
fn is_empty_value(value: &JsonValue) -> bool {
    match value {
        JsonValue::String(s) => s.is_empty(),
        JsonValue::Array(a) => a.is_empty(),
        JsonValue::Object(o) => o.is_empty(),
        _ => true,
    }
}
