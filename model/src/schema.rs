#![deny(missing_docs)]

//! # Assembled Field Mappings
//!
//! Output structures for the schema assembler: a nested field-definition
//! mapping plus its JSON rendition. Hooks and predicates are runtime-only
//! and are skipped when rendering to JSON.

use crate::metadata::{
    DefaultValue, GetterHook, IndexDefinition, IndexOption, Projection, PropertyOptions,
    SetterHook, Throughput, Validator,
};
use indexmap::IndexMap;
use serde_json::{json, Map, Value as JsonValue};

/// Semantic type of an assembled field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Text.
    String,
    /// Numeric (integer or floating point).
    Number,
    /// Boolean.
    Boolean,
    /// Date, derived from datetime-formatted text fields.
    Date,
    /// Array composite; carries an `Items` nested schema when resolvable.
    Array,
    /// Object composite, also the fallback for unresolved types.
    Object,
}

impl FieldType {
    /// The document-store type name.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::String => "String",
            FieldType::Number => "Number",
            FieldType::Boolean => "Boolean",
            FieldType::Date => "Date",
            FieldType::Array => "Array",
            FieldType::Object => "Object",
        }
    }
}

/// Ordered mapping of property name to assembled field definition.
pub type FieldMapping = IndexMap<String, FieldDefinition>;

/// Nested schema attached to a composite field.
#[derive(Debug, Clone)]
pub enum NestedSchema {
    /// Array-element schema, rendered as `[{type: Object, schema: …}]`.
    Items(FieldMapping),
    /// Direct nested mapping for object fields.
    Fields(FieldMapping),
}

/// One assembled field definition.
///
/// Invariant: `schema` is populated only when `field_type` is a composite.
#[derive(Debug, Clone, Default)]
pub struct FieldDefinition {
    /// Semantic type.
    pub field_type: Option<FieldType>,
    /// Whether the field is required.
    pub required: bool,
    /// Nested schema for composite fields.
    pub schema: Option<NestedSchema>,
    /// Table hash key flag.
    pub hash_key: Option<bool>,
    /// Table range key flag.
    pub range_key: Option<bool>,
    /// Secondary index declaration.
    pub index: Option<IndexOption>,
    /// Validation constraint.
    pub validate: Option<Validator>,
    /// Read hook.
    pub get: Option<GetterHook>,
    /// Write hook.
    pub set: Option<SetterHook>,
    /// Default value.
    pub default: Option<DefaultValue>,
    /// Apply the default even when a value is present.
    pub force_default: Option<bool>,
    /// Closed set of accepted values.
    pub enum_values: Option<Vec<JsonValue>>,
}

impl FieldDefinition {
    /// A definition with just a type and required flag.
    pub fn of_type(field_type: FieldType, required: bool) -> Self {
        Self {
            field_type: Some(field_type),
            required,
            ..Default::default()
        }
    }

    /// Shallow-merges an option bag onto this definition.
    ///
    /// Every populated option overwrites the existing value for that key;
    /// unset options leave the automatic value in place. This mirrors the
    /// declared priority rule: manual options always win per-key.
    pub fn apply_options(&mut self, options: &PropertyOptions) {
        if let Some(field_type) = options.field_type {
            self.field_type = Some(field_type);
        }
        if let Some(required) = options.required {
            self.required = required;
        }
        if let Some(schema) = &options.schema {
            self.schema = Some(schema.clone());
        }
        if let Some(hash_key) = options.hash_key {
            self.hash_key = Some(hash_key);
        }
        if let Some(range_key) = options.range_key {
            self.range_key = Some(range_key);
        }
        if let Some(index) = &options.index {
            self.index = Some(index.clone());
        }
        if let Some(validate) = &options.validate {
            self.validate = Some(validate.clone());
        }
        if let Some(get) = &options.get {
            self.get = Some(get.clone());
        }
        if let Some(set) = &options.set {
            self.set = Some(set.clone());
        }
        if let Some(default) = &options.default {
            self.default = Some(default.clone());
        }
        if let Some(force_default) = options.force_default {
            self.force_default = Some(force_default);
        }
        if let Some(enum_values) = &options.enum_values {
            self.enum_values = Some(enum_values.clone());
        }
    }

    /// Renders the definition to its JSON form.
    pub fn to_value(&self) -> JsonValue {
        let mut out = Map::new();
        let field_type = self.field_type.unwrap_or(FieldType::Object);
        out.insert("type".into(), json!(field_type.as_str()));
        out.insert("required".into(), json!(self.required));
        if let Some(schema) = &self.schema {
            out.insert("schema".into(), nested_schema_to_value(schema));
        }
        if let Some(hash_key) = self.hash_key {
            out.insert("hashKey".into(), json!(hash_key));
        }
        if let Some(range_key) = self.range_key {
            out.insert("rangeKey".into(), json!(range_key));
        }
        if let Some(index) = &self.index {
            out.insert("index".into(), index_to_value(index));
        }
        if let Some(validate) = &self.validate {
            match validate {
                Validator::Value(v) => {
                    out.insert("validate".into(), v.clone());
                }
                Validator::Pattern(p) => {
                    out.insert("validate".into(), json!(p.as_str()));
                }
                // Predicates have no JSON form.
                Validator::Predicate(_) => {}
            }
        }
        if let Some(DefaultValue::Value(v)) = &self.default {
            out.insert("default".into(), v.clone());
        }
        if let Some(force_default) = self.force_default {
            out.insert("forceDefault".into(), json!(force_default));
        }
        if let Some(enum_values) = &self.enum_values {
            out.insert("enum".into(), JsonValue::Array(enum_values.clone()));
        }
        JsonValue::Object(out)
    }
}

/// Renders a field mapping to its JSON form.
pub fn mapping_to_value(mapping: &FieldMapping) -> JsonValue {
    let mut out = Map::new();
    for (name, definition) in mapping {
        out.insert(name.clone(), definition.to_value());
    }
    JsonValue::Object(out)
}

fn nested_schema_to_value(schema: &NestedSchema) -> JsonValue {
    match schema {
        NestedSchema::Items(fields) => json!([{
            "type": "Object",
            "schema": mapping_to_value(fields),
        }]),
        NestedSchema::Fields(fields) => mapping_to_value(fields),
    }
}

fn index_to_value(index: &IndexOption) -> JsonValue {
    match index {
        IndexOption::Enabled(enabled) => json!(enabled),
        IndexOption::Single(def) => index_definition_to_value(def),
        IndexOption::Many(defs) => {
            JsonValue::Array(defs.iter().map(index_definition_to_value).collect())
        }
    }
}

fn index_definition_to_value(def: &IndexDefinition) -> JsonValue {
    let mut out = Map::new();
    if let Some(name) = &def.name {
        out.insert("name".into(), json!(name));
    }
    if let Some(global) = def.global {
        out.insert("global".into(), json!(global));
    }
    if let Some(range_key) = &def.range_key {
        out.insert("rangeKey".into(), json!(range_key));
    }
    if let Some(project) = &def.project {
        let value = match project {
            Projection::All(all) => json!(all),
            Projection::Attributes(attrs) => json!(attrs),
        };
        out.insert("project".into(), value);
    }
    if let Some(throughput) = &def.throughput {
        let value = match throughput {
            Throughput::OnDemand => json!("ON_DEMAND"),
            Throughput::Fixed(units) => json!(units),
            Throughput::ReadWrite { read, write } => json!({"read": read, "write": write}),
        };
        out.insert("throughput".into(), value);
    }
    JsonValue::Object(out)
}
