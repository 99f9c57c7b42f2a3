#![deny(missing_docs)]

//! # Property Fact Metadata
//!
//! Manually registered per-property facts and the storage that owns them.
//! Facts are appended once at registration time, read many times at
//! generation time, and cleared only by an explicit [`ModelMetadataStorage::reset`].

use crate::schema::{FieldType, NestedSchema};
use regex::Regex;
use serde_json::Value as JsonValue;
use std::fmt;
use std::sync::Arc;

/// The kind of a registered property fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyFactKind {
    /// Declares a field that should exist in the assembled mapping.
    Add,
    /// Marks a field as a generated timestamp, excluded from the mapping.
    Timestamp,
    /// Supplies explicit type information for a field.
    Type,
}

/// Index projection and throughput hints for a field.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexDefinition {
    /// Index name.
    pub name: Option<String>,
    /// Whether this is a global secondary index.
    pub global: Option<bool>,
    /// Range key attribute for the index.
    pub range_key: Option<String>,
    /// Projection: all attributes (`true`), keys only (`false`), or a list.
    pub project: Option<Projection>,
    /// Provisioned throughput.
    pub throughput: Option<Throughput>,
}

/// Index projection selector.
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    /// Project all attributes or keys only.
    All(bool),
    /// Project the named attributes.
    Attributes(Vec<String>),
}

/// Provisioned throughput selector.
#[derive(Debug, Clone, PartialEq)]
pub enum Throughput {
    /// Pay-per-request billing.
    OnDemand,
    /// Same read and write capacity.
    Fixed(u32),
    /// Independent read and write capacity.
    ReadWrite {
        /// Read capacity units.
        read: u32,
        /// Write capacity units.
        write: u32,
    },
}

/// Index declaration on a field: enabled flag, one definition, or several.
#[derive(Debug, Clone, PartialEq)]
pub enum IndexOption {
    /// Plain on/off index flag.
    Enabled(bool),
    /// A single index definition.
    Single(IndexDefinition),
    /// Multiple index definitions.
    Many(Vec<IndexDefinition>),
}

/// A default value: either a literal or a thunk evaluated at save time.
#[derive(Clone)]
pub enum DefaultValue {
    /// A literal JSON value.
    Value(JsonValue),
    /// A thunk producing the default.
    Thunk(Arc<dyn Fn() -> JsonValue + Send + Sync>),
}

impl DefaultValue {
    /// Resolves the default to a concrete value.
    pub fn resolve(&self) -> JsonValue {
        match self {
            DefaultValue::Value(v) => v.clone(),
            DefaultValue::Thunk(f) => f(),
        }
    }
}

impl fmt::Debug for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Value(v) => write!(f, "DefaultValue::Value({:?})", v),
            DefaultValue::Thunk(_) => write!(f, "DefaultValue::Thunk(..)"),
        }
    }
}

/// A field validator: literal match, pattern match, or predicate.
#[derive(Clone)]
pub enum Validator {
    /// The stored value must equal this literal.
    Value(JsonValue),
    /// The stored value must match this pattern.
    Pattern(Regex),
    /// Arbitrary predicate over the stored value.
    Predicate(Arc<dyn Fn(&JsonValue) -> bool + Send + Sync>),
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Validator::Value(v) => write!(f, "Validator::Value({:?})", v),
            Validator::Pattern(p) => write!(f, "Validator::Pattern({:?})", p.as_str()),
            Validator::Predicate(_) => write!(f, "Validator::Predicate(..)"),
        }
    }
}

/// A read hook applied when a value is loaded from storage.
#[derive(Clone)]
pub struct GetterHook(Arc<dyn Fn(JsonValue) -> JsonValue + Send + Sync>);

impl GetterHook {
    /// Wraps a transformation function.
    pub fn new(f: impl Fn(JsonValue) -> JsonValue + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Applies the hook to a value.
    pub fn apply(&self, value: JsonValue) -> JsonValue {
        (self.0)(value)
    }
}

impl fmt::Debug for GetterHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GetterHook(..)")
    }
}

/// A write hook applied when a value is stored; receives the previous value.
#[derive(Clone)]
pub struct SetterHook(Arc<dyn Fn(JsonValue, Option<&JsonValue>) -> JsonValue + Send + Sync>);

impl SetterHook {
    /// Wraps a transformation function.
    pub fn new(
        f: impl Fn(JsonValue, Option<&JsonValue>) -> JsonValue + Send + Sync + 'static,
    ) -> Self {
        Self(Arc::new(f))
    }

    /// Applies the hook to a value and its predecessor.
    pub fn apply(&self, value: JsonValue, old: Option<&JsonValue>) -> JsonValue {
        (self.0)(value, old)
    }
}

impl fmt::Debug for SetterHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SetterHook(..)")
    }
}

/// The option bag accepted by property registration.
///
/// Every populated option is shallow-merged onto the assembled field
/// definition, overwriting the automatically derived value for that key.
#[derive(Debug, Clone, Default)]
pub struct PropertyOptions {
    /// Marks the field as the table hash key.
    pub hash_key: Option<bool>,
    /// Marks the field as the table range key.
    pub range_key: Option<bool>,
    /// Secondary index declaration.
    pub index: Option<IndexOption>,
    /// Validation constraint.
    pub validate: Option<Validator>,
    /// Read hook.
    pub get: Option<GetterHook>,
    /// Write hook.
    pub set: Option<SetterHook>,
    /// Default value or thunk.
    pub default: Option<DefaultValue>,
    /// Apply the default even when an explicit value is present.
    pub force_default: Option<bool>,
    /// Closed set of accepted values.
    pub enum_values: Option<Vec<JsonValue>>,
    /// Explicit semantic type override. Always wins over derived types.
    pub field_type: Option<FieldType>,
    /// Named model supplying the element type of a composite field.
    pub target_model: Option<String>,
    /// Explicit nested schema override.
    pub schema: Option<NestedSchema>,
    /// Explicit required flag override.
    pub required: Option<bool>,
}

/// A single registered property fact.
#[derive(Debug, Clone)]
pub struct PropertyFact {
    /// Name of the owning model.
    pub model: String,
    /// Property name within the model.
    pub name: String,
    /// Fact kind.
    pub kind: PropertyFactKind,
    /// Optional option bag.
    pub options: Option<PropertyOptions>,
}

impl PropertyFact {
    /// An `Add` fact declaring a field with options.
    pub fn add(model: &str, name: &str, options: Option<PropertyOptions>) -> Self {
        Self {
            model: model.to_string(),
            name: name.to_string(),
            kind: PropertyFactKind::Add,
            options,
        }
    }

    /// A `Timestamp` fact excluding the field from the assembled mapping.
    pub fn timestamp(model: &str, name: &str) -> Self {
        Self {
            model: model.to_string(),
            name: name.to_string(),
            kind: PropertyFactKind::Timestamp,
            options: None,
        }
    }

    /// A `Type` fact supplying explicit type information.
    pub fn typed(model: &str, name: &str, options: PropertyOptions) -> Self {
        Self {
            model: model.to_string(),
            name: name.to_string(),
            kind: PropertyFactKind::Type,
            options: Some(options),
        }
    }
}

/// Storage for registered property facts.
///
/// Registration appends; generation reads; `reset` is the only destructive
/// operation and must not run concurrently with generation.
#[derive(Debug, Default)]
pub struct ModelMetadataStorage {
    /// Registered property facts, in registration order.
    pub properties: Vec<PropertyFact>,
}

impl ModelMetadataStorage {
    /// Creates an empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a property fact.
    pub fn add_property(&mut self, fact: PropertyFact) {
        self.properties.push(fact);
    }

    /// Returns all facts registered for a model, in registration order.
    pub fn find_properties_for_model(&self, model: &str) -> Vec<&PropertyFact> {
        self.properties.iter().filter(|p| p.model == model).collect()
    }

    /// Returns the first fact registered for a model property.
    pub fn find_property_for_model(&self, model: &str, name: &str) -> Option<&PropertyFact> {
        self.find_properties_for_model(model)
            .into_iter()
            .find(|p| p.name == name)
    }

    /// Returns the first `Type`-kind fact registered for a model property.
    pub fn find_type_property_for_model(&self, model: &str, name: &str) -> Option<&PropertyFact> {
        self.find_properties_for_model(model)
            .into_iter()
            .find(|p| p.name == name && p.kind == PropertyFactKind::Type)
    }

    /// Removes all saved facts.
    pub fn reset(&mut self) {
        self.properties.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_properties_filters_by_model() {
        let mut storage = ModelMetadataStorage::new();
        storage.add_property(PropertyFact::add("User", "id", None));
        storage.add_property(PropertyFact::add("Order", "total", None));
        storage.add_property(PropertyFact::timestamp("User", "createdAt"));

        let user_facts = storage.find_properties_for_model("User");
        assert_eq!(user_facts.len(), 2);
        assert!(user_facts.iter().all(|f| f.model == "User"));
    }

    #[test]
    fn test_find_type_property_skips_other_kinds() {
        let mut storage = ModelMetadataStorage::new();
        storage.add_property(PropertyFact::add("User", "tags", None));
        storage.add_property(PropertyFact::typed(
            "User",
            "tags",
            PropertyOptions {
                target_model: Some("Tag".into()),
                ..Default::default()
            },
        ));

        let fact = storage.find_type_property_for_model("User", "tags").unwrap();
        assert_eq!(fact.kind, PropertyFactKind::Type);
        assert_eq!(
            fact.options.as_ref().unwrap().target_model.as_deref(),
            Some("Tag")
        );
    }

    #[test]
    fn test_reset_clears_facts() {
        let mut storage = ModelMetadataStorage::new();
        storage.add_property(PropertyFact::add("User", "id", None));
        storage.reset();
        assert!(storage.properties.is_empty());
    }
}
