#![deny(missing_docs)]

//! # Schema Assembly
//!
//! Converts a registered model's declared rules plus its manually registered
//! property facts into a nested field-definition mapping.
//!
//! The automatic pass walks the model descriptor; the manual-fact overlay
//! always runs after it, so manual options win per-key. `Timestamp`-kind
//! facts remove their field from the mapping entirely.

use crate::error::{ModelError, ModelResult};
use crate::metadata::{ModelMetadataStorage, PropertyFactKind};
use crate::registry::{ModelRegistry, NestedKind, PropertyFormat, PropertyRule, PropertyShape};
use crate::schema::{FieldDefinition, FieldMapping, FieldType, NestedSchema};

/// Assembles the field mapping for a registered model.
///
/// The root model must be known to the registry or have at least one
/// registered property fact; nested models degrade to empty mappings when
/// unknown rather than failing.
///
/// # Arguments
///
/// * `registry` - Declared model descriptors.
/// * `storage` - Manually registered property facts.
/// * `model` - Name of the root model.
///
/// # Returns
///
/// * `FieldMapping` - The assembled nested field-definition mapping.
pub fn to_model_schema(
    registry: &ModelRegistry,
    storage: &ModelMetadataStorage,
    model: &str,
) -> ModelResult<FieldMapping> {
    if registry.get(model).is_none() && storage.find_properties_for_model(model).is_empty() {
        return Err(ModelError::UnknownModel(model.to_string()));
    }
    Ok(assemble_model(registry, storage, model))
}

/// Assembles one model, degrading silently when the descriptor is unknown.
fn assemble_model(
    registry: &ModelRegistry,
    storage: &ModelMetadataStorage,
    model: &str,
) -> FieldMapping {
    let mut mapping = FieldMapping::new();

    // 1. Automatic pass over the declared rules.
    if let Some(descriptor) = registry.get(model) {
        for (name, rule) in &descriptor.properties {
            let required = descriptor.required.iter().any(|r| r == name);
            let mut field = FieldDefinition::of_type(resolve_field_type(rule), required);
            field.schema = resolve_nested_schema(registry, storage, model, name, rule);
            mapping.insert(name.clone(), field);
        }
    }

    // 2. Manual-fact overlay; must stay after the automatic pass.
    for fact in storage.find_properties_for_model(model) {
        if fact.kind == PropertyFactKind::Timestamp {
            // Timestamp fields are handled by generated behavior outside
            // this mapping.
            mapping.shift_remove(&fact.name);
            continue;
        }
        let entry = mapping
            .entry(fact.name.clone())
            .or_insert_with(|| FieldDefinition::of_type(FieldType::String, true));
        if let Some(options) = &fact.options {
            entry.apply_options(options);
        }
    }

    mapping
}

/// Maps a declared rule to its semantic field type.
fn resolve_field_type(rule: &PropertyRule) -> FieldType {
    match &rule.shape {
        PropertyShape::Str => match rule.format {
            Some(PropertyFormat::DateTime) => FieldType::Date,
            None => FieldType::String,
        },
        PropertyShape::Number | PropertyShape::Integer => FieldType::Number,
        PropertyShape::Boolean => FieldType::Boolean,
        PropertyShape::Array => FieldType::Array,
        PropertyShape::Object | PropertyShape::Reference(_) => FieldType::Object,
    }
}

/// Resolves the nested schema of a composite field, if any.
fn resolve_nested_schema(
    registry: &ModelRegistry,
    storage: &ModelMetadataStorage,
    model: &str,
    name: &str,
    rule: &PropertyRule,
) -> Option<NestedSchema> {
    match &rule.shape {
        PropertyShape::Array => {
            let child = resolve_element_model(storage, model, name, rule)?;
            Some(NestedSchema::Items(assemble_model(
                registry, storage, &child,
            )))
        }
        PropertyShape::Object | PropertyShape::Reference(_) => {
            let child = resolve_object_model(rule)?;
            Some(NestedSchema::Fields(assemble_model(
                registry, storage, &child,
            )))
        }
        _ => None,
    }
}

/// Locates the element model of an array field.
///
/// Priority: explicit `Type`-fact option, declared element thunk, the
/// nested-validation target, the declared native type. Absence of all four
/// leaves the array without a nested schema.
fn resolve_element_model(
    storage: &ModelMetadataStorage,
    model: &str,
    name: &str,
    rule: &PropertyRule,
) -> Option<String> {
    if let Some(fact) = storage.find_type_property_for_model(model, name) {
        if let Some(target) = fact
            .options
            .as_ref()
            .and_then(|o| o.target_model.as_deref())
        {
            return Some(target.to_string());
        }
    }
    if let Some(element) = rule.element.as_deref() {
        return Some(element.to_string());
    }
    if let Some(nested) = &rule.nested {
        if nested.kind == NestedKind::Validated {
            return Some(nested.target.clone());
        }
    }
    rule.declared.clone()
}

/// Locates the nested model of an object field.
fn resolve_object_model(rule: &PropertyRule) -> Option<String> {
    if let Some(nested) = &rule.nested {
        if nested.kind == NestedKind::Custom {
            return Some(nested.target.clone());
        }
    }
    match &rule.shape {
        PropertyShape::Reference(target) => Some(target.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{PropertyFact, PropertyOptions};
    use crate::registry::ModelDescriptor;
    use crate::schema::mapping_to_value;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn user_registry() -> ModelRegistry {
        let mut registry = ModelRegistry::new();
        registry.register(
            ModelDescriptor::new("User")
                .required_property("id", PropertyRule::string())
                .property("age", PropertyRule::number())
                .property("active", PropertyRule::boolean())
                .property("createdAt", PropertyRule::datetime()),
        );
        registry
    }

    #[test]
    fn test_scalar_types_map_from_rules() {
        let registry = user_registry();
        let storage = ModelMetadataStorage::new();
        let mapping = to_model_schema(&registry, &storage, "User").unwrap();

        assert_eq!(
            mapping_to_value(&mapping),
            json!({
                "id": {"type": "String", "required": true},
                "age": {"type": "Number", "required": false},
                "active": {"type": "Boolean", "required": false},
                "createdAt": {"type": "Date", "required": false},
            })
        );
    }

    #[test]
    fn test_validated_and_manual_fields_are_disjoint_union() {
        let registry = user_registry();
        let mut storage = ModelMetadataStorage::new();
        storage.add_property(PropertyFact::add(
            "User",
            "nickname",
            Some(PropertyOptions {
                required: Some(false),
                ..Default::default()
            }),
        ));

        let mapping = to_model_schema(&registry, &storage, "User").unwrap();
        // 4 declared + 1 manual
        assert_eq!(mapping.len(), 5);
        assert!(!mapping.get("nickname").unwrap().required);
    }

    #[test]
    fn test_manual_fields_default_to_required_string() {
        let mut registry = ModelRegistry::new();
        registry.register(ModelDescriptor::new("Audit"));
        let mut storage = ModelMetadataStorage::new();
        storage.add_property(PropertyFact::add("Audit", "actor", None));

        let mapping = to_model_schema(&registry, &storage, "Audit").unwrap();
        let actor = mapping.get("actor").unwrap();
        assert_eq!(actor.field_type, Some(FieldType::String));
        assert!(actor.required);
    }

    #[test]
    fn test_manual_options_win_over_automatic_values() {
        let registry = user_registry();
        let mut storage = ModelMetadataStorage::new();
        storage.add_property(PropertyFact::add(
            "User",
            "id",
            Some(PropertyOptions {
                hash_key: Some(true),
                required: Some(false),
                ..Default::default()
            }),
        ));

        let mapping = to_model_schema(&registry, &storage, "User").unwrap();
        let id = mapping.get("id").unwrap();
        // Manual keys overwrite; untouched keys keep the automatic value.
        assert_eq!(id.hash_key, Some(true));
        assert!(!id.required);
        assert_eq!(id.field_type, Some(FieldType::String));
    }

    #[test]
    fn test_timestamp_facts_exclude_fields() {
        let registry = user_registry();
        let mut storage = ModelMetadataStorage::new();
        storage.add_property(PropertyFact::timestamp("User", "createdAt"));
        // A timestamp for a field that was never auto-detected.
        storage.add_property(PropertyFact::timestamp("User", "updatedAt"));

        let mapping = to_model_schema(&registry, &storage, "User").unwrap();
        assert!(!mapping.contains_key("createdAt"));
        assert!(!mapping.contains_key("updatedAt"));
        assert_eq!(mapping.len(), 3);
    }

    #[test]
    fn test_array_field_recurses_into_element_model() {
        let mut registry = user_registry();
        registry.register(
            ModelDescriptor::new("Order")
                .required_property("total", PropertyRule::number())
                .property(
                    "items",
                    PropertyRule::array().with_validated("LineItem"),
                ),
        );
        registry.register(
            ModelDescriptor::new("LineItem")
                .required_property("sku", PropertyRule::string()),
        );
        let storage = ModelMetadataStorage::new();

        let mapping = to_model_schema(&registry, &storage, "Order").unwrap();
        assert_eq!(
            mapping_to_value(&mapping),
            json!({
                "total": {"type": "Number", "required": true},
                "items": {
                    "type": "Array",
                    "required": false,
                    "schema": [{
                        "type": "Object",
                        "schema": {"sku": {"type": "String", "required": true}},
                    }],
                },
            })
        );
    }

    #[test]
    fn test_type_fact_overrides_element_model() {
        let mut registry = ModelRegistry::new();
        registry.register(
            ModelDescriptor::new("Order")
                .property("items", PropertyRule::array().with_validated("LineItem")),
        );
        registry.register(
            ModelDescriptor::new("Sku").required_property("code", PropertyRule::string()),
        );
        let mut storage = ModelMetadataStorage::new();
        storage.add_property(PropertyFact::typed(
            "Order",
            "items",
            PropertyOptions {
                target_model: Some("Sku".into()),
                ..Default::default()
            },
        ));

        let mapping = to_model_schema(&registry, &storage, "Order").unwrap();
        let rendered = mapping_to_value(&mapping);
        assert_eq!(
            rendered["items"]["schema"][0]["schema"],
            json!({"code": {"type": "String", "required": true}})
        );
    }

    #[test]
    fn test_object_field_recurses_without_wrapper() {
        let mut registry = ModelRegistry::new();
        registry.register(
            ModelDescriptor::new("User")
                .property("address", PropertyRule::object().with_custom("Address")),
        );
        registry.register(
            ModelDescriptor::new("Address")
                .required_property("street", PropertyRule::string()),
        );
        let storage = ModelMetadataStorage::new();

        let mapping = to_model_schema(&registry, &storage, "User").unwrap();
        assert_eq!(
            mapping_to_value(&mapping),
            json!({
                "address": {
                    "type": "Object",
                    "required": false,
                    "schema": {"street": {"type": "String", "required": true}},
                },
            })
        );
    }

    #[test]
    fn test_unknown_child_model_yields_empty_nested_schema() {
        let mut registry = ModelRegistry::new();
        registry.register(
            ModelDescriptor::new("Order")
                .property("items", PropertyRule::array().with_validated("Ghost")),
        );
        let storage = ModelMetadataStorage::new();

        let mapping = to_model_schema(&registry, &storage, "Order").unwrap();
        assert_eq!(
            mapping_to_value(&mapping)["items"]["schema"],
            json!([{"type": "Object", "schema": {}}])
        );
    }

    #[test]
    fn test_unknown_root_model_is_an_error() {
        let registry = ModelRegistry::new();
        let storage = ModelMetadataStorage::new();
        let err = to_model_schema(&registry, &storage, "Ghost").unwrap_err();
        assert!(matches!(err, ModelError::UnknownModel(_)));
    }

    #[test]
    fn test_fact_only_model_assembles_from_facts() {
        let registry = ModelRegistry::new();
        let mut storage = ModelMetadataStorage::new();
        storage.add_property(PropertyFact::add("Legacy", "key", None));

        let mapping = to_model_schema(&registry, &storage, "Legacy").unwrap();
        assert_eq!(mapping.len(), 1);
        assert!(mapping.contains_key("key"));
    }
}
