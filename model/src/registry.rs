#![deny(missing_docs)]

//! # Model Registry
//!
//! Statically declared model descriptors. The registry is the explicit
//! replacement for runtime type introspection: every field carries its
//! declared shape, format and composite targets, recorded once at
//! registration time.

use indexmap::IndexMap;

/// The declared shape of a model field, mirroring the validation-rule layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyShape {
    /// Text field.
    Str,
    /// Floating point field.
    Number,
    /// Integer field.
    Integer,
    /// Boolean field.
    Boolean,
    /// Array field; element resolution consults the composite targets.
    Array,
    /// Object field; nested resolution consults the composite targets.
    Object,
    /// A bare reference to another named model (no inline shape).
    Reference(String),
}

/// Additional format information carried by a declared shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyFormat {
    /// A datetime-formatted text field, mapped to the `Date` semantic type.
    DateTime,
}

/// How a nested target was declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NestedKind {
    /// Declared through nested-validation rules; consulted for array elements.
    Validated,
    /// Declared through a custom validator naming a target model; consulted
    /// for object-typed fields.
    Custom,
}

/// A nested composite target on a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NestedRule {
    /// Name of the target model.
    pub target: String,
    /// Declaration channel.
    pub kind: NestedKind,
}

/// The declared rule set for one model field.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyRule {
    /// Declared shape.
    pub shape: PropertyShape,
    /// Optional declared format.
    pub format: Option<PropertyFormat>,
    /// Nested composite target, if any.
    pub nested: Option<NestedRule>,
    /// Explicit element-type declaration; highest priority for array elements.
    pub element: Option<String>,
    /// Declared native type; last resort for array elements.
    pub declared: Option<String>,
}

impl PropertyRule {
    fn new(shape: PropertyShape) -> Self {
        Self {
            shape,
            format: None,
            nested: None,
            element: None,
            declared: None,
        }
    }

    /// A text field.
    pub fn string() -> Self {
        Self::new(PropertyShape::Str)
    }

    /// A datetime-formatted text field.
    pub fn datetime() -> Self {
        let mut rule = Self::new(PropertyShape::Str);
        rule.format = Some(PropertyFormat::DateTime);
        rule
    }

    /// A floating point field.
    pub fn number() -> Self {
        Self::new(PropertyShape::Number)
    }

    /// An integer field.
    pub fn integer() -> Self {
        Self::new(PropertyShape::Integer)
    }

    /// A boolean field.
    pub fn boolean() -> Self {
        Self::new(PropertyShape::Boolean)
    }

    /// An array field.
    pub fn array() -> Self {
        Self::new(PropertyShape::Array)
    }

    /// An object field.
    pub fn object() -> Self {
        Self::new(PropertyShape::Object)
    }

    /// A bare reference to another named model.
    pub fn reference(target: &str) -> Self {
        Self::new(PropertyShape::Reference(target.to_string()))
    }

    /// Attaches a nested-validation target (array elements).
    pub fn with_validated(mut self, target: &str) -> Self {
        self.nested = Some(NestedRule {
            target: target.to_string(),
            kind: NestedKind::Validated,
        });
        self
    }

    /// Attaches a custom-validator target (object fields).
    pub fn with_custom(mut self, target: &str) -> Self {
        self.nested = Some(NestedRule {
            target: target.to_string(),
            kind: NestedKind::Custom,
        });
        self
    }

    /// Attaches an explicit element-type declaration.
    pub fn with_element(mut self, target: &str) -> Self {
        self.element = Some(target.to_string());
        self
    }

    /// Attaches the declared native type.
    pub fn with_declared(mut self, target: &str) -> Self {
        self.declared = Some(target.to_string());
        self
    }
}

/// A statically declared model: ordered field rules plus the required set.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelDescriptor {
    /// Model name; keys the registry and nested references.
    pub name: String,
    /// Field rules in declaration order.
    pub properties: IndexMap<String, PropertyRule>,
    /// Names of required fields.
    pub required: Vec<String>,
}

impl ModelDescriptor {
    /// Creates an empty descriptor.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            properties: IndexMap::new(),
            required: Vec::new(),
        }
    }

    /// Declares an optional field.
    pub fn property(mut self, name: &str, rule: PropertyRule) -> Self {
        self.properties.insert(name.to_string(), rule);
        self
    }

    /// Declares a required field.
    pub fn required_property(mut self, name: &str, rule: PropertyRule) -> Self {
        self.properties.insert(name.to_string(), rule);
        self.required.push(name.to_string());
        self
    }
}

/// Registry of model descriptors with an explicit lifecycle.
#[derive(Debug, Default)]
pub struct ModelRegistry {
    models: IndexMap<String, ModelDescriptor>,
}

impl ModelRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a descriptor, replacing any previous one with the same name.
    pub fn register(&mut self, descriptor: ModelDescriptor) {
        self.models.insert(descriptor.name.clone(), descriptor);
    }

    /// Returns a registered descriptor by name.
    pub fn get(&self, name: &str) -> Option<&ModelDescriptor> {
        self.models.get(name)
    }

    /// Removes all registered descriptors.
    pub fn reset(&mut self) {
        self.models.clear();
    }
}
