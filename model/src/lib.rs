#![deny(missing_docs)]

//! # annogen-model
//!
//! Converts registered model metadata (declared field rules plus manual
//! property facts) into nested document-store schema definitions.
//!
//! Registration populates explicit stores; [`to_model_schema`] assembles the
//! final field mapping. All operations are pure, synchronous and executed at
//! startup time.

/// Shared error types.
pub mod error;

/// Property facts and their storage.
pub mod metadata;

/// Statically declared model descriptors.
pub mod registry;

/// Assembled field mappings and their JSON rendition.
pub mod schema;

/// Schema assembly.
pub mod generator;

pub use error::{ModelError, ModelResult};
pub use generator::to_model_schema;
pub use metadata::{
    DefaultValue, GetterHook, IndexDefinition, IndexOption, ModelMetadataStorage, Projection,
    PropertyFact, PropertyFactKind, PropertyOptions, SetterHook, Throughput, Validator,
};
pub use registry::{
    ModelDescriptor, ModelRegistry, NestedKind, NestedRule, PropertyFormat, PropertyRule,
    PropertyShape,
};
pub use schema::{mapping_to_value, FieldDefinition, FieldMapping, FieldType, NestedSchema};
