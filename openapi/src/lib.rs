#![deny(missing_docs)]

//! # annogen-openapi
//!
//! Converts registered controller/action/parameter/response-handler metadata
//! into an OpenAPI 3.0 document.
//!
//! Registration populates an explicit [`MetadataStorage`] (and optionally an
//! [`OverrideStorage`] for free-form operation fragments); [`generate_spec`]
//! assembles the final document. All operations are pure, synchronous and
//! executed at startup time.

/// Shared error types.
pub mod error;

/// Route facts and their constructors.
pub mod metadata;

/// Fact storage.
pub mod storage;

/// Generation options.
pub mod options;

/// Deep structural merge.
pub mod merge;

/// Route template tokenization.
pub mod paths;

/// Route parsing and response defaults.
pub mod routes;

/// Operation override fragments.
pub mod overrides;

/// Spec assembly.
pub mod spec_generator;

/// Schema deduplication.
pub mod dedup;

pub use dedup::optimize_schemas;
pub use error::{SpecError, SpecResult};
pub use merge::{deep_merge, deep_merge_all, merged};
pub use metadata::{
    ActionFact, ControllerFact, ControllerKind, DeclaredType, HttpVerb, ParamFact, ParamKind,
    ParamOptions, ResponseHandlerFact, ResponseHandlerKind,
};
pub use options::{SpecDefaults, SpecOptions};
pub use overrides::{
    apply_operation_overrides, OperationFragment, OperationTransform, OverrideFact,
    OverrideStorage, ResponseSchemaOptions,
};
pub use paths::{express_to_openapi_path, parse_path_params, parse_path_tokens, PathParamToken,
    PathToken};
pub use routes::{get_content_type, get_responses, get_status_code, parse_routes, Route};
pub use spec_generator::{
    generate_spec, get_full_express_path, get_full_path, get_header_params, get_operation,
    get_operation_id, get_param_schema, get_path_params, get_paths, get_query_params,
    get_request_body, get_spec, get_summary, get_tags, is_required, spec_to_yaml, REF_PREFIX,
};
pub use storage::MetadataStorage;
