//! # Error Handling
//!
//! Provides the unified `ModelError` enum used across the crate.

use derive_more::{Display, From};

/// The model-schema generation error enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum ModelError {
    /// The requested root model has no registered descriptor.
    #[from(ignore)]
    #[display("Unknown model: {_0}")]
    UnknownModel(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for ModelError {}

/// Helper type alias for Result using ModelError.
pub type ModelResult<T> = Result<T, ModelError>;
