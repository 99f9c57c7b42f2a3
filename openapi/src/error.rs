//! # Error Handling
//!
//! Provides the unified `SpecError` enum used across the crate.

use derive_more::{Display, From};

/// The spec-generation error enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum SpecError {
    /// An action has no registered controller; generation cannot proceed.
    #[from(ignore)]
    #[display("No controller registered for action: {_0}")]
    MissingController(String),

    /// A spread-query parameter does not reference a named schema.
    #[from(ignore)]
    #[display("Spread query parameter on {_0} does not reference a named schema")]
    UnresolvedQueriesSchema(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for SpecError {}

/// Helper type alias for Result using SpecError.
pub type SpecResult<T> = Result<T, SpecError>;
