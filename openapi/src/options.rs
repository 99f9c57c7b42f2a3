//! # Generation Options
//!
//! Options accepted by the spec-generation entry points.

use serde::{Deserialize, Serialize};

/// Global defaults applied when a route does not override them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpecDefaults {
    /// Default operation summary.
    pub summary: Option<String>,
    /// Default required flag for parameters. When set, a parameter is
    /// required unless its fact explicitly opts out.
    pub param_required: Option<bool>,
}

/// Options for spec generation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpecOptions {
    /// Prefix prepended to every route path.
    pub route_prefix: Option<String>,
    /// Qualify operation ids with the controller name
    /// (`UserController.getAll` instead of `getAll`).
    pub operation_id_with_controller: bool,
    /// Global defaults.
    pub defaults: SpecDefaults,
}
