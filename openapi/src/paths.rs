#![deny(missing_docs)]

//! # Route Template Tokenization
//!
//! Parses colon-style route templates (`/users/:id`, optionally with an
//! inline pattern `/users/:id(\d+)`) and converts them to OpenAPI
//! curly-brace paths.

use regex::Regex;
use std::sync::OnceLock;

/// The implicit pattern of a parameter token; never emitted on schemas.
pub const DEFAULT_PARAM_PATTERN: &str = "[^\\/]+?";

/// A parameter token in a route template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathParamToken {
    /// Parameter name.
    pub name: String,
    /// Inline pattern, if one was written.
    pub pattern: Option<String>,
}

impl PathParamToken {
    /// True when the token carries a pattern other than the implicit one.
    pub fn has_custom_pattern(&self) -> bool {
        match &self.pattern {
            Some(pattern) => pattern != DEFAULT_PARAM_PATTERN,
            None => false,
        }
    }
}

/// One token of a parsed route template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathToken {
    /// A plain string segment, including its leading delimiter.
    Literal(String),
    /// A named parameter.
    Param(PathParamToken),
}

fn param_re() -> &'static Regex {
    static PARAM_RE: OnceLock<Regex> = OnceLock::new();
    PARAM_RE.get_or_init(|| {
        Regex::new(r":([A-Za-z_][A-Za-z0-9_]*)(?:\(([^)]*)\))?").expect("Invalid regex constant")
    })
}

/// Parses a route template into literal and parameter tokens.
pub fn parse_path_tokens(path: &str) -> Vec<PathToken> {
    let mut tokens = Vec::new();
    let mut cursor = 0;

    for caps in param_re().captures_iter(path) {
        let whole = caps.get(0).expect("capture group 0 always present");
        if whole.start() > cursor {
            tokens.push(PathToken::Literal(path[cursor..whole.start()].to_string()));
        }
        tokens.push(PathToken::Param(PathParamToken {
            name: caps[1].to_string(),
            pattern: caps.get(2).map(|m| m.as_str().to_string()),
        }));
        cursor = whole.end();
    }
    if cursor < path.len() {
        tokens.push(PathToken::Literal(path[cursor..].to_string()));
    }

    tokens
}

/// Returns only the parameter tokens of a route template.
pub fn parse_path_params(path: &str) -> Vec<PathParamToken> {
    parse_path_tokens(path)
        .into_iter()
        .filter_map(|token| match token {
            PathToken::Param(param) => Some(param),
            PathToken::Literal(_) => None,
        })
        .collect()
}

/// Converts a colon-style route template into an OpenAPI path.
pub fn express_to_openapi_path(path: &str) -> String {
    parse_path_tokens(path)
        .iter()
        .map(|token| match token {
            PathToken::Literal(lit) => lit.clone(),
            PathToken::Param(param) => format!("{{{}}}", param.name),
        })
        .collect()
}
