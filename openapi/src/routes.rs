#![deny(missing_docs)]

//! # Route Parsing
//!
//! Pairs every registered action with its controller, parameters and
//! response handlers, and derives the per-route response defaults.

use crate::error::{SpecError, SpecResult};
use crate::metadata::{
    ActionFact, ControllerFact, ControllerKind, ParamFact, ResponseHandlerFact,
    ResponseHandlerKind,
};
use crate::options::SpecOptions;
use crate::storage::MetadataStorage;
use serde_json::{json, Value as JsonValue};

/// All the context for a single route.
#[derive(Debug, Clone)]
pub struct Route<'a> {
    /// The registered action.
    pub action: &'a ActionFact,
    /// The owning controller; `None` when no controller was registered for
    /// the action's target, which fails generation.
    pub controller: Option<&'a ControllerFact>,
    /// Generation options.
    pub options: &'a SpecOptions,
    /// Parameters of the action, sorted by signature position.
    pub params: Vec<&'a ParamFact>,
    /// Response handlers of the action.
    pub response_handlers: Vec<&'a ResponseHandlerFact>,
}

impl<'a> Route<'a> {
    /// Returns the owning controller or the generation error naming the
    /// action.
    pub fn controller(&self) -> SpecResult<&'a ControllerFact> {
        self.controller.ok_or_else(|| {
            SpecError::MissingController(format!(
                "{}.{}",
                self.action.target, self.action.method
            ))
        })
    }
}

/// Parses registered metadata into one route per action.
pub fn parse_routes<'a>(
    storage: &'a MetadataStorage,
    options: &'a SpecOptions,
) -> Vec<Route<'a>> {
    storage
        .actions
        .iter()
        .map(|action| {
            let mut params =
                storage.filter_params_with_target_and_method(&action.target, &action.method);
            params.sort_by_key(|p| p.index);
            Route {
                action,
                controller: storage.controllers.iter().find(|c| c.target == action.target),
                options,
                params,
                response_handlers: storage
                    .filter_response_handlers_with_target_and_method(&action.target, &action.method),
            }
        })
        .collect()
}

/// Returns the response content type of a route.
pub fn get_content_type(route: &Route) -> SpecResult<String> {
    let content_meta = route
        .response_handlers
        .iter()
        .find(|h| h.kind == ResponseHandlerKind::ContentType);
    if let Some(meta) = content_meta {
        if let Some(value) = meta.value.as_str() {
            return Ok(value.to_string());
        }
    }
    let default = match route.controller()?.kind {
        ControllerKind::Json => "application/json",
        ControllerKind::Default => "text/html; charset=utf-8",
    };
    Ok(default.to_string())
}

/// Returns the success status code of a route as a string key.
pub fn get_status_code(route: &Route) -> String {
    let success_meta = route
        .response_handlers
        .iter()
        .find(|h| h.kind == ResponseHandlerKind::SuccessCode);
    match success_meta {
        Some(meta) => match &meta.value {
            JsonValue::String(s) => s.clone(),
            value => value.to_string(),
        },
        None => "200".to_string(),
    }
}

/// Returns the default responses object of a route.
pub fn get_responses(route: &Route) -> SpecResult<JsonValue> {
    let content_type = get_content_type(route)?;
    let success_status = get_status_code(route);

    Ok(json!({
        success_status: {
            "content": { content_type: {} },
            "description": "Successful response",
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn options() -> SpecOptions {
        SpecOptions::default()
    }

    #[test]
    fn test_parse_routes_pairs_controller_and_sorts_params() {
        let mut storage = MetadataStorage::new();
        storage.add_controller(ControllerFact::json("UserController", "/users"));
        storage.add_action(ActionFact::get("UserController", "find", "/:id"));
        storage.add_param(ParamFact::query("UserController", "find", 1, "verbose", None));
        storage.add_param(ParamFact::param("UserController", "find", 0, "id"));

        let opts = options();
        let routes = parse_routes(&storage, &opts);
        assert_eq!(routes.len(), 1);
        let route = &routes[0];
        assert_eq!(route.controller.unwrap().target, "UserController");
        assert_eq!(route.params[0].index, 0);
        assert_eq!(route.params[1].index, 1);
    }

    #[test]
    fn test_missing_controller_surfaces_as_error() {
        let mut storage = MetadataStorage::new();
        storage.add_action(ActionFact::get("GhostController", "list", "/"));

        let opts = options();
        let routes = parse_routes(&storage, &opts);
        assert!(routes[0].controller.is_none());
        let err = routes[0].controller().unwrap_err();
        assert!(matches!(err, SpecError::MissingController(_)));
    }

    #[test]
    fn test_json_controller_response_defaults() {
        let mut storage = MetadataStorage::new();
        storage.add_controller(ControllerFact::json("UserController", "/users"));
        storage.add_action(ActionFact::get("UserController", "list", "/"));

        let opts = options();
        let routes = parse_routes(&storage, &opts);
        assert_eq!(
            get_responses(&routes[0]).unwrap(),
            json!({"200": {
                "content": {"application/json": {}},
                "description": "Successful response",
            }})
        );
    }

    #[test]
    fn test_html_default_and_handler_overrides() {
        let mut storage = MetadataStorage::new();
        storage.add_controller(ControllerFact::new("PageController", ""));
        storage.add_action(ActionFact::get("PageController", "render", "/page"));
        storage.add_action(ActionFact::post("PageController", "create", "/page"));
        storage.add_response_handler(ResponseHandlerFact::success_code(
            "PageController",
            "create",
            201,
        ));
        storage.add_response_handler(ResponseHandlerFact::content_type(
            "PageController",
            "create",
            "application/json",
        ));

        let opts = options();
        let routes = parse_routes(&storage, &opts);

        let render = routes.iter().find(|r| r.action.method == "render").unwrap();
        assert_eq!(
            get_content_type(render).unwrap(),
            "text/html; charset=utf-8"
        );
        assert_eq!(get_status_code(render), "200");

        let create = routes.iter().find(|r| r.action.method == "create").unwrap();
        assert_eq!(get_content_type(create).unwrap(), "application/json");
        assert_eq!(get_status_code(create), "201");
    }
}
