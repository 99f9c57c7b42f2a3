#![deny(missing_docs)]

//! # Route Fact Metadata
//!
//! Fact records registered for controllers, actions, parameters and response
//! handlers, together with the constructor family that mirrors the
//! registration surface. Constructor defaults (required/parse flags) follow
//! the registration call they model; note the asymmetry between
//! [`ParamFact::session`] (required by default) and
//! [`ParamFact::session_param`] (optional by default).

use serde_json::Value as JsonValue;

/// The kind of a registered controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerKind {
    /// Plain controller; default responses are rendered HTML.
    Default,
    /// JSON controller; default responses are serialized JSON.
    Json,
}

/// The HTTP verb of a registered action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HttpVerb {
    /// GET requests.
    Get,
    /// POST requests.
    Post,
    /// PUT requests.
    Put,
    /// PATCH requests.
    Patch,
    /// DELETE requests.
    Delete,
    /// HEAD requests.
    Head,
    /// Any verb.
    All,
    /// A custom verb, stored lowercase.
    Custom(String),
}

impl HttpVerb {
    /// The lowercase verb used as the path-item key.
    pub fn as_str(&self) -> &str {
        match self {
            HttpVerb::Get => "get",
            HttpVerb::Post => "post",
            HttpVerb::Put => "put",
            HttpVerb::Patch => "patch",
            HttpVerb::Delete => "delete",
            HttpVerb::Head => "head",
            HttpVerb::All => "all",
            HttpVerb::Custom(verb) => verb,
        }
    }
}

/// The kind of a registered action parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// The whole request body.
    Body,
    /// One named property of the request body.
    BodyParam,
    /// One named query parameter.
    Query,
    /// All query parameters, spread from a named schema.
    Queries,
    /// One named path parameter.
    Param,
    /// All path parameters.
    Params,
    /// One named request header.
    Header,
    /// All request headers.
    Headers,
    /// One named cookie.
    Cookie,
    /// All cookies.
    Cookies,
    /// The session object.
    Session,
    /// One named session property.
    SessionParam,
    /// One uploaded file.
    File,
    /// All uploaded files.
    Files,
    /// The raw request object.
    Request,
    /// The raw response object.
    Response,
    /// The framework context object.
    Context,
    /// The authorized user.
    CurrentUser,
}

/// The declared native type of a parameter.
///
/// This is the statically recorded replacement for platform type reflection;
/// registration sites declare the type alongside the fact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclaredType {
    /// Text.
    Str,
    /// Numeric.
    Number,
    /// Boolean.
    Boolean,
    /// An untyped object.
    Object,
    /// An array; element type comes from the explicit type, if any.
    Array,
    /// A named schema type.
    Named(String),
}

/// A registered controller fact.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerFact {
    /// Name of the controller type.
    pub target: String,
    /// Controller kind.
    pub kind: ControllerKind,
    /// Base route prepended to every action route.
    pub route: String,
    /// Extra registration options, passed through untouched.
    pub options: Option<JsonValue>,
}

impl ControllerFact {
    /// A plain controller.
    pub fn new(target: &str, route: &str) -> Self {
        Self {
            target: target.to_string(),
            kind: ControllerKind::Default,
            route: route.to_string(),
            options: None,
        }
    }

    /// A JSON controller.
    pub fn json(target: &str, route: &str) -> Self {
        Self {
            kind: ControllerKind::Json,
            ..Self::new(target, route)
        }
    }
}

/// A registered action fact.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionFact {
    /// Name of the owning controller type.
    pub target: String,
    /// Handler method name; doubles as the default operation id.
    pub method: String,
    /// HTTP verb.
    pub verb: HttpVerb,
    /// Route pattern appended to the controller base route.
    pub route: String,
    /// Extra registration options, passed through untouched.
    pub options: Option<JsonValue>,
}

impl ActionFact {
    fn with_verb(target: &str, method: &str, verb: HttpVerb, route: &str) -> Self {
        Self {
            target: target.to_string(),
            method: method.to_string(),
            verb,
            route: route.to_string(),
            options: None,
        }
    }

    /// A GET action.
    pub fn get(target: &str, method: &str, route: &str) -> Self {
        Self::with_verb(target, method, HttpVerb::Get, route)
    }

    /// A POST action.
    pub fn post(target: &str, method: &str, route: &str) -> Self {
        Self::with_verb(target, method, HttpVerb::Post, route)
    }

    /// A PUT action.
    pub fn put(target: &str, method: &str, route: &str) -> Self {
        Self::with_verb(target, method, HttpVerb::Put, route)
    }

    /// A PATCH action.
    pub fn patch(target: &str, method: &str, route: &str) -> Self {
        Self::with_verb(target, method, HttpVerb::Patch, route)
    }

    /// A DELETE action.
    pub fn delete(target: &str, method: &str, route: &str) -> Self {
        Self::with_verb(target, method, HttpVerb::Delete, route)
    }

    /// A HEAD action.
    pub fn head(target: &str, method: &str, route: &str) -> Self {
        Self::with_verb(target, method, HttpVerb::Head, route)
    }

    /// An action answering any verb.
    pub fn all(target: &str, method: &str, route: &str) -> Self {
        Self::with_verb(target, method, HttpVerb::All, route)
    }

    /// An action with a custom verb.
    pub fn custom(target: &str, method: &str, verb: &str, route: &str) -> Self {
        Self::with_verb(
            target,
            method,
            HttpVerb::Custom(verb.to_lowercase()),
            route,
        )
    }
}

/// Options accepted by parameter registration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParamOptions {
    /// Explicit required flag.
    pub required: Option<bool>,
    /// Whether the raw value is parsed before injection.
    pub parse: Option<bool>,
    /// Explicit schema-type override; always wins over the declared type.
    pub explicit_type: Option<String>,
    /// Marks a query parameter as array-valued.
    pub is_array: Option<bool>,
}

impl ParamOptions {
    /// Options carrying only a required flag.
    pub fn required(required: bool) -> Self {
        Self {
            required: Some(required),
            ..Default::default()
        }
    }

    /// Options carrying only an explicit type override.
    pub fn typed(explicit_type: &str) -> Self {
        Self {
            explicit_type: Some(explicit_type.to_string()),
            ..Default::default()
        }
    }
}

/// A registered parameter fact.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamFact {
    /// Name of the owning controller type.
    pub target: String,
    /// Handler method name.
    pub method: String,
    /// Position of the parameter in the handler signature.
    pub index: usize,
    /// Parameter kind.
    pub kind: ParamKind,
    /// Parameter name, where the kind carries one.
    pub name: Option<String>,
    /// Explicit required flag; `None` defers to the global default.
    pub required: Option<bool>,
    /// Whether the raw value is parsed before injection.
    pub parse: bool,
    /// Explicit schema-type override.
    pub explicit_type: Option<String>,
    /// Statically declared native type.
    pub declared_type: Option<DeclaredType>,
    /// Marks a query parameter as array-valued.
    pub is_array: bool,
}

impl ParamFact {
    fn base(target: &str, method: &str, index: usize, kind: ParamKind) -> Self {
        Self {
            target: target.to_string(),
            method: method.to_string(),
            index,
            kind,
            name: None,
            required: None,
            parse: false,
            explicit_type: None,
            declared_type: None,
            is_array: false,
        }
    }

    fn with_options(mut self, options: Option<ParamOptions>) -> Self {
        if let Some(options) = options {
            if options.required.is_some() {
                self.required = options.required;
            }
            if let Some(parse) = options.parse {
                self.parse = parse;
            }
            if let Some(explicit_type) = options.explicit_type {
                self.explicit_type = Some(explicit_type);
            }
            if let Some(is_array) = options.is_array {
                self.is_array = is_array;
            }
        }
        self
    }

    /// Attaches the declared native type.
    pub fn declared(mut self, declared_type: DeclaredType) -> Self {
        self.declared_type = Some(declared_type);
        self
    }

    /// The whole request body.
    pub fn body(target: &str, method: &str, index: usize, options: Option<ParamOptions>) -> Self {
        Self::base(target, method, index, ParamKind::Body).with_options(options)
    }

    /// One named property of the request body.
    pub fn body_param(
        target: &str,
        method: &str,
        index: usize,
        name: &str,
        options: Option<ParamOptions>,
    ) -> Self {
        let mut fact = Self::base(target, method, index, ParamKind::BodyParam).with_options(options);
        fact.name = Some(name.to_string());
        fact
    }

    /// One named query parameter.
    pub fn query(
        target: &str,
        method: &str,
        index: usize,
        name: &str,
        options: Option<ParamOptions>,
    ) -> Self {
        let mut fact = Self::base(target, method, index, ParamKind::Query).with_options(options);
        fact.name = Some(name.to_string());
        fact
    }

    /// All query parameters, spread from a named schema.
    pub fn queries(
        target: &str,
        method: &str,
        index: usize,
        options: Option<ParamOptions>,
    ) -> Self {
        let mut fact = Self::base(target, method, index, ParamKind::Queries).with_options(options);
        fact.name = Some(String::new());
        fact
    }

    /// One named path parameter; required by default.
    pub fn param(target: &str, method: &str, index: usize, name: &str) -> Self {
        let mut fact = Self::base(target, method, index, ParamKind::Param);
        fact.name = Some(name.to_string());
        fact.required = Some(true);
        fact
    }

    /// All path parameters.
    pub fn params(target: &str, method: &str, index: usize, options: Option<ParamOptions>) -> Self {
        Self::base(target, method, index, ParamKind::Params).with_options(options)
    }

    /// One named request header.
    pub fn header(
        target: &str,
        method: &str,
        index: usize,
        name: &str,
        options: Option<ParamOptions>,
    ) -> Self {
        let mut fact = Self::base(target, method, index, ParamKind::Header).with_options(options);
        fact.name = Some(name.to_string());
        fact
    }

    /// All request headers.
    pub fn headers(target: &str, method: &str, index: usize) -> Self {
        Self::base(target, method, index, ParamKind::Headers)
    }

    /// One named cookie.
    pub fn cookie(
        target: &str,
        method: &str,
        index: usize,
        name: &str,
        options: Option<ParamOptions>,
    ) -> Self {
        let mut fact = Self::base(target, method, index, ParamKind::Cookie).with_options(options);
        fact.name = Some(name.to_string());
        fact
    }

    /// All cookies.
    pub fn cookies(target: &str, method: &str, index: usize) -> Self {
        Self::base(target, method, index, ParamKind::Cookies)
    }

    /// The session object; required unless explicitly opted out.
    pub fn session(target: &str, method: &str, index: usize, options: Option<ParamOptions>) -> Self {
        let mut fact = Self::base(target, method, index, ParamKind::Session);
        fact.required = Some(options.and_then(|o| o.required).unwrap_or(true));
        fact
    }

    /// One named session property; optional by default.
    pub fn session_param(
        target: &str,
        method: &str,
        index: usize,
        name: &str,
        options: Option<ParamOptions>,
    ) -> Self {
        let mut fact =
            Self::base(target, method, index, ParamKind::SessionParam).with_options(options);
        fact.name = Some(name.to_string());
        fact
    }

    /// One uploaded file.
    pub fn file(
        target: &str,
        method: &str,
        index: usize,
        name: &str,
        options: Option<ParamOptions>,
    ) -> Self {
        let mut fact = Self::base(target, method, index, ParamKind::File).with_options(options);
        fact.name = Some(name.to_string());
        fact
    }

    /// All uploaded files.
    pub fn files(
        target: &str,
        method: &str,
        index: usize,
        name: &str,
        options: Option<ParamOptions>,
    ) -> Self {
        let mut fact = Self::base(target, method, index, ParamKind::Files).with_options(options);
        fact.name = Some(name.to_string());
        fact
    }

    /// The raw request object.
    pub fn request(target: &str, method: &str, index: usize) -> Self {
        Self::base(target, method, index, ParamKind::Request)
    }

    /// The raw response object.
    pub fn response(target: &str, method: &str, index: usize) -> Self {
        Self::base(target, method, index, ParamKind::Response)
    }

    /// The framework context object.
    pub fn context(target: &str, method: &str, index: usize) -> Self {
        Self::base(target, method, index, ParamKind::Context)
    }

    /// The authorized user.
    pub fn current_user(
        target: &str,
        method: &str,
        index: usize,
        options: Option<ParamOptions>,
    ) -> Self {
        Self::base(target, method, index, ParamKind::CurrentUser).with_options(options)
    }
}

/// The kind of a registered response handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseHandlerKind {
    /// Sets the response content type.
    ContentType,
    /// Sets a response header.
    Header,
    /// Sets the success status code.
    SuccessCode,
    /// Sets a redirect target.
    Redirect,
    /// Sets the Location header.
    Location,
    /// Serialization options applied to the response body.
    ResponseClassTransformOptions,
}

/// A registered response handler fact.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseHandlerFact {
    /// Name of the owning controller type.
    pub target: String,
    /// Handler method name; `None` means controller-wide.
    pub method: Option<String>,
    /// Handler kind.
    pub kind: ResponseHandlerKind,
    /// Primary value (status code, content type, header name, URL, ...).
    pub value: JsonValue,
    /// Secondary value (header value).
    pub secondary_value: Option<JsonValue>,
}

impl ResponseHandlerFact {
    fn new(target: &str, method: &str, kind: ResponseHandlerKind, value: JsonValue) -> Self {
        Self {
            target: target.to_string(),
            method: Some(method.to_string()),
            kind,
            value,
            secondary_value: None,
        }
    }

    /// Sets the response content type of an action.
    pub fn content_type(target: &str, method: &str, content_type: &str) -> Self {
        Self::new(
            target,
            method,
            ResponseHandlerKind::ContentType,
            JsonValue::String(content_type.to_string()),
        )
    }

    /// Sets a response header of an action.
    pub fn header(target: &str, method: &str, name: &str, value: &str) -> Self {
        let mut fact = Self::new(
            target,
            method,
            ResponseHandlerKind::Header,
            JsonValue::String(name.to_string()),
        );
        fact.secondary_value = Some(JsonValue::String(value.to_string()));
        fact
    }

    /// Sets the success status code of an action.
    pub fn success_code(target: &str, method: &str, code: u16) -> Self {
        Self::new(
            target,
            method,
            ResponseHandlerKind::SuccessCode,
            JsonValue::from(code),
        )
    }

    /// Sets a redirect target on an action.
    pub fn redirect(target: &str, method: &str, url: &str) -> Self {
        Self::new(
            target,
            method,
            ResponseHandlerKind::Redirect,
            JsonValue::String(url.to_string()),
        )
    }

    /// Sets the Location header of an action.
    pub fn location(target: &str, method: &str, url: &str) -> Self {
        Self::new(
            target,
            method,
            ResponseHandlerKind::Location,
            JsonValue::String(url.to_string()),
        )
    }

    /// Serialization options for the response body of an action.
    pub fn response_class_transform_options(
        target: &str,
        method: &str,
        options: JsonValue,
    ) -> Self {
        Self::new(
            target,
            method,
            ResponseHandlerKind::ResponseClassTransformOptions,
            options,
        )
    }
}
