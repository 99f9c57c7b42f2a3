use annogen_openapi::{
    generate_spec, optimize_schemas, spec_to_yaml, ActionFact, ControllerFact, DeclaredType,
    MetadataStorage, OverrideFact, OverrideStorage, ParamFact, ResponseHandlerFact,
    ResponseSchemaOptions, SpecOptions, REF_PREFIX,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn user_storage() -> MetadataStorage {
    let mut storage = MetadataStorage::new();
    storage.add_controller(ControllerFact::json("UserController", "/users"));

    storage.add_action(ActionFact::get("UserController", "getAll", ""));
    storage.add_param(
        ParamFact::query("UserController", "getAll", 0, "page", None)
            .declared(DeclaredType::Number),
    );

    storage.add_action(ActionFact::get("UserController", "getOne", "/:id(\\d+)"));
    storage.add_param(
        ParamFact::param("UserController", "getOne", 0, "id").declared(DeclaredType::Number),
    );

    storage.add_action(ActionFact::post("UserController", "createUser", ""));
    storage.add_param(
        ParamFact::body("UserController", "createUser", 0, None)
            .declared(DeclaredType::Named("CreateUserBody".into())),
    );
    storage.add_response_handler(ResponseHandlerFact::success_code(
        "UserController",
        "createUser",
        201,
    ));

    storage
}

#[test]
fn test_generate_spec_full_document() {
    let storage = user_storage();

    let mut overrides = OverrideStorage::new();
    overrides.add(OverrideFact::response_schema(
        "UserController",
        "createUser",
        "User",
        ResponseSchemaOptions::default(),
    ));

    let additional = json!({
        "components": { "schemas": {
            "CreateUserBody": {
                "properties": { "name": { "type": "string" } },
                "required": ["name"],
                "type": "object",
            },
            "User": {
                "properties": { "id": { "type": "string" } },
                "type": "object",
            },
        }},
        "info": { "title": "Users API", "version": "2.0.0" },
    });

    let spec = generate_spec(&storage, &overrides, &SpecOptions::default(), &additional).unwrap();

    let expected = json!({
        "components": { "schemas": {
            "CreateUserBody": {
                "properties": { "name": { "type": "string" } },
                "required": ["name"],
                "type": "object",
            },
            "User": {
                "properties": { "id": { "type": "string" } },
                "type": "object",
            },
        }},
        "info": { "title": "Users API", "version": "2.0.0" },
        "openapi": "3.0.0",
        "paths": {
            "/users": {
                "get": {
                    "operationId": "getAll",
                    "parameters": [{
                        "in": "query",
                        "name": "page",
                        "required": false,
                        "schema": { "type": "number" },
                    }],
                    "responses": { "200": {
                        "content": { "application/json": {} },
                        "description": "Successful response",
                    }},
                    "summary": "Get All",
                    "tags": ["User"],
                },
                "post": {
                    "operationId": "createUser",
                    "requestBody": {
                        "content": { "application/json": { "schema": {
                            "$ref": "#/components/schemas/CreateUserBody",
                        }}},
                        "description": "CreateUserBody",
                        "required": false,
                    },
                    "responses": { "201": {
                        "content": { "application/json": { "schema": {
                            "$ref": "#/components/schemas/User",
                        }}},
                        "description": "",
                    }},
                    "summary": "Create User",
                    "tags": ["User"],
                },
            },
            "/users/{id}": {
                "get": {
                    "operationId": "getOne",
                    "parameters": [{
                        "in": "path",
                        "name": "id",
                        "required": true,
                        "schema": { "pattern": "\\d+", "type": "number" },
                    }],
                    "responses": { "200": {
                        "content": { "application/json": {} },
                        "description": "Successful response",
                    }},
                    "summary": "Get One",
                    "tags": ["User"],
                },
            },
        },
    });

    assert_eq!(spec, expected);
}

#[test]
fn test_generate_spec_spreads_queries_from_schema_pool() {
    let mut storage = MetadataStorage::new();
    storage.add_controller(ControllerFact::json("SearchController", "/search"));
    storage.add_action(ActionFact::get("SearchController", "run", ""));
    storage.add_param(
        ParamFact::queries("SearchController", "run", 0, None)
            .declared(DeclaredType::Named("SearchQuery".into())),
    );

    let additional = json!({
        "components": { "schemas": {
            "SearchQuery": {
                "properties": {
                    "term": { "type": "string" },
                    "limit": { "type": "number" },
                },
                "required": ["term"],
                "type": "object",
            },
        }},
    });

    let spec = generate_spec(
        &storage,
        &OverrideStorage::new(),
        &SpecOptions::default(),
        &additional,
    )
    .unwrap();

    assert_eq!(
        spec["paths"]["/search"]["get"]["parameters"],
        json!([
            {
                "in": "query",
                "name": "term",
                "required": true,
                "schema": { "type": "string" },
            },
            {
                "in": "query",
                "name": "limit",
                "required": false,
                "schema": { "type": "number" },
            },
        ])
    );
}

#[test]
fn test_class_wide_override_applies_to_every_action() {
    let storage = user_storage();

    let mut overrides = OverrideStorage::new();
    overrides.add(OverrideFact::document(
        "UserController",
        None,
        json!({ "security": [{ "bearerAuth": [] }] }),
    ));

    let spec = generate_spec(
        &storage,
        &overrides,
        &SpecOptions::default(),
        &json!({}),
    )
    .unwrap();

    for verb_ops in spec["paths"].as_object().unwrap().values() {
        for operation in verb_ops.as_object().unwrap().values() {
            assert_eq!(operation["security"], json!([{ "bearerAuth": [] }]));
        }
    }
}

#[test]
fn test_optimized_pool_feeds_generated_document() {
    let pool = json!({
        "User": {
            "properties": { "pet": { "$ref": "#/components/schemas/Pet" } },
            "type": "object",
        },
        "Pet": { "type": "object" },
        "Unused": { "type": "object" },
    });
    let listed = json!({ "User": true });

    let optimized = optimize_schemas(
        listed.as_object().unwrap(),
        pool.as_object().unwrap(),
        REF_PREFIX,
    );
    assert_eq!(optimized.len(), 2);

    let mut storage = MetadataStorage::new();
    storage.add_controller(ControllerFact::json("UserController", "/users"));
    storage.add_action(ActionFact::get("UserController", "getAll", ""));

    let additional = json!({ "components": { "schemas": optimized } });
    let spec = generate_spec(
        &storage,
        &OverrideStorage::new(),
        &SpecOptions::default(),
        &additional,
    )
    .unwrap();

    let schemas = spec["components"]["schemas"].as_object().unwrap();
    assert!(schemas.contains_key("User"));
    assert!(schemas.contains_key("Pet"));
    assert!(!schemas.contains_key("Unused"));
}

#[test]
fn test_spec_renders_to_yaml() {
    let storage = user_storage();
    let spec = generate_spec(
        &storage,
        &OverrideStorage::new(),
        &SpecOptions::default(),
        &json!({}),
    )
    .unwrap();

    let yaml = spec_to_yaml(&spec).unwrap();
    assert!(yaml.contains("openapi: 3.0.0"));
    assert!(yaml.contains("/users/{id}"));
    assert!(yaml.contains("operationId: getAll"));
}
