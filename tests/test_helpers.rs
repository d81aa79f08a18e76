#![allow(dead_code)]

use apitree_cli::routes::{self, Resolution, ResolvedCall, RouteNode};
use apitree_cli::schema::SchemaModel;
use serde_json::{json, Value};

/// Initialize the rustls crypto provider before any tests run.
/// This runs once per test binary when `test_helpers` is included.
#[ctor::ctor]
fn init_crypto_provider() {
    apitree_cli::transport::install_crypto_provider();
}

/// Schema of `/hosting/privateDatabase`, trimmed to what the tests exercise.
#[must_use]
pub fn private_database_document() -> Value {
    json!({
        "resourcePath": "/hosting/privateDatabase",
        "apis": [
            {
                "path": "/hosting/privateDatabase",
                "description": "List available services",
                "operations": [
                    {"httpMethod": "GET", "parameters": [], "description": "List available services"}
                ]
            },
            {
                "path": "/hosting/privateDatabase/{serviceName}",
                "description": "Private database",
                "operations": [
                    {
                        "httpMethod": "GET",
                        "description": "Get this object properties",
                        "parameters": [
                            {"name": "serviceName", "paramType": "path", "dataType": "string", "required": true}
                        ]
                    },
                    {
                        "httpMethod": "PUT",
                        "description": "Alter this object properties",
                        "parameters": [
                            {"name": "serviceName", "paramType": "path", "dataType": "string", "required": true},
                            {"name": null, "paramType": "body", "dataType": "hosting.PrivateDatabase.Service", "required": true}
                        ]
                    }
                ]
            },
            {
                "path": "/hosting/privateDatabase/{serviceName}/user",
                "description": "Users of the database",
                "operations": [
                    {
                        "httpMethod": "GET",
                        "parameters": [
                            {"name": "serviceName", "paramType": "path", "dataType": "string", "required": true}
                        ]
                    },
                    {
                        "httpMethod": "POST",
                        "description": "Create a new user",
                        "parameters": [
                            {"name": "serviceName", "paramType": "path", "dataType": "string", "required": true},
                            {"name": "userName", "paramType": "body", "dataType": "string", "required": true},
                            {"name": "password", "paramType": "body", "dataType": "password", "required": true}
                        ]
                    }
                ]
            },
            {
                "path": "/hosting/privateDatabase/{serviceName}/user/{userName}",
                "description": "User",
                "operations": [
                    {
                        "httpMethod": "DELETE",
                        "description": "Delete a user",
                        "parameters": [
                            {"name": "serviceName", "paramType": "path", "dataType": "string", "required": true},
                            {"name": "userName", "paramType": "path", "dataType": "string", "required": true}
                        ]
                    }
                ]
            },
            {
                "path": "/hosting/privateDatabase/{serviceName}/dump",
                "description": "Dumps of the database",
                "operations": [
                    {
                        "httpMethod": "GET",
                        "parameters": [
                            {"name": "serviceName", "paramType": "path", "dataType": "string", "required": true},
                            {"name": "state", "paramType": "query", "dataType": "hosting.PrivateDatabase.DumpState", "required": false},
                            {"name": "tags", "paramType": "query", "dataType": "string[]", "required": false},
                            {"name": "count", "paramType": "query", "dataType": "long", "required": false},
                            {"name": "ratio", "paramType": "query", "dataType": "double", "required": false},
                            {"name": "verbose", "paramType": "query", "dataType": "boolean", "required": false},
                            {"name": "comment", "paramType": "query", "dataType": "string", "required": false, "canBeNull": true}
                        ]
                    }
                ]
            },
            {
                "path": "/hosting/privateDatabase/{serviceName}/quota",
                "description": "Quota",
                "operations": []
            },
            {
                "path": "/hosting/privateDatabase/{serviceName}/restart",
                "description": "Restart the database",
                "operations": [
                    {
                        "httpMethod": "POST",
                        "parameters": [
                            {"name": "serviceName", "paramType": "path", "dataType": "string", "required": true}
                        ]
                    },
                    {
                        "httpMethod": "DELETE",
                        "parameters": [
                            {"name": "serviceName", "paramType": "path", "dataType": "string", "required": true}
                        ]
                    }
                ]
            },
            {
                "path": "/hosting/privateDatabase/{serviceName}/list",
                "description": "A route literally named like an action",
                "operations": [
                    {
                        "httpMethod": "GET",
                        "parameters": [
                            {"name": "serviceName", "paramType": "path", "dataType": "string", "required": true}
                        ]
                    }
                ]
            },
            {
                "path": "/hosting/privateDatabase/{serviceName}/whitelist",
                "description": "Whitelisted IPs",
                "operations": [
                    {
                        "httpMethod": "POST",
                        "parameters": [
                            {"name": "serviceName", "paramType": "path", "dataType": "string", "required": true},
                            {"name": "ip", "paramType": "body", "dataType": "ipBlock", "required": true},
                            {"name": "settings", "paramType": "body", "dataType": "hosting.PrivateDatabase.Settings", "required": false}
                        ]
                    }
                ]
            }
        ],
        "models": {
            "hosting.PrivateDatabase.Service": {
                "id": "Service",
                "properties": {
                    "login": {"type": "string", "canBeNull": false, "readOnly": false, "description": "Database login"},
                    "password": {"type": "string", "canBeNull": true, "readOnly": false},
                    "port": {"type": "long", "canBeNull": false, "readOnly": false},
                    "creationDate": {"type": "datetime", "canBeNull": false, "readOnly": true}
                }
            },
            "hosting.PrivateDatabase.DumpState": {
                "id": "DumpState",
                "enumType": "string",
                "enum": ["a", "b"]
            },
            "hosting.PrivateDatabase.Settings": {
                "id": "Settings",
                "properties": {
                    "sql": {"type": "boolean", "canBeNull": false}
                }
            }
        }
    })
}

#[must_use]
pub fn me_document() -> Value {
    json!({
        "resourcePath": "/me",
        "apis": [
            {
                "path": "/me",
                "description": "Your account",
                "operations": [{"httpMethod": "GET", "parameters": []}]
            },
            {
                "path": "/me/bill",
                "description": "Bills",
                "operations": [{"httpMethod": "GET", "parameters": []}]
            }
        ],
        "models": {}
    })
}

#[must_use]
pub fn schema(document: Value) -> SchemaModel {
    serde_json::from_value(document).expect("fixture schema must decode")
}

#[must_use]
pub fn fixture_tree() -> RouteNode {
    routes::build(&[schema(private_database_document()), schema(me_document())])
        .expect("fixture tree must build")
}

#[must_use]
pub fn tokens(raw: &[&str]) -> Vec<String> {
    raw.iter().map(ToString::to_string).collect()
}

/// Resolves `raw` against the fixture tree, expecting a call.
#[must_use]
pub fn resolve_call(root: &RouteNode, raw: &[&str]) -> ResolvedCall {
    match routes::resolve(root, &tokens(raw)) {
        Ok(Resolution::Call(call)) => call,
        other => panic!("expected a call for {raw:?}, got {other:?}"),
    }
}

/// Resolves `raw` against the fixture tree, expecting help text.
#[must_use]
pub fn resolve_help(root: &RouteNode, raw: &[&str]) -> String {
    match routes::resolve(root, &tokens(raw)) {
        Ok(Resolution::Help(text)) => text,
        other => panic!("expected help for {raw:?}, got {other:?}"),
    }
}
