//! Serde mirror of one resource schema document.
//!
//! Only the fields the route grammar needs are modelled; anything else in
//! the document (response types, API status, ...) is ignored on decode.

use crate::constants;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// One resource schema, e.g. the document describing `/hosting/privateDatabase`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SchemaModel {
    pub resource_path: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub apis: Vec<ApiEntry>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub models: BTreeMap<String, ModelDef>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ApiEntry {
    pub path: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub operations: Vec<Operation>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub http_method: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub parameters: Vec<Parameter>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    /// `null` for the body parameter of `PUT` operations.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub param_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data_type: String,
    #[serde(default, deserialize_with = "loose_bool")]
    pub required: bool,
    #[serde(default, alias = "canBeNull", deserialize_with = "loose_bool")]
    pub nullable: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
}

/// A reusable type declared in the schema's `models` section.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum ModelDef {
    Enum {
        #[serde(rename = "enumType", default = "default_enum_type")]
        enum_type: String,
        #[serde(rename = "enum", deserialize_with = "scalar_strings")]
        values: Vec<String>,
    },
    Object {
        #[serde(default, deserialize_with = "null_as_default")]
        properties: IndexMap<String, PropertyDef>,
    },
}

fn default_enum_type() -> String {
    "string".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDef {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default, alias = "canBeNull", deserialize_with = "loose_bool")]
    pub nullable: bool,
    #[serde(default, deserialize_with = "loose_bool")]
    pub read_only: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
}

impl PropertyDef {
    /// A property is required unless the schema allows it to be null.
    #[must_use]
    pub const fn required(&self) -> bool {
        !self.nullable
    }
}

/// The endpoint's root document listing every resource schema.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RootIndex {
    #[serde(default, deserialize_with = "null_as_default")]
    pub apis: Vec<RootApi>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RootApi {
    pub path: String,
    pub schema: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
}

impl RootApi {
    /// Expands the `{path}.{format}` template into the schema document name.
    #[must_use]
    pub fn schema_name(&self) -> String {
        self.schema
            .replace(constants::SCHEMA_TEMPLATE_PATH, &self.path)
            .replace(constants::SCHEMA_TEMPLATE_FORMAT, constants::SCHEMA_FORMAT)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Enum members are usually strings, numeric enums are kept as their text.
fn scalar_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Vec::<serde_json::Value>::deserialize(deserializer)?;
    Ok(values
        .into_iter()
        .map(|value| match value {
            serde_json::Value::String(text) => text,
            other => other.to_string(),
        })
        .collect())
}

/// Schemas spell booleans as `true`, `1` or `"true"` depending on their age.
fn loose_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Bool(bool),
        Int(i64),
        Text(String),
    }

    Ok(match Option::<Loose>::deserialize(deserializer)? {
        None => false,
        Some(Loose::Bool(value)) => value,
        Some(Loose::Int(value)) => value != 0,
        Some(Loose::Text(value)) => crate::params::parse_bool(&value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATABASE_SCHEMA: &str = r#"{
        "apiVersion": "1.0",
        "resourcePath": "/hosting/privateDatabase",
        "apis": [
            {
                "path": "/hosting/privateDatabase/{serviceName}",
                "description": "Private database",
                "operations": [
                    {
                        "httpMethod": "GET",
                        "description": "Get this object properties",
                        "responseType": "hosting.PrivateDatabase.Service",
                        "parameters": [
                            {"name": "serviceName", "paramType": "path", "dataType": "string", "required": 1, "description": null}
                        ]
                    }
                ]
            }
        ],
        "models": {
            "hosting.PrivateDatabase.StateEnum": {
                "id": "StateEnum",
                "namespace": "hosting.PrivateDatabase",
                "enum": ["started", "stopped"],
                "enumType": "string"
            },
            "hosting.PrivateDatabase.Database": {
                "id": "Database",
                "properties": {
                    "login": {"type": "string", "canBeNull": false, "readOnly": false},
                    "password": {"type": "password", "canBeNull": true, "readOnly": 0, "description": "Secret"}
                }
            }
        }
    }"#;

    #[test]
    fn test_decodes_schema_document() {
        let schema: SchemaModel = serde_json::from_str(DATABASE_SCHEMA).unwrap();
        assert_eq!(schema.resource_path, "/hosting/privateDatabase");
        assert_eq!(schema.apis.len(), 1);

        let param = &schema.apis[0].operations[0].parameters[0];
        assert!(param.required);
        assert_eq!(param.param_type, "path");
        assert_eq!(param.description, "");
    }

    #[test]
    fn test_decodes_enum_and_object_models() {
        let schema: SchemaModel = serde_json::from_str(DATABASE_SCHEMA).unwrap();

        match &schema.models["hosting.PrivateDatabase.StateEnum"] {
            ModelDef::Enum { enum_type, values } => {
                assert_eq!(enum_type, "string");
                assert_eq!(values, &vec!["started".to_string(), "stopped".to_string()]);
            }
            other => panic!("expected enum model, got {other:?}"),
        }

        match &schema.models["hosting.PrivateDatabase.Database"] {
            ModelDef::Object { properties } => {
                let names: Vec<_> = properties.keys().cloned().collect();
                assert_eq!(names, vec!["login", "password"]);
                assert!(properties["login"].required());
                assert!(!properties["password"].required());
                assert!(!properties["password"].read_only);
            }
            other => panic!("expected object model, got {other:?}"),
        }
    }

    #[test]
    fn test_root_api_schema_name() {
        let api = RootApi {
            path: "/me".to_string(),
            schema: "{path}.{format}".to_string(),
            description: String::new(),
        };
        assert_eq!(api.schema_name(), "/me.json");
    }
}
