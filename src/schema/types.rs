//! Resolution of schema `dataType` strings into [`TypeRef`]s.
//!
//! Resolution happens once, while the route tree is built, so the tree
//! carries fully resolved flag types and no longer needs the schema's
//! models dictionary at call time.

use crate::constants;
use crate::schema::models::ModelDef;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Native scalar a flag value is coerced into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Primitive {
    Text,
    Integer,
    Decimal,
    Boolean,
}

impl Primitive {
    /// Maps the schema's primitive vocabulary. Returns `None` for model names
    /// and for types the grammar has no native rendition of.
    #[must_use]
    pub fn from_data_type(data_type: &str) -> Option<Self> {
        match data_type {
            "string" | "text" | "ip" | "ipBlock" => Some(Self::Text),
            "long" | "int" => Some(Self::Integer),
            "float" | "double" => Some(Self::Decimal),
            "boolean" => Some(Self::Boolean),
            _ => None,
        }
    }

    /// Placeholder shown in flag help, e.g. `--count <INTEGER>`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Text => "TEXT",
            Self::Integer => "INTEGER",
            Self::Decimal => "DECIMAL",
            Self::Boolean => "BOOLEAN",
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label().to_lowercase())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeRef {
    Primitive(Primitive),
    /// Choice-constrained value typed by the enum's element type.
    Enum {
        element: Primitive,
        values: Vec<String>,
    },
    /// Object model. As a single flag its value is a JSON literal; on `PUT`
    /// the properties become individual flags.
    Object {
        model: String,
        properties: Vec<Property>,
    },
    /// `type[]`: the flag may be repeated, occurrences are collected in order.
    Array(Box<TypeRef>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub type_ref: TypeRef,
    pub required: bool,
    pub nullable: bool,
    pub read_only: bool,
    pub description: String,
}

impl TypeRef {
    /// Resolves `data_type` against the models in scope. Unknown names fall
    /// back to plain text.
    #[must_use]
    pub fn resolve(data_type: &str, models: &BTreeMap<String, ModelDef>) -> Self {
        resolve_with(data_type, models, &mut Vec::new())
    }

    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    /// Type of one occurrence of the flag.
    #[must_use]
    pub fn element(&self) -> &Self {
        match self {
            Self::Array(inner) => inner.element(),
            other => other,
        }
    }

    /// Properties to expand into flags, when this is an object model.
    #[must_use]
    pub fn object_properties(&self) -> Option<&[Property]> {
        match self {
            Self::Object { properties, .. } => Some(properties),
            _ => None,
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Primitive(primitive) | Self::Enum {
                element: primitive, ..
            } => primitive.label(),
            Self::Object { .. } => "JSON",
            Self::Array(inner) => inner.label(),
        }
    }
}

fn resolve_with(
    data_type: &str,
    models: &BTreeMap<String, ModelDef>,
    visiting: &mut Vec<String>,
) -> TypeRef {
    if let Some(inner) = data_type.strip_suffix(constants::ARRAY_SUFFIX) {
        return TypeRef::Array(Box::new(resolve_with(inner, models, visiting)));
    }

    if let Some(primitive) = Primitive::from_data_type(data_type) {
        return TypeRef::Primitive(primitive);
    }

    match models.get(data_type) {
        Some(ModelDef::Enum { enum_type, values }) => TypeRef::Enum {
            element: Primitive::from_data_type(enum_type).unwrap_or(Primitive::Text),
            values: values.clone(),
        },
        Some(ModelDef::Object { properties }) => {
            // Self-referencing models stop here; the value is still accepted
            // as a JSON literal.
            if visiting.iter().any(|name| name == data_type) {
                return TypeRef::Object {
                    model: data_type.to_string(),
                    properties: Vec::new(),
                };
            }

            visiting.push(data_type.to_string());
            let properties = properties
                .iter()
                .map(|(name, property)| Property {
                    name: name.clone(),
                    type_ref: resolve_with(&property.type_name, models, visiting),
                    required: property.required(),
                    nullable: property.nullable,
                    read_only: property.read_only,
                    description: property.description.clone(),
                })
                .collect();
            visiting.pop();

            TypeRef::Object {
                model: data_type.to_string(),
                properties,
            }
        }
        None => TypeRef::Primitive(Primitive::Text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::models::PropertyDef;
    use indexmap::IndexMap;

    fn property(type_name: &str, nullable: bool) -> PropertyDef {
        PropertyDef {
            type_name: type_name.to_string(),
            nullable,
            read_only: false,
            description: String::new(),
        }
    }

    fn models() -> BTreeMap<String, ModelDef> {
        let mut models = BTreeMap::new();
        models.insert(
            "dedicated.State".to_string(),
            ModelDef::Enum {
                enum_type: "string".to_string(),
                values: vec!["a".to_string(), "b".to_string()],
            },
        );
        let mut properties = IndexMap::new();
        properties.insert("login".to_string(), property("string", false));
        properties.insert("quota".to_string(), property("long", true));
        properties.insert("parent".to_string(), property("hosting.Node", true));
        models.insert(
            "hosting.Node".to_string(),
            ModelDef::Object { properties },
        );
        models
    }

    #[test]
    fn test_primitive_table() {
        let models = BTreeMap::new();
        for (name, expected) in [
            ("string", Primitive::Text),
            ("text", Primitive::Text),
            ("ip", Primitive::Text),
            ("ipBlock", Primitive::Text),
            ("long", Primitive::Integer),
            ("int", Primitive::Integer),
            ("float", Primitive::Decimal),
            ("double", Primitive::Decimal),
            ("boolean", Primitive::Boolean),
        ] {
            assert_eq!(
                TypeRef::resolve(name, &models),
                TypeRef::Primitive(expected),
                "{name}"
            );
        }
    }

    #[test]
    fn test_unknown_type_falls_back_to_text() {
        assert_eq!(
            TypeRef::resolve("datetime", &models()),
            TypeRef::Primitive(Primitive::Text)
        );
    }

    #[test]
    fn test_array_suffix_is_stripped() {
        let resolved = TypeRef::resolve("long[]", &models());
        assert!(resolved.is_array());
        assert_eq!(resolved.element(), &TypeRef::Primitive(Primitive::Integer));
    }

    #[test]
    fn test_enum_model() {
        assert_eq!(
            TypeRef::resolve("dedicated.State", &models()),
            TypeRef::Enum {
                element: Primitive::Text,
                values: vec!["a".to_string(), "b".to_string()],
            }
        );
    }

    #[test]
    fn test_recursive_object_model_terminates() {
        let resolved = TypeRef::resolve("hosting.Node", &models());
        let properties = resolved.object_properties().unwrap();
        assert_eq!(properties.len(), 3);
        assert!(properties[0].required);
        assert!(!properties[1].required);
        assert_eq!(properties[1].type_ref, TypeRef::Primitive(Primitive::Integer));

        let nested = properties[2].type_ref.object_properties().unwrap();
        assert!(nested.is_empty());
    }
}
