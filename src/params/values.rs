//! Per-type parsing of a single flag occurrence into a JSON value.

use crate::constants;
use crate::schema::types::{Primitive, TypeRef};
use clap::builder::{PossibleValuesParser, TypedValueParser, ValueParser};
use serde_json::{Number, Value};

/// Tri-state boolean reading: `""`, `0`, `off`, `false` and `no` are false,
/// anything else is true.
#[must_use]
pub fn parse_bool(raw: &str) -> bool {
    !matches!(
        raw.trim().to_lowercase().as_str(),
        "" | "0" | "off" | "false" | "no"
    )
}

/// Parses one occurrence as `primitive`.
///
/// # Errors
/// Returns a human-readable reason when the text is not a valid value.
pub fn parse_primitive(primitive: Primitive, raw: &str) -> Result<Value, String> {
    match primitive {
        Primitive::Text => Ok(Value::String(raw.to_string())),
        Primitive::Integer => raw
            .trim()
            .parse::<i64>()
            .map(Value::from)
            .map_err(|_| format!("'{raw}' is not an integer")),
        Primitive::Decimal => raw
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| format!("'{raw}' is not a decimal number")),
        Primitive::Boolean => Ok(Value::Bool(parse_bool(raw))),
    }
}

fn parse_literal(raw: &str) -> Result<Value, String> {
    serde_json::from_str(raw).map_err(|e| format!("'{raw}' is not a JSON literal: {e}"))
}

fn parse_element(element: &TypeRef, raw: &str) -> Result<Value, String> {
    match element {
        TypeRef::Primitive(primitive) | TypeRef::Enum {
            element: primitive, ..
        } => parse_primitive(*primitive, raw),
        TypeRef::Object { .. } => parse_literal(raw),
        TypeRef::Array(inner) => parse_element(inner, raw),
    }
}

/// Builds the clap value parser for one occurrence of a flag typed `type_ref`.
///
/// Enum choices are enforced by clap so that the error lists the valid
/// values. Nullable flags additionally accept `null`.
pub fn value_parser(type_ref: &TypeRef, nullable: bool) -> ValueParser {
    let element = type_ref.element().clone();

    if let TypeRef::Enum {
        element: primitive,
        values,
    } = &element
    {
        let primitive = *primitive;
        let mut choices = values.clone();
        if nullable {
            choices.push(constants::NULL_LITERAL.to_string());
        }
        return ValueParser::new(PossibleValuesParser::new(choices).try_map(
            move |raw: String| {
                if nullable && raw == constants::NULL_LITERAL {
                    return Ok(Value::Null);
                }
                parse_primitive(primitive, &raw)
            },
        ));
    }

    ValueParser::new(move |raw: &str| -> Result<Value, String> {
        if nullable && raw == constants::NULL_LITERAL {
            return Ok(Value::Null);
        }
        parse_element(&element, raw)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_bool() {
        for falsy in ["", "0", "off", "false", "no", "  No ", "FALSE"] {
            assert!(!parse_bool(falsy), "{falsy:?}");
        }
        for truthy in ["1", "yes", "true", "on", "anything"] {
            assert!(parse_bool(truthy), "{truthy:?}");
        }
    }

    #[test]
    fn test_parse_primitive() {
        assert_eq!(parse_primitive(Primitive::Integer, "42"), Ok(json!(42)));
        assert_eq!(parse_primitive(Primitive::Integer, "-7"), Ok(json!(-7)));
        assert!(parse_primitive(Primitive::Integer, "4.2").is_err());
        assert_eq!(parse_primitive(Primitive::Decimal, "2.5"), Ok(json!(2.5)));
        assert!(parse_primitive(Primitive::Decimal, "NaN").is_err());
        assert_eq!(parse_primitive(Primitive::Text, " x "), Ok(json!(" x ")));
        assert_eq!(parse_primitive(Primitive::Boolean, "off"), Ok(json!(false)));
    }

    #[test]
    fn test_object_values_are_json_literals() {
        let object = TypeRef::Object {
            model: "me.Contact".to_string(),
            properties: vec![],
        };
        assert_eq!(
            parse_element(&object, r#"{"city": "Roubaix"}"#),
            Ok(json!({"city": "Roubaix"}))
        );
        assert!(parse_element(&object, "{city").is_err());
    }
}
