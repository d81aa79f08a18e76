//! Coercion of an action's flags into typed arguments.
//!
//! Each action gets a throwaway clap [`Command`] whose arguments mirror the
//! action's non-path parameters. clap handles tokenisation, repetition,
//! required flags and enum choices; the per-type value parsers turn every
//! occurrence into a JSON value.

mod values;

pub use values::{parse_bool, parse_primitive, value_parser};

use crate::constants;
use crate::error::Error;
use crate::routes::resolve::Arguments;
use crate::routes::tree::{ActionSpec, HttpVerb, ParamLocation};
use crate::schema::types::{Primitive, TypeRef};
use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{Arg, ArgAction, ColorChoice, Command};
use serde_json::Value;

/// One user-facing flag of an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSpec {
    pub name: String,
    pub type_ref: TypeRef,
    pub required: bool,
    pub nullable: bool,
    pub description: String,
}

/// Result of coercing an action's flags.
#[derive(Debug, Clone, PartialEq)]
pub enum Coerced {
    Arguments(Arguments),
    /// `--help` was given among the flags; carries the action's flag help.
    Help(String),
}

/// Lists the flags `action` accepts.
///
/// Path parameters are skipped. On `PUT`, a parameter typed by an object
/// model is replaced by one optional flag per writable property, so that an
/// update only sends the fields the user names. A flag name already taken
/// by an earlier flag is not registered twice, and unnamed parameters are
/// not exposed.
#[must_use]
pub fn flags_for(action: &ActionSpec) -> Vec<FlagSpec> {
    let mut flags: Vec<FlagSpec> = Vec::new();
    let mut push = |flag: FlagSpec| {
        if !flag.name.is_empty() && !flags.iter().any(|existing| existing.name == flag.name) {
            flags.push(flag);
        }
    };

    for param in &action.parameters {
        if param.location == ParamLocation::Path {
            continue;
        }

        match param.type_ref.object_properties() {
            Some(properties) if action.verb == HttpVerb::Put => {
                for property in properties.iter().filter(|p| !p.read_only) {
                    push(FlagSpec {
                        name: property.name.clone(),
                        type_ref: property.type_ref.clone(),
                        required: false,
                        nullable: property.nullable,
                        description: property.description.clone(),
                    });
                }
            }
            _ => push(FlagSpec {
                name: param.name.clone(),
                type_ref: param.type_ref.clone(),
                required: param.required,
                nullable: param.nullable,
                description: param.description.clone(),
            }),
        }
    }

    flags
}

fn flag_help(flag: &FlagSpec) -> String {
    let mut help = String::new();
    if flag.type_ref.is_array() {
        help.push_str("(list) ");
    }
    help.push_str(flag.description.trim());
    if flag.nullable {
        help.push_str(" [pass 'null' to clear]");
    }
    help.trim().to_string()
}

fn flag_arg(flag: &FlagSpec) -> Arg {
    let numeric = matches!(
        flag.type_ref.element(),
        TypeRef::Primitive(Primitive::Integer | Primitive::Decimal)
            | TypeRef::Enum {
                element: Primitive::Integer | Primitive::Decimal,
                ..
            }
    );

    Arg::new(flag.name.clone())
        .long(flag.name.clone())
        .value_name(flag.type_ref.label())
        .help(flag_help(flag))
        .required(flag.required)
        .allow_negative_numbers(numeric)
        .action(if flag.type_ref.is_array() {
            ArgAction::Append
        } else {
            ArgAction::Set
        })
        .value_parser(value_parser(&flag.type_ref, flag.nullable))
}

fn action_command(action: &ActionSpec, url_path: &str, flags: &[FlagSpec]) -> Command {
    let mut command = Command::new(format!("{} {url_path}", action.verb))
        .no_binary_name(true)
        .disable_help_flag(true)
        .disable_version_flag(true)
        .color(ColorChoice::Never);
    if !action.help.is_empty() {
        command = command.about(action.help.clone());
    }
    flags
        .iter()
        .fold(command, |command, flag| command.arg(flag_arg(flag)))
}

/// Parses `tokens` as the flags of `action`.
///
/// Absent optional flags are left out of the result, repeated flags keep
/// their command-line order.
///
/// # Errors
/// Returns [`Error::Validation`] naming the offending flag when a value does
/// not parse, a required flag is missing, a flag is unknown or a stray
/// token is left over.
pub fn coerce(action: &ActionSpec, url_path: &str, tokens: &[String]) -> Result<Coerced, Error> {
    let flags = flags_for(action);
    let mut command = action_command(action, url_path, &flags);

    let wants_help = tokens.iter().any(|token| token == constants::HELP_FLAG)
        && !flags.iter().any(|flag| flag.name == "help");
    if wants_help {
        return Ok(Coerced::Help(command.render_help().to_string()));
    }

    let matches = command
        .try_get_matches_from(tokens)
        .map_err(validation_error)?;

    let mut given: Vec<(usize, String, Value)> = Vec::new();
    for flag in &flags {
        let values = matches
            .try_get_many::<Value>(&flag.name)
            .map_err(|e| Error::validation(Some(flag.name.clone()), e.to_string()))?;
        let Some(values) = values else { continue };
        let mut values: Vec<Value> = values.cloned().collect();

        let value = if flag.type_ref.is_array() {
            Value::Array(values)
        } else {
            values.pop().unwrap_or(Value::Null)
        };
        let position = matches.index_of(&flag.name).unwrap_or(usize::MAX);
        given.push((position, flag.name.clone(), value));
    }

    // Command-line order, not declaration order.
    given.sort_by_key(|(position, _, _)| *position);
    Ok(Coerced::Arguments(
        given
            .into_iter()
            .map(|(_, name, value)| (name, value))
            .collect(),
    ))
}

/// Strips `--` and any `<VALUE>` / `=value` tail from clap's argument label.
fn flag_name(label: &str) -> String {
    label
        .trim_start_matches('-')
        .split([' ', '='])
        .next()
        .unwrap_or_default()
        .to_string()
}

fn validation_error(err: clap::Error) -> Error {
    let label = match err.get(ContextKind::InvalidArg) {
        Some(ContextValue::String(label)) => Some(label.clone()),
        Some(ContextValue::Strings(labels)) => labels.first().cloned(),
        _ => None,
    };
    let value = match err.get(ContextKind::InvalidValue) {
        Some(ContextValue::String(value)) => Some(value.clone()),
        _ => None,
    };

    let is_flag = label.as_deref().is_some_and(|l| l.starts_with("--"));
    let flag = label
        .as_deref()
        .filter(|_| is_flag)
        .map(flag_name)
        .or_else(|| label.clone().filter(|l| l.starts_with('-')));

    let reason = match err.kind() {
        ErrorKind::UnknownArgument if flag.is_some() => "not accepted by this action".to_string(),
        ErrorKind::UnknownArgument => {
            format!("unexpected argument '{}'", label.unwrap_or_default())
        }
        ErrorKind::MissingRequiredArgument => "required flag is missing".to_string(),
        ErrorKind::InvalidValue => {
            let valid = match err.get(ContextKind::ValidValue) {
                Some(ContextValue::Strings(valid)) => valid.join(", "),
                _ => String::new(),
            };
            match value {
                Some(value) if value.is_empty() => "a value is required".to_string(),
                Some(value) => format!("invalid value '{value}', expected one of: {valid}"),
                None => format!("expected one of: {valid}"),
            }
        }
        ErrorKind::ValueValidation => {
            use std::error::Error as _;
            err.source().map_or_else(
                || format!("invalid value '{}'", value.unwrap_or_default()),
                ToString::to_string,
            )
        }
        ErrorKind::ArgumentConflict => "given more than once".to_string(),
        other => other.as_str().unwrap_or("invalid arguments").to_string(),
    };

    Error::validation(flag, reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::tree::ParameterDef;
    use crate::schema::types::Property;
    use serde_json::json;

    fn param(name: &str, location: ParamLocation, type_ref: TypeRef, required: bool) -> ParameterDef {
        ParameterDef {
            name: name.to_string(),
            location,
            type_ref,
            required,
            nullable: false,
            description: String::new(),
        }
    }

    fn text() -> TypeRef {
        TypeRef::Primitive(Primitive::Text)
    }

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_flag_name_from_clap_labels() {
        assert_eq!(flag_name("--state <TEXT>"), "state");
        assert_eq!(flag_name("--login"), "login");
        assert_eq!(flag_name("--count=3"), "count");
    }

    #[test]
    fn test_path_parameters_are_not_flags() {
        let action = ActionSpec {
            verb: HttpVerb::Get,
            parameters: vec![
                param("serviceName", ParamLocation::Path, text(), true),
                param("filter", ParamLocation::Query, text(), false),
            ],
            help: String::new(),
        };
        let names: Vec<_> = flags_for(&action).into_iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["filter"]);
    }

    #[test]
    fn test_put_expansion_skips_read_only_and_relaxes_required() {
        let model = TypeRef::Object {
            model: "Database".to_string(),
            properties: vec![
                Property {
                    name: "login".to_string(),
                    type_ref: text(),
                    required: true,
                    nullable: false,
                    read_only: false,
                    description: String::new(),
                },
                Property {
                    name: "creationDate".to_string(),
                    type_ref: text(),
                    required: true,
                    nullable: false,
                    read_only: true,
                    description: String::new(),
                },
            ],
        };
        let action = ActionSpec {
            verb: HttpVerb::Put,
            parameters: vec![param("", ParamLocation::Body, model, true)],
            help: String::new(),
        };

        let flags = flags_for(&action);
        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].name, "login");
        assert!(!flags[0].required);
    }

    #[test]
    fn test_arguments_follow_command_line_order() {
        let action = ActionSpec {
            verb: HttpVerb::Post,
            parameters: vec![
                param("a", ParamLocation::Body, text(), false),
                param("b", ParamLocation::Body, text(), false),
            ],
            help: String::new(),
        };
        let Coerced::Arguments(arguments) =
            coerce(&action, "/x", &tokens(&["--b", "2", "--a", "1"])).unwrap()
        else {
            panic!("expected arguments");
        };
        let keys: Vec<_> = arguments.keys().cloned().collect();
        assert_eq!(keys, vec!["b", "a"]);
        assert_eq!(arguments["a"], json!("1"));
    }
}
