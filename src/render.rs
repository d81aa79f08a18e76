//! Rendering of API responses for the terminal, scripts and other tools.

use crate::constants;
use crate::error::Error;
use crate::utils::{camel_to_bash, camel_to_human};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::Write;
use tabled::Table;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable tables
    #[default]
    Terminal,
    /// Pretty-printed JSON with sorted keys
    Json,
    Yaml,
    /// `APITREE_*` shell variable assignments
    Bash,
}

#[derive(tabled::Tabled)]
struct KeyValue {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Value")]
    value: String,
}

/// Renders `value` in `format`. The result carries no trailing newline.
///
/// # Errors
/// Returns an error if JSON or YAML serialisation fails.
pub fn render(value: &Value, format: OutputFormat) -> Result<String, Error> {
    match format {
        OutputFormat::Terminal => Ok(render_terminal(value)),
        OutputFormat::Json => render_json(value),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?.trim_end().to_string()),
        OutputFormat::Bash => Ok(render_bash(value)),
    }
}

fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key.clone(), sort_keys(value)))
                    .collect::<Map<String, Value>>(),
            )
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_keys).collect()),
        other => other.clone(),
    }
}

fn render_json(value: &Value) -> Result<String, Error> {
    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    sort_keys(value).serialize(&mut serializer)?;
    String::from_utf8(buffer).map_err(|e| Error::Anyhow(e.into()))
}

/// Scalar text: floats with three decimals, strings verbatim.
fn scalar(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Number(number) if number.is_f64() => {
            number.as_f64().map_or_else(|| number.to_string(), |f| format!("{f:.3}"))
        }
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// One table cell. Quantities (`{value, unit}`) and prices
/// (`{currencyCode, text, value}`) get their natural short form.
fn cell(value: &Value) -> String {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&str> = map.keys().map(String::as_str).collect();
            keys.sort_unstable();
            match (keys.as_slice(), map.get("value"), map.get("unit"), map.get("text")) {
                (["unit", "value"], Some(amount), Some(unit), _) => {
                    format!("{}{}", scalar(amount), scalar(unit))
                }
                (["currencyCode", "text", "value"], _, _, Some(text)) => scalar(text),
                _ => value.to_string(),
            }
        }
        Value::Array(items) if items.is_empty() => constants::EMPTY_LIST.to_string(),
        Value::Array(items) => items.iter().map(cell).collect::<Vec<_>>().join(", "),
        other => scalar(other),
    }
}

fn render_terminal(value: &Value) -> String {
    match &sort_keys(value) {
        Value::Null => constants::EMPTY_RESPONSE.to_string(),
        Value::Object(map) => {
            let rows: Vec<KeyValue> = map
                .iter()
                .map(|(key, value)| KeyValue {
                    key: camel_to_human(key),
                    value: cell(value),
                })
                .collect();
            Table::new(&rows).to_string()
        }
        Value::Array(items) if items.is_empty() => constants::EMPTY_LIST.to_string(),
        Value::Array(items) => items.iter().map(cell).collect::<Vec<_>>().join("\n"),
        other => scalar(other),
    }
}

/// Backslash-escapes everything but ASCII alphanumerics, `_` and non-ASCII
/// characters, so the result is one shell word.
fn shell_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch.is_ascii() && !ch.is_ascii_alphanumeric() && ch != '_' {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn render_bash(value: &Value) -> String {
    let prefix = constants::BASH_PREFIX;
    match &sort_keys(value) {
        Value::Array(items) => {
            let words: Vec<String> = items.iter().map(cell).collect();
            format!("{prefix}LIST='{}'", words.join(" ").replace('\'', r"'\''"))
        }
        Value::Object(map) => {
            let mut out = String::new();
            for (key, value) in map {
                let _ = writeln!(
                    out,
                    "{prefix}{}={}",
                    camel_to_bash(key),
                    shell_escape(&cell(value))
                );
            }
            out.trim_end().to_string()
        }
        other => format!("{prefix}VALUE={}", shell_escape(&cell(other))),
    }
}
