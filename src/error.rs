use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    /// Two operations claim the same verb on one route, or a schema path
    /// cannot be placed in the tree.
    #[error("Conflicting route definition at '{path}': {reason}")]
    ConstructionConflict { path: String, reason: String },
    /// The token stream does not lead to a callable action.
    #[error("{message}")]
    UnknownRoute { base_url: String, message: String },
    /// A flag failed coercion, is missing while required, or is not accepted
    /// by the selected action.
    #[error("Invalid {}: {reason}", describe_flag(.flag.as_deref()))]
    Validation {
        flag: Option<String>,
        reason: String,
    },
    #[error("Failed to load schema '{name}': {reason}")]
    SchemaFetch { name: String, reason: String },
    #[error("Cached grammar for '{name}' is unusable: {reason}")]
    CacheCorrupted { name: String, reason: String },
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

fn describe_flag(flag: Option<&str>) -> String {
    match flag {
        Some(name) if name.starts_with('-') => format!("argument '{name}'"),
        Some(name) => format!("flag '--{name}'"),
        None => "arguments".to_string(),
    }
}

/// JSON representation of an error for structured output
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonError {
    pub error_type: String,
    pub message: String,
    pub context: Option<String>,
}

impl Error {
    #[must_use]
    pub fn unknown_route(base_url: &str, token: &str) -> Self {
        Self::UnknownRoute {
            base_url: base_url.to_string(),
            message: format!("Unknown route {base_url}/{token}"),
        }
    }

    #[must_use]
    pub fn no_actions(base_url: &str) -> Self {
        Self::UnknownRoute {
            base_url: base_url.to_string(),
            message: format!("No actions are available for {}", display_base(base_url)),
        }
    }

    #[must_use]
    pub fn ambiguous_default(base_url: &str) -> Self {
        Self::UnknownRoute {
            base_url: base_url.to_string(),
            message: format!(
                "No default action is available for {}. Please pick one manually",
                display_base(base_url)
            ),
        }
    }

    #[must_use]
    pub fn validation(flag: Option<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            flag,
            reason: reason.into(),
        }
    }

    /// Name of the offending flag for validation failures.
    #[must_use]
    pub fn flag(&self) -> Option<&str> {
        match self {
            Self::Validation { flag, .. } => flag.as_deref(),
            _ => None,
        }
    }

    /// Turns an I/O failure into a configuration error prefixed by `context`.
    #[must_use]
    pub fn with_context(self, context: &str) -> Self {
        match self {
            Self::Io(e) => Self::Config(format!("{context}: {e}")),
            _ => self,
        }
    }

    /// Convert error to JSON representation for structured output
    #[must_use]
    pub fn to_json(&self) -> JsonError {
        let (error_type, context) = match self {
            Self::Io(io_err) => (
                "FileSystem",
                match io_err.kind() {
                    std::io::ErrorKind::NotFound => Some(constants::ERR_FILE_NOT_FOUND),
                    std::io::ErrorKind::PermissionDenied => Some(constants::ERR_PERMISSION),
                    _ => None,
                },
            ),
            Self::Network(req_err) => (
                "Network",
                if req_err.is_connect() {
                    Some(constants::ERR_CONNECTION)
                } else if req_err.is_timeout() {
                    Some(constants::ERR_TIMEOUT)
                } else {
                    None
                },
            ),
            Self::HttpStatus { status, .. } => ("HttpStatus", status_hint(*status)),
            Self::Yaml(_) => ("YAMLSerialization", None),
            Self::Json(_) => ("JSONParsing", Some(constants::ERR_JSON_SYNTAX)),
            Self::Toml(_) => ("TOMLParsing", Some(constants::ERR_TOML_SYNTAX)),
            Self::Config(_) => ("Configuration", None),
            Self::ConstructionConflict { .. } => {
                ("ConstructionConflict", Some(constants::ERR_SCHEMA_CONFLICT))
            }
            Self::UnknownRoute { .. } => ("UnknownRoute", Some(constants::MSG_USE_HELP)),
            Self::Validation { .. } => ("Validation", Some(constants::MSG_USE_ACTION_HELP)),
            Self::SchemaFetch { .. } => ("SchemaFetch", Some(constants::ERR_CONNECTION)),
            Self::CacheCorrupted { .. } => ("CacheCorrupted", Some(constants::MSG_USE_REFRESH)),
            Self::Anyhow(_) => ("Unexpected", None),
        };

        JsonError {
            error_type: error_type.to_string(),
            message: self.to_string(),
            context: context.map(str::to_string),
        }
    }
}

/// Hint shown for a non-success HTTP status.
#[must_use]
pub const fn status_hint(status: u16) -> Option<&'static str> {
    match status {
        401 => Some(constants::ERR_API_CREDENTIALS),
        403 => Some(constants::ERR_PERMISSION_DENIED),
        404 => Some(constants::ERR_ENDPOINT_NOT_FOUND),
        429 => Some(constants::ERR_RATE_LIMITED),
        500..=599 => Some(constants::ERR_SERVER_ERROR),
        _ => None,
    }
}

fn display_base(base_url: &str) -> &str {
    if base_url.is_empty() {
        "/"
    } else {
        base_url
    }
}
