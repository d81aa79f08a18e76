//! Error display formatting for the CLI.

use crate::constants;
use crate::error::{status_hint, Error};

/// Prints an error message, either as JSON or user-friendly format.
pub fn print_error_with_json(error: &Error, json_format: bool) {
    if !json_format {
        print_error(error);
        return;
    }
    let json_error = error.to_json();
    let Ok(json_output) = serde_json::to_string_pretty(&json_error) else {
        print_error(error);
        return;
    };
    eprintln!("{json_output}");
}

/// Prints a user-friendly error message with a hint when one applies.
pub fn print_error(error: &Error) {
    match error {
        Error::Io(io_err) => match io_err.kind() {
            std::io::ErrorKind::NotFound => eprintln!(
                "File Not Found\n{io_err}\n\nHint: {}",
                constants::ERR_FILE_NOT_FOUND
            ),
            std::io::ErrorKind::PermissionDenied => eprintln!(
                "Permission Denied\n{io_err}\n\nHint: {}",
                constants::ERR_PERMISSION
            ),
            _ => eprintln!("File System Error\n{io_err}"),
        },
        Error::Network(req_err) if req_err.is_connect() => eprintln!(
            "Connection Error\n{req_err}\n\nHint: {}",
            constants::ERR_CONNECTION
        ),
        Error::Network(req_err) if req_err.is_timeout() => eprintln!(
            "Timeout Error\n{req_err}\n\nHint: {}",
            constants::ERR_TIMEOUT
        ),
        Error::Network(req_err) => eprintln!("Network Error\n{req_err}"),
        Error::HttpStatus { status, body } => match status_hint(*status) {
            Some(hint) => eprintln!("HTTP Error {status}\n{body}\n\nHint: {hint}"),
            None => eprintln!("HTTP Error {status}\n{body}"),
        },
        Error::UnknownRoute { .. } => {
            eprintln!("{error}\n\nHint: {}", constants::MSG_USE_HELP);
        }
        Error::Validation { .. } => {
            eprintln!("{error}\n\nHint: {}", constants::MSG_USE_ACTION_HELP);
        }
        Error::CacheCorrupted { .. } => {
            eprintln!("{error}\n\nHint: {}", constants::MSG_USE_REFRESH);
        }
        Error::ConstructionConflict { .. } => {
            eprintln!("{error}\n\nHint: {}", constants::ERR_SCHEMA_CONFLICT);
        }
        Error::Json(json_err) => eprintln!(
            "JSON Parsing Error\n{json_err}\n\nHint: {}",
            constants::ERR_JSON_SYNTAX
        ),
        Error::Toml(toml_err) => eprintln!(
            "TOML Parsing Error\n{toml_err}\n\nHint: {}",
            constants::ERR_TOML_SYNTAX
        ),
        Error::Yaml(_) | Error::Config(_) | Error::SchemaFetch { .. } | Error::Anyhow(_) => {
            eprintln!("Error\n{error}");
        }
    }
}
