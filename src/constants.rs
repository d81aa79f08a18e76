//! Centralized string constants for the apitree CLI
//!
//! This module contains commonly used string literals to:
//! - Reduce string duplication
//! - Improve maintainability
//! - Ensure consistency across the codebase

// Environment Variables
pub const ENV_APITREE_CONFIG_DIR: &str = "APITREE_CONFIG_DIR";
pub const ENV_APITREE_LOG: &str = "APITREE_LOG";
pub const ENV_APITREE_LOG_FORMAT: &str = "APITREE_LOG_FORMAT";
pub const ENV_APITREE_LOG_FILE: &str = "APITREE_LOG_FILE";
pub const ENV_APITREE_LOG_MAX_BODY: &str = "APITREE_LOG_MAX_BODY";

// Known API endpoints, selectable by name or by the executable's name
pub const KNOWN_ENDPOINTS: &[(&str, &str)] = &[
    ("ovh-eu", "https://eu.api.ovh.com/1.0"),
    ("ovh-ca", "https://ca.api.ovh.com/1.0"),
    ("kimsufi-eu", "https://eu.api.kimsufi.com/1.0"),
    ("kimsufi-ca", "https://ca.api.kimsufi.com/1.0"),
    ("soyoustart-eu", "https://eu.api.soyoustart.com/1.0"),
    ("soyoustart-ca", "https://ca.api.soyoustart.com/1.0"),
    ("runabove-ca", "https://api.runabove.com/1.0"),
];

// Schema documents
pub const SCHEMA_ROOT: &str = "/";
pub const SCHEMA_FORMAT: &str = "json";
pub const SCHEMA_TEMPLATE_PATH: &str = "{path}";
pub const SCHEMA_TEMPLATE_FORMAT: &str = "{format}";

// Schema parameter locations
pub const PARAM_LOCATION_PATH: &str = "path";
pub const PARAM_LOCATION_BODY: &str = "body";

// HTTP Methods
pub const HTTP_METHOD_GET: &str = "GET";
pub const HTTP_METHOD_POST: &str = "POST";
pub const HTTP_METHOD_PUT: &str = "PUT";
pub const HTTP_METHOD_DELETE: &str = "DELETE";

// Token markers
pub const HELP_FLAG: &str = "--help";
pub const FORCED_ACTION_PREFIX: &str = "do_";
pub const NULL_LITERAL: &str = "null";
pub const ARRAY_SUFFIX: &str = "[]";

// Rendering
pub const BASH_PREFIX: &str = "APITREE_";
pub const EMPTY_RESPONSE: &str = "(empty response)";
pub const EMPTY_LIST: &str = "<empty list>";

// Default Values
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOG_MAX_BODY: usize = 1000;

// File suffixes and identifiers
pub const FILE_EXT_BIN: &str = ".bin";
pub const CONFIG_FILENAME: &str = "config.toml";
pub const APP_DIR_NAME: &str = "apitree";

// Directory names
pub const DIR_CACHE: &str = ".cache";

// Error Context Messages
pub const ERR_API_CREDENTIALS: &str =
    "Check your API credentials and authentication configuration.";
pub const ERR_PERMISSION_DENIED: &str =
    "Your credentials may be valid but lack permission for this operation.";
pub const ERR_ENDPOINT_NOT_FOUND: &str = "Check that the API endpoint and parameters are correct.";
pub const ERR_RATE_LIMITED: &str = "You're making requests too quickly. Wait before trying again.";
pub const ERR_SERVER_ERROR: &str = "The API server is experiencing issues. Try again later.";
pub const ERR_CONNECTION: &str = "Check that the API server is running and accessible.";
pub const ERR_TIMEOUT: &str = "The API server may be slow or unresponsive. Try again later.";
pub const ERR_SCHEMA_CONFLICT: &str =
    "The published schema declares the same action twice; report it to the API provider.";

// File System Messages
pub const ERR_FILE_NOT_FOUND: &str = "Check that the file path is correct and the file exists.";
pub const ERR_PERMISSION: &str = "Check file permissions or run with appropriate privileges.";

// Validation Messages
pub const ERR_JSON_SYNTAX: &str = "Check that the response or flag value contains valid JSON.";
pub const ERR_TOML_SYNTAX: &str = "Check that your configuration file is valid TOML syntax.";

// CLI Messages
pub const MSG_USE_HELP: &str = "Append --help to the command to see available routes and actions.";
pub const MSG_USE_ACTION_HELP: &str =
    "Append --help after the action (e.g. 'update --help') to list its flags.";
pub const MSG_USE_REFRESH: &str = "Run again with --refresh to rebuild the command list.";
