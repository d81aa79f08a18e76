use crate::constants;
use crate::render::OutputFormat;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Contents of `config.toml`. Every key is optional.
///
/// ```toml
/// default_endpoint = "ovh-eu"
/// default_format = "json"
/// timeout_secs = 60
///
/// [endpoints]
/// staging = "https://staging.example.com/1.0"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub default_endpoint: Option<String>,
    #[serde(default)]
    pub default_format: Option<OutputFormat>,
    #[serde(default = "default_timeout_secs_value")]
    pub timeout_secs: u64,
    /// Extra endpoints, or overrides of the built-in ones, by name.
    #[serde(default)]
    pub endpoints: BTreeMap<String, String>,
}

const fn default_timeout_secs_value() -> u64 {
    constants::DEFAULT_TIMEOUT_SECS
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            default_endpoint: None,
            default_format: None,
            timeout_secs: constants::DEFAULT_TIMEOUT_SECS,
            endpoints: BTreeMap::new(),
        }
    }
}

/// An API endpoint selected for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Name used for the grammar cache file.
    pub name: String,
    pub url: String,
}
