//! Selection of the API endpoint an invocation talks to.

use crate::config::models::{Endpoint, GlobalConfig};
use crate::constants;
use crate::error::Error;
use std::collections::BTreeMap;

/// Built-in endpoints overlaid with the `[endpoints]` table of the config.
#[must_use]
pub fn known_endpoints(config: &GlobalConfig) -> BTreeMap<String, String> {
    let mut endpoints: BTreeMap<String, String> = constants::KNOWN_ENDPOINTS
        .iter()
        .map(|(name, url)| ((*name).to_string(), (*url).to_string()))
        .collect();
    endpoints.extend(
        config
            .endpoints
            .iter()
            .map(|(name, url)| (name.clone(), url.clone())),
    );
    endpoints
}

/// Determines if the input string is a URL (starts with http:// or https://)
#[must_use]
pub fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Cache-safe name for an endpoint given as a raw URL.
fn name_for_url(url: &str) -> String {
    url.trim_start_matches("https://")
        .trim_start_matches("http://")
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .trim_matches('-')
        .to_string()
}

/// Picks the endpoint: the `--endpoint` value (a name or a URL), then the
/// executable's file name when it names a known endpoint, then the
/// configured default.
///
/// # Errors
///
/// Returns [`Error::Config`] when nothing selects an endpoint or the
/// selected name is unknown.
pub fn select_endpoint(
    requested: Option<&str>,
    program_name: Option<&str>,
    config: &GlobalConfig,
) -> Result<Endpoint, Error> {
    let endpoints = known_endpoints(config);

    if let Some(url) = requested.filter(|r| is_url(r)) {
        return Ok(Endpoint {
            name: name_for_url(url),
            url: url.trim_end_matches('/').to_string(),
        });
    }

    let from_program = program_name.filter(|name| endpoints.contains_key(*name));
    let name = requested
        .or(from_program)
        .or(config.default_endpoint.as_deref())
        .ok_or_else(|| {
            Error::Config(format!(
                "No endpoint selected. Pass --endpoint with one of: {}",
                endpoints.keys().cloned().collect::<Vec<_>>().join(", ")
            ))
        })?;

    endpoints
        .get(name)
        .map(|url| Endpoint {
            name: name.to_string(),
            url: url.trim_end_matches('/').to_string(),
        })
        .ok_or_else(|| {
            Error::Config(format!(
                "Unknown endpoint '{name}'. Known endpoints: {}",
                endpoints.keys().cloned().collect::<Vec<_>>().join(", ")
            ))
        })
}
