//! Request and response tracing for the HTTP transport.
//!
//! Request lines and status codes go out at `info`, headers at `debug` and
//! bodies at `trace`. Credential-bearing headers are redacted.

use crate::constants;
use tracing::{debug, info, trace};

/// Checks if a header name should be redacted
#[must_use]
pub fn should_redact_header(header_name: &str) -> bool {
    let lower = header_name.to_lowercase();
    matches!(
        lower.as_str(),
        "authorization"
            | "cookie"
            | "set-cookie"
            | "x-api-key"
            | "x-auth-token"
            | "x-ovh-application"
            | "x-ovh-consumer"
            | "x-ovh-signature"
    )
}

fn log_headers(direction: &str, headers: &reqwest::header::HeaderMap) {
    debug!(target: "apitree::transport", "{direction} headers:");
    for (name, value) in headers {
        let display_value = if should_redact_header(name.as_str()) {
            "[REDACTED]".to_string()
        } else {
            String::from_utf8_lossy(value.as_bytes()).to_string()
        };
        debug!(target: "apitree::transport", "  {}: {display_value}", name.as_str());
    }
}

/// Logs an outgoing request.
pub fn log_request(method: &str, url: &str, body: Option<&str>) {
    info!(target: "apitree::transport", "→ {} {url}", method.to_uppercase());

    if let Some(body) = body {
        trace!(target: "apitree::transport", "Request body: {body}");
    }
}

/// Logs a received response, truncating the body to `max_body_len` chars.
pub fn log_response(
    status: u16,
    duration_ms: u128,
    headers: Option<&reqwest::header::HeaderMap>,
    body: Option<&str>,
    max_body_len: usize,
) {
    info!(target: "apitree::transport", "← {status} ({duration_ms}ms)");

    if let Some(headers) = headers {
        log_headers("Response", headers);
    }

    let Some(body) = body else {
        return;
    };
    match truncate_chars(body, max_body_len) {
        Some(head) => trace!(
            target: "apitree::transport",
            "Response body: {head} (truncated at {max_body_len} chars)"
        ),
        None => trace!(target: "apitree::transport", "Response body: {body}"),
    }
}

/// First `max` chars of `text`, or `None` when it is not longer than that.
fn truncate_chars(text: &str, max: usize) -> Option<&str> {
    text.char_indices().nth(max).map(|(end, _)| &text[..end])
}

/// Gets the maximum logged body length from `APITREE_LOG_MAX_BODY`.
#[must_use]
pub fn get_max_body_len() -> usize {
    std::env::var(constants::ENV_APITREE_LOG_MAX_BODY)
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(constants::DEFAULT_LOG_MAX_BODY)
}
