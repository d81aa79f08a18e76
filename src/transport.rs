//! Dispatch of resolved calls to the API.

use crate::error::Error;
use crate::logging;
use crate::routes::{Arguments, HttpVerb, ResolvedCall};
use serde_json::Value;
use std::future::Future;
use std::time::{Duration, Instant};

/// Installs the process-wide rustls crypto provider.
///
/// Must run before the first HTTP client is built. Installing twice is a
/// no-op.
pub fn install_crypto_provider() {
    #[cfg(not(windows))]
    let provider = rustls::crypto::ring::default_provider();
    #[cfg(windows)]
    let provider = rustls::crypto::aws_lc_rs::default_provider();
    let _ = provider.install_default();
}

/// One operation per verb, each taking the URL path below the endpoint and
/// the typed arguments.
pub trait Transport: Send + Sync {
    fn get(&self, path: &str, arguments: &Arguments) -> impl Future<Output = Result<Value, Error>> + Send;
    fn post(&self, path: &str, arguments: &Arguments) -> impl Future<Output = Result<Value, Error>> + Send;
    fn put(&self, path: &str, arguments: &Arguments) -> impl Future<Output = Result<Value, Error>> + Send;
    fn delete(&self, path: &str, arguments: &Arguments) -> impl Future<Output = Result<Value, Error>> + Send;
}

/// Sends `call` through the transport operation matching its verb.
///
/// # Errors
/// Returns whatever the transport reports; failures are not retried.
pub async fn dispatch<T: Transport>(transport: &T, call: &ResolvedCall) -> Result<Value, Error> {
    let ResolvedCall {
        verb,
        url_path,
        arguments,
    } = call;
    match verb {
        HttpVerb::Get => transport.get(url_path, arguments).await,
        HttpVerb::Post => transport.post(url_path, arguments).await,
        HttpVerb::Put => transport.put(url_path, arguments).await,
        HttpVerb::Delete => transport.delete(url_path, arguments).await,
    }
}

/// Plain JSON-over-HTTP transport.
///
/// `GET` and `DELETE` send arguments as a query string, array values as
/// repeated keys. `POST` and `PUT` send them as a JSON object body.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    max_body_len: usize,
}

impl HttpTransport {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            max_body_len: logging::get_max_body_len(),
        })
    }

    async fn send(&self, verb: HttpVerb, path: &str, arguments: &Arguments) -> Result<Value, Error> {
        let (url, body) = match verb {
            HttpVerb::Get | HttpVerb::Delete => {
                (format!("{}{path}{}", self.base_url, query_string(arguments)), None)
            }
            HttpVerb::Post | HttpVerb::Put => (
                format!("{}{path}", self.base_url),
                Some(serde_json::to_string(arguments)?),
            ),
        };

        let method = match verb {
            HttpVerb::Get => reqwest::Method::GET,
            HttpVerb::Post => reqwest::Method::POST,
            HttpVerb::Put => reqwest::Method::PUT,
            HttpVerb::Delete => reqwest::Method::DELETE,
        };

        logging::log_request(verb.as_str(), &url, body.as_deref());
        let mut request = self
            .client
            .request(method, &url)
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(body) = body {
            request = request
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body);
        }

        let started = Instant::now();
        let response = request.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let text = response.text().await?;
        logging::log_response(
            status.as_u16(),
            started.elapsed().as_millis(),
            Some(&headers),
            Some(&text),
            self.max_body_len,
        );

        if !status.is_success() {
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: error_message(&text),
            });
        }

        Ok(decode_body(&text))
    }
}

impl Transport for HttpTransport {
    async fn get(&self, path: &str, arguments: &Arguments) -> Result<Value, Error> {
        self.send(HttpVerb::Get, path, arguments).await
    }

    async fn post(&self, path: &str, arguments: &Arguments) -> Result<Value, Error> {
        self.send(HttpVerb::Post, path, arguments).await
    }

    async fn put(&self, path: &str, arguments: &Arguments) -> Result<Value, Error> {
        self.send(HttpVerb::Put, path, arguments).await
    }

    async fn delete(&self, path: &str, arguments: &Arguments) -> Result<Value, Error> {
        self.send(HttpVerb::Delete, path, arguments).await
    }
}

fn query_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// `?a=1&tags=x&tags=y`, or an empty string without arguments.
fn query_string(arguments: &Arguments) -> String {
    let pairs: Vec<String> = arguments
        .iter()
        .flat_map(|(name, value)| {
            let values: Vec<&Value> = match value {
                Value::Array(items) => items.iter().collect(),
                single => vec![single],
            };
            values.into_iter().map(move |value| {
                format!(
                    "{}={}",
                    urlencoding::encode(name),
                    urlencoding::encode(&query_value(value))
                )
            })
        })
        .collect();

    if pairs.is_empty() {
        String::new()
    } else {
        format!("?{}", pairs.join("&"))
    }
}

/// Empty bodies decode to `null`, non-JSON bodies to a string.
fn decode_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// The API's `message` field when present, else the raw body.
fn error_message(text: &str) -> String {
    serde_json::from_str::<Value>(text)
        .ok()
        .and_then(|value| value.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_string_repeats_array_values() {
        let mut arguments = Arguments::new();
        arguments.insert("state".to_string(), json!("ok"));
        arguments.insert("tags".to_string(), json!(["x", "y z"]));
        arguments.insert("count".to_string(), json!(3));
        assert_eq!(
            query_string(&arguments),
            "?state=ok&tags=x&tags=y%20z&count=3"
        );
    }

    #[test]
    fn test_query_string_empty() {
        assert_eq!(query_string(&Arguments::new()), "");
    }

    #[test]
    fn test_decode_body() {
        assert_eq!(decode_body(""), Value::Null);
        assert_eq!(decode_body("[1,2]"), json!([1, 2]));
        assert_eq!(decode_body("plain"), json!("plain"));
    }

    #[test]
    fn test_error_message_prefers_api_message() {
        assert_eq!(
            error_message(r#"{"message":"This service does not exist"}"#),
            "This service does not exist"
        );
        assert_eq!(error_message("Bad gateway"), "Bad gateway");
    }
}
