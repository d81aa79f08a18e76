//! Fetching of the root index and every resource schema it lists.

use crate::constants;
use crate::error::Error;
use crate::output::Output;
use crate::schema::models::{RootIndex, SchemaModel};
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{debug, info};

/// Provider of raw schema documents, addressed by name (`/`, `/me.json`, ...).
pub trait SchemaSource: Send + Sync {
    fn fetch(&self, name: &str) -> impl Future<Output = Result<Value, Error>> + Send;
}

/// Downloads schema documents from the API endpoint.
pub struct HttpSchemaSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSchemaSource {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl SchemaSource for HttpSchemaSource {
    async fn fetch(&self, name: &str) -> Result<Value, Error> {
        let url = format!("{}{name}", self.base_url);
        info!(target: "apitree::loader", "Downloading schema {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::SchemaFetch {
                name: name.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::SchemaFetch {
                name: name.to_string(),
                reason: format!("server answered {status}"),
            });
        }

        response.json().await.map_err(|e| Error::SchemaFetch {
            name: name.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Documents fetched during one invocation, keyed by schema name.
#[derive(Debug, Default)]
pub struct SchemaCache {
    documents: HashMap<String, Value>,
}

impl SchemaCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.documents.get(name)
    }

    pub fn insert(&mut self, name: String, document: Value) {
        self.documents.insert(name, document);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

async fn fetch_cached<S: SchemaSource>(
    source: &S,
    cache: &mut SchemaCache,
    name: &str,
) -> Result<Value, Error> {
    if let Some(document) = cache.get(name) {
        debug!(target: "apitree::loader", "Schema {name} already loaded");
        return Ok(document.clone());
    }
    let document = source.fetch(name).await?;
    cache.insert(name.to_string(), document.clone());
    Ok(document)
}

/// Loads the root index, then every resource schema it lists.
///
/// Resource schemas are fetched concurrently; the returned list follows the
/// root index order and is complete before the caller sees it. Documents
/// without a `resourcePath` are skipped.
///
/// # Errors
/// Returns an error if any document cannot be fetched or decoded.
pub async fn load_schemas<S>(
    source: Arc<S>,
    cache: &mut SchemaCache,
    output: &Output,
) -> Result<Vec<SchemaModel>, Error>
where
    S: SchemaSource + 'static,
{
    let root = fetch_cached(source.as_ref(), cache, constants::SCHEMA_ROOT).await?;
    let index: RootIndex = serde_json::from_value(root).map_err(|e| Error::SchemaFetch {
        name: constants::SCHEMA_ROOT.to_string(),
        reason: e.to_string(),
    })?;

    let names: Vec<String> = index.apis.iter().map(|api| api.schema_name()).collect();
    let mut documents: Vec<Option<Value>> = names.iter().map(|name| cache.get(name).cloned()).collect();

    let mut pending = JoinSet::new();
    for (position, name) in names.iter().enumerate() {
        if documents[position].is_some() {
            continue;
        }
        output.progress(format!("Downloading schema {name}"));
        let source = Arc::clone(&source);
        let name = name.clone();
        pending.spawn(async move {
            let document = source.fetch(&name).await;
            (position, name, document)
        });
    }

    while let Some(joined) = pending.join_next().await {
        let (position, name, document) = joined.map_err(|e| Error::Anyhow(e.into()))?;
        let document = document?;
        cache.insert(name, document.clone());
        documents[position] = Some(document);
    }

    let mut schemas = Vec::with_capacity(names.len());
    for (name, document) in names.iter().zip(documents) {
        let Some(document) = document else { continue };
        if document.get("resourcePath").is_none() {
            debug!(target: "apitree::loader", "Skipping {name}: no resourcePath");
            continue;
        }
        let schema = serde_json::from_value(document).map_err(|e| Error::SchemaFetch {
            name: name.clone(),
            reason: e.to_string(),
        })?;
        schemas.push(schema);
    }

    info!(target: "apitree::loader", "Loaded {} resource schemas", schemas.len());
    Ok(schemas)
}
