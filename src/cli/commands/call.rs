//! The single command of the CLI: resolve route tokens and run the call.

use crate::cli::Cli;
use crate::config::{select_endpoint, ConfigManager, Endpoint};
use crate::error::Error;
use crate::fs::FileSystem;
use crate::grammar_cache::GrammarCache;
use crate::output::Output;
use crate::render::{render, OutputFormat};
use crate::routes::{self, render_help, Resolution, RouteNode};
use crate::schema::{load_schemas, HttpSchemaSource, SchemaCache, SchemaSource};
use crate::transport::{dispatch, HttpTransport, Transport};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// Returns the route tree of `endpoint`, from the cache unless `refresh` is
/// set or the cache is unusable. A freshly built tree is written back.
pub async fn load_grammar<F, S>(
    cache: &GrammarCache<'_, F>,
    endpoint: &Endpoint,
    source: Arc<S>,
    refresh: bool,
    output: &Output,
) -> Result<RouteNode, Error>
where
    F: FileSystem,
    S: SchemaSource + 'static,
{
    if !refresh {
        match cache.load(&endpoint.name, &endpoint.url) {
            Ok(Some(root)) => {
                debug!(target: "apitree::cache", "Using cached grammar for {}", endpoint.name);
                return Ok(root);
            }
            Ok(None) => {}
            Err(e) => debug!(target: "apitree::cache", "Rebuilding grammar: {e}"),
        }
    }

    let schemas = load_schemas(source, &mut SchemaCache::new(), output).await?;
    let root = routes::build(&schemas)?;

    if let Err(e) = cache.store(&endpoint.name, &endpoint.url, &root) {
        warn!(target: "apitree::cache", "Could not store grammar: {e}");
    }
    Ok(root)
}

/// Resolves `tokens` against `root` and produces what goes to stdout:
/// help text, the dry-run call, or the rendered response.
pub async fn run_call<T: Transport>(
    root: &RouteNode,
    tokens: &[String],
    transport: &T,
    format: OutputFormat,
    dry_run: bool,
) -> Result<String, Error> {
    if tokens.is_empty() {
        return Ok(render_help(root));
    }

    match routes::resolve(root, tokens)? {
        Resolution::Help(text) => Ok(text),
        Resolution::Call(call) if dry_run => Ok(serde_json::to_string_pretty(&call)?),
        Resolution::Call(call) => {
            let response = dispatch(transport, &call).await?;
            render(&response, format)
        }
    }
}

/// File name of the running executable, used to pick an endpoint when the
/// binary is installed under an endpoint's name.
fn program_name() -> Option<String> {
    std::env::args_os()
        .next()
        .as_deref()
        .map(Path::new)
        .and_then(Path::file_stem)
        .map(|stem| stem.to_string_lossy().into_owned())
}

/// Runs one invocation end to end.
pub async fn execute<F: FileSystem>(
    cli: &Cli,
    manager: &ConfigManager<F>,
    output: &Output,
) -> Result<(), Error> {
    debug!(target: "apitree::loader", "Config directory {}", manager.config_dir().display());
    let config = manager.load_global_config()?;
    let endpoint = select_endpoint(cli.endpoint.as_deref(), program_name().as_deref(), &config)?;
    debug!(target: "apitree::loader", "Using endpoint {} ({})", endpoint.name, endpoint.url);

    let cache = GrammarCache::new(manager.fs(), manager.cache_dir());
    let source = Arc::new(HttpSchemaSource::new(&endpoint.url, config.timeout_secs)?);
    let root = load_grammar(&cache, &endpoint, source, cli.refresh, output).await?;

    let format = cli.format.or(config.default_format).unwrap_or_default();
    let transport = HttpTransport::new(&endpoint.url, config.timeout_secs)?;
    let text = run_call(&root, &cli.args, &transport, format, cli.dry_run).await?;

    println!("{text}");
    Ok(())
}
