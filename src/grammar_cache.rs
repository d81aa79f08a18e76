//! On-disk cache of built route trees, one file per endpoint.
//!
//! The file is a format version byte followed by the postcard encoding of
//! [`CachedGrammar`]. A file written by another format version, or for
//! another endpoint URL, is treated as absent.

use crate::constants;
use crate::error::Error;
use crate::fs::FileSystem;
use crate::routes::RouteNode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Bumped whenever the encoding of [`RouteNode`] changes.
pub const GRAMMAR_FORMAT_VERSION: u8 = 1;

#[derive(Debug, Serialize, Deserialize)]
pub struct CachedGrammar {
    /// Endpoint the schemas were downloaded from.
    pub endpoint_url: String,
    pub root: RouteNode,
}

pub struct GrammarCache<'a, F: FileSystem> {
    fs: &'a F,
    cache_dir: PathBuf,
}

impl<'a, F: FileSystem> GrammarCache<'a, F> {
    pub fn new(fs: &'a F, cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            cache_dir: cache_dir.into(),
        }
    }

    #[must_use]
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Cache file of `endpoint`, e.g. `<cache_dir>/ovh-eu.bin`.
    #[must_use]
    pub fn path_for(&self, endpoint: &str) -> PathBuf {
        self.cache_dir
            .join(format!("{endpoint}{}", constants::FILE_EXT_BIN))
    }

    /// Loads the tree cached for `endpoint`.
    ///
    /// Returns `Ok(None)` when nothing usable is cached: no file, an older
    /// format version, or a tree built from another URL.
    ///
    /// # Errors
    /// Returns [`Error::CacheCorrupted`] when the file cannot be decoded, and
    /// an I/O error when it exists but cannot be read.
    pub fn load(&self, endpoint: &str, endpoint_url: &str) -> Result<Option<RouteNode>, Error> {
        let path = self.path_for(endpoint);
        if !self.fs.exists(&path) {
            debug!(target: "apitree::cache", "No cached grammar at {}", path.display());
            return Ok(None);
        }

        let bytes = self.fs.read(&path)?;
        let Some((&version, payload)) = bytes.split_first() else {
            return Err(Error::CacheCorrupted {
                name: endpoint.to_string(),
                reason: "empty file".to_string(),
            });
        };
        if version != GRAMMAR_FORMAT_VERSION {
            debug!(
                target: "apitree::cache",
                "Ignoring cached grammar with format version {version}"
            );
            return Ok(None);
        }

        let cached: CachedGrammar =
            postcard::from_bytes(payload).map_err(|e| Error::CacheCorrupted {
                name: endpoint.to_string(),
                reason: e.to_string(),
            })?;

        if cached.endpoint_url != endpoint_url {
            debug!(
                target: "apitree::cache",
                "Cached grammar was built for {}, not {endpoint_url}",
                cached.endpoint_url
            );
            return Ok(None);
        }

        Ok(Some(cached.root))
    }

    /// Writes `root` as the cached tree of `endpoint`, replacing any previous
    /// file atomically.
    ///
    /// # Errors
    /// Returns an error if the tree cannot be encoded or the file cannot be
    /// written.
    pub fn store(&self, endpoint: &str, endpoint_url: &str, root: &RouteNode) -> Result<(), Error> {
        let cached = CachedGrammar {
            endpoint_url: endpoint_url.to_string(),
            root: root.clone(),
        };
        let payload = postcard::to_allocvec(&cached).map_err(|e| Error::CacheCorrupted {
            name: endpoint.to_string(),
            reason: e.to_string(),
        })?;

        let mut bytes = Vec::with_capacity(payload.len() + 1);
        bytes.push(GRAMMAR_FORMAT_VERSION);
        bytes.extend_from_slice(&payload);

        self.fs.create_dir_all(&self.cache_dir)?;
        let path = self.path_for(endpoint);
        self.fs.write_all(&path, &bytes)?;
        debug!(target: "apitree::cache", "Stored grammar at {}", path.display());
        Ok(())
    }

    /// Removes the cached tree of `endpoint`, if any.
    ///
    /// # Errors
    /// Returns an error if an existing file cannot be removed.
    pub fn invalidate(&self, endpoint: &str) -> Result<(), Error> {
        let path = self.path_for(endpoint);
        if self.fs.exists(&path) {
            self.fs.remove_file(&path)?;
        }
        Ok(())
    }
}
