//! File-system seam for the config manager and the grammar cache.

use crate::atomic::atomic_write;
use std::io;
use std::path::Path;

/// The file operations apitree needs, so that config loading and the
/// grammar cache can run against a temporary directory in tests.
pub trait FileSystem {
    /// # Errors
    /// Fails when the file is missing, unreadable or not UTF-8.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// # Errors
    /// Fails when the file is missing or unreadable.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Replaces `path` with `contents`. Readers never observe a partially
    /// written file.
    ///
    /// # Errors
    /// Fails when the file or its temporary sibling cannot be written.
    fn write_all(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

    /// # Errors
    /// Fails when a missing directory cannot be created.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// # Errors
    /// Fails when the file is missing or cannot be removed.
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    fn exists(&self, path: &Path) -> bool;
}

/// The real file system.
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn write_all(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        atomic_write(path, contents)
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_file(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}
