//! Atomic file writes for the grammar cache and the config file.
//!
//! Data goes to a temporary sibling first and is then renamed over the
//! target, so a reader sees either the old file or the complete new one.
//! `rename` is atomic within one filesystem on POSIX, and on Windows for
//! same-volume moves.

use std::path::{Path, PathBuf};

/// Writes `data` to `path` via a temporary sibling and a rename.
///
/// # Errors
///
/// Returns an error if the parent directory of `path` does not exist, the
/// temporary file cannot be written or the rename fails.
pub fn atomic_write(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let temp_path = temp_sibling(path);

    std::fs::write(&temp_path, data)?;

    if let Err(e) = std::fs::rename(&temp_path, path) {
        let _ = std::fs::remove_file(&temp_path);
        return Err(e);
    }

    Ok(())
}

/// Unique hidden sibling of `path`, e.g. `.grammar.bin.3f2a....tmp`.
fn temp_sibling(path: &Path) -> PathBuf {
    let random_suffix = fastrand::u64(..);
    let file_name = path
        .file_name()
        .map_or_else(|| "file".to_string(), |n| n.to_string_lossy().to_string());

    path.with_file_name(format!(".{file_name}.{random_suffix:016x}.tmp"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atomic_write_replaces_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grammar.bin");

        atomic_write(&path, b"first").unwrap();
        atomic_write(&path, b"second").unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"second");
        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_atomic_write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("grammar.bin");
        assert!(atomic_write(&path, b"data").is_err());
    }

    #[test]
    fn test_temp_sibling_stays_in_same_directory() {
        let path = Path::new("/tmp/cache/grammar.bin");
        let temp = temp_sibling(path);
        assert_eq!(temp.parent(), path.parent());
        assert!(temp
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with(".grammar.bin."));
    }
}
