//! Shared test utilities for binary-level tests

use std::path::PathBuf;

/// Cached binary path for the apitree CLI to avoid repeated lookups
#[allow(deprecated)]
pub static APITREE_BIN: std::sync::LazyLock<PathBuf> =
    std::sync::LazyLock::new(|| assert_cmd::cargo::cargo_bin("apitree"));

/// Test helper to create a command with the cached binary
pub fn apitree_cmd() -> assert_cmd::Command {
    assert_cmd::Command::new(&*APITREE_BIN)
}
