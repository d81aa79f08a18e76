use crate::config::models::GlobalConfig;
use crate::constants;
use crate::error::Error;
use crate::fs::{FileSystem, OsFileSystem};
use std::path::{Path, PathBuf};

pub struct ConfigManager<F: FileSystem> {
    fs: F,
    config_dir: PathBuf,
}

impl ConfigManager<OsFileSystem> {
    /// Creates a new `ConfigManager` with the default filesystem and config directory.
    ///
    /// # Errors
    ///
    /// Returns an error if no config directory can be determined.
    pub fn new() -> Result<Self, Error> {
        let config_dir = get_config_dir()?;
        Ok(Self {
            fs: OsFileSystem,
            config_dir,
        })
    }
}

impl<F: FileSystem> ConfigManager<F> {
    pub const fn with_fs(fs: F, config_dir: PathBuf) -> Self {
        Self { fs, config_dir }
    }

    pub const fn fs(&self) -> &F {
        &self.fs
    }

    /// Get the configuration directory path
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Directory holding the cached grammars.
    pub fn cache_dir(&self) -> PathBuf {
        self.config_dir.join(constants::DIR_CACHE)
    }

    /// Loads `config.toml`, or the defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_global_config(&self) -> Result<GlobalConfig, Error> {
        let config_path = self.config_dir.join(constants::CONFIG_FILENAME);
        if !self.fs.exists(&config_path) {
            return Ok(GlobalConfig::default());
        }
        let content = self.fs.read_to_string(&config_path).map_err(|e| {
            Error::from(e).with_context(&format!("Cannot read {}", config_path.display()))
        })?;
        Ok(toml::from_str(&content)?)
    }
}

/// `$APITREE_CONFIG_DIR`, else the platform config directory plus `apitree`.
///
/// # Errors
///
/// Returns an error if neither is available.
pub fn get_config_dir() -> Result<PathBuf, Error> {
    if let Ok(dir) = std::env::var(constants::ENV_APITREE_CONFIG_DIR) {
        if !dir.is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    dirs::config_dir()
        .map(|dir| dir.join(constants::APP_DIR_NAME))
        .ok_or_else(|| {
            Error::Config(format!(
                "Cannot determine a configuration directory; set {}",
                constants::ENV_APITREE_CONFIG_DIR
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::OutputFormat;

    #[test]
    fn test_missing_config_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let manager = ConfigManager::with_fs(OsFileSystem, dir.path().to_path_buf());
        let config = manager.load_global_config().unwrap();
        assert_eq!(config, GlobalConfig::default());
        assert_eq!(config.timeout_secs, constants::DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_load_config_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("config.toml"),
            "default_endpoint = \"kimsufi-eu\"\ndefault_format = \"yaml\"\n\n[endpoints]\nlocal = \"http://localhost:8080/1.0\"\n",
        )
        .unwrap();

        let manager = ConfigManager::with_fs(OsFileSystem, dir.path().to_path_buf());
        let config = manager.load_global_config().unwrap();
        assert_eq!(config.default_endpoint.as_deref(), Some("kimsufi-eu"));
        assert_eq!(config.default_format, Some(OutputFormat::Yaml));
        assert_eq!(
            config.endpoints.get("local").map(String::as_str),
            Some("http://localhost:8080/1.0")
        );
        assert_eq!(manager.cache_dir(), dir.path().join(".cache"));
    }

    #[test]
    fn test_invalid_config_file_is_a_toml_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.toml"), "timeout_secs = \"soon\"").unwrap();
        let manager = ConfigManager::with_fs(OsFileSystem, dir.path().to_path_buf());
        assert!(matches!(manager.load_global_config(), Err(Error::Toml(_))));
    }
}
