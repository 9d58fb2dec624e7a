//! User configuration
//!
//! Configuration is stored in TOML format at `~/.modfetch/config.toml`
//! (overridable with the `MODFETCH_CONFIG_DIR` environment variable). A
//! missing file means defaults; nothing is written until `save` is called.
//!
//! ```toml
//! [registry]
//! url = "https://api.modrinth.com/v2"
//!
//! [dependencies]
//! include_soft = true
//! ignore = ["some-runtime-shim"]
//! ```

use crate::registry::DEFAULT_REGISTRY_URL;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub registry: RegistryConfig,

    #[serde(default)]
    pub dependencies: DependencyConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Base URL of the Modrinth-compatible API
    #[serde(default = "default_registry_url")]
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyConfig {
    /// Whether `softdepend` entries in plugin descriptors are fetched like
    /// hard dependencies. Defaults to true, matching the eager behavior
    /// users already expect.
    #[serde(default = "default_include_soft")]
    pub include_soft: bool,

    /// Extra identifiers to skip during dependency resolution, on top of
    /// the built-in ignore list
    #[serde(default)]
    pub ignore: Vec<String>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            url: default_registry_url(),
        }
    }
}

impl Default for DependencyConfig {
    fn default() -> Self {
        Self {
            include_soft: default_include_soft(),
            ignore: Vec::new(),
        }
    }
}

fn default_registry_url() -> String {
    DEFAULT_REGISTRY_URL.to_string()
}

fn default_include_soft() -> bool {
    true
}

impl Config {
    /// Configuration directory: `$MODFETCH_CONFIG_DIR` or `~/.modfetch`
    pub fn config_dir() -> PathBuf {
        if let Ok(dir) = std::env::var("MODFETCH_CONFIG_DIR") {
            return PathBuf::from(dir);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".modfetch")
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_dir())
    }

    pub fn load_from(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        toml::from_str(&content).map_err(Error::from)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_dir())
    }

    pub fn save_to(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)?;
        let content = toml::to_string_pretty(self)?;
        fs::write(dir.join(CONFIG_FILE_NAME), content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.registry.url, DEFAULT_REGISTRY_URL);
        assert!(config.dependencies.include_soft);
        assert!(config.dependencies.ignore.is_empty());
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load_from(temp_dir.path()).unwrap();
        assert_eq!(config.registry.url, DEFAULT_REGISTRY_URL);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = TempDir::new().unwrap();

        let mut config = Config::default();
        config.registry.url = "http://localhost:8080".to_string();
        config.dependencies.include_soft = false;
        config.dependencies.ignore = vec!["my-runtime".to_string()];
        config.save_to(temp_dir.path()).unwrap();

        let loaded = Config::load_from(temp_dir.path()).unwrap();
        assert_eq!(loaded.registry.url, "http://localhost:8080");
        assert!(!loaded.dependencies.include_soft);
        assert_eq!(loaded.dependencies.ignore, vec!["my-runtime"]);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            "[registry]\nurl = \"http://localhost:9999\"\n",
        )
        .unwrap();

        let config = Config::load_from(temp_dir.path()).unwrap();
        assert_eq!(config.registry.url, "http://localhost:9999");
        assert!(config.dependencies.include_soft);
    }
}
