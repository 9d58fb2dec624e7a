//! Local Minecraft storage layout
//!
//! Resolves the platform-specific Minecraft directory and the fixed
//! per-category subdirectories that downloads are saved into. The base
//! directory can be overridden with the `MODFETCH_DIR` environment variable,
//! which tests and non-standard launchers rely on.

use std::env;
use std::path::PathBuf;

/// Download categories, each mapping to a fixed subdirectory of the
/// Minecraft directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Mods,
    ResourcePacks,
    Shaders,
    DataPacks,
    ModPacks,
    Plugins,
}

impl Category {
    pub fn dir_name(&self) -> &'static str {
        match self {
            Category::Mods => "mods",
            Category::ResourcePacks => "resourcepacks",
            Category::Shaders => "shaders",
            Category::DataPacks => "datapacks",
            Category::ModPacks => "modpacks",
            Category::Plugins => "plugins",
        }
    }

    /// Destination directory for this category under `base`
    pub fn dir(&self, base: &std::path::Path) -> PathBuf {
        base.join(self.dir_name())
    }
}

/// Locate the Minecraft directory for the current platform
///
/// - Windows: `%USERPROFILE%\AppData\Roaming\.minecraft`
/// - macOS: `~/Library/Application Support/minecraft`
/// - elsewhere: `~/.minecraft`
pub fn minecraft_dir() -> PathBuf {
    if let Ok(dir) = env::var("MODFETCH_DIR") {
        return PathBuf::from(dir);
    }

    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));

    if cfg!(windows) {
        home.join("AppData").join("Roaming").join(".minecraft")
    } else if cfg!(target_os = "macos") {
        home.join("Library")
            .join("Application Support")
            .join("minecraft")
    } else {
        home.join(".minecraft")
    }
}
