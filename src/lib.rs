//! modfetch - a Minecraft content downloader for Modrinth
//!
//! modfetch fetches mods, modpacks, resource packs, shaders and data packs
//! from the Modrinth registry and drops them into the right folders of the
//! local Minecraft installation. Its main feature is recursive dependency
//! resolution: for every downloaded mod it collects required dependencies
//! both from the registry API and from the manifest files embedded in the
//! downloaded jar, resolves their naming-convention variants to real
//! registry slugs, and downloads them too.
//!
//! # Examples
//!
//! ```no_run
//! use modfetch::{ModrinthClient, Resolver};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = ModrinthClient::new_default()?;
//! let mods_dir = modfetch::storage::minecraft_dir().join("mods");
//!
//! // One resolver per run: its visited set deduplicates downloads
//! let mut resolver = Resolver::new(&registry, mods_dir);
//! resolver.download_with_dependencies("sodium", "1.20.1", "fabric");
//! resolver.download_with_dependencies("lithium", "1.20.1", "fabric");
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`registry`] - Modrinth v2 API client and response types
//! - [`matcher`] - first-match version selection by game version and loader
//! - [`metadata`] - dependency extraction from archive manifest files
//! - [`resolver`] - slug resolution and the recursive download engine
//! - [`token`] - the normalized dependency token shape
//! - [`storage`] - Minecraft directory and category subdirectory layout
//! - [`config`] - user configuration
//! - [`error`] - error types and result handling

pub mod config;
pub mod error;
pub mod matcher;
pub mod metadata;
pub mod registry;
pub mod resolver;
pub mod storage;
pub mod token;

pub use config::Config;
pub use error::{Error, Result};
pub use matcher::find_matching_version;
pub use metadata::extract_dependencies;
pub use registry::{
    DependencyType, ModrinthClient, Project, ProjectType, ProjectVersion, VersionDependency,
    VersionFile, DEFAULT_REGISTRY_URL,
};
pub use resolver::{download_project, Resolver, DEFAULT_IGNORED_DEPENDENCIES};
pub use storage::{minecraft_dir, Category};
pub use token::DependencyToken;
