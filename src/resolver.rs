//! Slug resolution and the recursive dependency download engine
//!
//! [`Resolver`] owns the per-run state: the visited set that deduplicates
//! downloads and terminates recursion, and the ignore list of identifiers
//! that must never be fetched (loader runtimes, the game itself, platform
//! API shims). Each CLI invocation builds one resolver; independent runs
//! never share state.
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
//! let mut resolver = Resolver::new(&registry, mods_dir);
//! resolver.download_with_dependencies("sodium", "1.20.1", "fabric");
//! # Ok(())
//! # }
//! ```

use crate::matcher::find_matching_version;
use crate::metadata::extract_dependencies;
use crate::registry::DependencyType;
use crate::{DependencyToken, Error, ModrinthClient, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Identifiers that are provided by the loader or the game itself and must
/// never be treated as downloadable dependencies.
pub const DEFAULT_IGNORED_DEPENDENCIES: &[&str] = &[
    "fabricloader",
    "quilt-loader",
    "minecraft",
    "java",
    "fabric-renderer-api-v1",
    "fabric-rendering-fluids-v1",
    "fabric-resource-loader-v0",
    "fabric-block-view-api-v2",
];

/// Download a project's first matching version file into `dest_dir`
///
/// Non-recursive; used directly for modpacks, shaders, resource packs and
/// data packs, and by the resolver for each mod it processes.
pub fn download_project(
    registry: &ModrinthClient,
    slug: &str,
    game_version: &str,
    loader: &str,
    dest_dir: &Path,
) -> Result<PathBuf> {
    let versions = registry.get_versions(slug)?;
    let version = find_matching_version(slug, &versions, game_version, loader)?;
    let file = version
        .files
        .first()
        .ok_or_else(|| Error::NoFiles(slug.to_string()))?;
    registry.download(&file.url, dest_dir)
}

/// Naming-convention variants tried, in order, when resolving a loosely
/// specified dependency identifier to a registry slug.
fn slug_variants(identifier: &str) -> Vec<String> {
    vec![
        identifier.to_string(),
        format!("{}-api", identifier),
        format!("{}-mod", identifier),
        format!("{}-mc", identifier),
        identifier.replace('-', "_"),
        identifier.replace('-', ""),
        identifier.replace('_', "-"),
        identifier.replace('_', ""),
    ]
}

pub struct Resolver<'a> {
    registry: &'a ModrinthClient,
    mods_dir: PathBuf,
    ignored: HashSet<String>,
    include_soft_dependencies: bool,
    visited: HashSet<String>,
}

impl<'a> Resolver<'a> {
    pub fn new(registry: &'a ModrinthClient, mods_dir: PathBuf) -> Self {
        Self {
            registry,
            mods_dir,
            ignored: DEFAULT_IGNORED_DEPENDENCIES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            include_soft_dependencies: true,
            visited: HashSet::new(),
        }
    }

    /// Add identifiers to the ignore list (lowercased)
    pub fn ignore<I, S>(mut self, identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.ignored
            .extend(identifiers.into_iter().map(|s| s.as_ref().to_lowercase()));
        self
    }

    /// Whether `softdepend` plugin entries are fetched like hard dependencies
    pub fn include_soft_dependencies(mut self, include: bool) -> Self {
        self.include_soft_dependencies = include;
        self
    }

    /// Canonical slugs processed so far in this run
    pub fn visited(&self) -> &HashSet<String> {
        &self.visited
    }

    /// Resolve a loosely specified identifier to an existing registry slug
    ///
    /// Tries the fixed variant list in order and returns the first variant
    /// the registry knows; variants after a hit are never queried. `None`
    /// means the dependency cannot be resolved (not fatal to the run).
    pub fn resolve_slug(&self, identifier: &str) -> Option<String> {
        slug_variants(identifier)
            .into_iter()
            .find(|variant| self.registry.project_exists(variant))
    }

    /// Translate an opaque project ID to its slug
    ///
    /// Falls back to the input unchanged when the lookup fails or reports
    /// an empty slug.
    pub fn id_to_slug(&self, identifier: &str) -> String {
        match self.registry.get_project(identifier) {
            Ok(project) if !project.slug.is_empty() => project.slug,
            _ => identifier.to_string(),
        }
    }

    /// Recursively download a mod and its required dependencies
    ///
    /// The identifier is normalized (ID-to-slug, then lowercased) and marked
    /// visited before the download is attempted, so a failed download is not
    /// retried later in the run. Dependencies come from two sources, API
    /// declarations first, then archive metadata; each is resolved through
    /// [`Self::resolve_slug`] and recursed into with the same loader and
    /// game-version context. Failures are reported on stdout and terminate
    /// only their own branch.
    pub fn download_with_dependencies(
        &mut self,
        identifier: &str,
        game_version: &str,
        loader: &str,
    ) {
        // Re-requesting an already-processed name is a no-op before any
        // network traffic happens.
        let lowered = identifier.to_lowercase();
        if self.visited.contains(&lowered) {
            return;
        }

        // Opaque project IDs are case-sensitive, so translate before
        // normalizing the result to the lowercased canonical slug.
        let slug = self.id_to_slug(identifier).to_lowercase();
        if !self.visited.insert(slug.clone()) {
            return;
        }

        let versions = match self.registry.get_versions(&slug) {
            Ok(versions) => versions,
            Err(err) => {
                println!("Error downloading {}: {}", slug, err);
                return;
            }
        };
        let version = match find_matching_version(&slug, &versions, game_version, loader) {
            Ok(version) => version,
            Err(err) => {
                println!("Error downloading {}: {}", slug, err);
                return;
            }
        };
        let Some(file) = version.files.first() else {
            println!("Error downloading {}: {}", slug, Error::NoFiles(slug.clone()));
            return;
        };

        let path = match self.registry.download(&file.url, &self.mods_dir) {
            Ok(path) => path,
            Err(err) => {
                println!("Error downloading {}: {}", slug, err);
                return;
            }
        };
        println!("Downloaded: {}", path.file_name().unwrap_or_default().to_string_lossy());

        // API-declared dependencies first, then whatever the jar itself
        // declares; duplicates are handled by the visited set, not here.
        let mut tokens: Vec<DependencyToken> = version
            .dependencies
            .iter()
            .filter(|dep| dep.dependency_type == DependencyType::Required)
            .filter_map(|dep| dep.project_id.as_deref())
            .map(|id| DependencyToken::new(id, loader, game_version))
            .collect();
        tokens.extend(extract_dependencies(
            &path,
            game_version,
            loader,
            self.include_soft_dependencies,
        ));

        if !tokens.is_empty() {
            println!("Auto-handled dependencies:");
        }
        for token in tokens {
            if self.ignored.contains(&token.id.to_lowercase()) {
                continue;
            }
            match self.resolve_slug(&token.id) {
                Some(resolved) => self.download_with_dependencies(&resolved, game_version, loader),
                None => println!("Unresolved dependency: {}", token.id),
            }
        }
    }
}
