//! Modrinth registry client
//!
//! Thin wrapper over the Modrinth v2 HTTP API. Fetches project metadata and
//! version lists, and downloads version files. All calls are blocking and go
//! through a single client with one 30-second timeout; there are no retries,
//! so a failure is surfaced to the caller immediately.
//!
//! # Examples
//!
//! ```no_run
//! use modfetch::ModrinthClient;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = ModrinthClient::new_default()?;
//! let versions = registry.get_versions("sodium")?;
//! println!("{} published versions", versions.len());
//! # Ok(())
//! # }
//! ```

use crate::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Production Modrinth API endpoint
pub const DEFAULT_REGISTRY_URL: &str = "https://api.modrinth.com/v2";

/// Timeout applied to every registry and download request
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct ModrinthClient {
    base_url: String,
    client: reqwest::blocking::Client,
}

/// Project metadata from `GET /project/{slug}`
#[derive(Debug, Clone, Deserialize)]
pub struct Project {
    #[serde(default)]
    pub slug: String,
    pub project_type: ProjectType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Mod,
    Modpack,
    #[serde(rename = "resourcepack")]
    ResourcePack,
    Shader,
    Datapack,
    Plugin,
    #[serde(other)]
    Unknown,
}

/// One published version from `GET /project/{slug}/version`
///
/// The registry returns versions newest-first; callers rely on that order.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectVersion {
    #[serde(default)]
    pub game_versions: Vec<String>,
    #[serde(default)]
    pub loaders: Vec<String>,
    #[serde(default)]
    pub dependencies: Vec<VersionDependency>,
    #[serde(default)]
    pub files: Vec<VersionFile>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VersionDependency {
    pub project_id: Option<String>,
    pub dependency_type: DependencyType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyType {
    Required,
    Optional,
    Incompatible,
    Embedded,
    #[serde(other)]
    Unknown,
}

/// A downloadable file attached to a version. The first file in a version's
/// list is treated as the primary artifact.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionFile {
    pub url: String,
}

impl ModrinthClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    /// Create a client pointed at the production Modrinth API
    pub fn new_default() -> Result<Self> {
        Self::new(DEFAULT_REGISTRY_URL)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch project metadata
    ///
    /// Any non-success status is reported as [`Error::ProjectNotFound`]; the
    /// registry answers 404 both for unknown slugs and malformed ones.
    pub fn get_project(&self, slug: &str) -> Result<Project> {
        let url = format!("{}/project/{}", self.base_url, urlencoding::encode(slug));

        let response = self.client.get(&url).send()?;
        if !response.status().is_success() {
            return Err(Error::ProjectNotFound(slug.to_string()));
        }

        Ok(response.json()?)
    }

    /// Fetch the published versions of a project, newest first
    pub fn get_versions(&self, slug: &str) -> Result<Vec<ProjectVersion>> {
        let url = format!(
            "{}/project/{}/version",
            self.base_url,
            urlencoding::encode(slug)
        );

        let response = self.client.get(&url).send()?;
        if !response.status().is_success() {
            return Err(Error::ProjectNotFound(slug.to_string()));
        }

        Ok(response.json()?)
    }

    /// Existence probe used by slug resolution. Transport failures count as
    /// "does not exist" so a flaky lookup never aborts a run.
    pub fn project_exists(&self, slug: &str) -> bool {
        self.get_project(slug).is_ok()
    }

    /// Download a file into `dest_dir`, named after the URL's final path
    /// segment. The directory is created if missing. The file is written
    /// directly to its final name, without an atomic rename.
    pub fn download(&self, url: &str, dest_dir: &Path) -> Result<PathBuf> {
        let file_name = file_name_from_url(url)?;
        fs::create_dir_all(dest_dir)?;
        let output_path = dest_dir.join(file_name);

        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::DownloadFailed {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes()?;
        fs::write(&output_path, &bytes)?;

        Ok(output_path)
    }
}

/// Extract the saved filename from a download URL (its last path segment)
fn file_name_from_url(raw: &str) -> Result<String> {
    let url = url::Url::parse(raw).map_err(|_| Error::InvalidUrl(raw.to_string()))?;
    let name = url
        .path_segments()
        .and_then(|segments| segments.last().map(str::to_string))
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::InvalidUrl(raw.to_string()))?;

    // Path segments may be percent-encoded in the URL
    Ok(urlencoding::decode(&name)
        .map(|s| s.into_owned())
        .unwrap_or(name))
}
