//! Version selection against game-version and loader filters
//!
//! Modrinth returns a project's versions newest-first, so taking the first
//! entry that satisfies both filters approximates "latest compatible release"
//! without any semantic-version comparison.

use crate::{Error, ProjectVersion, Result};

/// Find the first version satisfying both filters
///
/// An empty `game_version` or `loader` disables that filter. Game versions
/// are matched exactly; loaders case-insensitively.
///
/// # Arguments
///
/// * `slug` - Project slug, used only for the error message
/// * `versions` - Version list in registry (newest-first) order
/// * `game_version` - Target Minecraft version, or `""` for any
/// * `loader` - Target loader platform, or `""` for any
pub fn find_matching_version<'a>(
    slug: &str,
    versions: &'a [ProjectVersion],
    game_version: &str,
    loader: &str,
) -> Result<&'a ProjectVersion> {
    versions
        .iter()
        .find(|v| version_matches(v, game_version, loader))
        .ok_or_else(|| Error::no_matching_version(slug, game_version, loader))
}

fn version_matches(version: &ProjectVersion, game_version: &str, loader: &str) -> bool {
    let game_ok =
        game_version.is_empty() || version.game_versions.iter().any(|gv| gv == game_version);
    let loader_ok =
        loader.is_empty() || version.loaders.iter().any(|l| l.eq_ignore_ascii_case(loader));
    game_ok && loader_ok
}
