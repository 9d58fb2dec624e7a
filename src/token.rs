//! Dependency tokens
//!
//! A dependency token is the normalized `<identifier>:<loader>@<game_version>`
//! shape that both dependency sources (the registry API and archive metadata)
//! produce, so the resolution engine can consume them uniformly. The loader
//! and game version are always those of the package being processed, not the
//! dependency's own constraints.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyToken {
    /// Dependency identifier: a slug, a mod id, or an opaque project ID
    pub id: String,
    pub loader: String,
    pub game_version: String,
}

impl DependencyToken {
    pub fn new(id: &str, loader: &str, game_version: &str) -> Self {
        Self {
            id: id.to_string(),
            loader: loader.to_string(),
            game_version: game_version.to_string(),
        }
    }

    /// Parse a token string. Missing segments come back empty, so parsing
    /// never fails; the identifier is everything before the first `:`.
    pub fn parse(raw: &str) -> Self {
        let (id, rest) = match raw.split_once(':') {
            Some((id, rest)) => (id, rest),
            None => (raw, ""),
        };
        let (loader, game_version) = match rest.split_once('@') {
            Some((loader, game_version)) => (loader, game_version),
            None => (rest, ""),
        };

        Self::new(id, loader, game_version)
    }
}

impl fmt::Display for DependencyToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}@{}", self.id, self.loader, self.game_version)
    }
}
