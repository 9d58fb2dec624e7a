//! Archive metadata extraction
//!
//! Downloaded jars often declare dependencies the registry API does not
//! report, inside loader-specific manifest files. This module opens a
//! downloaded archive and collects dependency tokens from every known
//! manifest format found inside:
//!
//! - `fabric.mod.json` / `quilt.mod.json`: JSON, keys of the `depends` map
//! - `META-INF/mods.toml` / `META-INF/neoforge.mods.toml`: TOML, the
//!   `modId` of every entry in each mod's `dependencies` list
//! - `plugin.yml`: YAML, the `depend` and (optionally) `softdepend` keys,
//!   each a single name or a list
//!
//! Extraction never fails the caller: an unreadable archive or a malformed
//! manifest simply contributes no tokens.

use crate::DependencyToken;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

const JSON_MANIFESTS: &[&str] = &["fabric.mod.json", "quilt.mod.json"];
const TOML_MANIFESTS: &[&str] = &["meta-inf/mods.toml", "meta-inf/neoforge.mods.toml"];
const PLUGIN_DESCRIPTOR: &str = "plugin.yml";

/// `fabric.mod.json` / `quilt.mod.json`. The `depends` map has no optional
/// marker, so every key is treated as required.
#[derive(Debug, Deserialize)]
struct FabricManifest {
    #[serde(default)]
    depends: BTreeMap<String, serde_json::Value>,
}

/// `mods.toml` / `neoforge.mods.toml`
#[derive(Debug, Deserialize)]
struct ForgeManifest {
    #[serde(default)]
    mods: Vec<ForgeModEntry>,
}

#[derive(Debug, Deserialize)]
struct ForgeModEntry {
    #[serde(default)]
    dependencies: Vec<ForgeDependencyEntry>,
}

#[derive(Debug, Deserialize)]
struct ForgeDependencyEntry {
    #[serde(rename = "modId")]
    mod_id: Option<String>,
}

/// `plugin.yml` for Bukkit-family plugins
#[derive(Debug, Deserialize)]
struct PluginDescriptor {
    depend: Option<NameOrList>,
    softdepend: Option<NameOrList>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NameOrList {
    One(String),
    Many(Vec<String>),
}

impl NameOrList {
    fn into_names(self) -> Vec<String> {
        match self {
            NameOrList::One(name) => vec![name],
            NameOrList::Many(names) => names,
        }
    }
}

/// Extract dependency tokens from a downloaded archive
///
/// Every token is stamped with the caller's `loader` and `game_version`
/// context, not anything read from the archive. `include_soft` controls
/// whether `plugin.yml` `softdepend` entries are included alongside hard
/// dependencies.
pub fn extract_dependencies(
    archive_path: &Path,
    game_version: &str,
    loader: &str,
    include_soft: bool,
) -> Vec<DependencyToken> {
    let file = match File::open(archive_path) {
        Ok(f) => f,
        Err(_) => return vec![],
    };
    let mut archive = match ZipArchive::new(file) {
        Ok(a) => a,
        Err(_) => return vec![],
    };

    // Entry names in jars are not consistently cased
    let mut entries = HashMap::new();
    for index in 0..archive.len() {
        if let Ok(entry) = archive.by_index_raw(index) {
            entries.insert(entry.name().to_ascii_lowercase(), index);
        }
    }

    let mut tokens = Vec::new();
    let token = |id: &str| DependencyToken::new(id, loader, game_version);

    for name in JSON_MANIFESTS {
        let Some(content) = read_entry(&mut archive, &entries, name) else {
            continue;
        };
        if let Ok(manifest) = serde_json::from_str::<FabricManifest>(&content) {
            tokens.extend(manifest.depends.keys().map(|id| token(id)));
        }
    }

    for name in TOML_MANIFESTS {
        let Some(content) = read_entry(&mut archive, &entries, name) else {
            continue;
        };
        if let Ok(manifest) = toml::from_str::<ForgeManifest>(&content) {
            for entry in manifest.mods {
                for dep in entry.dependencies {
                    if let Some(mod_id) = dep.mod_id {
                        tokens.push(token(&mod_id));
                    }
                }
            }
        }
    }

    if let Some(content) = read_entry(&mut archive, &entries, PLUGIN_DESCRIPTOR) {
        if let Ok(descriptor) = serde_yaml::from_str::<PluginDescriptor>(&content) {
            if let Some(depend) = descriptor.depend {
                tokens.extend(depend.into_names().iter().map(|id| token(id)));
            }
            if include_soft {
                if let Some(softdepend) = descriptor.softdepend {
                    tokens.extend(softdepend.into_names().iter().map(|id| token(id)));
                }
            }
        }
    }

    tokens
}

fn read_entry<R: Read + std::io::Seek>(
    archive: &mut ZipArchive<R>,
    entries: &HashMap<String, usize>,
    name: &str,
) -> Option<String> {
    let index = *entries.get(name)?;
    let mut entry = archive.by_index(index).ok()?;
    let mut content = String::new();
    entry.read_to_string(&mut content).ok()?;
    Some(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn write_jar(dir: &Path, entries: &[(&str, &str)]) -> std::path::PathBuf {
        let path = dir.join("test.jar");
        let file = File::create(&path).unwrap();
        let mut writer = ZipWriter::new(file);
        for (name, content) in entries {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
        path
    }

    fn ids(tokens: &[DependencyToken]) -> Vec<&str> {
        tokens.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_fabric_manifest_depends() {
        let temp_dir = TempDir::new().unwrap();
        let jar = write_jar(
            temp_dir.path(),
            &[(
                "fabric.mod.json",
                r#"{"id": "coolmod", "depends": {"fabric-api": "*", "yacl": ">=3.0"}}"#,
            )],
        );

        let tokens = extract_dependencies(&jar, "1.20.1", "fabric", true);
        assert_eq!(ids(&tokens), vec!["fabric-api", "yacl"]);
        assert_eq!(tokens[0].to_string(), "fabric-api:fabric@1.20.1");
    }

    #[test]
    fn test_manifest_lookup_case_insensitive() {
        let temp_dir = TempDir::new().unwrap();
        let jar = write_jar(
            temp_dir.path(),
            &[("Fabric.Mod.JSON", r#"{"depends": {"libthing": "*"}}"#)],
        );

        let tokens = extract_dependencies(&jar, "1.20.1", "fabric", true);
        assert_eq!(ids(&tokens), vec!["libthing"]);
    }

    #[test]
    fn test_forge_manifest_dependencies() {
        let temp_dir = TempDir::new().unwrap();
        let jar = write_jar(
            temp_dir.path(),
            &[(
                "META-INF/mods.toml",
                r#"
                    [[mods]]
                    modId = "coolmod"
                    [[mods.dependencies]]
                    modId = "forgelib"
                    [[mods.dependencies]]
                    modId = "otherlib"
                "#,
            )],
        );

        let tokens = extract_dependencies(&jar, "1.20.1", "forge", true);
        assert_eq!(ids(&tokens), vec!["forgelib", "otherlib"]);
    }

    #[test]
    fn test_plugin_descriptor_softdepend_list() {
        let temp_dir = TempDir::new().unwrap();
        let jar = write_jar(
            temp_dir.path(),
            &[("plugin.yml", "name: CoolPlugin\nsoftdepend: [x, y]\n")],
        );

        let tokens = extract_dependencies(&jar, "1.20.1", "paper", true);
        assert_eq!(ids(&tokens), vec!["x", "y"]);
    }

    #[test]
    fn test_plugin_descriptor_soft_excluded() {
        let temp_dir = TempDir::new().unwrap();
        let jar = write_jar(
            temp_dir.path(),
            &[(
                "plugin.yml",
                "name: CoolPlugin\ndepend: Vault\nsoftdepend: [x, y]\n",
            )],
        );

        let tokens = extract_dependencies(&jar, "1.20.1", "paper", false);
        assert_eq!(ids(&tokens), vec!["Vault"]);
    }

    #[test]
    fn test_plugin_descriptor_scalar_depend() {
        let temp_dir = TempDir::new().unwrap();
        let jar = write_jar(temp_dir.path(), &[("plugin.yml", "depend: Vault\n")]);

        let tokens = extract_dependencies(&jar, "1.20.1", "paper", true);
        assert_eq!(ids(&tokens), vec!["Vault"]);
    }

    #[test]
    fn test_multiple_manifests_concatenate() {
        let temp_dir = TempDir::new().unwrap();
        let jar = write_jar(
            temp_dir.path(),
            &[
                ("fabric.mod.json", r#"{"depends": {"fabric-api": "*"}}"#),
                ("plugin.yml", "depend: Vault\n"),
            ],
        );

        let tokens = extract_dependencies(&jar, "1.20.1", "fabric", true);
        assert_eq!(ids(&tokens), vec!["fabric-api", "Vault"]);
    }

    #[test]
    fn test_malformed_manifest_yields_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let jar = write_jar(
            temp_dir.path(),
            &[
                ("fabric.mod.json", "{not json"),
                ("plugin.yml", "depend: Vault\n"),
            ],
        );

        // The broken JSON manifest is skipped; plugin.yml still contributes
        let tokens = extract_dependencies(&jar, "1.20.1", "fabric", true);
        assert_eq!(ids(&tokens), vec!["Vault"]);
    }

    #[test]
    fn test_not_an_archive() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("not-a-jar.jar");
        std::fs::write(&path, "plain text").unwrap();

        assert!(extract_dependencies(&path, "1.20.1", "fabric", true).is_empty());
    }

    #[test]
    fn test_missing_file() {
        let tokens = extract_dependencies(Path::new("/nonexistent.jar"), "1.20.1", "fabric", true);
        assert!(tokens.is_empty());
    }

    #[test]
    fn test_archive_without_manifests() {
        let temp_dir = TempDir::new().unwrap();
        let jar = write_jar(temp_dir.path(), &[("assets/icon.png", "png")]);

        assert!(extract_dependencies(&jar, "1.20.1", "fabric", true).is_empty());
    }
}
