//! Target classification and download dispatch
//!
//! Each positional target is classified by its loader segment, mirroring the
//! shapes users write:
//!
//! - `@f…`, `@neo…`, `@quilt…` (fabric, forge, neoforge, quilt) take the
//!   mod/modpack path with recursive dependency resolution
//! - `@o…`, `@iris…` (optifine, iris) take the shader path
//! - anything else is a resource pack or data pack
//!
//! A category conflict (the registry's declared project type matches neither
//! interpretation of the target) is settled by prompting once. Targets are
//! processed independently; one failing never aborts the rest.

use anyhow::Result;
use modfetch::{
    download_project, Category, Config, Error, ModrinthClient, ProjectType, Resolver,
};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

pub fn run(targets: Vec<String>) -> Result<()> {
    let config = Config::load()?;
    let registry = ModrinthClient::new(config.registry.url.clone())?;
    let base_dir = modfetch::minecraft_dir();

    // One resolver for the whole invocation: a mod requested twice, or
    // pulled in by two siblings, is downloaded once.
    let mut resolver = Resolver::new(&registry, Category::Mods.dir(&base_dir))
        .ignore(&config.dependencies.ignore)
        .include_soft_dependencies(config.dependencies.include_soft);

    for target in &targets {
        process_target(&registry, &mut resolver, &base_dir, target);
    }

    Ok(())
}

fn process_target(
    registry: &ModrinthClient,
    resolver: &mut Resolver,
    base_dir: &Path,
    target: &str,
) {
    let input = target.to_lowercase();

    if input.contains("@f") || input.contains("@neo") || input.contains("@quilt") {
        mod_target(registry, resolver, base_dir, target, &input);
    } else if input.contains("@o") || input.contains("@iris") {
        shader_target(registry, base_dir, target, &input);
    } else {
        pack_target(registry, base_dir, target, &input);
    }
}

/// `mod@loader` / `mod:version@loader`, or the same shapes for a modpack
fn mod_target(
    registry: &ModrinthClient,
    resolver: &mut Resolver,
    base_dir: &Path,
    target: &str,
    input: &str,
) {
    let parts: Vec<&str> = input.split(['@', ':']).filter(|s| !s.is_empty()).collect();
    let (slug, game_version, loader) = match parts.as_slice() {
        [slug, loader] => (*slug, "", *loader),
        [slug, version, loader] => (*slug, *version, *loader),
        _ => {
            println!("{}", Error::InvalidTarget(target.to_string()));
            return;
        }
    };

    if mod_target_is_ambiguous(registry, slug)
        && prompt("Conflict detected! Is this a mod or a modpack? (mod/modpack): ") == "modpack"
    {
        report(
            slug,
            download_project(
                registry,
                slug,
                game_version,
                loader,
                &Category::ModPacks.dir(base_dir),
            ),
        );
    } else {
        resolver.download_with_dependencies(slug, game_version, loader);
    }
}

/// `shader@shaderloader` / `shader:shaderloader@version`
fn shader_target(registry: &ModrinthClient, base_dir: &Path, target: &str, input: &str) {
    let parts: Vec<&str> = input.split(['@', ':']).filter(|s| !s.is_empty()).collect();
    let (slug, loader, game_version) = match parts.as_slice() {
        [slug] => (*slug, "", ""),
        [slug, loader] => (*slug, *loader, ""),
        [slug, loader, version] => (*slug, *loader, *version),
        _ => {
            println!("{}", Error::InvalidTarget(target.to_string()));
            return;
        }
    };

    report(
        slug,
        download_project(
            registry,
            slug,
            game_version,
            loader,
            &Category::Shaders.dir(base_dir),
        ),
    );
}

/// `resourcepack@version` / `datapack@version`
fn pack_target(registry: &ModrinthClient, base_dir: &Path, target: &str, input: &str) {
    let parts: Vec<&str> = input.split('@').filter(|s| !s.is_empty()).collect();
    let (slug, game_version) = match parts.as_slice() {
        [slug] => (*slug, ""),
        [slug, version] => (*slug, *version),
        _ => {
            println!("{}", Error::InvalidTarget(target.to_string()));
            return;
        }
    };

    let category = if pack_target_is_ambiguous(registry, slug)
        && prompt("Conflict detected! Is this a resourcepack or datapack? (resource/datapack): ")
            == "datapack"
    {
        Category::DataPacks
    } else {
        Category::ResourcePacks
    };

    report(
        slug,
        download_project(registry, slug, game_version, "", &category.dir(base_dir)),
    );
}

/// A mod-loader target is ambiguous when the registry's declared project
/// type matches neither interpretation. Lookup failures mean "no conflict".
fn mod_target_is_ambiguous(registry: &ModrinthClient, slug: &str) -> bool {
    match registry.get_project(slug) {
        Ok(project) => !matches!(
            project.project_type,
            ProjectType::Mod | ProjectType::Modpack
        ),
        Err(_) => false,
    }
}

fn pack_target_is_ambiguous(registry: &ModrinthClient, slug: &str) -> bool {
    match registry.get_project(slug) {
        Ok(project) => !matches!(
            project.project_type,
            ProjectType::ResourcePack | ProjectType::Datapack
        ),
        Err(_) => false,
    }
}

fn prompt(question: &str) -> String {
    print!("{}", question);
    let _ = io::stdout().flush();

    let mut answer = String::new();
    let _ = io::stdin().lock().read_line(&mut answer);
    answer.trim().to_lowercase()
}

fn report(slug: &str, result: modfetch::Result<PathBuf>) {
    match result {
        Ok(path) => println!(
            "Downloaded: {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        ),
        Err(err) => println!("Error downloading {}: {}", slug, err),
    }
}
