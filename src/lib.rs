//! Kiri: the project file index of a tiny C++ source code assistant.
//!
//! A kiri project is any directory holding a `.kiri/` marker. Given that
//! anchor, this crate decides for every candidate file whether the assistant
//! should look at it, and as what: a header, a source file, or something
//! unclassified.
//!
//! # Architecture
//!
//! - [`core::paths`]: absolute/canonical paths, filesystem-identity
//!   containment
//! - [`core::origin`]: discovery (`locate`) and creation (`initialize`) of
//!   the `.kiri/` layout
//! - [`core::extensions`]: extension → kind registry
//! - [`core::pathset`]: include/exclude sets, partitioned into local and
//!   global paths, with ancestor/descendant pruning
//! - [`core::search`]: depth-first filtered walk the visitor can stop early
//! - [`core::storage`]: the per-project facade tying the above together
//! - [`core::version`], [`core::configuration`]: the `.kiri/version` and
//!   `.kiri/configuration` files
//!
//! # Examples
//!
//! ```bash
//! # Initialize a project
//! kiri init
//!
//! # List every source and header file of the project
//! kiri list
//!
//! # Stop at the first match
//! kiri find main.cpp
//! ```

pub mod core;

mod cli;

use crate::cli::{Cli, Command, OutputFormat, ScopeArgs};
use crate::core::configuration::Configuration;
use crate::core::error::KiriError;
use crate::core::pathset::Location;
use crate::core::storage::Storage;
use crate::core::version::{self, KIRI_VERSION, Version};
use crate::core::{origin, paths, search::Category};

use clap::Parser;
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing::warn;

fn start_dir(dir: Option<PathBuf>) -> Result<PathBuf, KiriError> {
    match dir {
        Some(d) => Ok(paths::absolute(&d)),
        None => Ok(std::env::current_dir()?),
    }
}

fn init_project(dir: Option<PathBuf>) -> Result<(), KiriError> {
    let target = start_dir(dir)?;
    let storage = Storage::initialize_at(&target)?;
    let root = storage.require_origin()?;

    Version::save(&origin::version(root), KIRI_VERSION)?;
    Configuration::default_project().save(&origin::configuration(root))?;

    println!(
        "{} {}",
        "✓ Initialized kiri project at".bright_green(),
        root.display()
    );
    Ok(())
}

/// Locate the enclosing project, refuse newer projects and apply the stored
/// configuration.
fn open_project() -> Result<Storage, KiriError> {
    let mut storage = Storage::discover()?;
    version::check_compatibility(storage.require_origin()?)?;

    let applied = storage.load_configuration()?;
    let rejected = applied.rejected_includes.len() + applied.rejected_excludes.len();
    if rejected > 0 {
        warn!(rejected, "configuration contains paths that were not registered");
    }
    Ok(storage)
}

fn collect_paths(storage: &Storage, exclude: bool, location: Location) -> Vec<String> {
    let set = if exclude {
        storage.excludes()
    } else {
        storage.includes()
    };
    set.get(location)
        .map(|p| p.display().to_string())
        .collect()
}

fn show_status(storage: &Storage, format: OutputFormat) -> Result<(), KiriError> {
    let root = storage.require_origin()?;
    let version_file = origin::version(root);
    let project_version = if version_file.exists() {
        Some(Version::load(&version_file)?.to_string())
    } else {
        None
    };

    match format {
        OutputFormat::Json => {
            let mut rules = serde_json::Map::new();
            for location in [Location::Local, Location::Global] {
                rules.insert(
                    location.to_string(),
                    serde_json::json!({
                        "include": collect_paths(storage, false, location),
                        "exclude": collect_paths(storage, true, location),
                    }),
                );
            }
            let status = serde_json::json!({
                "origin": root,
                "base": origin::base(root),
                "version": project_version,
                "binary_version": KIRI_VERSION,
                "configuration": origin::configuration(root),
                "paths": rules,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&status)
                    .map_err(|e| KiriError::Configuration(e.to_string()))?
            );
        }
        OutputFormat::Text => {
            println!("origin:        {}", root.display());
            println!("base:          {}", origin::base(root).display());
            println!(
                "version:       {}",
                project_version.as_deref().unwrap_or("(missing)")
            );
            println!(
                "configuration: {}",
                origin::configuration(root).display()
            );
            for location in [Location::Local, Location::Global] {
                for path in collect_paths(storage, false, location) {
                    println!("include ({}): {}", location, path);
                }
                for path in collect_paths(storage, true, location) {
                    println!("exclude ({}): {}", location, path);
                }
            }
        }
    }
    Ok(())
}

fn list_files(storage: &Storage, scope: &ScopeArgs, format: OutputFormat) -> Result<(), KiriError> {
    let mut files = Vec::new();
    storage.iterate(
        Category::from(scope.category),
        Location::from(scope.location),
        |path, kind| {
            files.push((path.to_path_buf(), kind.clone()));
            false
        },
    );

    match format {
        OutputFormat::Json => {
            let entries: Vec<serde_json::Value> = files
                .iter()
                .map(|(path, kind)| serde_json::json!({ "path": path, "kind": kind }))
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&entries)
                    .map_err(|e| KiriError::Configuration(e.to_string()))?
            );
        }
        OutputFormat::Text => {
            for (path, kind) in &files {
                println!("{}\t{}", kind, path.display());
            }
        }
    }
    Ok(())
}

fn find_file(storage: &Storage, name: &str, scope: &ScopeArgs) -> Result<(), KiriError> {
    let mut found = None;
    storage.iterate(
        Category::from(scope.category),
        Location::from(scope.location),
        |path, kind| {
            if path.file_name().is_some_and(|n| n == name) {
                found = Some((path.to_path_buf(), kind.clone()));
                return true;
            }
            false
        },
    );

    match found {
        Some((path, kind)) => {
            println!("{}\t{}", kind, path.display());
            Ok(())
        }
        None => Err(KiriError::NotFound(format!("no indexed file named {}", name))),
    }
}

fn classify_path(storage: &Storage, path: &Path) -> Result<(), KiriError> {
    let path = paths::absolute(path);
    let (kind, included) = storage.classify(&path);
    let location = Location::of(&path, storage.origin());

    println!("path:     {}", path.display());
    println!("kind:     {}", kind);
    println!("location: {}", location);
    println!("excluded: {}", !included);
    Ok(())
}

pub fn run() -> Result<(), KiriError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Version => {
            println!("v{}", KIRI_VERSION);
            Ok(())
        }
        Command::Init { dir } => init_project(dir),
        Command::Locate { dir } => {
            let storage = Storage::discover_from(&start_dir(dir)?);
            println!("{}", storage.require_origin()?.display());
            Ok(())
        }
        Command::Status { format } => show_status(&open_project()?, format),
        Command::List { scope, format } => list_files(&open_project()?, &scope, format),
        Command::Find { name, scope } => find_file(&open_project()?, &name, &scope),
        Command::Classify { path } => classify_path(&open_project()?, &path),
    }
}
