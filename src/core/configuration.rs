//! Persisted project configuration (`.kiri/configuration`).
//!
//! ```toml
//! [extensions]
//! header = ["h", "hpp"]
//! source = ["cpp"]
//!
//! [paths]
//! include = ["."]
//! exclude = [".kiri", "/usr/include/boost"]
//! ```
//!
//! Relative paths are resolved against the origin.

use crate::core::error::KiriError;
use crate::core::extensions::{ExtensionRegistry, Kind};
use crate::core::origin;
use crate::core::storage::Storage;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Configuration {
    #[serde(default)]
    pub extensions: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub paths: PathRules,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct PathRules {
    #[serde(default)]
    pub include: Vec<PathBuf>,
    #[serde(default)]
    pub exclude: Vec<PathBuf>,
}

/// Paths a configuration tried to register but the storage refused, either
/// because they do not exist or because they are already covered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Applied {
    pub rejected_includes: Vec<PathBuf>,
    pub rejected_excludes: Vec<PathBuf>,
}

impl Configuration {
    /// Defaults written by `kiri init`: C/C++ extensions, the whole project
    /// included, the marker directory excluded.
    pub fn default_project() -> Self {
        let mut extensions: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (kind, exts) in ExtensionRegistry::with_defaults().iter() {
            extensions.insert(kind.to_string(), exts.iter().cloned().collect());
        }

        Self {
            extensions,
            paths: PathRules {
                include: vec![PathBuf::from(".")],
                exclude: vec![PathBuf::from(origin::MARKER_DIR)],
            },
        }
    }

    /// Missing file means an empty configuration.
    pub fn load(file: &Path) -> Result<Self, KiriError> {
        if !file.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(file).map_err(KiriError::IoError)?;
        toml::from_str(&content).map_err(|e| KiriError::Configuration(e.to_string()))
    }

    pub fn save(&self, file: &Path) -> Result<(), KiriError> {
        let content =
            toml::to_string(self).map_err(|e| KiriError::Configuration(e.to_string()))?;
        fs::write(file, content).map_err(KiriError::IoError)
    }

    pub fn apply(&self, storage: &mut Storage) -> Applied {
        for (kind, exts) in &self.extensions {
            for ext in exts {
                storage.use_extension(Kind::from(kind.as_str()), ext);
            }
        }

        let resolve = |path: &Path| match storage.origin() {
            Some(origin) if path.is_relative() => origin.join(path),
            _ => path.to_path_buf(),
        };
        let includes: Vec<PathBuf> = self
            .paths
            .include
            .iter()
            .map(|p| resolve(p.as_path()))
            .collect();
        let excludes: Vec<PathBuf> = self
            .paths
            .exclude
            .iter()
            .map(|p| resolve(p.as_path()))
            .collect();

        let mut applied = Applied::default();
        for path in includes {
            if !storage.include(&path) {
                warn!(path = %path.display(), "include rejected");
                applied.rejected_includes.push(path);
            }
        }
        for path in excludes {
            if !storage.exclude(&path) {
                warn!(path = %path.display(), "exclude rejected");
                applied.rejected_excludes.push(path);
            }
        }
        applied
    }
}
