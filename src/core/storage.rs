//! Per-project file index.
//!
//! A `Storage` owns one origin together with the extension registry and the
//! include/exclude sets used to answer "which files belong to this project".
//! It holds no shared state; run independent instances for independent
//! projects.

use crate::core::configuration::{Applied, Configuration};
use crate::core::error::KiriError;
use crate::core::extensions::{ExtensionRegistry, Kind};
use crate::core::origin;
use crate::core::pathset::{LocatedSets, Location};
use crate::core::search::{self, Category};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default)]
pub struct Storage {
    origin: Option<PathBuf>,
    extensions: ExtensionRegistry,
    includes: LocatedSets,
    excludes: LocatedSets,
}

impl Storage {
    /// Find the project enclosing the current directory.
    pub fn discover() -> Result<Self, KiriError> {
        let cwd = std::env::current_dir()?;
        Ok(Self::discover_from(&cwd))
    }

    /// Find the project enclosing `start`. Not finding one is not an error;
    /// check [`Storage::ready`].
    pub fn discover_from(start: &Path) -> Self {
        Self::with_origin(origin::locate(start))
    }

    /// Create a new project in the current directory.
    pub fn initialize() -> Result<Self, KiriError> {
        let cwd = std::env::current_dir()?;
        Self::initialize_at(&cwd)
    }

    /// Create a new project rooted at `path`.
    pub fn initialize_at(path: &Path) -> Result<Self, KiriError> {
        Ok(Self::with_origin(Some(origin::initialize(path)?)))
    }

    fn with_origin(origin: Option<PathBuf>) -> Self {
        Self {
            origin,
            ..Self::default()
        }
    }

    pub fn ready(&self) -> bool {
        self.origin.is_some()
    }

    pub fn origin(&self) -> Option<&Path> {
        self.origin.as_deref()
    }

    /// The origin, or `NotFound` when no project was located.
    pub fn require_origin(&self) -> Result<&Path, KiriError> {
        self.origin().ok_or_else(|| {
            KiriError::NotFound(format!(
                "'{}' directory not found in current or parent directories. Run `kiri init` first.",
                origin::MARKER_DIR
            ))
        })
    }

    pub fn base(&self) -> Option<PathBuf> {
        self.origin().map(origin::base)
    }

    pub fn version(&self) -> Option<PathBuf> {
        self.origin().map(origin::version)
    }

    pub fn configuration(&self) -> Option<PathBuf> {
        self.origin().map(origin::configuration)
    }

    /// Index path reserved for `identifier` under the given location.
    pub fn create(&self, location: Location, identifier: &str) -> Option<PathBuf> {
        self.origin().map(|origin| match location {
            Location::Local => origin::local_index(origin).join(identifier),
            Location::Global => origin::global_index(origin).join(identifier),
        })
    }

    pub fn use_extension(&mut self, kind: Kind, extension: &str) {
        self.extensions.register(kind, extension);
    }

    pub fn extensions(&self) -> &ExtensionRegistry {
        &self.extensions
    }

    pub fn include(&mut self, path: &Path) -> bool {
        self.includes.insert(path, self.origin.as_deref())
    }

    pub fn exclude(&mut self, path: &Path) -> bool {
        self.excludes.insert(path, self.origin.as_deref())
    }

    pub fn includes(&self) -> &LocatedSets {
        &self.includes
    }

    pub fn excludes(&self) -> &LocatedSets {
        &self.excludes
    }

    /// Kind of `path` and whether the exclusion rules let it through.
    pub fn classify(&self, path: &Path) -> (Kind, bool) {
        (self.extensions.classify(path), self.excludes.verify(path))
    }

    /// Run `visit` over the files of `category` at `location`.
    ///
    /// Returns true iff `visit` returned true, which also ends the walk.
    pub fn iterate<F>(&self, category: Category, location: Location, mut visit: F) -> bool
    where
        F: FnMut(&Path, &Kind) -> bool,
    {
        match category {
            Category::Index => {
                let Some(origin) = self.origin() else {
                    return false;
                };
                let root = match location {
                    Location::Local => origin::local_index(origin),
                    Location::Global => origin::global_index(origin),
                };
                search::search(&root, &self.extensions, &self.excludes, &mut visit)
            }
            Category::Project => self
                .includes
                .get(location)
                .any(|root| search::search(root, &self.extensions, &self.excludes, &mut visit)),
        }
    }

    /// Load `.kiri/configuration` and apply it to this storage.
    pub fn load_configuration(&mut self) -> Result<Applied, KiriError> {
        let file = origin::configuration(self.require_origin()?);
        let configuration = Configuration::load(&file)?;
        Ok(configuration.apply(self))
    }
}
