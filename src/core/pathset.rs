//! Include and exclude path sets.
//!
//! Each set is partitioned by [`Location`]. Within one location no directory
//! entry contains another entry: a directory already covered by an existing
//! entry is rejected, and a directory covering existing entries replaces them.

use crate::core::paths;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Location {
    /// Inside the origin's tree.
    Local,
    /// Everything else, e.g. system include directories.
    Global,
}

impl Location {
    pub fn of(path: &Path, origin: Option<&Path>) -> Location {
        match origin {
            Some(origin) if paths::contains(origin, path) => Location::Local,
            _ => Location::Global,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Local => f.write_str("local"),
            Location::Global => f.write_str("global"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LocatedSets {
    sets: BTreeMap<Location, BTreeSet<PathBuf>>,
}

impl LocatedSets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `path` under its location.
    ///
    /// Entries are stored canonicalized. Returns false, leaving the set
    /// untouched, when the path does not exist or a directory is already
    /// covered by an existing entry.
    pub fn insert(&mut self, path: &Path, origin: Option<&Path>) -> bool {
        let path = match paths::canonical(path) {
            Ok(path) => path,
            Err(_) => {
                debug!(path = %paths::absolute(path).display(), "rejected missing path");
                return false;
            }
        };

        let location = Location::of(&path, origin);
        let set = self.sets.entry(location).or_default();

        if path.is_dir() {
            if let Some(covering) = set.iter().find(|entry| paths::contains(entry, &path)) {
                debug!(
                    path = %path.display(),
                    covered_by = %covering.display(),
                    "rejected redundant path"
                );
                return false;
            }

            set.retain(|entry| {
                let obsolete = paths::contains(&path, entry);
                if obsolete {
                    debug!(path = %entry.display(), "pruned obsolete path");
                }
                !obsolete
            });
        }

        debug!(path = %path.display(), %location, "registered path");
        set.insert(path);
        true
    }

    /// False if some entry, of either location, is `path` or one of its
    /// ancestors.
    pub fn verify(&self, path: &Path) -> bool {
        !self
            .sets
            .values()
            .flatten()
            .any(|entry| paths::contains(entry, path))
    }

    /// Entries of `location`, in set order.
    pub fn get(&self, location: Location) -> impl Iterator<Item = &Path> {
        self.sets
            .get(&location)
            .into_iter()
            .flatten()
            .map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.sets.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
