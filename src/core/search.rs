//! Filtered, early-terminating directory search.
//!
//! The visitor receives every non-directory entry that survives the exclusion
//! check, together with its kind. Returning `true` from the visitor stops the
//! walk at once; the remaining siblings and subtrees are never read.

use crate::core::extensions::{ExtensionRegistry, Kind};
use crate::core::pathset::LocatedSets;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Which roots a search covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// The fixed `.kiri/index/{local,global}` directory.
    Index,
    /// Every registered include path.
    Project,
}

/// Walk `root` depth-first and hand matching files to `visit`.
///
/// Returns true iff `visit` returned true for some entry. A missing root is
/// not an error, it simply matches nothing.
pub fn search<F>(
    root: &Path,
    registry: &ExtensionRegistry,
    excludes: &LocatedSets,
    visit: &mut F,
) -> bool
where
    F: FnMut(&Path, &Kind) -> bool,
{
    if !root.exists() {
        debug!(root = %root.display(), "search root does not exist");
        return false;
    }

    if root.is_dir() {
        let walker = WalkDir::new(root)
            .min_depth(1)
            .follow_links(true)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(root = %root.display(), error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            if forward(entry.path(), registry, excludes, visit) {
                return true;
            }
        }
    }

    forward(root, registry, excludes, visit)
}

/// Classify and visit a single entry. Directories are never visited.
pub fn forward<F>(
    path: &Path,
    registry: &ExtensionRegistry,
    excludes: &LocatedSets,
    visit: &mut F,
) -> bool
where
    F: FnMut(&Path, &Kind) -> bool,
{
    if path.is_dir() {
        return false;
    }

    let kind = registry.classify(path);
    if !excludes.verify(path) {
        debug!(path = %path.display(), "excluded");
        return false;
    }

    visit(path, &kind)
}
