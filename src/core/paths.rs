//! Path primitives shared by the origin resolver, the path sets and the
//! search engine.
//!
//! Containment and equivalence are decided by filesystem identity, never by
//! string comparison, so `a/./b`, symlinked aliases and the canonical form of
//! a directory all compare equal.

use crate::core::error::KiriError;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Resolve `path` against the current working directory.
///
/// The target does not need to exist. `.` components are dropped; `..` is
/// kept as-is since it cannot be resolved lexically across symlinks.
pub fn absolute(path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(_) => path.to_path_buf(),
        }
    };

    joined
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Resolve symlinks, `.` and `..`. The path must exist.
pub fn canonical(path: &Path) -> Result<PathBuf, KiriError> {
    fs::canonicalize(path)
        .map_err(|e| KiriError::NotFound(format!("{}: {}", path.display(), e)))
}

/// Canonical form of `path` when it exists, [`absolute`] otherwise.
///
/// Used wherever an existing path is about to be stored or walked upward,
/// so that `a/../b` is treated as `b` rather than as a child of `a`.
pub fn resolve(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| absolute(path))
}

/// True iff both paths name the same existing filesystem entry.
#[cfg(unix)]
pub fn equivalent(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;

    match (fs::metadata(a), fs::metadata(b)) {
        (Ok(ma), Ok(mb)) => ma.dev() == mb.dev() && ma.ino() == mb.ino(),
        _ => false,
    }
}

/// True iff both paths name the same existing filesystem entry.
#[cfg(not(unix))]
pub fn equivalent(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(ca), Ok(cb)) => ca == cb,
        _ => false,
    }
}

/// True if `ancestor` is `descendant` or one of its parents.
pub fn contains(ancestor: &Path, descendant: &Path) -> bool {
    resolve(descendant)
        .ancestors()
        .filter(|prefix| !prefix.as_os_str().is_empty())
        .any(|prefix| equivalent(prefix, ancestor))
}
