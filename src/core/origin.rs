//! Origin discovery and initialization.
//!
//! An origin is the canonical directory holding the `.kiri` marker. The marker
//! layout is fixed:
//!
//! ```text
//! <origin>/.kiri/
//! <origin>/.kiri/version
//! <origin>/.kiri/configuration
//! <origin>/.kiri/index/local/
//! <origin>/.kiri/index/global/
//! ```
//!
//! Only the directories are created here; the version and configuration files
//! are written by their own modules.

use crate::core::error::KiriError;
use crate::core::paths;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Name of the marker directory placed directly under an origin.
pub const MARKER_DIR: &str = ".kiri";

pub fn base(origin: &Path) -> PathBuf {
    origin.join(MARKER_DIR)
}

pub fn version(origin: &Path) -> PathBuf {
    base(origin).join("version")
}

pub fn configuration(origin: &Path) -> PathBuf {
    base(origin).join("configuration")
}

pub fn index(origin: &Path) -> PathBuf {
    base(origin).join("index")
}

pub fn local_index(origin: &Path) -> PathBuf {
    index(origin).join("local")
}

pub fn global_index(origin: &Path) -> PathBuf {
    index(origin).join("global")
}

/// Walk upward from `start` until a directory containing `.kiri/` is found.
///
/// `start` is canonicalized first when it exists, so `sub/..` ascends from
/// the parent of `sub`. Returns the canonicalized origin, or `None` once the
/// filesystem root has been checked without a match.
pub fn locate(start: &Path) -> Option<PathBuf> {
    let mut current = paths::resolve(start);
    loop {
        if base(&current).is_dir() {
            debug!(origin = %current.display(), "located origin");
            return paths::canonical(&current).ok();
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Create the marker layout under `start` and return the canonicalized origin.
///
/// Not safe against another process initializing the same directory
/// concurrently: the directory creation steps may interleave.
pub fn initialize(start: &Path) -> Result<PathBuf, KiriError> {
    let origin = paths::absolute(start);
    let marker = base(&origin);

    if marker.exists() {
        if marker.is_dir() {
            return Err(KiriError::AlreadyInitialized(origin));
        }
        return Err(KiriError::InvalidState(marker));
    }

    for dir in [
        marker,
        index(&origin),
        local_index(&origin),
        global_index(&origin),
    ] {
        fs::create_dir_all(&dir).map_err(KiriError::IoError)?;
    }

    let origin = paths::canonical(&origin)?;
    info!(origin = %origin.display(), "initialized origin");
    Ok(origin)
}
