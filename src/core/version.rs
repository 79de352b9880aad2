//! Project version file handling.
//!
//! `.kiri/version` holds a single `major.minor.patch[-stage]` line. The binary
//! refuses to operate on a project written by a newer kiri.

use crate::core::error::KiriError;
use crate::core::origin;
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Current kiri version from Cargo.toml
pub const KIRI_VERSION: &str = env!("CARGO_PKG_VERSION");

fn expression() -> &'static Regex {
    static EXPRESSION: OnceLock<Regex> = OnceLock::new();
    EXPRESSION.get_or_init(|| {
        Regex::new(r"^\s*([[:digit:]]+)\.([[:digit:]]+)\.([[:digit:]]+)(-([[:alnum:]]+))?\s*$")
            .expect("version expression is valid")
    })
}

#[derive(Debug, Clone)]
pub struct Version {
    major: String,
    minor: String,
    patch: String,
    stage: String,
    visual: String,
}

impl Version {
    pub fn parse(content: &str) -> Result<Self, KiriError> {
        let captures = expression()
            .captures(content)
            .ok_or_else(|| KiriError::VersionParse(content.to_string()))?;

        let segment = |i: usize| captures.get(i).map_or("", |m| m.as_str()).to_string();
        let (major, minor, patch, stage) = (segment(1), segment(2), segment(3), segment(5));

        let mut visual = format!("{}.{}.{}", major, minor, patch);
        if !stage.is_empty() {
            visual.push('-');
            visual.push_str(&stage);
        }

        Ok(Self {
            major,
            minor,
            patch,
            stage,
            visual,
        })
    }

    pub fn load(file: &Path) -> Result<Self, KiriError> {
        let content = fs::read_to_string(file).map_err(KiriError::IoError)?;
        Self::parse(&content)
    }

    /// Parse `content` and write its normalized form to `file`.
    pub fn save(file: &Path, content: &str) -> Result<Self, KiriError> {
        let version = Self::parse(content)?;
        fs::write(file, format!("{}\n", version.visual)).map_err(KiriError::IoError)?;
        Ok(version)
    }

    pub fn current() -> Self {
        Self::parse(KIRI_VERSION).expect("CARGO_PKG_VERSION is a valid version")
    }

    pub fn major(&self) -> &str {
        &self.major
    }

    pub fn minor(&self) -> &str {
        &self.minor
    }

    pub fn patch(&self) -> &str {
        &self.patch
    }

    /// Pre-release tag; empty for a release.
    pub fn stage(&self) -> &str {
        &self.stage
    }

    pub fn visual(&self) -> &str {
        &self.visual
    }

    fn numbers(&self) -> [&str; 3] {
        [&self.major, &self.minor, &self.patch]
            .map(|s| s.trim_start_matches('0'))
    }
}

/// Compare two digit strings by value without a fixed-width integer, so
/// components of any length order correctly.
fn compare_digits(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.visual)
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    /// Numeric on major.minor.patch; a release sorts after its pre-releases.
    fn cmp(&self, other: &Self) -> Ordering {
        self.numbers()
            .into_iter()
            .zip(other.numbers())
            .map(|(a, b)| compare_digits(a, b))
            .find(|order| order.is_ne())
            .unwrap_or(Ordering::Equal)
            .then_with(|| match (self.stage.is_empty(), other.stage.is_empty()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => self.stage.cmp(&other.stage),
            })
    }
}

/// Fail when the project at `origin` was written by a newer kiri.
pub fn check_compatibility(origin: &Path) -> Result<(), KiriError> {
    let file = origin::version(origin);
    if !file.exists() {
        return Ok(());
    }

    let project = Version::load(&file)?;
    let binary = Version::current();
    if project > binary {
        return Err(KiriError::VersionMismatch {
            project: project.to_string(),
            binary: binary.to_string(),
        });
    }
    Ok(())
}
