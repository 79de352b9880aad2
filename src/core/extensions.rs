//! Extension-based file classification.
//!
//! Kinds are an open tag set: `header` and `source` are built in, any other
//! tag can be registered without touching the search engine.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Kind {
    Header,
    Source,
    /// Unclassified. Returned when no registered extension matches.
    Any,
    Other(String),
}

impl Kind {
    pub fn as_str(&self) -> &str {
        match self {
            Kind::Header => "header",
            Kind::Source => "source",
            Kind::Any => "any",
            Kind::Other(tag) => tag,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Kind {
    fn from(tag: &str) -> Self {
        match tag {
            "header" => Kind::Header,
            "source" => Kind::Source,
            "any" => Kind::Any,
            other => Kind::Other(other.to_string()),
        }
    }
}

impl From<String> for Kind {
    fn from(tag: String) -> Self {
        Kind::from(tag.as_str())
    }
}

impl From<Kind> for String {
    fn from(kind: Kind) -> Self {
        kind.as_str().to_string()
    }
}

impl FromStr for Kind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Kind::from(s))
    }
}

/// Kind → recognized extensions (without the leading dot).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtensionRegistry {
    entries: BTreeMap<Kind, BTreeSet<String>>,
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// C and C++ headers and sources.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for ext in ["h", "hh", "hpp", "hxx"] {
            registry.register(Kind::Header, ext);
        }
        for ext in ["c", "cc", "cpp", "cxx"] {
            registry.register(Kind::Source, ext);
        }
        registry
    }

    /// Add `extension` to the set of `kind`. Empty extensions are ignored.
    pub fn register(&mut self, kind: Kind, extension: &str) {
        let extension = extension.strip_prefix('.').unwrap_or(extension);
        if extension.is_empty() {
            return;
        }
        self.entries
            .entry(kind)
            .or_default()
            .insert(extension.to_string());
    }

    /// First kind, in `Kind` order, claiming the extension of `path`.
    pub fn classify(&self, path: &Path) -> Kind {
        let Some(extension) = path.extension() else {
            return Kind::Any;
        };
        let extension = extension.to_string_lossy();

        self.entries
            .iter()
            .find(|(_, extensions)| extensions.contains(extension.as_ref()))
            .map(|(kind, _)| kind.clone())
            .unwrap_or(Kind::Any)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Kind, &BTreeSet<String>)> {
        self.entries.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
