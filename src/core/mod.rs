//! Core modules of the kiri file index.
//!
//! Path primitives, origin resolution, classification, path sets and the
//! search engine, plus the version and configuration files stored under
//! `.kiri/`.

pub mod configuration;
pub mod error;
pub mod extensions;
pub mod origin;
pub mod paths;
pub mod pathset;
pub mod search;
pub mod storage;
pub mod version;
