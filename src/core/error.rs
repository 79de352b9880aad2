use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KiriError {
    #[error("Origin already initialized: {}", .0.display())]
    AlreadyInitialized(PathBuf),
    #[error("Invalid initialization of origin: {} is not a directory", .0.display())]
    InvalidState(PathBuf),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Unable to parse version: {0:?}")]
    VersionParse(String),
    #[error("Project version {project} is newer than binary version {binary}")]
    VersionMismatch { project: String, binary: String },
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
}
