//! Defines the custom error type for the `core` module.

use std::path::PathBuf;
use thiserror::Error;

/// The primary error type for the `core` module.
///
/// Single-entity operations (read, write, delete, copy, move, mkdir) fail
/// loudly with one of these variants. Traversal operations degrade to empty
/// results instead and only log the fault; see the module docs of
/// [`crate::core::tree`] and [`crate::core::search`].
#[derive(Debug, Error)]
pub enum CoreError {
    /// The path does not exist but the operation required it to.
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// The path exists but is not a regular file.
    #[error("Not a file: {0}")]
    NotAFile(PathBuf),

    /// The path exists but is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    /// An underlying I/O error while reading or inspecting a path.
    #[error("I/O error for path {1}: {0}")]
    Io(#[source] std::io::Error, PathBuf),

    /// Writing or appending file content failed.
    #[error("Failed to write {path}: {source}")]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Deleting a file or directory failed.
    #[error("Failed to delete {path}: {source}")]
    DeleteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A copy, move, mkdir or report persistence operation failed.
    #[error("{action} failed for {path}: {source}")]
    OperationFailure {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Convenience alias used throughout the `core` module.
pub type Result<T> = std::result::Result<T, CoreError>;
