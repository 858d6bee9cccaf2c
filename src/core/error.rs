//! Defines the custom error type for the `core` module.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// The error type returned by [`Indexer::scan`](super::Indexer::scan).
///
/// Every variant carries the path that was being listed when the scan
/// stopped. A scan never returns a partial entry list alongside an error.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The base directory or a traversed subdirectory vanished or never existed.
    #[error("Directory not found: {0}")]
    NotFound(PathBuf),

    /// A directory could not be listed due to access rights.
    #[error("Permission denied while listing: {0}")]
    PermissionDenied(PathBuf),

    /// Represents a path that was expected to be a directory but was not.
    #[error("Path is not a valid directory: {0}")]
    NotADirectory(PathBuf),

    /// Following symbolic links led back to one of the current ancestors.
    #[error("Symbolic link cycle detected at: {0}")]
    CyclicLink(PathBuf),

    /// Any other I/O failure, typically from file system operations.
    #[error("I/O error for path {1}: {0}")]
    Io(#[source] io::Error, PathBuf),
}

impl ScanError {
    /// Classifies an I/O error raised while working on `path`.
    pub fn from_io(err: io::Error, path: &Path) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => ScanError::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => ScanError::PermissionDenied(path.to_path_buf()),
            io::ErrorKind::NotADirectory => ScanError::NotADirectory(path.to_path_buf()),
            _ => ScanError::Io(err, path.to_path_buf()),
        }
    }

    /// Converts a `walkdir` failure, keeping loop detection distinct.
    pub fn from_walk(err: walkdir::Error, root: &Path) -> Self {
        let path = err.path().unwrap_or(root).to_path_buf();
        if err.loop_ancestor().is_some() {
            return ScanError::CyclicLink(path);
        }
        match err.into_io_error() {
            Some(io_err) => ScanError::from_io(io_err, &path),
            None => ScanError::Io(io::Error::other("directory walk failed"), path),
        }
    }

    /// The path the scan was working on when it failed.
    pub fn path(&self) -> &Path {
        match self {
            ScanError::NotFound(p)
            | ScanError::PermissionDenied(p)
            | ScanError::NotADirectory(p)
            | ScanError::CyclicLink(p)
            | ScanError::Io(_, p) => p,
        }
    }
}
