//! Workspace-specific error types.

use std::path::PathBuf;

/// Errors that can occur while reading, listing or persisting notes.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Referenced note or file does not exist
    #[error("Note not found: {path}")]
    NotFound { path: String },

    /// Reading or writing the workspace failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Creating or renaming would overwrite an existing note
    #[error("Note already exists: {path}")]
    AlreadyExists { path: String },

    /// Path or payload was rejected before touching the disk
    #[error("Invalid note request: {0}")]
    Validation(String),
}

impl StoreError {
    /// Wrap an I/O error for the given path, mapping a missing file to
    /// `NotFound`.
    ///
    pub fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            StoreError::NotFound {
                path: path.to_string_lossy().to_string(),
            }
        } else {
            StoreError::Io { path, source }
        }
    }
}
