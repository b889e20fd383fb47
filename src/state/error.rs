//! Navigation-specific error types.

use crate::workspace::StoreError;

/// Errors a navigation operation reports to its caller. None of them leave
/// the history in an inconsistent state.
#[derive(Debug, thiserror::Error)]
pub enum NavError {
    /// Note could not be fetched; the transition did not happen
    #[error("Failed to open {path}: {source}")]
    OpenFailed { path: String, source: StoreError },

    /// Explicit save failed
    #[error("Failed to save {path}: {source}")]
    SaveFailed { path: String, source: StoreError },

    /// Note could not be created
    #[error("Failed to create {name}: {source}")]
    CreateFailed { name: String, source: StoreError },

    /// Note could not be deleted; history was left alone
    #[error("Failed to delete {path}: {source}")]
    DeleteFailed { path: String, source: StoreError },

    /// Note could not be renamed; history was left alone
    #[error("Failed to rename {path}: {source}")]
    RenameFailed { path: String, source: StoreError },

    /// Operation needs an open note
    #[error("No note is open")]
    NoNoteOpen,
}
