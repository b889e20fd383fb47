//! Note workspace module.
//!
//! This module holds the operations the navigation engine delegates to:
//! - `NoteStore`: fetch, persist, listing and note management operations
//!   over a workspace
//! - `FsWorkspace`: the filesystem-backed workspace of `.pn` notes
//! - `MemoryWorkspace`: an in-memory workspace with call recording
//! - Rendering, link and task extraction helpers

mod error;
mod fs;
mod memory;
mod render;
mod resource;

pub use error::StoreError;
pub use fs::FsWorkspace;
pub use memory::MemoryWorkspace;
pub use render::{count_backlinks, extract_links, extract_tasks, parse_deadline, render_content};
pub use resource::*;

use async_trait::async_trait;
use std::path::{Component, Path};

/// File extension of patto notes.
///
pub const NOTE_EXTENSION: &str = "pn";

/// Asynchronous operations over a workspace of notes.
///
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Load a note's raw content and its rendered form.
    async fn fetch_note_for_display(&self, path: &str) -> Result<DisplayNote, StoreError>;

    /// Write the editable content of a note and return its new rendering.
    async fn persist_editable_content(
        &self,
        path: &str,
        content: &str,
    ) -> Result<RenderedNote, StoreError>;

    async fn list_files(&self, sort: SortOrder) -> Result<Vec<FileSummary>, StoreError>;

    async fn list_tasks(&self) -> Result<TaskGroups, StoreError>;

    /// Create an empty note from `name`, which may omit the extension.
    /// Fails with `AlreadyExists` instead of overwriting.
    async fn create_note(&self, name: &str) -> Result<FileSummary, StoreError>;

    async fn delete_note(&self, path: &str) -> Result<(), StoreError>;

    /// Rename a note within its directory. The new name keeps the note
    /// extension and must not name another directory.
    async fn rename_note(&self, path: &str, new_name: &str) -> Result<FileSummary, StoreError>;
}

/// Return `name` as a note file name, adding the extension when missing.
///
pub fn note_file_name(name: &str) -> String {
    let name = name.trim();
    let suffix = format!(".{}", NOTE_EXTENSION);
    if name.ends_with(&suffix) {
        name.to_string()
    } else {
        format!("{}{}", name, suffix)
    }
}

/// Return the workspace-relative path `path` would have after renaming it
/// to `new_name`, validated as a note path.
///
pub fn renamed_path(path: &str, new_name: &str) -> Result<String, StoreError> {
    validate_note_path(path)?;
    if new_name.contains(['/', '\\']) {
        return Err(StoreError::Validation(format!(
            "new name must not contain a path separator: {}",
            new_name
        )));
    }
    let file_name = note_file_name(new_name);
    let renamed = match Path::new(path).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            parent.join(&file_name).to_string_lossy().to_string()
        }
        _ => file_name,
    };
    validate_note_path(&renamed)?;
    Ok(renamed)
}

/// Reject save payloads that could never be written as a workspace note.
///
pub fn validate_payload(path: &str, content: &str) -> Result<(), StoreError> {
    validate_note_path(path)?;
    if content.contains('\0') {
        return Err(StoreError::Validation(
            "content contains a NUL byte".to_string(),
        ));
    }
    Ok(())
}

/// Reject paths that do not name a note inside the workspace.
///
pub fn validate_note_path(path: &str) -> Result<(), StoreError> {
    if path.trim().is_empty() {
        return Err(StoreError::Validation("note path is empty".to_string()));
    }
    let as_path = Path::new(path);
    if as_path.is_absolute() {
        return Err(StoreError::Validation(format!(
            "note path must be relative: {}",
            path
        )));
    }
    if as_path
        .components()
        .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)))
    {
        return Err(StoreError::Validation(format!(
            "note path leaves the workspace: {}",
            path
        )));
    }
    if as_path.extension().map(|e| e != NOTE_EXTENSION).unwrap_or(true) {
        return Err(StoreError::Validation(format!(
            "note path must end in .{}: {}",
            NOTE_EXTENSION, path
        )));
    }
    Ok(())
}
