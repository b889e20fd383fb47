//! Navigation-related state types.
//!
//! This module contains the closed set of views the navigator moves between.

/// Specifying the different views.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum ViewId {
    FileList,
    NoteView,
    NoteEdit,
    TaskList,
    GitConfig,
}

impl ViewId {
    /// The view every history starts from.
    pub const ROOT: ViewId = ViewId::FileList;

    /// Get the display name for the view
    pub fn name(&self) -> &'static str {
        match self {
            ViewId::FileList => "Files",
            ViewId::NoteView => "Note",
            ViewId::NoteEdit => "Edit",
            ViewId::TaskList => "Tasks",
            ViewId::GitConfig => "Git",
        }
    }

    /// Whether the view displays a single note.
    pub fn shows_note(&self) -> bool {
        matches!(self, ViewId::NoteView | ViewId::NoteEdit)
    }
}
