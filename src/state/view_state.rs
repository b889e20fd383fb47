//! Domain fields shared by the views and the updates hooks return.

use crate::workspace::{DisplayNote, NoteRef, RenderedNote};

/// Severity of a user-visible notice.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Non-blocking message for the user.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notice {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Fields the active view's hooks read and write: the open note, its
/// editable and rendered content, edit mode, and the latest notice.
///
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    note: Option<NoteRef>,
    content: String,
    rendered: Option<RenderedNote>,
    edit_mode: bool,
    notice: Option<Notice>,
}

impl ViewState {
    pub fn note(&self) -> Option<&NoteRef> {
        self.note.as_ref()
    }

    /// Raw content of the open note, including unsaved edits.
    ///
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn rendered(&self) -> Option<&RenderedNote> {
        self.rendered.as_ref()
    }

    pub fn is_edit_mode(&self) -> bool {
        self.edit_mode
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Apply every field the update sets, leaving the others alone.
    ///
    pub fn apply(&mut self, update: StateUpdate) -> &mut Self {
        if let Some(note) = update.note {
            self.note = note;
        }
        if let Some(content) = update.content {
            self.content = content;
        }
        if let Some(rendered) = update.rendered {
            self.rendered = rendered;
        }
        if let Some(edit_mode) = update.edit_mode {
            self.edit_mode = edit_mode;
        }
        if let Some(notice) = update.notice {
            self.notice = notice;
        }
        self
    }
}

/// Partial update to `ViewState`. `None` leaves a field untouched; the
/// nested options distinguish setting a value from clearing it.
///
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateUpdate {
    note: Option<Option<NoteRef>>,
    content: Option<String>,
    rendered: Option<Option<RenderedNote>>,
    edit_mode: Option<bool>,
    notice: Option<Option<Notice>>,
}

impl StateUpdate {
    pub fn new() -> Self {
        StateUpdate::default()
    }

    /// Update that displays a freshly fetched note in read mode.
    ///
    pub fn show_note(note: DisplayNote) -> Self {
        StateUpdate::new()
            .note(note.note)
            .content(note.raw_content)
            .rendered(note.rendered)
            .edit_mode(false)
    }

    pub fn note(mut self, note: NoteRef) -> Self {
        self.note = Some(Some(note));
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn rendered(mut self, rendered: RenderedNote) -> Self {
        self.rendered = Some(Some(rendered));
        self
    }

    /// Clear the note identity and both forms of its content.
    ///
    pub fn clear_note(mut self) -> Self {
        self.note = Some(None);
        self.content = Some(String::new());
        self.rendered = Some(None);
        self
    }

    pub fn edit_mode(mut self, on: bool) -> Self {
        self.edit_mode = Some(on);
        self
    }

    pub fn notice(mut self, notice: Notice) -> Self {
        self.notice = Some(Some(notice));
        self
    }

    pub fn clear_notice(mut self) -> Self {
        self.notice = Some(None);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == StateUpdate::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::{Fake, Faker};

    #[test]
    fn empty_update_changes_nothing() {
        let display: DisplayNote = Faker.fake();
        let mut state = ViewState::default();
        state.apply(StateUpdate::show_note(display));
        let before = state.clone();
        assert!(StateUpdate::new().is_empty());
        state.apply(StateUpdate::new());
        assert_eq!(state, before);
    }

    #[test]
    fn show_note_sets_fields_and_leaves_read_mode() {
        let display: DisplayNote = Faker.fake();
        let mut state = ViewState::default();
        state.apply(StateUpdate::new().edit_mode(true));
        state.apply(StateUpdate::show_note(display.clone()));
        assert_eq!(state.note(), Some(&display.note));
        assert_eq!(state.content(), display.raw_content);
        assert_eq!(state.rendered(), Some(&display.rendered));
        assert!(!state.is_edit_mode());
    }

    #[test]
    fn clear_note_keeps_edit_mode_and_notice() {
        let display: DisplayNote = Faker.fake();
        let mut state = ViewState::default();
        state
            .apply(StateUpdate::show_note(display))
            .apply(StateUpdate::new().edit_mode(true).notice(Notice::info("hi")));
        state.apply(StateUpdate::new().clear_note());
        assert_eq!(state.note(), None);
        assert_eq!(state.content(), "");
        assert_eq!(state.rendered(), None);
        assert!(state.is_edit_mode());
        assert_eq!(state.notice(), Some(&Notice::info("hi")));
    }

    #[test]
    fn notice_can_be_cleared() {
        let mut state = ViewState::default();
        state.apply(StateUpdate::new().notice(Notice::error("boom")));
        assert_eq!(state.notice().map(|n| n.level), Some(NoticeLevel::Error));
        state.apply(StateUpdate::new().clear_notice());
        assert_eq!(state.notice(), None);
    }
}
