//! Terminal-local view data.
//!
//! Everything the navigator does not own but the terminal needs to draw:
//! listings fetched from the workspace, list selections, the selected link,
//! the edit buffer and the one-line prompt used to manage notes.

use crate::logger::LogBuffer;
use crate::state::{ViewId, ViewState};
use crate::workspace::{FileSummary, LinkInfo, NoteStore, SortOrder, StoreError, TaskGroups, TaskItem};
use crossterm::event::{KeyCode, KeyEvent};
use log::*;
use ratatui::widgets::ListState;
use std::path::PathBuf;
use tui_textarea::TextArea;

/// Note operation waiting on prompt input.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptAction {
    Create,
    Rename { path: String },
    Delete { path: String },
}

/// Defines a one-line prompt shown in the footer.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub action: PromptAction,
    pub input: String,
}

impl Prompt {
    pub fn new(action: PromptAction, input: impl Into<String>) -> Self {
        Prompt {
            action,
            input: input.into(),
        }
    }

    /// Return the text shown for the prompt.
    ///
    pub fn label(&self) -> String {
        match &self.action {
            PromptAction::Create => format!(" New note: {}", self.input),
            PromptAction::Rename { path } => format!(" Rename {} to: {}", path, self.input),
            PromptAction::Delete { path } => format!(" Delete {}? (y/n)", path),
        }
    }
}

/// Defines terminal view data and selections.
///
pub struct Screen {
    files: Vec<FileSummary>,
    files_state: ListState,
    tasks: TaskGroups,
    tasks_state: ListState,
    link_index: Option<usize>,
    sort: SortOrder,
    editor: TextArea<'static>,
    logs: LogBuffer,
    workspace_root: PathBuf,
    git_remote: Option<String>,
    git_user: Option<String>,
    observed: Option<ViewId>,
    prompt: Option<Prompt>,
}

impl Screen {
    pub fn new(sort: SortOrder, logs: LogBuffer, workspace_root: PathBuf) -> Self {
        Screen {
            files: vec![],
            files_state: ListState::default(),
            tasks: TaskGroups::default(),
            tasks_state: ListState::default(),
            link_index: None,
            sort,
            editor: TextArea::default(),
            logs,
            workspace_root,
            git_remote: None,
            git_user: None,
            observed: None,
            prompt: None,
        }
    }

    pub fn with_git(mut self, remote: Option<String>, user: Option<String>) -> Self {
        self.git_remote = remote;
        self.git_user = user;
        self
    }

    /// Record the view about to be drawn. Returns true when it differs from
    /// the last one, meaning its listing should be refetched.
    ///
    pub fn observe(&mut self, view: ViewId) -> bool {
        if self.observed == Some(view) {
            return false;
        }
        self.observed = Some(view);
        self.link_index = None;
        true
    }

    /// Force a refetch on the next `observe`.
    ///
    pub fn invalidate(&mut self) {
        self.observed = None;
    }

    /// Fetch the listing `view` shows, if any.
    ///
    pub async fn refresh(&mut self, view: ViewId, store: &dyn NoteStore) -> Result<(), StoreError> {
        match view {
            ViewId::FileList => {
                debug!("Refreshing file list sorted by {}...", self.sort.label());
                let files = store.list_files(self.sort).await?;
                self.set_files(files);
            }
            ViewId::TaskList => {
                debug!("Refreshing task list...");
                let tasks = store.list_tasks().await?;
                self.set_tasks(tasks);
            }
            _ => {}
        }
        Ok(())
    }

    pub fn set_files(&mut self, files: Vec<FileSummary>) {
        self.files = files;
        clamp_selection(&mut self.files_state, self.files.len());
    }

    pub fn set_tasks(&mut self, tasks: TaskGroups) {
        self.tasks = tasks;
        let count = self.tasks.flatten().len();
        clamp_selection(&mut self.tasks_state, count);
    }

    pub fn files(&self) -> &[FileSummary] {
        &self.files
    }

    pub fn files_state(&mut self) -> &mut ListState {
        &mut self.files_state
    }

    pub fn tasks(&self) -> &TaskGroups {
        &self.tasks
    }

    pub fn tasks_state(&mut self) -> &mut ListState {
        &mut self.tasks_state
    }

    pub fn selected_file(&self) -> Option<&FileSummary> {
        self.files_state.selected().and_then(|i| self.files.get(i))
    }

    pub fn selected_task(&self) -> Option<&TaskItem> {
        let index = self.tasks_state.selected()?;
        self.tasks.flatten().get(index).copied()
    }

    /// Move the selection of the list `view` shows, wrapping at the ends.
    ///
    pub fn select_next(&mut self, view: ViewId) {
        match view {
            ViewId::FileList => step(&mut self.files_state, self.files.len(), true),
            ViewId::TaskList => {
                let count = self.tasks.flatten().len();
                step(&mut self.tasks_state, count, true)
            }
            _ => {}
        }
    }

    pub fn select_previous(&mut self, view: ViewId) {
        match view {
            ViewId::FileList => step(&mut self.files_state, self.files.len(), false),
            ViewId::TaskList => {
                let count = self.tasks.flatten().len();
                step(&mut self.tasks_state, count, false)
            }
            _ => {}
        }
    }

    pub fn link_index(&self) -> Option<usize> {
        self.link_index
    }

    /// Select the next of `count` links, starting over after the last.
    ///
    pub fn cycle_link(&mut self, count: usize) {
        self.link_index = match (self.link_index, count) {
            (_, 0) => None,
            (None, _) => Some(0),
            (Some(i), n) => Some((i + 1) % n),
        };
    }

    pub fn selected_link<'a>(&self, state: &'a ViewState) -> Option<&'a LinkInfo> {
        let index = self.link_index?;
        state.rendered()?.links.get(index)
    }

    pub fn reset_link(&mut self) {
        self.link_index = None;
    }

    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    /// Switch to the next sort order and return it.
    ///
    pub fn cycle_sort(&mut self) -> SortOrder {
        self.sort = self.sort.next();
        self.invalidate();
        self.sort
    }

    /// Replace the edit buffer with `content`.
    ///
    pub fn load_editor(&mut self, content: &str) {
        self.editor = TextArea::new(content.lines().map(str::to_string).collect());
    }

    /// Feed a key to the edit buffer. Returns true if the text changed.
    ///
    pub fn edit(&mut self, key: KeyEvent) -> bool {
        self.editor.input(key)
    }

    pub fn editor(&self) -> &TextArea<'static> {
        &self.editor
    }

    pub fn editor_content(&self) -> String {
        self.editor.lines().join("\n")
    }

    pub fn open_prompt(&mut self, prompt: Prompt) {
        self.prompt = Some(prompt);
    }

    pub fn prompt(&self) -> Option<&Prompt> {
        self.prompt.as_ref()
    }

    /// Remove and return the open prompt.
    ///
    pub fn take_prompt(&mut self) -> Option<Prompt> {
        self.prompt.take()
    }

    /// Feed a key to the open prompt's input. Returns false if the key is
    /// not text editing.
    ///
    pub fn prompt_input(&mut self, key: KeyEvent) -> bool {
        let Some(prompt) = self.prompt.as_mut() else {
            return false;
        };
        match key.code {
            KeyCode::Char(c) => prompt.input.push(c),
            KeyCode::Backspace => {
                prompt.input.pop();
            }
            _ => return false,
        }
        true
    }

    pub fn logs(&self) -> &LogBuffer {
        &self.logs
    }

    pub fn workspace_root(&self) -> &PathBuf {
        &self.workspace_root
    }

    pub fn git_remote(&self) -> Option<&str> {
        self.git_remote.as_deref()
    }

    pub fn git_user(&self) -> Option<&str> {
        self.git_user.as_deref()
    }
}

fn clamp_selection(state: &mut ListState, count: usize) {
    let selected = match (state.selected(), count) {
        (_, 0) => None,
        (Some(i), n) => Some(i.min(n - 1)),
        (None, _) => Some(0),
    };
    state.select(selected);
}

fn step(state: &mut ListState, count: usize, forward: bool) {
    if count == 0 {
        state.select(None);
        return;
    }
    let next = match state.selected() {
        None => 0,
        Some(i) if forward => (i + 1) % count,
        Some(0) => count - 1,
        Some(i) => i - 1,
    };
    state.select(Some(next));
}
