//! Navigation state machine.
//!
//! The `Navigator` owns the view history, the shared `ViewState` and the
//! platform history mirror. Every transition goes through it:
//!
//! - forward (`navigate_to`, `open_contextual`, `open_note`,
//!   `toggle_edit_mode`): the departing view may save its context into the
//!   current top entry, then exactly one entry is pushed
//! - backward (`go_back`): the leaving view's `on_leave` hook is awaited and
//!   applied, exactly one entry is popped, and the entered view's `on_enter`
//!   hook restores whatever context the entry carried
//! - reset (`close`, `initialize`): back to the single root entry
//!
//! Deleting or renaming a note that the screen or a saved context still
//! refers to resets as well.
//!
//! The current view is always the top entry's view. Transitions need
//! `&mut self`; share the navigator as a `SharedNavigator` so that callers
//! arriving while a `go_back` awaits its leave hook queue behind it.

use super::error::NavError;
use super::history::{HistoryEntry, HistoryStack};
use super::hooks::{HookRegistry, LeaveActions};
use super::bindings::context_note_path;
use super::navigation::ViewId;
use super::platform::PlatformHistory;
use super::view_state::{Notice, StateUpdate, ViewState};
use crate::workspace::{FileSummary, NoteStore};
use log::*;
use std::sync::Arc;
use tokio::sync::Mutex;

pub type SharedNavigator = Arc<Mutex<Navigator>>;

pub struct Navigator {
    history: HistoryStack,
    state: ViewState,
    hooks: Arc<HookRegistry>,
    store: Arc<dyn NoteStore>,
    platform: Box<dyn PlatformHistory>,
    transitions: u64,
}

impl Navigator {
    /// Build a navigator over a finished hook registry. The registry is
    /// frozen from here on.
    ///
    pub fn new(
        hooks: HookRegistry,
        store: Arc<dyn NoteStore>,
        platform: Box<dyn PlatformHistory>,
    ) -> Self {
        Navigator {
            history: HistoryStack::new(ViewId::ROOT),
            state: ViewState::default(),
            hooks: Arc::new(hooks),
            store,
            platform,
            transitions: 0,
        }
    }

    /// Build a navigator with the note view and note edit hooks registered.
    ///
    pub fn with_note_hooks(store: Arc<dyn NoteStore>, platform: Box<dyn PlatformHistory>) -> Self {
        let mut hooks = HookRegistry::new();
        super::bindings::register_note_hooks(&mut hooks);
        Navigator::new(hooks, store, platform)
    }

    pub fn into_shared(self) -> SharedNavigator {
        Arc::new(Mutex::new(self))
    }

    pub fn current_view(&self) -> ViewId {
        self.history.top().view
    }

    pub fn depth(&self) -> usize {
        self.history.len()
    }

    pub fn history(&self) -> &[HistoryEntry] {
        self.history.entries()
    }

    pub fn view_state(&self) -> &ViewState {
        &self.state
    }

    pub fn store(&self) -> Arc<dyn NoteStore> {
        Arc::clone(&self.store)
    }

    /// Count of completed transitions. Any push, pop or reset changes it,
    /// so two equal readings mean the history did not move in between.
    ///
    pub fn transitions(&self) -> u64 {
        self.transitions
    }

    /// Reset to the root entry and anchor the platform history there, so a
    /// back press at the root can be told apart as an exit request.
    ///
    pub fn initialize(&mut self) {
        info!("Initializing navigation at {}.", ViewId::ROOT.name());
        self.reset();
    }

    /// Move forward to `view`. Returns false without touching anything when
    /// `view` is already current.
    ///
    pub fn navigate_to(&mut self, view: ViewId) -> bool {
        if view == self.current_view() {
            debug!("Already at {}, not navigating.", view.name());
            return false;
        }
        self.capture_departing_context();
        self.push(view);
        true
    }

    /// Move forward to `view` carrying `payload` into the state. The
    /// departing view's saved context is merged into the entry being left
    /// so that going back restores it.
    ///
    pub fn open_contextual(&mut self, view: ViewId, payload: StateUpdate) {
        self.capture_departing_context();
        self.push(view);
        self.state.apply(payload);
    }

    /// Fetch a note and open it in the note view. On failure nothing moves
    /// and the error is returned.
    ///
    pub async fn open_note(&mut self, path: &str) -> Result<(), NavError> {
        info!("Opening note '{}'...", path);
        let note = self
            .store
            .fetch_note_for_display(path)
            .await
            .map_err(|source| {
                warn!("Could not open '{}': {}", path, source);
                NavError::OpenFailed {
                    path: path.to_string(),
                    source,
                }
            })?;
        self.open_contextual(
            ViewId::NoteView,
            StateUpdate::show_note(note).clear_notice(),
        );
        Ok(())
    }

    /// Step back one entry. Returns false, leaving everything untouched,
    /// when already at the root; the host decides what that means.
    ///
    pub async fn go_back(&mut self) -> bool {
        if self.history.len() <= 1 {
            debug!("At root, nothing to go back to.");
            return false;
        }

        let leaving = self.current_view();
        let actions = LeaveActions::new(Arc::clone(&self.store));
        let update = self
            .hooks
            .call_on_leave(leaving, &self.state, actions)
            .await;
        self.state.apply(update);

        self.history.pop();
        self.transitions = self.transitions.wrapping_add(1);
        let entered = self.current_view();
        let context = self.history.take_top_context();
        let update = self
            .hooks
            .call_on_enter(entered, context.as_ref(), &self.state);
        self.state.apply(update);

        debug!(
            "Went back from {} to {} (depth {}).",
            leaving.name(),
            entered.name(),
            self.depth()
        );
        true
    }

    /// Switch between reading and editing the open note. Entering edit mode
    /// is a forward step; leaving it is a `go_back`, so the edit view's
    /// auto-save runs either way.
    ///
    pub async fn toggle_edit_mode(&mut self) -> bool {
        match self.current_view() {
            ViewId::NoteView if self.state.note().is_some() => {
                self.push(ViewId::NoteEdit);
                self.state.apply(StateUpdate::new().edit_mode(true));
                true
            }
            ViewId::NoteEdit => self.go_back().await,
            view => {
                debug!("Edit mode is not available from {}.", view.name());
                false
            }
        }
    }

    /// Drop all history and saved context and return to the root view.
    ///
    pub fn close(&mut self) {
        info!(
            "Closing to {}, discarding {} history entries.",
            ViewId::ROOT.name(),
            self.depth() - 1
        );
        self.reset();
    }

    /// Replace the editable content of the open note.
    ///
    pub fn set_editable_content(&mut self, content: impl Into<String>) {
        self.state.apply(StateUpdate::new().content(content));
    }

    /// Persist the editable content without leaving the current view.
    ///
    pub async fn save_note(&mut self) -> Result<(), NavError> {
        let note = self.state.note().cloned().ok_or(NavError::NoNoteOpen)?;
        let rendered = self
            .store
            .persist_editable_content(&note.path, self.state.content())
            .await
            .map_err(|source| NavError::SaveFailed {
                path: note.path.clone(),
                source,
            })?;
        self.state.apply(
            StateUpdate::new()
                .rendered(rendered)
                .notice(Notice::info(format!("Saved {}", note.name))),
        );
        Ok(())
    }

    pub fn notify(&mut self, notice: Notice) {
        self.state.apply(StateUpdate::new().notice(notice));
    }

    pub fn clear_notice(&mut self) {
        self.state.apply(StateUpdate::new().clear_notice());
    }

    /// Create an empty note and open it in the note view.
    ///
    pub async fn create_note(&mut self, name: &str) -> Result<FileSummary, NavError> {
        let created = self
            .store
            .create_note(name)
            .await
            .map_err(|source| NavError::CreateFailed {
                name: name.to_string(),
                source,
            })?;
        info!("Created note '{}'.", created.path);
        self.open_note(&created.path).await?;
        Ok(created)
    }

    /// Delete a note. If it is on screen or saved in the history, close back
    /// to the root so no entry refers to the missing file.
    ///
    pub async fn delete_note(&mut self, path: &str) -> Result<(), NavError> {
        self.store
            .delete_note(path)
            .await
            .map_err(|source| NavError::DeleteFailed {
                path: path.to_string(),
                source,
            })?;
        if self.refers_to(path) {
            self.close();
        }
        self.notify(Notice::info(format!("Deleted {}", path)));
        Ok(())
    }

    /// Rename a note within its directory. Closes to the root under the same
    /// condition as `delete_note`.
    ///
    pub async fn rename_note(&mut self, path: &str, new_name: &str) -> Result<FileSummary, NavError> {
        let renamed = self
            .store
            .rename_note(path, new_name)
            .await
            .map_err(|source| NavError::RenameFailed {
                path: path.to_string(),
                source,
            })?;
        if self.refers_to(path) {
            self.close();
        }
        self.notify(Notice::info(format!("Renamed {} to {}", path, renamed.path)));
        Ok(renamed)
    }

    /// Push a fresh root marker so the platform delivers one more back
    /// press to the application.
    ///
    pub fn arm_exit(&mut self) {
        self.platform.push_marker(ViewId::ROOT, 0);
    }

    fn capture_departing_context(&mut self) {
        let view = self.current_view();
        if let Some(context) = self.hooks.call_save_context(view, &self.state) {
            let index = self.history.top_index();
            trace!("Saving {} context keys for {}.", context.len(), view.name());
            self.history.merge_context(index, context);
        }
    }

    /// Whether the shown note or any saved context refers to `path`.
    ///
    fn refers_to(&self, path: &str) -> bool {
        let shown = self.state.note().map(|n| n.path == path).unwrap_or(false);
        shown
            || self
                .history
                .entries()
                .iter()
                .filter_map(|e| e.context.as_ref())
                .any(|c| context_note_path(c) == Some(path))
    }

    fn reset(&mut self) {
        self.history.reset(ViewId::ROOT);
        self.state = ViewState::default();
        self.platform.replace_marker(ViewId::ROOT, 0);
        self.transitions = self.transitions.wrapping_add(1);
    }

    fn push(&mut self, view: ViewId) {
        self.transitions = self.transitions.wrapping_add(1);
        let index = self.history.push(view);
        self.platform.push_marker(view, index);
        debug!("Navigated to {} (depth {}).", view.name(), self.depth());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Marker, MarkerLog, NoticeLevel};
    use crate::workspace::MemoryWorkspace;
    use std::time::Duration;

    fn store() -> Arc<MemoryWorkspace> {
        Arc::new(
            MemoryWorkspace::new()
                .with_note("a.pn", "A")
                .with_note("b.pn", "B [a]")
                .with_note("c.pn", "C"),
        )
    }

    fn navigator(store: &Arc<MemoryWorkspace>) -> (Navigator, MarkerLog) {
        let markers = MarkerLog::new();
        let mut navigator = Navigator::with_note_hooks(store.clone(), Box::new(markers.clone()));
        navigator.initialize();
        (navigator, markers)
    }

    fn views(navigator: &Navigator) -> Vec<ViewId> {
        navigator.history().iter().map(|e| e.view).collect()
    }

    fn shown_path(navigator: &Navigator) -> Option<&str> {
        navigator.view_state().note().map(|n| n.path.as_str())
    }

    #[tokio::test]
    async fn initialize_starts_at_root() {
        let store = store();
        let (navigator, markers) = navigator(&store);
        assert_eq!(navigator.current_view(), ViewId::FileList);
        assert_eq!(navigator.depth(), 1);
        assert_eq!(
            markers.markers(),
            vec![Marker {
                view: ViewId::FileList,
                index: 0
            }]
        );
    }

    #[tokio::test]
    async fn forward_then_equal_backs_restore_stack() {
        let store = store();
        let (mut navigator, _) = navigator(&store);
        let initial = navigator.history().to_vec();

        assert!(navigator.navigate_to(ViewId::TaskList));
        navigator.open_note("a.pn").await.unwrap();
        navigator.open_note("b.pn").await.unwrap();
        assert!(navigator.navigate_to(ViewId::GitConfig));
        navigator.open_contextual(ViewId::NoteView, StateUpdate::new());
        assert!(navigator.toggle_edit_mode().await);
        assert_eq!(navigator.depth(), 7);

        for _ in 0..6 {
            assert!(navigator.go_back().await);
        }
        assert_eq!(navigator.current_view(), ViewId::FileList);
        assert_eq!(navigator.history(), initial.as_slice());
    }

    #[tokio::test]
    async fn go_back_at_root_does_not_mutate() {
        let store = store();
        let (mut navigator, markers) = navigator(&store);
        navigator.notify(Notice::info("hello"));
        let history = navigator.history().to_vec();
        let state = navigator.view_state().clone();
        let marker_count = markers.markers().len();

        assert!(!navigator.go_back().await);
        assert!(!navigator.go_back().await);
        assert_eq!(navigator.history(), history.as_slice());
        assert_eq!(navigator.view_state(), &state);
        assert_eq!(markers.markers().len(), marker_count);
    }

    #[tokio::test]
    async fn back_from_second_note_restores_first() {
        let store = store();
        let (mut navigator, _) = navigator(&store);
        navigator.open_note("a.pn").await.unwrap();
        navigator.open_note("b.pn").await.unwrap();
        assert_eq!(shown_path(&navigator), Some("b.pn"));

        assert!(navigator.go_back().await);
        assert_eq!(navigator.current_view(), ViewId::NoteView);
        assert_eq!(shown_path(&navigator), Some("a.pn"));
        assert_eq!(navigator.view_state().content(), "A");
        assert_eq!(
            navigator.view_state().rendered().map(|r| r.lines.clone()),
            Some(vec!["A".to_string()])
        );
    }

    #[tokio::test]
    async fn back_from_edit_persists_latest_content_once() {
        let store = store();
        let (mut navigator, _) = navigator(&store);
        navigator.open_note("a.pn").await.unwrap();
        assert!(navigator.toggle_edit_mode().await);
        assert!(navigator.view_state().is_edit_mode());
        navigator.set_editable_content("A draft");
        navigator.set_editable_content("A final");

        assert!(navigator.go_back().await);
        assert_eq!(
            store.persist_calls(),
            vec![("a.pn".to_string(), "A final".to_string())]
        );
        assert_eq!(navigator.current_view(), ViewId::NoteView);
        assert!(!navigator.view_state().is_edit_mode());
        assert_eq!(navigator.view_state().content(), "A final");
        assert_eq!(
            navigator.view_state().rendered().map(|r| r.lines.clone()),
            Some(vec!["A final".to_string()])
        );
    }

    #[tokio::test]
    async fn navigate_to_current_view_does_not_grow() {
        let store = store();
        let (mut navigator, markers) = navigator(&store);
        assert!(!navigator.navigate_to(ViewId::FileList));
        assert_eq!(navigator.depth(), 1);
        assert!(navigator.navigate_to(ViewId::TaskList));
        assert!(!navigator.navigate_to(ViewId::TaskList));
        assert_eq!(navigator.depth(), 2);
        assert_eq!(markers.markers().len(), 2);
    }

    #[tokio::test]
    async fn close_always_returns_to_root() {
        let store = store();
        let (mut navigator, markers) = navigator(&store);
        navigator.close();
        assert_eq!(views(&navigator), vec![ViewId::FileList]);

        navigator.open_note("a.pn").await.unwrap();
        navigator.open_note("b.pn").await.unwrap();
        navigator.toggle_edit_mode().await;
        navigator.close();
        assert_eq!(views(&navigator), vec![ViewId::FileList]);
        assert_eq!(navigator.history()[0].context, None);
        assert_eq!(navigator.view_state(), &ViewState::default());
        assert_eq!(
            markers.last(),
            Some(Marker {
                view: ViewId::FileList,
                index: 0
            })
        );
        assert!(store.persist_calls().is_empty());
    }

    #[tokio::test]
    async fn open_edit_back_back_back_scenario() {
        let store = Arc::new(MemoryWorkspace::new().with_note("a.pn", "A"));
        let (mut navigator, _) = navigator(&store);
        assert_eq!(navigator.depth(), 1);

        navigator.open_note("a.pn").await.unwrap();
        assert_eq!(navigator.depth(), 2);
        assert_eq!(navigator.current_view(), ViewId::NoteView);
        assert_eq!(navigator.view_state().content(), "A");

        assert!(navigator.toggle_edit_mode().await);
        assert_eq!(navigator.depth(), 3);
        assert_eq!(navigator.current_view(), ViewId::NoteEdit);

        assert!(navigator.go_back().await);
        assert_eq!(
            store.persist_calls(),
            vec![("a.pn".to_string(), "A".to_string())]
        );
        assert_eq!(navigator.depth(), 2);
        assert_eq!(navigator.current_view(), ViewId::NoteView);
        assert_eq!(navigator.view_state().content(), "A");

        assert!(navigator.go_back().await);
        assert_eq!(navigator.depth(), 1);
        assert_eq!(navigator.current_view(), ViewId::FileList);
        assert_eq!(navigator.view_state().note(), None);

        assert!(!navigator.go_back().await);
    }

    #[tokio::test]
    async fn failed_open_leaves_everything_in_place() {
        let store = store();
        let (mut navigator, markers) = navigator(&store);
        navigator.open_note("a.pn").await.unwrap();
        let history = navigator.history().to_vec();
        let marker_count = markers.markers().len();

        let result = navigator.open_note("missing.pn").await;
        assert!(matches!(result, Err(NavError::OpenFailed { ref path, .. }) if path == "missing.pn"));
        assert_eq!(navigator.history(), history.as_slice());
        assert_eq!(shown_path(&navigator), Some("a.pn"));
        assert_eq!(markers.markers().len(), marker_count);
    }

    #[tokio::test]
    async fn failed_save_on_leave_still_navigates() {
        let store = store();
        let (mut navigator, _) = navigator(&store);
        navigator.open_note("a.pn").await.unwrap();
        navigator.toggle_edit_mode().await;
        navigator.set_editable_content("A unsaved");
        store.fail_persists(true);

        assert!(navigator.go_back().await);
        assert_eq!(navigator.current_view(), ViewId::NoteView);
        assert!(!navigator.view_state().is_edit_mode());
        assert_eq!(navigator.view_state().content(), "A unsaved");
        assert_eq!(
            navigator.view_state().notice().map(|n| n.level),
            Some(NoticeLevel::Error)
        );
        assert_eq!(store.content("a.pn").as_deref(), Some("A"));
    }

    #[tokio::test]
    async fn concurrent_back_requests_run_in_order() {
        let store = Arc::new(
            MemoryWorkspace::new()
                .with_note("a.pn", "A")
                .with_persist_delay(Duration::from_millis(30)),
        );
        let (mut navigator, _) = navigator(&store);
        navigator.open_note("a.pn").await.unwrap();
        navigator.toggle_edit_mode().await;
        let shared = navigator.into_shared();

        let first = {
            let navigator = Arc::clone(&shared);
            tokio::spawn(async move { navigator.lock().await.go_back().await })
        };
        tokio::time::sleep(Duration::from_millis(5)).await;
        let second = {
            let navigator = Arc::clone(&shared);
            tokio::spawn(async move { navigator.lock().await.go_back().await })
        };

        assert!(first.await.unwrap());
        assert!(second.await.unwrap());
        let navigator = shared.lock().await;
        assert_eq!(navigator.depth(), 1);
        assert_eq!(navigator.current_view(), ViewId::FileList);
        assert_eq!(store.persist_calls().len(), 1);
    }

    #[tokio::test]
    async fn toggle_outside_note_view_is_ignored() {
        let store = store();
        let (mut navigator, _) = navigator(&store);
        assert!(!navigator.toggle_edit_mode().await);
        navigator.open_contextual(ViewId::NoteView, StateUpdate::new());
        assert!(!navigator.toggle_edit_mode().await);
        assert_eq!(navigator.depth(), 2);
    }

    #[tokio::test]
    async fn toggle_from_edit_goes_back() {
        let store = store();
        let (mut navigator, _) = navigator(&store);
        navigator.open_note("a.pn").await.unwrap();
        navigator.toggle_edit_mode().await;
        assert!(navigator.toggle_edit_mode().await);
        assert_eq!(navigator.current_view(), ViewId::NoteView);
        assert_eq!(navigator.depth(), 2);
        assert_eq!(store.persist_calls().len(), 1);
    }

    #[tokio::test]
    async fn opening_from_view_without_save_hook_leaves_entry_bare() {
        let store = store();
        let (mut navigator, _) = navigator(&store);
        navigator.navigate_to(ViewId::TaskList);
        navigator.open_note("a.pn").await.unwrap();
        assert_eq!(
            views(&navigator),
            vec![ViewId::FileList, ViewId::TaskList, ViewId::NoteView]
        );
        assert!(navigator.history().iter().all(|e| e.context.is_none()));
    }

    #[tokio::test]
    async fn restored_context_is_consumed() {
        let store = store();
        let (mut navigator, _) = navigator(&store);
        navigator.open_note("a.pn").await.unwrap();
        navigator.open_note("b.pn").await.unwrap();
        assert!(navigator.history()[1].context.is_some());
        navigator.go_back().await;
        assert_eq!(navigator.history()[1].context, None);

        // edits made after the restore are not overwritten by an old context
        navigator.toggle_edit_mode().await;
        navigator.set_editable_content("A edited");
        navigator.go_back().await;
        assert_eq!(navigator.view_state().content(), "A edited");
    }

    #[tokio::test]
    async fn note_survives_detour_through_other_views() {
        let store = store();
        let (mut navigator, _) = navigator(&store);
        navigator.open_note("a.pn").await.unwrap();
        navigator.navigate_to(ViewId::TaskList);
        navigator.open_note("c.pn").await.unwrap();

        navigator.go_back().await;
        assert_eq!(navigator.current_view(), ViewId::TaskList);
        assert_eq!(shown_path(&navigator), None);
        navigator.go_back().await;
        assert_eq!(navigator.current_view(), ViewId::NoteView);
        assert_eq!(shown_path(&navigator), Some("a.pn"));
        assert_eq!(navigator.view_state().content(), "A");
    }

    #[tokio::test]
    async fn explicit_save_keeps_editing() {
        let store = store();
        let (mut navigator, _) = navigator(&store);
        assert!(matches!(
            navigator.save_note().await,
            Err(NavError::NoNoteOpen)
        ));

        navigator.open_note("a.pn").await.unwrap();
        navigator.toggle_edit_mode().await;
        navigator.set_editable_content("A saved");
        navigator.save_note().await.unwrap();
        assert_eq!(navigator.current_view(), ViewId::NoteEdit);
        assert!(navigator.view_state().is_edit_mode());
        assert_eq!(store.content("a.pn").as_deref(), Some("A saved"));
        assert_eq!(
            navigator.view_state().notice().map(|n| n.level),
            Some(NoticeLevel::Info)
        );
    }

    #[tokio::test]
    async fn forward_steps_push_platform_markers() {
        let store = store();
        let (mut navigator, markers) = navigator(&store);
        navigator.open_note("a.pn").await.unwrap();
        navigator.toggle_edit_mode().await;
        assert_eq!(
            markers.markers()[1..].to_vec(),
            vec![
                Marker {
                    view: ViewId::NoteView,
                    index: 1
                },
                Marker {
                    view: ViewId::NoteEdit,
                    index: 2
                },
            ]
        );
        navigator.arm_exit();
        assert_eq!(
            markers.last(),
            Some(Marker {
                view: ViewId::FileList,
                index: 0
            })
        );
    }

    #[tokio::test]
    async fn every_transition_moves_the_counter() {
        let store = store();
        let (mut navigator, _) = navigator(&store);
        let mut last = navigator.transitions();
        let mut moved = |navigator: &Navigator| {
            let now = navigator.transitions();
            let changed = now != last;
            last = now;
            changed
        };

        navigator.open_note("a.pn").await.unwrap();
        assert!(moved(&navigator));
        assert!(navigator.go_back().await);
        assert!(moved(&navigator));
        assert!(!navigator.go_back().await);
        navigator.arm_exit();
        navigator.notify(Notice::info("hello"));
        assert!(!moved(&navigator));
        navigator.close();
        assert!(moved(&navigator));
        assert!(navigator.open_note("missing.pn").await.is_err());
        assert!(!navigator.navigate_to(ViewId::FileList));
        assert!(!moved(&navigator));
    }

    #[tokio::test]
    async fn deleting_shown_note_closes_to_root() {
        let store = store();
        let (mut navigator, markers) = navigator(&store);
        navigator.open_note("a.pn").await.unwrap();
        navigator.toggle_edit_mode().await;
        navigator.set_editable_content("A unsaved");

        navigator.delete_note("a.pn").await.unwrap();
        assert_eq!(views(&navigator), vec![ViewId::FileList]);
        assert_eq!(shown_path(&navigator), None);
        assert_eq!(markers.markers().len(), 1);
        assert_eq!(store.content("a.pn"), None);
        assert!(store.persist_calls().is_empty());
        assert_eq!(
            navigator.view_state().notice().map(|n| n.message.as_str()),
            Some("Deleted a.pn")
        );
    }

    #[tokio::test]
    async fn deleting_note_saved_in_history_closes_to_root() {
        let store = store();
        let (mut navigator, _) = navigator(&store);
        navigator.open_note("a.pn").await.unwrap();
        navigator.open_note("b.pn").await.unwrap();
        navigator.delete_note("a.pn").await.unwrap();
        assert_eq!(navigator.depth(), 1);
    }

    #[tokio::test]
    async fn deleting_unrelated_note_keeps_history() {
        let store = store();
        let (mut navigator, _) = navigator(&store);
        navigator.open_note("a.pn").await.unwrap();
        navigator.open_note("b.pn").await.unwrap();
        navigator.delete_note("c.pn").await.unwrap();
        assert_eq!(navigator.depth(), 3);
        assert_eq!(shown_path(&navigator), Some("b.pn"));

        let result = navigator.delete_note("c.pn").await;
        assert!(matches!(result, Err(NavError::DeleteFailed { ref path, .. }) if path == "c.pn"));
        assert_eq!(navigator.depth(), 3);
    }

    #[tokio::test]
    async fn create_opens_new_note() {
        let store = store();
        let (mut navigator, _) = navigator(&store);
        let created = navigator.create_note("d").await.unwrap();
        assert_eq!(created.path, "d.pn");
        assert_eq!(navigator.current_view(), ViewId::NoteView);
        assert_eq!(shown_path(&navigator), Some("d.pn"));
        assert_eq!(navigator.view_state().content(), "");

        navigator.close();
        let result = navigator.create_note("a").await;
        assert!(matches!(result, Err(NavError::CreateFailed { .. })));
        assert_eq!(navigator.depth(), 1);
    }

    #[tokio::test]
    async fn renaming_shown_note_closes_to_root() {
        let store = store();
        let (mut navigator, _) = navigator(&store);
        let renamed = navigator.rename_note("c.pn", "e").await.unwrap();
        assert_eq!(renamed.path, "e.pn");
        assert_eq!(store.content("e.pn").as_deref(), Some("C"));

        navigator.open_note("a.pn").await.unwrap();
        navigator.rename_note("a.pn", "f").await.unwrap();
        assert_eq!(navigator.depth(), 1);
        assert_eq!(store.content("f.pn").as_deref(), Some("A"));
    }
}
