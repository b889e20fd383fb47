//! Hook bindings for the note views.
//!
//! The note view remembers which note it showed so that following a link
//! and coming back does not reload anything, and the edit view persists the
//! buffer whenever it is backed out of.

use super::history::Context;
use super::hooks::{HookRegistry, HookSet, LeaveActions};
use super::navigation::ViewId;
use super::view_state::{Notice, StateUpdate, ViewState};
use crate::workspace::{NoteRef, RenderedNote};
use log::*;
use serde_json::Value;

const NOTE_PATH: &str = "notePath";
const NOTE_NAME: &str = "noteName";
const CONTENT: &str = "content";
const RENDERED: &str = "rendered";

/// Register the note view and note edit hooks.
///
pub fn register_note_hooks(registry: &mut HookRegistry) {
    registry
        .register(
            ViewId::NoteView,
            HookSet::new()
                .with_save_context(save_note_context)
                .with_on_leave(|state, _actions| async move { leave_note_view(&state) })
                .with_on_enter(enter_note_view),
        )
        .register(ViewId::NoteEdit, HookSet::new().with_on_leave(leave_note_edit));
}

/// Return the note path a saved note view context refers to.
///
pub(super) fn context_note_path(context: &Context) -> Option<&str> {
    context.get(NOTE_PATH).and_then(Value::as_str)
}

fn save_note_context(state: &ViewState) -> Option<Context> {
    let note = state.note()?;
    let mut context = Context::new();
    context.insert(NOTE_PATH.to_string(), Value::String(note.path.clone()));
    context.insert(NOTE_NAME.to_string(), Value::String(note.name.clone()));
    context.insert(CONTENT.to_string(), Value::String(state.content().to_string()));
    if let Some(rendered) = state.rendered() {
        match serde_json::to_value(rendered) {
            Ok(value) => {
                context.insert(RENDERED.to_string(), value);
            }
            Err(e) => warn!("Not saving rendered content for '{}': {}", note.path, e),
        }
    }
    Some(context)
}

fn leave_note_view(state: &ViewState) -> StateUpdate {
    if let Some(note) = state.note() {
        debug!("Leaving note view for '{}'.", note.path);
    }
    StateUpdate::new().clear_note()
}

fn enter_note_view(context: Option<&Context>, _state: &ViewState) -> StateUpdate {
    let Some(context) = context else {
        return StateUpdate::new();
    };
    let Some(path) = context_note_path(context) else {
        return StateUpdate::new();
    };
    let mut note = NoteRef::from_path(path);
    if let Some(name) = context.get(NOTE_NAME).and_then(Value::as_str) {
        note.name = name.to_string();
    }
    let content = context
        .get(CONTENT)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let mut update = StateUpdate::new()
        .note(note)
        .content(content)
        .edit_mode(false);
    match context
        .get(RENDERED)
        .cloned()
        .map(serde_json::from_value::<RenderedNote>)
    {
        Some(Ok(rendered)) => update = update.rendered(rendered),
        Some(Err(e)) => warn!("Ignoring unreadable rendered content for '{}': {}", path, e),
        None => {}
    }
    debug!("Restored note view for '{}'.", path);
    update
}

async fn leave_note_edit(state: ViewState, actions: LeaveActions) -> StateUpdate {
    if !state.is_edit_mode() {
        return StateUpdate::new();
    }
    let Some(note) = state.note() else {
        warn!("Leaving edit mode without an open note.");
        return StateUpdate::new().edit_mode(false);
    };
    match actions
        .store()
        .persist_editable_content(&note.path, state.content())
        .await
    {
        Ok(rendered) => StateUpdate::new().rendered(rendered).edit_mode(false),
        Err(e) => {
            error!("Failed to save '{}' while leaving edit mode: {}", note.path, e);
            StateUpdate::new()
                .edit_mode(false)
                .notice(Notice::error(format!("Could not save {}: {}", note.name, e)))
        }
    }
}
