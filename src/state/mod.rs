//! Navigation state.
//!
//! This module contains the view navigation engine:
//! - `Navigator`, the state machine every transition goes through
//! - the view history stack and its saved contexts
//! - the hook registry and the note view bindings
//! - the platform history mirror
//! - `ViewState`, the fields hooks read and update

mod bindings;
mod error;
mod history;
mod hooks;
mod navigation;
mod navigator;
mod platform;
mod view_state;

pub use bindings::register_note_hooks;
pub use error::NavError;
pub use history::{Context, HistoryEntry, HistoryStack};
pub use hooks::{HookRegistry, HookSet, LeaveActions, LeaveFuture};
pub use navigation::ViewId;
pub use navigator::{Navigator, SharedNavigator};
pub use platform::{Marker, MarkerLog, PlatformHistory};
pub use view_state::{Notice, NoticeLevel, StateUpdate, ViewState};
