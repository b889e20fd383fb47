//! View lifecycle hook registry.
//!
//! Each view may register up to three hooks: `save_context` captures what is
//! on screen before the view is left for another, `on_leave` runs (and may
//! await) cleanup when the view is backed out of, and `on_enter` restores a
//! previously captured context when the view is returned to. Hooks read a
//! snapshot of `ViewState` and return `StateUpdate`s; they never mutate state.

use super::history::Context;
use super::navigation::ViewId;
use super::view_state::{StateUpdate, ViewState};
use crate::workspace::NoteStore;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

pub type SaveContextFn = Arc<dyn Fn(&ViewState) -> Option<Context> + Send + Sync>;
pub type LeaveFuture = Pin<Box<dyn Future<Output = StateUpdate> + Send>>;
pub type OnLeaveFn = Arc<dyn Fn(ViewState, LeaveActions) -> LeaveFuture + Send + Sync>;
pub type OnEnterFn = Arc<dyn Fn(Option<&Context>, &ViewState) -> StateUpdate + Send + Sync>;

/// Operations a leave hook may perform while the transition waits on it.
///
#[derive(Clone)]
pub struct LeaveActions {
    store: Arc<dyn NoteStore>,
}

impl LeaveActions {
    pub fn new(store: Arc<dyn NoteStore>) -> Self {
        LeaveActions { store }
    }

    pub fn store(&self) -> &dyn NoteStore {
        self.store.as_ref()
    }
}

/// Optional lifecycle hooks for one view.
///
#[derive(Clone, Default)]
pub struct HookSet {
    pub save_context: Option<SaveContextFn>,
    pub on_leave: Option<OnLeaveFn>,
    pub on_enter: Option<OnEnterFn>,
}

static EMPTY_HOOKS: HookSet = HookSet {
    save_context: None,
    on_leave: None,
    on_enter: None,
};

impl HookSet {
    pub fn new() -> Self {
        HookSet::default()
    }

    pub fn with_save_context<F>(mut self, hook: F) -> Self
    where
        F: Fn(&ViewState) -> Option<Context> + Send + Sync + 'static,
    {
        self.save_context = Some(Arc::new(hook));
        self
    }

    /// Register a leave hook. The returned future is awaited before the
    /// transition continues, so it may suspend on I/O.
    ///
    pub fn with_on_leave<F, Fut>(mut self, hook: F) -> Self
    where
        F: Fn(ViewState, LeaveActions) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = StateUpdate> + Send + 'static,
    {
        self.on_leave = Some(Arc::new(move |state, actions| -> LeaveFuture {
            Box::pin(hook(state, actions))
        }));
        self
    }

    pub fn with_on_enter<F>(mut self, hook: F) -> Self
    where
        F: Fn(Option<&Context>, &ViewState) -> StateUpdate + Send + Sync + 'static,
    {
        self.on_enter = Some(Arc::new(hook));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.save_context.is_none() && self.on_leave.is_none() && self.on_enter.is_none()
    }

    /// Overlay `other` on this set; each hook `other` defines wins.
    ///
    fn merge(&mut self, other: HookSet) {
        if other.save_context.is_some() {
            self.save_context = other.save_context;
        }
        if other.on_leave.is_some() {
            self.on_leave = other.on_leave;
        }
        if other.on_enter.is_some() {
            self.on_enter = other.on_enter;
        }
    }
}

impl fmt::Debug for HookSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookSet")
            .field("save_context", &self.save_context.is_some())
            .field("on_leave", &self.on_leave.is_some())
            .field("on_enter", &self.on_enter.is_some())
            .finish()
    }
}

/// Table of hook sets keyed by view.
///
#[derive(Clone, Debug, Default)]
pub struct HookRegistry {
    hooks: HashMap<ViewId, HookSet>,
}

impl HookRegistry {
    pub fn new() -> Self {
        HookRegistry::default()
    }

    /// Merge a partial hook set into whatever is registered for `view`.
    ///
    pub fn register(&mut self, view: ViewId, hooks: HookSet) -> &mut Self {
        self.hooks.entry(view).or_default().merge(hooks);
        self
    }

    /// Return the hooks for `view`, or an empty set.
    ///
    pub fn get(&self, view: ViewId) -> &HookSet {
        self.hooks.get(&view).unwrap_or(&EMPTY_HOOKS)
    }

    /// Capture the context of `view`. `None` means the view saves nothing,
    /// which is distinct from saving an empty context.
    ///
    pub fn call_save_context(&self, view: ViewId, state: &ViewState) -> Option<Context> {
        self.get(view).save_context.as_ref().and_then(|hook| hook(state))
    }

    /// Run the leave hook of `view` on a snapshot of `state` to completion.
    ///
    pub async fn call_on_leave(
        &self,
        view: ViewId,
        state: &ViewState,
        actions: LeaveActions,
    ) -> StateUpdate {
        match self.get(view).on_leave.clone() {
            Some(hook) => hook(state.clone(), actions).await,
            None => StateUpdate::new(),
        }
    }

    pub fn call_on_enter(
        &self,
        view: ViewId,
        context: Option<&Context>,
        state: &ViewState,
    ) -> StateUpdate {
        match self.get(view).on_enter.as_ref() {
            Some(hook) => hook(context, state),
            None => StateUpdate::new(),
        }
    }
}
