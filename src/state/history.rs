//! View history stack.
//!
//! History is an arena of entries addressed by index, root at index 0. It is
//! never empty: forward transitions push exactly one entry and backward
//! transitions pop exactly one.

use super::navigation::ViewId;

/// Context a view saved about itself before it was left. Only the view's
/// own hooks know the shape of the map.
///
pub type Context = serde_json::Map<String, serde_json::Value>;

/// One position in the view history.
///
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub view: ViewId,
    pub context: Option<Context>,
}

impl HistoryEntry {
    pub fn new(view: ViewId) -> Self {
        HistoryEntry { view, context: None }
    }
}

/// Ordered, non-empty stack of history entries.
///
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryStack {
    entries: Vec<HistoryEntry>,
}

impl HistoryStack {
    /// Return a stack holding only the given root view.
    ///
    pub fn new(root: ViewId) -> Self {
        HistoryStack {
            entries: vec![HistoryEntry::new(root)],
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Never true, the root entry cannot be popped.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    /// Return the top entry.
    ///
    pub fn top(&self) -> &HistoryEntry {
        // entries is created non-empty and pop never removes the root
        &self.entries[self.entries.len() - 1]
    }

    pub fn top_index(&self) -> usize {
        self.entries.len() - 1
    }

    /// Push a bare entry for `view`, returning its index.
    ///
    pub fn push(&mut self, view: ViewId) -> usize {
        self.entries.push(HistoryEntry::new(view));
        self.top_index()
    }

    /// Pop the top entry unless it is the root.
    ///
    pub fn pop(&mut self) -> Option<HistoryEntry> {
        if self.entries.len() > 1 {
            self.entries.pop()
        } else {
            None
        }
    }

    /// Merge `context` into the entry at `index`. Keys present in `context`
    /// replace same-named keys; every other saved key is kept. Returns false
    /// if there is no entry at `index`.
    ///
    pub fn merge_context(&mut self, index: usize, context: Context) -> bool {
        let Some(entry) = self.entries.get_mut(index) else {
            return false;
        };
        match entry.context.as_mut() {
            Some(saved) => saved.extend(context),
            None => entry.context = Some(context),
        }
        true
    }

    /// Move the saved context out of the top entry.
    ///
    pub fn take_top_context(&mut self) -> Option<Context> {
        let index = self.top_index();
        self.entries[index].context.take()
    }

    /// Drop everything but a fresh root entry.
    ///
    pub fn reset(&mut self, root: ViewId) {
        self.entries.clear();
        self.entries.push(HistoryEntry::new(root));
    }
}
