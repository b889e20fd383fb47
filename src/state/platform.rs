//! Platform history primitives.
//!
//! The host keeps its own history (a browser's session history, a mobile
//! back stack). The navigator mirrors every forward step into it so that a
//! later back press is delivered to the application instead of leaving it.

use super::navigation::ViewId;
use log::*;
use std::sync::{Arc, Mutex};

/// Marker primitives exposed by the host platform.
///
pub trait PlatformHistory: Send + Sync {
    /// Record one forward step for `view` at stack position `index`.
    fn push_marker(&mut self, view: ViewId, index: usize);

    /// Overwrite the current platform position with `view` at `index`.
    fn replace_marker(&mut self, view: ViewId, index: usize);
}

/// Defines a single platform history marker.
///
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Marker {
    pub view: ViewId,
    pub index: usize,
}

/// Platform history kept as a list of markers. Clones share the same list,
/// so a handle kept by the host observes what the navigator recorded.
///
/// Pushing at `index` discards every marker at or above it, the way a
/// browser drops forward entries, and replacing at index 0 leaves the root
/// marker alone. The list therefore never outgrows the deepest history.
///
#[derive(Debug, Clone, Default)]
pub struct MarkerLog {
    markers: Arc<Mutex<Vec<Marker>>>,
}

impl MarkerLog {
    pub fn new() -> Self {
        MarkerLog::default()
    }

    pub fn markers(&self) -> Vec<Marker> {
        self.markers
            .lock()
            .map(|markers| markers.clone())
            .unwrap_or_default()
    }

    pub fn last(&self) -> Option<Marker> {
        self.markers().last().copied()
    }
}

impl PlatformHistory for MarkerLog {
    fn push_marker(&mut self, view: ViewId, index: usize) {
        trace!("Pushing platform marker {:?}@{}.", view, index);
        if let Ok(mut markers) = self.markers.lock() {
            markers.retain(|m| m.index < index);
            markers.push(Marker { view, index });
        }
    }

    fn replace_marker(&mut self, view: ViewId, index: usize) {
        trace!("Replacing platform marker with {:?}@{}.", view, index);
        if let Ok(mut markers) = self.markers.lock() {
            if index == 0 {
                markers.clear();
            } else {
                markers.pop();
            }
            markers.push(Marker { view, index });
        }
    }
}
