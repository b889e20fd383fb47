//! Back signal handling.
//!
//! Back presses arrive on a single-consumer channel and are turned into
//! `go_back` calls. When `go_back` reports that nothing happened (the
//! history is at its root) the button arms itself before releasing the
//! navigator, so the next press is read as a request to exit. The arming
//! only holds while the navigator makes no transition in between.

use crate::state::{Notice, SharedNavigator};
use log::*;
use tokio::sync::mpsc;

const EXIT_HINT: &str = "Press back again to exit";

/// A single back press.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackSignal;

/// What a back press resulted in.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackOutcome {
    Navigated,
    ExitArmed,
    ExitRequested,
}

pub type BackSender = mpsc::UnboundedSender<BackSignal>;
pub type BackReceiver = mpsc::UnboundedReceiver<BackSignal>;

/// Return a new back signal channel.
///
pub fn channel() -> (BackSender, BackReceiver) {
    mpsc::unbounded_channel()
}

/// Consumes back signals for one navigator.
///
pub struct BackButton {
    navigator: SharedNavigator,
    armed_at: Option<u64>,
}

impl BackButton {
    pub fn new(navigator: SharedNavigator) -> Self {
        BackButton {
            navigator,
            armed_at: None,
        }
    }

    /// Whether the last press armed exit. The arming may have gone stale
    /// since, if the navigator moved.
    ///
    pub fn is_armed(&self) -> bool {
        self.armed_at.is_some()
    }

    /// Handle one back press.
    ///
    pub async fn handle(&mut self) -> BackOutcome {
        let mut navigator = self.navigator.lock().await;
        if navigator.go_back().await {
            self.armed_at = None;
            return BackOutcome::Navigated;
        }
        if self.armed_at == Some(navigator.transitions()) {
            info!("Back pressed twice at root, exiting.");
            return BackOutcome::ExitRequested;
        }
        navigator.arm_exit();
        navigator.notify(Notice::info(EXIT_HINT));
        self.armed_at = Some(navigator.transitions());
        debug!("Back pressed at root, next press exits.");
        BackOutcome::ExitArmed
    }

    /// Process signals until an exit is requested, then call `on_exit`.
    /// Returns early without calling it if every sender is dropped.
    ///
    pub async fn run<F>(mut self, mut signals: BackReceiver, on_exit: F)
    where
        F: FnOnce(),
    {
        while let Some(BackSignal) = signals.recv().await {
            if self.handle().await == BackOutcome::ExitRequested {
                on_exit();
                return;
            }
        }
        debug!("Back signal channel closed.");
    }
}
