//! Terminal browser for patto notes.
//!
//! The heart of the crate is the view navigation engine in [`state`]: a
//! history of views with per-view lifecycle hooks, driven forward by user
//! actions and backward by back presses. [`workspace`] provides the notes
//! it navigates, and [`app`] wires both to a terminal UI.

pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod logger;
pub mod state;
pub mod ui;
pub mod workspace;
