//! Event handling module.
//!
//! This module contains handlers for different types of events:
//! - Back events: platform back presses driving `go_back` and exit arming
//! - Terminal events: User input and terminal interactions

pub mod back;
pub mod terminal;
