//! User interface module.
//!
//! This module handles all UI rendering using the `ratatui` library, including:
//! - Terminal-local view data (`Screen`)
//! - Styling helpers
//! - One render function per view plus the header, log and footer
//!
//! Rendering reads a `Navigator` snapshot and never calls back into it.

type Frame<'a> = ratatui::Frame<'a>;

mod render;
mod screen;
mod widgets;

pub use render::render;
pub use screen::{Prompt, PromptAction, Screen};
