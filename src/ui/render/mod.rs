mod all;
mod file_list;
mod footer;
mod git_config;
mod header;
mod log;
mod note;
mod task_list;

use self::log::log;
use super::*;
use file_list::file_list;
use footer::footer;
use git_config::git_config;
use header::header;
use note::{note_edit, note_view};
use task_list::task_list;

pub use all::all as render;
