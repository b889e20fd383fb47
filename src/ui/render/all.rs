use super::{file_list, footer, git_config, header, log, note_edit, note_view, task_list};
use super::{Frame, Screen};
use crate::state::{Navigator, ViewId};
use ratatui::layout::{Constraint, Direction, Layout, Rect};

const LOG_HEIGHT: u16 = 7;

/// Render the whole frame from a navigator snapshot.
///
pub fn all(frame: &mut Frame, screen: &mut Screen, navigator: &Navigator) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(LOG_HEIGHT),
            Constraint::Length(1),
        ])
        .split(frame.size());

    header(frame, chunks[0], navigator);
    main(frame, chunks[1], screen, navigator);
    log(frame, chunks[2], screen);
    footer(frame, chunks[3], navigator.current_view(), screen.prompt());
}

fn main(frame: &mut Frame, size: Rect, screen: &mut Screen, navigator: &Navigator) {
    match navigator.current_view() {
        ViewId::FileList => file_list(frame, size, screen),
        ViewId::NoteView => note_view(frame, size, screen, navigator.view_state()),
        ViewId::NoteEdit => note_edit(frame, size, screen, navigator.view_state()),
        ViewId::TaskList => task_list(frame, size, screen),
        ViewId::GitConfig => git_config(frame, size, screen),
    }
}
