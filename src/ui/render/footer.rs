use super::Frame;
use crate::state::ViewId;
use crate::ui::Prompt;
use crate::ui::widgets::styling;
use ratatui::{layout::Rect, text::Span, widgets::Paragraph};

/// Return the key hints for a view.
///
fn hints(view: ViewId) -> &'static str {
    match view {
        ViewId::FileList => {
            " j/k: move  Enter: open  n: new  r: rename  d: delete  o: sort  t: tasks  g: git  Esc: back  q: quit"
        }
        ViewId::NoteView => {
            " Tab: next link  Enter: follow  e: edit  d: delete  x: close  Esc: back  q: quit"
        }
        ViewId::NoteEdit => " Ctrl-s: save  Esc: save and leave  Ctrl-c: quit",
        ViewId::TaskList => " j/k: move  Enter: open note  g: git  Esc: back  q: quit",
        ViewId::GitConfig => " t: tasks  Esc: back  q: quit",
    }
}

/// Render footer with the open prompt, or key hints for the current view.
///
pub fn footer(frame: &mut Frame, size: Rect, view: ViewId, prompt: Option<&Prompt>) {
    let line = match prompt {
        Some(prompt) => Span::styled(prompt.label(), styling::normal_text_style()),
        None => Span::styled(hints(view), styling::dim_text_style()),
    };
    frame.render_widget(Paragraph::new(line), size);
}
