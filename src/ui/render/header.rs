use super::Frame;
use crate::state::Navigator;
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
};

const SEPARATOR: &str = " > ";

/// Render the breadcrumb of the view history followed by the latest notice.
///
pub fn header(frame: &mut Frame, size: Rect, navigator: &Navigator) {
    let mut spans = vec![];
    let depth = navigator.depth();
    for (i, entry) in navigator.history().iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(SEPARATOR, styling::dim_text_style()));
        }
        let style = if i + 1 == depth {
            styling::active_block_title_style()
        } else {
            styling::dim_text_style()
        };
        spans.push(Span::styled(entry.view.name(), style));
    }
    if let Some(note) = navigator.view_state().note() {
        spans.push(Span::styled(format!("  {}", note.name), styling::normal_text_style()));
    }
    if let Some(notice) = navigator.view_state().notice() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            notice.message.clone(),
            styling::notice_style(notice.level),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), size);
}
