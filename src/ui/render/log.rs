use super::{Frame, Screen};
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    text::Line,
    widgets::{Block, Borders, Paragraph},
};

/// Render the most recent log lines.
///
pub fn log(frame: &mut Frame, size: Rect, screen: &Screen) {
    let block = Block::default()
        .title("Log")
        .borders(Borders::ALL)
        .border_style(styling::normal_block_border_style());
    let lines: Vec<Line> = screen
        .logs()
        .tail(size.height.saturating_sub(2) as usize)
        .into_iter()
        .map(Line::from)
        .collect();
    frame.render_widget(
        Paragraph::new(lines)
            .style(styling::dim_text_style())
            .block(block),
        size,
    );
}
