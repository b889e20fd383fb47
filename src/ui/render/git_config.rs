use super::{Frame, Screen};
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

const NOT_SET: &str = "not configured";

fn row<'a>(label: &'a str, value: String) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{:<12}", label), styling::active_block_title_style()),
        Span::raw(value),
    ])
}

/// Render the workspace git settings.
///
pub fn git_config(frame: &mut Frame, size: Rect, screen: &Screen) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::active_block_border_style())
        .title(Span::styled("Git", styling::active_block_title_style()));
    let lines = vec![
        row("Workspace", screen.workspace_root().display().to_string()),
        row("Remote", screen.git_remote().unwrap_or(NOT_SET).to_string()),
        row("User", screen.git_user().unwrap_or(NOT_SET).to_string()),
    ];
    frame.render_widget(Paragraph::new(lines).block(block), size);
}
