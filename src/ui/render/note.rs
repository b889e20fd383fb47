use super::{Frame, Screen};
use crate::state::ViewState;
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

const MAX_LINK_ROWS: usize = 6;

fn title(state: &ViewState, suffix: &str) -> String {
    match state.note() {
        Some(note) => format!("{}{}", note.name, suffix),
        None => format!("No note{}", suffix),
    }
}

/// Render the open note with its links below it.
///
pub fn note_view(frame: &mut Frame, size: Rect, screen: &Screen, state: &ViewState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::active_block_border_style())
        .title(Span::styled(title(state, ""), styling::active_block_title_style()));

    let Some(rendered) = state.rendered() else {
        frame.render_widget(Paragraph::new(state.content()).block(block), size);
        return;
    };

    let link_rows = rendered.links.len().min(MAX_LINK_ROWS);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(if link_rows == 0 { 0 } else { link_rows as u16 + 2 }),
        ])
        .split(size);

    let lines: Vec<Line> = rendered
        .lines
        .iter()
        .map(|line| Line::from(line.as_str()))
        .collect();
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        chunks[0],
    );

    if link_rows == 0 {
        return;
    }
    let selected = screen.link_index();
    let lines: Vec<Line> = rendered
        .links
        .iter()
        .enumerate()
        .skip(selected.unwrap_or(0).saturating_sub(MAX_LINK_ROWS - 1))
        .take(MAX_LINK_ROWS)
        .map(|(i, link)| {
            let style = if Some(i) == selected {
                styling::selected_link_style()
            } else {
                styling::link_style()
            };
            let label = match (&link.display_text, &link.anchor) {
                (Some(text), _) => format!("{} <{}>", text, link.target),
                (None, Some(anchor)) => format!("{}#{}", link.target, anchor),
                (None, None) => link.target.clone(),
            };
            Line::from(Span::styled(label, style))
        })
        .collect();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::normal_block_border_style())
        .title("Links");
    frame.render_widget(Paragraph::new(lines).block(block), chunks[1]);
}

/// Render the edit buffer.
///
pub fn note_edit(frame: &mut Frame, size: Rect, screen: &Screen, state: &ViewState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::active_block_border_style())
        .title(Span::styled(
            title(state, " (editing)"),
            styling::active_block_title_style(),
        ));
    let inner = block.inner(size);
    frame.render_widget(block, size);
    frame.render_widget(screen.editor().widget(), inner);
}
