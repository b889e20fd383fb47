use super::{Frame, Screen};
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

/// Render the workspace file list.
///
pub fn file_list(frame: &mut Frame, size: Rect, screen: &mut Screen) {
    let title = format!(
        "Files ({}, {})",
        screen.files().len(),
        screen.sort().label()
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::active_block_border_style())
        .title(Span::styled(title, styling::active_block_title_style()));

    if screen.files().is_empty() {
        frame.render_widget(Paragraph::new("No notes found").block(block), size);
        return;
    }

    let items: Vec<ListItem> = screen
        .files()
        .iter()
        .map(|file| {
            ListItem::new(Line::from(vec![
                Span::raw(file.path.clone()),
                Span::styled(
                    format!("  {} backlinks", file.backlink_count),
                    styling::dim_text_style(),
                ),
            ]))
        })
        .collect();

    let list = List::new(items)
        .style(styling::normal_text_style())
        .highlight_style(styling::active_list_item_style())
        .block(block);

    frame.render_stateful_widget(list, size, screen.files_state());
}
