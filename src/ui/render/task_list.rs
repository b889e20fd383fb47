use super::{Frame, Screen};
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

/// Render tasks across the workspace, grouped by deadline.
///
pub fn task_list(frame: &mut Frame, size: Rect, screen: &mut Screen) {
    let summary = screen.tasks().summary();
    let title = format!(
        "Tasks ({} open, {} overdue, {} done)",
        summary.total, summary.overdue, summary.done
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::active_block_border_style())
        .title(Span::styled(title, styling::active_block_title_style()));

    let mut items = vec![];
    for (label, tasks) in screen.tasks().sections() {
        for task in tasks {
            let mut spans = vec![
                Span::styled(format!("{:<12}", label), styling::section_style(label == "Overdue")),
                Span::raw(format!("{} {}", task.status.checkbox(), task.content)),
                Span::styled(
                    format!("  {}:{}", task.file_name, task.line_number + 1),
                    styling::dim_text_style(),
                ),
            ];
            if let Some(due) = &task.due_date {
                spans.push(Span::styled(format!("  due {}", due), styling::dim_text_style()));
            }
            items.push(ListItem::new(Line::from(spans)));
        }
    }

    if items.is_empty() {
        frame.render_widget(Paragraph::new("No tasks").block(block), size);
        return;
    }

    let list = List::new(items)
        .style(styling::normal_text_style())
        .highlight_style(styling::active_list_item_style())
        .block(block);
    frame.render_stateful_widget(list, size, screen.tasks_state());
}
