use crate::state::NoticeLevel;
use ratatui::style::{Color, Modifier, Style};

/// Return the border style for active blocks.
///
pub fn active_block_border_style() -> Style {
    Style::default().fg(Color::Cyan)
}

/// Return the border style for normal blocks.
///
pub fn normal_block_border_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Return the title style for active blocks.
///
pub fn active_block_title_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

/// Return the style for active list items.
///
pub fn active_list_item_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Return the style for normal text.
///
pub fn normal_text_style() -> Style {
    Style::default()
}

pub fn dim_text_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn link_style() -> Style {
    Style::default()
        .fg(Color::Blue)
        .add_modifier(Modifier::UNDERLINED)
}

pub fn selected_link_style() -> Style {
    link_style().add_modifier(Modifier::REVERSED)
}

/// Return the style for a notice of the given level.
///
pub fn notice_style(level: NoticeLevel) -> Style {
    match level {
        NoticeLevel::Info => Style::default().fg(Color::Green),
        NoticeLevel::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    }
}

/// Return the style for a task group heading.
///
pub fn section_style(overdue: bool) -> Style {
    let style = Style::default().add_modifier(Modifier::BOLD);
    if overdue {
        style.fg(Color::Red)
    } else {
        style.fg(Color::Yellow)
    }
}
