//! Utility functions for rendering UI components

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    widgets::{Block, List, ListItem, ListState},
};

pub fn render_scrollable_list(
    frame: &mut Frame,
    area: Rect,
    items: Vec<ListItem>,
    selected_index: usize,
    block: Block,
) {
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default()); // Highlight handled by item styles

    let mut list_state = ListState::default();
    list_state.select(Some(selected_index));

    frame.render_stateful_widget(list, area, &mut list_state);
}

pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.chars().count() > max_width {
        let truncated: String = s.chars().take(max_width.saturating_sub(3)).collect();
        format!("{:<width$}", format!("{}...", truncated), width = max_width)
    } else {
        format!("{:<width$}", s, width = max_width)
    }
}
