//! Layout rendering (top bar with title, search and account, status line)

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Padding, Paragraph},
};

use crate::model::{ActiveSection, ContentState, ContentView, Session, UiState};

pub fn render_top_bar(frame: &mut Frame, area: Rect, ui_state: &UiState, session: &Session) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(13), // App title
            Constraint::Min(0),     // Search input
            Constraint::Length(30), // Account box
        ])
        .split(area);

    let title = Paragraph::new("AutoChord")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    let search_focused = ui_state.active_section == ActiveSection::Search;
    let search_text = if ui_state.search_query.is_empty() {
        "Which song shall we play?"
    } else {
        &ui_state.search_query
    };
    let search = Paragraph::new(search_text)
        .style(if search_focused {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::White)
        })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Search ")
                .padding(Padding::horizontal(1))
                .border_style(if search_focused {
                    Style::default().fg(Color::Green)
                } else {
                    Style::default()
                }),
        );
    frame.render_widget(search, chunks[1]);

    // LoginButton equivalent: greeting when signed in, hint otherwise
    let (account_text, account_style) = match session {
        Session::SignedIn(user) => (
            format!("{} (a: log out)", user.nickname),
            Style::default().fg(Color::Green),
        ),
        Session::SignedOut => ("a: log in".to_string(), Style::default().fg(Color::DarkGray)),
    };
    let account = Paragraph::new(account_text)
        .style(account_style)
        .block(Block::default().borders(Borders::ALL).title(" Account "));
    frame.render_widget(account, chunks[2]);
}

pub fn render_status_line(frame: &mut Frame, area: Rect, content_state: &ContentState) {
    let (text, style) = if content_state.is_loading {
        ("Loading...", Style::default().fg(Color::Yellow))
    } else {
        match &content_state.view {
            ContentView::SearchResults {
                next_page_token: Some(_),
                ..
            } => (
                " Enter: open  n: next page  h: help  q: quit",
                Style::default().fg(Color::DarkGray),
            ),
            ContentView::SongDetail { .. } => (
                " d: download mp3  c: analyze chords  Esc: back  h: help  q: quit",
                Style::default().fg(Color::DarkGray),
            ),
            _ => (
                " Tab: switch section  h: help  q: quit",
                Style::default().fg(Color::DarkGray),
            ),
        }
    };
    frame.render_widget(Paragraph::new(text).style(style), area);
}
