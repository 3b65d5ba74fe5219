//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared utility functions (formatting, scrollable lists)
//! - `layout`: Top bar and status line
//! - `content`: Main content area rendering
//! - `overlays`: Modal overlays (auth forms, error, help)

mod content;
mod layout;
mod overlays;
mod utils;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::model::{AuthFlow, ContentState, Session, UiState};

pub struct AppView;

impl AppView {
    pub fn render(
        frame: &mut Frame,
        ui_state: &UiState,
        content_state: &ContentState,
        auth_flow: &AuthFlow,
        session: &Session,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title + search + account
                Constraint::Min(0),    // Main content
                Constraint::Length(1), // Status line
            ])
            .split(frame.area());

        layout::render_top_bar(frame, chunks[0], ui_state, session);

        content::render_main_content(frame, chunks[1], ui_state, content_state);

        layout::render_status_line(frame, chunks[2], content_state);

        // Auth modal overlay (if open)
        match auth_flow {
            AuthFlow::LoginOpen(form) => overlays::render_login_modal(frame, form),
            AuthFlow::SignupOpen(form) => overlays::render_signup_modal(frame, form),
            _ => {}
        }

        // Error notification overlay (if there's an error)
        if ui_state.error_message.is_some() {
            overlays::render_error_notification(frame, ui_state);
        }

        // Help popup overlay (if open)
        if ui_state.show_help_popup {
            overlays::render_help_popup(frame);
        }
    }
}
