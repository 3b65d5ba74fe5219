//! Overlay rendering (error notification, login/signup modals, help popup)

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph},
};

use crate::model::{LoginField, LoginForm, SignupField, SignupForm, UiState};

pub fn render_error_notification(frame: &mut Frame, ui_state: &UiState) {
    if let Some(ref error_msg) = ui_state.error_message {
        let area = frame.area();

        // Fixed width popup (responsive to screen size)
        let popup_width = 52.min(area.width.saturating_sub(4));
        let inner_width = popup_width.saturating_sub(4) as usize; // account for borders

        // Calculate how many lines the error message will take when wrapped
        let error_line_count =
            ((error_msg.chars().count() as f32) / (inner_width as f32)).ceil() as u16;

        // Height: top border (1) + error lines + bottom border (1)
        let popup_height =
            (2 + error_line_count.max(1)).min(area.height.saturating_sub(4).max(1));

        let popup_area = centered_rect(area, popup_width, popup_height);

        // Clear the area behind the popup first
        frame.render_widget(Clear, popup_area);

        let error_widget = Paragraph::new(error_msg.to_string())
            .style(Style::default().fg(Color::Red))
            .wrap(ratatui::widgets::Wrap { trim: false })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red))
                    .title(" Error (Esc to dismiss) ")
                    .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                    .style(Style::default().bg(Color::Black)),
            );

        frame.render_widget(error_widget, popup_area);
    }
}

pub fn render_login_modal(frame: &mut Frame, form: &LoginForm) {
    let mut lines = vec![
        field_line("Email", &form.email, form.focus == LoginField::Email, false),
        field_line(
            "Password",
            &form.password,
            form.focus == LoginField::Password,
            true,
        ),
        Line::from(""),
    ];
    lines.push(status_line(form.submitting, "Signing in…", &form.error));
    lines.push(footer_line("Ctrl+S: sign up instead"));

    render_form_popup(frame, " Log in ", lines);
}

pub fn render_signup_modal(frame: &mut Frame, form: &SignupForm) {
    let mut lines = vec![
        field_line("Email", &form.email, form.focus == SignupField::Email, false),
        field_line(
            "Nickname",
            &form.nickname,
            form.focus == SignupField::Nickname,
            false,
        ),
        field_line(
            "Password",
            &form.password,
            form.focus == SignupField::Password,
            true,
        ),
        Line::from(""),
    ];
    lines.push(status_line(form.submitting, "Creating account…", &form.error));
    lines.push(footer_line("Ctrl+S: log in instead"));

    render_form_popup(frame, " Sign up ", lines);
}

fn render_form_popup(frame: &mut Frame, title: &str, lines: Vec<Line>) {
    let area = frame.area();
    let popup_width = 48.min(area.width.saturating_sub(4));
    let popup_height = (lines.len() as u16 + 2).min(area.height.saturating_sub(4));
    let popup_area = centered_rect(area, popup_width, popup_height);

    frame.render_widget(Clear, popup_area);

    let popup = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(title.to_string())
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .title_bottom(" Enter: submit  Tab: next field  Esc: close ")
            .padding(Padding::horizontal(1))
            .style(Style::default().bg(Color::Black)),
    );
    frame.render_widget(popup, popup_area);
}

fn field_line<'a>(label: &'a str, value: &str, focused: bool, masked: bool) -> Line<'a> {
    let shown = if masked {
        "•".repeat(value.chars().count())
    } else {
        value.to_string()
    };
    let label_style = if focused {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    let cursor = if focused { "_" } else { "" };
    Line::from(vec![
        Span::styled(format!("{:>9}: ", label), label_style),
        Span::styled(format!("{}{}", shown, cursor), Style::default().fg(Color::White)),
    ])
}

fn status_line<'a>(submitting: bool, busy_text: &'a str, error: &Option<String>) -> Line<'a> {
    if submitting {
        Line::from(Span::styled(busy_text, Style::default().fg(Color::Yellow)))
    } else if let Some(error) = error {
        Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        ))
    } else {
        Line::from("")
    }
}

fn footer_line(text: &str) -> Line<'_> {
    Line::from(Span::styled(text, Style::default().fg(Color::DarkGray)))
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    Rect {
        x: area.width.saturating_sub(width) / 2,
        y: area.height.saturating_sub(height) / 2,
        width,
        height,
    }
}

pub fn render_help_popup(frame: &mut Frame) {
    let area = frame.area();

    // Define keybindings organized by category
    let keybindings = vec![
        ("", "── Navigation ──"),
        ("Tab / Shift+Tab", "Cycle sections"),
        ("↑ / ↓", "Move selection"),
        ("Enter", "Select / Open"),
        ("Backspace / Esc", "Go back"),
        ("G", "Focus search"),
        ("", ""),
        ("", "── Songs ──"),
        ("N", "Load next result page"),
        ("D", "Request mp3 download"),
        ("C", "Analyze chords"),
        ("", ""),
        ("", "── Account ──"),
        ("A", "Log in / Log out"),
        ("", ""),
        ("", "── General ──"),
        ("H", "Toggle this help"),
        ("Q", "Quit"),
    ];

    let popup_width = 62;
    let popup_height = (keybindings.len() as u16 + 2).min(area.height.saturating_sub(4).max(1));
    let popup_area = centered_rect(area, popup_width, popup_height);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let lines: Vec<Line> = keybindings
        .iter()
        .map(|(key, desc)| {
            if key.is_empty() {
                // Section header or empty line
                Line::from(Span::styled(
                    format!("{:^38}", desc),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(vec![
                    Span::styled(
                        format!("{:>18}", key),
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(desc.to_string(), Style::default().fg(Color::White)),
                ])
            }
        })
        .collect();

    let help_text = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help (H or Esc to close) ")
                .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(help_text, popup_area);
}
