//! Main content area rendering (search results, song detail)

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, ListItem, Padding, Paragraph},
};
use serde_json::Value;

use super::utils::{render_scrollable_list, truncate_string};
use crate::model::{
    ActiveSection, ContentState, ContentView, DetailTask, Song, SongDetail, UiState,
};

pub fn render_main_content(
    frame: &mut Frame,
    area: Rect,
    ui_state: &UiState,
    content_state: &ContentState,
) {
    let is_focused = ui_state.active_section == ActiveSection::Results;
    let border_style = if is_focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    if content_state.is_loading {
        let loading = Paragraph::new("Loading...")
            .style(Style::default().fg(Color::Yellow))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" Content ")
                    .border_style(border_style),
            );
        frame.render_widget(loading, area);
        return;
    }

    match &content_state.view {
        ContentView::Empty => {
            let content = Paragraph::new(
                "Type in search and press Enter to find a song\n\nUse Tab to switch sections\nUse ↑/↓ to select items\nPress Enter to open",
            )
            .style(Style::default().fg(Color::DarkGray))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .padding(Padding::horizontal(1))
                    .border_style(border_style),
            );
            frame.render_widget(content, area);
        }
        ContentView::SearchResults {
            query,
            songs,
            next_page_token,
            selected_index,
            loading_more,
        } => {
            render_search_results(
                frame,
                area,
                query,
                songs,
                next_page_token.is_some(),
                *selected_index,
                *loading_more,
                border_style,
            );
        }
        ContentView::SongDetail {
            detail,
            download_url,
            analysis,
            pending,
        } => {
            render_song_detail(
                frame,
                area,
                detail,
                download_url.as_deref(),
                analysis.as_ref(),
                *pending,
                border_style,
            );
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn render_search_results(
    frame: &mut Frame,
    area: Rect,
    query: &str,
    songs: &[Song],
    has_more: bool,
    selected_index: usize,
    loading_more: bool,
    border_style: Style,
) {
    let title_width = (area.width as usize).saturating_sub(40).max(20);

    let items: Vec<ListItem> = songs
        .iter()
        .enumerate()
        .map(|(i, song)| {
            let is_selected = i == selected_index;
            let style = if is_selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let text = format!(
                "{}  {}",
                truncate_string(&song.title, title_width),
                song.channel_title
            );
            ListItem::new(text).style(style)
        })
        .collect();

    let footer = if loading_more {
        " loading more… "
    } else if has_more {
        " n: next page "
    } else {
        ""
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Results: {} ", query))
        .title_bottom(footer)
        .border_style(border_style);

    render_scrollable_list(frame, area, items, selected_index, block);
}

fn render_song_detail(
    frame: &mut Frame,
    area: Rect,
    detail: &SongDetail,
    download_url: Option<&str>,
    analysis: Option<&Value>,
    pending: Option<DetailTask>,
    border_style: Style,
) {
    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            detail.title.clone(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            detail.channel_title.clone(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];

    match (pending, download_url) {
        (Some(DetailTask::Download), _) => {
            lines.push(Line::from(Span::styled(
                "Downloading…",
                Style::default().fg(Color::Yellow),
            )));
        }
        (_, Some(url)) => {
            lines.push(Line::from(vec![
                Span::styled("mp3: ", Style::default().fg(Color::Green)),
                Span::raw(url.to_string()),
            ]));
        }
        (_, None) => {
            lines.push(Line::from(Span::styled(
                "d: request mp3 download",
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    match (pending, analysis) {
        (Some(DetailTask::Analyze), _) => {
            lines.push(Line::from(Span::styled(
                "Analyzing chords…",
                Style::default().fg(Color::Yellow),
            )));
        }
        (_, Some(analysis)) => {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Analysis",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )));
            for line in analysis_lines(analysis) {
                lines.push(Line::from(line));
            }
        }
        (_, None) => {
            lines.push(Line::from(Span::styled(
                "c: analyze chords",
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    let content = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Song ")
            .padding(Padding::horizontal(1))
            .border_style(border_style),
    );
    frame.render_widget(content, area);
}

/// Flatten the analysis document into display lines. The backend shape is
/// loose JSON, so pull the well-known fields and fall back to nothing.
fn analysis_lines(analysis: &Value) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(bpm) = analysis.get("bpm").and_then(Value::as_f64) {
        lines.push(format!("bpm: {:.0}", bpm));
    }
    if let Some(key) = analysis.get("key").and_then(Value::as_str) {
        lines.push(format!("key: {}", key));
    }
    if let Some(signature) = analysis.get("signature").and_then(Value::as_str) {
        lines.push(format!("signature: {}", signature));
    }
    if let Some(chords) = analysis.get("chords").and_then(Value::as_array) {
        let names: Vec<&str> = chords
            .iter()
            .filter_map(|c| {
                c.as_str()
                    .or_else(|| c.get("chord").and_then(Value::as_str))
            })
            .collect();
        if !names.is_empty() {
            lines.push(format!("chords: {}", names.join(" ")));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn analysis_lines_pull_known_fields() {
        let analysis = json!({
            "bpm": 120.4,
            "key": "A minor",
            "chords": [{"chord": "Am", "time": 0.0}, {"chord": "F", "time": 2.1}],
            "extra": "ignored",
        });
        assert_eq!(
            analysis_lines(&analysis),
            vec!["bpm: 120", "key: A minor", "chords: Am F"]
        );
    }

    #[test]
    fn analysis_lines_handle_unknown_shapes() {
        assert!(analysis_lines(&json!({"something": "else"})).is_empty());
        assert!(analysis_lines(&json!(null)).is_empty());
    }
}
