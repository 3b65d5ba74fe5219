//! Key event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::AppController;
use crate::model::ActiveSection;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let model = self.model.lock().await;

        // Handle error message first (blocks all other interactions)
        if model.has_error().await {
            return match key.code {
                KeyCode::Esc | KeyCode::Enter => {
                    model.clear_error().await;
                    Ok(())
                }
                _ => Ok(()),
            };
        }

        // Handle help popup
        if model.is_help_popup_open().await {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('H') => {
                    model.hide_help_popup().await;
                    Ok(())
                }
                _ => Ok(()),
            };
        }

        // Login/signup modal captures all input while open
        if model.is_auth_modal_open().await {
            let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
            match key.code {
                KeyCode::Esc => {
                    model.close_auth_modal().await;
                }
                KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                    model.auth_focus_next().await;
                }
                KeyCode::Backspace => {
                    model.auth_backspace().await;
                }
                KeyCode::Enter => {
                    // None while a submission is pending: re-invoking submit
                    // must not start a second attempt
                    if let Some(submission) = model.begin_auth_submit().await {
                        drop(model);
                        let controller = self.clone();
                        tokio::spawn(async move {
                            controller.submit_auth(submission).await;
                        });
                    }
                }
                KeyCode::Char('s') | KeyCode::Char('S') if ctrl => {
                    model.switch_auth_form().await;
                }
                KeyCode::Char(c) if !ctrl => {
                    model.auth_input(c).await;
                }
                _ => {}
            }
            return Ok(());
        }

        let ui_state = model.get_ui_state().await;

        // Handle search input when in search section
        if ui_state.active_section == ActiveSection::Search {
            match key.code {
                KeyCode::Enter => {
                    let query = ui_state.search_query.trim().to_string();
                    drop(model);
                    if !query.is_empty() {
                        let controller = self.clone();
                        tokio::spawn(async move {
                            controller.perform_search(&query).await;
                        });
                    }
                    return Ok(());
                }
                KeyCode::Esc => {
                    model.update_search_query(String::new()).await;
                    return Ok(());
                }
                KeyCode::Backspace => {
                    model.backspace_search().await;
                    return Ok(());
                }
                KeyCode::Char(c) => {
                    // Q still quits even in search mode when Ctrl is pressed
                    if (c == 'q' || c == 'Q') && key.modifiers.contains(KeyModifiers::CONTROL) {
                        model.set_should_quit(true).await;
                        return Ok(());
                    }
                    model.append_to_search(c).await;
                    return Ok(());
                }
                _ => {}
            }
        }

        // Handle results/detail navigation
        if ui_state.active_section == ActiveSection::Results {
            match key.code {
                KeyCode::Up => {
                    model.results_move_up().await;
                    return Ok(());
                }
                KeyCode::Down => {
                    model.results_move_down().await;
                    return Ok(());
                }
                KeyCode::Enter => {
                    let selected = model.selected_song().await;
                    drop(model);
                    if let Some(song) = selected {
                        let controller = self.clone();
                        tokio::spawn(async move {
                            controller.open_song_detail(&song.video_id).await;
                        });
                    }
                    return Ok(());
                }
                KeyCode::Char('n') | KeyCode::Char('N') => {
                    drop(model);
                    let controller = self.clone();
                    tokio::spawn(async move {
                        controller.load_next_page().await;
                    });
                    return Ok(());
                }
                KeyCode::Char('d') | KeyCode::Char('D') => {
                    drop(model);
                    let controller = self.clone();
                    tokio::spawn(async move {
                        controller.request_download().await;
                    });
                    return Ok(());
                }
                KeyCode::Char('c') | KeyCode::Char('C') => {
                    drop(model);
                    let controller = self.clone();
                    tokio::spawn(async move {
                        controller.request_analysis().await;
                    });
                    return Ok(());
                }
                KeyCode::Backspace | KeyCode::Esc => {
                    model.navigate_back().await;
                    return Ok(());
                }
                _ => {}
            }
        }

        // Global keybindings
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                model.set_should_quit(true).await;
            }
            KeyCode::Tab => {
                model.cycle_section_forward().await;
            }
            KeyCode::BackTab => {
                model.cycle_section_backward().await;
            }
            // Account: open the login modal, or log out when signed in
            KeyCode::Char('a') | KeyCode::Char('A') => {
                drop(model);
                self.handle_account_key().await;
            }
            // Focus search
            KeyCode::Char('g') | KeyCode::Char('G') => {
                model.set_active_section(ActiveSection::Search).await;
            }
            // Show help popup
            KeyCode::Char('h') | KeyCode::Char('H') => {
                model.show_help_popup().await;
            }
            _ => {}
        }
        Ok(())
    }
}
