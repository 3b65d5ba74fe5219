mod auth;
mod config;
mod controller;
mod logging;
mod model;
mod view;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::Mutex;

use config::Config;
use controller::AppController;
use model::{ApiClient, AppModel};
use view::AppView;

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = logging::init_logging() {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!("=== AutoChord Client Starting ===");

    // Step 1: Load configuration (.env + environment)
    if dotenvy::dotenv().is_ok() {
        tracing::debug!(".env file loaded");
    }
    let config = Config::from_env()?;

    // Step 2: Build the API client
    let api = ApiClient::new(&config)?;
    let app_model = AppModel::new(api);

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let model = Arc::new(Mutex::new(app_model));
    let controller = AppController::new(model.clone());

    let res = run_app(&mut terminal, model, controller).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("AutoChord Client shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: Arc<Mutex<AppModel>>,
    controller: AppController,
) -> io::Result<()> {
    loop {
        // Get current state
        let (ui_state, content_state, auth_flow, session, should_quit) = {
            let model_guard = model.lock().await;

            // Auto-clear old errors (after 5 seconds)
            model_guard.auto_clear_old_errors().await;

            (
                model_guard.get_ui_state().await,
                model_guard.get_content_state().await,
                model_guard.get_auth_flow().await,
                model_guard.session_snapshot(),
                model_guard.should_quit().await,
            )
        };

        // Draw UI
        terminal.draw(|f| {
            AppView::render(f, &ui_state, &content_state, &auth_flow, &session);
        })?;

        // Handle input with shorter poll time for smoother UI updates
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                let _ = controller.handle_key_event(key).await;
            }
        }

        if should_quit {
            break;
        }
    }

    Ok(())
}
