//! Main application model with state management

use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;
use tokio::sync::Mutex;

use super::api_client::ApiClient;
use super::auth_flow::{AuthFlow, Submission};
use super::content::{ContentState, ContentView, DetailTask, SearchPage, Song, SongDetail};
use super::session::{Session, SessionStore, User};
use super::types::{ActiveSection, UiState};

/// Main application model containing all state
pub struct AppModel {
    pub api: ApiClient,
    session: SessionStore,
    pub ui_state: Arc<Mutex<UiState>>,
    pub content_state: Arc<Mutex<ContentState>>,
    auth_flow: Arc<Mutex<AuthFlow>>,
    pub should_quit: Arc<Mutex<bool>>,
}

impl AppModel {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            session: SessionStore::new(),
            ui_state: Arc::new(Mutex::new(UiState::default())),
            content_state: Arc::new(Mutex::new(ContentState::default())),
            auth_flow: Arc::new(Mutex::new(AuthFlow::default())),
            should_quit: Arc::new(Mutex::new(false)),
        }
    }

    // ========================================================================
    // Session
    // ========================================================================

    pub fn session_snapshot(&self) -> Session {
        self.session.snapshot()
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.is_signed_in()
    }

    // ========================================================================
    // UI state
    // ========================================================================

    pub async fn get_ui_state(&self) -> UiState {
        self.ui_state.lock().await.clone()
    }

    pub async fn set_active_section(&self, section: ActiveSection) {
        let mut state = self.ui_state.lock().await;
        state.active_section = section;
    }

    pub async fn cycle_section_forward(&self) {
        let mut state = self.ui_state.lock().await;
        state.active_section = state.active_section.next();
    }

    pub async fn cycle_section_backward(&self) {
        let mut state = self.ui_state.lock().await;
        state.active_section = state.active_section.prev();
    }

    pub async fn update_search_query(&self, query: String) {
        let mut state = self.ui_state.lock().await;
        state.search_query = query;
    }

    pub async fn append_to_search(&self, c: char) {
        let mut state = self.ui_state.lock().await;
        state.search_query.push(c);
    }

    pub async fn backspace_search(&self) {
        let mut state = self.ui_state.lock().await;
        state.search_query.pop();
    }

    pub async fn set_error(&self, message: String) {
        let mut state = self.ui_state.lock().await;
        state.error_message = Some(message);
        state.error_timestamp = Some(Instant::now());
    }

    pub async fn clear_error(&self) {
        let mut state = self.ui_state.lock().await;
        state.error_message = None;
        state.error_timestamp = None;
    }

    pub async fn has_error(&self) -> bool {
        self.ui_state.lock().await.error_message.is_some()
    }

    pub async fn auto_clear_old_errors(&self) {
        let mut state = self.ui_state.lock().await;
        if let Some(timestamp) = state.error_timestamp {
            if timestamp.elapsed().as_secs() > 5 {
                state.error_message = None;
                state.error_timestamp = None;
            }
        }
    }

    pub async fn show_help_popup(&self) {
        let mut state = self.ui_state.lock().await;
        state.show_help_popup = true;
    }

    pub async fn hide_help_popup(&self) {
        let mut state = self.ui_state.lock().await;
        state.show_help_popup = false;
    }

    pub async fn is_help_popup_open(&self) -> bool {
        self.ui_state.lock().await.show_help_popup
    }

    // ========================================================================
    // Content
    // ========================================================================

    pub async fn get_content_state(&self) -> ContentState {
        self.content_state.lock().await.clone()
    }

    pub async fn set_content_loading(&self, loading: bool) {
        let mut state = self.content_state.lock().await;
        state.is_loading = loading;
    }

    pub async fn set_search_results(&self, query: String, page: SearchPage) {
        let mut state = self.content_state.lock().await;
        state.navigation_stack.clear();
        state.view = ContentView::SearchResults {
            query,
            songs: page.songs,
            next_page_token: page.next_page_token,
            selected_index: 0,
            loading_more: false,
        };
        state.is_loading = false;
    }

    /// Claim the next-page fetch: returns the query and token when a further
    /// page exists and none is already being loaded.
    pub async fn begin_load_more(&self) -> Option<(String, String)> {
        let mut state = self.content_state.lock().await;
        if let ContentView::SearchResults {
            query,
            next_page_token,
            loading_more,
            ..
        } = &mut state.view
        {
            if *loading_more {
                return None;
            }
            let token = next_page_token.clone()?;
            *loading_more = true;
            return Some((query.clone(), token));
        }
        None
    }

    pub async fn append_search_page(&self, page: SearchPage) {
        let mut state = self.content_state.lock().await;
        if let ContentView::SearchResults {
            songs,
            next_page_token,
            loading_more,
            ..
        } = &mut state.view
        {
            songs.extend(page.songs);
            *next_page_token = page.next_page_token;
            *loading_more = false;
        }
    }

    pub async fn set_search_loading_more(&self, loading: bool) {
        let mut state = self.content_state.lock().await;
        if let ContentView::SearchResults { loading_more, .. } = &mut state.view {
            *loading_more = loading;
        }
    }

    pub async fn results_move_up(&self) {
        let mut state = self.content_state.lock().await;
        if let ContentView::SearchResults { selected_index, .. } = &mut state.view {
            if *selected_index > 0 {
                *selected_index -= 1;
            }
        }
    }

    pub async fn results_move_down(&self) {
        let mut state = self.content_state.lock().await;
        if let ContentView::SearchResults {
            songs,
            selected_index,
            ..
        } = &mut state.view
        {
            if *selected_index < songs.len().saturating_sub(1) {
                *selected_index += 1;
            }
        }
    }

    pub async fn selected_song(&self) -> Option<Song> {
        let state = self.content_state.lock().await;
        if let ContentView::SearchResults {
            songs,
            selected_index,
            ..
        } = &state.view
        {
            songs.get(*selected_index).cloned()
        } else {
            None
        }
    }

    pub async fn set_song_detail(&self, detail: SongDetail) {
        let mut state = self.content_state.lock().await;
        if !matches!(state.view, ContentView::Empty) {
            let previous_view = state.view.clone();
            state.navigation_stack.push(previous_view);
        }
        state.view = ContentView::SongDetail {
            detail,
            download_url: None,
            analysis: None,
            pending: None,
        };
        state.is_loading = false;
    }

    pub async fn navigate_back(&self) -> bool {
        let mut state = self.content_state.lock().await;
        if let Some(previous_view) = state.navigation_stack.pop() {
            state.view = previous_view;
            true
        } else {
            state.view = ContentView::Empty;
            false
        }
    }

    /// Claim a backend task for the current detail view. Returns the song
    /// when no other task is running; serializes download/analyze requests.
    pub async fn begin_detail_task(&self, task: DetailTask) -> Option<SongDetail> {
        let mut state = self.content_state.lock().await;
        if let ContentView::SongDetail {
            detail, pending, ..
        } = &mut state.view
        {
            if pending.is_some() {
                return None;
            }
            *pending = Some(task);
            return Some(detail.clone());
        }
        None
    }

    pub async fn finish_download(&self, url: String) {
        let mut state = self.content_state.lock().await;
        if let ContentView::SongDetail {
            download_url,
            pending,
            ..
        } = &mut state.view
        {
            *download_url = Some(url);
            *pending = None;
        }
    }

    pub async fn finish_analysis(&self, analysis: Value) {
        let mut state = self.content_state.lock().await;
        if let ContentView::SongDetail {
            analysis: slot,
            pending,
            ..
        } = &mut state.view
        {
            *slot = Some(analysis);
            *pending = None;
        }
    }

    pub async fn detail_task_failed(&self) {
        let mut state = self.content_state.lock().await;
        if let ContentView::SongDetail { pending, .. } = &mut state.view {
            *pending = None;
        }
    }

    // ========================================================================
    // Auth flow
    // ========================================================================

    pub async fn get_auth_flow(&self) -> AuthFlow {
        self.auth_flow.lock().await.clone()
    }

    pub async fn is_auth_modal_open(&self) -> bool {
        self.auth_flow.lock().await.is_modal_open()
    }

    pub async fn open_login_modal(&self) {
        self.auth_flow.lock().await.open_login();
    }

    pub async fn close_auth_modal(&self) {
        self.auth_flow.lock().await.close();
    }

    pub async fn switch_auth_form(&self) {
        self.auth_flow.lock().await.switch_form();
    }

    pub async fn auth_focus_next(&self) {
        self.auth_flow.lock().await.focus_next();
    }

    pub async fn auth_input(&self, c: char) {
        self.auth_flow.lock().await.input(c);
    }

    pub async fn auth_backspace(&self) {
        self.auth_flow.lock().await.backspace();
    }

    pub async fn begin_auth_submit(&self) -> Option<Submission> {
        self.auth_flow.lock().await.begin_submit()
    }

    pub async fn auth_login_succeeded(&self, user: User) {
        let mut flow = self.auth_flow.lock().await;
        flow.login_succeeded();
        self.session.login(user);
    }

    pub async fn auth_signup_succeeded(&self) {
        self.auth_flow.lock().await.signup_succeeded();
    }

    pub async fn auth_submit_failed(&self, message: String) {
        self.auth_flow.lock().await.submit_failed(message);
    }

    pub async fn logout(&self) {
        self.session.logout();
        self.auth_flow.lock().await.signed_out();
    }

    // ========================================================================
    // Quit
    // ========================================================================

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn model() -> AppModel {
        let config = Config {
            api_key: "test-key".to_string(),
            server_url: "http://api.local".to_string(),
            provider_url: "http://provider.local".to_string(),
        };
        AppModel::new(ApiClient::new(&config).unwrap())
    }

    fn song(id: &str) -> Song {
        Song {
            video_id: id.to_string(),
            title: format!("song {id}"),
            channel_title: "channel".to_string(),
            thumbnail_url: String::new(),
        }
    }

    fn detail(id: &str) -> SongDetail {
        SongDetail {
            video_id: id.to_string(),
            title: format!("song {id}"),
            channel_title: "channel".to_string(),
            thumbnail_url: String::new(),
        }
    }

    #[tokio::test]
    async fn back_from_detail_restores_search_results() {
        let model = model();
        let page = SearchPage {
            songs: vec![song("a"), song("b")],
            next_page_token: None,
        };
        model.set_search_results("query".to_string(), page).await;
        model.results_move_down().await;
        model.set_song_detail(detail("b")).await;

        assert!(model.navigate_back().await);
        let state = model.get_content_state().await;
        let ContentView::SearchResults { selected_index, .. } = state.view else {
            panic!("expected search results");
        };
        assert_eq!(selected_index, 1);

        // One more step back lands on the empty view
        assert!(!model.navigate_back().await);
        assert!(matches!(
            model.get_content_state().await.view,
            ContentView::Empty
        ));
    }

    #[tokio::test]
    async fn detail_tasks_are_serialized() {
        let model = model();
        model.set_song_detail(detail("a")).await;

        assert!(model.begin_detail_task(DetailTask::Download).await.is_some());
        // A second task while one is pending is refused
        assert!(model.begin_detail_task(DetailTask::Analyze).await.is_none());

        model.finish_download("http://api.local/a.mp3".to_string()).await;
        assert!(model.begin_detail_task(DetailTask::Analyze).await.is_some());
        model.detail_task_failed().await;
        assert!(model.begin_detail_task(DetailTask::Analyze).await.is_some());
    }

    #[tokio::test]
    async fn load_more_needs_a_token_and_is_single_flight() {
        let model = model();
        model
            .set_search_results(
                "q".to_string(),
                SearchPage {
                    songs: vec![song("a")],
                    next_page_token: Some("tok".to_string()),
                },
            )
            .await;

        let claim = model.begin_load_more().await;
        assert_eq!(claim, Some(("q".to_string(), "tok".to_string())));
        assert_eq!(model.begin_load_more().await, None);

        model
            .append_search_page(SearchPage {
                songs: vec![song("b")],
                next_page_token: None,
            })
            .await;
        // Token exhausted: nothing more to load
        assert_eq!(model.begin_load_more().await, None);

        let state = model.get_content_state().await;
        let ContentView::SearchResults { songs, .. } = state.view else {
            panic!("expected search results");
        };
        assert_eq!(songs.len(), 2);
    }
}
