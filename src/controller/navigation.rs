//! Search and song-detail controller methods

use super::AppController;
use crate::log_api_result;
use crate::model::ActiveSection;

impl AppController {
    pub async fn perform_search(&self, query: &str) {
        tracing::debug!(query, "performing search");
        let model = self.model.lock().await;
        model.set_content_loading(true).await;
        let api = model.api.clone();
        drop(model);

        let result = api.search_songs(query, None).await;
        log_api_result!("search", result);

        let model = self.model.lock().await;
        match result {
            Ok(page) => {
                tracing::info!(query, songs = page.songs.len(), "search completed");
                model.set_search_results(query.to_string(), page).await;
                // Switch to the results section to show them
                model.set_active_section(ActiveSection::Results).await;
            }
            Err(e) => {
                model.set_content_loading(false).await;
                model.set_error(Self::format_api_error(&e)).await;
            }
        }
    }

    pub async fn load_next_page(&self) {
        let model = self.model.lock().await;
        // None when there is no further page or one is already loading
        let Some((query, token)) = model.begin_load_more().await else {
            return;
        };
        let api = model.api.clone();
        drop(model);

        tracing::debug!(query, token, "loading next result page");
        let result = api.search_songs(&query, Some(&token)).await;
        log_api_result!("search_next_page", result);

        let model = self.model.lock().await;
        match result {
            Ok(page) => {
                model.append_search_page(page).await;
            }
            Err(e) => {
                model.set_search_loading_more(false).await;
                model.set_error(Self::format_api_error(&e)).await;
            }
        }
    }

    pub async fn open_song_detail(&self, video_id: &str) {
        let model = self.model.lock().await;
        model.set_content_loading(true).await;
        let api = model.api.clone();
        drop(model);

        let result = api.get_song_detail(video_id).await;
        log_api_result!("song_detail", result);

        let model = self.model.lock().await;
        match result {
            Ok(detail) => {
                model.set_song_detail(detail).await;
                model.set_active_section(ActiveSection::Results).await;
            }
            Err(e) => {
                model.set_content_loading(false).await;
                model.set_error(Self::format_api_error(&e)).await;
            }
        }
    }
}
