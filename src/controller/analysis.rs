//! Backend download and chord-analysis controller methods

use super::AppController;
use crate::log_api_result;
use crate::model::{ApiClient, DetailTask};

impl AppController {
    pub async fn request_download(&self) {
        let model = self.model.lock().await;
        // None unless a detail view is open with no backend task running
        let Some(detail) = model.begin_detail_task(DetailTask::Download).await else {
            return;
        };
        let api = model.api.clone();
        drop(model);

        let video_url = ApiClient::watch_url(&detail.video_id);
        let result = api.request_download(&video_url).await;
        log_api_result!("download", result);

        let model = self.model.lock().await;
        match result {
            Ok(file_url) => {
                tracing::info!(video_id = %detail.video_id, file_url, "download ready");
                model.finish_download(file_url).await;
            }
            Err(e) => {
                model.detail_task_failed().await;
                model.set_error(Self::format_api_error(&e)).await;
            }
        }
    }

    pub async fn request_analysis(&self) {
        let model = self.model.lock().await;
        let Some(detail) = model.begin_detail_task(DetailTask::Analyze).await else {
            return;
        };
        let api = model.api.clone();
        drop(model);

        let result = api.analyze_song(&detail.video_id).await;
        log_api_result!("analyze", result);

        let model = self.model.lock().await;
        match result {
            Ok(analysis) => {
                tracing::info!(video_id = %detail.video_id, "analysis ready");
                model.finish_analysis(analysis).await;
            }
            Err(e) => {
                model.detail_task_failed().await;
                model.set_error(Self::format_api_error(&e)).await;
            }
        }
    }
}
