//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input
//! and coordinates the async operations against the remote collaborators.
//! It is organized into submodules by responsibility:
//!
//! - `input`: Key event handling
//! - `auth`: Login/signup submission lifecycle and logout
//! - `navigation`: Search, pagination and song detail
//! - `analysis`: Backend download and chord analysis requests

mod analysis;
mod auth;
mod input;
mod navigation;

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::model::{ApiError, AppModel};

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<Mutex<AppModel>>,
}

impl AppController {
    pub fn new(model: Arc<Mutex<AppModel>>) -> Self {
        Self { model }
    }

    pub(crate) fn format_api_error(error: &ApiError) -> String {
        let status = match error {
            ApiError::Search { status }
            | ApiError::Detail { status }
            | ApiError::Download { status }
            | ApiError::Analysis { status } => Some(*status),
            _ => None,
        };

        match (error, status) {
            (_, Some(401)) => "Authentication with the service failed. Check your API key.".to_string(),
            (_, Some(403)) => "Request forbidden. The API key may be invalid or over quota.".to_string(),
            (_, Some(404)) => "The remote endpoint was not found.".to_string(),
            (_, Some(429)) => "Rate limited. Please wait a moment.".to_string(),
            (ApiError::NotFound { .. }, _) => "That video is no longer available.".to_string(),
            _ => format!("Error: {}", error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_success_statuses_get_friendly_messages() {
        assert!(
            AppController::format_api_error(&ApiError::Search { status: 403 }).contains("forbidden")
        );
        assert!(
            AppController::format_api_error(&ApiError::Analysis { status: 429 })
                .contains("Rate limited")
        );
        assert!(
            AppController::format_api_error(&ApiError::NotFound {
                video_id: "x".to_string()
            })
            .contains("no longer available")
        );
        // Unmapped statuses fall through to the raw error text
        assert!(
            AppController::format_api_error(&ApiError::Download { status: 500 }).contains("500")
        );
    }
}
