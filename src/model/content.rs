//! Content view state and data structures for search results and song detail.

use serde_json::Value;

/// A song from provider search results
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Song {
    pub video_id: String,
    pub title: String,
    pub channel_title: String,
    pub thumbnail_url: String,
}

/// Detail metadata for a single song
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SongDetail {
    pub video_id: String,
    pub title: String,
    pub channel_title: String,
    pub thumbnail_url: String,
}

/// One page of search results
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchPage {
    pub songs: Vec<Song>,
    /// Absent when the provider has no further page. Never `Some("")`.
    pub next_page_token: Option<String>,
}

/// Backend task currently in flight for the detail view
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DetailTask {
    Download,
    Analyze,
}

/// Represents the current view in the main content area
#[derive(Clone, Debug, Default)]
pub enum ContentView {
    #[default]
    Empty,
    SearchResults {
        query: String,
        songs: Vec<Song>,
        next_page_token: Option<String>,
        selected_index: usize,
        loading_more: bool,
    },
    SongDetail {
        detail: SongDetail,
        download_url: Option<String>,
        analysis: Option<Value>,
        pending: Option<DetailTask>,
    },
}

/// State for the main content area
#[derive(Clone, Debug, Default)]
pub struct ContentState {
    pub view: ContentView,
    pub navigation_stack: Vec<ContentView>,
    pub is_loading: bool,
}
