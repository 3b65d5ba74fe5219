//! REST client for the video-search provider and the AutoChord backend.

use std::time::Duration;

use serde::Deserialize;
use serde_json::{Value, json};

use super::content::{SearchPage, Song, SongDetail};
use crate::config::Config;

const PAGE_SIZE: u32 = 10;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Failures from the remote collaborators, one variant per operation.
/// Non-success HTTP statuses are carried so call sites can explain them.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("search failed (provider status {status})")]
    Search { status: u16 },
    #[error("detail lookup failed (provider status {status})")]
    Detail { status: u16 },
    #[error("no video found for id {video_id}")]
    NotFound { video_id: String },
    #[error("download request failed (backend status {status})")]
    Download { status: u16 },
    #[error("analysis request failed (backend status {status})")]
    Analysis { status: u16 },
    #[error("request error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Stateless request/response client. No caching, no retries; the only
/// resilience is the request timeout, surfaced as a normal failure.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    provider_url: String,
    api_key: String,
    server_url: String,
}

// -- Provider wire types (Deserialize only, never exposed) --

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    #[serde(default)]
    items: Vec<SearchItem>,
    #[serde(rename = "nextPageToken")]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: VideoRef,
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
struct VideoRef {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VideosEnvelope {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
struct VideoItem {
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    #[serde(default)]
    title: String,
    #[serde(rename = "channelTitle", default)]
    channel_title: String,
    #[serde(default)]
    thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
struct Thumbnails {
    high: Option<Thumbnail>,
    medium: Option<Thumbnail>,
    #[serde(rename = "default")]
    fallback: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    url: String,
}

impl Thumbnails {
    fn best_url(self) -> String {
        self.high
            .or(self.medium)
            .or(self.fallback)
            .map(|t| t.url)
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct DownloadResponse {
    file: String,
}

impl From<SearchEnvelope> for SearchPage {
    fn from(envelope: SearchEnvelope) -> Self {
        let songs = envelope
            .items
            .into_iter()
            .filter_map(|item| {
                // type=video is requested, but stay lenient about stray items
                let video_id = item.id.video_id?;
                Some(Song {
                    video_id,
                    title: item.snippet.title,
                    channel_title: item.snippet.channel_title,
                    thumbnail_url: item.snippet.thumbnails.best_url(),
                })
            })
            .collect();
        // An absent token must stay absent; "" is not a valid page token
        let next_page_token = envelope.next_page_token.filter(|t| !t.is_empty());
        SearchPage {
            songs,
            next_page_token,
        }
    }
}

impl ApiClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            provider_url: config.provider_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            server_url: config.server_url.trim_end_matches('/').to_string(),
        })
    }

    /// Provider watch URL for a video id, the form the backend downloader expects.
    pub fn watch_url(video_id: &str) -> String {
        format!("https://www.youtube.com/watch?v={video_id}")
    }

    /// Search for videos matching `query`, 10 per page.
    pub async fn search_songs(
        &self,
        query: &str,
        page_token: Option<&str>,
    ) -> Result<SearchPage, ApiError> {
        let page_size = PAGE_SIZE.to_string();
        let mut request = self
            .http
            .get(format!("{}/search", self.provider_url))
            .query(&[
                ("part", "snippet"),
                ("type", "video"),
                ("maxResults", page_size.as_str()),
                ("q", query),
                ("key", self.api_key.as_str()),
            ]);
        if let Some(token) = page_token.filter(|t| !t.is_empty()) {
            request = request.query(&[("pageToken", token)]);
        }

        tracing::debug!(query, page_token = ?page_token, "searching songs");
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Search {
                status: status.as_u16(),
            });
        }
        let envelope: SearchEnvelope = response.json().await?;
        Ok(envelope.into())
    }

    /// Fetch snippet metadata for a single video.
    pub async fn get_song_detail(&self, video_id: &str) -> Result<SongDetail, ApiError> {
        tracing::debug!(video_id, "fetching song detail");
        let response = self
            .http
            .get(format!("{}/videos", self.provider_url))
            .query(&[
                ("part", "snippet,contentDetails"),
                ("id", video_id),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Detail {
                status: status.as_u16(),
            });
        }
        let envelope: VideosEnvelope = response.json().await?;
        // The provider answers unknown ids with 200 and an empty list
        let Some(item) = envelope.items.into_iter().next() else {
            return Err(ApiError::NotFound {
                video_id: video_id.to_string(),
            });
        };
        Ok(SongDetail {
            video_id: video_id.to_string(),
            title: item.snippet.title,
            channel_title: item.snippet.channel_title,
            thumbnail_url: item.snippet.thumbnails.best_url(),
        })
    }

    /// Ask the backend to extract audio; returns the absolute mp3 URL.
    pub async fn request_download(&self, video_url: &str) -> Result<String, ApiError> {
        tracing::debug!(video_url, "requesting download");
        let response = self
            .http
            .post(format!("{}/download", self.server_url))
            .json(&json!({ "url": video_url }))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Download {
                status: status.as_u16(),
            });
        }
        let body: DownloadResponse = response.json().await?;
        Ok(join_file_url(&self.server_url, &body.file))
    }

    /// Ask the backend for chord/key analysis. The payload is opaque here;
    /// the view picks out well-known fields when present.
    pub async fn analyze_song(&self, video_id: &str) -> Result<Value, ApiError> {
        tracing::debug!(video_id, "requesting analysis");
        let response = self
            .http
            .post(format!("{}/analyze", self.server_url))
            .json(&json!({ "videoId": video_id }))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Analysis {
                status: status.as_u16(),
            });
        }
        Ok(response.json().await?)
    }
}

/// Join a backend-relative file path onto the backend base URL.
fn join_file_url(base: &str, file: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        file.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    use super::*;
    use crate::config::Config;
    use serde_json::json;

    /// One-shot HTTP server answering the next connection with a canned
    /// response. Returns the base URL to point the client at.
    async fn stub_server(status_line: &str, body: &str) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        tokio::spawn(async move {
            if let Ok((mut stream, _)) = listener.accept().await {
                let mut buf = [0u8; 4096];
                let _ = stream.read(&mut buf).await;
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });
        format!("http://{addr}")
    }

    fn client(provider_url: &str, server_url: &str) -> ApiClient {
        let config = Config {
            api_key: "test-key".to_string(),
            server_url: server_url.to_string(),
            provider_url: provider_url.to_string(),
        };
        ApiClient::new(&config).unwrap()
    }

    #[tokio::test]
    async fn rejected_search_carries_the_provider_status() {
        let base = stub_server("403 Forbidden", "{}").await;
        let api = client(&base, "http://unused.local");
        let err = api.search_songs("query", None).await.unwrap_err();
        assert!(matches!(err, ApiError::Search { status: 403 }));
    }

    #[tokio::test]
    async fn rejected_download_carries_the_backend_status() {
        let base = stub_server("500 Internal Server Error", "{}").await;
        let api = client("http://unused.local", &base);
        let err = api
            .request_download("https://www.youtube.com/watch?v=abc")
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Download { status: 500 }));
    }

    #[tokio::test]
    async fn unknown_video_id_is_reported_not_found() {
        let base = stub_server("200 OK", r#"{"items": []}"#).await;
        let api = client(&base, "http://unused.local");
        let err = api.get_song_detail("missing").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound { video_id } if video_id == "missing"));
    }

    fn search_page(value: Value) -> SearchPage {
        let envelope: SearchEnvelope = serde_json::from_value(value).unwrap();
        envelope.into()
    }

    #[test]
    fn maps_provider_search_response() {
        let page = search_page(json!({
            "items": [{
                "id": { "videoId": "abc123" },
                "snippet": {
                    "title": "Test Song",
                    "channelTitle": "Test Channel",
                    "thumbnails": { "high": { "url": "https://img/high.jpg" } }
                }
            }],
            "nextPageToken": "CAoQAA"
        }));

        assert_eq!(
            page.songs,
            vec![Song {
                video_id: "abc123".to_string(),
                title: "Test Song".to_string(),
                channel_title: "Test Channel".to_string(),
                thumbnail_url: "https://img/high.jpg".to_string(),
            }]
        );
        assert_eq!(page.next_page_token.as_deref(), Some("CAoQAA"));
    }

    #[test]
    fn absent_next_page_token_stays_absent() {
        let page = search_page(json!({ "items": [] }));
        assert_eq!(page.next_page_token, None);

        // An empty-string token is as good as no token
        let page = search_page(json!({ "items": [], "nextPageToken": "" }));
        assert_eq!(page.next_page_token, None);
    }

    #[test]
    fn items_without_a_video_id_are_skipped() {
        let page = search_page(json!({
            "items": [
                { "id": {}, "snippet": { "title": "not a video" } },
                {
                    "id": { "videoId": "keep" },
                    "snippet": { "title": "kept", "channelTitle": "c" }
                }
            ]
        }));
        assert_eq!(page.songs.len(), 1);
        assert_eq!(page.songs[0].video_id, "keep");
    }

    #[test]
    fn thumbnail_falls_back_through_sizes() {
        let page = search_page(json!({
            "items": [{
                "id": { "videoId": "v" },
                "snippet": {
                    "title": "t",
                    "channelTitle": "c",
                    "thumbnails": { "default": { "url": "https://img/default.jpg" } }
                }
            }]
        }));
        assert_eq!(page.songs[0].thumbnail_url, "https://img/default.jpg");
    }

    #[test]
    fn empty_videos_response_deserializes_to_no_items() {
        let envelope: VideosEnvelope = serde_json::from_value(json!({ "items": [] })).unwrap();
        assert!(envelope.items.is_empty());
    }

    #[test]
    fn joins_download_url_against_backend_base() {
        assert_eq!(
            join_file_url("http://api.local", "abc.mp3"),
            "http://api.local/abc.mp3"
        );
        assert_eq!(
            join_file_url("http://api.local/", "/downloads/abc.mp3"),
            "http://api.local/downloads/abc.mp3"
        );
    }

    #[test]
    fn watch_url_embeds_the_video_id() {
        assert_eq!(
            ApiClient::watch_url("abc123"),
            "https://www.youtube.com/watch?v=abc123"
        );
    }

    #[test]
    fn errors_carry_the_remote_status() {
        assert_eq!(
            ApiError::Search { status: 403 }.to_string(),
            "search failed (provider status 403)"
        );
        assert_eq!(
            ApiError::Download { status: 500 }.to_string(),
            "download request failed (backend status 500)"
        );
    }
}
