//! Environment-sourced configuration (provider API key, backend address)

use anyhow::{Context, Result};

const DEFAULT_PROVIDER_URL: &str = "https://www.googleapis.com/youtube/v3";
const DEFAULT_SERVER_URL: &str = "http://localhost:5001";

#[derive(Clone, Debug)]
pub struct Config {
    /// API key for the video-search provider
    pub api_key: String,
    /// Base URL of the AutoChord download/analysis backend
    pub server_url: String,
    /// Base URL of the video-search provider
    pub provider_url: String,
}

impl Config {
    /// Read configuration from the environment. A `.env` file, if any, is
    /// loaded by main before this runs.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("AUTOCHORD_API_KEY")
            .context("AUTOCHORD_API_KEY is not set (video-search provider API key)")?;
        let server_url = std::env::var("AUTOCHORD_SERVER_URL")
            .unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string());
        let provider_url = std::env::var("AUTOCHORD_PROVIDER_URL")
            .unwrap_or_else(|_| DEFAULT_PROVIDER_URL.to_string());
        Ok(Self {
            api_key,
            server_url,
            provider_url,
        })
    }
}
