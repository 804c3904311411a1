//! Pexels catalog adapter
//!
//! Talks to the `videos/search` and `v1/search` endpoints and maps the
//! responses into raw domain items. Filtering is left to the domain rules.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Environment variable holding the Pexels API key
pub const API_KEY_ENV: &str = "PEXELS_API_KEY";

const INVALID_KEY_MESSAGE: &str = "Invalid Pexels API key - please make sure you get a valid key from https://www.pexels.com/api and set it in the environment variable PEXELS_API_KEY";

/// HTTP adapter for the Pexels stock media API
#[derive(Debug, Clone)]
pub struct PexelsAdapter {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl PexelsAdapter {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.pexels.com";

    /// Create new Pexels adapter; a missing key only fails once a search is attempted
    pub fn new(api_key: Option<String>) -> Result<Self, DomainError> {
        let client = Client::builder()
            .build()
            .map_err(|e| DomainError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Point the adapter at another host (mock servers, proxies)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Credential as a header value; a key that cannot be sent is a configuration error
    fn api_key(&self) -> Result<HeaderValue, DomainError> {
        let key = self.api_key.as_deref().ok_or_else(|| {
            DomainError::Configuration(format!(
                "Pexels API key not set - set the {} environment variable",
                API_KEY_ENV
            ))
        })?;

        HeaderValue::from_str(key).map_err(|_| {
            DomainError::Configuration(format!(
                "Pexels API key contains characters not allowed in a header - check {} for stray whitespace or control characters",
                API_KEY_ENV
            ))
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, String)],
        term: &str,
        orientation: Orientation,
        timeout: Duration,
    ) -> Result<T, DomainError> {
        let api_key = self.api_key()?;
        debug!(url, term, %orientation, "Requesting Pexels catalog");

        let timed_out = || DomainError::Timeout {
            term: term.to_string(),
            orientation,
            attempts: 1,
        };

        let response = self
            .client
            .get(url)
            .query(params)
            .header(AUTHORIZATION, api_key)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    timed_out()
                } else if e.is_builder() {
                    DomainError::Configuration(format!("Invalid Pexels request: {}", e))
                } else {
                    DomainError::provider(format!("Request to Pexels failed: {}", e))
                }
            })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            error!(term, "Pexels rejected the API key");
            return Err(DomainError::Configuration(INVALID_KEY_MESSAGE.to_string()));
        }
        if !status.is_success() {
            return Err(DomainError::Provider {
                status: Some(status.as_u16()),
                message: format!(
                    "Pexels API error: {}",
                    status.canonical_reason().unwrap_or("unknown status")
                ),
            });
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                timed_out()
            } else {
                DomainError::provider(format!("Failed to read Pexels response: {}", e))
            }
        })?;

        serde_json::from_str(&body)
            .map_err(|e| DomainError::provider(format!("Malformed Pexels response: {}", e)))
    }
}

#[async_trait]
impl MediaProviderPort for PexelsAdapter {
    async fn search_videos(&self, query: &VideoQuery) -> Result<Vec<RawVideo>, DomainError> {
        let url = format!("{}/videos/search", self.base_url);

        let mut params = Vec::with_capacity(4);
        if let Some(orientation) = query.orientation {
            params.push(("orientation", orientation.as_str().to_string()));
            params.push(("size", "medium".to_string()));
        }
        params.push(("per_page", query.per_page.to_string()));
        params.push(("query", query.term.clone()));

        let response: VideoSearchResponse = self
            .get_json(
                &url,
                &params,
                &query.term,
                query.orientation.unwrap_or_default(),
                query.timeout,
            )
            .await?;

        Ok(response.into_videos())
    }

    async fn search_photos(&self, query: &PhotoQuery) -> Result<Vec<RawPhoto>, DomainError> {
        let url = format!("{}/v1/search", self.base_url);
        let params = [
            ("query", query.term.clone()),
            ("per_page", query.per_page.to_string()),
            ("orientation", query.orientation.as_str().to_string()),
        ];

        let response: PhotoSearchResponse = self
            .get_json(&url, &params, &query.term, query.orientation, query.timeout)
            .await?;

        Ok(response.into_photos())
    }
}

// API response types

/// Pexels ids are numeric, but accept strings too
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ProviderId {
    Number(u64),
    Text(String),
}

impl From<ProviderId> for String {
    fn from(id: ProviderId) -> Self {
        match id {
            ProviderId::Number(n) => n.to_string(),
            ProviderId::Text(s) => s,
        }
    }
}

// Items are decoded one at a time so a single malformed entry only drops itself

#[derive(Debug, Deserialize)]
struct VideoSearchResponse {
    #[serde(default)]
    videos: Vec<Value>,
}

impl VideoSearchResponse {
    fn into_videos(self) -> Vec<RawVideo> {
        decode_items::<PexelsVideo>(self.videos, "video")
            .into_iter()
            .map(RawVideo::from)
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct PexelsVideo {
    id: ProviderId,
    duration: f64,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    video_files: Vec<PexelsVideoFile>,
}

#[derive(Debug, Deserialize)]
struct PexelsVideoFile {
    #[serde(default)]
    quality: Option<String>,
    #[serde(default)]
    width: Option<u32>,
    #[serde(default)]
    height: Option<u32>,
    #[serde(default)]
    fps: Option<f64>,
    link: String,
}

#[derive(Debug, Deserialize)]
struct PhotoSearchResponse {
    #[serde(default)]
    photos: Vec<Value>,
}

impl PhotoSearchResponse {
    fn into_photos(self) -> Vec<RawPhoto> {
        decode_items::<PexelsPhoto>(self.photos, "photo")
            .into_iter()
            .map(RawPhoto::from)
            .collect()
    }
}

fn decode_items<T: DeserializeOwned>(items: Vec<Value>, kind: &str) -> Vec<T> {
    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                warn!(kind, error = %e, "Skipping malformed Pexels item");
                None
            }
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct PexelsPhoto {
    id: ProviderId,
    width: u32,
    height: u32,
    src: PexelsPhotoSrc,
}

#[derive(Debug, Deserialize)]
struct PexelsPhotoSrc {
    original: String,
}

impl From<PexelsVideo> for RawVideo {
    fn from(video: PexelsVideo) -> Self {
        RawVideo {
            id: video.id.into(),
            duration: video.duration,
            image: video.image,
            files: video
                .video_files
                .into_iter()
                .map(|file| RawVideoFile {
                    quality: file.quality,
                    width: file.width,
                    height: file.height,
                    fps: file.fps,
                    link: file.link,
                })
                .collect(),
        }
    }
}

impl From<PexelsPhoto> for RawPhoto {
    fn from(photo: PexelsPhoto) -> Self {
        RawPhoto {
            id: photo.id.into(),
            width: photo.width,
            height: photo.height,
            url: photo.src.original,
        }
    }
}
