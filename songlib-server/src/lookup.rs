//! Song info lookup against the external enrichment service
//!
//! `GET {base}/info?group=..&song=..` answers
//! `{"SongDetail": {"releaseDate": "..", "text": "..", "link": ".."}}`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::error::ErrorKind;

/// Default timeout for one lookup call
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// Enrichment data for a new song. Missing fields decode as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SongDetail {
    pub release_date: String,
    pub text: String,
    pub link: String,
}

#[derive(Debug, Deserialize)]
struct InfoResponse {
    #[serde(rename = "SongDetail", default)]
    song_detail: SongDetail,
}

/// Lookup error type
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with status {status}")]
    Status { url: String, status: StatusCode },

    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not build lookup client: {0}")]
    Client(#[source] reqwest::Error),
}

impl LookupError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport { .. } | Self::Status { .. } => ErrorKind::UpstreamUnavailable,
            Self::Decode { .. } | Self::Client(_) => ErrorKind::Internal,
        }
    }
}

/// Source of enrichment data for new songs
#[async_trait]
pub trait SongInfoSource: Send + Sync {
    async fn fetch(&self, group: &str, song: &str) -> Result<SongDetail, LookupError>;
}

/// HTTP client for the enrichment service
#[derive(Debug, Clone)]
pub struct HttpSongInfo {
    http: Client,
    base_url: String,
}

impl HttpSongInfo {
    pub fn new(base_url: impl Into<String>) -> Result<Self, LookupError> {
        Self::with_timeout(base_url, DEFAULT_LOOKUP_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, LookupError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(LookupError::Client)?;
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn info_url(&self) -> String {
        format!("{}/info", self.base_url)
    }
}

#[async_trait]
impl SongInfoSource for HttpSongInfo {
    async fn fetch(&self, group: &str, song: &str) -> Result<SongDetail, LookupError> {
        let url = self.info_url();
        tracing::debug!(%url, group, song, "fetching song info");

        let response = self
            .http
            .get(&url)
            .query(&[("group", group), ("song", song)])
            .send()
            .await
            .map_err(|source| LookupError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(LookupError::Status { url, status });
        }

        // a body cut off mid-read is the service failing, not bad JSON
        let bytes = response
            .bytes()
            .await
            .map_err(|source| LookupError::Transport {
                url: url.clone(),
                source,
            })?;

        let body: InfoResponse =
            serde_json::from_slice(&bytes).map_err(|source| LookupError::Decode { url, source })?;

        Ok(body.song_detail)
    }
}
