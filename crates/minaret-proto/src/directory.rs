//! Station Directory client — read-only access to the broadcast service.
//!
//! Failures are always surfaced: an empty list and a failed fetch are
//! different outcomes and callers must be able to tell them apart.

use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

use crate::station::{
    Envelope, NowPlaying, Station, StationData, StationDetail, StationId, StationsData,
};

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("network request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("station not found: {0}")]
    NotFound(String),

    #[error("directory returned HTTP {0}")]
    Status(StatusCode),

    #[error("could not decode directory response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("directory reported {status}: {message}")]
    Api { status: String, message: String },
}

impl DirectoryError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, DirectoryError::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, DirectoryError>;

#[derive(Debug, Clone)]
pub struct DirectoryClient {
    http: reqwest::Client,
    base_url: String,
}

impl DirectoryClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("minaret-live/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(timeout.min(Duration::from_secs(5)))
            .timeout(timeout)
            .build()?;
        Ok(Self::with_client(http, base_url))
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// All stations, in the order the server returned them.
    pub async fn list(&self) -> Result<Vec<Station>> {
        let env: Envelope<StationsData> = self.get_json("/stations", None).await?;
        Ok(env.data.stations.into_iter().map(Station::from).collect())
    }

    /// Stations currently broadcasting (server-side filter).
    pub async fn live(&self) -> Result<Vec<Station>> {
        let env: Envelope<StationsData> = self.get_json("/stations/live", None).await?;
        Ok(env.data.stations.into_iter().map(Station::from).collect())
    }

    pub async fn get(&self, slug: &str) -> Result<StationDetail> {
        let env: Envelope<StationData> = self
            .get_json(&format!("/stations/{}", slug), Some(slug))
            .await?;
        Ok(env.data.station)
    }

    pub async fn now_playing(&self, slug: &str) -> Result<NowPlaying> {
        let env: Envelope<NowPlaying> = self
            .get_json(&format!("/stations/{}/now-playing", slug), Some(slug))
            .await?;
        Ok(env.data)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        subject: Option<&str>,
    ) -> Result<Envelope<T>> {
        let url = format!("{}{}", self.base_url, path);
        debug!("[directory] GET {}", url);

        let response = self
            .http
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(DirectoryError::NotFound(
                subject.unwrap_or(path).to_string(),
            ));
        }
        if !status.is_success() {
            warn!("[directory] {} returned {}", url, status);
            return Err(DirectoryError::Status(status));
        }

        let body = response.bytes().await?;
        let env: Envelope<T> = serde_json::from_slice(&body)?;
        if !env.is_success() {
            return Err(DirectoryError::Api {
                status: env.status,
                message: env.message.unwrap_or_default(),
            });
        }
        Ok(env)
    }
}

/// The last fetched station list, with id lookup.
#[derive(Debug, Clone, Default)]
pub struct DirectorySnapshot {
    stations: Vec<Station>,
}

impl DirectorySnapshot {
    pub fn new(stations: Vec<Station>) -> Self {
        Self { stations }
    }

    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn get(&self, id: &StationId) -> Result<&Station> {
        self.stations
            .iter()
            .find(|s| &s.id == id)
            .ok_or_else(|| DirectoryError::NotFound(id.to_string()))
    }
}
