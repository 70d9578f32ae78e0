//! Station data model and the REST wire shapes it is decoded from.
//!
//! The directory service speaks camelCase JSON with Mongo-style `_id` keys.
//! Wire structs mirror that shape exactly; [`Station`] is the flattened
//! display record the rest of the app works with, and [`StationSnapshot`] is
//! the frozen copy the session keeps once a station is selected.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity of a station.  Two stations may share a display name; they never
/// share an id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationId(String);

impl StationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StationId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

// ── Wire types ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentTrack {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
}

impl CurrentTrack {
    /// "Artist – Title", "Title", "Artist", or `None` when the server sent an
    /// empty track object.
    pub fn display(&self) -> Option<String> {
        let title = self.title.as_deref().filter(|s| !s.is_empty());
        let artist = self.artist.as_deref().filter(|s| !s.is_empty());
        match (artist, title) {
            (Some(a), Some(t)) => Some(format!("{} – {}", a, t)),
            (None, Some(t)) => Some(t.to_string()),
            (Some(a), None) => Some(a.to_string()),
            (None, None) => None,
        }
    }
}

/// The mosque a station belongs to, as populated by the list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MosqueRef {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub location: String,
}

/// The detail endpoint returns `mosqueId` either as a bare id or populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MosqueField {
    Populated(MosqueRef),
    Id(String),
}

impl MosqueField {
    pub fn location(&self) -> Option<&str> {
        match self {
            MosqueField::Populated(m) => Some(m.location.as_str()),
            MosqueField::Id(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListStats {
    #[serde(default)]
    pub total_listeners: u64,
}

/// One row of `GET /stations` and `GET /stations/live`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationListItem {
    #[serde(rename = "_id")]
    pub id: StationId,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_live: bool,
    #[serde(default)]
    pub stream_url: Option<String>,
    #[serde(default)]
    pub current_track: Option<CurrentTrack>,
    pub mosque_id: MosqueRef,
    #[serde(default)]
    pub stats: ListStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    Mp3,
    Ogg,
    Aac,
}

impl AudioFormat {
    pub fn label(self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Ogg => "ogg",
            AudioFormat::Aac => "aac",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationSettings {
    pub bitrate: u32,
    pub format: AudioFormat,
    pub is_public: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationStats {
    #[serde(default)]
    pub total_listeners: u64,
    #[serde(default)]
    pub peak_listeners: Option<u64>,
    #[serde(default)]
    pub total_broadcast_minutes: Option<u64>,
}

/// Full record from `GET /stations/:slug`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationDetail {
    #[serde(rename = "_id")]
    pub id: StationId,
    pub mosque_id: MosqueField,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub stream_url: Option<String>,
    pub mount_point: String,
    #[serde(default)]
    pub is_live: bool,
    #[serde(default)]
    pub current_track: Option<CurrentTrack>,
    pub settings: StationSettings,
    #[serde(default)]
    pub stats: StationStats,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload of `GET /stations/:slug/now-playing`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NowPlaying {
    pub station_name: String,
    #[serde(default)]
    pub is_live: bool,
    #[serde(default)]
    pub current_track: Option<CurrentTrack>,
}

// ── Envelopes ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct StationsData {
    pub stations: Vec<StationListItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StationData {
    pub station: StationDetail,
}

/// `{ status, results?, message?, data }`: every endpoint wraps its payload
/// in this.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub status: String,
    #[serde(default)]
    pub results: Option<usize>,
    #[serde(default)]
    pub message: Option<String>,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

// ── Display records ───────────────────────────────────────────────────────────

/// A station as the UI sees it.  Mutable fields (`is_live`, `current_track`,
/// `listener_count`) change between fetches; identity is `id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Station {
    pub id: StationId,
    pub slug: String,
    pub name: String,
    pub location: String,
    pub mount_point: String,
    pub stream_url: Option<String>,
    pub description: Option<String>,
    pub is_live: bool,
    pub current_track: Option<CurrentTrack>,
    pub listener_count: u64,
}

impl Station {
    pub fn snapshot(&self) -> StationSnapshot {
        StationSnapshot {
            id: self.id.clone(),
            name: self.name.clone(),
            location: self.location.clone(),
            mount_point: self.mount_point.clone(),
        }
    }
}

impl From<StationListItem> for Station {
    fn from(item: StationListItem) -> Self {
        // The list endpoint carries no mount point; mounts are keyed by id.
        let mount_point = format!("/mosque-{}", item.id);
        Self {
            id: item.id,
            slug: item.slug,
            name: item.name,
            location: item.mosque_id.location,
            mount_point,
            stream_url: item.stream_url,
            description: item.description,
            is_live: item.is_live,
            current_track: item.current_track,
            listener_count: item.stats.total_listeners,
        }
    }
}

impl From<StationDetail> for Station {
    fn from(detail: StationDetail) -> Self {
        let location = detail.mosque_id.location().unwrap_or_default().to_string();
        Self {
            id: detail.id,
            slug: detail.slug,
            name: detail.name,
            location,
            mount_point: detail.mount_point,
            stream_url: detail.stream_url,
            description: detail.description,
            is_live: detail.is_live,
            current_track: detail.current_track,
            listener_count: detail.stats.total_listeners,
        }
    }
}

/// Identity and display fields copied at selection time.  Deliberately not a
/// live reference: fresh metadata must be looked up again by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationSnapshot {
    pub id: StationId,
    pub name: String,
    pub location: String,
    pub mount_point: String,
}

impl StationSnapshot {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        location: impl Into<String>,
        mount_point: impl Into<String>,
    ) -> Self {
        Self {
            id: StationId::new(id),
            name: name.into(),
            location: location.into(),
            mount_point: mount_point.into(),
        }
    }
}
