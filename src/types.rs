use chrono::DateTime;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::Res;

/// In-memory token state owned by the token lifecycle manager.
///
/// Invariant: if `access_token` is set, `expires_at` is set. The refresh
/// token outlives access-token invalidation and is only dropped on logout.
#[derive(Debug, Clone, Default)]
pub struct TokenState {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    /// Unix seconds at which the access token expires.
    pub expires_at: Option<i64>,
}

/// Token endpoint response for both the authorization_code and
/// refresh_token grants.
///
/// `refresh_token` is optional: Spotify omits it on most refreshes, and an
/// absent value must not erase a previously stored one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    #[serde(default)]
    pub scope: Option<String>,
    pub expires_in: i64,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Full artist details as returned by `GET /artists/{id}`.
///
/// An empty `genres` list is valid data, not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentlyPlayedResponse {
    pub items: Vec<PlayedItem>,
    #[serde(default)]
    pub cursors: Option<Cursors>,
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayedItem {
    pub track: PlayedTrack,
    pub played_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayedTrack {
    pub id: String,
    pub name: String,
    pub duration_ms: i64,
    pub artists: Vec<TrackArtist>,
}

/// Simplified artist object embedded in a track.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackArtist {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cursors {
    pub after: Option<String>,
    #[serde(default)]
    pub before: Option<String>,
}

/// One normalized play, keyed by the instant it started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayRecord {
    /// Epoch milliseconds; the dedup key.
    pub played_at_ms: i64,
    pub track_id: String,
    pub track_name: String,
    pub artist_id: String,
    pub duration_ms: i64,
}

impl PlayRecord {
    /// Normalizes a recently-played item. The primary artist's id is taken
    /// from the first artist on the track, `"unknown"` if the provider sent
    /// none.
    pub fn from_item(item: &PlayedItem) -> Res<Self> {
        let played_at_ms = DateTime::parse_from_rfc3339(&item.played_at)?.timestamp_millis();
        let artist_id = item
            .track
            .artists
            .first()
            .and_then(|a| a.id.clone())
            .unwrap_or_else(|| "unknown".to_string());

        Ok(PlayRecord {
            played_at_ms,
            track_id: item.track.id.clone(),
            track_name: item.track.name.clone(),
            artist_id,
            duration_ms: item.track.duration_ms,
        })
    }
}

/// A recent-tracks query result row.
#[derive(Debug, Clone)]
pub struct RecentTrack {
    pub track_name: String,
    pub artist_name: String,
    pub played_at_ms: i64,
}

#[derive(Tabled)]
pub struct StatRow {
    pub metric: String,
    pub value: String,
}

#[derive(Tabled)]
pub struct RecentTrackRow {
    pub played: String,
    pub track: String,
    pub artist: String,
}

/// Counters reported by one sync cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncSummary {
    pub fetched: usize,
    pub inserted: usize,
    pub artists_updated: usize,
}
