use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Seconds before `expires_at` at which a credential already counts as expired.
pub const EXPIRY_MARGIN_SECS: i64 = 60;

/// The single persisted user credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: DateTime<Utc>,
    pub scope: BTreeSet<String>,
}

impl Credential {
    /// Builds a credential from a token endpoint response.
    ///
    /// Refresh responses may omit the refresh token; `previous_refresh` is
    /// carried over in that case. An empty `scope` falls back to the scope
    /// that was requested.
    pub fn from_response(
        response: TokenResponse,
        previous_refresh: Option<&str>,
        requested_scope: &str,
        now: DateTime<Utc>,
    ) -> Option<Self> {
        let access_token = response.access_token.filter(|t| !t.is_empty())?;
        let refresh_token = response
            .refresh_token
            .filter(|t| !t.is_empty())
            .or_else(|| previous_refresh.map(str::to_string))
            .unwrap_or_default();
        let scope_str = response
            .scope
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| requested_scope.to_string());

        Some(Self {
            access_token,
            refresh_token,
            expires_at: now + Duration::seconds(response.expires_in.unwrap_or(3600)),
            scope: scope_str.split_whitespace().map(str::to_string).collect(),
        })
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(EXPIRY_MARGIN_SECS) >= self.expires_at
    }
}

/// Body of a successful call to the accounts service token endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    pub token_type: Option<String>,
    pub scope: Option<String>,
    pub expires_in: Option<i64>,
    pub refresh_token: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Play,
    Unknown,
}

/// A transcript interpreted as a command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Intent {
    Play {
        song_name: String,
        artist_name: Option<String>,
    },
    Unknown {
        error: String,
    },
}

impl Intent {
    pub fn action(&self) -> Action {
        match self {
            Intent::Play { .. } => Action::Play,
            Intent::Unknown { .. } => Action::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub volume_percent: Option<u8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevicesResponse {
    pub devices: Vec<Device>,
}

#[derive(Tabled)]
pub struct DeviceTableRow {
    pub name: String,
    pub kind: String,
    pub active: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Track {
    pub uri: String,
    pub name: String,
    pub artist: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub tracks: SearchTracks,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchTracks {
    pub items: Vec<SearchTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchTrack {
    pub uri: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<SearchArtist>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchArtist {
    pub name: String,
}

impl From<SearchTrack> for Track {
    fn from(track: SearchTrack) -> Self {
        let artist = track
            .artists
            .into_iter()
            .next()
            .map(|a| a.name)
            .unwrap_or_default();

        Track {
            uri: track.uri,
            name: track.name,
            artist,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StartPlaybackRequest {
    pub uris: Vec<String>,
}

/// What the voice command endpoint reports back to the speaker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackOutcome {
    LoginRequired,
    NoDevices,
    SongNotFound,
    Playing { track: Track, device_id: String },
}

impl PlaybackOutcome {
    pub fn message(&self) -> String {
        match self {
            PlaybackOutcome::LoginRequired => "Login required".to_string(),
            PlaybackOutcome::NoDevices => "No devices Found".to_string(),
            PlaybackOutcome::SongNotFound => "Song not found".to_string(),
            PlaybackOutcome::Playing { track, .. } => {
                format!("Playing {} by {}", track.name, track.artist)
            }
        }
    }
}
