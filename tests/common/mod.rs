#![allow(dead_code)]

use std::{
    collections::{BTreeSet, HashMap},
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use axum::{
    Form, Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    routing::{get, post, put},
};
use chrono::{Duration, Utc};
use serde_json::Value;

use voxplay::{
    config::{DEFAULT_SCOPE, SpotifySettings},
    management::{CredentialStore, PlaybackManager, TokenManager},
    server::AppState,
    spotify::{SpotifyClient, SpotifyOAuth},
    types::Credential,
    voice::{AudioClip, RecognitionError, SpeechRecognizer, Transcriber},
};

pub const DEVICES_ONE: &str = r#"{"devices":[{"id":"device-1","is_active":true,"is_private_session":false,"is_restricted":false,"name":"Kitchen","type":"Speaker","volume_percent":50}]}"#;
pub const DEVICES_NONE: &str = r#"{"devices":[]}"#;
pub const SEARCH_YESTERDAY: &str = r#"{"tracks":{"href":"https://api.spotify.com/v1/search","items":[{"uri":"spotify:track:yesterday","name":"Yesterday","artists":[{"name":"The Beatles"}]}],"total":1}}"#;
pub const SEARCH_EMPTY: &str = r#"{"tracks":{"href":"https://api.spotify.com/v1/search","items":[],"total":0}}"#;
pub const TOKEN_REFRESHED: &str = r#"{"access_token":"refreshed-access","token_type":"Bearer","expires_in":3600,"scope":"user-read-playback-state user-modify-playback-state"}"#;
pub const TOKEN_EXCHANGED: &str = r#"{"access_token":"new-access","token_type":"Bearer","expires_in":3600,"refresh_token":"new-refresh","scope":"user-read-playback-state"}"#;

/// Canned answers of the fake Spotify.
#[derive(Debug, Clone)]
pub struct FakeReplies {
    pub token_status: u16,
    pub token_body: String,
    pub devices_status: u16,
    pub devices_body: String,
    pub search_status: u16,
    pub search_body: String,
    pub play_status: u16,
}

impl Default for FakeReplies {
    fn default() -> Self {
        Self {
            token_status: 200,
            token_body: TOKEN_REFRESHED.to_string(),
            devices_status: 200,
            devices_body: DEVICES_ONE.to_string(),
            search_status: 200,
            search_body: SEARCH_YESTERDAY.to_string(),
            play_status: 204,
        }
    }
}

/// Accounts service and Web API stand-in that records every request as a
/// short `kind:detail` line.
#[derive(Clone)]
pub struct FakeSpotify {
    pub calls: Arc<Mutex<Vec<String>>>,
    replies: Arc<FakeReplies>,
}

impl FakeSpotify {
    pub fn new(replies: FakeReplies) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            replies: Arc::new(replies),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    /// Serves the fake on an ephemeral port and returns its base URL.
    pub async fn spawn(&self) -> String {
        let app = Router::new()
            .route("/api/token", post(token))
            .route("/v1/me/player/devices", get(devices))
            .route("/v1/search", get(search))
            .route("/v1/me/player/play", put(play))
            .with_state(self.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}", addr)
    }
}

fn status(code: u16) -> StatusCode {
    StatusCode::from_u16(code).unwrap()
}

fn bearer(headers: &HeaderMap) -> String {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .unwrap_or("-")
        .to_string()
}

async fn token(
    State(fake): State<FakeSpotify>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> (StatusCode, String) {
    let basic = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("Basic "));
    let grant = form.get("grant_type").cloned().unwrap_or_default();
    let detail = match grant.as_str() {
        "refresh_token" => form.get("refresh_token").cloned().unwrap_or_default(),
        _ => form.get("code").cloned().unwrap_or_default(),
    };
    fake.record(format!("token:{}:{}:basic={}", grant, detail, basic));

    (status(fake.replies.token_status), fake.replies.token_body.clone())
}

async fn devices(State(fake): State<FakeSpotify>, headers: HeaderMap) -> (StatusCode, String) {
    fake.record(format!("devices:{}", bearer(&headers)));
    (
        status(fake.replies.devices_status),
        fake.replies.devices_body.clone(),
    )
}

async fn search(
    State(fake): State<FakeSpotify>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, String) {
    fake.record(format!(
        "search:{}:{}",
        bearer(&headers),
        params.get("q").cloned().unwrap_or_default()
    ));
    (
        status(fake.replies.search_status),
        fake.replies.search_body.clone(),
    )
}

async fn play(
    State(fake): State<FakeSpotify>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> StatusCode {
    fake.record(format!(
        "play:{}:{}:{}",
        bearer(&headers),
        params.get("device_id").cloned().unwrap_or_default(),
        body["uris"][0].as_str().unwrap_or_default()
    ));
    status(fake.replies.play_status)
}

pub fn settings(base_url: &str) -> SpotifySettings {
    SpotifySettings {
        client_id: Some("client-id".to_string()),
        client_secret: Some("client-secret".to_string()),
        redirect_uri: Some("http://127.0.0.1:8000/callback".to_string()),
        scope: DEFAULT_SCOPE.to_string(),
        auth_url: "https://accounts.spotify.com/authorize".to_string(),
        token_url: format!("{}/api/token", base_url),
        api_url: format!("{}/v1", base_url),
    }
}

pub fn credential(access: &str, expires_in_secs: i64) -> Credential {
    Credential {
        access_token: access.to_string(),
        refresh_token: "refresh-token".to_string(),
        expires_at: Utc::now() + Duration::seconds(expires_in_secs),
        scope: BTreeSet::from(["user-modify-playback-state".to_string()]),
    }
}

pub fn fresh_credential() -> Credential {
    credential("access-token", 3600)
}

pub fn expired_credential() -> Credential {
    credential("stale-token", -3600)
}

pub fn token_manager(base_url: &str, store: Arc<dyn CredentialStore>) -> TokenManager {
    TokenManager::new(SpotifyOAuth::new(settings(base_url)), store)
}

pub fn playback(base_url: &str, store: Arc<dyn CredentialStore>) -> PlaybackManager {
    PlaybackManager::new(
        SpotifyClient::new(format!("{}/v1", base_url)),
        token_manager(base_url, store),
    )
}

pub fn app_state(
    base_url: &str,
    store: Arc<dyn CredentialStore>,
    recognizer: Arc<StubRecognizer>,
) -> AppState {
    AppState::new(playback(base_url, store), Transcriber::new(recognizer))
}

#[derive(Debug, Clone)]
pub enum StubReply {
    Text(String),
    Unintelligible,
    Unreachable,
}

/// Recognizer that answers with a fixed reply and counts its calls.
pub struct StubRecognizer {
    reply: StubReply,
    calls: AtomicUsize,
}

impl StubRecognizer {
    pub fn new(reply: StubReply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn saying(text: &str) -> Arc<Self> {
        Self::new(StubReply::Text(text.to_string()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechRecognizer for StubRecognizer {
    async fn recognize(&self, _clip: &AudioClip) -> Result<String, RecognitionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            StubReply::Text(text) => Ok(text.clone()),
            StubReply::Unintelligible => Err(RecognitionError::UnknownValue),
            StubReply::Unreachable => Err(RecognitionError::Request("connection refused".to_string())),
        }
    }
}

pub fn build_wav(sample_rate: u32, samples: &[i16]) -> Vec<u8> {
    let num_samples = samples.len() as u32;
    let byte_rate = sample_rate * 2;
    let data_size = num_samples * 2;
    let file_size = 36 + data_size;

    let mut wav = Vec::with_capacity(44 + data_size as usize);
    wav.extend_from_slice(b"RIFF");
    wav.extend_from_slice(&file_size.to_le_bytes());
    wav.extend_from_slice(b"WAVE");
    wav.extend_from_slice(b"fmt ");
    wav.extend_from_slice(&16u32.to_le_bytes());
    wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
    wav.extend_from_slice(&1u16.to_le_bytes()); // mono
    wav.extend_from_slice(&sample_rate.to_le_bytes());
    wav.extend_from_slice(&byte_rate.to_le_bytes());
    wav.extend_from_slice(&2u16.to_le_bytes()); // block align
    wav.extend_from_slice(&16u16.to_le_bytes()); // bits per sample
    wav.extend_from_slice(b"data");
    wav.extend_from_slice(&data_size.to_le_bytes());
    for &s in samples {
        wav.extend_from_slice(&s.to_le_bytes());
    }
    wav
}

/// Half a second of silence followed by half a second of a loud square wave.
pub fn speech_wav() -> Vec<u8> {
    let mut samples = vec![0i16; 8_000];
    samples.extend((0..8_000).map(|i| if (i / 20) % 2 == 0 { 8_000 } else { -8_000 }));
    build_wav(16_000, &samples)
}

pub fn silent_wav() -> Vec<u8> {
    build_wav(16_000, &vec![0i16; 16_000])
}

pub const BOUNDARY: &str = "voxplay-test-boundary";

pub fn multipart_body(field: &str, file_name: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: audio/wav\r\n\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}
