use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::{
    Res, api,
    config::{self, SpeechSettings, SpotifySettings},
    info,
    management::{FileCredentialStore, PlaybackManager, TokenManager},
    spotify::{SpotifyClient, SpotifyOAuth},
    voice::{GoogleSpeechRecognizer, Transcriber},
};

/// Largest audio upload accepted by `/voice-command`.
pub const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub playback: PlaybackManager,
    pub transcriber: Transcriber,
}

impl AppState {
    pub fn new(playback: PlaybackManager, transcriber: Transcriber) -> Self {
        Self {
            playback,
            transcriber,
        }
    }

    /// Wires the production components from environment configuration.
    pub fn from_env() -> Self {
        let settings = SpotifySettings::from_env();
        let http = reqwest::Client::new();

        let store = Arc::new(FileCredentialStore::new(config::token_path()));
        let tokens = TokenManager::new(
            SpotifyOAuth::with_client(http.clone(), settings.clone()),
            store,
        );
        let spotify = SpotifyClient::with_client(http.clone(), settings.api_url);
        let recognizer = GoogleSpeechRecognizer::with_client(http, SpeechSettings::from_env());

        Self::new(
            PlaybackManager::new(spotify, tokens),
            Transcriber::new(Arc::new(recognizer)),
        )
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::root))
        .route("/health", get(api::health))
        .route("/success-page", get(api::success_page))
        .route("/sucess-page", get(api::success_page))
        .route("/login", get(api::login))
        .route("/callback", get(api::callback))
        .route(
            "/voice-command",
            post(api::voice_command).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/spotify/devices", get(api::devices))
        .route("/spotify-search", get(api::search))
        .route("/play_song", post(api::play_song))
        .with_state(state)
}

pub async fn start_api_server(state: AppState) -> Res<()> {
    let addr = SocketAddr::from_str(&config::server_addr())?;
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, router(state)).await?;
    Ok(())
}
