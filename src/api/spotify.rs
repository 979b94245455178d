use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    api::{ApiError, login_redirect},
    server::AppState,
    success,
};

#[derive(Debug, Deserialize)]
pub struct DevicesParams {
    pub access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct PlaySongParams {
    pub access_token: String,
    pub song_uri: String,
}

/// Lists devices for the given access token, or for the stored credential
/// when none is passed.
pub async fn devices(
    State(state): State<AppState>,
    Query(params): Query<DevicesParams>,
) -> Result<Response, ApiError> {
    let token = match params.access_token.filter(|t| !t.is_empty()) {
        Some(token) => token,
        None => match state.playback.tokens().current_token().await? {
            Some(credential) => credential.access_token,
            None => return Ok(login_redirect()),
        },
    };

    let devices = state.playback.spotify().list_devices_raw(&token).await?;
    Ok(Json(devices).into_response())
}

pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Response, ApiError> {
    let Some(credential) = state.playback.tokens().current_token().await? else {
        return Ok(login_redirect());
    };

    let track = state
        .playback
        .spotify()
        .top_track(&credential.access_token, &params.query)
        .await?;
    Ok(Json(track).into_response())
}

pub async fn play_song(
    State(state): State<AppState>,
    Query(params): Query<PlaySongParams>,
) -> Result<Response, ApiError> {
    let device_id = state
        .playback
        .play_uri(&params.access_token, &params.song_uri)
        .await?;

    success!("Playing {} on {}", params.song_uri, device_id);
    Ok(Json(json!({ "message": "Song played successfully" })).into_response())
}
