use axum::{
    Json,
    extract::{Multipart, State},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::{
    api::{ApiError, login_redirect},
    command,
    error::AuthError,
    info,
    management::PlaybackError,
    server::AppState,
    types::{Intent, PlaybackOutcome},
    warning,
};

const AUDIO_FIELD: &str = "audio";

#[derive(Debug, Serialize)]
pub struct VoiceCommandResponse {
    pub recognized_text: String,
    pub response: CommandReply,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CommandReply {
    Message(String),
    Intent(Intent),
}

/// Transcribes an uploaded clip, interprets it and, for play commands,
/// starts playback.
pub async fn voice_command(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let audio = read_audio(multipart).await?;

    let transcript = state.transcriber.transcribe(&audio).await;
    let recognized_text = transcript.text();
    info!("Recognized text: {}", recognized_text);

    if transcript.is_rejected() {
        warning!("Recognition error: {}", recognized_text);
        return Err(ApiError::BadRequest(recognized_text));
    }

    let intent = command::parse(&recognized_text);
    info!("Parsed command: {:?}", intent);

    if !matches!(intent, Intent::Play { .. }) {
        return Ok(Json(VoiceCommandResponse {
            recognized_text,
            response: CommandReply::Intent(intent),
        })
        .into_response());
    }

    let outcome = match state.playback.play_from_intent(&intent).await {
        Ok(outcome) => outcome,
        Err(PlaybackError::Auth(
            e @ (AuthError::Rejected { .. } | AuthError::NoToken | AuthError::Http(_)),
        )) => {
            warning!("Stored credential unusable, redirecting to login. Err: {}", e);
            return Ok(login_redirect());
        }
        Err(e) => return Err(e.into()),
    };

    if outcome == PlaybackOutcome::LoginRequired {
        warning!("No access token, redirecting to login.");
        return Ok(login_redirect());
    }

    Ok(Json(VoiceCommandResponse {
        recognized_text,
        response: CommandReply::Message(outcome.message()),
    })
    .into_response())
}

/// Pulls the `audio` part out of the upload; a lone unnamed file part is
/// accepted as well.
async fn read_audio(mut multipart: Multipart) -> Result<Vec<u8>, ApiError> {
    let mut fallback: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read multipart: {}", e)))?
    {
        let is_audio = field.name() == Some(AUDIO_FIELD);
        let is_file = field.file_name().is_some();
        if !is_audio && !is_file {
            continue;
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {}", e)))?;

        if is_audio {
            return Ok(data.to_vec());
        }
        fallback.get_or_insert_with(|| data.to_vec());
    }

    fallback.ok_or_else(|| ApiError::BadRequest("No audio uploaded".to_string()))
}
