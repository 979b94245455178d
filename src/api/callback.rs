use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::{api::ApiError, info, server::AppState, warning};

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub error: Option<String>,
}

/// Sends the browser to Spotify's consent page.
pub async fn login(State(state): State<AppState>) -> Result<Redirect, ApiError> {
    let url = state.playback.tokens().authorize_url()?;
    info!("Redirecting to Spotify authorization");
    Ok(Redirect::temporary(&url))
}

/// Receives the authorization code, stores the credential and moves on to
/// the device listing.
pub async fn callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> Result<Response, ApiError> {
    if let Some(error) = params.error {
        warning!("Authorization denied: {}", error);
        return Err(ApiError::BadRequest(format!("Authorization failed: {}", error)));
    }

    let Some(code) = params.code.filter(|c| !c.is_empty()) else {
        return Err(ApiError::BadRequest(
            "Authorization code not provided".to_string(),
        ));
    };

    state.playback.tokens().authorize(&code).await?;
    Ok(Redirect::temporary("/spotify/devices").into_response())
}
