use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::{
    error::{AuthError, SpotifyError},
    management::PlaybackError,
    warning,
};

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Every failure a handler can answer with.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{body}")]
    Upstream { status: StatusCode, body: String },
    #[error("Premium required")]
    PremiumRequired,
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadGateway(String),
    #[error("Internal Server Error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Upstream { status, .. } => *status,
            ApiError::PremiumRequired => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            warning!("{}", self);
        }

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingConfig(_) | AuthError::InvalidConfig(_) | AuthError::Store(_) => {
                ApiError::Internal(err.to_string())
            }
            AuthError::Rejected { .. } | AuthError::NoToken => ApiError::BadRequest(err.to_string()),
            AuthError::Http(_) => ApiError::Unauthorized(err.to_string()),
        }
    }
}

impl From<SpotifyError> for ApiError {
    fn from(err: SpotifyError) -> Self {
        match err {
            // A success status with a body of the wrong shape is Spotify's
            // fault, not the client's.
            SpotifyError::Upstream { status, body } if status.is_success() => {
                warning!("Unexpected response body from Spotify: {}", body);
                ApiError::BadGateway("Invalid response from Spotify API".to_string())
            }
            SpotifyError::Upstream { status, body } => ApiError::Upstream { status, body },
            SpotifyError::PremiumRequired => ApiError::PremiumRequired,
            SpotifyError::NotFound(_) => ApiError::NotFound(err.to_string()),
            SpotifyError::Http(_) => ApiError::BadGateway(err.to_string()),
        }
    }
}

impl From<PlaybackError> for ApiError {
    fn from(err: PlaybackError) -> Self {
        match err {
            PlaybackError::Auth(e) => e.into(),
            PlaybackError::Spotify(e) => e.into(),
        }
    }
}
