//! Error types shared across the voxplay components.
//!
//! Each component owns one enum; the HTTP boundary in [`crate::api`] turns
//! them into responses so nothing below it needs to know about status codes
//! the client will see.

use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("credential record is corrupt: {0}")]
    CorruptState(#[from] serde_json::Error),
    #[error("credential store i/o failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("missing configuration value {0}")]
    MissingConfig(&'static str),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("authorization server rejected the request ({status}): {body}")]
    Rejected { status: StatusCode, body: String },
    #[error("authorization server returned no access token")]
    NoToken,
    #[error("authorization request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, thiserror::Error)]
pub enum SpotifyError {
    #[error("spotify responded with {status}: {body}")]
    Upstream { status: StatusCode, body: String },
    #[error("Premium required")]
    PremiumRequired,
    #[error("{0} not found")]
    NotFound(String),
    #[error("spotify request failed: {0}")]
    Http(#[from] reqwest::Error),
}
