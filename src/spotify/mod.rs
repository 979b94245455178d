//! # Spotify Integration Module
//!
//! Thin clients for the two Spotify services voxplay talks to:
//!
//! - [`auth`] - the accounts service: authorization URL, code exchange and
//!   token refresh (authorization code grant with client secret)
//! - [`player`] - Web API device listing and playback start
//! - [`search`] - Web API catalog search
//!
//! Every Web API call takes the bearer token explicitly. Callers are expected
//! to obtain it through [`crate::management::TokenManager`], which is the only
//! place that checks expiry.
//!
//! Non-success responses are returned as [`SpotifyError::Upstream`] carrying
//! the remote status and body. Nothing in this module retries.

use reqwest::{Client, Response};
use serde_json::Value;

use crate::error::SpotifyError;

pub mod auth;
pub mod player;
pub mod search;

pub use auth::SpotifyOAuth;

/// Client for the Spotify Web API.
#[derive(Clone)]
pub struct SpotifyClient {
    client: Client,
    api_url: String,
}

impl SpotifyClient {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), api_url)
    }

    pub fn with_client(client: Client, api_url: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{uri}{path}", uri = self.api_url, path = path)
    }
}

/// Reads the body of a response and decodes it as `T`.
///
/// A non-success status, or a body that is not the expected shape, becomes
/// an upstream error with the status and the raw body.
async fn decode<T: serde::de::DeserializeOwned>(res: Response) -> Result<T, SpotifyError> {
    let status = res.status();
    let body = res.text().await?;

    if !status.is_success() {
        return Err(SpotifyError::Upstream { status, body });
    }

    serde_json::from_str::<T>(&body).map_err(|_| SpotifyError::Upstream { status, body })
}

/// Like [`decode`], but hands back the untouched JSON once it is known to
/// have the shape of `T`. Fields `T` does not model are kept.
async fn decode_value<T: serde::de::DeserializeOwned>(res: Response) -> Result<Value, SpotifyError> {
    let status = res.status();
    let body = res.text().await?;

    if !status.is_success() {
        return Err(SpotifyError::Upstream { status, body });
    }

    let value = match serde_json::from_str::<Value>(&body) {
        Ok(value) => value,
        Err(_) => return Err(SpotifyError::Upstream { status, body }),
    };
    if serde_json::from_value::<T>(value.clone()).is_err() {
        return Err(SpotifyError::Upstream { status, body });
    }

    Ok(value)
}
