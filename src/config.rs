//! Configuration management for the voxplay server.
//!
//! Values come from environment variables, optionally seeded from `.env`
//! files. The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. `.env` file in the working directory
//! 4. Application defaults (where applicable)
//!
//! Spotify client credentials are optional here: a server without
//! them still starts, and the authorization flow reports the missing value
//! when it is first needed.

use std::{env, path::PathBuf};

pub const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0:8000";
pub const DEFAULT_SCOPE: &str = "user-modify-playback-state user-read-playback-state user-read-currently-playing user-library-read";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SPEECH_API_URL: &str = "http://www.google.com/speech-api/v2/recognize";
pub const DEFAULT_SPEECH_LANGUAGE: &str = "en-US";

/// Everything needed to talk to Spotify's accounts service and Web API.
#[derive(Debug, Clone)]
pub struct SpotifySettings {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub redirect_uri: Option<String>,
    pub scope: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
}

impl SpotifySettings {
    /// Reads the Spotify settings from the environment, filling in defaults
    /// for the endpoints and the scope.
    pub fn from_env() -> Self {
        Self {
            client_id: spotify_client_id(),
            client_secret: spotify_client_secret(),
            redirect_uri: spotify_redirect_uri(),
            scope: spotify_scope(),
            auth_url: spotify_apiauth_url(),
            token_url: spotify_apitoken_url(),
            api_url: spotify_apiurl(),
        }
    }
}

/// Settings for the speech recognition backend.
#[derive(Debug, Clone)]
pub struct SpeechSettings {
    pub api_url: String,
    pub api_key: Option<String>,
    pub language: String,
}

impl SpeechSettings {
    pub fn from_env() -> Self {
        Self {
            api_url: var_or("SPEECH_API_URL", DEFAULT_SPEECH_API_URL),
            api_key: optional_var("SPEECH_API_KEY"),
            language: var_or("SPEECH_LANGUAGE", DEFAULT_SPEECH_LANGUAGE),
        }
    }
}

/// Loads environment variables from `.env` files.
///
/// Looks for `voxplay/.env` in the platform-specific local data directory
/// first and then for a `.env` in the working directory. Variables that are
/// already set in the process environment are never overridden, and a missing
/// file is not an error.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/voxplay/.env`
/// - macOS: `~/Library/Application Support/voxplay/.env`
/// - Windows: `%LOCALAPPDATA%/voxplay/.env`
///
/// # Errors
///
/// Returns an error string if the data directory cannot be created or if an
/// existing `.env` file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let mut path = data_dir();
    path.push(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }

    match dotenv::dotenv() {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e.to_string()),
    }
}

/// Returns the address the HTTP API binds to, e.g. `0.0.0.0:8000`.
pub fn server_addr() -> String {
    var_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

/// Returns the location of the single credential record.
///
/// `VOXPLAY_TOKEN_PATH` wins; otherwise the record lives under
/// `voxplay/cache/token_info.json` in the local data directory.
pub fn token_path() -> PathBuf {
    if let Some(path) = optional_var("VOXPLAY_TOKEN_PATH") {
        return PathBuf::from(path);
    }

    let mut path = data_dir();
    path.push("cache/token_info.json");
    path
}

pub fn spotify_client_id() -> Option<String> {
    optional_var("SPOTIFY_API_AUTH_CLIENT_ID")
}

/// The client secret is only ever sent to the token endpoint and must never
/// show up in logs.
pub fn spotify_client_secret() -> Option<String> {
    optional_var("SPOTIFY_API_AUTH_CLIENT_SECRET")
}

/// Must match the redirect URI registered for the application, e.g.
/// `http://127.0.0.1:8000/callback`.
pub fn spotify_redirect_uri() -> Option<String> {
    optional_var("SPOTIFY_API_REDIRECT_URI")
}

pub fn spotify_scope() -> String {
    var_or("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE)
}

pub fn spotify_apiauth_url() -> String {
    var_or("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL)
}

pub fn spotify_apitoken_url() -> String {
    var_or("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL)
}

pub fn spotify_apiurl() -> String {
    var_or("SPOTIFY_API_URL", DEFAULT_API_URL)
}

fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("voxplay");
    path
}

fn optional_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn var_or(key: &str, default: &str) -> String {
    optional_var(key).unwrap_or_else(|| default.to_string())
}
