//! # API Module
//!
//! HTTP endpoints of the voxplay server. Handlers translate component errors
//! into responses through [`ApiError`]; nothing that goes wrong inside a
//! request takes the process down.
//!
//! ## Endpoints
//!
//! - `GET /` and `GET /health` - liveness ([`root`], [`health`])
//! - `GET /success-page` - post-login message ([`success_page`]); also
//!   served under the historical `/sucess-page` spelling
//! - `GET /login` - redirect to Spotify's consent page ([`login`])
//! - `GET /callback` - authorization code exchange ([`callback`])
//! - `POST /voice-command` - multipart audio in, command result out ([`voice_command`])
//! - `GET /spotify/devices` - device list passthrough ([`devices`])
//! - `GET /spotify-search` - top track for a free-text query ([`search`])
//! - `POST /play_song` - play a track URI on the first device ([`play_song`])
//!
//! Resource endpoints answer a missing track or device with `404`. The voice
//! command endpoint is conversational and reports such outcomes in its
//! `response` field with `200`.

use axum::{
    http::{StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};

mod callback;
mod error;
mod health;
mod spotify;
mod voice;

pub use callback::{callback, login};
pub use error::{ApiError, ErrorResponse};
pub use health::{health, root, success_page};
pub use spotify::{devices, play_song, search};
pub use voice::{CommandReply, VoiceCommandResponse, voice_command};

/// `302 Found` to `/login`, used whenever a request needs a credential and
/// none is stored.
pub fn login_redirect() -> Response {
    (StatusCode::FOUND, [(LOCATION, "/login")]).into_response()
}
