//! # CLI Module
//!
//! Command implementations behind the `voxplay` binary:
//!
//! - [`serve`] - runs the HTTP API
//! - [`login`] - opens Spotify's consent page; the running server receives the callback
//! - [`devices`] - prints the user's playback devices as a table
//! - [`parse`] - shows how a sentence would be interpreted as a command
//!
//! ## Usage
//!
//! ```bash
//! voxplay serve                              # start the API on SERVER_ADDRESS
//! voxplay login                              # authorize with Spotify
//! voxplay devices                            # list devices
//! voxplay parse "play Yesterday by The Beatles"
//! ```
//!
//! Commands report through the logging macros and exit with status 1 on
//! unrecoverable errors.

mod auth;
mod devices;

pub use auth::login;
pub use auth::token_manager;
pub use devices::devices;

use crate::{command, error, server};

pub async fn serve() {
    let state = server::AppState::from_env();
    if let Err(e) = server::start_api_server(state).await {
        error!("Failed to start server: {}", e);
    }
}

pub fn parse(text: &str) {
    let intent = command::parse(text);
    match serde_json::to_string_pretty(&intent) {
        Ok(json) => println!("{}", json),
        Err(e) => error!("Cannot render intent. Err: {}", e),
    }
}
