use std::sync::Arc;

use crate::{
    config::{self, SpotifySettings},
    error,
    management::{FileCredentialStore, TokenManager},
    spotify::SpotifyOAuth,
    success, warning,
};

/// Token manager backed by the on-disk credential record.
pub fn token_manager() -> TokenManager {
    TokenManager::new(
        SpotifyOAuth::new(SpotifySettings::from_env()),
        Arc::new(FileCredentialStore::new(config::token_path())),
    )
}

/// Opens Spotify's consent page in the default browser.
///
/// The redirect lands on the `/callback` endpoint, so `voxplay serve` has to
/// be running for the login to complete.
pub async fn login() {
    let auth_url = match token_manager().authorize_url() {
        Ok(url) => url,
        Err(e) => error!("Cannot build authorization URL. Err: {}", e),
    };

    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        );
        return;
    }

    success!("Authorization page opened, finish the login in your browser.");
}
