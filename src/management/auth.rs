use std::sync::Arc;

use crate::{
    error::AuthError, info, management::CredentialStore, spotify::SpotifyOAuth, success,
    types::Credential, warning,
};

/// Owns the credential lifecycle: authorize, persist, check expiry, refresh.
///
/// An access token leaves this type only after passing [`Self::ensure_valid`];
/// Spotify silently rejects stale tokens, so nothing else hands them out.
///
/// Refresh-and-persist is not atomic. Two requests racing on the same
/// expired credential may both refresh; the last save wins.
#[derive(Clone)]
pub struct TokenManager {
    oauth: SpotifyOAuth,
    store: Arc<dyn CredentialStore>,
}

impl TokenManager {
    pub fn new(oauth: SpotifyOAuth, store: Arc<dyn CredentialStore>) -> Self {
        TokenManager { oauth, store }
    }

    pub fn authorize_url(&self) -> Result<String, AuthError> {
        self.oauth.build_authorize_url()
    }

    /// Exchanges the callback's authorization code and persists the result.
    pub async fn authorize(&self, code: &str) -> Result<Credential, AuthError> {
        let credential = self.oauth.exchange_code(code).await?;
        self.store.save(&credential).await?;
        success!("Authorization code exchanged, credential saved");
        Ok(credential)
    }

    /// Returns `credential` untouched while it is fresh; otherwise refreshes
    /// it, persists the replacement and returns that.
    pub async fn ensure_valid(&self, credential: Credential) -> Result<Credential, AuthError> {
        if !credential.is_expired() {
            return Ok(credential);
        }

        info!("Token expired, attempting to refresh");
        let refreshed = match self.oauth.refresh(&credential.refresh_token).await {
            Ok(c) => c,
            Err(e) => {
                warning!("Error refreshing token: {}", e);
                return Err(e);
            }
        };

        self.store.save(&refreshed).await?;
        success!("Token refreshed successfully");
        Ok(refreshed)
    }

    /// Loads the stored credential and makes sure it is usable.
    /// `Ok(None)` means the user has to log in first.
    pub async fn current_token(&self) -> Result<Option<Credential>, AuthError> {
        match self.store.load().await? {
            Some(credential) => self.ensure_valid(credential).await.map(Some),
            None => {
                warning!("No token found, login required");
                Ok(None)
            }
        }
    }
}
