use chrono::Utc;
use reqwest::{Client, Url};

use crate::{
    config::SpotifySettings,
    error::AuthError,
    types::{Credential, TokenResponse},
};

/// Client for Spotify's accounts service (authorization code grant).
#[derive(Clone)]
pub struct SpotifyOAuth {
    client: Client,
    settings: SpotifySettings,
}

impl SpotifyOAuth {
    pub fn new(settings: SpotifySettings) -> Self {
        Self::with_client(Client::new(), settings)
    }

    pub fn with_client(client: Client, settings: SpotifySettings) -> Self {
        Self { client, settings }
    }

    /// Builds the URL the user is sent to in order to grant access.
    ///
    /// Depends only on the configured client id, redirect URI and scope, so
    /// calling it twice yields the same URL. The client secret never appears
    /// in it.
    pub fn build_authorize_url(&self) -> Result<String, AuthError> {
        let client_id = self.client_id()?;
        let redirect_uri = self.redirect_uri()?;

        let url = Url::parse_with_params(
            &self.settings.auth_url,
            &[
                ("client_id", client_id),
                ("response_type", "code"),
                ("redirect_uri", redirect_uri),
                ("scope", self.settings.scope.as_str()),
            ],
        )
        .map_err(|e| AuthError::InvalidConfig(format!("authorize url: {}", e)))?;

        Ok(url.to_string())
    }

    /// Trades an authorization code from the callback for a credential.
    pub async fn exchange_code(&self, code: &str) -> Result<Credential, AuthError> {
        let redirect_uri = self.redirect_uri()?;
        self.request_token(
            &[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", redirect_uri),
            ],
            None,
        )
        .await
    }

    /// Obtains a fresh access token. The old refresh token is kept when the
    /// accounts service does not rotate it.
    pub async fn refresh(&self, refresh_token: &str) -> Result<Credential, AuthError> {
        self.request_token(
            &[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ],
            Some(refresh_token),
        )
        .await
    }

    async fn request_token(
        &self,
        form: &[(&str, &str)],
        previous_refresh: Option<&str>,
    ) -> Result<Credential, AuthError> {
        let client_id = self.client_id()?;
        let client_secret = self.client_secret()?;

        let res = self
            .client
            .post(&self.settings.token_url)
            .basic_auth(client_id, Some(client_secret))
            .form(form)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(AuthError::Rejected { status, body });
        }

        let json: TokenResponse = res.json().await?;
        Credential::from_response(json, previous_refresh, &self.settings.scope, Utc::now())
            .ok_or(AuthError::NoToken)
    }

    fn client_id(&self) -> Result<&str, AuthError> {
        self.settings
            .client_id
            .as_deref()
            .ok_or(AuthError::MissingConfig("SPOTIFY_API_AUTH_CLIENT_ID"))
    }

    fn client_secret(&self) -> Result<&str, AuthError> {
        self.settings
            .client_secret
            .as_deref()
            .ok_or(AuthError::MissingConfig("SPOTIFY_API_AUTH_CLIENT_SECRET"))
    }

    fn redirect_uri(&self) -> Result<&str, AuthError> {
        self.settings
            .redirect_uri
            .as_deref()
            .ok_or(AuthError::MissingConfig("SPOTIFY_API_REDIRECT_URI"))
    }
}
