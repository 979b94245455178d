use crate::{
    error::{AuthError, SpotifyError},
    info,
    management::TokenManager,
    spotify::{SpotifyClient, player::first_device},
    types::{Intent, PlaybackOutcome},
    warning,
};

#[derive(Debug, thiserror::Error)]
pub enum PlaybackError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Spotify(#[from] SpotifyError),
}

/// Carries a parsed play command through to Spotify.
#[derive(Clone)]
pub struct PlaybackManager {
    spotify: SpotifyClient,
    tokens: TokenManager,
}

impl PlaybackManager {
    pub fn new(spotify: SpotifyClient, tokens: TokenManager) -> Self {
        Self { spotify, tokens }
    }

    pub fn spotify(&self) -> &SpotifyClient {
        &self.spotify
    }

    pub fn tokens(&self) -> &TokenManager {
        &self.tokens
    }

    /// Plays the song an intent names on the first listed device.
    ///
    /// Missing devices and unknown songs are outcomes, not errors; the
    /// caller reports them back to the speaker. Intents other than play
    /// should not reach this point and are answered with `SongNotFound`.
    pub async fn play_from_intent(&self, intent: &Intent) -> Result<PlaybackOutcome, PlaybackError> {
        let Intent::Play {
            song_name,
            artist_name,
        } = intent
        else {
            return Ok(PlaybackOutcome::SongNotFound);
        };

        let Some(credential) = self.tokens.current_token().await? else {
            return Ok(PlaybackOutcome::LoginRequired);
        };
        let token = credential.access_token.as_str();

        let devices = self.spotify.list_devices(token).await?;
        let Some(device_id) = first_device(&devices) else {
            warning!("No devices available for playback");
            return Ok(PlaybackOutcome::NoDevices);
        };

        info!(
            "Searching song: {}, artist: {}",
            song_name,
            artist_name.as_deref().unwrap_or("-")
        );
        let track = match self
            .spotify
            .resolve_track(token, song_name, artist_name.as_deref())
            .await
        {
            Ok(track) => track,
            Err(SpotifyError::NotFound(what)) => {
                warning!("Song not found: {}", what);
                return Ok(PlaybackOutcome::SongNotFound);
            }
            Err(e) => return Err(e.into()),
        };

        info!("Playing {} on device ID: {}", track.uri, device_id);
        self.spotify.play(token, device_id, &track.uri).await?;

        Ok(PlaybackOutcome::Playing {
            track,
            device_id: device_id.to_string(),
        })
    }

    /// Plays a known track URI on the first listed device.
    pub async fn play_uri(&self, token: &str, track_uri: &str) -> Result<String, SpotifyError> {
        let devices = self.spotify.list_devices(token).await?;
        let device_id = first_device(&devices)
            .ok_or_else(|| SpotifyError::NotFound("playback device".to_string()))?;

        self.spotify.play(token, device_id, track_uri).await?;
        Ok(device_id.to_string())
    }
}
