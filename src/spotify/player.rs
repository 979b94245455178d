use reqwest::StatusCode;
use serde_json::Value;

use crate::{
    error::SpotifyError,
    types::{Device, DevicesResponse, StartPlaybackRequest},
};

use super::{SpotifyClient, decode, decode_value};

impl SpotifyClient {
    /// Lists the user's playback devices in the order Spotify reports them.
    pub async fn list_devices(&self, token: &str) -> Result<Vec<Device>, SpotifyError> {
        let res = self
            .client
            .get(self.endpoint("/me/player/devices"))
            .bearer_auth(token)
            .send()
            .await?;

        let json: DevicesResponse = decode(res).await?;
        Ok(json.devices)
    }

    /// The device list exactly as Spotify sent it, after checking that it
    /// really is one.
    pub async fn list_devices_raw(&self, token: &str) -> Result<Value, SpotifyError> {
        let res = self
            .client
            .get(self.endpoint("/me/player/devices"))
            .bearer_auth(token)
            .send()
            .await?;

        decode_value::<DevicesResponse>(res).await
    }

    /// Starts playback of `track_uri` on `device_id`.
    ///
    /// Only `204 No Content` counts as success. A `403` is how Spotify turns
    /// away accounts without Premium.
    pub async fn play(
        &self,
        token: &str,
        device_id: &str,
        track_uri: &str,
    ) -> Result<(), SpotifyError> {
        let res = self
            .client
            .put(self.endpoint("/me/player/play"))
            .query(&[("device_id", device_id)])
            .bearer_auth(token)
            .json(&StartPlaybackRequest {
                uris: vec![track_uri.to_string()],
            })
            .send()
            .await?;

        match res.status() {
            StatusCode::NO_CONTENT => Ok(()),
            StatusCode::FORBIDDEN => Err(SpotifyError::PremiumRequired),
            status => {
                let body = res.text().await.unwrap_or_default();
                Err(SpotifyError::Upstream { status, body })
            }
        }
    }
}

/// The device playback goes to: always the first one listed.
pub fn first_device(devices: &[Device]) -> Option<&str> {
    devices.first().and_then(|d| d.id.as_deref())
}
