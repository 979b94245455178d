use crate::{
    error::SpotifyError,
    types::{SearchResponse, Track},
    utils,
};

use super::{SpotifyClient, decode};

impl SpotifyClient {
    /// Runs a track search and returns at most `limit` hits, best match first.
    pub async fn search_tracks(
        &self,
        token: &str,
        query: &str,
        limit: u32,
    ) -> Result<Vec<Track>, SpotifyError> {
        let res = self
            .client
            .get(self.endpoint("/search"))
            .query(&[
                ("q", query),
                ("type", "track"),
                ("limit", &limit.to_string()),
            ])
            .bearer_auth(token)
            .send()
            .await?;

        let json: SearchResponse = decode(res).await?;
        Ok(json.tracks.items.into_iter().map(Track::from).collect())
    }

    /// Finds the track a play command refers to. Only the top hit is used.
    pub async fn resolve_track(
        &self,
        token: &str,
        song_name: &str,
        artist_name: Option<&str>,
    ) -> Result<Track, SpotifyError> {
        let query = utils::search_query(song_name, artist_name);
        self.top_track(token, &query).await
    }

    pub async fn top_track(&self, token: &str, query: &str) -> Result<Track, SpotifyError> {
        self.search_tracks(token, query, 1)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| SpotifyError::NotFound(format!("track for '{}'", query)))
    }
}
