use async_trait::async_trait;
use reqwest::{Client, header::CONTENT_TYPE};
use serde::Deserialize;

use crate::{config::SpeechSettings, info, voice::AudioClip};

#[derive(Debug, thiserror::Error)]
pub enum RecognitionError {
    #[error("speech was not intelligible")]
    UnknownValue,
    #[error("recognition request failed: {0}")]
    Request(String),
    #[error("{0}")]
    Other(String),
}

/// Speech-to-text backend. Bytes of decoded speech in, text out.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    async fn recognize(&self, clip: &AudioClip) -> Result<String, RecognitionError>;
}

/// Recognizer for the Google speech v2 web endpoint.
///
/// Audio goes up as `audio/l16`; the answer is one JSON object per line, the
/// first of which is usually an empty `{"result":[]}`.
pub struct GoogleSpeechRecognizer {
    client: Client,
    settings: SpeechSettings,
}

impl GoogleSpeechRecognizer {
    pub fn new(settings: SpeechSettings) -> Self {
        Self::with_client(Client::new(), settings)
    }

    pub fn with_client(client: Client, settings: SpeechSettings) -> Self {
        Self { client, settings }
    }
}

#[derive(Debug, Deserialize)]
struct RecognizeLine {
    #[serde(default)]
    result: Vec<RecognizeResult>,
}

#[derive(Debug, Deserialize)]
struct RecognizeResult {
    #[serde(default)]
    alternative: Vec<Alternative>,
}

#[derive(Debug, Deserialize)]
struct Alternative {
    transcript: String,
}

#[async_trait]
impl SpeechRecognizer for GoogleSpeechRecognizer {
    async fn recognize(&self, clip: &AudioClip) -> Result<String, RecognitionError> {
        let mut query = vec![
            ("client", "chromium".to_string()),
            ("lang", self.settings.language.clone()),
            ("pFilter", "0".to_string()),
        ];
        if let Some(key) = &self.settings.api_key {
            query.push(("key", key.clone()));
        }

        let res = self
            .client
            .post(&self.settings.api_url)
            .query(&query)
            .header(
                CONTENT_TYPE,
                format!("audio/l16; rate={}", clip.sample_rate),
            )
            .body(clip.to_l16_bytes())
            .send()
            .await
            .map_err(|e| RecognitionError::Request(e.to_string()))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| RecognitionError::Request(e.to_string()))?;
        if !status.is_success() {
            return Err(RecognitionError::Request(format!(
                "recognition connection failed: {}",
                status
            )));
        }

        let transcript = first_transcript(&body)?;
        info!("Recognized text: {}", transcript);
        Ok(transcript)
    }
}

fn first_transcript(body: &str) -> Result<String, RecognitionError> {
    for line in body.lines().filter(|l| !l.trim().is_empty()) {
        let parsed: RecognizeLine = serde_json::from_str(line)
            .map_err(|e| RecognitionError::Other(format!("invalid recognition response: {}", e)))?;

        let transcript = parsed
            .result
            .into_iter()
            .flat_map(|r| r.alternative)
            .map(|a| a.transcript)
            .find(|t| !t.trim().is_empty());

        if let Some(text) = transcript {
            return Ok(text);
        }
    }

    Err(RecognitionError::UnknownValue)
}
