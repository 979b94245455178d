//! # Voice Module
//!
//! Turns an uploaded audio clip into text:
//!
//! ```text
//! bytes -> decoder (symphonia) -> calibration -> SpeechRecognizer -> Transcript
//! ```
//!
//! Failures never escape as errors. They come back as [`Transcript`]
//! variants, each of which still has the legacy sentinel text that clients
//! of the HTTP API see in `recognized_text`.

use std::sync::Arc;

use crate::{info, warning};

pub mod calibration;
pub mod decoder;
pub mod recognizer;

pub use decoder::AudioClip;
pub use recognizer::{GoogleSpeechRecognizer, RecognitionError, SpeechRecognizer};

pub const UNKNOWN_AUDIO_SENTINEL: &str = "Speech recognition could not understand the audio";
pub const SERVICE_ERROR_PREFIX: &str = "Could not request results from speech recognition service";
pub const OTHER_ERROR_PREFIX: &str = "Error processing the audio: ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transcript {
    Text(String),
    UnknownAudio,
    ServiceError(String),
    OtherError(String),
}

impl Transcript {
    /// The recognized text, or the sentinel string standing in for a failure.
    pub fn text(&self) -> String {
        match self {
            Transcript::Text(text) => text.clone(),
            Transcript::UnknownAudio => UNKNOWN_AUDIO_SENTINEL.to_string(),
            Transcript::ServiceError(e) => format!("{}; {}", SERVICE_ERROR_PREFIX, e),
            Transcript::OtherError(e) => format!("{}{}", OTHER_ERROR_PREFIX, e),
        }
    }

    /// Whether the voice command endpoint rejects this transcript.
    ///
    /// Mirrors the long-standing check for an `"Error"` prefix: only
    /// [`Transcript::OtherError`] qualifies. Unintelligible audio and
    /// backend outages flow on as text and fail to parse as a command.
    pub fn is_rejected(&self) -> bool {
        matches!(self, Transcript::OtherError(_))
    }
}

impl From<RecognitionError> for Transcript {
    fn from(err: RecognitionError) -> Self {
        match err {
            RecognitionError::UnknownValue => Transcript::UnknownAudio,
            RecognitionError::Request(e) => Transcript::ServiceError(e),
            RecognitionError::Other(e) => Transcript::OtherError(e),
        }
    }
}

/// Decodes, calibrates and recognizes uploaded audio.
#[derive(Clone)]
pub struct Transcriber {
    recognizer: Arc<dyn SpeechRecognizer>,
}

impl Transcriber {
    pub fn new(recognizer: Arc<dyn SpeechRecognizer>) -> Self {
        Self { recognizer }
    }

    pub async fn transcribe(&self, audio: &[u8]) -> Transcript {
        let data = audio.to_vec();
        let clip = match tokio::task::spawn_blocking(move || decoder::decode(&data)).await {
            Ok(Ok(clip)) => clip,
            Ok(Err(e)) => {
                warning!("An unexpected error occurred: {}", e);
                return Transcript::OtherError(e.to_string());
            }
            Err(e) => return Transcript::OtherError(e.to_string()),
        };

        let profile = calibration::calibrate(&clip);
        info!(
            "Calibrated energy threshold {:.1} over {:.2}s ({} of {} buffers voiced)",
            profile.energy_threshold,
            clip.duration_secs(),
            profile.voiced_chunks,
            profile.total_chunks
        );
        if !profile.has_speech() {
            warning!("{}", UNKNOWN_AUDIO_SENTINEL);
            return Transcript::UnknownAudio;
        }

        match self.recognizer.recognize(&clip).await {
            Ok(text) => Transcript::Text(text),
            Err(e) => {
                warning!("Recognition failed: {}", e);
                e.into()
            }
        }
    }
}
