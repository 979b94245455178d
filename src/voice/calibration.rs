//! Ambient noise calibration.
//!
//! The energy threshold is derived from the very clip that is about to be
//! transcribed, using the dynamic-energy rule: every buffer pulls the
//! threshold towards `energy * ENERGY_RATIO`, damped per second of audio.
//! There is no separate calibration recording, so a clip that is loud
//! throughout raises its own threshold.

use crate::{utils, voice::AudioClip};

pub const CHUNK_SIZE: usize = 1024;
pub const INITIAL_ENERGY_THRESHOLD: f64 = 300.0;
pub const DAMPING: f64 = 0.15;
pub const ENERGY_RATIO: f64 = 1.5;

#[derive(Debug, Clone, PartialEq)]
pub struct NoiseProfile {
    /// Threshold after the whole clip has been seen.
    pub energy_threshold: f64,
    /// Buffers whose energy was above the threshold in force when they arrived.
    pub voiced_chunks: usize,
    pub total_chunks: usize,
}

impl NoiseProfile {
    pub fn has_speech(&self) -> bool {
        self.voiced_chunks > 0
    }
}

pub fn calibrate(clip: &AudioClip) -> NoiseProfile {
    let mut threshold = INITIAL_ENERGY_THRESHOLD;
    let mut voiced_chunks = 0;
    let mut total_chunks = 0;

    if clip.sample_rate == 0 {
        return NoiseProfile {
            energy_threshold: threshold,
            voiced_chunks,
            total_chunks,
        };
    }

    for chunk in clip.samples.chunks(CHUNK_SIZE) {
        let seconds = chunk.len() as f64 / clip.sample_rate as f64;
        let energy = utils::rms(chunk);
        if energy > threshold {
            voiced_chunks += 1;
        }

        let damping = DAMPING.powf(seconds);
        let target = energy * ENERGY_RATIO;
        threshold = threshold * damping + target * (1.0 - damping);
        total_chunks += 1;
    }

    NoiseProfile {
        energy_threshold: threshold,
        voiced_chunks,
        total_chunks,
    }
}
