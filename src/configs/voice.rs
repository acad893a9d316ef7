use serde::{Deserialize, Serialize};

use crate::audio::constants::{OPUS_FRAME_SIZE, OPUS_SAMPLE_RATE};

/// Codec parameters shared by every handle in a pool.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct VoiceConfig {
    /// Opus sample rate in Hz. Must be 8000, 12000, 16000, 24000 or 48000.
    pub sample_rate: u32,
    /// Samples per channel in one frame.
    pub frame_size: usize,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            sample_rate: OPUS_SAMPLE_RATE,
            frame_size: OPUS_FRAME_SIZE,
        }
    }
}
