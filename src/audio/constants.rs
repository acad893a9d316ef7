//! Central constants for the voice codec path.

// ── Sample / PCM ─────────────────────────────────────────────────────────────

/// Opus sample rate used by voice sessions (Hz).
pub const OPUS_SAMPLE_RATE: u32 = 48_000;

/// Samples per channel in one 20 ms frame at 48 kHz.
pub const OPUS_FRAME_SIZE: usize = 960;

pub const OPUS_MONO_CHANNEL_COUNT: usize = 1;

pub const OPUS_STEREO_CHANNEL_COUNT: usize = 2;

/// Bytes per PCM sample (signed 16-bit).
pub const PCM_SAMPLE_BYTES: usize = 2;

// ── Codec ─────────────────────────────────────────────────────────────────────

/// Output buffer for a single encoded Opus frame.
pub const MAX_ENCODED_FRAME_BYTES: usize = 4_096;

/// Maximum decoded Opus frame size at 48 kHz: 120 ms → 5 760 samples/channel.
pub const MAX_OPUS_FRAME_SIZE: usize = 5_760;
