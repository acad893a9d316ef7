pub mod pcm;
pub mod pool;

pub use pool::{OpusCodecPool, OpusFrameDecoder, OpusFrameEncoder};

use crate::{
    audio::constants::{OPUS_MONO_CHANNEL_COUNT, OPUS_STEREO_CHANNEL_COUNT},
    common::errors::VoiceResult,
};

/// Channel layout of an outbound PCM frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelLayout {
    Mono,
    Stereo,
}

impl ChannelLayout {
    /// Maps a raw channel count, accepting only 1 and 2.
    pub fn from_count(channels: usize) -> Option<Self> {
        match channels {
            OPUS_MONO_CHANNEL_COUNT => Some(Self::Mono),
            OPUS_STEREO_CHANNEL_COUNT => Some(Self::Stereo),
            _ => None,
        }
    }

    pub fn count(self) -> usize {
        match self {
            Self::Mono => OPUS_MONO_CHANNEL_COUNT,
            Self::Stereo => OPUS_STEREO_CHANNEL_COUNT,
        }
    }
}

/// PCM → compressed frame. One call must be in flight per encoder at a time,
/// which `&mut self` enforces.
pub trait FrameEncoder {
    /// `false` once codec initialization has failed; stays `false`.
    fn is_available(&self) -> bool;

    /// Encodes exactly one interleaved frame.
    fn encode(&mut self, layout: ChannelLayout, pcm: &[i16]) -> VoiceResult<Vec<u8>>;
}

/// Compressed frame → interleaved PCM.
pub trait FrameDecoder {
    fn is_available(&self) -> bool;

    /// Decodes one frame with the stereo decoder. The channel count of the
    /// sender is not known at this layer, so the output is always
    /// interleaved stereo.
    fn decode(&mut self, frame: &[u8]) -> VoiceResult<Vec<i16>>;
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::common::errors::VoiceError;

    /// Lossless stand-in for Opus: the "compressed" frame is the PCM itself
    /// as little-endian bytes. Counts every primitive invocation.
    #[derive(Default)]
    pub struct PassthroughCodec {
        pub unavailable: bool,
        pub encode_calls: usize,
        pub decode_calls: usize,
        pub last_layout: Option<ChannelLayout>,
    }

    impl PassthroughCodec {
        pub fn unavailable() -> Self {
            Self {
                unavailable: true,
                ..Self::default()
            }
        }
    }

    impl FrameEncoder for PassthroughCodec {
        fn is_available(&self) -> bool {
            !self.unavailable
        }

        fn encode(&mut self, layout: ChannelLayout, pcm: &[i16]) -> VoiceResult<Vec<u8>> {
            self.encode_calls += 1;
            self.last_layout = Some(layout);
            Ok(pcm.iter().flat_map(|s| s.to_le_bytes()).collect())
        }
    }

    impl FrameDecoder for PassthroughCodec {
        fn is_available(&self) -> bool {
            !self.unavailable
        }

        fn decode(&mut self, frame: &[u8]) -> VoiceResult<Vec<i16>> {
            self.decode_calls += 1;
            if frame.len() % 2 != 0 {
                return Err(VoiceError::CodecDecode("odd frame length".into()));
            }
            Ok(frame
                .chunks_exact(2)
                .map(|c| i16::from_le_bytes([c[0], c[1]]))
                .collect())
        }
    }
}
