use audiopus::{
    Application, Channels, MutSignals, SampleRate,
    coder::{Decoder as OpusDecoder, Encoder as OpusEncoder},
    packet::Packet,
};
use tracing::{debug, warn};

use crate::{
    audio::{
        codec::{ChannelLayout, FrameDecoder, FrameEncoder},
        constants::{MAX_ENCODED_FRAME_BYTES, MAX_OPUS_FRAME_SIZE, OPUS_STEREO_CHANNEL_COUNT},
    },
    common::errors::{VoiceError, VoiceResult},
    configs::VoiceConfig,
};

fn opus_rate(sample_rate: u32) -> Option<SampleRate> {
    match sample_rate {
        8000 => Some(SampleRate::Hz8000),
        12000 => Some(SampleRate::Hz12000),
        16000 => Some(SampleRate::Hz16000),
        24000 => Some(SampleRate::Hz24000),
        48000 => Some(SampleRate::Hz48000),
        _ => None,
    }
}

fn opus_channels(layout: ChannelLayout) -> Channels {
    match layout {
        ChannelLayout::Mono => Channels::Mono,
        ChannelLayout::Stereo => Channels::Stereo,
    }
}

struct EncoderHandles {
    mono: OpusEncoder,
    stereo: OpusEncoder,
}

struct DecoderHandles {
    mono: OpusDecoder,
    stereo: OpusDecoder,
}

/// Mono and stereo Opus encoders for the send path.
pub struct OpusFrameEncoder {
    handles: Option<EncoderHandles>,
    frame_size: usize,
    out: Vec<u8>,
}

/// Mono and stereo Opus decoders for the receive path.
pub struct OpusFrameDecoder {
    handles: Option<DecoderHandles>,
    /// Reusable interleaved scratch buffer, sized for the largest Opus frame.
    pcm: Vec<i16>,
}

/// The four Opus handles of a voice session.
///
/// Built once per session against a fixed sample rate. If any handle fails
/// to initialize (e.g. libopus could not be loaded) the whole pool is
/// unavailable and every call returns [`VoiceError::CodecUnavailable`].
///
/// The encoder and decoder halves are public so the send and receive paths
/// can each own one:
///
/// ```ignore
/// let OpusCodecPool { encoder, decoder } = OpusCodecPool::new(&config.voice);
/// ```
pub struct OpusCodecPool {
    pub encoder: OpusFrameEncoder,
    pub decoder: OpusFrameDecoder,
}

impl OpusCodecPool {
    pub fn new(config: &VoiceConfig) -> Self {
        match Self::create_handles(config) {
            Ok((encoders, decoders)) => {
                debug!(
                    "Opus codec pool ready ({} Hz, {} samples/frame)",
                    config.sample_rate, config.frame_size
                );
                Self {
                    encoder: OpusFrameEncoder::with_handles(Some(encoders), config.frame_size),
                    decoder: OpusFrameDecoder::with_handles(Some(decoders)),
                }
            }
            Err(e) => {
                warn!("Opus codec unavailable, voice runs silence-only: {}", e);
                Self::unavailable(config)
            }
        }
    }

    /// A pool with no handles. Every encode and decode fails fast.
    pub fn unavailable(config: &VoiceConfig) -> Self {
        Self {
            encoder: OpusFrameEncoder::with_handles(None, config.frame_size),
            decoder: OpusFrameDecoder::with_handles(None),
        }
    }

    pub fn is_available(&self) -> bool {
        self.encoder.is_available() && self.decoder.is_available()
    }

    fn create_handles(config: &VoiceConfig) -> Result<(EncoderHandles, DecoderHandles), String> {
        let rate = opus_rate(config.sample_rate)
            .ok_or_else(|| format!("unsupported sample rate {}", config.sample_rate))?;

        let encoder = |channels| {
            OpusEncoder::new(rate, channels, Application::Audio).map_err(|e| e.to_string())
        };
        let decoder = |channels| OpusDecoder::new(rate, channels).map_err(|e| e.to_string());

        let encoders = EncoderHandles {
            mono: encoder(Channels::Mono)?,
            stereo: encoder(Channels::Stereo)?,
        };
        let decoders = DecoderHandles {
            mono: decoder(Channels::Mono)?,
            stereo: decoder(Channels::Stereo)?,
        };
        Ok((encoders, decoders))
    }
}

impl OpusFrameEncoder {
    fn with_handles(handles: Option<EncoderHandles>, frame_size: usize) -> Self {
        Self {
            handles,
            frame_size,
            out: vec![0u8; MAX_ENCODED_FRAME_BYTES],
        }
    }

    pub fn frame_size(&self) -> usize {
        self.frame_size
    }
}

impl FrameEncoder for OpusFrameEncoder {
    fn is_available(&self) -> bool {
        self.handles.is_some()
    }

    fn encode(&mut self, layout: ChannelLayout, pcm: &[i16]) -> VoiceResult<Vec<u8>> {
        let handles = self.handles.as_mut().ok_or(VoiceError::CodecUnavailable)?;

        let expected = self.frame_size * layout.count();
        if pcm.len() != expected {
            return Err(VoiceError::CodecEncode(format!(
                "expected {} interleaved samples, got {}",
                expected,
                pcm.len()
            )));
        }

        let encoder = match layout {
            ChannelLayout::Mono => &mut handles.mono,
            ChannelLayout::Stereo => &mut handles.stereo,
        };
        let written = encoder
            .encode(pcm, &mut self.out)
            .map_err(|e| VoiceError::CodecEncode(e.to_string()))?;

        Ok(self.out[..written].to_vec())
    }
}

impl OpusFrameDecoder {
    fn with_handles(handles: Option<DecoderHandles>) -> Self {
        Self {
            handles,
            pcm: vec![0i16; MAX_OPUS_FRAME_SIZE * OPUS_STEREO_CHANNEL_COUNT],
        }
    }

    /// Decodes with an explicit handle. [`FrameDecoder::decode`] always picks
    /// the stereo one.
    pub fn decode_as(&mut self, layout: ChannelLayout, frame: &[u8]) -> VoiceResult<Vec<i16>> {
        let handles = self.handles.as_mut().ok_or(VoiceError::CodecUnavailable)?;

        let packet = Packet::try_from(frame).map_err(|e| VoiceError::CodecDecode(e.to_string()))?;
        let channels = layout.count();
        let scratch = &mut self.pcm[..MAX_OPUS_FRAME_SIZE * channels];
        let signals =
            MutSignals::try_from(scratch).map_err(|e| VoiceError::CodecDecode(e.to_string()))?;

        let decoder = match layout {
            ChannelLayout::Mono => &mut handles.mono,
            ChannelLayout::Stereo => &mut handles.stereo,
        };
        let per_channel = decoder
            .decode(Some(packet), signals, false)
            .map_err(|e| VoiceError::CodecDecode(e.to_string()))?;

        Ok(self.pcm[..per_channel * channels].to_vec())
    }
}

impl FrameDecoder for OpusFrameDecoder {
    fn is_available(&self) -> bool {
        self.handles.is_some()
    }

    fn decode(&mut self, frame: &[u8]) -> VoiceResult<Vec<i16>> {
        self.decode_as(ChannelLayout::Stereo, frame)
    }
}

impl FrameEncoder for OpusCodecPool {
    fn is_available(&self) -> bool {
        self.encoder.is_available()
    }

    fn encode(&mut self, layout: ChannelLayout, pcm: &[i16]) -> VoiceResult<Vec<u8>> {
        self.encoder.encode(layout, pcm)
    }
}

impl FrameDecoder for OpusCodecPool {
    fn is_available(&self) -> bool {
        self.decoder.is_available()
    }

    fn decode(&mut self, frame: &[u8]) -> VoiceResult<Vec<i16>> {
        self.decoder.decode(frame)
    }
}
