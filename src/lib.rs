//! Voice transport for Discord-style voice connections: RTP framing,
//! secretbox encryption and Opus coding of voice packets, plus the
//! reconnect backoff policy of the control channel.

pub mod audio;
pub mod common;
pub mod configs;
pub mod gateway;

pub use audio::{ChannelLayout, FrameDecoder, FrameEncoder, OpusCodecPool};
pub use common::errors::{RetryError, VoiceError, VoiceResult};
pub use configs::Config;
pub use gateway::{
    BackoffDelay, Jitter, RetryContext, RetryOptions, RtpHeader, SecretKey, VoiceCipher,
    VoicePacket,
};
