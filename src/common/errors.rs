use thiserror::Error;

/// Per-packet failures of the voice codec path.
///
/// None of these are fatal to the process. `CodecUnavailable` is sticky for
/// the lifetime of the codec pool; every other variant is scoped to the single
/// packet that produced it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VoiceError {
    /// The Opus handles could not be created when the pool was built.
    #[error("opus codec is unavailable")]
    CodecUnavailable,

    /// Inbound datagram shorter than the RTP header.
    #[error("malformed voice packet: {len} bytes, need at least 12")]
    MalformedPacket { len: usize },

    /// Poly1305 tag did not verify for this packet.
    #[error("voice packet failed authentication")]
    AuthenticationFailed,

    #[error("opus encode failed: {0}")]
    CodecEncode(String),

    #[error("opus decode failed: {0}")]
    CodecDecode(String),

    #[error("voice packet encryption failed")]
    Encryption,

    /// Session secrets are always 32 bytes.
    #[error("invalid secret key length {0}, expected 32")]
    InvalidKeyLength(usize),
}

/// Rejected reconnect backoff bounds.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RetryError {
    #[error("invalid retry options: {0}")]
    InvalidRetryOptions(&'static str),
}

pub type VoiceResult<T> = std::result::Result<T, VoiceError>;
