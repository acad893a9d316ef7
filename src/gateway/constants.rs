/// First RTP byte: version 2, no padding, no extension, no CSRCs.
pub const RTP_VERSION_BYTE: u8 = 0x80;

/// Second RTP byte: dynamic payload type 0x78 (120) for Opus.
pub const RTP_OPUS_PAYLOAD_TYPE: u8 = 0x78;

/// Length of the plaintext RTP header that prefixes every voice packet.
pub const RTP_HEADER_LEN: usize = 12;

/// XSalsa20 nonce length. The header fills the first 12 bytes.
pub const NONCE_LEN: usize = 24;

/// Session secret length handed out by the voice gateway.
pub const SECRET_KEY_LEN: usize = 32;

/// Default first reconnect delay (ms).
pub const DEFAULT_FIRST_BACKOFF_MS: u64 = 5_000;

/// Default upper clamp for the reconnect delay (ms).
pub const DEFAULT_MAX_BACKOFF_MS: u64 = 120_000;

/// Default random jitter spread as a fraction of the recommended delay.
pub const DEFAULT_JITTER_FACTOR: f64 = 0.5;
