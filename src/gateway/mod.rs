pub mod constants;
pub mod encryption;
pub mod packet;
pub mod retry;

pub use encryption::{SecretKey, VoiceCipher};
pub use packet::{RtpHeader, VoicePacket};
pub use retry::{BackoffDelay, Jitter, RetryContext, RetryOptions};
