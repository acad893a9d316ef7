pub mod codec;
pub mod constants;

pub use codec::{ChannelLayout, FrameDecoder, FrameEncoder, OpusCodecPool};
