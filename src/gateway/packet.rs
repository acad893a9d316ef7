use byteorder::{BigEndian, ByteOrder};
use tracing::trace;

use crate::{
    audio::codec::{ChannelLayout, FrameDecoder, FrameEncoder, pcm},
    common::errors::{VoiceError, VoiceResult},
    gateway::{
        constants::{NONCE_LEN, RTP_HEADER_LEN, RTP_OPUS_PAYLOAD_TYPE, RTP_VERSION_BYTE},
        encryption::VoiceCipher,
    },
};

/// The plaintext 12-byte RTP header of a voice packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RtpHeader {
    pub sequence: u16,
    pub timestamp: u32,
    pub ssrc: u32,
}

impl RtpHeader {
    pub fn new(sequence: u16, timestamp: u32, ssrc: u32) -> Self {
        Self {
            sequence,
            timestamp,
            ssrc,
        }
    }

    pub fn to_bytes(&self) -> [u8; RTP_HEADER_LEN] {
        let mut header = [0u8; RTP_HEADER_LEN];
        header[0] = RTP_VERSION_BYTE;
        header[1] = RTP_OPUS_PAYLOAD_TYPE;
        BigEndian::write_u16(&mut header[2..4], self.sequence);
        BigEndian::write_u32(&mut header[4..8], self.timestamp);
        BigEndian::write_u32(&mut header[8..12], self.ssrc);
        header
    }

    /// Reads the header fields without touching the payload. The marker
    /// bytes are not checked.
    pub fn parse(datagram: &[u8]) -> VoiceResult<Self> {
        if datagram.len() < RTP_HEADER_LEN {
            return Err(VoiceError::MalformedPacket {
                len: datagram.len(),
            });
        }
        Ok(Self {
            sequence: BigEndian::read_u16(&datagram[2..4]),
            timestamp: BigEndian::read_u32(&datagram[4..8]),
            ssrc: BigEndian::read_u32(&datagram[8..12]),
        })
    }

    /// Discord voice nonce: the header padded with zeroes to 24 bytes.
    ///
    /// Unique per packet only as long as the sender never reuses a sequence
    /// number under the same key.
    pub fn nonce(&self) -> [u8; NONCE_LEN] {
        let mut nonce = [0u8; NONCE_LEN];
        nonce[..RTP_HEADER_LEN].copy_from_slice(&self.to_bytes());
        nonce
    }
}

/// One voice frame, either built for sending or parsed from the wire.
///
/// Both directions produce the same immutable value holding the wire bytes
/// and the raw PCM (interleaved s16 big-endian).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoicePacket {
    header: RtpHeader,
    wire: Vec<u8>,
    raw_audio: Vec<u8>,
}

impl VoicePacket {
    /// Encode path: PCM → Opus → secretbox → framed packet.
    pub fn from_raw_audio<E>(
        encoder: &mut E,
        cipher: &VoiceCipher,
        header: RtpHeader,
        raw_audio: &[u8],
        layout: ChannelLayout,
    ) -> VoiceResult<Self>
    where
        E: FrameEncoder + ?Sized,
    {
        if !encoder.is_available() {
            return Err(VoiceError::CodecUnavailable);
        }

        let samples = pcm::samples_from_be_bytes(raw_audio)?;
        let opus = encoder.encode(layout, &samples)?;

        let header_bytes = header.to_bytes();
        let ciphertext = cipher.seal(&header.nonce(), &opus)?;

        let mut wire = Vec::with_capacity(RTP_HEADER_LEN + ciphertext.len());
        wire.extend_from_slice(&header_bytes);
        wire.extend_from_slice(&ciphertext);

        Ok(Self {
            header,
            wire,
            raw_audio: raw_audio.to_vec(),
        })
    }

    /// Decode path: framed packet → secretbox open → Opus (stereo) → PCM.
    ///
    /// Nothing reaches the codec unless the tag verifies.
    pub fn from_wire_bytes<D>(
        decoder: &mut D,
        cipher: &VoiceCipher,
        datagram: &[u8],
    ) -> VoiceResult<Self>
    where
        D: FrameDecoder + ?Sized,
    {
        let header = RtpHeader::parse(datagram)?;

        if !decoder.is_available() {
            return Err(VoiceError::CodecUnavailable);
        }

        let opus = cipher
            .open(&header.nonce(), &datagram[RTP_HEADER_LEN..])
            .inspect_err(|_| {
                trace!(
                    "Dropping voice packet seq={} ssrc={}: authentication failed",
                    header.sequence, header.ssrc
                )
            })?;
        let samples = decoder.decode(&opus)?;

        Ok(Self {
            header,
            wire: datagram.to_vec(),
            raw_audio: pcm::samples_to_be_bytes(&samples),
        })
    }

    /// Same as [`Self::from_wire_bytes`] for the first `len` bytes of a
    /// receive buffer.
    pub fn from_datagram<D>(
        decoder: &mut D,
        cipher: &VoiceCipher,
        buf: &[u8],
        len: usize,
    ) -> VoiceResult<Self>
    where
        D: FrameDecoder + ?Sized,
    {
        Self::from_wire_bytes(decoder, cipher, &buf[..len.min(buf.len())])
    }

    pub fn header(&self) -> RtpHeader {
        self.header
    }

    pub fn sequence(&self) -> u16 {
        self.header.sequence
    }

    pub fn timestamp(&self) -> u32 {
        self.header.timestamp
    }

    pub fn ssrc(&self) -> u32 {
        self.header.ssrc
    }

    pub fn wire_bytes(&self) -> &[u8] {
        &self.wire
    }

    pub fn into_wire_bytes(self) -> Vec<u8> {
        self.wire
    }

    /// The encrypted payload following the header.
    pub fn encoded_audio(&self) -> &[u8] {
        &self.wire[RTP_HEADER_LEN..]
    }

    pub fn raw_audio(&self) -> &[u8] {
        &self.raw_audio
    }
}
