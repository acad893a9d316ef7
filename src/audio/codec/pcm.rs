//! Raw PCM byte form used at the packet boundary: interleaved signed 16-bit
//! big-endian samples.

use byteorder::{BigEndian, ByteOrder};

use crate::{
    audio::constants::PCM_SAMPLE_BYTES,
    common::errors::{VoiceError, VoiceResult},
};

pub fn samples_from_be_bytes(raw: &[u8]) -> VoiceResult<Vec<i16>> {
    if raw.len() % PCM_SAMPLE_BYTES != 0 {
        return Err(VoiceError::CodecEncode(format!(
            "PCM length {} is not a whole number of samples",
            raw.len()
        )));
    }
    let mut samples = vec![0i16; raw.len() / PCM_SAMPLE_BYTES];
    BigEndian::read_i16_into(raw, &mut samples);
    Ok(samples)
}

pub fn samples_to_be_bytes(samples: &[i16]) -> Vec<u8> {
    let mut raw = vec![0u8; samples.len() * PCM_SAMPLE_BYTES];
    BigEndian::write_i16_into(samples, &mut raw);
    raw
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_big_endian() {
        let samples = samples_from_be_bytes(&[0x01, 0x02, 0xFF, 0xFE]).unwrap();
        assert_eq!(samples, vec![0x0102, -2]);
    }

    #[test]
    fn writes_big_endian() {
        assert_eq!(samples_to_be_bytes(&[i16::MIN, 1]), vec![0x80, 0x00, 0x00, 0x01]);
    }

    #[test]
    fn rejects_half_samples() {
        assert!(matches!(
            samples_from_be_bytes(&[0x00, 0x01, 0x02]),
            Err(VoiceError::CodecEncode(_))
        ));
    }
}
