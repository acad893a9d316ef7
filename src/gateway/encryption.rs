use std::fmt;

use xsalsa20poly1305::{
    Nonce, XSalsa20Poly1305,
    aead::{Aead, KeyInit},
};

use crate::{
    common::errors::{VoiceError, VoiceResult},
    gateway::constants::{NONCE_LEN, SECRET_KEY_LEN},
};

/// Session secret from the voice gateway's session description.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey([u8; SECRET_KEY_LEN]);

impl SecretKey {
    pub fn new(bytes: [u8; SECRET_KEY_LEN]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> VoiceResult<Self> {
        let key: [u8; SECRET_KEY_LEN] = bytes
            .try_into()
            .map_err(|_| VoiceError::InvalidKeyLength(bytes.len()))?;
        Ok(Self(key))
    }
}

impl From<[u8; SECRET_KEY_LEN]> for SecretKey {
    fn from(bytes: [u8; SECRET_KEY_LEN]) -> Self {
        Self(bytes)
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(..)")
    }
}

/// NaCl `secretbox` (XSalsa20-Poly1305) keyed with the session secret.
///
/// Sealed output carries the 16-byte Poly1305 tag in the layout the
/// `xsalsa20poly1305` crate uses for NaCl compatibility.
pub struct VoiceCipher {
    cipher: XSalsa20Poly1305,
}

impl VoiceCipher {
    pub fn new(key: &SecretKey) -> Self {
        Self {
            cipher: XSalsa20Poly1305::new(&key.0.into()),
        }
    }

    pub fn seal(&self, nonce: &[u8; NONCE_LEN], plaintext: &[u8]) -> VoiceResult<Vec<u8>> {
        self.cipher
            .encrypt(Nonce::from_slice(nonce), plaintext)
            .map_err(|_| VoiceError::Encryption)
    }

    pub fn open(&self, nonce: &[u8; NONCE_LEN], ciphertext: &[u8]) -> VoiceResult<Vec<u8>> {
        self.cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| VoiceError::AuthenticationFailed)
    }
}

impl fmt::Debug for VoiceCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VoiceCipher").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONCE: [u8; NONCE_LEN] = [7; NONCE_LEN];

    #[test]
    fn open_reverses_seal() {
        let cipher = VoiceCipher::new(&SecretKey::new([1; 32]));
        let sealed = cipher.seal(&NONCE, b"opus frame").unwrap();
        assert_eq!(sealed.len(), b"opus frame".len() + 16);
        assert_eq!(cipher.open(&NONCE, &sealed).unwrap(), b"opus frame");
    }

    #[test]
    fn wrong_nonce_fails_authentication() {
        let cipher = VoiceCipher::new(&SecretKey::new([1; 32]));
        let sealed = cipher.seal(&NONCE, b"opus frame").unwrap();
        assert_eq!(
            cipher.open(&[0; NONCE_LEN], &sealed),
            Err(VoiceError::AuthenticationFailed)
        );
    }

    #[test]
    fn truncated_ciphertext_fails_authentication() {
        let cipher = VoiceCipher::new(&SecretKey::new([1; 32]));
        assert_eq!(
            cipher.open(&NONCE, &[0; 4]),
            Err(VoiceError::AuthenticationFailed)
        );
    }

    #[test]
    fn key_length_is_checked() {
        assert_eq!(
            SecretKey::from_slice(&[0; 16]),
            Err(VoiceError::InvalidKeyLength(16))
        );
        assert!(SecretKey::from_slice(&[0; 32]).is_ok());
    }

    #[test]
    fn debug_hides_key_bytes() {
        assert_eq!(format!("{:?}", SecretKey::new([0xAB; 32])), "SecretKey(..)");
    }
}
