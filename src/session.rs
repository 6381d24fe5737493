//! Established encrypted session over a derived AES-256-GCM key

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use rand::RngCore;
use rand::rngs::OsRng;
use tracing::warn;

use crate::{CryptoError, CryptoResult, NONCE_SIZE};

/// An established session holding the derived symmetric key.
///
/// Produced by [`Handshake::finish`](crate::Handshake::finish). Encrypt and
/// decrypt take `&self` and share no mutable state, so calls may run
/// concurrently; every encryption draws its own nonce from the OS random
/// source.
///
/// Wire format of a cryptogram: `nonce (12 bytes) || ciphertext || tag (16
/// bytes)`. There is no version byte or algorithm identifier; both peers
/// agree on P-521 + AES-256-GCM out-of-band.
pub struct Session {
    cipher: Aes256Gcm,
}

impl Session {
    /// Wrap a derived 32-byte key. The raw key bytes never leave this module.
    pub(crate) fn new(key: &[u8]) -> CryptoResult<Self> {
        let cipher = Aes256Gcm::new_from_slice(key)
            .map_err(|e| CryptoError::KeyGeneration(e.to_string()))?;
        Ok(Self { cipher })
    }

    /// Encrypt a plaintext under a fresh random nonce.
    ///
    /// Returns `nonce || ciphertext || tag`. String callers pass
    /// `str::as_bytes()`.
    ///
    /// # Errors
    /// Fails only if the backing AEAD primitive fails, which is unexpected.
    pub fn encrypt(&self, plaintext: &[u8]) -> CryptoResult<Vec<u8>> {
        let mut nonce_bytes = [0u8; NONCE_SIZE];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let sealed = self
            .cipher
            .encrypt(nonce, plaintext)
            .map_err(|e| CryptoError::Encryption(e.to_string()))?;

        let mut cryptogram = Vec::with_capacity(NONCE_SIZE + sealed.len());
        cryptogram.extend_from_slice(&nonce_bytes);
        cryptogram.extend_from_slice(&sealed);

        Ok(cryptogram)
    }

    /// Decrypt and verify a cryptogram produced by the peer's `encrypt`.
    ///
    /// # Errors
    /// Returns [`CryptoError::MalformedCryptogram`] if the input is too short
    /// to carry a nonce, and [`CryptoError::AuthenticationFailure`] if tag
    /// verification fails. No plaintext is ever returned on failure.
    pub fn decrypt(&self, cryptogram: &[u8]) -> CryptoResult<Vec<u8>> {
        if cryptogram.len() < NONCE_SIZE {
            return Err(CryptoError::MalformedCryptogram {
                len: cryptogram.len(),
            });
        }

        let (nonce_bytes, sealed) = cryptogram.split_at(NONCE_SIZE);
        let nonce = Nonce::from_slice(nonce_bytes);

        self.cipher.decrypt(nonce, sealed).map_err(|_| {
            warn!("rejected cryptogram: authentication failed");
            CryptoError::AuthenticationFailure
        })
    }

    /// Decrypt a cryptogram whose plaintext is a UTF-8 string.
    ///
    /// # Errors
    /// As [`Session::decrypt`], plus [`CryptoError::InvalidUtf8`] if the
    /// recovered bytes are not valid UTF-8.
    pub fn decrypt_utf8(&self, cryptogram: &[u8]) -> CryptoResult<String> {
        let plaintext = self.decrypt(cryptogram)?;
        Ok(String::from_utf8(plaintext)?)
    }
}
