//! Handshake and session error types

use thiserror::Error;

/// Cryptographic operation error
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("key generation failed: {0}")]
    KeyGeneration(String),

    #[error("invalid peer public key ({0})")]
    InvalidPeerKey(&'static str),

    #[error("malformed cryptogram: {len} bytes is too short to carry a nonce")]
    MalformedCryptogram { len: usize },

    #[error("decryption failed: authentication tag mismatch")]
    AuthenticationFailure,

    #[error("decrypted payload is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("encryption failed: {0}")]
    Encryption(String),
}

pub type CryptoResult<T> = Result<T, CryptoError>;
