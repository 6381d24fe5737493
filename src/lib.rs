//! Secure Session - End-to-End Encryption for Peer-to-Peer Channels
//!
//! Provides an ephemeral P-521 ECDH key exchange with AES-256-GCM symmetric
//! encryption. Each side starts a [`Handshake`], swaps base64-encoded public
//! keys over an external signaling channel, and finishes with the peer's key
//! to obtain a [`Session`] for bidirectional encrypt/decrypt.
//!
//! The exchange is anonymous ECDHE: public keys are not signed, so an active
//! man-in-the-middle that substitutes keys during signaling is not detected.
//! Callers whose threat model includes active attackers must authenticate the
//! exchanged keys themselves.

mod error;
mod handshake;
mod session;

pub use error::*;
pub use handshake::*;
pub use session::*;

/// Nonce size for AES-256-GCM (96 bits / 12 bytes)
pub const NONCE_SIZE: usize = 12;

/// Authentication tag size (128 bits / 16 bytes)
pub const TAG_SIZE: usize = 16;

/// Derived AES-256 session key size (256 bits / 32 bytes)
pub const SESSION_KEY_SIZE: usize = 32;
