//! Ephemeral P-521 key exchange
//!
//! A [`Handshake`] owns a freshly generated ephemeral keypair. The private
//! half lives only inside the handshake and crosses exactly one boundary:
//! the ECDH derivation in [`Handshake::finish`]. It is never exported.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use p521::PublicKey;
use p521::ecdh::EphemeralSecret;
use p521::pkcs8::{DecodePublicKey, EncodePublicKey};
use rand::rngs::OsRng;
use tracing::debug;
use zeroize::Zeroizing;

use crate::{CryptoError, CryptoResult, SESSION_KEY_SIZE, Session};

/// An in-progress Diffie-Hellman key exchange.
///
/// Created by [`Handshake::start`], consumed by [`Handshake::finish`]. The
/// keypair is generated fresh per handshake and becomes unreachable once the
/// handshake is dropped or finished.
pub struct Handshake {
    secret: EphemeralSecret,
    public_key: String,
}

impl Handshake {
    /// Start a new handshake with a fresh ephemeral P-521 keypair.
    ///
    /// # Errors
    /// Returns an error if the public key cannot be SPKI-encoded, which does
    /// not happen for a freshly generated key.
    pub fn start() -> CryptoResult<Self> {
        let secret = EphemeralSecret::random(&mut OsRng);
        let spki = secret
            .public_key()
            .to_public_key_der()
            .map_err(|e| CryptoError::KeyGeneration(e.to_string()))?;
        let public_key = BASE64.encode(spki.as_bytes());

        debug!("handshake started");

        Ok(Self { secret, public_key })
    }

    /// The local public key as base64-encoded SPKI, to send to the peer.
    ///
    /// Safe to transmit over an untrusted channel; see the crate docs for the
    /// man-in-the-middle caveat.
    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    /// Complete the exchange with the peer's base64-encoded SPKI public key,
    /// producing a [`Session`] over the derived AES-256-GCM key.
    ///
    /// Both sides derive bit-identical key material (ECDH symmetry), so a
    /// session finished on either end decrypts what the other encrypts.
    /// Consuming `self` makes the ephemeral keypair single-use.
    ///
    /// # Errors
    /// Returns [`CryptoError::InvalidPeerKey`] if the peer key fails base64
    /// decoding, SPKI parsing, or P-521 point validation.
    pub fn finish(self, peer_public_key: &str) -> CryptoResult<Session> {
        let der = BASE64
            .decode(peer_public_key)
            .map_err(|_| CryptoError::InvalidPeerKey("base64 decode"))?;
        let peer = PublicKey::from_public_key_der(&der)
            .map_err(|_| CryptoError::InvalidPeerKey("SPKI parse or point validation"))?;

        let shared = self.secret.diffie_hellman(&peer);

        // Truncate the big-endian x-coordinate (66 bytes on P-521) to the
        // leading 256 bits, which become the AES key directly. No KDF.
        let mut key = Zeroizing::new([0u8; SESSION_KEY_SIZE]);
        key.copy_from_slice(&shared.raw_secret_bytes()[..SESSION_KEY_SIZE]);

        debug!("handshake finished, session key derived");

        Session::new(&*key)
    }
}

impl std::fmt::Debug for Handshake {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Handshake")
            .field("public_key", &self.public_key)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}
