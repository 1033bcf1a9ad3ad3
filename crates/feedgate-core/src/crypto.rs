//! Cryptographic primitives for feedgate.
//!
//! Wraps Ed25519 verification, SHA-256 content addressing, and the optional
//! HMAC re-keying of the digest with strong types.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::error::CoreError;
use crate::types::{AuthorId, MessageSignature};

type HmacSha256 = Hmac<Sha256>;

/// A 32-byte SHA-256 digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sha256Hash(pub [u8; 32]);

impl Sha256Hash {
    /// Digest of the given data.
    pub fn hash(data: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(data);
        Self(hasher.finalize().into())
    }

    /// HMAC-SHA-256 tag of the given data under `key`.
    pub fn keyed(key: &HmacKey, data: &[u8]) -> Self {
        let mut mac =
            HmacSha256::new_from_slice(&key.0).expect("hmac accepts any key length");
        mac.update(data);
        Self(mac.finalize().into_bytes().into())
    }

    /// Digest of `data`, HMAC-keyed when `key` is present.
    pub fn maybe_keyed(key: Option<&HmacKey>, data: &[u8]) -> Self {
        match key {
            Some(k) => Self::keyed(k, data),
            None => Self::hash(data),
        }
    }

    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for Sha256Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sha256({})", &STANDARD.encode(self.0)[..12])
    }
}

impl AsRef<[u8]> for Sha256Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// A 32-byte shared secret that re-keys the digest, scoping signatures and
/// content addresses to one network namespace.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct HmacKey(pub [u8; 32]);

impl HmacKey {
    /// Accept raw key bytes. The length must be exactly 32.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CoreError> {
        let arr: [u8; 32] = bytes
            .try_into()
            .map_err(|_| CoreError::KeyEncoding("byte length must equal 32".to_string()))?;
        Ok(Self(arr))
    }

    /// Accept a base64-encoded key string.
    ///
    /// The string must re-encode to itself exactly (no whitespace, no
    /// alternate alphabets, no missing padding) and decode to 32 bytes.
    pub fn from_base64(input: &str) -> Result<Self, CoreError> {
        let bytes = STANDARD
            .decode(input)
            .map_err(|_| CoreError::KeyEncoding("string must be base64 encoded".to_string()))?;
        if STANDARD.encode(&bytes) != input {
            return Err(CoreError::KeyEncoding(
                "string must be base64 encoded".to_string(),
            ));
        }
        Self::from_bytes(&bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Debug for HmacKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print key material.
        f.write_str("HmacKey(..)")
    }
}

/// Check a detached signature by `author` over `message`.
pub fn verify_detached(
    author: &AuthorId,
    message: &[u8],
    signature: &MessageSignature,
) -> Result<(), CoreError> {
    let verifying_key =
        VerifyingKey::from_bytes(author.as_bytes()).map_err(|_| CoreError::Signature)?;
    let sig = Signature::from_bytes(signature.as_bytes());
    verifying_key
        .verify(message, &sig)
        .map_err(|_| CoreError::Signature)
}

/// A keypair for authoring messages.
///
/// Validation never needs secret key material; this exists for producers
/// and for the test suites, wrapping ed25519-dalek's `SigningKey`.
#[derive(Clone)]
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Generate a new random keypair.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        Self {
            signing_key: SigningKey::generate(&mut rng),
        }
    }

    /// Create from a 32-byte seed.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// The author identifier for this keypair.
    pub fn author(&self) -> AuthorId {
        AuthorId(self.signing_key.verifying_key().to_bytes())
    }

    /// Sign a message.
    pub fn sign(&self, message: &[u8]) -> MessageSignature {
        MessageSignature(self.signing_key.sign(message).to_bytes())
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keypair({:?})", self.author())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_verify() {
        let keypair = Keypair::generate();
        let message = b"hello world";
        let signature = keypair.sign(message);

        verify_detached(&keypair.author(), message, &signature)
            .expect("valid signature should verify");

        assert!(verify_detached(&keypair.author(), b"hello worlD", &signature).is_err());
    }

    #[test]
    fn test_keypair_deterministic_from_seed() {
        let seed = [0x42u8; 32];
        let kp1 = Keypair::from_seed(&seed);
        let kp2 = Keypair::from_seed(&seed);
        assert_eq!(kp1.author(), kp2.author());
    }

    #[test]
    fn test_keyed_digest_differs_from_plain() {
        let key = HmacKey([9u8; 32]);
        let plain = Sha256Hash::hash(b"data");
        let keyed = Sha256Hash::keyed(&key, b"data");
        assert_ne!(plain, keyed);
        assert_eq!(keyed, Sha256Hash::maybe_keyed(Some(&key), b"data"));
        assert_eq!(plain, Sha256Hash::maybe_keyed(None, b"data"));
    }

    #[test]
    fn test_hmac_key_length() {
        assert!(HmacKey::from_bytes(&[0u8; 32]).is_ok());
        let err = HmacKey::from_bytes(&[0u8; 31]).unwrap_err();
        assert_eq!(err.to_string(), "hmac key invalid: byte length must equal 32");
    }

    #[test]
    fn test_hmac_key_base64_roundtrip_required() {
        let encoded = STANDARD.encode([7u8; 32]);
        let key = HmacKey::from_base64(&encoded).unwrap();
        assert_eq!(key.as_bytes(), &[7u8; 32]);

        // Unpadded form decodes but does not round-trip.
        let unpadded = encoded.trim_end_matches('=').to_string();
        let err = HmacKey::from_base64(&unpadded).unwrap_err();
        assert_eq!(
            err.to_string(),
            "hmac key invalid: string must be base64 encoded"
        );

        assert!(HmacKey::from_base64("not base64 at all!").is_err());
    }

    #[test]
    fn test_hmac_key_base64_wrong_length() {
        let encoded = STANDARD.encode([7u8; 16]);
        let err = HmacKey::from_base64(&encoded).unwrap_err();
        assert_eq!(err.to_string(), "hmac key invalid: byte length must equal 32");
    }
}
