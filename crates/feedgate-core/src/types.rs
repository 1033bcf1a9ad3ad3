//! Tagged identifier types.
//!
//! Feed identifiers travel as sigil-prefixed, base64-encoded, suffix-tagged
//! strings: `%<base64>.sha256` for message keys, `@<base64>.ed25519` for
//! authors, `<base64>.sig.ed25519` for signatures. The suffixes and sigils
//! are bit-exact interop requirements, so parsing is strict and re-encoding
//! reproduces the input byte for byte.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;

fn decode_tagged(
    input: &str,
    sigil: Option<char>,
    suffix: &str,
    expected_len: usize,
) -> Result<Vec<u8>, CoreError> {
    let rest = match sigil {
        Some(s) => input
            .strip_prefix(s)
            .ok_or_else(|| CoreError::BadIdentifier(format!("expected {s:?} sigil: {input}")))?,
        None => input,
    };
    let b64 = rest
        .strip_suffix(suffix)
        .ok_or_else(|| CoreError::BadIdentifier(format!("expected {suffix:?} suffix: {input}")))?;
    let bytes = STANDARD
        .decode(b64)
        .map_err(|e| CoreError::BadIdentifier(format!("invalid base64 in {input}: {e}")))?;
    if bytes.len() != expected_len {
        return Err(CoreError::BadIdentifier(format!(
            "expected {expected_len} bytes, found {}: {input}",
            bytes.len()
        )));
    }
    Ok(bytes)
}

/// A message key: the content address of a message.
///
/// Computed as the (optionally HMAC-keyed) SHA-256 digest of the canonical
/// encoding of the message value, rendered as `%<base64>.sha256`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MessageKey(pub [u8; 32]);

impl MessageKey {
    pub const SUFFIX: &'static str = ".sha256";
    pub const SIGIL: char = '%';

    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Render the full tagged string.
    pub fn tag(&self) -> String {
        format!("{}{}{}", Self::SIGIL, STANDARD.encode(self.0), Self::SUFFIX)
    }

    /// Parse a tagged string.
    pub fn parse(input: &str) -> Result<Self, CoreError> {
        let bytes = decode_tagged(input, Some(Self::SIGIL), Self::SUFFIX, 32)?;
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag())
    }
}

impl fmt::Debug for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MessageKey({})", &self.tag()[..12])
    }
}

impl TryFrom<String> for MessageKey {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<MessageKey> for String {
    fn from(key: MessageKey) -> String {
        key.tag()
    }
}

/// An author identifier: an Ed25519 public key rendered as
/// `@<base64>.ed25519`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AuthorId(pub [u8; 32]);

impl AuthorId {
    pub const SUFFIX: &'static str = ".ed25519";
    pub const SIGIL: char = '@';

    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn tag(&self) -> String {
        format!("{}{}{}", Self::SIGIL, STANDARD.encode(self.0), Self::SUFFIX)
    }

    pub fn parse(input: &str) -> Result<Self, CoreError> {
        let bytes = decode_tagged(input, Some(Self::SIGIL), Self::SUFFIX, 32)?;
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Display for AuthorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag())
    }
}

impl fmt::Debug for AuthorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AuthorId({})", &self.tag()[..12])
    }
}

impl TryFrom<String> for AuthorId {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<AuthorId> for String {
    fn from(author: AuthorId) -> String {
        author.tag()
    }
}

/// A detached Ed25519 signature rendered as `<base64>.sig.ed25519`.
///
/// No sigil: signatures never appear as link targets.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MessageSignature(pub [u8; 64]);

impl MessageSignature {
    pub const SUFFIX: &'static str = ".sig.ed25519";

    pub const fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    pub fn tag(&self) -> String {
        format!("{}{}", STANDARD.encode(self.0), Self::SUFFIX)
    }

    pub fn parse(input: &str) -> Result<Self, CoreError> {
        let bytes = decode_tagged(input, None, Self::SUFFIX, 64)?;
        let mut arr = [0u8; 64];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }
}

impl fmt::Display for MessageSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag())
    }
}

impl fmt::Debug for MessageSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MessageSignature({}...)", &self.tag()[..12])
    }
}

impl TryFrom<String> for MessageSignature {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<MessageSignature> for String {
    fn from(sig: MessageSignature) -> String {
        sig.tag()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_key_roundtrip() {
        let key = MessageKey::from_bytes([0x42; 32]);
        let tag = key.tag();
        assert!(tag.starts_with('%'));
        assert!(tag.ends_with(".sha256"));
        let recovered = MessageKey::parse(&tag).unwrap();
        assert_eq!(key, recovered);
    }

    #[test]
    fn test_author_roundtrip() {
        let author = AuthorId::from_bytes([0xab; 32]);
        let tag = author.tag();
        assert!(tag.starts_with('@'));
        assert!(tag.ends_with(".ed25519"));
        assert_eq!(AuthorId::parse(&tag).unwrap(), author);
    }

    #[test]
    fn test_signature_roundtrip() {
        let sig = MessageSignature::from_bytes([0xcd; 64]);
        let tag = sig.tag();
        assert!(tag.ends_with(".sig.ed25519"));
        assert_eq!(MessageSignature::parse(&tag).unwrap(), sig);
    }

    #[test]
    fn test_wrong_sigil_rejected() {
        let tag = MessageKey::from_bytes([1; 32]).tag();
        let swapped = tag.replacen('%', "@", 1);
        assert!(matches!(
            MessageKey::parse(&swapped),
            Err(CoreError::BadIdentifier(_))
        ));
    }

    #[test]
    fn test_wrong_suffix_rejected() {
        assert!(AuthorId::parse("@AAAA.sha256").is_err());
    }

    #[test]
    fn test_wrong_length_rejected() {
        // 16 bytes of payload instead of 32
        let short = format!("%{}.sha256", STANDARD.encode([0u8; 16]));
        assert!(MessageKey::parse(&short).is_err());
    }

    #[test]
    fn test_serde_as_tag_string() {
        let key = MessageKey::from_bytes([7; 32]);
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, format!("\"{}\"", key.tag()));
        let back: MessageKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_tag_roundtrip_any_bytes(bytes in any::<[u8; 32]>()) {
                let key = MessageKey::from_bytes(bytes);
                prop_assert_eq!(MessageKey::parse(&key.tag()).unwrap(), key);
                let author = AuthorId::from_bytes(bytes);
                prop_assert_eq!(AuthorId::parse(&author.tag()).unwrap(), author);
            }
        }
    }
}
