//! The message model: the unit of validation.
//!
//! A `Message` is the outer envelope (key, value, receipt timestamp); the
//! `MessageValue` is the signed payload. Field declaration order matters:
//! the canonical encoding serializes fields in exactly this order, and the
//! signature and content address are computed over that encoding.

use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::canonical::{canonical_bytes, signable_bytes};
use crate::crypto::{HmacKey, Keypair, Sha256Hash};
use crate::error::CoreError;
use crate::types::{AuthorId, MessageKey, MessageSignature};

/// The content-addressing hash algorithm tag.
///
/// Only one value is defined; the tag is carried inside the signed value so
/// that future algorithms cannot be retrofitted onto old signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HashAlgo {
    #[serde(rename = "sha256")]
    Sha256,
}

/// The signed payload of a message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageValue {
    /// Key of the preceding message in this author's feed; explicit `null`
    /// for the first message.
    pub previous: Option<MessageKey>,

    /// The author's public key.
    pub author: AuthorId,

    /// Position in the feed, starting at 1.
    pub sequence: u64,

    /// Author-claimed wall-clock time. Recorded, never validated.
    pub timestamp: Number,

    /// Content-addressing algorithm tag.
    pub hash: HashAlgo,

    /// Application-defined content. Opaque to validation beyond
    /// serializing deterministically.
    pub content: serde_json::Value,

    /// Detached signature over the canonical encoding of this value with
    /// the signature field removed. Absent only while authoring.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub signature: Option<MessageSignature>,
}

impl MessageValue {
    /// Compute this value's content address under the given HMAC key.
    pub fn content_key(&self, hmac: Option<&HmacKey>) -> Result<MessageKey, CoreError> {
        let encoded = canonical_bytes(self)?;
        Ok(MessageKey(Sha256Hash::maybe_keyed(hmac, &encoded).0))
    }

    /// Sign this value, producing the signed form.
    ///
    /// The pre-image is the canonical encoding without the signature field;
    /// on keyed networks the signature covers the HMAC tag of that
    /// encoding instead.
    pub fn sign(mut self, keypair: &Keypair, hmac: Option<&HmacKey>) -> Result<Self, CoreError> {
        self.signature = None;
        let encoded = signable_bytes(&self)?;
        let signature = match hmac {
            Some(key) => keypair.sign(&Sha256Hash::keyed(key, &encoded).0),
            None => keypair.sign(&encoded),
        };
        self.signature = Some(signature);
        Ok(self)
    }

    /// Wrap this signed value in an envelope, computing its key.
    pub fn into_message(self, received: Number, hmac: Option<&HmacKey>) -> Result<Message, CoreError> {
        let key = self.content_key(hmac)?;
        Ok(Message {
            key,
            value: self,
            timestamp: received,
        })
    }
}

/// A complete message: envelope key, signed value, local receipt time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Content address of `value`.
    pub key: MessageKey,

    /// The signed payload.
    pub value: MessageValue,

    /// Locally-claimed receipt time. Never validated.
    pub timestamp: Number,
}

impl Message {
    pub fn author(&self) -> &AuthorId {
        &self.value.author
    }

    pub fn sequence(&self) -> u64 {
        self.value.sequence
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn signed_first(keypair: &Keypair) -> MessageValue {
        MessageValue {
            previous: None,
            author: keypair.author(),
            sequence: 1,
            timestamp: 1_470_000_000_000u64.into(),
            hash: HashAlgo::Sha256,
            content: json!({ "type": "post", "text": "hi" }),
            signature: None,
        }
        .sign(keypair, None)
        .unwrap()
    }

    #[test]
    fn test_sign_sets_signature() {
        let keypair = Keypair::from_seed(&[1; 32]);
        let value = signed_first(&keypair);
        assert!(value.signature.is_some());
    }

    #[test]
    fn test_content_key_deterministic() {
        let keypair = Keypair::from_seed(&[1; 32]);
        let value = signed_first(&keypair);
        assert_eq!(
            value.content_key(None).unwrap(),
            value.content_key(None).unwrap()
        );
    }

    #[test]
    fn test_content_key_changes_under_hmac() {
        let keypair = Keypair::from_seed(&[1; 32]);
        let value = signed_first(&keypair);
        let hmac = HmacKey([3; 32]);
        assert_ne!(
            value.content_key(None).unwrap(),
            value.content_key(Some(&hmac)).unwrap()
        );
    }

    #[test]
    fn test_into_message_carries_key() {
        let keypair = Keypair::from_seed(&[1; 32]);
        let value = signed_first(&keypair);
        let expected = value.content_key(None).unwrap();
        let msg = value.into_message(1_571_000_000_000u64.into(), None).unwrap();
        assert_eq!(msg.key, expected);
        assert_eq!(msg.sequence(), 1);
    }

    #[test]
    fn test_message_json_roundtrip() {
        let keypair = Keypair::from_seed(&[1; 32]);
        let msg = signed_first(&keypair)
            .into_message(1_571_000_000_000u64.into(), None)
            .unwrap();
        let json = serde_json::to_string(&msg).unwrap();
        let back: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(back, msg);
    }

    #[test]
    fn test_unknown_hash_tag_rejected() {
        let err = serde_json::from_value::<HashAlgo>(json!("blake2b"));
        assert!(err.is_err());
    }
}
