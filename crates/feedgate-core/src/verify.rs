//! Signature verification for message values.

use crate::canonical::signable_bytes;
use crate::crypto::{verify_detached, HmacKey, Sha256Hash};
use crate::error::CoreError;
use crate::message::{Message, MessageValue};

/// Verify the detached signature on a message value.
///
/// Pure: recomputes the signing pre-image (canonical encoding with the
/// signature stripped, HMAC-tagged on keyed networks) and checks it
/// against the author's public key.
pub fn verify_message_value(
    value: &MessageValue,
    hmac: Option<&HmacKey>,
) -> Result<(), CoreError> {
    let signature = value.signature.as_ref().ok_or(CoreError::Signature)?;
    let encoded = signable_bytes(value)?;
    match hmac {
        Some(key) => verify_detached(
            &value.author,
            &Sha256Hash::keyed(key, &encoded).0,
            signature,
        ),
        None => verify_detached(&value.author, &encoded, signature),
    }
}

/// Verify a complete message: signature plus envelope key.
///
/// The envelope `key` must equal the recomputed content address of the
/// value under the same HMAC key.
pub fn verify_message(message: &Message, hmac: Option<&HmacKey>) -> Result<(), CoreError> {
    verify_message_value(&message.value, hmac)?;
    let computed = message.value.content_key(hmac)?;
    if message.key != computed {
        return Err(CoreError::KeyMismatch {
            expected: computed.tag(),
            found: message.key.tag(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::Keypair;
    use crate::message::HashAlgo;
    use crate::types::MessageKey;
    use serde_json::json;

    fn signed(keypair: &Keypair, hmac: Option<&HmacKey>) -> MessageValue {
        MessageValue {
            previous: None,
            author: keypair.author(),
            sequence: 1,
            timestamp: 1_470_000_000_000u64.into(),
            hash: HashAlgo::Sha256,
            content: json!({ "type": "contact", "following": true }),
            signature: None,
        }
        .sign(keypair, hmac)
        .unwrap()
    }

    #[test]
    fn test_valid_signature() {
        let keypair = Keypair::from_seed(&[7; 32]);
        let value = signed(&keypair, None);
        verify_message_value(&value, None).unwrap();
    }

    #[test]
    fn test_mutated_content_fails() {
        let keypair = Keypair::from_seed(&[7; 32]);
        let mut value = signed(&keypair, None);
        value.content["following"] = json!(false);
        let err = verify_message_value(&value, None).unwrap_err();
        assert_eq!(err.to_string(), "Signature was invalid");
    }

    #[test]
    fn test_missing_signature_fails() {
        let keypair = Keypair::from_seed(&[7; 32]);
        let mut value = signed(&keypair, None);
        value.signature = None;
        assert!(matches!(
            verify_message_value(&value, None),
            Err(CoreError::Signature)
        ));
    }

    #[test]
    fn test_hmac_scopes_validity() {
        let keypair = Keypair::from_seed(&[7; 32]);
        let hmac = HmacKey([0x11; 32]);
        let value = signed(&keypair, Some(&hmac));

        verify_message_value(&value, Some(&hmac)).unwrap();
        // same bytes fail off-network (no key, or a different key)
        assert!(verify_message_value(&value, None).is_err());
        let other = HmacKey([0x22; 32]);
        assert!(verify_message_value(&value, Some(&other)).is_err());
    }

    #[test]
    fn test_envelope_key_cross_check() {
        let keypair = Keypair::from_seed(&[7; 32]);
        let mut message = signed(&keypair, None)
            .into_message(1_571_000_000_000u64.into(), None)
            .unwrap();
        verify_message(&message, None).unwrap();

        message.key = MessageKey::from_bytes([0xde; 32]);
        assert!(matches!(
            verify_message(&message, None),
            Err(CoreError::KeyMismatch { .. })
        ));
    }
}
