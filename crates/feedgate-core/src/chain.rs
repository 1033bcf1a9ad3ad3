//! Hash-chain and sequence validation for a single feed link.

use crate::crypto::HmacKey;
use crate::error::CoreError;
use crate::message::MessageValue;
use crate::types::MessageKey;

/// The declared predecessor of a message under validation.
///
/// The claimed key is optional; the link check always recomputes the key
/// from the predecessor's value, so a caller cannot forge a link by lying
/// about the predecessor's key.
#[derive(Debug, Clone, Copy)]
pub struct Predecessor<'a> {
    pub value: &'a MessageValue,
    pub key: Option<&'a MessageKey>,
}

impl<'a> Predecessor<'a> {
    pub fn new(value: &'a MessageValue) -> Self {
        Self { value, key: None }
    }

    pub fn with_key(value: &'a MessageValue, key: &'a MessageKey) -> Self {
        Self {
            value,
            key: Some(key),
        }
    }
}

/// Check that `value` correctly extends its declared predecessor.
///
/// With no predecessor, only the first entry of a feed is acceptable:
/// `sequence == 1` and `previous == null`. With a predecessor, the
/// sequence must increment by one, the author must match, and `previous`
/// must equal the predecessor's recomputed content address.
///
/// This checks chain shape only; signature verification is a separate,
/// mandatory step.
pub fn validate_link(
    value: &MessageValue,
    previous: Option<Predecessor<'_>>,
    hmac: Option<&HmacKey>,
) -> Result<MessageKey, CoreError> {
    let pred = match previous {
        None => {
            if value.sequence != 1 || value.previous.is_some() {
                return Err(CoreError::FirstSequence);
            }
            return value.content_key(hmac);
        }
        Some(pred) => pred,
    };

    let pred_key = pred.value.content_key(hmac)?;
    if let Some(claimed) = pred.key {
        if *claimed != pred_key {
            return Err(CoreError::KeyMismatch {
                expected: pred_key.tag(),
                found: claimed.tag(),
            });
        }
    }

    link_against(value, pred.value, &pred_key)?;
    value.content_key(hmac)
}

/// Check the link shape against a predecessor whose key is already known
/// to be correct.
///
/// `pred_key` must be the recomputed content address of `pred_value`;
/// batch validation computes each key exactly once and threads it through
/// here instead of re-hashing the predecessor at every link.
pub fn link_against(
    value: &MessageValue,
    pred_value: &MessageValue,
    pred_key: &MessageKey,
) -> Result<(), CoreError> {
    if value.author != pred_value.author {
        return Err(CoreError::chain_break(
            "all messages in a feed must be by the same author",
        ));
    }

    let expected_seq = pred_value.sequence + 1;
    if value.sequence != expected_seq {
        return Err(CoreError::chain_break(format!(
            "expected sequence {expected_seq} but found {}",
            value.sequence
        )));
    }

    match &value.previous {
        Some(link) if link == pred_key => Ok(()),
        Some(_) => Err(CoreError::chain_break(
            "previous key does not match the preceding message",
        )),
        None => Err(CoreError::chain_break(
            "a message after the first must link to its previous",
        )),
    }
}
