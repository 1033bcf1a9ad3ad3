//! Dynamic input handling: HMAC key acceptance and raw-JSON entry points.
//!
//! Wire-facing callers hand the engine untyped input: an HMAC key that may
//! be absent, raw bytes, or a base64 string, and message batches as JSON
//! text. The helpers here check shape before any cryptographic work, with
//! the same rejection messages those callers already match on.

use feedgate_core::{HmacKey, Message, MessageKey};

use crate::error::ValidateError;
use crate::executor::Validator;

/// An HMAC key as supplied by a caller.
///
/// `Bytes` must be exactly 32 bytes. `Base64` must re-encode to itself
/// exactly and decode to 32 bytes. Both are rejected with a descriptive
/// error before any cryptographic work runs.
#[derive(Debug, Clone, Default)]
pub enum HmacKeyInput {
    /// No keying: signatures and keys are network-agnostic.
    #[default]
    None,
    /// Raw key bytes.
    Bytes(Vec<u8>),
    /// Base64-encoded key string.
    Base64(String),
}

impl HmacKeyInput {
    /// Check the supplied form and produce the key, if any.
    pub fn resolve(&self) -> Result<Option<HmacKey>, ValidateError> {
        match self {
            HmacKeyInput::None => Ok(None),
            HmacKeyInput::Bytes(bytes) => Ok(Some(HmacKey::from_bytes(bytes)?)),
            HmacKeyInput::Base64(s) => Ok(Some(HmacKey::from_base64(s)?)),
        }
    }
}

impl From<&[u8]> for HmacKeyInput {
    fn from(bytes: &[u8]) -> Self {
        HmacKeyInput::Bytes(bytes.to_vec())
    }
}

impl From<[u8; 32]> for HmacKeyInput {
    fn from(bytes: [u8; 32]) -> Self {
        HmacKeyInput::Bytes(bytes.to_vec())
    }
}

impl From<&str> for HmacKeyInput {
    fn from(s: &str) -> Self {
        HmacKeyInput::Base64(s.to_string())
    }
}

/// Decode one message object from JSON text.
pub fn parse_message(json: &str) -> Result<Message, ValidateError> {
    serde_json::from_str(json).map_err(|e| ValidateError::Decode(e.to_string()))
}

/// Decode a JSON array of message objects.
///
/// Anything that is not a JSON array is rejected with the input-shape
/// error before any element is examined.
pub fn parse_message_array(json: &str) -> Result<Vec<Message>, ValidateError> {
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| ValidateError::Decode(e.to_string()))?;
    let elements = match value {
        serde_json::Value::Array(elements) => elements,
        _ => return Err(ValidateError::InputShape),
    };
    elements
        .into_iter()
        .map(|element| {
            serde_json::from_value(element).map_err(|e| ValidateError::Decode(e.to_string()))
        })
        .collect()
}

/// Raw-JSON variants of the validation operations.
impl Validator {
    pub fn verify_signatures_json(
        &self,
        hmac: &HmacKeyInput,
        msgs_json: &str,
    ) -> Result<(), ValidateError> {
        let msgs = parse_message_array(msgs_json)?;
        self.verify_signatures(hmac, &msgs)
    }

    pub fn validate_single_json(
        &self,
        hmac: &HmacKeyInput,
        msg_json: &str,
        previous_json: Option<&str>,
    ) -> Result<MessageKey, ValidateError> {
        let msg = parse_message(msg_json)?;
        let previous = previous_json.map(parse_message).transpose()?;
        self.validate_single(hmac, &msg, previous.as_ref())
    }

    pub fn validate_batch_json(
        &self,
        hmac: &HmacKeyInput,
        msgs_json: &str,
        previous_json: Option<&str>,
    ) -> Result<Vec<MessageKey>, ValidateError> {
        let msgs = parse_message_array(msgs_json)?;
        let previous = previous_json.map(parse_message).transpose()?;
        self.validate_batch(hmac, &msgs, previous.as_ref())
    }

    pub fn validate_ooo_batch_json(
        &self,
        hmac: &HmacKeyInput,
        msgs_json: &str,
    ) -> Result<(), ValidateError> {
        let msgs = parse_message_array(msgs_json)?;
        self.validate_ooo_batch(hmac, &msgs)
    }

    pub fn validate_multi_author_batch_json(
        &self,
        hmac: &HmacKeyInput,
        msgs_json: &str,
    ) -> Result<(), ValidateError> {
        let msgs = parse_message_array(msgs_json)?;
        self.validate_multi_author_batch(hmac, &msgs)
    }
}
