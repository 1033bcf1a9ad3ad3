//! Canonical encoding for signing and content addressing.
//!
//! A message value is encoded as pretty-printed JSON with 2-space
//! indentation, fields in declaration order, object contents in their own
//! insertion order. The encoding is what gets hashed and signed, so it must
//! be byte-stable: re-encoding a decoded canonical value yields identical
//! bytes. Two semantically equal values whose contents were inserted in
//! different orders encode differently, and that is intended — insertion
//! order is part of the signed bytes.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::error::CoreError;
use crate::message::MessageValue;

/// Encode a message value to canonical bytes (signature included).
///
/// This is the content-addressing pre-image: the message key is the digest
/// of these bytes.
pub fn canonical_bytes(value: &MessageValue) -> Result<Vec<u8>, CoreError> {
    encode(value)
}

/// Encode a message value with the signature field stripped.
///
/// This is the signing pre-image: the detached signature covers these
/// bytes (or their HMAC tag, on keyed networks).
pub fn signable_bytes(value: &MessageValue) -> Result<Vec<u8>, CoreError> {
    if value.signature.is_none() {
        return encode(value);
    }
    let mut unsigned = value.clone();
    unsigned.signature = None;
    encode(&unsigned)
}

fn encode(value: &MessageValue) -> Result<Vec<u8>, CoreError> {
    let mut buf = Vec::with_capacity(512);
    let formatter = PrettyFormatter::with_indent(b"  ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut ser)
        .map_err(|e| CoreError::Encoding(e.to_string()))?;
    Ok(buf)
}

/// Represent a floating-point value as a JSON number.
///
/// JSON has no encoding for non-finite floats, so NaN and infinities are
/// rejected rather than silently degraded to null.
pub fn json_number(value: f64) -> Result<serde_json::Number, CoreError> {
    serde_json::Number::from_f64(value).ok_or_else(|| {
        CoreError::Encoding(format!("non-finite number cannot be represented: {value}"))
    })
}
