//! Error types for feedgate core.
//!
//! Display strings are part of the API: existing callers match on
//! substrings of these messages, so the wording is stable.

use thiserror::Error;

/// Errors produced while encoding, verifying, or chain-checking a message.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Signature was invalid")]
    Signature,

    #[error("The first message of a feed must have seq of 1")]
    FirstSequence,

    #[error("message does not extend its feed: {detail}")]
    ChainBreak { detail: String },

    #[error("message key does not match the hash of its value: expected {expected}, found {found}")]
    KeyMismatch { expected: String, found: String },

    #[error("hmac key invalid: {0}")]
    KeyEncoding(String),

    #[error("cannot encode message value: {0}")]
    Encoding(String),

    #[error("malformed identifier: {0}")]
    BadIdentifier(String),
}

impl CoreError {
    /// Chain-break error with the given detail.
    pub(crate) fn chain_break(detail: impl Into<String>) -> Self {
        CoreError::ChainBreak {
            detail: detail.into(),
        }
    }
}
