//! Engine-level error type.

use thiserror::Error;

use feedgate_core::{AuthorId, CoreError};

/// Errors returned by the validation engine.
///
/// Wraps [`CoreError`] so callers match a single enum; batch operations
/// surface only the first failure encountered, tagged with the offending
/// message's author and sequence. Display strings are stable API.
#[derive(Debug, Error)]
pub enum ValidateError {
    #[error("input must be an array of message objects")]
    InputShape,

    #[error("cannot decode message object: {0}")]
    Decode(String),

    #[error("failed to initialize worker pool: {0}")]
    Pool(String),

    #[error("found invalid message: {source}: {author} at sequence {sequence}")]
    InvalidMessage {
        #[source]
        source: CoreError,
        author: AuthorId,
        sequence: u64,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ValidateError {
    /// Tag a core error with the message it was detected on.
    pub(crate) fn invalid(source: CoreError, author: &AuthorId, sequence: u64) -> Self {
        ValidateError::InvalidMessage {
            source,
            author: *author,
            sequence,
        }
    }
}
