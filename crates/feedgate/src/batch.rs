//! Batch orchestration: composing signature and chain checks over many
//! messages of one feed.
//!
//! Everything here is sequential; a feed's chain check is inherently
//! ordered, so a single feed is never validated in parallel. Fan-out
//! across feeds lives in [`crate::executor`].

use std::collections::HashMap;

use feedgate_core::{
    link_against, verify_message_value, AuthorId, CoreError, HmacKey, Message, MessageKey,
    MessageValue, Predecessor,
};

use crate::error::ValidateError;

/// One message under validation: its value plus the envelope key claimed
/// for it, if the caller supplied one.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Candidate<'a> {
    pub value: &'a MessageValue,
    pub claimed: Option<&'a MessageKey>,
}

impl<'a> Candidate<'a> {
    pub fn from_value(value: &'a MessageValue) -> Self {
        Self {
            value,
            claimed: None,
        }
    }

    pub fn from_message(message: &'a Message) -> Self {
        Self {
            value: &message.value,
            claimed: Some(&message.key),
        }
    }
}

fn tag(err: CoreError, value: &MessageValue) -> ValidateError {
    ValidateError::invalid(err, &value.author, value.sequence)
}

/// Verify signatures only, in input order, failing fast on the first bad
/// one. No chain relationship is assumed between the entries.
pub(crate) fn verify_signatures_only<'a>(
    values: impl IntoIterator<Item = &'a MessageValue>,
    hmac: Option<&HmacKey>,
) -> Result<(), ValidateError> {
    for value in values {
        verify_message_value(value, hmac).map_err(|e| tag(e, value))?;
    }
    Ok(())
}

/// Validate an ordered run of candidates as one feed segment.
///
/// Entry 0 is checked against `previous`, or against the first-entry rule
/// when there is none; entry i against entry i-1. With `continuation` set
/// (and no `previous`), entry 0's link is left unchecked: the segment is
/// a continuation of a feed whose predecessor is unknown. Fails fast; on
/// success returns the computed key of every entry, in order.
pub(crate) fn validate_ordered(
    candidates: &[Candidate<'_>],
    previous: Option<Predecessor<'_>>,
    hmac: Option<&HmacKey>,
    continuation: bool,
) -> Result<Vec<MessageKey>, ValidateError> {
    let mut prev: Option<(&MessageValue, MessageKey)> = match previous {
        Some(pred) => {
            let pred_key = pred.value.content_key(hmac)?;
            if let Some(claimed) = pred.key {
                if *claimed != pred_key {
                    return Err(CoreError::KeyMismatch {
                        expected: pred_key.tag(),
                        found: claimed.tag(),
                    }
                    .into());
                }
            }
            Some((pred.value, pred_key))
        }
        None => None,
    };

    let mut keys = Vec::with_capacity(candidates.len());
    for (index, candidate) in candidates.iter().enumerate() {
        let value = candidate.value;

        verify_message_value(value, hmac).map_err(|e| tag(e, value))?;

        match &prev {
            Some((pred_value, pred_key)) => {
                link_against(value, pred_value, pred_key).map_err(|e| tag(e, value))?;
            }
            None if index == 0 && continuation => {
                // unanchored continuation: nothing to link against
            }
            None => {
                if value.sequence != 1 || value.previous.is_some() {
                    return Err(tag(CoreError::FirstSequence, value));
                }
            }
        }

        let key = value.content_key(hmac).map_err(|e| tag(e, value))?;
        if let Some(claimed) = candidate.claimed {
            if *claimed != key {
                return Err(tag(
                    CoreError::KeyMismatch {
                        expected: key.tag(),
                        found: claimed.tag(),
                    },
                    value,
                ));
            }
        }

        keys.push(key);
        prev = Some((value, key));
    }
    Ok(keys)
}

/// Partition candidates by author, preserving first-appearance order.
///
/// The partition index is deterministic for a given input: the feed whose
/// author appears first in the input is partition 0, and reported errors
/// follow that order, never worker completion order.
pub(crate) fn partition_by_author<'a>(
    candidates: impl IntoIterator<Item = Candidate<'a>>,
) -> Vec<(AuthorId, Vec<Candidate<'a>>)> {
    let mut partitions: Vec<(AuthorId, Vec<Candidate<'a>>)> = Vec::new();
    let mut index: HashMap<AuthorId, usize> = HashMap::new();

    for candidate in candidates {
        let author = candidate.value.author;
        match index.get(&author) {
            Some(&at) => partitions[at].1.push(candidate),
            None => {
                index.insert(author, partitions.len());
                partitions.push((author, vec![candidate]));
            }
        }
    }
    partitions
}

/// Validate one author partition of an out-of-order batch.
///
/// Sorts by sequence, then validates as an ordered segment. A partition
/// whose lowest sequence is 1 must be a correct feed head; one starting
/// past 1 is a continuation, accepted only when `allow_continuation` is
/// set. Duplicate sequence numbers surface as chain breaks.
pub(crate) fn validate_partition(
    partition: &[Candidate<'_>],
    hmac: Option<&HmacKey>,
    allow_continuation: bool,
) -> Result<Vec<MessageKey>, ValidateError> {
    let mut ordered = partition.to_vec();
    ordered.sort_by_key(|c| c.value.sequence);

    let first = match ordered.first() {
        Some(first) => first.value,
        None => return Ok(Vec::new()),
    };
    let continuation = first.sequence != 1;
    if continuation && !allow_continuation {
        return Err(tag(CoreError::FirstSequence, first));
    }
    validate_ordered(&ordered, None, hmac, continuation)
}

/// Verify signatures for bare message values, in input order, fail-fast.
///
/// For callers that have already shed the envelope; no chain relationship
/// is assumed and no content addresses are checked.
pub fn verify_value_signatures(
    hmac: Option<&HmacKey>,
    values: &[MessageValue],
) -> Result<(), ValidateError> {
    verify_signatures_only(values.iter(), hmac)
}

/// Fully validate a bare message value against its optional predecessor
/// value, returning its computed key.
pub fn validate_value_single(
    hmac: Option<&HmacKey>,
    value: &MessageValue,
    previous: Option<&MessageValue>,
) -> Result<MessageKey, ValidateError> {
    let candidates = [Candidate::from_value(value)];
    let keys = validate_ordered(&candidates, previous.map(Predecessor::new), hmac, false)?;
    Ok(keys[0])
}

/// Validate an in-order run of bare message values as one feed segment,
/// returning the computed keys in order.
pub fn validate_value_batch(
    hmac: Option<&HmacKey>,
    values: &[MessageValue],
    previous: Option<&MessageValue>,
) -> Result<Vec<MessageKey>, ValidateError> {
    let candidates: Vec<Candidate<'_>> = values.iter().map(Candidate::from_value).collect();
    validate_ordered(&candidates, previous.map(Predecessor::new), hmac, false)
}
