//! The `Validator` handle and the partitioned parallel executor.
//!
//! A `Validator` owns a fixed-size rayon pool, built once at construction
//! and reused for the handle's lifetime; constructing the handle is the
//! engine's one-time readiness step. Handles are cheap to clone and share
//! the pool. The engine holds no state between calls, so one handle can
//! serve any number of concurrent callers without locks.

use std::sync::Arc;
use std::thread;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, warn};

use feedgate_core::{Message, MessageKey, Predecessor};

use crate::batch::{
    partition_by_author, validate_ordered, validate_partition, verify_signatures_only, Candidate,
};
use crate::config::ValidatorConfig;
use crate::error::ValidateError;
use crate::input::HmacKeyInput;

/// The validation engine handle.
#[derive(Clone)]
pub struct Validator {
    pool: Arc<ThreadPool>,
    config: ValidatorConfig,
}

impl Validator {
    /// Build a validator with the default configuration.
    pub fn new() -> Result<Self, ValidateError> {
        Self::with_config(ValidatorConfig::default())
    }

    /// Build a validator with an explicit configuration.
    ///
    /// The worker pool is sized to `config.threads`, defaulting to the
    /// host's available parallelism.
    pub fn with_config(config: ValidatorConfig) -> Result<Self, ValidateError> {
        let threads = config.threads.unwrap_or_else(|| {
            thread::available_parallelism().map(usize::from).unwrap_or(1)
        });
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("feedgate-worker-{i}"))
            .build()
            .map_err(|e| ValidateError::Pool(e.to_string()))?;
        debug!(threads, "validator ready");
        Ok(Self {
            pool: Arc::new(pool),
            config,
        })
    }

    /// The active configuration.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// The worker pool size.
    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Verify the signature of every message, in input order, with no
    /// chain relationship assumed. Fails fast on the first bad signature.
    pub fn verify_signatures(
        &self,
        hmac: &HmacKeyInput,
        msgs: &[Message],
    ) -> Result<(), ValidateError> {
        let hmac = hmac.resolve()?;
        verify_signatures_only(msgs.iter().map(|m| &m.value), hmac.as_ref())
    }

    /// Fully validate a single message against its optional predecessor.
    ///
    /// Returns the message's computed key, which is also checked against
    /// the envelope's claimed key.
    pub fn validate_single(
        &self,
        hmac: &HmacKeyInput,
        msg: &Message,
        previous: Option<&Message>,
    ) -> Result<MessageKey, ValidateError> {
        let hmac = hmac.resolve()?;
        let candidates = [Candidate::from_message(msg)];
        let pred = previous.map(|p| Predecessor::with_key(&p.value, &p.key));
        let keys = validate_ordered(&candidates, pred, hmac.as_ref(), false)?;
        Ok(keys[0])
    }

    /// Validate an in-order run of one author's feed.
    ///
    /// The first message is checked against `previous`, or against the
    /// first-entry rule when there is none. Returns one key per message,
    /// in order; an empty batch succeeds with an empty key list.
    pub fn validate_batch(
        &self,
        hmac: &HmacKeyInput,
        msgs: &[Message],
        previous: Option<&Message>,
    ) -> Result<Vec<MessageKey>, ValidateError> {
        let hmac = hmac.resolve()?;
        let candidates: Vec<Candidate<'_>> = msgs.iter().map(Candidate::from_message).collect();
        let pred = previous.map(|p| Predecessor::with_key(&p.value, &p.key));
        validate_ordered(&candidates, pred, hmac.as_ref(), false)
    }

    /// Validate messages that may arrive in any order.
    ///
    /// Messages are grouped by author and each group is sorted by
    /// sequence and validated as a feed segment. The outcome is invariant
    /// under permutation of the input. Groups run sequentially: this
    /// entry point is intended for a single feed (grouping tolerates
    /// strays from other authors).
    pub fn validate_ooo_batch(
        &self,
        hmac: &HmacKeyInput,
        msgs: &[Message],
    ) -> Result<(), ValidateError> {
        let hmac = hmac.resolve()?;
        let partitions = partition_by_author(msgs.iter().map(Candidate::from_message));
        for (_, partition) in &partitions {
            validate_partition(partition, hmac.as_ref(), self.config.allow_continuation)?;
        }
        Ok(())
    }

    /// Validate messages spanning many authors.
    ///
    /// Partitions by author and validates the partitions concurrently on
    /// the worker pool; a partition's failure does not abort its
    /// siblings. Succeeds iff every partition succeeds; the reported
    /// error is the first by partition index (first appearance of the
    /// author in the input), independent of worker completion order.
    pub fn validate_multi_author_batch(
        &self,
        hmac: &HmacKeyInput,
        msgs: &[Message],
    ) -> Result<(), ValidateError> {
        let hmac = hmac.resolve()?;
        let partitions = partition_by_author(msgs.iter().map(Candidate::from_message));
        debug!(
            partitions = partitions.len(),
            messages = msgs.len(),
            "dispatching multi-author batch"
        );

        let allow_continuation = self.config.allow_continuation;
        let hmac = hmac.as_ref();
        let results: Vec<Result<Vec<MessageKey>, ValidateError>> = self.pool.install(|| {
            partitions
                .par_iter()
                .map(|(_, partition)| validate_partition(partition, hmac, allow_continuation))
                .collect()
        });

        for result in results {
            if let Err(err) = result {
                warn!(%err, "multi-author batch rejected");
                return Err(err);
            }
        }
        Ok(())
    }
}
