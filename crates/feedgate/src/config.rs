//! Validator configuration.

/// Configuration for a [`Validator`](crate::Validator).
#[derive(Debug, Clone)]
pub struct ValidatorConfig {
    /// Whether an out-of-order author group whose lowest observed sequence
    /// is greater than 1 is accepted as a continuation of a feed with an
    /// unknown predecessor. When `false`, such groups are rejected with
    /// the first-sequence error. Internal contiguity is required either
    /// way.
    pub allow_continuation: bool,

    /// Worker pool size. `None` sizes the pool to the host's available
    /// parallelism.
    pub threads: Option<usize>,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            allow_continuation: true,
            threads: None,
        }
    }
}
