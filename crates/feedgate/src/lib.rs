//! # feedgate
//!
//! Validation engine for append-only, cryptographically linked feeds: one
//! hash-chained, signed log per author. Given candidate entries, the
//! engine confirms that each is correctly signed, correctly hash-linked
//! to its predecessor, and correctly numbered, producing a content
//! address per valid entry or a precise rejection.
//!
//! ## Overview
//!
//! - **Single feed, in order**: [`Validator::validate_batch`] walks the
//!   chain sequentially; each entry's check depends on its predecessor.
//! - **Single feed, any order**: [`Validator::validate_ooo_batch`] sorts
//!   by sequence first.
//! - **Many feeds**: [`Validator::validate_multi_author_batch`] partitions
//!   by author and validates partitions concurrently on a fixed-size
//!   worker pool.
//! - **Signatures only**: [`Validator::verify_signatures`] skips chain
//!   checks entirely.
//!
//! All operations are pure: the engine holds no state between calls, and
//! errors are values with stable display strings.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use feedgate::{HmacKeyInput, Validator};
//! # fn example(messages: Vec<feedgate::Message>) -> Result<(), feedgate::ValidateError> {
//! // One-time readiness step: builds the worker pool.
//! let validator = Validator::new()?;
//!
//! // Validate a full feed in order.
//! let keys = validator.validate_batch(&HmacKeyInput::None, &messages, None)?;
//! assert_eq!(keys.len(), messages.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## Re-exports
//!
//! The message model and primitives live in [`feedgate_core`], re-exported
//! here as [`core`] and flattened for the common types.

pub mod batch;
pub mod config;
pub mod error;
pub mod executor;
pub mod input;

pub use feedgate_core as core;

pub use batch::{validate_value_batch, validate_value_single, verify_value_signatures};
pub use config::ValidatorConfig;
pub use error::ValidateError;
pub use executor::Validator;
pub use input::{parse_message, parse_message_array, HmacKeyInput};

pub use feedgate_core::{
    AuthorId, CoreError, HmacKey, Keypair, Message, MessageKey, MessageSignature, MessageValue,
};
