//! # feedgate core
//!
//! Pure primitives for validating append-only, cryptographically linked
//! feeds: the message model, canonical encoding, signature verification,
//! and per-link chain checks.
//!
//! This crate contains no I/O and no threads. It is pure computation over
//! cryptographic data structures; batching and parallelism live in the
//! `feedgate` crate.
//!
//! ## Key Types
//!
//! - [`Message`] / [`MessageValue`] - The unit of validation
//! - [`MessageKey`] - Content-addressed identifier (`%….sha256`)
//! - [`AuthorId`] - Feed author identity (`@….ed25519`)
//! - [`HmacKey`] - Optional network-scoping secret
//!
//! ## Canonical Encoding
//!
//! Messages are hashed and signed over an insertion-ordered, 2-space
//! pretty-printed JSON encoding. See [`canonical`].

pub mod canonical;
pub mod chain;
pub mod crypto;
pub mod error;
pub mod message;
pub mod types;
pub mod verify;

pub use canonical::{canonical_bytes, json_number, signable_bytes};
pub use chain::{link_against, validate_link, Predecessor};
pub use crypto::{HmacKey, Keypair, Sha256Hash};
pub use error::CoreError;
pub use message::{HashAlgo, Message, MessageValue};
pub use types::{AuthorId, MessageKey, MessageSignature};
pub use verify::{verify_message, verify_message_value};
