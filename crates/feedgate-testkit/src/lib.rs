//! # feedgate testkit
//!
//! Testing utilities for the feedgate validation engine.
//!
//! ## Overview
//!
//! - **Fixtures**: [`FeedFixture`] authors correctly linked, signed feeds
//!   deterministically, for tests that need known-valid input to accept
//!   or to break in controlled ways.
//! - **Generators**: proptest strategies for property-based testing.
//!
//! ## Fixtures
//!
//! ```rust
//! use feedgate_testkit::FeedFixture;
//! use serde_json::json;
//!
//! let mut feed = FeedFixture::with_seed([1; 32]);
//! feed.append(json!({ "type": "post", "text": "hello" }));
//! feed.append_posts(4);
//! assert_eq!(feed.messages().len(), 5);
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{interleave, multi_author_feeds, FeedFixture};
pub use generators::{feed_from_params, FeedParams};
