//! Test fixtures and helpers.
//!
//! A `FeedFixture` owns a keypair and authors a correctly linked, signed
//! feed one message at a time, for tests that need known-valid (or
//! deliberately broken) input.

use serde_json::json;

use feedgate_core::{
    AuthorId, HashAlgo, HmacKey, Keypair, Message, MessageValue,
};

/// Deterministic epoch for fixture timestamps (2016-08-03, matching the
/// era of the fixtures this engine interoperates with).
const TIMESTAMP_BASE: u64 = 1_470_000_000_000;

/// A single author's feed under construction.
pub struct FeedFixture {
    keypair: Keypair,
    hmac: Option<HmacKey>,
    messages: Vec<Message>,
}

impl FeedFixture {
    /// Create a fixture with a random keypair.
    pub fn new() -> Self {
        Self {
            keypair: Keypair::generate(),
            hmac: None,
            messages: Vec::new(),
        }
    }

    /// Create with a deterministic keypair from a seed.
    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self {
            keypair: Keypair::from_seed(&seed),
            hmac: None,
            messages: Vec::new(),
        }
    }

    /// Create a fixture whose feed is scoped to an HMAC-keyed network.
    pub fn keyed(seed: [u8; 32], hmac: HmacKey) -> Self {
        Self {
            keypair: Keypair::from_seed(&seed),
            hmac: Some(hmac),
            messages: Vec::new(),
        }
    }

    /// The feed's author identifier.
    pub fn author(&self) -> AuthorId {
        self.keypair.author()
    }

    /// The fixture's keypair.
    pub fn keypair(&self) -> &Keypair {
        &self.keypair
    }

    /// Sign and append the next message with the given content.
    pub fn append(&mut self, content: serde_json::Value) -> &Message {
        let sequence = self.messages.len() as u64 + 1;
        let message = MessageValue {
            previous: self.messages.last().map(|m| m.key),
            author: self.keypair.author(),
            sequence,
            timestamp: (TIMESTAMP_BASE + sequence * 1_000).into(),
            hash: HashAlgo::Sha256,
            content,
            signature: None,
        }
        .sign(&self.keypair, self.hmac.as_ref())
        .expect("fixture values always encode")
        .into_message(
            (TIMESTAMP_BASE + sequence * 1_000 + 37).into(),
            self.hmac.as_ref(),
        )
        .expect("fixture values always encode");

        self.messages.push(message);
        self.messages.last().expect("just pushed")
    }

    /// Append `count` generic post messages.
    pub fn append_posts(&mut self, count: usize) -> &mut Self {
        for _ in 0..count {
            let n = self.messages.len() as u64 + 1;
            self.append(json!({ "type": "post", "text": format!("post {n}") }));
        }
        self
    }

    /// All messages appended so far, in feed order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Clones of the bare message values, in feed order.
    pub fn values(&self) -> Vec<MessageValue> {
        self.messages.iter().map(|m| m.value.clone()).collect()
    }
}

impl Default for FeedFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Create `count` deterministic single-author feeds of `len` messages
/// each, for multi-author tests.
pub fn multi_author_feeds(count: usize, len: usize) -> Vec<FeedFixture> {
    (0..count)
        .map(|i| {
            let mut seed = [0u8; 32];
            seed[0] = i as u8;
            seed[1] = 0xfe;
            let mut fixture = FeedFixture::with_seed(seed);
            fixture.append_posts(len);
            fixture
        })
        .collect()
}

/// Flatten several feeds into one interleaved message list.
pub fn interleave(feeds: &[FeedFixture]) -> Vec<Message> {
    let longest = feeds.iter().map(|f| f.messages().len()).max().unwrap_or(0);
    let mut out = Vec::new();
    for at in 0..longest {
        for feed in feeds {
            if let Some(msg) = feed.messages().get(at) {
                out.push(msg.clone());
            }
        }
    }
    out
}
