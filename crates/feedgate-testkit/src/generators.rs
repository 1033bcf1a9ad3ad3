//! Proptest generators for property-based testing.

use proptest::prelude::*;
use serde_json::json;

use feedgate_core::{Keypair, Message};

use crate::fixtures::FeedFixture;

/// Generate a keypair from an arbitrary seed.
pub fn keypair() -> impl Strategy<Value = Keypair> {
    any::<[u8; 32]>().prop_map(|seed| Keypair::from_seed(&seed))
}

/// Generate a short text suitable for message content.
pub fn content_text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{0,32}".prop_map(String::from)
}

/// Parameters for generating a valid single-author feed.
#[derive(Debug, Clone)]
pub struct FeedParams {
    pub seed: [u8; 32],
    pub texts: Vec<String>,
}

impl Arbitrary for FeedParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (any::<[u8; 32]>(), prop::collection::vec(content_text(), 1..=8))
            .prop_map(|(seed, texts)| FeedParams { seed, texts })
            .boxed()
    }
}

/// Author the feed described by the parameters.
pub fn feed_from_params(params: &FeedParams) -> Vec<Message> {
    let mut fixture = FeedFixture::with_seed(params.seed);
    for text in &params.texts {
        fixture.append(json!({ "type": "post", "text": text }));
    }
    fixture.messages().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use feedgate_core::verify_message;

    proptest! {
        #[test]
        fn test_generated_feeds_are_signed(params: FeedParams) {
            let msgs = feed_from_params(&params);
            prop_assert_eq!(msgs.len(), params.texts.len());
            for msg in &msgs {
                verify_message(msg, None).unwrap();
            }
        }

        #[test]
        fn test_generated_feeds_are_deterministic(params: FeedParams) {
            let a = feed_from_params(&params);
            let b = feed_from_params(&params);
            prop_assert_eq!(a, b);
        }
    }
}
