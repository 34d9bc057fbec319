//! Narrow interfaces to the language tooling the engine leans on.
//!
//! Implementations may call out to anything (a local lexicon, a tagging
//! service). They must return or fail; a failure only silences the signal
//! that depended on it.

use serde::{Deserialize, Serialize};

/// Polarity of a text in [-1, 1].
pub trait SentimentScorer: Send + Sync {
    fn polarity(&self, text: &str) -> anyhow::Result<f64>;
}

/// One sentence with its tokens and part-of-speech tags, index-aligned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedSentence {
    pub text: String,
    pub tokens: Vec<String>,
    pub tags: Vec<String>,
}

impl TaggedSentence {
    /// Penn-style verb tags all start with `VB`.
    pub fn starts_with_verb(&self) -> bool {
        self.tags.first().map_or(false, |tag| tag.starts_with("VB"))
    }
}

pub trait SentenceTagger: Send + Sync {
    fn tag_sentences(&self, text: &str) -> anyhow::Result<Vec<TaggedSentence>>;
}

/// Produces English text for the keyword tables. Applied before evaluation.
pub trait Translator: Send + Sync {
    fn to_english(&self, text: &str) -> anyhow::Result<String>;
}
