//! Built-in capability providers so the engine runs without external NLP
//! services. Small and lexicon-driven; swap them out for anything better.

use crate::capabilities::{SentenceTagger, SentimentScorer, TaggedSentence, Translator};
use crate::language::LanguageDetector;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::{HashMap, HashSet};

lazy_static! {
    // Terminal punctuation only ends a sentence before whitespace or end of text,
    // so dots inside hostnames and URLs stay put.
    static ref SENTENCE_END_REGEX: Regex = Regex::new(r"[.!?]+(?:\s+|$)|\n").unwrap();
    static ref TOKEN_REGEX: Regex = Regex::new(r"[\w’']+|[^\w\s]").unwrap();
    static ref WORD_REGEX: Regex = Regex::new(r"[a-z’']+").unwrap();
}

const POLARITY_LEXICON: &[(&str, f64)] = &[
    ("bad", -0.7),
    ("terrible", -1.0),
    ("awful", -1.0),
    ("horrible", -1.0),
    ("worst", -1.0),
    ("wrong", -0.5),
    ("fail", -0.5),
    ("failed", -0.5),
    ("failure", -0.3),
    ("suspended", -0.6),
    ("locked", -0.4),
    ("blocked", -0.5),
    ("terminated", -0.6),
    ("closed", -0.2),
    ("unauthorized", -0.6),
    ("illegal", -0.5),
    ("fraud", -0.6),
    ("fraudulent", -0.6),
    ("suspicious", -0.4),
    ("risk", -0.3),
    ("danger", -0.6),
    ("problem", -0.4),
    ("issue", -0.2),
    ("error", -0.4),
    ("lost", -0.4),
    ("lose", -0.5),
    ("penalty", -0.5),
    ("warning", -0.4),
    ("angry", -0.5),
    ("sad", -0.5),
    ("sorry", -0.5),
    ("unfortunately", -0.5),
    ("worried", -0.4),
    ("good", 0.7),
    ("great", 0.8),
    ("excellent", 1.0),
    ("happy", 0.8),
    ("glad", 0.5),
    ("thanks", 0.2),
    ("thank", 0.2),
    ("nice", 0.6),
    ("love", 0.5),
    ("wonderful", 1.0),
    ("welcome", 0.8),
    ("free", 0.4),
    ("congratulations", 0.6),
    ("best", 1.0),
    ("pleased", 0.5),
    ("safe", 0.5),
];

const NEGATIONS: &[&str] = &["not", "never", "no", "don’t", "don't", "cannot"];

/// Average of the lexicon polarities found in the text.
///
/// A negation word flips and halves the next scored word.
pub struct LexiconSentiment {
    lexicon: HashMap<&'static str, f64>,
}

impl Default for LexiconSentiment {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconSentiment {
    pub fn new() -> Self {
        Self {
            lexicon: POLARITY_LEXICON.iter().copied().collect(),
        }
    }
}

impl SentimentScorer for LexiconSentiment {
    fn polarity(&self, text: &str) -> anyhow::Result<f64> {
        let lower = text.to_lowercase();
        let mut total = 0.0;
        let mut scored = 0usize;
        let mut negate = false;

        for word in WORD_REGEX.find_iter(&lower).map(|m| m.as_str()) {
            if NEGATIONS.contains(&word) {
                negate = true;
                continue;
            }
            if let Some(&value) = self.lexicon.get(word) {
                total += if negate { -0.5 * value } else { value };
                scored += 1;
                negate = false;
            }
        }

        if scored == 0 {
            return Ok(0.0);
        }
        Ok((total / scored as f64).clamp(-1.0, 1.0))
    }
}

const IMPERATIVE_VERBS: &[&str] = &[
    "click", "send", "verify", "confirm", "update", "login", "log", "reset", "open",
    "download", "call", "reply", "respond", "act", "review", "sign", "submit", "provide",
    "enter", "pay", "transfer", "buy", "check", "let", "follow", "visit", "complete",
    "contact", "validate", "unlock", "claim", "install", "read", "tap", "go", "do",
    "make", "keep", "use", "wire", "forward", "share", "grab", "hop", "take", "give",
    "get", "see",
];

const PRONOUNS: &[&str] = &[
    "i", "you", "he", "she", "it", "we", "they", "me", "him", "her", "us", "them",
];

const DETERMINERS: &[&str] = &["a", "an", "the", "this", "that", "these", "those", "your", "our", "my"];

/// Sentence splitter plus a lexicon tagger emitting Penn-style tags.
pub struct HeuristicTagger {
    verbs: HashSet<&'static str>,
}

impl Default for HeuristicTagger {
    fn default() -> Self {
        Self::new()
    }
}

impl HeuristicTagger {
    pub fn new() -> Self {
        Self {
            verbs: IMPERATIVE_VERBS.iter().copied().collect(),
        }
    }

    fn tag(&self, token: &str) -> &'static str {
        let lower = token.to_lowercase();
        let word = lower.as_str();
        if self.verbs.contains(word) {
            "VB"
        } else if PRONOUNS.contains(&word) {
            "PRP"
        } else if DETERMINERS.contains(&word) {
            "DT"
        } else if word.chars().all(|c| c.is_ascii_digit()) {
            "CD"
        } else if !word.chars().any(char::is_alphanumeric) {
            "."
        } else {
            "NN"
        }
    }
}

impl SentenceTagger for HeuristicTagger {
    fn tag_sentences(&self, text: &str) -> anyhow::Result<Vec<TaggedSentence>> {
        let mut sentences = Vec::new();

        for sentence in split_sentences(text) {
            let tokens: Vec<String> = TOKEN_REGEX
                .find_iter(sentence)
                .map(|t| t.as_str().to_string())
                .collect();
            if tokens.is_empty() {
                continue;
            }
            let tags = tokens.iter().map(|t| self.tag(t).to_string()).collect();
            sentences.push(TaggedSentence {
                text: sentence.to_string(),
                tokens,
                tags,
            });
        }

        Ok(sentences)
    }
}

fn split_sentences(text: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    for end in SENTENCE_END_REGEX.find_iter(text) {
        pieces.push(text[start..end.end()].trim());
        start = end.end();
    }
    pieces.push(text[start..].trim());
    pieces.retain(|piece| !piece.is_empty());
    pieces
}

/// Hands text through untouched. Warns when it clearly is not English.
pub struct PassthroughTranslator;

impl Translator for PassthroughTranslator {
    fn to_english(&self, text: &str) -> anyhow::Result<String> {
        if !LanguageDetector::likely_english(text) {
            let scripts = LanguageDetector::detect_scripts(text);
            log::warn!(
                "Input does not look like English (scripts: {:?}); no translation backend configured, scoring as-is",
                scripts
            );
        }
        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentiment_negative_text() {
        let scorer = LexiconSentiment::new();
        let polarity = scorer
            .polarity("Your account is suspended due to fraud. This is terrible.")
            .unwrap();
        assert!(polarity < -0.3, "polarity was {polarity}");
    }

    #[test]
    fn test_sentiment_neutral_and_positive() {
        let scorer = LexiconSentiment::new();
        assert_eq!(scorer.polarity("").unwrap(), 0.0);
        assert_eq!(scorer.polarity("meeting at noon").unwrap(), 0.0);
        assert!(scorer.polarity("Thanks, great work!").unwrap() > 0.0);
    }

    #[test]
    fn test_sentiment_negation() {
        let scorer = LexiconSentiment::new();
        let polarity = scorer.polarity("This is not good").unwrap();
        assert!((polarity + 0.35).abs() < 1e-9);
    }

    #[test]
    fn test_tagger_splits_and_tags() {
        let tagger = HeuristicTagger::new();
        let sentences = tagger
            .tag_sentences("Click here now! We miss you.\nSend me the file")
            .unwrap();
        assert_eq!(sentences.len(), 3);
        assert_eq!(sentences[0].text, "Click here now!");
        assert!(sentences[0].starts_with_verb());
        assert_eq!(sentences[1].tags[0], "PRP");
        assert!(!sentences[1].starts_with_verb());
        assert!(sentences[2].starts_with_verb());
        assert_eq!(sentences[0].tokens.len(), sentences[0].tags.len());
    }

    #[test]
    fn test_tagger_keeps_hostnames_inside_sentence() {
        let tagger = HeuristicTagger::new();
        let sentences = tagger
            .tag_sentences("Your statement is at https://login.go.com for review. Thanks...")
            .unwrap();
        assert_eq!(sentences.len(), 2);
        assert_eq!(
            sentences[0].text,
            "Your statement is at https://login.go.com for review."
        );
        assert!(sentences.iter().all(|s| !s.starts_with_verb()));
    }

    #[test]
    fn test_tagger_empty_input() {
        let tagger = HeuristicTagger::new();
        assert!(tagger.tag_sentences("").unwrap().is_empty());
        assert!(tagger.tag_sentences("   \n  ").unwrap().is_empty());
    }

    #[test]
    fn test_passthrough_translator() {
        let out = PassthroughTranslator.to_english("Votre compte").unwrap();
        assert_eq!(out, "Votre compte");
    }
}
