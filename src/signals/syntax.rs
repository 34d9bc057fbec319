use super::{EvaluationInput, ExtractorOutcome, Signal, SignalExtractor, SignalKind};
use crate::capabilities::SentenceTagger;
use std::sync::Arc;

const SYNTAX_WEIGHT: i32 = 1;

/// Flags sentences opening with a verb ("Click here...", "Send me...").
/// Fires once per such sentence, with no cap.
pub struct SyntaxAnalyzer {
    tagger: Arc<dyn SentenceTagger>,
    snippet_chars: usize,
}

impl SyntaxAnalyzer {
    pub fn new(tagger: Arc<dyn SentenceTagger>, snippet_chars: usize) -> Self {
        Self {
            tagger,
            snippet_chars,
        }
    }

    fn snippet(&self, sentence: &str) -> String {
        sentence.chars().take(self.snippet_chars).collect()
    }
}

impl SignalExtractor for SyntaxAnalyzer {
    fn name(&self) -> &str {
        "Syntax Analyzer"
    }

    fn extract(&self, input: &EvaluationInput<'_>) -> ExtractorOutcome {
        let sentences = match self.tagger.tag_sentences(input.text) {
            Ok(sentences) => sentences,
            Err(e) => return ExtractorOutcome::Failed(format!("POS tagging failed: {e}")),
        };

        let signals = sentences
            .iter()
            .filter(|sentence| sentence.starts_with_verb())
            .map(|sentence| {
                let text = if sentence.text.is_empty() {
                    sentence.tokens.join(" ")
                } else {
                    sentence.text.clone()
                };
                Signal::new(
                    SignalKind::Syntax,
                    SYNTAX_WEIGHT,
                    format!("Sentence starts with verb: '{}...'", self.snippet(&text)),
                )
            })
            .collect();

        ExtractorOutcome::Signals(signals)
    }
}
