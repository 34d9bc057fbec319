pub mod domain;
pub mod matchers;
pub mod syntax;
pub mod tone;

pub use domain::DomainAnalyzer;
pub use matchers::{KeywordMatcher, ObfuscationMatcher, PhraseMatcher};
pub use syntax::SyntaxAnalyzer;
pub use tone::ToneAnalyzer;

use serde::{Deserialize, Serialize};

/// One weighted contribution to the threat score, with its justification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub weight: i32,
    pub reason: String,
    pub kind: SignalKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalKind {
    Keyword,
    Phrase,
    Obfuscation,
    Tone,
    Syntax,
    UnrecognizedDomain,
    TrustedDomain,
    SuspiciousDomainFormat,
}

impl Signal {
    pub fn new(kind: SignalKind, weight: i32, reason: impl Into<String>) -> Self {
        Self {
            weight,
            reason: reason.into(),
            kind,
        }
    }

    /// Whether this contribution counts toward the raw detection flag.
    pub fn is_risk_indicator(&self) -> bool {
        self.weight > 0 && self.kind != SignalKind::TrustedDomain
    }
}

/// What one extractor produced for one evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum ExtractorOutcome {
    Signals(Vec<Signal>),
    /// The capability behind the extractor failed; nothing is contributed.
    Failed(String),
}

impl ExtractorOutcome {
    pub fn into_signals(self) -> Vec<Signal> {
        match self {
            ExtractorOutcome::Signals(signals) => signals,
            ExtractorOutcome::Failed(_) => Vec::new(),
        }
    }
}

/// Per-call view of the text handed to every extractor.
pub struct EvaluationInput<'a> {
    pub text: &'a str,
    pub lower: &'a str,
    pub urls: &'a [String],
}

pub trait SignalExtractor: Send + Sync {
    fn extract(&self, input: &EvaluationInput<'_>) -> ExtractorOutcome;
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_indicator() {
        assert!(Signal::new(SignalKind::Keyword, 1, "k").is_risk_indicator());
        assert!(!Signal::new(SignalKind::TrustedDomain, -3, "t").is_risk_indicator());
        assert!(!Signal::new(SignalKind::Tone, 0, "zero").is_risk_indicator());
    }

    #[test]
    fn test_failed_outcome_contributes_nothing() {
        let outcome = ExtractorOutcome::Failed("sentiment backend down".to_string());
        assert!(outcome.into_signals().is_empty());
    }
}
