use crate::capabilities::{SentenceTagger, SentimentScorer};
use crate::config::{ScoringConfig, Thresholds};
use crate::nlp::{HeuristicTagger, LexiconSentiment};
use crate::signals::{
    DomainAnalyzer, EvaluationInput, ExtractorOutcome, KeywordMatcher, ObfuscationMatcher,
    PhraseMatcher, Signal, SignalExtractor, SyntaxAnalyzer, ToneAnalyzer,
};
use crate::urls::extract_urls;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const MIN_SCORE: i32 = 0;
pub const MAX_SCORE: i32 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub detected: bool,
    pub score: u8,
    pub confidence: u8,
    pub reasons: Vec<String>,
}

/// Folds signals into a verdict.
///
/// `any_match` (some positive, non-trust signal was seen) and `detected`
/// (the gated result) are separate values; only the latter is returned.
pub struct Aggregator<'a> {
    thresholds: &'a Thresholds,
}

impl<'a> Aggregator<'a> {
    pub fn new(thresholds: &'a Thresholds) -> Self {
        Self { thresholds }
    }

    pub fn finish(&self, signals: Vec<Signal>) -> Verdict {
        let mut sum = 0i32;
        let mut any_match = false;
        let mut reasons = Vec::with_capacity(signals.len() + 1);

        for signal in signals {
            sum += signal.weight;
            any_match |= signal.is_risk_indicator();
            reasons.push(signal.reason);
        }

        let score = sum.clamp(MIN_SCORE, MAX_SCORE);
        // score is an integer in [0, 10], so floor(score / 10 * 100) is exact
        let confidence = (score * 100 / MAX_SCORE) as u8;

        let bucket = if confidence >= self.thresholds.high_confidence {
            "🚨 High confidence due to multiple strong signals."
        } else if confidence >= self.thresholds.medium_confidence {
            "⚠️ Medium confidence — some red flags present."
        } else {
            "ℹ️ Low confidence — mild or uncertain indicators."
        };
        reasons.push(bucket.to_string());

        let detected = any_match && confidence >= self.thresholds.medium_confidence;

        log::debug!(
            "Aggregated raw sum {} -> score {} (any_match={}, detected={})",
            sum,
            score,
            any_match,
            detected
        );

        Verdict {
            detected,
            score: score as u8,
            confidence,
            reasons,
        }
    }
}

/// The rule-based scoring engine.
///
/// Holds the compiled configuration table and the extractors in run order.
/// Evaluation takes `&self` only, so one engine serves any number of threads.
pub struct PhishingEngine {
    config: Arc<ScoringConfig>,
    extractors: Vec<Box<dyn SignalExtractor>>,
}

impl PhishingEngine {
    /// Engine with the built-in sentiment lexicon and sentence tagger.
    pub fn new(config: ScoringConfig) -> anyhow::Result<Self> {
        Self::with_capabilities(
            Arc::new(config),
            Arc::new(LexiconSentiment::new()),
            Arc::new(HeuristicTagger::new()),
        )
    }

    pub fn with_capabilities(
        config: Arc<ScoringConfig>,
        sentiment: Arc<dyn SentimentScorer>,
        tagger: Arc<dyn SentenceTagger>,
    ) -> anyhow::Result<Self> {
        config.validate()?;

        let thresholds = &config.thresholds;
        let extractors: Vec<Box<dyn SignalExtractor>> = vec![
            Box::new(KeywordMatcher::new(&config.keywords)),
            Box::new(PhraseMatcher::new(&config.phrases)),
            Box::new(ObfuscationMatcher::new(&config.obfuscation_patterns)?),
            Box::new(ToneAnalyzer::new(sentiment, thresholds.negative_polarity)),
            Box::new(SyntaxAnalyzer::new(tagger, thresholds.snippet_chars)),
            Box::new(DomainAnalyzer::new(&config.trusted_domains)),
        ];

        log::debug!(
            "Scoring engine ready: {} keywords, {} phrases, {} patterns, {} trusted domains",
            config.keywords.len(),
            config.phrases.len(),
            config.obfuscation_patterns.len(),
            config.trusted_domains.len()
        );

        Ok(Self { config, extractors })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn extractor_names(&self) -> Vec<&str> {
        self.extractors.iter().map(|e| e.name()).collect()
    }

    pub fn evaluate(&self, text: &str) -> Verdict {
        let lower = text.to_lowercase();
        let urls = extract_urls(text);
        let input = EvaluationInput {
            text,
            lower: &lower,
            urls: &urls,
        };

        let mut signals = Vec::new();
        for extractor in &self.extractors {
            match extractor.extract(&input) {
                ExtractorOutcome::Signals(found) => {
                    for signal in &found {
                        log::debug!("{}: {:+} {}", extractor.name(), signal.weight, signal.reason);
                    }
                    signals.extend(found);
                }
                ExtractorOutcome::Failed(reason) => {
                    log::warn!("{} skipped: {}", extractor.name(), reason);
                }
            }
        }

        let verdict = Aggregator::new(&self.config.thresholds).finish(signals);
        log::info!(
            "Evaluated {} chars, {} urls: score {}/10, confidence {}%, detected={}",
            text.chars().count(),
            urls.len(),
            verdict.score,
            verdict.confidence,
            verdict.detected
        );
        verdict
    }
}
