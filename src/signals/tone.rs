use super::{EvaluationInput, ExtractorOutcome, Signal, SignalExtractor, SignalKind};
use crate::capabilities::SentimentScorer;
use std::sync::Arc;

const TONE_WEIGHT: i32 = 1;

pub struct ToneAnalyzer {
    scorer: Arc<dyn SentimentScorer>,
    negative_polarity: f64,
}

impl ToneAnalyzer {
    pub fn new(scorer: Arc<dyn SentimentScorer>, negative_polarity: f64) -> Self {
        Self {
            scorer,
            negative_polarity,
        }
    }
}

impl SignalExtractor for ToneAnalyzer {
    fn name(&self) -> &str {
        "Tone Analyzer"
    }

    fn extract(&self, input: &EvaluationInput<'_>) -> ExtractorOutcome {
        let polarity = match self.scorer.polarity(input.text) {
            Ok(polarity) => polarity,
            Err(e) => return ExtractorOutcome::Failed(format!("Sentiment analysis failed: {e}")),
        };

        if polarity < self.negative_polarity {
            ExtractorOutcome::Signals(vec![Signal::new(
                SignalKind::Tone,
                TONE_WEIGHT,
                format!("Negative tone (polarity={:.2})", polarity),
            )])
        } else {
            ExtractorOutcome::Signals(Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedPolarity(f64);

    impl SentimentScorer for FixedPolarity {
        fn polarity(&self, _text: &str) -> anyhow::Result<f64> {
            Ok(self.0)
        }
    }

    struct Unavailable;

    impl SentimentScorer for Unavailable {
        fn polarity(&self, _text: &str) -> anyhow::Result<f64> {
            Err(anyhow::anyhow!("model not loaded"))
        }
    }

    fn run(analyzer: &ToneAnalyzer) -> ExtractorOutcome {
        let input = EvaluationInput {
            text: "whatever",
            lower: "whatever",
            urls: &[],
        };
        analyzer.extract(&input)
    }

    #[test]
    fn test_negative_tone_fires() {
        let analyzer = ToneAnalyzer::new(Arc::new(FixedPolarity(-0.456)), -0.3);
        let signals = run(&analyzer).into_signals();
        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].weight, 1);
        assert_eq!(signals[0].reason, "Negative tone (polarity=-0.46)");
    }

    #[test]
    fn test_threshold_is_strict() {
        let analyzer = ToneAnalyzer::new(Arc::new(FixedPolarity(-0.3)), -0.3);
        assert_eq!(run(&analyzer), ExtractorOutcome::Signals(Vec::new()));
    }

    #[test]
    fn test_scorer_failure_is_isolated() {
        let analyzer = ToneAnalyzer::new(Arc::new(Unavailable), -0.3);
        match run(&analyzer) {
            ExtractorOutcome::Failed(reason) => assert!(reason.contains("model not loaded")),
            other => panic!("Expected failure outcome, got {:?}", other),
        }
    }
}
