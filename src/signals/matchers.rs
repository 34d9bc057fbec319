use super::{EvaluationInput, ExtractorOutcome, Signal, SignalExtractor, SignalKind};
use crate::config::{KeywordRule, ObfuscationRule};
use regex::Regex;

const PHRASE_WEIGHT: i32 = 2;
const OBFUSCATION_WEIGHT: i32 = 2;

/// Substring containment, so "bank" also fires inside "banking".
pub struct KeywordMatcher {
    keywords: Vec<KeywordRule>,
}

impl KeywordMatcher {
    pub fn new(keywords: &[KeywordRule]) -> Self {
        Self {
            keywords: keywords
                .iter()
                .map(|rule| KeywordRule {
                    keyword: rule.keyword.to_lowercase(),
                    class: rule.class,
                })
                .collect(),
        }
    }
}

impl SignalExtractor for KeywordMatcher {
    fn name(&self) -> &str {
        "Keyword Matcher"
    }

    fn extract(&self, input: &EvaluationInput<'_>) -> ExtractorOutcome {
        let signals = self
            .keywords
            .iter()
            .filter(|rule| input.lower.contains(rule.keyword.as_str()))
            .map(|rule| {
                let weight = rule.class.weight();
                Signal::new(
                    SignalKind::Keyword,
                    weight,
                    format!("Keyword matched: '{}' (weight={})", rule.keyword, weight),
                )
            })
            .collect();
        ExtractorOutcome::Signals(signals)
    }
}

pub struct PhraseMatcher {
    phrases: Vec<String>,
}

impl PhraseMatcher {
    pub fn new(phrases: &[String]) -> Self {
        Self {
            phrases: phrases.iter().map(|p| p.to_lowercase()).collect(),
        }
    }
}

impl SignalExtractor for PhraseMatcher {
    fn name(&self) -> &str {
        "Phrase Matcher"
    }

    fn extract(&self, input: &EvaluationInput<'_>) -> ExtractorOutcome {
        let signals = self
            .phrases
            .iter()
            .filter(|phrase| input.lower.contains(phrase.as_str()))
            .map(|phrase| {
                Signal::new(
                    SignalKind::Phrase,
                    PHRASE_WEIGHT,
                    format!("Social engineering phrase: '{}'", phrase),
                )
            })
            .collect();
        ExtractorOutcome::Signals(signals)
    }
}

struct CompiledPattern {
    source: String,
    regex: Regex,
    unless_followed_by: Option<Regex>,
}

impl CompiledPattern {
    /// First acceptable match only; the exclusion is tested on the text
    /// directly after each candidate.
    fn is_match(&self, text: &str) -> bool {
        match &self.unless_followed_by {
            None => self.regex.is_match(text),
            Some(exclusion) => self
                .regex
                .find_iter(text)
                .any(|m| !exclusion.is_match(&text[m.end()..])),
        }
    }
}

/// Regexes for risky words and their digit/letter substitutions ("c1ick", "l0gin", "p@ssword").
pub struct ObfuscationMatcher {
    patterns: Vec<CompiledPattern>,
}

impl ObfuscationMatcher {
    pub fn new(rules: &[ObfuscationRule]) -> anyhow::Result<Self> {
        let mut patterns = Vec::with_capacity(rules.len());

        for rule in rules {
            let regex = Regex::new(&rule.pattern).map_err(|e| {
                anyhow::anyhow!("Invalid regex pattern '{}': {}", rule.pattern, e)
            })?;
            let unless_followed_by = match &rule.unless_followed_by {
                Some(exclusion) => {
                    let anchored = format!("^(?:{})", exclusion);
                    Some(Regex::new(&anchored).map_err(|e| {
                        anyhow::anyhow!("Invalid exclusion pattern '{}': {}", exclusion, e)
                    })?)
                }
                None => None,
            };
            patterns.push(CompiledPattern {
                source: rule.pattern.clone(),
                regex,
                unless_followed_by,
            });
        }

        Ok(Self { patterns })
    }
}

impl SignalExtractor for ObfuscationMatcher {
    fn name(&self) -> &str {
        "Obfuscation Matcher"
    }

    fn extract(&self, input: &EvaluationInput<'_>) -> ExtractorOutcome {
        let signals = self
            .patterns
            .iter()
            .filter(|pattern| pattern.is_match(input.lower))
            .map(|pattern| {
                Signal::new(
                    SignalKind::Obfuscation,
                    OBFUSCATION_WEIGHT,
                    format!("Obfuscation pattern: '{}'", pattern.source),
                )
            })
            .collect();
        ExtractorOutcome::Signals(signals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScoringConfig;

    fn run(extractor: &dyn SignalExtractor, text: &str) -> Vec<Signal> {
        let lower = text.to_lowercase();
        let input = EvaluationInput {
            text,
            lower: &lower,
            urls: &[],
        };
        extractor.extract(&input).into_signals()
    }

    #[test]
    fn test_keyword_weights_and_substring_policy() {
        let config = ScoringConfig::default();
        let matcher = KeywordMatcher::new(&config.keywords);

        let signals = run(&matcher, "Please VERIFY your online banking details");
        let reasons: Vec<&str> = signals.iter().map(|s| s.reason.as_str()).collect();
        assert_eq!(
            reasons,
            vec![
                "Keyword matched: 'verify' (weight=2)",
                "Keyword matched: 'bank' (weight=1)",
            ]
        );
        assert_eq!(signals.iter().map(|s| s.weight).sum::<i32>(), 3);
    }

    #[test]
    fn test_keyword_counted_once() {
        let config = ScoringConfig::default();
        let matcher = KeywordMatcher::new(&config.keywords);
        let signals = run(&matcher, "bank bank bank");
        assert_eq!(signals.len(), 1);
    }

    #[test]
    fn test_overlapping_keywords_each_fire() {
        let config = ScoringConfig::default();
        let matcher = KeywordMatcher::new(&config.keywords);
        let signals = run(&matcher, "reset your password");
        let weights: Vec<i32> = signals.iter().map(|s| s.weight).collect();
        // "password" then "reset your password", in table order
        assert_eq!(weights, vec![2, 2]);
    }

    #[test]
    fn test_phrase_matcher() {
        let config = ScoringConfig::default();
        let matcher = PhraseMatcher::new(&config.phrases);
        let signals = run(&matcher, "IMMEDIATE ACTION REQUIRED. Talk soon, talk soon.");
        assert_eq!(signals.len(), 2);
        assert_eq!(signals[0].reason, "Social engineering phrase: 'talk soon'");
        assert_eq!(
            signals[1].reason,
            "Social engineering phrase: 'immediate action required'"
        );
        assert!(signals.iter().all(|s| s.weight == 2));
    }

    #[test]
    fn test_obfuscation_homoglyphs() {
        let config = ScoringConfig::default();
        let matcher = ObfuscationMatcher::new(&config.obfuscation_patterns).unwrap();

        let signals = run(&matcher, "Please l0gin and c1ick to update your p@ssword");
        let patterns: Vec<&str> = signals.iter().map(|s| s.reason.as_str()).collect();
        assert_eq!(
            patterns,
            vec![
                r"Obfuscation pattern: '\bc[1l]ick'",
                r"Obfuscation pattern: '\bl[o0]gin\b'",
                r"Obfuscation pattern: '\bp[a@]ssword\b'",
            ]
        );
    }

    #[test]
    fn test_click_below_is_excluded() {
        let config = ScoringConfig::default();
        let matcher = ObfuscationMatcher::new(&config.obfuscation_patterns).unwrap();

        assert!(run(&matcher, "see the chart and click below").is_empty());
        assert!(run(&matcher, "see the chart and c1ick  below").is_empty());
        // a later occurrence still counts
        let signals = run(&matcher, "click below, or just click");
        assert_eq!(signals.len(), 1);
    }

    #[test]
    fn test_plain_spellings_match() {
        let config = ScoringConfig::default();
        let matcher = ObfuscationMatcher::new(&config.obfuscation_patterns).unwrap();

        let signals = run(&matcher, "Open the offer to update your password");
        let patterns: Vec<&str> = signals.iter().map(|s| s.reason.as_str()).collect();
        assert_eq!(
            patterns,
            vec![
                r"Obfuscation pattern: '\bp[a@]ssword\b'",
                r"Obfuscation pattern: '\b[0o]pen\b'",
                r"Obfuscation pattern: '\b[0o]ffer\b'",
            ]
        );
    }

    #[test]
    fn test_plain_verify_is_left_to_keywords() {
        let config = ScoringConfig::default();
        let matcher = ObfuscationMatcher::new(&config.obfuscation_patterns).unwrap();

        assert!(run(&matcher, "please verify").is_empty());
        let signals = run(&matcher, "please ver1fy");
        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].reason, r"Obfuscation pattern: '\bver1fy\b'");
    }

    #[test]
    fn test_invalid_pattern_is_error() {
        let rules = vec![ObfuscationRule {
            pattern: "(unclosed".to_string(),
            unless_followed_by: None,
        }];
        let err = ObfuscationMatcher::new(&rules).err().unwrap();
        assert!(err.to_string().contains("Invalid regex pattern"));
    }
}
