use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The configuration table every evaluation reads from.
///
/// Built once at startup (from the defaults or a YAML file), validated, and
/// then shared read-only across all evaluations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub keywords: Vec<KeywordRule>,
    pub phrases: Vec<String>,
    pub obfuscation_patterns: Vec<ObfuscationRule>,
    pub trusted_domains: Vec<String>,
    #[serde(default)]
    pub thresholds: Thresholds,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordRule {
    pub keyword: String,
    #[serde(default)]
    pub class: WeightClass,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightClass {
    High,
    #[default]
    Standard,
}

impl WeightClass {
    pub fn weight(self) -> i32 {
        match self {
            WeightClass::High => 2,
            WeightClass::Standard => 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObfuscationRule {
    pub pattern: String,
    /// A match is discarded when the text right after it matches this
    /// (anchored) expression. Stands in for a negative look-ahead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unless_followed_by: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thresholds {
    pub high_confidence: u8,
    pub medium_confidence: u8,
    pub negative_polarity: f64,
    pub snippet_chars: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            high_confidence: 80,
            medium_confidence: 50,
            negative_polarity: -0.3,
            snippet_chars: 40,
        }
    }
}

const HIGH_RISK_KEYWORDS: &[&str] = &["verify", "login", "password", "reset your password"];

const DEFAULT_KEYWORDS: &[&str] = &[
    "verify",
    "account",
    "password",
    "login",
    "click here",
    "suspended",
    "update",
    "confirm",
    "urgent",
    "security alert",
    "reset your password",
    "bank",
    "limited time",
    "verify identity",
    "suspicious activity",
    "verify your identity",
    "failure to act",
    "account locked",
    "click to claim",
    "click to update",
];

const DEFAULT_PHRASES: &[&str] = &[
    "can you do me a favor",
    "urgent but quick",
    "you’ve been selected",
    "only one who can help",
    "quick task for you",
    "talk soon",
    "grab coffee",
    "hop on a quick call",
    "need your input asap",
    "immediate action required",
    "please respond immediately",
    "time-sensitive",
    "your immediate attention required",
    "act now",
];

const DEFAULT_TRUSTED_DOMAINS: &[&str] = &[
    "linkedin.com",
    "google.com",
    "microsoft.com",
    "apple.com",
    "amazon.com",
    "paypal.com",
    "github.com",
    "irs.gov",
    "usps.com",
    "youtube.com",
];

impl Default for ScoringConfig {
    fn default() -> Self {
        let keywords = DEFAULT_KEYWORDS
            .iter()
            .map(|kw| KeywordRule {
                keyword: kw.to_string(),
                class: if HIGH_RISK_KEYWORDS.contains(kw) {
                    WeightClass::High
                } else {
                    WeightClass::Standard
                },
            })
            .collect();

        let pattern = |p: &str| ObfuscationRule {
            pattern: p.to_string(),
            unless_followed_by: None,
        };

        ScoringConfig {
            keywords,
            phrases: DEFAULT_PHRASES.iter().map(|p| p.to_string()).collect(),
            obfuscation_patterns: vec![
                ObfuscationRule {
                    pattern: r"\bc[1l]ick".to_string(),
                    unless_followed_by: Some(r"\s+below".to_string()),
                },
                pattern(r"\bacc0unt\b"),
                pattern(r"\bl[o0]gin\b"),
                pattern(r"\bp[a@]ssword\b"),
                // plain "verify" is already a high-risk keyword
                pattern(r"\bver1fy\b"),
                pattern(r"\b[0o]pen\s+[cC]lick\b"),
                pattern(r"\b[a1]ctivate\s+your\s+account\b"),
                pattern(r"\b[1l]ogin\b"),
                pattern(r"\b[0o]pen\b"),
                pattern(r"\b[a@]ccount\b"),
                pattern(r"\b[0o]ffer\b"),
            ],
            trusted_domains: DEFAULT_TRUSTED_DOMAINS
                .iter()
                .map(|d| d.to_string())
                .collect(),
            thresholds: Thresholds::default(),
        }
    }
}

impl ScoringConfig {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read configuration '{}': {}", path, e))?;
        let config: ScoringConfig = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_file(&self, path: &str) -> anyhow::Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Structural checks. Regex compilation is checked when the engine is built.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.keywords.is_empty() {
            anyhow::bail!("Keyword table is empty");
        }
        if self.trusted_domains.is_empty() {
            anyhow::bail!("Trusted domain table is empty");
        }

        let mut seen = HashSet::new();
        for rule in &self.keywords {
            let keyword = rule.keyword.trim().to_lowercase();
            if keyword.is_empty() {
                anyhow::bail!("Keyword table contains an empty keyword");
            }
            if !seen.insert(keyword) {
                anyhow::bail!("Duplicate keyword: '{}'", rule.keyword);
            }
        }

        if self.phrases.iter().any(|p| p.trim().is_empty()) {
            anyhow::bail!("Phrase list contains an empty phrase");
        }
        if self
            .obfuscation_patterns
            .iter()
            .any(|p| p.pattern.trim().is_empty())
        {
            anyhow::bail!("Obfuscation pattern list contains an empty pattern");
        }
        if self.trusted_domains.iter().any(|d| d.trim().is_empty()) {
            anyhow::bail!("Trusted domain table contains an empty suffix");
        }

        let t = &self.thresholds;
        if t.high_confidence > 100 || t.medium_confidence > t.high_confidence {
            anyhow::bail!(
                "Invalid confidence thresholds: medium={} high={}",
                t.medium_confidence,
                t.high_confidence
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ScoringConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.keywords.len(), 20);
        assert_eq!(config.phrases.len(), 14);
        assert_eq!(config.obfuscation_patterns.len(), 11);
        assert_eq!(config.trusted_domains.len(), 10);
    }

    #[test]
    fn test_high_risk_weight_classes() {
        let config = ScoringConfig::default();
        let high: Vec<&str> = config
            .keywords
            .iter()
            .filter(|k| k.class == WeightClass::High)
            .map(|k| k.keyword.as_str())
            .collect();
        assert_eq!(high, vec!["verify", "password", "login", "reset your password"]);
        assert_eq!(WeightClass::High.weight(), 2);
        assert_eq!(WeightClass::Standard.weight(), 1);
    }

    #[test]
    fn test_duplicate_keyword_rejected() {
        let mut config = ScoringConfig::default();
        config.keywords.push(KeywordRule {
            keyword: "Bank".to_string(),
            class: WeightClass::Standard,
        });
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("Duplicate keyword"));
    }

    #[test]
    fn test_empty_tables_rejected() {
        let mut config = ScoringConfig::default();
        config.trusted_domains.clear();
        assert!(config.validate().is_err());

        let mut config = ScoringConfig::default();
        config.keywords.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let mut config = ScoringConfig::default();
        config.thresholds.medium_confidence = 90;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_yaml_defaults_for_optional_fields() {
        let yaml = r#"
keywords:
  - keyword: "wire transfer"
  - keyword: "verify"
    class: high
phrases:
  - "act now"
obfuscation_patterns:
  - pattern: "\\bp[a@]ssword\\b"
trusted_domains:
  - "example.org"
"#;
        let config: ScoringConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.keywords[0].class, WeightClass::Standard);
        assert_eq!(config.keywords[1].class, WeightClass::High);
        assert!(config.obfuscation_patterns[0].unless_followed_by.is_none());
        assert_eq!(config.thresholds.medium_confidence, 50);
        assert_eq!(config.thresholds.snippet_chars, 40);
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(ScoringConfig::from_file("/nonexistent/phish-verdict.yaml").is_err());
    }
}
