use super::{EvaluationInput, ExtractorOutcome, Signal, SignalExtractor, SignalKind};
use crate::domain_utils::DomainUtils;

const TRUSTED_WEIGHT: i32 = -3;
const UNRECOGNIZED_WEIGHT: i32 = 2;
const SUSPICIOUS_FORMAT_WEIGHT: i32 = 2;

/// Reputation of every linked host. Trust and host shape are judged
/// separately and both adjustments apply.
pub struct DomainAnalyzer {
    trusted_domains: Vec<String>,
}

impl DomainAnalyzer {
    pub fn new(trusted_domains: &[String]) -> Self {
        Self {
            trusted_domains: trusted_domains.iter().map(|d| d.to_lowercase()).collect(),
        }
    }

    fn analyze_url(&self, url: &str) -> Vec<Signal> {
        let host = DomainUtils::extract_host(url);
        let mut signals = Vec::new();

        if DomainUtils::has_trusted_suffix(&host, &self.trusted_domains) {
            signals.push(Signal::new(
                SignalKind::TrustedDomain,
                TRUSTED_WEIGHT,
                format!("✅ Trusted domain detected: {}", host),
            ));
        } else {
            signals.push(Signal::new(
                SignalKind::UnrecognizedDomain,
                UNRECOGNIZED_WEIGHT,
                format!("❌ Unrecognized domain: {}", host),
            ));
        }

        if DomainUtils::has_suspicious_shape(&host) {
            signals.push(Signal::new(
                SignalKind::SuspiciousDomainFormat,
                SUSPICIOUS_FORMAT_WEIGHT,
                format!("❗ Suspicious domain format: {}", host),
            ));
        }

        signals
    }
}

impl SignalExtractor for DomainAnalyzer {
    fn name(&self) -> &str {
        "Domain Analyzer"
    }

    fn extract(&self, input: &EvaluationInput<'_>) -> ExtractorOutcome {
        let signals = input
            .urls
            .iter()
            .flat_map(|url| self.analyze_url(url))
            .collect();
        ExtractorOutcome::Signals(signals)
    }
}
