#![allow(clippy::uninlined_format_args)]

use phish_verdict::{PhishingEngine, ScoringConfig};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("Scoring the sample email set...");
    println!();

    let samples = [
        (
            "Safe Email",
            "Hi Robair, just checking in to see how you’re doing. Talk soon.",
        ),
        (
            "Obvious Phishing",
            "Your account has been suspended! Click here to verify immediately: http://bit.ly/secure-login",
        ),
        (
            "Multilingual Phishing",
            "Votre compte a été suspendu. Cliquez ici pour vérifier: http://bit.ly/verifiez",
        ),
        (
            "Tricky Phishing",
            "Let me know if you’re available to hop on for 10 minutes and I’ll send over the details. Talk soon.",
        ),
        (
            "HR Impersonation",
            "This is the HR department. No need to worry, just update your employee record here.",
        ),
        (
            "Trusted Link",
            "Your invoice is ready: https://www.amazon.com/your-orders",
        ),
        (
            "Homoglyph Login",
            "Urgent: l0gin at http://secure123.com/acc0unt to restore access.",
        ),
    ];

    let engine = PhishingEngine::new(ScoringConfig::default())?;

    for (label, content) in &samples {
        let verdict = engine.evaluate(content);
        let status = if verdict.detected { "PHISHING" } else { "SAFE" };
        println!(
            "[{}] ➜ {} (score {}/10, confidence {}%)",
            label, status, verdict.score, verdict.confidence
        );
        for reason in &verdict.reasons {
            println!("    - {}", reason);
        }
    }

    Ok(())
}
