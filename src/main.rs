use clap::{Arg, Command};
use log::LevelFilter;
use phish_verdict::capabilities::Translator;
use phish_verdict::detection_log::DetectionLog;
use phish_verdict::extract::extract_text_from_file;
use phish_verdict::link_scanner::{LinkCheck, LinkScanner};
use phish_verdict::nlp::PassthroughTranslator;
use phish_verdict::{extract_urls, PhishingEngine, ScoringConfig, Verdict};
use serde::Serialize;
use std::io::Read;
use std::process;

#[derive(Serialize)]
struct Report<'a> {
    source: &'a str,
    rule_based: &'a Verdict,
    urls: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    link_checks: Option<&'a [LinkCheck]>,
}

#[tokio::main]
async fn main() {
    let matches = Command::new("phish-verdict")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Explainable rule-based phishing risk scoring for email text")
        .arg(
            Arg::new("file")
                .value_name("FILE")
                .help("Email to analyze (.txt or .eml); reads stdin when omitted"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Scoring table (YAML); built-in defaults when omitted"),
        )
        .arg(
            Arg::new("generate-config")
                .long("generate-config")
                .value_name("FILE")
                .help("Write the built-in scoring table to FILE and exit")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("test-config")
                .long("test-config")
                .help("Validate the scoring table, compile its patterns and exit")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the verdict as JSON")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("check-links")
                .long("check-links")
                .help("Probe every extracted URL with an HTTP HEAD request")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .value_name("FILE")
                .help("Append the evaluated text and its label to FILE")
                .action(clap::ArgAction::Set),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable debug logging, including every contributing signal")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let log_level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    if let Some(generate_path) = matches.get_one::<String>("generate-config") {
        generate_default_config(generate_path);
        return;
    }

    let config = match load_config(matches.get_one::<String>("config")) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            process::exit(1);
        }
    };

    let engine = match PhishingEngine::new(config) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("❌ Configuration validation failed:");
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    if matches.get_flag("test-config") {
        let config = engine.config();
        println!("🔍 Testing configuration...");
        println!("  Keywords: {}", config.keywords.len());
        println!("  Social engineering phrases: {}", config.phrases.len());
        println!("  Obfuscation patterns: {}", config.obfuscation_patterns.len());
        println!("  Trusted domains: {}", config.trusted_domains.len());
        println!("  Checks (in run order): {}", engine.extractor_names().join(" → "));
        println!("All regex patterns compiled successfully.");
        return;
    }

    let json = matches.get_flag("json");
    let file = matches.get_one::<String>("file");

    if !json {
        println!("{}", "=".repeat(43));
        println!("     🛡️  PHISH VERDICT (v{})", env!("CARGO_PKG_VERSION"));
        println!("{}", "=".repeat(43));
    }

    let raw = match file {
        Some(path) => {
            if !json {
                println!("\n📂 File provided: {path}");
            }
            match extract_text_from_file(path) {
                Ok(text) => text,
                Err(e) => {
                    eprintln!("\n❌ Failed to extract email content: {e}");
                    process::exit(1);
                }
            }
        }
        None => {
            if !json {
                println!("\n📩 Enter the email content to analyze (end with Ctrl-D):");
            }
            let mut buffer = String::new();
            if let Err(e) = std::io::stdin().read_to_string(&mut buffer) {
                eprintln!("❌ Failed to read standard input: {e}");
                process::exit(1);
            }
            buffer
        }
    };

    let text = match PassthroughTranslator.to_english(&raw) {
        Ok(translated) => translated,
        Err(e) => {
            log::warn!("Translation failed: {e}");
            raw
        }
    };

    let verdict = engine.evaluate(&text);
    let urls = extract_urls(&text);

    let link_checks = if matches.get_flag("check-links") && !urls.is_empty() {
        match LinkScanner::new() {
            Ok(scanner) => Some(scanner.check_all(&urls).await),
            Err(e) => {
                log::warn!("Link scanner unavailable: {e}");
                None
            }
        }
    } else {
        None
    };

    if let Some(log_path) = matches.get_one::<String>("log-file") {
        let detection_log = DetectionLog::new(log_path);
        if let Err(e) = detection_log.record(file.map(String::as_str), &text, &verdict) {
            log::warn!("Failed to write detection log: {e}");
        }
    }

    if json {
        let report = Report {
            source: file.map(String::as_str).unwrap_or("Console Input"),
            rule_based: &verdict,
            urls: &urls,
            link_checks: link_checks.as_deref(),
        };
        match serde_json::to_string_pretty(&report) {
            Ok(out) => println!("{out}"),
            Err(e) => {
                eprintln!("❌ Failed to serialize verdict: {e}");
                process::exit(1);
            }
        }
        return;
    }

    print_report(&verdict, &urls, link_checks.as_deref());
}

fn print_report(verdict: &Verdict, urls: &[String], link_checks: Option<&[LinkCheck]>) {
    println!("\n🧠 Rule-Based Detection:");
    if verdict.detected {
        println!("⚠️ This email is likely a PHISHING attempt.");
        println!(
            "   Threat Score: {}/10, Confidence: {}%",
            verdict.score, verdict.confidence
        );
    } else {
        println!("✅ This email appears safe (Confidence: {}%).", verdict.confidence);
    }

    println!("\n🧠 Reasoning:");
    for reason in &verdict.reasons {
        println!("- {reason}");
    }

    if urls.is_empty() {
        println!("\n✅ No URLs found in the email.");
        return;
    }

    println!("\n🔗 URLs Found:");
    match link_checks {
        Some(checks) => {
            for check in checks {
                println!("- {} {}", check.url, check.status.label());
            }
        }
        None => {
            for url in urls {
                println!("- {url}");
            }
        }
    }
}

fn load_config(path: Option<&String>) -> anyhow::Result<ScoringConfig> {
    match path {
        Some(path) => {
            log::info!("Loading scoring table from {path}");
            ScoringConfig::from_file(path)
        }
        None => Ok(ScoringConfig::default()),
    }
}

fn generate_default_config(path: &str) {
    let config = ScoringConfig::default();
    match config.to_file(path) {
        Ok(()) => {
            println!("Default scoring table written to: {path}");
            println!("Edit it and pass it back with --config.");
        }
        Err(e) => {
            eprintln!("Error writing configuration file: {e}");
            process::exit(1);
        }
    }
}
