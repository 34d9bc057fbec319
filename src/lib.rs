pub mod capabilities;
pub mod config;
pub mod detection_log;
pub mod domain_utils;
pub mod engine;
pub mod extract;
pub mod language;
pub mod link_scanner;
pub mod nlp;
pub mod signals;
pub mod urls;

pub use config::ScoringConfig;
pub use engine::{PhishingEngine, Verdict};
pub use urls::extract_urls;
