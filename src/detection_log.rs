use crate::engine::Verdict;
use anyhow::Context;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Append-only record of evaluated texts and their labels.
pub struct DetectionLog {
    path: PathBuf,
}

impl DetectionLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn record(&self, source: Option<&str>, content: &str, verdict: &Verdict) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create log directory: {}", parent.display())
            })?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open detection log: {}", self.path.display()))?;

        file.write_all(Self::format_entry(source, content, verdict).as_bytes())?;
        log::debug!("Detection recorded in {}", self.path.display());
        Ok(())
    }

    fn format_entry(source: Option<&str>, content: &str, verdict: &Verdict) -> String {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
        let label = if verdict.detected { "PHISHING" } else { "SAFE" };
        format!(
            "[{}] - {} ➜ {}\n{}\n{}\n",
            timestamp,
            source.unwrap_or("Console Input"),
            label,
            content,
            "-".repeat(60)
        )
    }
}
