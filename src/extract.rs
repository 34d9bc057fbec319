use anyhow::Context;
use std::collections::HashMap;
use std::path::Path;

/// Parsed pieces of an RFC 5322 message file.
#[derive(Debug, Default, Clone)]
pub struct EmailFile {
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl EmailFile {
    pub fn parse(raw: &str) -> Self {
        let mut headers: HashMap<String, String> = HashMap::new();
        let mut body = String::new();
        let mut in_headers = true;
        let mut last_header_key: Option<String> = None;

        for line in raw.lines() {
            if !in_headers {
                body.push_str(line);
                body.push('\n');
                continue;
            }

            if line.trim().is_empty() {
                in_headers = false;
                continue;
            }

            if line.starts_with(' ') || line.starts_with('\t') {
                // folded header line
                if let Some(existing) = last_header_key.as_ref().and_then(|k| headers.get_mut(k)) {
                    existing.push(' ');
                    existing.push_str(line.trim());
                }
                continue;
            }

            match line.split_once(':') {
                Some((key, value)) => {
                    let key = key.trim().to_lowercase();
                    let value = value.trim().to_string();
                    last_header_key = Some(key.clone());
                    headers
                        .entry(key)
                        .and_modify(|existing| {
                            existing.push(' ');
                            existing.push_str(&value);
                        })
                        .or_insert(value);
                }
                None => {
                    // not a header block after all
                    in_headers = false;
                    body.push_str(line);
                    body.push('\n');
                }
            }
        }

        Self { headers, body }
    }

    pub fn subject(&self) -> Option<&str> {
        self.headers.get("subject").map(String::as_str)
    }

    pub fn from(&self) -> Option<&str> {
        self.headers.get("from").map(String::as_str)
    }

    /// Subject and body, the part worth scoring.
    pub fn scoring_text(&self) -> String {
        match self.subject() {
            Some(subject) if !subject.is_empty() => format!("{}\n\n{}", subject, self.body),
            _ => self.body.clone(),
        }
    }
}

/// Plain text for a `.txt` or `.eml` file. Bytes that are not UTF-8 are
/// replaced rather than rejected.
pub fn extract_text_from_file(path: &str) -> anyhow::Result<String> {
    let extension = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "txt" => {
            let bytes = std::fs::read(path).with_context(|| format!("Failed to read {path}"))?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
        "eml" => {
            let bytes = std::fs::read(path).with_context(|| format!("Failed to read {path}"))?;
            let email = EmailFile::parse(&String::from_utf8_lossy(&bytes));
            log::debug!(
                "Parsed {}: from={:?} subject={:?}",
                path,
                email.from(),
                email.subject()
            );
            Ok(email.scoring_text())
        }
        other => anyhow::bail!("Unsupported file type: '{}' ({})", other, path),
    }
}
