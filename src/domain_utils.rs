use url::Url;

/// Minimal host utilities for URL reputation checks
pub struct DomainUtils;

impl DomainUtils {
    /// Network-location host of a URL, lower-cased.
    ///
    /// Falls back to slicing the authority by hand when the URL does not
    /// parse, so a malformed link still gets a host to judge.
    pub fn extract_host(url: &str) -> String {
        if let Ok(parsed) = Url::parse(url) {
            if let Some(host) = parsed.host_str() {
                return host.to_lowercase();
            }
        }
        Self::authority_host(url)
    }

    fn authority_host(url: &str) -> String {
        let rest = url.split_once("://").map(|(_, r)| r).unwrap_or(url);
        let authority = rest
            .split(|c| c == '/' || c == '?' || c == '#')
            .next()
            .unwrap_or("");
        let host = authority.rsplit('@').next().unwrap_or(authority);
        let host = match host.rfind(':') {
            Some(idx) if !host.ends_with(']') => &host[..idx],
            _ => host,
        };
        host.to_lowercase()
    }

    /// Plain suffix test against the trusted list.
    ///
    /// Not label-aware: "notgoogle.com" ends with "google.com".
    pub fn has_trusted_suffix(host: &str, trusted: &[String]) -> bool {
        trusted.iter().any(|suffix| host.ends_with(suffix.as_str()))
    }

    /// Fewer than two labels, or a digit in the first label.
    pub fn has_suspicious_shape(host: &str) -> bool {
        let labels: Vec<&str> = host.split('.').collect();
        labels.len() < 2 || labels[0].chars().any(|c| c.is_ascii_digit())
    }
}
