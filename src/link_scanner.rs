use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LinkStatus {
    Active,
    Unsafe,
}

impl LinkStatus {
    /// 200 and plain redirects count as reachable; anything else does not.
    pub fn from_status(status: u16) -> Self {
        match status {
            200 | 301 | 302 => LinkStatus::Active,
            _ => LinkStatus::Unsafe,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LinkStatus::Active => "✅ Active",
            LinkStatus::Unsafe => "🚨 Unsafe",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LinkCheck {
    pub url: String,
    pub status: LinkStatus,
}

/// Liveness probe for extracted links. Caller-side only; the scoring engine
/// never touches the network.
pub struct LinkScanner {
    client: Client,
}

impl LinkScanner {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(5))
            .user_agent(concat!("phish-verdict/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self { client })
    }

    pub async fn check(&self, url: &str) -> LinkStatus {
        match self.client.head(url).send().await {
            Ok(response) => LinkStatus::from_status(response.status().as_u16()),
            Err(e) => {
                log::debug!("HEAD {} failed: {}", url, e);
                LinkStatus::Unsafe
            }
        }
    }

    pub async fn check_all(&self, urls: &[String]) -> Vec<LinkCheck> {
        let mut results = Vec::with_capacity(urls.len());
        for url in urls {
            let status = self.check(url).await;
            results.push(LinkCheck {
                url: url.clone(),
                status,
            });
        }
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert_eq!(LinkStatus::from_status(200), LinkStatus::Active);
        assert_eq!(LinkStatus::from_status(301), LinkStatus::Active);
        assert_eq!(LinkStatus::from_status(302), LinkStatus::Active);
        assert_eq!(LinkStatus::from_status(204), LinkStatus::Unsafe);
        assert_eq!(LinkStatus::from_status(307), LinkStatus::Unsafe);
        assert_eq!(LinkStatus::from_status(404), LinkStatus::Unsafe);
        assert_eq!(LinkStatus::from_status(503), LinkStatus::Unsafe);
    }

    #[tokio::test]
    async fn test_unreachable_link_is_unsafe() {
        let scanner = LinkScanner::new().unwrap();
        // port 9 on loopback is closed in any sane test environment
        let results = scanner.check_all(&["http://127.0.0.1:9/".to_string()]).await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].status, LinkStatus::Unsafe);
    }
}
