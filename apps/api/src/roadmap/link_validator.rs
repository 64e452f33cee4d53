//! Link Validator: reachability probe for resource URLs.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tokio::sync::Semaphore;
use tracing::debug;

pub const DEFAULT_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_CONCURRENCY: usize = 16;

/// Answers whether a URL currently resolves. Never errors: every failure is `false`.
#[async_trait]
pub trait LinkChecker: Send + Sync {
    async fn is_reachable(&self, url: &str) -> bool;
}

/// HEAD-probe checker. Success iff the final status is in [200, 400).
#[derive(Clone)]
pub struct HttpLinkChecker {
    client: Client,
    timeout: Duration,
}

impl HttpLinkChecker {
    pub fn new(timeout_ms: u64) -> Self {
        Self {
            client: Client::builder()
                .user_agent(concat!("roadmap-link-checker/", env!("CARGO_PKG_VERSION")))
                .build()
                .expect("Failed to build HTTP client"),
            timeout: Duration::from_millis(timeout_ms),
        }
    }
}

impl Default for HttpLinkChecker {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT_MS)
    }
}

/// Caps how many probes are in flight across every caller sharing it.
///
/// A permit is held for the duration of one probe, never across the work a
/// caller does between probes.
#[derive(Clone)]
pub struct BoundedChecker {
    inner: Arc<dyn LinkChecker>,
    limit: Arc<Semaphore>,
}

impl BoundedChecker {
    pub fn new(inner: Arc<dyn LinkChecker>, concurrency: usize) -> Self {
        Self {
            inner,
            limit: Arc::new(Semaphore::new(concurrency.max(1))),
        }
    }
}

#[async_trait]
impl LinkChecker for BoundedChecker {
    async fn is_reachable(&self, url: &str) -> bool {
        // The semaphore is never closed.
        let _permit = self.limit.acquire().await;
        self.inner.is_reachable(url).await
    }
}

/// Only absolute http(s) URLs are worth probing.
fn parse_probe_url(url: &str) -> Option<Url> {
    let parsed = Url::parse(url.trim()).ok()?;
    matches!(parsed.scheme(), "http" | "https").then_some(parsed)
}

fn is_success_status(status: u16) -> bool {
    (200..400).contains(&status)
}

#[async_trait]
impl LinkChecker for HttpLinkChecker {
    async fn is_reachable(&self, url: &str) -> bool {
        let Some(parsed) = parse_probe_url(url) else {
            debug!("Link check skipped, not an http(s) URL: {url:?}");
            return false;
        };

        match self.client.head(parsed).timeout(self.timeout).send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                debug!("Link check {url} -> {status}");
                is_success_status(status)
            }
            Err(e) => {
                debug!("Link check {url} failed: {e}");
                false
            }
        }
    }
}
