use std::time::Duration;

use super::retry_policy::RetryPolicy;
use crate::shared::errors::Upstream;

/// Connection settings for one upstream service
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub upstream: Upstream,
    pub base_url: String,
    /// Applies to each attempt separately, not to the whole retry budget
    pub timeout: Duration,
    pub retry: RetryPolicy,
    pub rate_limit_per_second: Option<f64>,
}

impl UpstreamConfig {
    pub fn new(upstream: Upstream, base_url: impl Into<String>) -> Self {
        Self {
            upstream,
            base_url: base_url.into(),
            timeout: Duration::from_secs(5),
            retry: RetryPolicy::upstream_default(),
            rate_limit_per_second: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_rate_limit(mut self, requests_per_second: f64) -> Self {
        self.rate_limit_per_second = Some(requests_per_second);
        self
    }

    /// Base URL without a trailing slash
    pub fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}
