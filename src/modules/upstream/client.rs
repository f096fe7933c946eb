//! HTTP client for one upstream service with per-attempt timeout,
//! optional rate limiting and fixed-delay retry on server-side failures.

use governor::{Quota, RateLimiter as GovernorRateLimiter};
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::num::NonZeroU32;
use std::time::{Duration, Instant};
use tracing::debug;

use super::classifier::{classify_status, classify_transport, TransportFailure};
use super::config::UpstreamConfig;
use crate::shared::errors::{ApiError, ApiResult, AppError, AppResult, Upstream};
use crate::shared::utils::LogContext;

type DirectRateLimiter = GovernorRateLimiter<
    governor::state::direct::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
    governor::middleware::NoOpMiddleware,
>;

const USER_AGENT: &str = "movies-gateway/0.1";

pub struct UpstreamClient {
    client: Client,
    config: UpstreamConfig,
    rate_limiter: Option<DirectRateLimiter>,
}

impl UpstreamClient {
    pub fn new(config: UpstreamConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                AppError::InternalError(format!(
                    "Failed to create HTTP client for {}: {}",
                    config.upstream, e
                ))
            })?;

        let rate_limiter = config
            .rate_limit_per_second
            .map(Self::create_rate_limiter)
            .transpose()?;

        Ok(Self {
            client,
            config,
            rate_limiter,
        })
    }

    fn create_rate_limiter(requests_per_second: f64) -> AppResult<DirectRateLimiter> {
        let invalid = || {
            AppError::InvalidInput(format!(
                "Unusable rate limit of {} requests per second",
                requests_per_second
            ))
        };
        if !requests_per_second.is_finite() || requests_per_second <= 0.0 {
            return Err(invalid());
        }
        let period =
            Duration::try_from_secs_f64(1.0 / requests_per_second).map_err(|_| invalid())?;
        let quota = Quota::with_period(period)
            .ok_or_else(invalid)?
            .allow_burst(NonZeroU32::MIN);
        Ok(GovernorRateLimiter::direct(quota))
    }

    pub fn upstream(&self) -> Upstream {
        self.config.upstream
    }

    pub fn config(&self) -> &UpstreamConfig {
        &self.config
    }

    /// `GET {base}/{id}`. NotFound is returned as an error and never retried.
    pub async fn fetch_one<T>(&self, id: &str) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}/{}", self.config.base(), urlencoding::encode(id));
        let url = url.as_str();
        self.config
            .retry
            .execute(|| self.get_json::<T>(url, None, id), ApiError::is_retryable)
            .await
    }

    /// `GET {base}?{filter_key}={value}`. A NotFound answer means an empty list.
    pub async fn fetch_many<T>(&self, filter_key: &str, value: &str) -> ApiResult<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let url = self.config.base();
        let outcome = self
            .config
            .retry
            .execute(
                || self.get_json::<Vec<T>>(url, Some((filter_key, value)), value),
                ApiError::is_retryable,
            )
            .await;

        match outcome {
            Err(err) if err.is_not_found() => {
                debug!(upstream = %self.config.upstream, value, "no records, treating as empty");
                Ok(Vec::new())
            }
            other => other,
        }
    }

    /// One attempt: send, classify the status, decode the body
    async fn get_json<T>(&self, url: &str, query: Option<(&str, &str)>, target: &str) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        let upstream = self.config.upstream;
        let upstream_name = upstream.to_string();

        if let Some(limiter) = &self.rate_limiter {
            limiter.until_ready().await;
        }

        let mut request = self.client.get(url).header(ACCEPT, "application/json");
        if let Some(pair) = query {
            request = request.query(&[pair]);
        }

        LogContext::api_call(&upstream_name, url, "", None);
        let started = Instant::now();

        let response = request
            .send()
            .await
            .map_err(|e| classify_transport(upstream, target, TransportFailure::from(&e)))?;

        let status = response.status();
        LogContext::api_call(
            &upstream_name,
            url,
            status.as_str(),
            Some(started.elapsed().as_millis() as u64),
        );

        if !status.is_success() {
            // Error bodies are plain text; an unreadable body still classifies by status
            let body = response.text().await.unwrap_or_default();
            return Err(classify_status(upstream, target, status.as_u16(), &body));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| classify_transport(upstream, target, TransportFailure::from(&e)))?;

        serde_json::from_slice(&bytes).map_err(|e| {
            classify_transport(upstream, target, TransportFailure::Decode(e.to_string()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation_without_rate_limit() {
        let client = UpstreamClient::new(UpstreamConfig::new(
            Upstream::MoviesInfo,
            "http://localhost:1/v1/movieinfos/",
        ))
        .unwrap();
        assert_eq!(client.upstream(), Upstream::MoviesInfo);
        assert_eq!(client.config().base(), "http://localhost:1/v1/movieinfos");
        assert!(client.rate_limiter.is_none());
    }

    #[test]
    fn rate_limiter_is_built_for_positive_rate() {
        assert!(UpstreamClient::create_rate_limiter(2.0).is_ok());
        assert!(UpstreamClient::create_rate_limiter(0.0).is_err());
        assert!(UpstreamClient::create_rate_limiter(f64::NAN).is_err());
        assert!(UpstreamClient::create_rate_limiter(f64::INFINITY).is_err());
    }

    #[test]
    fn unrepresentable_rate_is_an_error_not_a_panic() {
        let config = UpstreamConfig::new(Upstream::MoviesInfo, "http://localhost:1/v1/movieinfos")
            .with_rate_limit(1e-300);
        assert!(matches!(
            UpstreamClient::new(config),
            Err(AppError::InvalidInput(_))
        ));

        let config = UpstreamConfig::new(Upstream::Reviews, "http://localhost:1/v1/reviews")
            .with_rate_limit(1e300);
        assert!(UpstreamClient::new(config).is_err());
    }
}
