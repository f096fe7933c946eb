use anyhow::{bail, Context, Result};
use std::str::FromStr;
use std::time::Duration;

use crate::modules::broadcast::DeliveryPolicy;
use crate::modules::upstream::{RetryPolicy, UpstreamConfig};
use crate::shared::errors::Upstream;

const DEFAULT_MOVIE_INFO_URL: &str = "http://localhost:8080/v1/movieinfos";
const DEFAULT_MOVIE_REVIEW_URL: &str = "http://localhost:8081/v1/reviews";
const DEFAULT_TIMEOUT_MS: u64 = 5_000;
const DEFAULT_STREAM_CAPACITY: usize = 256;
/// Slowest accepted outbound rate, one request per 1000 s
const MIN_RATE_LIMIT_RPS: f64 = 0.001;

/// Process configuration for the gateway and the record streams
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub movie_info: UpstreamConfig,
    pub reviews: UpstreamConfig,
    pub stream_policy: DeliveryPolicy,
}

impl AppConfig {
    /// Load `.env` (if any) and read configuration from the environment
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let timeout = Duration::from_millis(parse_or(&lookup, "UPSTREAM_TIMEOUT_MS", DEFAULT_TIMEOUT_MS)?);

        let defaults = RetryPolicy::upstream_default();
        let retry = RetryPolicy::new(
            parse_or(&lookup, "UPSTREAM_RETRY_ATTEMPTS", defaults.max_attempts)?,
            Duration::from_millis(parse_or(
                &lookup,
                "UPSTREAM_RETRY_DELAY_MS",
                defaults.fixed_delay.as_millis() as u64,
            )?),
        );

        let rate_limit = match lookup("UPSTREAM_RATE_LIMIT_RPS") {
            Some(raw) => {
                let rps: f64 = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("UPSTREAM_RATE_LIMIT_RPS is not a number: {raw}"))?;
                if !rps.is_finite() || rps < MIN_RATE_LIMIT_RPS {
                    bail!(
                        "UPSTREAM_RATE_LIMIT_RPS must be a finite number of at least {MIN_RATE_LIMIT_RPS}, got {raw}"
                    );
                }
                Some(rps)
            }
            None => None,
        };

        let movie_info = UpstreamConfig {
            upstream: Upstream::MoviesInfo,
            base_url: lookup("MOVIE_INFO_URL").unwrap_or_else(|| DEFAULT_MOVIE_INFO_URL.to_string()),
            timeout,
            retry: retry.clone(),
            rate_limit_per_second: rate_limit,
        };
        let reviews = UpstreamConfig {
            upstream: Upstream::Reviews,
            base_url: lookup("MOVIE_REVIEW_URL")
                .unwrap_or_else(|| DEFAULT_MOVIE_REVIEW_URL.to_string()),
            timeout,
            retry,
            rate_limit_per_second: rate_limit,
        };

        let capacity = parse_or(&lookup, "STREAM_BUFFER_CAPACITY", DEFAULT_STREAM_CAPACITY)?;
        let stream_policy = match lookup("STREAM_POLICY").as_deref().map(str::trim) {
            None | Some("") | Some("replay") => DeliveryPolicy::ReplayAll,
            Some("multicast") => DeliveryPolicy::Multicast { capacity },
            Some("single") => DeliveryPolicy::SingleConsumer,
            Some(other) => bail!("Unknown STREAM_POLICY '{other}', expected replay, multicast or single"),
        };

        Ok(Self {
            movie_info,
            reviews,
            stream_policy,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid value for {key}: {raw}")),
        None => Ok(default),
    }
}
