//! Outbound calls to the movie-info and review services.

pub mod classifier;
pub mod client;
pub mod config;
pub mod retry_policy;

pub use classifier::{classify_status, classify_transport, TransportFailure};
pub use client::UpstreamClient;
pub use config::UpstreamConfig;
pub use retry_policy::RetryPolicy;
