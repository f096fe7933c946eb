/// Test helper functions and service builders
use movies_lib::modules::broadcast::BroadcastHub;
use movies_lib::modules::movie::MovieAggregator;
use movies_lib::modules::movie_info::{InMemoryMovieInfoRepository, MovieInfo, MovieInfoService};
use movies_lib::modules::review::{InMemoryReviewRepository, Review, ReviewService};
use movies_lib::modules::upstream::{RetryPolicy, UpstreamClient, UpstreamConfig};
use movies_lib::shared::errors::Upstream;
use movies_lib::shared::utils::init_logger;
use std::sync::Arc;
use std::time::Duration;

pub const MOVIE_INFO_PATH: &str = "/v1/movieinfos";
pub const REVIEW_PATH: &str = "/v1/reviews";

/// Retry delay short enough for tests against a real socket
pub const FAST_RETRY_DELAY: Duration = Duration::from_millis(10);

pub fn fast_retry(max_attempts: u32) -> RetryPolicy {
    RetryPolicy::new(max_attempts, FAST_RETRY_DELAY)
}

pub fn upstream_client(upstream: Upstream, base_url: &str, retry: RetryPolicy) -> UpstreamClient {
    init_logger();
    UpstreamClient::new(
        UpstreamConfig::new(upstream, base_url)
            .with_timeout(Duration::from_secs(2))
            .with_retry(retry),
    )
    .expect("client should build")
}

/// Aggregator wired against a mock server hosting both upstreams
pub fn build_aggregator(server_url: &str, max_attempts: u32) -> MovieAggregator {
    let info = upstream_client(
        Upstream::MoviesInfo,
        &format!("{}{}", server_url, MOVIE_INFO_PATH),
        fast_retry(max_attempts),
    );
    let reviews = upstream_client(
        Upstream::Reviews,
        &format!("{}{}", server_url, REVIEW_PATH),
        fast_retry(max_attempts),
    );
    MovieAggregator::new(Arc::new(info), Arc::new(reviews))
}

pub struct TestServices {
    pub movie_info_service: MovieInfoService,
    pub review_service: ReviewService,
    pub movie_info_hub: Arc<BroadcastHub<MovieInfo>>,
    pub review_hub: Arc<BroadcastHub<Review>>,
}

/// Record services publishing to the given hubs
pub fn build_services(
    movie_info_hub: BroadcastHub<MovieInfo>,
    review_hub: BroadcastHub<Review>,
) -> TestServices {
    init_logger();
    let movie_info_hub = Arc::new(movie_info_hub);
    let review_hub = Arc::new(review_hub);

    TestServices {
        movie_info_service: MovieInfoService::new(
            Arc::new(InMemoryMovieInfoRepository::new()),
            movie_info_hub.clone(),
        ),
        review_service: ReviewService::new(
            Arc::new(InMemoryReviewRepository::new()),
            review_hub.clone(),
        ),
        movie_info_hub,
        review_hub,
    }
}
