pub mod modules;
pub mod shared;

use anyhow::Context;
use modules::{
    broadcast::BroadcastHub,
    movie::MovieAggregator,
    movie_info::{InMemoryMovieInfoRepository, MovieInfo, MovieInfoService},
    review::{InMemoryReviewRepository, Review, ReviewService},
    upstream::UpstreamClient,
};
use shared::errors::AppResult;
use shared::utils::{init_logger, init_tracing};
use shared::AppConfig;
use std::sync::Arc;

/// Everything a routing layer needs, wired once at startup
pub struct AppState {
    pub movie_info_service: Arc<MovieInfoService>,
    pub review_service: Arc<ReviewService>,
    pub movie_aggregator: Arc<MovieAggregator>,
    pub movie_info_hub: Arc<BroadcastHub<MovieInfo>>,
    pub review_hub: Arc<BroadcastHub<Review>>,
}

impl AppState {
    pub fn initialize(config: &AppConfig) -> AppResult<Self> {
        // One hub per record stream, both with the configured policy
        let movie_info_hub = Arc::new(BroadcastHub::new("movie-info", config.stream_policy));
        let review_hub = Arc::new(BroadcastHub::new("review", config.stream_policy));

        let movie_info_service = Arc::new(MovieInfoService::new(
            Arc::new(InMemoryMovieInfoRepository::new()),
            movie_info_hub.clone(),
        ));
        let review_service = Arc::new(ReviewService::new(
            Arc::new(InMemoryReviewRepository::new()),
            review_hub.clone(),
        ));

        let movie_info_client = Arc::new(UpstreamClient::new(config.movie_info.clone())?);
        let review_client = Arc::new(UpstreamClient::new(config.reviews.clone())?);
        let movie_aggregator = Arc::new(MovieAggregator::new(movie_info_client, review_client));

        log::info!(
            "Gateway ready: movie info at {}, reviews at {}, streams {}",
            config.movie_info.base(),
            config.reviews.base(),
            config.stream_policy.name()
        );

        Ok(Self {
            movie_info_service,
            review_service,
            movie_aggregator,
            movie_info_hub,
            review_hub,
        })
    }

    /// Closes both record streams. Subscribers drain what was queued, then end.
    pub fn shutdown(&self) {
        self.movie_info_hub.close();
        self.review_hub.close();
        log::info!("Record streams closed");
    }
}

pub fn run() -> anyhow::Result<AppState> {
    init_logger();
    init_tracing();

    let config = AppConfig::from_env().context("Failed to load configuration")?;
    AppState::initialize(&config).context("Failed to initialize application state")
}
