use async_trait::async_trait;

use crate::modules::movie::application::ports::{MovieInfoSource, ReviewSource};
use crate::modules::movie_info::MovieInfo;
use crate::modules::review::Review;
use crate::modules::upstream::UpstreamClient;
use crate::shared::errors::ApiResult;

/// Query parameter the review service filters on
pub const REVIEW_FILTER_KEY: &str = "movieInfoId";

#[async_trait]
impl MovieInfoSource for UpstreamClient {
    async fn fetch_movie_info(&self, id: &str) -> ApiResult<MovieInfo> {
        self.fetch_one(id).await
    }
}

#[async_trait]
impl ReviewSource for UpstreamClient {
    async fn fetch_reviews(&self, movie_info_id: &str) -> ApiResult<Vec<Review>> {
        self.fetch_many(REVIEW_FILTER_KEY, movie_info_id).await
    }
}
