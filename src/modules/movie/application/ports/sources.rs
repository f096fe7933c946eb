use async_trait::async_trait;

use crate::modules::movie_info::MovieInfo;
use crate::modules::review::Review;
use crate::shared::errors::ApiResult;

/// Where the primary record comes from
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MovieInfoSource: Send + Sync {
    async fn fetch_movie_info(&self, id: &str) -> ApiResult<MovieInfo>;
}

/// Where the dependent records come from. An upstream 404 arrives here as an
/// empty list; every other failure is an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReviewSource: Send + Sync {
    async fn fetch_reviews(&self, movie_info_id: &str) -> ApiResult<Vec<Review>>;
}
