use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use super::ports::{MovieInfoSource, ReviewSource};
use crate::modules::movie::domain::Movie;
use crate::shared::errors::{ApiError, ApiResult};
use crate::shared::utils::TimedOperation;
use crate::{log_debug, log_warn};

/// Composes a movie from its metadata and its reviews.
///
/// The review lookup needs the movie info's key, so the two calls always run
/// one after the other. Any error from either call is returned unchanged.
pub struct MovieAggregator {
    movie_info: Arc<dyn MovieInfoSource>,
    reviews: Arc<dyn ReviewSource>,
}

impl MovieAggregator {
    pub fn new(movie_info: Arc<dyn MovieInfoSource>, reviews: Arc<dyn ReviewSource>) -> Self {
        Self {
            movie_info,
            reviews,
        }
    }

    pub async fn get_movie(&self, id: &str) -> ApiResult<Movie> {
        if id.trim().is_empty() {
            return Err(ApiError::client_input_invalid(
                "movie id must not be blank",
            ));
        }

        let timer = TimedOperation::new(&format!("get_movie {}", id));

        let movie_info = match self.movie_info.fetch_movie_info(id).await {
            Ok(info) => info,
            Err(e) => {
                log_warn!("Movie info lookup for {} failed: {}", id, e);
                return Err(e);
            }
        };

        let review_key = movie_info.id().unwrap_or(id).to_string();
        let reviews = match self.reviews.fetch_reviews(&review_key).await {
            Ok(reviews) => reviews,
            Err(e) => {
                log_warn!("Review lookup for {} failed: {}", review_key, e);
                return Err(e);
            }
        };

        log_debug!("Movie {} assembled with {} review(s)", id, reviews.len());
        timer.finish_with_info(&format!("{} review(s)", reviews.len()));
        Ok(Movie::new(movie_info, reviews))
    }

    /// Same as [`get_movie`](Self::get_movie), abandoned when `cancel` fires.
    /// In-flight calls and pending retry delays are dropped.
    pub async fn get_movie_until_cancelled(
        &self,
        id: &str,
        cancel: &CancellationToken,
    ) -> Option<ApiResult<Movie>> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                log_debug!("get_movie {} cancelled", id);
                None
            }
            result = self.get_movie(id) => Some(result),
        }
    }
}
