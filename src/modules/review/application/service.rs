use std::sync::Arc;

use crate::modules::broadcast::{RecordFeed, Subscription};
use crate::modules::review::domain::review::MESSAGE_SEPARATOR;
use crate::modules::review::domain::{Review, ReviewRepository};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::validation::ValidationChain;
use crate::{log_debug, log_error, log_warn};

pub struct ReviewService {
    repository: Arc<dyn ReviewRepository>,
    feed: Arc<dyn RecordFeed<Review>>,
    validation: ValidationChain<Review>,
}

impl ReviewService {
    pub fn new(repository: Arc<dyn ReviewRepository>, feed: Arc<dyn RecordFeed<Review>>) -> Self {
        Self {
            repository,
            feed,
            validation: Review::validation_chain(),
        }
    }

    pub async fn add_review(&self, review: Review) -> AppResult<Review> {
        if let Some(message) = self.validation.validate(&review).message(MESSAGE_SEPARATOR) {
            log_error!("Review constraint violation: {}", message);
            return Err(AppError::ValidationError(message));
        }

        let saved = self.repository.save(review).await?;
        if let Err(e) = self.feed.publish(saved.clone()) {
            log_warn!("Review {:?} stored but not published: {}", saved.review_id, e);
        }
        Ok(saved)
    }

    pub async fn get_reviews(&self) -> AppResult<Vec<Review>> {
        self.repository.find_all().await
    }

    /// Reviews of one movie. An empty result is reported as `NotFound`.
    pub async fn get_reviews_for_movie(&self, movie_info_id: &str) -> AppResult<Vec<Review>> {
        let reviews = self.repository.find_by_movie_info_id(movie_info_id).await?;
        if reviews.is_empty() {
            return Err(AppError::NotFound(format!(
                "Review Not Found for given movieId :{}",
                movie_info_id
            )));
        }
        log_debug!("Found {} review(s) for movie {}", reviews.len(), movie_info_id);
        Ok(reviews)
    }

    pub async fn update_review(&self, id: &str, update: Review) -> AppResult<Review> {
        let mut existing = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| review_not_found(id))?;
        existing.apply_update(update);
        self.repository.save(existing).await
    }

    pub async fn delete_review(&self, id: &str) -> AppResult<()> {
        if self.repository.delete(id).await? {
            Ok(())
        } else {
            Err(review_not_found(id))
        }
    }

    pub fn subscribe(&self) -> AppResult<Subscription<Review>> {
        self.feed.subscribe().map_err(AppError::from)
    }
}

fn review_not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Review Not Found for given review id :{}", id))
}
