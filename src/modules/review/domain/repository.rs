use async_trait::async_trait;

use super::review::Review;
use crate::shared::errors::AppResult;

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Inserts or replaces; assigns an id when the review has none
    async fn save(&self, review: Review) -> AppResult<Review>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Review>>;
    async fn find_all(&self) -> AppResult<Vec<Review>>;
    async fn find_by_movie_info_id(&self, movie_info_id: &str) -> AppResult<Vec<Review>>;
    async fn delete(&self, id: &str) -> AppResult<bool>;
}
