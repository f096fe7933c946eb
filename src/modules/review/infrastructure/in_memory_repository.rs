use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::review::domain::{Review, ReviewRepository};
use crate::shared::errors::AppResult;
use crate::shared::utils::LogContext;

const COLLECTION: &str = "review";

#[derive(Debug, Default, Clone)]
pub struct InMemoryReviewRepository {
    // id -> (insertion sequence, review)
    reviews: Arc<DashMap<String, (u64, Review)>>,
    next_sequence: Arc<AtomicU64>,
}

impl InMemoryReviewRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.reviews.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reviews.is_empty()
    }

    fn ordered(&self, movie_info_id: Option<&str>) -> Vec<Review> {
        let mut found: Vec<(u64, Review)> = self
            .reviews
            .iter()
            .filter(|entry| match movie_info_id {
                Some(key) => entry.value().1.movie_info_id.as_deref() == Some(key),
                None => true,
            })
            .map(|entry| entry.value().clone())
            .collect();
        found.sort_by_key(|(sequence, _)| *sequence);
        found.into_iter().map(|(_, review)| review).collect()
    }
}

#[async_trait]
impl ReviewRepository for InMemoryReviewRepository {
    async fn save(&self, mut review: Review) -> AppResult<Review> {
        let id = review
            .review_id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        review.review_id = Some(id.clone());
        LogContext::store_operation("save", COLLECTION, Some(&id));

        self.reviews
            .entry(id)
            .and_modify(|(_, stored)| *stored = review.clone())
            .or_insert_with(|| (self.next_sequence.fetch_add(1, Ordering::Relaxed), review.clone()));
        Ok(review)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Review>> {
        Ok(self.reviews.get(id).map(|entry| entry.1.clone()))
    }

    async fn find_all(&self) -> AppResult<Vec<Review>> {
        Ok(self.ordered(None))
    }

    async fn find_by_movie_info_id(&self, movie_info_id: &str) -> AppResult<Vec<Review>> {
        LogContext::store_operation("find_by_movie_info_id", COLLECTION, Some(movie_info_id));
        Ok(self.ordered(Some(movie_info_id)))
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        LogContext::store_operation("delete", COLLECTION, Some(id));
        Ok(self.reviews.remove(id).is_some())
    }
}
