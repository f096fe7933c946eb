use async_trait::async_trait;

use super::movie_info::MovieInfo;
use crate::shared::errors::AppResult;

#[async_trait]
pub trait MovieInfoRepository: Send + Sync {
    /// Inserts or replaces; assigns an id when the record has none
    async fn save(&self, movie_info: MovieInfo) -> AppResult<MovieInfo>;
    async fn find_by_id(&self, id: &str) -> AppResult<Option<MovieInfo>>;
    /// All records in insertion order
    async fn find_all(&self) -> AppResult<Vec<MovieInfo>>;
    async fn find_by_year(&self, year: i32) -> AppResult<Vec<MovieInfo>>;
    async fn find_by_name(&self, name: &str) -> AppResult<Option<MovieInfo>>;
    /// Returns whether a record was removed
    async fn delete(&self, id: &str) -> AppResult<bool>;
}
