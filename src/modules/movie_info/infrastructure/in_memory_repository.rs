use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::movie_info::domain::{MovieInfo, MovieInfoRepository};
use crate::shared::errors::AppResult;
use crate::shared::utils::LogContext;

const COLLECTION: &str = "movie_info";

#[derive(Debug, Clone)]
struct StoredMovieInfo {
    sequence: u64,
    record: MovieInfo,
}

/// Keyed in-memory store. Listing order follows first insertion.
#[derive(Debug, Default, Clone)]
pub struct InMemoryMovieInfoRepository {
    records: Arc<DashMap<String, StoredMovieInfo>>,
    sequence: Arc<AtomicU64>,
}

impl InMemoryMovieInfoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn collect_sorted<F>(&self, filter: F) -> Vec<MovieInfo>
    where
        F: Fn(&MovieInfo) -> bool,
    {
        let mut matches: Vec<(u64, MovieInfo)> = self
            .records
            .iter()
            .filter(|entry| filter(&entry.value().record))
            .map(|entry| (entry.value().sequence, entry.value().record.clone()))
            .collect();
        matches.sort_by_key(|(sequence, _)| *sequence);
        matches.into_iter().map(|(_, record)| record).collect()
    }
}

#[async_trait]
impl MovieInfoRepository for InMemoryMovieInfoRepository {
    async fn save(&self, mut movie_info: MovieInfo) -> AppResult<MovieInfo> {
        let id = match movie_info.movie_info_id.as_deref() {
            Some(id) if !id.trim().is_empty() => id.to_string(),
            _ => Uuid::new_v4().to_string(),
        };
        movie_info.movie_info_id = Some(id.clone());
        LogContext::store_operation("save", COLLECTION, Some(&id));

        // sequence is taken under the shard lock so racing saves of one id agree
        self.records
            .entry(id)
            .and_modify(|stored| stored.record = movie_info.clone())
            .or_insert_with(|| StoredMovieInfo {
                sequence: self.sequence.fetch_add(1, Ordering::Relaxed),
                record: movie_info.clone(),
            });
        Ok(movie_info)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<MovieInfo>> {
        LogContext::store_operation("find_by_id", COLLECTION, Some(id));
        Ok(self.records.get(id).map(|entry| entry.record.clone()))
    }

    async fn find_all(&self) -> AppResult<Vec<MovieInfo>> {
        LogContext::store_operation("find_all", COLLECTION, None);
        Ok(self.collect_sorted(|_| true))
    }

    async fn find_by_year(&self, year: i32) -> AppResult<Vec<MovieInfo>> {
        LogContext::store_operation("find_by_year", COLLECTION, None);
        Ok(self.collect_sorted(|m| m.year_released == Some(year)))
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<MovieInfo>> {
        LogContext::store_operation("find_by_name", COLLECTION, Some(name));
        Ok(self.collect_sorted(|m| m.name == name).into_iter().next())
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        LogContext::store_operation("delete", COLLECTION, Some(id));
        Ok(self.records.remove(id).is_some())
    }
}
