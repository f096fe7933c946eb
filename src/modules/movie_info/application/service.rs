use std::sync::Arc;

use crate::modules::broadcast::{RecordFeed, Subscription};
use crate::modules::movie_info::domain::movie_info::MESSAGE_SEPARATOR;
use crate::modules::movie_info::domain::{MovieInfo, MovieInfoRepository};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::LogContext;
use crate::shared::validation::ValidationChain;
use crate::{log_debug, log_info, log_warn};

pub struct MovieInfoService {
    repository: Arc<dyn MovieInfoRepository>,
    feed: Arc<dyn RecordFeed<MovieInfo>>,
    validation: ValidationChain<MovieInfo>,
}

impl MovieInfoService {
    pub fn new(
        repository: Arc<dyn MovieInfoRepository>,
        feed: Arc<dyn RecordFeed<MovieInfo>>,
    ) -> Self {
        Self {
            repository,
            feed,
            validation: MovieInfo::validation_chain(),
        }
    }

    /// Validates, stores and announces a new record. The returned record
    /// always carries its id.
    pub async fn add_movie_info(&self, movie_info: MovieInfo) -> AppResult<MovieInfo> {
        if let Err(e) = self
            .validation
            .validate(&movie_info)
            .into_app_result(MESSAGE_SEPARATOR)
        {
            LogContext::error_with_context(&e, "Rejected movie info");
            return Err(e);
        }

        let saved = self.repository.save(movie_info).await?;

        match self.feed.publish(saved.clone()) {
            Ok(reached) => log_debug!(
                "Published movie info {} to {} queue(s)",
                saved.id().unwrap_or_default(),
                reached
            ),
            Err(e) => log_warn!(
                "Movie info {} stored but not published: {}",
                saved.id().unwrap_or_default(),
                e
            ),
        }

        log_info!("Created movie info '{}'", saved.name);
        Ok(saved)
    }

    pub async fn get_all_movie_infos(&self) -> AppResult<Vec<MovieInfo>> {
        self.repository.find_all().await
    }

    pub async fn get_movie_info_by_id(&self, id: &str) -> AppResult<MovieInfo> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("There is no movie info available for id {}", id)))
    }

    pub async fn find_by_year(&self, year: i32) -> AppResult<Vec<MovieInfo>> {
        log_debug!("Looking up movie infos released in {}", year);
        self.repository.find_by_year(year).await
    }

    pub async fn find_by_name(&self, name: &str) -> AppResult<MovieInfo> {
        self.repository
            .find_by_name(name)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("There is no movie info named {}", name)))
    }

    /// Replaces the business fields of an existing record. Not validated.
    pub async fn update_movie_info(&self, id: &str, update: MovieInfo) -> AppResult<MovieInfo> {
        let mut existing = self.get_movie_info_by_id(id).await?;
        existing.apply_update(update);
        self.repository.save(existing).await
    }

    /// Removing an unknown id is not an error
    pub async fn delete_movie_info(&self, id: &str) -> AppResult<()> {
        if !self.repository.delete(id).await? {
            log_debug!("Delete of unknown movie info {} ignored", id);
        }
        Ok(())
    }

    /// Live feed of created records, per the hub's delivery policy
    pub fn subscribe(&self) -> AppResult<Subscription<MovieInfo>> {
        Ok(self.feed.subscribe()?)
    }
}
