use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::shared::errors::AppResult;
use crate::shared::validation::{
    EachNotBlankRule, LowerBoundRule, NotBlankRule, RequiredRule, ValidationChain,
};

pub const NAME_REQUIRED: &str = "movieInfo.name should be present";
pub const YEAR_REQUIRED: &str = "movieInfo.yearReleased shouldnt be null";
pub const YEAR_POSITIVE: &str = "movieInfo.yearReleased must be positive";
pub const CAST_NOT_BLANK: &str = "movie.cast cannot be blank";

/// Separator used when reporting several violations at once
pub const MESSAGE_SEPARATOR: &str = ", ";

/// Movie metadata record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieInfo {
    /// Assigned by the store; absent until persisted
    #[serde(default, alias = "movieId", alias = "id", skip_serializing_if = "Option::is_none")]
    pub movie_info_id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub year_released: Option<i32>,
    #[serde(default)]
    pub cast: Vec<String>,
    #[serde(default, alias = "date_released", skip_serializing_if = "Option::is_none")]
    pub release_date: Option<NaiveDate>,
}

impl MovieInfo {
    pub fn new(name: impl Into<String>, year_released: i32, cast: Vec<String>) -> Self {
        Self {
            movie_info_id: None,
            name: name.into(),
            year_released: Some(year_released),
            cast,
            release_date: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.movie_info_id = Some(id.into());
        self
    }

    pub fn with_release_date(mut self, release_date: NaiveDate) -> Self {
        self.release_date = Some(release_date);
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.movie_info_id.as_deref()
    }

    /// Copies every business field from `other`, keeping this record's id
    pub fn apply_update(&mut self, other: MovieInfo) {
        self.name = other.name;
        self.year_released = other.year_released;
        self.cast = other.cast;
        self.release_date = other.release_date;
    }

    pub fn validation_chain() -> ValidationChain<MovieInfo> {
        ValidationChain::new()
            .add_rule(Arc::new(NotBlankRule::<MovieInfo>::new(NAME_REQUIRED, |m| {
                m.name.as_str()
            })))
            .add_rule(Arc::new(RequiredRule::<MovieInfo>::new(YEAR_REQUIRED, |m| {
                m.year_released.is_some()
            })))
            .add_rule(Arc::new(LowerBoundRule::<MovieInfo>::positive(YEAR_POSITIVE, |m| {
                m.year_released.map(f64::from)
            })))
            .add_rule(Arc::new(EachNotBlankRule::<MovieInfo>::new(CAST_NOT_BLANK, |m| {
                m.cast.as_slice()
            })))
    }

    pub fn validate(&self) -> AppResult<()> {
        Self::validation_chain()
            .validate(self)
            .into_app_result(MESSAGE_SEPARATOR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::errors::AppError;

    #[test]
    fn valid_movie_info_passes() {
        let movie = MovieInfo::new("Batman Begins", 2005, vec!["Christian Bale".into()]);
        assert!(movie.validate().is_ok());
    }

    #[test]
    fn violations_are_sorted_and_joined() {
        let movie = MovieInfo::new("", -2005, vec!["".into(), "Michael Caine".into()]);
        assert_eq!(
            movie.validate(),
            Err(AppError::ValidationError(
                "movie.cast cannot be blank, movieInfo.name should be present, movieInfo.yearReleased must be positive"
                    .to_string()
            ))
        );
    }

    #[test]
    fn missing_year_reports_null_only() {
        let mut movie = MovieInfo::new("Heat", 1995, vec![]);
        movie.year_released = None;
        assert_eq!(
            movie.validate(),
            Err(AppError::ValidationError(YEAR_REQUIRED.to_string()))
        );
    }

    #[test]
    fn accepts_upstream_id_aliases() {
        let movie: MovieInfo =
            serde_json::from_str(r#"{"movieId":"abc","name":"Batman Begins","yearReleased":2005}"#)
                .unwrap();
        assert_eq!(movie.id(), Some("abc"));

        let movie: MovieInfo = serde_json::from_str(r#"{"id":"abc","name":"Batman Begins"}"#).unwrap();
        assert_eq!(movie.id(), Some("abc"));
        assert_eq!(movie.year_released, None);
    }

    #[test]
    fn serializes_camel_case() {
        let movie = MovieInfo::new("Dark Knight", 2008, vec![])
            .with_id("x1")
            .with_release_date(NaiveDate::from_ymd_opt(2008, 7, 18).unwrap());
        let json = serde_json::to_value(&movie).unwrap();
        assert_eq!(json["movieInfoId"], "x1");
        assert_eq!(json["yearReleased"], 2008);
        assert_eq!(json["releaseDate"], "2008-07-18");
    }
}
