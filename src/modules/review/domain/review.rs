use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::shared::errors::AppResult;
use crate::shared::validation::{LowerBoundRule, RequiredRule, ValidationChain};

pub const MOVIE_INFO_ID_REQUIRED: &str = "review.movieInfoId must not be null";
pub const RATING_NON_NEGATIVE: &str = "rating.negative : please pass a non-negative value";

/// Review violations are joined without padding
pub const MESSAGE_SEPARATOR: &str = ",";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_id: Option<String>,
    #[serde(default)]
    pub movie_info_id: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
}

impl Review {
    pub fn new(movie_info_id: impl Into<String>, comment: impl Into<String>, rating: f64) -> Self {
        Self {
            review_id: None,
            movie_info_id: Some(movie_info_id.into()),
            comment: Some(comment.into()),
            rating: Some(rating),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.review_id = Some(id.into());
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.review_id.as_deref()
    }

    /// Copies comment, rating and movie reference from `other`
    pub fn apply_update(&mut self, other: Review) {
        self.comment = other.comment;
        self.rating = other.rating;
        self.movie_info_id = other.movie_info_id;
    }

    pub fn validation_chain() -> ValidationChain<Review> {
        ValidationChain::new()
            .add_rule(Arc::new(RequiredRule::<Review>::new(
                MOVIE_INFO_ID_REQUIRED,
                |r| r.movie_info_id.is_some(),
            )))
            .add_rule(Arc::new(LowerBoundRule::<Review>::non_negative(
                RATING_NON_NEGATIVE,
                |r| r.rating,
            )))
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
    fn both_violations_sorted_without_padding() {
        let review = Review {
            review_id: None,
            movie_info_id: None,
            comment: Some("Awesome Movie".to_string()),
            rating: Some(-9.0),
        };

        assert_eq!(
            review.validate(),
            Err(AppError::ValidationError(
                "rating.negative : please pass a non-negative value,review.movieInfoId must not be null"
                    .to_string()
            ))
        );
    }

    #[test]
    fn zero_rating_is_allowed() {
        assert!(Review::new("1", "Meh", 0.0).validate().is_ok());
    }

    #[test]
    fn deserializes_camel_case_body() {
        let review: Review =
            serde_json::from_str(r#"{"reviewId":"r1","movieInfoId":"1","comment":"Excellent Movie","rating":8.0}"#)
                .unwrap();
        assert_eq!(review, Review::new("1", "Excellent Movie", 8.0).with_id("r1"));
    }
}
