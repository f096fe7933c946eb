use serde::{Deserialize, Serialize};

use crate::modules::movie_info::MovieInfo;
use crate::modules::review::Review;

/// A movie's metadata together with its reviews, assembled per request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub movie_info: MovieInfo,
    #[serde(default)]
    pub review_list: Vec<Review>,
}

impl Movie {
    pub fn new(movie_info: MovieInfo, review_list: Vec<Review>) -> Self {
        Self {
            movie_info,
            review_list,
        }
    }

    pub fn review_count(&self) -> usize {
        self.review_list.len()
    }
}
