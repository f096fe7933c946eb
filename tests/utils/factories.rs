/// Test data factories using builder pattern
///
/// Provides records and upstream JSON bodies with sensible defaults
use movies_lib::modules::movie_info::MovieInfo;
use movies_lib::modules::review::Review;
use serde_json::{json, Value};

pub struct MovieInfoFactory {
    id: Option<String>,
    name: String,
    year: Option<i32>,
    cast: Vec<String>,
}

impl Default for MovieInfoFactory {
    fn default() -> Self {
        Self {
            id: None,
            name: "Batman Begins".to_string(),
            year: Some(2005),
            cast: vec!["Christian Bale".to_string(), "Michael Cane".to_string()],
        }
    }
}

impl MovieInfoFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn with_year(mut self, year: Option<i32>) -> Self {
        self.year = year;
        self
    }

    pub fn with_cast(mut self, cast: &[&str]) -> Self {
        self.cast = cast.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn build(self) -> MovieInfo {
        MovieInfo {
            movie_info_id: self.id,
            name: self.name,
            year_released: self.year,
            cast: self.cast,
            release_date: None,
        }
    }

    /// Body as the movie-info service would send it
    pub fn json(self) -> Value {
        json!({
            "movieInfoId": self.id,
            "name": self.name,
            "yearReleased": self.year,
            "cast": self.cast,
            "releaseDate": "2005-06-15"
        })
    }
}

pub struct ReviewFactory {
    id: Option<String>,
    movie_info_id: Option<String>,
    comment: String,
    rating: Option<f64>,
}

impl Default for ReviewFactory {
    fn default() -> Self {
        Self {
            id: None,
            movie_info_id: Some("abc".to_string()),
            comment: "Awesome Movie".to_string(),
            rating: Some(9.0),
        }
    }
}

impl ReviewFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn for_movie(mut self, movie_info_id: Option<&str>) -> Self {
        self.movie_info_id = movie_info_id.map(str::to_string);
        self
    }

    pub fn with_comment(mut self, comment: &str) -> Self {
        self.comment = comment.to_string();
        self
    }

    pub fn with_rating(mut self, rating: Option<f64>) -> Self {
        self.rating = rating;
        self
    }

    pub fn build(self) -> Review {
        Review {
            review_id: self.id,
            movie_info_id: self.movie_info_id,
            comment: Some(self.comment),
            rating: self.rating,
        }
    }

    pub fn json(self) -> Value {
        json!({
            "reviewId": self.id,
            "movieInfoId": self.movie_info_id,
            "comment": self.comment,
            "rating": self.rating
        })
    }
}
