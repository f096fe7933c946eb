pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::{MovieAggregator, MovieInfoSource, ReviewSource};
pub use domain::Movie;
