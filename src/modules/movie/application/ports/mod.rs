pub mod sources;

pub use sources::{MovieInfoSource, ReviewSource};

#[cfg(test)]
pub use sources::{MockMovieInfoSource, MockReviewSource};
