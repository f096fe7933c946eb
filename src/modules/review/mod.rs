pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::ReviewService;
pub use domain::{Review, ReviewRepository};
pub use infrastructure::InMemoryReviewRepository;
