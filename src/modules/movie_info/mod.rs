pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-exports for easy external access
pub use application::MovieInfoService;
pub use domain::{MovieInfo, MovieInfoRepository};
pub use infrastructure::InMemoryMovieInfoRepository;
