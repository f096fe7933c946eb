pub mod repository;
pub mod review;

pub use repository::ReviewRepository;
pub use review::Review;
