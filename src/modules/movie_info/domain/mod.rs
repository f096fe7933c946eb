pub mod movie_info;
pub mod repository;

pub use movie_info::MovieInfo;
pub use repository::MovieInfoRepository;
