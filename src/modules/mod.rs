pub mod broadcast; // In-process live record feeds
pub mod movie; // Aggregation of movie info and reviews
pub mod movie_info;
pub mod review;
pub mod upstream; // Outbound HTTP with retry and error classification
