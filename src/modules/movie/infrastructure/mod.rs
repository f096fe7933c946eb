pub mod upstream_sources;

pub use upstream_sources::REVIEW_FILTER_KEY;
