pub mod aggregator;
pub mod ports;

pub use aggregator::MovieAggregator;
pub use ports::{MovieInfoSource, ReviewSource};
