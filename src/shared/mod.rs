// Shared kernel: cross-module errors, configuration, logging and validation

pub mod config; // Environment-driven configuration
pub mod errors; // Shared error types
pub mod utils; // Logging helpers
pub mod validation; // Request body validation rules

pub use config::AppConfig;
