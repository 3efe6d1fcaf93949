pub mod config;
pub mod error;
pub mod scoring;
pub mod session;
pub mod transcript;

// Re-export common error type
pub use error::{Result, TolkError};
