pub mod config;
pub mod error;
pub mod logger;

// Re-export commonly used types
pub use config::{AppConfig, MAX_MIN_LENGTH};
pub use error::TubesumError;
pub type Result<T> = std::result::Result<T, TubesumError>;
