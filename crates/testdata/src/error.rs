//! Error types for test data generation

use thiserror::Error;

/// Result type alias using the test data error
pub type Result<T> = std::result::Result<T, TestDataError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TestDataError {
    #[error("Invalid gender specified: {0}")]
    InvalidGender(String),
}
