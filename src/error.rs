//! Error types for the match balancing core
//!
//! This module defines all error types using anyhow for consistent error handling
//! throughout the crate.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Custom error types for specific balancing and rating scenarios
#[derive(Debug, thiserror::Error)]
pub enum BalancingError {
    #[error("Invalid rating value {value}: must be between 400 and 2400")]
    InvalidRating { value: i32 },

    #[error("Invalid roster: {reason}")]
    InvalidRoster { reason: String },

    #[error("K-factor must be positive, got {value}")]
    InvalidKFactor { value: i32 },

    #[error("Result already recorded for match: {match_id}")]
    ResultAlreadyRecorded { match_id: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}
