//! Locker Room - team balancing and rating core for five-a-side football
//!
//! This crate provides deterministic greedy team balancing and a zero-sum
//! team ELO rating engine for organized squad matches.

pub mod balance;
pub mod config;
pub mod error;
pub mod matchup;
pub mod rating;
pub mod types;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{BalancingError, Result};
pub use types::*;

// Re-export key components
pub use balance::{GreedyTeamBalancer, TeamBalancer};
pub use rating::{EloConfig, EloRatingCalculator, Rating, RatingCalculator};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
