//! Rating model and ELO engine
//!
//! This module provides the bounded rating value type, the rating
//! calculator seam, the team ELO implementation, and storage interfaces.

pub mod calculator;
pub mod elo;
pub mod model;
pub mod storage;

// Re-export commonly used types
pub use calculator::{NoOpRatingCalculator, RatingCalculator};
pub use elo::{EloConfig, EloRatingCalculator};
pub use model::Rating;
pub use storage::{InMemoryRatingStorage, RatingEntry, RatingStorage};
