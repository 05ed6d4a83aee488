//! Match lifecycle: formation, result recording, rating application
//!
//! This module ties the balancer, the rating engine, and rating storage
//! together for a single match at a time.

pub mod instance;
pub mod organizer;

// Re-export commonly used types
pub use instance::{MatchInstance, MatchState};
pub use organizer::MatchOrganizer;
