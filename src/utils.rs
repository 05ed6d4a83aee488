//! Utility functions for the match balancing core

use crate::types::{MatchId, Team};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Generate a new unique match ID
pub fn generate_match_id() -> MatchId {
    Uuid::new_v4()
}

/// Get the current UTC timestamp
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now()
}

/// Absolute difference between two teams' total ratings
pub fn rating_gap(home: &Team, away: &Team) -> i64 {
    (home.total_rating() - away.total_rating()).abs()
}
