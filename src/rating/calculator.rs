//! Rating calculator trait and implementations
//!
//! This module defines the seam between the match lifecycle and the
//! concrete rating engine, plus a no-op implementation for friendlies
//! and wiring tests.

use crate::error::Result;
use crate::rating::model::Rating;
use crate::types::{MatchOutcome, RatingDeltas, Team};

/// Trait for calculating rating changes after completed matches
pub trait RatingCalculator: Send + Sync {
    /// Calculate per-player rating deltas for a completed match.
    ///
    /// The returned map is keyed by the union of both teams' player ids.
    /// Callers apply the deltas to stored ratings; the calculator itself
    /// never touches storage.
    fn calculate_rating_changes(
        &self,
        home: &Team,
        away: &Team,
        outcome: MatchOutcome,
    ) -> Result<RatingDeltas>;

    /// Rating assigned to players who have never been rated.
    fn initial_rating(&self) -> Rating;
}

/// Calculator that leaves every rating untouched.
///
/// Used for friendlies and as a stand-in when wiring the lifecycle in
/// tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpRatingCalculator;

impl NoOpRatingCalculator {
    pub fn new() -> Self {
        Self
    }
}

impl RatingCalculator for NoOpRatingCalculator {
    fn calculate_rating_changes(
        &self,
        home: &Team,
        away: &Team,
        _outcome: MatchOutcome,
    ) -> Result<RatingDeltas> {
        Ok(home
            .player_ids()
            .chain(away.player_ids())
            .map(|id| (id, 0))
            .collect())
    }

    fn initial_rating(&self) -> Rating {
        Rating::default()
    }
}
