//! Match organizer wiring storage, balancing, and rating updates
//!
//! The organizer is the in-process orchestration seam: it snapshots
//! squad ratings, forms balanced teams, and applies deltas back to
//! storage when a result comes in. Persistence and transport layers sit
//! behind the traits it holds.

use crate::balance::TeamBalancer;
use crate::error::Result;
use crate::matchup::instance::MatchInstance;
use crate::rating::calculator::RatingCalculator;
use crate::rating::elo;
use crate::rating::storage::RatingStorage;
use crate::types::{MatchCompleted, MatchOutcome, PlayerId, TeamsFormed};
use crate::utils::current_timestamp;
use std::sync::Arc;
use tracing::{debug, info};

/// Coordinates match formation and result recording
pub struct MatchOrganizer {
    balancer: Arc<dyn TeamBalancer>,
    calculator: Arc<dyn RatingCalculator>,
    storage: Arc<dyn RatingStorage>,
}

impl MatchOrganizer {
    pub fn new(
        balancer: Arc<dyn TeamBalancer>,
        calculator: Arc<dyn RatingCalculator>,
        storage: Arc<dyn RatingStorage>,
    ) -> Self {
        Self {
            balancer,
            calculator,
            storage,
        }
    }

    /// Form a match from the roster's current stored ratings.
    ///
    /// Players never seen before enter at the calculator's initial
    /// rating. The snapshots taken here stay with the match for its
    /// whole lifetime.
    pub fn create_match(
        &self,
        roster: &[PlayerId],
        team_size: usize,
    ) -> Result<(MatchInstance, TeamsFormed)> {
        let players = self
            .storage
            .snapshot(roster, self.calculator.initial_rating())?;
        debug!(roster_size = players.len(), team_size, "forming match");

        let (home, away) = self.balancer.generate_balanced_teams(&players, team_size)?;
        let matchup = MatchInstance::new(home.clone(), away.clone());

        info!(
            match_id = %matchup.id(),
            rating_gap = matchup.rating_gap(),
            quality = elo::match_quality(&home, &away),
            "match formed"
        );

        let event = TeamsFormed {
            match_id: matchup.id(),
            home,
            away,
            rating_gap: matchup.rating_gap(),
            timestamp: current_timestamp(),
        };
        Ok((matchup, event))
    }

    /// Record the outcome and apply the rating deltas to storage.
    pub fn complete_match(
        &self,
        matchup: &mut MatchInstance,
        outcome: MatchOutcome,
    ) -> Result<MatchCompleted> {
        let deltas = matchup
            .record_result(outcome, self.calculator.as_ref())?
            .clone();
        self.storage
            .apply_deltas(&deltas, self.calculator.initial_rating())?;

        info!(match_id = %matchup.id(), %outcome, "match completed");

        Ok(MatchCompleted {
            match_id: matchup.id(),
            outcome,
            deltas,
            timestamp: current_timestamp(),
        })
    }
}
