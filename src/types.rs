//! Common types used throughout the match balancing core

use crate::error::{BalancingError, Result};
use crate::rating::model::Rating;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// Unique identifier for players
pub type PlayerId = Uuid;

/// Unique identifier for matches
pub type MatchId = Uuid;

/// Rating change per player for one match, keyed by player id
pub type RatingDeltas = HashMap<PlayerId, i32>;

/// Result of a completed match, seen from the home side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchOutcome {
    HomeWin,
    AwayWin,
    Draw,
}

impl fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchOutcome::HomeWin => write!(f, "HomeWin"),
            MatchOutcome::AwayWin => write!(f, "AwayWin"),
            MatchOutcome::Draw => write!(f, "Draw"),
        }
    }
}

/// A player id paired with the rating snapshot taken when the match was formed.
///
/// The snapshot is deliberately never refreshed from a live rating: balancing
/// and delta calculation must be reproducible from stored match data alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatedPlayer {
    pub id: PlayerId,
    pub rating: Rating,
}

impl RatedPlayer {
    pub fn new(id: PlayerId, rating: Rating) -> Self {
        Self { id, rating }
    }
}

/// One side of a match: a non-empty set of rated players.
///
/// Teams are created once from balancer output and never mutated; a new
/// balancing run replaces both teams wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    players: Vec<RatedPlayer>,
}

impl Team {
    /// Create a team, failing on an empty player list.
    pub fn new(players: Vec<RatedPlayer>) -> Result<Self> {
        if players.is_empty() {
            return Err(BalancingError::InvalidRoster {
                reason: "a team must contain at least one player".to_string(),
            }
            .into());
        }
        Ok(Self { players })
    }

    /// Members of this team.
    pub fn players(&self) -> &[RatedPlayer] {
        &self.players
    }

    /// Number of players on this team. Always at least 1.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Always false; teams reject empty rosters at construction.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Sum of the members' snapshot ratings.
    pub fn total_rating(&self) -> i64 {
        self.players
            .iter()
            .map(|p| i64::from(p.rating.value()))
            .sum()
    }

    /// Mean of the members' snapshot ratings.
    pub fn average_rating(&self) -> f64 {
        self.total_rating() as f64 / self.players.len() as f64
    }

    /// Iterate over member ids.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.players.iter().map(|p| p.id)
    }

    /// Whether the given player is on this team.
    pub fn contains(&self, player_id: &PlayerId) -> bool {
        self.players.iter().any(|p| p.id == *player_id)
    }
}

/// Event payload emitted when a match has been formed and balanced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamsFormed {
    pub match_id: MatchId,
    pub home: Team,
    pub away: Team,
    pub rating_gap: i64,
    pub timestamp: DateTime<Utc>,
}

/// Event payload emitted when a match result has been recorded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchCompleted {
    pub match_id: MatchId,
    pub outcome: MatchOutcome,
    pub deltas: RatingDeltas,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(rating: i32) -> RatedPlayer {
        RatedPlayer::new(Uuid::new_v4(), Rating::new(rating).unwrap())
    }

    #[test]
    fn test_team_rejects_empty_roster() {
        assert!(Team::new(vec![]).is_err());
    }

    #[test]
    fn test_team_totals() {
        let team = Team::new(vec![player(1400), player(900)]).unwrap();

        assert_eq!(team.len(), 2);
        assert_eq!(team.total_rating(), 2300);
        assert_eq!(team.average_rating(), 1150.0);
    }

    #[test]
    fn test_team_membership() {
        let member = player(1000);
        let outsider = player(1000);
        let team = Team::new(vec![member]).unwrap();

        assert!(team.contains(&member.id));
        assert!(!team.contains(&outsider.id));
        assert_eq!(team.player_ids().collect::<Vec<_>>(), vec![member.id]);
    }

    #[test]
    fn test_outcome_display() {
        assert_eq!(MatchOutcome::HomeWin.to_string(), "HomeWin");
        assert_eq!(MatchOutcome::AwayWin.to_string(), "AwayWin");
        assert_eq!(MatchOutcome::Draw.to_string(), "Draw");
    }

    #[test]
    fn test_team_serde_round_trip() {
        let team = Team::new(vec![player(1200), player(800)]).unwrap();
        let json = serde_json::to_string(&team).unwrap();
        let back: Team = serde_json::from_str(&json).unwrap();
        assert_eq!(back, team);
    }
}
