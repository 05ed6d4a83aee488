//! Greedy team balancing
//!
//! This module contains the deterministic partitioning logic that turns
//! an even-sized roster of rated players into two equal teams.

use crate::error::{BalancingError, Result};
use crate::types::{RatedPlayer, Team};

/// Trait for roster partitioning algorithms
pub trait TeamBalancer: Send + Sync {
    /// Split `players` into two teams of exactly `team_size` members each.
    ///
    /// The first returned team is the home side.
    fn generate_balanced_teams(
        &self,
        players: &[RatedPlayer],
        team_size: usize,
    ) -> Result<(Team, Team)>;
}

/// Deterministic greedy balancer.
///
/// Players are sorted by rating descending, ties broken by player id
/// ascending so equal ratings still compare under a total order, then
/// dealt one at a time to the side with the lower running total (home on
/// a total tie). A side that already holds `team_size` players stops
/// receiving; this is what guarantees the equal split.
///
/// The result is an O(n log n) approximation, not an optimal partition:
/// the final rating-sum gap is bounded by the highest individual rating
/// in the roster. Identical inputs produce bit-identical assignments in
/// any process, so matches can be replayed from stored snapshots.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyTeamBalancer;

impl GreedyTeamBalancer {
    pub fn new() -> Self {
        Self
    }

    fn validate(players: &[RatedPlayer], team_size: usize) -> Result<()> {
        if players.len() < 2 {
            return Err(BalancingError::InvalidRoster {
                reason: "at least two players are required to form teams".to_string(),
            }
            .into());
        }
        if players.len() % 2 != 0 {
            return Err(BalancingError::InvalidRoster {
                reason: format!(
                    "roster must contain an even number of players, got {}",
                    players.len()
                ),
            }
            .into());
        }
        if team_size == 0 {
            return Err(BalancingError::InvalidRoster {
                reason: "team size must be positive".to_string(),
            }
            .into());
        }
        if players.len() != team_size * 2 {
            return Err(BalancingError::InvalidRoster {
                reason: format!(
                    "roster of {} players cannot fill two teams of {}",
                    players.len(),
                    team_size
                ),
            }
            .into());
        }
        Ok(())
    }
}

impl TeamBalancer for GreedyTeamBalancer {
    fn generate_balanced_teams(
        &self,
        players: &[RatedPlayer],
        team_size: usize,
    ) -> Result<(Team, Team)> {
        Self::validate(players, team_size)?;

        let mut sorted: Vec<RatedPlayer> = players.to_vec();
        sorted.sort_by(|a, b| {
            b.rating
                .value()
                .cmp(&a.rating.value())
                .then_with(|| a.id.cmp(&b.id))
        });

        let mut home: Vec<RatedPlayer> = Vec::with_capacity(team_size);
        let mut away: Vec<RatedPlayer> = Vec::with_capacity(team_size);
        let mut total_home: i64 = 0;
        let mut total_away: i64 = 0;

        for player in sorted {
            let to_home = if home.len() == team_size {
                false
            } else if away.len() == team_size {
                true
            } else {
                total_home <= total_away
            };

            if to_home {
                total_home += i64::from(player.rating.value());
                home.push(player);
            } else {
                total_away += i64::from(player.rating.value());
                away.push(player);
            }
        }

        Ok((Team::new(home)?, Team::new(away)?))
    }
}
