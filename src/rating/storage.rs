//! Rating storage interface and implementations
//!
//! This module defines the interface for persisting and retrieving player
//! ratings at the orchestration boundary. The core algorithms never touch
//! storage; match formation reads snapshots from here and result recording
//! writes deltas back through here.

use crate::error::{BalancingError, Result};
use crate::rating::model::Rating;
use crate::types::{PlayerId, RatedPlayer, RatingDeltas};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;

/// Storage entry for a player's rating with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingEntry {
    pub player_id: PlayerId,
    pub rating: Rating,
    pub matches_played: u64,
    pub last_updated: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl RatingEntry {
    /// Create a new rating entry for a new player
    pub fn new(player_id: PlayerId, rating: Rating) -> Self {
        let now = Utc::now();
        Self {
            player_id,
            rating,
            matches_played: 0,
            last_updated: now,
            created_at: now,
        }
    }

    /// Apply a match delta through clamped rating arithmetic and bump the
    /// match counter
    pub fn apply_delta(&mut self, delta: i32) {
        self.rating = self.rating.add(delta);
        self.matches_played += 1;
        self.last_updated = Utc::now();
    }
}

/// Trait for rating storage operations
pub trait RatingStorage: Send + Sync {
    /// Get a player's rating entry
    fn get_rating(&self, player_id: &PlayerId) -> Result<Option<RatingEntry>>;

    /// Store or update a player's rating
    fn store_rating(&self, entry: RatingEntry) -> Result<()>;

    /// Get rating entries for multiple players
    fn get_ratings(&self, player_ids: &[PlayerId]) -> Result<HashMap<PlayerId, RatingEntry>>;

    /// Take rating snapshots for a roster; players without a stored
    /// rating get `default_rating`
    fn snapshot(
        &self,
        player_ids: &[PlayerId],
        default_rating: Rating,
    ) -> Result<Vec<RatedPlayer>>;

    /// Apply per-player deltas from a completed match; players without a
    /// stored rating are created at `default_rating` first
    fn apply_deltas(&self, deltas: &RatingDeltas, default_rating: Rating) -> Result<()>;

    /// Get total number of rated players
    fn player_count(&self) -> Result<usize>;
}

/// In-memory rating storage implementation
#[derive(Debug, Default)]
pub struct InMemoryRatingStorage {
    ratings: RwLock<HashMap<PlayerId, RatingEntry>>,
}

impl InMemoryRatingStorage {
    /// Create a new in-memory rating storage
    pub fn new() -> Self {
        Self::default()
    }

    fn read_lock(&self) -> Result<std::sync::RwLockReadGuard<'_, HashMap<PlayerId, RatingEntry>>> {
        self.ratings.read().map_err(|_| {
            BalancingError::InternalError {
                message: "Failed to acquire ratings read lock".to_string(),
            }
            .into()
        })
    }

    fn write_lock(
        &self,
    ) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<PlayerId, RatingEntry>>> {
        self.ratings.write().map_err(|_| {
            BalancingError::InternalError {
                message: "Failed to acquire ratings write lock".to_string(),
            }
            .into()
        })
    }
}

impl RatingStorage for InMemoryRatingStorage {
    fn get_rating(&self, player_id: &PlayerId) -> Result<Option<RatingEntry>> {
        let ratings = self.read_lock()?;
        Ok(ratings.get(player_id).cloned())
    }

    fn store_rating(&self, entry: RatingEntry) -> Result<()> {
        let mut ratings = self.write_lock()?;
        ratings.insert(entry.player_id, entry);
        Ok(())
    }

    fn get_ratings(&self, player_ids: &[PlayerId]) -> Result<HashMap<PlayerId, RatingEntry>> {
        let ratings = self.read_lock()?;

        let mut result = HashMap::new();
        for player_id in player_ids {
            if let Some(entry) = ratings.get(player_id) {
                result.insert(*player_id, entry.clone());
            }
        }

        Ok(result)
    }

    fn snapshot(
        &self,
        player_ids: &[PlayerId],
        default_rating: Rating,
    ) -> Result<Vec<RatedPlayer>> {
        let ratings = self.read_lock()?;

        Ok(player_ids
            .iter()
            .map(|player_id| {
                let rating = ratings
                    .get(player_id)
                    .map(|entry| entry.rating)
                    .unwrap_or(default_rating);
                RatedPlayer::new(*player_id, rating)
            })
            .collect())
    }

    fn apply_deltas(&self, deltas: &RatingDeltas, default_rating: Rating) -> Result<()> {
        let mut ratings = self.write_lock()?;

        for (player_id, delta) in deltas {
            let entry = ratings
                .entry(*player_id)
                .or_insert_with(|| RatingEntry::new(*player_id, default_rating));
            entry.apply_delta(*delta);
        }

        Ok(())
    }

    fn player_count(&self) -> Result<usize> {
        let ratings = self.read_lock()?;
        Ok(ratings.len())
    }
}
