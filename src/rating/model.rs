//! Bounded ELO rating value type
//!
//! Ratings are integers constrained to [`Rating::MIN`]..=[`Rating::MAX`].
//! Arithmetic never fails: deltas that would push a rating out of range
//! are truncated at the boundary. Every operation returns a new value;
//! there is no in-place mutation.

use crate::error::{BalancingError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An integer skill rating, always within the valid range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct Rating(i32);

impl Rating {
    /// Lowest representable rating.
    pub const MIN: i32 = 400;

    /// Highest representable rating.
    pub const MAX: i32 = 2400;

    /// Rating assigned to a player on first joining a squad.
    pub const DEFAULT: i32 = 1000;

    /// Create a rating, failing if `value` lies outside the valid range.
    pub fn new(value: i32) -> Result<Self> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(BalancingError::InvalidRating { value }.into());
        }
        Ok(Self(value))
    }

    /// Raw integer value.
    pub fn value(self) -> i32 {
        self.0
    }

    /// Add `delta`, clamping at the range bounds. Never fails.
    pub fn add(self, delta: i32) -> Self {
        Self(self.0.saturating_add(delta).clamp(Self::MIN, Self::MAX))
    }

    /// Subtract `delta`, clamping at the range bounds. Never fails.
    pub fn subtract(self, delta: i32) -> Self {
        self.add(delta.saturating_neg())
    }
}

impl Default for Rating {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl TryFrom<i32> for Rating {
    type Error = anyhow::Error;

    fn try_from(value: i32) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Rating> for i32 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
