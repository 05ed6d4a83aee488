//! Team ELO rating engine
//!
//! This module computes integer rating deltas for a completed match from
//! the two team average ratings, the outcome, and a K-factor. Deltas are
//! uniform within a team and sum to zero across the match.

use crate::error::{BalancingError, Result};
use crate::rating::calculator::RatingCalculator;
use crate::rating::model::Rating;
use crate::types::{MatchOutcome, RatingDeltas, Team};
use serde::{Deserialize, Serialize};

/// Rating-difference scale of the logistic expectation curve. Fixed by
/// the ELO formula, not configurable.
const EXPECTATION_SCALE: f64 = 400.0;

/// Configuration for the ELO engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EloConfig {
    /// Maximum magnitude of rating change per match
    pub k_factor: i32,
    /// Rating assigned to players without a stored rating
    pub default_rating: i32,
}

impl Default for EloConfig {
    fn default() -> Self {
        Self {
            k_factor: 32,
            default_rating: Rating::DEFAULT,
        }
    }
}

impl EloConfig {
    /// Slower rating drift for established leagues
    pub fn conservative() -> Self {
        Self {
            k_factor: 16,
            ..Self::default()
        }
    }

    /// Faster convergence for fresh leagues
    pub fn aggressive() -> Self {
        Self {
            k_factor: 48,
            ..Self::default()
        }
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.k_factor <= 0 {
            return Err(BalancingError::InvalidKFactor {
                value: self.k_factor,
            }
            .into());
        }
        if !(Rating::MIN..=Rating::MAX).contains(&self.default_rating) {
            return Err(BalancingError::ConfigurationError {
                message: format!(
                    "default rating {} outside [{}, {}]",
                    self.default_rating,
                    Rating::MIN,
                    Rating::MAX
                ),
            }
            .into());
        }
        Ok(())
    }
}

/// Expected score of the home side given both team averages.
pub fn expected_score(home: &Team, away: &Team) -> f64 {
    let diff = away.average_rating() - home.average_rating();
    1.0 / (1.0 + 10f64.powf(diff / EXPECTATION_SCALE))
}

/// How evenly matched two teams are, from 0.0 (foregone conclusion) to
/// 1.0 (coin flip).
pub fn match_quality(home: &Team, away: &Team) -> f64 {
    1.0 - (expected_score(home, away) - 0.5).abs() * 2.0
}

/// Calculate per-player rating deltas for a completed match.
///
/// Raw per-team changes `k * (score - expected)` are rounded half away
/// from zero. If the rounded changes do not cancel across the two team
/// sizes, the residual is absorbed into the larger team's delta
/// (`residual / larger_len`, integer division); the home side wins a
/// size tie. Equal-size teams always cancel exactly, since rounding is
/// symmetric around zero.
pub fn calculate_rating_changes(
    home: &Team,
    away: &Team,
    outcome: MatchOutcome,
    k_factor: i32,
) -> Result<RatingDeltas> {
    if k_factor <= 0 {
        return Err(BalancingError::InvalidKFactor { value: k_factor }.into());
    }

    let e_home = expected_score(home, away);
    let e_away = 1.0 - e_home;

    let (s_home, s_away) = match outcome {
        MatchOutcome::HomeWin => (1.0, 0.0),
        MatchOutcome::AwayWin => (0.0, 1.0),
        MatchOutcome::Draw => (0.5, 0.5),
    };

    let k = f64::from(k_factor);
    let mut delta_home = (k * (s_home - e_home)).round() as i64;
    let mut delta_away = (k * (s_away - e_away)).round() as i64;

    let home_len = home.len() as i64;
    let away_len = away.len() as i64;
    let residual = delta_home * home_len + delta_away * away_len;
    if residual != 0 {
        if home_len >= away_len {
            delta_home -= residual / home_len;
        } else {
            delta_away -= residual / away_len;
        }
    }

    let mut deltas = RatingDeltas::with_capacity(home.len() + away.len());
    for player in home.players() {
        deltas.insert(player.id, delta_home as i32);
    }
    for player in away.players() {
        deltas.insert(player.id, delta_away as i32);
    }
    Ok(deltas)
}

/// ELO implementation of the rating calculator seam
#[derive(Debug, Clone)]
pub struct EloRatingCalculator {
    config: EloConfig,
    initial_rating: Rating,
}

impl EloRatingCalculator {
    /// Create a new ELO calculator with the given configuration
    pub fn new(config: EloConfig) -> Result<Self> {
        config.validate()?;
        let initial_rating = Rating::new(config.default_rating)?;
        Ok(Self {
            config,
            initial_rating,
        })
    }

    /// Current configuration
    pub fn config(&self) -> &EloConfig {
        &self.config
    }
}

impl Default for EloRatingCalculator {
    fn default() -> Self {
        Self::new(EloConfig::default()).expect("default ELO configuration is valid")
    }
}

impl RatingCalculator for EloRatingCalculator {
    fn calculate_rating_changes(
        &self,
        home: &Team,
        away: &Team,
        outcome: MatchOutcome,
    ) -> Result<RatingDeltas> {
        calculate_rating_changes(home, away, outcome, self.config.k_factor)
    }

    fn initial_rating(&self) -> Rating {
        self.initial_rating
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RatedPlayer;
    use uuid::Uuid;

    fn team(ratings: &[i32]) -> Team {
        Team::new(
            ratings
                .iter()
                .map(|&r| RatedPlayer::new(Uuid::new_v4(), Rating::new(r).unwrap()))
                .collect(),
        )
        .unwrap()
    }

    fn uniform_delta(deltas: &RatingDeltas, side: &Team) -> i32 {
        let values: Vec<i32> = side.player_ids().map(|id| deltas[&id]).collect();
        assert!(values.windows(2).all(|w| w[0] == w[1]));
        values[0]
    }

    #[test]
    fn test_favored_home_win_scenario() {
        // avg 1200 vs avg 1000: E_home = 1 / (1 + 10^(-0.5)) ~= 0.76,
        // delta = 32 * (1 - 0.76) rounds to 8.
        let home = team(&[1300, 1100]);
        let away = team(&[1050, 950]);

        let deltas = calculate_rating_changes(&home, &away, MatchOutcome::HomeWin, 32).unwrap();

        assert_eq!(uniform_delta(&deltas, &home), 8);
        assert_eq!(uniform_delta(&deltas, &away), -8);
        assert_eq!(deltas.values().sum::<i32>(), 0);
    }

    #[test]
    fn test_equal_ratings_win_and_draw() {
        let home = team(&[1000, 1000]);
        let away = team(&[1000, 1000]);

        let win = calculate_rating_changes(&home, &away, MatchOutcome::HomeWin, 32).unwrap();
        assert_eq!(uniform_delta(&win, &home), 16);
        assert_eq!(uniform_delta(&win, &away), -16);

        let draw = calculate_rating_changes(&home, &away, MatchOutcome::Draw, 32).unwrap();
        assert_eq!(uniform_delta(&draw, &home), 0);
        assert_eq!(uniform_delta(&draw, &away), 0);
    }

    #[test]
    fn test_draw_favors_lower_rated_team() {
        let home = team(&[1200, 1200]);
        let away = team(&[1000, 1000]);

        let deltas = calculate_rating_changes(&home, &away, MatchOutcome::Draw, 32).unwrap();

        assert!(uniform_delta(&deltas, &home) < 0);
        assert!(uniform_delta(&deltas, &away) > 0);
        assert_eq!(deltas.values().sum::<i32>(), 0);
    }

    #[test]
    fn test_upset_moves_more_points_than_expected_result() {
        let favorite = team(&[1600, 1600]);
        let underdog = team(&[1000, 1000]);

        let expected_win =
            calculate_rating_changes(&favorite, &underdog, MatchOutcome::HomeWin, 32).unwrap();
        let upset =
            calculate_rating_changes(&favorite, &underdog, MatchOutcome::AwayWin, 32).unwrap();

        let favorite_gain = uniform_delta(&expected_win, &favorite);
        let underdog_gain = uniform_delta(&upset, &underdog);

        assert!(underdog_gain > favorite_gain);
    }

    #[test]
    fn test_higher_k_scales_magnitude() {
        let home = team(&[1300]);
        let away = team(&[1100]);

        let small = calculate_rating_changes(&home, &away, MatchOutcome::AwayWin, 16).unwrap();
        let large = calculate_rating_changes(&home, &away, MatchOutcome::AwayWin, 64).unwrap();

        assert!(uniform_delta(&large, &away).abs() > uniform_delta(&small, &away).abs());
    }

    #[test]
    fn test_rejects_non_positive_k() {
        let home = team(&[1000]);
        let away = team(&[1000]);

        let err = calculate_rating_changes(&home, &away, MatchOutcome::Draw, 0).unwrap_err();
        assert!(err.to_string().contains("K-factor must be positive"));

        assert!(calculate_rating_changes(&home, &away, MatchOutcome::Draw, -5).is_err());
    }

    #[test]
    fn test_unequal_teams_absorb_residual_into_larger() {
        // 2v1, equal averages: raw deltas are +16/-16, residual
        // 16*2 - 16*1 = 16 lands on the larger (home) side: 16 - 16/2 = 8.
        let home = team(&[1000, 1000]);
        let away = team(&[1000]);

        let deltas = calculate_rating_changes(&home, &away, MatchOutcome::HomeWin, 32).unwrap();

        assert_eq!(uniform_delta(&deltas, &home), 8);
        assert_eq!(uniform_delta(&deltas, &away), -16);
        assert_eq!(deltas.values().sum::<i32>(), 0);
    }

    #[test]
    fn test_expected_score_shape() {
        let strong = team(&[1700]);
        let weak = team(&[1300]);
        let even = team(&[1500]);

        assert!(expected_score(&strong, &weak) > 0.7);
        assert!(expected_score(&weak, &strong) < 0.3);
        let mirror = expected_score(&strong, &weak) + expected_score(&weak, &strong);
        assert!((mirror - 1.0).abs() < 1e-9);
        assert!((expected_score(&even, &even) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_match_quality_prefers_close_matches() {
        let strong = team(&[1800, 1800]);
        let weak = team(&[1000, 1000]);
        let mid = team(&[1400, 1400]);

        assert!(match_quality(&mid, &mid) > match_quality(&strong, &weak));
        assert!(match_quality(&strong, &weak) >= 0.0);
        assert!(match_quality(&mid, &mid) <= 1.0);
    }

    #[test]
    fn test_config_presets() {
        let conservative = EloConfig::conservative();
        let aggressive = EloConfig::aggressive();
        let default = EloConfig::default();

        assert!(conservative.k_factor < default.k_factor);
        assert!(aggressive.k_factor > default.k_factor);

        assert!(conservative.validate().is_ok());
        assert!(aggressive.validate().is_ok());
        assert!(default.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = EloConfig::default();
        assert!(config.validate().is_ok());

        config.k_factor = 0;
        assert!(config.validate().is_err());

        config = EloConfig::default();
        config.default_rating = 300;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_calculator_uses_configured_k() {
        let calculator = EloRatingCalculator::new(EloConfig {
            k_factor: 64,
            default_rating: 1000,
        })
        .unwrap();
        let home = team(&[1000]);
        let away = team(&[1000]);

        let deltas = calculator
            .calculate_rating_changes(&home, &away, MatchOutcome::HomeWin)
            .unwrap();

        assert_eq!(uniform_delta(&deltas, &home), 32);
        assert_eq!(calculator.initial_rating().value(), 1000);
    }

    #[test]
    fn test_calculator_rejects_invalid_config() {
        assert!(EloRatingCalculator::new(EloConfig {
            k_factor: -1,
            default_rating: 1000,
        })
        .is_err());
    }
}
