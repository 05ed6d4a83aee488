//! Main application configuration
//!
//! This module defines the primary configuration structures for the
//! locker-room core, including TOML file loading, environment variable
//! overrides, and validation.

use crate::error::Result;
use crate::rating::elo::EloConfig;
use crate::rating::model::Rating;
use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub rating: RatingSettings,
    pub matchup: MatchSettings,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Rating system settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingSettings {
    /// K-factor controlling rating change magnitude per match
    pub k_factor: i32,
    /// Rating assigned to players on first joining a squad
    pub default_rating: i32,
}

/// Match formation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchSettings {
    /// Players per side
    pub team_size: usize,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "locker-room".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self {
            k_factor: 32,
            default_rating: Rating::DEFAULT,
        }
    }
}

impl Default for MatchSettings {
    fn default() -> Self {
        // Five-a-side
        Self { team_size: 5 }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(name) = env::var("SERVICE_NAME") {
            config.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            config.service.log_level = log_level;
        }
        if let Ok(k_factor) = env::var("K_FACTOR") {
            config.rating.k_factor = k_factor
                .parse()
                .map_err(|_| anyhow!("Invalid K_FACTOR value: {}", k_factor))?;
        }
        if let Ok(default_rating) = env::var("DEFAULT_RATING") {
            config.rating.default_rating = default_rating
                .parse()
                .map_err(|_| anyhow!("Invalid DEFAULT_RATING value: {}", default_rating))?;
        }
        if let Ok(team_size) = env::var("TEAM_SIZE") {
            config.matchup.team_size = team_size
                .parse()
                .map_err(|_| anyhow!("Invalid TEAM_SIZE value: {}", team_size))?;
        }

        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        validate_config(&config)?;
        Ok(config)
    }

    /// ELO engine configuration derived from the rating settings
    pub fn elo_config(&self) -> EloConfig {
        EloConfig {
            k_factor: self.rating.k_factor,
            default_rating: self.rating.default_rating,
        }
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.rating.k_factor <= 0 {
        return Err(anyhow!("K-factor must be positive"));
    }
    if !(Rating::MIN..=Rating::MAX).contains(&config.rating.default_rating) {
        return Err(anyhow!(
            "Default rating must be between {} and {}",
            Rating::MIN,
            Rating::MAX
        ));
    }
    if config.matchup.team_size == 0 {
        return Err(anyhow!("Team size must be greater than 0"));
    }

    Ok(())
}
