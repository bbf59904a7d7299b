//! Game configuration
//!
//! Every constant the simulation needs, checked once up front. A `Game` can
//! only be built from a config that passed [`GameConfig::validate`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// How a falling egg is tested against the catcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CatchTest {
    /// Full box overlap on both axes
    #[default]
    Full,
    /// Horizontal overlap only (the catch band already bounds the vertical)
    Horizontal,
}

/// Rejected configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be a positive finite number, got {value}")]
    NonPositive { field: &'static str, value: f64 },
    #[error("{field} ({value}) does not fit in the container ({limit})")]
    TooLarge {
        field: &'static str,
        value: f32,
        limit: f32,
    },
    #[error("max_misses must be at least 1")]
    NoMissesAllowed,
    #[error("min_fall_speed ({min}) exceeds max_fall_speed ({max})")]
    InvertedSpeedRange { min: f32, max: f32 },
    #[error("catcher_start_x ({x}) must lie within [0, {max}]")]
    StartOutOfBounds { x: f32, max: f32 },
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub container_width: f32,
    pub container_height: f32,
    pub catcher_width: f32,
    pub catcher_height: f32,
    pub egg_width: f32,
    pub egg_height: f32,
    pub max_misses: u32,
    pub spawn_interval_ms: f64,
    pub tick_interval_ms: f64,
    /// Pixels per tick
    pub min_fall_speed: f32,
    pub max_fall_speed: f32,
    pub catcher_start_x: f32,
    /// Pixels per discrete move command
    pub catcher_step: f32,
    pub catch_test: CatchTest,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            container_width: CONTAINER_WIDTH,
            container_height: CONTAINER_HEIGHT,
            catcher_width: CATCHER_WIDTH,
            catcher_height: CATCHER_HEIGHT,
            egg_width: EGG_WIDTH,
            egg_height: EGG_HEIGHT,
            max_misses: MAX_MISSES,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            tick_interval_ms: TICK_INTERVAL_MS,
            min_fall_speed: MIN_FALL_SPEED,
            max_fall_speed: MAX_FALL_SPEED,
            catcher_start_x: (CONTAINER_WIDTH - CATCHER_WIDTH) / 2.0,
            catcher_step: CATCHER_STEP,
            catch_test: CatchTest::Full,
        }
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn fits(field: &'static str, value: f32, limit: f32) -> Result<(), ConfigError> {
    if value <= limit {
        Ok(())
    } else {
        Err(ConfigError::TooLarge {
            field,
            value,
            limit,
        })
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON document and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every constant; the first violation wins
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("container_width", self.container_width as f64)?;
        positive("container_height", self.container_height as f64)?;
        positive("catcher_width", self.catcher_width as f64)?;
        positive("catcher_height", self.catcher_height as f64)?;
        positive("egg_width", self.egg_width as f64)?;
        positive("egg_height", self.egg_height as f64)?;
        positive("spawn_interval_ms", self.spawn_interval_ms)?;
        positive("tick_interval_ms", self.tick_interval_ms)?;
        positive("min_fall_speed", self.min_fall_speed as f64)?;
        positive("max_fall_speed", self.max_fall_speed as f64)?;
        positive("catcher_step", self.catcher_step as f64)?;

        fits("catcher_width", self.catcher_width, self.container_width)?;
        fits("catcher_height", self.catcher_height, self.container_height)?;
        fits("egg_width", self.egg_width, self.container_width)?;
        fits("egg_height", self.egg_height, self.container_height)?;

        if self.max_misses == 0 {
            return Err(ConfigError::NoMissesAllowed);
        }
        if self.min_fall_speed > self.max_fall_speed {
            return Err(ConfigError::InvertedSpeedRange {
                min: self.min_fall_speed,
                max: self.max_fall_speed,
            });
        }

        let max_x = self.catcher_max_x();
        if !(self.catcher_start_x.is_finite() && (0.0..=max_x).contains(&self.catcher_start_x)) {
            return Err(ConfigError::StartOutOfBounds {
                x: self.catcher_start_x,
                max: max_x,
            });
        }
        Ok(())
    }

    /// Rightmost legal catcher position
    pub fn catcher_max_x(&self) -> f32 {
        self.container_width - self.catcher_width
    }

    /// Eggs at or below this line are in the catch/miss band
    pub fn catch_zone_top(&self) -> f32 {
        self.container_height - self.catcher_height
    }

    /// An egg at or below this line has hit the ground
    pub fn ground_line(&self) -> f32 {
        self.container_height - self.egg_height
    }
}
