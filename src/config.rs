//! Game configuration
//!
//! Every tunable lives here and is injected at construction. Defaults come
//! from [`crate::consts`]; JSON overrides only need the fields they change.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::ShapeKind;

/// Errors from building or validating a [`GameConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("shape_spawn_rate must be within [0, 1], got {0}")]
    SpawnRate(f64),
    #[error("shape_types must contain at least one shape")]
    NoShapeTypes,
    #[error("{field} must be finite and non-negative, got {value}")]
    InvalidValue { field: &'static str, value: f64 },
    #[error("{field} must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Tunable constants for a round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Timer ===
    /// Round length in seconds
    pub initial_time: u32,

    // === Scoring ===
    pub correct_shape_points: u32,
    pub wrong_shape_penalty: u32,
    pub combo_multiplier: f64,

    // === Power ===
    pub correct_shape_power: f32,
    pub wrong_shape_power_loss: f32,
    pub max_power: f32,

    // === Character ===
    /// Pixels per frame
    pub character_speed: f32,
    pub character_size: f32,
    pub character_start_x: f32,

    // === Shapes ===
    /// Probability per frame (0-1)
    pub shape_spawn_rate: f64,
    /// Pixels per frame, leftward
    pub shape_speed: f32,
    pub shape_size: f32,
    pub min_shape_distance: f32,
    pub shape_types: Vec<ShapeKind>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            initial_time: INITIAL_TIME,

            correct_shape_points: CORRECT_SHAPE_POINTS,
            wrong_shape_penalty: WRONG_SHAPE_PENALTY,
            combo_multiplier: COMBO_MULTIPLIER,

            correct_shape_power: CORRECT_SHAPE_POWER,
            wrong_shape_power_loss: WRONG_SHAPE_POWER_LOSS,
            max_power: MAX_POWER,

            character_speed: CHARACTER_SPEED,
            character_size: CHARACTER_SIZE,
            character_start_x: CHARACTER_START_X,

            shape_spawn_rate: SHAPE_SPAWN_RATE,
            shape_speed: SHAPE_SPEED,
            shape_size: SHAPE_SIZE,
            min_shape_distance: MIN_SHAPE_DISTANCE,
            shape_types: ShapeKind::ALL.to_vec(),
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every tunable is usable by the simulation
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.shape_spawn_rate) {
            return Err(ConfigError::SpawnRate(self.shape_spawn_rate));
        }
        if self.shape_types.is_empty() {
            return Err(ConfigError::NoShapeTypes);
        }

        let non_negative = [
            ("correct_shape_power", self.correct_shape_power),
            ("wrong_shape_power_loss", self.wrong_shape_power_loss),
            ("character_speed", self.character_speed),
            ("character_size", self.character_size),
            ("shape_speed", self.shape_speed),
            ("min_shape_distance", self.min_shape_distance),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue {
                    field,
                    value: value as f64,
                });
            }
        }
        if !self.character_start_x.is_finite() {
            return Err(ConfigError::InvalidValue {
                field: "character_start_x",
                value: self.character_start_x as f64,
            });
        }

        let positive = [
            ("combo_multiplier", self.combo_multiplier),
            ("max_power", self.max_power as f64),
            ("shape_size", self.shape_size as f64),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        Ok(())
    }
}
