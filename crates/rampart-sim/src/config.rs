//! Match configuration.
//!
//! Every field has a default, so a partial JSON document (or none at all)
//! yields a playable configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a configuration or scenario was rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid path: {0}")]
    InvalidPath(String),
    #[error("scenario defines no waves")]
    NoWaves,
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed. `None` seeds from entropy; tests pin a seed for determinism.
    pub seed: Option<u64>,
    pub starting_currency: u32,
    pub starting_lives: u32,
    /// Build grid width in cells.
    pub grid_width: u32,
    /// Build grid height in cells.
    pub grid_height: u32,
    /// Countdown before the first wave starts on its own (seconds).
    pub first_wave_delay: f32,
    /// Countdown between a cleared wave and the next one (seconds).
    pub inter_wave_delay: f32,
    /// Maximum random offset applied to each scheduled spawn (seconds).
    pub spawn_jitter: f32,
    /// Upper bound of the random tie-breaking term in target scores.
    pub targeting_jitter: f32,
    /// Per-second chance of a random event while none is active.
    pub event_chance_per_sec: f32,
    /// First wave during which random events may trigger.
    pub events_min_wave: u32,
    /// Extra enemy health per wave after the first (0.1 = +10% per wave).
    pub wave_health_scaling: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: None,
            starting_currency: 250,
            starting_lives: 20,
            grid_width: 20,
            grid_height: 12,
            first_wave_delay: 10.0,
            inter_wave_delay: 8.0,
            spawn_jitter: 0.1,
            targeting_jitter: 2.0,
            event_chance_per_sec: 0.02,
            events_min_wave: 2,
            wave_health_scaling: 0.1,
        }
    }
}

impl SimConfig {
    /// A default configuration with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// Parse and validate a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(ConfigError::InvalidValue("grid must be non-empty".into()));
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::InvalidValue("starting_lives must be positive".into()));
        }
        let non_negative = [
            ("first_wave_delay", self.first_wave_delay),
            ("inter_wave_delay", self.inter_wave_delay),
            ("spawn_jitter", self.spawn_jitter),
            ("targeting_jitter", self.targeting_jitter),
            ("event_chance_per_sec", self.event_chance_per_sec),
            ("wave_health_scaling", self.wave_health_scaling),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        if self.event_chance_per_sec > 1.0 {
            return Err(ConfigError::InvalidValue(
                "event_chance_per_sec must be at most 1.0".into(),
            ));
        }
        Ok(())
    }
}
