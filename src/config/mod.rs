pub mod loader;

use log::{error, info};
use serde::{Deserialize, Serialize};

use crate::game::{
    BOARD_HEIGHT, BOARD_WIDTH, EXPLOSION_BONUS, EXPLOSION_RADIUS, FAST_FACTOR, GIMMICK_DURATION_TICKS, INITIAL_FALL_INTERVAL,
    LEVEL_SPEED_STEP, LOCK_GRACE, MIN_FALL_INTERVAL, SLOW_FACTOR, SPECIAL_CHANCE,
};
use loader::ConfigError;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub gameplay: GameplayConfig,
}

impl Config {
    /// Loads the config file, falling back to defaults when it cannot be read.
    #[must_use]
    pub fn load() -> Self {
        match loader::load_config_from_file() {
            Ok(config) => {
                info!("Configuration loaded successfully");
                config
            }
            Err(e) => {
                error!("Failed to load configuration: {e}");
                Self::default()
            }
        }
    }

    /// Rejects tuning that would stall or invert the game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.gameplay.validate()
    }
}

// Tuning knobs for the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    pub initial_fall_interval: f32,
    pub level_speed_step: f32,
    pub min_fall_interval: f32,
    pub lock_grace: f32,
    pub special_chance: f32,
    pub slow_factor: f32,
    pub fast_factor: f32,
    pub explosion_radius: usize,
    // Multiplied by the level; the score saturates rather than overflowing
    pub explosion_bonus: u32,
    pub gimmick_duration_ticks: u32,
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            initial_fall_interval: INITIAL_FALL_INTERVAL,
            level_speed_step: LEVEL_SPEED_STEP,
            min_fall_interval: MIN_FALL_INTERVAL,
            lock_grace: LOCK_GRACE,
            special_chance: SPECIAL_CHANCE,
            slow_factor: SLOW_FACTOR,
            fast_factor: FAST_FACTOR,
            explosion_radius: EXPLOSION_RADIUS,
            explosion_bonus: EXPLOSION_BONUS,
            gimmick_duration_ticks: GIMMICK_DURATION_TICKS,
        }
    }
}

impl GameplayConfig {
    /// Seconds between automatic fall steps at `level`, before any time scaling.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fall_interval_for(&self, level: u32) -> f32 {
        let steps = level.saturating_sub(1) as f32;
        (self.initial_fall_interval - steps * self.level_speed_step).max(self.min_fall_interval)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_fall_interval <= 0.0 || self.min_fall_interval <= 0.0 {
            return Err(ConfigError::Invalid(
                "fall intervals must be positive".to_string(),
            ));
        }
        if self.level_speed_step < 0.0 || self.lock_grace < 0.0 {
            return Err(ConfigError::Invalid(
                "level_speed_step and lock_grace must not be negative".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.special_chance) {
            return Err(ConfigError::Invalid(format!(
                "special_chance {} is outside [0, 1]",
                self.special_chance
            )));
        }
        if self.slow_factor <= 1.0 {
            return Err(ConfigError::Invalid(format!(
                "slow_factor {} must be greater than 1",
                self.slow_factor
            )));
        }
        if self.fast_factor <= 0.0 || self.fast_factor >= 1.0 {
            return Err(ConfigError::Invalid(format!(
                "fast_factor {} must be between 0 and 1",
                self.fast_factor
            )));
        }
        if self.explosion_radius > BOARD_WIDTH.max(BOARD_HEIGHT) {
            return Err(ConfigError::Invalid(format!(
                "explosion_radius {} is larger than the board",
                self.explosion_radius
            )));
        }
        if self.gimmick_duration_ticks == 0 {
            return Err(ConfigError::Invalid(
                "gimmick_duration_ticks must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
