//! Game tuning
//!
//! Every gameplay constant lives in `GameConfig`. The defaults are the shipped
//! values; a RON file can override any subset of them. The file is looked up
//! at `FISHBOWL_CONFIG` if set, otherwise at `assets/config/fishbowl.ron`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_ENV_VAR: &str = "FISHBOWL_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "assets/config/fishbowl.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("invalid setting {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Countdown length in seconds
    pub duration: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { duration: 60.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Fish queued before the first frame
    pub initial_fish: u32,
    /// Fish queued each time the cooldown expires
    pub batch_size: u32,
    /// Seconds between batches
    pub cooldown: f32,
    /// Inner radius R of the spawn band; offsets fall in [-2R, -R) ∪ [R, 2R)
    pub range: f32,
    /// Percent chance of a large fish
    pub large_percent: u32,
    /// Percent chance of a medium fish
    pub medium_percent: u32,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            initial_fish: 10,
            batch_size: 5,
            cooldown: 1.0,
            range: 5.0,
            large_percent: 10,
            medium_percent: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FishConfig {
    /// Wandering speed in units/s
    pub move_speed: f32,
    /// Speed multiplier while fleeing
    pub flee_multiplier: f32,
    /// Scales the random yaw rate
    pub max_yaw: f32,
    /// Upper bound of the random delay before the next heading change
    pub yaw_retarget_max: f32,
    /// Same-type fish within this distance of a meal take fright
    pub scare_radius: f32,
    /// Seconds a scared fish flees
    pub scare_duration: f32,
    /// Fish further than this from the player are dropped
    pub despawn_distance: f32,
}

impl Default for FishConfig {
    fn default() -> Self {
        Self {
            move_speed: 1.5,
            flee_multiplier: 2.0,
            max_yaw: 2.0,
            yaw_retarget_max: 0.3,
            scare_radius: 10.0,
            scare_duration: 5.0,
            despawn_distance: 20.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Forward speed in units/s
    pub speed: f32,
    /// Turn rate in degrees/s
    pub turn_speed_degrees: f32,
    /// Scale gained per point scored
    pub growth_per_point: f32,
    pub catch_radius: f32,
    /// Catch radius gained per point scored
    pub catch_radius_per_point: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed: 4.0,
            turn_speed_degrees: 60.0,
            growth_per_point: 0.05,
            catch_radius: 0.4,
            catch_radius_per_point: 0.01,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub session: SessionConfig,
    pub spawn: SpawnConfig,
    pub fish: FishConfig,
    pub player: PlayerConfig,
    /// Fixed RNG seed; `None` seeds from OS entropy
    pub seed: Option<u64>,
}

impl GameConfig {
    pub fn from_ron_str(s: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = ron::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    /// Load from the configured location, falling back to defaults when the
    /// file does not exist. A file that exists but is broken is an error.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

        if !path.exists() {
            log::warn!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        log::info!("loading config from {}", path.display());
        Self::load(&path)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("session.duration", self.session.duration),
            ("spawn.cooldown", self.spawn.cooldown),
            ("spawn.range", self.spawn.range),
            ("fish.move_speed", self.fish.move_speed),
            ("fish.despawn_distance", self.fish.despawn_distance),
            ("player.speed", self.player.speed),
            ("player.catch_radius", self.player.catch_radius),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be a positive number, got {}", value),
                });
            }
        }

        let non_negative = [
            ("fish.flee_multiplier", self.fish.flee_multiplier),
            ("fish.max_yaw", self.fish.max_yaw),
            ("fish.yaw_retarget_max", self.fish.yaw_retarget_max),
            ("fish.scare_radius", self.fish.scare_radius),
            ("fish.scare_duration", self.fish.scare_duration),
            ("player.turn_speed_degrees", self.player.turn_speed_degrees),
            ("player.growth_per_point", self.player.growth_per_point),
            ("player.catch_radius_per_point", self.player.catch_radius_per_point),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be zero or more, got {}", value),
                });
            }
        }

        if self.fish.despawn_distance <= 2.0 * self.spawn.range * std::f32::consts::SQRT_2 {
            return Err(ConfigError::Invalid {
                field: "fish.despawn_distance",
                reason: "fish would be dropped as soon as they spawn".to_string(),
            });
        }

        let weights = self.spawn.large_percent + self.spawn.medium_percent;
        if weights > 100 {
            return Err(ConfigError::Invalid {
                field: "spawn",
                reason: format!("large + medium percent is {}, over 100", weights),
            });
        }
        Ok(())
    }
}
