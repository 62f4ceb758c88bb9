//! Ship configuration
//!
//! Supplied by the host at run start. Colors are cosmetic only; `life`,
//! `attack` and the per-run modifiers feed the avatar's derived stats.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors from loading a ship configuration
#[derive(Debug, Error)]
pub enum ShipConfigError {
    #[error("Malformed ship config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid ship config: {0}")]
    Invalid(String),
}

/// Ship configuration for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipConfig {
    pub id: u32,

    // === Cosmetics ===
    pub color_base: String,
    pub color_shadow: String,
    pub projectile_color: String,
    pub explosion_color: String,

    // === Base stats ===
    /// Starting (and maximum) health before bonuses
    pub life: u32,
    /// Attack multiplier on base projectile damage
    pub attack: f32,

    // === Per-run modifiers ===
    pub hp_bonus: u32,
    pub damage_multiplier: f32,
    pub speed_multiplier: f32,
    pub fire_rate_multiplier: f32,
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            id: 0,

            color_base: "#9e231c".to_string(),
            color_shadow: "#18256e".to_string(),
            projectile_color: "#9e231c".to_string(),
            explosion_color: "#9e231c".to_string(),

            life: 3,
            attack: 1.0,

            hp_bonus: 0,
            damage_multiplier: 1.0,
            speed_multiplier: 1.0,
            fire_rate_multiplier: 1.0,
        }
    }
}

impl ShipConfig {
    /// Parse and validate a JSON ship config
    pub fn from_json(json: &str) -> Result<Self, ShipConfigError> {
        let config: ShipConfig = serde_json::from_str(json)?;
        let config = config.sanitized();
        if config.max_health() == 0 {
            return Err(ShipConfigError::Invalid(
                "life + hp_bonus must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }

    /// Load a config, falling back to the default on any error
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        let Some(json) = json else {
            log::info!("No ship config supplied, using default ship");
            return Self::default();
        };
        match Self::from_json(json) {
            Ok(config) => {
                log::info!("Loaded ship {}", config.id);
                config
            }
            Err(e) => {
                log::warn!("{}; using default ship", e);
                Self::default()
            }
        }
    }

    /// Replace non-finite or non-positive multipliers with 1.0
    pub fn sanitized(mut self) -> Self {
        for value in [
            &mut self.attack,
            &mut self.damage_multiplier,
            &mut self.speed_multiplier,
            &mut self.fire_rate_multiplier,
        ] {
            if !value.is_finite() || *value <= 0.0 {
                log::warn!("Ship {}: replacing multiplier {} with 1.0", self.id, value);
                *value = 1.0;
            }
        }
        self
    }

    pub fn max_health(&self) -> u32 {
        self.life.saturating_add(self.hp_bonus)
    }

    /// Damage per avatar projectile
    pub fn projectile_damage(&self) -> f32 {
        AVATAR_PROJECTILE_DAMAGE * self.attack * self.damage_multiplier
    }

    /// Seconds between avatar volleys
    pub fn fire_interval(&self) -> f32 {
        AVATAR_FIRE_INTERVAL / self.fire_rate_multiplier
    }

    /// Avatar speed in pixels/s
    pub fn move_speed(&self) -> f32 {
        AVATAR_SPEED * self.speed_multiplier
    }
}
