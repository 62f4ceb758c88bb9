//! Bullet Storm - combat simulation core for a bullet-hell arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, movement, combat, scoring, events)
//! - `ship`: Ship configuration supplied by the host
//! - `records`: Lifetime totals folded from finished runs
//! - `host`: Callback seam for delivering simulation output to the host

pub mod host;
pub mod records;
pub mod ship;
pub mod sim;

pub use host::{GameHost, dispatch};
pub use records::SaveRecord;
pub use ship::{ShipConfig, ShipConfigError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Play field dimensions (virtual pixels, origin top-left, +y down)
    pub const FIELD_WIDTH: f32 = 600.0;
    pub const FIELD_HEIGHT: f32 = 800.0;

    /// Avatar box (full size 30x40)
    pub const AVATAR_HALF_WIDTH: f32 = 15.0;
    pub const AVATAR_HALF_HEIGHT: f32 = 20.0;
    /// Avatar base speed in pixels/s (scaled by ship speed multiplier)
    pub const AVATAR_SPEED: f32 = 400.0;
    /// Base interval between avatar volleys (divided by ship fire-rate multiplier)
    pub const AVATAR_FIRE_INTERVAL: f32 = 0.2;
    /// Base avatar projectile damage (scaled by attack and damage multiplier)
    pub const AVATAR_PROJECTILE_DAMAGE: f32 = 10.0;
    /// Highest weapon tier reachable by stacking TRIPLE_SHOT
    pub const MAX_WEAPON_TIER: u8 = 3;
    /// Seconds until a TRIPLE_SHOT upgrade reverts to tier 1
    pub const WEAPON_TIER_DURATION: f32 = 10.0;

    /// Invulnerability granted after an unshielded hit
    pub const DAMAGE_INVULNERABILITY: f32 = 2.0;
    /// Invulnerability granted when the shield absorbs a body collision
    pub const SHIELD_BREAK_INVULNERABILITY: f32 = 1.0;

    /// Hostile projectile fire interval and speeds
    pub const HOSTILE_FIRE_INTERVAL: f32 = 1.5;
    pub const HOSTILE_PROJECTILE_SPEED: f32 = 400.0;
    pub const SPIRAL_LATERAL_SPEED: f32 = 150.0;
    pub const SPIRAL_DESCENT_SPEED: f32 = 350.0;
    /// Duration of the "just-hit" flash on a hostile
    pub const HIT_FLASH_DURATION: f32 = 0.1;

    /// Pickup fall speed and box
    pub const PICKUP_FALL_SPEED: f32 = 150.0;
    pub const PICKUP_HALF_SIZE: f32 = 10.0;
    /// Flat score for collecting any pickup (COIN uses the larger bonus)
    pub const PICKUP_SCORE: u64 = 50;
    pub const COIN_SCORE: u64 = 100;

    /// Projectiles further than this outside the field are purged
    pub const PROJECTILE_CULL_MARGIN: f32 = 50.0;

    /// Particle lifetime (seconds) and global cap
    pub const PARTICLE_LIFE: f32 = 0.5;
    pub const MAX_PARTICLES: usize = 512;

    /// Host stats snapshot interval (~10 Hz)
    pub const STATS_INTERVAL: f32 = 0.1;
}

/// Clamp a point so a box of the given half extents stays inside the play field
#[inline]
pub fn clamp_to_field(pos: Vec2, half: Vec2) -> Vec2 {
    Vec2::new(
        pos.x.clamp(half.x, consts::FIELD_WIDTH - half.x),
        pos.y.clamp(half.y, consts::FIELD_HEIGHT - half.y),
    )
}

/// True if a box lies entirely outside the play field extended by `margin`
#[inline]
pub fn outside_field(pos: Vec2, half: Vec2, margin: f32) -> bool {
    pos.x + half.x < -margin
        || pos.x - half.x > consts::FIELD_WIDTH + margin
        || pos.y + half.y < -margin
        || pos.y - half.y > consts::FIELD_HEIGHT + margin
}
