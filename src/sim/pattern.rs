//! Hostile movement patterns and boundary policy
//!
//! A pattern only decides velocity. Keeping hostiles on (or letting them off)
//! the field is a separate policy keyed on hostile type.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::events::GlobalEvent;
use super::state::{GameState, Hostile, HostileKind};
use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};

/// Lateral jitter applied to straight-moving FAST hostiles (pixels/s)
pub const FAST_JITTER: f32 = 40.0;
/// Margin kept between a boss and the field edges
pub const BOSS_MARGIN: f32 = 10.0;
/// How far oscillating BASIC/TANK hostiles may overflow the field edges
pub const SOFT_OVERFLOW: f32 = 20.0;
/// How far FAST/METEOR hostiles may leave the field sideways before purge
pub const EXIT_MARGIN: f32 = 60.0;
/// Extra distance below the field before BOSS/METEOR hostiles are purged
pub const BOTTOM_TOLERANCE: f32 = 100.0;

/// Behavioral movement pattern
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MovementPattern {
    Straight,
    Serpentine { amplitude: f32, frequency: f32 },
    Zigzag { amplitude: f32, frequency: f32 },
}

impl MovementPattern {
    /// Phase advance per second
    pub fn frequency(&self) -> f32 {
        match *self {
            MovementPattern::Straight => 0.0,
            MovementPattern::Serpentine { frequency, .. }
            | MovementPattern::Zigzag { frequency, .. } => frequency,
        }
    }

    pub fn is_oscillating(&self) -> bool {
        !matches!(self, MovementPattern::Straight)
    }

    /// Lateral velocity at the given phase
    pub fn lateral(&self, phase: f32) -> f32 {
        match *self {
            MovementPattern::Straight => 0.0,
            MovementPattern::Serpentine { amplitude, .. } => phase.sin() * amplitude,
            MovementPattern::Zigzag { amplitude, .. } => triangle_wave(phase) * amplitude,
        }
    }

    /// Scale amplitude and frequency (no-op for straight movement)
    fn scaled(self, amp_scale: f32, freq_scale: f32) -> Self {
        match self {
            MovementPattern::Straight => self,
            MovementPattern::Serpentine { amplitude, frequency } => MovementPattern::Serpentine {
                amplitude: amplitude * amp_scale,
                frequency: frequency * freq_scale,
            },
            MovementPattern::Zigzag { amplitude, frequency } => MovementPattern::Zigzag {
                amplitude: amplitude * amp_scale,
                frequency: frequency * freq_scale,
            },
        }
    }
}

/// Triangle wave with period 2π in [-1, 1], in phase with `sin`
pub fn triangle_wave(phase: f32) -> f32 {
    let t = phase.rem_euclid(TAU) / TAU;
    if t < 0.25 {
        4.0 * t
    } else if t < 0.75 {
        2.0 - 4.0 * t
    } else {
        4.0 * t - 4.0
    }
}

/// Velocity for a pattern at `phase`, descending at `descent` pixels/s
pub fn velocity(pattern: &MovementPattern, phase: f32, descent: f32) -> Vec2 {
    Vec2::new(pattern.lateral(phase), descent)
}

/// Per-tick descent speed scale for the active event
pub fn event_speed_scale(event: Option<GlobalEvent>) -> f32 {
    match event {
        Some(GlobalEvent::EnemyFrenzy) => 1.4,
        Some(GlobalEvent::BulletHell) => 0.9,
        _ => 1.0,
    }
}

/// Choose a pattern for a freshly spawned hostile
pub fn assign_pattern<R: Rng>(
    kind: HostileKind,
    difficulty: u8,
    event: Option<GlobalEvent>,
    rng: &mut R,
) -> MovementPattern {
    let tier = difficulty.saturating_sub(1) as f32;
    let amplitude = 60.0 + 15.0 * tier;
    let frequency = 1.5 + 0.25 * tier;

    let pattern = match kind {
        HostileKind::Fast | HostileKind::Meteor => MovementPattern::Straight,
        HostileKind::Basic => match rng.random_range(0..3) {
            0 => MovementPattern::Straight,
            1 => MovementPattern::Serpentine { amplitude, frequency },
            _ => MovementPattern::Zigzag { amplitude, frequency },
        },
        HostileKind::Tank => {
            if rng.random_bool(0.5) {
                MovementPattern::Straight
            } else {
                MovementPattern::Zigzag {
                    amplitude: amplitude * 0.6,
                    frequency: frequency * 0.7,
                }
            }
        }
        HostileKind::Boss => MovementPattern::Serpentine {
            amplitude: 120.0,
            frequency: 0.8,
        },
    };

    match event {
        // Wide, slow sweep across the whole field
        Some(GlobalEvent::MiniBosses) if kind == HostileKind::Boss => {
            MovementPattern::Serpentine {
                amplitude: 180.0,
                frequency: 0.5,
            }
        }
        Some(GlobalEvent::EnemyFrenzy) => pattern.scaled(1.3, 1.2),
        Some(GlobalEvent::BulletHell) => pattern.scaled(0.8, 1.0),
        _ => pattern,
    }
}

/// Where a hostile is allowed to go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryPolicy {
    /// Pinned inside the field with a margin
    HardClamp,
    /// Kept near the field, allowed to overflow slightly
    SoftClamp,
    /// Free to leave sideways, purged once well off-screen
    Exit,
}

impl BoundaryPolicy {
    pub fn for_kind(kind: HostileKind) -> Self {
        match kind {
            HostileKind::Boss => BoundaryPolicy::HardClamp,
            HostileKind::Basic | HostileKind::Tank => BoundaryPolicy::SoftClamp,
            HostileKind::Fast | HostileKind::Meteor => BoundaryPolicy::Exit,
        }
    }

    /// Clamp or flag the hostile according to policy
    pub fn apply(&self, hostile: &mut Hostile) {
        let hx = hostile.half.x;
        match self {
            BoundaryPolicy::HardClamp => {
                hostile.pos.x = hostile
                    .pos
                    .x
                    .clamp(hx + BOSS_MARGIN, FIELD_WIDTH - hx - BOSS_MARGIN);
            }
            BoundaryPolicy::SoftClamp => {
                hostile.pos.x = hostile
                    .pos
                    .x
                    .clamp(hx - SOFT_OVERFLOW, FIELD_WIDTH - hx + SOFT_OVERFLOW);
            }
            BoundaryPolicy::Exit => {
                if hostile.pos.x + hx < -EXIT_MARGIN || hostile.pos.x - hx > FIELD_WIDTH + EXIT_MARGIN
                {
                    hostile.dead = true;
                }
            }
        }

        let tolerance = match hostile.kind {
            HostileKind::Boss | HostileKind::Meteor => BOTTOM_TOLERANCE,
            _ => 0.0,
        };
        if hostile.pos.y - hostile.half.y > FIELD_HEIGHT + tolerance {
            hostile.dead = true;
        }
    }
}

/// Reposition every live hostile
pub fn move_hostiles(state: &mut GameState, dt: f32) {
    let speed_scale = event_speed_scale(state.stats.active_event);
    let GameState { store, rng, .. } = state;

    for hostile in store.hostiles.iter_mut().filter(|h| !h.dead) {
        hostile.phase += hostile.pattern.frequency() * dt;
        let mut vel = velocity(&hostile.pattern, hostile.phase, hostile.descent * speed_scale);
        vel.x += hostile.drift;
        if hostile.kind == HostileKind::Fast && !hostile.pattern.is_oscillating() {
            vel.x += rng.random_range(-FAST_JITTER..=FAST_JITTER);
        }
        hostile.vel = vel;
        hostile.pos += vel * dt;

        if hostile.hit_flash > 0.0 {
            hostile.hit_flash = (hostile.hit_flash - dt).max(0.0);
        }

        BoundaryPolicy::for_kind(hostile.kind).apply(hostile);
    }
}
