//! Hostile spawning and pickup drops
//!
//! Hostile stats are a pure function of type, difficulty and active event.
//! Only the type roll, spawn column and pattern choice use the RNG.

use glam::Vec2;
use rand::Rng;

use super::events::GlobalEvent;
use super::pattern::assign_pattern;
use super::state::{GameState, Hostile, HostileKind, Pickup, PickupKind};
use crate::consts::*;

/// Bosses allowed alive at once during MINI_BOSSES
pub const MAX_BOSSES: usize = 3;
/// Base pickup drop chance
pub const BASE_DROP_CHANCE: f32 = 0.05;
/// Drop chance during POWERUP_TIDE
pub const TIDE_DROP_CHANCE: f32 = 0.3;
/// Bonus drop chance while combo > 10
pub const COMBO_DROP_BONUS: f32 = 0.05;

/// Relative pickup weights (not percentages)
const PICKUP_WEIGHTS: [(PickupKind, u32); 4] = [
    (PickupKind::TripleShot, 35),
    (PickupKind::Shield, 30),
    (PickupKind::Coin, 15),
    (PickupKind::Nuke, 10),
];

/// Stats for a freshly spawned hostile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HostileStats {
    pub health: f32,
    /// Full box edge length
    pub size: f32,
    /// Descent speed (pixels/s)
    pub speed: f32,
    pub score_value: u32,
}

/// Seconds between spawns
pub fn spawn_interval(difficulty: u8, event: Option<GlobalEvent>) -> f32 {
    match event {
        Some(GlobalEvent::EnemyFrenzy) => return 0.15,
        Some(GlobalEvent::MeteorRain) => return 0.2,
        _ => {}
    }
    match difficulty {
        0 | 1 => 0.8,
        2 => 0.6,
        3 => 0.5,
        4 => 0.4,
        _ => 0.3,
    }
}

/// Pick the type of the next hostile from a uniform roll in [0, 1)
pub fn choose_kind(roll: f32, event: Option<GlobalEvent>, bosses_alive: usize) -> HostileKind {
    match event {
        Some(GlobalEvent::MeteorRain) => return HostileKind::Meteor,
        Some(GlobalEvent::MiniBosses) if bosses_alive < MAX_BOSSES => return HostileKind::Boss,
        _ => {}
    }
    if roll > 0.8 {
        HostileKind::Tank
    } else if roll > 0.6 {
        HostileKind::Fast
    } else {
        HostileKind::Basic
    }
}

/// Stat table by type and difficulty
pub fn hostile_stats(kind: HostileKind, difficulty: u8, event: Option<GlobalEvent>) -> HostileStats {
    let d = difficulty.max(1) as f32;
    let mut stats = match kind {
        HostileKind::Basic => HostileStats {
            health: 10.0 * d,
            size: 48.0,
            speed: 150.0 + 20.0 * d,
            score_value: 10,
        },
        HostileKind::Fast => HostileStats {
            health: 5.0 * d,
            size: 32.0,
            speed: 350.0 + 50.0 * d,
            score_value: 10,
        },
        HostileKind::Tank => HostileStats {
            health: 40.0 * d,
            size: 64.0,
            speed: 100.0 + 10.0 * d,
            score_value: 50,
        },
        HostileKind::Boss => HostileStats {
            health: 200.0 * d,
            size: 80.0,
            speed: 50.0,
            score_value: 1000,
        },
        HostileKind::Meteor => HostileStats {
            health: 20.0,
            size: 40.0,
            speed: 250.0 + 50.0 * d,
            score_value: 50,
        },
    };

    // Frenzy: weaker but faster, across every rolled type
    if event == Some(GlobalEvent::EnemyFrenzy) && kind != HostileKind::Meteor {
        stats.health *= 0.5;
        stats.speed *= 1.3;
    }
    stats
}

/// Accumulate the spawn timer and spawn once it exceeds the interval
pub fn update(state: &mut GameState, dt: f32) -> Option<HostileKind> {
    state.spawn_timer += dt;
    let interval = spawn_interval(state.stats.difficulty, state.stats.active_event);
    if state.spawn_timer > interval {
        // Reset rather than subtract so cadence self-corrects on long frames
        state.spawn_timer = 0.0;
        return Some(spawn_hostile(state));
    }
    None
}

/// Create one hostile at the top of the field
pub fn spawn_hostile(state: &mut GameState) -> HostileKind {
    let event = state.stats.active_event;
    let difficulty = state.stats.difficulty;
    let bosses = state.count_alive(HostileKind::Boss);

    let roll: f32 = state.rng.random();
    let kind = choose_kind(roll, event, bosses);
    let stats = hostile_stats(kind, difficulty, event);
    let pattern = assign_pattern(kind, difficulty, event, &mut state.rng);

    let half = stats.size / 2.0;
    let x = state.rng.random_range(half..=FIELD_WIDTH - half);
    let drift = if kind == HostileKind::Meteor {
        state.rng.random_range(-25.0..=25.0)
    } else {
        0.0
    };
    let fire_cooldown = state.rng.random_range(0.0..2.0);

    let id = state.next_entity_id();
    if kind == HostileKind::Boss {
        log::info!("Boss {} spawned (hp={})", id, stats.health);
    } else {
        log::debug!("Spawned {} {} at x={:.0}", kind.as_str(), id, x);
    }

    state.store.add_hostile(Hostile {
        id,
        kind,
        pos: Vec2::new(x, -half),
        half: Vec2::splat(half),
        vel: Vec2::new(drift, stats.speed),
        descent: stats.speed,
        drift,
        health: stats.health,
        max_health: stats.health,
        score_value: stats.score_value,
        pattern,
        phase: 0.0,
        fire_cooldown,
        hit_flash: 0.0,
        dead: false,
    });
    kind
}

/// Probability that a dying hostile drops a pickup
pub fn drop_chance(event: Option<GlobalEvent>, combo: u32) -> f32 {
    let base = if event == Some(GlobalEvent::PowerupTide) {
        TIDE_DROP_CHANCE
    } else {
        BASE_DROP_CHANCE
    };
    if combo > 10 { base + COMBO_DROP_BONUS } else { base }
}

/// Weighted pickup draw from a roll in [0, total weight)
pub fn pick_pickup_kind(roll: u32) -> PickupKind {
    let mut remaining = roll;
    for (kind, weight) in PICKUP_WEIGHTS {
        if remaining < weight {
            return kind;
        }
        remaining -= weight;
    }
    PICKUP_WEIGHTS[PICKUP_WEIGHTS.len() - 1].0
}

pub fn total_pickup_weight() -> u32 {
    PICKUP_WEIGHTS.iter().map(|(_, w)| w).sum()
}

/// Roll for a pickup drop at `pos`
pub fn roll_drop(state: &mut GameState, pos: Vec2) -> Option<PickupKind> {
    let chance = drop_chance(state.stats.active_event, state.stats.combo);
    if !state.rng.random_bool(chance as f64) {
        return None;
    }
    let kind = pick_pickup_kind(state.rng.random_range(0..total_pickup_weight()));
    log::debug!("Pickup {:?} dropped", kind);
    state.store.add_pickup(Pickup {
        kind,
        pos,
        half: Vec2::splat(PICKUP_HALF_SIZE),
        vel: Vec2::new(0.0, PICKUP_FALL_SPEED),
        dead: false,
    });
    Some(kind)
}
