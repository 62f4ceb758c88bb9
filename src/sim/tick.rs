//! Per-frame simulation tick
//!
//! Order within a tick: timebase, event director, avatar, spawner, hostile
//! movement, projectile and pickup motion, combat, scoring decay, game-over
//! and checkpoint checks, stats snapshot, and finally compaction.

use glam::Vec2;

use super::checkpoint;
use super::combat;
use super::events::EventTransition;
use super::pattern;
use super::spawner;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;
use crate::{clamp_to_field, outside_field};

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Desired movement direction; each component is clamped to [-1, 1]
    pub movement: Vec2,
}

impl TickInput {
    pub fn moving(x: f32, y: f32) -> Self {
        Self {
            movement: Vec2::new(x, y),
        }
    }
}

/// Advance the run by one frame of `frame_ms` milliseconds.
///
/// Outside [`GamePhase::Playing`] this is a no-op: the host keeps rendering the
/// frozen state while a checkpoint decision is pending.
pub fn tick(state: &mut GameState, input: &TickInput, frame_ms: f32) {
    if state.phase != GamePhase::Playing {
        return;
    }

    let dt = state.timebase.advance(&mut state.stats, frame_ms);
    if dt <= 0.0 {
        return;
    }

    // Global events
    if let Some(transition) = state.director.update(dt, &mut state.rng) {
        state.stats.active_event = state.director.active();
        state.events.push(match transition {
            EventTransition::Started(event) => GameEvent::EventStarted(event),
            EventTransition::Ended(event) => GameEvent::EventEnded(event),
        });
    }

    // Avatar
    let now = state.stats.time;
    state.avatar.update_timers(dt, now);
    move_avatar(state, input, dt);
    combat::fire_avatar(state, dt);

    // Hostiles
    spawner::update(state, dt);
    pattern::move_hostiles(state, dt);
    combat::fire_hostiles(state, dt);

    advance_projectiles(state, dt);
    advance_pickups(state, dt);
    advance_particles(state, dt);

    combat::resolve(state);
    state.stats.decay(dt);

    state.stats.health = state.avatar.health;
    state.stats.max_health = state.avatar.max_health;

    if state.avatar.health == 0 {
        state.finish();
    } else if !checkpoint::check(state) {
        state.stats_timer += dt;
        if state.stats_timer > STATS_INTERVAL {
            state.stats_timer = 0.0;
            let snapshot = state.snapshot();
            state.events.push(GameEvent::StatsUpdated(snapshot));
        }
    }

    state.store.compact();
}

fn move_avatar(state: &mut GameState, input: &TickInput, dt: f32) {
    let dir = input.movement.clamp(Vec2::splat(-1.0), Vec2::splat(1.0));
    if dir == Vec2::ZERO {
        return;
    }
    let speed = state.ship.move_speed();
    let avatar = &mut state.avatar;
    avatar.pos = clamp_to_field(avatar.pos + dir * speed * dt, avatar.half);
}

fn advance_projectiles(state: &mut GameState, dt: f32) {
    for projectile in state.store.projectiles.iter_mut() {
        projectile.pos += projectile.vel * dt;
        if outside_field(projectile.pos, projectile.half, PROJECTILE_CULL_MARGIN) {
            projectile.dead = true;
        }
    }
}

fn advance_pickups(state: &mut GameState, dt: f32) {
    for pickup in state.store.pickups.iter_mut() {
        pickup.pos += pickup.vel * dt;
        if pickup.pos.y - pickup.half.y > FIELD_HEIGHT {
            pickup.dead = true;
        }
    }
}

fn advance_particles(state: &mut GameState, dt: f32) {
    for particle in state.store.particles.iter_mut() {
        particle.pos += particle.vel * dt;
        particle.life -= dt;
    }
}
