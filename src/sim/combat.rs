//! Combat resolution
//!
//! Fire control for both sides and every pairwise interaction of a tick.
//! Nothing is removed here: entities are flagged `dead` and compacted at the
//! end of the tick.

use glam::Vec2;
use rand::Rng;

use super::collision::boxes_overlap;
use super::events::GlobalEvent;
use super::spawner;
use super::state::{
    Avatar, GameEvent, GameState, Hostile, HostileKind, Owner, Particle, PickupKind, Projectile,
    RunStats, Tint,
};
use super::store::EntityStore;
use crate::consts::*;

/// Particle counts per burst
const BURST_AVATAR_DAMAGE: usize = 20;
const BURST_RAM: usize = 10;
const BURST_KILL: usize = 15;
const BURST_IMPACT: usize = 2;
const BURST_NUKE: usize = 10;

/// Avatar projectile box (4x12)
const AVATAR_PROJECTILE_HALF: Vec2 = Vec2::new(2.0, 6.0);
/// Hostile projectile box (6x6)
const HOSTILE_PROJECTILE_HALF: Vec2 = Vec2::new(3.0, 3.0);

/// Velocities of the avatar's fan for a weapon tier
pub fn volley(tier: u8) -> Vec<Vec2> {
    let mut shots = vec![Vec2::new(0.0, -700.0)];
    if tier >= 2 {
        shots.push(Vec2::new(-150.0, -650.0));
        shots.push(Vec2::new(150.0, -650.0));
    }
    if tier >= 3 {
        shots.push(Vec2::new(-300.0, -600.0));
        shots.push(Vec2::new(300.0, -600.0));
    }
    shots
}

/// Auto-fire the avatar's weapon when its cooldown is depleted
pub fn fire_avatar(state: &mut GameState, dt: f32) {
    let avatar = &mut state.avatar;
    avatar.fire_cooldown -= dt;
    if avatar.fire_cooldown > 0.0 {
        return;
    }

    let damage = state.ship.projectile_damage();
    let muzzle = Vec2::new(avatar.pos.x, avatar.pos.y - avatar.half.y);
    for vel in volley(avatar.weapon_tier) {
        state.store.add_projectile(Projectile {
            pos: muzzle,
            half: AVATAR_PROJECTILE_HALF,
            vel,
            damage,
            tint: Tint::ShipBase,
            owner: Owner::Avatar,
            dead: false,
        });
    }
    avatar.fire_cooldown = state.ship.fire_interval();
}

/// True if a hostile may shoot this tick under the current conditions
pub fn can_shoot(kind: HostileKind, event: Option<GlobalEvent>, difficulty: u8) -> bool {
    if kind == HostileKind::Meteor {
        return false;
    }
    event == Some(GlobalEvent::BulletHell) || (difficulty > 2 && kind == HostileKind::Tank)
}

/// Hostile fire control
pub fn fire_hostiles(state: &mut GameState, dt: f32) {
    let event = state.stats.active_event;
    let difficulty = state.stats.difficulty;
    let spiral = event == Some(GlobalEvent::BulletHell);
    let EntityStore {
        hostiles,
        projectiles,
        ..
    } = &mut state.store;

    for hostile in hostiles.iter_mut() {
        if hostile.dead || hostile.kind == HostileKind::Meteor {
            continue;
        }
        hostile.fire_cooldown -= dt;
        if hostile.fire_cooldown > 0.0 || !can_shoot(hostile.kind, event, difficulty) {
            continue;
        }

        let muzzle = Vec2::new(hostile.pos.x, hostile.pos.y + hostile.half.y);
        let mut shoot = |vel: Vec2, tint: Tint| {
            projectiles.push(Projectile {
                pos: muzzle,
                half: HOSTILE_PROJECTILE_HALF,
                vel,
                damage: 1.0,
                tint,
                owner: Owner::Hostile,
                dead: false,
            });
        };
        shoot(Vec2::new(0.0, HOSTILE_PROJECTILE_SPEED), Tint::Enemy);
        if spiral {
            shoot(Vec2::new(-SPIRAL_LATERAL_SPEED, SPIRAL_DESCENT_SPEED), Tint::Spiral);
            shoot(Vec2::new(SPIRAL_LATERAL_SPEED, SPIRAL_DESCENT_SPEED), Tint::Spiral);
        }
        hostile.fire_cooldown = HOSTILE_FIRE_INTERVAL;
    }
}

/// Outcome of a damaging contact on the avatar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Avatar was invulnerable; nothing happened
    Ignored,
    /// Shield absorbed the hit
    Absorbed,
    /// Avatar lost one health
    Damaged,
}

/// Contact source, which decides the shield-break bonus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitSource {
    Body,
    Projectile,
}

/// Apply one damaging contact to the avatar. Shield is consumed before health.
pub fn hit_avatar(avatar: &mut Avatar, source: HitSource) -> HitOutcome {
    if avatar.is_invulnerable() {
        return HitOutcome::Ignored;
    }
    if avatar.shield {
        avatar.shield = false;
        if source == HitSource::Body {
            avatar.invulnerable = SHIELD_BREAK_INVULNERABILITY;
        }
        return HitOutcome::Absorbed;
    }
    avatar.take_hit();
    avatar.invulnerable = DAMAGE_INVULNERABILITY;
    HitOutcome::Damaged
}

/// Pending cosmetic burst
struct Burst {
    pos: Vec2,
    tint: Tint,
    count: usize,
}

/// Side effects collected while iterating, applied once iteration is done
#[derive(Default)]
struct Deferred {
    bursts: Vec<Burst>,
    drops: Vec<Vec2>,
    damaged: bool,
}

impl Deferred {
    fn burst(&mut self, pos: Vec2, tint: Tint, count: usize) {
        self.bursts.push(Burst { pos, tint, count });
    }
}

/// Resolve every interaction for this tick
pub fn resolve(state: &mut GameState) {
    let mut deferred = Deferred::default();

    body_collisions(state, &mut deferred);
    projectile_hits(state, &mut deferred);
    hostile_projectile_hits(state, &mut deferred);
    collect_pickups(state, &mut deferred);

    // Drops roll against the same combo the kill was paid at
    for pos in deferred.drops {
        spawner::roll_drop(state, pos);
    }
    if deferred.damaged {
        state.stats.reset_on_damage();
    }
    for burst in deferred.bursts {
        spawn_burst(state, burst.pos, burst.tint, burst.count);
    }
}

/// Hostile vs avatar body: contact always destroys the hostile
fn body_collisions(state: &mut GameState, fx: &mut Deferred) {
    let GameState { avatar, store, .. } = state;

    for hostile in store.hostiles.iter_mut() {
        if hostile.dead || avatar.is_invulnerable() {
            continue;
        }
        if !boxes_overlap(avatar.pos, avatar.half, hostile.pos, hostile.half) {
            continue;
        }
        if hit_avatar(avatar, HitSource::Body) == HitOutcome::Damaged {
            fx.damaged = true;
            fx.burst(avatar.pos, Tint::ShipBase, BURST_AVATAR_DAMAGE);
        }
        hostile.health = 0.0;
        hostile.dead = true;
        log::debug!("Ram kill on {} {}", hostile.kind.as_str(), hostile.id);
        fx.burst(hostile.pos, Tint::Hostile(hostile.kind), BURST_RAM);
    }
}

/// Avatar projectiles vs hostiles
fn projectile_hits(state: &mut GameState, fx: &mut Deferred) {
    let GameState { store, stats, .. } = state;
    let EntityStore {
        hostiles,
        projectiles,
        ..
    } = store;

    for hostile in hostiles.iter_mut() {
        for projectile in projectiles.iter_mut() {
            if hostile.dead {
                break;
            }
            if projectile.dead || projectile.owner != Owner::Avatar {
                continue;
            }
            if !boxes_overlap(projectile.pos, projectile.half, hostile.pos, hostile.half) {
                continue;
            }

            projectile.dead = true;
            hostile.health -= projectile.damage;
            hostile.hit_flash = HIT_FLASH_DURATION;
            fx.burst(projectile.pos, Tint::Spark, BURST_IMPACT);

            if hostile.health <= 0.0 {
                kill(hostile, stats, fx);
            }
        }
    }
}

fn kill(hostile: &mut Hostile, stats: &mut RunStats, fx: &mut Deferred) {
    hostile.dead = true;
    let points = stats.register_kill(hostile.score_value);
    log::debug!(
        "Killed {} {} for {} (combo {})",
        hostile.kind.as_str(),
        hostile.id,
        points,
        stats.combo
    );
    fx.burst(hostile.pos, Tint::Hostile(hostile.kind), BURST_KILL);
    fx.drops.push(hostile.pos);
}

/// Hostile projectiles vs avatar
fn hostile_projectile_hits(state: &mut GameState, fx: &mut Deferred) {
    let GameState { avatar, store, .. } = state;

    for projectile in store.projectiles.iter_mut() {
        if projectile.dead || projectile.owner != Owner::Hostile || avatar.is_invulnerable() {
            continue;
        }
        if !boxes_overlap(projectile.pos, projectile.half, avatar.pos, avatar.half) {
            continue;
        }
        projectile.dead = true;
        if hit_avatar(avatar, HitSource::Projectile) == HitOutcome::Damaged {
            fx.damaged = true;
        }
        fx.burst(avatar.pos, Tint::ShipExplosion, BURST_RAM);
    }
}

/// Pickups vs avatar
fn collect_pickups(state: &mut GameState, fx: &mut Deferred) {
    let mut collected = Vec::new();
    for pickup in state.store.pickups.iter_mut() {
        if pickup.dead {
            continue;
        }
        if boxes_overlap(pickup.pos, pickup.half, state.avatar.pos, state.avatar.half) {
            pickup.dead = true;
            collected.push(pickup.kind);
        }
    }
    for kind in collected {
        apply_pickup(state, kind, fx);
    }
}

fn apply_pickup(state: &mut GameState, kind: PickupKind, fx: &mut Deferred) {
    let bonus = if kind == PickupKind::Coin {
        COIN_SCORE
    } else {
        PICKUP_SCORE
    };
    state.stats.register_pickup(bonus);
    log::debug!("Collected {:?}", kind);

    match kind {
        PickupKind::Shield => state.avatar.shield = true,
        PickupKind::TripleShot => state.avatar.upgrade_weapon(state.stats.time),
        PickupKind::Nuke => {
            for hostile in state.store.hostiles.iter_mut().filter(|h| !h.dead) {
                hostile.dead = true;
                state.stats.score += hostile.score_value as u64;
                fx.burst(hostile.pos, Tint::Hostile(hostile.kind), BURST_NUKE);
            }
        }
        PickupKind::Coin => {
            state.stats.coins_collected += 1;
            state.events.push(GameEvent::CoinsEarned { amount: 1 });
        }
        PickupKind::Health => {
            state.avatar.health = (state.avatar.health + 1).min(state.avatar.max_health);
        }
    }
}

/// Scatter cosmetic particles
pub fn spawn_burst(state: &mut GameState, pos: Vec2, tint: Tint, count: usize) {
    for _ in 0..count {
        let vel = Vec2::new(
            state.rng.random_range(-150.0..150.0),
            state.rng.random_range(-150.0..150.0),
        );
        let size = state.rng.random_range(2.0..6.0);
        state.store.add_particle(Particle {
            pos,
            vel,
            tint,
            life: PARTICLE_LIFE,
            size,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ship::ShipConfig;
    use crate::sim::pattern::MovementPattern;
    use crate::sim::state::Pickup;
    use proptest::prelude::*;

    fn new_state() -> GameState {
        GameState::new(1234, ShipConfig::default())
    }

    fn hostile_at(state: &mut GameState, kind: HostileKind, pos: Vec2, health: f32) {
        let id = state.next_entity_id();
        state.store.add_hostile(Hostile {
            id,
            kind,
            pos,
            half: Vec2::splat(24.0),
            vel: Vec2::ZERO,
            descent: 0.0,
            drift: 0.0,
            health,
            max_health: health,
            score_value: 10,
            pattern: MovementPattern::Straight,
            phase: 0.0,
            fire_cooldown: 10.0,
            hit_flash: 0.0,
            dead: false,
        });
    }

    fn enemy_shot(pos: Vec2) -> Projectile {
        Projectile {
            pos,
            half: HOSTILE_PROJECTILE_HALF,
            vel: Vec2::new(0.0, 400.0),
            damage: 1.0,
            tint: Tint::Enemy,
            owner: Owner::Hostile,
            dead: false,
        }
    }

    fn pickup_at(state: &mut GameState, kind: PickupKind) {
        let pos = state.avatar.pos;
        state.store.add_pickup(Pickup {
            kind,
            pos,
            half: Vec2::splat(PICKUP_HALF_SIZE),
            vel: Vec2::ZERO,
            dead: false,
        });
    }

    #[test]
    fn test_volley_widths() {
        assert_eq!(volley(1).len(), 1);
        assert_eq!(volley(2).len(), 3);
        assert_eq!(volley(3).len(), 5);
    }

    #[test]
    fn test_shielded_ram_kill() {
        let mut state = new_state();
        state.avatar.shield = true;
        let pos = state.avatar.pos;
        hostile_at(&mut state, HostileKind::Tank, pos, 500.0);

        resolve(&mut state);

        assert!(state.store.hostiles[0].dead);
        assert!(!state.avatar.shield);
        assert_eq!(state.avatar.invulnerable, SHIELD_BREAK_INVULNERABILITY);
        assert_eq!(state.avatar.health, 3);
    }

    #[test]
    fn test_unshielded_ram_damages_and_resets() {
        let mut state = new_state();
        state.stats.combo = 30;
        state.stats.multiplier_progress = 60;
        state.stats.multiplier = 3;
        let pos = state.avatar.pos;
        hostile_at(&mut state, HostileKind::Basic, pos, 10.0);

        resolve(&mut state);

        assert!(state.store.hostiles[0].dead);
        assert_eq!(state.avatar.health, 2);
        assert_eq!(state.avatar.invulnerable, DAMAGE_INVULNERABILITY);
        assert_eq!(state.stats.combo, 0);
        assert_eq!(state.stats.multiplier_progress, 0);
        assert_eq!(state.stats.multiplier, 1);
        assert!(!state.store.particles.is_empty());
    }

    #[test]
    fn test_invulnerable_avatar_ignores_contact() {
        let mut state = new_state();
        state.avatar.invulnerable = 0.5;
        let pos = state.avatar.pos;
        hostile_at(&mut state, HostileKind::Basic, pos, 10.0);
        state.store.add_projectile(enemy_shot(pos));

        resolve(&mut state);

        assert!(!state.store.hostiles[0].dead);
        assert!(!state.store.projectiles[0].dead);
        assert_eq!(state.avatar.health, 3);
    }

    #[test]
    fn test_shield_absorbs_projectile_without_invulnerability() {
        let mut state = new_state();
        state.avatar.shield = true;
        state.stats.combo = 5;
        let pos = state.avatar.pos;
        state.store.add_projectile(enemy_shot(pos));

        resolve(&mut state);

        assert!(state.store.projectiles[0].dead);
        assert!(!state.avatar.shield);
        assert_eq!(state.avatar.health, 3);
        assert_eq!(state.avatar.invulnerable, 0.0);
        assert_eq!(state.stats.combo, 5);
    }

    #[test]
    fn test_projectile_hit_damages_avatar_once() {
        let mut state = new_state();
        let pos = state.avatar.pos;
        state.store.add_projectile(enemy_shot(pos));
        state.store.add_projectile(enemy_shot(pos));

        resolve(&mut state);

        // Second shot lands inside the invulnerability window
        assert_eq!(state.avatar.health, 2);
        assert!(state.store.projectiles[0].dead);
        assert!(!state.store.projectiles[1].dead);
    }

    #[test]
    fn test_projectile_kill_rewards() {
        let mut state = new_state();
        hostile_at(&mut state, HostileKind::Basic, Vec2::new(300.0, 200.0), 15.0);
        let shot = |y| Projectile {
            pos: Vec2::new(300.0, y),
            half: AVATAR_PROJECTILE_HALF,
            vel: Vec2::ZERO,
            damage: 10.0,
            tint: Tint::ShipBase,
            owner: Owner::Avatar,
            dead: false,
        };
        state.store.add_projectile(shot(200.0));
        resolve(&mut state);
        assert!(!state.store.hostiles[0].dead);
        assert!(state.store.hostiles[0].just_hit());
        assert_eq!(state.stats.score, 0);

        state.store.add_projectile(shot(205.0));
        resolve(&mut state);
        assert!(state.store.hostiles[0].dead);
        assert_eq!(state.stats.score, 10);
        assert_eq!(state.stats.combo, 1);
        assert_eq!(state.stats.enemies_defeated, 1);
        assert_eq!(state.stats.multiplier_progress, 1);
    }

    #[test]
    fn test_dead_hostile_absorbs_no_more_projectiles() {
        let mut state = new_state();
        hostile_at(&mut state, HostileKind::Basic, Vec2::new(300.0, 200.0), 5.0);
        for _ in 0..3 {
            state.store.add_projectile(Projectile {
                pos: Vec2::new(300.0, 200.0),
                half: AVATAR_PROJECTILE_HALF,
                vel: Vec2::ZERO,
                damage: 10.0,
                tint: Tint::ShipBase,
                owner: Owner::Avatar,
                dead: false,
            });
        }
        resolve(&mut state);
        let spent = state.store.projectiles.iter().filter(|p| p.dead).count();
        assert_eq!(spent, 1);
        assert_eq!(state.stats.enemies_defeated, 1);
    }

    #[test]
    fn test_pickup_effects() {
        let mut state = new_state();
        state.stats.time = 12.0;

        pickup_at(&mut state, PickupKind::Shield);
        resolve(&mut state);
        assert!(state.avatar.shield);
        assert_eq!(state.stats.score, PICKUP_SCORE);
        assert_eq!(state.stats.combo, 1);

        pickup_at(&mut state, PickupKind::TripleShot);
        resolve(&mut state);
        assert_eq!(state.avatar.weapon_tier, 2);
        assert_eq!(state.avatar.weapon_expiry, Some(22.0));

        pickup_at(&mut state, PickupKind::Coin);
        resolve(&mut state);
        assert_eq!(state.stats.coins_collected, 1);
        assert_eq!(state.stats.score, 2 * PICKUP_SCORE + COIN_SCORE);
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::CoinsEarned { amount: 1 })
        );
    }

    #[test]
    fn test_nuke_clears_field() {
        let mut state = new_state();
        hostile_at(&mut state, HostileKind::Basic, Vec2::new(100.0, 100.0), 10.0);
        hostile_at(&mut state, HostileKind::Tank, Vec2::new(400.0, 100.0), 40.0);
        pickup_at(&mut state, PickupKind::Nuke);

        resolve(&mut state);

        assert!(state.store.hostiles.iter().all(|h| h.dead));
        assert_eq!(state.stats.score, PICKUP_SCORE + 20);
        state.store.compact();
        assert!(state.store.hostiles.is_empty());
    }

    #[test]
    fn test_legacy_health_pickup_caps() {
        let mut state = new_state();
        state.avatar.health = 2;
        pickup_at(&mut state, PickupKind::Health);
        resolve(&mut state);
        assert_eq!(state.avatar.health, 3);
        pickup_at(&mut state, PickupKind::Health);
        resolve(&mut state);
        assert_eq!(state.avatar.health, 3);
    }

    #[test]
    fn test_hostile_fire_rules() {
        assert!(!can_shoot(HostileKind::Tank, None, 2));
        assert!(can_shoot(HostileKind::Tank, None, 3));
        assert!(!can_shoot(HostileKind::Basic, None, 5));
        assert!(can_shoot(HostileKind::Basic, Some(GlobalEvent::BulletHell), 1));
        assert!(!can_shoot(HostileKind::Meteor, Some(GlobalEvent::BulletHell), 5));
    }

    #[test]
    fn test_bullet_hell_spiral() {
        let mut state = new_state();
        state.stats.active_event = Some(GlobalEvent::BulletHell);
        hostile_at(&mut state, HostileKind::Basic, Vec2::new(300.0, 100.0), 10.0);
        state.store.hostiles[0].fire_cooldown = 0.0;

        fire_hostiles(&mut state, 0.016);

        assert_eq!(state.store.projectiles.len(), 3);
        assert!(state.store.projectiles.iter().all(|p| p.owner == Owner::Hostile));
        assert_eq!(state.store.hostiles[0].fire_cooldown, HOSTILE_FIRE_INTERVAL);
    }

    #[test]
    fn test_avatar_fire_uses_ship_stats() {
        let ship = ShipConfig {
            attack: 2.0,
            damage_multiplier: 1.5,
            fire_rate_multiplier: 2.0,
            ..Default::default()
        };
        let mut state = GameState::new(5, ship);
        state.avatar.weapon_tier = 2;
        fire_avatar(&mut state, 0.016);
        assert_eq!(state.store.projectiles.len(), 3);
        assert_eq!(state.store.projectiles[0].damage, 30.0);
        assert_eq!(state.avatar.fire_cooldown, 0.1);

        // Still cooling down
        fire_avatar(&mut state, 0.016);
        assert_eq!(state.store.projectiles.len(), 3);
    }

    #[test]
    fn test_tank_fires_above_difficulty_two() {
        let mut state = new_state();
        hostile_at(&mut state, HostileKind::Tank, Vec2::new(300.0, 100.0), 40.0);
        hostile_at(&mut state, HostileKind::Basic, Vec2::new(100.0, 100.0), 10.0);
        for hostile in state.store.hostiles.iter_mut() {
            hostile.fire_cooldown = 0.0;
        }

        state.stats.difficulty = 2;
        fire_hostiles(&mut state, 0.016);
        assert!(state.store.projectiles.is_empty());

        state.stats.difficulty = 3;
        fire_hostiles(&mut state, 0.016);
        assert_eq!(state.store.projectiles.len(), 1);
        let shot = &state.store.projectiles[0];
        assert_eq!(shot.vel, Vec2::new(0.0, HOSTILE_PROJECTILE_SPEED));
        assert_eq!(shot.owner, Owner::Hostile);
        assert_eq!(shot.pos, Vec2::new(300.0, 124.0));
        assert_eq!(state.store.hostiles[0].fire_cooldown, HOSTILE_FIRE_INTERVAL);

        // Cooling down: no second shot on the next frame
        fire_hostiles(&mut state, 0.016);
        assert_eq!(state.store.projectiles.len(), 1);
    }

    #[test]
    fn test_meteor_never_fires() {
        let mut state = new_state();
        state.stats.active_event = Some(GlobalEvent::BulletHell);
        state.stats.difficulty = 5;
        hostile_at(&mut state, HostileKind::Meteor, Vec2::new(300.0, 100.0), 20.0);
        state.store.hostiles[0].fire_cooldown = 0.0;
        fire_hostiles(&mut state, 0.016);
        assert!(state.store.projectiles.is_empty());
    }

    /// Avatar shot sitting on a hostile, lethal on contact
    fn lethal_shot(pos: Vec2) -> Projectile {
        Projectile {
            pos,
            half: AVATAR_PROJECTILE_HALF,
            vel: Vec2::ZERO,
            damage: 100.0,
            tint: Tint::ShipBase,
            owner: Owner::Avatar,
            dead: false,
        }
    }

    #[test]
    fn test_kill_and_damage_in_same_tick_share_combo() {
        let target = Vec2::new(300.0, 200.0);
        let mut mismatches = Vec::new();

        for seed in 0..300u64 {
            // Kill only
            let mut calm = GameState::new(seed, ShipConfig::default());
            calm.stats.combo = 60;
            hostile_at(&mut calm, HostileKind::Basic, target, 10.0);
            calm.store.add_projectile(lethal_shot(target));
            resolve(&mut calm);

            // Same kill while a hostile rams the avatar
            let mut rammed = GameState::new(seed, ShipConfig::default());
            rammed.stats.combo = 60;
            hostile_at(&mut rammed, HostileKind::Basic, target, 10.0);
            rammed.store.add_projectile(lethal_shot(target));
            let avatar_pos = rammed.avatar.pos;
            hostile_at(&mut rammed, HostileKind::Basic, avatar_pos, 10.0);
            resolve(&mut rammed);

            // Reward uses the pre-kill combo, then damage clears it
            assert_eq!(rammed.stats.score, 40);
            assert_eq!(rammed.stats.combo, 0);
            assert_eq!(rammed.avatar.health, 2);

            let calm_drops: Vec<_> = calm.store.pickups.iter().map(|p| p.kind).collect();
            let rammed_drops: Vec<_> = rammed.store.pickups.iter().map(|p| p.kind).collect();
            if calm_drops != rammed_drops {
                mismatches.push(seed);
            }
        }
        assert!(mismatches.is_empty(), "drop rolls diverged for seeds {:?}", mismatches);
    }

    proptest! {
        #[test]
        fn health_clamps_at_zero(max_health in 1u32..10, hits in 0u32..30) {
            let mut avatar = Avatar::new(max_health);
            for _ in 0..hits {
                avatar.invulnerable = 0.0;
                prop_assert_eq!(hit_avatar(&mut avatar, HitSource::Projectile), HitOutcome::Damaged);
            }
            prop_assert_eq!(avatar.health, max_health.saturating_sub(hits));
            prop_assert!(avatar.health <= avatar.max_health);
        }

        #[test]
        fn shield_always_absorbs_first_hit(max_health in 1u32..10, body in any::<bool>()) {
            let mut avatar = Avatar::new(max_health);
            avatar.shield = true;
            let source = if body { HitSource::Body } else { HitSource::Projectile };
            prop_assert_eq!(hit_avatar(&mut avatar, source), HitOutcome::Absorbed);
            prop_assert_eq!(avatar.health, max_health);
            prop_assert!(!avatar.shield);
            prop_assert_eq!(avatar.is_invulnerable(), body);
        }
    }
}
