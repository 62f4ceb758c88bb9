//! Game state and core simulation types
//!
//! Everything a run needs lives in [`GameState`], which the host owns and passes
//! into [`tick`](super::tick::tick) once per frame.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::checkpoint::{CheckpointGate, CheckpointSnapshot};
use super::events::{EventDirector, GlobalEvent};
use super::pattern::MovementPattern;
use super::store::EntityStore;
use super::timebase::Timebase;
use crate::consts::*;
use crate::ship::ShipConfig;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Frozen at a checkpoint until the host decides to continue or save
    AwaitingCheckpoint,
    /// Health reached zero
    GameOver,
    /// Host saved and quit at a checkpoint
    Ended,
}

/// Cosmetic tint identifier for projectiles and particles.
///
/// The host maps these onto the ship's color strings or its own palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tint {
    /// Ship base color (avatar projectiles, avatar damage bursts)
    ShipBase,
    /// Ship explosion color
    ShipExplosion,
    /// Color of a hostile type
    Hostile(HostileKind),
    /// Plain hostile projectile
    Enemy,
    /// Spiral projectile fired during BULLET_HELL
    Spiral,
    /// Impact spark
    Spark,
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Avatar {
    /// Center position
    pub pos: Vec2,
    pub half: Vec2,
    pub health: u32,
    pub max_health: u32,
    /// Seconds of remaining invulnerability
    pub invulnerable: f32,
    /// Absorbs exactly one hit
    pub shield: bool,
    /// Weapon tier (1-3), widens the projectile fan
    pub weapon_tier: u8,
    /// Simulation time at which the weapon tier reverts to 1
    pub weapon_expiry: Option<f32>,
    /// Seconds until the next volley
    pub fire_cooldown: f32,
}

impl Avatar {
    pub fn new(max_health: u32) -> Self {
        Self {
            pos: Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT - 100.0 + AVATAR_HALF_HEIGHT),
            half: Vec2::new(AVATAR_HALF_WIDTH, AVATAR_HALF_HEIGHT),
            health: max_health,
            max_health,
            invulnerable: 0.0,
            shield: false,
            weapon_tier: 1,
            weapon_expiry: None,
            fire_cooldown: 0.0,
        }
    }

    #[inline]
    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable > 0.0
    }

    /// Step the invulnerability window and revert an expired weapon upgrade
    pub fn update_timers(&mut self, dt: f32, now: f32) {
        if self.invulnerable > 0.0 {
            self.invulnerable = (self.invulnerable - dt).max(0.0);
        }
        if let Some(expiry) = self.weapon_expiry {
            if now >= expiry {
                log::debug!("Weapon tier {} expired", self.weapon_tier);
                self.weapon_tier = 1;
                self.weapon_expiry = None;
            }
        }
    }

    /// Stack one weapon tier and restart the reversion window
    pub fn upgrade_weapon(&mut self, now: f32) {
        self.weapon_tier = (self.weapon_tier + 1).min(MAX_WEAPON_TIER);
        self.weapon_expiry = Some(now + WEAPON_TIER_DURATION);
    }

    /// Remove one point of health, clamped at zero
    pub fn take_hit(&mut self) {
        self.health = self.health.saturating_sub(1);
    }
}

/// Hostile types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HostileKind {
    Basic,
    Fast,
    Tank,
    Boss,
    Meteor,
}

impl HostileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HostileKind::Basic => "BASIC",
            HostileKind::Fast => "FAST",
            HostileKind::Tank => "TANK",
            HostileKind::Boss => "BOSS",
            HostileKind::Meteor => "METEOR",
        }
    }
}

/// A hostile entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hostile {
    pub id: u32,
    pub kind: HostileKind,
    pub pos: Vec2,
    pub half: Vec2,
    /// Velocity applied on the last movement step
    pub vel: Vec2,
    /// Base downward speed (pixels/s) before event scaling
    pub descent: f32,
    /// Constant lateral drift added on top of the pattern (meteors)
    #[serde(default)]
    pub drift: f32,
    pub health: f32,
    pub max_health: f32,
    pub score_value: u32,
    pub pattern: MovementPattern,
    /// Pattern phase accumulator (radians)
    pub phase: f32,
    pub fire_cooldown: f32,
    /// Remaining "just-hit" flash time
    pub hit_flash: f32,
    #[serde(default)]
    pub dead: bool,
}

impl Hostile {
    #[inline]
    pub fn just_hit(&self) -> bool {
        self.hit_flash > 0.0
    }
}

/// Which side fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Avatar,
    Hostile,
}

/// A projectile entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub half: Vec2,
    pub vel: Vec2,
    pub damage: f32,
    pub tint: Tint,
    pub owner: Owner,
    #[serde(default)]
    pub dead: bool,
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    Shield,
    TripleShot,
    Nuke,
    Coin,
    /// Legacy heal, never produced by the drop table
    Health,
}

/// A pickup entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub kind: PickupKind,
    pub pos: Vec2,
    pub half: Vec2,
    pub vel: Vec2,
    #[serde(default)]
    pub dead: bool,
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub tint: Tint,
    /// Seconds remaining
    pub life: f32,
    pub size: f32,
}

/// The authoritative scoreboard of one run.
///
/// `health` and `max_health` mirror the avatar and are refreshed at the end of
/// every tick, so copies handed to the host are always consistent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    pub score: u64,
    pub combo: u32,
    pub combo_decay_timer: f32,
    /// Score multiplier tier (1-5)
    pub multiplier: u8,
    pub multiplier_progress: u32,
    pub multiplier_decay_timer: f32,
    /// Elapsed simulated seconds
    pub time: f32,
    /// Difficulty tier (1-5)
    pub difficulty: u8,
    pub active_event: Option<GlobalEvent>,
    pub coins_collected: u32,
    pub max_combo: u32,
    pub enemies_defeated: u32,
    pub health: u32,
    pub max_health: u32,
}

impl RunStats {
    pub fn new(max_health: u32) -> Self {
        Self {
            score: 0,
            combo: 0,
            combo_decay_timer: 0.0,
            multiplier: 1,
            multiplier_progress: 0,
            multiplier_decay_timer: 0.0,
            time: 0.0,
            difficulty: 1,
            active_event: None,
            coins_collected: 0,
            max_combo: 0,
            enemies_defeated: 0,
            health: max_health,
            max_health,
        }
    }
}

/// Output produced for the host, drained after each tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Throttled (~10 Hz) stats snapshot for UI
    StatsUpdated(RunStats),
    /// Coins credited to the player's wallet
    CoinsEarned { amount: u32 },
    /// A 300-second boundary was crossed; the run is frozen until resolved
    CheckpointReached(CheckpointSnapshot),
    /// Terminal: health reached zero
    GameOver(RunStats),
    EventStarted(GlobalEvent),
    EventEnded(GlobalEvent),
}

/// Complete run state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub ship: ShipConfig,
    pub stats: RunStats,
    pub avatar: Avatar,
    pub store: EntityStore,
    pub timebase: Timebase,
    pub director: EventDirector,
    pub checkpoint: CheckpointGate,
    /// Seconds accumulated toward the next spawn
    pub spawn_timer: f32,
    /// Seconds accumulated toward the next stats snapshot
    pub stats_timer: f32,
    /// Pending host output
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new run with the given seed and ship
    pub fn new(seed: u64, ship: ShipConfig) -> Self {
        let max_health = ship.max_health();
        log::info!(
            "New run: seed={} ship={} health={}",
            seed,
            ship.id,
            max_health
        );
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            ship,
            stats: RunStats::new(max_health),
            avatar: Avatar::new(max_health),
            store: EntityStore::default(),
            timebase: Timebase::default(),
            director: EventDirector::default(),
            checkpoint: CheckpointGate::default(),
            spawn_timer: 0.0,
            stats_timer: 0.0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Copy of the scoreboard with health mirrored from the avatar
    pub fn snapshot(&self) -> RunStats {
        let mut stats = self.stats.clone();
        stats.health = self.avatar.health;
        stats.max_health = self.avatar.max_health;
        stats
    }

    /// Take all pending host output
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Live hostiles of the given kind (not yet flagged dead)
    pub fn count_alive(&self, kind: HostileKind) -> usize {
        self.store.live_hostiles().filter(|h| h.kind == kind).count()
    }

    /// Mark the run over and emit the terminal event (once)
    pub(crate) fn finish(&mut self) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::GameOver;
        let stats = self.snapshot();
        log::info!(
            "Game over at {:.1}s: score={} kills={} max_combo={}",
            stats.time,
            stats.score,
            stats.enemies_defeated,
            stats.max_combo
        );
        self.events.push(GameEvent::GameOver(stats));
    }
}
