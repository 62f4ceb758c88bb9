//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only, stored in the state
//! - Stable iteration order (insertion order, compacted once per tick)
//! - No rendering, audio or platform dependencies

pub mod checkpoint;
pub mod collision;
pub mod combat;
pub mod events;
pub mod pattern;
pub mod scoring;
pub mod spawner;
pub mod state;
pub mod store;
pub mod tick;
pub mod timebase;

pub use checkpoint::{CheckpointDecision, CheckpointGate, CheckpointSnapshot};
pub use collision::{Aabb, boxes_overlap};
pub use events::{EventDirector, GlobalEvent};
pub use pattern::{BoundaryPolicy, MovementPattern, velocity};
pub use state::{
    Avatar, GameEvent, GamePhase, GameState, Hostile, HostileKind, Owner, Particle, Pickup,
    PickupKind, Projectile, RunStats, Tint,
};
pub use store::EntityStore;
pub use tick::{TickInput, tick};
