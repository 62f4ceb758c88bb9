//! Entity collections
//!
//! Entities are never removed mid-tick. Sub-steps flag them `dead` and
//! [`EntityStore::compact`] drops flagged entries once at the end of the tick,
//! so later sub-steps can still read a dead entity's last state.

use serde::{Deserialize, Serialize};

use super::state::{Hostile, Particle, Pickup, Projectile};
use crate::consts::MAX_PARTICLES;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityStore {
    pub projectiles: Vec<Projectile>,
    pub hostiles: Vec<Hostile>,
    pub pickups: Vec<Pickup>,
    /// Visual particles (not gameplay-affecting)
    #[serde(skip)]
    pub particles: Vec<Particle>,
}

impl EntityStore {
    pub fn add_projectile(&mut self, projectile: Projectile) {
        self.projectiles.push(projectile);
    }

    pub fn add_hostile(&mut self, hostile: Hostile) {
        self.hostiles.push(hostile);
    }

    pub fn add_pickup(&mut self, pickup: Pickup) {
        self.pickups.push(pickup);
    }

    /// Add a particle unless the cap is reached
    pub fn add_particle(&mut self, particle: Particle) {
        if self.particles.len() < MAX_PARTICLES {
            self.particles.push(particle);
        }
    }

    /// Drop every entity flagged for deletion
    pub fn compact(&mut self) {
        self.projectiles.retain(|p| !p.dead);
        self.hostiles.retain(|h| !h.dead);
        self.pickups.retain(|p| !p.dead);
        self.particles.retain(|p| p.life > 0.0);
    }

    pub fn live_hostiles(&self) -> impl Iterator<Item = &Hostile> {
        self.hostiles.iter().filter(|h| !h.dead)
    }

    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty()
            && self.hostiles.is_empty()
            && self.pickups.is_empty()
            && self.particles.is_empty()
    }
}
