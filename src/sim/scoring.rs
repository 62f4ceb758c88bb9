//! Combo, score multiplier and reward rules
//!
//! Two counters drive scoring. `combo` counts kills and pickups, decays after
//! 2s of no kills and feeds the combo multiplier. `multiplier_progress` counts
//! kills only, decays every 1.5s idle and selects the 1x-5x tier. Any damage to
//! the avatar zeroes both.

use super::state::RunStats;

/// Idle seconds before combo starts to decay
pub const COMBO_DECAY_DELAY: f32 = 2.0;
/// Idle seconds per multiplier progress decrement
pub const MULTIPLIER_DECAY_INTERVAL: f32 = 1.5;

/// Progress needed to reach tiers 2..=5
const TIER_THRESHOLDS: [u32; 4] = [25, 55, 100, 150];

/// Combo step multiplier: 1.0, 1.5 (>10), 2.5 (>25), 4.0 (>50)
pub fn combo_multiplier(combo: u32) -> f32 {
    if combo > 50 {
        4.0
    } else if combo > 25 {
        2.5
    } else if combo > 10 {
        1.5
    } else {
        1.0
    }
}

/// Score multiplier tier for a progress count
pub fn multiplier_tier(progress: u32) -> u8 {
    1 + TIER_THRESHOLDS.iter().filter(|&&t| progress >= t).count() as u8
}

/// `floor(base * combo multiplier * tier)`
pub fn kill_reward(base: u32, combo: u32, tier: u8) -> u64 {
    (base as f32 * combo_multiplier(combo) * tier as f32).floor() as u64
}

impl RunStats {
    /// Credit a kill; returns the points awarded
    pub fn register_kill(&mut self, base_score: u32) -> u64 {
        let points = kill_reward(base_score, self.combo, self.multiplier);
        self.score += points;
        self.bump_combo();
        self.combo_decay_timer = 0.0;
        self.enemies_defeated += 1;

        self.multiplier_progress += 1;
        self.multiplier_decay_timer = 0.0;
        let tier = multiplier_tier(self.multiplier_progress);
        if tier != self.multiplier {
            log::debug!("Multiplier {}x -> {}x", self.multiplier, tier);
        }
        self.multiplier = tier;
        points
    }

    /// Credit a pickup: flat bonus plus one combo
    pub fn register_pickup(&mut self, bonus: u64) {
        self.score += bonus;
        self.bump_combo();
    }

    /// Avatar took damage: drop combo and multiplier back to their base state
    pub fn reset_on_damage(&mut self) {
        self.combo = 0;
        self.combo_decay_timer = 0.0;
        self.multiplier_progress = 0;
        self.multiplier_decay_timer = 0.0;
        self.multiplier = 1;
    }

    /// Idle decay of combo and multiplier progress
    pub fn decay(&mut self, dt: f32) {
        if self.combo > 0 {
            self.combo_decay_timer += dt;
            if self.combo_decay_timer > COMBO_DECAY_DELAY {
                self.combo -= 1;
                // Subsequent decrements every second
                self.combo_decay_timer = COMBO_DECAY_DELAY - 1.0;
            }
        } else {
            self.combo_decay_timer = 0.0;
        }

        if self.multiplier_progress > 0 {
            self.multiplier_decay_timer += dt;
            if self.multiplier_decay_timer >= MULTIPLIER_DECAY_INTERVAL {
                self.multiplier_progress -= 1;
                self.multiplier_decay_timer = 0.0;
                self.multiplier = multiplier_tier(self.multiplier_progress);
            }
        } else {
            self.multiplier_decay_timer = 0.0;
        }
    }

    fn bump_combo(&mut self) {
        self.combo += 1;
        self.max_combo = self.max_combo.max(self.combo);
    }
}
