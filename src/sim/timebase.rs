//! Frame delta to simulation time conversion
//!
//! Difficulty is a pure function of elapsed time: one tier per minute, capped at 5.

use serde::{Deserialize, Serialize};

use super::state::RunStats;

/// Seconds per difficulty tier
pub const DIFFICULTY_STEP: f32 = 60.0;
/// Highest difficulty tier
pub const MAX_DIFFICULTY: u8 = 5;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timebase {
    /// Set once the first frame has been observed
    primed: bool,
}

impl Timebase {
    /// Convert a frame duration to seconds and accumulate it into `stats`.
    ///
    /// The first observed frame only primes the timebase and returns 0.
    pub fn advance(&mut self, stats: &mut RunStats, frame_ms: f32) -> f32 {
        if !self.primed {
            self.primed = true;
            return 0.0;
        }
        let dt = (frame_ms / 1000.0).max(0.0);
        stats.time += dt;
        stats.difficulty = difficulty_at(stats.time);
        dt
    }
}

/// `min(5, 1 + floor(time / 60))`, saturating for any time including infinity
pub fn difficulty_at(time: f32) -> u8 {
    let steps = (time.max(0.0) / DIFFICULTY_STEP).floor();
    steps.min((MAX_DIFFICULTY - 1) as f32) as u8 + 1
}
