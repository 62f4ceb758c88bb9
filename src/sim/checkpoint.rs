//! Periodic checkpoint gate
//!
//! Every 300 simulated seconds the run freezes and the host decides whether to
//! persist and end the run or to continue. Boundaries are measured from run
//! start, so a slow host decision never shifts the next checkpoint.

use serde::{Deserialize, Serialize};

use super::events::GlobalEvent;
use super::state::{GameEvent, GamePhase, GameState};

/// Seconds between checkpoints
pub const CHECKPOINT_INTERVAL: f32 = 300.0;

/// Payload handed to the host at a checkpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckpointSnapshot {
    pub score: u64,
    pub combo: u32,
    pub health: u32,
    pub max_health: u32,
    pub time: f32,
    pub difficulty: u8,
    pub active_event: Option<GlobalEvent>,
    pub coins_collected: u32,
    /// Elapsed time rounded down to the boundary that fired (300, 600, ...)
    pub checkpoint_time: f32,
}

/// Host answer to a checkpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckpointDecision {
    /// Resume the run
    Continue,
    /// The host persists the snapshot and the run ends
    SaveAndQuit,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckpointGate {
    /// Next boundary that will fire
    next_boundary: f32,
    /// Number of checkpoints fired so far
    pub reached: u32,
}

impl Default for CheckpointGate {
    fn default() -> Self {
        Self {
            next_boundary: CHECKPOINT_INTERVAL,
            reached: 0,
        }
    }
}

impl CheckpointGate {
    /// Returns the boundary time if `time` crossed the next boundary
    pub fn check(&mut self, time: f32) -> Option<f32> {
        if time < self.next_boundary {
            return None;
        }
        let boundary = checkpoint_time(time);
        self.next_boundary = boundary + CHECKPOINT_INTERVAL;
        self.reached += 1;
        Some(boundary)
    }

    pub fn next_boundary(&self) -> f32 {
        self.next_boundary
    }
}

/// `floor(time / 300) * 300`
pub fn checkpoint_time(time: f32) -> f32 {
    (time / CHECKPOINT_INTERVAL).floor() * CHECKPOINT_INTERVAL
}

/// Freeze the run if a checkpoint boundary was crossed this tick
pub fn check(state: &mut GameState) -> bool {
    let Some(boundary) = state.checkpoint.check(state.stats.time) else {
        return false;
    };

    let stats = state.snapshot();
    let snapshot = CheckpointSnapshot {
        score: stats.score,
        combo: stats.combo,
        health: stats.health,
        max_health: stats.max_health,
        time: stats.time,
        difficulty: stats.difficulty,
        active_event: stats.active_event,
        coins_collected: stats.coins_collected,
        checkpoint_time: boundary,
    };
    log::info!(
        "Checkpoint {} reached at {:.1}s (score={})",
        boundary,
        stats.time,
        stats.score
    );
    state.phase = GamePhase::AwaitingCheckpoint;
    state.events.push(GameEvent::CheckpointReached(snapshot));
    true
}

impl GameState {
    /// Apply the host's checkpoint decision. Ignored unless a checkpoint is pending.
    pub fn resolve_checkpoint(&mut self, decision: CheckpointDecision) {
        if self.phase != GamePhase::AwaitingCheckpoint {
            log::warn!("Checkpoint decision {:?} with no checkpoint pending", decision);
            return;
        }
        self.phase = match decision {
            CheckpointDecision::Continue => GamePhase::Playing,
            CheckpointDecision::SaveAndQuit => GamePhase::Ended,
        };
        log::info!("Checkpoint resolved: {:?}", decision);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ship::ShipConfig;
    use proptest::prelude::*;

    #[test]
    fn test_gate_fires_once_per_boundary() {
        let mut gate = CheckpointGate::default();
        assert_eq!(gate.check(299.9), None);
        assert_eq!(gate.check(300.01), Some(300.0));
        assert_eq!(gate.check(300.5), None);
        assert_eq!(gate.check(599.0), None);
        assert_eq!(gate.check(600.2), Some(600.0));
        assert_eq!(gate.reached, 2);
    }

    #[test]
    fn test_large_jump_fires_single_checkpoint() {
        let mut gate = CheckpointGate::default();
        assert_eq!(gate.check(950.0), Some(900.0));
        assert_eq!(gate.next_boundary(), 1200.0);
        assert_eq!(gate.check(1000.0), None);
    }

    #[test]
    fn test_check_freezes_and_resolves() {
        let mut state = GameState::new(1, ShipConfig::default());
        state.stats.time = 300.2;
        state.stats.score = 1234;
        assert!(check(&mut state));
        assert_eq!(state.phase, GamePhase::AwaitingCheckpoint);

        let events = state.drain_events();
        match events.as_slice() {
            [GameEvent::CheckpointReached(snap)] => {
                assert_eq!(snap.checkpoint_time, 300.0);
                assert_eq!(snap.score, 1234);
                assert_eq!(snap.health, 3);
                assert_eq!(snap.max_health, 3);
            }
            other => panic!("unexpected events {:?}", other),
        }

        state.resolve_checkpoint(CheckpointDecision::Continue);
        assert_eq!(state.phase, GamePhase::Playing);

        // A decision with nothing pending changes nothing
        state.resolve_checkpoint(CheckpointDecision::SaveAndQuit);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_save_and_quit_ends_run() {
        let mut state = GameState::new(1, ShipConfig::default());
        state.stats.time = 301.0;
        check(&mut state);
        state.resolve_checkpoint(CheckpointDecision::SaveAndQuit);
        assert_eq!(state.phase, GamePhase::Ended);
    }

    proptest! {
        #[test]
        fn checkpoint_time_is_floor_multiple(tenths in 0u32..100_000) {
            let t = tenths as f32 / 10.0;
            let c = checkpoint_time(t);
            prop_assert!(c <= t);
            prop_assert!(t - c < CHECKPOINT_INTERVAL);
            prop_assert_eq!(c % CHECKPOINT_INTERVAL, 0.0);
        }
    }
}
