//! Host callbacks
//!
//! The simulation never calls out directly. It queues [`GameEvent`]s which the
//! host drains after each tick, either by hand or through [`dispatch`].

use crate::sim::{CheckpointSnapshot, GameEvent, GameState, GlobalEvent, RunStats};

/// Receiver for simulation output. Every method defaults to a no-op.
pub trait GameHost {
    /// Throttled stats snapshot
    fn on_stats(&mut self, _stats: &RunStats) {}

    /// Coins to credit to the player's wallet
    fn on_coins(&mut self, _amount: u32) {}

    /// The run is frozen until the host calls
    /// [`GameState::resolve_checkpoint`]
    fn on_checkpoint(&mut self, _snapshot: &CheckpointSnapshot) {}

    fn on_game_over(&mut self, _stats: &RunStats) {}

    /// `active` is true when the event starts and false when it ends
    fn on_event_changed(&mut self, _event: GlobalEvent, _active: bool) {}
}

/// Drain pending output and route it to `host`, in emission order.
/// Returns the number of events delivered.
pub fn dispatch(state: &mut GameState, host: &mut impl GameHost) -> usize {
    let events = state.drain_events();
    let count = events.len();
    for event in events {
        match event {
            GameEvent::StatsUpdated(stats) => host.on_stats(&stats),
            GameEvent::CoinsEarned { amount } => host.on_coins(amount),
            GameEvent::CheckpointReached(snapshot) => host.on_checkpoint(&snapshot),
            GameEvent::GameOver(stats) => host.on_game_over(&stats),
            GameEvent::EventStarted(event) => host.on_event_changed(event, true),
            GameEvent::EventEnded(event) => host.on_event_changed(event, false),
        }
    }
    count
}
