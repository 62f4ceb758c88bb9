//! Global event director
//!
//! Two-level timer: after 30s with no event a random modifier starts, and it
//! expires after its fixed duration. Modifiers never stack.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Seconds without an event before the next one starts
pub const EVENT_IDLE_DWELL: f32 = 30.0;

/// Timed global modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GlobalEvent {
    MeteorRain,
    EnemyFrenzy,
    PowerupTide,
    BulletHell,
    MiniBosses,
}

impl GlobalEvent {
    pub const ALL: [GlobalEvent; 5] = [
        GlobalEvent::MeteorRain,
        GlobalEvent::EnemyFrenzy,
        GlobalEvent::PowerupTide,
        GlobalEvent::BulletHell,
        GlobalEvent::MiniBosses,
    ];

    /// How long the modifier stays active
    pub fn duration(&self) -> f32 {
        match self {
            GlobalEvent::EnemyFrenzy => 20.0,
            _ => 15.0,
        }
    }

    /// Display label for the host HUD
    pub fn label(&self) -> &'static str {
        match self {
            GlobalEvent::MeteorRain => "METEOR RAIN",
            GlobalEvent::EnemyFrenzy => "ENEMY FRENZY",
            GlobalEvent::PowerupTide => "POWER-UP TIDE",
            GlobalEvent::BulletHell => "BULLET HELL",
            GlobalEvent::MiniBosses => "MINI BOSS INVASION",
        }
    }
}

/// State change reported by [`EventDirector::update`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventTransition {
    Started(GlobalEvent),
    Ended(GlobalEvent),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventDirector {
    active: Option<GlobalEvent>,
    /// Seconds spent with no event
    idle: f32,
    /// Seconds the active event has run
    elapsed: f32,
}

impl EventDirector {
    pub fn active(&self) -> Option<GlobalEvent> {
        self.active
    }

    /// Seconds spent in the current state
    pub fn state_time(&self) -> f32 {
        if self.active.is_some() {
            self.elapsed
        } else {
            self.idle
        }
    }

    /// Advance the timers; at most one transition per call
    pub fn update<R: Rng>(&mut self, dt: f32, rng: &mut R) -> Option<EventTransition> {
        match self.active {
            None => {
                self.idle += dt;
                if self.idle >= EVENT_IDLE_DWELL {
                    // Uniform pick, not weighted by difficulty
                    let event = GlobalEvent::ALL[rng.random_range(0..GlobalEvent::ALL.len())];
                    self.active = Some(event);
                    self.idle = 0.0;
                    self.elapsed = 0.0;
                    log::info!("Event started: {}", event.label());
                    return Some(EventTransition::Started(event));
                }
                None
            }
            Some(event) => {
                self.elapsed += dt;
                if self.elapsed >= event.duration() {
                    self.active = None;
                    self.elapsed = 0.0;
                    self.idle = 0.0;
                    log::info!("Event ended: {}", event.label());
                    return Some(EventTransition::Ended(event));
                }
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const DT: f32 = 0.016;

    #[test]
    fn test_no_event_before_dwell() {
        let mut director = EventDirector::default();
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..1800 {
            assert_eq!(director.update(DT, &mut rng), None);
        }
        assert!(director.active().is_none());
        assert!(director.state_time() < EVENT_IDLE_DWELL);
    }

    #[test]
    fn test_cycle_and_exclusivity() {
        let mut director = EventDirector::default();
        let mut rng = Pcg32::seed_from_u64(11);
        // Count frames per state so the dwell check does not inherit drift
        // from a long-running f32 clock
        let mut frames_in_state = 0u32;
        let mut transitions = 0;

        for _ in 0..(600.0 / DT) as usize {
            let before = director.active();
            frames_in_state += 1;
            if let Some(transition) = director.update(DT, &mut rng) {
                transitions += 1;
                let dwell = frames_in_state as f32 * DT;
                match transition {
                    EventTransition::Started(event) => {
                        assert!(before.is_none(), "event entered from another event");
                        assert!(dwell >= EVENT_IDLE_DWELL - 1e-3, "dwell={}", dwell);
                        assert!(dwell < EVENT_IDLE_DWELL + 2.0 * DT, "dwell={}", dwell);
                        assert_eq!(director.active(), Some(event));
                    }
                    EventTransition::Ended(event) => {
                        assert_eq!(before, Some(event));
                        assert!(dwell >= event.duration() - 1e-3, "dwell={}", dwell);
                        assert!(dwell < event.duration() + 2.0 * DT, "dwell={}", dwell);
                        assert!(director.active().is_none());
                    }
                }
                frames_in_state = 0;
            }
        }
        assert!(transitions >= 2);
    }

    #[test]
    fn test_frenzy_lasts_longer() {
        assert_eq!(GlobalEvent::EnemyFrenzy.duration(), 20.0);
        for event in GlobalEvent::ALL {
            if event != GlobalEvent::EnemyFrenzy {
                assert_eq!(event.duration(), 15.0);
            }
        }
    }
}
