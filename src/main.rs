//! Bullet Storm headless runner
//!
//! Drives the simulation with a simple autopilot at a fixed frame time. Used
//! for soak-testing balance and reproducing runs from a seed.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use glam::Vec2;

use bullet_storm::sim::{
    CheckpointDecision, CheckpointSnapshot, GamePhase, GameState, GlobalEvent, Owner, RunStats,
    TickInput, tick,
};
use bullet_storm::{GameHost, SaveRecord, ShipConfig, dispatch};

/// Headless bullet-hell simulation runner
#[derive(Parser)]
#[command(name = "bullet-storm")]
#[command(about = "Run the combat simulation headless with an autopilot")]
struct Cli {
    /// Run seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Stop after this many simulated seconds
    #[arg(long, default_value_t = 120.0)]
    seconds: f32,

    /// Frame time in milliseconds (must be positive)
    #[arg(long, default_value_t = 16.0, value_parser = parse_frame_ms)]
    frame_ms: f32,

    /// Ship config JSON file (falls back to the default ship if unreadable)
    #[arg(long)]
    ship: Option<PathBuf>,

    /// Save and quit at the first checkpoint instead of continuing
    #[arg(long)]
    save_at_checkpoint: bool,

    /// Lifetime record file to merge the finished run into
    #[arg(long)]
    record: Option<PathBuf>,
}

/// Frame times that never advance the clock would spin the run loop forever
fn parse_frame_ms(s: &str) -> Result<f32, String> {
    let ms: f32 = s.parse().map_err(|e| format!("{}", e))?;
    if ms.is_finite() && ms > 0.0 {
        Ok(ms)
    } else {
        Err(format!("frame time must be a positive number of milliseconds, got {}", s))
    }
}

/// Read the ship file, falling back to the default ship if it cannot be read
fn load_ship(path: Option<&Path>) -> ShipConfig {
    let json = path.and_then(|path| match fs::read_to_string(path) {
        Ok(json) => Some(json),
        Err(e) => {
            log::warn!("Failed to read ship config {}: {}", path.display(), e);
            None
        }
    });
    ShipConfig::from_json_or_default(json.as_deref())
}

/// Load the lifetime record. Only a missing file starts a fresh record; any
/// other failure is an error so the existing totals are never overwritten.
fn load_record(path: &Path) -> Result<SaveRecord> {
    match fs::read_to_string(path) {
        Ok(json) => SaveRecord::from_json(&json)
            .with_context(|| format!("Corrupt record file {}", path.display())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::info!("No record at {}, starting fresh", path.display());
            Ok(SaveRecord::default())
        }
        Err(e) => Err(e).with_context(|| format!("Failed to read record {}", path.display())),
    }
}

/// Host that logs everything and remembers the pending checkpoint
#[derive(Default)]
struct LogHost {
    wallet: u32,
    checkpoint: Option<CheckpointSnapshot>,
    final_stats: Option<RunStats>,
}

impl GameHost for LogHost {
    fn on_stats(&mut self, stats: &RunStats) {
        log::trace!(
            "t={:.1} score={} combo={} x{} hp={}",
            stats.time,
            stats.score,
            stats.combo,
            stats.multiplier,
            stats.health
        );
    }

    fn on_coins(&mut self, amount: u32) {
        self.wallet += amount;
    }

    fn on_checkpoint(&mut self, snapshot: &CheckpointSnapshot) {
        self.checkpoint = Some(snapshot.clone());
    }

    fn on_game_over(&mut self, stats: &RunStats) {
        self.final_stats = Some(stats.clone());
    }

    fn on_event_changed(&mut self, event: GlobalEvent, active: bool) {
        if active {
            log::info!("{} begins", event.label());
        } else {
            log::info!("{} is over", event.label());
        }
    }
}

/// Dodge the closest incoming shot, otherwise line up under the lowest hostile
fn autopilot(state: &GameState) -> TickInput {
    let me = state.avatar.pos;

    let threat = state
        .store
        .projectiles
        .iter()
        .filter(|p| p.owner == Owner::Hostile && p.pos.y < me.y && me.y - p.pos.y < 150.0)
        .filter(|p| (p.pos.x - me.x).abs() < 40.0)
        .min_by(|a, b| (me.y - a.pos.y).total_cmp(&(me.y - b.pos.y)));
    if let Some(shot) = threat {
        let away = if shot.pos.x > me.x { -1.0 } else { 1.0 };
        return TickInput::moving(away, 0.0);
    }

    let target = state
        .store
        .hostiles
        .iter()
        .filter(|h| !h.dead && h.pos.y > 0.0)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));
    match target {
        Some(h) if (h.pos.x - me.x).abs() > 4.0 => {
            TickInput::moving((h.pos.x - me.x).signum(), 0.0)
        }
        _ => TickInput { movement: Vec2::ZERO },
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let ship = load_ship(cli.ship.as_deref());

    let mut state = GameState::new(cli.seed, ship);
    let mut host = LogHost::default();

    // Render-only priming frame
    tick(&mut state, &TickInput::default(), cli.frame_ms);

    while state.stats.time < cli.seconds {
        let input = autopilot(&state);
        tick(&mut state, &input, cli.frame_ms);
        dispatch(&mut state, &mut host);

        if let Some(snapshot) = host.checkpoint.take() {
            let decision = if cli.save_at_checkpoint {
                CheckpointDecision::SaveAndQuit
            } else {
                CheckpointDecision::Continue
            };
            log::info!(
                "Checkpoint at {}s with score {}: {:?}",
                snapshot.checkpoint_time,
                snapshot.score,
                decision
            );
            state.resolve_checkpoint(decision);
        }

        if matches!(state.phase, GamePhase::GameOver | GamePhase::Ended) {
            break;
        }
    }

    let stats = host.final_stats.take().unwrap_or_else(|| state.snapshot());
    log::info!(
        "Run finished ({:?}): {} coins credited",
        state.phase,
        host.wallet
    );

    if let Some(path) = &cli.record {
        let mut record = load_record(path)?;
        if record.merge_run(&stats) {
            println!("New high score!");
        }
        fs::write(path, record.to_json()?)
            .with_context(|| format!("Failed to write record {}", path.display()))?;
    }

    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
