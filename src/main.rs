//! Mole Rush entry point
//!
//! Headless demo driver: runs one autoplayed round at a fixed 60 Hz
//! timestep with a simple bot supplying selection events, standing in for
//! the pointer/frame wiring a real host provides.

use std::time::{SystemTime, UNIX_EPOCH};

use mole_rush::board::target_center;
use mole_rush::sim::TargetPhase;
use mole_rush::{FrameSink, Game, GameConfig, MemoryStore, RoundState, RoundStatus, Slot};

/// Frame period for the demo loop (60 Hz)
const FRAME_MS: f64 = 1_000.0 / 60.0;
/// How long the bot waits before reacting to a fresh target
const BOT_REACTION_MS: f64 = 150.0;

/// Presentation gateway that narrates roughly once a second.
struct LogSink {
    frames: u32,
}

impl FrameSink for LogSink {
    fn present(&mut self, state: &RoundState, _slots: &[Slot]) {
        self.frames += 1;
        if self.frames % 60 == 0 {
            log::info!(
                "t-{:>2}s score {:>2} level {} active {}",
                (state.time_left_ms / 1_000.0).ceil() as u32,
                state.score,
                state.difficulty.level,
                state.active_targets.len()
            );
        }
    }
}

fn load_config() -> GameConfig {
    let Some(path) = std::env::args().nth(1) else {
        return GameConfig::default();
    };
    match std::fs::read_to_string(&path)
        .map_err(|e| e.to_string())
        .and_then(|json| GameConfig::from_json(&json).map_err(|e| e.to_string()))
    {
        Ok(config) => {
            log::info!("Loaded config from {}", path);
            config
        }
        Err(e) => {
            log::warn!("Could not load config from {}: {}; using defaults", path, e);
            GameConfig::default()
        }
    }
}

/// Pick a selection point: the oldest still-visible target the bot has
/// had time to react to.
fn bot_selection(state: &RoundState, slots: &[Slot], now_ms: f64) -> Option<glam::Vec2> {
    let target = state.active_targets.iter().find(|t| {
        t.phase == TargetPhase::Visible && !t.was_hit && now_ms >= t.shown_at_ms + BOT_REACTION_MS
    })?;
    let slot = slots.iter().find(|s| s.id == target.slot_id)?;
    Some(target_center(slot, target, now_ms))
}

fn main() {
    env_logger::init();
    log::info!("Mole Rush starting...");

    let config = load_config();
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    log::info!("Seed: {}", seed);

    let mut game = Game::new(config, seed, Some(Box::new(MemoryStore::default())));
    game.resize(480.0, 640.0);
    let mut sink = LogSink { frames: 0 };

    game.start(0.0);
    let mut now_ms = 0.0;
    while game.state().status == RoundStatus::Running {
        now_ms += FRAME_MS;
        game.tick(now_ms);

        let state = game.state();
        if let Some(point) = bot_selection(&state, game.slots(), now_ms) {
            game.select(point, now_ms);
        }
        game.present(&mut sink);
    }

    let state = game.state();
    println!("Final score: {} (best {})", state.score, state.best_score);
    game.destroy();
}
