//! Mole Rush - a timed whack-a-mole arcade round engine
//!
//! Core modules:
//! - `sim`: Deterministic round simulation (difficulty ramp, target
//!   lifecycle, spawn reconciliation, round state machine)
//! - `board`: Slot geometry, hit-testing, hide-motion derived views
//! - `engine`: Host-facing driver surface owning state, RNG, and gateways
//! - `storage`: Swappable best-score persistence gateway
//! - `audio`: Hit-sound gateway contract
//! - `config`: Round pacing configuration

pub mod audio;
pub mod board;
pub mod config;
pub mod engine;
pub mod sim;
pub mod storage;

pub use audio::{HitSoundPlayer, SilentSounds};
pub use board::{Slot, find_hit_target, hide_progress, layout_slots, target_center};
pub use config::GameConfig;
pub use engine::{FrameSink, Game, NullSink};
pub use sim::{Difficulty, RoundState, RoundStatus, Target};
pub use storage::{MemoryStore, ScoreStore};
