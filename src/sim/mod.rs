//! Deterministic round simulation
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Host-supplied timestamps only, never an ambient clock
//! - Explicitly threaded RNG only
//! - No rendering, audio, or storage dependencies
//!
//! State is advanced exclusively through the [`round::apply_event`]
//! reducer, which makes replaying a round from recorded events trivial.

pub mod difficulty;
pub mod rng;
pub mod round;
pub mod target;

pub use difficulty::{CAP_THREE_AT_MS, CAP_TWO_AT_MS, Difficulty, compute_difficulty, concurrency_cap};
pub use rng::{id_entropy, random_int_inclusive, random_spawn_delay};
pub use round::{
    RoundEffect, RoundEvent, RoundState, RoundStatus, apply_event, compute_time_left_ms,
};
pub use target::{
    HideReason, Target, TargetPhase, advance_lifecycle, apply_hit, available_slot_ids,
    try_spawn_target,
};
