//! Difficulty curve
//!
//! Maps elapsed round time to a pacing snapshot. Pure and recomputed every
//! tick; nothing here is persisted.

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;

/// Elapsed time at which a second target may be active.
pub const CAP_TWO_AT_MS: f64 = 20_000.0;
/// Elapsed time at which a third target may be active.
pub const CAP_THREE_AT_MS: f64 = 40_000.0;

/// Pacing snapshot for one instant of a round.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    /// Step index derived from elapsed time
    pub level: u32,
    /// Maximum simultaneously active targets (1..=3)
    pub max_concurrent_targets: usize,
    /// How long a fresh target stays visible before timing out
    pub visible_duration_ms: f64,
    /// Lower bound of the randomized wait before the next spawn attempt
    pub spawn_delay_min_ms: f64,
    /// Upper bound of the randomized wait, always >= the lower bound
    pub spawn_delay_max_ms: f64,
}

/// Concurrency cap step function over raw elapsed time, independent of the
/// level curve.
pub fn concurrency_cap(elapsed_ms: f64) -> usize {
    if elapsed_ms >= CAP_THREE_AT_MS {
        3
    } else if elapsed_ms >= CAP_TWO_AT_MS {
        2
    } else {
        1
    }
}

/// Compute the pacing snapshot for `elapsed_ms` into the round.
///
/// Each timing value shrinks linearly with the level and clamps at its
/// configured floor. The outer max on the upper spawn bound keeps
/// min <= max even after the two curves cross.
pub fn compute_difficulty(elapsed_ms: f64, config: &GameConfig) -> Difficulty {
    let elapsed_ms = elapsed_ms.max(0.0);
    let level = (elapsed_ms / config.difficulty_step_ms).floor().max(0.0) as u32;
    let steps = level as f64;

    let visible_duration_ms = (config.base_visible_duration_ms
        - steps * config.visible_duration_step_ms)
        .max(config.min_visible_duration_ms);
    let spawn_delay_min_ms = (config.base_spawn_delay_min_ms
        - steps * config.spawn_delay_min_step_ms)
        .max(config.min_spawn_delay_min_ms);
    let provisional_max = (config.base_spawn_delay_max_ms
        - steps * config.spawn_delay_max_step_ms)
        .max(config.min_spawn_delay_max_ms);
    let spawn_delay_max_ms = provisional_max.max(spawn_delay_min_ms);

    Difficulty {
        level,
        max_concurrent_targets: concurrency_cap(elapsed_ms),
        visible_duration_ms,
        spawn_delay_min_ms,
        spawn_delay_max_ms,
    }
}
