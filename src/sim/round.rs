//! Round state machine
//!
//! A round is advanced exclusively through [`apply_event`], a reducer over
//! explicit events carrying host timestamps. The reducer itself performs
//! no I/O; the one side effect it can request (persisting a new best
//! score) is returned to the caller as a [`RoundEffect`].

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::{Slot, find_hit_target};
use crate::config::GameConfig;

use super::difficulty::{Difficulty, compute_difficulty};
use super::rng::random_spawn_delay;
use super::target::{Target, advance_lifecycle, apply_hit, try_spawn_target};

/// Phase of the round state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundStatus {
    /// No round has started yet
    Idle,
    /// Targets may spawn, expire, and score
    Running,
    /// Terminal until the next start/restart
    Over,
}

/// Complete round state. Cloned snapshots of this struct are the only
/// thing external collaborators ever see.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundState {
    /// State machine phase
    pub status: RoundStatus,
    /// Successful selections this round
    pub score: u32,
    /// Best round score seen this process, carried across rounds
    pub best_score: u32,
    /// Remaining round time, clamped at 0
    pub time_left_ms: f64,
    /// Timestamp the running round started, None otherwise
    pub round_start_ms: Option<f64>,
    /// Scheduled spawn deadline; 0 means not yet scheduled
    pub next_spawn_at_ms: f64,
    /// Active targets in spawn order
    pub active_targets: Vec<Target>,
    /// Current pacing snapshot
    pub difficulty: Difficulty,
}

impl RoundState {
    /// Fresh idle state carrying a previously persisted best score.
    pub fn new(best_score: u32, config: &GameConfig) -> Self {
        Self {
            status: RoundStatus::Idle,
            score: 0,
            best_score,
            time_left_ms: config.round_duration_ms,
            round_start_ms: None,
            next_spawn_at_ms: 0.0,
            active_targets: Vec::new(),
            difficulty: compute_difficulty(0.0, config),
        }
    }
}

/// Remaining round time at `now_ms`. A round that has not started reports
/// the full duration.
pub fn compute_time_left_ms(round_start_ms: Option<f64>, now_ms: f64, round_duration_ms: f64) -> f64 {
    let Some(start) = round_start_ms else {
        return round_duration_ms;
    };
    let elapsed = (now_ms - start).max(0.0);
    (round_duration_ms - elapsed).max(0.0)
}

/// Events the reducer understands. Timestamps come from the host driver;
/// the simulation never reads a clock.
#[derive(Debug, Clone, PartialEq)]
pub enum RoundEvent {
    /// Begin a round unless one is already running
    Start { now_ms: f64 },
    /// Begin a round unconditionally, replacing any current state
    Restart { now_ms: f64 },
    /// Per-frame wall-clock reconciliation
    Tick { now_ms: f64 },
    /// Selection attempt at a surface coordinate
    Select { point: Vec2, now_ms: f64 },
}

/// Side effect requested by the reducer for the caller to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundEffect {
    /// The round ended with a new best score that should be persisted
    PersistBestScore(u32),
}

/// Apply one event to the round state. Returns a side effect when the
/// caller has something to execute.
pub fn apply_event<R: Rng + ?Sized>(
    state: &mut RoundState,
    event: &RoundEvent,
    slots: &[Slot],
    config: &GameConfig,
    rng: &mut R,
) -> Option<RoundEffect> {
    match *event {
        RoundEvent::Start { now_ms } => {
            if state.status != RoundStatus::Running {
                begin_round(state, now_ms, config);
            }
            None
        }
        RoundEvent::Restart { now_ms } => {
            begin_round(state, now_ms, config);
            None
        }
        RoundEvent::Tick { now_ms } => tick(state, now_ms, config, rng),
        RoundEvent::Select { point, now_ms } => {
            select(state, point, now_ms, slots, config);
            None
        }
    }
}

fn begin_round(state: &mut RoundState, now_ms: f64, config: &GameConfig) {
    *state = RoundState {
        status: RoundStatus::Running,
        round_start_ms: Some(now_ms),
        ..RoundState::new(state.best_score, config)
    };
}

fn tick<R: Rng + ?Sized>(
    state: &mut RoundState,
    now_ms: f64,
    config: &GameConfig,
    rng: &mut R,
) -> Option<RoundEffect> {
    if state.status != RoundStatus::Running {
        return None;
    }
    let Some(start_ms) = state.round_start_ms else {
        return None;
    };

    let elapsed_ms = (now_ms - start_ms).max(0.0);
    state.difficulty = compute_difficulty(elapsed_ms, config);
    state.time_left_ms = compute_time_left_ms(state.round_start_ms, now_ms, config.round_duration_ms);
    advance_lifecycle(&mut state.active_targets, now_ms, config);

    if state.time_left_ms <= 0.0 {
        // Terminal tick: the round ends before any spawn reconciliation
        return finish_round(state);
    }

    reconcile_spawning(state, now_ms, config, rng);
    None
}

/// One spawn attempt per scheduled delay: schedule when unscheduled, wait
/// until the deadline, then attempt exactly once and clear the schedule
/// whether or not the spawn succeeded.
fn reconcile_spawning<R: Rng + ?Sized>(
    state: &mut RoundState,
    now_ms: f64,
    config: &GameConfig,
    rng: &mut R,
) {
    if state.active_targets.len() >= state.difficulty.max_concurrent_targets {
        state.next_spawn_at_ms = 0.0;
        return;
    }

    if state.next_spawn_at_ms <= 0.0 {
        state.next_spawn_at_ms = now_ms + random_spawn_delay(rng, &state.difficulty);
        return;
    }

    if now_ms < state.next_spawn_at_ms {
        return;
    }

    let _ = try_spawn_target(
        &mut state.active_targets,
        &state.difficulty,
        now_ms,
        config,
        rng,
    );
    state.next_spawn_at_ms = 0.0;
}

fn select(state: &mut RoundState, point: Vec2, now_ms: f64, slots: &[Slot], config: &GameConfig) {
    if state.status != RoundStatus::Running {
        return;
    }
    let Some(target_id) = find_hit_target(point, &state.active_targets, slots) else {
        return;
    };
    if apply_hit(&mut state.active_targets, &target_id, now_ms, config) {
        state.score += 1;
        // Free spawn scheduling immediately instead of waiting out a delay
        // rolled against the previous active set
        state.next_spawn_at_ms = 0.0;
    }
}

fn finish_round(state: &mut RoundState) -> Option<RoundEffect> {
    let mut effect = None;
    if state.score > state.best_score {
        state.best_score = state.score;
        effect = Some(RoundEffect::PersistBestScore(state.best_score));
    }

    state.status = RoundStatus::Over;
    state.round_start_ms = None;
    state.time_left_ms = 0.0;
    state.next_spawn_at_ms = 0.0;
    state.active_targets.clear();
    effect
}
