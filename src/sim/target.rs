//! Target entities and their lifecycle
//!
//! A target occupies one board slot from spawn until its hide animation
//! has fully played out. Slot occupancy covers both the Visible and the
//! Hiding phase, so a slot never hosts two targets at once.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;

use super::difficulty::Difficulty;
use super::rng::{id_entropy, random_int_inclusive};

/// Lifecycle phase of a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetPhase {
    /// On the board and eligible for selection
    Visible,
    /// Playing its hide animation; still occupies the slot
    Hiding,
}

/// Why a target started hiding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HideReason {
    /// Visibility window elapsed without a selection
    Timeout,
    /// Successful selection
    Hit,
}

/// A selectable element occupying one slot for a limited time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    /// Unique opaque id, stable for the target's whole lifetime
    pub id: String,
    /// Board slot this target occupies
    pub slot_id: u32,
    /// Timestamp the target appeared
    pub shown_at_ms: f64,
    /// Timestamp after which a Visible target times out
    pub hide_at_ms: f64,
    /// Current lifecycle phase
    pub phase: TargetPhase,
    /// When the hide animation started, once Hiding
    pub hide_started_at_ms: Option<f64>,
    /// Length of the hide animation, fixed at the transition
    pub hide_duration_ms: f64,
    /// Why the target is hiding, once Hiding
    pub hide_reason: Option<HideReason>,
    /// Whether a selection has been scored against this target
    pub was_hit: bool,
}

/// Slot ids in `[0, total_slots)` not occupied by any active target.
pub fn available_slot_ids(total_slots: u32, targets: &[Target]) -> Vec<u32> {
    (0..total_slots)
        .filter(|slot| !targets.iter().any(|t| t.slot_id == *slot))
        .collect()
}

fn create_target_id<R: Rng + ?Sized>(now_ms: f64, slot_id: u32, rng: &mut R) -> String {
    format!("{:.0}-{}-{}", now_ms, slot_id, id_entropy(rng))
}

/// Attempt to spawn one target at `now_ms`.
///
/// Refuses (returns false, targets untouched) at or over the concurrency
/// cap, or when every slot is occupied. Otherwise picks uniformly among
/// the free slots and appends a fresh Visible target.
pub fn try_spawn_target<R: Rng + ?Sized>(
    targets: &mut Vec<Target>,
    difficulty: &Difficulty,
    now_ms: f64,
    config: &GameConfig,
    rng: &mut R,
) -> bool {
    if targets.len() >= difficulty.max_concurrent_targets {
        return false;
    }

    let available = available_slot_ids(config.total_slots(), targets);
    if available.is_empty() {
        return false;
    }

    let index = random_int_inclusive(rng, 0.0, (available.len() - 1) as f64) as usize;
    let slot_id = available[index];
    targets.push(Target {
        id: create_target_id(now_ms, slot_id, rng),
        slot_id,
        shown_at_ms: now_ms,
        hide_at_ms: now_ms + difficulty.visible_duration_ms,
        phase: TargetPhase::Visible,
        hide_started_at_ms: None,
        hide_duration_ms: config.timeout_hide_duration_ms,
        hide_reason: None,
        was_hit: false,
    });
    true
}

/// Advance every target's lifecycle to `now_ms`: time out overdue Visible
/// targets, then drop Hiding targets whose animation has fully elapsed.
///
/// The timeout transition pins `hide_started_at_ms` to the target's own
/// `hide_at_ms` rather than `now_ms`, so a late tick does not stretch the
/// animation.
pub fn advance_lifecycle(targets: &mut Vec<Target>, now_ms: f64, config: &GameConfig) {
    for target in targets.iter_mut() {
        if target.phase == TargetPhase::Visible && now_ms >= target.hide_at_ms {
            target.phase = TargetPhase::Hiding;
            target.hide_started_at_ms = Some(target.hide_at_ms);
            target.hide_duration_ms = config.timeout_hide_duration_ms;
            target.hide_reason = Some(HideReason::Timeout);
        }
    }

    targets.retain(|target| {
        if target.phase != TargetPhase::Hiding {
            return true;
        }
        let started_at = target.hide_started_at_ms.unwrap_or(now_ms);
        now_ms < started_at + target.hide_duration_ms
    });
}

/// Apply a selection to the target with `target_id`. Returns whether a
/// point was awarded.
///
/// Unknown ids and already-hit targets award nothing and leave the
/// collection untouched. A Visible target starts the hit-hide animation
/// at `now_ms`. A target already hiding from a timeout is marked hit
/// without restarting or resizing its animation, so a last-instant
/// selection still scores exactly once.
pub fn apply_hit(
    targets: &mut [Target],
    target_id: &str,
    now_ms: f64,
    config: &GameConfig,
) -> bool {
    let Some(target) = targets.iter_mut().find(|t| t.id == target_id) else {
        return false;
    };
    if target.was_hit {
        return false;
    }

    target.was_hit = true;
    target.hide_reason = Some(HideReason::Hit);
    if target.phase == TargetPhase::Visible {
        target.phase = TargetPhase::Hiding;
        target.hide_started_at_ms = Some(now_ms);
        target.hide_duration_ms = config.hit_hide_duration_ms;
    }
    true
}
