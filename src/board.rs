//! Board geometry
//!
//! Slot layout derived from the host surface's displayed size, the
//! selection hit-test, and the hide-motion helpers the presentation
//! gateway needs to position a target independently of the simulation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{Target, TargetPhase};

/// Fraction of the surface height reserved for the HUD band.
const HUD_HEIGHT_FRACTION: f32 = 0.19;
/// Fraction of the smaller surface dimension used as board padding.
const BOARD_PADDING_FRACTION: f32 = 0.035;
/// Slot radius as a fraction of the smaller cell dimension.
const SLOT_RADIUS_FRACTION: f32 = 0.33;
/// Selectable radius as a fraction of the slot radius.
const HIT_RADIUS_SCALE: f32 = 0.72;
/// Resting target center offset above the slot center, in slot radii.
const BASE_CENTER_Y_MULTIPLIER: f32 = -0.34;
/// Total drop distance across the hide animation, in slot radii.
const HIDE_DROP_MULTIPLIER: f32 = 1.62;

/// One grid position where at most one target may be active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    /// `row * cols + col` index
    pub id: u32,
    /// Center in surface coordinates
    pub center: Vec2,
    /// Visual and hit-test radius
    pub radius: f32,
}

/// Lay out `rows x cols` slots for a surface of `width x height`, leaving
/// room for the HUD band at the top.
pub fn layout_slots(width: f32, height: f32, rows: u32, cols: u32) -> Vec<Slot> {
    let hud_height = (height * HUD_HEIGHT_FRACTION).floor().max(90.0);
    let padding = (width.min(height) * BOARD_PADDING_FRACTION).floor().max(16.0);
    let board_left = padding;
    let board_right = width - padding;
    let board_top = hud_height + padding * 0.5;
    let board_bottom = height - padding;
    let cell_width = (board_right - board_left) / cols as f32;
    let cell_height = (board_bottom - board_top) / rows as f32;
    let radius = cell_width.min(cell_height) * SLOT_RADIUS_FRACTION;

    let mut slots = Vec::with_capacity((rows * cols) as usize);
    for row in 0..rows {
        for col in 0..cols {
            slots.push(Slot {
                id: row * cols + col,
                center: Vec2::new(
                    board_left + cell_width * (col as f32 + 0.5),
                    board_top + cell_height * (row as f32 + 0.56),
                ),
                radius,
            });
        }
    }
    slots
}

fn clamp01(value: f32) -> f32 {
    value.clamp(0.0, 1.0)
}

fn ease_in_quad(value: f32) -> f32 {
    value * value
}

/// Progress of a target's hide animation in `[0, 1]`; 0 while Visible.
pub fn hide_progress(target: &Target, now_ms: f64) -> f32 {
    if target.phase != TargetPhase::Hiding {
        return 0.0;
    }
    let Some(started_at) = target.hide_started_at_ms else {
        return 0.0;
    };
    if target.hide_duration_ms <= 0.0 {
        return 1.0;
    }
    clamp01(((now_ms - started_at) / target.hide_duration_ms) as f32)
}

/// Where the presentation gateway should draw a target: at rest slightly
/// above the slot center, dropping with an ease-in as it hides.
pub fn target_center(slot: &Slot, target: &Target, now_ms: f64) -> Vec2 {
    let progress = hide_progress(target, now_ms);
    let drop = ease_in_quad(progress) * slot.radius * HIDE_DROP_MULTIPLIER;
    Vec2::new(
        slot.center.x,
        slot.center.y + slot.radius * BASE_CENTER_Y_MULTIPLIER + drop,
    )
}

/// Map a selection coordinate to the id of the topmost target whose slot
/// it lands in. Targets are checked newest-first so the most recently
/// spawned wins an overlap.
pub fn find_hit_target(point: Vec2, targets: &[Target], slots: &[Slot]) -> Option<String> {
    for target in targets.iter().rev() {
        let Some(slot) = slots.iter().find(|s| s.id == target.slot_id) else {
            continue;
        };
        let hit_radius = slot.radius * HIT_RADIUS_SCALE;
        if point.distance_squared(slot.center) <= hit_radius * hit_radius {
            return Some(target.id.clone());
        }
    }
    None
}
