//! Round pacing configuration
//!
//! One flat struct of recognized options. Field names serialize in
//! camelCase so a JSON config file uses the same keys the options are
//! documented under.

use serde::{Deserialize, Serialize};

/// All tunables for a round: board shape, timing, and the difficulty
/// ramp parameters consumed by [`crate::sim::compute_difficulty`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    /// Total round length in milliseconds
    pub round_duration_ms: f64,
    /// Board grid rows
    pub board_rows: u32,
    /// Board grid columns
    pub board_cols: u32,
    /// Hide animation length after a successful hit
    pub hit_hide_duration_ms: f64,
    /// Hide animation length after a visibility timeout
    pub timeout_hide_duration_ms: f64,
    /// Elapsed time per difficulty level step
    pub difficulty_step_ms: f64,
    /// Target visibility window at level 0
    pub base_visible_duration_ms: f64,
    /// Floor for the visibility window
    pub min_visible_duration_ms: f64,
    /// Visibility shrink per level
    pub visible_duration_step_ms: f64,
    /// Lower spawn-delay bound at level 0
    pub base_spawn_delay_min_ms: f64,
    /// Upper spawn-delay bound at level 0
    pub base_spawn_delay_max_ms: f64,
    /// Floor for the lower spawn-delay bound
    pub min_spawn_delay_min_ms: f64,
    /// Floor for the upper spawn-delay bound
    pub min_spawn_delay_max_ms: f64,
    /// Lower-bound shrink per level
    pub spawn_delay_min_step_ms: f64,
    /// Upper-bound shrink per level
    pub spawn_delay_max_step_ms: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            round_duration_ms: 60_000.0,
            board_rows: 3,
            board_cols: 3,
            hit_hide_duration_ms: 120.0,
            timeout_hide_duration_ms: 220.0,
            difficulty_step_ms: 10_000.0,
            base_visible_duration_ms: 1_150.0,
            min_visible_duration_ms: 480.0,
            visible_duration_step_ms: 115.0,
            base_spawn_delay_min_ms: 460.0,
            base_spawn_delay_max_ms: 920.0,
            min_spawn_delay_min_ms: 180.0,
            min_spawn_delay_max_ms: 370.0,
            spawn_delay_min_step_ms: 36.0,
            spawn_delay_max_step_ms: 55.0,
        }
    }
}

impl GameConfig {
    /// Parse a config from JSON. Missing keys fall back to defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Number of board slots
    pub fn total_slots(&self) -> u32 {
        self.board_rows * self.board_cols
    }

    /// Clamp degenerate values into usable ranges: at least a 1x1 board,
    /// no negative durations, and a difficulty step of at least 1 ms.
    pub fn sanitized(mut self) -> Self {
        self.board_rows = self.board_rows.max(1);
        self.board_cols = self.board_cols.max(1);
        self.difficulty_step_ms = self.difficulty_step_ms.max(1.0);
        for value in [
            &mut self.round_duration_ms,
            &mut self.hit_hide_duration_ms,
            &mut self.timeout_hide_duration_ms,
            &mut self.base_visible_duration_ms,
            &mut self.min_visible_duration_ms,
            &mut self.visible_duration_step_ms,
            &mut self.base_spawn_delay_min_ms,
            &mut self.base_spawn_delay_max_ms,
            &mut self.min_spawn_delay_min_ms,
            &mut self.min_spawn_delay_max_ms,
            &mut self.spawn_delay_min_step_ms,
            &mut self.spawn_delay_max_step_ms,
        ] {
            if !value.is_finite() || *value < 0.0 {
                *value = 0.0;
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_partial() {
        let config = GameConfig::from_json(r#"{"roundDurationMs": 30000, "boardRows": 4}"#)
            .expect("valid json");
        assert_eq!(config.round_duration_ms, 30_000.0);
        assert_eq!(config.board_rows, 4);
        // Unspecified keys keep their defaults
        assert_eq!(config.board_cols, 3);
        assert_eq!(config.hit_hide_duration_ms, 120.0);
    }

    #[test]
    fn test_sanitized_clamps_degenerate_values() {
        let mut config = GameConfig::default();
        config.board_rows = 0;
        config.difficulty_step_ms = 0.0;
        config.base_spawn_delay_min_ms = -40.0;
        config.round_duration_ms = f64::NAN;

        let config = config.sanitized();
        assert_eq!(config.board_rows, 1);
        assert!(config.total_slots() > 0);
        assert_eq!(config.difficulty_step_ms, 1.0);
        assert_eq!(config.base_spawn_delay_min_ms, 0.0);
        assert_eq!(config.round_duration_ms, 0.0);
    }
}
