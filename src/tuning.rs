//! Data-driven game balance
//!
//! Physics constants and world layout used to build a run from a level.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Downward acceleration (px/s²)
    pub gravity: f32,
    /// Initial jump velocity (px/s, negative is up)
    pub jump_velocity: f32,
    /// Horizontal level scroll (px/s)
    pub scroll_speed: f32,
    /// World size of one grid cell (px); also the player's size
    pub cell_size: f32,
    /// Ground line (px from top)
    pub ground_y: f32,
    /// Player's fixed horizontal position
    pub player_x: f32,
    /// World x of grid column 0 at the start of a run
    pub level_start_x: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 2000.0,
            jump_velocity: -700.0,
            scroll_speed: 260.0,
            cell_size: 32.0,
            ground_y: 380.0,
            player_x: 120.0,
            level_start_x: 820.0,
        }
    }
}

impl Tuning {
    /// Seconds for the whole level to scroll past the player
    pub fn run_duration(&self, length_cells: i32) -> f32 {
        let distance = self.level_start_x + length_cells as f32 * self.cell_size - self.player_x;
        distance / self.scroll_speed
    }
}
