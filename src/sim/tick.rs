//! Fixed timestep simulation step
//!
//! `step` is a pure function of its inputs: no clock, no RNG, no globals.

use std::sync::Arc;

use super::collision::landing_floor;
use super::state::{GameState, InputState, SolidBlock, Spike};

/// Result of one step
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// Run goes on with the new snapshot
    Continuing(GameState),
    /// Player touched a hazard; restart the current level
    Died,
    /// Level end passed the player; move on to a new level
    Completed,
}

impl StepOutcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, StepOutcome::Continuing(_))
    }

    pub fn state(&self) -> Option<&GameState> {
        match self {
            StepOutcome::Continuing(state) => Some(state),
            _ => None,
        }
    }
}

/// Advance the game state by `dt` seconds
pub fn step(state: &GameState, input: InputState, dt: f32) -> StepOutcome {
    let mut player = state.player;

    // Jump only from the ground, and only on the press edge
    if input.jump_pressed && player.on_ground {
        player.vy = state.jump_velocity;
        player.on_ground = false;
    }

    // Semi-implicit Euler
    let vy = player.vy + state.gravity * dt;
    let prev_y = player.pos.y;
    let y = prev_y + vy * dt;

    // Scroll the level left
    let dx = state.scroll_speed * dt;
    let spikes: Vec<Spike> = state.spikes.iter().map(|s| s.shifted(dx)).collect();
    let solids: Vec<SolidBlock> = state.solids.iter().map(|s| s.shifted(dx)).collect();
    let level_scrolled = state.level_scrolled + dx;

    // Vertical resolution against the ground and solid tops
    let ground_top = state.ground_y - player.size;
    let floor = landing_floor(&player.bounds(), prev_y, y, vy, ground_top, &solids);
    let player = if y >= floor {
        player.with_vertical(floor, 0.0, true)
    } else {
        player.with_vertical(y, vy, false)
    };

    // Completion beats death on the same step
    if state.level_end_x() - level_scrolled <= player.pos.x {
        return StepOutcome::Completed;
    }

    let bounds = player.bounds();
    if spikes.iter().any(|s| bounds.overlaps(&s.bounds())) {
        return StepOutcome::Died;
    }

    StepOutcome::Continuing(GameState {
        player,
        ground_y: state.ground_y,
        gravity: state.gravity,
        jump_velocity: state.jump_velocity,
        scroll_speed: state.scroll_speed,
        cell_size: state.cell_size,
        level: Arc::clone(&state.level),
        level_start_x: state.level_start_x,
        level_scrolled,
        spikes,
        solids,
    })
}
