//! Game state and core simulation types
//!
//! Every type here is a value: the stepper reads one snapshot and builds the
//! next, it never edits a snapshot in place.

use std::sync::Arc;

use glam::Vec2;

use super::collision::Aabb;
use crate::level::{Level, ObjectKind};
use crate::tuning::Tuning;

/// The player's square runner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    /// Top-left corner (world px)
    pub pos: Vec2,
    /// Vertical velocity (px/s, positive is down)
    pub vy: f32,
    /// Hit-box edge length
    pub size: f32,
    pub on_ground: bool,
}

impl Player {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::splat(self.size))
    }

    pub fn with_vertical(self, y: f32, vy: f32, on_ground: bool) -> Self {
        Self {
            pos: Vec2::new(self.pos.x, y),
            vy,
            on_ground,
            ..self
        }
    }
}

/// A square hazard in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spike {
    pub pos: Vec2,
    pub size: f32,
}

impl Spike {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::splat(self.size))
    }

    pub fn shifted(self, dx: f32) -> Self {
        Self {
            pos: self.pos - Vec2::new(dx, 0.0),
            ..self
        }
    }
}

/// A rectangular platform in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolidBlock {
    pub pos: Vec2,
    pub size: Vec2,
}

impl SolidBlock {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    pub fn shifted(self, dx: f32) -> Self {
        Self {
            pos: self.pos - Vec2::new(dx, 0.0),
            ..self
        }
    }
}

/// Input sampled for a single step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    /// True only on the step containing the press edge
    pub jump_pressed: bool,
}

impl InputState {
    pub const IDLE: Self = Self { jump_pressed: false };
    pub const JUMP: Self = Self { jump_pressed: true };
}

/// Complete run snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub player: Player,
    pub ground_y: f32,
    pub gravity: f32,
    pub jump_velocity: f32,
    pub scroll_speed: f32,
    pub cell_size: f32,
    /// Source level, shared between snapshots of one run
    pub level: Arc<Level>,
    /// World x of grid column 0 before any scrolling
    pub level_start_x: f32,
    /// Total px scrolled so far
    pub level_scrolled: f32,
    pub spikes: Vec<Spike>,
    pub solids: Vec<SolidBlock>,
}

impl GameState {
    /// Fresh run at the start of `level`.
    ///
    /// Grid row `height_cells - 1` sits on the ground line; kinds other than
    /// spike and solid have no physical presence.
    pub fn from_level(level: impl Into<Arc<Level>>, tuning: &Tuning) -> Self {
        let level = level.into();
        let cell = tuning.cell_size;
        let mut spikes = Vec::new();
        let mut solids = Vec::new();

        for obj in &level.objects {
            let x = tuning.level_start_x + obj.x as f32 * cell;
            let y = (tuning.ground_y - cell) - (level.height_cells - 1 - obj.y) as f32 * cell;
            match obj.kind.clone().canonical() {
                ObjectKind::Spike => spikes.push(Spike {
                    pos: Vec2::new(x, y),
                    size: cell,
                }),
                ObjectKind::Solid => solids.push(SolidBlock {
                    pos: Vec2::new(x, y),
                    size: Vec2::new(obj.w as f32 * cell, obj.h as f32 * cell),
                }),
                ObjectKind::Other(_) => {}
            }
        }

        Self {
            player: Player {
                pos: Vec2::new(tuning.player_x, 0.0),
                vy: 0.0,
                size: cell,
                on_ground: false,
            },
            ground_y: tuning.ground_y,
            gravity: tuning.gravity,
            jump_velocity: tuning.jump_velocity,
            scroll_speed: tuning.scroll_speed,
            cell_size: cell,
            level,
            level_start_x: tuning.level_start_x,
            level_scrolled: 0.0,
            spikes,
            solids,
        }
    }

    /// World x where the level ends, before scrolling
    pub fn level_end_x(&self) -> f32 {
        self.level_start_x + self.level.length_cells as f32 * self.cell_size
    }

    /// Fraction of the level scrolled past the player, in `[0, 1]`
    pub fn progress(&self) -> f32 {
        let total = self.level_end_x() - self.player.pos.x;
        if total <= 0.0 {
            return 1.0;
        }
        (self.level_scrolled / total).clamp(0.0, 1.0)
    }
}
