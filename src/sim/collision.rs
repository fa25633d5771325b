//! Collision detection for axis-aligned boxes
//!
//! Only two questions matter to the runner: does the player touch a hazard,
//! and is there a platform top to land on this step.

use glam::Vec2;

use super::state::SolidBlock;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Strict overlap: boxes that only share an edge do not collide
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// Strict overlap on the x axis only
    #[inline]
    pub fn overlaps_x(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x && self.max.x > other.min.x
    }
}

/// Resolve the floor for a falling body.
///
/// Starts from `floor` (the top-left y at which the body rests on the ground)
/// and raises it to the top of any solid the body lands on from above this
/// step: horizontally overlapping, previously at or above the top, now at or
/// below it. Side and underside contacts are not handled.
pub fn landing_floor(
    body: &Aabb,
    prev_y: f32,
    new_y: f32,
    vy: f32,
    floor: f32,
    solids: &[SolidBlock],
) -> f32 {
    if vy < 0.0 {
        return floor;
    }
    let height = body.max.y - body.min.y;
    solids
        .iter()
        .filter(|solid| body.overlaps_x(&solid.bounds()))
        .map(|solid| solid.pos.y - height)
        .filter(|&top| prev_y <= top && new_y >= top)
        .fold(floor, f32::min)
}
