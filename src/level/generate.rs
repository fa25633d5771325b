//! Procedural level generation
//!
//! One draw per column past the safe prefix decides a floor spike, then one
//! more draw decides the single 2x1 solid block. Same draws, same level.

use super::{Level, LevelObject};
use crate::consts::*;
use crate::random::RandomSource;

/// Generate a level with the default 50x14 grid
pub fn generate(rng: &mut impl RandomSource) -> Level {
    generate_sized(rng, LEVEL_LENGTH_CELLS, LEVEL_HEIGHT_CELLS)
}

/// Generate a level of the given size (dimensions below 1 are raised to 1)
pub fn generate_sized(rng: &mut impl RandomSource, length_cells: i32, height_cells: i32) -> Level {
    let length_cells = length_cells.max(1);
    let height_cells = height_cells.max(1);
    let mut objects = Vec::new();

    let floor_row = height_cells - 1;
    for x in SAFE_PREFIX..length_cells {
        if rng.random() < SPIKE_PROBABILITY {
            objects.push(LevelObject::spike(x, floor_row));
        }
    }

    // Overlap with spikes is accepted; only the editor enforces one object per cell.
    let solid = LevelObject::solid(
        (length_cells - 4).min(SAFE_PREFIX + 5),
        height_cells - 3,
        2,
        1,
    );
    let solid_fits =
        solid.x >= SAFE_PREFIX && solid.validate_within(length_cells, height_cells).is_ok();
    if rng.random() < SOLID_PROBABILITY && solid_fits {
        objects.push(solid);
    }

    Level {
        length_cells,
        height_cells,
        objects,
    }
}
