//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - No RNG, no clock
//! - Snapshots in, snapshots out
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Aabb, landing_floor};
pub use state::{GameState, InputState, Player, SolidBlock, Spike};
pub use tick::{StepOutcome, step};
