//! Grid Dash - A side-scrolling, one-button platformer
//!
//! Core modules:
//! - `level`: Level grid model, procedural generator, editing operations
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `persistence`: Versioned level files, atomic save/load, level repository
//! - `session`: Fixed-step scheduler driving the simulation
//! - `editor`: Level editor controller
//! - `tuning`: Data-driven game balance

pub mod editor;
pub mod input;
pub mod level;
pub mod persistence;
pub mod random;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use editor::Editor;
pub use input::{InputSource, JumpButton};
pub use level::{Level, LevelObject, ObjectKind};
pub use random::{RandomSource, ScriptedRandom, SeededRandom};
pub use session::{Session, SessionEvent};
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for stable jumps)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 5;
    /// Largest wall-clock delta accepted from a single frame (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Default level grid dimensions
    pub const LEVEL_LENGTH_CELLS: i32 = 50;
    pub const LEVEL_HEIGHT_CELLS: i32 = 14;

    /// Leading columns that never receive a spike
    pub const SAFE_PREFIX: i32 = 3;
    /// Per-column spike chance
    pub const SPIKE_PROBABILITY: f64 = 0.15;
    /// Chance of the single 2x1 solid block
    pub const SOLID_PROBABILITY: f64 = 0.6;

    /// Marker written into every level file
    pub const LEVEL_FORMAT: &str = "griddash.level";
    /// Current level file version
    pub const LEVEL_VERSION: i64 = 2;
}
