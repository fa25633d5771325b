//! Game settings
//!
//! Persisted as JSON next to the saved levels. Missing fields take their
//! defaults, so old settings files keep loading.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::persistence::files::write_text_atomic;
use crate::tuning::Tuning;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Physics and world layout
    pub tuning: Tuning,

    // === Loop ===
    /// Fixed simulation step (seconds)
    pub fixed_dt: f32,
    /// Frame deltas above this are clamped (seconds)
    pub max_frame_dt: f32,
    /// Simulation steps allowed per frame
    pub max_substeps: u32,

    // === Levels ===
    /// Generated level width in cells
    pub level_length_cells: i32,
    /// Generated level height in cells
    pub level_height_cells: i32,
    /// Base directory for the beaten-level archive
    pub base_dir: PathBuf,
    /// Level generator seed (None picks one at startup)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tuning: Tuning::default(),

            fixed_dt: SIM_DT,
            max_frame_dt: MAX_FRAME_DT,
            max_substeps: MAX_SUBSTEPS,

            level_length_cells: LEVEL_LENGTH_CELLS,
            level_height_cells: LEVEL_HEIGHT_CELLS,
            base_dir: PathBuf::from("."),
            seed: None,
        }
    }
}

impl Settings {
    /// Default settings file name
    pub const FILE_NAME: &'static str = "grid-dash.json";

    /// Load settings from `path`, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                log::info!("No settings at {} ({}), using defaults", path.display(), e);
                return Self::default();
            }
        };

        match serde_json::from_str::<Settings>(&text) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings.sanitized()
            }
            Err(e) => {
                log::warn!("Ignoring malformed settings {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings to `path` atomically
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        write_text_atomic(path, &json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Replace values the loop can't run with
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.fixed_dt.is_nan() || self.fixed_dt <= 0.0 {
            self.fixed_dt = defaults.fixed_dt;
        }
        if self.max_frame_dt.is_nan() || self.max_frame_dt <= 0.0 {
            self.max_frame_dt = defaults.max_frame_dt;
        }
        self.max_substeps = self.max_substeps.max(1);
        self.level_length_cells = self.level_length_cells.max(1);
        self.level_height_cells = self.level_height_cells.max(1);
        self
    }
}
