//! Level editor controller
//!
//! Holds the level being edited and turns grid clicks into edits. Clicks
//! outside the grid are ignored rather than reported.

use std::path::{Path, PathBuf};

use crate::level::{Level, LevelObject, ObjectKind, ValidationError, place, remove_at};
use crate::persistence::{DecodeError, SaveError, load_level, save_level};

#[derive(Debug, Clone)]
pub struct Editor {
    level: Level,
    tool: ObjectKind,
    last_path: Option<PathBuf>,
}

impl Editor {
    pub fn new(level: Level) -> Self {
        Self {
            level,
            tool: ObjectKind::Spike,
            last_path: None,
        }
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn tool(&self) -> &ObjectKind {
        &self.tool
    }

    pub fn last_path(&self) -> Option<&Path> {
        self.last_path.as_deref()
    }

    /// Switch tools. Only spike and solid can be painted; returns whether
    /// the tool changed.
    pub fn set_tool(&mut self, tool: ObjectKind) -> bool {
        match tool.canonical() {
            tool @ (ObjectKind::Spike | ObjectKind::Solid) => {
                self.tool = tool;
                true
            }
            ObjectKind::Other(_) => false,
        }
    }

    /// Paint a 1x1 object of the current tool at `(x, y)`
    pub fn click_place(&mut self, x: i32, y: i32) -> Result<(), ValidationError> {
        if !self.level.in_grid(x, y) {
            return Ok(());
        }
        let obj = LevelObject::new(self.tool.clone(), x, y, 1, 1);
        self.level = place(&self.level, obj)?;
        Ok(())
    }

    /// Clear everything covering `(x, y)`
    pub fn click_delete(&mut self, x: i32, y: i32) {
        if !self.level.in_grid(x, y) {
            return;
        }
        self.level = remove_at(&self.level, x, y);
    }

    /// Replace the edited level with the one at `path`
    pub fn load_from(&mut self, path: &Path) -> Result<(), DecodeError> {
        self.level = load_level(path)?;
        self.last_path = Some(path.to_path_buf());
        log::info!("Editor loaded {}", path.display());
        Ok(())
    }

    pub fn save_to(&mut self, path: &Path) -> Result<(), SaveError> {
        save_level(&self.level, path)?;
        self.last_path = Some(path.to_path_buf());
        log::info!("Editor saved {}", path.display());
        Ok(())
    }
}
