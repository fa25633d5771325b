//! Beaten-level archive
//!
//! Every completed level is kept under `<base>/levels/` with a name built
//! from the 1-based count of levels beaten so far.

use std::fs;
use std::path::{Path, PathBuf};

use super::codec::DecodeError;
use super::files::{SaveError, load_level, save_level};
use crate::level::Level;

#[derive(Debug, Clone)]
pub struct LevelRepository {
    levels_dir: PathBuf,
}

impl LevelRepository {
    /// Subdirectory of the base directory holding saved levels
    pub const SUBDIR: &'static str = "levels";
    pub const EXTENSION: &'static str = "json";

    /// Nothing is created on disk until the first save
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            levels_dir: base_dir.as_ref().join(Self::SUBDIR),
        }
    }

    pub fn levels_dir(&self) -> &Path {
        &self.levels_dir
    }

    /// `level_0007_v1.json` for the 7th beaten level
    pub fn file_name(beaten_index: u32) -> String {
        format!("level_{beaten_index:04}_v1.{}", Self::EXTENSION)
    }

    pub fn path_for(&self, beaten_index: u32) -> PathBuf {
        self.levels_dir.join(Self::file_name(beaten_index))
    }

    /// Save the `beaten_index`-th beaten level and return where it went
    pub fn save_beaten_level(&self, level: &Level, beaten_index: u32) -> Result<PathBuf, SaveError> {
        if beaten_index == 0 {
            return Err(SaveError::ZeroIndex);
        }
        fs::create_dir_all(&self.levels_dir).map_err(|source| SaveError::CreateDir {
            path: self.levels_dir.clone(),
            source,
        })?;

        let path = self.path_for(beaten_index);
        save_level(level, &path)?;
        log::info!("Saved beaten level #{} to {}", beaten_index, path.display());
        Ok(path)
    }

    pub fn load_beaten_level(&self, beaten_index: u32) -> Result<Level, DecodeError> {
        load_level(&self.path_for(beaten_index))
    }
}
