//! Level files on disk
//!
//! Saves go to a sibling `.tmp` file first and are renamed over the
//! destination, so a failed save never leaves a half-written level behind.

use std::ffi::{OsStr, OsString};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::codec::{DecodeError, EncodeError, decode_level, encode_level};
use crate::level::Level;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("failed to encode level for {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: EncodeError,
    },
    #[error("failed to serialize level for {}: {source}", .path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write level to {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to create level directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("beaten level counter is 1-based, got 0")]
    ZeroIndex,
}

/// Encode `level` and write it to `path` atomically
pub fn save_level(level: &Level, path: &Path) -> Result<(), SaveError> {
    let payload = encode_level(level).map_err(|source| SaveError::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    let text = serde_json::to_string_pretty(&payload).map_err(|source| SaveError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;
    write_text_atomic(path, &text).map_err(|source| SaveError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("Level written to {}", path.display());
    Ok(())
}

/// Read, parse and decode the level at `path`
pub fn load_level(path: &Path) -> Result<Level, DecodeError> {
    let text = fs::read_to_string(path).map_err(|source| DecodeError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_level(&text)
}

/// Decode a level from JSON text
pub fn parse_level(text: &str) -> Result<Level, DecodeError> {
    let payload: serde_json::Value = serde_json::from_str(text).map_err(DecodeError::Parse)?;
    decode_level(&payload)
}

/// Write `text` to a temp file beside `path`, then rename it into place.
///
/// On failure the temp file is removed (best effort) and `path` is untouched.
pub(crate) fn write_text_atomic(path: &Path, text: &str) -> io::Result<()> {
    let tmp_path = temp_path_for(path);
    let result = fs::write(&tmp_path, text).and_then(|_| fs::rename(&tmp_path, path));
    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut tmp_name = path
        .file_name()
        .map(OsStr::to_os_string)
        .unwrap_or_else(|| OsString::from("level.json"));
    tmp_name.push(".tmp");
    match path.parent() {
        Some(parent) => parent.join(tmp_name),
        None => PathBuf::from(tmp_name),
    }
}
