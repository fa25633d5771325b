//! Save/load of levels
//!
//! Features:
//! - Versioned JSON envelope with a format marker
//! - Version-dispatched decode (legacy v1 spike lists, v2 object lists)
//! - Atomic writes (tmp → rename)
//! - Numbered archive of beaten levels

pub mod codec;
pub mod files;
pub mod repository;

pub use codec::{DecodeError, EncodeError, decode_level, encode_level};
pub use files::{SaveError, load_level, parse_level, save_level};
pub use repository::LevelRepository;
