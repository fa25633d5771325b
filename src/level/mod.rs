//! Level grid model
//!
//! A level is a rectangular grid of cells plus the objects placed on it.
//! Levels are values: generation, editing and decoding all build new ones,
//! nothing mutates a level in place.

pub mod edit;
pub mod generate;

pub use edit::{place, remove_at};
pub use generate::{generate, generate_sized};

use std::hash::{Hash, Hasher};

use serde_json::{Map, Value};
use thiserror::Error;

/// Opaque per-object properties, preserved through save/load
pub type Props = Map<String, Value>;

/// Object type tag.
///
/// Kinds compare and hash by tag, so `Other("spike")` is the same kind as
/// `Spike`. Use [`ObjectKind::canonical`] before matching on variants.
#[derive(Debug, Clone)]
pub enum ObjectKind {
    Spike,
    Solid,
    /// Any other tag; carried through untouched, ignored by physics
    Other(String),
}

impl PartialEq for ObjectKind {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for ObjectKind {}

impl Hash for ObjectKind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl ObjectKind {
    pub fn as_str(&self) -> &str {
        match self {
            ObjectKind::Spike => "spike",
            ObjectKind::Solid => "solid",
            ObjectKind::Other(tag) => tag,
        }
    }

    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "spike" => ObjectKind::Spike,
            "solid" => ObjectKind::Solid,
            other => ObjectKind::Other(other.to_string()),
        }
    }

    /// Same kind with reserved tags mapped to their own variants
    pub fn canonical(self) -> Self {
        match self {
            ObjectKind::Other(tag) => Self::from_tag(&tag),
            known => known,
        }
    }

    pub fn is_spike(&self) -> bool {
        self.as_str() == "spike"
    }
}

/// Rejected level edit. Raised before any new level is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("object kind must be a non-empty tag")]
    EmptyKind,
    #[error("object size must be positive, got {w}x{h}")]
    NonPositiveSize { w: i32, h: i32 },
    #[error("object out of bounds in x: x={x} w={w} length_cells={length_cells}")]
    OutOfBoundsX { x: i32, w: i32, length_cells: i32 },
    #[error("object out of bounds in y: y={y} h={h} height_cells={height_cells}")]
    OutOfBoundsY { y: i32, h: i32, height_cells: i32 },
    #[error("spike must be 1x1, got {w}x{h}")]
    SpikeShape { w: i32, h: i32 },
}

/// An object placed on the grid (cell coordinates, top-left anchored)
#[derive(Debug, Clone, PartialEq)]
pub struct LevelObject {
    pub kind: ObjectKind,
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    pub props: Props,
}

impl LevelObject {
    pub fn new(kind: ObjectKind, x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            kind: kind.canonical(),
            x,
            y,
            w,
            h,
            props: Props::new(),
        }
    }

    pub fn spike(x: i32, y: i32) -> Self {
        Self::new(ObjectKind::Spike, x, y, 1, 1)
    }

    pub fn solid(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self::new(ObjectKind::Solid, x, y, w, h)
    }

    pub fn with_props(self, props: Props) -> Self {
        Self { props, ..self }
    }

    /// Whether the object's footprint covers cell `(x, y)`
    pub fn covers(&self, x: i32, y: i32) -> bool {
        let (x, y) = (i64::from(x), i64::from(y));
        let (ox, oy) = (i64::from(self.x), i64::from(self.y));
        x >= ox && x < ox + i64::from(self.w) && y >= oy && y < oy + i64::from(self.h)
    }

    /// Check shape rules and that the footprint fits a `length_cells x height_cells` grid
    pub fn validate_within(&self, length_cells: i32, height_cells: i32) -> Result<(), ValidationError> {
        if self.kind.as_str().is_empty() {
            return Err(ValidationError::EmptyKind);
        }
        if self.w <= 0 || self.h <= 0 {
            return Err(ValidationError::NonPositiveSize { w: self.w, h: self.h });
        }
        // i64 so huge sizes can't wrap back into range
        if self.x < 0 || i64::from(self.x) + i64::from(self.w) > i64::from(length_cells) {
            return Err(ValidationError::OutOfBoundsX {
                x: self.x,
                w: self.w,
                length_cells,
            });
        }
        if self.y < 0 || i64::from(self.y) + i64::from(self.h) > i64::from(height_cells) {
            return Err(ValidationError::OutOfBoundsY {
                y: self.y,
                h: self.h,
                height_cells,
            });
        }
        if self.kind.is_spike() && (self.w != 1 || self.h != 1) {
            return Err(ValidationError::SpikeShape { w: self.w, h: self.h });
        }
        Ok(())
    }
}

/// A level: grid size plus objects in insertion order
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    pub length_cells: i32,
    pub height_cells: i32,
    pub objects: Vec<LevelObject>,
}

impl Level {
    /// Empty level of the given size
    pub fn empty(length_cells: i32, height_cells: i32) -> Self {
        Self {
            length_cells,
            height_cells,
            objects: Vec::new(),
        }
    }

    /// Copy of this level with a different object list
    pub fn with_objects(&self, objects: Vec<LevelObject>) -> Self {
        Self {
            length_cells: self.length_cells,
            height_cells: self.height_cells,
            objects,
        }
    }

    /// Objects covering cell `(x, y)`
    pub fn objects_at(&self, x: i32, y: i32) -> impl Iterator<Item = &LevelObject> {
        self.objects.iter().filter(move |o| o.covers(x, y))
    }

    pub fn in_grid(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.length_cells && y >= 0 && y < self.height_cells
    }

    pub fn spikes(&self) -> impl Iterator<Item = &LevelObject> {
        self.objects.iter().filter(|o| o.kind.is_spike())
    }
}
