//! Level editing operations
//!
//! Both operations take the level by reference and return a new one.

use super::{Level, LevelObject, ValidationError};

/// Place `obj`, replacing whatever covers its anchor cell.
///
/// Fails without building anything if the object is malformed or leaves the grid.
pub fn place(level: &Level, obj: LevelObject) -> Result<Level, ValidationError> {
    obj.validate_within(level.length_cells, level.height_cells)?;

    let mut objects: Vec<LevelObject> = level
        .objects
        .iter()
        .filter(|o| !o.covers(obj.x, obj.y))
        .cloned()
        .collect();
    objects.push(obj);
    Ok(level.with_objects(objects))
}

/// Remove every object covering cell `(x, y)`. Empty cells are a no-op.
pub fn remove_at(level: &Level, x: i32, y: i32) -> Level {
    let objects = level
        .objects
        .iter()
        .filter(|o| !o.covers(x, y))
        .cloned()
        .collect();
    level.with_objects(objects)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::ObjectKind;

    fn base_level() -> Level {
        Level {
            length_cells: 50,
            height_cells: 14,
            objects: vec![LevelObject::spike(5, 13), LevelObject::solid(8, 11, 2, 1)],
        }
    }

    #[test]
    fn test_place_appends() {
        let level = base_level();
        let next = place(&level, LevelObject::spike(20, 13)).unwrap();
        assert_eq!(next.objects.len(), 3);
        assert_eq!(next.objects[2], LevelObject::spike(20, 13));
        // Input untouched
        assert_eq!(level, base_level());
    }

    #[test]
    fn test_place_replaces_same_cell() {
        let level = place(&base_level(), LevelObject::spike(20, 13)).unwrap();
        let level = place(&level, LevelObject::solid(20, 13, 1, 1)).unwrap();

        let at_cell: Vec<_> = level.objects_at(20, 13).collect();
        assert_eq!(at_cell.len(), 1);
        assert_eq!(at_cell[0].kind, ObjectKind::Solid);
    }

    #[test]
    fn test_place_replaces_object_covering_anchor() {
        // Anchor lands on the second cell of the 2x1 solid
        let level = place(&base_level(), LevelObject::spike(9, 11)).unwrap();
        assert!(level.objects.iter().all(|o| o.kind != ObjectKind::Solid));
        assert_eq!(level.objects_at(9, 11).count(), 1);
    }

    #[test]
    fn test_place_out_of_bounds_is_rejected() {
        let level = base_level();
        let err = place(&level, LevelObject::spike(-1, 0)).unwrap_err();
        assert!(matches!(err, ValidationError::OutOfBoundsX { x: -1, .. }));
        assert_eq!(level, base_level());
    }

    #[test]
    fn test_place_rejects_bad_shapes() {
        let level = base_level();
        assert!(matches!(
            place(&level, LevelObject::new(ObjectKind::Spike, 1, 1, 1, 2)),
            Err(ValidationError::SpikeShape { w: 1, h: 2 })
        ));
        assert!(matches!(
            place(&level, LevelObject::solid(1, 1, -1, 1)),
            Err(ValidationError::NonPositiveSize { .. })
        ));
        assert!(matches!(
            place(&level, LevelObject::solid(1, 13, 1, 2)),
            Err(ValidationError::OutOfBoundsY { .. })
        ));
    }

    #[test]
    fn test_remove_covering_objects() {
        let level = remove_at(&base_level(), 9, 11);
        assert_eq!(level.objects, vec![LevelObject::spike(5, 13)]);
    }

    #[test]
    fn test_remove_empty_cell_is_noop() {
        let level = base_level();
        assert_eq!(remove_at(&level, 30, 2), level);
        assert_eq!(remove_at(&level, -5, 100), level);
    }
}
