//! Versioned level payloads
//!
//! Encoding always writes the current version. Decoding dispatches on the
//! `version` field through a small table; each entry is a pure parser and a
//! new version is one more entry. Decoding fails closed: any bad field
//! rejects the whole payload.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::consts::{LEVEL_FORMAT, LEVEL_LENGTH_CELLS, LEVEL_VERSION};
use crate::level::{Level, LevelObject, ObjectKind, Props, ValidationError};

/// Only length accepted from files for now
pub const REQUIRED_LENGTH_CELLS: i32 = LEVEL_LENGTH_CELLS;
/// Grid height implied by version 1 files
pub const LEGACY_HEIGHT_CELLS: i32 = 14;

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("level grid must be at least 1x1, got {length_cells}x{height_cells}")]
    InvalidGrid { length_cells: i32, height_cells: i32 },
    #[error("objects[{index}]: {source}")]
    InvalidObject {
        index: usize,
        #[source]
        source: ValidationError,
    },
    #[error("failed to build level payload: {0}")]
    Serialize(#[source] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("level payload must be a JSON object")]
    NotAnObject,
    #[error("invalid level format marker: {found}")]
    Format { found: Value },
    #[error("unsupported level version {0}")]
    UnsupportedVersion(i64),
    #[error("{field}: {reason}")]
    Field { field: String, reason: String },
    #[error("spike_cells[{index}]: duplicate spike at x={x}")]
    DuplicateSpike { index: usize, x: i64 },
    #[error("objects[{index}]: {source}")]
    InvalidObject {
        index: usize,
        #[source]
        source: ValidationError,
    },
    #[error("level text is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("failed to read level file {}: {source}", .path.display())]
    Read {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DecodeError {
    fn field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        DecodeError::Field {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

#[derive(Serialize)]
struct LevelRecord<'a> {
    format: &'static str,
    version: i64,
    length_cells: i32,
    height_cells: i32,
    objects: Vec<ObjectRecord<'a>>,
}

#[derive(Serialize)]
struct ObjectRecord<'a> {
    kind: &'a str,
    x: i32,
    y: i32,
    w: i32,
    h: i32,
    props: &'a Props,
}

/// Build the current-version payload for `level`
pub fn encode_level(level: &Level) -> Result<Value, EncodeError> {
    if level.length_cells < 1 || level.height_cells < 1 {
        return Err(EncodeError::InvalidGrid {
            length_cells: level.length_cells,
            height_cells: level.height_cells,
        });
    }

    let mut objects = Vec::with_capacity(level.objects.len());
    for (index, obj) in level.objects.iter().enumerate() {
        obj.validate_within(level.length_cells, level.height_cells)
            .map_err(|source| EncodeError::InvalidObject { index, source })?;
        objects.push(ObjectRecord {
            kind: obj.kind.as_str(),
            x: obj.x,
            y: obj.y,
            w: obj.w,
            h: obj.h,
            props: &obj.props,
        });
    }

    let record = LevelRecord {
        format: LEVEL_FORMAT,
        version: LEVEL_VERSION,
        length_cells: level.length_cells,
        height_cells: level.height_cells,
        objects,
    };
    serde_json::to_value(record).map_err(EncodeError::Serialize)
}

type Decoder = fn(&Map<String, Value>) -> Result<Level, DecodeError>;

const DECODERS: &[(i64, Decoder)] = &[(1, decode_v1), (2, decode_v2)];

/// Decode a payload of any supported version
pub fn decode_level(payload: &Value) -> Result<Level, DecodeError> {
    let map = payload.as_object().ok_or(DecodeError::NotAnObject)?;

    match map.get("format") {
        Some(Value::String(marker)) if marker == LEVEL_FORMAT => {}
        other => {
            return Err(DecodeError::Format {
                found: other.cloned().unwrap_or(Value::Null),
            });
        }
    }

    let version = int_field(map, "version", "version")?;
    let decoder = DECODERS
        .iter()
        .find(|(v, _)| *v == version)
        .map(|(_, decoder)| *decoder)
        .ok_or(DecodeError::UnsupportedVersion(version))?;
    decoder(map)
}

/// Version 1: `length_cells` plus floor spike columns on a 14-row grid
fn decode_v1(map: &Map<String, Value>) -> Result<Level, DecodeError> {
    let length_cells = length_field(map)?;
    let cells = array_field(map, "spike_cells", "spike_cells")?;

    let floor_row = LEGACY_HEIGHT_CELLS - 1;
    let mut seen = std::collections::HashSet::new();
    let mut objects = Vec::with_capacity(cells.len());
    for (index, cell) in cells.iter().enumerate() {
        let field = format!("spike_cells[{index}]");
        let x = cell
            .as_i64()
            .ok_or_else(|| DecodeError::field(&field, "must be an integer"))?;
        if x < 0 || x >= i64::from(length_cells) {
            return Err(DecodeError::field(
                &field,
                format!("{x} out of range 0..{length_cells}"),
            ));
        }
        if !seen.insert(x) {
            return Err(DecodeError::DuplicateSpike { index, x });
        }
        // In range of length_cells, so it fits i32
        objects.push(LevelObject::spike(x as i32, floor_row));
    }

    Ok(Level {
        length_cells,
        height_cells: LEGACY_HEIGHT_CELLS,
        objects,
    })
}

/// Version 2: full object list
fn decode_v2(map: &Map<String, Value>) -> Result<Level, DecodeError> {
    let length_cells = length_field(map)?;
    let height_cells = cell_field(map, "height_cells", "height_cells")?;
    if height_cells <= 0 {
        return Err(DecodeError::field("height_cells", "must be > 0"));
    }

    let records = array_field(map, "objects", "objects")?;
    let mut objects = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let obj = decode_object(record, index)?;
        obj.validate_within(length_cells, height_cells)
            .map_err(|source| DecodeError::InvalidObject { index, source })?;
        objects.push(obj);
    }

    Ok(Level {
        length_cells,
        height_cells,
        objects,
    })
}

fn decode_object(record: &Value, index: usize) -> Result<LevelObject, DecodeError> {
    let prefix = format!("objects[{index}]");
    let map = record
        .as_object()
        .ok_or_else(|| DecodeError::field(&prefix, "must be an object"))?;
    let path = |key: &str| format!("{prefix}.{key}");

    let kind = match map.get("kind") {
        Some(Value::String(tag)) if !tag.is_empty() => ObjectKind::from_tag(tag),
        Some(Value::String(_)) => return Err(DecodeError::field(path("kind"), "must not be empty")),
        Some(_) => return Err(DecodeError::field(path("kind"), "must be a string")),
        None => return Err(DecodeError::field(path("kind"), "missing")),
    };
    let x = cell_field(map, "x", &path("x"))?;
    let y = cell_field(map, "y", &path("y"))?;
    let w = cell_field(map, "w", &path("w"))?;
    let h = cell_field(map, "h", &path("h"))?;
    if w <= 0 {
        return Err(DecodeError::field(path("w"), "must be > 0"));
    }
    if h <= 0 {
        return Err(DecodeError::field(path("h"), "must be > 0"));
    }
    let props = match map.get("props") {
        Some(Value::Object(props)) => props.clone(),
        Some(_) => return Err(DecodeError::field(path("props"), "must be an object")),
        None => return Err(DecodeError::field(path("props"), "missing")),
    };

    Ok(LevelObject {
        kind,
        x,
        y,
        w,
        h,
        props,
    })
}

fn length_field(map: &Map<String, Value>) -> Result<i32, DecodeError> {
    let length_cells = cell_field(map, "length_cells", "length_cells")?;
    if length_cells != REQUIRED_LENGTH_CELLS {
        return Err(DecodeError::field(
            "length_cells",
            format!("must be {REQUIRED_LENGTH_CELLS}, got {length_cells}"),
        ));
    }
    Ok(length_cells)
}

fn int_field(map: &Map<String, Value>, key: &str, path: &str) -> Result<i64, DecodeError> {
    map.get(key)
        .ok_or_else(|| DecodeError::field(path, "missing"))?
        .as_i64()
        .ok_or_else(|| DecodeError::field(path, "must be an integer"))
}

fn cell_field(map: &Map<String, Value>, key: &str, path: &str) -> Result<i32, DecodeError> {
    let value = int_field(map, key, path)?;
    i32::try_from(value).map_err(|_| DecodeError::field(path, format!("{value} out of range")))
}

fn array_field<'a>(
    map: &'a Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<&'a Vec<Value>, DecodeError> {
    map.get(key)
        .ok_or_else(|| DecodeError::field(path, "missing"))?
        .as_array()
        .ok_or_else(|| DecodeError::field(path, "must be a list"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::{generate, place};
    use crate::random::SeededRandom;
    use proptest::prelude::*;
    use serde_json::json;

    fn scenario_level() -> Level {
        Level {
            length_cells: 50,
            height_cells: 14,
            objects: vec![LevelObject::spike(5, 13)],
        }
    }

    fn v2_payload(objects: Value) -> Value {
        json!({
            "format": LEVEL_FORMAT,
            "version": 2,
            "length_cells": 50,
            "height_cells": 14,
            "objects": objects,
        })
    }

    fn field_of(err: DecodeError) -> String {
        match err {
            DecodeError::Field { field, .. } => field,
            other => panic!("expected field error, got {other:?}"),
        }
    }

    #[test]
    fn test_encode_shape() {
        let payload = encode_level(&scenario_level()).unwrap();
        assert_eq!(
            payload,
            json!({
                "format": LEVEL_FORMAT,
                "version": 2,
                "length_cells": 50,
                "height_cells": 14,
                "objects": [{"kind": "spike", "x": 5, "y": 13, "w": 1, "h": 1, "props": {}}],
            })
        );
    }

    #[test]
    fn test_roundtrip_single_spike() {
        let level = scenario_level();
        let decoded = decode_level(&encode_level(&level).unwrap()).unwrap();
        assert_eq!(decoded, level);
    }

    #[test]
    fn test_roundtrip_keeps_props_and_order() {
        let mut props = Props::new();
        props.insert("color".into(), json!("red"));
        props.insert("speed".into(), json!({"x": 1.5, "tags": [1, 2]}));
        let level = Level {
            length_cells: 50,
            height_cells: 20,
            objects: vec![
                LevelObject::solid(8, 11, 2, 1),
                LevelObject::new(ObjectKind::Other("portal".into()), 1, 1, 3, 2).with_props(props),
                LevelObject::spike(5, 19),
            ],
        };
        assert_eq!(decode_level(&encode_level(&level).unwrap()).unwrap(), level);
    }

    #[test]
    fn test_spike_tag_spelled_as_other() {
        let one = LevelObject {
            kind: ObjectKind::Other("spike".into()),
            ..LevelObject::spike(5, 13)
        };
        let level = Level::empty(50, 14).with_objects(vec![one]);
        let decoded = decode_level(&encode_level(&level).unwrap()).unwrap();
        assert_eq!(decoded, level);

        let wide = LevelObject {
            kind: ObjectKind::Other("spike".into()),
            ..LevelObject::solid(5, 12, 2, 2)
        };
        let err = encode_level(&Level::empty(50, 14).with_objects(vec![wide])).unwrap_err();
        assert!(matches!(
            err,
            EncodeError::InvalidObject {
                index: 0,
                source: ValidationError::SpikeShape { w: 2, h: 2 }
            }
        ));
    }

    #[test]
    fn test_decode_legacy_v1() {
        let payload = json!({
            "format": LEVEL_FORMAT,
            "version": 1,
            "length_cells": 50,
            "spike_cells": [5, 10],
        });
        let level = decode_level(&payload).unwrap();
        assert_eq!(level.height_cells, 14);
        assert_eq!(level.length_cells, 50);
        assert_eq!(
            level.objects,
            vec![LevelObject::spike(5, 13), LevelObject::spike(10, 13)]
        );
    }

    #[test]
    fn test_decode_legacy_rejects_bad_cells() {
        let with_cells = |cells: Value| {
            json!({"format": LEVEL_FORMAT, "version": 1, "length_cells": 50, "spike_cells": cells})
        };
        assert!(matches!(
            decode_level(&with_cells(json!([5, 5]))),
            Err(DecodeError::DuplicateSpike { index: 1, x: 5 })
        ));
        assert_eq!(field_of(decode_level(&with_cells(json!([50]))).unwrap_err()), "spike_cells[0]");
        assert_eq!(field_of(decode_level(&with_cells(json!([1, -1]))).unwrap_err()), "spike_cells[1]");
        assert_eq!(field_of(decode_level(&with_cells(json!([2.5]))).unwrap_err()), "spike_cells[0]");
        assert_eq!(field_of(decode_level(&with_cells(json!("3"))).unwrap_err()), "spike_cells");
    }

    #[test]
    fn test_decode_rejects_wrong_marker() {
        let mut payload = encode_level(&scenario_level()).unwrap();
        payload["format"] = json!("somebody.else");
        assert!(matches!(decode_level(&payload), Err(DecodeError::Format { .. })));

        let mut payload = encode_level(&scenario_level()).unwrap();
        payload.as_object_mut().unwrap().remove("format");
        assert!(matches!(decode_level(&payload), Err(DecodeError::Format { .. })));
    }

    #[test]
    fn test_decode_rejects_unknown_version() {
        let mut payload = encode_level(&scenario_level()).unwrap();
        payload["version"] = json!(3);
        assert!(matches!(decode_level(&payload), Err(DecodeError::UnsupportedVersion(3))));

        payload["version"] = json!("2");
        assert_eq!(field_of(decode_level(&payload).unwrap_err()), "version");
    }

    #[test]
    fn test_decode_rejects_non_object() {
        assert!(matches!(decode_level(&json!([1, 2])), Err(DecodeError::NotAnObject)));
    }

    #[test]
    fn test_decode_requires_length_50() {
        let mut payload = encode_level(&scenario_level()).unwrap();
        payload["length_cells"] = json!(60);
        assert_eq!(field_of(decode_level(&payload).unwrap_err()), "length_cells");
    }

    #[test]
    fn test_decode_rejects_bad_spike_shape() {
        let payload = v2_payload(json!([
            {"kind": "spike", "x": 5, "y": 12, "w": 1, "h": 2, "props": {}}
        ]));
        assert!(matches!(
            decode_level(&payload),
            Err(DecodeError::InvalidObject {
                index: 0,
                source: ValidationError::SpikeShape { w: 1, h: 2 }
            })
        ));
    }

    #[test]
    fn test_decode_rejects_out_of_grid() {
        let payload = v2_payload(json!([
            {"kind": "solid", "x": 1, "y": 1, "w": 1, "h": 1, "props": {}},
            {"kind": "solid", "x": 49, "y": 0, "w": 2, "h": 1, "props": {}}
        ]));
        assert!(matches!(
            decode_level(&payload),
            Err(DecodeError::InvalidObject {
                index: 1,
                source: ValidationError::OutOfBoundsX { .. }
            })
        ));
    }

    #[test]
    fn test_decode_names_bad_fields() {
        let cases = [
            (json!([{"x": 1, "y": 1, "w": 1, "h": 1, "props": {}}]), "objects[0].kind"),
            (json!([{"kind": "", "x": 1, "y": 1, "w": 1, "h": 1, "props": {}}]), "objects[0].kind"),
            (json!([{"kind": "solid", "x": 1.5, "y": 1, "w": 1, "h": 1, "props": {}}]), "objects[0].x"),
            (json!([{"kind": "solid", "x": 1, "y": 1, "w": 0, "h": 1, "props": {}}]), "objects[0].w"),
            (json!([{"kind": "solid", "x": 1, "y": 1, "w": 1, "h": -2, "props": {}}]), "objects[0].h"),
            (json!([{"kind": "solid", "x": 1, "y": 1, "w": 1, "h": 1, "props": []}]), "objects[0].props"),
            (json!([{"kind": "solid", "x": 1, "y": 1, "w": 1, "h": 1}]), "objects[0].props"),
            (json!([7]), "objects[0]"),
            (json!({}), "objects"),
        ];
        for (objects, expected) in cases {
            let err = decode_level(&v2_payload(objects)).unwrap_err();
            assert_eq!(field_of(err), expected);
        }
    }

    #[test]
    fn test_decode_rejects_bad_height() {
        let mut payload = v2_payload(json!([]));
        payload["height_cells"] = json!(0);
        assert_eq!(field_of(decode_level(&payload).unwrap_err()), "height_cells");
        payload.as_object_mut().unwrap().remove("height_cells");
        assert_eq!(field_of(decode_level(&payload).unwrap_err()), "height_cells");
    }

    #[test]
    fn test_encode_rejects_invalid_level() {
        let level = Level {
            length_cells: 50,
            height_cells: 14,
            objects: vec![LevelObject::spike(60, 13)],
        };
        assert!(matches!(
            encode_level(&level),
            Err(EncodeError::InvalidObject { index: 0, .. })
        ));
        assert!(matches!(
            encode_level(&Level::empty(0, 14)),
            Err(EncodeError::InvalidGrid { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_generated_levels_roundtrip(seed in any::<u64>()) {
            let level = generate(&mut SeededRandom::new(seed));
            let decoded = decode_level(&encode_level(&level).unwrap()).unwrap();
            prop_assert_eq!(decoded, level);
        }

        #[test]
        fn prop_edited_levels_roundtrip(
            seed in any::<u64>(),
            edits in prop::collection::vec((0i32..50, 0i32..14, any::<bool>()), 0..20),
        ) {
            let mut level = generate(&mut SeededRandom::new(seed));
            for (x, y, spike) in edits {
                let obj = if spike { LevelObject::spike(x, y) } else { LevelObject::solid(x, y, 1, 1) };
                level = place(&level, obj).unwrap();
            }
            let decoded = decode_level(&encode_level(&level).unwrap()).unwrap();
            prop_assert_eq!(decoded, level);
        }
    }
}
