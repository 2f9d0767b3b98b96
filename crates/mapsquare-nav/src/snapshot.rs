//! World snapshot import format.
//!
//! A snapshot is a JSON document with three arrays of rows:
//!
//! ```text
//! {
//!   "tiles": [[level, x, z, flags], ...],
//!   "zones": [[level, zoneBaseX, zoneBaseZ], ...],
//!   "doors": [[level, x, z, shape, angle, blockRange], ...]
//! }
//! ```
//!
//! Rows are kept as raw integers until [`CollisionStore::build`] validates
//! them, so a bad row is reported with its position instead of a generic
//! deserialization failure. `flags` may be written as a signed 32-bit value
//! (exporters using signed bitwise arithmetic emit `ROOF` as negative).
//!
//! [`CollisionStore::build`]: crate::CollisionStore::build

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use mapsquare_core::coord::{in_world, valid_level, zone_of};
use mapsquare_core::{CollisionFlags, Point};
use serde::{Deserialize, Serialize};

use crate::door::{DoorRecord, DoorShape};
use crate::error::NavError;

/// A full world snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tiles: Vec<TileRow>,
    pub zones: Vec<ZoneRow>,
    pub doors: Vec<DoorRow>,
}

/// `[level, x, z, flags]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileRow(pub i64, pub i64, pub i64, pub i64);

/// `[level, zoneBaseX, zoneBaseZ]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneRow(pub i64, pub i64, pub i64);

/// `[level, x, z, shape, angle, blockRange]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoorRow(pub i64, pub i64, pub i64, pub i64, pub i64, pub BlockRange);

/// The `blockRange` column, written either as a boolean or as 0/1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BlockRange {
    Flag(bool),
    Int(i64),
}

impl BlockRange {
    #[inline]
    pub fn as_bool(self) -> bool {
        match self {
            BlockRange::Flag(b) => b,
            BlockRange::Int(i) => i != 0,
        }
    }
}

impl Snapshot {
    /// Parse a snapshot from a JSON string.
    pub fn from_json(s: &str) -> Result<Self, NavError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Parse a snapshot from a reader producing JSON.
    pub fn from_reader(reader: impl Read) -> Result<Self, NavError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Read and parse a snapshot file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, NavError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| NavError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    /// Serialize to a JSON string.
    pub fn to_json(&self) -> Result<String, NavError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Append a tile row.
    pub fn push_tile(&mut self, level: u8, p: Point, flags: CollisionFlags) {
        self.tiles.push(TileRow(
            level as i64,
            p.x as i64,
            p.z as i64,
            flags.bits() as i64,
        ));
    }

    /// Append a zone row for the zone containing tile `p`.
    pub fn push_zone(&mut self, level: u8, p: Point) {
        let base = mapsquare_core::coord::zone_base(zone_of(p));
        self.zones
            .push(ZoneRow(level as i64, base.x as i64, base.z as i64));
    }

    /// Append a door row.
    pub fn push_door(&mut self, door: DoorRecord) {
        self.doors.push(DoorRow(
            door.level as i64,
            door.x as i64,
            door.z as i64,
            door.shape as i64,
            door.angle as i64,
            BlockRange::Flag(door.block_range),
        ));
    }
}

fn parse_level(v: i64) -> Option<u8> {
    u8::try_from(v).ok().filter(|&l| valid_level(l))
}

fn parse_point(x: i64, z: i64) -> Option<Point> {
    let p = Point::new(i32::try_from(x).ok()?, i32::try_from(z).ok()?);
    in_world(p).then_some(p)
}

impl TileRow {
    /// Validate into `(level, tile, flags)`.
    pub fn parse(self, index: usize) -> Result<(u8, Point, CollisionFlags), NavError> {
        let err = |reason| NavError::InvalidTile {
            index,
            row: vec![self.0, self.1, self.2, self.3],
            reason,
        };
        let level = parse_level(self.0).ok_or_else(|| err("level out of range"))?;
        let p = parse_point(self.1, self.2).ok_or_else(|| err("coordinates out of range"))?;
        if self.3 < i32::MIN as i64 || self.3 > u32::MAX as i64 {
            return Err(err("flags do not fit in 32 bits"));
        }
        Ok((level, p, CollisionFlags(self.3 as u32)))
    }
}

impl ZoneRow {
    /// Validate into `(level, zone)`. Unaligned bases are floored to their zone.
    pub fn parse(self, index: usize) -> Result<(u8, Point), NavError> {
        let err = |reason| NavError::InvalidZone {
            index,
            row: vec![self.0, self.1, self.2],
            reason,
        };
        let level = parse_level(self.0).ok_or_else(|| err("level out of range"))?;
        let p = parse_point(self.1, self.2).ok_or_else(|| err("coordinates out of range"))?;
        Ok((level, zone_of(p)))
    }
}

impl DoorRow {
    /// Validate into a [`DoorRecord`].
    pub fn parse(self, index: usize) -> Result<DoorRecord, NavError> {
        let err = |reason| NavError::InvalidDoor {
            index,
            row: vec![
                self.0,
                self.1,
                self.2,
                self.3,
                self.4,
                self.5.as_bool() as i64,
            ],
            reason,
        };
        let level = parse_level(self.0).ok_or_else(|| err("level out of range"))?;
        let p = parse_point(self.1, self.2).ok_or_else(|| err("coordinates out of range"))?;
        let shape = u8::try_from(self.3)
            .ok()
            .and_then(|s| DoorShape::try_from(s).ok())
            .ok_or_else(|| err("unsupported door shape"))?;
        let angle = u8::try_from(self.4)
            .ok()
            .filter(|&a| a < 4)
            .ok_or_else(|| err("angle out of range"))?;
        Ok(DoorRecord {
            level,
            x: p.x,
            z: p.z,
            shape: shape as u8,
            angle,
            block_range: self.5.as_bool(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "tiles": [[0, 3222, 3218, 256], [1, 3200, 3200, -2147483648]],
        "zones": [[0, 3216, 3216], [2, 3203, 3205]],
        "doors": [[0, 3220, 3218, 0, 2, true], [0, 3221, 3219, 2, 1, 0]]
    }"#;

    #[test]
    fn parses_rows() {
        let s = Snapshot::from_json(DOC).unwrap();
        assert_eq!(s.tiles.len(), 2);
        assert_eq!(s.zones.len(), 2);
        assert_eq!(s.doors.len(), 2);

        let (level, p, flags) = s.tiles[0].parse(0).unwrap();
        assert_eq!((level, p, flags), (0, Point::new(3222, 3218), CollisionFlags::LOC));
    }

    #[test]
    fn negative_flags_are_reinterpreted() {
        let s = Snapshot::from_json(DOC).unwrap();
        let (_, _, flags) = s.tiles[1].parse(1).unwrap();
        assert_eq!(flags, CollisionFlags::ROOF);
    }

    #[test]
    fn unaligned_zone_base_is_floored() {
        let s = Snapshot::from_json(DOC).unwrap();
        assert_eq!(s.zones[1].parse(1).unwrap(), (2, Point::new(400, 400)));
    }

    #[test]
    fn block_range_accepts_bool_and_int() {
        let s = Snapshot::from_json(DOC).unwrap();
        let a = s.doors[0].parse(0).unwrap();
        let b = s.doors[1].parse(1).unwrap();
        assert!(a.block_range);
        assert!(!b.block_range);
        assert_eq!(b.shape, DoorShape::WallL as u8);
        assert_eq!(b.angle, 1);
    }

    #[test]
    fn missing_array_is_a_parse_error() {
        let err = Snapshot::from_json(r#"{ "tiles": [], "zones": [] }"#).unwrap_err();
        assert!(matches!(err, NavError::Parse(_)));
    }

    #[test]
    fn malformed_rows_are_rejected() {
        let bad_level = TileRow(4, 0, 0, 0);
        assert!(matches!(bad_level.parse(0), Err(NavError::InvalidTile { .. })));
        let bad_coord = ZoneRow(0, -8, 0);
        assert!(matches!(bad_coord.parse(0), Err(NavError::InvalidZone { .. })));
        let bad_shape = DoorRow(0, 1, 1, 10, 0, BlockRange::Flag(true));
        assert!(matches!(bad_shape.parse(0), Err(NavError::InvalidDoor { .. })));
        let bad_angle = DoorRow(0, 1, 1, 0, 4, BlockRange::Int(1));
        assert!(matches!(bad_angle.parse(0), Err(NavError::InvalidDoor { .. })));
        let huge_flags = TileRow(0, 1, 1, 1 << 40);
        assert!(huge_flags.parse(0).is_err());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = Snapshot::load("/nonexistent/snapshot.json").unwrap_err();
        assert!(matches!(err, NavError::Io { .. }));
    }

    #[test]
    fn builder_rows_survive_json() {
        let mut s = Snapshot::default();
        s.push_tile(0, Point::new(10, 12), CollisionFlags::WALL_WEST | CollisionFlags::ROOF);
        s.push_zone(0, Point::new(13, 13));
        s.push_door(DoorRecord {
            level: 0,
            x: 10,
            z: 12,
            shape: 0,
            angle: 0,
            block_range: true,
        });
        let back = Snapshot::from_json(&s.to_json().unwrap()).unwrap();
        assert_eq!(back, s);
        assert_eq!(back.zones[0].parse(0).unwrap(), (0, Point::new(1, 1)));
    }
}
