//! Door records: masking their walls at build time and detecting them along
//! computed paths.

use std::collections::HashSet;

use log::debug;
use mapsquare_core::{CollisionFlags, Direction, Point};
use mapsquare_paths::expand_strides;
use serde::{Deserialize, Serialize};

use crate::store::CollisionStore;

/// An openable wall-shaped object imported from the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DoorRecord {
    pub level: u8,
    pub x: i32,
    pub z: i32,
    /// Raw wall shape, see [`DoorShape`].
    pub shape: u8,
    /// Rotation, clockwise from west.
    pub angle: u8,
    /// Whether the object blocks projectiles. Carried through, never used
    /// for walking.
    pub block_range: bool,
}

impl DoorRecord {
    /// Tile the door stands on.
    #[inline]
    pub fn pos(&self) -> Point {
        Point::new(self.x, self.z)
    }

    /// Parsed shape. Records built by the snapshot importer always have one.
    pub fn door_shape(&self) -> Option<DoorShape> {
        DoorShape::try_from(self.shape).ok()
    }

    /// Directions whose wall bits this door occupies, and whether it also
    /// flags its own tile as blocked.
    pub fn masked_directions(&self) -> (&'static [Direction], bool) {
        match self.door_shape() {
            Some(shape) => shape.masked_directions(self.angle),
            None => (&[], false),
        }
    }
}

/// Wall shapes a door can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DoorShape {
    /// A wall along one edge.
    Straight = 0,
    /// A post in one corner, with its two adjacent edges.
    DiagonalCorner = 1,
    /// A wall along two adjacent edges.
    WallL = 2,
    /// A square post in one corner, with its two adjacent edges.
    SquareCorner = 3,
    /// A wall across the tile diagonal.
    Diagonal = 9,
}

impl TryFrom<u8> for DoorShape {
    type Error = u8;

    fn try_from(v: u8) -> Result<Self, u8> {
        match v {
            0 => Ok(DoorShape::Straight),
            1 => Ok(DoorShape::DiagonalCorner),
            2 => Ok(DoorShape::WallL),
            3 => Ok(DoorShape::SquareCorner),
            9 => Ok(DoorShape::Diagonal),
            other => Err(other),
        }
    }
}

use Direction::*;

const EDGE: [&[Direction]; 4] = [&[West], &[North], &[East], &[South]];
const EDGE_PAIR: [&[Direction]; 4] = [
    &[West, North],
    &[North, East],
    &[East, South],
    &[South, West],
];
const CORNER: [&[Direction]; 4] = [
    &[NorthWest, West, North],
    &[NorthEast, North, East],
    &[SouthEast, East, South],
    &[SouthWest, South, West],
];

impl DoorShape {
    /// Directions whose wall bits a door of this shape occupies at `angle`,
    /// and whether it flags its own tile as blocked.
    pub fn masked_directions(self, angle: u8) -> (&'static [Direction], bool) {
        let a = (angle & 3) as usize;
        match self {
            DoorShape::Straight => (EDGE[a], false),
            DoorShape::WallL => (EDGE_PAIR[a], false),
            DoorShape::DiagonalCorner | DoorShape::SquareCorner => (CORNER[a], false),
            DoorShape::Diagonal => (CORNER[a], true),
        }
    }
}

/// Clear the walls of `door` on its tile and the reciprocal walls on the
/// tiles across each masked edge or corner.
///
/// Returns `false` when the door tile is not allocated; nothing is masked
/// in that case.
pub(crate) fn apply_mask(store: &mut CollisionStore, door: &DoorRecord) -> bool {
    let p = door.pos();
    if !store.is_zone_allocated(door.level, p.x, p.z) {
        debug!("door at {p} level {} is on an unallocated tile", door.level);
        return false;
    }
    let (dirs, loc) = door.masked_directions();
    let mut own = CollisionFlags::OPEN;
    for &d in dirs {
        own |= d.wall();
        store.clear_flags(door.level, p + d.offset(), d.opposite().wall());
    }
    if loc {
        own |= CollisionFlags::LOC;
    }
    store.clear_flags(door.level, p, own);
    true
}

/// Doors on the waypoints of `path`, in path order, each reported once.
pub fn doors_along_path(store: &CollisionStore, level: u8, path: &[Point]) -> Vec<DoorRecord> {
    collect_doors(store, level, path.iter().copied())
}

/// Like [`doors_along_path`] for a path with straight runs collapsed.
///
/// Aligned segments of at most `max_run` steps are walked tile by tile, so
/// doors between turning points are found too.
pub fn doors_along_strides(store: &CollisionStore, level: u8, path: &[Point], max_run: i32) -> Vec<DoorRecord> {
    collect_doors(store, level, expand_strides(path, max_run))
}

fn collect_doors(store: &CollisionStore, level: u8, tiles: impl IntoIterator<Item = Point>) -> Vec<DoorRecord> {
    let mut seen = HashSet::new();
    let mut found = Vec::new();
    for p in tiles {
        for &i in store.door_indices_at(level, p) {
            if seen.insert(i) {
                found.push(store.doors()[i]);
            }
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn door(shape: u8, angle: u8) -> DoorRecord {
        DoorRecord {
            level: 0,
            x: 10,
            z: 10,
            shape,
            angle,
            block_range: true,
        }
    }

    #[test]
    fn straight_door_angles_rotate_clockwise_from_west() {
        let dirs: Vec<_> = (0..4).map(|a| door(0, a).masked_directions().0[0]).collect();
        assert_eq!(dirs, vec![West, North, East, South]);
    }

    #[test]
    fn l_shape_takes_angle_and_next_edge() {
        assert_eq!(door(2, 3).masked_directions(), (&[South, West][..], false));
    }

    #[test]
    fn corners_include_adjacent_edges() {
        let (dirs, loc) = door(1, 1).masked_directions();
        assert_eq!(dirs, &[NorthEast, North, East]);
        assert!(!loc);
        assert_eq!(door(3, 2).masked_directions().0, &[SouthEast, East, South]);
    }

    #[test]
    fn diagonal_clears_loc() {
        let (dirs, loc) = door(9, 0).masked_directions();
        assert_eq!(dirs, &[NorthWest, West, North]);
        assert!(loc);
    }

    #[test]
    fn unknown_shape_masks_nothing() {
        assert_eq!(door(5, 0).masked_directions(), (&[][..], false));
        assert_eq!(DoorShape::try_from(4), Err(4));
    }
}
