//! Synthetic worlds for tests.

use std::collections::HashMap;

use mapsquare_core::coord::{ZONE_SIZE, zone_base};
use mapsquare_core::{CollisionFlags, Direction, Point, Range};

use crate::config::NavConfig;
use crate::door::DoorRecord;
use crate::navigator::Navigator;
use crate::snapshot::Snapshot;
use crate::store::CollisionStore;

/// Builds a [`Snapshot`] row by row.
#[derive(Debug, Default)]
pub struct WorldBuilder {
    snapshot: Snapshot,
    sprinkled: HashMap<(u8, Point), i32>,
}

impl WorldBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate `zone` (zone coordinates) without flagging any tile.
    pub fn allocate_zone(&mut self, level: u8, zone: Point) -> &mut Self {
        self.snapshot.push_zone(level, zone_base(zone));
        self
    }

    /// Allocate every zone of `zones` (zone coordinates).
    pub fn allocate_zones(&mut self, level: u8, zones: Range) -> &mut Self {
        for z in zones {
            self.allocate_zone(level, z);
        }
        self
    }

    pub fn tile(&mut self, level: u8, p: Point, flags: CollisionFlags) -> &mut Self {
        self.snapshot.push_tile(level, p, flags);
        self
    }

    /// Wall on the `dir` edge of `p`, flagged on both tiles sharing it.
    pub fn wall_edge(&mut self, level: u8, p: Point, dir: Direction) -> &mut Self {
        self.tile(level, p, dir.wall());
        self.tile(level, p + dir.offset(), dir.opposite().wall())
    }

    pub fn door(&mut self, level: u8, p: Point, shape: u8, angle: u8) -> &mut Self {
        self.snapshot.push_door(DoorRecord {
            level,
            x: p.x,
            z: p.z,
            shape,
            angle,
            block_range: true,
        });
        self
    }

    /// Flag one more tile of `zone` (zone coordinates) with floor
    /// decoration, making the area look explored.
    pub fn sprinkle(&mut self, level: u8, zone: Point) -> &mut Self {
        let n = self.sprinkled.entry((level, zone)).or_insert(0);
        let local = Point::new(*n % ZONE_SIZE, *n / ZONE_SIZE % ZONE_SIZE);
        *n += 1;
        self.tile(level, zone_base(zone) + local, CollisionFlags::FLOOR_DECORATION)
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn store(&self) -> CollisionStore {
        CollisionStore::build(&self.snapshot, CollisionFlags::LOC).unwrap()
    }

    pub fn navigator(&self, config: NavConfig) -> Navigator {
        Navigator::with_config(&self.snapshot, config).unwrap()
    }
}

/// Assert that every step of `path`, starting from `src`, is a single legal
/// move.
///
/// Each step is checked twice: through [`CollisionStore::can_step`] and
/// against the raw wall bits on both sides of every edge it crosses.
#[track_caller]
pub fn assert_no_wall_crossing(store: &CollisionStore, level: u8, src: Point, path: &[Point]) {
    let mut prev = src;
    for &p in path {
        let Some(dir) = Direction::from_offset(p - prev) else {
            panic!("{prev} -> {p} is not a single step");
        };
        assert!(store.can_step(level, prev, dir), "illegal step {prev} -> {p}");
        assert!(raw_step_is_clear(store, level, prev, p), "{prev} -> {p} crosses a wall");
        prev = p;
    }
}

/// Wall bits `a` carries towards `b` and `b` carries towards `a`.
fn facing_walls(a: Point, b: Point) -> (CollisionFlags, CollisionFlags) {
    use CollisionFlags as F;
    match (b.x - a.x, b.z - a.z) {
        (1, 0) => (F::WALL_EAST, F::WALL_WEST),
        (-1, 0) => (F::WALL_WEST, F::WALL_EAST),
        (0, 1) => (F::WALL_NORTH, F::WALL_SOUTH),
        (0, -1) => (F::WALL_SOUTH, F::WALL_NORTH),
        (1, 1) => (F::WALL_NORTH_EAST, F::WALL_SOUTH_WEST),
        (-1, 1) => (F::WALL_NORTH_WEST, F::WALL_SOUTH_EAST),
        (1, -1) => (F::WALL_SOUTH_EAST, F::WALL_NORTH_WEST),
        (-1, -1) => (F::WALL_SOUTH_WEST, F::WALL_NORTH_EAST),
        d => panic!("{a} -> {b} is not a single step: {d:?}"),
    }
}

fn raw_edge_is_clear(store: &CollisionStore, level: u8, a: Point, b: Point) -> bool {
    let (Some(fa), Some(fb)) = (store.flags(level, a), store.flags(level, b)) else {
        return false;
    };
    let (out, back) = facing_walls(a, b);
    !fb.intersects(store.block_mask()) && !fa.intersects(out) && !fb.intersects(back)
}

/// A diagonal also needs both orthogonal corners reachable on each side.
fn raw_step_is_clear(store: &CollisionStore, level: u8, a: Point, b: Point) -> bool {
    if !raw_edge_is_clear(store, level, a, b) {
        return false;
    }
    if a.x == b.x || a.z == b.z {
        return true;
    }
    let corners = [Point::new(b.x, a.z), Point::new(a.x, b.z)];
    corners
        .iter()
        .all(|&c| raw_edge_is_clear(store, level, a, c) && raw_edge_is_clear(store, level, c, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_bits_agree_with_can_step() {
        let mut w = WorldBuilder::new();
        w.allocate_zones(0, Range::new(0, 0, 2, 2));
        for z in 3..9 {
            w.wall_edge(0, Point::new(5, z), Direction::West);
        }
        w.wall_edge(0, Point::new(9, 9), Direction::North);
        w.tile(0, Point::new(11, 4), CollisionFlags::LOC);
        w.tile(0, Point::new(3, 12), CollisionFlags::WALL_NORTH_EAST);
        w.tile(0, Point::new(12, 12), CollisionFlags::WALL_SOUTH);
        let store = w.store();
        for p in Range::new(1, 1, 15, 15) {
            for dir in Direction::ALL {
                assert_eq!(
                    store.can_step(0, p, dir),
                    raw_step_is_clear(&store, 0, p, p + dir.offset()),
                    "{p} {dir:?}"
                );
            }
        }
    }

    #[test]
    fn one_sided_walls_still_block() {
        let mut w = WorldBuilder::new();
        w.allocate_zone(0, Point::new(0, 0));
        w.tile(0, Point::new(4, 4), CollisionFlags::WALL_WEST);
        let store = w.store();
        assert!(!raw_step_is_clear(&store, 0, Point::new(3, 4), Point::new(4, 4)));
        assert!(!raw_step_is_clear(&store, 0, Point::new(3, 3), Point::new(4, 4)));
        assert!(!raw_step_is_clear(&store, 0, Point::new(3, 5), Point::new(4, 4)));
        assert!(raw_step_is_clear(&store, 0, Point::new(4, 3), Point::new(4, 4)));
    }

    #[test]
    #[should_panic(expected = "illegal step")]
    fn crossing_a_wall_is_reported() {
        let mut w = WorldBuilder::new();
        w.allocate_zone(0, Point::new(0, 0));
        w.wall_edge(0, Point::new(4, 4), Direction::West);
        assert_no_wall_crossing(&w.store(), 0, Point::new(3, 4), &[Point::new(4, 4)]);
    }
}
