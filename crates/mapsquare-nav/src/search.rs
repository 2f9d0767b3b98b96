//! Two-level long-distance search.
//!
//! A breadth-first pass over the zone graph picks the sequence of zones to
//! travel through. The tile-level search then runs inside a corridor of
//! zones around that sequence, widening the corridor when the destination
//! is not reached and the zone graph does not rule it out.

use log::debug;
use mapsquare_core::coord::{in_world, valid_level, zone_of, zones_to_tiles};
use mapsquare_core::{Direction, Point, Range};
use mapsquare_paths::{BfsPath, PathRange, Pather, collapse_straight_runs};

use crate::config::NavConfig;
use crate::store::CollisionStore;
use crate::zone_graph::ZoneGraph;

/// Reusable search buffers.
///
/// A `PathScratch` holds no reference to the world, so one value can serve
/// any number of queries against any navigator. Keeping one per caller
/// avoids reallocating distance maps on every query.
#[derive(Debug, Clone)]
pub struct PathScratch {
    zones: PathRange,
    tiles: PathRange,
}

impl Default for PathScratch {
    fn default() -> Self {
        Self::new()
    }
}

impl PathScratch {
    pub fn new() -> Self {
        Self {
            zones: PathRange::new(Range::default()),
            tiles: PathRange::new(Range::default()),
        }
    }
}

/// Zones within a margin of a zone path.
#[derive(Debug)]
struct Corridor {
    range: Range,
    mask: Vec<bool>,
}

impl Corridor {
    fn around(path: &[Point], margin: i32, window: Range) -> Self {
        let mut range = Range::default();
        for &z in path {
            range = range.union(Range::spanning(z, z));
        }
        let range = range.expand(margin).intersect(window);
        let w = range.width().max(0) as usize;
        let mut mask = vec![false; range.len()];
        for &z in path {
            for c in Range::spanning(z, z).expand(margin).intersect(range) {
                mask[(c.z - range.min.z) as usize * w + (c.x - range.min.x) as usize] = true;
            }
        }
        Self { range, mask }
    }

    #[inline]
    fn contains(&self, zone: Point) -> bool {
        if !self.range.contains(zone) {
            return false;
        }
        let w = self.range.width() as usize;
        self.mask[(zone.z - self.range.min.z) as usize * w + (zone.x - self.range.min.x) as usize]
    }
}

/// Legal tile steps inside a corridor.
struct TilePather<'a> {
    store: &'a CollisionStore,
    graph: &'a ZoneGraph,
    corridor: &'a Corridor,
    level: u8,
    src_zone: Point,
    terrain_filter: bool,
}

impl Pather for TilePather<'_> {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        for d in Direction::ALL {
            let to = p + d.offset();
            let zone = zone_of(to);
            if !self.corridor.contains(zone) {
                continue;
            }
            if self.terrain_filter && zone != self.src_zone && !self.graph.is_open(self.level, zone) {
                continue;
            }
            if self.store.can_step(self.level, p, d) {
                buf.push(to);
            }
        }
    }
}

/// The long-distance search over one collision store.
#[derive(Debug, Clone, Copy)]
pub struct PathSearch<'a> {
    pub store: &'a CollisionStore,
    pub graph: &'a ZoneGraph,
    pub config: &'a NavConfig,
}

impl PathSearch<'_> {
    /// Waypoints from `src` towards `dest`, source excluded.
    ///
    /// Returns an empty path for an invalid level, a source or destination
    /// outside the world, or a source that cannot be stood on. When the
    /// destination cannot be reached the path ends at the reachable tile
    /// nearest to it. `src == dest` yields `[src]`.
    pub fn find(&self, scratch: &mut PathScratch, level: u8, src: Point, dest: Point) -> Vec<Point> {
        if !valid_level(level) || !in_world(src) || !in_world(dest) {
            debug!("path {src} -> {dest} level {level}: out of range");
            return Vec::new();
        }
        if !self.store.is_tile_walkable(level, src.x, src.z) {
            debug!("path {src} -> {dest} level {level}: source not walkable");
            return Vec::new();
        }
        if src == dest {
            return vec![src];
        }

        let src_zone = zone_of(src);
        let dest_zone = zone_of(dest);
        let Some(zone_pather) = self.graph.pather(level) else {
            return Vec::new();
        };
        let window = Range::spanning(src_zone, dest_zone)
            .expand(self.config.zone_search_margin)
            .intersect(self.graph.bounds(level));
        scratch.zones.set_range(window);
        let Some(zone_path) = scratch.zones.bfs_path(&zone_pather, src_zone, dest_zone, i32::MAX) else {
            return Vec::new();
        };
        let unreachable = !zone_path.reached
            || self.graph.disconnected(level, src_zone, dest_zone)
            || !self.store.is_tile_walkable(level, dest.x, dest.z);
        debug!(
            "path {src} -> {dest} level {level}: {} zones, zone pass reached={}",
            zone_path.path.len(),
            zone_path.reached
        );

        let mut best: Option<BfsPath> = None;
        for &margin in &self.config.corridor_margins {
            let corridor = Corridor::around(&zone_path.path, margin, window);
            scratch.tiles.set_range(zones_to_tiles(corridor.range));
            let pather = TilePather {
                store: self.store,
                graph: self.graph,
                corridor: &corridor,
                level,
                src_zone,
                terrain_filter: self.config.terrain_filter,
            };
            let Some(found) = scratch
                .tiles
                .bfs_path(&pather, src, dest, self.config.max_path_length)
            else {
                continue;
            };
            debug!(
                "  corridor margin {margin}: {} steps, reached={}",
                found.path.len() - 1,
                found.reached
            );
            let closer = match &best {
                None => true,
                Some(b) => end_distance(&found, dest) < end_distance(b, dest),
            };
            if closer {
                best = Some(found);
            }
            // stop widening once it no longer gains ground
            if !closer || unreachable || best.as_ref().is_some_and(|b| b.reached) {
                break;
            }
        }

        let Some(best) = best else {
            return Vec::new();
        };
        let path = if self.config.collapse_straight_runs {
            collapse_straight_runs(&best.path)
        } else {
            best.path
        };
        path.into_iter().skip(1).collect()
    }
}

fn end_distance(path: &BfsPath, dest: Point) -> i64 {
    path.end().map_or(i64::MAX, |e| e.distance_sq(dest))
}
