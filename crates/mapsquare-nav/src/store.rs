//! Sparse collision storage: an arena of 8×8 zone chunks.

use std::collections::HashMap;

use log::{info, warn};
use mapsquare_core::coord::{ZONE_EXTENT, in_world, local_index, valid_level, zone_of};
use mapsquare_core::{CollisionFlags, Direction, Point};
use serde::Serialize;

use crate::door::{self, DoorRecord};
use crate::error::NavError;
use crate::snapshot::Snapshot;

const CHUNK_TILES: usize = 64;

#[derive(Debug, Clone)]
struct ZoneChunk {
    flags: [CollisionFlags; CHUNK_TILES],
    flagged: u8,
}

impl ZoneChunk {
    fn new() -> Self {
        Self {
            flags: [CollisionFlags::OPEN; CHUNK_TILES],
            flagged: 0,
        }
    }

    fn recount(&mut self) {
        self.flagged = self.flags.iter().filter(|f| !f.is_empty()).count() as u8;
    }
}

/// Packed `(level, zone_x, zone_z)` key, or `None` outside the world.
#[inline]
fn zone_key(level: u8, zone: Point) -> Option<u32> {
    if !valid_level(level)
        || zone.x < 0
        || zone.z < 0
        || zone.x >= ZONE_EXTENT
        || zone.z >= ZONE_EXTENT
    {
        return None;
    }
    Some((level as u32) << 26 | (zone.x as u32) << 13 | zone.z as u32)
}

/// Summary counts of a built store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StoreStats {
    /// Allocated zones over all levels.
    pub zones: usize,
    /// Tiles with a non-zero flag word after door masking.
    pub flagged_tiles: usize,
    /// Door records, including those on unallocated tiles.
    pub doors: usize,
    /// Doors whose walls were masked.
    pub masked_doors: usize,
}

/// Per-tile collision flags for every allocated zone, plus door records.
///
/// Built once from a [`Snapshot`] and read-only afterwards. Lookups on
/// coordinates outside the world or on unallocated zones answer as
/// "not allocated" and never panic.
#[derive(Debug, Clone)]
pub struct CollisionStore {
    chunks: Vec<ZoneChunk>,
    index: HashMap<u32, u32>,
    doors: Vec<DoorRecord>,
    door_index: HashMap<(u8, Point), Vec<usize>>,
    block_mask: CollisionFlags,
    masked_doors: usize,
}

impl CollisionStore {
    /// Build a store from `snapshot` and mask its doors.
    ///
    /// Tiles whose flags decide "blocked" in [`is_tile_walkable`] and the
    /// search are those intersecting `block_mask`. Tile rows naming the same
    /// tile twice are merged with a bitwise OR.
    ///
    /// [`is_tile_walkable`]: Self::is_tile_walkable
    pub fn build(snapshot: &Snapshot, block_mask: CollisionFlags) -> Result<Self, NavError> {
        let mut store = Self {
            chunks: Vec::new(),
            index: HashMap::new(),
            doors: Vec::with_capacity(snapshot.doors.len()),
            door_index: HashMap::new(),
            block_mask,
            masked_doors: 0,
        };

        for (i, row) in snapshot.zones.iter().enumerate() {
            let (level, zone) = row.parse(i)?;
            store.allocate(level, zone);
        }

        let mut merged = 0usize;
        for (i, row) in snapshot.tiles.iter().enumerate() {
            let (level, p, flags) = row.parse(i)?;
            let Some(ci) = store.allocate(level, zone_of(p)) else {
                continue;
            };
            let cell = &mut store.chunks[ci].flags[local_index(p)];
            if !cell.is_empty() && !flags.is_empty() {
                merged += 1;
            }
            *cell |= flags;
        }
        if merged > 0 {
            warn!("{merged} tile rows merged into tiles that were already flagged");
        }

        for (i, row) in snapshot.doors.iter().enumerate() {
            let door = row.parse(i)?;
            store
                .door_index
                .entry((door.level, door.pos()))
                .or_default()
                .push(store.doors.len());
            store.doors.push(door);
        }

        let doors = std::mem::take(&mut store.doors);
        let masked = doors
            .iter()
            .filter(|d| door::apply_mask(&mut store, d))
            .count();
        store.doors = doors;
        store.masked_doors = masked;

        for chunk in store.chunks.iter_mut() {
            chunk.recount();
        }

        let stats = store.stats();
        info!(
            "collision store built: {} zones, {} flagged tiles, {}/{} doors masked",
            stats.zones, stats.flagged_tiles, stats.masked_doors, stats.doors
        );
        Ok(store)
    }

    /// Chunk index for `zone`, allocating it if needed.
    fn allocate(&mut self, level: u8, zone: Point) -> Option<usize> {
        let key = zone_key(level, zone)?;
        let next = self.chunks.len() as u32;
        let ci = *self.index.entry(key).or_insert(next);
        if ci == next {
            self.chunks.push(ZoneChunk::new());
        }
        Some(ci as usize)
    }

    #[inline]
    fn chunk(&self, level: u8, zone: Point) -> Option<&ZoneChunk> {
        let ci = *self.index.get(&zone_key(level, zone)?)?;
        self.chunks.get(ci as usize)
    }

    /// Clear `mask` on tile `p`. Unallocated tiles are left alone.
    pub(crate) fn clear_flags(&mut self, level: u8, p: Point, mask: CollisionFlags) {
        let Some(key) = zone_key(level, zone_of(p)) else {
            return;
        };
        if let Some(&ci) = self.index.get(&key) {
            let cell = &mut self.chunks[ci as usize].flags[local_index(p)];
            *cell = cell.without(mask);
        }
    }

    /// Flag word of a tile, or `None` if its zone is not allocated.
    #[inline]
    pub fn flags(&self, level: u8, p: Point) -> Option<CollisionFlags> {
        self.chunk(level, zone_of(p))
            .map(|c| c.flags[local_index(p)])
    }

    /// Whether any bit of `mask` is set on the tile. Unallocated tiles
    /// report `false`.
    #[inline]
    pub fn is_flagged(&self, x: i32, z: i32, level: u8, mask: CollisionFlags) -> bool {
        self.flags(level, Point::new(x, z))
            .is_some_and(|f| f.intersects(mask))
    }

    /// Whether the zone containing tile `(x, z)` is allocated.
    #[inline]
    pub fn is_zone_allocated(&self, level: u8, x: i32, z: i32) -> bool {
        self.chunk(level, zone_of(Point::new(x, z))).is_some()
    }

    /// Allocated and not blocked. Wall edges are not considered.
    #[inline]
    pub fn is_tile_walkable(&self, level: u8, x: i32, z: i32) -> bool {
        self.flags(level, Point::new(x, z))
            .is_some_and(|f| !f.intersects(self.block_mask))
    }

    /// Number of flagged tiles in `zone` (zone coordinates); zero when not
    /// allocated.
    #[inline]
    pub fn flagged_in_zone(&self, level: u8, zone: Point) -> u32 {
        self.chunk(level, zone).map_or(0, |c| c.flagged as u32)
    }

    /// Whether `zone` (zone coordinates) is allocated.
    #[inline]
    pub fn zone_allocated(&self, level: u8, zone: Point) -> bool {
        self.chunk(level, zone).is_some()
    }

    /// Whether a single step from `from` in direction `dir` is legal.
    ///
    /// The destination must be walkable. A cardinal step must not cross a
    /// wall on either side of the shared edge. A diagonal step must not
    /// cross a corner wall on either tile, and both orthogonal detours
    /// around the corner must be legal cardinal steps.
    pub fn can_step(&self, level: u8, from: Point, dir: Direction) -> bool {
        if !in_world(from) {
            return false;
        }
        let to = from + dir.offset();
        let Some(dest) = self.flags(level, to) else {
            return false;
        };
        if dest.intersects(self.block_mask) || dest.intersects(dir.opposite().wall()) {
            return false;
        }
        let Some(src) = self.flags(level, from) else {
            return false;
        };
        if src.intersects(dir.wall()) {
            return false;
        }
        match dir.components() {
            None => true,
            Some((h, v)) => {
                let ph = from + h.offset();
                let pv = from + v.offset();
                self.can_step(level, from, h)
                    && self.can_step(level, from, v)
                    && self.can_step(level, ph, v)
                    && self.can_step(level, pv, h)
            }
        }
    }

    /// Every allocated zone as `(level, zone)`, in no particular order.
    pub fn zones(&self) -> impl Iterator<Item = (u8, Point)> + '_ {
        self.index.keys().map(|&k| {
            let mask = (ZONE_EXTENT - 1) as u32;
            let zone = Point::new((k >> 13 & mask) as i32, (k & mask) as i32);
            ((k >> 26) as u8, zone)
        })
    }

    /// The flags that make a tile impossible to stand on.
    #[inline]
    pub fn block_mask(&self) -> CollisionFlags {
        self.block_mask
    }

    /// Every door record, in snapshot order.
    #[inline]
    pub fn doors(&self) -> &[DoorRecord] {
        &self.doors
    }

    /// Indices into [`doors`](Self::doors) of the records on a tile.
    pub fn door_indices_at(&self, level: u8, p: Point) -> &[usize] {
        self.door_index
            .get(&(level, p))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Summary counts.
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            zones: self.chunks.len(),
            flagged_tiles: self.chunks.iter().map(|c| c.flagged as usize).sum(),
            doors: self.doors.len(),
            masked_doors: self.masked_doors,
        }
    }
}
