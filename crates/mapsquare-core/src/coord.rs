//! World coordinate units: tiles, zones and mapsquares.
//!
//! A zone is an 8×8 block of tiles and the unit of allocation. A mapsquare
//! is 64×64 tiles (8×8 zones). Zone coordinates are tile coordinates divided
//! by [`ZONE_SIZE`], rounding towards negative infinity.

use crate::geom::{Point, Range};

/// Tiles per zone side.
pub const ZONE_SIZE: i32 = 8;
/// Tiles per mapsquare side.
pub const MAPSQUARE_SIZE: i32 = 64;
/// Number of vertical levels.
pub const LEVELS: u8 = 4;
/// Exclusive upper bound on tile coordinates accepted by the engine.
pub const WORLD_EXTENT: i32 = 1 << 16;
/// Exclusive upper bound on zone coordinates.
pub const ZONE_EXTENT: i32 = WORLD_EXTENT / ZONE_SIZE;

/// Whether `level` is one of the supported vertical planes.
#[inline]
pub const fn valid_level(level: u8) -> bool {
    level < LEVELS
}

/// Whether a tile coordinate lies inside the supported world extent.
#[inline]
pub const fn in_world(p: Point) -> bool {
    p.x >= 0 && p.z >= 0 && p.x < WORLD_EXTENT && p.z < WORLD_EXTENT
}

/// Zone containing tile `p`.
#[inline]
pub const fn zone_of(p: Point) -> Point {
    Point::new(p.x.div_euclid(ZONE_SIZE), p.z.div_euclid(ZONE_SIZE))
}

/// South-west tile of `zone`.
#[inline]
pub const fn zone_base(zone: Point) -> Point {
    Point::new(zone.x * ZONE_SIZE, zone.z * ZONE_SIZE)
}

/// Tiles covered by `zone`.
#[inline]
pub fn zone_tiles(zone: Point) -> Range {
    let base = zone_base(zone);
    Range::new(base.x, base.z, base.x + ZONE_SIZE, base.z + ZONE_SIZE)
}

/// Tiles covered by a range of zones.
#[inline]
pub fn zones_to_tiles(zones: Range) -> Range {
    if zones.is_empty() {
        return Range::default();
    }
    Range {
        min: zone_base(zones.min),
        max: zone_base(zones.max),
    }
}

/// Index of `p` inside its zone's 8×8 chunk, row-major from the south-west.
#[inline]
pub const fn local_index(p: Point) -> usize {
    let lx = p.x.rem_euclid(ZONE_SIZE);
    let lz = p.z.rem_euclid(ZONE_SIZE);
    (lz * ZONE_SIZE + lx) as usize
}

/// Mapsquare containing tile `p`.
#[inline]
pub const fn mapsquare_of(p: Point) -> Point {
    Point::new(
        p.x.div_euclid(MAPSQUARE_SIZE),
        p.z.div_euclid(MAPSQUARE_SIZE),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_conversions() {
        let p = Point::new(3222, 3218);
        let z = zone_of(p);
        assert_eq!(z, Point::new(402, 402));
        assert_eq!(zone_base(z), Point::new(3216, 3216));
        assert!(zone_tiles(z).contains(p));
        assert_eq!(zone_tiles(z).len(), 64);
        assert_eq!(local_index(p), 2 * 8 + 6);
    }

    #[test]
    fn negative_coordinates_floor() {
        assert_eq!(zone_of(Point::new(-1, -9)), Point::new(-1, -2));
        assert_eq!(local_index(Point::new(-1, -1)), 63);
        assert!(!in_world(Point::new(-1, 0)));
    }

    #[test]
    fn mapsquare_contains_64_zones() {
        let p = Point::new(3222, 3218);
        assert_eq!(mapsquare_of(p), Point::new(50, 50));
        let zones = Range::new(0, 0, 8, 8);
        assert_eq!(zones_to_tiles(zones).len(), (MAPSQUARE_SIZE * MAPSQUARE_SIZE) as usize);
    }

    #[test]
    fn level_bounds() {
        assert!(valid_level(0));
        assert!(valid_level(3));
        assert!(!valid_level(4));
    }
}
