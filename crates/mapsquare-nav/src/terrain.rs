//! Land heuristic for zones without explicit collision data.
//!
//! Snapshots do not mark open water exhaustively: ocean and unexplored
//! areas are often allocated zones with no flags at all. A zone counts as
//! land when enough flagged tiles (walls, objects, decoration, roofs) sit in
//! the square of zones around it.

use mapsquare_core::Point;
use mapsquare_core::coord::{in_world, zone_of};

use crate::config::NavConfig;
use crate::store::CollisionStore;

/// Classifies zones as land or probable open water.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerrainClassifier {
    /// Half-width, in zones, of the square examined around a zone.
    pub radius: i32,
    /// Flagged tiles needed in that square.
    pub min_flagged: u32,
}

impl Default for TerrainClassifier {
    fn default() -> Self {
        Self::from_config(&NavConfig::default())
    }
}

impl TerrainClassifier {
    pub fn from_config(config: &NavConfig) -> Self {
        Self {
            radius: config.land_radius,
            min_flagged: config.land_min_flagged_tiles,
        }
    }

    /// Whether `zone` (zone coordinates) is allocated and surrounded by
    /// enough flagged tiles to be land.
    pub fn is_zone_land(&self, store: &CollisionStore, level: u8, zone: Point) -> bool {
        if !store.zone_allocated(level, zone) {
            return false;
        }
        if self.min_flagged == 0 {
            return true;
        }
        let mut count = 0u32;
        for dz in -self.radius..=self.radius {
            for dx in -self.radius..=self.radius {
                count += store.flagged_in_zone(level, zone.shift(dx, dz));
                if count >= self.min_flagged {
                    return true;
                }
            }
        }
        false
    }

    /// [`is_zone_land`](Self::is_zone_land) for the zone containing tile
    /// `(x, z)`.
    pub fn is_zone_likely_land(&self, store: &CollisionStore, level: u8, x: i32, z: i32) -> bool {
        let p = Point::new(x, z);
        in_world(p) && self.is_zone_land(store, level, zone_of(p))
    }
}
