//! Tunables for the navigation engine.

use mapsquare_core::CollisionFlags;
use serde::{Deserialize, Serialize};

use crate::error::NavError;

/// Navigation engine configuration.
///
/// Every field has a default, so a partial TOML or JSON document only needs
/// to name the values it overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Flags that make a tile impossible to stand on.
    pub block_mask: u32,
    /// Reject zones the land heuristic classifies as unexplored or ocean.
    pub terrain_filter: bool,
    /// Neighbourhood radius, in zones, examined by the land heuristic.
    pub land_radius: i32,
    /// Flagged tiles needed in the neighbourhood for a zone to count as land.
    pub land_min_flagged_tiles: u32,
    /// Zones added around the source/destination box for the zone-level pass.
    pub zone_search_margin: i32,
    /// Corridor half-widths, in zones, tried in order by the tile-level pass.
    pub corridor_margins: Vec<i32>,
    /// Upper bound on tile steps explored from the source.
    pub max_path_length: i32,
    /// Return only turning points instead of every step.
    pub collapse_straight_runs: bool,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            block_mask: CollisionFlags::LOC.bits(),
            terrain_filter: true,
            land_radius: 2,
            land_min_flagged_tiles: 3,
            zone_search_margin: 24,
            corridor_margins: vec![2, 8, 24],
            max_path_length: 4096,
            collapse_straight_runs: false,
        }
    }
}

impl NavConfig {
    /// Largest accepted land radius and corridor margin, in zones.
    pub const MAX_ZONE_RADIUS: i32 = 64;

    /// The block mask as flags.
    #[inline]
    pub fn block_flags(&self) -> CollisionFlags {
        CollisionFlags(self.block_mask)
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<(), NavError> {
        if !(0..=Self::MAX_ZONE_RADIUS).contains(&self.land_radius) {
            return Err(NavError::Config(format!(
                "land_radius must be within 0..={}, got {}",
                Self::MAX_ZONE_RADIUS,
                self.land_radius
            )));
        }
        if self.zone_search_margin < 0 {
            return Err(NavError::Config(format!(
                "zone_search_margin must not be negative, got {}",
                self.zone_search_margin
            )));
        }
        if self.corridor_margins.is_empty() {
            return Err(NavError::Config("corridor_margins must not be empty".into()));
        }
        if let Some(m) = self
            .corridor_margins
            .iter()
            .find(|m| !(0..=Self::MAX_ZONE_RADIUS).contains(*m))
        {
            return Err(NavError::Config(format!(
                "corridor margins must be within 0..={}, got {m}",
                Self::MAX_ZONE_RADIUS
            )));
        }
        if self.max_path_length <= 0 {
            return Err(NavError::Config(format!(
                "max_path_length must be positive, got {}",
                self.max_path_length
            )));
        }
        if self.block_flags().intersects(CollisionFlags::WALLS) {
            return Err(NavError::Config(
                "block_mask must not contain directional wall bits".into(),
            ));
        }
        Ok(())
    }
}
