use std::path::Path;

use log::info;
use mapsquare_core::{CollisionFlags, Point};

use crate::config::NavConfig;
use crate::door::{DoorRecord, doors_along_path, doors_along_strides};
use crate::error::NavError;
use crate::search::{PathScratch, PathSearch};
use crate::snapshot::Snapshot;
use crate::store::{CollisionStore, StoreStats};
use crate::terrain::TerrainClassifier;
use crate::zone_graph::ZoneGraph;

/// Load a snapshot file and build a [`Navigator`] with default settings.
pub fn init_pathfinding(path: impl AsRef<Path>) -> Result<Navigator, NavError> {
    init_pathfinding_with(path, NavConfig::default())
}

/// Load a snapshot file and build a [`Navigator`] with `config`.
pub fn init_pathfinding_with(path: impl AsRef<Path>, config: NavConfig) -> Result<Navigator, NavError> {
    let path = path.as_ref();
    let snapshot = Snapshot::load(path)?;
    info!(
        "loaded snapshot {}: {} tiles, {} zones, {} doors",
        path.display(),
        snapshot.tiles.len(),
        snapshot.zones.len(),
        snapshot.doors.len()
    );
    Navigator::with_config(&snapshot, config)
}

/// Collision data and search state built from one world snapshot.
///
/// A `Navigator` is immutable once built. Queries take `&self`, so a single
/// value can be shared between threads; searches that want to reuse their
/// buffers take a caller-owned [`PathScratch`].
///
/// Building again from the same snapshot yields a navigator that answers
/// every query identically.
#[derive(Debug, Clone)]
pub struct Navigator {
    store: CollisionStore,
    graph: ZoneGraph,
    classifier: TerrainClassifier,
    config: NavConfig,
}

impl Navigator {
    /// Build with default settings.
    pub fn from_snapshot(snapshot: &Snapshot) -> Result<Self, NavError> {
        Self::with_config(snapshot, NavConfig::default())
    }

    /// Build with `config`. Fails if the configuration or any snapshot row
    /// is invalid.
    pub fn with_config(snapshot: &Snapshot, config: NavConfig) -> Result<Self, NavError> {
        config.validate()?;
        let store = CollisionStore::build(snapshot, config.block_flags())?;
        let classifier = TerrainClassifier::from_config(&config);
        let graph = ZoneGraph::build(&store, &classifier, config.terrain_filter);
        Ok(Self {
            store,
            graph,
            classifier,
            config,
        })
    }

    /// Parse a JSON snapshot and build with default settings.
    pub fn from_json(json: &str) -> Result<Self, NavError> {
        Self::from_snapshot(&Snapshot::from_json(json)?)
    }

    /// Allocated and not blocked. Does not consider walls.
    pub fn is_tile_walkable(&self, level: u8, x: i32, z: i32) -> bool {
        self.store.is_tile_walkable(level, x, z)
    }

    /// Whether any bit of `mask` is set on tile `(x, z)`.
    pub fn is_flagged(&self, x: i32, z: i32, level: u8, mask: u32) -> bool {
        self.store.is_flagged(x, z, level, CollisionFlags(mask))
    }

    pub fn is_zone_allocated(&self, level: u8, x: i32, z: i32) -> bool {
        self.store.is_zone_allocated(level, x, z)
    }

    /// Whether the zone containing `(x, z)` looks like explored land.
    pub fn is_zone_likely_land(&self, level: u8, x: i32, z: i32) -> bool {
        self.classifier.is_zone_likely_land(&self.store, level, x, z)
    }

    /// Waypoints from `(src_x, src_z)` towards `(dest_x, dest_z)`, excluding
    /// the source.
    ///
    /// An empty path means no step could be taken. A path whose last
    /// waypoint is not the destination is the best approach found.
    pub fn find_long_path(&self, level: u8, src_x: i32, src_z: i32, dest_x: i32, dest_z: i32) -> Vec<Point> {
        self.find_long_path_with(&mut PathScratch::new(), level, src_x, src_z, dest_x, dest_z)
    }

    /// [`find_long_path`](Self::find_long_path) reusing `scratch` buffers.
    pub fn find_long_path_with(
        &self,
        scratch: &mut PathScratch,
        level: u8,
        src_x: i32,
        src_z: i32,
        dest_x: i32,
        dest_z: i32,
    ) -> Vec<Point> {
        let search = PathSearch {
            store: &self.store,
            graph: &self.graph,
            config: &self.config,
        };
        search.find(scratch, level, Point::new(src_x, src_z), Point::new(dest_x, dest_z))
    }

    /// Door records on the waypoints of `path`, in path order, each once.
    ///
    /// With `collapse_straight_runs` set, the runs between waypoints are
    /// walked as well.
    pub fn find_doors_along_path(&self, level: u8, path: &[Point]) -> Vec<DoorRecord> {
        if self.config.collapse_straight_runs {
            doors_along_strides(&self.store, level, path, self.config.max_path_length)
        } else {
            doors_along_path(&self.store, level, path)
        }
    }

    pub fn stats(&self) -> StoreStats {
        self.store.stats()
    }

    pub fn store(&self) -> &CollisionStore {
        &self.store
    }

    pub fn zone_graph(&self) -> &ZoneGraph {
        &self.graph
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }
}
