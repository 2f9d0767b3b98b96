//! **mapsquare-nav**: collision storage and long-distance pathfinding for
//! tile worlds.
//!
//! A [`Navigator`] is built once from a world [`Snapshot`]:
//!
//! 1. the [`CollisionStore`] imports per-tile flags into zone chunks;
//! 2. door records clear their walls so gates become passable;
//! 3. the [`ZoneGraph`] derives zone-level connectivity and land classification.
//!
//! After that the navigator is read-only. [`Navigator::find_long_path`]
//! returns waypoints that never cross a wall or enter open water, and
//! [`Navigator::find_doors_along_path`] lists the doors such a route passes,
//! so the caller can open them in game.
//!
//! ```no_run
//! let nav = mapsquare_nav::init_pathfinding("world.json")?;
//! let path = nav.find_long_path(0, 3222, 3218, 2964, 3378);
//! for door in nav.find_doors_along_path(0, &path) {
//!     println!("open door at {}", door.pos());
//! }
//! # Ok::<(), mapsquare_nav::NavError>(())
//! ```

mod config;
mod door;
mod error;
mod navigator;
mod search;
mod snapshot;
mod store;
mod terrain;
mod zone_graph;

#[cfg(test)]
mod testworld;

pub use config::NavConfig;
pub use door::{DoorRecord, DoorShape, doors_along_path, doors_along_strides};
pub use error::NavError;
pub use navigator::{Navigator, init_pathfinding, init_pathfinding_with};
pub use search::{PathScratch, PathSearch};
pub use snapshot::{BlockRange, DoorRow, Snapshot, TileRow, ZoneRow};
pub use store::{CollisionStore, StoreStats};
pub use terrain::TerrainClassifier;
pub use zone_graph::ZoneGraph;

pub use mapsquare_core::{CollisionFlags, Direction, Point};
