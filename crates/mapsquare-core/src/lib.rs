//! **mapsquare-core**: coordinate and collision primitives for tile worlds.
//!
//! This crate provides the foundational types shared by the *mapsquare*
//! workspace: geometry primitives, tile/zone/mapsquare unit conversions,
//! per-tile collision flags and compass directions.

pub mod coord;
pub mod dir;
pub mod flags;
pub mod geom;

pub use coord::{LEVELS, MAPSQUARE_SIZE, ZONE_SIZE};
pub use dir::Direction;
pub use flags::CollisionFlags;
pub use geom::{Point, Range};
