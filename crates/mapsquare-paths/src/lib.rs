//! Search algorithms for tile grids.
//!
//! This crate provides the grid-search building blocks used by the
//! navigation engine:
//!
//! - **BFS** uniform-cost search with nearest-node fallback ([`PathRange::bfs_path`])
//! - **Connected Components** labelling ([`PathRange::cc_map_all`])
//! - **Strides** collapsing and expanding of straight runs ([`collapse_straight_runs`], [`expand_strides`])
//!
//! All algorithms operate through [`PathRange`], which owns and reuses internal
//! caches so that repeated queries incur no allocations after warm-up. Legal
//! moves come from a [`Pather`] implementation supplied by the caller.

mod bfs;
mod cc;
mod distance;
mod pathrange;
mod stride;
mod traits;

pub use bfs::BfsPath;
pub use distance::chebyshev;
pub use pathrange::{PathRange, UNREACHABLE};
pub use stride::{collapse_straight_runs, expand_strides};
pub use traits::Pather;
