use mapsquare_core::{Point, Range};

/// Sentinel value meaning "unreachable" in BFS distance maps.
pub const UNREACHABLE: i32 = i32::MAX;

/// Parent sentinel for search roots and unvisited nodes.
pub(crate) const NO_PARENT: usize = usize::MAX;

// ---------------------------------------------------------------------------
// PathRange
// ---------------------------------------------------------------------------

/// Scratch space for searches over a grid rectangle.
///
/// `PathRange` owns all internal caches (distance maps, parent links,
/// connected-component labels) so that repeated queries on ranges of similar
/// size incur no allocations after the first use. A `PathRange` is cheap to
/// keep per caller; it holds no reference to the world being searched.
#[derive(Debug, Clone)]
pub struct PathRange {
    pub(crate) rng: Range,
    pub(crate) width: usize,
    // BFS caches
    pub(crate) bfs_map: Vec<i32>,
    pub(crate) bfs_parent: Vec<usize>,
    pub(crate) bfs_queue: std::collections::VecDeque<usize>,
    // CC caches
    pub(crate) cc_labels: Vec<i32>,
    pub(crate) cc_stack: Vec<usize>,
    // shared scratch buffer for neighbor queries
    pub(crate) nbuf: Vec<Point>,
}

impl PathRange {
    /// Create a new `PathRange` for the given grid rectangle.
    ///
    /// Caches are sized lazily by the first search that needs them.
    pub fn new(rng: Range) -> Self {
        Self {
            rng,
            width: rng.width().max(0) as usize,
            bfs_map: Vec::new(),
            bfs_parent: Vec::new(),
            bfs_queue: std::collections::VecDeque::new(),
            cc_labels: Vec::new(),
            cc_stack: Vec::new(),
            nbuf: Vec::with_capacity(8),
        }
    }

    /// Replace the underlying range.
    ///
    /// Cache capacity is kept; searches on the new range resize the caches
    /// in place and only allocate when the new range is larger than any
    /// range seen before.
    pub fn set_range(&mut self, rng: Range) {
        self.rng = rng;
        self.width = rng.width().max(0) as usize;
        // Previous results refer to the old geometry.
        self.bfs_map.clear();
        self.bfs_parent.clear();
        self.cc_labels.clear();
    }

    /// The grid rectangle being used.
    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    /// Reset the BFS caches to "nothing reached" for the current range.
    pub(crate) fn reset_bfs(&mut self) {
        let len = self.rng.len();
        self.bfs_map.clear();
        self.bfs_map.resize(len, UNREACHABLE);
        self.bfs_parent.clear();
        self.bfs_parent.resize(len, NO_PARENT);
        self.bfs_queue.clear();
    }

    /// Reset the component labels to "unlabelled" for the current range.
    pub(crate) fn reset_cc(&mut self) {
        let len = self.rng.len();
        self.cc_labels.clear();
        self.cc_labels.resize(len, -1);
        self.cc_stack.clear();
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    /// Convert a `Point` to a flat index. Returns `None` if out of range.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        if !self.rng.contains(p) {
            return None;
        }
        let x = (p.x - self.rng.min.x) as usize;
        let z = (p.z - self.rng.min.z) as usize;
        Some(z * self.width + x)
    }

    /// Convert a flat index back to a `Point`.
    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        let x = (idx % self.width) as i32 + self.rng.min.x;
        let z = (idx / self.width) as i32 + self.rng.min.z;
        Point::new(x, z)
    }
}
