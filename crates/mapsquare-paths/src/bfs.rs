use mapsquare_core::Point;

use crate::PathRange;
use crate::pathrange::{NO_PARENT, UNREACHABLE};
use crate::traits::Pather;

/// Result of a targeted breadth-first search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BfsPath {
    /// Every step from the source to the end point, both included.
    pub path: Vec<Point>,
    /// Whether the end point is the requested goal. When `false`, the end
    /// point is the reached node nearest (Euclidean) to the goal.
    pub reached: bool,
}

impl BfsPath {
    /// The last point of the path.
    #[inline]
    pub fn end(&self) -> Option<Point> {
        self.path.last().copied()
    }
}

impl PathRange {
    /// Breadth-first search from `from` towards `to`.
    ///
    /// Each step has cost 1. Expansion stops at the goal, when the queue
    /// runs dry, or when the step count would exceed `max_dist`. If the goal
    /// is not reached, the path leads to the visited node nearest to it; ties
    /// go to the node reached first. `to` may lie outside the range, in which
    /// case the search always ends at the nearest node.
    ///
    /// Returns `None` if `from` is outside the range.
    pub fn bfs_path<P: Pather>(
        &mut self,
        pather: &P,
        from: Point,
        to: Point,
        max_dist: i32,
    ) -> Option<BfsPath> {
        let si = self.idx(from)?;
        self.reset_bfs();
        self.bfs_map[si] = 0;

        if from == to {
            return Some(BfsPath {
                path: vec![from],
                reached: true,
            });
        }

        let mut best = si;
        let mut best_d = from.distance_sq(to);
        let mut reached = false;

        let mut queue = std::mem::take(&mut self.bfs_queue);
        let mut nbuf = std::mem::take(&mut self.nbuf);
        queue.push_back(si);

        'search: while let Some(ci) = queue.pop_front() {
            let nd = self.bfs_map[ci] + 1;
            if nd > max_dist {
                continue;
            }
            let cp = self.point(ci);

            nbuf.clear();
            pather.neighbors(cp, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                if self.bfs_map[ni] != UNREACHABLE {
                    continue;
                }
                self.bfs_map[ni] = nd;
                self.bfs_parent[ni] = ci;
                if np == to {
                    best = ni;
                    reached = true;
                    break 'search;
                }
                let d = np.distance_sq(to);
                if d < best_d {
                    best = ni;
                    best_d = d;
                }
                queue.push_back(ni);
            }
        }

        queue.clear();
        self.bfs_queue = queue;
        self.nbuf = nbuf;

        let mut path = Vec::with_capacity(self.bfs_map[best] as usize + 1);
        let mut ci = best;
        while ci != NO_PARENT {
            path.push(self.point(ci));
            ci = self.bfs_parent[ci];
        }
        path.reverse();
        Some(BfsPath { path, reached })
    }

    /// Query the BFS step count at a specific point.
    ///
    /// Returns [`UNREACHABLE`] if the point is outside the range or was not
    /// reached by the last `bfs_path` call.
    pub fn bfs_at(&self, p: Point) -> i32 {
        match self.idx(p) {
            Some(i) if i < self.bfs_map.len() => self.bfs_map[i],
            _ => UNREACHABLE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapsquare_core::Range;

    /// 8-way pather over a character map; `#` blocks. Row 0 is the south row.
    struct CharMap {
        rows: Vec<Vec<u8>>,
    }

    impl CharMap {
        fn new(s: &str) -> Self {
            let mut rows: Vec<Vec<u8>> = s.lines().map(|l| l.trim().bytes().collect()).collect();
            rows.reverse();
            Self { rows }
        }

        fn open(&self, p: Point) -> bool {
            p.x >= 0
                && p.z >= 0
                && (p.z as usize) < self.rows.len()
                && (p.x as usize) < self.rows[p.z as usize].len()
                && self.rows[p.z as usize][p.x as usize] != b'#'
        }

        fn range(&self) -> Range {
            Range::new(0, 0, self.rows[0].len() as i32, self.rows.len() as i32)
        }
    }

    impl Pather for CharMap {
        fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
            for n in p.neighbors_8() {
                if self.open(n) {
                    buf.push(n);
                }
            }
        }
    }

    #[test]
    fn straight_path_reaches_goal() {
        let m = CharMap::new(
            "......
             ......",
        );
        let mut pr = PathRange::new(m.range());
        let res = pr
            .bfs_path(&m, Point::new(0, 0), Point::new(5, 0), 100)
            .unwrap();
        assert!(res.reached);
        assert_eq!(res.path.len(), 6);
        assert_eq!(res.path[0], Point::new(0, 0));
        assert_eq!(res.end(), Some(Point::new(5, 0)));
        assert_eq!(pr.bfs_at(Point::new(5, 0)), 5);
    }

    #[test]
    fn path_steps_are_adjacent() {
        let m = CharMap::new(
            "........
             .######.
             ........",
        );
        let mut pr = PathRange::new(m.range());
        let res = pr
            .bfs_path(&m, Point::new(1, 0), Point::new(6, 2), 100)
            .unwrap();
        assert!(res.reached);
        for w in res.path.windows(2) {
            assert_eq!(crate::chebyshev(w[0], w[1]), 1);
            assert!(m.open(w[1]));
        }
    }

    #[test]
    fn walled_goal_falls_back_to_nearest() {
        let m = CharMap::new(
            "...#..
             ...#..
             ...#..",
        );
        let mut pr = PathRange::new(m.range());
        let res = pr
            .bfs_path(&m, Point::new(0, 1), Point::new(5, 1), 100)
            .unwrap();
        assert!(!res.reached);
        assert_eq!(res.end(), Some(Point::new(2, 1)));
        assert_eq!(pr.bfs_at(Point::new(5, 1)), UNREACHABLE);
    }

    #[test]
    fn max_dist_bounds_the_search() {
        let m = CharMap::new("..........");
        let mut pr = PathRange::new(m.range());
        let res = pr
            .bfs_path(&m, Point::new(0, 0), Point::new(9, 0), 3)
            .unwrap();
        assert!(!res.reached);
        assert_eq!(res.end(), Some(Point::new(3, 0)));
    }

    #[test]
    fn goal_outside_range_ends_nearest() {
        let m = CharMap::new(
            "....
             ....",
        );
        let mut pr = PathRange::new(m.range());
        let res = pr
            .bfs_path(&m, Point::new(0, 0), Point::new(40, 1), 100)
            .unwrap();
        assert!(!res.reached);
        assert_eq!(res.end(), Some(Point::new(3, 1)));
    }

    #[test]
    fn source_outside_range_is_none() {
        let m = CharMap::new("...");
        let mut pr = PathRange::new(m.range());
        assert!(pr.bfs_path(&m, Point::new(9, 9), Point::new(0, 0), 10).is_none());
    }

    #[test]
    fn source_equals_goal() {
        let m = CharMap::new("...");
        let mut pr = PathRange::new(m.range());
        let res = pr
            .bfs_path(&m, Point::new(1, 0), Point::new(1, 0), 10)
            .unwrap();
        assert!(res.reached);
        assert_eq!(res.path, vec![Point::new(1, 0)]);
    }

    #[test]
    fn scratch_is_reusable_between_queries() {
        let m = CharMap::new(
            "......
             ......",
        );
        let mut pr = PathRange::new(m.range());
        let a = pr
            .bfs_path(&m, Point::new(0, 0), Point::new(5, 1), 100)
            .unwrap();
        let b = pr
            .bfs_path(&m, Point::new(5, 1), Point::new(0, 0), 100)
            .unwrap();
        assert_eq!(a.path.len(), b.path.len());
        assert_eq!(b.end(), Some(Point::new(0, 0)));
    }
}
