//! Conversion between step-by-step paths and stride (turning point) paths.
//!
//! A stride path keeps only the points where the walking direction changes.
//! Expanding it again fills in the steps of each straight or diagonal run,
//! which reproduces the original steps exactly for paths produced by
//! [`collapse_straight_runs`].

use mapsquare_core::Point;

use crate::chebyshev;

/// Drop every point that continues the previous step's direction.
///
/// The first and last points are always kept. Paths whose consecutive
/// points are not unit steps are collapsed only where they are.
pub fn collapse_straight_runs(path: &[Point]) -> Vec<Point> {
    if path.len() <= 2 {
        return path.to_vec();
    }
    let mut result = Vec::with_capacity(path.len() / 2 + 1);
    result.push(path[0]);
    for i in 1..path.len() - 1 {
        let d_in = path[i] - path[i - 1];
        let d_out = path[i + 1] - path[i];
        if d_in != d_out {
            result.push(path[i]);
        }
    }
    result.push(path[path.len() - 1]);
    result
}

/// Expand a stride path into unit steps.
///
/// Only aligned segments (straight or exactly diagonal) of at most
/// `max_run` steps are filled in, which are the only segments
/// [`collapse_straight_runs`] produces. Any other pair of consecutive points
/// contributes just its endpoints.
pub fn expand_strides(path: &[Point], max_run: i32) -> Vec<Point> {
    let Some(&last) = path.last() else {
        return Vec::new();
    };
    let mut result = Vec::with_capacity(path.len());
    for window in path.windows(2) {
        let (a, b) = (window[0], window[1]);
        result.push(a);
        if let Some(step) = run_step(a, b, max_run) {
            let mut c = a + step;
            while c != b {
                result.push(c);
                c = c + step;
            }
        }
    }
    result.push(last);
    result
}

/// Unit step walking from `a` to `b`, if they form an aligned run with
/// points strictly between them.
fn run_step(a: Point, b: Point, max_run: i32) -> Option<Point> {
    let dx = b.x as i64 - a.x as i64;
    let dz = b.z as i64 - a.z as i64;
    let len = chebyshev(a, b);
    if len <= 1 || len > max_run as i64 {
        return None;
    }
    if dx != 0 && dz != 0 && dx.abs() != dz.abs() {
        return None;
    }
    Some(Point::new(dx.signum() as i32, dz.signum() as i32))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(v: &[(i32, i32)]) -> Vec<Point> {
        v.iter().map(|&(x, z)| Point::new(x, z)).collect()
    }

    #[test]
    fn collapse_keeps_turning_points() {
        let path = pts(&[(0, 0), (1, 0), (2, 0), (3, 1), (4, 2), (4, 3)]);
        let strides = collapse_straight_runs(&path);
        assert_eq!(strides, pts(&[(0, 0), (2, 0), (4, 2), (4, 3)]));
    }

    #[test]
    fn expand_restores_collapsed_path() {
        let path = pts(&[(5, 5), (6, 6), (7, 7), (7, 8), (7, 9), (6, 9), (5, 9)]);
        let strides = collapse_straight_runs(&path);
        assert!(strides.len() < path.len());
        assert_eq!(expand_strides(&strides, 64), path);
    }

    #[test]
    fn misaligned_segments_keep_only_endpoints() {
        let expanded = expand_strides(&pts(&[(0, 0), (3, 1)]), 64);
        assert_eq!(expanded, pts(&[(0, 0), (3, 1)]));
    }

    #[test]
    fn long_runs_are_not_filled_in() {
        let path = pts(&[(0, 0), (10, 0)]);
        assert_eq!(expand_strides(&path, 10).len(), 11);
        assert_eq!(expand_strides(&path, 9), path);

        let far = pts(&[(i32::MIN, 0), (i32::MAX, 0)]);
        assert_eq!(expand_strides(&far, i32::MAX), far);
    }

    #[test]
    fn short_paths_pass_through() {
        assert!(expand_strides(&[], 64).is_empty());
        assert!(collapse_straight_runs(&[]).is_empty());
        let one = pts(&[(4, 4)]);
        assert_eq!(expand_strides(&one, 64), one);
        assert_eq!(collapse_straight_runs(&one), one);
    }
}
