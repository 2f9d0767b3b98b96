use mapsquare_core::Point;

/// Chebyshev (L∞) distance between two points. This is the number of
/// 8-directional steps between them on an open grid.
///
/// Computed in `i64`, so any two points are accepted.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> i64 {
    let dx = (a.x as i64 - b.x as i64).abs();
    let dz = (a.z as i64 - b.z as i64).abs();
    dx.max(dz)
}
