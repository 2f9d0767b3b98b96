use mapsquare_core::Point;

/// Minimal search interface: neighbour enumeration.
///
/// Implementations decide which moves are legal; the algorithms in this
/// crate only ever step to points the pather hands back.
pub trait Pather {
    /// Append neighbours of `p` into `buf`. The caller clears `buf` before calling.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);
}

impl<P: Pather + ?Sized> Pather for &P {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        (**self).neighbors(p, buf)
    }
}
