//! Connected-component labelling.

use mapsquare_core::Point;

use crate::PathRange;
use crate::traits::Pather;

impl PathRange {
    /// Label every cell in the range with a connected-component ID and
    /// return the number of components.
    ///
    /// Two cells belong to the same component if there is a path of
    /// neighbours (as defined by `pather`) between them. Cells the pather
    /// never connects to anything still get a label of their own, so use
    /// `keep` to leave cells out entirely. After this call use
    /// [`cc_at`](Self::cc_at) to query the label of a given point.
    pub fn cc_map_all<P: Pather>(&mut self, pather: &P, keep: impl Fn(Point) -> bool) -> usize {
        self.reset_cc();
        let len = self.rng.len();

        let mut label: i32 = 0;
        let mut nbuf = std::mem::take(&mut self.nbuf);

        for start in 0..len {
            if self.cc_labels[start] >= 0 || !keep(self.point(start)) {
                continue;
            }

            // Iterative DFS from `start`.
            self.cc_stack.clear();
            self.cc_stack.push(start);
            self.cc_labels[start] = label;

            while let Some(ci) = self.cc_stack.pop() {
                let cp = self.point(ci);
                nbuf.clear();
                pather.neighbors(cp, &mut nbuf);

                for &np in nbuf.iter() {
                    if let Some(ni) = self.idx(np) {
                        if self.cc_labels[ni] < 0 {
                            self.cc_labels[ni] = label;
                            self.cc_stack.push(ni);
                        }
                    }
                }
            }

            label += 1;
        }

        self.nbuf = nbuf;
        label as usize
    }

    /// Query the connected-component label of a point.
    ///
    /// Returns `None` if the point is outside the range or was not labelled
    /// (i.e. `cc_map_all` has not been called yet, or `keep` rejected the
    /// point and nothing reached it).
    pub fn cc_at(&self, p: Point) -> Option<usize> {
        let i = self.idx(p)?;
        let label = *self.cc_labels.get(i)?;
        if label < 0 { None } else { Some(label as usize) }
    }
}
