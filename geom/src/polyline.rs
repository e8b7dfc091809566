use crate::{Distance, Pt2D};

/// An open sequence of points. Only used internally to walk along rings.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PolyLine {
    pts: Vec<Pt2D>,
    length: Distance,
}

impl PolyLine {
    /// Doesn't check for duplicates. Use at your own risk.
    pub(crate) fn unchecked_new(pts: Vec<Pt2D>) -> PolyLine {
        assert!(pts.len() >= 2);
        let length: Distance = pts.windows(2).map(|pair| pair[0].dist_to(pair[1])).sum();

        PolyLine { pts, length }
    }

    pub(crate) fn length(&self) -> Distance {
        self.length
    }

    pub(crate) fn first_pt(&self) -> Pt2D {
        self.pts[0]
    }

    pub(crate) fn last_pt(&self) -> Pt2D {
        *self.pts.last().unwrap()
    }

    /// The point `dist_along` from the start. Distances past either end produce that end.
    pub(crate) fn clamped_dist_along(&self, dist_along: Distance) -> Pt2D {
        if dist_along <= Distance::ZERO {
            return self.first_pt();
        }
        let mut dist_left = dist_along.inner_meters();
        for pair in self.pts.windows(2) {
            let length = pair[0].raw_dist_to(pair[1]);
            if dist_left <= length {
                let percent = dist_left / length;
                return Pt2D::new(
                    pair[0].x() + percent * (pair[1].x() - pair[0].x()),
                    pair[0].y() + percent * (pair[1].y() - pair[0].y()),
                );
            }
            dist_left -= length;
        }
        self.last_pt()
    }
}
