use std::collections::HashSet;
use std::fmt;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::line::{is_collinear, project_param, segment_hit, SegmentHit};
use crate::polyline::PolyLine;
use crate::{Distance, Polygon, Pt2D, PARAM_EPSILON};

/// Maybe a misnomer, but like a PolyLine, but closed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ring {
    // first equals last
    pts: Vec<Pt2D>,
}

impl Ring {
    pub fn new(pts: Vec<Pt2D>) -> Result<Ring> {
        if pts.len() < 4 {
            bail!("Can't make a ring with < 3 distinct points");
        }
        if pts[0] != *pts.last().unwrap() {
            bail!("Can't make a ring with mismatching first/last points");
        }

        if pts.windows(2).any(|pair| pair[0] == pair[1]) {
            bail!("Ring has ~dupe adjacent pts");
        }

        let result = Ring { pts };

        let mut seen_pts = HashSet::new();
        for pt in result.pts.iter().skip(1) {
            seen_pts.insert(pt.to_hashable());
        }
        if seen_pts.len() != result.pts.len() - 1 {
            bail!("Ring has repeat non-adjacent points");
        }

        Ok(result)
    }

    pub fn must_new(pts: Vec<Pt2D>) -> Ring {
        Ring::new(pts).unwrap()
    }

    /// Collapses adjacent duplicate points and closes the ring if the first and last points
    /// differ, then validates as usual.
    pub fn deduping_new(pts: Vec<Pt2D>) -> Result<Ring> {
        Ring::new(close_and_dedupe(pts))
    }

    pub fn points(&self) -> &Vec<Pt2D> {
        &self.pts
    }

    /// The perimeter.
    pub fn length(&self) -> Distance {
        self.to_polyline().length()
    }

    /// Walks `dist` along the ring, starting from the first point. Distances are clamped to
    /// [0, perimeter].
    pub fn dist_along(&self, dist: Distance) -> Pt2D {
        self.to_polyline().clamped_dist_along(dist)
    }

    /// Positive when the points are counter-clockwise.
    pub fn signed_area(&self) -> f64 {
        signed_area(&self.pts)
    }

    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// A ring is simple if no two non-adjacent edges touch, and no pair of adjacent edges folds
    /// back onto itself.
    pub fn is_simple(&self) -> bool {
        is_simple(&self.pts)
    }

    pub fn into_polygon(self) -> Polygon {
        Polygon::with_holes(self, Vec::new())
    }

    fn to_polyline(&self) -> PolyLine {
        PolyLine::unchecked_new(self.pts.clone())
    }
}

impl fmt::Display for Ring {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Ring::new(vec![")?;
        for pt in &self.pts {
            writeln!(f, "  Pt2D::new({}, {}),", pt.x(), pt.y())?;
        }
        write!(f, "])")
    }
}

impl From<Ring> for geo::LineString {
    fn from(ring: Ring) -> Self {
        let coords = ring
            .pts
            .into_iter()
            .map(geo::Coordinate::from)
            .collect::<Vec<_>>();
        Self(coords)
    }
}

pub(crate) fn close_and_dedupe(mut pts: Vec<Pt2D>) -> Vec<Pt2D> {
    pts.dedup();
    if pts.len() > 1 && pts[0] != *pts.last().unwrap() {
        pts.push(pts[0]);
    }
    pts
}

/// Shoelace formula over a closed list of points.
pub(crate) fn signed_area(pts: &[Pt2D]) -> f64 {
    let mut sum = 0.0;
    for pair in pts.windows(2) {
        sum += pair[0].x() * pair[1].y() - pair[1].x() * pair[0].y();
    }
    sum / 2.0
}

/// Works on a closed list of points with no adjacent duplicates.
pub(crate) fn is_simple(pts: &[Pt2D]) -> bool {
    if pts.len() < 4 {
        return false;
    }
    let n = pts.len() - 1;
    for i in 0..n {
        for j in (i + 1)..n {
            let adjacent = j == i + 1 || (i == 0 && j == n - 1);
            let (a1, a2) = (pts[i], pts[i + 1]);
            let (b1, b2) = (pts[j], pts[j + 1]);
            if adjacent {
                if folds_back(a1, a2, b1, b2) {
                    return false;
                }
                continue;
            }
            if segment_hit(a1, a2, b1, b2) != SegmentHit::None {
                return false;
            }
        }
    }
    true
}

/// Two edges share one endpoint. Do they overlap beyond that shared point? In a triangle every
/// pair of edges is adjacent, so this also catches a triangle squashed flat.
fn folds_back(a1: Pt2D, a2: Pt2D, b1: Pt2D, b2: Pt2D) -> bool {
    let (shared, a_other, b_other) = if a2 == b1 {
        (a2, a1, b2)
    } else if b2 == a1 {
        (a1, a2, b1)
    } else {
        // Not actually sharing a point; can only happen with duplicate points
        return segment_hit(a1, a2, b1, b2) != SegmentHit::None;
    };
    if !is_collinear(shared, a_other, b_other) {
        return false;
    }
    // Collinear. It only folds back if both other ends are on the same side of the shared
    // point.
    project_param(shared, a_other, b_other) > PARAM_EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Ring {
        Ring::must_new(vec![
            Pt2D::new(0.0, 0.0),
            Pt2D::new(10.0, 0.0),
            Pt2D::new(10.0, 10.0),
            Pt2D::new(0.0, 10.0),
            Pt2D::new(0.0, 0.0),
        ])
    }

    #[test]
    fn validation() {
        assert!(Ring::new(vec![Pt2D::new(0.0, 0.0), Pt2D::new(1.0, 0.0)]).is_err());
        // Not closed
        assert!(Ring::new(vec![
            Pt2D::new(0.0, 0.0),
            Pt2D::new(1.0, 0.0),
            Pt2D::new(1.0, 1.0),
            Pt2D::new(0.0, 1.0),
        ])
        .is_err());
        // deduping_new fixes both problems
        let ring = Ring::deduping_new(vec![
            Pt2D::new(0.0, 0.0),
            Pt2D::new(1.0, 0.0),
            Pt2D::new(1.0, 0.0),
            Pt2D::new(1.0, 1.0),
        ])
        .unwrap();
        assert_eq!(ring.points().len(), 4);
    }

    #[test]
    fn perimeter_and_area() {
        let ring = square();
        assert_eq!(ring.length(), Distance::meters(40.0));
        assert_eq!(ring.signed_area(), 100.0);
        assert_eq!(ring.dist_along(Distance::meters(15.0)), Pt2D::new(10.0, 5.0));
        assert_eq!(ring.dist_along(Distance::meters(40.0)), Pt2D::new(0.0, 0.0));
        assert_eq!(ring.dist_along(Distance::meters(99.0)), Pt2D::new(0.0, 0.0));
    }

    #[test]
    fn simplicity() {
        assert!(square().is_simple());

        let bowtie = Ring::must_new(vec![
            Pt2D::new(0.0, 0.0),
            Pt2D::new(10.0, 10.0),
            Pt2D::new(10.0, 0.0),
            Pt2D::new(0.0, 10.0),
            Pt2D::new(0.0, 0.0),
        ]);
        assert!(!bowtie.is_simple());

        // Spike folding back over the previous edge
        let spike = Ring::must_new(vec![
            Pt2D::new(0.0, 0.0),
            Pt2D::new(10.0, 0.0),
            Pt2D::new(5.0, 0.0),
            Pt2D::new(5.0, 5.0),
            Pt2D::new(0.0, 0.0),
        ]);
        assert!(!spike.is_simple());

        let flat = Ring::must_new(vec![
            Pt2D::new(0.0, 0.0),
            Pt2D::new(1.0, 0.0),
            Pt2D::new(2.0, 0.0),
            Pt2D::new(0.0, 0.0),
        ]);
        assert!(!flat.is_simple());
    }
}
