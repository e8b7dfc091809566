use std::fmt;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::{Distance, Pt2D, EPSILON_DIST, PARAM_EPSILON};

/// Perpendicular distances below this (in meters) count as collinear.
const COLLINEAR_EPSILON: f64 = 1e-7;

/// A line segment.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Line(Pt2D, Pt2D);

impl Line {
    /// Creates a line segment between two points, which must not be the same point.
    pub fn new(pt1: Pt2D, pt2: Pt2D) -> Result<Line> {
        if pt1.raw_dist_to(pt2) < EPSILON_DIST.inner_meters() {
            bail!("Line from {} to {} too small", pt1, pt2);
        }
        Ok(Line(pt1, pt2))
    }

    /// Skips the length check. Only for pieces cut out of an existing line, which can be shorter
    /// than `EPSILON_DIST` while still having two distinct ends.
    pub(crate) fn unchecked_new(pt1: Pt2D, pt2: Pt2D) -> Line {
        Line(pt1, pt2)
    }

    /// Equivalent to `Line::new(pt1, pt2).unwrap()`. Use this to effectively document an
    /// assertion at the call-site.
    pub fn must_new(pt1: Pt2D, pt2: Pt2D) -> Line {
        Line::new(pt1, pt2).unwrap()
    }

    pub fn pt1(&self) -> Pt2D {
        self.0
    }

    pub fn pt2(&self) -> Pt2D {
        self.1
    }

    pub fn length(&self) -> Distance {
        self.pt1().dist_to(self.pt2())
    }

    /// The point `dist` along the line. Out-of-range distances clamp to the endpoints.
    pub fn clamped_dist_along(&self, dist: Distance) -> Pt2D {
        let len = self.length();
        self.percent_along(dist.clamp_to(Distance::ZERO, len) / len)
    }

    pub(crate) fn percent_along(&self, percent: f64) -> Pt2D {
        Pt2D::new(
            self.pt1().x() + percent * (self.pt2().x() - self.pt1().x()),
            self.pt1().y() + percent * (self.pt2().y() - self.pt1().y()),
        )
    }

    /// Finds the distance along this line of the closest point to `pt`. Points beyond either end
    /// project to that end.
    pub fn project_pt(&self, pt: Pt2D) -> Distance {
        let t = project_param(self.pt1(), self.pt2(), pt).clamp(0.0, 1.0);
        t * self.length()
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Line::new(")?;
        writeln!(f, "  Pt2D::new({}, {}),", self.0.x(), self.0.y())?;
        writeln!(f, "  Pt2D::new({}, {}),", self.1.x(), self.1.y())?;
        write!(f, ")")
    }
}

/// How two segments `a1-a2` and `b1-b2` meet. Parameters are fractions along each segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum SegmentHit {
    None,
    /// A single crossing or touching point, at `t` along `a` and `u` along `b`.
    Point { t: f64, u: f64 },
    /// The segments are collinear and share `[t0, t1]` along `a`.
    Overlap { t0: f64, t1: f64 },
}

/// Twice the signed area of the triangle `o, a, b`.
pub(crate) fn cross(o: Pt2D, a: Pt2D, b: Pt2D) -> f64 {
    (a.x() - o.x()) * (b.y() - o.y()) - (a.y() - o.y()) * (b.x() - o.x())
}

/// The unclamped fraction along `a1-a2` of the projection of `pt`.
pub(crate) fn project_param(a1: Pt2D, a2: Pt2D, pt: Pt2D) -> f64 {
    let dx = a2.x() - a1.x();
    let dy = a2.y() - a1.y();
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return 0.0;
    }
    ((pt.x() - a1.x()) * dx + (pt.y() - a1.y()) * dy) / len_sq
}

/// Is `pt` within `COLLINEAR_EPSILON` of the infinite line through `a1-a2`?
pub(crate) fn is_collinear(a1: Pt2D, a2: Pt2D, pt: Pt2D) -> bool {
    let len = a1.raw_dist_to(a2);
    if len == 0.0 {
        return a1.raw_dist_to(pt) <= COLLINEAR_EPSILON;
    }
    (cross(a1, a2, pt) / len).abs() <= COLLINEAR_EPSILON
}

pub(crate) fn segment_hit(a1: Pt2D, a2: Pt2D, b1: Pt2D, b2: Pt2D) -> SegmentHit {
    let r = (a2.x() - a1.x(), a2.y() - a1.y());
    let s = (b2.x() - b1.x(), b2.y() - b1.y());
    let denom = r.0 * s.1 - r.1 * s.0;
    let qp = (b1.x() - a1.x(), b1.y() - a1.y());

    let r_len = (r.0 * r.0 + r.1 * r.1).sqrt();
    if denom.abs() > COLLINEAR_EPSILON * r_len {
        let t = (qp.0 * s.1 - qp.1 * s.0) / denom;
        let u = (qp.0 * r.1 - qp.1 * r.0) / denom;
        let in_range = |x: f64| (-PARAM_EPSILON..=1.0 + PARAM_EPSILON).contains(&x);
        if in_range(t) && in_range(u) {
            return SegmentHit::Point {
                t: t.clamp(0.0, 1.0),
                u: u.clamp(0.0, 1.0),
            };
        }
        return SegmentHit::None;
    }

    // Parallel. Only collinear segments can meet.
    if !is_collinear(a1, a2, b1) || !is_collinear(a1, a2, b2) {
        return SegmentHit::None;
    }
    let p1 = project_param(a1, a2, b1);
    let p2 = project_param(a1, a2, b2);
    let t0 = p1.min(p2).max(0.0);
    let t1 = p1.max(p2).min(1.0);
    if t0 > t1 + PARAM_EPSILON {
        return SegmentHit::None;
    }
    if (t1 - t0).abs() <= PARAM_EPSILON {
        // Collinear, touching end-to-end
        let touch = Pt2D::new(a1.x() + t0 * r.0, a1.y() + t0 * r.1);
        return SegmentHit::Point {
            t: t0,
            u: project_param(b1, b2, touch).clamp(0.0, 1.0),
        };
    }
    SegmentHit::Overlap { t0, t1 }
}
