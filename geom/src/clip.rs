use geo::algorithm::coordinate_position::{CoordPos, CoordinatePosition};

use crate::line::{segment_hit, SegmentHit};
use crate::{Line, Polygon, Pt2D, PARAM_EPSILON};

/// What's left of a line after clipping it to some polygons. Pieces are ordered by their
/// distance from the start of the line.
#[derive(Clone, Debug, PartialEq)]
pub enum LineClip {
    /// The line misses the polygons entirely.
    Empty,
    /// One connected piece of the line lies inside or along the polygons.
    Segment(Line),
    /// Several disjoint pieces.
    Segments(Vec<Line>),
    /// The line touches the polygons at isolated points, maybe in addition to some pieces.
    Other { pieces: Vec<Line>, touches: Vec<Pt2D> },
}

impl Line {
    /// Clips this line to the union of some polygons. Boundaries count as inside.
    pub fn clip_to(&self, polygons: &[Polygon]) -> LineClip {
        let geoms: Vec<geo::Polygon> = polygons.iter().map(|p| p.clone().into()).collect();
        let (x1, y1) = (self.pt1().x(), self.pt1().y());
        let (dx, dy) = (self.pt2().x() - x1, self.pt2().y() - y1);
        let is_on = |t: f64| {
            let coord = geo::Coordinate {
                x: x1 + t * dx,
                y: y1 + t * dy,
            };
            geoms
                .iter()
                .any(|p| p.coordinate_position(&coord) != CoordPos::Outside)
        };

        // Every place the line crosses or touches a boundary splits it into intervals that are
        // entirely inside or entirely outside.
        let mut params = vec![0.0, 1.0];
        for poly in polygons {
            for ring in poly.rings() {
                for pair in ring.points().windows(2) {
                    match segment_hit(self.pt1(), self.pt2(), pair[0], pair[1]) {
                        SegmentHit::None => {}
                        SegmentHit::Point { t, .. } => params.push(t),
                        SegmentHit::Overlap { t0, t1 } => {
                            params.push(t0);
                            params.push(t1);
                        }
                    }
                }
            }
        }
        params.sort_by(|a, b| a.total_cmp(b));
        params.dedup_by(|b, a| (*b - *a).abs() <= PARAM_EPSILON);

        let mut intervals: Vec<(f64, f64)> = Vec::new();
        for pair in params.windows(2) {
            let (t0, t1) = (pair[0], pair[1]);
            if !is_on((t0 + t1) / 2.0) {
                continue;
            }
            match intervals.last_mut() {
                Some(last) if last.1 == t0 => {
                    last.1 = t1;
                }
                _ => intervals.push((t0, t1)),
            }
        }

        let mut pieces = Vec::new();
        let mut touches = Vec::new();
        for (t0, t1) in intervals.iter().cloned() {
            let (pt1, pt2) = (self.percent_along(t0), self.percent_along(t1));
            // However short, an interval with two distinct ends is still a piece of the line.
            // Only one that collapses after trimming is a point.
            if pt1 != pt2 {
                pieces.push(Line::unchecked_new(pt1, pt2));
            } else {
                touches.push(pt1);
            }
        }
        for t in params {
            let covered = intervals
                .iter()
                .any(|(t0, t1)| t >= *t0 - PARAM_EPSILON && t <= *t1 + PARAM_EPSILON);
            if !covered && is_on(t) {
                touches.push(self.percent_along(t));
            }
        }

        if !touches.is_empty() {
            return LineClip::Other { pieces, touches };
        }
        match pieces.len() {
            0 => LineClip::Empty,
            1 => LineClip::Segment(pieces[0]),
            _ => LineClip::Segments(pieces),
        }
    }
}
