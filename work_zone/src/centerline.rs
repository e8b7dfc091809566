use serde::{Deserialize, Serialize};

use geom::{Distance, Line, Pt2D};

/// One side of a road segment. Traffic approaching the closure passes `near` before `far`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub near: Pt2D,
    pub far: Pt2D,
}

impl Edge {
    pub fn new(near: Pt2D, far: Pt2D) -> Edge {
        Edge { near, far }
    }

    pub fn reversed(self) -> Edge {
        Edge {
            near: self.far,
            far: self.near,
        }
    }
}

/// The 1D axis that everything gets placed along, running in the direction of travel.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Centerline {
    start: Pt2D,
    end: Pt2D,
    // None when the two ends are too close to form a line
    line: Option<Line>,
}

impl Centerline {
    pub fn new(start: Pt2D, end: Pt2D) -> Centerline {
        Centerline {
            start,
            end,
            line: Line::new(start, end).ok(),
        }
    }

    /// Runs down the middle of the road, from the near ends of both edges to the far ends.
    pub fn resolve(left: &Edge, right: &Edge) -> Centerline {
        let result = Centerline::new(
            left.near.midpoint(right.near),
            left.far.midpoint(right.far),
        );

        // If the edges were digitized in opposite directions, pairing near with far would give a
        // much longer line.
        let crossed = left.near.midpoint(right.far).dist_to(left.far.midpoint(right.near));
        if result.length() * 2.0 < crossed {
            warn!(
                "Road edges look misoriented; centerline is {} long, but pairing the other ends \
                 gives {}",
                result.length(),
                crossed
            );
        }
        result
    }

    pub fn start(&self) -> Pt2D {
        self.start
    }

    pub fn end(&self) -> Pt2D {
        self.end
    }

    /// Zero if the ends are closer than `EPSILON_DIST`.
    pub fn length(&self) -> Distance {
        match self.line {
            Some(ref l) => l.length(),
            None => Distance::ZERO,
        }
    }

    pub fn line(&self) -> Option<&Line> {
        self.line.as_ref()
    }

    /// How far along the centerline is the closest point to `pt`? Always in [0, length].
    pub fn project(&self, pt: Pt2D) -> Distance {
        match self.line {
            Some(ref l) => l.project_pt(pt).clamp_to(Distance::ZERO, l.length()),
            None => Distance::ZERO,
        }
    }

    /// The point `dist` along the centerline. Distances outside [0, length] are clamped.
    pub fn interpolate(&self, dist: Distance) -> Pt2D {
        match self.line {
            Some(ref l) => l.clamped_dist_along(dist),
            None => self.start,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(x1: f64, y1: f64, x2: f64, y2: f64) -> Edge {
        Edge::new(Pt2D::new(x1, y1), Pt2D::new(x2, y2))
    }

    #[test]
    fn middle_of_the_road() {
        let c = Centerline::resolve(&edge(0.0, 0.0, 0.0, 50.0), &edge(10.0, 0.0, 10.0, 50.0));
        assert_eq!(c.start(), Pt2D::new(5.0, 0.0));
        assert_eq!(c.end(), Pt2D::new(5.0, 50.0));
        assert_eq!(c.length(), Distance::meters(50.0));

        assert_eq!(c.project(Pt2D::new(2.0, 10.0)), Distance::meters(10.0));
        assert_eq!(c.project(Pt2D::new(8.0, -20.0)), Distance::ZERO);
        assert_eq!(c.project(Pt2D::new(8.0, 70.0)), Distance::meters(50.0));

        assert_eq!(c.interpolate(Distance::meters(45.0)), Pt2D::new(5.0, 45.0));
        assert_eq!(c.interpolate(Distance::meters(-3.0)), Pt2D::new(5.0, 0.0));
        assert_eq!(c.interpolate(Distance::meters(60.0)), Pt2D::new(5.0, 50.0));
    }

    #[test]
    fn misoriented_edges_are_kept() {
        // The right edge runs backwards, so the centerline collapses to a point
        let c = Centerline::resolve(
            &edge(0.0, 0.0, 0.0, 50.0),
            &edge(10.0, 0.0, 10.0, 50.0).reversed(),
        );
        assert_eq!(c.start(), Pt2D::new(5.0, 25.0));
        assert_eq!(c.end(), Pt2D::new(5.0, 25.0));
        assert_eq!(c.length(), Distance::ZERO);
    }

    #[test]
    fn zero_length() {
        let pt = Pt2D::new(3.0, 4.0);
        let c = Centerline::new(pt, pt);
        assert_eq!(c.length(), Distance::ZERO);
        assert!(c.line().is_none());
        assert_eq!(c.project(Pt2D::new(100.0, 100.0)), Distance::ZERO);
        assert_eq!(c.interpolate(Distance::meters(10.0)), pt);
    }
}
