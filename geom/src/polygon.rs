use std::fmt;

use anyhow::Result;
use geo::{Area, BooleanOps};
use serde::{Deserialize, Serialize};

use crate::{Distance, Pt2D, Ring, AREA_EPSILON};

/// A simple polygon: one outer ring, optionally with holes.
#[derive(PartialEq, Serialize, Deserialize, Clone, Debug)]
pub struct Polygon {
    exterior: Ring,
    holes: Vec<Ring>,
}

impl Polygon {
    pub fn with_holes(exterior: Ring, holes: Vec<Ring>) -> Polygon {
        Polygon { exterior, holes }
    }

    /// Top-left at the origin.
    pub fn rectangle(width: f64, height: f64) -> Polygon {
        Ring::must_new(vec![
            Pt2D::new(0.0, 0.0),
            Pt2D::new(width, 0.0),
            Pt2D::new(width, height),
            Pt2D::new(0.0, height),
            Pt2D::new(0.0, 0.0),
        ])
        .into_polygon()
    }

    pub fn exterior(&self) -> &Ring {
        &self.exterior
    }

    pub fn holes(&self) -> &Vec<Ring> {
        &self.holes
    }

    /// The exterior ring first, then any holes.
    pub fn rings(&self) -> impl Iterator<Item = &Ring> {
        std::iter::once(&self.exterior).chain(self.holes.iter())
    }

    /// Length of the outer ring. Holes don't count.
    pub fn perimeter(&self) -> Distance {
        self.exterior.length()
    }

    /// Usually m^2
    pub fn area(&self) -> f64 {
        // Don't use signed_area, since we may work with polygons that have different orientations
        self.to_geo().unsigned_area()
    }

    /// The overlap of two polygons. Slivers without meaningful area are dropped.
    pub fn intersection(&self, other: &Polygon) -> Vec<Polygon> {
        from_multi(self.to_geo().intersection(&other.to_geo()))
    }

    /// Union all of the polygons together.
    pub fn union_all(mut list: Vec<Polygon>) -> Vec<Polygon> {
        let first = match list.pop() {
            Some(p) => p,
            None => return Vec::new(),
        };
        let mut result = geo::MultiPolygon(vec![first.into()]);
        for p in list {
            result = result.union(&geo::MultiPolygon(vec![p.into()]));
        }
        from_multi(result)
    }

    /// Does the interior of this polygon overlap the other one's by more than a sliver?
    pub fn overlaps(&self, other: &Polygon) -> bool {
        self.to_geo().intersection(&other.to_geo()).unsigned_area() > AREA_EPSILON
    }

    // A less verbose way of invoking the From/Into impl. Note this hides a potentially expensive
    // clone.
    pub(crate) fn to_geo(&self) -> geo::Polygon {
        self.clone().into()
    }
}

impl fmt::Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Polygon with {} holes", self.holes.len())?;
        for ring in self.rings() {
            writeln!(f, "{}", ring)?;
        }
        Ok(())
    }
}

impl From<Polygon> for geo::Polygon {
    fn from(poly: Polygon) -> Self {
        let interiors: Vec<geo::LineString> =
            poly.holes.into_iter().map(geo::LineString::from).collect();
        Self::new(poly.exterior.into(), interiors)
    }
}

impl TryFrom<geo::Polygon> for Polygon {
    type Error = anyhow::Error;

    fn try_from(poly: geo::Polygon) -> Result<Self> {
        let to_ring = |ls: &geo::LineString| {
            Ring::deduping_new(ls.coords().map(|c| Pt2D::from(*c)).collect())
        };
        let exterior = to_ring(poly.exterior())?;
        let mut holes = Vec::new();
        for hole in poly.interiors() {
            // A hole that collapses after trimming precision isn't a hole anymore
            if let Ok(ring) = to_ring(hole) {
                if ring.area() > AREA_EPSILON {
                    holes.push(ring);
                }
            }
        }
        Ok(Polygon::with_holes(exterior, holes))
    }
}

fn from_multi(multi: geo::MultiPolygon) -> Vec<Polygon> {
    let mut result = Vec::new();
    for p in multi {
        if p.unsigned_area() <= AREA_EPSILON {
            continue;
        }
        match Polygon::try_from(p) {
            Ok(poly) => result.push(poly),
            Err(err) => warn!("Dropping part of a polygon operation result: {}", err),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x1: f64, y1: f64, x2: f64, y2: f64) -> Polygon {
        Ring::must_new(vec![
            Pt2D::new(x1, y1),
            Pt2D::new(x2, y1),
            Pt2D::new(x2, y2),
            Pt2D::new(x1, y2),
            Pt2D::new(x1, y1),
        ])
        .into_polygon()
    }

    #[test]
    fn basic_measurements() {
        let p = Polygon::rectangle(6.0, 30.0);
        assert_eq!(p.area(), 180.0);
        assert_eq!(p.perimeter(), Distance::meters(72.0));
    }

    #[test]
    fn intersections() {
        let road = square(0.0, 0.0, 10.0, 50.0);
        let work = square(2.0, 10.0, 8.0, 40.0);
        let overlap = road.intersection(&work);
        assert_eq!(overlap.len(), 1);
        assert!((overlap[0].area() - 180.0).abs() < 1e-6);
        assert_eq!(overlap[0].perimeter(), Distance::meters(72.0));

        let elsewhere = square(20.0, 0.0, 30.0, 10.0);
        assert!(road.intersection(&elsewhere).is_empty());
        assert!(!road.overlaps(&elsewhere));
        assert!(road.overlaps(&work));

        // Only sharing an edge has no area
        let neighbor = square(10.0, 0.0, 20.0, 50.0);
        assert!(road.intersection(&neighbor).is_empty());
    }

    #[test]
    fn unions() {
        let merged = Polygon::union_all(vec![
            square(0.0, 0.0, 10.0, 10.0),
            square(5.0, 0.0, 15.0, 10.0),
        ]);
        assert_eq!(merged.len(), 1);
        assert!((merged[0].area() - 150.0).abs() < 1e-6);

        let apart = Polygon::union_all(vec![
            square(0.0, 0.0, 1.0, 1.0),
            square(5.0, 5.0, 6.0, 6.0),
        ]);
        assert_eq!(apart.len(), 2);
        assert!(Polygon::union_all(Vec::new()).is_empty());
    }

    #[test]
    fn holes_survive_conversion() {
        let outer = square(0.0, 0.0, 10.0, 10.0);
        let hole = square(4.0, 4.0, 6.0, 6.0);
        let poly = Polygon::with_holes(outer.exterior().clone(), vec![hole.exterior().clone()]);
        assert!((poly.area() - 96.0).abs() < 1e-6);

        let copy = Polygon::try_from(geo::Polygon::from(poly.clone())).unwrap();
        assert_eq!(copy.holes().len(), 1);
        assert_eq!(copy.perimeter(), Distance::meters(40.0));
        assert!((copy.area() - 96.0).abs() < 1e-6);
    }
}
