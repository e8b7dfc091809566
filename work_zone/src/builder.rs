use std::fmt;

use serde::{Deserialize, Serialize};

use geom::{repair_ring, Polygon, Pt2D, Repaired};

use crate::GeometryError;

/// Which polygon is being built, for error messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PolygonRole {
    Road,
    WorkArea,
}

impl fmt::Display for PolygonRole {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PolygonRole::Road => write!(f, "road"),
            PolygonRole::WorkArea => write!(f, "work area"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Validity {
    /// The points already formed a simple polygon.
    Valid,
    /// The points crossed over themselves or had spikes, and had to be fixed.
    Repaired,
}

/// One or more simple, non-empty polygons. Only a repaired input can have more than one part.
#[derive(Clone, Debug, PartialEq)]
pub struct BuiltPolygon {
    pub parts: Vec<Polygon>,
    pub validity: Validity,
}

/// Makes polygons out of corner points, repairing self-intersections if needed. The points
/// don't need to be closed.
pub fn build_polygon(pts: &[Pt2D], role: PolygonRole) -> Result<BuiltPolygon, GeometryError> {
    let degenerate = |reason: String| GeometryError::DegeneratePolygon { role, reason };
    if pts.len() < 3 {
        return Err(degenerate(format!(
            "need at least 3 points, got {}",
            pts.len()
        )));
    }

    match repair_ring(pts.to_vec()).map_err(|err| degenerate(err.to_string()))? {
        Repaired::Valid(poly) => Ok(BuiltPolygon {
            parts: vec![poly],
            validity: Validity::Valid,
        }),
        Repaired::Fixed(parts) => {
            warn!(
                "The {} polygon isn't simple; repaired into {} part(s)",
                role,
                parts.len()
            );
            Ok(BuiltPolygon {
                parts,
                validity: Validity::Repaired,
            })
        }
    }
}
