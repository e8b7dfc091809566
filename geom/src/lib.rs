//! Planar geometry in meters. Everything here operates in a single metric frame; reprojecting
//! to and from GPS coordinates happens outside this crate.

#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod clip;
mod distance;
mod line;
mod polygon;
mod polyline;
mod pt;
mod repair;
mod ring;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub use crate::clip::LineClip;
pub use crate::distance::Distance;
pub use crate::line::Line;
pub use crate::polygon::Polygon;
pub use crate::pt::{HashablePt2D, Pt2D};
pub use crate::repair::{repair_ring, Repaired};
pub use crate::ring::Ring;

// About 0.4 inches... which is quite tiny on the scale of things. :)
pub const EPSILON_DIST: Distance = Distance::const_meters(0.01);

/// Polygons with less area than this (in m^2) are treated as empty.
pub const AREA_EPSILON: f64 = 1e-6;

/// Tolerance for parametric comparisons along a segment, in the range [0, 1].
pub(crate) const PARAM_EPSILON: f64 = 1e-9;

/// Reduce the precision of an f64. This helps ensure results are exactly reproducible between
/// runs, and that points computed two different ways compare equal.
pub fn trim_f64(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}

/// Serializes a trimmed `f64` as an `i64` of ten-thousandths.
fn serialize_f64<S: Serializer>(x: &f64, s: S) -> Result<S::Ok, S::Error> {
    // We MUST round here, the same as trim_f64. The unit test demonstrates why.
    let int = (x * 10_000.0).round() as i64;
    int.serialize(s)
}

/// Deserializes a trimmed `f64` stored as an `i64`.
fn deserialize_f64<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    let x = <i64>::deserialize(d)?;
    Ok(x as f64 / 10_000.0)
}
