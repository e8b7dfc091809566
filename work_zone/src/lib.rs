//! Lays out temporary traffic control for a lane closure: advance warning signs, a taper of
//! channelizing devices, buffer and work zones along the road, and cones around the closed area.
//!
//! Everything happens in a planar metric frame. Callers reproject to and from GPS coordinates
//! and serialize the resulting `PlanItem`s however they like.

#[macro_use]
extern crate log;

mod builder;
mod centerline;
mod closure;
mod error;
mod perimeter;
mod plan;
mod planner;
mod sampler;
mod speed;

use geom::Distance;

pub use crate::builder::{build_polygon, BuiltPolygon, PolygonRole, Validity};
pub use crate::centerline::{Centerline, Edge};
pub use crate::closure::{analyze_closure, ClosureRange};
pub use crate::error::{ConfigError, GeometryError, PlanError};
pub use crate::perimeter::place_perimeter_devices;
pub use crate::plan::{ItemGeometry, ItemKind, PlanItem, PlanSummary};
pub use crate::planner::LayoutPlanner;
pub use crate::sampler::sample_interval;
pub use crate::speed::{SpeedProfile, SpeedTable};

/// How far past the end of the closure the "End Road Work" sign goes.
pub const END_SIGN_OFFSET: Distance = Distance::const_meters(5.0);

/// Labels for the advance warning signs, closest to the taper first.
pub const ADVANCE_SIGN_LABELS: [&str; 3] =
    ["Road Work Ahead", "Lane Closed Ahead", "Speed Reduction Ahead"];
pub const TAPER_DEVICE_LABEL: &str = "Taper Barrel/Cone";
pub const BUFFER_ZONE_LABEL: &str = "Buffer Space";
pub const WORK_ZONE_LABEL: &str = "Work Area (Center)";
pub const END_SIGN_LABEL: &str = "End Road Work";
pub const PERIMETER_DEVICE_LABEL: &str = "Closure Perimeter Cone";
