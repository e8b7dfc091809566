use geom::{Distance, Polygon};

use crate::PlanItem;

/// Walks around the outside of a polygon from its first corner, dropping a device every
/// `spacing`. The spacing is stretched slightly so the devices come out even; since the walk ends
/// where it started, the first and last devices are at the same spot. A polygon with a perimeter
/// shorter than the spacing gets one device halfway around.
pub fn place_perimeter_devices(poly: &Polygon, spacing: Distance, label: &str) -> Vec<PlanItem> {
    if spacing <= Distance::ZERO {
        warn!("Can't place perimeter devices with spacing {}", spacing);
        return Vec::new();
    }
    let perimeter = poly.perimeter();
    let ring = poly.exterior();
    if perimeter == Distance::ZERO {
        return Vec::new();
    }
    if perimeter < spacing {
        return vec![PlanItem::channel_device(
            label,
            ring.dist_along(perimeter / 2.0),
        )];
    }

    let n = (perimeter / spacing).floor() as usize;
    let step = perimeter / (n.max(1) as f64);
    (0..=n)
        .map(|i| PlanItem::channel_device(label, ring.dist_along(step * (i as f64))))
        .collect()
}
