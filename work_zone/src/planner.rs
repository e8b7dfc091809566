use std::cmp::{max, min};

use geom::{Distance, Polygon, Pt2D};

use crate::{
    analyze_closure, build_polygon, place_perimeter_devices, sample_interval, Centerline, Edge,
    PlanError, PlanItem, PlanSummary, PolygonRole, SpeedTable, ADVANCE_SIGN_LABELS,
    BUFFER_ZONE_LABEL, END_SIGN_LABEL, END_SIGN_OFFSET, PERIMETER_DEVICE_LABEL,
    TAPER_DEVICE_LABEL, WORK_ZONE_LABEL,
};

/// Generates traffic control plans. Holds nothing but the speed table, so one planner can be
/// shared between threads.
#[derive(Clone, Debug)]
pub struct LayoutPlanner {
    table: SpeedTable,
}

impl LayoutPlanner {
    pub fn new(table: SpeedTable) -> LayoutPlanner {
        LayoutPlanner { table }
    }

    /// Plans the closure of `work_area` on a road bounded by two edges, with a posted `speed` that
    /// must be a key of the speed table. Items come out ordered from upstream to downstream, with the devices around the
    /// closure last.
    pub fn generate_plan(
        &self,
        road_left: &Edge,
        road_right: &Edge,
        work_area: [Pt2D; 4],
        speed: u32,
    ) -> Result<Vec<PlanItem>, PlanError> {
        let profile = self.table.get(speed)?;

        let road = build_polygon(
            &[road_left.near, road_left.far, road_right.far, road_right.near],
            PolygonRole::Road,
        )?;
        let work = match build_polygon(&work_area, PolygonRole::WorkArea) {
            Ok(work) => work,
            Err(err) => {
                warn!("Nothing to plan: {}", err);
                return Ok(Vec::new());
            }
        };

        let mut closure: Vec<Polygon> = Vec::new();
        for r in &road.parts {
            for w in &work.parts {
                closure.extend(r.intersection(w));
            }
        }
        if closure.is_empty() {
            debug!("Work area doesn't overlap the road; only marking its perimeter");
            let items: Vec<PlanItem> = work
                .parts
                .iter()
                .flat_map(|p| {
                    place_perimeter_devices(p, profile.device_spacing, PERIMETER_DEVICE_LABEL)
                })
                .collect();
            info!("Generated plan at speed {}: {}", speed, PlanSummary::new(&items));
            return Ok(items);
        }

        let centerline = Centerline::resolve(road_left, road_right);
        let mut items = Vec::new();
        if let Some(range) = analyze_closure(&centerline, &closure) {
            let (c_start, c_end) = (range.start(), range.end());
            let taper_start = max(Distance::ZERO, c_start - profile.taper_length);
            debug!(
                "Closure runs {} from {} to {} along a {} centerline; taper starts at {}",
                range.length(),
                c_start,
                c_end,
                centerline.length(),
                taper_start
            );

            for (i, label) in ADVANCE_SIGN_LABELS.iter().enumerate() {
                let dist = taper_start - profile.advance_sign_spacing * ((i + 1) as f64);
                if dist >= Distance::ZERO {
                    items.push(PlanItem::sign(*label, centerline.interpolate(dist)));
                }
            }

            if c_start > taper_start && profile.taper_device_count > 0 {
                for pt in sample_interval(
                    &centerline,
                    taper_start,
                    c_start,
                    profile.taper_device_count,
                ) {
                    items.push(PlanItem::channel_device(TAPER_DEVICE_LABEL, pt));
                }
            }

            let buffer_end = min(c_start + profile.buffer_length, c_end);
            if buffer_end > c_start {
                items.push(PlanItem::zone(
                    BUFFER_ZONE_LABEL,
                    centerline.interpolate(c_start),
                    centerline.interpolate(buffer_end),
                ));
            }
            if buffer_end < c_end {
                items.push(PlanItem::zone(
                    WORK_ZONE_LABEL,
                    centerline.interpolate(buffer_end),
                    centerline.interpolate(c_end),
                ));
            }

            let end_sign = c_end + END_SIGN_OFFSET;
            if end_sign <= centerline.length() {
                items.push(PlanItem::sign(
                    END_SIGN_LABEL,
                    centerline.interpolate(end_sign),
                ));
            }
            debug!("{} items along the centerline", items.len());
        } else {
            debug!("Centerline doesn't pass through the closure; only marking its perimeter");
        }

        for part in &closure {
            items.extend(place_perimeter_devices(
                part,
                profile.device_spacing,
                PERIMETER_DEVICE_LABEL,
            ));
        }

        info!("Generated plan at speed {}: {}", speed, PlanSummary::new(&items));
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConfigError, GeometryError, ItemKind, SpeedProfile};

    fn straight_road(length: f64) -> (Edge, Edge) {
        (
            Edge::new(Pt2D::new(0.0, 0.0), Pt2D::new(0.0, length)),
            Edge::new(Pt2D::new(10.0, 0.0), Pt2D::new(10.0, length)),
        )
    }

    fn work_area(x1: f64, y1: f64, x2: f64, y2: f64) -> [Pt2D; 4] {
        [
            Pt2D::new(x1, y1),
            Pt2D::new(x2, y1),
            Pt2D::new(x2, y2),
            Pt2D::new(x1, y2),
        ]
    }

    #[test]
    fn long_road() {
        // Room for all of the advance signs, and a work zone after the buffer
        let (left, right) = straight_road(1000.0);
        let planner = LayoutPlanner::new(SpeedTable::reference());
        let items = planner
            .generate_plan(&left, &right, work_area(2.0, 400.0, 8.0, 500.0), 60)
            .unwrap();

        // taper_start = 400 - 40 = 360; signs at 310, 260, 210
        let signs: Vec<(&str, Pt2D)> = items
            .iter()
            .filter_map(|item| match item {
                PlanItem::Sign { label, position } => Some((label.as_str(), *position)),
                _ => None,
            })
            .collect();
        assert_eq!(
            signs,
            vec![
                ("Road Work Ahead", Pt2D::new(5.0, 310.0)),
                ("Lane Closed Ahead", Pt2D::new(5.0, 260.0)),
                ("Speed Reduction Ahead", Pt2D::new(5.0, 210.0)),
                ("End Road Work", Pt2D::new(5.0, 505.0)),
            ]
        );

        let zones: Vec<&PlanItem> = items
            .iter()
            .filter(|item| item.kind() == ItemKind::Zone)
            .collect();
        assert_eq!(
            zones,
            vec![
                &PlanItem::zone(
                    "Buffer Space",
                    Pt2D::new(5.0, 400.0),
                    Pt2D::new(5.0, 445.0)
                ),
                &PlanItem::zone(
                    "Work Area (Center)",
                    Pt2D::new(5.0, 445.0),
                    Pt2D::new(5.0, 500.0)
                ),
            ]
        );
    }

    #[test]
    fn no_taper_devices() {
        let (left, right) = straight_road(100.0);
        let mut table = SpeedTable::new();
        table
            .insert(30, SpeedProfile::new(20.0, 10.0, 5.0, 4.0, 0))
            .unwrap();
        let items = LayoutPlanner::new(table)
            .generate_plan(&left, &right, work_area(2.0, 50.0, 8.0, 60.0), 30)
            .unwrap();
        assert!(items
            .iter()
            .all(|item| item.label() != "Taper Barrel/Cone"));
    }

    #[test]
    fn errors() {
        let (left, right) = straight_road(50.0);
        let planner = LayoutPlanner::new(SpeedTable::reference());
        assert!(matches!(
            planner.generate_plan(&left, &right, work_area(2.0, 10.0, 8.0, 40.0), 65),
            Err(PlanError::Config(ConfigError::UnknownSpeed { speed: 65 }))
        ));

        // Both edges on top of each other
        assert!(matches!(
            planner.generate_plan(&left, &left, work_area(2.0, 10.0, 8.0, 40.0), 60),
            Err(PlanError::Geometry(GeometryError::DegeneratePolygon {
                role: PolygonRole::Road,
                ..
            }))
        ));
    }
}
